use zbus::DBusError;

pub type Result<T> = std::result::Result<T, Error>;

pub(crate) const GENERIC_ERROR: &str = "org.freedesktop.DBus.Error.Failed";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("Connection Error ({name}): {message}")]
    Connection { name: String, message: String },

    #[error("Name Error ({name}): {message}")]
    NameRegistration { name: String, message: String },

    #[error("Failed to create message for the notification: {0}")]
    MessageCreation(String),

    #[error("DBus Error ({name}): {message}")]
    Delivery { name: String, message: String },
}

impl Error {
    pub fn connection(e: zbus::Error) -> Self {
        let (name, message) = describe(e);
        Self::Connection { name, message }
    }

    pub fn name_registration(e: zbus::Error) -> Self {
        let (name, message) = describe(e);
        Self::NameRegistration { name, message }
    }

    pub fn message_creation(e: zbus::Error) -> Self {
        Self::MessageCreation(e.to_string())
    }

    pub fn delivery(e: zbus::Error) -> Self {
        let (name, message) = describe(e);
        Self::Delivery { name, message }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Connection { name, .. }
            | Self::NameRegistration { name, .. }
            | Self::Delivery { name, .. } => Some(name),
            Self::MessageCreation(_) => None,
        }
    }
}

fn describe(e: zbus::Error) -> (String, String) {
    match e {
        zbus::Error::MethodError(name, description, _) => {
            (name.to_string(), description.unwrap_or_default())
        }
        zbus::Error::FDO(e) => (
            e.name().to_string(),
            e.description().unwrap_or_default().to_string(),
        ),
        e => (GENERIC_ERROR.to_string(), e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delivery_display() {
        let err = Error::Delivery {
            name: "org.freedesktop.DBus.Error.ServiceUnknown".into(),
            message: "The name is not activatable".into(),
        };
        assert_eq!(
            err.to_string(),
            "DBus Error (org.freedesktop.DBus.Error.ServiceUnknown): The name is not activatable"
        );
    }

    #[test]
    fn fdo_errors_keep_their_name() {
        let err = Error::name_registration(zbus::Error::FDO(Box::new(
            zbus::fdo::Error::AccessDenied("not allowed to own name".into()),
        )));
        assert_eq!(
            err,
            Error::NameRegistration {
                name: "org.freedesktop.DBus.Error.AccessDenied".into(),
                message: "not allowed to own name".into(),
            }
        );
    }

    #[test]
    fn other_errors_fall_back_to_failed() {
        let err = Error::connection(zbus::Error::Unsupported);
        assert_eq!(err.name(), Some(GENERIC_ERROR));
        assert!(matches!(err, Error::Connection { .. }));
    }

    #[test]
    fn message_creation_has_no_name() {
        let err = Error::message_creation(zbus::Error::InvalidReply);
        assert_eq!(err.name(), None);
        assert!(err
            .to_string()
            .starts_with("Failed to create message for the notification"));
    }
}
