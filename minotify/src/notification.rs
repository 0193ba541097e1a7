use crate::{bus::Transport, hints::HintMap, Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use zbus::{zvariant::Value, Message};

pub const SERVICE: &str = "org.freedesktop.Notifications";
pub const PATH: &str = "/org/freedesktop/Notifications";
pub const INTERFACE: &str = "org.freedesktop.Notifications";
pub const METHOD: &str = "Notify";

pub const DEFAULT_APP_NAME: &str = "MinimalNotificationApp";
pub const DEFAULT_ICON: &str = "dialog-information";
pub const DEFAULT_TIMEOUT: i32 = 5000;
pub const DEFAULT_URGENCY: u8 = 1;

#[derive(PartialEq, Eq, Default, Debug, Clone, Copy)]
pub enum Urgency {
    Low,
    #[default]
    Normal,
    Critical,
}

impl From<Urgency> for u8 {
    fn from(urgency: Urgency) -> Self {
        match urgency {
            Urgency::Low => 0,
            Urgency::Normal => 1,
            Urgency::Critical => 2,
        }
    }
}

impl TryFrom<u8> for Urgency {
    type Error = u8;

    fn try_from(value: u8) -> std::result::Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Low),
            1 => Ok(Self::Normal),
            2 => Ok(Self::Critical),
            n => Err(n),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub key: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    app_name: String,
    replaces_id: u32,
    icon: String,
    summary: String,
    body: String,
    actions: Vec<Action>,
    hints: BTreeMap<String, String>,
    urgency: u8,
    timeout: i32,
}

impl Default for Notification {
    fn default() -> Self {
        NotificationBuilder::default().build()
    }
}

impl Notification {
    pub fn builder() -> NotificationBuilder {
        NotificationBuilder::default()
    }

    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    pub fn replaces_id(&self) -> u32 {
        self.replaces_id
    }

    pub fn icon(&self) -> &str {
        &self.icon
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn actions(&self) -> impl Iterator<Item = (&str, &str)> {
        self.actions
            .iter()
            .map(|action| (action.key.as_str(), action.label.as_str()))
    }

    pub fn hints(&self) -> &BTreeMap<String, String> {
        &self.hints
    }

    pub fn urgency(&self) -> u8 {
        self.urgency
    }

    pub fn timeout(&self) -> i32 {
        self.timeout
    }

    fn flat_actions(&self) -> Vec<&str> {
        self.actions
            .iter()
            .flat_map(|action| [action.key.as_str(), action.label.as_str()])
            .collect()
    }

    fn hint_map(&self) -> HintMap<'_> {
        let mut hints = HintMap::with_capacity(self.hints.len() + 1);
        if self.urgency != DEFAULT_URGENCY {
            hints.push("urgency", Value::U8(self.urgency));
        }
        self.hints
            .iter()
            .for_each(|(key, value)| hints.push(key, Value::from(value.as_str())));
        hints
    }

    fn check_strings(&self) -> Result<()> {
        let strings = [
            ("app name", self.app_name.as_str()),
            ("icon", self.icon.as_str()),
            ("summary", self.summary.as_str()),
            ("body", self.body.as_str()),
        ]
        .into_iter()
        .chain(self.actions.iter().flat_map(|action| {
            [("action", action.key.as_str()), ("action", action.label.as_str())]
        }))
        .chain(
            self.hints
                .iter()
                .flat_map(|(key, value)| [("hint", key.as_str()), ("hint", value.as_str())]),
        );

        for (field, value) in strings {
            if value.contains('\0') {
                return Err(Error::MessageCreation(format!(
                    "{field} contains a NUL byte: {value:?}"
                )));
            }
        }

        Ok(())
    }

    pub fn to_message(&self) -> Result<Message> {
        // D-Bus strings cannot carry NUL, the bus drops the connection on them.
        self.check_strings()?;

        let body = (
            self.app_name.as_str(),
            self.replaces_id,
            self.icon.as_str(),
            self.summary.as_str(),
            self.body.as_str(),
            self.flat_actions(),
            self.hint_map(),
            self.timeout,
        );

        Message::method_call(PATH, METHOD)
            .and_then(|builder| builder.destination(SERVICE))
            .and_then(|builder| builder.interface(INTERFACE))
            .and_then(|builder| builder.build(&body))
            .map_err(Error::message_creation)
    }

    pub fn send<T>(&self, transport: &T) -> Result<()>
    where
        T: Transport + ?Sized,
    {
        let reply = transport.send_and_wait(self.to_message()?)?;

        match reply.body().deserialize::<u32>() {
            Ok(id) => log::debug!("Notification \"{}\" delivered with ID: {id}", self.summary),
            Err(e) => log::warn!("Unexpected Notify reply: {e}"),
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationBuilder {
    app_name: String,
    replaces_id: u32,
    icon: String,
    summary: String,
    body: String,
    actions: Vec<Action>,
    hints: BTreeMap<String, String>,
    urgency: u8,
    timeout: i32,
}

impl Default for NotificationBuilder {
    fn default() -> Self {
        Self {
            app_name: DEFAULT_APP_NAME.to_string(),
            replaces_id: 0,
            icon: DEFAULT_ICON.to_string(),
            summary: String::new(),
            body: String::new(),
            actions: Vec::new(),
            hints: BTreeMap::new(),
            urgency: DEFAULT_URGENCY,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl NotificationBuilder {
    pub fn new<T>(app_name: T) -> Self
    where
        T: Into<String>,
    {
        Self {
            app_name: app_name.into(),
            ..Default::default()
        }
    }

    pub fn replaces_id(mut self, id: u32) -> Self {
        self.replaces_id = id;
        self
    }

    pub fn summary<T>(mut self, summary: T) -> Self
    where
        T: Into<String>,
    {
        self.summary = summary.into();
        self
    }

    pub fn body<T>(mut self, body: T) -> Self
    where
        T: Into<String>,
    {
        self.body = body.into();
        self
    }

    pub fn icon<T>(mut self, icon: T) -> Self
    where
        T: Into<String>,
    {
        self.icon = icon.into();
        self
    }

    pub fn timeout(mut self, timeout_ms: i32) -> Self {
        self.timeout = timeout_ms;
        self
    }

    pub fn action<K, L>(mut self, key: K, label: L) -> Self
    where
        K: Into<String>,
        L: Into<String>,
    {
        self.actions.push(Action {
            key: key.into(),
            label: label.into(),
        });
        self
    }

    pub fn hint<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.hints.insert(key.into(), value.into());
        self
    }

    pub fn urgency<U>(mut self, urgency: U) -> Self
    where
        U: Into<u8>,
    {
        self.urgency = urgency.into();
        self
    }

    pub fn build(self) -> Notification {
        Notification {
            app_name: self.app_name,
            replaces_id: self.replaces_id,
            icon: self.icon,
            summary: self.summary,
            body: self.body,
            actions: self.actions,
            hints: self.hints,
            urgency: self.urgency,
            timeout: self.timeout,
        }
    }
}

impl From<NotificationBuilder> for Notification {
    fn from(builder: NotificationBuilder) -> Self {
        builder.build()
    }
}
