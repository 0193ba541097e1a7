mod bus;
mod error;
mod hints;
mod notification;

pub use bus::{check_reply, BusSession, Transport, SENDER_NAME};
pub use error::{Error, Result};
pub use hints::HintMap;
pub use notification::{
    Action, Notification, NotificationBuilder, Urgency, DEFAULT_APP_NAME, DEFAULT_ICON,
    DEFAULT_TIMEOUT, DEFAULT_URGENCY, INTERFACE, METHOD, PATH, SERVICE,
};
