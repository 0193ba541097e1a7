use crate::{error::GENERIC_ERROR, Error, Result};
use std::sync::{Mutex, PoisonError};
use zbus::{
    blocking::{Connection, MessageIterator},
    fdo::RequestNameFlags,
    message, Message,
};

pub const SENDER_NAME: &str = "org.example.NotificationSender";

pub trait Transport {
    fn send_and_wait(&self, message: Message) -> Result<Message>;
}

enum State {
    Idle,
    Connected(Connection),
    Failed(Error),
}

// A failed connect is kept and returned by every later send.
pub struct BusSession {
    state: Mutex<State>,
}

impl Default for BusSession {
    fn default() -> Self {
        Self::new()
    }
}

impl BusSession {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State::Idle),
        }
    }

    pub fn connect() -> Result<Self> {
        let session = Self::new();
        {
            let mut state = session.state.lock().unwrap_or_else(PoisonError::into_inner);
            Self::acquire(&mut state)?;
        }
        Ok(session)
    }

    pub fn is_connected(&self) -> bool {
        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        matches!(*state, State::Connected(_))
    }

    pub fn unique_name(&self) -> Option<String> {
        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        match &*state {
            State::Connected(conn) => conn.unique_name().map(|name| name.to_string()),
            _ => None,
        }
    }

    fn acquire(state: &mut State) -> Result<&Connection> {
        if let State::Idle = state {
            *state = match open() {
                Ok(conn) => State::Connected(conn),
                Err(e) => {
                    log::debug!("Session bus unavailable: {e}");
                    State::Failed(e)
                }
            };
        }

        match state {
            State::Connected(conn) => Ok(conn),
            State::Failed(e) => Err(e.clone()),
            State::Idle => Err(Error::Connection {
                name: GENERIC_ERROR.to_string(),
                message: "Failed to connect to the D-Bus session bus.".to_string(),
            }),
        }
    }
}

fn open() -> Result<Connection> {
    let conn = Connection::session().map_err(Error::connection)?;

    let reply = conn
        .request_name_with_flags(SENDER_NAME, RequestNameFlags::ReplaceExisting.into())
        .map_err(Error::name_registration)?;

    log::debug!(
        "Connected to session bus as {:?}, {SENDER_NAME}: {reply:?}",
        conn.unique_name()
    );

    Ok(conn)
}

impl Transport for BusSession {
    fn send_and_wait(&self, message: Message) -> Result<Message> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let conn = Self::acquire(&mut state)?;

        let serial = message.primary_header().serial_num();
        // Subscribe before sending so the reply cannot slip past.
        let incoming = MessageIterator::from(conn.clone());
        conn.send(&message).map_err(Error::delivery)?;

        for msg in incoming {
            let msg = msg.map_err(Error::delivery)?;
            if msg.header().reply_serial() == Some(serial) {
                return check_reply(msg);
            }
        }

        Err(Error::Delivery {
            name: "org.freedesktop.DBus.Error.Disconnected".to_string(),
            message: "Connection closed before a reply was received".to_string(),
        })
    }
}

pub fn check_reply(reply: Message) -> Result<Message> {
    if reply.message_type() != message::Type::Error {
        return Ok(reply);
    }

    let name = reply
        .header()
        .error_name()
        .map(|name| name.to_string())
        .unwrap_or_else(|| GENERIC_ERROR.to_string());
    let message = reply
        .body()
        .deserialize::<&str>()
        .map(ToString::to_string)
        .unwrap_or_default();

    Err(Error::Delivery { name, message })
}
