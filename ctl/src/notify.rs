use crossbeam_channel::RecvTimeoutError;
use minotify::{BusSession, Notification};
use std::{thread, time::Duration};

pub fn emit(notifications: Vec<Notification>, deadline: Option<Duration>) -> anyhow::Result<()> {
    let session = BusSession::new();

    let Some(deadline) = deadline else {
        for notification in &notifications {
            notification.send(&session)?;
        }
        return Ok(());
    };

    // The bus wait itself is unbounded, so it runs on a worker we can walk away from.
    let (sender, receiver) = crossbeam_channel::bounded(1);
    thread::spawn(move || {
        let result = notifications
            .iter()
            .try_for_each(|notification| notification.send(&session));
        _ = sender.send(result);
    });

    match receiver.recv_timeout(deadline) {
        Ok(result) => Ok(result?),
        Err(RecvTimeoutError::Timeout) => anyhow::bail!(
            "Notification server did not reply within {} ms",
            deadline.as_millis()
        ),
        Err(RecvTimeoutError::Disconnected) => {
            anyhow::bail!("Notification worker exited without a result")
        }
    }
}
