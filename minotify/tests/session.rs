use minotify::{BusSession, Error, Notification};

// Only test in this binary: it points the session bus at a socket that does not exist.
#[test]
fn failed_connect_is_kept() {
    std::env::set_var("DBUS_SESSION_BUS_ADDRESS", "unix:path=/nonexistent/minotify.sock");

    let session = BusSession::new();
    let notification = Notification::builder().summary("unreachable").build();

    let first = notification.send(&session).unwrap_err();
    let second = notification.send(&session).unwrap_err();

    assert!(matches!(first, Error::Connection { .. }));
    assert_eq!(first, second);
    assert!(!session.is_connected());
    assert_eq!(session.unique_name(), None);
    assert!(BusSession::connect().is_err());
}
