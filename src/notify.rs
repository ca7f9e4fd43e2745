//! Best-effort notification channels.
//!
//! Two independent, fire-and-forget transports: a local connection-oriented
//! user channel established once at process start, and a remote admin
//! endpoint receiving one outbound call per event. Neither is retried;
//! delivery failures are dropped with a debug diagnostic.

use std::io::Write;
use std::net::TcpStream;
use std::time::Duration;
use tracing::debug;

/// Connect and request timeout for the admin endpoint.
const ADMIN_TIMEOUT: Duration = Duration::from_secs(3);

/// Local user-facing channel.
///
/// Connected once and reused for the process lifetime; a send on a closed or
/// invalid handle is a silent no-op.
pub enum UserChannel {
    /// Connected local stream (one message per line)
    Socket(TcpStream),
    /// Console fallback when no local endpoint is configured
    Console,
    /// Invalid handle; sends are dropped
    Closed,
}

impl UserChannel {
    /// Connect to the local notification endpoint.
    pub fn connect(addr: &str) -> Result<Self, NotifyError> {
        let stream = TcpStream::connect(addr)
            .map_err(|e| NotifyError::Connect(format!("user channel {addr}: {e}")))?;
        Ok(UserChannel::Socket(stream))
    }

    pub fn console() -> Self {
        UserChannel::Console
    }

    pub fn closed() -> Self {
        UserChannel::Closed
    }

    /// Deliver one message, best effort.
    pub fn send(&mut self, message: &str) {
        let failed = match self {
            UserChannel::Socket(stream) => match writeln!(stream, "{message}") {
                Ok(()) => false,
                Err(e) => {
                    debug!("user channel send failed, closing handle: {e}");
                    true
                }
            },
            UserChannel::Console => {
                println!("{message}");
                false
            }
            UserChannel::Closed => false,
        };
        if failed {
            *self = UserChannel::Closed;
        }
    }
}

/// Remote admin alert endpoint.
///
/// One blocking HTTP GET per event with a single free-text `msg` parameter;
/// the response is ignored.
pub struct AdminChannel {
    endpoint: Option<String>,
    client: Option<reqwest::blocking::Client>,
}

impl AdminChannel {
    /// Create a channel for the given endpoint URL.
    pub fn new(endpoint: String) -> Result<Self, NotifyError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(ADMIN_TIMEOUT)
            .build()
            .map_err(|e| NotifyError::Setup(e.to_string()))?;
        Ok(Self {
            endpoint: Some(endpoint),
            client: Some(client),
        })
    }

    /// A channel that drops every message (no endpoint configured, tests).
    pub fn disabled() -> Self {
        Self {
            endpoint: None,
            client: None,
        }
    }

    /// Deliver one message, best effort.
    pub fn send(&self, message: &str) {
        let (Some(endpoint), Some(client)) = (&self.endpoint, &self.client) else {
            return;
        };
        if let Err(e) = client.get(endpoint).query(&[("msg", message)]).send() {
            debug!("admin notification dropped: {e}");
        }
    }
}

/// Routes detection events to the user and admin channels.
///
/// Dispatch is synchronous at the point of detection; there is no queueing,
/// batching, or deduplication here.
pub struct NotificationDispatcher {
    user: UserChannel,
    admin: AdminChannel,
}

impl NotificationDispatcher {
    pub fn new(user: UserChannel, admin: AdminChannel) -> Self {
        Self { user, admin }
    }

    /// A dispatcher with both channels inert (tests).
    pub fn disabled() -> Self {
        Self {
            user: UserChannel::closed(),
            admin: AdminChannel::disabled(),
        }
    }

    pub fn notify_user(&mut self, message: &str) {
        self.user.send(message);
    }

    pub fn notify_admin(&self, message: &str) {
        self.admin.send(message);
    }

    /// Deliver the same message on both channels.
    pub fn broadcast(&mut self, message: &str) {
        self.user.send(message);
        self.admin.send(message);
    }
}

/// Notification setup errors. Only raised while establishing channels at
/// process start; sends themselves never fail.
#[derive(Debug)]
pub enum NotifyError {
    Connect(String),
    Setup(String),
}

impl std::fmt::Display for NotifyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NotifyError::Connect(e) => write!(f, "Connect error: {e}"),
            NotifyError::Setup(e) => write!(f, "Setup error: {e}"),
        }
    }
}

impl std::error::Error for NotifyError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closed_user_channel_is_noop() {
        let mut channel = UserChannel::closed();
        // Must not panic or block
        channel.send("hello");
    }

    #[test]
    fn test_disabled_admin_channel_is_noop() {
        let channel = AdminChannel::disabled();
        channel.send("hello");
    }

    #[test]
    fn test_disabled_dispatcher_accepts_messages() {
        let mut dispatcher = NotificationDispatcher::disabled();
        dispatcher.notify_user("a");
        dispatcher.notify_admin("b");
        dispatcher.broadcast("c");
    }

    #[test]
    fn test_connect_failure_is_reported() {
        // Bind an ephemeral port, then drop the listener so connecting to it
        // is refused rather than depending on a fixed port being free
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let result = UserChannel::connect(&addr.to_string());
        assert!(result.is_err());
    }
}
