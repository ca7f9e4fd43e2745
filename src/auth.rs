//! Entry authentication collaborators.
//!
//! The real face-recognition hardware is out of scope; every draft of the
//! desk unit simulated it. [`PromptFaceAuth`] reproduces the interactive
//! face-id check (a registered id typed at the console), [`StaticAuth`] is
//! the fixed-answer stub used in tests.

use crossbeam_channel::{Receiver, RecvTimeoutError};
use std::time::Duration;

/// Decides whether the person at the desk may open a session.
pub trait Authenticator {
    /// One authentication attempt. `false` is non-fatal; the controller
    /// retries on the next pass.
    fn authenticate(&mut self) -> bool;
}

/// Always answers the same way.
#[derive(Debug, Clone, Copy)]
pub struct StaticAuth {
    accept: bool,
}

impl StaticAuth {
    pub fn accepting() -> Self {
        Self { accept: true }
    }

    pub fn rejecting() -> Self {
        Self { accept: false }
    }
}

impl Authenticator for StaticAuth {
    fn authenticate(&mut self) -> bool {
        self.accept
    }
}

/// Simulated face recognition fed by console input.
///
/// Face ids arrive on a channel (the console bridge parses them from stdin).
/// An attempt waits briefly for an id and fails when none arrives, so a
/// silent console just keeps the retry loop turning.
pub struct PromptFaceAuth {
    face_ids: Receiver<u32>,
    registered_id: u32,
    attempt_timeout: Duration,
}

impl PromptFaceAuth {
    pub fn new(face_ids: Receiver<u32>, registered_id: u32) -> Self {
        Self {
            face_ids,
            registered_id,
            attempt_timeout: Duration::from_secs(1),
        }
    }

    /// Override the per-attempt wait (tests use a short one).
    pub fn with_attempt_timeout(mut self, timeout: Duration) -> Self {
        self.attempt_timeout = timeout;
        self
    }
}

impl Authenticator for PromptFaceAuth {
    fn authenticate(&mut self) -> bool {
        match self.face_ids.recv_timeout(self.attempt_timeout) {
            Ok(id) => id == self.registered_id,
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::unbounded;

    #[test]
    fn test_static_auth() {
        assert!(StaticAuth::accepting().authenticate());
        assert!(!StaticAuth::rejecting().authenticate());
    }

    #[test]
    fn test_prompt_auth_accepts_registered_id() {
        let (tx, rx) = unbounded();
        let mut auth = PromptFaceAuth::new(rx, 1).with_attempt_timeout(Duration::from_millis(10));

        tx.send(1).unwrap();
        assert!(auth.authenticate());

        tx.send(7).unwrap();
        assert!(!auth.authenticate());
    }

    #[test]
    fn test_prompt_auth_fails_without_input() {
        let (_tx, rx) = unbounded::<u32>();
        let mut auth = PromptFaceAuth::new(rx, 1).with_attempt_timeout(Duration::from_millis(10));
        assert!(!auth.authenticate());
    }
}
