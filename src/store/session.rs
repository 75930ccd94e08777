use tokio::sync::watch;
use tracing::info;

use crate::error::Error;
use crate::models::{AuthEvent, Session};

/// Holds the current session and fans provider events out to whoever
/// subscribed. The session itself stays opaque; this type never mints or
/// refreshes tokens.
pub struct SessionState {
    current: Option<Session>,
    tx: watch::Sender<Option<Session>>,
}

impl SessionState {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { current: None, tx }
    }

    pub fn session(&self) -> Option<&Session> {
        self.current.as_ref()
    }

    pub fn is_signed_in(&self) -> bool {
        self.current.is_some()
    }

    /// The session, or `NotAuthenticated` for operations that need one.
    pub fn require(&self) -> Result<&Session, Error> {
        self.current.as_ref().ok_or(Error::NotAuthenticated)
    }

    /// Applies a provider-pushed change and notifies subscribers.
    pub fn apply(&mut self, event: AuthEvent) {
        match event {
            AuthEvent::SignedIn(session) => {
                info!("Signed in as {}", session.user.email);
                self.current = Some(session);
            }
            AuthEvent::TokenRefreshed(session) => {
                self.current = Some(session);
            }
            AuthEvent::SignedOut => {
                info!("Signed out");
                self.current = None;
            }
        }
        self.tx.send_replace(self.current.clone());
    }

    /// Watch channel carrying the session as it changes. Receivers see
    /// the latest value immediately.
    pub fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.tx.subscribe()
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}
