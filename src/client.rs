use std::sync::Arc;

use tokio::sync::watch;
use tracing::warn;
use uuid::Uuid;

use crate::account::{self, AccountDeletion, validate_password};
use crate::backend::{AuthApi, HttpBackend, SignUpOutcome};
use crate::config::BackendConfig;
use crate::error::Error;
use crate::models::{AuthEvent, Session, SortKey, Task, TaskPatch};
use crate::store::{SaveTask, SessionState, TaskRepository};

/// Application facade: owns the HTTP backend, the session holder and the
/// task repository, and wires the app-lifetime auth listener — whenever
/// a session becomes available the full task list is reloaded; on
/// sign-out both session and list are cleared.
pub struct TaskFlow {
    backend: Arc<HttpBackend>,
    session: SessionState,
    repository: TaskRepository,
}

impl TaskFlow {
    pub fn new(config: BackendConfig) -> Result<Self, Error> {
        let backend = Arc::new(HttpBackend::new(config)?);
        let repository = TaskRepository::new(backend.clone());
        Ok(Self {
            backend,
            session: SessionState::new(),
            repository,
        })
    }

    /// Reads `TASKFLOW_BACKEND_URL` / `TASKFLOW_API_KEY`, honoring a
    /// `.env` file when present.
    pub fn from_env() -> Result<Self, Error> {
        dotenvy::dotenv().ok();
        Self::new(BackendConfig::new_from_env()?)
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.session()
    }

    pub fn repository(&self) -> &TaskRepository {
        &self.repository
    }

    /// Session changes as they happen, for presentation layers that need
    /// to switch between the auth page and the app shell.
    pub fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.session.subscribe()
    }

    /// Applies a provider event. Sign-in and token refresh trigger the
    /// full reload; a failed reload is logged and left for the caller to
    /// retry, exactly like a failed manual load.
    pub async fn on_auth_event(&mut self, event: AuthEvent) {
        match event {
            AuthEvent::SignedIn(ref session) | AuthEvent::TokenRefreshed(ref session) => {
                let session = session.clone();
                self.session.apply(event);
                if let Err(err) = self.repository.load(&session).await {
                    warn!("Task reload after auth event failed: {}", err);
                }
            }
            AuthEvent::SignedOut => {
                self.session.apply(AuthEvent::SignedOut);
                self.repository.clear();
            }
        }
    }

    /// Sign-up with the client-side password policy checked first; the
    /// request is never sent while rules are unmet.
    pub async fn sign_up(&mut self, email: &str, password: &str) -> Result<SignUpOutcome, Error> {
        let unmet = validate_password(password);
        if !unmet.is_empty() {
            let messages: Vec<&str> = unmet.iter().map(|rule| rule.message).collect();
            return Err(Error::PasswordPolicy(messages.join(" ")));
        }

        let outcome = self.backend.sign_up(email, password).await?;
        if let SignUpOutcome::SignedIn(session) = &outcome {
            self.on_auth_event(AuthEvent::SignedIn(session.clone())).await;
        }
        Ok(outcome)
    }

    pub async fn sign_in(&mut self, email: &str, password: &str) -> Result<(), Error> {
        let session = self.backend.sign_in(email, password).await?;
        self.on_auth_event(AuthEvent::SignedIn(session)).await;
        Ok(())
    }

    pub async fn sign_out(&mut self) -> Result<(), Error> {
        let session = self.session.require()?.clone();
        self.backend.sign_out(&session).await?;
        self.on_auth_event(AuthEvent::SignedOut).await;
        Ok(())
    }

    /// Adopts a session persisted by the embedding application (the
    /// crate does not store credentials itself).
    pub async fn restore_session(&mut self, session: Session) {
        self.on_auth_event(AuthEvent::SignedIn(session)).await;
    }

    pub async fn refresh_session(&mut self) -> Result<(), Error> {
        let refresh_token = self.session.require()?.refresh_token.clone();
        let session = self.backend.refresh(&refresh_token).await?;
        self.on_auth_event(AuthEvent::TokenRefreshed(session)).await;
        Ok(())
    }

    // Task operations. Thin session-threading wrappers over the
    // repository; see `TaskRepository` for the semantics.

    pub async fn load_tasks(&mut self) -> Result<(), Error> {
        let session = self.session.require()?.clone();
        self.repository.load(&session).await
    }

    pub async fn save_task(&mut self, op: SaveTask) -> Result<Task, Error> {
        let session = self.session.require()?.clone();
        self.repository.save(&session, op).await
    }

    pub async fn update_task(&mut self, id: Uuid, patch: TaskPatch) -> Result<Task, Error> {
        let session = self.session.require()?.clone();
        self.repository.update(&session, id, patch).await
    }

    pub async fn set_completed(&mut self, id: Uuid, completed: bool) -> Result<Task, Error> {
        let session = self.session.require()?.clone();
        self.repository.set_completed(&session, id, completed).await
    }

    pub async fn toggle_pinned(&mut self, id: Uuid, currently_pinned: bool) -> Result<Task, Error> {
        let session = self.session.require()?.clone();
        self.repository.toggle_pinned(&session, id, currently_pinned).await
    }

    pub async fn toggle_archived(
        &mut self,
        id: Uuid,
        currently_archived: bool,
    ) -> Result<Task, Error> {
        let session = self.session.require()?.clone();
        self.repository.toggle_archived(&session, id, currently_archived).await
    }

    pub async fn delete_task(&mut self, id: Uuid) -> Result<(), Error> {
        let session = self.session.require()?.clone();
        self.repository.delete(&session, id).await
    }

    pub fn set_sort_key(&mut self, key: SortKey) {
        self.repository.set_sort_key(key);
    }

    /// Full account deletion, ending signed out locally whichever branch
    /// the backend takes.
    pub async fn delete_account(&mut self) -> Result<AccountDeletion, Error> {
        let session = self.session.require()?.clone();
        let outcome =
            account::delete_account(self.backend.as_ref(), self.backend.as_ref(), &session).await?;
        self.on_auth_event(AuthEvent::SignedOut).await;
        Ok(outcome)
    }
}
