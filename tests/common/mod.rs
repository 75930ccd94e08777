/// Shared test doubles: an in-memory task table and a scripted auth
/// provider, standing in for the hosted backend.
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use uuid::Uuid;

use taskflow_client::backend::dto::InsertTask;
use taskflow_client::backend::{AuthApi, SignUpOutcome, TaskApi};
use taskflow_client::models::{Priority, Session, SortKey, Task, TaskPatch, User};
use taskflow_client::views;
use taskflow_client::Error;

pub fn session() -> Session {
    Session {
        access_token: "test-access-token".to_string(),
        refresh_token: "test-refresh-token".to_string(),
        expires_at: None,
        user: User {
            id: Uuid::new_v4(),
            email: "you@example.com".to_string(),
            created_at: Utc.with_ymd_and_hms(2026, 1, 5, 9, 0, 0).unwrap(),
        },
    }
}

/// A task owned by `user_id`, timestamped on the given March day so
/// ordering assertions stay readable.
pub fn task_on_day(user_id: Uuid, title: &str, pinned: bool, day: u32) -> Task {
    let ts = Utc.with_ymd_and_hms(2026, 3, day, 12, 0, 0).unwrap();
    Task {
        id: Uuid::new_v4(),
        user_id,
        title: title.to_string(),
        description: String::new(),
        priority: Priority::Medium,
        completed: false,
        pinned,
        archived: false,
        due_date: None,
        created_at: ts,
        updated_at: ts,
    }
}

/// In-memory `tasks` table. Honors the same scoping and ordering the
/// real table API does; `fail_next` makes the next call error once.
pub struct InMemoryTaskApi {
    pub rows: Mutex<Vec<Task>>,
    fail_next: AtomicBool,
}

impl InMemoryTaskApi {
    pub fn new(rows: Vec<Task>) -> Self {
        Self {
            rows: Mutex::new(rows),
            fail_next: AtomicBool::new(false),
        }
    }

    pub fn fail_next_call(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }

    fn induced_failure(&self) -> Result<(), Error> {
        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(Error::Api {
                status: 500,
                message: "induced failure".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl TaskApi for InMemoryTaskApi {
    async fn list(&self, session: &Session, sort: SortKey) -> Result<Vec<Task>, Error> {
        self.induced_failure()?;
        let rows = self.rows.lock().unwrap();
        let mut owned: Vec<Task> = rows
            .iter()
            .filter(|t| t.user_id == session.user_id())
            .cloned()
            .collect();
        views::sort_tasks(&mut owned, sort);
        Ok(owned)
    }

    async fn insert(&self, session: &Session, task: &InsertTask) -> Result<Task, Error> {
        self.induced_failure()?;
        let now = Utc::now();
        let row = Task {
            id: Uuid::new_v4(),
            user_id: session.user_id(),
            title: task.title.clone(),
            description: task.description.clone(),
            priority: task.priority,
            completed: task.completed,
            pinned: task.pinned,
            archived: task.archived,
            due_date: task.due_date,
            created_at: now,
            updated_at: now,
        };
        self.rows.lock().unwrap().push(row.clone());
        Ok(row)
    }

    async fn update(&self, session: &Session, id: Uuid, patch: &TaskPatch) -> Result<Task, Error> {
        self.induced_failure()?;
        let mut rows = self.rows.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|t| t.id == id && t.user_id == session.user_id())
            .ok_or(Error::TaskNotFound(id))?;
        patch.apply_to(row);
        Ok(row.clone())
    }

    async fn delete(&self, session: &Session, id: Uuid) -> Result<(), Error> {
        self.induced_failure()?;
        self.rows
            .lock()
            .unwrap()
            .retain(|t| !(t.id == id && t.user_id == session.user_id()));
        Ok(())
    }

    async fn delete_all(&self, session: &Session) -> Result<(), Error> {
        self.induced_failure()?;
        self.rows
            .lock()
            .unwrap()
            .retain(|t| t.user_id != session.user_id());
        Ok(())
    }
}

/// Scripted auth provider for the account-deletion flow.
pub struct ScriptedAuth {
    pub delete_user_error: Mutex<Option<Error>>,
    pub signed_out: AtomicBool,
}

impl ScriptedAuth {
    pub fn deleting_fine() -> Self {
        Self {
            delete_user_error: Mutex::new(None),
            signed_out: AtomicBool::new(false),
        }
    }

    pub fn without_delete_user() -> Self {
        Self {
            delete_user_error: Mutex::new(Some(Error::Api {
                status: 404,
                message: "function delete_user does not exist".to_string(),
            })),
            signed_out: AtomicBool::new(false),
        }
    }

    pub fn was_signed_out(&self) -> bool {
        self.signed_out.load(Ordering::SeqCst)
    }

    fn unsupported(&self) -> Error {
        Error::Api {
            status: 501,
            message: "not scripted for this test".to_string(),
        }
    }
}

#[async_trait]
impl AuthApi for ScriptedAuth {
    async fn sign_up(&self, _email: &str, _password: &str) -> Result<SignUpOutcome, Error> {
        Err(self.unsupported())
    }

    async fn sign_in(&self, _email: &str, _password: &str) -> Result<Session, Error> {
        Err(self.unsupported())
    }

    async fn sign_out(&self, _session: &Session) -> Result<(), Error> {
        self.signed_out.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn refresh(&self, _refresh_token: &str) -> Result<Session, Error> {
        Err(self.unsupported())
    }

    async fn current_user(&self, session: &Session) -> Result<User, Error> {
        Ok(session.user.clone())
    }

    async fn delete_user(&self, _session: &Session) -> Result<(), Error> {
        match self.delete_user_error.lock().unwrap().take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}
