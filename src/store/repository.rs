use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, error};
use uuid::Uuid;

use crate::backend::TaskApi;
use crate::backend::dto::InsertTask;
use crate::error::Error;
use crate::models::{Session, SortKey, Task, TaskDraft, TaskPatch};
use crate::views;

/// A write the form layer asks for. The caller says whether this is an
/// insert or an edit of an existing row; the repository never guesses
/// from ambient state.
#[derive(Debug, Clone)]
pub enum SaveTask {
    Create(TaskDraft),
    Update(Uuid, TaskDraft),
}

/// In-memory copy of the user's task list plus the CRUD operations that
/// keep it in step with the backend.
///
/// Mutations are optimistic: the local row is patched first, the backend
/// is called, and the row is then reconciled against the representation
/// the backend returns. On failure the local change is rolled back and
/// the error propagated. The list is re-sorted after every change so it
/// always reads in the same order a fresh load would produce: pinned
/// first, then the sort key descending.
pub struct TaskRepository {
    api: Arc<dyn TaskApi>,
    tasks: Vec<Task>,
    loading: bool,
    sort_by: SortKey,
}

impl TaskRepository {
    pub fn new(api: Arc<dyn TaskApi>) -> Self {
        Self {
            api,
            tasks: Vec::new(),
            loading: false,
            sort_by: SortKey::default(),
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: Uuid) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn sort_key(&self) -> SortKey {
        self.sort_by
    }

    /// Changes the ordering key and re-sorts the local list. The next
    /// `load` asks the backend for the same order.
    pub fn set_sort_key(&mut self, key: SortKey) {
        self.sort_by = key;
        self.resort();
    }

    /// Drops the local list, for sign-out.
    pub fn clear(&mut self) {
        self.tasks.clear();
    }

    /// Replaces the whole in-memory list with the user's rows, ordered
    /// by the backend. No pagination: the full set is assumed to fit.
    /// On failure the previous list stays in place, stale but intact.
    pub async fn load(&mut self, session: &Session) -> Result<(), Error> {
        self.loading = true;
        let result = self.api.list(session, self.sort_by).await;
        self.loading = false;

        match result {
            Ok(tasks) => {
                debug!("Loaded {} tasks", tasks.len());
                self.tasks = tasks;
                Ok(())
            }
            Err(err) => {
                error!("Error loading tasks: {}", err);
                Err(err)
            }
        }
    }

    /// Form save path: insert or full-field edit, decided by the caller.
    pub async fn save(&mut self, session: &Session, op: SaveTask) -> Result<Task, Error> {
        match op {
            SaveTask::Create(draft) => self.create(session, &draft).await,
            SaveTask::Update(id, draft) => {
                self.update(session, id, TaskPatch::from_draft(&draft)).await
            }
        }
    }

    async fn create(&mut self, session: &Session, draft: &TaskDraft) -> Result<Task, Error> {
        let body = InsertTask::from_draft(session.user_id(), draft);
        match self.api.insert(session, &body).await {
            Ok(task) => {
                self.tasks.push(task.clone());
                self.resort();
                Ok(task)
            }
            Err(err) => {
                error!("Error saving task: {}", err);
                Err(err)
            }
        }
    }

    /// Partial update by id. `updated_at` is stamped here on every call;
    /// the backend is not trusted to do it.
    pub async fn update(
        &mut self,
        session: &Session,
        id: Uuid,
        mut patch: TaskPatch,
    ) -> Result<Task, Error> {
        patch.updated_at = Some(Utc::now());

        let snapshot = self.get(id).cloned();
        if let Some(index) = self.tasks.iter().position(|t| t.id == id) {
            patch.apply_to(&mut self.tasks[index]);
            self.resort();
        }

        match self.api.update(session, id, &patch).await {
            Ok(reconciled) => {
                self.put(reconciled.clone());
                Ok(reconciled)
            }
            Err(err) => {
                if let Some(previous) = snapshot {
                    self.put(previous);
                }
                error!("Error updating task: {}", err);
                Err(err)
            }
        }
    }

    pub async fn set_completed(
        &mut self,
        session: &Session,
        id: Uuid,
        completed: bool,
    ) -> Result<Task, Error> {
        self.update(session, id, TaskPatch::completed(completed)).await
    }

    /// Invert-on-call contract: pass the task's CURRENT pinned value and
    /// the inverse is written. Calling twice with the same argument
    /// flips twice — callers that want set-to-value semantics go through
    /// `update` with an explicit patch.
    pub async fn toggle_pinned(
        &mut self,
        session: &Session,
        id: Uuid,
        currently_pinned: bool,
    ) -> Result<Task, Error> {
        self.update(session, id, TaskPatch::pinned(!currently_pinned)).await
    }

    /// Same invert-on-call contract as `toggle_pinned`.
    pub async fn toggle_archived(
        &mut self,
        session: &Session,
        id: Uuid,
        currently_archived: bool,
    ) -> Result<Task, Error> {
        self.update(session, id, TaskPatch::archived(!currently_archived)).await
    }

    /// Hard delete, scoped by id and owner on the wire. The local row is
    /// removed up front and restored if the backend refuses.
    pub async fn delete(&mut self, session: &Session, id: Uuid) -> Result<(), Error> {
        let snapshot = self
            .tasks
            .iter()
            .position(|t| t.id == id)
            .map(|index| self.tasks.remove(index));

        match self.api.delete(session, id).await {
            Ok(()) => Ok(()),
            Err(err) => {
                if let Some(task) = snapshot {
                    self.tasks.push(task);
                    self.resort();
                }
                error!("Error deleting task: {}", err);
                Err(err)
            }
        }
    }

    /// Replace-or-insert by id, then restore ordering.
    fn put(&mut self, task: Task) {
        match self.tasks.iter().position(|t| t.id == task.id) {
            Some(index) => self.tasks[index] = task,
            None => self.tasks.push(task),
        }
        self.resort();
    }

    fn resort(&mut self) {
        views::sort_tasks(&mut self.tasks, self.sort_by);
    }
}
