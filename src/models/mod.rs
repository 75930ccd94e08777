pub mod session;
pub mod task;

pub use session::{AuthEvent, Session, User};
pub use task::{Priority, SortKey, Task, TaskDraft, TaskPatch};
