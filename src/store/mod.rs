pub mod repository;
pub mod session;
pub mod view_state;

pub use repository::{SaveTask, TaskRepository};
pub use session::SessionState;
pub use view_state::{View, ViewState};
