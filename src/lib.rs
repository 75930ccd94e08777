//! Client-side core of TaskFlow, a task-management app whose storage and
//! authentication live entirely on a hosted backend (a PostgREST-style
//! table API plus its companion auth API). This crate owns the session,
//! the in-memory task list and the pure view derivations; rendering is
//! the embedding application's job.

pub mod account;
pub mod backend;
pub mod client;
pub mod config;
pub mod error;
pub mod markdown;
pub mod models;
pub mod store;
pub mod views;

pub use client::TaskFlow;
pub use config::BackendConfig;
pub use error::Error;
pub use models::{Priority, Session, SortKey, Task, TaskDraft, TaskPatch, User};
pub use store::{SaveTask, TaskRepository};
