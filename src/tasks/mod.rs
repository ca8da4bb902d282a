//! Task model and storage.

mod store;
mod types;

pub use store::{SqliteTaskStore, TaskStore};
#[cfg(test)]
pub use store::MockTaskStore;
pub use types::{CategoryCount, NewTask, Priority, Task, TaskUpdate};
