//! Core data structures for generated tasks.

mod config;
mod risk;
mod subtask;
mod task;

pub use config::ViewerConfig;
pub use risk::Risk;
pub use subtask::Subtask;
pub use task::{
    or_placeholder, PriorityLevel, Task, NEUTRAL_PRIORITY_ICON, PLACEHOLDER, UNKNOWN_GROUP,
};
