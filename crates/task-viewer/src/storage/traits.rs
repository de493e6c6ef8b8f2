//! Storage trait definitions.

use crate::entities::Task;
use crate::errors::ViewerResult;

/// Read-only source of generated tasks
pub trait TaskSource {
    /// Human-readable location of the tasks, used in logs and notices
    fn location(&self) -> String;

    /// Load every task in document order.
    ///
    /// A source that does not exist yields an empty list; a source that
    /// exists but cannot be parsed is an error.
    fn load_tasks(&self) -> ViewerResult<Vec<Task>>;
}
