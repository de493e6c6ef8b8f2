//! Tasks domain facade: lookup and filtering.

use crate::entities::Task;

/// Filters accepted by `list`.
///
/// `status` is echoed back to the user but never removes a task: generated
/// task records carry no status field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    pub priority: Option<String>,
    pub status: Option<String>,
}

impl TaskFilter {
    pub fn by_priority(priority: impl Into<String>) -> Self {
        Self {
            priority: Some(priority.into()),
            status: None,
        }
    }

    /// Conjunction of every active filter
    pub fn matches(&self, task: &Task) -> bool {
        self.priority
            .as_deref()
            .map_or(true, |priority| task.has_priority(priority))
    }
}

/// Tasks domain facade over the loaded, read-only task list
pub struct TasksDomain<'a> {
    tasks: &'a [Task],
}

impl<'a> TasksDomain<'a> {
    pub fn new(tasks: &'a [Task]) -> Self {
        Self { tasks }
    }

    /// Tasks surviving the filter, in their original relative order
    pub fn list_tasks(&self, filter: &TaskFilter) -> Vec<&'a Task> {
        self.tasks.iter().filter(|t| filter.matches(t)).collect()
    }

    /// First task whose id equals `task_id` exactly
    pub fn get_task(&self, task_id: &str) -> Option<&'a Task> {
        self.tasks.iter().find(|t| t.id.as_deref() == Some(task_id))
    }
}
