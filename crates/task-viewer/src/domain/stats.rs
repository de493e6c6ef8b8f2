//! Aggregate statistics over the full task list.

use tracing::debug;

use crate::entities::Task;

/// Task count and share for one priority value
#[derive(Debug, Clone, PartialEq)]
pub struct PriorityShare {
    pub priority: String,
    pub count: usize,
    /// `100 * count / total tasks`
    pub percentage: f64,
}

/// Estimated hours and share for one assignee
#[derive(Debug, Clone, PartialEq)]
pub struct AssigneeShare {
    pub assignee: String,
    pub hours: f64,
    /// `100 * hours / total hours`; `None` when no hours are recorded at all
    pub percentage: Option<f64>,
}

/// Summary of a non-empty task list
#[derive(Debug, Clone, PartialEq)]
pub struct TaskStatistics {
    pub total_tasks: usize,
    pub total_hours: f64,
    pub average_complexity: f64,
    /// In first-encounter order
    pub priority_distribution: Vec<PriorityShare>,
    /// In first-encounter order
    pub assignee_hours: Vec<AssigneeShare>,
}

impl TaskStatistics {
    /// Compute statistics, or `None` for an empty list so that no division
    /// by a zero task count ever happens.
    pub fn compute(tasks: &[Task]) -> Option<Self> {
        if tasks.is_empty() {
            return None;
        }

        let total_tasks = tasks.len();
        let total_hours: f64 = tasks.iter().map(Task::hours).sum();
        let complexity_sum: f64 = tasks.iter().map(Task::complexity).sum();
        let average_complexity = complexity_sum / total_tasks as f64;

        let priority_distribution = group_first_seen(tasks, Task::priority_group, |_| 1usize)
            .into_iter()
            .map(|(priority, count)| PriorityShare {
                priority,
                count,
                percentage: count as f64 / total_tasks as f64 * 100.0,
            })
            .collect();

        let assignee_hours = group_first_seen(tasks, Task::assignee_group, Task::hours)
            .into_iter()
            .map(|(assignee, hours)| AssigneeShare {
                assignee,
                hours,
                percentage: (total_hours != 0.0).then(|| hours / total_hours * 100.0),
            })
            .collect();

        debug!(
            "Computed statistics for {} task(s), {} hour(s)",
            total_tasks, total_hours
        );

        Some(Self {
            total_tasks,
            total_hours,
            average_complexity,
            priority_distribution,
            assignee_hours,
        })
    }
}

/// Sum `value` per `key`, keeping groups in the order they first appear
fn group_first_seen<'a, V>(
    tasks: &'a [Task],
    key: impl Fn(&'a Task) -> &'a str,
    value: impl Fn(&'a Task) -> V,
) -> Vec<(String, V)>
where
    V: std::ops::AddAssign,
{
    let mut groups: Vec<(String, V)> = Vec::new();
    for task in tasks {
        let group = key(task);
        let amount = value(task);
        match groups.iter_mut().find(|(name, _)| name.as_str() == group) {
            Some((_, total)) => *total += amount,
            None => groups.push((group.to_string(), amount)),
        }
    }
    groups
}
