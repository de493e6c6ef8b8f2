//! Domain facades for task reporting.
//!
//! These facades compute the derived views (filtered listings, lookups,
//! statistics, the dependency timeline) over an already-loaded task list.

mod config;
mod deps;
mod stats;
mod tasks;

pub use config::{ConfigDomain, CONFIG_FILE_NAME};
pub use deps::{
    CriticalPath, DanglingDep, DependencyDomain, ParallelTask, PathStep, Schedule, Timeline,
};
pub use stats::{AssigneeShare, PriorityShare, TaskStatistics};
pub use tasks::{TaskFilter, TasksDomain};
