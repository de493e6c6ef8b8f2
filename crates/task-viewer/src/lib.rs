#![warn(clippy::pedantic)]
// Allow common pedantic lints that don't affect correctness
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::float_cmp)]

//! # Task Viewer
//!
//! A read-only viewer for TaskMaster's generated task documents.
//!
//! This crate provides:
//! - Tolerant loading of `.taskmaster/config.json` and the generated tasks
//! - Filtered listings, per-task detail and aggregate statistics
//! - A critical-path timeline computed from task dependencies
//! - Terminal rendering onto any writer
//!
//! ## Example
//!
//! ```rust,ignore
//! use task_viewer::{Command, Session};
//!
//! let session = Session::load(".taskmaster")?;
//! let command = Command::parse(&["stats"]);
//! task_viewer::command::run(&command, &session, &mut std::io::stdout())?;
//! ```

// Core entities
pub mod entities;

// Error types
pub mod errors;

// Storage layer
pub mod storage;

// Domain facades
pub mod domain;

// Load-once state
pub mod session;

// Command parsing and dispatch
pub mod command;

// Terminal UI helpers
pub mod ui;

// Re-export key types for convenience
pub use command::{Command, ListOptions};
pub use entities::{Risk, Subtask, Task, ViewerConfig};
pub use errors::{ViewerError, ViewerResult};
pub use session::{Session, DEFAULT_BASE_DIR};
pub use storage::{FileStorage, TaskSource};
