//! Command words, their parsing, and dispatch to the renderers.

use std::io::Write;
use std::path::Path;

use tracing::debug;

use crate::domain::{DependencyDomain, TaskFilter, TaskStatistics, TasksDomain};
use crate::errors::ViewerResult;
use crate::session::Session;
use crate::ui;

const PRIORITY_FLAG: &str = "--priority=";
const STATUS_FLAG: &str = "--status=";
const TABLE_FLAG: &str = "--table";

/// Options accepted by `list`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOptions {
    pub filter: TaskFilter,
    /// Render one comfy table instead of per-task blocks
    pub table: bool,
}

/// A parsed command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// No command word was given
    Usage,
    List(ListOptions),
    Show { task_id: Option<String> },
    Stats,
    Timeline,
    /// A command word nobody recognises
    Unknown(String),
}

impl Command {
    /// Parse the words following the program name.
    ///
    /// Flags `list` does not know are ignored, as is anything after the
    /// first `show` argument.
    pub fn parse<S: AsRef<str>>(args: &[S]) -> Self {
        let Some((name, rest)) = args.split_first() else {
            return Self::Usage;
        };

        match name.as_ref() {
            "list" => Self::List(parse_list_options(rest)),
            "show" => Self::Show {
                task_id: rest.first().map(|id| id.as_ref().to_string()),
            },
            "stats" => Self::Stats,
            "timeline" => Self::Timeline,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// Whether the command reads the task documents at all
    pub fn needs_session(&self) -> bool {
        !matches!(self, Self::Usage | Self::Unknown(_))
    }
}

fn parse_list_options<S: AsRef<str>>(args: &[S]) -> ListOptions {
    let mut options = ListOptions::default();
    for arg in args {
        let arg = arg.as_ref();
        if let Some(value) = arg.strip_prefix(PRIORITY_FLAG) {
            options.filter.priority = non_empty(value);
        } else if let Some(value) = arg.strip_prefix(STATUS_FLAG) {
            options.filter.status = non_empty(value);
        } else if arg == TABLE_FLAG {
            options.table = true;
        } else {
            debug!("Ignoring unrecognised list argument: {}", arg);
        }
    }
    options
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

/// Load the session from `base_dir` when the command needs it, then run it
pub fn execute(command: &Command, base_dir: &Path, out: &mut dyn Write) -> ViewerResult<()> {
    if !command.needs_session() {
        return run(command, &Session::default(), out);
    }

    let session = Session::load(base_dir)?;
    if let Some(path) = session.missing_config() {
        ui::write_warning(
            out,
            &format!("Config file not found: {}", path.display()),
        )?;
    }
    run(command, &session, out)
}

/// Run a command against an already-loaded session
pub fn run(command: &Command, session: &Session, out: &mut dyn Write) -> ViewerResult<()> {
    let project = session.config().project_name();
    let tasks = session.tasks();

    match command {
        Command::Usage => ui::render_usage(out)?,
        Command::List(options) => {
            let listed = TasksDomain::new(tasks).list_tasks(&options.filter);
            if options.table {
                ui::render_task_table(out, &listed, &options.filter, project)?;
            } else {
                ui::render_task_list(out, &listed, &options.filter, project)?;
            }
        }
        Command::Show { task_id: None } => ui::write_error(out, "Please specify a task id")?,
        Command::Show {
            task_id: Some(task_id),
        } => match TasksDomain::new(tasks).get_task(task_id) {
            Some(task) => ui::render_task_details(out, task)?,
            None => ui::render_not_found(out, task_id)?,
        },
        Command::Stats => {
            let stats = TaskStatistics::compute(tasks);
            ui::render_statistics(out, stats.as_ref(), project)?;
        }
        Command::Timeline => {
            let timeline = (!tasks.is_empty()).then(|| DependencyDomain::new(tasks).timeline());
            ui::render_timeline(out, timeline.as_ref(), session.config().hours_per_day())?;
        }
        Command::Unknown(name) => ui::write_error(out, &format!("Unknown command: {name}"))?,
    }

    Ok(())
}
