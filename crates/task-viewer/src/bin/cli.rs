//! Task viewer CLI - read-only reports over generated TaskMaster tasks.

#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::disallowed_macros)]
#![allow(clippy::uninlined_format_args)]

use std::io::{self, Write};
use std::path::PathBuf;

use clap::{ArgAction, Parser};
use tracing::Level;
use tracing_subscriber::EnvFilter;

use task_viewer::command::{self, Command};
use task_viewer::errors::ViewerError;
use task_viewer::{ui, DEFAULT_BASE_DIR};

#[derive(Parser)]
#[command(name = "task-viewer")]
#[command(about = "View TaskMaster generated tasks", long_about = None)]
#[command(version)]
struct Cli {
    /// Directory holding config.json and the generated tasks
    #[arg(long, env = "TASK_VIEWER_DIR", default_value = DEFAULT_BASE_DIR)]
    dir: PathBuf,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// list [--priority=P] [--status=S] [--table] | show <id> | stats | timeline
    #[arg(
        trailing_var_arg = true,
        allow_hyphen_values = true,
        value_name = "COMMAND"
    )]
    command: Vec<String>,
}

fn main() {
    let cli = Cli::parse();

    // Initialize tracing
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(cli.verbose, rust_log.as_deref()))
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run(&cli) {
        let mut stderr = io::stderr().lock();
        let _ = ui::write_error(&mut stderr, &e.to_string());
        std::process::exit(1);
    }
}

/// `RUST_LOG` when set (default `warn`); `-v` and `-vv` override the level
fn log_filter(verbose: u8, rust_log: Option<&str>) -> EnvFilter {
    let from_env = rust_log.and_then(|directives| EnvFilter::try_new(directives).ok());
    match verbose {
        0 => from_env.unwrap_or_else(|| EnvFilter::new("warn")),
        1 => from_env
            .unwrap_or_else(|| EnvFilter::new("warn"))
            .add_directive(Level::INFO.into()),
        _ => from_env
            .unwrap_or_else(|| EnvFilter::new("warn"))
            .add_directive(Level::DEBUG.into()),
    }
}

fn run(cli: &Cli) -> Result<(), ViewerError> {
    let command = Command::parse(&cli.command);
    tracing::debug!("Running {:?} against {}", command, cli.dir.display());

    let stdout = io::stdout();
    let mut out = stdout.lock();
    command::execute(&command, &cli.dir, &mut out)?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(directives: &str) -> String {
        EnvFilter::new(directives).to_string()
    }

    #[test]
    fn test_rust_log_is_respected_without_verbose() {
        assert_eq!(log_filter(0, Some("debug")).to_string(), rendered("debug"));
        assert_eq!(
            log_filter(0, Some("task_viewer=trace")).to_string(),
            rendered("task_viewer=trace")
        );
    }

    #[test]
    fn test_default_level_is_warn() {
        assert_eq!(log_filter(0, None).to_string(), rendered("warn"));
    }

    #[test]
    fn test_verbose_overrides_level() {
        assert_eq!(log_filter(1, None).to_string(), rendered("info"));
        assert_eq!(log_filter(2, Some("error")).to_string(), rendered("debug"));
    }

    #[test]
    fn test_command_words_are_captured_verbatim() {
        let cli = Cli::parse_from(["task-viewer", "-v", "list", "--priority=high", "--bogus"]);
        assert_eq!(cli.verbose, 1);
        assert_eq!(cli.command, vec!["list", "--priority=high", "--bogus"]);
    }
}
