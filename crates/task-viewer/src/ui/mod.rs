//! Terminal rendering for task reports.
//!
//! Every renderer writes to a caller-supplied writer so reports can be
//! captured in tests; the binary passes a locked stdout.

use std::io::{self, Write};

use colored::Colorize;
use comfy_table::{Cell, Color, ContentArrangement, Table};

use crate::domain::{CriticalPath, Schedule, TaskFilter, TaskStatistics, Timeline};
use crate::entities::{or_placeholder, PriorityLevel, Task};

const WIDE_RULE: usize = 80;
const NARROW_RULE: usize = 50;

/// Hours without float noise: `10`, `2.5`, `0.3`
pub fn format_hours(hours: f64) -> String {
    if hours.fract() == 0.0 {
        format!("{hours:.0}")
    } else {
        let fixed = format!("{hours:.2}");
        fixed.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

/// Round hours to whole working days
pub fn working_days(hours: f64, hours_per_day: f64) -> String {
    format!("{:.0}", (hours / hours_per_day).round())
}

fn heading(out: &mut dyn Write, title: &str, width: usize) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", title.bold())?;
    writeln!(out, "{}", "=".repeat(width).dimmed())
}

fn titled(base: &str, project: Option<&str>) -> String {
    match project {
        Some(project) => format!("{base} - {project}"),
        None => base.to_string(),
    }
}

/// Write error message
pub fn write_error(out: &mut dyn Write, message: &str) -> io::Result<()> {
    writeln!(out, "{} {}", "✗".red().bold(), message)
}

/// Write info message
pub fn write_info(out: &mut dyn Write, message: &str) -> io::Result<()> {
    writeln!(out, "{} {}", "ℹ".blue().bold(), message)
}

/// Write warning message
pub fn write_warning(out: &mut dyn Write, message: &str) -> io::Result<()> {
    writeln!(out, "{} {}", "⚠".yellow().bold(), message)
}

pub fn render_usage(out: &mut dyn Write) -> io::Result<()> {
    writeln!(out, "{}", "📖 TaskMaster task viewer usage:".bold())?;
    writeln!(out, "   task-viewer list [--priority=high] [--status=active] [--table]")?;
    writeln!(out, "   task-viewer show <task_id>")?;
    writeln!(out, "   task-viewer stats")?;
    writeln!(out, "   task-viewer timeline")
}

fn render_filter_echo(out: &mut dyn Write, filter: &TaskFilter) -> io::Result<()> {
    if let Some(status) = &filter.status {
        writeln!(out, "🔍 Status filter: {status}")?;
    }
    if let Some(priority) = &filter.priority {
        writeln!(out, "🔍 Priority filter: {priority}")?;
    }
    Ok(())
}

/// One summary block per task, numbered from 1
pub fn render_task_list(
    out: &mut dyn Write,
    tasks: &[&Task],
    filter: &TaskFilter,
    project: Option<&str>,
) -> io::Result<()> {
    heading(out, &titled("🎯 TaskMaster task list", project), WIDE_RULE)?;
    render_filter_echo(out, filter)?;

    if tasks.is_empty() {
        return writeln!(out, "📝 No tasks");
    }

    for (i, task) in tasks.iter().enumerate() {
        render_task_summary(out, i + 1, task)?;
    }
    Ok(())
}

fn render_task_summary(out: &mut dyn Write, index: usize, task: &Task) -> io::Result<()> {
    writeln!(out)?;
    writeln!(
        out,
        "{:2}. {} [{}] {}",
        index,
        task.priority_icon(),
        task.display_id().cyan(),
        task.display_name()
    )?;
    writeln!(
        out,
        "    ⏱️  Hours: {}h  👤 Assignee: {}  📊 Complexity: {:.1}",
        format_hours(task.hours()),
        or_placeholder(task.assignee.as_ref()),
        task.complexity()
    )?;

    if !task.auto_split_subtasks.is_empty() {
        writeln!(out, "    🔗 Subtasks: {}", task.auto_split_subtasks.len())?;
    }
    if !task.intelligent_dependencies.is_empty() {
        writeln!(
            out,
            "    🔄 Depends on: {}",
            task.intelligent_dependencies.join(", ")
        )?;
    }
    Ok(())
}

/// Create a table for displaying tasks
pub fn task_table(tasks: &[&Task]) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("#").fg(Color::Cyan),
        Cell::new("ID").fg(Color::Cyan),
        Cell::new("Name").fg(Color::Cyan),
        Cell::new("Priority").fg(Color::Cyan),
        Cell::new("Hours").fg(Color::Cyan),
        Cell::new("Assignee").fg(Color::Cyan),
        Cell::new("Complexity").fg(Color::Cyan),
        Cell::new("Subtasks").fg(Color::Cyan),
        Cell::new("Deps").fg(Color::Cyan),
    ]);

    for (i, task) in tasks.iter().enumerate() {
        let priority_color = match task.priority_level() {
            Some(PriorityLevel::Low) => Color::Green,
            Some(PriorityLevel::Medium) => Color::Yellow,
            Some(PriorityLevel::High) => Color::DarkYellow,
            Some(PriorityLevel::Critical) => Color::Red,
            None => Color::White,
        };

        let subtasks = if task.auto_split_subtasks.is_empty() {
            "-".to_string()
        } else {
            task.auto_split_subtasks.len().to_string()
        };

        let deps = if task.intelligent_dependencies.is_empty() {
            "-".to_string()
        } else {
            task.intelligent_dependencies.join(", ")
        };

        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(task.display_id()),
            Cell::new(task.display_name()),
            Cell::new(or_placeholder(task.priority.as_ref())).fg(priority_color),
            Cell::new(format!("{}h", format_hours(task.hours()))),
            Cell::new(or_placeholder(task.assignee.as_ref())),
            Cell::new(format!("{:.1}", task.complexity())),
            Cell::new(subtasks),
            Cell::new(deps),
        ]);
    }

    table
}

/// Tabular alternative to [`render_task_list`]
pub fn render_task_table(
    out: &mut dyn Write,
    tasks: &[&Task],
    filter: &TaskFilter,
    project: Option<&str>,
) -> io::Result<()> {
    heading(out, &titled("🎯 TaskMaster task list", project), WIDE_RULE)?;
    render_filter_echo(out, filter)?;

    if tasks.is_empty() {
        return writeln!(out, "📝 No tasks");
    }

    writeln!(out, "{}", task_table(tasks))?;
    writeln!(out)?;
    write_info(out, &format!("{} task(s) total", tasks.len()))
}

pub fn render_not_found(out: &mut dyn Write, task_id: &str) -> io::Result<()> {
    write_error(out, &format!("Task {task_id} not found"))
}

/// Display every field of a task; empty collections are left out entirely
pub fn render_task_details(out: &mut dyn Write, task: &Task) -> io::Result<()> {
    heading(
        out,
        &format!("📋 Task details: {}", task.display_id()),
        WIDE_RULE,
    )?;

    writeln!(out, "📝 Name: {}", task.display_name())?;
    writeln!(
        out,
        "📄 Description: {}",
        or_placeholder(task.description.as_ref())
    )?;
    writeln!(out, "🏷️  Category: {}", or_placeholder(task.category.as_ref()))?;
    writeln!(out, "⚡ Priority: {}", or_placeholder(task.priority.as_ref()))?;
    writeln!(out, "⏱️  Hours: {}h", format_hours(task.hours()))?;
    writeln!(out, "👤 Assignee: {}", or_placeholder(task.assignee.as_ref()))?;
    writeln!(out, "📊 Complexity: {:.1}", task.complexity())?;

    if let Some(reason) = task.auto_generated_reason.as_deref().filter(|r| !r.is_empty()) {
        writeln!(out, "🤖 Generated because: {reason}")?;
    }

    if !task.auto_split_subtasks.is_empty() {
        writeln!(out)?;
        writeln!(
            out,
            "{}",
            format!("🔗 Subtasks ({}):", task.auto_split_subtasks.len()).bold()
        )?;
        for (i, subtask) in task.auto_split_subtasks.iter().enumerate() {
            writeln!(
                out,
                "   {}. {} ({}h)",
                i + 1,
                subtask.display_name(),
                format_hours(subtask.hours())
            )?;
        }
    }

    if !task.intelligent_dependencies.is_empty() {
        writeln!(out)?;
        writeln!(
            out,
            "🔄 Depends on: {}",
            task.intelligent_dependencies.join(", ")
        )?;
    }

    if !task.auto_detected_risks.is_empty() {
        writeln!(out)?;
        writeln!(out, "{}", "⚠️  Detected risks:".bold())?;
        for risk in &task.auto_detected_risks {
            writeln!(
                out,
                "   • {}: {} (probability: {:.1})",
                risk.display_type(),
                risk.display_description(),
                risk.probability()
            )?;
        }
    }

    if !task.quality_gates.is_empty() {
        writeln!(out)?;
        writeln!(out, "{}", "✅ Quality gates:".bold())?;
        for gate in &task.quality_gates {
            writeln!(out, "   • {gate}")?;
        }
    }

    Ok(())
}

/// Totals and distributions; `None` means there was nothing to aggregate
pub fn render_statistics(
    out: &mut dyn Write,
    stats: Option<&TaskStatistics>,
    project: Option<&str>,
) -> io::Result<()> {
    heading(out, &titled("📊 Task statistics", project), NARROW_RULE)?;

    let Some(stats) = stats else {
        return writeln!(out, "📝 No task data");
    };

    writeln!(out, "📋 Total tasks: {}", stats.total_tasks)?;
    writeln!(out, "⏱️  Total hours: {}h", format_hours(stats.total_hours))?;
    writeln!(out, "📊 Average complexity: {:.2}", stats.average_complexity)?;

    writeln!(out)?;
    writeln!(out, "{}", "🎯 Priority distribution:".bold())?;
    for share in &stats.priority_distribution {
        writeln!(
            out,
            "   {}: {} ({:.1}%)",
            share.priority, share.count, share.percentage
        )?;
    }

    writeln!(out)?;
    writeln!(out, "{}", "👥 Hours by assignee:".bold())?;
    for share in &stats.assignee_hours {
        match share.percentage {
            Some(percentage) => writeln!(
                out,
                "   {}: {}h ({:.1}%)",
                share.assignee,
                format_hours(share.hours),
                percentage
            )?,
            None => writeln!(out, "   {}: {}h", share.assignee, format_hours(share.hours))?,
        }
    }
    if stats.total_hours == 0.0 {
        writeln!(out, "   No estimated hours to distribute")?;
    }

    Ok(())
}

fn render_critical_path(
    out: &mut dyn Write,
    path: &CriticalPath,
    serial_hours: f64,
    hours_per_day: f64,
) -> io::Result<()> {
    writeln!(out, "{}", "🔗 Critical path:".bold())?;
    let chain: Vec<String> = path
        .steps
        .iter()
        .map(|step| format!("{} ({}h)", step.task_id, format_hours(step.hours)))
        .collect();
    writeln!(out, "   {}", chain.join(" → "))?;

    writeln!(out)?;
    writeln!(out, "{}", "🔀 Can run in parallel:".bold())?;
    if path.parallel.is_empty() {
        writeln!(out, "   None, every task is on the critical path")?;
    }
    for task in &path.parallel {
        if task.alongside.is_empty() {
            writeln!(
                out,
                "   {} (saves {}h)",
                task.task_id,
                format_hours(task.hours)
            )?;
        } else {
            writeln!(
                out,
                "   {} alongside {} (saves {}h)",
                task.task_id,
                task.alongside.join(", "),
                format_hours(task.hours)
            )?;
        }
    }

    writeln!(out)?;
    writeln!(out, "{}", "⏳ Estimated completion:".bold())?;
    writeln!(
        out,
        "   Serial: {}h (~{} working days)",
        format_hours(serial_hours),
        working_days(serial_hours, hours_per_day)
    )?;
    writeln!(
        out,
        "   Parallel: {}h (~{} working days)",
        format_hours(path.total_hours),
        working_days(path.total_hours, hours_per_day)
    )
}

/// Critical path, parallel opportunities and total durations
pub fn render_timeline(
    out: &mut dyn Write,
    timeline: Option<&Timeline>,
    hours_per_day: f64,
) -> io::Result<()> {
    heading(out, "📅 Task timeline", NARROW_RULE)?;

    let Some(timeline) = timeline else {
        return writeln!(out, "📝 No task data");
    };

    if !timeline.dangling.is_empty() {
        writeln!(out, "{}", "⚠️  Unresolved dependencies (ignored):".bold())?;
        for dep in &timeline.dangling {
            writeln!(
                out,
                "   {} depends on unknown task {}",
                dep.task_id, dep.dep_id
            )?;
        }
        writeln!(out)?;
    }

    match &timeline.schedule {
        Schedule::Acyclic(path) => {
            render_critical_path(out, path, timeline.serial_hours, hours_per_day)
        }
        Schedule::Cyclic { cycles } => {
            writeln!(
                out,
                "{}",
                "❌ Circular dependencies prevent scheduling:".red().bold()
            )?;
            for cycle in cycles {
                let mut closed = cycle.clone();
                if let Some(first) = cycle.first() {
                    closed.push(first.clone());
                }
                writeln!(out, "   {}", closed.join(" → "))?;
            }

            writeln!(out)?;
            writeln!(out, "{}", "⏳ Estimated completion:".bold())?;
            writeln!(
                out,
                "   Serial: {}h (~{} working days)",
                format_hours(timeline.serial_hours),
                working_days(timeline.serial_hours, hours_per_day)
            )?;
            writeln!(out, "   Parallel: unavailable until the cycles are resolved")
        }
    }
}
