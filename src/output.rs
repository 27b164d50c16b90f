use clap::ValueEnum;

use crate::error::Result;
use crate::model::Task;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Json,
    Pretty,
    Minimal,
}

pub fn print_task(task: &Task, format: Format) -> Result<()> {
    match format {
        Format::Json => println!("{}", serde_json::to_string(&task)?),
        Format::Pretty => {
            println!("[{}] {} ({})", task.id, task.title, task.category);
            if let Some(ref overview) = task.overview {
                println!("  {overview}");
            }
            if let Some(ref reason) = task.reason {
                println!("  why: {reason}");
            }
            if !task.dependencies.is_empty() {
                println!("  depends on: {}", task.dependencies.join(", "));
            }
            for item in &task.checklist {
                println!("  [ ] {item}");
            }
            for subtask in &task.subtasks {
                println!(
                    "    {} {} ({}h)",
                    subtask.id, subtask.title, subtask.estimated_hours
                );
            }
            if let Some(ref tips) = task.tips {
                println!("  tip: {tips}");
            }
        }
        Format::Minimal => {
            let title = truncate_title(&task.title, 24);
            println!(
                "{:8} {:24} {:12} {:>8} {:>6.1}",
                task.id,
                title,
                task.category,
                task.subtasks.len(),
                task.total_estimated_hours()
            );
        }
    }
    Ok(())
}

pub fn truncate_title(title: &str, max_len: usize) -> String {
    if title.chars().count() > max_len {
        let truncated: String = title.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    } else {
        title.to_string()
    }
}

pub fn print_tasks(tasks: &[Task], format: Format) -> Result<()> {
    match format {
        Format::Json => println!("{}", serde_json::to_string(tasks)?),
        Format::Pretty => {
            for task in tasks {
                print_task(task, Format::Pretty)?;
                println!();
            }
        }
        Format::Minimal => {
            println!(
                "{:8} {:24} {:12} {:>8} {:>6}",
                "ID", "TITLE", "CATEGORY", "SUBTASKS", "HOURS"
            );
            println!("{}", "-".repeat(64));
            for task in tasks {
                print_task(task, Format::Minimal)?;
            }
        }
    }
    Ok(())
}
