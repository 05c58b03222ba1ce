//! List command implementation.
use anyhow::Result;
use serde::Serialize;

use crate::cli::ListOpts;
use crate::tasks::{self, Task};

/// One row of the task listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskInfo {
    /// Task name.
    pub name: String,
    /// One-line description.
    pub description: String,
    /// Dependencies, in run order.
    pub dependencies: Vec<String>,
    /// Whether the task only groups other tasks.
    pub aggregate: bool,
}

impl TaskInfo {
    fn from_task(task: &dyn Task) -> Self {
        Self {
            name: task.name().to_string(),
            description: task.description().to_string(),
            dependencies: task
                .dependencies()
                .iter()
                .map(ToString::to_string)
                .collect(),
            aggregate: task.is_aggregate(),
        }
    }
}

/// Describe every registered task in registration order.
///
/// # Errors
///
/// Returns an error if the built-in task graph is invalid.
pub fn task_infos() -> Result<Vec<TaskInfo>> {
    let graph = tasks::build_graph()?;
    Ok(graph.tasks().map(TaskInfo::from_task).collect())
}

/// Render the listing as aligned plain text.
#[must_use]
pub fn render_text(infos: &[TaskInfo]) -> String {
    let width = infos.iter().map(|i| i.name.len()).max().unwrap_or(0);
    infos
        .iter()
        .map(|info| {
            let deps = if info.dependencies.is_empty() {
                String::new()
            } else {
                format!(" [{}]", info.dependencies.join(", "))
            };
            format!("{:<width$}  {}{deps}\n", info.name, info.description)
        })
        .collect()
}

/// Run the list command.
///
/// # Errors
///
/// Returns an error if the task graph is invalid or JSON encoding fails.
#[allow(clippy::print_stdout)]
pub fn run(opts: &ListOpts) -> Result<()> {
    let infos = task_infos()?;
    if opts.json {
        println!("{}", serde_json::to_string_pretty(&infos)?);
    } else {
        print!("{}", render_text(&infos));
    }
    Ok(())
}
