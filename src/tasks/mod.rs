//! Named, dependency-ordered build tasks.
pub mod context;
pub mod graph;
pub mod metadata;
mod processing;
pub mod runner;
pub mod scripts;
pub mod styles;

pub use context::Context;
pub use graph::TaskGraph;
pub use processing::{TaskResult, TaskStats, process_resources, process_resources_remove};
pub use runner::Runner;

use anyhow::Result;

use crate::error::TaskError;
use crate::logging::TaskStatus;

/// Name of the task run when none is requested.
pub const DEFAULT_TASK: &str = "default";

/// A named, executable task.
pub trait Task: Send + Sync {
    /// Unique task name, as typed on the command line.
    fn name(&self) -> &str;

    /// One-line description for listings.
    fn description(&self) -> &str;

    /// Tasks that must complete before this one starts, in the order they
    /// are run.
    fn dependencies(&self) -> &[&str] {
        &[]
    }

    /// Whether this task only groups its dependencies and has no action.
    fn is_aggregate(&self) -> bool {
        false
    }

    /// Execute the task.
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be found or compiled, or if an
    /// output cannot be written or removed.
    fn run(&self, ctx: &Context) -> Result<TaskResult>;
}

/// A task with no action of its own that completes once its members have.
#[derive(Debug, Clone, Copy)]
pub struct Group {
    name: &'static str,
    description: &'static str,
    members: &'static [&'static str],
}

impl Group {
    /// Create a group running `members` in order.
    #[must_use]
    pub const fn new(
        name: &'static str,
        description: &'static str,
        members: &'static [&'static str],
    ) -> Self {
        Self {
            name,
            description,
            members,
        }
    }
}

impl Task for Group {
    fn name(&self) -> &str {
        self.name
    }

    fn description(&self) -> &str {
        self.description
    }

    fn dependencies(&self) -> &[&str] {
        self.members
    }

    fn is_aggregate(&self) -> bool {
        true
    }

    /// [`Runner`] skips aggregates, so this only runs when a group is
    /// executed directly; there is nothing to do beyond the members.
    fn run(&self, _ctx: &Context) -> Result<TaskResult> {
        Ok(TaskResult::Ok)
    }
}

/// Every task, in registration order.
#[must_use]
pub fn all_tasks() -> Vec<Box<dyn Task>> {
    vec![
        Box::new(styles::CompileStyles),
        Box::new(scripts::CopyVendorScripts),
        Box::new(metadata::CopyMetadata),
        Box::new(metadata::CleanIntermediates),
        Box::new(Group::new(
            "metadata",
            "Extract the categories-and-tags JSON, then clean up",
            &[metadata::COPY_TASK, metadata::CLEANUP_TASK],
        )),
        Box::new(Group::new(
            DEFAULT_TASK,
            "Build every asset",
            &[styles::TASK, scripts::TASK, "metadata"],
        )),
        Box::new(Group::new("sculpin", "Alias for default", &[DEFAULT_TASK])),
    ]
}

/// Register every task and check the resulting graph.
///
/// # Errors
///
/// Returns an error if two tasks share a name, a dependency is not
/// registered, or the dependencies form a cycle.
pub fn build_graph() -> Result<TaskGraph, TaskError> {
    let mut graph = TaskGraph::new();
    for task in all_tasks() {
        graph.register(task)?;
    }
    graph.validate()?;
    Ok(graph)
}

/// Execute a task, recording the result in the logger.
///
/// # Errors
///
/// Returns the task's own error after recording it as failed.
pub fn execute(task: &dyn Task, ctx: &Context) -> Result<()> {
    ctx.log.stage(task.name());

    match task.run(ctx) {
        Ok(TaskResult::Ok) => {
            ctx.log.record_task(task.name(), TaskStatus::Ok, None);
            Ok(())
        }
        Ok(TaskResult::Skipped(reason)) => {
            ctx.log.info(&format!("skipped: {reason}"));
            ctx.log
                .record_task(task.name(), TaskStatus::Skipped, Some(&reason));
            Ok(())
        }
        Ok(TaskResult::DryRun) => {
            ctx.log.record_task(task.name(), TaskStatus::DryRun, None);
            Ok(())
        }
        Err(e) => {
            ctx.log.error(&format!("{}: {e:#}", task.name()));
            ctx.log
                .record_task(task.name(), TaskStatus::Failed, Some(&format!("{e:#}")));
            Err(e)
        }
    }
}
