//! Sequential, dependency-ordered task execution.

use super::{Context, TaskGraph, execute};
use crate::error::TaskError;

/// Runs tasks from a [`TaskGraph`] one at a time.
///
/// Each requested task's dependencies run first, depth-first in the order
/// they are declared.  A task reached more than once in the same call runs
/// only the first time.  The first failure stops the run.
#[derive(Debug, Clone, Copy)]
pub struct Runner<'g> {
    graph: &'g TaskGraph,
}

impl<'g> Runner<'g> {
    /// Create a runner over `graph`.
    #[must_use]
    pub const fn new(graph: &'g TaskGraph) -> Self {
        Self { graph }
    }

    /// Run the named tasks and everything they depend on.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::UnknownTask`] (before anything runs) for an
    /// unregistered name, and [`TaskError::ExecutionFailed`] for the first
    /// task whose action fails.
    pub fn run<S: AsRef<str>>(&self, names: &[S], ctx: &Context) -> Result<(), TaskError> {
        let order = self.graph.execution_order(names)?;
        ctx.log.debug(&format!(
            "execution order: {}",
            order.iter().map(|t| t.name()).collect::<Vec<_>>().join(", ")
        ));

        for task in order {
            if task.is_aggregate() {
                ctx.log.debug(&format!("{}: done", task.name()));
                continue;
            }
            execute(task, ctx).map_err(|e| TaskError::ExecutionFailed {
                task: task.name().to_string(),
                reason: format!("{e:#}"),
            })?;
        }
        Ok(())
    }
}
