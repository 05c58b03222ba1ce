//! Generic resource processing loop: check state, apply or remove, collect stats.
//!
//! Single-resource handling lives in [`apply`]; this module owns the
//! per-task counters and the loops that drive them.

mod apply;

use anyhow::Result;

use super::Context;
use crate::resources::Resource;

/// Result of a single task execution.
///
/// # Examples
///
/// ```
/// use sitebuild::tasks::TaskResult;
///
/// let ok = TaskResult::Ok;
/// let skipped = TaskResult::Skipped("nothing to clean".into());
/// let dry = TaskResult::DryRun;
///
/// assert!(matches!(ok, TaskResult::Ok));
/// assert!(matches!(skipped, TaskResult::Skipped(_)));
/// assert!(matches!(dry, TaskResult::DryRun));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskResult {
    /// Task completed successfully.
    Ok,
    /// Task had nothing to do.
    Skipped(String),
    /// Task ran in dry-run mode.
    DryRun,
}

/// Counters for tasks that process many resources.
///
/// # Examples
///
/// ```
/// use sitebuild::tasks::TaskStats;
///
/// let mut stats = TaskStats::new();
/// stats.changed = 2;
/// stats.already_ok = 1;
///
/// assert_eq!(stats.summary(false), "2 changed, 1 already ok");
/// assert_eq!(stats.summary(true), "2 would change, 1 already ok");
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TaskStats {
    /// Number of resources written or removed.
    pub changed: u32,
    /// Number of resources already in the desired state.
    pub already_ok: u32,
}

impl TaskStats {
    /// Create a new empty stats counter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Format the summary string (e.g. "3 changed, 10 already ok").
    #[must_use]
    pub fn summary(&self, dry_run: bool) -> String {
        let verb = if dry_run { "would change" } else { "changed" };
        format!("{} {verb}, {} already ok", self.changed, self.already_ok)
    }

    /// Log the summary and return the appropriate `TaskResult`.
    #[must_use]
    pub fn finish(self, ctx: &Context) -> TaskResult {
        ctx.log.info(&self.summary(ctx.dry_run));
        if ctx.dry_run {
            TaskResult::DryRun
        } else {
            TaskResult::Ok
        }
    }
}

impl std::ops::AddAssign for TaskStats {
    fn add_assign(&mut self, other: Self) {
        self.changed += other.changed;
        self.already_ok += other.already_ok;
    }
}

/// Bring every resource to its desired state, returning the accumulated stats.
///
/// `verb` is used in log lines ("write", "copy").  The first error aborts the
/// loop; resources after it are left untouched.
///
/// # Errors
///
/// Returns an error if any resource fails to report its state, is in a state
/// it cannot be brought out of (such as a directory where a file belongs), or
/// fails to apply.
pub fn process_resources<R: Resource>(
    ctx: &Context,
    resources: impl IntoIterator<Item = R>,
    verb: &str,
) -> Result<TaskStats> {
    let mut stats = TaskStats::new();
    for resource in resources {
        let current = resource.current_state()?;
        stats += apply::process_single(ctx, &resource, current, verb)?;
    }
    Ok(stats)
}

/// Remove every resource that currently exists.
///
/// Resources that are already gone count as "already ok", so removal can be
/// repeated safely.
///
/// # Errors
///
/// Returns an error if a resource fails to report its state or to be removed.
pub fn process_resources_remove<R: Resource>(
    ctx: &Context,
    resources: impl IntoIterator<Item = R>,
    verb: &str,
) -> Result<TaskStats> {
    let mut stats = TaskStats::new();
    for resource in resources {
        let current = resource.current_state()?;
        stats += apply::remove_single(ctx, &resource, &current, verb)?;
    }
    Ok(stats)
}
