//! Task outcomes recorded for the run summary, and the [`Log`] trait tasks
//! write through.

/// One task's outcome, in the order tasks finished.
#[derive(Debug, Clone)]
pub struct TaskEntry {
    /// Task name as typed on the command line.
    pub name: String,
    /// How the task ended.
    pub status: TaskStatus,
    /// Skip reason or error chain, when there is one.
    pub detail: Option<String>,
}

/// How a task ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    /// Outputs were written or removed (or already up to date).
    Ok,
    /// Nothing to build, e.g. only Sass partials matched.
    Skipped,
    /// Sources were read and compiled but nothing touched the output roots.
    DryRun,
    /// The task returned an error and halted the run.
    Failed,
}

impl TaskStatus {
    /// Summary marker and its SGR color code.
    pub(super) const fn marker(self) -> (&'static str, &'static str) {
        match self {
            Self::Ok => ("✓", "32"),
            Self::Skipped => ("○", "33"),
            Self::DryRun => ("~", "37"),
            Self::Failed => ("✗", "31"),
        }
    }
}

/// Sink for task progress messages.
///
/// [`Logger`](super::Logger) forwards everything to [`tracing`]; the trait
/// lets a [`Context`](crate::tasks::Context) carry any implementation.
pub trait Log: Send + Sync {
    /// Header printed when a task starts, or for the summary block.
    fn stage(&self, msg: &str);
    /// Progress line, such as a task's change counts.
    fn info(&self, msg: &str);
    /// Detail only shown with `--verbose` (always kept in the log file).
    fn debug(&self, msg: &str);
    /// Problem that does not stop the build, such as a config warning.
    fn warn(&self, msg: &str);
    /// Task failure.
    fn error(&self, msg: &str);
    /// A write or delete that dry-run mode held back.
    fn dry_run(&self, msg: &str);
    /// Remember a task outcome for the summary.
    fn record_task(&self, name: &str, status: TaskStatus, detail: Option<&str>);
}
