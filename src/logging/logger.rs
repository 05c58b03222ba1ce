//! The [`Logger`] used for a build run.
use std::path::PathBuf;
use std::sync::Mutex;

use super::subscriber::{DRY_RUN_TARGET, STAGE_TARGET};
use super::types::{Log, TaskEntry, TaskStatus};
use super::utils::log_file_path;

/// Forwards messages to [`tracing`] and keeps each task's outcome for the
/// closing summary.
///
/// Rendering is the subscriber's job (see
/// [`init_subscriber`](super::init_subscriber)); without one installed, as in
/// tests, messages are dropped but outcomes are still recorded.
#[derive(Debug)]
pub struct Logger {
    tasks: Mutex<Vec<TaskEntry>>,
    log_file: Option<PathBuf>,
}

impl Logger {
    /// Create a logger for `command`; the summary points at its log file.
    #[must_use]
    pub fn new(command: &str) -> Self {
        Self {
            tasks: Mutex::new(Vec::new()),
            log_file: log_file_path(command),
        }
    }

    /// Outcomes recorded so far, oldest first.
    #[must_use]
    pub fn task_entries(&self) -> Vec<TaskEntry> {
        self.tasks.lock().map_or_else(|_| vec![], |g| g.clone())
    }

    /// Print one line per finished task, then the totals.
    ///
    /// Called once after the runner returns, whether or not a task failed.
    /// Silent when no task ran (e.g. an unknown task name was rejected).
    pub fn print_summary(&self) {
        let tasks = self.task_entries();
        if tasks.is_empty() {
            return;
        }

        self.stage("Summary");
        let (mut ok, mut skipped, mut dry_run, mut failed) = (0, 0, 0, 0);
        for task in &tasks {
            let (marker, color) = task.status.marker();
            let detail = task
                .detail
                .as_deref()
                .map_or_else(String::new, |d| format!(" ({d})"));
            self.info(&format!("\x1b[{color}m{marker} {}{detail}\x1b[0m", task.name));
            match task.status {
                TaskStatus::Ok => ok += 1,
                TaskStatus::Skipped => skipped += 1,
                TaskStatus::DryRun => dry_run += 1,
                TaskStatus::Failed => failed += 1,
            }
        }

        self.info(&format!(
            "{} task(s): {ok} ok, {skipped} skipped, {dry_run} dry run, {failed} failed",
            tasks.len()
        ));
        if let Some(path) = &self.log_file {
            self.info(&format!("\x1b[2mlog: {}\x1b[0m", path.display()));
        }
    }
}

impl Log for Logger {
    fn stage(&self, msg: &str) {
        tracing::info!(target: STAGE_TARGET, "{msg}");
    }

    fn info(&self, msg: &str) {
        tracing::info!("{msg}");
    }

    fn debug(&self, msg: &str) {
        tracing::debug!("{msg}");
    }

    fn warn(&self, msg: &str) {
        tracing::warn!("{msg}");
    }

    fn error(&self, msg: &str) {
        tracing::error!("{msg}");
    }

    fn dry_run(&self, msg: &str) {
        tracing::info!(target: DRY_RUN_TARGET, "{msg}");
    }

    fn record_task(&self, name: &str, status: TaskStatus, detail: Option<&str>) {
        if let Ok(mut guard) = self.tasks.lock() {
            guard.push(TaskEntry {
                name: name.to_string(),
                status,
                detail: detail.map(String::from),
            });
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_no_outcomes() {
        assert!(Logger::new("test").task_entries().is_empty());
    }

    #[test]
    fn outcomes_keep_finish_order_and_detail() {
        let log = Logger::new("test");
        log.record_task("styles", TaskStatus::Ok, None);
        log.record_task("vendor-scripts", TaskStatus::Failed, Some("Source not found"));
        let tasks = log.task_entries();
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].name, "styles");
        assert_eq!(tasks[0].detail, None);
        assert_eq!(tasks[1].status, TaskStatus::Failed);
        assert_eq!(tasks[1].detail.as_deref(), Some("Source not found"));
    }

    #[test]
    fn records_through_the_trait_object() {
        let log = Logger::new("test");
        let dyn_log: &dyn Log = &log;
        dyn_log.record_task("metadata-copy", TaskStatus::DryRun, None);
        assert_eq!(log.task_entries()[0].status, TaskStatus::DryRun);
    }

    #[test]
    fn summary_of_every_status_does_not_panic() {
        let log = Logger::new("test");
        log.record_task("a", TaskStatus::Ok, None);
        log.record_task("b", TaskStatus::Skipped, Some("only partials match"));
        log.record_task("c", TaskStatus::DryRun, None);
        log.record_task("d", TaskStatus::Failed, Some("boom"));
        log.print_summary();
        assert_eq!(log.task_entries().len(), 4);
    }
}
