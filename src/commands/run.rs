//! Run command implementation.
use std::sync::Arc;

use anyhow::Result;

use super::CommandSetup;
use crate::cli::{GlobalOpts, RunOpts};
use crate::logging::{Log, Logger};
use crate::tasks::{self, Context, DEFAULT_TASK, Runner};

/// Run the requested tasks (or `default`), then print the summary.
///
/// # Errors
///
/// Returns an error if configuration loading fails, a task name is unknown,
/// or any task fails.
pub fn run(global: &GlobalOpts, opts: &RunOpts, log: &Arc<Logger>) -> Result<()> {
    log.debug(&format!("sitebuild {}", super::version::version()));

    let setup = CommandSetup::init(global, log)?;
    let graph = tasks::build_graph()?;

    let requested: Vec<&str> = if opts.tasks.is_empty() {
        vec![DEFAULT_TASK]
    } else {
        opts.tasks.iter().map(String::as_str).collect()
    };
    if global.dry_run {
        log.info("dry run: nothing will be written or deleted");
    }

    let ctx = Context::new(
        Arc::new(setup.config),
        Arc::clone(log) as Arc<dyn Log>,
        global.dry_run,
    );
    let outcome = Runner::new(&graph).run(&requested, &ctx);

    log.print_summary();
    outcome?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::error::TaskError;
    use crate::logging::TaskStatus;

    fn global(root: &std::path::Path, dry_run: bool) -> GlobalOpts {
        GlobalOpts {
            dry_run,
            root: Some(root.to_path_buf()),
            config: None,
        }
    }

    fn run_opts(tasks: &[&str]) -> RunOpts {
        RunOpts {
            tasks: tasks.iter().map(ToString::to_string).collect(),
        }
    }

    #[test]
    fn unknown_task_fails_before_running_anything() {
        let dir = tempfile::tempdir().unwrap();
        let log = Arc::new(Logger::new("test"));
        let err = run(&global(dir.path(), false), &run_opts(&["deploy"]), &log).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<TaskError>(),
            Some(TaskError::UnknownTask(_))
        ));
        assert!(log.task_entries().is_empty());
    }

    #[test]
    fn cleanup_alone_runs_copy_first() {
        let dir = tempfile::tempdir().unwrap();
        let page = dir.path().join("output_dev/categories-and-tags");
        std::fs::create_dir_all(&page).unwrap();
        std::fs::write(page.join("index.html"), "{}").unwrap();
        std::fs::create_dir_all(dir.path().join("output_prod/categories-and-tags")).unwrap();
        std::fs::write(
            dir.path().join("output_prod/categories-and-tags/index.html"),
            "{}",
        )
        .unwrap();

        let log = Arc::new(Logger::new("test"));
        run(
            &global(dir.path(), false),
            &run_opts(&["metadata-cleanup"]),
            &log,
        )
        .unwrap();

        let names: Vec<String> = log.task_entries().into_iter().map(|e| e.name).collect();
        assert_eq!(names, ["metadata-copy", "metadata-cleanup"]);
        assert!(dir.path().join("output_dev/categories-and-tags.json").exists());
        assert!(!page.exists());
    }

    #[test]
    fn failure_is_recorded_and_returned() {
        let dir = tempfile::tempdir().unwrap();
        let log = Arc::new(Logger::new("test"));
        let err = run(&global(dir.path(), false), &run_opts(&["styles"]), &log).unwrap_err();
        assert!(err.to_string().contains("styles"));
        assert_eq!(log.task_entries()[0].status, TaskStatus::Failed);
    }
}
