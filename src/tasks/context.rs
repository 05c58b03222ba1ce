use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::Config;
use crate::logging::Log;

/// Shared context for task execution.
pub struct Context {
    /// Resolved build configuration.
    pub config: Arc<Config>,
    /// Logger for output and task recording.
    pub log: Arc<dyn Log>,
    /// Whether to perform a dry run (preview changes without applying).
    pub dry_run: bool,
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("root", &self.config.root)
            .field("log", &"<dyn Log>")
            .field("dry_run", &self.dry_run)
            .finish()
    }
}

impl Context {
    /// Creates a new context for task execution.
    #[must_use]
    pub const fn new(config: Arc<Config>, log: Arc<dyn Log>, dry_run: bool) -> Self {
        Self {
            config,
            log,
            dry_run,
        }
    }

    /// Site root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.config.root
    }

    /// Absolute path of every output root.
    #[must_use]
    pub fn output_roots(&self) -> Vec<PathBuf> {
        self.config.output_roots()
    }

    /// `sub` joined onto every output root.
    #[must_use]
    pub fn output_dirs(&self, sub: &Path) -> Vec<PathBuf> {
        self.output_roots().into_iter().map(|r| r.join(sub)).collect()
    }

    /// Create a copy of this context with a different logger.
    #[must_use]
    pub fn with_log(&self, log: Arc<dyn Log>) -> Self {
        Self {
            config: Arc::clone(&self.config),
            log,
            dry_run: self.dry_run,
        }
    }
}
