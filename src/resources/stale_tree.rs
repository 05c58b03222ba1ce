use std::path::PathBuf;

use anyhow::Result;

use super::fs::remove_tree;
use super::{Resource, ResourceChange, ResourceState};

/// An intermediate subtree that should not survive the build.
///
/// The resource counts as [`ResourceState::Correct`] ("ours to remove") while
/// anything exists at `path`, and as [`ResourceState::Missing`] once it is
/// gone, so removal is naturally idempotent.
#[derive(Debug, Clone)]
pub struct StaleTree {
    /// Absolute path of the subtree.
    pub path: PathBuf,
}

impl StaleTree {
    /// Create a new stale-tree resource.
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl Resource for StaleTree {
    fn description(&self) -> String {
        self.path.display().to_string()
    }

    fn current_state(&self) -> Result<ResourceState> {
        if self.path.symlink_metadata().is_ok() {
            Ok(ResourceState::Correct)
        } else {
            Ok(ResourceState::Missing)
        }
    }

    fn apply(&self) -> Result<ResourceChange> {
        self.remove()
    }

    fn remove(&self) -> Result<ResourceChange> {
        if remove_tree(&self.path)? {
            Ok(ResourceChange::Applied)
        } else {
            Ok(ResourceChange::AlreadyCorrect)
        }
    }
}
