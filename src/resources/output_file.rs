use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;

use super::fs::ensure_parent_dir;
use super::{Resource, ResourceChange, ResourceState};
use crate::error::PipelineError;

/// A file that must hold exactly `contents` at `path`.
///
/// The same contents are usually written to several output roots, so the
/// bytes are shared rather than copied per destination.
#[derive(Debug, Clone)]
pub struct OutputFile {
    /// Absolute destination path.
    pub path: PathBuf,
    /// Desired file contents.
    pub contents: Arc<[u8]>,
}

impl OutputFile {
    /// Create a new output file resource.
    #[must_use]
    pub const fn new(path: PathBuf, contents: Arc<[u8]>) -> Self {
        Self { path, contents }
    }
}

impl Resource for OutputFile {
    fn description(&self) -> String {
        self.path.display().to_string()
    }

    fn current_state(&self) -> Result<ResourceState> {
        if self.path.is_dir() {
            return Ok(ResourceState::Invalid {
                reason: format!("{} is a directory", self.path.display()),
            });
        }
        match std::fs::read(&self.path) {
            Ok(existing) if *existing == *self.contents => Ok(ResourceState::Correct),
            Ok(existing) => Ok(ResourceState::Incorrect {
                current: format!("{} bytes differ", existing.len()),
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(ResourceState::Missing),
            Err(source) => Err(PipelineError::Read {
                path: self.path.clone(),
                source,
            }
            .into()),
        }
    }

    fn apply(&self) -> Result<ResourceChange> {
        ensure_parent_dir(&self.path)?;
        std::fs::write(&self.path, &self.contents).map_err(|source| PipelineError::Write {
            path: self.path.clone(),
            source,
        })?;
        Ok(ResourceChange::Applied)
    }
}
