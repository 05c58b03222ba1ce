//! Source → stages → destinations file pipeline.
//!
//! A [`Pipeline`] names a glob of source files and an ordered list of
//! [`Stage`]s.  Running it reads every match into a [`FileItem`], threads the
//! item through the stages, and hands back the transformed items.  Writing is
//! left to the caller through [`into_outputs`], which fans each item out to
//! one [`OutputFile`] resource per destination directory.
//!
//! # Example
//!
//! ```no_run
//! use std::path::{Path, PathBuf};
//! use sitebuild::pipeline::{Pipeline, Stage, into_outputs};
//!
//! let items = Pipeline::source("source/_sass/style.sass")
//!     .pipe(Stage::CompileSass)
//!     .pipe(Stage::MinifyCss)
//!     .pipe(Stage::SetExtension("css".into()))
//!     .run(Path::new("/site"))?;
//! let outputs = into_outputs(items, &[PathBuf::from("/site/output_dev/css")]);
//! # Ok::<(), sitebuild::error::PipelineError>(())
//! ```

pub mod matcher;
pub mod stage;

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub use stage::Stage;

use crate::error::PipelineError;
use crate::resources::OutputFile;

/// A file flowing through a pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileItem {
    /// Absolute path the item was read from.
    pub source: PathBuf,
    /// Destination-relative path, initially relative to the glob base.
    pub relative: PathBuf,
    /// Current contents.
    pub contents: Vec<u8>,
}

/// A source pattern plus the stages applied to every matched file.
#[derive(Debug, Clone)]
pub struct Pipeline {
    pattern: String,
    stages: Vec<Stage>,
}

impl Pipeline {
    /// Start a pipeline reading files matched by `pattern`.
    #[must_use]
    pub fn source(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            stages: Vec::new(),
        }
    }

    /// Append a stage.
    #[must_use]
    pub fn pipe(mut self, stage: Stage) -> Self {
        self.stages.push(stage);
        self
    }

    /// Match, read and transform every source file.
    ///
    /// # Errors
    ///
    /// Returns an error if the pattern matches nothing, a file cannot be
    /// read, or any stage fails.  Nothing is retried.
    pub fn run(&self, root: &Path) -> Result<Vec<FileItem>, PipelineError> {
        let mut items = Vec::new();
        for matched in matcher::match_files(root, &self.pattern)? {
            let contents = std::fs::read(&matched.path).map_err(|source| PipelineError::Read {
                path: matched.path.clone(),
                source,
            })?;
            let mut item = Some(FileItem {
                source: matched.path,
                relative: matched.relative,
                contents,
            });
            for stage in &self.stages {
                item = match item {
                    Some(current) => stage.apply(current)?,
                    None => break,
                };
            }
            items.extend(item);
        }
        Ok(items)
    }
}

/// Renders as `pattern | stage | stage`, the form used in debug logs.
impl fmt::Display for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.pattern)?;
        for stage in &self.stages {
            write!(f, " | {stage}")?;
        }
        Ok(())
    }
}

/// Fan items out to every destination directory.
///
/// Contents are shared between the copies written to each destination.
#[must_use]
pub fn into_outputs(items: Vec<FileItem>, dests: &[PathBuf]) -> Vec<OutputFile> {
    items
        .into_iter()
        .flat_map(|item| {
            let contents: Arc<[u8]> = Arc::from(item.contents);
            let relative = item.relative;
            dests
                .iter()
                .map(move |dest| OutputFile::new(dest.join(&relative), Arc::clone(&contents)))
                .collect::<Vec<_>>()
        })
        .collect()
}
