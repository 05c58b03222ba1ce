//! Glob-based source matching.
//!
//! Patterns are written relative to the site root.  Each match keeps its
//! path relative to the pattern's *glob base* (the leading directories that
//! contain no wildcards), which is what destination paths are built from:
//! `source/_sass/**/*.sass` matching `source/_sass/pages/blog.sass` yields
//! `pages/blog.sass`.

use std::path::{Component, Path, PathBuf};

use crate::error::PipelineError;

const GLOB_META: &[char] = &['*', '?', '[', ']', '{', '}'];

/// A file selected by a pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedFile {
    /// Absolute path of the file.
    pub path: PathBuf,
    /// Path relative to the pattern's glob base.
    pub relative: PathBuf,
}

/// Return the wildcard-free directory prefix of `pattern`.
///
/// For a literal file path the base is its parent directory.
///
/// # Examples
///
/// ```
/// use std::path::PathBuf;
/// use sitebuild::pipeline::matcher::glob_base;
///
/// assert_eq!(glob_base("source/_sass/**/*.sass"), PathBuf::from("source/_sass"));
/// assert_eq!(glob_base("source/_sass/style.sass"), PathBuf::from("source/_sass"));
/// assert_eq!(glob_base("*.js"), PathBuf::new());
/// ```
#[must_use]
pub fn glob_base(pattern: &str) -> PathBuf {
    let path = Path::new(pattern);
    let mut base = PathBuf::new();
    let mut literal = true;
    for component in path.components() {
        let is_glob = match component {
            Component::Normal(part) => part.to_string_lossy().contains(GLOB_META),
            _ => false,
        };
        if is_glob {
            literal = false;
            break;
        }
        base.push(component);
    }
    if literal {
        base.pop();
    }
    base
}

/// Expand `pattern` (relative to `root`) into the regular files it matches.
///
/// Results are sorted by path so repeated runs see the same order.
///
/// # Errors
///
/// Returns [`PipelineError::InvalidPattern`] if the pattern does not parse,
/// [`PipelineError::SourceNotFound`] if nothing matches, and
/// [`PipelineError::Read`] if a directory cannot be traversed.
pub fn match_files(root: &Path, pattern: &str) -> Result<Vec<MatchedFile>, PipelineError> {
    let escaped_root = glob::Pattern::escape(&root.to_string_lossy());
    let full = Path::new(&escaped_root).join(pattern);
    let base = root.join(glob_base(pattern));

    let paths = glob::glob(&full.to_string_lossy()).map_err(|e| PipelineError::InvalidPattern {
        pattern: pattern.to_string(),
        message: e.msg.to_string(),
    })?;

    let mut matches = Vec::new();
    for entry in paths {
        let path = entry.map_err(|e| PipelineError::Read {
            path: e.path().to_path_buf(),
            source: e.into_error(),
        })?;
        if !path.is_file() {
            continue;
        }
        let relative = path
            .strip_prefix(&base)
            .map_or_else(|_| PathBuf::from(path.file_name().unwrap_or_default()), Path::to_path_buf);
        matches.push(MatchedFile { path, relative });
    }

    if matches.is_empty() {
        return Err(PipelineError::SourceNotFound(pattern.to_string()));
    }
    matches.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(matches)
}
