pub mod list;
pub mod run;
pub mod version;

use std::path::PathBuf;

use anyhow::{Context as _, Result};

use crate::cli::GlobalOpts;
use crate::config::Config;
use crate::config::validation;
use crate::logging::{Log, Logger};

/// Shared state produced by the common command setup sequence.
#[derive(Debug)]
pub struct CommandSetup {
    /// Loaded and validated configuration.
    pub config: Config,
}

impl CommandSetup {
    /// Resolve the site root and load its configuration, logging warnings.
    ///
    /// # Errors
    ///
    /// Returns an error if the root does not exist or the configuration
    /// cannot be read or is invalid.
    pub fn init(global: &GlobalOpts, log: &Logger) -> Result<Self> {
        let root = resolve_root(global)?;
        log.debug(&format!("site root: {}", root.display()));

        let config = Config::load(&root, global.config.as_deref())?;
        log.debug(&format!(
            "{} output root(s): {}",
            config.settings.output_roots.len(),
            config
                .settings
                .output_roots
                .iter()
                .map(|r| r.display().to_string())
                .collect::<Vec<_>>()
                .join(", ")
        ));

        let warnings = validation::validate(&config);
        if !warnings.is_empty() {
            log.warn(&format!(
                "found {} configuration warning(s):",
                warnings.len()
            ));
            for warning in &warnings {
                log.warn(&format!(
                    "  {} [{}]: {}",
                    warning.source, warning.item, warning.message
                ));
            }
        }

        Ok(Self { config })
    }
}

/// Resolve the site root from `--root`, falling back to the current directory.
///
/// # Errors
///
/// Returns an error if the directory does not exist or cannot be resolved.
pub fn resolve_root(global: &GlobalOpts) -> Result<PathBuf> {
    let candidate = match global.root {
        Some(ref root) => root.clone(),
        None => std::env::current_dir().context("cannot determine current directory")?,
    };
    dunce::canonicalize(&candidate)
        .with_context(|| format!("site root {} does not exist", candidate.display()))
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn opts(root: Option<PathBuf>) -> GlobalOpts {
        GlobalOpts {
            dry_run: false,
            root,
            config: None,
        }
    }

    #[test]
    fn resolve_root_uses_explicit_root() {
        let dir = tempfile::tempdir().unwrap();
        let root = resolve_root(&opts(Some(dir.path().to_path_buf()))).unwrap();
        assert_eq!(root, dunce::canonicalize(dir.path()).unwrap());
    }

    #[test]
    fn resolve_root_rejects_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let err = resolve_root(&opts(Some(dir.path().join("absent")))).unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn setup_loads_config_from_root() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("sitebuild.toml"),
            "output_roots = [\"public\"]\n",
        )
        .unwrap();
        let log = Logger::new("test");
        let setup = CommandSetup::init(&opts(Some(dir.path().to_path_buf())), &log).unwrap();
        assert_eq!(setup.config.settings.output_roots, vec![PathBuf::from("public")]);
    }

    #[test]
    fn setup_surfaces_config_errors() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("sitebuild.toml"), "output_roots = []\n").unwrap();
        let log = Logger::new("test");
        assert!(CommandSetup::init(&opts(Some(dir.path().to_path_buf())), &log).is_err());
    }
}
