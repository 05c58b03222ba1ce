//! Build configuration: output roots, pipeline sources, and cleanup lists.
//!
//! Everything the tasks need to know about the site layout lives here as
//! data.  The values default to the conventional Sculpin layout, and any of
//! them can be overridden from an optional `sitebuild.toml` at the site root.
pub mod toml_loader;
pub mod validation;

use std::path::{Component, Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;

/// Default config file name, looked up in the site root.
pub const CONFIG_FILE: &str = "sitebuild.toml";

/// Raw, user-facing configuration as deserialized from TOML.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Mirrored output trees, relative to the site root.
    pub output_roots: Vec<PathBuf>,
    /// Stylesheet compilation settings.
    pub styles: StylesSettings,
    /// Vendored script copy settings.
    pub scripts: ScriptsSettings,
    /// Categories-and-tags metadata settings.
    pub metadata: MetadataSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            output_roots: vec![PathBuf::from("output_dev"), PathBuf::from("output_prod")],
            styles: StylesSettings::default(),
            scripts: ScriptsSettings::default(),
            metadata: MetadataSettings::default(),
        }
    }
}

/// `[styles]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StylesSettings {
    /// Glob (relative to the site root) selecting the stylesheet sources.
    pub source: String,
    /// Directory under each output root receiving the compiled CSS.
    pub dest: PathBuf,
}

impl Default for StylesSettings {
    fn default() -> Self {
        Self {
            source: "source/_sass/style.sass".to_string(),
            dest: PathBuf::from("css"),
        }
    }
}

/// `[scripts]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScriptsSettings {
    /// Glob (relative to the site root) selecting the vendored scripts.
    pub source: String,
    /// Directory under each output root receiving the scripts.
    pub dest: PathBuf,
}

impl Default for ScriptsSettings {
    fn default() -> Self {
        Self {
            source: "node_modules/bootstrap-sass/assets/javascripts/bootstrap.min.js".to_string(),
            dest: PathBuf::from("js"),
        }
    }
}

/// `[metadata]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MetadataSettings {
    /// Generated page, relative to each output root.
    pub page: PathBuf,
    /// File name written at each output root.
    pub output: String,
    /// Subtrees removed from each output root once the page is copied.
    pub cleanup: Vec<PathBuf>,
}

impl Default for MetadataSettings {
    fn default() -> Self {
        Self {
            page: PathBuf::from("categories-and-tags/index.html"),
            output: "categories-and-tags.json".to_string(),
            cleanup: vec![
                PathBuf::from("categories-and-tags"),
                PathBuf::from("_posts"),
                PathBuf::from("_sass"),
            ],
        }
    }
}

/// Fully resolved configuration for one site root.
#[derive(Debug, Clone)]
pub struct Config {
    /// Absolute site root; every relative setting is resolved against it.
    pub root: PathBuf,
    /// Validated settings.
    pub settings: Settings,
}

impl Config {
    /// Load configuration for `root`.
    ///
    /// Reads `config_path` when given, otherwise `<root>/sitebuild.toml`.
    /// A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if a setting
    /// fails [`Config::from_settings`] checks.
    pub fn load(root: &Path, config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = config_path.map_or_else(|| root.join(CONFIG_FILE), Path::to_path_buf);
        let settings: Settings = toml_loader::load_config(&path)?;
        Self::from_settings(root, settings)
    }

    /// Build a config from already-deserialized settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if there are no output roots, or
    /// if any path setting is absolute or climbs out of its base with `..`.
    pub fn from_settings(root: &Path, settings: Settings) -> Result<Self, ConfigError> {
        if settings.output_roots.is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "output_roots".to_string(),
                reason: "at least one output root is required".to_string(),
            });
        }
        for out in &settings.output_roots {
            check_contained("output_roots", out)?;
        }
        check_contained("styles.source", Path::new(&settings.styles.source))?;
        check_contained("styles.dest", &settings.styles.dest)?;
        check_contained("scripts.source", Path::new(&settings.scripts.source))?;
        check_contained("scripts.dest", &settings.scripts.dest)?;
        check_contained("metadata.page", &settings.metadata.page)?;
        check_contained("metadata.output", Path::new(&settings.metadata.output))?;
        for dir in &settings.metadata.cleanup {
            check_contained("metadata.cleanup", dir)?;
        }

        Ok(Self {
            root: root.to_path_buf(),
            settings,
        })
    }

    /// Absolute paths of every output root.
    #[must_use]
    pub fn output_roots(&self) -> Vec<PathBuf> {
        self.settings
            .output_roots
            .iter()
            .map(|r| self.root.join(r))
            .collect()
    }
}

/// Reject paths that could reach outside the directory they are joined to.
fn check_contained(key: &str, path: &Path) -> Result<(), ConfigError> {
    if path.as_os_str().is_empty() {
        return Err(ConfigError::InvalidValue {
            key: key.to_string(),
            reason: "must not be empty".to_string(),
        });
    }
    let escapes = path.components().any(|c| {
        matches!(
            c,
            Component::ParentDir | Component::RootDir | Component::Prefix(_)
        )
    });
    if escapes {
        return Err(ConfigError::InvalidValue {
            key: key.to_string(),
            reason: format!(
                "'{}' must be a relative path without '..'",
                path.display()
            ),
        });
    }
    Ok(())
}
