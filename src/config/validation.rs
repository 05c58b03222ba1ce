use std::collections::HashSet;
use std::path::{Path, PathBuf};

use super::Config;

/// A validation warning detected during configuration loading.
///
/// Warnings never stop a run; hard errors are raised by
/// [`Config::from_settings`] instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    /// The settings section (e.g., "output_roots", "metadata").
    pub source: String,
    /// The specific item that triggered the warning.
    pub item: String,
    /// Human-readable warning message.
    pub message: String,
}

impl ValidationWarning {
    /// Create a warning from its three parts.
    #[must_use]
    pub fn new(
        source: impl Into<String>,
        item: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            item: item.into(),
            message: message.into(),
        }
    }
}

/// Check the configuration for suspicious but legal settings.
#[must_use]
pub fn validate(config: &Config) -> Vec<ValidationWarning> {
    let settings = &config.settings;
    let mut warnings = Vec::new();

    for dup in duplicates(&settings.output_roots) {
        warnings.push(ValidationWarning::new(
            "output_roots",
            dup.display().to_string(),
            "listed more than once; it will be written twice",
        ));
    }

    for dup in duplicates(&settings.metadata.cleanup) {
        warnings.push(ValidationWarning::new(
            "metadata",
            dup.display().to_string(),
            "cleanup entry listed more than once",
        ));
    }

    let output = Path::new(&settings.metadata.output);
    for dir in &settings.metadata.cleanup {
        if output.starts_with(dir) {
            warnings.push(ValidationWarning::new(
                "metadata",
                dir.display().to_string(),
                format!(
                    "cleanup removes the extracted '{}' right after it is written",
                    settings.metadata.output
                ),
            ));
        }
    }

    let styles_source = config.root.join(&settings.styles.source);
    for out in config.output_roots() {
        if styles_source.starts_with(&out) {
            warnings.push(ValidationWarning::new(
                "styles",
                settings.styles.source.clone(),
                "stylesheet source lives inside an output root",
            ));
        }
    }

    warnings
}

fn duplicates(paths: &[PathBuf]) -> Vec<&PathBuf> {
    let mut seen = HashSet::new();
    paths.iter().filter(|p| !seen.insert(*p)).collect()
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::config::Settings;

    fn config_with(settings: Settings) -> Config {
        Config::from_settings(Path::new("/site"), settings).unwrap()
    }

    #[test]
    fn defaults_produce_no_warnings() {
        assert!(validate(&config_with(Settings::default())).is_empty());
    }

    #[test]
    fn duplicate_output_root_warns() {
        let settings = Settings {
            output_roots: vec![PathBuf::from("out"), PathBuf::from("out")],
            ..Settings::default()
        };
        let warnings = validate(&config_with(settings));
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].source, "output_roots");
        assert_eq!(warnings[0].item, "out");
    }

    #[test]
    fn duplicate_cleanup_entry_warns() {
        let mut settings = Settings::default();
        settings.metadata.cleanup.push(PathBuf::from("_posts"));
        let warnings = validate(&config_with(settings));
        assert!(warnings.iter().any(|w| w.item == "_posts"));
    }

    #[test]
    fn cleanup_covering_output_warns() {
        let mut settings = Settings::default();
        settings.metadata.output = "_posts/index.json".to_string();
        let warnings = validate(&config_with(settings));
        assert!(
            warnings
                .iter()
                .any(|w| w.source == "metadata" && w.message.contains("_posts/index.json"))
        );
    }

    #[test]
    fn styles_source_inside_output_root_warns() {
        let mut settings = Settings::default();
        settings.styles.source = "output_dev/_sass/style.sass".to_string();
        let warnings = validate(&config_with(settings));
        assert!(warnings.iter().any(|w| w.source == "styles"));
    }
}
