//! Content transformations applied to each [`FileItem`].

use std::fmt;
use std::path::Path;

use super::FileItem;
use crate::error::PipelineError;

/// One step of a transform pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stage {
    /// Compile Sass (`.sass` indented syntax or `.scss`) to expanded CSS.
    ///
    /// Partials (file names starting with `_`) are dropped from the stream;
    /// they are only meant to be imported by other stylesheets.
    CompileSass,
    /// Minify CSS.
    MinifyCss,
    /// Replace the file extension (e.g. `"css"`).
    SetExtension(String),
    /// Replace the whole file name, keeping the directory part.
    Rename(String),
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CompileSass => write!(f, "compile sass"),
            Self::MinifyCss => write!(f, "minify css"),
            Self::SetExtension(ext) => write!(f, "set extension .{ext}"),
            Self::Rename(name) => write!(f, "rename to {name}"),
        }
    }
}

impl Stage {
    /// Transform one item.
    ///
    /// Returns `Ok(None)` when the stage drops the item from the stream.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Compile`] if the stylesheet compiler rejects
    /// the input (including non-UTF-8 content).
    pub fn apply(&self, mut item: FileItem) -> Result<Option<FileItem>, PipelineError> {
        match self {
            Self::CompileSass => {
                if is_partial(&item.relative) {
                    return Ok(None);
                }
                let syntax = syntax_for(&item.relative);
                let mut options = grass::Options::default()
                    .style(grass::OutputStyle::Expanded)
                    .input_syntax(syntax);
                if let Some(dir) = item.source.parent() {
                    options = options.load_path(dir);
                }
                let css = compile(&item, &options)?;
                item.contents = css.into_bytes();
            }
            Self::MinifyCss => {
                let options = grass::Options::default()
                    .style(grass::OutputStyle::Compressed)
                    .input_syntax(grass::InputSyntax::Css);
                let css = compile(&item, &options)?;
                item.contents = css.into_bytes();
            }
            Self::SetExtension(ext) => {
                item.relative.set_extension(ext);
            }
            Self::Rename(name) => {
                item.relative.set_file_name(name);
            }
        }
        Ok(Some(item))
    }
}

fn compile(item: &FileItem, options: &grass::Options<'_>) -> Result<String, PipelineError> {
    let text = std::str::from_utf8(&item.contents).map_err(|e| PipelineError::Compile {
        path: item.source.clone(),
        message: format!("not valid UTF-8: {e}"),
    })?;
    grass::from_string(text, options).map_err(|e| PipelineError::Compile {
        path: item.source.clone(),
        message: e.to_string(),
    })
}

fn is_partial(path: &Path) -> bool {
    path.file_name()
        .is_some_and(|name| name.to_string_lossy().starts_with('_'))
}

fn syntax_for(path: &Path) -> grass::InputSyntax {
    match path.extension().and_then(|e| e.to_str()) {
        Some("sass") => grass::InputSyntax::Sass,
        Some("css") => grass::InputSyntax::Css,
        _ => grass::InputSyntax::Scss,
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn item(relative: &str, contents: &str) -> FileItem {
        FileItem {
            source: PathBuf::from("/site/source/_sass").join(relative),
            relative: PathBuf::from(relative),
            contents: contents.as_bytes().to_vec(),
        }
    }

    fn text(item: &FileItem) -> String {
        String::from_utf8(item.contents.clone()).unwrap()
    }

    #[test]
    fn compiles_indented_syntax() {
        let out = Stage::CompileSass
            .apply(item("style.sass", "$c: red\nbody\n  color: $c\n"))
            .unwrap()
            .unwrap();
        let css = text(&out);
        assert!(css.contains("body"));
        assert!(css.contains("color: red"));
    }

    #[test]
    fn compiles_scss_syntax() {
        let out = Stage::CompileSass
            .apply(item("main.scss", "a { b { color: blue; } }"))
            .unwrap()
            .unwrap();
        assert!(text(&out).contains("a b"));
    }

    #[test]
    fn partials_are_dropped() {
        let out = Stage::CompileSass
            .apply(item("_variables.sass", "$c: red\n"))
            .unwrap();
        assert!(out.is_none());
    }

    #[test]
    fn syntax_error_surfaces_compiler_message() {
        let err = Stage::CompileSass
            .apply(item("broken.scss", "a { color: red;"))
            .unwrap_err();
        match err {
            PipelineError::Compile { path, message } => {
                assert!(path.ends_with("broken.scss"));
                assert!(!message.is_empty());
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn minify_removes_whitespace() {
        let out = Stage::MinifyCss
            .apply(item("style.css", "body {\n  color: red;\n}\n\na {\n  margin: 0;\n}\n"))
            .unwrap()
            .unwrap();
        let css = text(&out);
        assert!(!css.trim_end().contains('\n'));
        assert!(css.contains("body{color:red}"));
    }

    #[test]
    fn set_extension_keeps_directories() {
        let out = Stage::SetExtension("css".to_string())
            .apply(item("pages/blog.sass", ""))
            .unwrap()
            .unwrap();
        assert_eq!(out.relative, PathBuf::from("pages/blog.css"));
    }

    #[test]
    fn rename_replaces_file_name_only() {
        let out = Stage::Rename("categories-and-tags.json".to_string())
            .apply(item("index.html", "<html>A</html>"))
            .unwrap()
            .unwrap();
        assert_eq!(out.relative, PathBuf::from("categories-and-tags.json"));
        assert_eq!(text(&out), "<html>A</html>");
    }

    #[test]
    fn display_names_each_stage() {
        assert_eq!(Stage::CompileSass.to_string(), "compile sass");
        assert_eq!(Stage::SetExtension("css".into()).to_string(), "set extension .css");
    }
}
