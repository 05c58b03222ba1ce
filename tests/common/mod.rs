// Shared helpers for integration tests.
//
// Provides a temporary-directory-backed site and a fluent builder so each
// integration test can lay out sources and generated pages without
// repeating filesystem boilerplate.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use sitebuild::cli::{GlobalOpts, RunOpts};
use sitebuild::commands;
use sitebuild::logging::Logger;

/// Default stylesheet source, relative to the site root.
pub const STYLE_SOURCE: &str = "source/_sass/style.sass";

/// Default vendored script, relative to the site root.
pub const VENDOR_SCRIPT: &str = "node_modules/bootstrap-sass/assets/javascripts/bootstrap.min.js";

/// Both default output roots.
pub const OUTPUT_ROOTS: [&str; 2] = ["output_dev", "output_prod"];

/// An isolated site backed by a [`tempfile::TempDir`].
pub struct SiteFixture {
    /// Temporary directory containing the site.
    pub root: tempfile::TempDir,
}

impl SiteFixture {
    /// Create an empty site.
    pub fn new() -> Self {
        Self {
            root: tempfile::tempdir().expect("create temp dir"),
        }
    }

    /// Create a site with every input the default task needs.
    pub fn complete() -> Self {
        Self::new()
            .with_file(STYLE_SOURCE, "body\n  margin: 0\n  color: #333\n")
            .with_file(VENDOR_SCRIPT, "/*! vendor */!function(){}();\n")
            .with_generated_site("<html>A</html>")
    }

    /// Path to the site root.
    pub fn path(&self) -> &Path {
        self.root.path()
    }

    /// Absolute path of `rel` inside the site.
    pub fn join(&self, rel: &str) -> PathBuf {
        self.root.path().join(rel)
    }

    /// Write `contents` to `rel`, creating parent directories.
    pub fn with_file(self, rel: &str, contents: &str) -> Self {
        let path = self.join(rel);
        std::fs::create_dir_all(path.parent().expect("file has a parent")).expect("create dirs");
        std::fs::write(&path, contents).expect("write file");
        self
    }

    /// Lay out what the site generator leaves in every output root: the
    /// categories-and-tags page plus the intermediate subtrees.
    pub fn with_generated_site(self, page: &str) -> Self {
        let mut fixture = self;
        for root in OUTPUT_ROOTS {
            fixture = fixture
                .with_file(&format!("{root}/categories-and-tags/index.html"), page)
                .with_file(&format!("{root}/_posts/2024/01/hello.html"), "post")
                .with_file(&format!("{root}/_sass/_base.sass"), "$x: 1\n")
                .with_file(&format!("{root}/index.html"), "home");
        }
        fixture
    }

    /// Read `rel` as bytes.
    pub fn read(&self, rel: &str) -> Vec<u8> {
        std::fs::read(self.join(rel)).unwrap_or_else(|e| panic!("read {rel}: {e}"))
    }

    /// Global options pointing at this site.
    pub fn global(&self, dry_run: bool) -> GlobalOpts {
        GlobalOpts {
            dry_run,
            root: Some(self.path().to_path_buf()),
            config: None,
        }
    }

    /// Run `tasks` (or `default` when empty) the way the binary does.
    pub fn run(&self, tasks: &[&str]) -> anyhow::Result<()> {
        self.run_with(tasks, false)
    }

    /// Like [`run`](Self::run), optionally in dry-run mode.
    pub fn run_with(&self, tasks: &[&str], dry_run: bool) -> anyhow::Result<()> {
        let opts = RunOpts {
            tasks: tasks.iter().map(ToString::to_string).collect(),
        };
        let log = Arc::new(Logger::new("test"));
        commands::run::run(&self.global(dry_run), &opts, &log)
    }

    /// Snapshot every file under the site as (relative path, bytes).
    pub fn files(&self) -> Vec<(PathBuf, Vec<u8>)> {
        let mut out = Vec::new();
        collect(self.path(), self.path(), &mut out);
        out.sort();
        out
    }
}

fn collect(base: &Path, dir: &Path, out: &mut Vec<(PathBuf, Vec<u8>)>) {
    for entry in std::fs::read_dir(dir).expect("read dir") {
        let path = entry.expect("dir entry").path();
        if path.is_dir() {
            collect(base, &path, out);
        } else {
            let rel = path.strip_prefix(base).expect("under base").to_path_buf();
            out.push((rel, std::fs::read(&path).expect("read file")));
        }
    }
}
