//! Named-task asset pipeline for static sites.
//!
//! Compiles the site's Sass stylesheet to minified CSS, copies vendored
//! scripts, and extracts the generated categories-and-tags page to JSON,
//! writing every output into each configured output root.
//!
//! The public API is organised into layers:
//!
//! - **[`config`]** — load and validate `sitebuild.toml`
//! - **[`pipeline`]** — glob matching and content stages (Sass, minify, rename)
//! - **[`resources`]** — idempotent `check + apply` filesystem primitives
//! - **[`tasks`]** — named, dependency-ordered units of work and their runner
//! - **[`commands`]** — top-level subcommand orchestration (`run`, `list`, `version`)
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod pipeline;
pub mod resources;
pub mod tasks;
