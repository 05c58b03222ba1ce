//! Domain-specific error types for the site build engine.
//!
//! This module provides a structured error hierarchy using [`thiserror`].
//! Internal modules return typed errors (e.g., [`PipelineError`], [`TaskError`])
//! while command handlers at the CLI boundary convert them to [`anyhow::Error`]
//! via the standard `?` operator.
//!
//! # Error families
//!
//! ```text
//! ConfigError   — TOML parsing, invalid values
//! TaskError     — task lookup, dependencies, execution
//! PipelineError — matching, compiling, reading, writing, deleting
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// Errors that arise from loading the build configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// An I/O error occurred while reading the config file.
    #[error("IO error reading config file {path}: {source}")]
    Io {
        /// Path to the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The TOML file contains a syntax or schema error.
    #[error("Invalid TOML in {file}: {message}")]
    InvalidSyntax {
        /// Path to the offending file.
        file: PathBuf,
        /// Parser message.
        message: String,
    },

    /// A configured value is not acceptable.
    #[error("Invalid value for '{key}': {reason}")]
    InvalidValue {
        /// Dotted key of the offending setting (e.g. `metadata.cleanup`).
        key: String,
        /// Human-readable reason.
        reason: String,
    },
}

/// Errors that arise from the task registry and runner.
#[derive(Error, Debug)]
pub enum TaskError {
    /// The requested task is not registered.
    #[error("Unknown task '{0}'")]
    UnknownTask(String),

    /// A task names a dependency that is not registered.
    #[error("Task '{task}' depends on unknown task '{dependency}'")]
    MissingDependency {
        /// Task declaring the dependency.
        task: String,
        /// Name of the unregistered dependency.
        dependency: String,
    },

    /// The task dependency graph contains a cycle.
    #[error("Task dependency cycle detected: {0}")]
    DependencyCycle(String),

    /// Two tasks were registered under the same name.
    #[error("Task '{0}' is already registered")]
    DuplicateTask(String),

    /// A task failed to execute.
    #[error("Task '{task}' failed: {reason}")]
    ExecutionFailed {
        /// Name of the task that failed.
        task: String,
        /// Human-readable reason for the failure.
        reason: String,
    },
}

/// Errors that arise while matching, transforming, and writing files.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// A source pattern matched no files.
    #[error("Source not found: {0}")]
    SourceNotFound(String),

    /// A source pattern could not be parsed as a glob.
    #[error("Invalid pattern '{pattern}': {message}")]
    InvalidPattern {
        /// The offending pattern.
        pattern: String,
        /// Parser message.
        message: String,
    },

    /// The stylesheet compiler rejected its input.
    #[error("Failed to compile {path}: {message}")]
    Compile {
        /// Source file that failed to compile.
        path: PathBuf,
        /// Message reported by the compiler.
        message: String,
    },

    /// A source file could not be read.
    #[error("Failed to read {path}: {source}")]
    Read {
        /// Path that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A destination file could not be written.
    #[error("Failed to write {path}: {source}")]
    Write {
        /// Path that could not be written.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A directory tree could not be deleted.
    #[error("Failed to delete {path}: {source}")]
    Delete {
        /// Path that could not be deleted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}
