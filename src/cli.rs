use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI entry point for the site asset pipeline.
#[derive(Parser, Debug)]
#[command(
    name = "sitebuild",
    about = "Named-task asset pipeline for static sites",
    version
)]
pub struct Cli {
    /// Subcommand; `run default` when omitted
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Options shared by every subcommand.
    #[command(flatten)]
    pub global: GlobalOpts,
}

impl Cli {
    /// The subcommand to dispatch, defaulting to running the default task.
    #[must_use]
    pub fn selected_command(&self) -> Command {
        self.command
            .clone()
            .unwrap_or_else(|| Command::Run(RunOpts { tasks: vec![] }))
    }
}

/// Options shared across all subcommands.
#[derive(Parser, Debug, Clone)]
pub struct GlobalOpts {
    /// Preview changes without writing or deleting anything
    #[arg(short = 'd', long, global = true)]
    pub dry_run: bool,

    /// Site root directory (default: current directory)
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// Config file (default: <root>/sitebuild.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Run tasks and their dependencies
    Run(RunOpts),
    /// List registered tasks
    List(ListOpts),
    /// Print version information
    Version,
}

/// Options for the `run` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct RunOpts {
    /// Tasks to run, in order (default: "default")
    pub tasks: Vec<String>,
}

/// Options for the `list` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct ListOpts {
    /// Print the listing as JSON
    #[arg(long)]
    pub json: bool,
}
