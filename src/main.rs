use std::sync::Arc;

use anyhow::Result;
use clap::Parser;

use sitebuild::cli::{self, Command};
use sitebuild::{commands, logging};

fn main() -> Result<()> {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = cli::Cli::parse();
    let command = args.selected_command();

    match command {
        Command::Run(opts) => {
            logging::init_subscriber(args.verbose, "run");
            let log = Arc::new(logging::Logger::new("run"));
            commands::run::run(&args.global, &opts, &log)
        }
        Command::List(opts) => commands::list::run(&opts),
        Command::Version => {
            commands::version::run();
            Ok(())
        }
    }
}
