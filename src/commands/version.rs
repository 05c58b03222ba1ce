//! Command: print version information.

/// The build version: `git describe` output when available.
#[must_use]
pub fn version() -> &'static str {
    option_env!("SITEBUILD_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"))
}

/// Print the sitebuild version to stdout.
#[allow(clippy::print_stdout)]
pub fn run() {
    println!("sitebuild {}", version());
}
