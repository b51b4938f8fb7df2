//! `quiver` binary: render a TOML diagram to SVG.

use std::process::ExitCode;

use clap::Parser;
use log::debug;

use quiver_cli::{Args, error_adapter::render_report, logging};

fn main() -> ExitCode {
    miette::set_panic_hook();

    let args = Args::parse();
    let level = logging::init(&args.log_level);
    debug!(level:?, args:?; "Parsed arguments");

    match quiver_cli::run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            // Reports bypass the logger so `--log-level off` still shows them.
            eprint!("{}", render_report(&err));
            ExitCode::FAILURE
        }
    }
}
