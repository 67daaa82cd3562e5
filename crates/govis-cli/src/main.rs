//! The `go-vis` binary.

use std::process::ExitCode;

use clap::Parser;
use log::{LevelFilter, debug, error, info};

use govis_cli::{Args, report};

/// Sets up `env_logger` at `level`, falling back to `warn` for unknown names.
fn init_logging(level: &str) {
    let filter = level.parse::<LevelFilter>().unwrap_or_else(|_| {
        eprintln!("unknown log level `{level}`, using `warn`");
        LevelFilter::Warn
    });

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(filter)
        .init();
    debug!(filter:?; "Logging initialized");
}

fn main() -> ExitCode {
    miette::set_panic_hook();

    let args = Args::parse();
    init_logging(&args.log_level);
    debug!(args:?; "Parsed arguments");

    match govis_cli::run(&args) {
        Ok(()) => {
            info!("Done");
            ExitCode::SUCCESS
        }
        Err(err) => {
            for rendered in report::render(&err) {
                error!("{rendered}");
            }
            ExitCode::FAILURE
        }
    }
}
