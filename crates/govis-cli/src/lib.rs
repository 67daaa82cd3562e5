//! CLI logic for the go-vis tool.
//!
//! This module contains the core CLI logic: it loads the configuration, reads
//! the Go files of the requested directories, runs them through the go-vis
//! pipeline and writes the DOT text.

pub mod report;

mod args;
mod config;
mod source;

pub use args::Args;

use std::{fs, io::Write as _};

use log::info;

use govis::{GovisError, Visualizer};

/// Run the go-vis CLI application
///
/// This function processes every `.go` file of the directories in
/// `args.path` and writes the resulting DOT text to the output file, or to
/// standard output when no output file is given.
///
/// # Errors
///
/// Returns `GovisError` for:
/// - Missing input directories
/// - File I/O errors
/// - Configuration loading errors
/// - Parsing errors
pub fn run(args: &Args) -> Result<(), GovisError> {
    info!(paths:? = args.path, output_path:? = args.output; "Visualizing packages");

    // Load configuration
    let app_config = config::load_config(args.config.as_ref())?;

    // Read input files
    let units = source::load_units(&args.path)?;

    // Process sources using the Visualizer API
    let visualizer = Visualizer::new(app_config);
    let dot = visualizer.run(&units)?;

    // Write output
    match &args.output {
        Some(output) => {
            fs::write(output, dot)?;
            info!(output_file = output; "DOT exported successfully");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(dot.as_bytes())?;
            stdout.flush()?;
        }
    }

    Ok(())
}
