//! Command-line argument definitions for the go-vis CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control the input directories, the output path,
//! configuration file selection, and logging verbosity.

use clap::Parser;

/// Command-line arguments for the go-vis tool
#[derive(Parser, Debug)]
#[command(name = "go-vis", author, version, about, long_about = None)]
pub struct Args {
    /// Directories holding the Go packages to visualize
    #[arg(short, long, value_delimiter = ',', required = true)]
    pub path: Vec<String>,

    /// Path to the output DOT file; standard output when absent
    #[arg(short, long)]
    pub output: Option<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comma_separated_paths() {
        let args = Args::try_parse_from(["go-vis", "--path", "a,b/c", "-o", "out.dot"]).unwrap();
        assert_eq!(args.path, ["a", "b/c"]);
        assert_eq!(args.output.as_deref(), Some("out.dot"));
        assert_eq!(args.log_level, "warn");
    }

    #[test]
    fn test_path_is_required() {
        assert!(Args::try_parse_from(["go-vis"]).is_err());
    }
}
