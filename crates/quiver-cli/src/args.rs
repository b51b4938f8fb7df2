//! Command-line argument definitions for the Quiver CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, configuration file
//! selection, and logging verbosity.

use clap::Parser;

/// Output path that writes the document to standard output.
pub const STDOUT_PATH: &str = "-";

/// Command-line arguments for the Quiver diagram tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input diagram file (TOML)
    #[arg(help = "Path to the input file")]
    pub input: String,

    /// Path to the output SVG file, `-` for standard output
    #[arg(short, long, default_value = "out.svg")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Args {
    /// Whether the document goes to standard output instead of a file.
    pub fn writes_to_stdout(&self) -> bool {
        self.output == STDOUT_PATH
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["quiver", "diagram.toml"]).unwrap();
        assert_eq!(args.input, "diagram.toml");
        assert_eq!(args.output, "out.svg");
        assert_eq!(args.config, None);
        assert_eq!(args.log_level, "info");
        assert!(!args.writes_to_stdout());
    }

    #[test]
    fn test_all_flags() {
        let args = Args::try_parse_from([
            "quiver",
            "in.toml",
            "-o",
            "-",
            "-c",
            "style.toml",
            "--log-level",
            "debug",
        ])
        .unwrap();
        assert!(args.writes_to_stdout());
        assert_eq!(args.config.as_deref(), Some("style.toml"));
        assert_eq!(args.log_level, "debug");
    }

    #[test]
    fn test_input_is_required() {
        assert!(Args::try_parse_from(["quiver"]).is_err());
    }
}
