//! CLI logic for the Quiver diagram tool.
//!
//! This module contains the core CLI logic for the Quiver diagram tool.

pub mod error_adapter;
pub mod logging;

mod args;
mod config;

pub use args::{Args, STDOUT_PATH};

use std::{
    fs::{self, File},
    io::{self, BufWriter, Write},
};

use log::info;

use quiver::{DiagramBuilder, QuiverError};

/// Run the Quiver CLI application
///
/// This function reads the diagram source, renders it with the loaded
/// configuration and writes the resulting SVG to the output file or to
/// standard output.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `QuiverError` for:
/// - File I/O errors
/// - Configuration loading or validation errors
/// - Diagram source errors
pub fn run(args: &Args) -> Result<(), QuiverError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing diagram"
    );

    // Load configuration
    let app_config = config::load_config(args.config.as_ref())?;

    // Read input file
    let source = fs::read_to_string(&args.input)?;

    // Process diagram using DiagramBuilder API
    let builder = DiagramBuilder::new(app_config);
    let diagram = builder.parse(&source)?;

    if args.writes_to_stdout() {
        let stdout = io::stdout().lock();
        builder.render_to(&diagram, stdout)?.flush()?;
        info!("SVG written to standard output");
    } else {
        let file = BufWriter::new(File::create(&args.output)?);
        builder.render_to(&diagram, file)?.flush()?;
        info!(output_file = args.output; "SVG exported successfully");
    }

    Ok(())
}
