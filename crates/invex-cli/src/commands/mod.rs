//! Subcommand implementations.

pub mod batch;
pub mod config;
pub mod doctor;
pub mod process;
pub mod session;

use std::path::PathBuf;

use console::style;
use glob::glob;

/// Expand glob patterns into file paths, in pattern order.
///
/// A pattern without wildcards yields the path itself when it exists.
pub fn expand_inputs(patterns: &[String]) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for pattern in patterns {
        let before = files.len();
        for entry in glob(pattern)? {
            match entry {
                Ok(path) if path.is_file() => files.push(path),
                Ok(_) => {}
                Err(e) => eprintln!("{} {}", style("⚠").yellow(), e),
            }
        }
        if files.len() == before {
            eprintln!("{} No files match {}", style("⚠").yellow(), pattern);
        }
    }

    Ok(files)
}
