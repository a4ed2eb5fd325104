pub mod analyze;
pub mod batch;

use crate::error::{CliError, Result};
use std::io::Write;
use std::path::{Path, PathBuf};

fn read_input(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| CliError::FileParsing {
        path: path.to_path_buf(),
        source: e.into(),
    })
}

/// Writes rendered output to `path`, or to standard output when no path is given.
fn write_output(path: Option<&Path>, content: &str) -> Result<()> {
    match path {
        Some(path) => std::fs::write(path, content).map_err(|e| CliError::Output {
            path: path.to_path_buf(),
            source: e.into(),
        }),
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(content.as_bytes())?;
            if !content.ends_with('\n') {
                stdout.write_all(b"\n")?;
            }
            stdout.flush()?;
            Ok(())
        }
    }
}

fn describe_destination(path: Option<&PathBuf>) -> String {
    path.map_or_else(|| "standard output".to_string(), |p| p.display().to_string())
}
