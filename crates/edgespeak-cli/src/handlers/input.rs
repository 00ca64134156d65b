//! Where the text to synthesize comes from.

use std::io::Read;

use anyhow::Result;

use crate::commands::TextSource;
use crate::error::CliError;

/// Read the text from the argument, the file, or standard input, in that order.
pub fn read_text(source: &TextSource) -> Result<String> {
    if let Some(text) = &source.text {
        return Ok(text.clone());
    }
    if let Some(path) = &source.file {
        return std::fs::read_to_string(path).map_err(|e| {
            CliError::Io(format!("Failed to read {}: {e}", path.display())).into()
        });
    }
    let mut text = String::new();
    std::io::stdin()
        .read_to_string(&mut text)
        .map_err(CliError::from)?;
    Ok(text)
}
