//! Face-label file loading and saving.
//!
//! Label files are plain text: one integer category code per face, in face
//! order, one per line. Blank lines and `#` comments are skipped. The
//! codes are opaque; nothing here checks them against a category range.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::error::IoResult;

/// Load a face-label array from a `.seg` file.
///
/// The result has one entry per labeled face; validating the length
/// against a mesh's face count is the caller's job (the loader does not
/// know which mesh the file was produced for).
///
/// # Errors
///
/// Returns an error when the file cannot be read or a token fails to
/// parse as an unsigned integer.
pub fn load_labels<P: AsRef<Path>>(path: P) -> IoResult<Vec<u32>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let mut labels = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let content = line.split('#').next().unwrap_or("");
        for token in content.split_whitespace() {
            labels.push(token.parse::<u32>()?);
        }
    }
    Ok(labels)
}

/// Save a face-label array to a `.seg` file, one code per line.
///
/// # Errors
///
/// Returns an error when the file cannot be created or written.
pub fn save_labels<P: AsRef<Path>>(labels: &[u32], path: P) -> IoResult<()> {
    let file = File::create(path)?;
    let mut out = BufWriter::new(file);
    for label in labels {
        writeln!(out, "{label}")?;
    }
    out.flush()?;
    Ok(())
}
