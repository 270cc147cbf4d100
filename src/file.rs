use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::Path;

use thiserror::Error;

/// Bytes of a file read into memory
#[derive(Debug, Clone)]
pub struct FileBytes {
    /// Path the bytes were read from, as displayed to the user
    pub path: String,
    /// Raw file content
    pub bytes: Vec<u8>,
}

impl FileBytes {
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Error types for file operations
#[derive(Debug, Error)]
pub enum FileError {
    #[error("File not found: {0}")]
    NotFound(String),
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
}

/// Read a whole file from disk
///
/// # Returns
/// * `Ok(FileBytes)` - File content with its display path
/// * `Err(FileError)` - File not found or I/O error
pub fn read_file<P: AsRef<Path>>(path: P) -> Result<FileBytes, FileError> {
    let path_ref = path.as_ref();
    let display = path_ref.display().to_string();

    if !path_ref.exists() {
        return Err(FileError::NotFound(display));
    }

    let bytes = fs::read(path_ref).map_err(|source| FileError::Io {
        path: display.clone(),
        source,
    })?;

    Ok(FileBytes {
        path: display,
        bytes,
    })
}

/// Read text from an inline argument, falling back to stdin
///
/// When `inline` is None, stdin is read to EOF. A prompt goes to stderr only
/// if stdin is an interactive terminal, so piped output stays clean.
pub fn read_text_input(inline: Option<&str>) -> Result<String, FileError> {
    if let Some(text) = inline {
        return Ok(text.to_string());
    }

    let stdin = io::stdin();
    if stdin.is_terminal() {
        eprintln!("Enter JSON data (Ctrl+D to finish):");
    }

    let mut buffer = String::new();
    stdin
        .lock()
        .read_to_string(&mut buffer)
        .map_err(|source| FileError::Io {
            path: "<stdin>".to_string(),
            source,
        })?;
    Ok(buffer)
}

/// Write output to a file, replacing any previous content
pub fn write_output<P: AsRef<Path>>(path: P, content: &[u8]) -> Result<(), FileError> {
    let path_ref = path.as_ref();
    fs::write(path_ref, content).map_err(|source| FileError::Io {
        path: path_ref.display().to_string(),
        source,
    })
}
