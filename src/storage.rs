//! JSON files of question records.
//!
//! Question banks exchange records with this crate as a JSON array of
//! [`QuestionRecord`]s.

use std::{
    fs::File,
    io::{self, BufReader, BufWriter, Read, Write},
    path::Path,
};

use tracing::instrument;

use crate::domain::QuestionRecord;

/// Errors that can occur when loading question records.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The records file was not found.
    #[error("records file not found")]
    NotFound,
    /// An I/O error occurred.
    #[error("failed to read records")]
    Io(#[from] io::Error),
    /// The records could not be parsed.
    #[error("failed to parse records")]
    Json(#[from] serde_json::Error),
}

/// Read question records from a reader.
///
/// # Errors
///
/// Returns an error if the input cannot be read or is not a JSON array of
/// records.
pub fn read<R: Read>(reader: R) -> Result<Vec<QuestionRecord>, LoadError> {
    Ok(serde_json::from_reader(reader)?)
}

/// Write question records as a pretty-printed JSON array.
///
/// # Errors
///
/// Returns an error if the writer fails.
pub fn write<W: Write>(writer: &mut W, records: &[QuestionRecord]) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *writer, records)?;
    writer.write_all(b"\n")
}

/// Read question records from a file.
///
/// # Errors
///
/// Returns [`LoadError::NotFound`] if the file does not exist, or another
/// error if it cannot be read or parsed.
#[instrument(level = "debug")]
pub fn read_records(path: &Path) -> Result<Vec<QuestionRecord>, LoadError> {
    let file = File::open(path).map_err(|io_error| match io_error.kind() {
        io::ErrorKind::NotFound => LoadError::NotFound,
        _ => LoadError::Io(io_error),
    })?;

    read(BufReader::new(file))
}

/// Write question records to a file.
///
/// Parent directories are created automatically if they don't exist.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written to.
#[instrument(level = "debug", skip(records))]
pub fn write_records(path: &Path, records: &[QuestionRecord]) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut writer = BufWriter::new(File::create(path)?);
    write(&mut writer, records)?;
    writer.flush()
}
