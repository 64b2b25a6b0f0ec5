//! Record archiving functionality
//!
//! Archives are CSV files under the session's archive root with one row per
//! serialised record. Records must be flat structs, the `csv` writer cannot
//! emit headers for nested structures.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External imports
use std::path::{Path, PathBuf};
use std::fs::{self, File, OpenOptions};
use csv::WriterBuilder;
pub use csv::Writer;
use serde::Serialize;
use thiserror::Error;

// Internal imports
use crate::session::Session;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// An object used to write CSV archive files.
#[derive(Default)]
pub struct Archiver {
    writer: Option<Writer<File>>
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Errors which can occur while archiving.
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("Cannot create the archive file {0:?}: {1}")]
    CreateError(PathBuf, std::io::Error),

    #[error("The archiver has not been initialised with a file")]
    NotInitialised,

    #[error("Cannot write the archive record: {0}")]
    WriteError(#[from] csv::Error),

    #[error("Cannot flush the archive: {0}")]
    FlushError(#[from] std::io::Error)
}

// ---------------------------------------------------------------------------
// TRAITS
// ---------------------------------------------------------------------------

/// A trait which enables a struct to be archived as a csv.
///
/// To implement this trait the struct shall own an `Archiver`, set up in the
/// struct's `new` function.
pub trait Archived {
    /// Write the archives for this struct
    fn write(&mut self) -> Result<(), ArchiveError>;
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Archiver {
    /// Create a new archiver from a paricular path relative to the session's
    /// archive root. Missing parent directories are created.
    pub fn from_path<P: AsRef<Path>>(
        session: &Session, path: P
    ) -> Result<Self, ArchiveError> {
        let mut session_path = session.arch_root.clone();
        session_path.push(path);

        Self::from_abs_path(session_path)
    }

    /// Create a new archiver writing to the given absolute path.
    pub fn from_abs_path<P: AsRef<Path>>(path: P) -> Result<Self, ArchiveError> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ArchiveError::CreateError(path.clone(), e))?;
        }

        // Truncate any previous archive and open the file for appending
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&path)
            .map_err(|e| ArchiveError::CreateError(path.clone(), e))?;

        let w = WriterBuilder::new()
            .has_headers(true)
            .from_writer(file);

        Ok(Self {
            writer: Some(w)
        })
    }

    /// Serialise a record into the archive.
    pub fn serialise<T: Serialize>(
        &mut self, record: T
    ) -> Result<(), ArchiveError> {
        match self.writer {
            Some(ref mut w) => {
                w.serialize(record)?;
                w.flush()?;
                Ok(())
            },
            None => Err(ArchiveError::NotInitialised)
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[derive(Serialize)]
    struct Sample {
        index: usize,
        value_m: f64,
    }

    #[test]
    fn test_serialise_writes_header_once() {
        let dir = std::env::temp_dir().join(format!("util_archive_{}", std::process::id()));
        let path = dir.join("nested/samples.csv");

        let mut arch = Archiver::from_abs_path(&path).unwrap();
        arch.serialise(Sample { index: 0, value_m: 1.5 }).unwrap();
        arch.serialise(Sample { index: 1, value_m: -2.0 }).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "index,value_m\n0,1.5\n1,-2.0\n");

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_default_archiver_errors() {
        let mut arch = Archiver::default();
        assert!(matches!(
            arch.serialise(Sample { index: 0, value_m: 0.0 }),
            Err(ArchiveError::NotInitialised)
        ));
    }
}
