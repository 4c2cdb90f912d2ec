//! Error types for quiz_theme

use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ThemeError>;

#[derive(Error, Debug)]
pub enum ThemeError {
    /// Input file missing or unreadable
    #[error("cannot read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Input is not valid JSON
    #[error("bad JSON in {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("top-level JSON in {} must be an array (found {found})", .path.display())]
    NotAnArray { path: PathBuf, found: &'static str },

    #[error("element {index} in {} is not a JSON object", .path.display())]
    NotAnObject { path: PathBuf, index: usize },

    /// Output would replace the input file
    #[error("refusing to overwrite input {} with the output", .path.display())]
    OutputIsInput { path: PathBuf },

    #[error("cannot serialize quiz items: {0}")]
    Serialize(#[source] serde_json::Error),

    /// Output path not writable
    #[error("cannot write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ThemeError {
    /// True for failures raised while reading the input (missing file or bad JSON).
    pub fn is_parse(&self) -> bool {
        matches!(self, ThemeError::Read { .. } | ThemeError::Parse { .. })
    }

    pub fn is_schema(&self) -> bool {
        matches!(
            self,
            ThemeError::NotAnArray { .. } | ThemeError::NotAnObject { .. }
        )
    }

    pub fn is_write(&self) -> bool {
        matches!(
            self,
            ThemeError::Write { .. } | ThemeError::Serialize(_) | ThemeError::OutputIsInput { .. }
        )
    }
}
