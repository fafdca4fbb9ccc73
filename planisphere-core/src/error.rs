//! Error types for the star wheel engine
//!
//! Only source-level failures live here. Items that fall outside the chart
//! are filtered, not reported, and custom-object rows carry their own
//! [`RowError`](crate::custom_objects::RowError).

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PlanisphereError>;

#[derive(Debug, Error)]
pub enum PlanisphereError {
    /// A required data file could not be read
    #[error("Failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A line of a static data table did not have the expected shape
    #[error("{file}:{line}: {message}")]
    DataFormat {
        file: String,
        line: usize,
        message: String,
    },

    /// The star catalog supplier failed
    #[error("Star catalog error: {message}")]
    Catalog { message: String },

    #[error("Unknown theme '{0}'")]
    UnknownTheme(String),

    #[error("Unknown language '{0}'")]
    UnknownLanguage(String),

    #[error("Latitude {0} is outside [-90, 90] or within 1 degree of the equator")]
    InvalidLatitude(f64),

    /// A theme or language table failed validation when it was registered
    #[error("Invalid table '{name}': {message}")]
    InvalidTable { name: String, message: String },
}

impl PlanisphereError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn data_format(file: impl Into<String>, line: usize, message: impl Into<String>) -> Self {
        Self::DataFormat {
            file: file.into(),
            line,
            message: message.into(),
        }
    }

    pub fn catalog(message: impl Into<String>) -> Self {
        Self::Catalog {
            message: message.into(),
        }
    }

    pub fn invalid_table(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidTable {
            name: name.into(),
            message: message.into(),
        }
    }
}
