use thiserror::Error;

/// Failure while reading or writing a database file.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// The file does not follow the database format
    #[error("database is corrupt at line {line}: {reason}")]
    Corrupt { line: usize, reason: String },
    /// The file could not be read or written
    #[error("database i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl DatabaseError {
    pub fn corrupt(line: usize, reason: impl Into<String>) -> Self {
        DatabaseError::Corrupt {
            line,
            reason: reason.into(),
        }
    }

    pub fn is_corruption(&self) -> bool {
        matches!(self, DatabaseError::Corrupt { .. })
    }

    /// Short name of the failure kind, used in diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            DatabaseError::Corrupt { .. } => "DataCorruption",
            DatabaseError::Io(_) => "Io",
        }
    }
}
