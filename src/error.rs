use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Input directory not found: {}", .0.display())]
    MissingInput(PathBuf),

    #[error("Failed to write archive {}: {source}", path.display())]
    ArchiveWrite {
        path: PathBuf,
        #[source]
        source: WriteError,
    },

    #[error("Duplicate archive entry: {0}")]
    DuplicateEntry(String),

    #[error("Configuration file not found: {}", .0.display())]
    ConfigNotFound(PathBuf),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid archive: {0}")]
    InvalidArchive(String),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),
}

/// Underlying cause of a failed archive write
#[derive(Error, Debug)]
pub enum WriteError {
    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("{0}")]
    WalkDir(#[from] walkdir::Error),

    #[error("cannot map {} to an entry name", .0.display())]
    EntryName(PathBuf),
}

impl Error {
    pub fn archive_write<E: Into<WriteError>>(path: impl Into<PathBuf>, err: E) -> Self {
        Error::ArchiveWrite {
            path: path.into(),
            source: err.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_archive_write_keeps_cause() {
        let err = Error::archive_write(
            "out.aab",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(err.to_string(), "Failed to write archive out.aab: denied");
        assert!(matches!(err.source(), Some(cause) if cause.to_string() == "denied"));
    }

    #[test]
    fn test_missing_input_message() {
        let err = Error::MissingInput(PathBuf::from("android-build"));
        assert_eq!(err.to_string(), "Input directory not found: android-build");
    }
}
