use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Stable error codes for machine-readable output.
pub mod codes {
    pub const INSPECTION_FAILED: &str = "INSPECTION_FAILED";
    pub const SELECTION_FAILED: &str = "SELECTION_FAILED";
}

pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for dllfetch operations.
///
/// Missing and ambiguous dependencies are not errors; they are settled inside
/// the resolver and show up in the final [`crate::Resolution`].
#[derive(Error, Debug)]
pub enum Error {
    /// The import table of a file could not be read. Aborts the whole run.
    #[error("Failed to inspect {path}: {source}")]
    Inspection {
        path: PathBuf,
        #[source]
        source: InspectError,
    },

    /// The disambiguation answer could not be read (e.g. stdin was closed).
    #[error("Failed to read candidate selection: {0}")]
    Selection(#[source] io::Error),
}

impl Error {
    #[must_use]
    pub fn inspection(path: impl Into<PathBuf>, source: InspectError) -> Self {
        Self::Inspection {
            path: path.into(),
            source,
        }
    }

    /// Get the stable error code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Inspection { .. } => codes::INSPECTION_FAILED,
            Self::Selection(_) => codes::SELECTION_FAILED,
        }
    }
}

/// Why an import extractor could not produce an import set.
#[derive(Error, Debug)]
pub enum InspectError {
    #[error("file does not exist")]
    NotFound,

    #[error("inspection tool `{tool}` not found")]
    ToolNotFound { tool: String },

    #[error("failed to run `{tool}`: {source}")]
    Spawn {
        tool: String,
        #[source]
        source: io::Error,
    },

    #[error("`{tool}` exited with {status}: {stderr}")]
    Failed {
        tool: String,
        status: String,
        stderr: String,
    },

    #[error("{0}")]
    Other(String),
}

impl InspectError {
    #[must_use]
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = Error::inspection("app.exe", InspectError::NotFound);
        assert_eq!(err.code(), codes::INSPECTION_FAILED);

        let err = Error::Selection(io::Error::from(io::ErrorKind::UnexpectedEof));
        assert_eq!(err.code(), codes::SELECTION_FAILED);
    }

    #[test]
    fn test_inspection_message_names_path() {
        let err = Error::inspection(
            "bin/app.exe",
            InspectError::ToolNotFound {
                tool: "objdump".to_string(),
            },
        );
        let msg = err.to_string();
        assert!(msg.contains("bin/app.exe"));
        assert!(std::error::Error::source(&err)
            .unwrap()
            .to_string()
            .contains("objdump"));
    }
}
