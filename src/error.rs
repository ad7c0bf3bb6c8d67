//! Error taxonomy shared by the pipeline and the log browser.
//!
//! Failures are deliberately coarse: most of them are fatal to the run by
//! design, so each category maps to a distinct process exit code instead of
//! relying on unhandled panics.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// A manifest or task file exists but could not be parsed.
    #[error("parse {path}: {message}")]
    Parse { path: String, message: String },

    /// Task data has the wrong shape or is missing the required field.
    #[error("{0}")]
    Validation(String),

    /// The assistant service call failed or returned an unusable response.
    #[error("assistant request failed: {0}")]
    Assistant(String),

    /// Template rendering or writing failed; reported, never fatal.
    #[error("template: {0}")]
    Template(String),

    /// Unusable interactive input, fatal to the reading process.
    #[error("invalid input: {0}")]
    Input(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Process exit code for the category, used by both binaries.
    pub fn exit_code(&self) -> u8 {
        match self {
            Error::Parse { .. } | Error::Io(_) => 2,
            Error::Validation(_) => 3,
            Error::Assistant(_) => 4,
            Error::Template(_) | Error::Input(_) => 1,
        }
    }

    pub(crate) fn parse(path: &std::path::Path, message: impl std::fmt::Display) -> Self {
        Error::Parse {
            path: path.display().to_string(),
            message: message.to_string(),
        }
    }
}
