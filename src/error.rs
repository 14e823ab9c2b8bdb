//! Error types.
//!
//! State transitions on a mounted page never fail. These errors cover the
//! ambient edges: reading configuration, driving a terminal host and handing
//! captures to a waitlist sink.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PageError {
    #[error("failed to read config {path:?}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config {path:?}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("page layout failed: {0}")]
    Layout(String),

    #[error("terminal I/O failed: {0}")]
    Terminal(#[from] io::Error),

    #[error("waitlist delivery rejected: {0}")]
    Delivery(String),
}

pub type Result<T> = std::result::Result<T, PageError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn write_to_closed_terminal() -> Result<()> {
        let write: io::Result<()> =
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "terminal closed"));
        write?;
        Ok(())
    }

    #[test]
    fn test_io_errors_surface_as_terminal_errors() {
        let err = write_to_closed_terminal().unwrap_err();

        assert!(matches!(err, PageError::Terminal(_)));
        assert_eq!(err.to_string(), "terminal I/O failed: terminal closed");
    }
}
