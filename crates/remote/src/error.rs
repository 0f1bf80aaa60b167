// crates/remote/src/error.rs
//! Remote I/O error types.

use std::io;

#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    #[error("Failed to start remote session: {0}")]
    Spawn(String),

    #[error("Remote command `{command}` failed (exit {status}): {stderr}")]
    Execution {
        command: String,
        status: String,
        stderr: String,
    },

    #[error("Failed to write {path}: {message}")]
    Write { path: String, message: String },

    #[error("I/O error at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("Remote operation timed out after {secs} seconds")]
    Timeout { secs: u64 },
}

impl RemoteError {
    /// True when the file may have been left truncated or partially written.
    pub fn is_write_failure(&self) -> bool {
        matches!(self, RemoteError::Write { .. })
    }

    pub(crate) fn io(path: impl Into<String>, source: io::Error) -> Self {
        RemoteError::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_execution_display_carries_diagnostics() {
        let err = RemoteError::Execution {
            command: "tail -n 50 -- '/x.csv'".into(),
            status: "1".into(),
            stderr: "tail: cannot open '/x.csv'".into(),
        };
        let text = err.to_string();
        assert!(text.contains("exit 1"));
        assert!(text.contains("cannot open"));
        assert!(!err.is_write_failure());
    }

    #[test]
    fn test_write_failure_flag() {
        let err = RemoteError::Write {
            path: "/t.csv".into(),
            message: "broken pipe".into(),
        };
        assert!(err.is_write_failure());
        assert_eq!(err.to_string(), "Failed to write /t.csv: broken pipe");
    }
}
