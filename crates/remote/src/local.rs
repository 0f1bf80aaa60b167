// crates/remote/src/local.rs
//! Transport for a service running on the data host itself.

use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tokio::time::timeout;

use crate::config::DEFAULT_TIMEOUT_SECS;
use crate::error::RemoteError;
use crate::process;
use crate::shell::trim_trailing_newlines;
use crate::transport::RemoteTransport;

#[derive(Debug, Clone)]
pub struct LocalTransport {
    timeout: Duration,
}

impl LocalTransport {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    fn timed_out(&self) -> RemoteError {
        RemoteError::Timeout {
            secs: self.timeout.as_secs(),
        }
    }
}

impl Default for LocalTransport {
    fn default() -> Self {
        Self::new(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }
}

#[async_trait]
impl RemoteTransport for LocalTransport {
    async fn run_command(&self, command: &str) -> Result<String, RemoteError> {
        let mut cmd = Command::new("sh");
        cmd.arg("-c").arg(command);
        let out = process::run(cmd, command, None, self.timeout).await?;
        Ok(trim_trailing_newlines(out))
    }

    async fn read_file(&self, path: &str) -> Result<String, RemoteError> {
        timeout(self.timeout, tokio::fs::read_to_string(path))
            .await
            .map_err(|_| self.timed_out())?
            .map_err(|e| RemoteError::io(path, e))
    }

    async fn write_file(&self, path: &str, content: &str) -> Result<(), RemoteError> {
        let result = timeout(self.timeout, tokio::fs::write(path, content))
            .await
            .map_err(|_| self.timed_out())
            .and_then(|r| r.map_err(|e| RemoteError::io(path, e)));
        result.map_err(|e| {
            tracing::error!(path, error = %e, "local: overwrite failed");
            RemoteError::Write {
                path: path.to_string(),
                message: e.to_string(),
            }
        })
    }

    fn name(&self) -> &str {
        "local"
    }
}
