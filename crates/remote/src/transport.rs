// crates/remote/src/transport.rs
//! RemoteTransport trait: the one seam between the service and the data host.

use async_trait::async_trait;

use crate::error::RemoteError;

/// Access to the host that owns the CSV logs.
///
/// Implementations:
/// - `SshTransport`: one `ssh` process per call, nothing kept open between calls
/// - `LocalTransport`: the service runs on the data host itself
///
/// Every call releases its resources before returning, on success and on error.
#[async_trait]
pub trait RemoteTransport: Send + Sync {
    /// Run a shell command and return its stdout without trailing newlines.
    async fn run_command(&self, command: &str) -> Result<String, RemoteError>;

    /// Full contents of `path`.
    async fn read_file(&self, path: &str) -> Result<String, RemoteError>;

    /// Truncate `path` and write `content`. Not atomic.
    async fn write_file(&self, path: &str, content: &str) -> Result<(), RemoteError>;

    /// Transport name for logging (e.g. "ssh", "local").
    fn name(&self) -> &str;
}
