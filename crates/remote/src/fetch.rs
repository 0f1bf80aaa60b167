// crates/remote/src/fetch.rs
//! Tail and whole-file fetchers, plus the whole-file writer.

use std::time::Instant;

use crate::error::RemoteError;
use crate::shell::shell_quote;
use crate::transport::RemoteTransport;

/// Tail window used by the sensor-log endpoints.
pub const DEFAULT_TAIL_LINES: usize = 50;

/// Last `lines` lines of `path`, oldest first.
pub async fn fetch_tail(
    transport: &dyn RemoteTransport,
    path: &str,
    lines: usize,
) -> Result<String, RemoteError> {
    let command = format!("tail -n {lines} -- {}", shell_quote(path));
    timed(transport, path, "tail", transport.run_command(&command)).await
}

/// First line of `path` followed by its last `lines` data lines.
///
/// For headered append-only logs, whose plain tail would drop the header.
/// A file holding only a header yields just the header.
pub async fn fetch_tail_with_header(
    transport: &dyn RemoteTransport,
    path: &str,
    lines: usize,
) -> Result<String, RemoteError> {
    let quoted = shell_quote(path);
    let command =
        format!("head -n 1 -- {quoted} && tail -n +2 -- {quoted} | tail -n {lines}");
    timed(transport, path, "tail+header", transport.run_command(&command)).await
}

/// Whole contents of `path`.
pub async fn fetch_all(transport: &dyn RemoteTransport, path: &str) -> Result<String, RemoteError> {
    timed(transport, path, "read", transport.read_file(path)).await
}

/// Replace `path` with `content`. A failure may leave the file truncated.
pub async fn overwrite(
    transport: &dyn RemoteTransport,
    path: &str,
    content: &str,
) -> Result<(), RemoteError> {
    let t0 = Instant::now();
    transport.write_file(path, content).await?;
    tracing::info!(
        transport = transport.name(),
        path,
        bytes = content.len(),
        elapsed_ms = t0.elapsed().as_millis() as u64,
        "remote file overwritten"
    );
    Ok(())
}

async fn timed<F>(
    transport: &dyn RemoteTransport,
    path: &str,
    op: &str,
    fut: F,
) -> Result<String, RemoteError>
where
    F: std::future::Future<Output = Result<String, RemoteError>>,
{
    let t0 = Instant::now();
    let text = fut.await?;
    tracing::debug!(
        transport = transport.name(),
        op,
        path,
        bytes = text.len(),
        elapsed_ms = t0.elapsed().as_millis() as u64,
        "remote fetch"
    );
    Ok(text)
}
