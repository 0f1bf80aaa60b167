// crates/remote/src/process.rs
//! Run one child process to completion under a deadline.

use std::process::Stdio;
use std::time::{Duration, Instant};

use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tokio::time::timeout;

use crate::error::RemoteError;

const STDERR_LOG_LIMIT: usize = 500;

/// Spawn `cmd`, optionally feed `stdin`, and collect stdout.
///
/// The child is killed when the returned future is dropped, so a timeout or a
/// cancelled request never leaves a connection behind. `label` names the
/// operation in logs and errors.
pub(crate) async fn run(
    mut cmd: Command,
    label: &str,
    stdin: Option<&[u8]>,
    limit: Duration,
) -> Result<String, RemoteError> {
    cmd.stdin(if stdin.is_some() {
        Stdio::piped()
    } else {
        Stdio::null()
    })
    .stdout(Stdio::piped())
    .stderr(Stdio::piped())
    .kill_on_drop(true);

    let t0 = Instant::now();
    tracing::debug!(command = %label, "remote: spawning");

    let mut child = cmd.spawn().map_err(|e| {
        tracing::error!(command = %label, error = %e, "remote: failed to spawn process");
        RemoteError::Spawn(e.to_string())
    })?;

    let work = async move {
        if let Some(bytes) = stdin {
            if let Some(mut pipe) = child.stdin.take() {
                pipe.write_all(bytes).await?;
                pipe.shutdown().await?;
            }
        }
        child.wait_with_output().await
    };

    let output = timeout(limit, work)
        .await
        .map_err(|_| {
            tracing::error!(
                command = %label,
                elapsed_ms = t0.elapsed().as_millis() as u64,
                "remote: timed out"
            );
            RemoteError::Timeout {
                secs: limit.as_secs(),
            }
        })?
        .map_err(|e| RemoteError::io(label, e))?;

    let elapsed_ms = t0.elapsed().as_millis() as u64;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        let status = output
            .status
            .code()
            .map(|c| c.to_string())
            .unwrap_or_else(|| "signal".to_string());
        let snippet: String = stderr.chars().take(STDERR_LOG_LIMIT).collect();
        tracing::error!(command = %label, elapsed_ms, exit_code = %status, stderr = %snippet, "remote: non-zero exit");
        return Err(RemoteError::Execution {
            command: label.to_string(),
            status,
            stderr,
        });
    }

    tracing::debug!(command = %label, elapsed_ms, stdout_len = output.stdout.len(), "remote: completed");
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
