// crates/remote/src/ssh.rs
//! SSH transport backed by the system `ssh` client.

use async_trait::async_trait;
use tokio::process::Command;

use crate::config::SshConfig;
use crate::error::RemoteError;
use crate::process;
use crate::shell::{shell_quote, trim_trailing_newlines};
use crate::transport::RemoteTransport;

pub struct SshTransport {
    config: SshConfig,
}

impl SshTransport {
    pub fn new(config: SshConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SshConfig {
        &self.config
    }

    /// `ssh` invocation running `remote` on the data host.
    ///
    /// BatchMode keeps a missing or rejected key from hanging on a password
    /// prompt.
    fn command(&self, remote: &str) -> Command {
        let mut cmd = Command::new("ssh");
        cmd.args(self.ssh_args(remote));
        cmd
    }

    fn ssh_args(&self, remote: &str) -> Vec<String> {
        let connect_secs = self.config.timeout.as_secs().max(1);
        vec![
            "-i".to_string(),
            self.config.private_key_path.display().to_string(),
            "-p".to_string(),
            self.config.port.to_string(),
            "-o".to_string(),
            "BatchMode=yes".to_string(),
            "-o".to_string(),
            "StrictHostKeyChecking=accept-new".to_string(),
            "-o".to_string(),
            format!("ConnectTimeout={connect_secs}"),
            self.config.destination(),
            "--".to_string(),
            remote.to_string(),
        ]
    }
}

#[async_trait]
impl RemoteTransport for SshTransport {
    async fn run_command(&self, command: &str) -> Result<String, RemoteError> {
        let out = process::run(self.command(command), command, None, self.config.timeout).await?;
        Ok(trim_trailing_newlines(out))
    }

    async fn read_file(&self, path: &str) -> Result<String, RemoteError> {
        let remote = format!("cat -- {}", shell_quote(path));
        process::run(self.command(&remote), &remote, None, self.config.timeout).await
    }

    async fn write_file(&self, path: &str, content: &str) -> Result<(), RemoteError> {
        let remote = format!("cat > {}", shell_quote(path));
        process::run(
            self.command(&remote),
            &remote,
            Some(content.as_bytes()),
            self.config.timeout,
        )
        .await
        .map(|_| ())
        .map_err(|e| {
            tracing::error!(path, error = %e, "ssh: overwrite failed, file may be partially written");
            RemoteError::Write {
                path: path.to_string(),
                message: e.to_string(),
            }
        })
    }

    fn name(&self) -> &str {
        "ssh"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_ssh_args() {
        let transport = SshTransport::new(
            SshConfig::new("vm.local", "fleet", "/keys/id")
                .with_port(2200)
                .with_timeout(Duration::from_secs(12)),
        );
        let args = transport.ssh_args("tail -n 50 -- '/a b.csv'");
        assert_eq!(
            args,
            vec![
                "-i",
                "/keys/id",
                "-p",
                "2200",
                "-o",
                "BatchMode=yes",
                "-o",
                "StrictHostKeyChecking=accept-new",
                "-o",
                "ConnectTimeout=12",
                "fleet@vm.local",
                "--",
                "tail -n 50 -- '/a b.csv'",
            ]
        );
        assert_eq!(transport.name(), "ssh");
    }

    #[test]
    fn test_sub_second_timeout_still_sets_connect_timeout() {
        let transport = SshTransport::new(
            SshConfig::new("h", "u", "/k").with_timeout(Duration::from_millis(200)),
        );
        assert!(transport
            .ssh_args("true")
            .contains(&"ConnectTimeout=1".to_string()));
    }
}
