// crates/remote/src/config.rs
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_SSH_PORT: u16 = 22;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Credentials for the data host, read once at startup and reused for every call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SshConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub private_key_path: PathBuf,
    pub timeout: Duration,
}

impl SshConfig {
    pub fn new(host: impl Into<String>, username: impl Into<String>, key: impl Into<PathBuf>) -> Self {
        Self {
            host: host.into(),
            port: DEFAULT_SSH_PORT,
            username: username.into(),
            private_key_path: key.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// `user@host` as passed to the ssh client.
    pub fn destination(&self) -> String {
        format!("{}@{}", self.username, self.host)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_and_builders() {
        let cfg = SshConfig::new("10.0.0.5", "fleet", "/keys/id_ed25519");
        assert_eq!(cfg.port, 22);
        assert_eq!(cfg.timeout, Duration::from_secs(30));
        assert_eq!(cfg.destination(), "fleet@10.0.0.5");

        let cfg = cfg.with_port(2222).with_timeout(Duration::from_secs(5));
        assert_eq!(cfg.port, 2222);
        assert_eq!(cfg.timeout.as_secs(), 5);
    }
}
