// crates/server/src/config.rs
//! Startup configuration read from the environment.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use drishti_remote::config::{DEFAULT_SSH_PORT, DEFAULT_TIMEOUT_SECS};
use drishti_remote::{LocalTransport, RemoteTransport, SshConfig, SshTransport};
use thiserror::Error;

/// Default HTTP port for the dashboard API.
pub const DEFAULT_PORT: u16 = 3001;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required environment variable {0}")]
    Missing(&'static str),

    #[error("Invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },

    #[error("Private key not found at {0}")]
    KeyNotFound(PathBuf),
}

/// How the service reaches the log files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportConfig {
    Ssh(SshConfig),
    /// The service runs on the data host itself.
    Local,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub port: u16,
    pub timeout: Duration,
    pub transport: TransportConfig,
}

impl AppConfig {
    /// Read from the process environment and check the key file exists.
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = Self::from_lookup(|name| std::env::var(name).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Build from any variable lookup. Does not touch the filesystem.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let port = match (get("DRISHTI_PORT"), get("PORT")) {
            (Some(raw), _) => parse_num("DRISHTI_PORT", &raw)?,
            (None, Some(raw)) => parse_num("PORT", &raw)?,
            (None, None) => DEFAULT_PORT,
        };

        let timeout_secs: u64 = match get("DRISHTI_REMOTE_TIMEOUT_SECS") {
            Some(raw) => parse_num("DRISHTI_REMOTE_TIMEOUT_SECS", &raw)?,
            None => DEFAULT_TIMEOUT_SECS,
        };
        if timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                name: "DRISHTI_REMOTE_TIMEOUT_SECS",
                value: "0".into(),
            });
        }
        let timeout = Duration::from_secs(timeout_secs);

        let kind = get("DRISHTI_TRANSPORT").map(|v| v.to_ascii_lowercase());
        let transport = match kind.as_deref() {
            None | Some("ssh") => {
                let host = get("VM_HOST").ok_or(ConfigError::Missing("VM_HOST"))?;
                let user = get("VM_USER").ok_or(ConfigError::Missing("VM_USER"))?;
                let key = get("VM_KEY_PATH").ok_or(ConfigError::Missing("VM_KEY_PATH"))?;
                let ssh_port = match get("VM_PORT") {
                    Some(raw) => parse_num("VM_PORT", &raw)?,
                    None => DEFAULT_SSH_PORT,
                };
                TransportConfig::Ssh(
                    SshConfig::new(host, user, key)
                        .with_port(ssh_port)
                        .with_timeout(timeout),
                )
            }
            Some("local") => TransportConfig::Local,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    name: "DRISHTI_TRANSPORT",
                    value: other.to_string(),
                })
            }
        };

        Ok(Self {
            port,
            timeout,
            transport,
        })
    }

    /// Checks that need the filesystem.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let TransportConfig::Ssh(ssh) = &self.transport {
            if !ssh.private_key_path.is_file() {
                return Err(ConfigError::KeyNotFound(ssh.private_key_path.clone()));
            }
        }
        Ok(())
    }

    pub fn build_transport(&self) -> Arc<dyn RemoteTransport> {
        match &self.transport {
            TransportConfig::Ssh(ssh) => Arc::new(SshTransport::new(ssh.clone())),
            TransportConfig::Local => Arc::new(LocalTransport::new(self.timeout)),
        }
    }
}

fn parse_num<T: std::str::FromStr>(name: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.parse().map_err(|_| ConfigError::Invalid {
        name,
        value: raw.to_string(),
    })
}
