// crates/remote/src/lib.rs
//! Access to the CSV logs on the data host.

pub mod config;
pub mod error;
pub mod fetch;
pub mod local;
mod process;
pub mod shell;
pub mod ssh;
pub mod transport;

pub use config::SshConfig;
pub use error::RemoteError;
pub use fetch::{fetch_all, fetch_tail, fetch_tail_with_header, overwrite, DEFAULT_TAIL_LINES};
pub use local::LocalTransport;
pub use ssh::SshTransport;
pub use transport::RemoteTransport;
