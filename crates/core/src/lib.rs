// crates/core/src/lib.rs
pub mod correlate;
pub mod dialect;
pub mod error;
pub mod extract;
pub mod mutation;
pub mod timestamp;
pub mod types;

pub use correlate::*;
pub use dialect::{ParseOutput, ParseWarning};
pub use error::*;
pub use extract::*;
pub use mutation::*;
pub use timestamp::*;
pub use types::*;
