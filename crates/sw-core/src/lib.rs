pub mod backend;
pub mod config;
pub mod decisions;
pub mod error;
pub mod history;
pub mod transport;
pub mod validation;

pub mod types;

pub use crate::backend::Backend;
pub use crate::config::Configuration;
pub use crate::decisions::{encode, encode_batch};
pub use crate::error::SwfError;
pub use crate::history::reconstruct;
pub use crate::transport::Transport;
