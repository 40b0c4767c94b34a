pub mod attributes;
pub mod decisions;
pub mod error;
pub mod pager;
pub mod requests;
pub mod types;
pub mod util;

pub use crate::error::TransportError;
pub use crate::types::{Page, RawEvent};
