//! Query request parsing and response shaping.

mod key;
mod response;

pub use key::QueryKey;
pub use response::{QueryResponse, MISSING_KEY_MESSAGE};
