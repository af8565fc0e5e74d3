//! Yonecab Common Library
//!
//! Shared types, ride lifecycle rules, and validation helpers used by both
//! the server and the client.

pub mod error;
pub mod phone;
pub mod types;

pub use error::ErrorBody;
pub use types::*;
