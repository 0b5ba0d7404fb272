//! # Warden Common
//!
//! Shared types, constants, and errors used by the Warden admin backend.
//!
//! ## Modules
//! - `constants` - Keyspace prefixes, cookie name, TTL defaults, messages
//! - `error` - The admin error taxonomy
//! - `types` - Request/response payloads and the response envelope

pub mod constants;
pub mod error;
pub mod types;

pub use error::AdminError;
pub use types::*;
