//! Type definitions for AGI sessions
//!
//! This module contains the value types shared across the crate,
//! organized into logical submodules:
//!
//! - [`identifiers`] - Type-safe ID wrappers (`SessionId`)
//! - [`response`] - Parsed command responses
//! - [`variables`] - The handshake variable mapping
//! - [`events`] - Session lifecycle events
//! - [`options`] - Session configuration options

pub mod events;
pub mod identifiers;
pub mod options;
pub mod response;
pub mod variables;

// Re-export commonly used types
pub use events::SessionEvent;
pub use identifiers::SessionId;
pub use options::{DEFAULT_MAX_BUFFER_SIZE, SessionOptions, SessionOptionsBuilder};
pub use response::Response;
pub use variables::Variables;
