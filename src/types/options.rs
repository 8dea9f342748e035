//! Session options and configuration
//!
//! This module contains the configuration options for an AGI session,
//! including a builder pattern for easy configuration.

/// Default maximum size of the decode buffer (1MB)
pub const DEFAULT_MAX_BUFFER_SIZE: usize = 1024 * 1024;

// ============================================================================
// Session Options
// ============================================================================

/// Options for an AGI session
#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// Maximum number of buffered bytes without a complete unit
    pub max_buffer_size: usize,
    /// Reject the current and backlogged commands when the peer hangs up.
    ///
    /// Off by default: those commands are left unresolved.
    pub fail_pending_on_hangup: bool,
    /// Reject the current and backlogged commands when the transport closes.
    ///
    /// Off by default: those commands are left unresolved.
    pub fail_pending_on_close: bool,
}

impl SessionOptions {
    /// Create a new builder for `SessionOptions`
    #[must_use]
    pub fn builder() -> SessionOptionsBuilder {
        SessionOptionsBuilder::default()
    }
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            max_buffer_size: DEFAULT_MAX_BUFFER_SIZE,
            fail_pending_on_hangup: false,
            fail_pending_on_close: false,
        }
    }
}

// ============================================================================
// Builder for SessionOptions
// ============================================================================

/// Builder for `SessionOptions`
#[derive(Debug, Default)]
pub struct SessionOptionsBuilder {
    options: SessionOptions,
}

impl SessionOptionsBuilder {
    /// Set the maximum decode buffer size
    ///
    /// # Panics
    /// Panics if `size` is zero
    #[must_use]
    pub fn max_buffer_size(mut self, size: usize) -> Self {
        assert!(size > 0, "max_buffer_size must be greater than zero");
        self.options.max_buffer_size = size;
        self
    }

    /// Reject outstanding commands on hangup
    #[must_use]
    pub const fn fail_pending_on_hangup(mut self, enabled: bool) -> Self {
        self.options.fail_pending_on_hangup = enabled;
        self
    }

    /// Reject outstanding commands when the transport closes
    #[must_use]
    pub const fn fail_pending_on_close(mut self, enabled: bool) -> Self {
        self.options.fail_pending_on_close = enabled;
        self
    }

    /// Build the options
    #[must_use]
    pub fn build(self) -> SessionOptions {
        self.options
    }
}
