//! Port for the local session store.
//!
//! The store holds two values that live and die together: a boolean
//! authenticated flag and the JSON-encoded [`SessionIdentity`]. Adapters
//! must treat malformed or inconsistent stored content as "not
//! authenticated" and clear both values, never surfacing a parse failure
//! to the caller.

use crate::domain::session::SessionIdentity;

use super::define_port_error;

define_port_error! {
    /// Failures raised by session store adapters.
    pub enum SessionStoreError {
        /// The backing storage could not be read or written.
        Storage { message: String } => "session storage failed: {message}",
    }
}

/// Explicit session lifecycle: persist after a successful sign-in, load at
/// startup, clear on sign-out.
#[cfg_attr(test, mockall::automock)]
pub trait SessionStore: Send + Sync {
    /// Write the identity record and set the authenticated flag together.
    fn persist(&self, identity: &SessionIdentity) -> Result<(), SessionStoreError>;

    /// Read the current identity.
    ///
    /// Returns `None` when no session exists; a malformed stored record is
    /// cleared (both values) and also reads as `None`.
    fn load(&self) -> Result<Option<SessionIdentity>, SessionStoreError>;

    /// Drop the identity record and the authenticated flag together.
    fn clear(&self) -> Result<(), SessionStoreError>;
}
