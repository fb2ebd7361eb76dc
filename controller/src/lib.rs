//! Crewdesk client-core: the registration and authentication flow
//! controllers.
//!
//! The crate drives three flows against a remote Directory Service:
//!
//! - organization onboarding (a multi-step wizard accumulating department
//!   and role drafts before a single commit),
//! - employee registration (a single form backed by a cascading
//!   organization → department → role loader),
//! - sign-in (CEO and employee paths, the former finishing with an
//!   organization-code challenge).
//!
//! Rendering, routing, and storage are external collaborators reached
//! through the ports in [`domain::ports`]; reference adapters live under
//! [`outbound`].

pub mod config;
pub mod domain;
pub mod outbound;
pub mod telemetry;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
