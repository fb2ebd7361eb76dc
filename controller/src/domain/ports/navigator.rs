//! Port for post-flow navigation.
//!
//! The router is plumbing outside this crate; controllers only ever ask it
//! to move to one of a fixed set of destinations, and only after a flow
//! has fully succeeded (or the user explicitly bailed out of one).

/// Destinations a controller can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavTarget {
    /// Authenticated landing page.
    Dashboard,
    /// Public landing page.
    Home,
    /// Sign-in page, e.g. after a completed registration.
    Login,
}

/// Navigation sink implemented by the embedding shell.
#[cfg_attr(test, mockall::automock)]
pub trait Navigator: Send + Sync {
    /// Move the user to the given destination.
    fn navigate(&self, target: NavTarget);
}

/// Fixture that swallows navigation requests.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureNavigator;

impl Navigator for FixtureNavigator {
    fn navigate(&self, _target: NavTarget) {}
}
