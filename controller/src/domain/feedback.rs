//! Transient UI-feedback state: per-field error/wiggle flags and the
//! notification banner.
//!
//! The flags and the banner are part of the controllers' observable
//! contract. Both decay on fixed timers: a wiggle clears itself after
//! 500 ms, a notification after 5 s unless a newer one replaced it first.
//! Timers are independent spawned tasks and never block a state
//! transition; [`Feedback::shutdown`] aborts any still pending on
//! teardown.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::task::AbortHandle;

use crate::domain::error::DomainError;
use crate::domain::fields::Field;

/// Delay before a wiggle flag clears itself.
pub const WIGGLE_CLEAR: Duration = Duration::from_millis(500);
/// Delay before an unreplaced notification dismisses itself.
pub const NOTIFICATION_CLEAR: Duration = Duration::from_secs(5);
/// Delay before a failed CEO code challenge resets the sign-in form.
pub const CHALLENGE_RESET: Duration = Duration::from_secs(2);
/// Delay between a successful sign-in notice and navigation.
pub const POST_LOGIN_NAVIGATION: Duration = Duration::from_millis(1500);

/// The fixed UI delays, gathered so tests can compress them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timings {
    /// See [`WIGGLE_CLEAR`].
    pub wiggle_clear: Duration,
    /// See [`NOTIFICATION_CLEAR`].
    pub notification_clear: Duration,
    /// See [`CHALLENGE_RESET`].
    pub challenge_reset: Duration,
    /// See [`POST_LOGIN_NAVIGATION`].
    pub post_login_navigation: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            wiggle_clear: WIGGLE_CLEAR,
            notification_clear: NOTIFICATION_CLEAR,
            challenge_reset: CHALLENGE_RESET,
            post_login_navigation: POST_LOGIN_NAVIGATION,
        }
    }
}

/// Error and wiggle flags for a single field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldFlags {
    /// The field currently holds a rejected value.
    pub error: bool,
    /// The field should play its attention animation.
    pub wiggle: bool,
}

/// Banner severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
    Info,
}

/// The currently displayed notification banner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

#[derive(Default)]
struct FeedbackState {
    flags: HashMap<Field, FieldFlags>,
    notification: Option<Notification>,
    // Monotonic stamp; a dismiss timer only fires for the banner it was
    // armed against.
    notification_seq: u64,
}

/// Registry of outstanding timer tasks, aborted together on teardown.
#[derive(Clone, Default)]
pub(crate) struct TimerSet {
    handles: Arc<Mutex<Vec<AbortHandle>>>,
}

impl TimerSet {
    pub(crate) fn spawn<F>(&self, fut: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let handle = tokio::spawn(fut).abort_handle();
        let mut handles = lock(&self.handles);
        handles.retain(|pending| !pending.is_finished());
        handles.push(handle);
    }

    pub(crate) fn shutdown(&self) {
        for handle in lock(&self.handles).drain(..) {
            handle.abort();
        }
    }
}

/// Recover the guard from a poisoned lock; feedback state stays usable even
/// if a timer task panicked mid-update.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Shared handle onto the feedback state.
///
/// Cloning is cheap; all clones observe the same flags and banner.
#[derive(Clone)]
pub struct Feedback {
    state: Arc<Mutex<FeedbackState>>,
    timings: Timings,
    timers: TimerSet,
}

impl Default for Feedback {
    fn default() -> Self {
        Self::new(Timings::default())
    }
}

impl Feedback {
    /// Build a handle with explicit timings.
    pub fn new(timings: Timings) -> Self {
        Self {
            state: Arc::new(Mutex::new(FeedbackState::default())),
            timings,
            timers: TimerSet::default(),
        }
    }

    /// Timings this handle arms its timers with.
    pub fn timings(&self) -> Timings {
        self.timings
    }

    /// Mark a field rejected and play its attention animation once.
    ///
    /// The wiggle flag clears itself after the configured delay; the error
    /// flag stays until [`Feedback::clear_field`].
    pub fn flag_error(&self, field: Field) {
        {
            let mut state = lock(&self.state);
            state.flags.insert(
                field,
                FieldFlags {
                    error: true,
                    wiggle: true,
                },
            );
        }
        let state = Arc::clone(&self.state);
        let delay = self.timings.wiggle_clear;
        self.timers.spawn(async move {
            tokio::time::sleep(delay).await;
            if let Some(flags) = lock(&state).flags.get_mut(&field) {
                flags.wiggle = false;
            }
        });
    }

    /// Reset a field's flags, e.g. when the user edits it again.
    pub fn clear_field(&self, field: Field) {
        lock(&self.state).flags.remove(&field);
    }

    /// Current flags for a field.
    pub fn flags(&self, field: Field) -> FieldFlags {
        lock(&self.state)
            .flags
            .get(&field)
            .copied()
            .unwrap_or_default()
    }

    /// True when no field carries an error flag.
    pub fn is_clean(&self) -> bool {
        lock(&self.state).flags.values().all(|flags| !flags.error)
    }

    /// Show a banner, replacing any current one and re-arming the dismiss
    /// timer.
    pub fn notify(&self, kind: NotificationKind, message: impl Into<String>) {
        let seq = {
            let mut state = lock(&self.state);
            state.notification_seq += 1;
            state.notification = Some(Notification {
                kind,
                message: message.into(),
            });
            state.notification_seq
        };
        let state = Arc::clone(&self.state);
        let delay = self.timings.notification_clear;
        self.timers.spawn(async move {
            tokio::time::sleep(delay).await;
            let mut state = lock(&state);
            if state.notification_seq == seq {
                state.notification = None;
            }
        });
    }

    /// Surface a domain error as an error banner.
    pub fn report(&self, error: &DomainError) {
        self.notify(NotificationKind::Error, error.message());
    }

    /// Shorthand for a success banner.
    pub fn notify_success(&self, message: impl Into<String>) {
        self.notify(NotificationKind::Success, message);
    }

    /// Shorthand for an informational banner.
    pub fn notify_info(&self, message: impl Into<String>) {
        self.notify(NotificationKind::Info, message);
    }

    /// The banner currently on screen, if any.
    pub fn notification(&self) -> Option<Notification> {
        lock(&self.state).notification.clone()
    }

    /// Abort outstanding wiggle/dismiss timers. Call on component teardown.
    pub fn shutdown(&self) {
        self.timers.shutdown();
    }
}
