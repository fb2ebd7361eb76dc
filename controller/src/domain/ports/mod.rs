//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod attendance_log;
mod navigator;
mod organization_directory;
mod session_store;
mod user_directory;

#[cfg(test)]
pub use attendance_log::MockAttendanceLog;
pub use attendance_log::{
    AttendanceLog, AttendanceLogError, ClockInRecord, FixtureAttendanceLog,
};
#[cfg(test)]
pub use navigator::MockNavigator;
pub use navigator::{FixtureNavigator, NavTarget, Navigator};
#[cfg(test)]
pub use organization_directory::MockOrganizationDirectory;
pub use organization_directory::{
    FixtureOrganizationDirectory, OrganizationDirectory, OrganizationDirectoryError,
};
#[cfg(test)]
pub use session_store::MockSessionStore;
pub use session_store::{SessionStore, SessionStoreError};
#[cfg(test)]
pub use user_directory::MockUserDirectory;
pub use user_directory::{FixtureUserDirectory, UserDirectory, UserDirectoryError};
