//! Port for the attendance clock-in side effect fired on employee sign-in.

use async_trait::async_trait;
use uuid::Uuid;

use super::define_port_error;

define_port_error! {
    /// Failures raised by attendance adapters.
    pub enum AttendanceLogError {
        /// Service could not be reached or the call timed out.
        Transport { message: String } =>
            "attendance service unreachable: {message}",
        /// Service answered but refused the clock-in.
        Rejected { message: String } =>
            "attendance service rejected the clock-in: {message}",
    }
}

/// One clock-in record, keyed the way the attendance endpoint expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockInRecord {
    pub user_id: Uuid,
    pub organization_id: Uuid,
    pub department_id: Option<Uuid>,
}

/// Attendance recording. A failure here is logged but does not block
/// sign-in; attendance is a side record, not an authentication factor.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AttendanceLog: Send + Sync {
    /// Record that the user started their working session.
    async fn clock_in(&self, record: &ClockInRecord) -> Result<(), AttendanceLogError>;
}

/// Fixture that accepts every clock-in.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureAttendanceLog;

#[async_trait]
impl AttendanceLog for FixtureAttendanceLog {
    async fn clock_in(&self, _record: &ClockInRecord) -> Result<(), AttendanceLogError> {
        Ok(())
    }
}
