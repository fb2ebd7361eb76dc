//! Join requests linking a new account to an organization.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Review status of a join request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinRequestStatus {
    /// Awaiting administrator review; the only status this controller
    /// creates.
    Pending,
    Approved,
    Rejected,
}

/// A join request as the directory returns it.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinRequest {
    pub id: Uuid,
    pub user_id: Uuid,
    pub organization_id: Uuid,
    /// Department the applicant asked for, if any.
    pub department_id: Option<Uuid>,
    /// Role the applicant asked for, if any.
    pub role_id: Option<Uuid>,
    pub status: JoinRequestStatus,
    pub requested_at: DateTime<Utc>,
    /// Null until an administrator reviews the request.
    pub reviewed_at: Option<DateTime<Utc>>,
    /// Null until an administrator reviews the request.
    pub reviewed_by: Option<Uuid>,
}

/// Payload for the join-request create call.
#[derive(Debug, Clone, PartialEq)]
pub struct NewJoinRequest {
    pub user_id: Uuid,
    pub organization_id: Uuid,
    pub department_id: Option<Uuid>,
    pub role_id: Option<Uuid>,
    pub requested_at: DateTime<Utc>,
}
