//! Port for the user-facing half of the Directory Service.

use async_trait::async_trait;

use crate::domain::email::EmailAddress;
use crate::domain::join_request::{JoinRequest, NewJoinRequest};
use crate::domain::user::{DirectoryUser, NewUser};

use super::define_port_error;

define_port_error! {
    /// Failures raised by user directory adapters.
    pub enum UserDirectoryError {
        /// Service could not be reached or the call timed out.
        Transport { message: String } =>
            "user directory unreachable: {message}",
        /// Service answered but refused the request.
        Rejected { message: String } =>
            "user directory rejected the request: {message}",
        /// Payload could not be decoded into domain records.
        Decode { message: String } =>
            "user directory payload invalid: {message}",
    }
}

/// Account, join-request, and email-existence operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Whether any account already uses this email.
    async fn email_exists(&self, email: &EmailAddress) -> Result<bool, UserDirectoryError>;

    /// Persist a new user account.
    async fn create_user(&self, user: &NewUser) -> Result<DirectoryUser, UserDirectoryError>;

    /// List every user account.
    async fn list_users(&self) -> Result<Vec<DirectoryUser>, UserDirectoryError>;

    /// Persist a join request linking an account to an organization.
    async fn create_join_request(
        &self,
        request: &NewJoinRequest,
    ) -> Result<JoinRequest, UserDirectoryError>;
}

/// Fixture with no accounts; creates echo back with fresh identities.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureUserDirectory;

#[async_trait]
impl UserDirectory for FixtureUserDirectory {
    async fn email_exists(&self, _email: &EmailAddress) -> Result<bool, UserDirectoryError> {
        Ok(false)
    }

    async fn create_user(&self, user: &NewUser) -> Result<DirectoryUser, UserDirectoryError> {
        Ok(DirectoryUser {
            id: uuid::Uuid::new_v4(),
            full_name: user.full_name.clone(),
            email: user.email.clone(),
            password: user.password.clone(),
            approved: user.approved,
            active: user.active,
            organization_id: None,
            department_id: None,
            role_id: None,
        })
    }

    async fn list_users(&self) -> Result<Vec<DirectoryUser>, UserDirectoryError> {
        Ok(Vec::new())
    }

    async fn create_join_request(
        &self,
        request: &NewJoinRequest,
    ) -> Result<JoinRequest, UserDirectoryError> {
        Ok(JoinRequest {
            id: uuid::Uuid::new_v4(),
            user_id: request.user_id,
            organization_id: request.organization_id,
            department_id: request.department_id,
            role_id: request.role_id,
            status: crate::domain::join_request::JoinRequestStatus::Pending,
            requested_at: request.requested_at,
            reviewed_at: None,
            reviewed_by: None,
        })
    }
}
