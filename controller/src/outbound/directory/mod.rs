//! Reqwest-backed Directory Service adapter.
//!
//! Owns transport concerns only: endpoint construction, the
//! `{success, data | message}` envelope, and the mapping from HTTP and
//! decoding failures onto the port error enums. Domain semantics stay in
//! the controllers.

mod dto;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::config::DirectorySettings;
use crate::domain::department::{Department, NewDepartment};
use crate::domain::email::EmailAddress;
use crate::domain::join_request::{JoinRequest, NewJoinRequest};
use crate::domain::organization::{NewOrganization, Organization};
use crate::domain::ports::{
    AttendanceLog, AttendanceLogError, ClockInRecord, OrganizationDirectory,
    OrganizationDirectoryError, UserDirectory, UserDirectoryError,
};
use crate::domain::role::{NewRole, Role};
use crate::domain::user::{DirectoryUser, NewUser};

use dto::{
    CheckEmailDto, CheckEmailRequestDto, ClockInDto, DepartmentDto, Envelope, JoinRequestDto,
    NewDepartmentDto, NewJoinRequestDto, NewOrganizationDto, NewRoleDto, NewUserDto,
    OrganizationDto, RoleDto, UserDto,
};

/// Transport-level failure, mapped per port at the trait impls.
#[derive(Debug, Clone, PartialEq, Eq)]
enum CallError {
    Transport(String),
    Rejected(String),
    Decode(String),
}

impl From<CallError> for OrganizationDirectoryError {
    fn from(value: CallError) -> Self {
        match value {
            CallError::Transport(message) => Self::transport(message),
            CallError::Rejected(message) => Self::rejected(message),
            CallError::Decode(message) => Self::decode(message),
        }
    }
}

impl From<CallError> for UserDirectoryError {
    fn from(value: CallError) -> Self {
        match value {
            CallError::Transport(message) => Self::transport(message),
            CallError::Rejected(message) => Self::rejected(message),
            CallError::Decode(message) => Self::decode(message),
        }
    }
}

impl From<CallError> for AttendanceLogError {
    fn from(value: CallError) -> Self {
        match value {
            CallError::Rejected(message) => Self::rejected(message),
            // The attendance port has no decode variant; a garbled ack is
            // indistinguishable from a broken transport.
            CallError::Transport(message) | CallError::Decode(message) => {
                Self::transport(message)
            }
        }
    }
}

/// HTTP adapter implementing all three directory-facing ports.
pub struct HttpDirectory {
    client: Client,
    base_url: Url,
}

impl HttpDirectory {
    /// Build an adapter with a per-request timeout from settings.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(settings: &DirectorySettings) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(settings.request_timeout)
            .build()?;
        Ok(Self {
            client,
            base_url: settings.base_url.clone(),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, CallError> {
        self.base_url
            .join(path)
            .map_err(|error| CallError::Transport(format!("invalid endpoint {path}: {error}")))
    }

    async fn get_payload<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, CallError> {
        let url = self.endpoint(path)?;
        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(map_transport_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        parse_envelope(status, body.as_ref())
    }

    async fn post_payload<B, T>(&self, path: &str, body: &B) -> Result<T, CallError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(map_transport_error)?;
        let status = response.status();
        let bytes = response.bytes().await.map_err(map_transport_error)?;
        parse_envelope(status, bytes.as_ref())
    }

    /// POST where only the envelope's `success` matters; `data` may be
    /// absent entirely.
    async fn post_ack<B>(&self, path: &str, body: &B) -> Result<(), CallError>
    where
        B: Serialize + ?Sized + Sync,
    {
        let url = self.endpoint(path)?;
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(map_transport_error)?;
        let status = response.status();
        let bytes = response.bytes().await.map_err(map_transport_error)?;
        parse_ack(status, bytes.as_ref())
    }
}

fn map_transport_error(error: reqwest::Error) -> CallError {
    CallError::Transport(error.to_string())
}

fn parse_envelope<T: DeserializeOwned>(status: StatusCode, body: &[u8]) -> Result<T, CallError> {
    if !status.is_success() {
        return Err(status_error(status, body));
    }
    let envelope: Envelope<T> = serde_json::from_slice(body)
        .map_err(|error| CallError::Decode(format!("invalid envelope: {error}")))?;
    if !envelope.success {
        return Err(CallError::Rejected(
            envelope
                .message
                .unwrap_or_else(|| "request rejected".to_owned()),
        ));
    }
    envelope
        .data
        .ok_or_else(|| CallError::Decode("missing data payload".to_owned()))
}

fn parse_ack(status: StatusCode, body: &[u8]) -> Result<(), CallError> {
    if !status.is_success() {
        return Err(status_error(status, body));
    }
    let envelope: Envelope<serde_json::Value> = serde_json::from_slice(body)
        .map_err(|error| CallError::Decode(format!("invalid envelope: {error}")))?;
    if !envelope.success {
        return Err(CallError::Rejected(
            envelope
                .message
                .unwrap_or_else(|| "request rejected".to_owned()),
        ));
    }
    Ok(())
}

fn status_error(status: StatusCode, body: &[u8]) -> CallError {
    // Failure statuses often still carry an envelope with a usable
    // message; prefer it over the bare status code.
    if let Ok(envelope) = serde_json::from_slice::<Envelope<serde_json::Value>>(body) {
        if let Some(message) = envelope.message {
            return CallError::Rejected(message);
        }
    }
    CallError::Transport(format!("status {}", status.as_u16()))
}

#[async_trait]
impl OrganizationDirectory for HttpDirectory {
    async fn list_organizations(&self) -> Result<Vec<Organization>, OrganizationDirectoryError> {
        let rows: Vec<OrganizationDto> = self.get_payload("organizations", &[]).await?;
        rows.into_iter()
            .map(|dto| dto.into_domain().map_err(OrganizationDirectoryError::decode))
            .collect()
    }

    async fn departments(
        &self,
        organization_id: Uuid,
    ) -> Result<Vec<Department>, OrganizationDirectoryError> {
        let rows: Vec<DepartmentDto> = self
            .get_payload(
                "departments",
                &[("organizationId", organization_id.to_string())],
            )
            .await?;
        Ok(rows.into_iter().map(DepartmentDto::into_domain).collect())
    }

    async fn roles(&self, department_id: Uuid) -> Result<Vec<Role>, OrganizationDirectoryError> {
        let rows: Vec<RoleDto> = self
            .get_payload("roles", &[("departmentId", department_id.to_string())])
            .await?;
        Ok(rows.into_iter().map(RoleDto::into_domain).collect())
    }

    async fn create_organization(
        &self,
        organization: &NewOrganization,
    ) -> Result<Organization, OrganizationDirectoryError> {
        let dto: OrganizationDto = self
            .post_payload("organizations", &NewOrganizationDto::from(organization))
            .await?;
        dto.into_domain().map_err(OrganizationDirectoryError::decode)
    }

    async fn create_department(
        &self,
        department: &NewDepartment,
    ) -> Result<Department, OrganizationDirectoryError> {
        let dto: DepartmentDto = self
            .post_payload("departments", &NewDepartmentDto::from(department))
            .await?;
        Ok(dto.into_domain())
    }

    async fn create_role(&self, role: &NewRole) -> Result<Role, OrganizationDirectoryError> {
        let dto: RoleDto = self.post_payload("roles", &NewRoleDto::from(role)).await?;
        Ok(dto.into_domain())
    }
}

#[async_trait]
impl UserDirectory for HttpDirectory {
    async fn email_exists(&self, email: &EmailAddress) -> Result<bool, UserDirectoryError> {
        let dto: CheckEmailDto = self
            .post_payload(
                "auth/check-email",
                &CheckEmailRequestDto {
                    email: email.as_ref(),
                },
            )
            .await?;
        Ok(dto.exists)
    }

    async fn create_user(&self, user: &NewUser) -> Result<DirectoryUser, UserDirectoryError> {
        let dto: UserDto = self.post_payload("users", &NewUserDto::from(user)).await?;
        dto.into_domain().map_err(UserDirectoryError::decode)
    }

    async fn list_users(&self) -> Result<Vec<DirectoryUser>, UserDirectoryError> {
        let rows: Vec<UserDto> = self.get_payload("users", &[]).await?;
        rows.into_iter()
            .map(|dto| dto.into_domain().map_err(UserDirectoryError::decode))
            .collect()
    }

    async fn create_join_request(
        &self,
        request: &NewJoinRequest,
    ) -> Result<JoinRequest, UserDirectoryError> {
        let dto: JoinRequestDto = self
            .post_payload("join-requests", &NewJoinRequestDto::from(request))
            .await?;
        Ok(dto.into_domain())
    }
}

#[async_trait]
impl AttendanceLog for HttpDirectory {
    async fn clock_in(&self, record: &ClockInRecord) -> Result<(), AttendanceLogError> {
        self.post_ack("attendance/clock-in", &ClockInDto::from(record))
            .await
            .map_err(AttendanceLogError::from)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for non-network envelope and DTO mapping.

    use super::*;
    use rstest::rstest;

    #[test]
    fn success_envelope_yields_the_payload() {
        let body = br#"{ "success": true, "data": { "exists": true } }"#;
        let dto: CheckEmailDto =
            parse_envelope(StatusCode::OK, body).expect("payload should decode");
        assert!(dto.exists);
    }

    #[test]
    fn unsuccessful_envelope_maps_to_rejected_with_the_server_message() {
        let body = br#"{ "success": false, "message": "identifier already exists" }"#;
        let error = parse_envelope::<CheckEmailDto>(StatusCode::OK, body)
            .expect_err("rejection should surface");
        assert_eq!(
            error,
            CallError::Rejected("identifier already exists".to_owned())
        );
    }

    #[test]
    fn garbage_body_maps_to_decode() {
        let error = parse_envelope::<CheckEmailDto>(StatusCode::OK, b"<html>oops</html>")
            .expect_err("garbage should fail");
        assert!(matches!(error, CallError::Decode(_)));
    }

    #[test]
    fn missing_data_on_success_is_a_decode_error() {
        let body = br#"{ "success": true }"#;
        let error = parse_envelope::<CheckEmailDto>(StatusCode::OK, body)
            .expect_err("payload is required");
        assert!(matches!(error, CallError::Decode(_)));
    }

    #[rstest]
    #[case(StatusCode::BAD_REQUEST)]
    #[case(StatusCode::INTERNAL_SERVER_ERROR)]
    fn failure_status_prefers_the_envelope_message(#[case] status: StatusCode) {
        let body = br#"{ "success": false, "message": "email already registered" }"#;
        let error =
            parse_envelope::<CheckEmailDto>(status, body).expect_err("status should fail");
        assert_eq!(
            error,
            CallError::Rejected("email already registered".to_owned())
        );
    }

    #[test]
    fn failure_status_without_envelope_is_transport() {
        let error = parse_envelope::<CheckEmailDto>(StatusCode::BAD_GATEWAY, b"")
            .expect_err("status should fail");
        assert_eq!(error, CallError::Transport("status 502".to_owned()));
    }

    #[test]
    fn ack_tolerates_a_missing_data_payload() {
        let body = br#"{ "success": true }"#;
        parse_ack(StatusCode::OK, body).expect("ack should succeed");
    }

    #[test]
    fn organization_dto_revalidates_identifiers() {
        let body = br#"{
            "success": true,
            "data": [{
                "id": "3fa85f64-5717-4562-b3fc-2c963f66afa6",
                "identifier": "ORG-tech-1",
                "joinCode": "AB12C",
                "name": "Acme",
                "ceoEmail": "ceo@acme.example",
                "ceoPassword": "secret1"
            }]
        }"#;
        let rows: Vec<OrganizationDto> =
            parse_envelope(StatusCode::OK, body).expect("envelope decodes");
        let error = rows
            .into_iter()
            .next()
            .expect("one row")
            .into_domain()
            .expect_err("lowercase identifier must fail");
        assert!(error.contains("identifier"));
    }

    #[test]
    fn clock_in_body_uses_snake_case_keys() {
        let record = ClockInRecord {
            user_id: Uuid::nil(),
            organization_id: Uuid::nil(),
            department_id: None,
        };
        let value = serde_json::to_value(ClockInDto::from(&record)).expect("serializes");
        assert!(value.get("user_id").is_some());
        assert!(value.get("organization_id").is_some());
        assert!(value.get("userId").is_none());
    }
}
