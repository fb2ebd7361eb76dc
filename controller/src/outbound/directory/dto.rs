//! Wire DTOs for the Directory Service JSON envelope.
//!
//! Response bodies use camelCase keys; the clock-in request keeps the
//! snake_case keys its endpoint expects. Conversions into domain records
//! revalidate the server's identifiers so a corrupt payload surfaces as a
//! decode error instead of leaking an invariant-breaking value.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::email::EmailAddress;
use crate::domain::department::{Department, NewDepartment};
use crate::domain::join_request::{JoinRequest, JoinRequestStatus, NewJoinRequest};
use crate::domain::organization::{JoinCode, NewOrganization, OrgIdentifier, Organization};
use crate::domain::ports::ClockInRecord;
use crate::domain::role::{NewRole, Role, RoleCapabilities};
use crate::domain::user::{DirectoryUser, NewUser};

/// Standard response wrapper: `success` plus `data` or `message`.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub(super) struct Envelope<T> {
    pub success: bool,
    #[serde(default)]
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct OrganizationDto {
    pub id: Uuid,
    pub identifier: String,
    pub join_code: String,
    pub name: String,
    pub ceo_email: String,
    pub ceo_password: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub logo_url: Option<String>,
    #[serde(default)]
    pub website_url: Option<String>,
    #[serde(default)]
    pub employee_count: u32,
    #[serde(default)]
    pub department_count: u32,
}

impl OrganizationDto {
    pub fn into_domain(self) -> Result<Organization, String> {
        let identifier = OrgIdentifier::new(&self.identifier)
            .map_err(|error| format!("organization {}: {error}", self.id))?;
        let join_code = JoinCode::new(&self.join_code)
            .map_err(|error| format!("organization {}: {error}", self.id))?;
        let ceo_email = EmailAddress::new(&self.ceo_email)
            .map_err(|error| format!("organization {}: {error}", self.id))?;
        Ok(Organization {
            id: self.id,
            identifier,
            join_code,
            name: self.name,
            ceo_email,
            ceo_password: self.ceo_password,
            phone: self.phone,
            address: self.address,
            logo_url: self.logo_url,
            website_url: self.website_url,
            employee_count: self.employee_count,
            department_count: self.department_count,
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct NewOrganizationDto<'a> {
    pub identifier: &'a str,
    pub join_code: &'a str,
    pub name: &'a str,
    pub ceo_email: &'a str,
    pub ceo_password: &'a str,
    pub phone: &'a str,
    pub address: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website_url: Option<&'a str>,
}

impl<'a> From<&'a NewOrganization> for NewOrganizationDto<'a> {
    fn from(value: &'a NewOrganization) -> Self {
        Self {
            identifier: value.identifier.as_ref(),
            join_code: value.join_code.as_ref(),
            name: &value.name,
            ceo_email: value.ceo_email.as_ref(),
            ceo_password: &value.ceo_password,
            phone: &value.phone,
            address: &value.address,
            logo_url: value.logo_url.as_deref(),
            website_url: value.website_url.as_deref(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct DepartmentDto {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub icon: String,
}

impl DepartmentDto {
    pub fn into_domain(self) -> Department {
        Department {
            id: self.id,
            organization_id: self.organization_id,
            name: self.name,
            description: self.description,
            icon: self.icon,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct NewDepartmentDto<'a> {
    pub organization_id: Uuid,
    pub name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'a str>,
    pub icon: &'a str,
}

impl<'a> From<&'a NewDepartment> for NewDepartmentDto<'a> {
    fn from(value: &'a NewDepartment) -> Self {
        Self {
            organization_id: value.organization_id,
            name: &value.name,
            description: value.description.as_deref(),
            icon: &value.icon,
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize, Clone, Copy)]
#[serde(rename_all = "camelCase", default)]
pub(super) struct RoleCapabilitiesDto {
    pub post_news: bool,
    pub post_events: bool,
    pub assign_tasks: bool,
    pub receive_tasks: bool,
    pub view_statistics: bool,
    pub hire: bool,
    pub reassign_tasks: bool,
}

impl From<RoleCapabilitiesDto> for RoleCapabilities {
    fn from(value: RoleCapabilitiesDto) -> Self {
        Self {
            post_news: value.post_news,
            post_events: value.post_events,
            assign_tasks: value.assign_tasks,
            receive_tasks: value.receive_tasks,
            view_statistics: value.view_statistics,
            hire: value.hire,
            reassign_tasks: value.reassign_tasks,
        }
    }
}

impl From<RoleCapabilities> for RoleCapabilitiesDto {
    fn from(value: RoleCapabilities) -> Self {
        Self {
            post_news: value.post_news,
            post_events: value.post_events,
            assign_tasks: value.assign_tasks,
            receive_tasks: value.receive_tasks,
            view_statistics: value.view_statistics,
            hire: value.hire,
            reassign_tasks: value.reassign_tasks,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct RoleDto {
    pub id: Uuid,
    pub department_id: Uuid,
    pub name: String,
    pub priority: u32,
    #[serde(default)]
    pub capabilities: RoleCapabilitiesDto,
}

impl RoleDto {
    pub fn into_domain(self) -> Role {
        Role {
            id: self.id,
            department_id: self.department_id,
            name: self.name,
            priority: self.priority,
            capabilities: self.capabilities.into(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct NewRoleDto<'a> {
    pub department_id: Uuid,
    pub name: &'a str,
    pub priority: u32,
    pub capabilities: RoleCapabilitiesDto,
}

impl<'a> From<&'a NewRole> for NewRoleDto<'a> {
    fn from(value: &'a NewRole) -> Self {
        Self {
            department_id: value.department_id,
            name: &value.name,
            priority: value.priority,
            capabilities: value.capabilities.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct UserDto {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub approved: bool,
    pub active: bool,
    #[serde(default)]
    pub organization_id: Option<Uuid>,
    #[serde(default)]
    pub department_id: Option<Uuid>,
    #[serde(default)]
    pub role_id: Option<Uuid>,
}

impl UserDto {
    pub fn into_domain(self) -> Result<DirectoryUser, String> {
        let email =
            EmailAddress::new(&self.email).map_err(|error| format!("user {}: {error}", self.id))?;
        Ok(DirectoryUser {
            id: self.id,
            full_name: self.full_name,
            email,
            password: self.password,
            approved: self.approved,
            active: self.active,
            organization_id: self.organization_id,
            department_id: self.department_id,
            role_id: self.role_id,
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct NewUserDto<'a> {
    pub full_name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    pub approved: bool,
    pub active: bool,
}

impl<'a> From<&'a NewUser> for NewUserDto<'a> {
    fn from(value: &'a NewUser) -> Self {
        Self {
            full_name: &value.full_name,
            email: value.email.as_ref(),
            password: &value.password,
            approved: value.approved,
            active: value.active,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub(super) enum JoinRequestStatusDto {
    Pending,
    Approved,
    Rejected,
}

impl From<JoinRequestStatusDto> for JoinRequestStatus {
    fn from(value: JoinRequestStatusDto) -> Self {
        match value {
            JoinRequestStatusDto::Pending => Self::Pending,
            JoinRequestStatusDto::Approved => Self::Approved,
            JoinRequestStatusDto::Rejected => Self::Rejected,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct JoinRequestDto {
    pub id: Uuid,
    pub user_id: Uuid,
    pub organization_id: Uuid,
    #[serde(default)]
    pub department_id: Option<Uuid>,
    #[serde(default)]
    pub role_id: Option<Uuid>,
    pub status: JoinRequestStatusDto,
    pub requested_at: chrono::DateTime<chrono::Utc>,
    #[serde(default)]
    pub reviewed_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(default)]
    pub reviewed_by: Option<Uuid>,
}

impl JoinRequestDto {
    pub fn into_domain(self) -> JoinRequest {
        JoinRequest {
            id: self.id,
            user_id: self.user_id,
            organization_id: self.organization_id,
            department_id: self.department_id,
            role_id: self.role_id,
            status: self.status.into(),
            requested_at: self.requested_at,
            reviewed_at: self.reviewed_at,
            reviewed_by: self.reviewed_by,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct NewJoinRequestDto {
    pub user_id: Uuid,
    pub organization_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role_id: Option<Uuid>,
    pub requested_at: chrono::DateTime<chrono::Utc>,
}

impl From<&NewJoinRequest> for NewJoinRequestDto {
    fn from(value: &NewJoinRequest) -> Self {
        Self {
            user_id: value.user_id,
            organization_id: value.organization_id,
            department_id: value.department_id,
            role_id: value.role_id,
            requested_at: value.requested_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct CheckEmailRequestDto<'a> {
    pub email: &'a str,
}

#[derive(Debug, Deserialize)]
pub(super) struct CheckEmailDto {
    pub exists: bool,
}

// The attendance endpoint takes snake_case keys, unlike the rest of the
// API surface.
#[derive(Debug, Serialize)]
pub(super) struct ClockInDto {
    pub user_id: Uuid,
    pub organization_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department_id: Option<Uuid>,
}

impl From<&ClockInRecord> for ClockInDto {
    fn from(value: &ClockInRecord) -> Self {
        Self {
            user_id: value.user_id,
            organization_id: value.organization_id,
            department_id: value.department_id,
        }
    }
}
