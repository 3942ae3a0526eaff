//! EV owner DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::{ActiveStatus, DomainError, DomainResult, EvOwner};

/// Owner API representation
#[derive(Debug, Serialize, ToSchema)]
pub struct OwnerDto {
    pub nic: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicle_details: Option<String>,
    pub status: String,
}

impl From<EvOwner> for OwnerDto {
    fn from(o: EvOwner) -> Self {
        Self {
            nic: o.nic,
            name: o.name,
            email: o.email,
            phone: o.phone,
            vehicle_details: o.vehicle_details,
            status: o.status.as_str().to_string(),
        }
    }
}

/// Create owner request. Status is not accepted; new owners are active.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateOwnerRequest {
    #[validate(length(min = 1, max = 20))]
    pub nic: String,
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(email)]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub vehicle_details: Option<String>,
}

impl CreateOwnerRequest {
    pub fn into_owner(self) -> EvOwner {
        let mut owner = EvOwner::new(self.nic, self.name);
        owner.email = self.email;
        owner.phone = self.phone;
        owner.vehicle_details = self.vehicle_details;
        owner
    }
}

/// Update owner request; replaces every mutable field.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateOwnerRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(email)]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub vehicle_details: Option<String>,
    /// "Active" or "Inactive"
    pub status: String,
}

pub fn parse_status(s: &str) -> DomainResult<ActiveStatus> {
    ActiveStatus::parse(s)
        .ok_or_else(|| DomainError::Validation(format!("unknown status: {}", s)))
}
