//! Driver model. Drivers are also the accounts that log in.

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use super::car::CarSummary;

/// Three uppercase letters followed by five digits, e.g. `ABC12345`.
static LICENSE_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{3}[0-9]{5}$").expect("static regex"));

/// Full driver row from database (includes password_hash — never serialize to API).
#[derive(Debug, Clone, FromRow)]
pub struct Driver {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub license_number: String,
    pub is_active: bool,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Driver response DTO — excludes password_hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriverResponse {
    pub id: Uuid,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub license_number: String,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<Driver> for DriverResponse {
    fn from(d: Driver) -> Self {
        Self {
            id: d.id,
            username: d.username,
            first_name: d.first_name,
            last_name: d.last_name,
            email: d.email,
            license_number: d.license_number,
            last_login: d.last_login,
            created_at: d.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct DriverSummary {
    pub id: Uuid,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub license_number: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DriverDetail {
    #[serde(flatten)]
    pub driver: DriverResponse,
    pub cars: Vec<CarSummary>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateDriver {
    #[validate(length(min = 1, max = 150))]
    pub username: String,
    #[validate(length(min = 8))]
    pub password: String,
    #[serde(default)]
    #[validate(length(max = 150))]
    pub first_name: String,
    #[serde(default)]
    #[validate(length(max = 150))]
    pub last_name: String,
    #[validate(email)]
    pub email: String,
    #[validate(custom(function = "validate_license_number"))]
    pub license_number: String,
}

fn validate_license_number(value: &str) -> Result<(), ValidationError> {
    if LICENSE_NUMBER.is_match(value) {
        Ok(())
    } else {
        Err(ValidationError::new("license_number")
            .with_message("must be 3 uppercase letters followed by 5 digits".into()))
    }
}
