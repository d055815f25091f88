//! Request types for the payroll engine API.
//!
//! This module defines the JSON request structures accepted by the
//! endpoints. Bodies use camelCase field names.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{ClockSlot, Role, User};

/// Request body for `POST /api/clock`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClockRequest {
    /// The user punching.
    pub user_id: String,
    /// The slot being punched.
    pub slot: ClockSlot,
}

/// Request body for `POST /api/users`.
///
/// Omitted `id` creates a new user with a fresh identifier; an existing
/// `id` replaces that user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRequest {
    /// Identifier of the user to replace, if any.
    #[serde(default)]
    pub id: Option<String>,
    /// Display name.
    pub name: String,
    /// Login email.
    #[serde(default)]
    pub email: String,
    /// Login password. Omit to keep the stored one.
    #[serde(default)]
    pub password: Option<String>,
    /// Four-digit kiosk pin.
    pub pin: String,
    /// Birthday.
    #[serde(default)]
    pub birthday: Option<NaiveDate>,
    /// Role; defaults to `user`.
    #[serde(default = "default_role")]
    pub role: Role,
    /// Pay per regular hour.
    #[serde(default)]
    pub hourly_rate: Decimal,
    /// Pay per overtime hour.
    #[serde(default)]
    pub overtime_rate: Decimal,
    /// Creation instant; defaults to now.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

fn default_role() -> Role {
    Role::User
}

impl From<UserRequest> for User {
    fn from(req: UserRequest) -> Self {
        User {
            id: req.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
            name: req.name,
            email: req.email,
            password: req.password,
            pin: req.pin,
            birthday: req.birthday,
            role: req.role,
            hourly_rate: req.hourly_rate,
            overtime_rate: req.overtime_rate,
            created_at: req.created_at.unwrap_or_else(Utc::now),
        }
    }
}
