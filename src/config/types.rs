//! Configuration types for the payroll engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from the YAML configuration file.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::models::{Role, User};

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

impl ServerConfig {
    /// Returns `host:port` for binding the listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// The canonical administrator account seeded at startup.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AdminSeed {
    /// User id of the admin.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Login email.
    pub email: String,
    /// Login password.
    pub password: String,
    /// Four-digit kiosk pin.
    pub pin: String,
    /// Birthday, if recorded.
    pub birthday: Option<NaiveDate>,
}

impl Default for AdminSeed {
    fn default() -> Self {
        Self {
            id: "admin-1".to_string(),
            name: "System Admin".to_string(),
            email: "admin@admin.com".to_string(),
            password: "pass1234".to_string(),
            pin: "0000".to_string(),
            birthday: NaiveDate::from_ymd_opt(2000, 1, 1),
        }
    }
}

impl AdminSeed {
    /// Builds the admin [`User`] record. Admins carry zero pay rates.
    pub fn to_user(&self, created_at: DateTime<Utc>) -> User {
        User {
            id: self.id.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
            password: Some(self.password.clone()),
            pin: self.pin.clone(),
            birthday: self.birthday,
            role: Role::Admin,
            hourly_rate: Decimal::ZERO,
            overtime_rate: Decimal::ZERO,
            created_at,
        }
    }
}

/// The complete engine configuration loaded from YAML.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Listener settings.
    pub server: ServerConfig,
    /// Seeded administrator.
    pub admin: AdminSeed,
}
