//! User model and related types.
//!
//! This module defines the [`User`] struct and [`Role`] enum for the people
//! who punch the clock and the admin who runs payroll.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Number of digits in a clock PIN.
pub const PIN_LENGTH: usize = 4;

/// Largest accepted hourly or overtime rate.
pub const MAX_RATE: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

/// The role of a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// A regular employee included in payroll.
    User,
    /// An administrator, excluded from payroll.
    Admin,
}

/// Represents a person known to the system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique identifier for the user.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Contact email.
    #[serde(default)]
    pub email: String,
    /// Login password. Accepted on input, never written back out.
    #[serde(default, skip_serializing)]
    pub password: Option<String>,
    /// Four-digit clock PIN, unique across users.
    pub pin: String,
    /// Date of birth.
    #[serde(default)]
    pub birthday: Option<NaiveDate>,
    /// The user's role.
    pub role: Role,
    /// Pay per regular hour.
    pub hourly_rate: Decimal,
    /// Pay per overtime hour.
    pub overtime_rate: Decimal,
    /// When the user was onboarded.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Returns true if the user is an administrator.
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Checks the field-level invariants of a user record.
    ///
    /// PIN uniqueness spans users and is checked by the store instead.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::models::{Role, User};
    /// use chrono::Utc;
    /// use rust_decimal::Decimal;
    ///
    /// let user = User {
    ///     id: "u-1".to_string(),
    ///     name: "Ana Cruz".to_string(),
    ///     email: "ana@example.com".to_string(),
    ///     password: None,
    ///     pin: "12a4".to_string(),
    ///     birthday: None,
    ///     role: Role::User,
    ///     hourly_rate: Decimal::new(100, 0),
    ///     overtime_rate: Decimal::new(125, 0),
    ///     created_at: Utc::now(),
    /// };
    /// assert!(user.validate().is_err());
    /// ```
    pub fn validate(&self) -> EngineResult<()> {
        if self.id.trim().is_empty() {
            return Err(invalid("id", "must not be empty"));
        }
        if self.name.trim().is_empty() {
            return Err(invalid("name", "must not be empty"));
        }
        if self.pin.len() != PIN_LENGTH || !self.pin.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid("pin", "must be exactly 4 digits"));
        }
        for (field, rate) in [
            ("hourlyRate", self.hourly_rate),
            ("overtimeRate", self.overtime_rate),
        ] {
            if rate < Decimal::ZERO {
                return Err(invalid(field, "must not be negative"));
            }
            if rate > MAX_RATE {
                return Err(invalid(field, "must be at most 1000000"));
            }
        }
        Ok(())
    }
}

fn invalid(field: &str, message: &str) -> EngineError {
    EngineError::InvalidUser {
        field: field.to_string(),
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn create_test_user(pin: &str) -> User {
        User {
            id: "u-1".to_string(),
            name: "Ana Cruz".to_string(),
            email: "ana@example.com".to_string(),
            password: Some("secret".to_string()),
            pin: pin.to_string(),
            birthday: NaiveDate::from_ymd_opt(1995, 4, 12),
            role: Role::User,
            hourly_rate: Decimal::new(100, 0),
            overtime_rate: Decimal::new(125, 0),
            created_at: Utc.with_ymd_and_hms(2026, 1, 5, 8, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_deserialize_user() {
        let json = r#"{
            "id": "u-7",
            "name": "Ben Reyes",
            "email": "ben@example.com",
            "password": "hunter22",
            "pin": "4821",
            "birthday": "1990-11-02",
            "role": "user",
            "hourlyRate": "85.50",
            "overtimeRate": 110,
            "createdAt": "2026-01-05T08:00:00Z"
        }"#;

        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.id, "u-7");
        assert_eq!(user.role, Role::User);
        assert_eq!(user.password.as_deref(), Some("hunter22"));
        assert_eq!(user.hourly_rate, Decimal::new(8550, 2));
        assert_eq!(user.overtime_rate, Decimal::new(110, 0));
        assert!(user.validate().is_ok());
    }

    #[test]
    fn test_password_is_never_serialized() {
        let user = create_test_user("1234");
        let value = serde_json::to_value(&user).unwrap();
        assert!(value.get("password").is_none());
        assert_eq!(value["hourlyRate"], "100");
        assert_eq!(value["role"], "user");
    }

    #[test]
    fn test_role_serialization() {
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), "\"user\"");
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
    }

    #[test]
    fn test_is_admin() {
        let mut user = create_test_user("1234");
        assert!(!user.is_admin());
        user.role = Role::Admin;
        assert!(user.is_admin());
    }

    #[test]
    fn test_pin_must_be_four_digits() {
        for pin in ["123", "12345", "12a4", "", " 123"] {
            let err = create_test_user(pin).validate().unwrap_err();
            assert!(
                matches!(err, EngineError::InvalidUser { ref field, .. } if field == "pin"),
                "pin {:?} should be rejected",
                pin
            );
        }
        assert!(create_test_user("0000").validate().is_ok());
    }

    #[test]
    fn test_empty_name_rejected() {
        let mut user = create_test_user("1234");
        user.name = "  ".to_string();
        assert!(matches!(
            user.validate(),
            Err(EngineError::InvalidUser { field, .. }) if field == "name"
        ));
    }

    #[test]
    fn test_negative_rate_rejected() {
        let mut user = create_test_user("1234");
        user.overtime_rate = Decimal::new(-1, 0);
        assert!(matches!(
            user.validate(),
            Err(EngineError::InvalidUser { field, .. }) if field == "overtimeRate"
        ));
    }

    #[test]
    fn test_rate_above_limit_rejected() {
        let mut user = create_test_user("1234");
        user.hourly_rate = Decimal::MAX;
        assert!(matches!(
            user.validate(),
            Err(EngineError::InvalidUser { field, .. }) if field == "hourlyRate"
        ));

        user.hourly_rate = MAX_RATE;
        assert!(user.validate().is_ok());
    }
}
