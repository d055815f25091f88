//! Payroll extras model.
//!
//! [`PayrollExtras`] is the per-user sidecar of manual adjustments an admin
//! enters on top of the punched hours. A user without a stored row is
//! treated exactly as if they had [`PayrollExtras::empty`].

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Largest accepted days-worked override.
pub const MAX_DAYS_WORKED: u32 = 366;

/// Largest accepted manual hours override.
pub const MAX_MANUAL_HOURS: Decimal = Decimal::from_parts(10_000, 0, 0, false, 0);

/// Largest accepted money amount on an extras row.
pub const MAX_EXTRAS_AMOUNT: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

/// Manual payroll adjustments for one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayrollExtras {
    /// The user these adjustments belong to.
    pub user_id: String,
    /// Override for days worked; only applied when greater than zero.
    #[serde(default)]
    pub days_worked: u32,
    /// Incentive pay added to the total.
    #[serde(default)]
    pub incentives: Decimal,
    /// Cash advance deducted from the total.
    #[serde(default)]
    pub cash_advance: Decimal,
    /// Late/undertime deduction.
    #[serde(default)]
    pub late_undertime_deduction: Decimal,
    /// Transport allowance added to the total.
    #[serde(default)]
    pub transport_fee: Decimal,
    /// The "30%" deduction entered by the admin.
    #[serde(default)]
    pub thirty_percent: Decimal,
    /// Replaces the computed regular hours when present.
    #[serde(default)]
    pub manual_regular_hours: Option<Decimal>,
    /// Replaces the computed overtime hours when present.
    #[serde(default)]
    pub manual_overtime_hours: Option<Decimal>,
}

impl PayrollExtras {
    /// Returns the all-zero extras used when a user has no stored row.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::models::PayrollExtras;
    /// use rust_decimal::Decimal;
    ///
    /// let extras = PayrollExtras::empty("u-1");
    /// assert_eq!(extras.days_worked, 0);
    /// assert_eq!(extras.incentives, Decimal::ZERO);
    /// assert!(extras.manual_regular_hours.is_none());
    /// ```
    pub fn empty(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            days_worked: 0,
            incentives: Decimal::ZERO,
            cash_advance: Decimal::ZERO,
            late_undertime_deduction: Decimal::ZERO,
            transport_fee: Decimal::ZERO,
            thirty_percent: Decimal::ZERO,
            manual_regular_hours: None,
            manual_overtime_hours: None,
        }
    }

    /// Sum of the amounts added on top of earned pay.
    pub fn allowances(&self) -> Decimal {
        self.incentives.saturating_add(self.transport_fee)
    }

    /// Sum of the amounts taken off earned pay.
    pub fn deductions(&self) -> Decimal {
        self.cash_advance
            .saturating_add(self.late_undertime_deduction)
            .saturating_add(self.thirty_percent)
    }

    /// Rejects negative or out-of-range amounts, days and hour overrides.
    pub fn validate(&self) -> EngineResult<()> {
        if self.user_id.trim().is_empty() {
            return Err(invalid("userId", "must not be empty"));
        }
        if self.days_worked > MAX_DAYS_WORKED {
            return Err(invalid("daysWorked", "must be at most 366"));
        }

        let amounts = [
            ("incentives", self.incentives),
            ("cashAdvance", self.cash_advance),
            ("lateUndertimeDeduction", self.late_undertime_deduction),
            ("transportFee", self.transport_fee),
            ("thirtyPercent", self.thirty_percent),
        ];
        for (field, amount) in amounts {
            if amount < Decimal::ZERO {
                return Err(invalid(field, "must not be negative"));
            }
            if amount > MAX_EXTRAS_AMOUNT {
                return Err(invalid(field, "must be at most 1000000000"));
            }
        }

        let overrides = [
            ("manualRegularHours", self.manual_regular_hours),
            ("manualOvertimeHours", self.manual_overtime_hours),
        ];
        for (field, hours) in overrides {
            if hours.is_some_and(|h| h < Decimal::ZERO) {
                return Err(invalid(field, "must not be negative"));
            }
            if hours.is_some_and(|h| h > MAX_MANUAL_HOURS) {
                return Err(invalid(field, "must be at most 10000"));
            }
        }

        Ok(())
    }
}

fn invalid(field: &str, message: &str) -> EngineError {
    EngineError::InvalidExtras {
        field: field.to_string(),
        message: message.to_string(),
    }
}
