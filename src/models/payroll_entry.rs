//! Payroll entry model.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One user's derived payroll line.
///
/// Entries are recomputed on every report request and never persisted.
///
/// # Example
///
/// ```
/// use payroll_engine::models::PayrollEntry;
/// use rust_decimal::Decimal;
///
/// let entry = PayrollEntry {
///     user_id: "u-1".to_string(),
///     user_name: "Ana Cruz".to_string(),
///     email: "ana@example.com".to_string(),
///     total_regular_hours: Decimal::new(7, 0),
///     total_overtime_hours: Decimal::ZERO,
///     regular_pay: Decimal::new(700, 0),
///     overtime_pay: Decimal::ZERO,
///     days_worked: 1,
///     incentives: Decimal::ZERO,
///     cash_advance: Decimal::ZERO,
///     late_undertime_deduction: Decimal::ZERO,
///     transport_fee: Decimal::new(50, 0),
///     thirty_percent: Decimal::ZERO,
///     total_pay: Decimal::new(750, 0),
/// };
/// assert_eq!(entry.allowances(), Decimal::new(50, 0));
/// assert_eq!(entry.deductions(), Decimal::ZERO);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayrollEntry {
    /// The user this entry is for.
    pub user_id: String,
    /// The user's display name.
    pub user_name: String,
    /// The user's email.
    pub email: String,
    /// Regular hours after manual overrides.
    pub total_regular_hours: Decimal,
    /// Overtime hours after manual overrides.
    pub total_overtime_hours: Decimal,
    /// Regular hours times the hourly rate.
    pub regular_pay: Decimal,
    /// Overtime hours times the overtime rate.
    pub overtime_pay: Decimal,
    /// Days worked after the manual override.
    pub days_worked: u32,
    /// Incentive pay.
    pub incentives: Decimal,
    /// Cash advance deducted.
    pub cash_advance: Decimal,
    /// Late/undertime deduction.
    pub late_undertime_deduction: Decimal,
    /// Transport allowance.
    pub transport_fee: Decimal,
    /// The "30%" deduction.
    pub thirty_percent: Decimal,
    /// Net pay. May be negative when deductions exceed earnings.
    pub total_pay: Decimal,
}

impl PayrollEntry {
    /// Incentives plus transport fee.
    pub fn allowances(&self) -> Decimal {
        self.incentives.saturating_add(self.transport_fee)
    }

    /// Cash advance plus late/undertime plus the 30% deduction.
    pub fn deductions(&self) -> Decimal {
        self.cash_advance
            .saturating_add(self.late_undertime_deduction)
            .saturating_add(self.thirty_percent)
    }
}
