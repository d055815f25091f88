//! Thirty-percent deduction suggestion.
//!
//! The suggestion is advisory: it is shown to the admin while editing extras
//! and only takes effect once they save it as the `thirtyPercent` amount.

use rust_decimal::Decimal;

use crate::models::{AuditStep, PayrollExtras, User};

/// Share of gross earnings suggested for the thirty-percent deduction.
pub const THIRTY_PERCENT_RATE: Decimal = Decimal::from_parts(30, 0, 0, false, 2);

/// Result of a thirty-percent suggestion.
#[derive(Debug, Clone)]
pub struct ThirtyPercentResult {
    /// Manual-hours pay plus incentives and transport.
    pub base_amount: Decimal,
    /// The suggested deduction, rounded down to a whole amount.
    pub suggested: Decimal,
    /// The audit step recording the suggestion.
    pub audit_step: AuditStep,
}

/// Suggests a thirty-percent deduction from the manual hours and allowances.
///
/// Only the manual hour overrides are used; punched hours are not consulted.
/// Unset overrides count as zero. Amounts cap at the decimal range.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::suggest_thirty_percent;
/// use payroll_engine::models::{PayrollExtras, Role, User};
/// use chrono::Utc;
/// use rust_decimal::Decimal;
///
/// let user = User {
///     id: "u-1".to_string(),
///     name: "Ana Cruz".to_string(),
///     email: String::new(),
///     password: None,
///     pin: "1234".to_string(),
///     birthday: None,
///     role: Role::User,
///     hourly_rate: Decimal::new(65, 0),
///     overtime_rate: Decimal::new(80, 0),
///     created_at: Utc::now(),
/// };
/// let extras = PayrollExtras {
///     manual_regular_hours: Some(Decimal::new(40, 0)),
///     incentives: Decimal::new(15, 0),
///     ..PayrollExtras::empty("u-1")
/// };
///
/// // floor(0.30 * (40 * 65 + 15)) = floor(784.5)
/// assert_eq!(suggest_thirty_percent(&user, &extras).suggested, Decimal::new(784, 0));
/// ```
pub fn suggest_thirty_percent(user: &User, extras: &PayrollExtras) -> ThirtyPercentResult {
    let regular_hours = extras.manual_regular_hours.unwrap_or(Decimal::ZERO);
    let overtime_hours = extras.manual_overtime_hours.unwrap_or(Decimal::ZERO);

    let base_amount = regular_hours
        .saturating_mul(user.hourly_rate)
        .saturating_add(overtime_hours.saturating_mul(user.overtime_rate))
        .saturating_add(extras.allowances());
    let suggested = base_amount.saturating_mul(THIRTY_PERCENT_RATE).floor();

    let audit_step = AuditStep {
        step_number: 1,
        rule_id: "thirty_percent_suggestion".to_string(),
        rule_name: "Thirty Percent Suggestion".to_string(),
        user_id: user.id.clone(),
        input: serde_json::json!({
            "manual_regular_hours": regular_hours.normalize().to_string(),
            "manual_overtime_hours": overtime_hours.normalize().to_string(),
            "hourly_rate": user.hourly_rate.normalize().to_string(),
            "overtime_rate": user.overtime_rate.normalize().to_string(),
            "allowances": extras.allowances().normalize().to_string(),
        }),
        output: serde_json::json!({
            "base_amount": base_amount.normalize().to_string(),
            "suggested": suggested.normalize().to_string(),
        }),
        reasoning: format!(
            "floor({} x {}) = {}",
            base_amount.normalize(),
            THIRTY_PERCENT_RATE,
            suggested.normalize()
        ),
    };

    ThirtyPercentResult {
        base_amount,
        suggested,
        audit_step,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;
    use chrono::Utc;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_test_user() -> User {
        User {
            id: "u-1".to_string(),
            name: "Test".to_string(),
            email: String::new(),
            password: None,
            pin: "1234".to_string(),
            birthday: None,
            role: Role::User,
            hourly_rate: dec("100"),
            overtime_rate: dec("150"),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_rate_constant() {
        assert_eq!(THIRTY_PERCENT_RATE, dec("0.30"));
    }

    #[test]
    fn test_suggestion_uses_manual_hours_and_allowances() {
        let extras = PayrollExtras {
            manual_regular_hours: Some(dec("10")),
            manual_overtime_hours: Some(dec("2")),
            incentives: dec("50"),
            transport_fee: dec("50"),
            ..PayrollExtras::empty("u-1")
        };

        let result = suggest_thirty_percent(&create_test_user(), &extras);
        assert_eq!(result.base_amount, dec("1400"));
        assert_eq!(result.suggested, dec("420"));
    }

    #[test]
    fn test_suggestion_rounds_down() {
        let extras = PayrollExtras {
            incentives: dec("33.33"),
            ..PayrollExtras::empty("u-1")
        };
        assert_eq!(
            suggest_thirty_percent(&create_test_user(), &extras).suggested,
            dec("9")
        );
    }

    #[test]
    fn test_deductions_do_not_reduce_the_base() {
        let extras = PayrollExtras {
            manual_regular_hours: Some(dec("1")),
            cash_advance: dec("1000"),
            late_undertime_deduction: dec("50"),
            ..PayrollExtras::empty("u-1")
        };
        assert_eq!(
            suggest_thirty_percent(&create_test_user(), &extras).suggested,
            dec("30")
        );
    }

    #[test]
    fn test_no_manual_hours_and_no_allowances_is_zero() {
        let result = suggest_thirty_percent(&create_test_user(), &PayrollExtras::empty("u-1"));
        assert_eq!(result.suggested, Decimal::ZERO);
        assert_eq!(result.audit_step.rule_id, "thirty_percent_suggestion");
    }
}
