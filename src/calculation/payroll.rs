//! Payroll derivation.
//!
//! This module turns each USER-role user's day logs and manual extras into a
//! [`PayrollEntry`]. Every rule that fires is recorded as an [`AuditStep`];
//! incomplete data (missing extras, logs for unknown users, negative net pay)
//! is resolved to safe defaults and recorded as an [`AuditWarning`] instead of
//! failing the derivation.

use std::collections::{BTreeSet, HashMap, HashSet};

use rust_decimal::Decimal;

use crate::models::{
    AuditStep, AuditWarning, PayrollEntry, PayrollExtras, Role, TimeLog, User,
};

use super::hours::hours_between;

/// Flat break assumed for a day punched only at morning-in and afternoon-out.
pub const AUTO_BREAK_HOURS: Decimal = Decimal::ONE;

/// Regular hours credited for one day log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayHours {
    /// Regular hours for the day, after any auto-break deduction.
    pub regular: Decimal,
    /// Overtime hours for the day.
    pub overtime: Decimal,
    /// True if the continuous-day auto-break rule produced the regular hours.
    pub auto_break_applied: bool,
}

/// Computes the hours a single day log contributes.
///
/// Regular hours are the morning pair plus the afternoon pair. A day punched
/// only at morning-in and afternoon-out instead earns the whole span minus
/// [`AUTO_BREAK_HOURS`], floored at zero. The two patterns cannot both match
/// one log because the auto-break case requires both break punches unset.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::day_hours;
/// use payroll_engine::models::TimeLog;
/// use chrono::{NaiveDate, TimeZone, Utc};
/// use rust_decimal::Decimal;
///
/// let mut log = TimeLog::open("u-1", NaiveDate::from_ymd_opt(2026, 3, 2).unwrap());
/// log.morning.clock_in = Some(Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap());
/// log.afternoon.clock_out = Some(Utc.with_ymd_and_hms(2026, 3, 2, 17, 0, 0).unwrap());
///
/// let hours = day_hours(&log);
/// assert_eq!(hours.regular, Decimal::new(7, 0));
/// assert!(hours.auto_break_applied);
/// ```
pub fn day_hours(log: &TimeLog) -> DayHours {
    let mut regular = hours_between(log.morning.clock_in, log.morning.clock_out)
        + hours_between(log.afternoon.clock_in, log.afternoon.clock_out);

    let auto_break_applied = log.is_continuous_day();
    if auto_break_applied {
        let span = hours_between(log.morning.clock_in, log.afternoon.clock_out);
        regular += (span - AUTO_BREAK_HOURS).max(Decimal::ZERO);
    }

    DayHours {
        regular,
        overtime: hours_between(log.overtime.clock_in, log.overtime.clock_out),
        auto_break_applied,
    }
}

/// The result of deriving one user's payroll entry.
#[derive(Debug, Clone)]
pub struct UserPayrollResult {
    /// The derived entry.
    pub entry: PayrollEntry,
    /// The audit steps recording the derivation, in order.
    pub audit_steps: Vec<AuditStep>,
    /// Anomalies that were resolved to defaults.
    pub warnings: Vec<AuditWarning>,
}

/// Derives one user's payroll entry from their day logs and extras.
///
/// `logs` must already be filtered to this user. A missing `extras` row is
/// treated as all zeros with no overrides. Manual hour overrides replace the
/// computed hours outright, and the days-worked override applies only when it
/// is greater than zero. Net pay is not floored at zero.
pub fn derive_user_payroll(
    user: &User,
    logs: &[&TimeLog],
    extras: Option<&PayrollExtras>,
    start_step_number: u32,
) -> UserPayrollResult {
    let mut audit_steps = Vec::new();
    let mut warnings = Vec::new();
    let mut step_number = start_step_number;

    let extras = match extras {
        Some(extras) => extras.clone(),
        None => {
            warnings.push(AuditWarning {
                code: "MISSING_EXTRAS".to_string(),
                message: format!(
                    "No payroll extras stored for user '{}'; using zero adjustments",
                    user.id
                ),
                severity: "low".to_string(),
            });
            PayrollExtras::empty(user.id.clone())
        }
    };

    // Step 1: accumulate punched hours across every day
    let mut computed_regular = Decimal::ZERO;
    let mut computed_overtime = Decimal::ZERO;
    let mut days = BTreeSet::new();
    let mut auto_break_dates = Vec::new();

    for log in logs {
        let hours = day_hours(log);
        computed_regular += hours.regular;
        computed_overtime += hours.overtime;
        if hours.auto_break_applied {
            auto_break_dates.push(log.date.to_string());
        }
        if log.has_clock_in() {
            days.insert(log.date);
        }
    }
    let computed_days = days.len() as u32;

    audit_steps.push(AuditStep {
        step_number,
        rule_id: "hours_accumulation".to_string(),
        rule_name: "Punched Hours Accumulation".to_string(),
        user_id: user.id.clone(),
        input: serde_json::json!({
            "log_count": logs.len(),
        }),
        output: serde_json::json!({
            "regular_hours": computed_regular.normalize().to_string(),
            "overtime_hours": computed_overtime.normalize().to_string(),
            "days_with_punches": computed_days,
            "auto_break_dates": auto_break_dates,
        }),
        reasoning: format!(
            "Summed {} day log(s): {} regular hours, {} overtime hours over {} distinct day(s); \
             {} continuous day(s) had a {} hour break deducted",
            logs.len(),
            computed_regular.normalize(),
            computed_overtime.normalize(),
            computed_days,
            auto_break_dates.len(),
            AUTO_BREAK_HOURS
        ),
    });
    step_number += 1;

    // Step 2: manual hour overrides win outright
    let regular_hours = extras.manual_regular_hours.unwrap_or(computed_regular);
    let overtime_hours = extras.manual_overtime_hours.unwrap_or(computed_overtime);

    if extras.manual_regular_hours.is_some() || extras.manual_overtime_hours.is_some() {
        audit_steps.push(AuditStep {
            step_number,
            rule_id: "manual_hours_override".to_string(),
            rule_name: "Manual Hours Override".to_string(),
            user_id: user.id.clone(),
            input: serde_json::json!({
                "computed_regular_hours": computed_regular.normalize().to_string(),
                "computed_overtime_hours": computed_overtime.normalize().to_string(),
                "manual_regular_hours": extras.manual_regular_hours.map(|h| h.normalize().to_string()),
                "manual_overtime_hours": extras.manual_overtime_hours.map(|h| h.normalize().to_string()),
            }),
            output: serde_json::json!({
                "regular_hours": regular_hours.normalize().to_string(),
                "overtime_hours": overtime_hours.normalize().to_string(),
            }),
            reasoning: "Manual hours replace the punched totals where set".to_string(),
        });
        step_number += 1;
    }

    // Step 3: days worked
    let days_worked = if extras.days_worked > 0 {
        extras.days_worked
    } else {
        computed_days
    };

    audit_steps.push(AuditStep {
        step_number,
        rule_id: "days_worked_resolution".to_string(),
        rule_name: "Days Worked Resolution".to_string(),
        user_id: user.id.clone(),
        input: serde_json::json!({
            "computed_days": computed_days,
            "override_days": extras.days_worked,
        }),
        output: serde_json::json!({
            "days_worked": days_worked,
        }),
        reasoning: if extras.days_worked > 0 {
            format!("Override of {} day(s) applied", extras.days_worked)
        } else {
            format!("No override; {} distinct punched day(s) used", computed_days)
        },
    });
    step_number += 1;

    // Step 4: pay
    let pay = match checked_pay(user, regular_hours, overtime_hours, &extras) {
        Some(pay) => pay,
        None => {
            warnings.push(AuditWarning {
                code: "PAY_OVERFLOW".to_string(),
                message: format!(
                    "Pay for user '{}' exceeds the representable range; amounts were capped",
                    user.id
                ),
                severity: "high".to_string(),
            });
            saturating_pay(user, regular_hours, overtime_hours, &extras)
        }
    };
    let Pay {
        regular_pay,
        overtime_pay,
        total_pay,
    } = pay;

    audit_steps.push(AuditStep {
        step_number,
        rule_id: "net_pay_calculation".to_string(),
        rule_name: "Net Pay Calculation".to_string(),
        user_id: user.id.clone(),
        input: serde_json::json!({
            "regular_hours": regular_hours.normalize().to_string(),
            "hourly_rate": user.hourly_rate.normalize().to_string(),
            "overtime_hours": overtime_hours.normalize().to_string(),
            "overtime_rate": user.overtime_rate.normalize().to_string(),
            "allowances": extras.allowances().normalize().to_string(),
            "deductions": extras.deductions().normalize().to_string(),
        }),
        output: serde_json::json!({
            "regular_pay": regular_pay.normalize().to_string(),
            "overtime_pay": overtime_pay.normalize().to_string(),
            "total_pay": total_pay.normalize().to_string(),
        }),
        reasoning: format!(
            "({} + {} + {}) - {} = {}",
            regular_pay.normalize(),
            overtime_pay.normalize(),
            extras.allowances().normalize(),
            extras.deductions().normalize(),
            total_pay.normalize()
        ),
    });

    if total_pay < Decimal::ZERO {
        warnings.push(AuditWarning {
            code: "NEGATIVE_NET_PAY".to_string(),
            message: format!(
                "Deductions exceed earnings for user '{}' (net {})",
                user.id,
                total_pay.normalize()
            ),
            severity: "medium".to_string(),
        });
    }

    let entry = PayrollEntry {
        user_id: user.id.clone(),
        user_name: user.name.clone(),
        email: user.email.clone(),
        total_regular_hours: regular_hours,
        total_overtime_hours: overtime_hours,
        regular_pay,
        overtime_pay,
        days_worked,
        incentives: extras.incentives,
        cash_advance: extras.cash_advance,
        late_undertime_deduction: extras.late_undertime_deduction,
        transport_fee: extras.transport_fee,
        thirty_percent: extras.thirty_percent,
        total_pay,
    };

    UserPayrollResult {
        entry,
        audit_steps,
        warnings,
    }
}

struct Pay {
    regular_pay: Decimal,
    overtime_pay: Decimal,
    total_pay: Decimal,
}

fn checked_pay(
    user: &User,
    regular_hours: Decimal,
    overtime_hours: Decimal,
    extras: &PayrollExtras,
) -> Option<Pay> {
    let regular_pay = regular_hours.checked_mul(user.hourly_rate)?;
    let overtime_pay = overtime_hours.checked_mul(user.overtime_rate)?;
    let total_pay = regular_pay
        .checked_add(overtime_pay)?
        .checked_add(extras.allowances())?
        .checked_sub(extras.deductions())?;
    Some(Pay {
        regular_pay,
        overtime_pay,
        total_pay,
    })
}

fn saturating_pay(
    user: &User,
    regular_hours: Decimal,
    overtime_hours: Decimal,
    extras: &PayrollExtras,
) -> Pay {
    let regular_pay = regular_hours.saturating_mul(user.hourly_rate);
    let overtime_pay = overtime_hours.saturating_mul(user.overtime_rate);
    let total_pay = regular_pay
        .saturating_add(overtime_pay)
        .saturating_add(extras.allowances())
        .saturating_sub(extras.deductions());
    Pay {
        regular_pay,
        overtime_pay,
        total_pay,
    }
}

/// The entries for every payable user plus the combined audit record.
#[derive(Debug, Clone, Default)]
pub struct PayrollDerivation {
    /// One entry per USER-role user, in input order.
    pub entries: Vec<PayrollEntry>,
    /// All audit steps, numbered sequentially across users.
    pub audit_steps: Vec<AuditStep>,
    /// All warnings.
    pub warnings: Vec<AuditWarning>,
}

/// Derives payroll entries for every USER-role user.
///
/// Admins are excluded. Logs are matched to users by `user_id`; logs that
/// belong to no known user are ignored and reported as a warning. The
/// derivation is pure and can be re-run on the same snapshot with the same
/// result.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::derive_payroll;
/// use payroll_engine::models::{Role, User};
/// use chrono::Utc;
/// use rust_decimal::Decimal;
///
/// let admin = User {
///     id: "admin-1".to_string(),
///     name: "System Admin".to_string(),
///     email: "admin@admin.com".to_string(),
///     password: None,
///     pin: "0000".to_string(),
///     birthday: None,
///     role: Role::Admin,
///     hourly_rate: Decimal::ZERO,
///     overtime_rate: Decimal::ZERO,
///     created_at: Utc::now(),
/// };
///
/// let derivation = derive_payroll(&[admin], &[], &[]);
/// assert!(derivation.entries.is_empty());
/// ```
pub fn derive_payroll(
    users: &[User],
    logs: &[TimeLog],
    extras: &[PayrollExtras],
) -> PayrollDerivation {
    let mut logs_by_user: HashMap<&str, Vec<&TimeLog>> = HashMap::new();
    for log in logs {
        logs_by_user.entry(log.user_id.as_str()).or_default().push(log);
    }

    let extras_by_user: HashMap<&str, &PayrollExtras> = extras
        .iter()
        .map(|row| (row.user_id.as_str(), row))
        .collect();

    let mut derivation = PayrollDerivation::default();
    let mut step_number: u32 = 1;

    for user in users.iter().filter(|u| u.role == Role::User) {
        let user_logs = logs_by_user
            .get(user.id.as_str())
            .map(Vec::as_slice)
            .unwrap_or(&[]);

        let result = derive_user_payroll(
            user,
            user_logs,
            extras_by_user.get(user.id.as_str()).copied(),
            step_number,
        );

        step_number += result.audit_steps.len() as u32;
        derivation.entries.push(result.entry);
        derivation.audit_steps.extend(result.audit_steps);
        derivation.warnings.extend(result.warnings);
    }

    let known: HashSet<&str> = users.iter().map(|u| u.id.as_str()).collect();
    let orphan_count: usize = logs_by_user
        .iter()
        .filter(|(user_id, _)| !known.contains(*user_id))
        .map(|(_, logs)| logs.len())
        .sum();
    if orphan_count > 0 {
        derivation.warnings.push(AuditWarning {
            code: "ORPHAN_LOGS".to_string(),
            message: format!("{} day log(s) belong to no known user and were ignored", orphan_count),
            severity: "low".to_string(),
        });
    }

    derivation
}
