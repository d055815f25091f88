//! Payroll report models.
//!
//! This module contains the [`PayrollReport`] type and its associated structures
//! that capture everything a report request produces: the per-user entries,
//! organisation-wide totals, the attendance breakdown with its advisory, and
//! the audit trace of every rule that fired.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::PayrollEntry;

/// Organisation-wide money totals across all entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayrollTotals {
    /// Sum of every entry's net pay.
    pub total_payroll: Decimal,
    /// Sum of regular pay.
    pub total_regular_pay: Decimal,
    /// Sum of overtime pay.
    pub total_overtime_pay: Decimal,
    /// Sum of incentives and transport fees.
    pub total_allowances: Decimal,
    /// Sum of cash advances, late/undertime and 30% deductions.
    pub total_deductions: Decimal,
}

/// An attendance category used to pick the advisory message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AttendanceCategory {
    /// Days present.
    Present,
    /// Employees flagged late.
    Late,
    /// Estimated days absent.
    Absent,
    /// Days on leave.
    Leave,
}

/// Severity of the attendance advisory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AdvisoryLevel {
    /// Attendance looks good.
    Healthy,
    /// Lateness dominates.
    DisengagementWarning,
    /// Absence dominates.
    RiskWarning,
    /// Leave dominates.
    LeaveWarning,
}

/// Raw attendance counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceBreakdown {
    /// Sum of days worked across entries.
    pub present: u32,
    /// Number of entries carrying a late/undertime deduction.
    pub late: u32,
    /// Potential days minus present days, floored at zero.
    pub absent: u32,
    /// Always zero; leave is not tracked yet.
    pub leave: u32,
}

impl AttendanceBreakdown {
    /// Returns the count for a category.
    pub fn count(&self, category: AttendanceCategory) -> u32 {
        match category {
            AttendanceCategory::Present => self.present,
            AttendanceCategory::Late => self.late,
            AttendanceCategory::Absent => self.absent,
            AttendanceCategory::Leave => self.leave,
        }
    }
}

/// The advisory derived from the dominant attendance category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceAdvisory {
    /// The category with the greatest count.
    pub dominant: AttendanceCategory,
    /// Severity of the advisory.
    pub level: AdvisoryLevel,
    /// Human-readable guidance for the admin.
    pub message: String,
}

/// Totals plus attendance analytics for a set of entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayrollSummary {
    /// Money totals.
    pub totals: PayrollTotals,
    /// Attendance counts.
    pub attendance: AttendanceBreakdown,
    /// Advisory for the dominant category.
    pub advisory: AttendanceAdvisory,
}

/// A single step in the audit trace recording a derivation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The user the step concerns.
    pub user_id: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during derivation.
///
/// Warnings record anomalies that were resolved to safe defaults rather
/// than failing the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level ("low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for a derivation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditTrace {
    /// The sequence of derivation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during derivation.
    pub warnings: Vec<AuditWarning>,
    /// The total derivation duration in microseconds.
    pub duration_us: u64,
}

/// The complete payroll report returned to the request layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayrollReport {
    /// Unique identifier for this report.
    pub report_id: Uuid,
    /// When the report was generated.
    pub generated_at: DateTime<Utc>,
    /// Version of the engine that produced the report.
    pub engine_version: String,
    /// One entry per USER-role user.
    pub entries: Vec<PayrollEntry>,
    /// Totals and attendance analytics.
    pub summary: PayrollSummary,
    /// Every rule applied while deriving the entries.
    pub audit_trace: AuditTrace,
}
