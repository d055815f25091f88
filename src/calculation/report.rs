//! Report aggregation.
//!
//! This module sums payroll entries into organisation-wide totals, builds the
//! attendance breakdown and picks the advisory for the dominant category.

use std::time::Instant;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::models::{
    AdvisoryLevel, AttendanceAdvisory, AttendanceBreakdown, AttendanceCategory, AuditTrace,
    PayrollEntry, PayrollExtras, PayrollReport, PayrollSummary, PayrollTotals, TimeLog, User,
};

use super::payroll::derive_payroll;

/// Categories in tie-break order. On equal counts the earlier one wins.
const CATEGORY_ORDER: [AttendanceCategory; 4] = [
    AttendanceCategory::Present,
    AttendanceCategory::Late,
    AttendanceCategory::Absent,
    AttendanceCategory::Leave,
];

/// Sums money totals across entries. Sums cap at the decimal range.
pub fn payroll_totals(entries: &[PayrollEntry]) -> PayrollTotals {
    entries
        .iter()
        .fold(PayrollTotals::default(), |mut totals, entry| {
            totals.total_payroll = totals.total_payroll.saturating_add(entry.total_pay);
            totals.total_regular_pay = totals.total_regular_pay.saturating_add(entry.regular_pay);
            totals.total_overtime_pay = totals.total_overtime_pay.saturating_add(entry.overtime_pay);
            totals.total_allowances = totals.total_allowances.saturating_add(entry.allowances());
            totals.total_deductions = totals.total_deductions.saturating_add(entry.deductions());
            totals
        })
}

/// Builds the attendance counts for a set of entries.
///
/// `late` counts entries carrying any late/undertime deduction, one per
/// employee regardless of how many days they were late. `absent` compares
/// the total days worked against every employee having worked as many days
/// as the busiest one. Counts are accumulated in `u64` and capped at
/// `u32::MAX`.
///
/// With no entries every count is zero, so the advisory is healthy. A
/// headcount floor of one would instead report one absence for an empty
/// workforce; the potential days here follow the actual entry count.
pub fn attendance_breakdown(entries: &[PayrollEntry]) -> AttendanceBreakdown {
    let present: u64 = entries.iter().map(|e| u64::from(e.days_worked)).sum();
    let late = entries
        .iter()
        .filter(|e| e.late_undertime_deduction > Decimal::ZERO)
        .count() as u64;

    let max_days = entries
        .iter()
        .map(|e| u64::from(e.days_worked))
        .max()
        .unwrap_or(0)
        .max(1);
    let potential_days = max_days.saturating_mul(entries.len() as u64);

    AttendanceBreakdown {
        present: cap_count(present),
        late: cap_count(late),
        absent: cap_count(potential_days.saturating_sub(present)),
        leave: 0,
    }
}

fn cap_count(count: u64) -> u32 {
    u32::try_from(count).unwrap_or(u32::MAX)
}

/// Returns the category with the greatest count.
pub fn dominant_category(breakdown: &AttendanceBreakdown) -> AttendanceCategory {
    let mut dominant = CATEGORY_ORDER[0];
    for category in CATEGORY_ORDER.into_iter().skip(1) {
        if breakdown.count(category) > breakdown.count(dominant) {
            dominant = category;
        }
    }
    dominant
}

/// Maps a dominant category to its fixed advisory.
pub fn advisory_for(category: AttendanceCategory) -> AttendanceAdvisory {
    let (level, message) = match category {
        AttendanceCategory::Present => (
            AdvisoryLevel::Healthy,
            "Yey your company is enjoying! Feel safe. Keep it up!",
        ),
        AttendanceCategory::Late => (
            AdvisoryLevel::DisengagementWarning,
            "Your employees seems not interested, better to consult them and give them awareness.",
        ),
        AttendanceCategory::Absent => (
            AdvisoryLevel::RiskWarning,
            "Your company is at risk, make a total meeting and consult each of them to prevent loses.",
        ),
        AttendanceCategory::Leave => (
            AdvisoryLevel::LeaveWarning,
            "Your employees seems have problems, better consult them for better understanding.",
        ),
    };

    AttendanceAdvisory {
        dominant: category,
        level,
        message: message.to_string(),
    }
}

/// Summarizes entries into totals, attendance and an advisory.
pub fn summarize_payroll(entries: &[PayrollEntry]) -> PayrollSummary {
    let attendance = attendance_breakdown(entries);
    PayrollSummary {
        totals: payroll_totals(entries),
        attendance,
        advisory: advisory_for(dominant_category(&attendance)),
    }
}

/// Derives and summarizes a full payroll report from a store snapshot.
pub fn generate_report(
    users: &[User],
    logs: &[TimeLog],
    extras: &[PayrollExtras],
    generated_at: DateTime<Utc>,
) -> PayrollReport {
    let start_time = Instant::now();

    let derivation = derive_payroll(users, logs, extras);
    let summary = summarize_payroll(&derivation.entries);

    let duration_us = start_time.elapsed().as_micros() as u64;

    PayrollReport {
        report_id: Uuid::new_v4(),
        generated_at,
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        entries: derivation.entries,
        summary,
        audit_trace: AuditTrace {
            steps: derivation.audit_steps,
            warnings: derivation.warnings,
            duration_us,
        },
    }
}
