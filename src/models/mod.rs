//! Core data models for the payroll engine.
//!
//! This module contains all the domain models used throughout the engine.

mod payroll_entry;
mod payroll_extras;
mod payroll_report;
mod time_log;
mod user;

pub use payroll_entry::PayrollEntry;
pub use payroll_extras::{MAX_DAYS_WORKED, MAX_EXTRAS_AMOUNT, MAX_MANUAL_HOURS, PayrollExtras};
pub use payroll_report::{
    AdvisoryLevel, AttendanceAdvisory, AttendanceBreakdown, AttendanceCategory, AuditStep,
    AuditTrace, AuditWarning, PayrollReport, PayrollSummary, PayrollTotals,
};
pub use time_log::{ClockSlot, PunchKind, PunchPair, Segment, TimeLog};
pub use user::{MAX_RATE, PIN_LENGTH, Role, User};
