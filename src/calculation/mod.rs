//! Calculation logic for the payroll engine.
//!
//! This module contains the pure core: elapsed-hours arithmetic, the clock
//! slot sequencing rules, payroll derivation from day logs and extras, report
//! aggregation with attendance analytics, the thirty-percent suggestion, and
//! the CSV export of derived entries.

mod clock;
mod export;
mod hours;
mod payroll;
mod report;
mod thirty_percent;

pub use clock::{ClockResult, SequenceRule, apply_clock};
pub use export::{PAYROLL_CSV_HEADERS, payroll_csv_string, write_payroll_csv};
pub use hours::hours_between;
pub use payroll::{
    AUTO_BREAK_HOURS, DayHours, PayrollDerivation, UserPayrollResult, day_hours, derive_payroll,
    derive_user_payroll,
};
pub use report::{
    advisory_for, attendance_breakdown, dominant_category, generate_report, payroll_totals,
    summarize_payroll,
};
pub use thirty_percent::{THIRTY_PERCENT_RATE, ThirtyPercentResult, suggest_thirty_percent};
