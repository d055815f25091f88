//! Payroll CSV export.

use std::io::Write;

use csv::Writer;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{EngineError, EngineResult};
use crate::models::PayrollEntry;

/// Column headers of the payroll export, in order.
pub const PAYROLL_CSV_HEADERS: [&str; 12] = [
    "Name",
    "Days",
    "Reg Hours",
    "OT Hours",
    "Reg Pay",
    "OT Pay",
    "Incentives",
    "Transport",
    "Cash Adv",
    "Late Ded",
    "30%",
    "Total Pay",
];

fn money(value: Decimal) -> String {
    format!(
        "{:.2}",
        value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    )
}

fn export_error(err: impl std::fmt::Display) -> EngineError {
    EngineError::ExportError {
        message: err.to_string(),
    }
}

/// Writes one CSV row per entry, preceded by the header row.
///
/// Hours and amounts are written with two decimal places; days as a whole
/// number.
pub fn write_payroll_csv<W: Write>(entries: &[PayrollEntry], writer: W) -> EngineResult<()> {
    let mut wtr = Writer::from_writer(writer);

    wtr.write_record(PAYROLL_CSV_HEADERS).map_err(export_error)?;

    for entry in entries {
        wtr.write_record(&[
            entry.user_name.clone(),
            entry.days_worked.to_string(),
            money(entry.total_regular_hours),
            money(entry.total_overtime_hours),
            money(entry.regular_pay),
            money(entry.overtime_pay),
            money(entry.incentives),
            money(entry.transport_fee),
            money(entry.cash_advance),
            money(entry.late_undertime_deduction),
            money(entry.thirty_percent),
            money(entry.total_pay),
        ])
        .map_err(export_error)?;
    }

    wtr.flush().map_err(export_error)?;
    Ok(())
}

/// Renders the payroll export into a string.
pub fn payroll_csv_string(entries: &[PayrollEntry]) -> EngineResult<String> {
    let mut buffer = Vec::new();
    write_payroll_csv(entries, &mut buffer)?;
    String::from_utf8(buffer).map_err(export_error)
}
