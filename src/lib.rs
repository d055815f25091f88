//! Attendance clock and payroll derivation engine
//!
//! This crate records employee clock punches into per-day logs, enforces the
//! punch sequencing rules, and derives payroll entries, totals and attendance
//! analytics from those logs plus admin-entered extras.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod store;
pub mod telemetry;
