//! Time log model and clock slot types.
//!
//! A [`TimeLog`] holds one user's punches for one calendar day. The six
//! punch fields are grouped into three fixed [`PunchPair`] segments so the
//! in/out pairing is part of the type instead of being implied by field names.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A segment of the working day, each with its own in/out pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Segment {
    /// Morning session.
    Morning,
    /// Afternoon session.
    Afternoon,
    /// Overtime session after regular hours.
    Overtime,
}

/// Whether a punch opens or closes a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PunchKind {
    /// Clocking in.
    In,
    /// Clocking out.
    Out,
}

/// One of the six punch slots of a day log.
///
/// Serialized exactly as the wire slot identifiers:
/// `morningIn, morningOut, afternoonIn, afternoonOut, overtimeIn, overtimeOut`.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{ClockSlot, PunchKind, Segment};
///
/// let slot: ClockSlot = serde_json::from_str("\"afternoonOut\"").unwrap();
/// assert_eq!(slot, ClockSlot::AfternoonOut);
/// assert_eq!(slot.segment(), Segment::Afternoon);
/// assert_eq!(slot.kind(), PunchKind::Out);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ClockSlot {
    /// Start of the morning session.
    MorningIn,
    /// End of the morning session.
    MorningOut,
    /// Start of the afternoon session.
    AfternoonIn,
    /// End of the afternoon session (or of a continuous day).
    AfternoonOut,
    /// Start of overtime.
    OvertimeIn,
    /// End of overtime.
    OvertimeOut,
}

impl ClockSlot {
    /// All six slots in day order.
    pub const ALL: [ClockSlot; 6] = [
        ClockSlot::MorningIn,
        ClockSlot::MorningOut,
        ClockSlot::AfternoonIn,
        ClockSlot::AfternoonOut,
        ClockSlot::OvertimeIn,
        ClockSlot::OvertimeOut,
    ];

    /// Returns the segment this slot belongs to.
    pub fn segment(self) -> Segment {
        match self {
            ClockSlot::MorningIn | ClockSlot::MorningOut => Segment::Morning,
            ClockSlot::AfternoonIn | ClockSlot::AfternoonOut => Segment::Afternoon,
            ClockSlot::OvertimeIn | ClockSlot::OvertimeOut => Segment::Overtime,
        }
    }

    /// Returns whether this slot is an in-punch or an out-punch.
    pub fn kind(self) -> PunchKind {
        match self {
            ClockSlot::MorningIn | ClockSlot::AfternoonIn | ClockSlot::OvertimeIn => PunchKind::In,
            ClockSlot::MorningOut | ClockSlot::AfternoonOut | ClockSlot::OvertimeOut => {
                PunchKind::Out
            }
        }
    }

    /// Returns the wire identifier of the slot.
    pub fn as_str(self) -> &'static str {
        match self {
            ClockSlot::MorningIn => "morningIn",
            ClockSlot::MorningOut => "morningOut",
            ClockSlot::AfternoonIn => "afternoonIn",
            ClockSlot::AfternoonOut => "afternoonOut",
            ClockSlot::OvertimeIn => "overtimeIn",
            ClockSlot::OvertimeOut => "overtimeOut",
        }
    }
}

impl fmt::Display for ClockSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The in/out instants of one segment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PunchPair {
    /// When the segment was opened.
    pub clock_in: Option<DateTime<Utc>>,
    /// When the segment was closed.
    pub clock_out: Option<DateTime<Utc>>,
}

impl PunchPair {
    /// Returns the instant recorded for the given side of the pair.
    pub fn get(&self, kind: PunchKind) -> Option<DateTime<Utc>> {
        match kind {
            PunchKind::In => self.clock_in,
            PunchKind::Out => self.clock_out,
        }
    }

    fn slot_mut(&mut self, kind: PunchKind) -> &mut Option<DateTime<Utc>> {
        match kind {
            PunchKind::In => &mut self.clock_in,
            PunchKind::Out => &mut self.clock_out,
        }
    }
}

/// One user's punches for one calendar day.
///
/// Identity is the `(user_id, date)` pair; `id` is an opaque storage key.
/// On the wire the segments are flattened into the six camelCase slot fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "TimeLogRecord", into = "TimeLogRecord")]
pub struct TimeLog {
    /// Opaque unique identifier.
    pub id: String,
    /// The user this log belongs to.
    pub user_id: String,
    /// The calendar day of the log.
    pub date: NaiveDate,
    /// Morning in/out.
    pub morning: PunchPair,
    /// Afternoon in/out.
    pub afternoon: PunchPair,
    /// Overtime in/out.
    pub overtime: PunchPair,
}

impl TimeLog {
    /// Creates an empty log for a user and day with a fresh identifier.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::models::{ClockSlot, TimeLog};
    /// use chrono::NaiveDate;
    ///
    /// let log = TimeLog::open("u-1", NaiveDate::from_ymd_opt(2026, 3, 2).unwrap());
    /// assert!(ClockSlot::ALL.iter().all(|slot| log.get(*slot).is_none()));
    /// ```
    pub fn open(user_id: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.into(),
            date,
            morning: PunchPair::default(),
            afternoon: PunchPair::default(),
            overtime: PunchPair::default(),
        }
    }

    /// Returns the pair for a segment.
    pub fn segment(&self, segment: Segment) -> &PunchPair {
        match segment {
            Segment::Morning => &self.morning,
            Segment::Afternoon => &self.afternoon,
            Segment::Overtime => &self.overtime,
        }
    }

    fn segment_mut(&mut self, segment: Segment) -> &mut PunchPair {
        match segment {
            Segment::Morning => &mut self.morning,
            Segment::Afternoon => &mut self.afternoon,
            Segment::Overtime => &mut self.overtime,
        }
    }

    /// Returns the instant recorded in a slot, if any.
    pub fn get(&self, slot: ClockSlot) -> Option<DateTime<Utc>> {
        self.segment(slot.segment()).get(slot.kind())
    }

    /// Returns true if the slot holds an instant.
    pub fn is_recorded(&self, slot: ClockSlot) -> bool {
        self.get(slot).is_some()
    }

    /// Writes an instant into a slot, overwriting whatever was there.
    ///
    /// Write-once semantics are enforced by the clock engine, not here.
    pub(crate) fn stamp(&mut self, slot: ClockSlot, at: DateTime<Utc>) {
        *self.segment_mut(slot.segment()).slot_mut(slot.kind()) = Some(at);
    }

    /// Returns true if any in-punch was recorded on this day.
    pub fn has_clock_in(&self) -> bool {
        self.morning.clock_in.is_some()
            || self.afternoon.clock_in.is_some()
            || self.overtime.clock_in.is_some()
    }

    /// Returns true if the day was punched only at morning-in and afternoon-out.
    ///
    /// This is the continuous-day pattern where the lunch break was never punched.
    pub fn is_continuous_day(&self) -> bool {
        self.morning.clock_in.is_some()
            && self.afternoon.clock_out.is_some()
            && self.morning.clock_out.is_none()
            && self.afternoon.clock_in.is_none()
    }
}

/// Flat wire representation of a [`TimeLog`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TimeLogRecord {
    id: String,
    user_id: String,
    date: NaiveDate,
    #[serde(default)]
    morning_in: Option<DateTime<Utc>>,
    #[serde(default)]
    morning_out: Option<DateTime<Utc>>,
    #[serde(default)]
    afternoon_in: Option<DateTime<Utc>>,
    #[serde(default)]
    afternoon_out: Option<DateTime<Utc>>,
    #[serde(default)]
    overtime_in: Option<DateTime<Utc>>,
    #[serde(default)]
    overtime_out: Option<DateTime<Utc>>,
}

impl From<TimeLogRecord> for TimeLog {
    fn from(record: TimeLogRecord) -> Self {
        TimeLog {
            id: record.id,
            user_id: record.user_id,
            date: record.date,
            morning: PunchPair {
                clock_in: record.morning_in,
                clock_out: record.morning_out,
            },
            afternoon: PunchPair {
                clock_in: record.afternoon_in,
                clock_out: record.afternoon_out,
            },
            overtime: PunchPair {
                clock_in: record.overtime_in,
                clock_out: record.overtime_out,
            },
        }
    }
}

impl From<TimeLog> for TimeLogRecord {
    fn from(log: TimeLog) -> Self {
        TimeLogRecord {
            id: log.id,
            user_id: log.user_id,
            date: log.date,
            morning_in: log.morning.clock_in,
            morning_out: log.morning.clock_out,
            afternoon_in: log.afternoon.clock_in,
            afternoon_out: log.afternoon.clock_out,
            overtime_in: log.overtime.clock_in,
            overtime_out: log.overtime.clock_out,
        }
    }
}
