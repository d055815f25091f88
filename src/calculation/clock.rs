//! Clock engine.
//!
//! This module validates a single punch against a day's [`TimeLog`] and
//! stamps it. Sequencing is driven by a fixed table of [`SequenceRule`]s,
//! one per [`ClockSlot`], so no rule depends on how slots are named.

use chrono::{DateTime, Utc};

use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, ClockSlot, TimeLog};

/// What must already be recorded before a slot may be punched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceRule {
    /// No predecessor; in-punches are always allowed.
    Open,
    /// The given slot must already be recorded.
    After(ClockSlot),
    /// At least one of the given slots must already be recorded.
    AfterAnyOf(&'static [ClockSlot]),
}

/// Afternoon-out closes either a formal afternoon session or a continuous
/// day that started at morning-in with no break punches.
const AFTERNOON_OUT_PREDECESSORS: &[ClockSlot] = &[ClockSlot::MorningIn, ClockSlot::AfternoonIn];

impl SequenceRule {
    /// Returns the rule for a slot.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::calculation::SequenceRule;
    /// use payroll_engine::models::ClockSlot;
    ///
    /// assert_eq!(SequenceRule::for_slot(ClockSlot::MorningIn), SequenceRule::Open);
    /// assert_eq!(
    ///     SequenceRule::for_slot(ClockSlot::OvertimeOut),
    ///     SequenceRule::After(ClockSlot::OvertimeIn)
    /// );
    /// ```
    pub fn for_slot(slot: ClockSlot) -> SequenceRule {
        match slot {
            ClockSlot::MorningIn => SequenceRule::Open,
            ClockSlot::MorningOut => SequenceRule::After(ClockSlot::MorningIn),
            ClockSlot::AfternoonIn => SequenceRule::Open,
            ClockSlot::AfternoonOut => SequenceRule::AfterAnyOf(AFTERNOON_OUT_PREDECESSORS),
            ClockSlot::OvertimeIn => SequenceRule::Open,
            ClockSlot::OvertimeOut => SequenceRule::After(ClockSlot::OvertimeIn),
        }
    }

    /// Returns true if the log satisfies this rule.
    pub fn is_satisfied(&self, log: &TimeLog) -> bool {
        match self {
            SequenceRule::Open => true,
            SequenceRule::After(required) => log.is_recorded(*required),
            SequenceRule::AfterAnyOf(candidates) => {
                candidates.iter().any(|slot| log.is_recorded(*slot))
            }
        }
    }

    /// Names the slot(s) that must be recorded first.
    fn required_label(&self) -> String {
        match self {
            SequenceRule::Open => String::new(),
            SequenceRule::After(required) => required.to_string(),
            SequenceRule::AfterAnyOf(candidates) => candidates
                .iter()
                .map(|slot| slot.as_str())
                .collect::<Vec<_>>()
                .join(" or "),
        }
    }
}

/// The result of applying a punch.
#[derive(Debug, Clone)]
pub struct ClockResult {
    /// The updated (or newly created) day log.
    pub log: TimeLog,
    /// True if no log existed for the day before this punch.
    pub created: bool,
    /// The audit step recording the punch.
    pub audit_step: AuditStep,
}

/// Validates and applies one punch to a day log.
///
/// When `existing` is `None` a fresh log is opened for `user_id` on the UTC
/// calendar date of `now`. When a log is supplied its own owner and date are
/// kept. The function has no side effects; persisting the returned log is
/// the caller's job.
///
/// # Errors
///
/// - [`EngineError::SequenceViolation`] if the slot's predecessor is missing
/// - [`EngineError::DuplicatePunch`] if the slot is already recorded
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::apply_clock;
/// use payroll_engine::models::ClockSlot;
/// use chrono::{TimeZone, Utc};
///
/// let morning = Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap();
/// let evening = Utc.with_ymd_and_hms(2026, 3, 2, 17, 0, 0).unwrap();
///
/// let first = apply_clock(None, "u-1", ClockSlot::MorningIn, morning).unwrap();
/// assert!(first.created);
///
/// // No break punches are needed to close the day.
/// let second = apply_clock(Some(first.log), "u-1", ClockSlot::AfternoonOut, evening).unwrap();
/// assert_eq!(second.log.afternoon.clock_out, Some(evening));
///
/// assert!(apply_clock(None, "u-1", ClockSlot::MorningOut, evening).is_err());
/// ```
pub fn apply_clock(
    existing: Option<TimeLog>,
    user_id: &str,
    slot: ClockSlot,
    now: DateTime<Utc>,
) -> EngineResult<ClockResult> {
    let created = existing.is_none();
    let mut log = existing.unwrap_or_else(|| TimeLog::open(user_id, now.date_naive()));

    let rule = SequenceRule::for_slot(slot);
    if !rule.is_satisfied(&log) {
        return Err(EngineError::SequenceViolation {
            slot,
            required: rule.required_label(),
        });
    }

    if log.is_recorded(slot) {
        return Err(EngineError::DuplicatePunch { slot });
    }

    log.stamp(slot, now);

    let audit_step = AuditStep {
        step_number: 1,
        rule_id: "clock_punch".to_string(),
        rule_name: "Clock Punch".to_string(),
        user_id: log.user_id.clone(),
        input: serde_json::json!({
            "slot": slot.as_str(),
            "date": log.date.to_string(),
            "existing_log": !created,
        }),
        output: serde_json::json!({
            "log_id": log.id,
            "recorded_at": now.to_rfc3339(),
        }),
        reasoning: match rule {
            SequenceRule::Open => format!("Recorded {} (no predecessor required)", slot),
            _ => format!(
                "Recorded {} after required punch ({}) was found",
                slot,
                rule.required_label()
            ),
        },
    };

    Ok(ClockResult {
        log,
        created,
        audit_step,
    })
}
