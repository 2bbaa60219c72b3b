//! Recurrence engine.
//!
//! Given a decoded descriptor, computes what one trigger fire should do:
//! whether to present now, whether and when to arm the next occurrence,
//! and whether the cache entry is evicted. Pure -- the caller supplies
//! `now` and performs the resulting side effects. Keeping "should I show
//! it" and "what's next" in one decision path is what stops one-shot,
//! repeating, and pattern-matched notifications from growing three
//! divergent re-entry points.

use chrono::{Datelike, Days, Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

use crate::descriptor::{DateTimePattern, NotificationDescriptor, RecurrenceSpec, RepeatFrequency};

/// Search horizon for pattern matching. Eight years covers a Feb 29
/// date-and-time pattern from any starting point.
const PATTERN_HORIZON_DAYS: u64 = 366 * 8;

/// Instruction to arm the next trigger for a notification id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArmInstruction {
    pub id: i32,
    /// Local instant the next fire is armed for.
    pub at: NaiveDateTime,
}

/// What one trigger fire should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecurrenceDecision {
    /// Render a visible notification for this fire.
    pub present: bool,
    /// Arm the next occurrence, if any.
    pub next_arm: Option<ArmInstruction>,
    /// Evict the cache entry for this id.
    pub evict: bool,
}

/// Compute the decision for one fire.
///
/// Total for structurally valid descriptors: a recurrence with no future
/// instant (an unsatisfiable pattern, or arithmetic past the calendar's
/// range) degrades to the one-shot path with a warning instead of
/// failing.
pub fn decide(descriptor: &NotificationDescriptor, now: NaiveDateTime) -> RecurrenceDecision {
    let next = match &descriptor.recurrence {
        RecurrenceSpec::None => None,
        RecurrenceSpec::RepeatFrequency(freq) => calendar_step(now, *freq),
        RecurrenceSpec::MatchDateTimeComponents(pattern) => next_matching_instant(now, pattern),
        RecurrenceSpec::FixedInterval(interval) => now.checked_add_signed(*interval),
    };
    if next.is_none() && descriptor.recurrence != RecurrenceSpec::None {
        tracing::warn!(
            id = descriptor.id,
            "no future instant for recurrence; treating as one-shot"
        );
    }
    RecurrenceDecision {
        present: descriptor.show_notification,
        next_arm: next.map(|at| ArmInstruction {
            id: descriptor.id,
            at,
        }),
        evict: next.is_none(),
    }
}

fn calendar_step(now: NaiveDateTime, freq: RepeatFrequency) -> Option<NaiveDateTime> {
    match freq {
        RepeatFrequency::Daily => now.checked_add_days(Days::new(1)),
        RepeatFrequency::Weekly => now.checked_add_days(Days::new(7)),
    }
}

/// Smallest instant strictly greater than `now` whose constrained
/// components equal the pattern, or `None` if there is no match inside
/// the search horizon.
///
/// Field-wise skip-ahead: each mismatch jumps the candidate to the start
/// of the next month/day/hour/minute, so a pass over the loop is bounded
/// by the calendar's fan-out rather than by seconds elapsed.
pub fn next_matching_instant(
    now: NaiveDateTime,
    pattern: &DateTimePattern,
) -> Option<NaiveDateTime> {
    let horizon = now.checked_add_days(Days::new(PATTERN_HORIZON_DAYS))?;
    let mut t = now.checked_add_signed(Duration::seconds(1))?;
    while t <= horizon {
        if pattern.month.is_some_and(|m| t.month() != m) {
            t = next_month_start(t)?;
        } else if pattern.day.is_some_and(|d| t.day() != d)
            || pattern.weekday.is_some_and(|w| t.weekday() != w)
        {
            t = next_day_start(t)?;
        } else if pattern.hour.is_some_and(|h| t.hour() != h) {
            t = next_hour_start(t)?;
        } else if pattern.minute.is_some_and(|m| t.minute() != m) {
            t = next_minute_start(t)?;
        } else {
            match pattern.second {
                Some(s) if t.second() != s => {
                    t = if s > t.second() {
                        t.with_second(s)?
                    } else {
                        next_minute_start(t)?
                    };
                }
                _ => return Some(t),
            }
        }
    }
    None
}

fn next_month_start(t: NaiveDateTime) -> Option<NaiveDateTime> {
    let (year, month) = if t.month() == 12 {
        (t.year() + 1, 1)
    } else {
        (t.year(), t.month() + 1)
    };
    Some(NaiveDate::from_ymd_opt(year, month, 1)?.and_time(NaiveTime::MIN))
}

fn next_day_start(t: NaiveDateTime) -> Option<NaiveDateTime> {
    Some(t.date().succ_opt()?.and_time(NaiveTime::MIN))
}

fn next_hour_start(t: NaiveDateTime) -> Option<NaiveDateTime> {
    t.date()
        .and_hms_opt(t.hour(), 0, 0)?
        .checked_add_signed(Duration::hours(1))
}

fn next_minute_start(t: NaiveDateTime) -> Option<NaiveDateTime> {
    t.date()
        .and_hms_opt(t.hour(), t.minute(), 0)?
        .checked_add_signed(Duration::minutes(1))
}
