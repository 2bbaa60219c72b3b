//! Notification descriptor and recurrence model.
//!
//! The descriptor is the decoded, structured description of one
//! scheduled notification. It is rebuilt on every decode and read-only
//! for the lifetime of one dispatch. The recurrence policy is a closed
//! union so "exactly one variant active" is enforced by the type rather
//! than by four nullable fields.

use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};

/// Decoded description of a scheduled notification.
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationDescriptor {
    /// Stable across reschedules of the same logical notification.
    pub id: i32,
    /// Whether this fire should render a visible notification.
    pub show_notification: bool,
    /// Local date-time this fire was armed for, second precision.
    pub scheduled_date_time: NaiveDateTime,
    /// How (and whether) the next occurrence is armed.
    pub recurrence: RecurrenceSpec,
    /// Play the alarm sound when no visible notification is rendered.
    pub play_sound: bool,
    /// Full-screen activity to launch alongside presentation.
    pub start_activity_class_name: Option<String>,
}

impl NotificationDescriptor {
    /// Copy of this descriptor re-stamped with the instant it is being
    /// armed for. The re-armed cache entry must carry the new time so
    /// the next fire decodes the state it was actually scheduled with.
    pub fn rescheduled_at(&self, at: NaiveDateTime) -> Self {
        Self {
            scheduled_date_time: at,
            ..self.clone()
        }
    }
}

/// Recurrence policy for a notification. Exactly one variant per
/// descriptor.
#[derive(Debug, Clone, PartialEq)]
pub enum RecurrenceSpec {
    /// One-shot; the cache entry is evicted after firing.
    None,
    /// Calendar-relative step from now.
    RepeatFrequency(RepeatFrequency),
    /// Next future instant whose components match a partial pattern.
    MatchDateTimeComponents(DateTimePattern),
    /// Fixed duration from now, independent of calendar boundaries.
    FixedInterval(chrono::Duration),
}

/// Calendar-relative repeat step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RepeatFrequency {
    Daily,
    Weekly,
}

/// Which components of the scheduled date-time must match, as carried on
/// the wire. Expanded into a [`DateTimePattern`] at decode time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DateTimeComponents {
    /// Same time every day.
    Time,
    /// Same weekday and time every week.
    DayOfWeekAndTime,
    /// Same day-of-month and time every month.
    DayOfMonthAndTime,
    /// Same month, day and time every year.
    DateAndTime,
}

/// Partial date-time pattern. A `Some` field must equal the candidate
/// instant's component; `None` fields are unconstrained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateTimePattern {
    pub month: Option<u32>,
    pub day: Option<u32>,
    pub weekday: Option<Weekday>,
    pub hour: Option<u32>,
    pub minute: Option<u32>,
    pub second: Option<u32>,
}

impl DateTimePattern {
    /// Expand a wire-level component selector against the scheduled
    /// date-time it constrains.
    pub fn from_components(components: DateTimeComponents, at: NaiveDateTime) -> Self {
        let time = Self {
            hour: Some(at.hour()),
            minute: Some(at.minute()),
            second: Some(at.second()),
            ..Self::default()
        };
        match components {
            DateTimeComponents::Time => time,
            DateTimeComponents::DayOfWeekAndTime => Self {
                weekday: Some(at.weekday()),
                ..time
            },
            DateTimeComponents::DayOfMonthAndTime => Self {
                day: Some(at.day()),
                ..time
            },
            DateTimeComponents::DateAndTime => Self {
                month: Some(at.month()),
                day: Some(at.day()),
                ..time
            },
        }
    }

    /// Whether `t` satisfies every constrained field.
    pub fn matches(&self, t: NaiveDateTime) -> bool {
        self.month.map_or(true, |m| t.month() == m)
            && self.day.map_or(true, |d| t.day() == d)
            && self.weekday.map_or(true, |w| t.weekday() == w)
            && self.hour.map_or(true, |h| t.hour() == h)
            && self.minute.map_or(true, |m| t.minute() == m)
            && self.second.map_or(true, |s| t.second() == s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(s: &str) -> NaiveDateTime {
        s.parse().unwrap()
    }

    #[test]
    fn time_pattern_keeps_only_time_fields() {
        let p = DateTimePattern::from_components(DateTimeComponents::Time, at("2024-01-01T09:30:15"));
        assert_eq!(p.hour, Some(9));
        assert_eq!(p.minute, Some(30));
        assert_eq!(p.second, Some(15));
        assert_eq!(p.month, None);
        assert_eq!(p.day, None);
        assert_eq!(p.weekday, None);
    }

    #[test]
    fn day_of_week_pattern_carries_weekday() {
        // 2024-01-01 is a Monday.
        let p = DateTimePattern::from_components(
            DateTimeComponents::DayOfWeekAndTime,
            at("2024-01-01T09:00:00"),
        );
        assert_eq!(p.weekday, Some(Weekday::Mon));
        assert_eq!(p.day, None);
    }

    #[test]
    fn date_and_time_pattern_carries_month_and_day() {
        let p = DateTimePattern::from_components(
            DateTimeComponents::DateAndTime,
            at("2024-02-29T08:00:00"),
        );
        assert_eq!(p.month, Some(2));
        assert_eq!(p.day, Some(29));
        assert_eq!(p.hour, Some(8));
    }

    #[test]
    fn pattern_matches_constrained_fields_only() {
        let p = DateTimePattern {
            day: Some(15),
            hour: Some(12),
            minute: Some(0),
            second: Some(0),
            ..Default::default()
        };
        assert!(p.matches(at("2024-03-15T12:00:00")));
        assert!(p.matches(at("2024-09-15T12:00:00")));
        assert!(!p.matches(at("2024-03-16T12:00:00")));
        assert!(!p.matches(at("2024-03-15T12:00:01")));
    }

    #[test]
    fn rescheduled_at_rewrites_only_the_time() {
        let d = NotificationDescriptor {
            id: 7,
            show_notification: true,
            scheduled_date_time: at("2024-01-01T09:00:00"),
            recurrence: RecurrenceSpec::RepeatFrequency(RepeatFrequency::Daily),
            play_sound: false,
            start_activity_class_name: Some("AlarmActivity".to_string()),
        };
        let next = d.rescheduled_at(at("2024-01-02T09:00:00"));
        assert_eq!(next.scheduled_date_time, at("2024-01-02T09:00:00"));
        assert_eq!(next.id, 7);
        assert_eq!(next.recurrence, d.recurrence);
        assert_eq!(next.start_activity_class_name, d.start_activity_class_name);
    }
}
