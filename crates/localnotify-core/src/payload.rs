//! Wire payload decoding.
//!
//! Turns the raw bytes captured at trigger time into either a modern
//! [`NotificationDescriptor`] or the minimal legacy shape used by
//! payloads armed before the structured schema existed. Decoding is a
//! pure transformation -- the only side effect is a warning log when a
//! malformed payload sets more than one recurrence variant.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::descriptor::{
    DateTimeComponents, DateTimePattern, NotificationDescriptor, RecurrenceSpec, RepeatFrequency,
};
use crate::error::DecodeError;

/// One trigger-fire event as delivered by the platform.
#[derive(Debug, Clone)]
pub struct TriggerFire {
    /// Raw structured payload; empty for pre-schema payloads.
    pub payload: Vec<u8>,
    /// Side-channel legacy data, present only for pre-schema payloads.
    pub legacy: Option<LegacyFire>,
}

/// Minimal shape of a trigger armed before the structured schema existed.
///
/// The sender embedded a pre-rendered notification and a raw id directly
/// in the trigger instead of a descriptor. No recurrence logic applies.
#[derive(Debug, Clone, PartialEq)]
pub struct LegacyFire {
    pub notification_id: i32,
    /// When false the cache entry is evicted after presenting.
    pub repeat: bool,
    pub notification: RenderedNotification,
}

/// Pre-rendered platform notification object. Opaque to the core except
/// for the `when` timestamp, which is re-stamped at dispatch time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedNotification {
    pub when_epoch_ms: Option<i64>,
    pub content: serde_json::Value,
}

/// Result of decoding one trigger payload. The legacy path is a distinct
/// variant so the two shapes cannot share fields.
#[derive(Debug, Clone)]
pub enum DecodedPayload {
    Descriptor(NotificationDescriptor),
    Legacy(LegacyFire),
}

/// Structured wire schema. Carries one nullable field per recurrence
/// variant; [`decode`] folds them into the closed union.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawNotification {
    id: i32,
    #[serde(default)]
    show_notification: bool,
    scheduled_date_time: String,
    #[serde(default)]
    scheduled_notification_repeat_frequency: Option<RepeatFrequency>,
    #[serde(default)]
    match_date_time_components: Option<DateTimeComponents>,
    #[serde(default)]
    repeat_interval: Option<RawInterval>,
    #[serde(default)]
    start_activity_class_name: Option<String>,
    #[serde(default)]
    play_sound: bool,
}

/// `repeatInterval` on the wire: a number of seconds, or one of the
/// named intervals older senders used.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(untagged)]
enum RawInterval {
    Seconds(i64),
    Named(NamedInterval),
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
enum NamedInterval {
    EveryMinute,
    Hourly,
    Daily,
    Weekly,
}

impl RawInterval {
    fn seconds(self) -> i64 {
        match self {
            RawInterval::Seconds(s) => s,
            RawInterval::Named(NamedInterval::EveryMinute) => 60,
            RawInterval::Named(NamedInterval::Hourly) => 3_600,
            RawInterval::Named(NamedInterval::Daily) => 86_400,
            RawInterval::Named(NamedInterval::Weekly) => 604_800,
        }
    }
}

/// Decode one trigger fire.
///
/// Empty payload bytes select the legacy path; the trigger must then
/// carry the side-channel notification, otherwise the fire is
/// undecodable. Non-empty bytes parse as the structured schema. A
/// payload that sets more than one recurrence variant is resolved by
/// priority (frequency, then components, then interval) and logged.
pub fn decode(fire: &TriggerFire) -> Result<DecodedPayload, DecodeError> {
    if fire.payload.is_empty() {
        let legacy = fire.legacy.clone().ok_or(DecodeError::MissingLegacy)?;
        return Ok(DecodedPayload::Legacy(legacy));
    }

    let raw: RawNotification = serde_json::from_slice(&fire.payload)?;
    let scheduled: NaiveDateTime =
        raw.scheduled_date_time
            .parse()
            .map_err(|_| DecodeError::InvalidDateTime {
                value: raw.scheduled_date_time.clone(),
            })?;

    let variants_set = raw.scheduled_notification_repeat_frequency.is_some() as u8
        + raw.match_date_time_components.is_some() as u8
        + raw.repeat_interval.is_some() as u8;
    if variants_set > 1 {
        tracing::warn!(
            id = raw.id,
            variants = variants_set,
            "multiple recurrence variants set; resolving by priority"
        );
    }

    let recurrence = if let Some(freq) = raw.scheduled_notification_repeat_frequency {
        RecurrenceSpec::RepeatFrequency(freq)
    } else if let Some(components) = raw.match_date_time_components {
        RecurrenceSpec::MatchDateTimeComponents(DateTimePattern::from_components(
            components, scheduled,
        ))
    } else if let Some(interval) = raw.repeat_interval {
        RecurrenceSpec::FixedInterval(chrono::Duration::seconds(interval.seconds()))
    } else {
        RecurrenceSpec::None
    };

    Ok(DecodedPayload::Descriptor(NotificationDescriptor {
        id: raw.id,
        show_notification: raw.show_notification,
        scheduled_date_time: scheduled,
        recurrence,
        play_sound: raw.play_sound,
        start_activity_class_name: raw.start_activity_class_name,
    }))
}
