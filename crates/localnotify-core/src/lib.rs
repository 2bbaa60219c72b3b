//! # LocalNotify Core Library
//!
//! Decision engine invoked every time a previously armed notification
//! trigger fires. Given the persisted description of a scheduled
//! notification, it decides whether to present now, whether and when to
//! arm the next occurrence, and whether an associated full-screen launch
//! must be suppressed because the device is locked.
//!
//! ## Architecture
//!
//! - **Payload Decoder**: raw trigger bytes to a descriptor, with a
//!   compatibility path for payloads armed before the structured schema
//! - **Recurrence Engine**: pure next-action arithmetic over a closed
//!   four-way recurrence union
//! - **Lock Gate**: first-occurrence heuristic and launch suppression
//! - **Trigger Dispatcher**: orchestration and side-effect ordering
//!
//! Rendering, persistence, and the timed-wakeup primitive stay behind the
//! [`TriggerHost`] trait -- the core holds no durable state of its own,
//! so every dispatch is independent and every instruction it issues must
//! be idempotent on the host side.
//!
//! ## Key Components
//!
//! - [`TriggerDispatcher`]: sole entry point, one call per trigger fire
//! - [`decode`]: payload bytes to [`DecodedPayload`]
//! - [`decide`]: descriptor to [`RecurrenceDecision`]
//! - [`TriggerHost`]: trait the embedding platform implements

pub mod descriptor;
pub mod dispatch;
pub mod error;
pub mod lock;
pub mod payload;
pub mod recurrence;

pub use descriptor::{
    DateTimeComponents, DateTimePattern, NotificationDescriptor, RecurrenceSpec, RepeatFrequency,
};
pub use dispatch::{PlatformCaps, TriggerDispatcher, TriggerHost};
pub use error::{CoreError, DecodeError};
pub use payload::{decode, DecodedPayload, LegacyFire, RenderedNotification, TriggerFire};
pub use recurrence::{decide, next_matching_instant, ArmInstruction, RecurrenceDecision};
