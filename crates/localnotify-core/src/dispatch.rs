//! Trigger dispatcher.
//!
//! Sole entry point for a trigger fire: decodes the payload, runs the
//! recurrence engine, consults the lock gate, and issues side-effect
//! instructions to the host in a fixed order. Instructions are
//! fire-and-forget -- the dispatcher never inspects or retries a
//! collaborator's outcome; retry policy belongs to each collaborator.

use chrono::{DateTime, Local, NaiveDateTime};

use crate::descriptor::NotificationDescriptor;
use crate::error::Result;
use crate::lock;
use crate::payload::{decode, DecodedPayload, LegacyFire, RenderedNotification, TriggerFire};
use crate::recurrence::decide;

/// Host-supplied platform capabilities.
///
/// Version-gated behavior is injected here instead of checked inline so
/// decisions stay testable without a real device.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlatformCaps {
    /// Platform can play an alarm sound for a fire that renders no
    /// visible notification.
    pub fallback_sound: bool,
}

/// External collaborators the dispatcher issues instructions to.
///
/// Implementations must be idempotent per id: evicting an absent cache
/// entry is a no-op, arming an already-armed id overwrites, presenting
/// the same id replaces rather than duplicates. Duplicate deliveries of
/// the same fire are then harmless even when dispatched concurrently.
pub trait TriggerHost {
    /// Render and present a visible notification.
    fn present(&self, descriptor: &NotificationDescriptor);

    /// Present a pre-rendered legacy notification.
    fn present_legacy(&self, id: i32, notification: &RenderedNotification);

    /// Arm the platform trigger for `descriptor.id` at a local instant.
    /// The descriptor is the state the overwritten cache entry carries.
    fn arm(&self, descriptor: &NotificationDescriptor, at: NaiveDateTime);

    /// Evict the cache entry for an id.
    fn evict(&self, id: i32);

    /// Whether the device is currently locked.
    fn is_locked(&self) -> bool;

    /// Launch the associated full-screen activity.
    fn launch(&self, class_name: &str, descriptor: &NotificationDescriptor);

    /// Play the fallback alarm sound for a fire with no visible
    /// notification.
    fn play_fallback(&self, descriptor: &NotificationDescriptor);
}

/// Orchestrates one trigger fire end to end.
pub struct TriggerDispatcher<H> {
    host: H,
    caps: PlatformCaps,
}

impl<H: TriggerHost> TriggerDispatcher<H> {
    pub fn new(host: H, caps: PlatformCaps) -> Self {
        Self { host, caps }
    }

    /// Handle one trigger fire at the current wall-clock time.
    pub fn on_trigger(&self, fire: &TriggerFire) -> Result<()> {
        self.on_trigger_at(fire, Local::now())
    }

    /// Handle one trigger fire at an explicit instant. Seam for tests
    /// and for hosts that carry their own clock.
    ///
    /// A payload that cannot be decoded aborts the dispatch with no side
    /// effects: the error is logged and returned for host telemetry.
    pub fn on_trigger_at(&self, fire: &TriggerFire, now: DateTime<Local>) -> Result<()> {
        let decoded = match decode(fire) {
            Ok(decoded) => decoded,
            Err(e) => {
                tracing::error!(error = %e, "dropping fire: payload could not be decoded");
                return Err(e.into());
            }
        };
        match decoded {
            DecodedPayload::Legacy(legacy) => {
                self.dispatch_legacy(&legacy, now.timestamp_millis());
            }
            DecodedPayload::Descriptor(descriptor) => {
                self.dispatch(&descriptor, now.naive_local());
            }
        }
        Ok(())
    }

    /// Pre-schema fires present the embedded notification re-stamped
    /// with the current time. No recurrence logic applies: a repeating
    /// legacy trigger re-arms itself at the platform layer, so the only
    /// decision left here is whether the cache entry survives.
    fn dispatch_legacy(&self, legacy: &LegacyFire, now_epoch_ms: i64) {
        let mut notification = legacy.notification.clone();
        notification.when_epoch_ms = Some(now_epoch_ms);
        self.host
            .present_legacy(legacy.notification_id, &notification);
        if !legacy.repeat {
            self.host.evict(legacy.notification_id);
        }
    }

    fn dispatch(&self, descriptor: &NotificationDescriptor, now: NaiveDateTime) {
        let decision = decide(descriptor, now);

        if decision.present {
            self.host.present(descriptor);
        }

        if let Some(arm) = decision.next_arm {
            self.host.arm(&descriptor.rescheduled_at(arm.at), arm.at);
        } else if decision.evict {
            self.host.evict(descriptor.id);
        }

        // The lock state is queried only when a launch is associated.
        if let Some(class_name) = &descriptor.start_activity_class_name {
            let suppressed = lock::suppress_full_screen(
                self.host.is_locked(),
                lock::is_first_occurrence(descriptor),
            );
            if !suppressed {
                self.host.launch(class_name, descriptor);
            }
        }

        if !decision.present && descriptor.play_sound && self.caps.fallback_sound {
            self.host.play_fallback(descriptor);
        }
    }
}
