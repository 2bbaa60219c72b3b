//! Lock gating for full-screen activity launches.
//!
//! A full-screen launch is suppressed only when the device is locked on
//! the originally armed fire. "Originally armed" is inferred from the
//! seconds component of the scheduled time: first arms land on whole
//! minutes, reschedules carry second-level offsets. This is an
//! approximation, not a guarantee -- a rescheduled fire that happens to
//! land on a whole minute is treated as first. The descriptor carries no
//! explicit occurrence counter, so the heuristic is the observable
//! behavior and is preserved as such.

use chrono::Timelike;

use crate::descriptor::NotificationDescriptor;

/// True iff the descriptor's scheduled time has zero seconds-within-minute.
pub fn is_first_occurrence(descriptor: &NotificationDescriptor) -> bool {
    descriptor.scheduled_date_time.second() == 0
}

/// Whether the full-screen activity launch is suppressed. Any other
/// combination (unlocked, or locked but not first) permits the launch.
pub fn suppress_full_screen(locked: bool, first_occurrence: bool) -> bool {
    locked && first_occurrence
}
