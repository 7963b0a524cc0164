//! Dosage-schedule interpretation and reminder derivation.
//!
//! Given the free-text dosage pattern and instruction strings of a medicine
//! record, this module works out:
//!
//! - which times of day a dose is taken ([`resolve_slots`]),
//! - the concrete clock time for each slot, depending on whether the medicine
//!   is taken before or after food ([`resolve_timing`]),
//! - a recurring calendar-event descriptor anchored to tomorrow, rendered as
//!   a Google Calendar deep link ([`build_reminder`]).
//!
//! Everything in here is a pure transformation over its inputs (plus the
//! ambient clock). Input text comes from handwriting read by a vision model,
//! so unrecognised patterns and instructions degrade to safe defaults instead
//! of erroring; a medicine with a garbled dosage pattern still gets a morning
//! reminder.

mod duration;
mod reminder;
mod slots;
mod timing;

pub use duration::estimate_duration_days;
pub use reminder::{build_reminder, build_reminder_at, ReminderEvent};
pub use slots::{resolve_slots, TimeSlot};
pub use timing::{resolve_timing, FoodTiming, TimingConfig};
