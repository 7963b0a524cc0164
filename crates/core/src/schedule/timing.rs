//! Food-timing classification and slot clock times.

use crate::schedule::TimeSlot;
use chrono::NaiveTime;

/// Whether a medicine is taken before or after food.
///
/// Classified from the free-text instructions; after food is the default
/// because most prescriptions are written that way and the cue is often
/// omitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FoodTiming {
    BeforeFood,
    AfterFood,
}

/// The wall-clock time chosen for each dose slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimingConfig {
    pub food_timing: FoodTiming,
    pub morning: NaiveTime,
    pub afternoon: NaiveTime,
    pub evening: NaiveTime,
}

impl TimingConfig {
    /// Returns the clock time for a slot.
    pub fn time_for(&self, slot: TimeSlot) -> NaiveTime {
        match slot {
            TimeSlot::Morning => self.morning,
            TimeSlot::Afternoon => self.afternoon,
            TimeSlot::Evening => self.evening,
        }
    }
}

fn hm(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).expect("literal time is valid")
}

/// Chooses slot clock times from the free-text administration instructions.
///
/// Instructions containing "before" or "empty stomach" (case-insensitive)
/// select the before-food times 09:15 / 13:15 / 19:15; everything else,
/// including the empty string, gets the after-food times 10:00 / 15:00 /
/// 21:00. Pure and total — any string is accepted.
pub fn resolve_timing(instructions: &str) -> TimingConfig {
    let lowered = instructions.to_lowercase();
    let before_food = lowered.contains("before") || lowered.contains("empty stomach");

    if before_food {
        TimingConfig {
            food_timing: FoodTiming::BeforeFood,
            morning: hm(9, 15),
            afternoon: hm(13, 15),
            evening: hm(19, 15),
        }
    } else {
        TimingConfig {
            food_timing: FoodTiming::AfterFood,
            morning: hm(10, 0),
            afternoon: hm(15, 0),
            evening: hm(21, 0),
        }
    }
}
