//! Calendar reminder derivation.
//!
//! A reminder is derived fresh for each request, handed to the caller as a
//! Google Calendar deep link, and forgotten — nothing here is persisted.

use crate::medicine::Medicine;
use crate::schedule::{resolve_slots, resolve_timing, TimeSlot};
use chrono::{DateTime, Days, Duration, Utc};
use mediscribe_types::DurationDays;
use url::Url;

/// Length of the reminder block in the calendar.
const REMINDER_BLOCK_MINUTES: i64 = 15;

/// Base URL of the Google Calendar event template endpoint.
const GOOGLE_CALENDAR_RENDER_URL: &str = "https://calendar.google.com/calendar/render";

/// A recurring calendar-event descriptor for one medicine.
///
/// The event fires once per day at the first resolved slot's time; the
/// description lists all active slots. Multi-dose regimens are not scheduled
/// as separate events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderEvent {
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub recurrence: DurationDays,
    pub description: String,
    pub slots: Vec<TimeSlot>,
}

impl ReminderEvent {
    /// Renders the event as a Google Calendar deep link.
    ///
    /// The parameter set and encoding are a fixed wire contract:
    /// `action=TEMPLATE&text=…&dates=<start>/<end>&details=…&recur=RRULE:FREQ=DAILY;COUNT=<n>`,
    /// with both instants in the UTC basic format `YYYYMMDDTHHMMSSZ`.
    pub fn google_calendar_url(&self) -> Url {
        let mut url = Url::parse(GOOGLE_CALENDAR_RENDER_URL).expect("base URL is valid");
        let dates = format!(
            "{}/{}",
            format_basic_utc(self.start),
            format_basic_utc(self.end)
        );
        let recur = format!("RRULE:FREQ=DAILY;COUNT={}", self.recurrence);

        url.query_pairs_mut()
            .append_pair("action", "TEMPLATE")
            .append_pair("text", &self.title)
            .append_pair("dates", &dates)
            .append_pair("details", &self.description)
            .append_pair("recur", &recur);

        url
    }
}

/// Derives a daily reminder for a medicine, anchored to tomorrow.
///
/// Equivalent to [`build_reminder_at`] with the current instant.
pub fn build_reminder(medicine: &Medicine) -> ReminderEvent {
    build_reminder_at(medicine, Utc::now())
}

/// Derives a daily reminder for a medicine relative to a given instant.
///
/// The event starts on the calendar day after `now` — never today, since
/// today's dose window may already have passed — at the clock time of the
/// first resolved slot, and repeats daily for the medicine's treatment
/// duration. The event block is 15 minutes.
pub fn build_reminder_at(medicine: &Medicine, now: DateTime<Utc>) -> ReminderEvent {
    let timing = resolve_timing(&medicine.instructions);
    let slots = resolve_slots(&medicine.dosage_pattern);

    // resolve_slots guarantees a non-empty sequence.
    let anchor = slots[0];
    let start_day = now.date_naive() + Days::new(1);
    let start = start_day.and_time(timing.time_for(anchor)).and_utc();
    let (start, end) = event_window(start);

    let slot_names = slots
        .iter()
        .map(TimeSlot::to_string)
        .collect::<Vec<_>>()
        .join(", ");

    let description = format!(
        "Medicine: {name}\n\
         Type: {kind}\n\
         Dosage: {pattern} ({slot_names})\n\
         Instructions: {instructions}\n\
         Purpose: {purpose}\n\
         \n\
         Remember to take your medicine!",
        name = medicine.medicine_name,
        kind = medicine.medicine_type,
        pattern = medicine.dosage_pattern,
        instructions = medicine.instructions,
        purpose = medicine.purpose,
    );

    ReminderEvent {
        title: format!("Take {}", medicine.medicine_name),
        start,
        end,
        recurrence: medicine.duration_days,
        description,
        slots,
    }
}

/// Computes the event window for a start instant: the fixed reminder block.
fn event_window(start: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    (start, start + Duration::minutes(REMINDER_BLOCK_MINUTES))
}

/// Formats an instant in the fractional-second-free UTC basic format used by
/// calendar deep links, e.g. `20250101T100000Z`.
fn format_basic_utc(instant: DateTime<Utc>) -> String {
    instant.format("%Y%m%dT%H%M%SZ").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use mediscribe_types::NonEmptyText;

    fn medicine(name: &str, pattern: &str, instructions: &str, duration_days: u32) -> Medicine {
        Medicine {
            medicine_name: NonEmptyText::new(name).unwrap(),
            medicine_type: Default::default(),
            dosage_pattern: pattern.to_string(),
            instructions: instructions.to_string(),
            total_quantity: None,
            duration_days: DurationDays::new(duration_days),
            description: String::new(),
            purpose: "Pain relief".to_string(),
        }
    }

    fn at(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    #[test]
    fn test_reminder_starts_on_the_following_day() {
        let med = medicine("Paracetamol", "1-0-1", "After food", 3);

        // Invoked early in the day.
        let event = build_reminder_at(&med, at("2025-03-10T00:05:00Z"));
        assert_eq!(event.start, at("2025-03-11T10:00:00Z"));

        // Invoked late in the day, after every slot has passed.
        let event = build_reminder_at(&med, at("2025-03-10T23:59:00Z"));
        assert_eq!(event.start, at("2025-03-11T10:00:00Z"));
    }

    #[test]
    fn test_reminder_rolls_over_month_and_year_boundaries() {
        let med = medicine("Paracetamol", "OD", "After food", 1);
        let event = build_reminder_at(&med, at("2024-12-31T18:00:00Z"));
        assert_eq!(event.start, at("2025-01-01T10:00:00Z"));
    }

    #[test]
    fn test_first_slot_anchors_the_event() {
        // Evening-only regimen anchors to the evening time.
        let med = medicine("Melatonin", "HS", "Before sleep", 5);
        let event = build_reminder_at(&med, at("2025-03-10T08:00:00Z"));
        assert_eq!(event.start, at("2025-03-11T19:15:00Z")); // "before" cue
        assert_eq!(event.slots, vec![TimeSlot::Evening]);
    }

    #[test]
    fn test_event_block_is_fifteen_minutes() {
        let med = medicine("Paracetamol", "1-0-1", "After food", 3);
        let event = build_reminder_at(&med, at("2025-03-10T12:00:00Z"));
        assert_eq!(event.end - event.start, Duration::minutes(15));
    }

    #[test]
    fn test_event_window_rolls_across_day_boundary() {
        let (start, end) = event_window(at("2025-03-10T23:50:00Z"));
        assert_eq!(start, at("2025-03-10T23:50:00Z"));
        assert_eq!(end, at("2025-03-11T00:05:00Z"));
    }

    #[test]
    fn test_basic_utc_format_strips_separators() {
        assert_eq!(
            format_basic_utc(at("2025-01-01T10:00:00Z")),
            "20250101T100000Z"
        );
        assert_eq!(
            format_basic_utc(at("2024-12-31T23:59:59Z")),
            "20241231T235959Z"
        );
    }

    #[test]
    fn test_recurrence_count_matches_duration_verbatim() {
        let med = medicine("Amoxicillin", "TDS", "After food", 5);
        let event = build_reminder_at(&med, at("2025-03-10T12:00:00Z"));
        let url = event.google_calendar_url();
        let recur = url
            .query_pairs()
            .find(|(k, _)| k == "recur")
            .map(|(_, v)| v.into_owned())
            .unwrap();
        assert_eq!(recur, "RRULE:FREQ=DAILY;COUNT=5");
    }

    #[test]
    fn test_calendar_url_wire_contract() {
        let med = medicine("Paracetamol", "1-0-1", "After food", 3);
        let event = build_reminder_at(&med, at("2025-03-10T12:00:00Z"));
        let url = event.google_calendar_url();

        assert_eq!(url.host_str(), Some("calendar.google.com"));
        assert_eq!(url.path(), "/calendar/render");

        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        let get = |key: &str| {
            pairs
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.clone())
                .unwrap()
        };

        assert_eq!(get("action"), "TEMPLATE");
        assert_eq!(get("text"), "Take Paracetamol");
        assert_eq!(get("dates"), "20250311T100000Z/20250311T101500Z");
        assert_eq!(get("recur"), "RRULE:FREQ=DAILY;COUNT=3");
        assert!(get("details").contains("Dosage: 1-0-1 (morning, evening)"));
        assert!(get("details").contains("Instructions: After food"));
    }

    #[test]
    fn test_end_to_end_scenario() {
        // {Paracetamol, 1-0-1, After food, 3 days} → morning+evening slots,
        // anchored at the after-food morning time, repeating three times.
        let med = medicine("Paracetamol", "1-0-1", "After food", 3);
        let event = build_reminder_at(&med, at("2025-03-10T12:00:00Z"));

        assert_eq!(event.slots, vec![TimeSlot::Morning, TimeSlot::Evening]);
        assert_eq!(event.title, "Take Paracetamol");
        assert_eq!(event.start, at("2025-03-11T10:00:00Z"));
        assert_eq!(event.end, at("2025-03-11T10:15:00Z"));
        assert_eq!(event.recurrence.get(), 3);
    }

    #[test]
    fn test_garbled_pattern_still_produces_a_reminder() {
        let med = medicine("Mystery", "???", "", 2);
        let event = build_reminder_at(&med, at("2025-03-10T12:00:00Z"));
        assert_eq!(event.slots, vec![TimeSlot::Morning]);
        assert_eq!(event.start, at("2025-03-11T10:00:00Z"));
    }
}
