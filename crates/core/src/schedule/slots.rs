//! Dosage-pattern classification into dose slots.

use serde::{Deserialize, Serialize};

/// One of the three fixed times of day a dose may be scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeSlot {
    Morning,
    Afternoon,
    Evening,
}

impl std::fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TimeSlot::Morning => "morning",
            TimeSlot::Afternoon => "afternoon",
            TimeSlot::Evening => "evening",
        };
        write!(f, "{}", name)
    }
}

/// Resolves a free-form dosage pattern into the dose slots it activates.
///
/// The pattern is clinical shorthand as read from a handwritten prescription,
/// so this is a best-effort heuristic classifier, not a grammar. Matching
/// order:
///
/// 1. The first `<digits>-<digits>-<digits>` run anywhere in the pattern:
///    each nonzero position activates morning/afternoon/evening in order.
/// 2. Recognised shorthand codes (`OD`, `BD`, `BID`, `TDS`, `TID`, `HS`, and
///    the common numeric spellings), compared against the whole trimmed,
///    uppercased pattern.
/// 3. Anything else, including the empty string, falls back to morning.
///
/// The returned sequence is never empty and always ordered
/// morning → afternoon → evening. A degenerate all-zero triple ("0-0-0")
/// also falls back to morning so an empty slot list never propagates
/// downstream.
pub fn resolve_slots(pattern: &str) -> Vec<TimeSlot> {
    let normalised = pattern.trim().to_uppercase();

    let slots = if let Some((morning, afternoon, evening)) = find_numeric_triple(&normalised) {
        let mut slots = Vec::new();
        if morning {
            slots.push(TimeSlot::Morning);
        }
        if afternoon {
            slots.push(TimeSlot::Afternoon);
        }
        if evening {
            slots.push(TimeSlot::Evening);
        }
        slots
    } else {
        match normalised.as_str() {
            "OD" => vec![TimeSlot::Morning],
            "BD" | "BID" => vec![TimeSlot::Morning, TimeSlot::Evening],
            "TDS" | "TID" => vec![TimeSlot::Morning, TimeSlot::Afternoon, TimeSlot::Evening],
            "HS" => vec![TimeSlot::Evening],
            _ => vec![TimeSlot::Morning],
        }
    };

    if slots.is_empty() {
        vec![TimeSlot::Morning]
    } else {
        slots
    }
}

/// Finds the first `<digits>-<digits>-<digits>` run in `pattern` and reports,
/// per position, whether its value is nonzero.
///
/// Only zero-ness matters, so digit runs are inspected rather than parsed
/// into integers; absurdly long runs cannot overflow anything.
fn find_numeric_triple(pattern: &str) -> Option<(bool, bool, bool)> {
    let bytes = pattern.as_bytes();

    for start in 0..bytes.len() {
        // A candidate triple must begin at the start of a digit run.
        if !bytes[start].is_ascii_digit() {
            continue;
        }
        if start > 0 && bytes[start - 1].is_ascii_digit() {
            continue;
        }

        let mut pos = start;
        let mut values = [false; 3];
        let mut matched = true;

        for (i, value) in values.iter_mut().enumerate() {
            let run_start = pos;
            while pos < bytes.len() && bytes[pos].is_ascii_digit() {
                *value |= bytes[pos] != b'0';
                pos += 1;
            }
            if pos == run_start {
                matched = false;
                break;
            }
            if i < 2 {
                if pos < bytes.len() && bytes[pos] == b'-' {
                    pos += 1;
                } else {
                    matched = false;
                    break;
                }
            }
        }

        if matched {
            return Some((values[0], values[1], values[2]));
        }
    }

    None
}
