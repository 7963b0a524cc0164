//! Treatment-duration estimation from dispensed quantity.

use mediscribe_types::DurationDays;

/// Estimates treatment duration from the dispensed quantity and the dosage
/// pattern's daily dose count.
///
/// `OD` counts one dose per day, `BD`/`BID` two, `TDS`/`TID` three, `QID`
/// four; numeric patterns like "1-0-1" sum their positions. Returns `None`
/// when the pattern is unrecognised or implies no doses at all — callers
/// should then fall back to the duration written on the prescription.
pub fn estimate_duration_days(total_quantity: u32, pattern: &str) -> Option<DurationDays> {
    if total_quantity == 0 {
        return None;
    }

    let normalised = pattern.trim().to_uppercase();
    let daily_count: u32 = match normalised.as_str() {
        "OD" => 1,
        "BD" | "BID" => 2,
        "TDS" | "TID" => 3,
        "QID" => 4,
        other if other.contains('-') => other
            .split('-')
            .filter_map(|part| part.parse::<u32>().ok())
            .sum(),
        _ => return None,
    };

    if daily_count == 0 {
        return None;
    }

    Some(DurationDays::new(total_quantity / daily_count))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_pattern_sums_daily_doses() {
        assert_eq!(estimate_duration_days(30, "1-0-1").unwrap().get(), 15);
        assert_eq!(estimate_duration_days(30, "1-1-1").unwrap().get(), 10);
        assert_eq!(estimate_duration_days(10, "0-0-1").unwrap().get(), 10);
    }

    #[test]
    fn test_shorthand_codes_map_to_daily_counts() {
        assert_eq!(estimate_duration_days(14, "OD").unwrap().get(), 14);
        assert_eq!(estimate_duration_days(14, "bd").unwrap().get(), 7);
        assert_eq!(estimate_duration_days(12, "TDS").unwrap().get(), 4);
        assert_eq!(estimate_duration_days(12, "QID").unwrap().get(), 3);
    }

    #[test]
    fn test_small_quantities_round_up_to_one_day() {
        assert_eq!(estimate_duration_days(1, "TDS").unwrap().get(), 1);
    }

    #[test]
    fn test_unknown_or_degenerate_patterns_yield_none() {
        assert!(estimate_duration_days(30, "as needed").is_none());
        assert!(estimate_duration_days(30, "").is_none());
        assert!(estimate_duration_days(30, "0-0-0").is_none());
        assert!(estimate_duration_days(0, "OD").is_none());
    }
}
