//! Validated domain newtypes shared across the MediScribe crates.
//!
//! Upstream extraction output is messy, so these types draw the line between
//! "tolerate and default" and "reject": a medicine must at least have a name
//! ([`NonEmptyText`]), while a nonsensical treatment duration is clamped to a
//! safe minimum ([`DurationDays`]) rather than refused.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Errors that can occur when constructing validated text types.
#[derive(Debug, thiserror::Error)]
pub enum TextError {
    /// The input text was empty or contained only whitespace.
    #[error("Text cannot be empty")]
    Empty,
}

/// A string guaranteed to contain at least one non-whitespace character.
///
/// Input is trimmed of leading and trailing whitespace on construction.
/// Used for fields that make a record meaningless when blank, such as a
/// medicine's name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NonEmptyText(String);

impl NonEmptyText {
    /// Creates a new `NonEmptyText`, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns `TextError::Empty` if the trimmed input is empty.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TextError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the inner string as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NonEmptyText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for NonEmptyText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<NonEmptyText> for String {
    fn from(text: NonEmptyText) -> Self {
        text.0
    }
}

impl Serialize for NonEmptyText {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for NonEmptyText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NonEmptyText::new(&s).map_err(serde::de::Error::custom)
    }
}

/// A treatment duration in whole days, guaranteed to be at least 1.
///
/// Upstream records sometimes carry a zero or negative duration. Emitting a
/// zero-count recurrence downstream would silently produce a reminder that
/// never fires, so construction clamps any value below 1 up to 1. The default
/// is a single day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct DurationDays(u32);

impl DurationDays {
    /// Creates a `DurationDays`, clamping 0 to 1.
    pub fn new(days: u32) -> Self {
        Self(days.max(1))
    }

    /// Creates a `DurationDays` from a possibly-negative integer, clamping
    /// anything below 1 up to 1.
    pub fn from_signed(days: i64) -> Self {
        if days < 1 {
            Self(1)
        } else {
            Self(u32::try_from(days).unwrap_or(u32::MAX))
        }
    }

    /// Returns the duration in days.
    pub fn get(&self) -> u32 {
        self.0
    }
}

impl Default for DurationDays {
    fn default() -> Self {
        Self(1)
    }
}

impl std::fmt::Display for DurationDays {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for DurationDays {
    fn from(days: u32) -> Self {
        Self::new(days)
    }
}

impl Serialize for DurationDays {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u32(self.0)
    }
}

impl<'de> Deserialize<'de> for DurationDays {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let days = i64::deserialize(deserializer)?;
        Ok(DurationDays::from_signed(days))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_empty_text_trims_input() {
        let text = NonEmptyText::new("  Paracetamol  ").unwrap();
        assert_eq!(text.as_str(), "Paracetamol");
    }

    #[test]
    fn test_non_empty_text_rejects_blank_input() {
        assert!(matches!(NonEmptyText::new(""), Err(TextError::Empty)));
        assert!(matches!(NonEmptyText::new("   "), Err(TextError::Empty)));
    }

    #[test]
    fn test_duration_days_clamps_zero_to_one() {
        assert_eq!(DurationDays::new(0).get(), 1);
        assert_eq!(DurationDays::new(5).get(), 5);
    }

    #[test]
    fn test_duration_days_clamps_negative_json_to_one() {
        let days: DurationDays = serde_json::from_str("-3").unwrap();
        assert_eq!(days.get(), 1);

        let days: DurationDays = serde_json::from_str("0").unwrap();
        assert_eq!(days.get(), 1);

        let days: DurationDays = serde_json::from_str("7").unwrap();
        assert_eq!(days.get(), 7);
    }

    #[test]
    fn test_duration_days_serialises_as_plain_integer() {
        let json = serde_json::to_string(&DurationDays::new(5)).unwrap();
        assert_eq!(json, "5");
    }
}
