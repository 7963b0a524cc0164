//! Medicine records as produced by the upstream extraction pipeline.
//!
//! The field names and shapes here are an external contract shared with the
//! extraction collaborator. Records arrive from a vision-model pass over a
//! handwritten prescription, so every field except the medicine name is
//! defaulted when absent rather than rejected.

use mediscribe_types::{DurationDays, NonEmptyText};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The physical form of a medicine.
///
/// Unknown inputs fold to `Other` so that novel forms coming out of the
/// extraction pipeline never fail a whole prescription.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MedicineType {
    #[default]
    Tablet,
    Syrup,
    Ointment,
    Injection,
    #[serde(other)]
    Other,
}

impl MedicineType {
    /// Human-readable label, capitalised for display.
    pub fn label(&self) -> &'static str {
        match self {
            MedicineType::Tablet => "Tablet",
            MedicineType::Syrup => "Syrup",
            MedicineType::Ointment => "Ointment",
            MedicineType::Injection => "Injection",
            MedicineType::Other => "Medicine",
        }
    }
}

impl std::fmt::Display for MedicineType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            MedicineType::Tablet => "tablet",
            MedicineType::Syrup => "syrup",
            MedicineType::Ointment => "ointment",
            MedicineType::Injection => "injection",
            MedicineType::Other => "other",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for MedicineType {
    type Err = std::convert::Infallible;

    /// Case-insensitive; anything unrecognised becomes `Other`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "tablet" => MedicineType::Tablet,
            "syrup" => MedicineType::Syrup,
            "ointment" => MedicineType::Ointment,
            "injection" => MedicineType::Injection,
            _ => MedicineType::Other,
        })
    }
}

/// One medicine entry on a prescription.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Medicine {
    /// Name as read from the prescription, e.g. "Paracetamol".
    pub medicine_name: NonEmptyText,

    /// Physical form; defaults to `tablet` when the extractor omits it.
    #[serde(default)]
    pub medicine_type: MedicineType,

    /// Free-form clinical shorthand, e.g. "1-0-1", "OD", "BD".
    #[serde(default)]
    pub dosage_pattern: String,

    /// Free-text administration cue, e.g. "After food".
    #[serde(default)]
    pub instructions: String,

    /// Total units dispensed, when legible on the prescription.
    #[serde(default)]
    pub total_quantity: Option<u32>,

    /// Treatment duration in days; clamped to at least 1.
    #[serde(default)]
    pub duration_days: DurationDays,

    /// Medical explanation of the medicine, for display.
    #[serde(default)]
    pub description: String,

    /// What the medicine is for, e.g. "Pain relief".
    #[serde(default)]
    pub purpose: String,
}
