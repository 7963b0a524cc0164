//! REST request/response bodies.
//!
//! These are deliberately separate from the core types: the HTTP surface
//! carries plain strings and integers so that a lenient payload (unknown
//! medicine type, negative duration) can be folded into the core's validated
//! types in one place, and so that core stays free of OpenAPI concerns.

use chrono::{DateTime, Utc};
use mediscribe_core::{Medicine, Prescription};
use mediscribe_types::{DurationDays, NonEmptyText, TextError};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

/// One medicine entry as carried over HTTP.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MedicineDto {
    pub medicine_name: String,
    #[serde(default)]
    pub medicine_type: String,
    #[serde(default)]
    pub dosage_pattern: String,
    #[serde(default)]
    pub instructions: String,
    #[serde(default)]
    pub total_quantity: Option<u32>,
    #[serde(default)]
    pub duration_days: i64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub purpose: String,
}

impl From<Medicine> for MedicineDto {
    fn from(medicine: Medicine) -> Self {
        Self {
            medicine_name: medicine.medicine_name.to_string(),
            medicine_type: medicine.medicine_type.to_string(),
            dosage_pattern: medicine.dosage_pattern,
            instructions: medicine.instructions,
            total_quantity: medicine.total_quantity,
            duration_days: i64::from(medicine.duration_days.get()),
            description: medicine.description,
            purpose: medicine.purpose,
        }
    }
}

impl TryFrom<MedicineDto> for Medicine {
    type Error = TextError;

    fn try_from(dto: MedicineDto) -> Result<Self, Self::Error> {
        Ok(Medicine {
            medicine_name: NonEmptyText::new(&dto.medicine_name)?,
            medicine_type: dto.medicine_type.parse().expect("parsing is infallible"),
            dosage_pattern: dto.dosage_pattern,
            instructions: dto.instructions,
            total_quantity: dto.total_quantity,
            duration_days: DurationDays::from_signed(dto.duration_days),
            description: dto.description,
            purpose: dto.purpose,
        })
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PrescriptionDto {
    pub id: Uuid,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
    pub doctor_name: Option<String>,
    pub patient_name: Option<String>,
    pub notes: Option<String>,
    pub medicines: Vec<MedicineDto>,
}

impl From<Prescription> for PrescriptionDto {
    fn from(prescription: Prescription) -> Self {
        Self {
            id: prescription.id,
            image_url: prescription.image_url,
            created_at: prescription.created_at,
            doctor_name: prescription.doctor_name,
            patient_name: prescription.patient_name,
            notes: prescription.notes,
            medicines: prescription
                .medicines
                .into_iter()
                .map(MedicineDto::from)
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreatePrescriptionReq {
    pub image_url: String,
    #[serde(default)]
    pub doctor_name: Option<String>,
    #[serde(default)]
    pub patient_name: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub medicines: Vec<MedicineDto>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CreatePrescriptionRes {
    pub id: Uuid,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DeletePrescriptionRes {
    pub success: bool,
}

/// Request to derive a reminder for one medicine.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ReminderReq {
    pub medicine_name: String,
    #[serde(default)]
    pub medicine_type: String,
    #[serde(default)]
    pub dosage_pattern: String,
    #[serde(default)]
    pub instructions: String,
    #[serde(default = "default_duration_days")]
    pub duration_days: i64,
    #[serde(default)]
    pub purpose: String,
}

fn default_duration_days() -> i64 {
    1
}

/// The derived reminder: the deep link plus the resolved schedule, for
/// display alongside it.
#[derive(Debug, Serialize, ToSchema)]
pub struct ReminderRes {
    pub calendar_link: String,
    pub slots: Vec<String>,
    /// Clock time (HH:MM, 24h) anchoring the daily event.
    pub anchor_time: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub recurrence_count: u32,
}
