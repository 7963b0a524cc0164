//! Prescription records.

use crate::medicine::Medicine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A processed prescription: the scanned image reference plus the structured
/// medicine entries extracted from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prescription {
    pub id: Uuid,

    /// Where the original scan lives (an external object store URL).
    pub image_url: String,

    pub created_at: DateTime<Utc>,

    #[serde(default)]
    pub doctor_name: Option<String>,

    #[serde(default)]
    pub patient_name: Option<String>,

    #[serde(default)]
    pub notes: Option<String>,

    #[serde(default)]
    pub medicines: Vec<Medicine>,
}

impl Prescription {
    /// Creates a new prescription with a fresh identifier, stamped now.
    pub fn new(image_url: String, medicines: Vec<Medicine>) -> Self {
        Self {
            id: Uuid::new_v4(),
            image_url,
            created_at: Utc::now(),
            doctor_name: None,
            patient_name: None,
            notes: None,
            medicines,
        }
    }
}
