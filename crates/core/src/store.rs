//! Prescription persistence.
//!
//! The schedule logic never touches ambient global state: callers hand it an
//! implementation of [`PrescriptionStore`], constructed from [`CoreConfig`]
//! at startup. The file-backed [`FileStore`] keeps one directory per
//! prescription:
//!
//! ```text
//! <data_dir>/prescriptions/<32-hex-uuid>/prescription.json
//! ```

use crate::config::CoreConfig;
use crate::prescription::Prescription;
use crate::{StoreError, StoreResult};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use uuid::Uuid;

/// Name of the record file inside each prescription directory.
pub const PRESCRIPTION_FILENAME: &str = "prescription.json";

/// Key-value style persistence for prescriptions.
pub trait PrescriptionStore {
    /// Persists a prescription, overwriting any existing record with the
    /// same id.
    fn save(&self, prescription: &Prescription) -> StoreResult<()>;

    /// Lists all stored prescriptions, newest first.
    ///
    /// Entries that cannot be parsed are logged and skipped rather than
    /// failing the whole listing.
    fn list(&self) -> Vec<Prescription>;

    /// Fetches one prescription by id.
    fn get(&self, id: Uuid) -> StoreResult<Prescription>;

    /// Deletes one prescription by id.
    fn delete(&self, id: Uuid) -> StoreResult<()>;
}

/// File-backed prescription store.
#[derive(Clone)]
pub struct FileStore {
    cfg: Arc<CoreConfig>,
}

impl FileStore {
    pub fn new(cfg: Arc<CoreConfig>) -> Self {
        Self { cfg }
    }

    fn record_dir(&self, id: Uuid) -> PathBuf {
        self.cfg.prescriptions_dir().join(id.simple().to_string())
    }

    fn record_path(&self, id: Uuid) -> PathBuf {
        self.record_dir(id).join(PRESCRIPTION_FILENAME)
    }
}

impl PrescriptionStore for FileStore {
    fn save(&self, prescription: &Prescription) -> StoreResult<()> {
        let dir = self.record_dir(prescription.id);
        fs::create_dir_all(&dir).map_err(StoreError::StorageDirCreation)?;

        let json =
            serde_json::to_string_pretty(prescription).map_err(StoreError::Serialization)?;
        fs::write(self.record_path(prescription.id), json).map_err(StoreError::FileWrite)?;

        Ok(())
    }

    fn list(&self) -> Vec<Prescription> {
        let mut prescriptions = Vec::new();

        let entries = match fs::read_dir(self.cfg.prescriptions_dir()) {
            Ok(it) => it,
            Err(_) => return prescriptions,
        };

        for entry in entries.flatten() {
            let record_path = entry.path().join(PRESCRIPTION_FILENAME);
            if !record_path.is_file() {
                continue;
            }

            match fs::read_to_string(&record_path) {
                Ok(contents) => match serde_json::from_str::<Prescription>(&contents) {
                    Ok(prescription) => prescriptions.push(prescription),
                    Err(_) => {
                        tracing::warn!("failed to parse prescription: {}", record_path.display());
                    }
                },
                Err(_) => {
                    tracing::warn!("failed to read prescription: {}", record_path.display());
                }
            }
        }

        prescriptions.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        prescriptions
    }

    fn get(&self, id: Uuid) -> StoreResult<Prescription> {
        let path = self.record_path(id);
        if !path.is_file() {
            return Err(StoreError::NotFound(id));
        }

        let contents = fs::read_to_string(&path).map_err(StoreError::FileRead)?;
        serde_json::from_str(&contents).map_err(StoreError::Deserialization)
    }

    fn delete(&self, id: Uuid) -> StoreResult<()> {
        let dir = self.record_dir(id);
        if !dir.is_dir() {
            return Err(StoreError::NotFound(id));
        }

        fs::remove_dir_all(&dir).map_err(StoreError::Delete)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::medicine::{Medicine, MedicineType};
    use mediscribe_types::{DurationDays, NonEmptyText};
    use tempfile::TempDir;

    fn test_store(temp: &TempDir) -> FileStore {
        let cfg = CoreConfig::new(temp.path().to_path_buf()).unwrap();
        FileStore::new(Arc::new(cfg))
    }

    fn test_prescription() -> Prescription {
        let medicine = Medicine {
            medicine_name: NonEmptyText::new("Paracetamol").unwrap(),
            medicine_type: MedicineType::Tablet,
            dosage_pattern: "1-0-1".to_string(),
            instructions: "After food".to_string(),
            total_quantity: Some(10),
            duration_days: DurationDays::new(5),
            description: "Analgesic and antipyretic".to_string(),
            purpose: "Pain relief".to_string(),
        };
        Prescription::new("https://files.example/scan.jpg".to_string(), vec![medicine])
    }

    #[test]
    fn test_save_and_get_round_trip() {
        let temp = TempDir::new().unwrap();
        let store = test_store(&temp);

        let prescription = test_prescription();
        store.save(&prescription).unwrap();

        let loaded = store.get(prescription.id).unwrap();
        assert_eq!(loaded, prescription);
    }

    #[test]
    fn test_get_unknown_id_is_not_found() {
        let temp = TempDir::new().unwrap();
        let store = test_store(&temp);

        let id = Uuid::new_v4();
        let err = store.get(id).expect_err("should be missing");
        assert!(matches!(err, StoreError::NotFound(missing) if missing == id));
    }

    #[test]
    fn test_list_returns_saved_prescriptions() {
        let temp = TempDir::new().unwrap();
        let store = test_store(&temp);

        let first = test_prescription();
        let second = test_prescription();
        store.save(&first).unwrap();
        store.save(&second).unwrap();

        let listed = store.list();
        assert_eq!(listed.len(), 2);
        assert!(listed.iter().any(|p| p.id == first.id));
        assert!(listed.iter().any(|p| p.id == second.id));
    }

    #[test]
    fn test_list_skips_corrupt_entries() {
        let temp = TempDir::new().unwrap();
        let store = test_store(&temp);

        let prescription = test_prescription();
        store.save(&prescription).unwrap();

        let corrupt_dir = temp
            .path()
            .join(crate::config::PRESCRIPTIONS_DIR_NAME)
            .join(Uuid::new_v4().simple().to_string());
        fs::create_dir_all(&corrupt_dir).unwrap();
        fs::write(corrupt_dir.join(PRESCRIPTION_FILENAME), "not json").unwrap();

        let listed = store.list();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, prescription.id);
    }

    #[test]
    fn test_list_on_empty_data_dir() {
        let temp = TempDir::new().unwrap();
        let store = test_store(&temp);
        assert!(store.list().is_empty());
    }

    #[test]
    fn test_delete_removes_record() {
        let temp = TempDir::new().unwrap();
        let store = test_store(&temp);

        let prescription = test_prescription();
        store.save(&prescription).unwrap();
        store.delete(prescription.id).unwrap();

        assert!(matches!(
            store.get(prescription.id),
            Err(StoreError::NotFound(_))
        ));
        assert!(matches!(
            store.delete(prescription.id),
            Err(StoreError::NotFound(_))
        ));
    }

    #[test]
    fn test_save_overwrites_existing_record() {
        let temp = TempDir::new().unwrap();
        let store = test_store(&temp);

        let mut prescription = test_prescription();
        store.save(&prescription).unwrap();

        prescription.doctor_name = Some("Dr Rao".to_string());
        store.save(&prescription).unwrap();

        let loaded = store.get(prescription.id).unwrap();
        assert_eq!(loaded.doctor_name.as_deref(), Some("Dr Rao"));
        assert_eq!(store.list().len(), 1);
    }
}
