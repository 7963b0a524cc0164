//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into
//! services. This avoids reading process-wide environment variables during
//! request handling, which can lead to inconsistent behaviour in
//! multi-threaded runtimes and test harnesses.

use crate::{StoreError, StoreResult};
use std::path::{Path, PathBuf};

/// Directory under the data root that holds prescription records.
pub const PRESCRIPTIONS_DIR_NAME: &str = "prescriptions";

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    data_dir: PathBuf,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::InvalidInput` if `data_dir` does not exist or is
    /// not a directory.
    pub fn new(data_dir: PathBuf) -> StoreResult<Self> {
        if !data_dir.is_dir() {
            return Err(StoreError::InvalidInput(format!(
                "data directory does not exist: {}",
                data_dir.display()
            )));
        }

        Ok(Self { data_dir })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn prescriptions_dir(&self) -> PathBuf {
        self.data_dir.join(PRESCRIPTIONS_DIR_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_accepts_existing_directory() {
        let temp = TempDir::new().unwrap();
        let cfg = CoreConfig::new(temp.path().to_path_buf()).unwrap();
        assert_eq!(cfg.data_dir(), temp.path());
        assert!(cfg.prescriptions_dir().ends_with(PRESCRIPTIONS_DIR_NAME));
    }

    #[test]
    fn test_config_rejects_missing_directory() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope");
        let err = CoreConfig::new(missing).expect_err("should reject missing dir");
        assert!(matches!(err, StoreError::InvalidInput(_)));
    }
}
