#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("prescription not found: {0}")]
    NotFound(uuid::Uuid),
    #[error("failed to create storage directory: {0}")]
    StorageDirCreation(std::io::Error),
    #[error("failed to write prescription file: {0}")]
    FileWrite(std::io::Error),
    #[error("failed to read prescription file: {0}")]
    FileRead(std::io::Error),
    #[error("failed to delete prescription directory: {0}")]
    Delete(std::io::Error),
    #[error("failed to serialise prescription: {0}")]
    Serialization(serde_json::Error),
    #[error("failed to deserialise prescription: {0}")]
    Deserialization(serde_json::Error),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;
