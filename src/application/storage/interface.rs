use crate::domain::FileName;
use tokio::io;

/// Byte storage backing the shared file collection.
#[async_trait::async_trait]
pub trait StorageInterface: Send + Sync + 'static {
    async fn read_bytes(&self, name: &FileName) -> StorageResult<Vec<u8>>;
    async fn write_bytes(&self, name: &FileName, contents: &[u8]) -> StorageResult<()>;
    async fn delete(&self, name: &FileName) -> StorageResult<()>;
    async fn exists(&self, name: &FileName) -> bool;
    async fn list(&self) -> StorageResult<Vec<FileName>>;
}

pub type StorageResult<T> = Result<T, StorageError>;

#[derive(Debug)]
pub enum StorageError {
    NotFound,
    Failure(String),
}

impl StorageError {
    pub fn new(msg: &str) -> Self {
        Self::Failure(msg.to_string())
    }
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::NotFound => f.write_str("file not found in storage"),
            StorageError::Failure(s) => f.write_str(s),
        }
    }
}

impl std::error::Error for StorageError {}

impl From<io::Error> for StorageError {
    fn from(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => Self::NotFound,
            _ => Self::Failure(err.to_string()),
        }
    }
}

impl From<StorageError> for io::Error {
    fn from(value: StorageError) -> Self {
        match value {
            StorageError::NotFound => io::Error::from(io::ErrorKind::NotFound),
            StorageError::Failure(s) => io::Error::other(s),
        }
    }
}
