pub mod blob;
pub mod keys;
pub mod repository;

pub use blob::{BlobMetadata, BlobStore, FsBlobStore};
pub use repository::MeetingStore;

use thiserror::Error;

use crate::db::DatabaseError;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    #[error("Invalid blob key: {0}")]
    InvalidKey(String),
}
