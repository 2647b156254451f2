//! Local key-value storage facility and its JSON adapter.
//!
//! # Responsibility
//! - Define the `get/set/delete` contract every storage backend implements.
//! - Provide an in-memory backend (tests, ephemeral sessions) and a SQLite
//!   backend (durable local storage).
//! - Layer JSON encoding and failure isolation on top (`StoreAdapter`).
//!
//! # Invariants
//! - Backends store opaque UTF-8 text; they never interpret values.
//! - Backends are synchronous and single-threaded.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod adapter;
pub mod memory;
pub mod sqlite;

pub use adapter::StoreAdapter;
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

pub type StoreResult<T> = Result<T, StoreError>;

/// Failure reported by a storage backend.
#[derive(Debug)]
pub enum StoreError {
    /// Backend cannot be reached at all.
    Unavailable(String),
    /// Write would push the backend past its byte budget.
    QuotaExceeded { key: String, limit_bytes: usize },
    Db(DbError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable(reason) => write!(f, "storage unavailable: {reason}"),
            Self::QuotaExceeded { key, limit_bytes } => write!(
                f,
                "storage quota of {limit_bytes} bytes exceeded while writing `{key}`"
            ),
            Self::Db(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Unavailable(_) | Self::QuotaExceeded { .. } => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// String-keyed storage facility.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> StoreResult<()>;
    /// Removing an absent key succeeds.
    fn delete(&self, key: &str) -> StoreResult<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        (**self).set(key, value)
    }

    fn delete(&self, key: &str) -> StoreResult<()> {
        (**self).delete(key)
    }
}
