//! Raw string key-value backends.
//!
//! # Responsibility
//! - Define the host storage contract (`KvBackend`) used by `JsonStore`.
//! - Provide an in-memory backend with quota and outage simulation.
//!
//! # Invariants
//! - Backends store raw strings only; serialization lives in `JsonStore`.
//! - A failed `set_item` leaves the previous value in place.

use crate::db::DbError;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StorageResult<T> = Result<T, StorageError>;

/// Failure reported by a raw storage backend.
#[derive(Debug)]
pub enum StorageError {
    Db(DbError),
    QuotaExceeded {
        key: String,
        required_bytes: usize,
        quota_bytes: usize,
    },
    Unavailable(String),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::QuotaExceeded {
                key,
                required_bytes,
                quota_bytes,
            } => write!(
                f,
                "storage quota exceeded writing `{key}`: {required_bytes} bytes > {quota_bytes}"
            ),
            Self::Unavailable(reason) => write!(f, "storage unavailable: {reason}"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for StorageError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Host durable key-value storage.
pub trait KvBackend {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> StorageResult<()>;
}

/// Process-local backend for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryKvBackend {
    entries: RefCell<HashMap<String, String>>,
    quota_bytes: Option<usize>,
    unavailable: bool,
    failing_reads: Cell<usize>,
}

impl MemoryKvBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rejects writes that would push total key+value bytes above `quota_bytes`.
    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            quota_bytes: Some(quota_bytes),
            ..Self::default()
        }
    }

    /// A backend whose every call fails, like a browser with storage disabled.
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    /// Makes the next `count` reads fail while writes keep working, like a
    /// database that stays locked past its busy timeout.
    pub fn fail_next_reads(&self, count: usize) {
        self.failing_reads.set(count);
    }

    /// Writes a raw value directly, bypassing quota. Used to stage fixtures.
    pub fn insert_raw(&self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.borrow_mut().insert(key.into(), value.into());
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn used_bytes_without(&self, key: &str) -> usize {
        self.entries
            .borrow()
            .iter()
            .filter(|(existing, _)| existing.as_str() != key)
            .map(|(existing, value)| existing.len() + value.len())
            .sum()
    }
}

impl KvBackend for MemoryKvBackend {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        if self.unavailable {
            return Err(StorageError::Unavailable("memory backend disabled".to_string()));
        }
        let failing = self.failing_reads.get();
        if failing > 0 {
            self.failing_reads.set(failing - 1);
            return Err(StorageError::Unavailable("read failed".to_string()));
        }
        Ok(self.raw(key))
    }

    fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
        if self.unavailable {
            return Err(StorageError::Unavailable("memory backend disabled".to_string()));
        }
        if let Some(quota_bytes) = self.quota_bytes {
            let required_bytes = self.used_bytes_without(key) + key.len() + value.len();
            if required_bytes > quota_bytes {
                return Err(StorageError::QuotaExceeded {
                    key: key.to_string(),
                    required_bytes,
                    quota_bytes,
                });
            }
        }
        self.insert_raw(key, value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{KvBackend, MemoryKvBackend, StorageError};

    #[test]
    fn memory_backend_overwrites_values() {
        let backend = MemoryKvBackend::new();
        backend.set_item("k", "1").unwrap();
        backend.set_item("k", "2").unwrap();
        assert_eq!(backend.get_item("k").unwrap().as_deref(), Some("2"));
        assert_eq!(backend.get_item("missing").unwrap(), None);
    }

    #[test]
    fn quota_rejection_keeps_previous_value() {
        let backend = MemoryKvBackend::with_quota(8);
        backend.set_item("k", "small").unwrap();

        let err = backend.set_item("k", "far too large").unwrap_err();
        assert!(matches!(err, StorageError::QuotaExceeded { .. }));
        assert_eq!(backend.raw("k").as_deref(), Some("small"));
    }

    #[test]
    fn failing_reads_recover_and_leave_writes_working() {
        let backend = MemoryKvBackend::new();
        backend.fail_next_reads(1);

        assert!(backend.get_item("k").is_err());
        backend.set_item("k", "v").unwrap();
        assert_eq!(backend.get_item("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn unavailable_backend_fails_every_call() {
        let backend = MemoryKvBackend::unavailable();
        assert!(backend.get_item("k").is_err());
        assert!(backend.set_item("k", "v").is_err());
    }
}
