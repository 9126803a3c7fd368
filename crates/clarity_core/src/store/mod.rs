//! JSON persistence with fallback semantics.
//!
//! # Responsibility
//! - Serialize collections into raw backend values and back.
//! - Absorb every storage failure: reads fall back, writes are dropped.
//! - Remember that a failure happened so views can warn the user.
//!
//! # Invariants
//! - `get` and `set` never return an error and never panic; `try_get`
//!   only reports backend failures, never decode failures.
//! - Failures are logged with the key only; payloads are never logged.
//! - Once `degraded()` turns true it stays true for this store.

mod backend;
mod sqlite;

pub use backend::{KvBackend, MemoryKvBackend, StorageError, StorageResult};
pub use sqlite::SqliteKvBackend;

use log::{debug, error};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::cell::Cell;

/// Typed JSON view over a raw key-value backend.
pub struct JsonStore<B: KvBackend> {
    backend: B,
    degraded: Cell<bool>,
}

impl<B: KvBackend> JsonStore<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            degraded: Cell::new(false),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Reads and decodes the value under `key`.
    ///
    /// Returns `fallback` when the key is absent or empty, when the backend
    /// fails, or when the stored text is not valid for `T`.
    pub fn get<T: DeserializeOwned>(&self, key: &str, fallback: T) -> T {
        self.try_get(key).ok().flatten().unwrap_or(fallback)
    }

    /// Reads `key`, keeping a backend failure apart from "nothing stored".
    ///
    /// Absent, blank and undecodable values all come back as `Ok(None)`;
    /// only a failing backend yields `Err`, so callers can avoid writing
    /// over a value they could not see.
    pub fn try_get<T: DeserializeOwned>(&self, key: &str) -> StorageResult<Option<T>> {
        let raw = match self.backend.get_item(key) {
            Ok(Some(raw)) if !raw.trim().is_empty() => raw,
            Ok(_) => {
                debug!("event=store_read module=store status=miss key={key}");
                return Ok(None);
            }
            Err(err) => {
                error!("event=store_read module=store status=error key={key} error={err}");
                self.degraded.set(true);
                return Err(err);
            }
        };

        match serde_json::from_str::<T>(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(err) => {
                error!(
                    "event=store_read module=store status=error key={key} error_code=decode_failed error={err}"
                );
                self.degraded.set(true);
                Ok(None)
            }
        }
    }

    /// Encodes and writes `value` under `key`.
    ///
    /// A failed write is logged and swallowed; the caller's in-memory state
    /// then runs ahead of the persisted copy until the next good write.
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(err) => {
                error!(
                    "event=store_write module=store status=error key={key} error_code=encode_failed error={err}"
                );
                self.degraded.set(true);
                return;
            }
        };

        match self.backend.set_item(key, &raw) {
            Ok(()) => debug!(
                "event=store_write module=store status=ok key={key} bytes={}",
                raw.len()
            ),
            Err(err) => {
                error!("event=store_write module=store status=error key={key} error={err}");
                self.degraded.set(true);
            }
        }
    }

    /// Whether any read or write on this store has failed.
    pub fn degraded(&self) -> bool {
        self.degraded.get()
    }
}
