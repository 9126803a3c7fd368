//! Persisted record shapes for the four wellness collections.
//!
//! # Responsibility
//! - Define the JSON wire shape of each collection record.
//! - Keep per-record mutation rules (streaks, progress) next to the data.
//!
//! # Invariants
//! - Every record is identified by an opaque `RecordId`, unique within its
//!   collection.
//! - Field names serialize as camelCase to match the stored layout.

pub mod assessment;
pub mod goal;
pub mod habit;
pub mod mood;

/// Opaque record identifier.
///
/// Kept as a string because stored data may carry either UUIDs or the
/// timestamp-based fallback ids.
pub type RecordId = String;
