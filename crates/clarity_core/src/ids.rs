//! Record identifier generation.
//!
//! # Responsibility
//! - Produce a fresh opaque string id for every new record.
//!
//! # Invariants
//! - Preferred path: v4 UUID from OS randomness.
//! - Fallback path: `<epoch-millis>-<hex>` from a process-local generator.
//!   Uniqueness there is best-effort only.

use chrono::Utc;
use log::warn;
use std::sync::atomic::{AtomicU64, Ordering};
use uuid::{Builder, Uuid};

static FALLBACK_STATE: AtomicU64 = AtomicU64::new(0);

/// Returns a new unique record id.
pub fn generate_id() -> String {
    match random_uuid() {
        Ok(id) => id.to_string(),
        Err(err) => {
            warn!("event=id_generate module=ids status=fallback error={err}");
            fallback_id()
        }
    }
}

fn random_uuid() -> Result<Uuid, getrandom::Error> {
    let mut bytes = [0u8; 16];
    getrandom::fill(&mut bytes)?;
    Ok(Builder::from_random_bytes(bytes).into_uuid())
}

fn fallback_id() -> String {
    format!(
        "{}-{:x}",
        Utc::now().timestamp_millis(),
        next_pseudo_random()
    )
}

// splitmix64 over a counter seeded from the clock on first use.
fn next_pseudo_random() -> u64 {
    let seed = Utc::now().timestamp_nanos_opt().unwrap_or_default() as u64;
    let _ = FALLBACK_STATE.compare_exchange(0, seed | 1, Ordering::Relaxed, Ordering::Relaxed);
    let mut z = FALLBACK_STATE
        .fetch_add(0x9E37_79B9_7F4A_7C15, Ordering::Relaxed)
        .wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

#[cfg(test)]
mod tests {
    use super::{fallback_id, generate_id};
    use std::collections::HashSet;
    use uuid::Uuid;

    #[test]
    fn generated_ids_are_v4_uuids() {
        let id = generate_id();
        let parsed = Uuid::parse_str(&id).expect("id should be a uuid");
        assert_eq!(parsed.get_version_num(), 4);
    }

    #[test]
    fn generated_ids_do_not_repeat() {
        let ids: HashSet<String> = (0..500).map(|_| generate_id()).collect();
        assert_eq!(ids.len(), 500);
    }

    #[test]
    fn fallback_ids_have_timestamp_prefix_and_differ() {
        let first = fallback_id();
        let second = fallback_id();
        let (millis, suffix) = first.split_once('-').expect("dash separator");
        assert!(millis.parse::<i64>().is_ok());
        assert!(u64::from_str_radix(suffix, 16).is_ok());
        assert_ne!(first, second);
    }
}
