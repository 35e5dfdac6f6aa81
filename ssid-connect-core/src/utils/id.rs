//! Saved network ID generation.
//!
//! IDs are millisecond Unix timestamps rendered as decimal strings, the same
//! shape older clients wrote, so lists saved by either read back unchanged.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;

use crate::types::NetworkCredential;

/// Last value handed out by this process
static LAST_ISSUED: AtomicI64 = AtomicI64::new(0);

/// Generate a new ID that is not used by any entry in `existing`.
///
/// Within one process IDs are strictly increasing even when several are
/// issued in the same millisecond.
#[must_use]
pub fn generate_network_id(existing: &[NetworkCredential]) -> String {
    let now = Utc::now().timestamp_millis();
    let mut candidate = next_after(now);

    while existing.iter().any(|n| n.id == candidate.to_string()) {
        candidate = next_after(candidate + 1);
    }

    candidate.to_string()
}

/// Reserve and return the smallest value `>= floor` above everything issued so far.
fn next_after(floor: i64) -> i64 {
    let mut issued = floor;
    // fetch_update only fails when the closure returns None, which it never does
    let _ = LAST_ISSUED.fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
        issued = floor.max(last + 1);
        Some(issued)
    });
    issued
}
