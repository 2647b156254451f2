//! Money amounts shared by the salary and expense slices.
//!
//! # Invariants
//! - Only finite amounts are persisted; JSON has no encoding for NaN or
//!   infinity and would write them as `null`.
//! - A stored `null` amount decodes as `0.0` without invalidating the rest
//!   of its slice.

use serde::{Deserialize, Deserializer};

/// Whether `amount` can be stored and read back unchanged.
pub fn is_storable_amount(amount: f64) -> bool {
    amount.is_finite()
}

/// `deserialize_with` hook reading JSON `null` as `0.0`.
pub(crate) fn lenient_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0))
}
