//! Money representation and serialization-boundary rounding
//!
//! All arithmetic runs on unrounded `f64`. Rounding to cents happens only
//! when a value is serialized, so error never compounds across months.

use serde::Serializer;

/// Monetary amount in the caller's (already converted) currency
pub type Money = f64;

/// Round to cents, half away from zero
pub fn round_cents(value: Money) -> Money {
    (value * 100.0).round() / 100.0
}

/// Serde helper: serialize a money field rounded to cents
pub fn serialize_cents<S>(value: &Money, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_f64(round_cents(*value))
}

/// Serde helper for `Option<Money>` fields
pub fn serialize_cents_opt<S>(value: &Option<Money>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(v) => serializer.serialize_some(&round_cents(*v)),
        None => serializer.serialize_none(),
    }
}
