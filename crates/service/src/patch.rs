//! Serde helpers for partial-update inputs.

use serde::{Deserialize, Deserializer};

/// Distinguishes an explicit `null` from an absent key: paired with `#[serde(default)]`,
/// absent stays `None`, `null` becomes `Some(None)` and a value becomes `Some(Some(v))`.
pub(crate) fn present<'de, D, T>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(de).map(Some)
}
