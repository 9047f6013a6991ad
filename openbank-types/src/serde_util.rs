//! Serde helpers for the loosely typed parts of the API.

use serde::{Deserialize, Deserializer};

/// Decodes JSON `null` as `T::default()`.
///
/// Used for descriptor structs the API sometimes sends as `null` instead of
/// omitting them.
pub(crate) fn null_to_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
