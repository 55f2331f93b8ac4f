use serde::{Deserialize, Deserializer};

/// Deserializes a field that distinguishes "absent" from "null".
///
/// Use with `#[serde(default, deserialize_with = "patch::double_option")]` on an
/// `Option<Option<T>>`: a missing key stays `None`, `null` becomes `Some(None)`
/// and a value becomes `Some(Some(value))`.
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
