//! Explicit present/absent marker for partial updates.
//!
//! A field wrapped in [`Patch`] deserializes to [`Patch::Absent`] when the key is missing from the
//! request body (pair it with `#[serde(default)]`) and to [`Patch::Present`] when the key is
//! supplied. Nullable fields use `Patch<Option<T>>`, so an explicit `null` becomes
//! `Present(None)` and clears the stored value, while a missing key leaves it untouched.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A field of a partial update: either supplied by the caller or left out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Patch<T> {
    /// The caller did not mention the field.
    Absent,
    /// The caller supplied a value for the field.
    Present(T),
}

impl<T> Default for Patch<T> {
    fn default() -> Self {
        Self::Absent
    }
}

impl<T> Patch<T> {
    /// Whether the caller supplied this field.
    pub fn is_present(&self) -> bool {
        matches!(self, Self::Present(_))
    }

    /// Borrow the supplied value, if any.
    pub fn as_present(&self) -> Option<&T> {
        match self {
            Self::Present(value) => Some(value),
            Self::Absent => None,
        }
    }

    /// Map the supplied value, keeping absence.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Patch<U> {
        match self {
            Self::Present(value) => Patch::Present(f(value)),
            Self::Absent => Patch::Absent,
        }
    }

    /// Overwrite `target` when a value was supplied. Returns `true` if it was.
    pub fn apply_to(self, target: &mut T) -> bool {
        match self {
            Self::Present(value) => {
                *target = value;
                true
            }
            Self::Absent => false,
        }
    }
}

impl<T> From<Option<T>> for Patch<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Absent, Self::Present)
    }
}

impl<'de, T> Deserialize<'de> for Patch<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        T::deserialize(deserializer).map(Self::Present)
    }
}

/// Present values serialize as the inner value; absent ones as `null`.
impl<T> Serialize for Patch<T>
where
    T: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Present(value) => value.serialize(serializer),
            Self::Absent => serializer.serialize_none(),
        }
    }
}
