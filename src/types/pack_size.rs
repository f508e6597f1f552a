use crate::error::RegistryError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU32;

/// Number of items held by one pack. Always positive.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u32")]
pub struct PackSize(NonZeroU32);

impl PackSize {
    /// Returns `None` for zero.
    pub const fn new(size: u32) -> Option<Self> {
        match NonZeroU32::new(size) {
            Some(size) => Some(Self(size)),
            None => None,
        }
    }

    pub fn value(&self) -> u32 {
        self.0.get()
    }
}

impl TryFrom<i64> for PackSize {
    type Error = RegistryError;

    /// Rejects zero, negative and out-of-range sizes with `InvalidSize`.
    fn try_from(size: i64) -> Result<Self, Self::Error> {
        u32::try_from(size)
            .ok()
            .and_then(PackSize::new)
            .ok_or(RegistryError::InvalidSize { size })
    }
}

impl From<PackSize> for u32 {
    fn from(size: PackSize) -> Self {
        size.value()
    }
}

impl fmt::Display for PackSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
