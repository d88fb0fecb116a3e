use derive_more::{AsRef, Deref, Display, From, Into};
use serde::{Deserialize, Serialize};

/// Display unit shown next to the value, e.g. `%` or `°C`.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    Deref,
    From,
    Into,
    AsRef,
)]
#[serde(transparent)]
pub struct Unit(String);

crate::impl_string_newtype!(Unit);

pub const MAX_DECIMALS: u8 = 2;

/// Number of fractional digits to display, clamped to `0..=2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, Deref, Serialize)]
#[serde(transparent)]
pub struct Decimals(u8);

impl Decimals {
    pub fn new(decimals: u8) -> Self {
        Self(decimals.min(MAX_DECIMALS))
    }

    pub fn get(self) -> usize {
        usize::from(self.0)
    }
}

impl From<u8> for Decimals {
    fn from(decimals: u8) -> Self {
        Self::new(decimals)
    }
}

impl<'de> Deserialize<'de> for Decimals {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        u8::deserialize(deserializer).map(Self::new)
    }
}
