//! The closed set of logistics platforms a parcel can be tracked on.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::CoreError;

/// Logistics platform identifier.
///
/// Serialized as its wire string (`seven_eleven`, `family_mart`, ...), which is
/// also the only accepted input form for [`Platform::from_str`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Platform {
    #[serde(rename = "seven_eleven")]
    SevenEleven,
    #[serde(rename = "family_mart")]
    FamilyMart,
    #[serde(rename = "ok_mart")]
    OKMart,
    #[serde(rename = "shopee")]
    Shopee,
    #[serde(rename = "lsa")]
    Lsa,
}

impl Platform {
    pub const ALL: [Platform; 5] = [
        Platform::SevenEleven,
        Platform::FamilyMart,
        Platform::OKMart,
        Platform::Shopee,
        Platform::Lsa,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Platform::SevenEleven => "seven_eleven",
            Platform::FamilyMart => "family_mart",
            Platform::OKMart => "ok_mart",
            Platform::Shopee => "shopee",
            Platform::Lsa => "lsa",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Platform::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| CoreError::InvalidPlatform(s.to_owned()))
    }
}
