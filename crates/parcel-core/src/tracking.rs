//! Normalized parcel status shared by every platform tracker.

use serde::{Deserialize, Serialize};

use crate::Platform;

/// Latest known status of one parcel on one platform.
///
/// `raw_data` keeps the platform payload for diagnostics. It is skipped by
/// serialization and ignored by equality.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackingInfo {
    /// Order number as echoed back by the platform.
    pub order_id: String,
    pub platform: Platform,
    /// Platform-native status text, usually Traditional Chinese.
    pub status: String,
    /// `YYYY-MM-DD HH:MM:SS` when the platform exposes a timestamp.
    pub time: Option<String>,
    pub is_delivered: bool,
    #[serde(skip)]
    pub raw_data: serde_json::Value,
}

impl PartialEq for TrackingInfo {
    fn eq(&self, other: &Self) -> bool {
        self.order_id == other.order_id
            && self.platform == other.platform
            && self.status == other.status
            && self.time == other.time
            && self.is_delivered == other.is_delivered
    }
}

impl Eq for TrackingInfo {}

/// The `{platform, order_id, status, time}` view forwarded to API consumers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackingSummary {
    pub platform: Platform,
    pub order_id: String,
    pub status: String,
    pub time: Option<String>,
}

impl TrackingInfo {
    #[must_use]
    pub fn summary(&self) -> TrackingSummary {
        TrackingSummary {
            platform: self.platform,
            order_id: self.order_id.clone(),
            status: self.status.clone(),
            time: self.time.clone(),
        }
    }
}
