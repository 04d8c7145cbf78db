//! Shopee tracking API payloads.

use serde::Deserialize;

use crate::error::TrackerError;

#[derive(Debug, Clone, Deserialize)]
pub struct TrackingData {
    pub sls_tracking_number: String,
    /// Newest event first.
    #[serde(default)]
    pub tracking_list: Vec<TrackingEvent>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrackingEvent {
    /// Machine-readable status code such as `SP_Ready_Collection`.
    pub status: String,
    /// Human-readable description shown to the recipient.
    pub message: String,
    /// UNIX seconds.
    pub timestamp: i64,
}

/// Returns the `data` object of a search response, or `None` when it is
/// absent, `null`, or empty.
///
/// # Errors
///
/// Returns [`TrackerError::Deserialize`] if the body is not JSON.
pub fn extract_data(body: &str) -> Result<Option<serde_json::Value>, TrackerError> {
    let mut envelope: serde_json::Value =
        serde_json::from_str(body).map_err(|e| TrackerError::Deserialize {
            context: "shopee tracking search".to_owned(),
            source: e,
        })?;

    let data = envelope
        .get_mut("data")
        .map(serde_json::Value::take)
        .unwrap_or_default();
    let is_empty = match &data {
        serde_json::Value::Null => true,
        serde_json::Value::Object(map) => map.is_empty(),
        serde_json::Value::Array(items) => items.is_empty(),
        _ => false,
    };
    Ok((!is_empty).then_some(data))
}

/// Types the `data` object.
///
/// # Errors
///
/// Returns [`TrackerError::Deserialize`] when required fields are missing.
pub fn parse_tracking_data(data: &serde_json::Value) -> Result<TrackingData, TrackerError> {
    TrackingData::deserialize(data).map_err(|e| TrackerError::Deserialize {
        context: "shopee tracking data".to_owned(),
        source: e,
    })
}
