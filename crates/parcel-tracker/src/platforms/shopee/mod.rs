//! Shopee SPX: a single signed GET against the public tracking API.

pub mod parse;
pub mod sign;

use chrono::Utc;
use parcel_core::{Platform, TrackingInfo};
use reqwest::header::COOKIE;

use crate::error::TrackerError;
use crate::normalize::{contains_any, format_unix_local};
use crate::session::{ensure_success, join_url, stateless};
use crate::settings::TrackerSettings;
use crate::tracker::Tracker;

use parse::{extract_data, parse_tracking_data};
use sign::{tracking_token, SALT};

pub const DEFAULT_BASE_URL: &str = "https://spx.tw";
const SEARCH_PATH: &str = "/api/v2/fleet_order/tracking/search";

const DELIVERED_CODES: &[&str] = &["SP_Ready_Collection", "SP_Collection_Collected"];

pub struct ShopeeTracker {
    settings: TrackerSettings,
    base_url: String,
}

impl ShopeeTracker {
    #[must_use]
    pub fn new(settings: TrackerSettings) -> Self {
        Self::with_base_url(settings, DEFAULT_BASE_URL)
    }

    #[must_use]
    pub fn with_base_url(settings: TrackerSettings, base_url: &str) -> Self {
        Self {
            settings,
            base_url: base_url.to_owned(),
        }
    }
}

/// Delivered detection on the machine-readable status code.
#[must_use]
pub fn is_delivered(status_code: &str) -> bool {
    contains_any(status_code, DELIVERED_CODES)
}

/// Maps the `data` object into [`TrackingInfo`] using the newest event.
///
/// # Errors
///
/// Returns [`TrackerError::Deserialize`] when `data` lacks required fields.
pub fn to_tracking_info(data: serde_json::Value) -> Result<Option<TrackingInfo>, TrackerError> {
    let typed = parse_tracking_data(&data)?;
    let Some(latest) = typed.tracking_list.first() else {
        return Ok(None);
    };

    Ok(Some(TrackingInfo {
        order_id: typed.sls_tracking_number.clone(),
        platform: Platform::Shopee,
        status: latest.message.clone(),
        time: format_unix_local(latest.timestamp),
        is_delivered: is_delivered(&latest.status),
        raw_data: data,
    }))
}

impl Tracker for ShopeeTracker {
    fn platform(&self) -> Platform {
        Platform::Shopee
    }

    async fn fetch(&self, order_id: &str) -> Result<Option<TrackingInfo>, TrackerError> {
        let client = stateless(&self.settings)?;
        let token = tracking_token(order_id, Utc::now().timestamp(), SALT);

        tracing::info!(platform = "shopee", order_id, "requesting tracking info");
        let body = ensure_success(
            client
                .get(join_url(&self.base_url, SEARCH_PATH)?)
                .query(&[("sls_tracking_number", token.as_str())])
                .header(COOKIE, "fms_language=tw")
                .send()
                .await?,
        )?
        .text()
        .await?;

        match extract_data(&body)? {
            Some(data) => to_tracking_info(data),
            None => Ok(None),
        }
    }
}
