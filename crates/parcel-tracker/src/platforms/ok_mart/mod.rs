//! OKMart: a validation cookie followed by a GET of the result page.

pub mod parse;

use parcel_core::{Platform, TrackingInfo};
use reqwest::header::{COOKIE, SET_COOKIE};

use crate::error::TrackerError;
use crate::session::{ensure_success, join_url, stateless};
use crate::settings::TrackerSettings;
use crate::tracker::Tracker;

use parse::{extract_validate_code, parse_result_page, ResultFields};

pub const DEFAULT_BASE_URL: &str = "https://ecservice.okmart.com.tw";
const VALIDATE_PATH: &str = "/Tracking/ValidateNumber.ashx";
const RESULT_PATH: &str = "/Tracking/Result";

/// Statuses that count as delivered. Matched exactly.
const DELIVERED_STATUSES: &[&str] = &["已送達", "已取貨"];

pub struct OKMartTracker {
    settings: TrackerSettings,
    base_url: String,
}

impl OKMartTracker {
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

    async fn validate_code(&self, client: &reqwest::Client) -> Result<String, TrackerError> {
        let response = ensure_success(
            client
                .get(join_url(&self.base_url, VALIDATE_PATH)?)
                .send()
                .await?,
        )?;
        let cookies = response
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .collect::<Vec<_>>()
            .join(", ");

        extract_validate_code(&cookies).ok_or_else(|| {
            TrackerError::Challenge("validation cookie missing from response".to_owned())
        })
    }
}

#[must_use]
pub fn is_delivered(status: &str) -> bool {
    DELIVERED_STATUSES.contains(&status)
}

/// Maps the scraped fields into [`TrackingInfo`].
///
/// A page without an order number or a status is an unknown order.
#[must_use]
pub fn to_tracking_info(fields: ResultFields) -> Option<TrackingInfo> {
    let order_id = fields.od_no.clone().filter(|s| !s.is_empty())?;
    let status = fields.status.clone()?;

    Some(TrackingInfo {
        order_id,
        platform: Platform::OKMart,
        is_delivered: is_delivered(&status),
        status,
        time: None,
        raw_data: serde_json::to_value(&fields).unwrap_or_default(),
    })
}

impl Tracker for OKMartTracker {
    fn platform(&self) -> Platform {
        Platform::OKMart
    }

    async fn fetch(&self, order_id: &str) -> Result<Option<TrackingInfo>, TrackerError> {
        let client = stateless(&self.settings)?;

        tracing::info!(platform = "ok_mart", order_id, "requesting validation code");
        let code = self.validate_code(&client).await?;

        tracing::info!(platform = "ok_mart", order_id, "requesting result page");
        let cookie = format!("ValidateNumber=code={code}&odno={order_id}&cutknm=&cutktl=");
        let html = ensure_success(
            client
                .get(join_url(&self.base_url, RESULT_PATH)?)
                .query(&[("inputOdNo", order_id), ("inputCode1", code.as_str())])
                .header(COOKIE, cookie)
                .send()
                .await?,
        )?
        .text()
        .await?;

        Ok(to_tracking_info(parse_result_page(&html)))
    }
}
