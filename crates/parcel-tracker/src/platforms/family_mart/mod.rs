//! FamilyMart: one JSON POST to a legacy-TLS ASP.NET page method.

pub mod parse;
mod tls;

use parcel_core::{Platform, TrackingInfo};

use crate::error::TrackerError;
use crate::normalize::{contains_any, normalize_timestamp};
use crate::session::join_url;
use crate::settings::TrackerSettings;
use crate::tracker::Tracker;

use parse::{parse_order_detail, OrderDetail};
use tls::LegacyTransport;

pub const DEFAULT_BASE_URL: &str = "https://ecfme.fme.com.tw";
const SEARCH_PATH: &str = "/FMEDCFPWebV2_II/list.aspx/GetOrderDetail";
const JSON_CONTENT_TYPE: &str = "application/json; charset=UTF-8";

const DELIVERED_PHRASES: &[&str] = &["貨件配達取件店舖", "已完成取件"];

pub struct FamilyMartTracker {
    settings: TrackerSettings,
    base_url: String,
}

impl FamilyMartTracker {
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

#[must_use]
pub fn is_delivered(status: &str) -> bool {
    contains_any(status, DELIVERED_PHRASES)
}

/// Maps the latest status entry into [`TrackingInfo`]; an empty list is
/// `None`.
#[must_use]
pub fn to_tracking_info(detail: OrderDetail) -> Option<TrackingInfo> {
    let latest = detail.list.first()?;
    let order_id = latest.order_no.trim().to_owned();
    let status = latest.status.trim().to_owned();
    let time = normalize_timestamp(&format!("{}:00", latest.order_date.trim()));

    Some(TrackingInfo {
        order_id,
        platform: Platform::FamilyMart,
        is_delivered: is_delivered(&status),
        status,
        time: Some(time),
        raw_data: serde_json::to_value(&detail).unwrap_or_default(),
    })
}

impl Tracker for FamilyMartTracker {
    fn platform(&self) -> Platform {
        Platform::FamilyMart
    }

    async fn fetch(&self, order_id: &str) -> Result<Option<TrackingInfo>, TrackerError> {
        let transport = LegacyTransport::new(&self.settings)?;
        let payload = serde_json::json!({
            "EC_ORDER_NO": order_id,
            "ORDER_NO": order_id,
            "RCV_USER_NAME": null,
        });

        tracing::info!(platform = "family_mart", order_id, "posting order detail request");
        let body = transport
            .post_json(
                &join_url(&self.base_url, SEARCH_PATH)?,
                JSON_CONTENT_TYPE,
                payload.to_string(),
            )
            .await?;

        let detail = parse_order_detail(&body)?;
        Ok(to_tracking_info(detail))
    }
}
