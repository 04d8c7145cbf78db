//! LSA: a plain REST provider returning one JSON document per package.

use parcel_core::{Platform, TrackingInfo};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::TrackerError;
use crate::session::{ensure_success, stateless};
use crate::settings::TrackerSettings;
use crate::tracker::Tracker;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PackageStatus {
    pub package_id: String,
    pub status: String,
    pub status_time: Option<String>,
}

pub struct LsaTracker {
    settings: TrackerSettings,
}

impl LsaTracker {
    /// The base URL comes from [`TrackerSettings::lsa_base_url`].
    #[must_use]
    pub fn new(settings: TrackerSettings) -> Self {
        Self { settings }
    }

    fn package_url(&self, order_id: &str) -> Result<Url, TrackerError> {
        let mut url = Url::parse(&self.settings.lsa_base_url)?;
        url.path_segments_mut()
            .map_err(|()| TrackerError::Parse {
                context: "lsa base url".to_owned(),
                reason: "base url cannot carry a path".to_owned(),
            })?
            .pop_if_empty()
            .extend(["packages", order_id]);
        Ok(url)
    }
}

#[must_use]
pub fn is_delivered(status: &str) -> bool {
    status == "delivered"
}

#[must_use]
pub fn to_tracking_info(package: PackageStatus) -> TrackingInfo {
    TrackingInfo {
        order_id: package.package_id.clone(),
        platform: Platform::Lsa,
        status: package.status.clone(),
        time: package.status_time.clone(),
        is_delivered: is_delivered(&package.status),
        raw_data: serde_json::to_value(&package).unwrap_or_default(),
    }
}

impl Tracker for LsaTracker {
    fn platform(&self) -> Platform {
        Platform::Lsa
    }

    async fn fetch(&self, order_id: &str) -> Result<Option<TrackingInfo>, TrackerError> {
        let client = stateless(&self.settings)?;
        let url = self.package_url(order_id)?;

        tracing::info!(platform = "lsa", order_id, "requesting package status");
        let body = ensure_success(client.get(url).send().await?)?.text().await?;
        let package: PackageStatus =
            serde_json::from_str(&body).map_err(|e| TrackerError::Deserialize {
                context: "lsa package".to_owned(),
                source: e,
            })?;

        Ok(Some(to_tracking_info(package)))
    }
}
