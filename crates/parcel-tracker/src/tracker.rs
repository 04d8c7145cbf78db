//! The uniform tracking contract and the factory that dispatches on
//! [`Platform`].

use std::future::Future;

use parcel_core::{CoreError, Platform, TrackingInfo};

use crate::error::TrackerError;
use crate::platforms::{
    FamilyMartTracker, LsaTracker, OKMartTracker, SevenElevenTracker, ShopeeTracker,
};
use crate::settings::TrackerSettings;

/// One platform's tracking pipeline: challenge, request, parse, normalize.
///
/// Implementors provide [`Tracker::fetch`], which may fail. Callers use
/// [`Tracker::track_status`], which never fails: every error is logged with
/// the platform name and reported as `None`, the same value a missing parcel
/// produces.
pub trait Tracker: Send + Sync {
    fn platform(&self) -> Platform;

    /// Runs the whole pipeline for `order_id`.
    ///
    /// `Ok(None)` means the platform answered but has nothing for this order.
    fn fetch(
        &self,
        order_id: &str,
    ) -> impl Future<Output = Result<Option<TrackingInfo>, TrackerError>> + Send;

    fn track_status(&self, order_id: &str) -> impl Future<Output = Option<TrackingInfo>> + Send {
        async move {
            let platform = self.platform();
            match self.fetch(order_id).await {
                Ok(Some(info)) => {
                    tracing::info!(%platform, order_id, status = %info.status, "tracking info found");
                    Some(info)
                }
                Ok(None) => {
                    tracing::info!(%platform, order_id, "no tracking info available");
                    None
                }
                Err(err) => {
                    tracing::error!(%platform, order_id, error = %err, "tracking failed");
                    None
                }
            }
        }
    }
}

/// Closed dispatch over every supported platform tracker.
pub enum AnyTracker {
    SevenEleven(SevenElevenTracker),
    FamilyMart(FamilyMartTracker),
    OKMart(OKMartTracker),
    Shopee(ShopeeTracker),
    Lsa(LsaTracker),
}

impl AnyTracker {
    #[must_use]
    pub fn for_platform(platform: Platform, settings: &TrackerSettings) -> Self {
        match platform {
            Platform::SevenEleven => Self::SevenEleven(SevenElevenTracker::new(settings.clone())),
            Platform::FamilyMart => Self::FamilyMart(FamilyMartTracker::new(settings.clone())),
            Platform::OKMart => Self::OKMart(OKMartTracker::new(settings.clone())),
            Platform::Shopee => Self::Shopee(ShopeeTracker::new(settings.clone())),
            Platform::Lsa => Self::Lsa(LsaTracker::new(settings.clone())),
        }
    }
}

impl Tracker for AnyTracker {
    fn platform(&self) -> Platform {
        match self {
            Self::SevenEleven(t) => t.platform(),
            Self::FamilyMart(t) => t.platform(),
            Self::OKMart(t) => t.platform(),
            Self::Shopee(t) => t.platform(),
            Self::Lsa(t) => t.platform(),
        }
    }

    async fn fetch(&self, order_id: &str) -> Result<Option<TrackingInfo>, TrackerError> {
        match self {
            Self::SevenEleven(t) => t.fetch(order_id).await,
            Self::FamilyMart(t) => t.fetch(order_id).await,
            Self::OKMart(t) => t.fetch(order_id).await,
            Self::Shopee(t) => t.fetch(order_id).await,
            Self::Lsa(t) => t.fetch(order_id).await,
        }
    }
}

/// Resolves a platform identifier to its tracker.
///
/// # Errors
///
/// Returns [`CoreError::InvalidPlatform`] unless `identifier` is exactly one of
/// `seven_eleven`, `family_mart`, `ok_mart`, `shopee`, or `lsa`.
pub fn create_tracker(
    identifier: &str,
    settings: &TrackerSettings,
) -> Result<AnyTracker, CoreError> {
    let platform: Platform = identifier.parse()?;
    Ok(AnyTracker::for_platform(platform, settings))
}

/// Looks up `order_id` on the platform named by `identifier` using default
/// settings.
///
/// Every call builds a fresh tracker and HTTP session, so concurrent calls
/// share no state.
///
/// # Errors
///
/// Returns [`CoreError::InvalidPlatform`] for an unknown identifier. Network,
/// challenge, and parse failures are logged and reported as `Ok(None)`.
pub async fn track(identifier: &str, order_id: &str) -> Result<Option<TrackingInfo>, CoreError> {
    track_with(identifier, order_id, &TrackerSettings::default()).await
}

/// [`track`] with explicit settings.
///
/// # Errors
///
/// Returns [`CoreError::InvalidPlatform`] for an unknown identifier.
pub async fn track_with(
    identifier: &str,
    order_id: &str,
    settings: &TrackerSettings,
) -> Result<Option<TrackingInfo>, CoreError> {
    let tracker = create_tracker(identifier, settings)?;
    Ok(tracker.track_status(order_id).await)
}
