//! SevenEleven e-tracking: ASP.NET form, session-scoped CAPTCHA, HTML result.
//!
//! Each attempt reloads the search page, reads a new CAPTCHA, and submits.
//! A rejected CAPTCHA restarts the attempt until the configured ceiling is
//! reached; any other failure ends the lookup.

pub mod captcha;
pub mod parse;

use std::sync::LazyLock;

use parcel_core::{Platform, TrackingInfo};
use regex::Regex;
use reqwest::Client;

use crate::error::TrackerError;
use crate::normalize::{contains_any, normalize_timestamp};
use crate::retry::{is_captcha_retryable, retry_while};
use crate::session::{ensure_success, join_url, with_cookie_jar};
use crate::settings::TrackerSettings;
use crate::tracker::Tracker;

pub use captcha::{CaptchaSolver, TesseractSolver};
use parse::{parse_result_page, parse_search_page, ResultPage, Shipment};

pub const DEFAULT_BASE_URL: &str = "https://eservice.7-11.com.tw/e-tracking/";
const SEARCH_PATH: &str = "search.aspx";

const VALID_ORDER_ID_LENGTHS: [usize; 3] = [8, 11, 12];
const DELIVERED_PHRASES: &[&str] = &["包裹配達取件門市", "已完成包裹成功取件"];

static NEWS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.*)(\d{4}/\d{2}/\d{2} \d{2}:\d{2}:\d{2})").expect("valid regex")
});

pub struct SevenElevenTracker<S = TesseractSolver> {
    settings: TrackerSettings,
    base_url: String,
    solver: S,
}

impl SevenElevenTracker {
    #[must_use]
    pub fn new(settings: TrackerSettings) -> Self {
        Self::with_base_url(settings, DEFAULT_BASE_URL)
    }

    /// Points the tracker at another host (a mock server in tests).
    #[must_use]
    pub fn with_base_url(settings: TrackerSettings, base_url: &str) -> Self {
        let solver = TesseractSolver::new(settings.tesseract_bin.clone());
        Self::with_solver(settings, base_url, solver)
    }
}

impl<S: CaptchaSolver> SevenElevenTracker<S> {
    #[must_use]
    pub fn with_solver(settings: TrackerSettings, base_url: &str, solver: S) -> Self {
        Self {
            settings,
            base_url: base_url.to_owned(),
            solver,
        }
    }

    /// One full attempt: load form, solve CAPTCHA, submit, classify.
    async fn attempt(
        &self,
        client: &Client,
        order_id: &str,
        attempt: u32,
    ) -> Result<ResultPage, TrackerError> {
        let search_url = join_url(&self.base_url, SEARCH_PATH)?;
        tracing::info!(platform = "seven_eleven", order_id, attempt, "loading search form");

        let html = ensure_success(client.get(search_url.clone()).send().await?)?
            .text()
            .await?;
        let page = parse_search_page(&html).ok_or_else(|| {
            TrackerError::Challenge("search page lacks form state or CAPTCHA image".to_owned())
        })?;

        let image = ensure_success(
            client
                .get(join_url(&self.base_url, &page.captcha_path)?)
                .send()
                .await?,
        )?
        .bytes()
        .await?;
        let code = self.solver.solve(&image).await?;

        let form = [
            ("__EVENTTARGET", "submit"),
            ("__EVENTARGUMENT", ""),
            ("__VIEWSTATE", page.form.view_state.as_str()),
            ("__VIEWSTATEGENERATOR", page.form.view_state_generator.as_str()),
            ("txtProductNum", order_id),
            ("tbChkCode", code.as_str()),
            ("txtIMGName", ""),
            ("txtPage", "1"),
        ];
        let body = ensure_success(client.post(search_url).form(&form).send().await?)?
            .text()
            .await?;

        let result = parse_result_page(&body);
        if result.is_captcha_rejection() {
            return Err(TrackerError::CaptchaRejected);
        }
        Ok(result)
    }
}

/// Accepts only the order number lengths the platform issues.
#[must_use]
pub fn is_valid_order_id(order_id: &str) -> bool {
    VALID_ORDER_ID_LENGTHS.contains(&order_id.chars().count())
}

#[must_use]
pub fn is_delivered(status: &str) -> bool {
    contains_any(status, DELIVERED_PHRASES)
}

/// Maps a parsed result page into [`TrackingInfo`].
///
/// Alerts, a missing `query_no`, or a news line without a trailing
/// timestamp all yield `None`.
#[must_use]
pub fn to_tracking_info(page: ResultPage) -> Option<TrackingInfo> {
    let ResultPage::Found(shipment) = page else {
        return None;
    };
    let order_id = shipment
        .info
        .get("query_no")
        .map(|s| s.trim().to_owned())
        .filter(|s| !s.is_empty())?;

    let news = shipment.news.trim();
    let caps = NEWS_RE.captures(news)?;
    let status = caps.get(1)?.as_str().trim().to_owned();
    let time = normalize_timestamp(caps.get(2)?.as_str());

    Some(TrackingInfo {
        order_id,
        platform: Platform::SevenEleven,
        is_delivered: is_delivered(&status),
        status,
        time: Some(time),
        raw_data: raw_data(&shipment),
    })
}

fn raw_data(shipment: &Shipment) -> serde_json::Value {
    serde_json::to_value(shipment).unwrap_or_default()
}

impl<S: CaptchaSolver> Tracker for SevenElevenTracker<S> {
    fn platform(&self) -> Platform {
        Platform::SevenEleven
    }

    async fn fetch(&self, order_id: &str) -> Result<Option<TrackingInfo>, TrackerError> {
        if !is_valid_order_id(order_id) {
            tracing::info!(
                platform = "seven_eleven",
                order_id,
                "order id length not accepted, skipping lookup"
            );
            return Ok(None);
        }

        let client = with_cookie_jar(&self.settings)?;
        let page = retry_while(
            self.settings.seven_eleven_max_attempts,
            is_captcha_retryable,
            |attempt| {
                let client = &client;
                async move { self.attempt(client, order_id, attempt).await }
            },
        )
        .await?;

        if let ResultPage::Message(msg) = &page {
            tracing::info!(platform = "seven_eleven", order_id, message = %msg, "search answered with a message");
        }
        Ok(to_tracking_info(page))
    }
}
