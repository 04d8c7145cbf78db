//! HTTP session construction shared by the platform trackers.
//!
//! A session is a `reqwest::Client` owned by exactly one tracker call chain.
//! Cookie persistence is opt-in because only the form-based platforms need
//! the server's session cookie to survive between requests.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE};
use reqwest::{Client, ClientBuilder};
use url::Url;

use crate::error::TrackerError;
use crate::settings::TrackerSettings;

pub(crate) const ACCEPT_LANGUAGE_VALUE: &str = "zh-TW,zh;q=0.9,en;q=0.8";
pub(crate) const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Starts a client builder with the timeout, `User-Agent`, and locale headers
/// every platform expects.
pub(crate) fn base_builder(settings: &TrackerSettings) -> ClientBuilder {
    let mut headers = HeaderMap::new();
    headers.insert(
        ACCEPT_LANGUAGE,
        HeaderValue::from_static(ACCEPT_LANGUAGE_VALUE),
    );
    Client::builder()
        .timeout(Duration::from_secs(settings.timeout_secs))
        .connect_timeout(CONNECT_TIMEOUT)
        .user_agent(settings.user_agent.as_str())
        .default_headers(headers)
}

/// Builds a stateless client.
///
/// # Errors
///
/// Returns [`TrackerError::Http`] if the client cannot be constructed.
pub(crate) fn stateless(settings: &TrackerSettings) -> Result<Client, TrackerError> {
    Ok(base_builder(settings).build()?)
}

/// Builds a client with its own cookie jar, for flows that carry server
/// session state across requests.
///
/// # Errors
///
/// Returns [`TrackerError::Http`] if the client cannot be constructed.
pub(crate) fn with_cookie_jar(settings: &TrackerSettings) -> Result<Client, TrackerError> {
    Ok(base_builder(settings).cookie_store(true).build()?)
}

/// Resolves `path` against `base`, treating `base` as a directory.
///
/// A leading slash on `path` does not reset the base path, and any query in
/// `path` is kept.
///
/// # Errors
///
/// Returns [`TrackerError::Url`] if `base` is not an absolute URL and
/// [`TrackerError::Parse`] if it cannot take path segments.
pub(crate) fn join_url(base: &str, path: &str) -> Result<Url, TrackerError> {
    let mut base = Url::parse(base)?;
    base.path_segments_mut()
        .map_err(|()| TrackerError::Parse {
            context: "base url".to_owned(),
            reason: "base url cannot carry a path".to_owned(),
        })?
        .pop_if_empty()
        .push("");
    Ok(base.join(path.trim_start_matches('/'))?)
}

/// Rejects non-2xx responses with [`TrackerError::UnexpectedStatus`].
pub(crate) fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, TrackerError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(TrackerError::UnexpectedStatus {
            status: status.as_u16(),
            url: response.url().to_string(),
        })
    }
}
