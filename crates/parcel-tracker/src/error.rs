use thiserror::Error;

/// Failures inside a single tracking pipeline.
///
/// None of these cross the [`crate::Tracker::track_status`] boundary; they are
/// logged with the platform name and reported to the caller as "no result".
#[derive(Debug, Error)]
pub enum TrackerError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Failure from the OpenSSL-backed transport used for legacy TLS hosts.
    #[error("legacy transport error: {0}")]
    LegacyTransport(#[from] hyper_util::client::legacy::Error),

    #[error("response body error: {0}")]
    Body(#[from] hyper::Error),

    #[error("invalid request: {0}")]
    Request(#[from] http::Error),

    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("request timed out after {secs}s")]
    Timeout { secs: u64 },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// A challenge token (validation cookie, CAPTCHA image, form state) could
    /// not be obtained from the platform.
    #[error("challenge failed: {0}")]
    Challenge(String),

    /// The platform rejected the submitted CAPTCHA answer.
    #[error("CAPTCHA answer rejected")]
    CaptchaRejected,

    #[error("OCR failed: {0}")]
    Ocr(String),

    #[error("parse error for {context}: {reason}")]
    Parse { context: String, reason: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("TLS configuration error: {0}")]
    Tls(#[from] openssl::error::ErrorStack),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
