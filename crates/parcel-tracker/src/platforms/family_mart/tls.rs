//! Transport for the FamilyMart endpoint.
//!
//! The FamilyMart host only completes a handshake when the client drops the
//! OpenSSL security level to 1 and accepts servers that lack secure
//! renegotiation. Neither is expressible in rustls, so FamilyMart requests go
//! through an OpenSSL connector. No other platform uses this module.

use std::time::Duration;

use http_body_util::{BodyExt, Full};
use hyper::body::Bytes;
use hyper::header::{ACCEPT_LANGUAGE, CONTENT_TYPE, USER_AGENT};
use hyper::Request;
use hyper_openssl::client::legacy::HttpsConnector;
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;
use openssl::ssl::{SslConnector, SslConnectorBuilder, SslMethod, SslOptions};
use url::Url;

use crate::error::TrackerError;
use crate::session::{ACCEPT_LANGUAGE_VALUE, CONNECT_TIMEOUT};
use crate::settings::TrackerSettings;

/// OpenSSL cipher string that keeps the default suites but lowers the
/// security level to 1.
pub(crate) const LEGACY_CIPHER_LIST: &str = "DEFAULT@SECLEVEL=1";

/// `SSL_OP_LEGACY_SERVER_CONNECT`, which the `openssl` crate does not name.
pub(crate) const LEGACY_SERVER_CONNECT: SslOptions = SslOptions::from_bits_retain(0x4);

type LegacyClient = Client<HttpsConnector<HttpConnector>, Full<Bytes>>;

/// Builds the OpenSSL connector settings for the FamilyMart host.
///
/// # Errors
///
/// Returns [`TrackerError::Tls`] if OpenSSL rejects the cipher list.
pub(crate) fn legacy_connector() -> Result<SslConnectorBuilder, TrackerError> {
    let mut builder = SslConnector::builder(SslMethod::tls_client())?;
    builder.set_cipher_list(LEGACY_CIPHER_LIST)?;
    builder.set_options(LEGACY_SERVER_CONNECT);
    Ok(builder)
}

/// HTTP client over [`legacy_connector`]. Plain `http://` URLs bypass TLS.
pub(crate) struct LegacyTransport {
    client: LegacyClient,
    timeout: Duration,
    user_agent: String,
}

impl LegacyTransport {
    /// # Errors
    ///
    /// Returns [`TrackerError::Tls`] if the OpenSSL context cannot be built.
    pub(crate) fn new(settings: &TrackerSettings) -> Result<Self, TrackerError> {
        let mut http = HttpConnector::new();
        http.enforce_http(false);
        http.set_connect_timeout(Some(CONNECT_TIMEOUT));
        let https = HttpsConnector::with_connector(http, legacy_connector()?)?;

        Ok(Self {
            client: Client::builder(TokioExecutor::new()).build(https),
            timeout: Duration::from_secs(settings.timeout_secs),
            user_agent: settings.user_agent.clone(),
        })
    }

    /// POSTs `body` as JSON and returns the response text.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::UnexpectedStatus`] for non-2xx responses,
    /// [`TrackerError::Timeout`] when the exchange exceeds the configured
    /// timeout, and transport errors otherwise.
    pub(crate) async fn post_json(
        &self,
        url: &Url,
        content_type: &str,
        body: String,
    ) -> Result<String, TrackerError> {
        let request = Request::post(url.as_str())
            .header(CONTENT_TYPE, content_type)
            .header(USER_AGENT, self.user_agent.as_str())
            .header(ACCEPT_LANGUAGE, ACCEPT_LANGUAGE_VALUE)
            .body(Full::new(Bytes::from(body)))?;

        tokio::time::timeout(self.timeout, self.exchange(request, url))
            .await
            .map_err(|_| TrackerError::Timeout {
                secs: self.timeout.as_secs(),
            })?
    }

    async fn exchange(
        &self,
        request: Request<Full<Bytes>>,
        url: &Url,
    ) -> Result<String, TrackerError> {
        let response = self.client.request(request).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(TrackerError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        let bytes = response.into_body().collect().await?.to_bytes();
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connector_lowers_security_level() {
        let builder = legacy_connector().expect("legacy connector should build");
        assert_eq!(builder.build().context().security_level(), 1);
    }

    #[test]
    fn connector_allows_legacy_renegotiation() {
        let builder = legacy_connector().expect("legacy connector should build");
        assert!(builder.options().contains(LEGACY_SERVER_CONNECT));
    }

    #[tokio::test]
    async fn transport_builds_from_settings() {
        let settings = TrackerSettings {
            timeout_secs: 7,
            ..TrackerSettings::default()
        };
        let transport = LegacyTransport::new(&settings).expect("transport should build");
        assert_eq!(transport.timeout, Duration::from_secs(7));
        assert_eq!(transport.user_agent, settings.user_agent);
    }
}
