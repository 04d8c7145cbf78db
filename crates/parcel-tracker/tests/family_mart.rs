//! Integration tests for the FamilyMart order-detail lookup.

use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use parcel_core::Platform;
use parcel_tracker::platforms::FamilyMartTracker;
use parcel_tracker::{Tracker, TrackerError, TrackerSettings};

const DETAIL_PATH: &str = "/FMEDCFPWebV2_II/list.aspx/GetOrderDetail";

const FOUND_BODY: &str = r#"{"d":"{\"List\":[{\"ORDER_NO\":\"F12345678\",\"ORDER_DATE_R\":\"2024/05/02 09:10\",\"STATUS_D\":\"貨件配達取件店舖\"},{\"ORDER_NO\":\"F12345678\",\"ORDER_DATE_R\":\"2024/05/01 12:30\",\"STATUS_D\":\"貨件已寄件\"}]}"}"#;

fn tracker(server: &MockServer) -> FamilyMartTracker {
    let settings = TrackerSettings {
        timeout_secs: 5,
        ..TrackerSettings::default()
    };
    FamilyMartTracker::with_base_url(settings, &server.uri())
}

#[tokio::test]
async fn latest_entry_is_returned() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(DETAIL_PATH))
        .and(header("content-type", "application/json; charset=UTF-8"))
        .and(body_partial_json(json!({
            "EC_ORDER_NO": "F12345678",
            "ORDER_NO": "F12345678",
            "RCV_USER_NAME": null
        })))
        .respond_with(ResponseTemplate::new(200).set_body_string(FOUND_BODY))
        .expect(1)
        .mount(&server)
        .await;

    let info = tracker(&server)
        .fetch("F12345678")
        .await
        .expect("lookup should succeed")
        .expect("parcel should be found");

    assert_eq!(info.platform, Platform::FamilyMart);
    assert_eq!(info.order_id, "F12345678");
    assert_eq!(info.status, "貨件配達取件店舖");
    assert_eq!(info.time.as_deref(), Some("2024-05-02 09:10:00"));
    assert!(info.is_delivered);
}

#[tokio::test]
async fn empty_list_is_absent() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(DETAIL_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"d":"{\"List\":[]}"}"#))
        .mount(&server)
        .await;

    assert!(matches!(tracker(&server).fetch("F00000000").await, Ok(None)));
}

#[tokio::test]
async fn server_error_is_reported_and_absorbed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(DETAIL_PATH))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let tracker = tracker(&server);
    assert!(matches!(
        tracker.fetch("F12345678").await,
        Err(TrackerError::UnexpectedStatus { status: 500, .. })
    ));
    assert!(tracker.track_status("F12345678").await.is_none());
}

#[tokio::test]
async fn repeated_lookups_are_identical() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(DETAIL_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string(FOUND_BODY))
        .mount(&server)
        .await;

    let tracker = tracker(&server);
    let first = tracker.track_status("F12345678").await;
    let second = tracker.track_status("F12345678").await;

    assert!(first.is_some());
    assert_eq!(first, second);
}

#[tokio::test]
async fn legacy_transport_sends_configured_user_agent() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(DETAIL_PATH))
        .and(header("user-agent", "parcel-test-agent"))
        .respond_with(ResponseTemplate::new(200).set_body_string(FOUND_BODY))
        .expect(1)
        .mount(&server)
        .await;

    let settings = TrackerSettings {
        timeout_secs: 5,
        user_agent: "parcel-test-agent".to_owned(),
        ..TrackerSettings::default()
    };
    let tracker = FamilyMartTracker::with_base_url(settings, &server.uri());
    assert!(tracker.fetch("F12345678").await.unwrap().is_some());
}

#[tokio::test]
async fn slow_response_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(DETAIL_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(FOUND_BODY)
                .set_delay(std::time::Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let settings = TrackerSettings {
        timeout_secs: 1,
        ..TrackerSettings::default()
    };
    let tracker = FamilyMartTracker::with_base_url(settings, &server.uri());
    assert!(matches!(
        tracker.fetch("F12345678").await,
        Err(TrackerError::Timeout { secs: 1 })
    ));
}
