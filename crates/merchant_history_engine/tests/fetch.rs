use std::time::Duration;

use merchant_history_engine::{
    FailureKind, FetchSettings, HttpDataSource, ParcelDataSource, ParcelMode, ParcelRecord,
    UserDataSource,
};
use pretty_assertions::assert_eq;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn source(server: &MockServer) -> HttpDataSource {
    HttpDataSource::new(&server.uri(), FetchSettings::default()).expect("valid base url")
}

#[tokio::test]
async fn past_parcels_are_decoded_in_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/me/pastParcels"))
        .and(header("authorization", "Bearer secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!(["TRK1", "TRK2"])))
        .mount(&server)
        .await;

    let source = source(&server).with_bearer_token(Some("secret".to_string()));
    let parcels = source.fetch_past_parcels().await.expect("fetch ok");
    assert_eq!(parcels, vec!["TRK1".to_string(), "TRK2".to_string()]);
}

#[tokio::test]
async fn past_parcels_with_wrong_shape_fail_to_decode() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/me/pastParcels"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"a": 1})))
        .mount(&server)
        .await;

    let err = source(&server).fetch_past_parcels().await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Decode);
}

#[tokio::test]
async fn parcel_snapshot_is_fetched_in_data_mode() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/parcels/TRK1"))
        .and(query_param("mode", "data"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "address": "1 Main St",
            "recipient": "Ada",
            "location": "Depot 4",
            "information": "In transit",
            "visualCue": "truck",
            "locationHistory": ["Warehouse", "Depot 4"],
            "informationHistory": ["Registered", "In transit"],
            "cueHistory": ["box", "truck"],
            "timeDelivered": null
        })))
        .mount(&server)
        .await;

    let record = source(&server)
        .fetch_parcel("TRK1", ParcelMode::Data)
        .await
        .expect("fetch ok");
    assert_eq!(
        record,
        ParcelRecord {
            address: "1 Main St".to_string(),
            recipient: "Ada".to_string(),
            location: "Depot 4".to_string(),
            information: "In transit".to_string(),
            visual_cue: "truck".to_string(),
            location_history: vec!["Warehouse".to_string(), "Depot 4".to_string()],
            information_history: vec!["Registered".to_string(), "In transit".to_string()],
            cue_history: vec!["box".to_string(), "truck".to_string()],
            time_delivered: None,
        }
    );
}

#[tokio::test]
async fn error_body_message_is_surfaced() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/parcels/TRK2"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(serde_json::json!({"message": "not found"})),
        )
        .mount(&server)
        .await;

    let err = source(&server)
        .fetch_parcel("TRK2", ParcelMode::Data)
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(404));
    assert_eq!(err.message, "not found");
}

#[tokio::test]
async fn plain_error_falls_back_to_status_text() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/parcels/TRK3"))
        .respond_with(ResponseTemplate::new(500).set_body_string("oops"))
        .mount(&server)
        .await;

    let err = source(&server)
        .fetch_parcel("TRK3", ParcelMode::Data)
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(500));
    assert!(err.message.starts_with("500"));
}

#[tokio::test]
async fn slow_response_is_awaited_by_default() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/parcels/SLOW"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(serde_json::json!({"address": "1 Main St"})),
        )
        .mount(&server)
        .await;

    let settings = FetchSettings::default();
    assert_eq!(settings.request_timeout, None);
    assert_eq!(settings.connect_timeout, None);

    let record = HttpDataSource::new(&server.uri(), settings)
        .expect("valid base url")
        .fetch_parcel("SLOW", ParcelMode::Data)
        .await
        .expect("slow fetch still resolves");
    assert_eq!(record.address, "1 Main St");
}

#[tokio::test]
async fn configured_timeout_fails_slow_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/parcels/SLOW"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(serde_json::json!({})),
        )
        .mount(&server)
        .await;

    let settings = FetchSettings {
        request_timeout: Some(Duration::from_millis(50)),
        ..FetchSettings::default()
    };
    let source = HttpDataSource::new(&server.uri(), settings).expect("valid base url");
    let err = source
        .fetch_parcel("SLOW", ParcelMode::Data)
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
}

#[tokio::test]
async fn oversized_response_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/me/pastParcels"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[\"0123456789\"]"))
        .mount(&server)
        .await;

    let settings = FetchSettings {
        max_bytes: 10,
        ..FetchSettings::default()
    };
    let source = HttpDataSource::new(&server.uri(), settings).expect("valid base url");
    let err = source.fetch_past_parcels().await.unwrap_err();
    assert_eq!(
        err.kind,
        FailureKind::TooLarge {
            max_bytes: 10,
            actual: Some(14)
        }
    );
}

#[test]
fn invalid_base_url_is_rejected() {
    let err = HttpDataSource::new("not a url", FetchSettings::default()).unwrap_err();
    assert_eq!(err.kind, FailureKind::InvalidUrl);
}
