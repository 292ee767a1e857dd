//! Integration tests for the full generation lifecycle.
//!
//! Uses `wiremock` as the enrichment provider and a real on-disk store, so
//! every test exercises the same persistence path production uses. Ticks
//! run at millisecond scale to keep the suite fast.

use std::time::Duration;

use serde_json::json;
use tempfile::TempDir;
use tokio::sync::mpsc;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use emprof_core::ProfileStatus;
use emprof_enrich::{EnrichClient, EnrichError, Generator, PROGRESS_STEPS};
use emprof_store::ProfileStore;

fn open_store() -> (TempDir, ProfileStore) {
    let dir = TempDir::new().expect("failed to create temp dir");
    let store = ProfileStore::open(dir.path()).expect("failed to open store");
    (dir, store)
}

fn client_for(server_uri: &str) -> EnrichClient {
    EnrichClient::new(
        format!("{server_uri}/hook"),
        Some(Duration::from_secs(5)),
        "emprof-test/0.1",
    )
    .expect("failed to build EnrichClient")
}

#[tokio::test]
async fn valid_json_response_settles_the_profile_completed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/hook"))
        .and(header("content-type", "application/json"))
        .and(body_partial_json(json!({"website": "https://acme.com"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"name": "Acme"})))
        .expect(1)
        .mount(&server)
        .await;

    let (_dir, store) = open_store();
    let client = client_for(&server.uri());
    let (tx, _rx) = mpsc::unbounded_channel();

    let profile = Generator::new(&store, &client)
        .generate("https://acme.com", tx)
        .await
        .unwrap();

    assert_eq!(profile.status, ProfileStatus::Completed);
    assert_eq!(
        profile.data.as_ref().unwrap().name.as_deref(),
        Some("Acme")
    );
    assert!(profile.completed_at.is_some());
    assert!(profile.error.is_none());

    // The durable collection carries the same terminal record.
    let stored = store.load().unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].id, profile.id);
    assert_eq!(stored[0].status, ProfileStatus::Completed);
}

#[tokio::test]
async fn non_json_response_is_a_degenerate_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/hook"))
        .respond_with(ResponseTemplate::new(200).set_body_string("Accepted"))
        .mount(&server)
        .await;

    let (_dir, store) = open_store();
    let client = client_for(&server.uri());
    let (tx, _rx) = mpsc::unbounded_channel();

    let profile = Generator::new(&store, &client)
        .generate("https://acme.com", tx)
        .await
        .unwrap();

    assert_eq!(profile.status, ProfileStatus::Completed);
    assert_eq!(
        serde_json::to_value(profile.data.as_ref().unwrap()).unwrap(),
        json!({"success": true})
    );
}

#[tokio::test]
async fn transport_failure_settles_the_profile_failed() {
    // Nothing listens on this port: the connect itself fails.
    let (_dir, store) = open_store();
    let client = EnrichClient::new(
        "http://127.0.0.1:9".to_owned(),
        Some(Duration::from_secs(2)),
        "emprof-test/0.1",
    )
    .unwrap();
    let (tx, _rx) = mpsc::unbounded_channel();

    let profile = Generator::new(&store, &client)
        .generate("https://acme.com", tx)
        .await
        .unwrap();

    assert_eq!(profile.status, ProfileStatus::Failed);
    assert!(profile.error.as_deref().is_some_and(|e| !e.is_empty()));
    assert!(profile.data.is_none());
    assert!(profile.completed_at.is_none());

    let stored = store.load().unwrap();
    assert_eq!(stored[0].status, ProfileStatus::Failed);
}

#[tokio::test]
async fn url_is_trimmed_and_blank_submissions_are_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({"website": "https://acme.com"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let (_dir, store) = open_store();
    let client = client_for(&server.uri());

    let (tx, _rx) = mpsc::unbounded_channel();
    let err = Generator::new(&store, &client)
        .generate("   ", tx)
        .await
        .unwrap_err();
    assert!(matches!(err, EnrichError::EmptyUrl));
    assert!(store.load().unwrap().is_empty(), "nothing persisted");

    let (tx, _rx) = mpsc::unbounded_channel();
    let profile = Generator::new(&store, &client)
        .generate("  https://acme.com  ", tx)
        .await
        .unwrap();
    assert_eq!(profile.url, "https://acme.com");
}

#[tokio::test]
async fn processing_record_is_durable_before_settlement() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"name": "Acme"}))
                .set_delay(Duration::from_millis(400)),
        )
        .mount(&server)
        .await;

    let (_dir, store) = open_store();
    let client = client_for(&server.uri());
    let generator = Generator::new(&store, &client);
    let (tx, _rx) = mpsc::unbounded_channel();

    let (result, ()) = tokio::join!(generator.generate("https://acme.com", tx), async {
        // While the call is still in flight, the optimistic insert is
        // already on disk with status processing.
        tokio::time::sleep(Duration::from_millis(150)).await;
        let stored = store.load().unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].status, ProfileStatus::Processing);
        assert!(stored[0].data.is_none());
    });

    assert_eq!(result.unwrap().status, ProfileStatus::Completed);
}

#[tokio::test]
async fn ticker_is_cancelled_the_moment_the_call_settles() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({}))
                .set_delay(Duration::from_millis(120)),
        )
        .mount(&server)
        .await;

    let (_dir, store) = open_store();
    let client = client_for(&server.uri());
    let (tx, mut rx) = mpsc::unbounded_channel();

    Generator::new(&store, &client)
        .with_tick(Duration::from_millis(50))
        .generate("https://acme.com", tx)
        .await
        .unwrap();

    // The sender is gone once generate returns, so the channel drains to a
    // close without ever yielding the full cosmetic sequence.
    let mut fired = 0;
    while rx.recv().await.is_some() {
        fired += 1;
    }
    assert!(
        fired < PROGRESS_STEPS.len(),
        "expected an interrupted sequence, got all {fired} steps"
    );
}

#[tokio::test]
async fn record_deleted_mid_flight_surfaces_as_vanished() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"name": "Acme"}))
                .set_delay(Duration::from_millis(400)),
        )
        .mount(&server)
        .await;

    let (_dir, store) = open_store();
    let client = client_for(&server.uri());
    let generator = Generator::new(&store, &client);
    let (tx, _rx) = mpsc::unbounded_channel();

    let (result, ()) = tokio::join!(generator.generate("https://acme.com", tx), async {
        tokio::time::sleep(Duration::from_millis(150)).await;
        let stored = store.load().unwrap();
        assert!(store.remove(&stored[0].id).unwrap());
    });

    assert!(matches!(
        result.unwrap_err(),
        EnrichError::ProfileVanished { .. }
    ));
    assert!(store.load().unwrap().is_empty());
}

#[tokio::test]
async fn concurrent_generations_settle_without_losing_each_other() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({"website": "https://slow.com"})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"name": "Slow"}))
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({"website": "https://fast.com"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"name": "Fast"})))
        .mount(&server)
        .await;

    let (_dir, store) = open_store();
    let client = client_for(&server.uri());
    let generator = Generator::new(&store, &client);
    let (tx_a, _rx_a) = mpsc::unbounded_channel();
    let (tx_b, _rx_b) = mpsc::unbounded_channel();

    let (slow, fast) = tokio::join!(
        generator.generate("https://slow.com", tx_a),
        generator.generate("https://fast.com", tx_b)
    );
    assert_eq!(slow.unwrap().status, ProfileStatus::Completed);
    assert_eq!(fast.unwrap().status, ProfileStatus::Completed);

    // Each settlement re-located its own record in the freshest snapshot:
    // neither terminal write clobbered the other.
    let stored = store.load().unwrap();
    assert_eq!(stored.len(), 2);
    assert!(stored
        .iter()
        .all(|p| p.status == ProfileStatus::Completed));
}
