mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use common::{closed_url, MockDaemon};
use lbry_rs_yet::params::ClaimSearchParams;
use lbry_rs_yet::{Client, ConnectionMeta, ConnectionState, Error, Params};
use serde_json::json;

#[tokio::test]
async fn override_replaces_remote_call() {
    let daemon = MockDaemon::answering(json!("from daemon")).await;
    let client = Client::new(ConnectionMeta::new(&daemon.url)).unwrap();

    let calls = Arc::new(AtomicUsize::new(0));
    let seen = Arc::new(Mutex::new(None::<Params>));
    client.set_override("publish", {
        let calls = calls.clone();
        let seen = seen.clone();
        move |params| {
            calls.fetch_add(1, Ordering::SeqCst);
            *seen.lock().unwrap() = Some(params);
            async { Ok(json!({"outputs": []})) }
        }
    });

    let result = client
        .publish(json!({"name": "video", "bid": "0.01"}))
        .await
        .unwrap();

    assert_eq!(result, json!({"outputs": []}));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(
        serde_json::Value::Object(seen.lock().unwrap().take().unwrap()),
        json!({"name": "video", "bid": "0.01"})
    );
    assert_eq!(daemon.total_hits(), 0);
}

#[tokio::test]
async fn every_facade_method_checks_overrides() {
    let client = Client::new(ConnectionMeta::new(&closed_url().await)).unwrap();

    let seen = Arc::new(Mutex::new(Vec::new()));
    for method in ["claim_search", "version", "wallet_decrypt"] {
        let seen = seen.clone();
        client.set_override(method, move |params| {
            seen.lock().unwrap().push((method, params));
            async move { Ok(json!(method)) }
        });
    }

    let search = ClaimSearchParams {
        any_tags: Some(vec!["rust".to_string()]),
        ..Default::default()
    };
    assert_eq!(client.claim_search(search).await.unwrap(), "claim_search");
    assert_eq!(client.version().await.unwrap(), "version");
    assert_eq!(client.wallet_decrypt().await.unwrap(), "wallet_decrypt");

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 3);
    assert_eq!(
        serde_json::Value::Object(seen[0].1.clone()),
        json!({"any_tags": ["rust"]})
    );
    assert!(seen[1].1.is_empty());
}

#[tokio::test]
async fn override_errors_pass_through() {
    let client = Client::new(ConnectionMeta::new(&closed_url().await)).unwrap();
    client.set_override("channel_sign", |_| async {
        Err(Error::Configuration("signing disabled".to_string()))
    });

    match client.channel_sign(()).await {
        Err(Error::Configuration(msg)) => assert_eq!(msg, "signing disabled"),
        other => panic!("expected override error, got {other:?}"),
    }
}

#[tokio::test]
async fn unset_override_restores_remote_call() {
    let daemon = MockDaemon::answering(json!("from daemon")).await;
    let client = Client::new(ConnectionMeta::new(&daemon.url)).unwrap();

    client.set_override("preference_get", |_| async { Ok(json!("local")) });
    assert_eq!(client.preference_get(()).await.unwrap(), "local");

    assert!(client.unset_override("preference_get"));
    assert!(!client.unset_override("preference_get"));
    assert_eq!(client.preference_get(()).await.unwrap(), "from daemon");
    assert_eq!(daemon.hits("preference_get"), 1);
}

#[tokio::test]
async fn override_for_unlisted_method() {
    let daemon = MockDaemon::answering(json!("from daemon")).await;
    let client = Client::new(ConnectionMeta::new(&daemon.url)).unwrap();

    client.set_override("not_yet_released", |params| async move {
        Ok(json!({"echo": params}))
    });

    // registering alone has no effect on other calls
    client.status(()).await.unwrap();
    assert_eq!(daemon.total_hits(), 1);

    let result = client
        .call_method("not_yet_released", json!({"x": 1}))
        .await
        .unwrap();
    assert_eq!(result, json!({"echo": {"x": 1}}));
    assert_eq!(daemon.total_hits(), 1);
}

#[tokio::test]
async fn overrides_are_per_client() {
    let daemon = MockDaemon::answering(json!("from daemon")).await;
    let overridden = Client::new(ConnectionMeta::new(&daemon.url)).unwrap();
    let plain = Client::new(ConnectionMeta::new(&daemon.url)).unwrap();

    overridden.set_override("status", |_| async { Ok(json!("local")) });

    assert_eq!(overridden.status(()).await.unwrap(), "local");
    assert_eq!(overridden.clone().status(()).await.unwrap(), "local");
    assert_eq!(plain.status(()).await.unwrap(), "from daemon");
}

#[tokio::test]
async fn connect_polls_through_status_override() {
    let client = Client::new(ConnectionMeta::new(&closed_url().await)).unwrap();
    client.set_override("status", |_| async { Ok(json!({"is_running": true})) });

    let status = client.connect().await.unwrap();

    assert_eq!(status["is_running"], true);
    assert_eq!(client.connection_state(), ConnectionState::Connected);
}
