//! Remote document store tests against a mock server

mod common;

use common::sample_user;
use pinpoint_core::{ErrorKind, User, UserStore};
use pinpoint_storage::{RealtimeConfig, RealtimeUserStore, StorageError};
use std::collections::HashMap;
use std::time::Duration;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn store_for(server: &MockServer) -> RealtimeUserStore {
    RealtimeUserStore::new(RealtimeConfig::new(server.uri())).unwrap()
}

#[test]
fn rejects_non_http_url() {
    let err = RealtimeUserStore::new(RealtimeConfig::new("ftp://example.com")).unwrap_err();
    assert!(matches!(err, StorageError::InvalidUrl(_)));

    let err = RealtimeUserStore::new(RealtimeConfig::new("not a url")).unwrap_err();
    assert!(matches!(err, StorageError::InvalidUrl(_)));
}

#[tokio::test]
async fn put_writes_whole_document() {
    let server = MockServer::start().await;
    let user = sample_user("Ana", "12345");

    Mock::given(method("PUT"))
        .and(path(format!("/users/{}.json", user.id)))
        .and(body_json(&user))
        .respond_with(ResponseTemplate::new(200).set_body_json(&user))
        .expect(1)
        .mount(&server)
        .await;

    store_for(&server).put(&user.id, &user).await.unwrap();
}

#[tokio::test]
async fn get_missing_document_is_none() {
    let server = MockServer::start().await;
    let user = sample_user("Ana", "12345");

    Mock::given(method("GET"))
        .and(path(format!("/users/{}.json", user.id)))
        .respond_with(ResponseTemplate::new(200).set_body_string("null"))
        .mount(&server)
        .await;

    assert_eq!(store_for(&server).get(&user.id).await.unwrap(), None);
}

#[tokio::test]
async fn get_existing_document() {
    let server = MockServer::start().await;
    let user = sample_user("Ana", "12345");

    Mock::given(method("GET"))
        .and(path(format!("/users/{}.json", user.id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(&user))
        .mount(&server)
        .await;

    assert_eq!(store_for(&server).get(&user.id).await.unwrap(), Some(user));
}

#[tokio::test]
async fn get_all_reads_collection_map() {
    let server = MockServer::start().await;
    let ana = sample_user("Ana", "12345");
    let bo = sample_user("Bo", "90001");
    let body: HashMap<String, User> = [
        (ana.id.to_string(), ana.clone()),
        (bo.id.to_string(), bo.clone()),
    ]
    .into_iter()
    .collect();

    Mock::given(method("GET"))
        .and(path("/users.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    let mut users = store_for(&server).get_all().await.unwrap();
    users.sort_by(|a, b| a.name.cmp(&b.name));
    assert_eq!(users, vec![ana, bo]);
}

#[tokio::test]
async fn get_all_of_empty_collection() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("null"))
        .mount(&server)
        .await;

    assert!(store_for(&server).get_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn remove_deletes_document() {
    let server = MockServer::start().await;
    let user = sample_user("Ana", "12345");

    Mock::given(method("DELETE"))
        .and(path(format!("/users/{}.json", user.id)))
        .respond_with(ResponseTemplate::new(200).set_body_string("null"))
        .expect(1)
        .mount(&server)
        .await;

    store_for(&server).remove(&user.id).await.unwrap();
}

#[tokio::test]
async fn auth_token_is_sent_as_query_parameter() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users.json"))
        .and(query_param("auth", "secret-token"))
        .respond_with(ResponseTemplate::new(200).set_body_string("null"))
        .expect(1)
        .mount(&server)
        .await;

    let store =
        RealtimeUserStore::new(RealtimeConfig::new(server.uri()).with_auth_token("secret-token"))
            .unwrap();
    store.get_all().await.unwrap();
}

#[tokio::test]
async fn ping_uses_shallow_read() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users.json"))
        .and(query_param("shallow", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_string("null"))
        .expect(1)
        .mount(&server)
        .await;

    store_for(&server).ping().await.unwrap();
}

#[tokio::test]
async fn server_error_is_a_storage_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users.json"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Permission denied"))
        .mount(&server)
        .await;

    let err = store_for(&server).get_all().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Storage);
    assert!(err.to_string().contains("Permission denied"));
}

#[tokio::test]
async fn slow_server_is_a_timeout() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users.json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("null")
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let store = RealtimeUserStore::new(
        RealtimeConfig::new(server.uri()).with_timeout(Duration::from_millis(100)),
    )
    .unwrap();

    let err = store.get_all().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Timeout);
}
