//! Batching tests for `resolve_profiles`.

use likestat_vk::{resolve_profiles, VkClient};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

fn test_client(base_url: &str) -> VkClient {
    VkClient::with_base_url("test-token", "5.131", 30, base_url)
        .expect("client construction should not fail")
}

fn requested_ids(request: &Request) -> Vec<u64> {
    request
        .url
        .query_pairs()
        .find(|(k, _)| k == "user_ids")
        .map(|(_, v)| {
            v.split(',')
                .filter(|s| !s.is_empty())
                .map(|s| s.parse().expect("numeric id"))
                .collect()
        })
        .unwrap_or_default()
}

/// Answers `users.get` with one female profile per requested id.
fn echo_users(request: &Request) -> ResponseTemplate {
    let users: Vec<serde_json::Value> = requested_ids(request)
        .into_iter()
        .map(|id| serde_json::json!({"id": id, "sex": 1, "bdate": "1.1.1990"}))
        .collect();
    ResponseTemplate::new(200).set_body_json(serde_json::json!({"response": users}))
}

#[tokio::test]
async fn splits_2500_ids_into_three_batches() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users.get"))
        .respond_with(echo_users)
        .expect(3)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let ids: Vec<u64> = (1..=2500).collect();
    let resolution = resolve_profiles(&client, &ids, 1000, 1)
        .await
        .expect("resolution should succeed");

    assert_eq!(resolution.records.len(), 2500);
    assert_eq!(resolution.batches, 3);
    assert_eq!(resolution.skipped_batches, 0);

    let requests = server.received_requests().await.expect("recording enabled");
    let mut sizes: Vec<usize> = requests.iter().map(|r| requested_ids(r).len()).collect();
    sizes.sort_unstable();
    assert_eq!(sizes, vec![500, 1000, 1000]);
}

#[tokio::test]
async fn concurrent_batches_resolve_every_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users.get"))
        .respond_with(echo_users)
        .expect(4)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let ids: Vec<u64> = (1..=10).collect();
    let resolution = resolve_profiles(&client, &ids, 3, 4)
        .await
        .expect("resolution should succeed");

    let mut resolved: Vec<u64> = resolution.records.iter().filter_map(|r| r.id).collect();
    resolved.sort_unstable();
    assert_eq!(resolved, ids);

    let requests = server.received_requests().await.expect("recording enabled");
    assert!(requests
        .iter()
        .all(|r| (1..=3).contains(&requested_ids(r).len())));
}

#[tokio::test]
async fn no_ids_means_no_requests() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let resolution = resolve_profiles(&client, &[], 1000, 1)
        .await
        .expect("resolution should succeed");

    assert!(resolution.records.is_empty());
    assert_eq!(resolution.batches, 0);
}

#[tokio::test]
async fn oversized_batch_size_is_clamped_to_vk_limit() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users.get"))
        .respond_with(echo_users)
        .expect(2)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let ids: Vec<u64> = (1..=1500).collect();
    let resolution = resolve_profiles(&client, &ids, 5000, 1)
        .await
        .expect("resolution should succeed");

    assert_eq!(resolution.records.len(), 1500);
}

#[tokio::test]
async fn failed_batches_are_skipped_and_others_kept() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users.get"))
        .and(query_param("user_ids", "3,4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "error": {"error_code": 6, "error_msg": "Too many requests per second"}
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users.get"))
        .and(query_param("user_ids", "5,6"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"oops": 1})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users.get"))
        .and(query_param("user_ids", "1,2"))
        .respond_with(echo_users)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let resolution = resolve_profiles(&client, &[1, 2, 3, 4, 5, 6], 2, 1)
        .await
        .expect("batch failures are not fatal");

    let ids: Vec<u64> = resolution.records.iter().filter_map(|r| r.id).collect();
    assert_eq!(ids, vec![1, 2]);
    assert_eq!(resolution.batches, 3);
    assert_eq!(resolution.skipped_batches, 2);
}

#[tokio::test]
async fn transport_failure_aborts_resolution() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users.get"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = resolve_profiles(&client, &[1, 2, 3], 1000, 1)
        .await
        .unwrap_err();

    assert!(err.is_transport(), "expected Http error, got {err:?}");
}
