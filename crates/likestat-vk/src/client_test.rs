use super::*;

fn test_client(base_url: &str) -> VkClient {
    VkClient::with_base_url("test-token", "5.131", 30, base_url)
        .expect("client construction should not fail")
}

#[test]
fn build_url_appends_method_token_and_version() {
    let client = test_client("https://api.vk.com/method");
    let url = client
        .build_url("users.get", &[("user_ids", "1,2"), ("fields", "sex,bdate")])
        .unwrap();
    assert_eq!(
        url.as_str(),
        "https://api.vk.com/method/users.get?user_ids=1%2C2&fields=sex%2Cbdate&access_token=test-token&v=5.131"
    );
}

#[test]
fn build_url_keeps_base_path_with_trailing_slash() {
    let client = test_client("https://api.vk.com/method/");
    let url = client.build_url("likes.getList", &[]).unwrap();
    assert_eq!(
        url.as_str(),
        "https://api.vk.com/method/likes.getList?access_token=test-token&v=5.131"
    );
}

#[test]
fn build_url_encodes_negative_owner_id() {
    let client = test_client("http://127.0.0.1:8080");
    let url = client
        .build_url("likes.getList", &[("owner_id", "-48632629")])
        .unwrap();
    assert!(
        url.as_str().contains("owner_id=-48632629"),
        "unexpected url: {url}"
    );
}

#[test]
fn with_base_url_rejects_garbage() {
    let result = VkClient::with_base_url("t", "5.131", 30, "not a url");
    assert!(
        matches!(result, Err(VkError::InvalidBaseUrl { .. })),
        "expected InvalidBaseUrl"
    );
}

#[test]
fn check_api_error_reads_code_and_message() {
    let body = serde_json::json!({
        "error": {"error_code": 15, "error_msg": "Access denied"}
    });
    let err = VkClient::check_api_error("likes.getList", &body).unwrap_err();
    match err {
        VkError::Api {
            method,
            code,
            message,
        } => {
            assert_eq!(method, "likes.getList");
            assert_eq!(code, 15);
            assert_eq!(message, "Access denied");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[test]
fn check_api_error_passes_success_envelope() {
    let body = serde_json::json!({"response": {"count": 0, "items": []}});
    assert!(VkClient::check_api_error("likes.getList", &body).is_ok());
}

#[test]
fn check_api_error_tolerates_odd_error_shape() {
    let body = serde_json::json!({"error": "boom"});
    let err = VkClient::check_api_error("users.get", &body).unwrap_err();
    assert!(matches!(err, VkError::Api { code: 0, .. }));
}
