use pool_api::backend_client::BackendClient;
use pool_api::{ApiRequest, HttpMethod, PoolBackend};
use pool_test_utils::{closed_addr, direct_client, request_body, HttpStub};
use pool_types::PoolError;
use serde_json::json;

fn client_for(base_url: &str) -> BackendClient {
    BackendClient::with_client(base_url, direct_client())
}

#[tokio::test]
async fn test_put_sends_query_and_parses_response() {
    let stub = HttpStub::serve("200 OK", r#"{"message":"apr updated"}"#);

    let request = ApiRequest::new("admin/update-apr", HttpMethod::Put)
        .with_query("wallet", "W1")
        .with_query("poolId", "P1")
        .with_query("apr", "7")
        .with_query("signature", "SIG");
    let response = client_for(&stub.url("/api/svm")).send(&request).await.unwrap();

    assert_eq!(response.body["message"], "apr updated");
    assert_eq!(response.transaction_base64(), None);

    let raw = stub.request();
    assert!(raw.starts_with("PUT /api/svm/admin/update-apr?wallet=W1&poolId=P1&apr=7&signature=SIG HTTP/1.1"));
    assert!(raw.to_ascii_lowercase().contains("content-type: application/json"));
}

#[tokio::test]
async fn test_post_sends_json_body() {
    let stub = HttpStub::serve("200 OK", r#"{"status":"submitted"}"#);

    let request = ApiRequest::new("join-pool", HttpMethod::Post).with_body(json!({
        "wallet": "W1",
        "transactionBase64": "AQID",
        "poolId": "P1",
        "amount": 5,
    }));
    client_for(&stub.url("/api/svm")).send(&request).await.unwrap();

    let raw = stub.request();
    assert!(raw.starts_with("POST /api/svm/join-pool HTTP/1.1"));
    let sent: serde_json::Value = serde_json::from_str(request_body(&raw)).unwrap();
    assert_eq!(sent["transactionBase64"], "AQID");
    assert_eq!(sent["amount"], 5);
}

#[tokio::test]
async fn test_error_status_is_backend_error() {
    let stub = HttpStub::serve("400 Bad Request", r#"{"error":"pool closed"}"#);

    let request = ApiRequest::new("join-pool", HttpMethod::Get).with_query("wallet", "W1");
    let err = client_for(&stub.url("/api/svm")).send(&request).await.unwrap_err();

    match err {
        PoolError::Backend { status, body } => {
            assert_eq!(status, 400);
            assert!(body.contains("pool closed"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_non_json_body_is_invalid_response() {
    let stub = HttpStub::serve("200 OK", "<html>oops</html>");

    let request = ApiRequest::new("end-pool", HttpMethod::Get);
    let err = client_for(&stub.url("/api/svm")).send(&request).await.unwrap_err();
    assert!(matches!(err, PoolError::InvalidResponse(_)));
}

#[tokio::test]
async fn test_unreachable_backend_is_http_error() {
    let base_url = format!("http://{}/api/svm", closed_addr());

    let request = ApiRequest::new("create-pool", HttpMethod::Get);
    let err = client_for(&base_url).send(&request).await.unwrap_err();
    assert!(matches!(err, PoolError::Http(_)));
}
