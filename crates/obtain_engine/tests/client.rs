use std::time::Duration;

use obtain_engine::{ClientSettings, DownloadRequest, FailureKind, JobApi, ReqwestJobApi};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn api_for(server: &MockServer) -> ReqwestJobApi {
    ReqwestJobApi::new(ClientSettings {
        base_url: server.uri(),
        ..ClientSettings::default()
    })
    .expect("client builds")
}

#[tokio::test]
async fn lists_conversions() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/conversions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": "abc_1700000000",
                "url": "https://youtu.be/abc",
                "format": "mpg",
                "status": "completed",
                "startTime": "2024-03-01T10:00:00Z",
                "endTime": "2024-03-01T10:02:00Z",
                "filename": "abc_1700000000.mpg",
                "error": "",
                "progress": 1.0,
                "size": "4.0 MB",
                "canRetry": false
            },
            {
                "id": "def_1700000001",
                "url": "https://youtu.be/def",
                "format": "avi",
                "status": "failed",
                "startTime": "2024-03-01T11:00:00Z",
                "endTime": null,
                "filename": "",
                "error": "FFmpeg conversion failed: exit status 1",
                "progress": 0.5,
                "size": "0 Bytes",
                "canRetry": true
            }
        ])))
        .mount(&server)
        .await;

    let jobs = api_for(&server).list_conversions().await.expect("list ok");
    assert_eq!(jobs.len(), 2);
    assert_eq!(jobs[0].filename.as_deref(), Some("abc_1700000000.mpg"));
    assert!(jobs[0].end_time.is_some());
    assert_eq!(jobs[1].filename, None);
    assert!(jobs[1].can_retry);
    assert_eq!(
        jobs[1].error.as_deref(),
        Some("FFmpeg conversion failed: exit status 1")
    );
}

#[tokio::test]
async fn list_reports_http_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/conversions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let err = api_for(&server).list_conversions().await.unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(500));
    assert!(err.message.ends_with("boom"));
}

#[tokio::test]
async fn list_rejects_non_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/conversions"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>nope</html>"))
        .mount(&server)
        .await;

    let err = api_for(&server).list_conversions().await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Decode);
}

#[tokio::test]
async fn submit_direct_download_returns_ready() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/download"))
        .and(body_json(json!({"url": "https://youtu.be/abc", "convert": false})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "ready",
            "downloadUrl": "https://cdn.example.com/abc.mp4"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = api_for(&server)
        .submit_download(&DownloadRequest {
            url: "https://youtu.be/abc".into(),
            convert: false,
            format: None,
        })
        .await
        .expect("submit ok");
    assert_eq!(response.status, "ready");
    assert_eq!(
        response.download_url.as_deref(),
        Some("https://cdn.example.com/abc.mp4")
    );
}

#[tokio::test]
async fn submit_conversion_sends_format() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/download"))
        .and(body_json(json!({
            "url": "https://youtu.be/abc",
            "convert": true,
            "format": "avi"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "converting",
            "jobId": "abc_1700000000"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = api_for(&server)
        .submit_download(&DownloadRequest {
            url: "https://youtu.be/abc".into(),
            convert: true,
            format: Some("avi".into()),
        })
        .await
        .expect("submit ok");
    assert_eq!(response.status, "converting");
    assert_eq!(response.job_id.as_deref(), Some("abc_1700000000"));
    assert_eq!(response.download_url, None);
}

#[tokio::test]
async fn delete_and_retry_hit_their_endpoints() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/delete/abc_1.mpg"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ok"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/retry/def_2"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"status": "retrying", "jobId": "def_2"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let api = api_for(&server);
    api.delete_file("abc_1.mpg").await.expect("delete ok");
    api.retry_job("def_2").await.expect("retry ok");
}

#[tokio::test]
async fn delete_of_missing_file_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/delete/gone.mpg"))
        .respond_with(ResponseTemplate::new(404).set_body_string("File not found"))
        .mount(&server)
        .await;

    let err = api_for(&server).delete_file("gone.mpg").await.unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(404));
}

#[tokio::test]
async fn configured_request_timeout_applies() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/conversions"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(json!([])),
        )
        .mount(&server)
        .await;

    let api = ReqwestJobApi::new(ClientSettings {
        base_url: server.uri(),
        request_timeout: Some(Duration::from_millis(50)),
        ..ClientSettings::default()
    })
    .unwrap();
    let err = api.list_conversions().await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
}

#[tokio::test]
async fn unreachable_server_is_a_network_error() {
    let api = ReqwestJobApi::new(ClientSettings {
        base_url: "http://127.0.0.1:1".into(),
        connect_timeout: Duration::from_millis(200),
        request_timeout: None,
    })
    .unwrap();
    let err = api.list_conversions().await.unwrap_err();
    assert!(matches!(err.kind, FailureKind::Network | FailureKind::Timeout));
}
