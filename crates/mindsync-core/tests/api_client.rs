//! Contract tests for the HTTP client against a mock backend.

use mindsync_core::api::{ApiClient, ScheduleRequest, TaskPayload};
use mockito::{Matcher, Server};
use serde_json::json;

#[tokio::test]
async fn detect_mood_posts_text_and_parses_result() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/detect_mood")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({"text": "I'm anxious but excited"})))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({"label": "anxious_excited", "friendly": "Mixed", "emoji": "😅", "confidence": 0.82})
                .to_string(),
        )
        .expect(1)
        .create_async()
        .await;

    let client = ApiClient::new(&server.url()).unwrap();
    let mood = client.detect_mood("I'm anxious but excited").await.unwrap();

    assert_eq!(mood.label, "anxious_excited");
    assert_eq!(mood.to_string(), "😅 Mixed (82%)");
    mock.assert_async().await;
}

#[tokio::test]
async fn generate_schedule_sends_contract_body() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/generate_schedule")
        .match_body(Matcher::Json(json!({
            "tasks": [{"name": "Write report", "hours": 1, "minutes": 30}],
            "mood_label": "neutral",
            "start_time": "09:00",
            "break_min": 10
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "events": [{"title": "Write report",
                            "start": "2026-10-19T09:00:00",
                            "end": "2026-10-19T10:30:00"}],
                "strategy": "neutral"
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = ApiClient::new(&format!("{}/", server.url())).unwrap();
    let request = ScheduleRequest {
        tasks: vec![TaskPayload {
            name: "Write report".into(),
            hours: 1,
            minutes: 30,
        }],
        mood_label: "neutral".into(),
        start_time: "09:00".into(),
        break_min: 10,
    };
    let resp = client.generate_schedule(&request).await.unwrap();

    assert_eq!(resp.events.len(), 1);
    assert_eq!(resp.events[0].title(), Some("Write report"));
    assert_eq!(resp.strategy.as_deref(), Some("neutral"));
    mock.assert_async().await;
}

#[tokio::test]
async fn missing_events_field_is_empty_list() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/generate_schedule")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("{}")
        .create_async()
        .await;

    let client = ApiClient::new(&server.url()).unwrap();
    let request = ScheduleRequest {
        tasks: vec![],
        mood_label: "neutral".into(),
        start_time: "09:00".into(),
        break_min: 0,
    };
    let resp = client.generate_schedule(&request).await.unwrap();
    assert!(resp.events.is_empty());
}

#[tokio::test]
async fn non_success_status_is_request_failure() {
    let mut server = Server::new_async().await;
    let _mood_500 = server
        .mock("POST", "/detect_mood")
        .with_status(500)
        .with_body(r#"{"detail": "boom"}"#)
        .create_async()
        .await;
    let _schedule_422 = server
        .mock("POST", "/generate_schedule")
        .with_status(422)
        .create_async()
        .await;

    let client = ApiClient::new(&server.url()).unwrap();
    let err = client.detect_mood("hello").await.unwrap_err();
    assert_eq!(err.endpoint, "detect_mood");
    assert_eq!(err.status, Some(500));
    assert!(err.to_string().starts_with("detect_mood request failed"));

    let request = ScheduleRequest {
        tasks: vec![],
        mood_label: "neutral".into(),
        start_time: "09:00".into(),
        break_min: 10,
    };
    let err = client.generate_schedule(&request).await.unwrap_err();
    assert_eq!(err.status, Some(422));
}

#[tokio::test]
async fn malformed_body_is_request_failure() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/detect_mood")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"label": 3}"#)
        .create_async()
        .await;

    let client = ApiClient::new(&server.url()).unwrap();
    let err = client.detect_mood("hello").await.unwrap_err();
    assert_eq!(err.endpoint, "detect_mood");
}

#[tokio::test]
async fn unreachable_backend_is_request_failure() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let client = ApiClient::new(&format!("http://127.0.0.1:{port}")).unwrap();
    let err = client.detect_mood("hello").await.unwrap_err();
    assert_eq!(err.status, None);
}

#[tokio::test]
async fn health_reports_ok_flag() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/health")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"ok": true}"#)
        .create_async()
        .await;

    let client = ApiClient::new(&server.url()).unwrap();
    assert!(client.health().await.unwrap());
}

#[tokio::test]
async fn health_fails_on_server_error() {
    let mut server = Server::new_async().await;
    let _mock = server.mock("GET", "/health").with_status(503).create_async().await;

    let client = ApiClient::new(&server.url()).unwrap();
    assert_eq!(client.health().await.unwrap_err().status, Some(503));
}
