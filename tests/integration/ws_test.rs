//! Integration tests for the exam session WebSocket gateway.

mod helpers;

use std::time::Duration;

use futures::SinkExt;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::tungstenite::http::StatusCode;

use proctor_core::types::{AlertId, ExamSessionId};
use proctor_entity::alert::{Alert, AlertSeverity};
use proctor_realtime::message::ServerEvent;

use helpers::{MAX_MESSAGE_BYTES, TestApp, connect, next_text};

const WAIT: Duration = Duration::from_secs(2);
const QUIET: Duration = Duration::from_millis(200);

#[tokio::test]
async fn test_message_reaches_every_peer_in_session() {
    let app = TestApp::new().await;
    let addr = app.spawn().await;
    let session = ExamSessionId::new().to_string();

    let mut alice = connect(addr, &session, &app.access_token("alice").await).await;
    let mut bob = connect(addr, &session, &app.access_token("bob").await).await;
    let mut carol = connect(addr, &session, &app.access_token("carol").await).await;
    app.wait_for_connections(3).await;

    let first = r#"{"type":"alert","event_type":"face_missing"}"#;
    let second = r#"{"type":"chat","text":"hello"}"#;
    alice.send(Message::Text(first.into())).await.unwrap();
    alice.send(Message::Text(second.into())).await.unwrap();

    for ws in [&mut alice, &mut bob, &mut carol] {
        assert_eq!(next_text(ws, WAIT).await.as_deref(), Some(first));
        assert_eq!(next_text(ws, WAIT).await.as_deref(), Some(second));
    }
}

#[tokio::test]
async fn test_sessions_are_isolated() {
    let app = TestApp::new().await;
    let addr = app.spawn().await;
    let exam_x = ExamSessionId::new().to_string();
    let exam_y = ExamSessionId::new().to_string();

    let mut alice = connect(addr, &exam_x, &app.access_token("alice").await).await;
    let mut bob = connect(addr, &exam_y, &app.access_token("bob").await).await;
    app.wait_for_connections(2).await;

    let raw = r#"{"type":"alert"}"#;
    alice.send(Message::Text(raw.into())).await.unwrap();

    assert_eq!(next_text(&mut alice, WAIT).await.as_deref(), Some(raw));
    assert_eq!(next_text(&mut bob, QUIET).await, None);
}

#[tokio::test]
async fn test_invalid_frame_answers_sender_only() {
    let app = TestApp::new().await;
    let addr = app.spawn().await;
    let session = ExamSessionId::new().to_string();

    let mut alice = connect(addr, &session, &app.access_token("alice").await).await;
    let mut bob = connect(addr, &session, &app.access_token("bob").await).await;
    app.wait_for_connections(2).await;

    alice.send(Message::Text("not json".into())).await.unwrap();

    let reply = next_text(&mut alice, WAIT).await.unwrap();
    let reply: serde_json::Value = serde_json::from_str(&reply).unwrap();
    assert_eq!(reply["type"], "error");
    assert_eq!(reply["code"], "INVALID_MESSAGE");
    assert_eq!(next_text(&mut bob, QUIET).await, None);

    let oversized = format!(
        r#"{{"type":"chat","text":"{}"}}"#,
        "x".repeat(MAX_MESSAGE_BYTES)
    );
    alice.send(Message::Text(oversized.into())).await.unwrap();

    let reply = next_text(&mut alice, WAIT).await.unwrap();
    let reply: serde_json::Value = serde_json::from_str(&reply).unwrap();
    assert_eq!(reply["code"], "MESSAGE_TOO_LARGE");
    assert_eq!(next_text(&mut bob, QUIET).await, None);
}

#[tokio::test]
async fn test_bad_token_is_rejected_before_upgrade() {
    let app = TestApp::new().await;
    let addr = app.spawn().await;
    let session = ExamSessionId::new();

    let url = format!("ws://{}/ws/exam/{}?token=garbage", addr, session);
    match tokio_tungstenite::connect_async(url).await {
        Err(tokio_tungstenite::tungstenite::Error::Http(response)) => {
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        }
        other => panic!("expected HTTP 401, got {:?}", other.map(|_| ())),
    }

    let pair = app.state.credentials.issue("alice").await.unwrap();
    let url = format!(
        "ws://{}/ws/exam/{}?token={}",
        addr, session, pair.refresh_token
    );
    assert!(tokio_tungstenite::connect_async(url).await.is_err());
    assert_eq!(app.state.hub().connection_count(), 0);
}

#[tokio::test]
async fn test_disconnect_unregisters_and_cleans_up_session() {
    let app = TestApp::new().await;
    let addr = app.spawn().await;
    let session = ExamSessionId::new();

    let mut alice = connect(addr, &session.to_string(), &app.access_token("alice").await).await;
    app.wait_for_connections(1).await;
    assert!(app.state.hub().channel_info(session).is_some());

    alice.close(None).await.unwrap();
    app.wait_for_connections(0).await;
    assert!(app.state.hub().channel_info(session).is_none());
}

#[tokio::test]
async fn test_server_event_is_pushed_to_session() {
    let app = TestApp::new().await;
    let addr = app.spawn().await;
    let session = ExamSessionId::new();

    let mut invigilator = connect(addr, &session.to_string(), &app.access_token("inv").await).await;
    app.wait_for_connections(1).await;

    let alert = Alert {
        id: AlertId::new(),
        exam_session_id: session,
        severity: AlertSeverity::Critical,
        event_type: "multiple_faces".to_string(),
        description: "Two faces detected".to_string(),
        created_at: chrono::Utc::now(),
    };
    let report = app
        .state
        .gateway
        .publish(session, &ServerEvent::AlertRaised { alert: alert.clone() });
    assert_eq!(report.delivered, 1);

    let pushed = next_text(&mut invigilator, WAIT).await.unwrap();
    let pushed: serde_json::Value = serde_json::from_str(&pushed).unwrap();
    assert_eq!(pushed["type"], "alert_raised");
    assert_eq!(pushed["alert"]["severity"], "CRITICAL");
    assert_eq!(pushed["alert"]["id"], alert.id.to_string());
}
