mod common;

use football_reminder_bot::error::NotifyError;
use football_reminder_bot::telegram::{Notifier, Telegram};

use common::serve_once;

#[test]
fn posts_chat_id_and_text_to_send_message() {
    let (base, server) = serve_once("200 OK", r#"{"ok": true, "result": {"message_id": 7}}"#);
    let telegram = Telegram::with_api_url(&base, "TOK".to_string(), "-100".to_string());

    telegram.notify("שלום").expect("notify should succeed");
    let request = server.join().expect("server thread");

    assert_eq!(request.request_line, "POST /botTOK/sendMessage HTTP/1.1");
    assert!(
        request.header("Content-Type").is_some_and(|v| v.starts_with("application/json")),
        "headers were: {:?}",
        request.headers
    );
    let payload: serde_json::Value = serde_json::from_str(&request.body).expect("json payload");
    assert_eq!(payload, serde_json::json!({ "chat_id": "-100", "text": "שלום" }));
}

#[test]
fn rejected_message_is_http_error() {
    let (base, server) = serve_once("400 Bad Request", r#"{"ok": false, "description": "Bad Request: chat not found"}"#);
    let telegram = Telegram::with_api_url(&base, "TOK".to_string(), "missing".to_string());

    let result = telegram.notify("hello");
    server.join().expect("server thread");

    match result {
        Err(NotifyError::Http { status, body }) => {
            assert_eq!(status, 400);
            assert!(body.contains("chat not found"), "body was: {}", body);
        }
        other => panic!("expected Http error, got {:?}", other),
    }
}

#[test]
fn unreachable_api_is_transport_error() {
    let telegram = Telegram::with_api_url("http://127.0.0.1:9", "TOK".to_string(), "-100".to_string());
    assert!(matches!(telegram.notify("hello"), Err(NotifyError::Transport(_))));
}
