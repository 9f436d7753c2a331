use std::sync::Arc;

use axum::{Json, Router, extract::State, routing::get};
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::telegram::Notifier;

pub const TEST_MESSAGE: &str = "הודעת בדיקה: הבוט פועל בהצלחה!";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Response {
    pub message: String,
}

#[derive(Clone)]
pub struct ServerState {
    pub notifier: Arc<dyn Notifier + Send + Sync>,
}

pub fn router(state: ServerState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/send_test_message", get(send_test_message))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn root() -> Json<Response> {
    Json(Response { message: "Football Bot API is running.".to_string() })
}

/// Always reports success: delivery is best effort.
async fn send_test_message(State(state): State<ServerState>) -> Json<Response> {
    let notifier = Arc::clone(&state.notifier);
    match tokio::task::spawn_blocking(move || notifier.notify(TEST_MESSAGE)).await {
        Ok(Ok(())) => info!("Test message sent"),
        Ok(Err(e)) => error!(error = %e, "Failed to send test message"),
        Err(e) => error!(error = %e, "Test message task failed"),
    }
    Json(Response { message: "Test message sent.".to_string() })
}
