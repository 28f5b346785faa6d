// HTTP request handlers

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;

use super::api_types::{AnalyzeRequest, AnalyzeResponse, ErrorResponse, HealthResponse};
use crate::errors::RelayError;
use crate::session::{ConversationSession, SessionState};

pub const WELCOME_MESSAGE: &str = "Welcome to the NumNum API!";
const NO_INPUT: &str = "No input provided";

/// Create the API router
pub fn create_router(session: Arc<ConversationSession>) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/health", get(health_check))
        .route("/api/analyze", post(handle_analyze))
        .with_state(session)
}

/// Static landing text
pub async fn home() -> &'static str {
    WELCOME_MESSAGE
}

/// Liveness probe; does not wait on an in-flight turn
pub async fn health_check(State(session): State<Arc<ConversationSession>>) -> Json<HealthResponse> {
    let state = match session.state() {
        SessionState::Idle => "idle",
        SessionState::AwaitingCompletion => "awaiting_completion",
    };
    Json(HealthResponse {
        status: "ok".to_string(),
        session: state.to_string(),
    })
}

/// Relay one user turn to the model
///
/// A body that is not JSON, or lacks a string `input`, is answered with 400
/// before the session is touched.
pub async fn handle_analyze(
    State(session): State<Arc<ConversationSession>>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let input = match payload {
        Ok(Json(AnalyzeRequest { input: Some(input) })) => input,
        Ok(_) => return Err(RelayError::validation(NO_INPUT).into()),
        Err(rejection) => {
            tracing::debug!("Rejected /api/analyze body: {}", rejection);
            return Err(RelayError::validation(NO_INPUT).into());
        }
    };

    let message = session.converse(&input).await?;
    Ok(Json(AnalyzeResponse { message }))
}

/// Relay errors rendered as `{"error": ...}` JSON
#[derive(Debug)]
pub struct ApiError(RelayError);

impl From<RelayError> for ApiError {
    fn from(err: RelayError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = match &self.0 {
            RelayError::Validation(_) => (StatusCode::BAD_REQUEST, NO_INPUT.to_string()),
            other => {
                tracing::error!("Request failed: {}", other);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("AI processing failed: {}", other),
                )
            }
        };
        (status, Json(ErrorResponse { error })).into_response()
    }
}
