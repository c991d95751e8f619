use std::convert::Infallible;
use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use futures::StreamExt;
use serde::Deserialize;
use utoipa::ToSchema;

use ragbridge_backend::{relay_response, QueryRequest};

use crate::{error::ApiError, state::AppState};

/// Fixed failure body, returned whenever the backend call cannot produce a
/// stream. The client sees this instead of a partial response.
const BACKEND_FAILURE_BODY: &str = "Sorry, there was an error processing your request.";

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    /// Conversation identifier, carried for log correlation only.
    pub id: String,
    /// Prior conversation turns; the last entry is the question to answer.
    pub messages: Vec<ChatMessage>,
    /// Retrieval filter: restrict the answer to these uploaded files.
    #[serde(default)]
    pub selected_file_pathnames: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

/// Answer a chat turn by relaying the backend's SSE stream as plain text.
#[utoipa::path(
    post,
    path = "/api/chat",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Plain-text answer stream", content_type = "text/plain"),
        (status = 400, description = "Empty conversation"),
        (status = 500, description = "Backend unavailable")
    ),
    tag = "chat"
)]
pub async fn chat_stream(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ChatRequest>,
) -> Response {
    let Some(last_message) = req.messages.last() else {
        return ApiError::BadRequest("messages must not be empty".to_string()).into_response();
    };

    let query = QueryRequest::new(last_message.content.clone(), state.config.backend.top_k)
        .with_selected_files(req.selected_file_pathnames.clone());

    tracing::debug!(conversation_id = %req.id, "Forwarding question to backend");

    match state.backend.stream_query(&query).await {
        Ok(response) => {
            let stream = relay_response(response).map(Ok::<_, Infallible>);

            let headers = [
                (header::CONTENT_TYPE, "text/plain; charset=utf-8"),
                (header::CACHE_CONTROL, "no-cache"),
                (header::CONNECTION, "keep-alive"),
                (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
                (header::ACCESS_CONTROL_ALLOW_METHODS, "POST"),
                (header::ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type"),
            ];

            (StatusCode::OK, headers, Body::from_stream(stream)).into_response()
        }
        Err(e) => {
            tracing::error!("Chat API error: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                [(header::CONTENT_TYPE, "text/plain")],
                BACKEND_FAILURE_BODY,
            )
                .into_response()
        }
    }
}
