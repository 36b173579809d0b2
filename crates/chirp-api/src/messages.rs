use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use chirp_types::api::{SubmitMessageRequest, UpdateMessageRequest};

use crate::auth::AppState;
use crate::error::ApiError;
use crate::run_blocking;

/// POST /messages
pub async fn submit_message(
    State(state): State<AppState>,
    body: Result<Json<SubmitMessageRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = body?;
    let message = run_blocking(move || state.messages.submit(req)).await?;
    Ok(Json(message))
}

/// GET /messages
pub async fn list_messages(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let messages = run_blocking(move || state.messages.list_all()).await?;
    Ok(Json(messages))
}

/// GET /messages/{message_id} — a missing message is still a 200, just
/// with an empty body.
pub async fn get_message(
    State(state): State<AppState>,
    Path(message_id): Path<i64>,
) -> Result<Response, ApiError> {
    let message = run_blocking(move || state.messages.get_by_id(message_id)).await?;

    Ok(match message {
        Some(message) => Json(message).into_response(),
        None => StatusCode::OK.into_response(),
    })
}

/// DELETE /messages/{message_id} — body is the row count when something was
/// deleted, empty otherwise.
pub async fn delete_message(
    State(state): State<AppState>,
    Path(message_id): Path<i64>,
) -> Result<Response, ApiError> {
    let removed = run_blocking(move || state.messages.delete_by_id(message_id)).await?;

    Ok(if removed == 0 {
        StatusCode::OK.into_response()
    } else {
        Json(removed).into_response()
    })
}

/// PATCH /messages/{message_id} — the id in the path wins over anything in
/// the body.
pub async fn update_message(
    State(state): State<AppState>,
    Path(message_id): Path<i64>,
    body: Result<Json<UpdateMessageRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(req) = body?;
    let message_text = req.message_text.unwrap_or_default();
    let updated =
        run_blocking(move || state.messages.update_text_by_id(message_id, &message_text)).await?;

    Ok(match updated {
        Some(_) => Json(1).into_response(),
        None => StatusCode::BAD_REQUEST.into_response(),
    })
}

/// GET /accounts/{account_id}/messages
pub async fn list_account_messages(
    State(state): State<AppState>,
    Path(account_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let messages = run_blocking(move || state.messages.list_by_account_id(account_id)).await?;
    Ok(Json(messages))
}
