use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    response::IntoResponse,
};

use chirp_db::{AccountStore, Database, MessageStore};
use chirp_types::api::AccountRequest;

use crate::error::ApiError;
use crate::run_blocking;
use crate::services::{AccountService, MessageService};

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub accounts: AccountService,
    pub messages: MessageService,
}

impl AppStateInner {
    /// Wire both services to the same database.
    pub fn new(db: Arc<Database>) -> Self {
        Self::with_stores(db.clone(), db)
    }

    pub fn with_stores(accounts: Arc<dyn AccountStore>, messages: Arc<dyn MessageStore>) -> Self {
        Self {
            accounts: AccountService::new(accounts.clone()),
            messages: MessageService::new(messages, accounts),
        }
    }
}

/// POST /register
pub async fn register(
    State(state): State<AppState>,
    body: Result<Json<AccountRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = body?;
    let account = run_blocking(move || state.accounts.register(req)).await?;
    Ok(Json(account))
}

/// POST /login
pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<AccountRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = body?;
    let account = run_blocking(move || state.accounts.login(req)).await?;
    Ok(Json(account))
}
