use serde::Deserialize;

// -- Accounts --

/// Body of `POST /register` and `POST /login`.
///
/// Both fields are optional on the wire so that a missing value reaches
/// validation instead of being rejected by the JSON extractor.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AccountRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl AccountRequest {
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            username: Some(username.to_string()),
            password: Some(password.to_string()),
        }
    }
}

// -- Messages --

/// Body of `POST /messages`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubmitMessageRequest {
    #[serde(default)]
    pub posted_by: Option<i64>,
    #[serde(default)]
    pub message_text: Option<String>,
    /// Filled in with the current time when absent.
    #[serde(default)]
    pub time_posted_epoch: Option<i64>,
}

/// Body of `PATCH /messages/{message_id}`. Any id in the body is ignored;
/// the path decides which message is updated.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateMessageRequest {
    #[serde(default)]
    pub message_text: Option<String>,
}
