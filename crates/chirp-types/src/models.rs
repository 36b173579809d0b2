use serde::{Deserialize, Serialize};

/// A registered account. The password is kept and returned as plain text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub account_id: i64,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub message_id: i64,
    pub posted_by: i64,
    pub message_text: String,
    /// Seconds since the Unix epoch.
    pub time_posted_epoch: i64,
}
