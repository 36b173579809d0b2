//! Row mapping between SQLite and the shared `chirp-types` records.

use chirp_types::{Account, Message};
use rusqlite::Row;

pub(crate) const ACCOUNT_COLUMNS: &str = "account_id, username, password";
pub(crate) const MESSAGE_COLUMNS: &str = "message_id, posted_by, message_text, time_posted_epoch";

/// A message that has not been assigned an id yet.
#[derive(Debug, Clone)]
pub struct NewMessage {
    pub posted_by: i64,
    pub message_text: String,
    pub time_posted_epoch: i64,
}

impl NewMessage {
    pub(crate) fn with_id(self, message_id: i64) -> Message {
        Message {
            message_id,
            posted_by: self.posted_by,
            message_text: self.message_text,
            time_posted_epoch: self.time_posted_epoch,
        }
    }
}

pub(crate) fn account_from_row(row: &Row<'_>) -> rusqlite::Result<Account> {
    Ok(Account {
        account_id: row.get(0)?,
        username: row.get(1)?,
        password: row.get(2)?,
    })
}

pub(crate) fn message_from_row(row: &Row<'_>) -> rusqlite::Result<Message> {
    Ok(Message {
        message_id: row.get(0)?,
        posted_by: row.get(1)?,
        message_text: row.get(2)?,
        time_posted_epoch: row.get(3)?,
    })
}
