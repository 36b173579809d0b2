//! Store traits the services are written against. [`crate::Database`]
//! implements both.

use anyhow::Result;
use chirp_types::{Account, Message};

use crate::models::NewMessage;

pub trait AccountStore: Send + Sync {
    /// Inserts a new account. Returns `None` when the username is already
    /// taken; the check and the insert are a single statement.
    fn insert_account(&self, username: &str, password: &str) -> Result<Option<Account>>;

    fn find_account_by_username(&self, username: &str) -> Result<Option<Account>>;

    fn find_account_by_id(&self, account_id: i64) -> Result<Option<Account>>;
}

pub trait MessageStore: Send + Sync {
    fn insert_message(&self, message: NewMessage) -> Result<Message>;

    /// All messages in id order.
    fn all_messages(&self) -> Result<Vec<Message>>;

    fn find_message_by_id(&self, message_id: i64) -> Result<Option<Message>>;

    /// Messages whose `posted_by` is `account_id`, in id order.
    fn messages_posted_by(&self, account_id: i64) -> Result<Vec<Message>>;

    /// Returns the number of rows removed (0 or 1).
    fn delete_message(&self, message_id: i64) -> Result<usize>;

    /// Replaces the text of an existing message and returns the updated
    /// record, or `None` if there is no such message. Other columns are
    /// left untouched.
    fn update_message_text(&self, message_id: i64, message_text: &str) -> Result<Option<Message>>;
}
