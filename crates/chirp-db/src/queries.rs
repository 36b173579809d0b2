use anyhow::Result;
use chirp_types::{Account, Message};
use rusqlite::Connection;

use crate::Database;
use crate::models::{ACCOUNT_COLUMNS, MESSAGE_COLUMNS, NewMessage, account_from_row, message_from_row};
use crate::store::{AccountStore, MessageStore};

// -- Accounts --

impl AccountStore for Database {
    fn insert_account(&self, username: &str, password: &str) -> Result<Option<Account>> {
        self.with_conn(|conn| {
            let inserted = conn.execute(
                "INSERT INTO account (username, password) VALUES (?1, ?2)
                 ON CONFLICT(username) DO NOTHING",
                (username, password),
            )?;
            if inserted == 0 {
                return Ok(None);
            }

            Ok(Some(Account {
                account_id: conn.last_insert_rowid(),
                username: username.to_string(),
                password: password.to_string(),
            }))
        })
    }

    fn find_account_by_username(&self, username: &str) -> Result<Option<Account>> {
        self.with_conn(|conn| {
            conn.query_row(
                &format!("SELECT {ACCOUNT_COLUMNS} FROM account WHERE username = ?1"),
                [username],
                account_from_row,
            )
            .optional()
        })
    }

    fn find_account_by_id(&self, account_id: i64) -> Result<Option<Account>> {
        self.with_conn(|conn| {
            conn.query_row(
                &format!("SELECT {ACCOUNT_COLUMNS} FROM account WHERE account_id = ?1"),
                [account_id],
                account_from_row,
            )
            .optional()
        })
    }
}

// -- Messages --

impl MessageStore for Database {
    fn insert_message(&self, message: NewMessage) -> Result<Message> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO message (posted_by, message_text, time_posted_epoch) VALUES (?1, ?2, ?3)",
                rusqlite::params![message.posted_by, message.message_text, message.time_posted_epoch],
            )?;
            Ok(message.with_id(conn.last_insert_rowid()))
        })
    }

    fn all_messages(&self) -> Result<Vec<Message>> {
        self.with_conn(|conn| {
            query_messages(
                conn,
                &format!("SELECT {MESSAGE_COLUMNS} FROM message ORDER BY message_id"),
                rusqlite::params![],
            )
        })
    }

    fn find_message_by_id(&self, message_id: i64) -> Result<Option<Message>> {
        self.with_conn(|conn| query_message_by_id(conn, message_id))
    }

    fn messages_posted_by(&self, account_id: i64) -> Result<Vec<Message>> {
        self.with_conn(|conn| {
            query_messages(
                conn,
                &format!(
                    "SELECT {MESSAGE_COLUMNS} FROM message WHERE posted_by = ?1 ORDER BY message_id"
                ),
                [account_id],
            )
        })
    }

    fn delete_message(&self, message_id: i64) -> Result<usize> {
        self.with_conn(|conn| {
            let removed = conn.execute("DELETE FROM message WHERE message_id = ?1", [message_id])?;
            Ok(removed)
        })
    }

    fn update_message_text(&self, message_id: i64, message_text: &str) -> Result<Option<Message>> {
        self.with_conn_mut(|conn| {
            // Fetch, mutate and save under one transaction so the row read is the row written.
            let tx = conn.transaction()?;

            let Some(mut message) = query_message_by_id(&tx, message_id)? else {
                return Ok(None);
            };

            tx.execute(
                "UPDATE message SET message_text = ?1 WHERE message_id = ?2",
                rusqlite::params![message_text, message_id],
            )?;
            tx.commit()?;

            message.message_text = message_text.to_string();
            Ok(Some(message))
        })
    }
}

fn query_message_by_id(conn: &Connection, message_id: i64) -> Result<Option<Message>> {
    conn.query_row(
        &format!("SELECT {MESSAGE_COLUMNS} FROM message WHERE message_id = ?1"),
        [message_id],
        message_from_row,
    )
    .optional()
}

fn query_messages<P: rusqlite::Params>(conn: &Connection, sql: &str, params: P) -> Result<Vec<Message>> {
    let mut stmt = conn.prepare(sql)?;

    let rows = stmt
        .query_map(params, message_from_row)?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}

/// Extension trait for optional query results
trait OptionalExt<T> {
    fn optional(self) -> Result<Option<T>>;
}

impl<T> OptionalExt<T> for std::result::Result<T, rusqlite::Error> {
    fn optional(self) -> Result<Option<T>> {
        match self {
            Ok(val) => Ok(Some(val)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
