use std::sync::Arc;

use chirp_db::{AccountStore, MessageStore, NewMessage};
use chirp_types::Message;
use chirp_types::api::SubmitMessageRequest;
use tracing::info;

use crate::error::ApiError;

pub const MAX_MESSAGE_LEN: usize = 255;

/// Non-blank and at most [`MAX_MESSAGE_LEN`] characters.
fn is_valid_text(text: &str) -> bool {
    !text.trim().is_empty() && text.chars().count() <= MAX_MESSAGE_LEN
}

pub struct MessageService {
    messages: Arc<dyn MessageStore>,
    accounts: Arc<dyn AccountStore>,
}

impl MessageService {
    pub fn new(messages: Arc<dyn MessageStore>, accounts: Arc<dyn AccountStore>) -> Self {
        Self { messages, accounts }
    }

    pub fn submit(&self, req: SubmitMessageRequest) -> Result<Message, ApiError> {
        let message_text = req
            .message_text
            .filter(|t| is_valid_text(t))
            .ok_or(ApiError::InvalidMessage)?;
        let posted_by = req.posted_by.ok_or(ApiError::InvalidMessage)?;

        if self.accounts.find_account_by_id(posted_by)?.is_none() {
            return Err(ApiError::InvalidMessage);
        }

        let message = self.messages.insert_message(NewMessage {
            posted_by,
            message_text,
            time_posted_epoch: req
                .time_posted_epoch
                .unwrap_or_else(|| chrono::Utc::now().timestamp()),
        })?;

        info!("Message {} posted by account {}", message.message_id, posted_by);
        Ok(message)
    }

    pub fn list_all(&self) -> Result<Vec<Message>, ApiError> {
        Ok(self.messages.all_messages()?)
    }

    pub fn get_by_id(&self, message_id: i64) -> Result<Option<Message>, ApiError> {
        Ok(self.messages.find_message_by_id(message_id)?)
    }

    /// Returns 1 if the message existed and was removed, 0 otherwise.
    pub fn delete_by_id(&self, message_id: i64) -> Result<usize, ApiError> {
        let removed = self.messages.delete_message(message_id)?;
        if removed > 0 {
            info!("Message {} deleted", message_id);
        }
        Ok(removed)
    }

    /// Replace a message's text. `None` covers both an unknown id and
    /// rejected text; in either case nothing is written.
    pub fn update_text_by_id(
        &self,
        message_id: i64,
        message_text: &str,
    ) -> Result<Option<Message>, ApiError> {
        if !is_valid_text(message_text) {
            return Ok(None);
        }

        let updated = self.messages.update_message_text(message_id, message_text)?;
        if updated.is_some() {
            info!("Message {} updated", message_id);
        }
        Ok(updated)
    }

    pub fn list_by_account_id(&self, account_id: i64) -> Result<Vec<Message>, ApiError> {
        Ok(self.messages.messages_posted_by(account_id)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chirp_db::Database;

    struct Fixture {
        svc: MessageService,
        alice: i64,
        bob: i64,
    }

    fn fixture() -> Fixture {
        let db = Arc::new(Database::open_in_memory().unwrap());
        let alice = db.insert_account("alice", "secret").unwrap().unwrap().account_id;
        let bob = db.insert_account("bob", "secret").unwrap().unwrap().account_id;
        Fixture {
            svc: MessageService::new(db.clone(), db),
            alice,
            bob,
        }
    }

    fn request(posted_by: i64, text: &str) -> SubmitMessageRequest {
        SubmitMessageRequest {
            posted_by: Some(posted_by),
            message_text: Some(text.to_string()),
            time_posted_epoch: Some(1_669_947_792),
        }
    }

    #[test]
    fn submit_then_get_returns_the_same_record() {
        let f = fixture();
        let posted = f.svc.submit(request(f.alice, "hello")).unwrap();
        assert_eq!(posted.posted_by, f.alice);
        assert_eq!(posted.message_text, "hello");
        assert_eq!(posted.time_posted_epoch, 1_669_947_792);
        assert_eq!(f.svc.get_by_id(posted.message_id).unwrap(), Some(posted));
    }

    #[test]
    fn submit_stamps_time_when_absent() {
        let f = fixture();
        let before = chrono::Utc::now().timestamp();
        let posted = f
            .svc
            .submit(SubmitMessageRequest {
                time_posted_epoch: None,
                ..request(f.alice, "now")
            })
            .unwrap();
        assert!(posted.time_posted_epoch >= before);
    }

    #[test]
    fn submit_rejects_bad_text_for_any_poster() {
        let f = fixture();
        let too_long = "x".repeat(MAX_MESSAGE_LEN + 1);
        for poster in [f.alice, 9999] {
            for text in ["", "   ", too_long.as_str()] {
                let err = f.svc.submit(request(poster, text)).unwrap_err();
                assert!(matches!(err, ApiError::InvalidMessage));
            }
        }
        assert!(f.svc.list_all().unwrap().is_empty());
    }

    #[test]
    fn submit_accepts_text_at_the_limit() {
        let f = fixture();
        let text = "é".repeat(MAX_MESSAGE_LEN);
        let posted = f.svc.submit(request(f.alice, &text)).unwrap();
        assert_eq!(posted.message_text, text);
    }

    #[test]
    fn submit_rejects_unknown_or_missing_poster() {
        let f = fixture();
        assert!(matches!(f.svc.submit(request(9999, "hi")), Err(ApiError::InvalidMessage)));

        let no_poster = SubmitMessageRequest {
            posted_by: None,
            ..request(f.alice, "hi")
        };
        assert!(matches!(f.svc.submit(no_poster), Err(ApiError::InvalidMessage)));
    }

    #[test]
    fn get_missing_message_is_none() {
        let f = fixture();
        assert!(f.svc.get_by_id(1).unwrap().is_none());
    }

    #[test]
    fn delete_removes_exactly_one_record() {
        let f = fixture();
        let keep = f.svc.submit(request(f.alice, "keep")).unwrap();
        let gone = f.svc.submit(request(f.bob, "gone")).unwrap();

        assert_eq!(f.svc.delete_by_id(9999).unwrap(), 0);
        assert_eq!(f.svc.list_all().unwrap(), vec![keep.clone(), gone.clone()]);

        assert_eq!(f.svc.delete_by_id(gone.message_id).unwrap(), 1);
        assert_eq!(f.svc.list_all().unwrap(), vec![keep]);
    }

    #[test]
    fn update_with_invalid_text_leaves_message_unchanged() {
        let f = fixture();
        let original = f.svc.submit(request(f.alice, "original")).unwrap();
        let too_long = "y".repeat(MAX_MESSAGE_LEN + 1);

        for text in ["", "  ", too_long.as_str()] {
            assert!(f.svc.update_text_by_id(original.message_id, text).unwrap().is_none());
        }
        assert_eq!(f.svc.get_by_id(original.message_id).unwrap(), Some(original));
    }

    #[test]
    fn update_changes_only_the_text() {
        let f = fixture();
        let original = f.svc.submit(request(f.alice, "original")).unwrap();

        let updated = f
            .svc
            .update_text_by_id(original.message_id, "edited")
            .unwrap()
            .unwrap();

        assert_eq!(
            updated,
            Message {
                message_text: "edited".into(),
                ..original
            }
        );
    }

    #[test]
    fn update_missing_message_is_none() {
        let f = fixture();
        assert!(f.svc.update_text_by_id(42, "valid").unwrap().is_none());
    }

    #[test]
    fn list_by_account_only_returns_that_posters_messages() {
        let f = fixture();
        let a1 = f.svc.submit(request(f.alice, "a1")).unwrap();
        let b1 = f.svc.submit(request(f.bob, "b1")).unwrap();
        let a2 = f.svc.submit(request(f.alice, "a2")).unwrap();

        assert_eq!(f.svc.list_by_account_id(f.alice).unwrap(), vec![a1, a2]);
        assert_eq!(f.svc.list_by_account_id(f.bob).unwrap(), vec![b1]);
        assert!(f.svc.list_by_account_id(9999).unwrap().is_empty());
    }

    #[test]
    fn text_limit_counts_characters_not_utf16_units() {
        let f = fixture();
        // 128 emoji are 128 characters but 256 UTF-16 units
        let emoji = "😀".repeat(128);
        let posted = f.svc.submit(request(f.alice, &emoji)).unwrap();
        assert_eq!(posted.message_text, emoji);

        let too_many = "😀".repeat(MAX_MESSAGE_LEN + 1);
        assert!(matches!(
            f.svc.submit(request(f.alice, &too_many)),
            Err(ApiError::InvalidMessage)
        ));
        assert!(f.svc.update_text_by_id(posted.message_id, &too_many).unwrap().is_none());
    }
}
