use std::sync::Arc;

use chirp_db::AccountStore;
use chirp_types::Account;
use chirp_types::api::AccountRequest;
use tracing::{debug, info};

use crate::error::ApiError;

pub const MIN_PASSWORD_LEN: usize = 4;

pub struct AccountService {
    store: Arc<dyn AccountStore>,
}

impl AccountService {
    pub fn new(store: Arc<dyn AccountStore>) -> Self {
        Self { store }
    }

    /// Create an account from a username and password.
    ///
    /// The username must contain something other than whitespace and the
    /// password must be at least [`MIN_PASSWORD_LEN`] characters. The lookup
    /// is only an early exit; the store's unique constraint has the final
    /// word on duplicates.
    pub fn register(&self, req: AccountRequest) -> Result<Account, ApiError> {
        let username = req
            .username
            .filter(|u| !u.trim().is_empty())
            .ok_or(ApiError::InvalidAccount)?;
        let password = req
            .password
            .filter(|p| p.chars().count() >= MIN_PASSWORD_LEN)
            .ok_or(ApiError::InvalidAccount)?;

        if self.store.find_account_by_username(&username)?.is_some() {
            return Err(ApiError::DuplicateUsername);
        }

        let account = self
            .store
            .insert_account(&username, &password)?
            .ok_or(ApiError::DuplicateUsername)?;

        info!("Registered account {} ({})", account.account_id, account.username);
        Ok(account)
    }

    /// Plain-text credential check. Returns the stored account on an exact
    /// password match.
    pub fn login(&self, req: AccountRequest) -> Result<Account, ApiError> {
        let (Some(username), Some(password)) = (req.username, req.password) else {
            return Err(ApiError::Unauthorized);
        };

        match self.store.find_account_by_username(&username)? {
            Some(account) if account.password == password => Ok(account),
            _ => {
                debug!("Rejected login for {}", username);
                Err(ApiError::Unauthorized)
            }
        }
    }
}
