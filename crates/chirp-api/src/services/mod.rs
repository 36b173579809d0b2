//! Validation and orchestration between the HTTP handlers and the stores.

pub mod accounts;
pub mod messages;

pub use accounts::AccountService;
pub use messages::MessageService;
