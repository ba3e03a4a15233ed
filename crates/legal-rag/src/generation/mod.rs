//! Chat relay to the completion service

pub mod chat;

pub use chat::{ChatRelay, FAILURE_REPLY_PREFIX, MISSING_KEY_REPLY};
