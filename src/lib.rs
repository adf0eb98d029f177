//! memobot: a stateful FAQ and memory responder for chat webhooks.
//!
//! Each inbound message is resolved to exactly one reply:
//! Normalize → FAQ (exact → typo → fuzzy) → ordered intent rules → echo
//!
//! # Architecture
//!
//! - **text**: normalization and Levenshtein distance
//! - **faq**: catalog, typo table and the tolerant matcher
//! - **memory**: persisted fact store and bounded transcript
//! - **intent**: fact field descriptors and the ordered rule table
//! - **responder**: orchestration and the shared, lock-guarded handle
//! - **gateway**: axum webhook transport (Twilio WhatsApp + JSON)

pub mod bot_dirs;
pub mod config;
pub mod error;
pub mod faq;
pub mod gateway;
pub mod intent;
pub mod memory;
pub mod responder;
pub mod text;

pub use config::BotConfig;
pub use error::{BotError, Result};
pub use responder::{Responder, SharedResponder};
