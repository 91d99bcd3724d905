//! Moderation Gate adapters.

mod blocklist;
mod openai;

pub use blocklist::BlocklistModerationGate;
pub use openai::{DEFAULT_BASE_URL, DEFAULT_MODEL, OpenAiModerationGate, OpenAiSettings};
