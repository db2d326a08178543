//! AI-assisted drafting flows.
//!
//! Two request/response flows ride one chat-completion abstraction:
//! payment reminder generation and line item name rewriting. Both treat
//! model output as untrusted text that must survive JSON extraction
//! before anything reaches a caller.

pub mod json;
pub mod providers;
pub mod reminder;
pub mod rewrite;

pub use providers::{ChatProvider, ChatRequest, ProviderError};
pub use reminder::{generate_reminder, Reminder, ReminderTone};
pub use rewrite::{rewrite_item_names, RewriteItem};
