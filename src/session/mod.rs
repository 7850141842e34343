//! Conversation state and transcript export
//!
//! The conversation store is plain in-memory state: one ordered sequence
//! of turns per session, living exactly as long as the process.

mod conversation;
mod export;

pub use conversation::*;
pub use export::*;
