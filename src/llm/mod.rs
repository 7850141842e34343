//! Completion gateway: turns go in, assistant text comes out
//!
//! The [`CompletionProvider`] trait is the seam between the application and
//! the transport; [`GroqProvider`] is the HTTP implementation against
//! Groq's OpenAI-compatible chat-completions endpoint.

pub mod errors;
pub mod groq;
pub mod provider;
pub mod types;

pub use errors::*;
pub use groq::*;
pub use provider::*;
pub use types::*;
