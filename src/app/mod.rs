//! Core application logic and orchestration
//!
//! This module provides the main application structure that coordinates
//! the conversation history and the completion provider.

mod repl;

use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::{
    config::Config,
    llm::{CompletionProvider, GatewayError, GroqProvider, Role},
    session::{export_filename, transcript, Conversation},
};

/// Outcome of submitting one user message
#[derive(Debug)]
pub struct Exchange {
    /// Text recorded as the assistant turn: the reply, or the folded error
    pub reply: String,

    /// The underlying error when the completion failed
    pub failure: Option<GatewayError>,
}

impl Exchange {
    pub fn is_error(&self) -> bool {
        self.failure.is_some()
    }
}

/// Main application structure
pub struct App {
    config: Config,
    provider: Arc<dyn CompletionProvider>,
    conversation: Conversation,
}

impl App {
    /// Create a new application instance
    pub fn new(config: Config) -> Result<Self> {
        debug!("Creating new App instance");

        if !config.has_api_key() {
            warn!("No API key configured; completions will fail until GROQ_API_KEY is set");
        }

        let provider = GroqProvider::new(config.provider_config())?;

        Ok(App {
            config,
            provider: Arc::new(provider),
            conversation: Conversation::new(),
        })
    }

    /// Create an application instance around a specific provider
    pub fn with_provider(config: Config, provider: Arc<dyn CompletionProvider>) -> Self {
        App {
            config,
            provider,
            conversation: Conversation::new(),
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get the completion provider
    pub fn provider(&self) -> &Arc<dyn CompletionProvider> {
        &self.provider
    }

    /// Get the recorded conversation
    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    /// Submit one user message and record the outcome
    ///
    /// The user turn is appended first, then the full history is sent to
    /// the provider. On failure the folded error text is recorded as the
    /// assistant turn, so it stays part of the conversation like any
    /// other reply.
    pub async fn submit_user_message(&mut self, text: impl Into<String>) -> Exchange {
        self.conversation.append(Role::User, text);
        debug!(
            "Requesting completion for {} turns via {}",
            self.conversation.len(),
            self.provider.name()
        );

        let result = self.provider.complete(self.conversation.turns()).await;

        let (reply, failure) = match result {
            Ok(reply) => {
                info!("Received completion ({} chars)", reply.len());
                (reply, None)
            }
            Err(e) => {
                error!("Completion failed: {}", e);
                (format!("Error: {}", e), Some(e))
            }
        };

        self.conversation.append(Role::Assistant, reply.clone());

        Exchange { reply, failure }
    }

    /// Forget every recorded turn
    pub fn clear_history(&mut self) {
        info!("Clearing conversation history");
        self.conversation.clear();
    }

    /// Render the conversation for download
    ///
    /// Returns the suggested filename and the transcript body.
    pub fn export_history(&self) -> (String, String) {
        let filename = export_filename(chrono::Local::now());
        let content = transcript(self.conversation.turns());
        (filename, content)
    }

    /// Run the application in interactive mode
    pub async fn run_interactive(&mut self) -> Result<()> {
        info!("Starting interactive mode");
        repl::run(self).await
    }

    /// Run a single prompt non-interactively
    ///
    /// Failures come back as the folded error text rather than an `Err`,
    /// matching what an interactive user would see.
    pub async fn run_non_interactive(&mut self, prompt: &str, quiet: bool) -> Result<String> {
        info!("Running non-interactive prompt");
        debug!("Prompt: {}", prompt);

        if !quiet {
            println!("Processing prompt...");
        }

        let exchange = self.submit_user_message(prompt).await;
        Ok(exchange.reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::{GatewayResult, Turn};
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Provider that replays canned results and records every call
    struct StubProvider {
        replies: Mutex<Vec<GatewayResult<String>>>,
        calls: Mutex<Vec<Vec<Turn>>>,
    }

    impl StubProvider {
        fn new(replies: Vec<GatewayResult<String>>) -> Self {
            Self {
                replies: Mutex::new(replies),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<Vec<Turn>> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CompletionProvider for StubProvider {
        async fn complete(&self, turns: &[Turn]) -> GatewayResult<String> {
            self.calls.lock().unwrap().push(turns.to_vec());
            self.replies.lock().unwrap().remove(0)
        }

        fn name(&self) -> &str {
            "stub"
        }

        fn model(&self) -> &str {
            "stub-model"
        }
    }

    fn stub_app(replies: Vec<GatewayResult<String>>) -> (App, Arc<StubProvider>) {
        let provider = Arc::new(StubProvider::new(replies));
        let app = App::with_provider(Config::default(), provider.clone());
        (app, provider)
    }

    #[tokio::test]
    async fn test_submit_records_user_and_assistant_turns() {
        let (mut app, _) = stub_app(vec![Ok("Hello!".to_string())]);

        let exchange = app.submit_user_message("Hi").await;
        assert_eq!(exchange.reply, "Hello!");
        assert!(!exchange.is_error());

        let turns = app.conversation().turns();
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0], Turn::user("Hi"));
        assert_eq!(turns[1], Turn::assistant("Hello!"));
    }

    #[tokio::test]
    async fn test_submit_sends_full_history_each_time() {
        let (mut app, provider) = stub_app(vec![
            Ok("first".to_string()),
            Ok("second".to_string()),
        ]);

        app.submit_user_message("one").await;
        app.submit_user_message("two").await;

        let calls = provider.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0], vec![Turn::user("one")]);
        assert_eq!(
            calls[1],
            vec![
                Turn::user("one"),
                Turn::assistant("first"),
                Turn::user("two"),
            ]
        );
    }

    #[tokio::test]
    async fn test_submit_failure_folds_error_into_history() {
        let (mut app, provider) = stub_app(vec![
            Err(GatewayError::ApiError(
                "429 Too Many Requests: rate limit reached".to_string(),
            )),
            Ok("recovered".to_string()),
        ]);

        let exchange = app.submit_user_message("Hi").await;
        assert!(exchange.is_error());
        assert!(exchange.reply.starts_with("Error: "));
        assert!(exchange.reply.contains("rate limit reached"));

        let turns = app.conversation().turns();
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[1].content, exchange.reply);

        // The folded error participates in the next request like any turn
        app.submit_user_message("again").await;
        let calls = provider.calls();
        assert_eq!(calls[1][1].content, exchange.reply);
        assert_eq!(calls[1][1].role, Role::Assistant);
    }

    #[tokio::test]
    async fn test_clear_history_resets_conversation() {
        let (mut app, provider) = stub_app(vec![
            Ok("first".to_string()),
            Ok("fresh".to_string()),
        ]);

        app.submit_user_message("one").await;
        app.clear_history();
        assert!(app.conversation().is_empty());

        // Cleared history does not leak into later requests
        app.submit_user_message("two").await;
        assert_eq!(provider.calls()[1], vec![Turn::user("two")]);
    }

    #[tokio::test]
    async fn test_export_history() {
        let (mut app, _) = stub_app(vec![Ok("Hello!".to_string())]);
        app.submit_user_message("Hi").await;

        let (filename, content) = app.export_history();
        assert!(filename.starts_with("chat_export_"));
        assert!(filename.ends_with(".txt"));
        assert_eq!(content, "You: Hi\n\nBot: Hello!\n");
    }

    #[tokio::test]
    async fn test_export_history_empty() {
        let (app, _) = stub_app(vec![]);
        let (_, content) = app.export_history();
        assert_eq!(content, "");
    }

    #[tokio::test]
    async fn test_run_non_interactive_returns_folded_error() {
        let (mut app, _) = stub_app(vec![Err(GatewayError::AuthError(
            "401 Unauthorized: Invalid API Key".to_string(),
        ))]);

        let reply = app.run_non_interactive("Hi", true).await.unwrap();
        assert!(reply.starts_with("Error: Authentication failed"));
    }
}
