use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{debug, info};

use super::run::RunCommand;
use crate::app::App;
use crate::config::Config;

/// Banter - a terminal chat client for Groq-hosted language models
#[derive(Parser)]
#[command(
    name = "banter",
    version,
    about = "A terminal chat client for Groq-hosted language models",
    long_about = r#"Banter keeps an ongoing conversation with a Groq-hosted model in your terminal.
Every reply stays in the history, so follow-up questions carry the full context.

Examples:
  banter                                   # Start interactive chat
  banter run "What is Rust?"               # Run a single prompt
  banter -m llama-3.3-70b-versatile        # Pick a different model"#
)]
pub struct Cli {
    /// Model to use for completions
    #[arg(short = 'm', long = "model", global = true)]
    pub model: Option<String>,

    /// Maximum tokens per response
    #[arg(long = "max-tokens", global = true)]
    pub max_tokens: Option<u32>,

    /// Sampling temperature
    #[arg(short = 't', long = "temperature", global = true)]
    pub temperature: Option<f32>,

    /// Enable debug logging
    #[arg(short = 'd', long = "debug", global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a single prompt non-interactively
    Run(RunCommand),
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        if self.debug {
            debug!("Debug logging enabled");
        }

        // Initialize configuration
        let mut config = Config::init().await?;
        self.apply_overrides(&mut config);
        config.validate()?;
        debug!("Configuration initialized");

        match self.command {
            Some(Commands::Run(run_cmd)) => {
                // Execute non-interactive run command
                run_cmd.execute(&config).await
            }
            None => {
                // Start interactive mode
                Self::start_interactive_mode(&config).await
            }
        }
    }

    /// Apply command-line flags on top of the resolved configuration
    fn apply_overrides(&self, config: &mut Config) {
        if let Some(model) = &self.model {
            config.model = model.clone();
        }
        if let Some(max_tokens) = self.max_tokens {
            config.max_tokens = max_tokens;
        }
        if let Some(temperature) = self.temperature {
            config.temperature = temperature;
        }
    }

    async fn start_interactive_mode(config: &Config) -> Result<()> {
        info!("Starting interactive mode");

        let mut app = App::new(config.clone())?;
        app.run_interactive().await?;

        info!("Application finished");
        Ok(())
    }
}
