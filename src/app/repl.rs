//! Interactive terminal chat loop

use std::borrow::Cow::{self, Borrowed, Owned};

use anyhow::Result;
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};

use crate::version;

use super::App;

/// CLI helper for rustyline that provides completion, highlighting, and hints.
#[derive(Clone)]
struct CliHelper {
    commands: Vec<String>,
}

impl CliHelper {
    fn new() -> Self {
        Self {
            commands: vec![
                "/clear".to_string(),
                "/export".to_string(),
                "/quit".to_string(),
            ],
        }
    }
}

impl Helper for CliHelper {}

impl Completer for CliHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];

        if line.starts_with('/') {
            let candidates: Vec<Pair> = self
                .commands
                .iter()
                .filter(|cmd| cmd.starts_with(line))
                .map(|cmd| Pair {
                    display: cmd.clone(),
                    replacement: cmd.clone(),
                })
                .collect();
            Ok((0, candidates))
        } else {
            Ok((0, vec![]))
        }
    }
}

impl Highlighter for CliHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with('/') {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for CliHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];

        if line.starts_with('/') && !line.contains(' ') {
            self.commands
                .iter()
                .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
                .map(|cmd| cmd[line.len()..].to_string())
        } else {
            None
        }
    }
}

impl Validator for CliHelper {}

/// Drive the interactive chat session until the user leaves.
pub async fn run(app: &mut App) -> Result<()> {
    let helper = CliHelper::new();
    let mut rl = Editor::new()?;
    rl.set_helper(Some(helper));

    println!(
        "{}",
        format!("=== {} ===", version::full_version())
            .bright_magenta()
            .bold()
    );
    println!(
        "{}",
        format!(
            "Chatting with {}. '/clear' resets, '/export' saves a transcript, '/quit' exits.",
            app.provider().model()
        )
        .bright_black()
    );
    println!();

    loop {
        let readline = rl.readline(">> ");

        match readline {
            Ok(line) => {
                let trimmed = line.trim();

                // Skip empty lines
                if trimmed.is_empty() {
                    continue;
                }

                let _ = rl.add_history_entry(&line);

                match trimmed {
                    "/quit" | "quit" | "exit" => {
                        println!("{}", "Goodbye!".bright_green());
                        break;
                    }
                    "/clear" => {
                        app.clear_history();
                        println!("{}", "Conversation cleared.".bright_yellow());
                    }
                    "/export" => {
                        if app.conversation().is_empty() {
                            println!("{}", "Nothing to export yet.".bright_black());
                            continue;
                        }
                        let (filename, content) = app.export_history();
                        match tokio::fs::write(&filename, content).await {
                            Ok(()) => {
                                println!(
                                    "{}",
                                    format!("Saved transcript to {}", filename).green()
                                );
                            }
                            Err(e) => {
                                eprintln!("{}", format!("Export failed: {}", e).red());
                            }
                        }
                    }
                    command if command.starts_with('/') => {
                        println!("{}", format!("Unknown command: {}", command).bright_black());
                    }
                    message => {
                        let exchange = app.submit_user_message(message).await;
                        if exchange.is_error() {
                            println!("{}", exchange.reply.red());
                        } else {
                            for line in exchange.reply.lines() {
                                println!("{}", line.bright_blue());
                            }
                        }
                        println!();
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type '/quit' to exit.".yellow());
            }
            Err(ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {:?}", err).red());
                break;
            }
        }
    }

    Ok(())
}
