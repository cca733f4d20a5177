//! REPL (Read-Eval-Print Loop) for interactive chat

use crate::output::console::ConsoleFormatter;
use crate::output::surface::TerminalSurface;
use colored::Colorize;
use genie_application::AskGiftUseCase;
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};
use std::sync::Arc;
use tracing::warn;

/// Interactive chat REPL
pub struct ChatRepl {
    use_case: Arc<AskGiftUseCase>,
    surface: Arc<TerminalSurface>,
    server_url: String,
}

impl ChatRepl {
    pub fn new(
        use_case: Arc<AskGiftUseCase>,
        surface: Arc<TerminalSurface>,
        server_url: impl Into<String>,
    ) -> Self {
        Self {
            use_case,
            surface,
            server_url: server_url.into(),
        }
    }

    /// Run the interactive REPL
    pub async fn run(&self) -> RlResult<()> {
        let mut rl = DefaultEditor::new()?;

        let history_path = dirs::data_dir().map(|p| p.join("gift-genie").join("history.txt"));

        if let Some(ref path) = history_path {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = rl.load_history(path);
        }

        println!();
        println!(
            "{}",
            ConsoleFormatter::welcome(&self.server_url, self.use_case.session_id().as_ref())
        );

        loop {
            let readline = rl.readline("gift> ");

            match readline {
                Ok(line) => {
                    let line = line.trim();

                    if line.is_empty() {
                        continue;
                    }

                    if line.starts_with('/') {
                        if self.handle_command(line) {
                            break;
                        }
                        continue;
                    }

                    let _ = rl.add_history_entry(line);

                    self.process_prompt(line).await;
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("Bye!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    break;
                }
            }
        }

        if let Some(ref path) = history_path {
            let _ = rl.save_history(path);
        }

        Ok(())
    }

    /// Handle slash commands. Returns true if should exit.
    fn handle_command(&self, cmd: &str) -> bool {
        match cmd {
            "/quit" | "/exit" | "/q" => {
                println!("Bye!");
                true
            }
            "/help" | "/h" | "/?" => {
                println!();
                println!("{}", ConsoleFormatter::help());
                false
            }
            "/new" | "/reset" => {
                match self.use_case.reset() {
                    Ok(()) => println!("{}", "Started a new conversation.".green()),
                    Err(e) => {
                        warn!("Failed to reset conversation: {}", e);
                        eprintln!("{} {}", "Error:".red().bold(), e);
                    }
                }
                false
            }
            _ => {
                println!("Unknown command: {}", cmd);
                println!("Type /help for available commands");
                false
            }
        }
    }

    async fn process_prompt(&self, prompt: &str) {
        println!();

        match self.use_case.execute(prompt).await {
            Ok(outcome) => {
                self.surface.finish_line();
                if outcome.is_completed() {
                    println!();
                    println!("{}", ConsoleFormatter::continue_hint());
                }
            }
            Err(e) => {
                eprintln!("{} {}", "Error:".red().bold(), e);
            }
        }
        println!();
    }
}
