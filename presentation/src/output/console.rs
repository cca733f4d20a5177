//! Console formatting for the gift-genie client

use colored::Colorize;
use genie_application::APOLOGY;
use genie_domain::SessionId;

/// Formats panels and banners for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// The apology panel shown when a request fails. `detail` is the
    /// provider's message when one was streamed.
    pub fn apology(detail: Option<&str>) -> String {
        let line = "-".repeat(60);
        let mut output = format!("\n{}\n{}\n", line.red(), APOLOGY.bold());
        if let Some(detail) = detail {
            output.push_str(&format!("{} {}\n", "Details:".dimmed(), detail));
        }
        output.push_str(&format!("{}\n", line.red()));
        output
    }

    /// Banner printed when the chat REPL starts.
    pub fn welcome(server_url: &str, session: Option<&SessionId>) -> String {
        let mut output = String::new();
        output.push_str(&Self::header("Gift Genie - Chat Mode"));
        output.push('\n');
        output.push_str(&format!("{} {}\n", "Server:".cyan().bold(), server_url));
        match session {
            Some(id) => output.push_str(&format!(
                "{} {} (use /new to start over)\n",
                "Session:".cyan().bold(),
                id
            )),
            None => output.push_str(&format!("{} new\n", "Session:".cyan().bold())),
        }
        output.push('\n');
        output.push_str(&Self::help());
        output
    }

    /// REPL command list.
    pub fn help() -> String {
        let mut output = format!("{}\n", "Commands:".cyan().bold());
        output.push_str("  /new, /reset      - Start a new conversation\n");
        output.push_str("  /help, /h, /?     - Show this help\n");
        output.push_str("  /quit, /exit, /q  - Exit chat\n");
        output
    }

    /// Offered after every completed answer.
    pub fn continue_hint() -> String {
        format!(
            "{}",
            "Continue the conversation below, or /new for a fresh one.".dimmed()
        )
    }

    /// The resolved, non-secret configuration.
    pub fn config(public_toml: &str) -> String {
        let mut output = Self::section_header("Resolved configuration");
        output.push('\n');
        output.push_str(public_toml.trim_end());
        output.push('\n');
        output
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}", title.cyan().bold(), "-".repeat(40))
    }
}
