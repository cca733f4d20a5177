//! CLI command definitions

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for gift-genie
#[derive(Parser, Debug)]
#[command(name = "gift-genie")]
#[command(author, version, about = "Gift recommendations streamed from a chat model")]
#[command(long_about = r#"
Gift Genie recommends gifts. The relay server keeps the conversation and
streams the model's reply; the client reveals it at a steady pace.

Configuration is merged from (lowest to highest priority):
1. Built-in defaults
2. ./gift-genie.toml    Project-level config
3. --config <path>      Explicit config file
4. Environment          AI_MODEL, AI_URL, AI_KEY, PORT, GIFT_*

Example:
  gift-genie serve
  gift-genie ask "birthday gift for a cat lover, budget 20"
  gift-genie chat
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the relay server
    Serve,

    /// Ask for gift ideas once
    Ask {
        /// What the gift is for
        prompt: String,

        /// Forget the stored conversation first
        #[arg(long)]
        new: bool,

        #[command(flatten)]
        client: ClientArgs,
    },

    /// Interactive chat
    Chat {
        #[command(flatten)]
        client: ClientArgs,
    },

    /// Forget the stored conversation
    Reset,

    /// Print the resolved configuration (without secrets) and its sources
    ShowConfig,
}

/// Options shared by the client commands.
#[derive(Args, Debug, Clone, Default)]
pub struct ClientArgs {
    /// Relay server URL (overrides client.server_url)
    #[arg(long, value_name = "URL")]
    pub server: Option<String>,

    /// Suppress the progress bar
    #[arg(long)]
    pub no_progress: bool,

    /// Mirror the rendered HTML document into a file
    #[arg(long, value_name = "PATH")]
    pub html_out: Option<PathBuf>,
}
