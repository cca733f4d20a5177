//! CLI entrypoint for gift-genie
//!
//! This is the main binary that wires together all layers using
//! dependency injection. `serve` runs the relay server; `ask` and `chat`
//! talk to a running relay over HTTP.

use anyhow::{Context, Result};
use clap::Parser;
use genie_application::{
    AskGiftUseCase, AskOutcome, ClientParams, ConversationLogger, NoConversationLogger,
    NoProgress, ProgressIndicator, RelayGiftUseCase, RelayParams, SessionIdStore,
};
use genie_infrastructure::{
    ConfigLoader, FileConfig, FileSessionIdStore, HttpRelayClient, InMemorySessionStore,
    JsonlConversationLogger, OpenAiChatGateway, SanitizedMarkdownRenderer,
};
use genie_presentation::{
    AppState, ChatRepl, Cli, ClientArgs, Command, ConsoleFormatter, ProgressBarIndicator,
    TerminalSurface,
};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // RUST_LOG wins over -v
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = ConfigLoader::load(cli.config.as_deref()).context("Invalid configuration")?;

    match cli.command {
        Command::Serve => {
            run_server(&config).await?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Ask {
            prompt,
            new,
            client,
        } => {
            let client = ClientContext::build(&config, &client)?;
            if new {
                client.use_case.reset()?;
            }
            let outcome = client.use_case.execute(&prompt).await?;
            client.surface.finish_line();
            Ok(match outcome {
                AskOutcome::Completed { .. } => ExitCode::SUCCESS,
                AskOutcome::Failed { .. } => ExitCode::FAILURE,
            })
        }
        Command::Chat { client } => {
            let client = ClientContext::build(&config, &client)?;
            let repl = ChatRepl::new(client.use_case, client.surface, client.server_url);
            repl.run().await?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Reset => {
            session_id_store()?.clear()?;
            println!("Conversation forgotten.");
            Ok(ExitCode::SUCCESS)
        }
        Command::ShowConfig => {
            ConfigLoader::print_config_sources(cli.config.as_deref());
            println!("{}", ConsoleFormatter::config(&config.to_public_toml()));
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn run_server(config: &FileConfig) -> Result<()> {
    info!("Starting gift-genie relay");

    // === Dependency Injection ===
    let gateway = Arc::new(OpenAiChatGateway::from_config(&config.provider)?);
    let sessions = Arc::new(
        InMemorySessionStore::new()
            .with_ttl(config.server.session_ttl_secs.map(Duration::from_secs))
            .with_max_sessions(config.server.max_sessions),
    );
    let conversation_logger: Arc<dyn ConversationLogger> = match config
        .server
        .conversation_log
        .as_deref()
        .and_then(JsonlConversationLogger::open)
    {
        Some(logger) => {
            info!("Conversation log: {}", logger.path().display());
            Arc::new(logger)
        }
        None => Arc::new(NoConversationLogger),
    };

    let params = RelayParams::default().with_where_to_buy(config.server.where_to_buy);
    let relay = RelayGiftUseCase::new(gateway, sessions, params)
        .with_conversation_logger(conversation_logger);
    let state = AppState::new(relay, config.provider.url.clone());

    let address = config.server.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;
    genie_presentation::serve(listener, state).await?;
    Ok(())
}

/// Client-side wiring shared by `ask` and `chat`.
struct ClientContext {
    use_case: Arc<AskGiftUseCase>,
    surface: Arc<TerminalSurface>,
    server_url: String,
}

impl ClientContext {
    fn build(config: &FileConfig, args: &ClientArgs) -> Result<Self> {
        let server_url = args
            .server
            .clone()
            .unwrap_or_else(|| config.client.server_url.clone());
        let html_out = args
            .html_out
            .clone()
            .or_else(|| config.client.html_out.as_ref().map(PathBuf::from));

        let bar = (!args.no_progress && config.client.show_progress)
            .then(|| Arc::new(ProgressBarIndicator::new()));
        let surface = Arc::new(
            TerminalSurface::new()
                .with_html_out(html_out)
                .with_progress(bar.clone()),
        );
        if let Some(path) = surface.html_out() {
            info!("Mirroring rendered HTML to {}", path.display());
        }
        let progress: Arc<dyn ProgressIndicator> = match bar {
            Some(bar) => bar,
            None => Arc::new(NoProgress),
        };

        let use_case = AskGiftUseCase::new(
            Arc::new(HttpRelayClient::new(&server_url)),
            session_id_store()?,
            Arc::new(SanitizedMarkdownRenderer::new()),
            surface.clone(),
            progress,
        )
        .with_params(
            ClientParams::default().with_progress_estimate(config.client.progress_estimate()),
        );

        Ok(Self {
            use_case: Arc::new(use_case),
            surface,
            server_url,
        })
    }
}

fn session_id_store() -> Result<Arc<dyn SessionIdStore>> {
    let store = FileSessionIdStore::default_location()
        .context("No data directory available to store the session id")?;
    Ok(Arc::new(store))
}
