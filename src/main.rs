// ABOUTME: Entry point for the hiremenator binary.
// ABOUTME: Loads .env, initializes tracing, builds the agent catalog and runs the chosen subcommand.

mod cli;

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use hiremenator_agent::{
    Assistant, DispatchConfig, Dispatcher, GeminiBackend, GoogleSearchProvider, SearchAdapter,
};
use hiremenator_core::export::{export_dot, export_yaml};
use hiremenator_core::{AgentRegistry, ROOT_AGENT, build_catalog};
use hiremenator_server::{AppState, ServerConfig, create_router};

use cli::{Cli, Command, ExportFormat};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hiremenator=debug,tower_http=debug".into()),
        )
        .init();

    let cli = Cli::parse();
    let mut config = DispatchConfig::from_env()?;
    if let Some(model) = cli.model {
        config.model = model;
    }

    match cli.command {
        Command::Agents => {
            let registry = build_catalog(&config.model)?;
            print_agents(&registry);
        }
        Command::Export { format } => {
            let registry = build_catalog(&config.model)?;
            match format {
                ExportFormat::Yaml => print!("{}", export_yaml(&registry)?),
                ExportFormat::Dot => print!("{}", export_dot(&registry)),
            }
        }
        Command::Ask { message } => {
            let assistant = build_assistant(config)?;
            ask(&assistant, &message).await?;
        }
        Command::Serve => {
            let assistant = build_assistant(config)?;
            serve(assistant).await?;
        }
    }

    Ok(())
}

/// Wire the catalog, the Gemini backend and Google search into an assistant.
fn build_assistant(config: DispatchConfig) -> anyhow::Result<Arc<Assistant>> {
    let registry = Arc::new(build_catalog(&config.model)?);
    let backend = GeminiBackend::from_env().context("configuring the Gemini backend")?;
    let search = GoogleSearchProvider::from_env().context("configuring Google search")?;

    let dispatcher = Dispatcher::new(
        registry,
        Arc::new(backend),
        SearchAdapter::new(Arc::new(search)),
        config,
    )?;
    Ok(Arc::new(Assistant::new(Arc::new(dispatcher), ROOT_AGENT)?))
}

fn print_agents(registry: &AgentRegistry) {
    for spec in registry.iter() {
        let tools: Vec<&str> = spec.tools.iter().map(|t| t.name()).collect();
        println!(
            "{:<28} {:<7} {:<24} {}",
            spec.name,
            spec.kind,
            spec.output_key,
            tools.join(", ")
        );
    }
}

/// Run a single message through a fresh session. Ctrl-C cancels the request.
async fn ask(assistant: &Assistant, message: &str) -> anyhow::Result<()> {
    let session = assistant.create_session().await;
    let send = assistant.send(session.id, message);
    tokio::pin!(send);

    let reply = tokio::select! {
        reply = &mut send => reply?,
        _ = tokio::signal::ctrl_c() => {
            tracing::warn!("interrupted, cancelling request");
            assistant.cancel(session.id).await?;
            send.await?
        }
    };

    println!("{}", reply.text);
    if !reply.incomplete.is_empty() {
        eprintln!("Not Available: {}", reply.incomplete.join(", "));
    }
    Ok(())
}

async fn serve(assistant: Arc<Assistant>) -> anyhow::Result<()> {
    let server_config = ServerConfig::from_env()?;
    let state = Arc::new(AppState::new(assistant));
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(server_config.bind)
        .await
        .with_context(|| format!("binding {}", server_config.bind))?;
    tracing::info!(addr = %server_config.bind, "hiremenator listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("shutting down");
        })
        .await?;
    Ok(())
}
