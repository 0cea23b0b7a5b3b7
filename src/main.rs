use chatterm::config::AppConfig;
use chatterm::gateway::{BackendGateway, HttpGateway};
use chatterm::tui;
use clap::{Parser, ValueEnum};
use serde_json::json;
use std::error::Error;
use std::io;
use std::path::Path;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser, Debug)]
#[command(
    name = "chatterm",
    version,
    about = "Terminal chat client for a locally hosted model backend"
)]
struct Cli {
    /// Base address of the chat backend.
    #[arg(long)]
    backend_url: Option<String>,
    /// Path to a TOML configuration file.
    #[arg(long)]
    config: Option<String>,
    /// Model to chat with (overrides the configured default).
    #[arg(long)]
    model: Option<String>,
    #[arg(long, value_enum, default_value_t = RunMode::Tui)]
    mode: RunMode,
    /// Prompt words for `--mode cli`.
    prompt: Vec<String>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum RunMode {
    /// Interactive chat interface.
    Tui,
    /// Send a single prompt and print the reply as JSON.
    Cli,
    /// Print the backend's model list as JSON.
    Models,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_tracing(cli.mode);

    let config_path = cli.config.as_deref().map(Path::new);
    let mut config = AppConfig::load(config_path)?;
    if let Some(url) = cli.backend_url {
        config.backend_url = url;
    }
    if let Some(model) = cli.model {
        config.default_model = model;
    }
    info!(
        backend = %config.backend_url,
        model = %config.default_model,
        "Starting chatterm"
    );

    let gateway: Arc<dyn BackendGateway> = Arc::new(HttpGateway::new(config.backend_url.clone()));

    match cli.mode {
        RunMode::Tui => {
            tui::run_chat(gateway, config.default_model).await?;
        }
        RunMode::Cli => {
            let prompt = cli.prompt.join(" ");
            let prompt = prompt.trim();
            if prompt.is_empty() {
                return Err("prompt required in cli mode".into());
            }
            let reply = gateway.send_chat(prompt, &config.default_model).await?;
            let output = json!({
                "response": reply.response,
                "model": reply.model,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        RunMode::Models => {
            let models = gateway.list_models().await?;
            let names: Vec<&str> = models.iter().map(|m| m.name.as_str()).collect();
            let output = json!({ "models": names });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}

fn init_tracing(mode: RunMode) {
    // The TUI owns the screen; keep logs quiet there unless RUST_LOG says
    // otherwise.
    let default_level = match mode {
        RunMode::Tui => "error",
        RunMode::Cli | RunMode::Models => "info",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true)
        .with_writer(io::stderr)
        .init();
}
