use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::{info, warn};

use ideas_server::api::{AppState, router};
use ideas_server::config::IdeasConfig;
use ideas_server::error::ServerError;
use ideas_server::{stores, telemetry};

/// Update-idea service.
#[derive(Parser, Debug)]
#[command(name = "ideas-server", about = "Host for the update-idea handler")]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, default_value = "ideas.toml")]
    config: String,

    /// Override the bind host.
    #[arg(long)]
    host: Option<String>,

    /// Override the bind port.
    #[arg(long)]
    port: Option<u16>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Serve the HTTP API (default).
    Serve,
    /// Handle one invocation event and print the response.
    Invoke {
        /// Event file; reads stdin when omitted.
        #[arg(short, long)]
        event: Option<PathBuf>,
    },
    /// Create the ideas and tags tables, then exit.
    Migrate,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let (mut config, found) = IdeasConfig::load(Path::new(&cli.config))?;
    config.apply_process_env();
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    telemetry::init(&config.logging);
    if !found {
        info!(path = %cli.config, "config file not found, using defaults");
    }

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve(&config).await?,
        Commands::Invoke { event } => invoke(&config, event.as_deref()).await?,
        Commands::Migrate => stores::migrate(&config).await?,
    }
    Ok(())
}

async fn serve(config: &IdeasConfig) -> Result<(), ServerError> {
    config.validate()?;
    let handler = stores::create_handler(config).await;
    let app = router(AppState {
        handler: Arc::new(handler),
    });

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(address = %addr, "ideas-server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("ideas-server stopped");
    Ok(())
}

async fn invoke(config: &IdeasConfig, event_path: Option<&Path>) -> Result<(), ServerError> {
    config.validate()?;
    let raw = match event_path {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    let event: serde_json::Value = serde_json::from_str(&raw)?;

    let handler = stores::create_handler(config).await;
    let response = handler.handle_event(event).await;
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => { info!("received SIGINT"); }
        () = terminate => { info!("received SIGTERM"); }
    }
}
