use std::io;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use pokedex::app::{build_app, AppState};
use pokedex::catch::ThreadRoll;
use pokedex::config::{Args, Command, ServeArgs};
use pokedex::error::PokedexError;
use pokedex::keepalive;
use pokedex::repl::Repl;

#[tokio::main]
async fn main() -> io::Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_level);

    let catalog = args.catalog.build().map_err(library_error)?;
    let store = args.store.open().await.map_err(library_error)?;
    let state = AppState {
        catalog: Arc::new(catalog),
        store: Arc::new(store),
        rolls: Arc::new(ThreadRoll),
    };

    match args.command {
        Command::Serve(serve) => run_server(state, serve, args.catalog.timeout_secs).await,
        Command::Repl => {
            let mut repl = Repl::new(state.catalog, state.store, state.rolls);
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            repl.run(stdin, tokio::io::stdout()).await
        }
    }
}

fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn library_error(error: PokedexError) -> io::Error {
    io::Error::other(error.to_string())
}

async fn run_server(state: AppState, serve: ServeArgs, timeout_secs: u64) -> io::Result<()> {
    let keepalive = match serve.keepalive_url {
        Some(url) => {
            let client = reqwest::Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .map_err(io::Error::other)?;
            let period = Duration::from_secs(serve.keepalive_mins.max(1) * 60);
            Some(keepalive::spawn(client, url, period))
        }
        None => None,
    };

    let listener = TcpListener::bind(&serve.bind).await?;
    tracing::info!("Pokedex API listening on http://{}", listener.local_addr()?);

    axum::serve(listener, build_app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(handle) = keepalive {
        handle.abort();
    }
    tracing::info!("Pokedex API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(%err, "could not listen for ctrl-c");
        std::future::pending::<()>().await;
    }
}
