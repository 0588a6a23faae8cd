//! This is a command-line tool to manage photo contests via [libcrazypic]
use crate::{cli::*, commands::Session, config::*};
use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use libcrazypic::service::QueryOptions;
use tokio::fs;
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod config;
mod output;
mod prompt;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
    let args = Cli::parse();
    let config_file = config_file().await?;

    match args.command {
        Commands::Connect { url } => {
            let url = server_url(url.or(args.server), || {
                inquire::Text::new("Server url:").prompt()
            })?;
            let session = Session::new(&url)?;
            session
                .contests()
                .query(&QueryOptions::default().size(1))
                .await
                .with_context(|| format!("Unable to reach server {url}"))?;
            let cfg = Config::new(session.server().to_string());
            cfg.save_to_file(&config_file).await?;
            println!("Connected to {}", cfg.server);
            return Ok(());
        }
        Commands::Disconnect => {
            fs::remove_file(&config_file)
                .await
                .or_else(|e| match e.kind() {
                    std::io::ErrorKind::NotFound => Ok(()),
                    _ => Err(anyhow::Error::from(e)),
                })?;
            println!("Disconnected");
            return Ok(());
        }
        Commands::Completions { shell } => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "crazyctl",
                &mut std::io::stdout(),
            );
            return Ok(());
        }
        _ => (),
    };

    let server = match args.server {
        Some(server) => server,
        None => {
            Config::load_from_file(&config_file)
                .await
                .with_context(|| "Not connected to a server, use `crazyctl connect` first")?
                .server
        }
    };
    debug!(?server, "using server");
    let session = Session::new(&server)?;

    match args.command {
        // already handled above
        Commands::Connect { .. } | Commands::Disconnect | Commands::Completions { .. } => Ok(()),
        Commands::Status => {
            println!("Using server '{}'", session.server());
            Ok(())
        }
        Commands::Contests { command } => commands::contests::handle_command(command, &session).await,
        Commands::Pictures { command } => commands::pictures::handle_command(command, &session).await,
    }
}

/// The server given on the command line, or the one the user types in
fn server_url<F>(given: Option<String>, ask: F) -> Result<String>
where
    F: FnOnce() -> Result<String, inquire::InquireError>,
{
    match given {
        Some(url) => Ok(url),
        None => ask().with_context(|| "No server specified"),
    }
}
