//! chatmark - chat with a hosted generative model from the terminal
//!
//! Transcripts persist locally; assistant replies render through the
//! chatmark-core markdown renderer.

mod api;
mod session;
mod tui;

use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;

use crate::api::GenerativeClient;
use crate::session::SessionStore;
use crate::tui::themes::{self, Theme};

#[derive(Parser, Debug)]
#[command(
    name = "chatmark",
    version,
    about = "Terminal chat client for hosted generative models"
)]
struct Args {
    /// Model that answers the chat
    #[arg(long, default_value = "gemini-2.0-flash")]
    model: String,

    /// API key for the generative endpoint
    #[arg(long, env = "CHATMARK_API_KEY")]
    api_key: String,

    /// Start with a specific theme instead of the saved preference
    #[arg(long, value_parser = ["dark", "light"])]
    theme: Option<String>,
}

/// Log to a file - stdout belongs to the TUI
fn init_logging() -> Result<()> {
    let dir = dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("chatmark");
    std::fs::create_dir_all(&dir)?;
    let file = std::fs::File::create(dir.join("chatmark.log"))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging()?;

    let theme = match args.theme.as_deref() {
        Some("dark") => Theme::dark(),
        Some("light") => Theme::light(),
        _ => themes::load_preferred(),
    };

    let client = GenerativeClient::new(args.model, args.api_key);
    let store = SessionStore::open().context("opening session store")?;

    tracing::info!(model = %client.model(), theme = theme.name, "starting chatmark");

    tui::run(client, store, theme).await
}
