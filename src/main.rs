use std::sync::{Arc, Mutex};

use ahorcado::cli::{Cli, Commands};
use ahorcado::config::Config;
use ahorcado::core::engine::Engine;
use ahorcado::games::hangman::game::DIFFICULTY_STORAGE_KEY;
use ahorcado::games::hangman::{Hangman, HangmanApp, Services};
use ahorcado::services::{AudioService, TerminalBell};
use ahorcado::words::LocalWords;
use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_cli(&cli)?;
    let command = cli.command.unwrap_or(Commands::Play);

    init_tracing(&config, command == Commands::Play)?;

    match command {
        Commands::Play => play(&config).await,
        Commands::Word { daily } => print_word(&config, daily).await,
        Commands::Words => {
            for word in LocalWords::default().words(config.language) {
                println!("{word}");
            }
            Ok(())
        }
    }
}

/// Logs go to a file: the terminal belongs to the game while it runs.
fn init_tracing(config: &Config, interactive: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("ahorcado=info"));

    match config.log_path() {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("creating log directory {}", parent.display()))?;
            }
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .with_context(|| format!("opening log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None if interactive => {}
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
    Ok(())
}

async fn play(config: &Config) -> Result<()> {
    let store = config.store();
    if let Some(difficulty) = config.difficulty {
        if let Err(e) = store.set(DIFFICULTY_STORAGE_KEY, difficulty.as_str()) {
            warn!(error = %e, %difficulty, "failed to save difficulty");
        }
    }

    let audio = Arc::new(AudioService::new(store.clone(), Box::new(TerminalBell)));
    if config.mute {
        audio.mute_for_session();
    }
    let words = config.dictionary().context("building dictionary client")?;

    let services = Services {
        words: Arc::new(words),
        audio: audio.clone(),
        store,
        rng: config.rng(),
    };
    let app = HangmanApp::new(Hangman::new(config.language, services), audio);

    info!(language = %config.language, offline = config.offline, "starting");
    let terminal = ratatui::init();
    let result = Engine::new(app).run(terminal).await;
    ratatui::restore();

    let app = result?;
    let game = app.game();
    info!(status = ?game.status(), fails = game.fail_count(), "finished");
    println!("👋 {}", game.messages().title);
    Ok(())
}

async fn print_word(config: &Config, daily: bool) -> Result<()> {
    if config.offline {
        bail!("the dictionary is disabled with --offline");
    }
    let client = config.client().context("building dictionary client")?;
    let word = if daily {
        client.daily_word().await
    } else {
        client.random_word().await
    }
    .with_context(|| format!("fetching a word from {}", client.base_url()))?;
    println!("{word}");
    Ok(())
}
