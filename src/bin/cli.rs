//! CLI binary for memobot.

use clap::{Parser, Subcommand};
use memobot::faq::FaqCatalog;
use memobot::memory::MemoryFactSink;
use memobot::{BotConfig, Responder, SharedResponder};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// memobot: FAQ and memory responder for chat webhooks.
#[derive(Parser)]
#[command(name = "memobot", version, about)]
struct Cli {
    /// Path to TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Keep facts in memory only; nothing is read from or written to disk.
    #[arg(long)]
    ephemeral: bool,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Option<Command>,
}

/// Available commands.
#[derive(Subcommand)]
enum Command {
    /// Serve the webhook gateway.
    Serve,

    /// Talk to the responder on stdin/stdout.
    Chat,

    /// Write a default config and the starter FAQ file if they are missing.
    Init,

    /// Print the stored facts as JSON.
    Facts,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so `chat` and `facts` output stays clean.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("memobot=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = BotConfig::load_or_default(cli.config.as_deref())?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => run_serve(&config, cli.ephemeral).await,
        Command::Chat => run_chat(&config, cli.ephemeral),
        Command::Init => run_init(&config, cli.config),
        Command::Facts => print_facts(&config, cli.ephemeral),
    }
}

fn build_responder(config: &BotConfig, ephemeral: bool) -> Responder {
    if ephemeral {
        Responder::from_config_with_sink(config, Box::new(MemoryFactSink::new()))
    } else {
        Responder::from_config(config)
    }
}

async fn run_serve(config: &BotConfig, ephemeral: bool) -> anyhow::Result<()> {
    info!("memobot v{}", env!("CARGO_PKG_VERSION"));
    let responder = SharedResponder::new(build_responder(config, ephemeral));
    memobot::gateway::run_gateway(&config.gateway, responder).await
}

fn run_chat(config: &BotConfig, ephemeral: bool) -> anyhow::Result<()> {
    let mut responder = build_responder(config, ephemeral);
    println!("memobot v{} (Ctrl-D to quit)", env!("CARGO_PKG_VERSION"));

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    print!("> ");
    stdout.flush()?;
    for line in stdin.lock().lines() {
        let line = line?;
        println!("{}", responder.respond(&line));
        print!("> ");
        stdout.flush()?;
    }
    println!();
    Ok(())
}

fn run_init(config: &BotConfig, explicit: Option<PathBuf>) -> anyhow::Result<()> {
    let config_path = explicit.unwrap_or_else(BotConfig::default_config_path);
    if config_path.exists() {
        println!("config exists: {}", config_path.display());
    } else {
        config.save_to_file(&config_path)?;
        println!("wrote config: {}", config_path.display());
    }

    let faq_path = config.storage.faq_path();
    if faq_path.exists() {
        println!("FAQ exists: {}", faq_path.display());
    } else {
        FaqCatalog::builtin().save(&faq_path)?;
        println!("wrote FAQ: {}", faq_path.display());
    }
    Ok(())
}

fn print_facts(config: &BotConfig, ephemeral: bool) -> anyhow::Result<()> {
    let responder = build_responder(config, ephemeral);
    let json = serde_json::to_string_pretty(responder.facts().snapshot())?;
    println!("{json}");
    Ok(())
}
