use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

use snip::config::Config;
use snip::models::{OperationState, ShortenedRecord};
use snip::network::ReqwestClient;
use snip::repository::HttpShortenerRepository;
use snip::session::{Session, SessionHandle, SessionSnapshot};
use snip::{ShortenUrl, UrlValidator};

#[derive(Parser)]
#[command(name = "snip")]
#[command(about = "Shorten URLs from the terminal", long_about = None)]
struct Cli {
    /// Override SHORTENER_BASE_URL
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Check whether a URL would be accepted, and show its normalized form
    Check {
        url: String,
    },
    /// Shorten a single URL and exit
    Shorten {
        url: String,
        /// Print the record as JSON
        #[arg(long)]
        json: bool,
    },
    /// Line-based session: type URLs to shorten them (default)
    Interactive,
}

#[tokio::main]
async fn main() -> Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("snip=info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = Config::from_env()?;
    if let Some(base_url) = cli.base_url {
        config = config.with_base_url(base_url)?;
    }

    match cli.command.unwrap_or(Commands::Interactive) {
        Commands::Check { url } => {
            let validator = UrlValidator::new();
            let normalized = validator.normalize(&url);
            if validator.is_valid(&url) {
                println!("✓ valid: {normalized}");
            } else {
                println!("✗ invalid: {normalized}");
                std::process::exit(1);
            }
        }
        Commands::Shorten { url, json } => {
            let use_case = build_use_case(&config)?;
            let record = use_case.execute(&url).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&record)?);
            } else {
                print_record(0, &record);
            }
        }
        Commands::Interactive => {
            let use_case = build_use_case(&config)?;
            let session = Session::spawn(use_case, config.session.to_session_config());
            run_interactive(session).await?;
        }
    }

    Ok(())
}

/// Composition point: network client → repository → use case.
fn build_use_case(config: &Config) -> Result<ShortenUrl> {
    let client = ReqwestClient::new(&config.service.user_agent, config.service.timeout())?;
    let repository = HttpShortenerRepository::new(Arc::new(client), &config.service.base_url);
    info!("Using shortening service at {}", config.service.base_url);
    Ok(ShortenUrl::new(Arc::new(repository), UrlValidator::new()))
}

async fn run_interactive(session: SessionHandle) -> Result<()> {
    println!("Type a URL and press enter to shorten it.");
    println!("Commands: :list, :rm <index>..., :retry, :quit");

    let mut updates = session.subscribe();
    let watcher = tokio::spawn(async move {
        let mut last = OperationState::Idle;
        while updates.changed().await.is_ok() {
            let snapshot = updates.borrow_and_update().clone();
            if snapshot.operation != last {
                report(&snapshot);
                last = snapshot.operation;
            }
        }
    });

    let validator = UrlValidator::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("failed to read stdin")? {
        match parse_line(&line, &validator) {
            Line::Empty => continue,
            Line::Quit => break,
            Line::List => {
                let snapshot = session.snapshot();
                if snapshot.records.is_empty() {
                    println!("No shortened URLs yet.");
                }
                for (index, record) in snapshot.records.iter().enumerate() {
                    print_record(index, record);
                }
            }
            Line::Retry => session.retry().await?,
            Line::Remove(indices) => {
                if let Err(e) = session.remove(indices).await {
                    println!("⚠ {e}");
                }
            }
            Line::BadRemove => println!("⚠ usage: :rm <index> [index...]"),
            Line::Invalid(url) => {
                // tracked as input, never submitted
                session.set_input(url.clone()).await?;
                println!("⚠ not a valid URL: {url}");
            }
            Line::Shorten(url) => {
                session.set_input(url).await?;
                session.submit().await?;
            }
        }
    }

    session.shutdown().await?;
    let _ = watcher.await;
    Ok(())
}

/// One line of interactive input.
#[derive(Debug, PartialEq, Eq)]
enum Line {
    Empty,
    Quit,
    List,
    Retry,
    Remove(Vec<usize>),
    BadRemove,
    /// Text that fails validation; submission stays disabled.
    Invalid(String),
    Shorten(String),
}

fn parse_line(line: &str, validator: &UrlValidator) -> Line {
    let line = line.trim();
    match line {
        "" => Line::Empty,
        ":quit" | ":q" => Line::Quit,
        ":list" => Line::List,
        ":retry" => Line::Retry,
        _ if line.starts_with(":rm") => line[3..]
            .split_whitespace()
            .map(str::parse::<usize>)
            .collect::<Result<Vec<_>, _>>()
            .map(Line::Remove)
            .unwrap_or(Line::BadRemove),
        url if validator.is_valid(url) => Line::Shorten(url.to_string()),
        url => Line::Invalid(url.to_string()),
    }
}

fn report(snapshot: &SessionSnapshot) {
    match &snapshot.operation {
        OperationState::Idle => {}
        OperationState::Loading => println!("… shortening"),
        OperationState::Success => {
            if let Some(record) = snapshot.records.first() {
                println!("✓ {} → {}", record.original_url(), record.short_url());
            }
        }
        OperationState::Error(message) => {
            println!("✗ {message}");
            println!("  (edit the URL and try again, or :retry to dismiss)");
        }
    }
}

fn print_record(index: usize, record: &ShortenedRecord) {
    println!(
        "{:<4} {:<12} {:<40} {}",
        index,
        record.alias(),
        record.short_url(),
        record.original_url()
    );
}
