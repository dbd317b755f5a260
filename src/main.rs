use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Instant;

use contest_board::config::{self, Secrets};
use contest_board::{output, AppContext, BoardError};

const EXIT_SUCCESS: i32 = 0;
const EXIT_NETWORK: i32 = 2;
const EXIT_STORAGE: i32 = 3;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the current leaderboard (default if no subcommand)
    List,
    /// Serve the JSON API
    Serve {
        /// Address to bind, overrides server.host/server.port
        #[arg(long)]
        bind: Option<String>,
    },
    /// Show the countdown timer
    Timer,
    /// Start a new 7-day contest window and capture the current standings as baseline
    Restart,
}

#[derive(Parser, Debug)]
#[command(name = "contest-board")]
#[command(about = "Contest leaderboard with prizes and payout countdown", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/contest-board/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Keep documents in memory only; nothing is read from or written to storage
    #[arg(long, global = true)]
    ephemeral: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_level.into()),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn exit_code(error: &BoardError) -> i32 {
    match error {
        BoardError::SourceUnavailable(_) => EXIT_NETWORK,
        BoardError::Storage(_) => EXIT_STORAGE,
        BoardError::ValidationFailed(_) | BoardError::Unauthorized => EXIT_CONFIG,
    }
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let command = cli.command.unwrap_or(Commands::List);
    let start_time = Instant::now();

    // Load config
    let config_path = cli.config.map(PathBuf::from);
    let mut config = match config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };
    if let Err(e) = config.apply_env_overrides() {
        eprintln!("Config error: {:#}", e);
        std::process::exit(EXIT_CONFIG);
    }

    let secrets = Secrets::from_env();
    tracing::debug!(?config, ?secrets, "Configuration loaded");

    let context = AppContext::from_config(&config, &secrets, cli.ephemeral);
    tracing::debug!(
        providers = ?context.document_store().provider_names(),
        source = context.source().name(),
        "Storage chain ready"
    );
    let use_colors = output::should_use_colors();

    match command {
        Commands::Serve { bind } => {
            let bind_address =
                bind.unwrap_or_else(|| format!("{}:{}", config.server.host, config.server.port));
            if let Err(e) = contest_board::server::serve(context, &bind_address).await {
                eprintln!("Server error: {:#}", e);
                std::process::exit(EXIT_NETWORK);
            }
        }
        Commands::List => {
            let store = context.document_store();
            let data = match contest_board::leaderboard::build_leaderboard(
                &store,
                context.source(),
                chrono::Utc::now(),
            )
            .await
            {
                Ok(d) => d,
                Err(e) => {
                    eprintln!("{}", e);
                    std::process::exit(exit_code(&e));
                }
            };

            println!(
                "{}",
                output::format_leaderboard_table(&data.entries, &data.prizes, use_colors)
            );

            if cli.verbose {
                eprintln!();
                eprintln!(
                    "Total: {} participants from {} in {:?}",
                    data.entries.len(),
                    context.source().name(),
                    start_time.elapsed()
                );
            }
        }
        Commands::Timer => {
            let store = context.document_store();
            let timer = contest_board::timer::load_timer(&store).await;
            println!(
                "{}",
                output::format_timer(&timer, chrono::Utc::now(), use_colors)
            );
        }
        Commands::Restart => {
            let store = context.document_store();
            match contest_board::timer::restart_contest(&store, context.source(), chrono::Utc::now())
                .await
            {
                Ok(timer) => {
                    println!(
                        "Contest restarted, ends {} ({} participants in baseline)",
                        timer.end_date.to_rfc3339(),
                        timer.snapshot().map(|s| s.len()).unwrap_or(0)
                    );
                }
                Err(e) => {
                    eprintln!("Restart failed: {}", e);
                    std::process::exit(exit_code(&e));
                }
            }
        }
    }

    std::process::exit(EXIT_SUCCESS);
}
