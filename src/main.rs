use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::{fmt, EnvFilter};

use clash_cup::error::LeagueError;
use clash_cup::store::Store;

// Exit codes
const EXIT_SUCCESS: i32 = 0;
const EXIT_ABORTED: i32 = 1;
const EXIT_IO: i32 = 2; // Storage or network (bind) failure
const EXIT_CONFIG: i32 = 4;
const EXIT_INVALID: i32 = 5; // Unknown id, rejected input or unconfirmed delete

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API (default if no subcommand)
    Serve,
    /// Print the current standings of a league
    Standings {
        /// League id
        league: String,

        /// Tab-separated output for scripting
        #[arg(long)]
        tsv: bool,
    },
    /// Delete a league and everything recorded for it
    DeleteLeague {
        /// League id
        league: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Interactively create a config file
    Init,
}

#[derive(Parser, Debug)]
#[command(name = "clash-cup")]
#[command(about = "Golf league tracker with weighted round scoring", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/clash-cup/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("clash_cup=debug,tower_http=debug,info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn exit_code_for(err: &LeagueError) -> i32 {
    match err {
        LeagueError::Storage(_) => EXIT_IO,
        LeagueError::NotFound { .. }
        | LeagueError::Validation(_)
        | LeagueError::ConfirmationRequired { .. } => EXIT_INVALID,
    }
}

fn fail(err: LeagueError) -> ! {
    eprintln!("Error: {}", err);
    std::process::exit(exit_code_for(&err));
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Serve);
    init_tracing(cli.verbose);

    let config_path = cli.config.map(PathBuf::from);

    if let Commands::Init = command {
        if let Err(e) = clash_cup::config::init::run_init_wizard(config_path) {
            eprintln!("Init failed: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
        std::process::exit(EXIT_SUCCESS);
    }

    // Load config, then let the environment override it
    let mut config = match clash_cup::config::load_config(config_path) {
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
    if let Err(errors) = clash_cup::config::validate_config(&config) {
        eprintln!("Config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    let data_path = config.storage.data_path();
    debug!("Using league data at {}", data_path.display());
    let store = match Store::open(data_path).await {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Failed to load league data: {:#}", e);
            std::process::exit(EXIT_IO);
        }
    };

    match command {
        Commands::Serve => {
            if let Err(e) = clash_cup::api::serve(&config, store).await {
                eprintln!("Server error: {:#}", e);
                std::process::exit(EXIT_IO);
            }
        }
        Commands::Standings { league, tsv } => {
            let found = clash_cup::league::get_league(&store, &league)
                .await
                .unwrap_or_else(|e| fail(e));
            let entries = clash_cup::scoring::standings(&store, &league)
                .await
                .unwrap_or_else(|e| fail(e));

            if tsv {
                println!("{}", clash_cup::output::format_tsv(&entries));
            } else {
                let use_colors = clash_cup::output::should_use_colors();
                println!("{}", found.name);
                println!();
                println!(
                    "{}",
                    clash_cup::output::format_standings_table(&entries, use_colors)
                );
                if entries.iter().any(|e| !e.warnings.is_empty()) {
                    println!();
                    println!("* some categories have no weight and were scored as 0");
                }
            }
        }
        Commands::DeleteLeague { league, yes } => {
            let summary = match clash_cup::league::delete_league(&store, &league, yes).await {
                Ok(summary) => summary,
                Err(LeagueError::ConfirmationRequired { dependents, .. }) => {
                    let question = format!(
                        "League {} still has {}. Delete all of it?",
                        league,
                        clash_cup::output::format_dependents(&dependents)
                    );
                    match clash_cup::config::init::prompt_yes_no(&question, false) {
                        Ok(true) => clash_cup::league::delete_league(&store, &league, true)
                            .await
                            .unwrap_or_else(|e| fail(e)),
                        Ok(false) => {
                            println!("Aborted.");
                            std::process::exit(EXIT_ABORTED);
                        }
                        Err(e) => {
                            eprintln!("Failed to read confirmation: {:#}", e);
                            std::process::exit(EXIT_ABORTED);
                        }
                    }
                }
                Err(e) => fail(e),
            };

            let use_colors = clash_cup::output::should_use_colors();
            println!(
                "{}",
                clash_cup::output::format_deletion_summary(&summary, use_colors)
            );
        }
        // Handled before config load
        Commands::Init => {}
    }

    std::process::exit(EXIT_SUCCESS);
}
