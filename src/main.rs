//! Ojeomme CLI - restaurant review backend and operator tools

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use chrono::Local;
use ojeomme::config::{self, OjeommeConfig};
use ojeomme::domain::{OauthProvider, RegionCode, TokenPair, region_prefix};
use ojeomme::query::RankingQuery;
use ojeomme::server::{self, AppState};
use ojeomme::storage::SqliteStore;
use ojeomme::ui::{self, Icons};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "ojeomme")]
#[command(version)]
#[command(about = "Restaurant review backend: place search, reviews and daily store ranking")]
#[command(long_about = r#"
Ojeomme serves the restaurant review API and a few operator commands.

Example usage:
  ojeomme init
  ojeomme region add --code 1168010800 --name 논현동
  ojeomme serve --port 8080
  ojeomme ranking --region 11
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to the config file (defaults to ./ojeomme.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Path to the database file (overrides the config file)
    #[arg(short, long, global = true)]
    database: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default config file
    Init {
        /// Overwrite an existing config file
        #[arg(short, long)]
        force: bool,
    },

    /// Run the HTTP API
    Serve {
        /// Port to listen on (overrides the config file)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Manage region codes
    Region {
        #[command(subcommand)]
        command: RegionCommand,
    },

    /// Manage users
    User {
        #[command(subcommand)]
        command: UserCommand,
    },

    /// Print today's store ranking
    Ranking {
        /// Region code prefix
        #[arg(short, long)]
        region: Option<String>,
    },

    /// Show row counts per table
    Stats,
}

#[derive(Subcommand)]
enum RegionCommand {
    /// Add or rename a region code
    Add {
        #[arg(long)]
        code: String,

        #[arg(long)]
        name: String,
    },
}

#[derive(Subcommand)]
enum UserCommand {
    /// Create a local user and print a session token
    Create {
        #[arg(long)]
        nickname: String,

        /// Profile image URL
        #[arg(long)]
        profile: Option<String>,
    },
}

fn resolve_database(cli_database: Option<PathBuf>, config: &OjeommeConfig) -> anyhow::Result<PathBuf> {
    if let Some(path) = cli_database {
        return Ok(path);
    }
    if let Some(path) = &config.database {
        return Ok(PathBuf::from(path));
    }
    Ok(config::default_database_path_in(&std::env::current_dir()?))
}

fn open_store(path: &Path) -> anyhow::Result<SqliteStore> {
    config::ensure_db_dir(path)?;
    Ok(SqliteStore::open(path)?)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    let config_path = cli.config.clone().unwrap_or_else(config::default_config_path);

    if let Commands::Init { force } = cli.command {
        config::write_config(&config_path, &OjeommeConfig::default(), force)?;
        ui::success(&format!("Wrote {}", config_path.display()));
        return Ok(());
    }

    let config = match config::load_config(Some(&config_path))? {
        Some(config) => config,
        None => {
            tracing::debug!("No config at {}, using defaults", config_path.display());
            OjeommeConfig::default()
        }
    };
    let database = resolve_database(cli.database, &config)?;

    match cli.command {
        Commands::Init { .. } => {}

        Commands::Serve { port } => {
            let port = port.unwrap_or(config.server.port);
            config::ensure_db_dir(&database)?;
            let state = AppState::from_config(&config, &database)?;

            ui::header(Icons::GLOBE, &format!("Ojeomme API at http://0.0.0.0:{}", port));
            ui::summary_row("Database", &database.display().to_string());
            server::start_server(port, state).await?;
        }

        Commands::Region { command: RegionCommand::Add { code, name } } => {
            if code.is_empty() || !code.chars().all(|c| c.is_ascii_digit()) {
                anyhow::bail!("region code must be numeric: {:?}", code);
            }
            let store = open_store(&database)?;
            store.insert_region(&RegionCode::new(code.as_str(), name.as_str()))?;
            ui::success(&format!("{} Region {} ({})", Icons::PIN, code, name));
        }

        Commands::User { command: UserCommand::Create { nickname, profile } } => {
            let store = open_store(&database)?;
            let oauth_id = format!("local-{}", hex::encode(rand::random::<[u8; 8]>()));
            let user = store.upsert_user(OauthProvider::Kakao, &oauth_id, &nickname, profile.as_deref())?;

            let now = Local::now().timestamp();
            let pair = TokenPair::generate(now, config.oauth.access_token_ttl_secs);
            store.start_session(&pair.clone().into_user_token(user.id), now)?;

            ui::header(Icons::PERSON, &format!("User {} ({})", user.id, user.nickname));
            ui::info(&format!("{} Access token", Icons::KEY), &pair.access_token);
            ui::info("Refresh token", &pair.refresh_token);
        }

        Commands::Ranking { region } => {
            let region = region_prefix(region.as_deref())?;
            let store = open_store(&database)?;
            let ranking = RankingQuery::new(&store, config.ranking.size).today(Local::now(), region)?;

            ui::header(Icons::TROPHY, &format!("Today's ranking ({})", Local::now().format("%Y-%m-%d")));
            if ranking.stores.is_empty() {
                println!("{}", ui::muted("No activity today."));
            } else {
                println!("{}", ui::ranking_table(&ranking.stores));
            }
        }

        Commands::Stats => {
            let store = open_store(&database)?;
            let stats = store.stats()?;

            ui::header(Icons::STATS, "Ojeomme Statistics");
            ui::summary_row(&format!("{} Database", Icons::DATABASE), &database.display().to_string());
            println!("{}", ui::stats_table(&stats.rows()));
        }
    }

    Ok(())
}
