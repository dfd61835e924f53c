use clap::{Parser, Subcommand};
use ferrous_hosts_domain::CliOverrides;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

mod bootstrap;
mod commands;
mod di;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(Parser)]
#[command(name = "ferrous-hosts")]
#[command(version)]
#[command(about = "Ferrous Hosts - Concurrent hosts source parser and loader")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE", global = true)]
    config: Option<String>,

    /// Database path
    #[arg(long, global = true)]
    database: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Number of parser workers
    #[arg(short = 'j', long, global = true)]
    parsers: Option<usize>,

    /// Items per insert batch
    #[arg(long, global = true)]
    batch_size: Option<usize>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Manage registered hosts sources
    #[command(subcommand)]
    Source(SourceCommand),

    /// Replace the stored entries of a source with freshly parsed ones
    Load {
        id: i64,

        /// Read the source from a local file
        #[arg(long, conflicts_with = "url")]
        file: Option<PathBuf>,

        /// Download the source from this URL instead of the registered one
        #[arg(long)]
        url: Option<String>,
    },

    /// Print the stored entries of a source
    Show { id: i64 },
}

#[derive(Subcommand)]
enum SourceCommand {
    Add {
        name: String,

        #[arg(long)]
        url: Option<String>,

        /// Keep non-blocking addresses as redirections
        #[arg(long)]
        redirect: bool,

        #[arg(long)]
        disabled: bool,
    },
    List,
    Remove { id: i64 },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        database_path: cli.database.clone(),
        log_level: cli.log_level.clone(),
        parser_count: cli.parsers,
        batch_size: cli.batch_size,
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config);

    info!("Starting Ferrous Hosts v{}", env!("CARGO_PKG_VERSION"));

    let pool = bootstrap::init_database(&config.database).await?;

    let repos = di::Repositories::new(pool);
    let use_cases = di::UseCases::new(&repos, &config.ingestion);

    match cli.command {
        Command::Source(SourceCommand::Add {
            name,
            url,
            redirect,
            disabled,
        }) => commands::add_source(&use_cases, name, url, redirect, disabled).await,
        Command::Source(SourceCommand::List) => commands::list_sources(&use_cases, cli.json).await,
        Command::Source(SourceCommand::Remove { id }) => {
            commands::remove_source(&use_cases, id).await
        }
        Command::Load { id, file, url } => {
            let timeout = Duration::from_secs(config.ingestion.fetch_timeout_secs);
            commands::load(&use_cases, id, file, url, timeout).await
        }
        Command::Show { id } => commands::show(&use_cases, id, cli.json).await,
    }
}
