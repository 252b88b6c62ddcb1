use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use teleprompter_core::constants::DEFAULT_HTTP_PORT;
use teleprompter_storage::Storage;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "teleprompter")]
#[command(about = "Versioned prompt store with rollback and change propagation", long_about = None)]
struct Cli {
    /// Path to the SQLite database
    #[arg(long, global = true, env = "TELEPROMPTER_DB_PATH")]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server
    Serve {
        #[arg(short, long, default_value_t = DEFAULT_HTTP_PORT)]
        port: u16,
        #[arg(short = 'H', long, default_value = "127.0.0.1")]
        host: String,
    },
    /// Print every current prompt
    List,
    /// Print the current value of a prompt
    Get { id: String },
    /// Print the history of a prompt, newest first
    Versions { id: String },
    /// Write a new version of a prompt
    Put {
        id: String,
        text: String,
        #[arg(short, long)]
        namespace: Option<String>,
    },
    /// Restore the content of a past version as a new version
    Rollback { id: String, version: i64 },
    /// Delete a prompt (its history is kept)
    Delete { id: String },
}

fn get_db_path(explicit: Option<PathBuf>) -> PathBuf {
    explicit.unwrap_or_else(|| {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("teleprompter")
            .join("prompts.db")
    })
}

fn ensure_db_dir(db_path: &Path) -> Result<()> {
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let db_path = get_db_path(cli.db);
    ensure_db_dir(&db_path)?;
    let storage = Storage::new(&db_path)?;

    match cli.command {
        Commands::Serve { port, host } => commands::serve::run(storage, host, port).await?,
        Commands::List => commands::prompts::run_list(&storage)?,
        Commands::Get { id } => commands::prompts::run_get(&storage, &id)?,
        Commands::Versions { id } => commands::prompts::run_versions(&storage, &id)?,
        Commands::Put { id, text, namespace } => {
            commands::prompts::run_put(storage, id, text, namespace).await?;
        },
        Commands::Rollback { id, version } => {
            commands::prompts::run_rollback(storage, &id, version).await?;
        },
        Commands::Delete { id } => commands::prompts::run_delete(storage, &id).await?,
    }

    Ok(())
}
