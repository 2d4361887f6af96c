mod sync;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "amzsync")]
#[command(about = "Affiliate catalog image sync")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch product images and write the enriched catalog
    Sync {
        /// Re-download images even when a cached asset already exists
        #[arg(long)]
        force: bool,

        /// Source catalog file
        #[arg(long, default_value = "data/amazon.json")]
        data_file: PathBuf,

        /// Asset directory product images are written under
        #[arg(long, default_value = "assets/img")]
        output_dir: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();
    let config = amzsync_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Sync {
            force,
            data_file,
            output_dir,
        } => {
            let stats = sync::run_sync_command(&config, &data_file, &output_dir, force).await?;
            // The exit status reflects per-product outcomes: any product that
            // ended on the placeholder makes the run visible to calling
            // scripts.
            if stats.failed == 0 {
                Ok(ExitCode::SUCCESS)
            } else {
                Ok(ExitCode::FAILURE)
            }
        }
    }
}
