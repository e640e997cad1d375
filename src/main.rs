//! Terminal front end: one conversation over stdin/stdout.

use std::path::PathBuf;

use clap::Parser;
use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::info;

use sales_predictor::application::LoadedArtifacts;
use sales_predictor::config::AppConfig;

#[derive(Parser, Debug)]
#[command(name = "sales-predictor")]
#[command(version)]
#[command(about = "Conversational property valuation")]
struct Args {
    /// Base directory for relative artifact paths
    #[arg(long, env = "SALES_PREDICTOR_PROJECT_ROOT")]
    project_root: Option<PathBuf>,

    /// Model artifact, relative to the project root unless absolute
    #[arg(long)]
    model: Option<PathBuf>,

    /// Reference dataset CSV, relative to the project root unless absolute
    #[arg(long)]
    dataset: Option<PathBuf>,
}

impl Args {
    fn apply(self, config: &mut AppConfig) {
        if let Some(root) = self.project_root {
            config.artifacts.project_root = root;
        }
        if let Some(model) = self.model {
            config.artifacts.model_path = model;
        }
        if let Some(dataset) = self.dataset {
            config.artifacts.dataset_path = dataset;
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = AppConfig::load()?;
    args.apply(&mut config);
    config.logging.init_tracing().map_err(|e| e.to_string())?;

    let artifacts = LoadedArtifacts::from_config(&config).await?;
    let mut engine = artifacts.conversation();

    let mut stdout = io::stdout();
    let mut lines = BufReader::new(io::stdin()).lines();

    stdout
        .write_all(format!("{}\n\n> ", engine.welcome_message()).as_bytes())
        .await?;
    stdout.flush().await?;

    while let Some(line) = lines.next_line().await? {
        let reply = engine.process(&line);
        stdout.write_all(format!("\n{}\n", reply.message).as_bytes()).await?;
        if reply.is_final() {
            break;
        }
        stdout.write_all(b"\n> ").await?;
        stdout.flush().await?;
    }

    stdout.flush().await?;
    info!(session_id = %engine.session_id(), "Session closed");
    Ok(())
}
