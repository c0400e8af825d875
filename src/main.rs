use anyhow::{Context, Result};
use clap::Parser;
use grid_snake::game::GameConfig;
use grid_snake::menu::CustomSize;
use grid_snake::modes::HumanMode;
use std::fs::File;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "grid_snake")]
#[command(version, about = "Classic Snake in the terminal")]
struct Cli {
    /// JSON config file with board size and tick rate; written with the
    /// defaults if it does not exist yet
    #[arg(long)]
    config: Option<PathBuf>,

    /// Custom grid width; starts a game right away. Non-numeric text falls
    /// back to the smallest board
    #[arg(long)]
    width: Option<String>,

    /// Custom grid height; starts a game right away
    #[arg(long)]
    height: Option<String>,

    /// Game ticks per second
    #[arg(long)]
    tps: Option<u32>,

    /// Write logs here; the terminal itself is taken by the game
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.log_file.as_deref())?;

    let mut config = match &cli.config {
        Some(path) if path.exists() => {
            log::info!("Loading config from {:?}", path);
            GameConfig::load_from_file(path)?
        }
        Some(path) => {
            log::info!("Config file not found, saving defaults to {:?}", path);
            let config = GameConfig::default();
            config.save_to_file(path)?;
            config
        }
        None => GameConfig::default(),
    };
    if let Some(tps) = cli.tps {
        config.ticks_per_second = tps;
    }

    let start_now = cli.width.is_some() || cli.height.is_some();
    let custom = CustomSize::new(
        cli.width.unwrap_or_else(|| config.grid_width.to_string()),
        cli.height.unwrap_or_else(|| config.grid_height.to_string()),
    );

    let mut human_mode = HumanMode::new(config, custom);
    if start_now {
        human_mode.start_custom();
    }
    human_mode.run().await?;

    Ok(())
}

fn init_logging(log_file: Option<&Path>) -> Result<()> {
    // Logging to stderr would scribble over the game screen
    let Some(path) = log_file else {
        return Ok(());
    };

    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {:?}", path))?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();

    Ok(())
}
