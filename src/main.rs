use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use torus_snake::game::GameConfig;
use torus_snake::modes::HumanMode;

#[derive(Parser)]
#[command(name = "torus_snake")]
#[command(version, about = "Snake on a wraparound board, in your terminal")]
struct Cli {
    /// Game mode
    #[arg(long, default_value = "human")]
    mode: Mode,

    /// JSON file with game settings; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid width in cells
    #[arg(long)]
    width: Option<usize>,

    /// Grid height in cells
    #[arg(long)]
    height: Option<usize>,

    /// Ticks per second
    #[arg(long)]
    fps: Option<u32>,

    /// Seed for a reproducible game
    #[arg(long)]
    seed: Option<u64>,

    /// Write log output here instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Clone, ValueEnum)]
enum Mode {
    /// Play snake with keyboard controls
    Human,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)?,
            None => GameConfig::default(),
        };

        if let Some(width) = self.width {
            config.grid_width = width;
        }
        if let Some(height) = self.height {
            config.grid_height = height;
        }
        if let Some(fps) = self.fps {
            config.ticks_per_second = fps;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }

        config.validate().context("Invalid game configuration")?;
        Ok(config)
    }
}

fn init_logging(log_file: Option<&PathBuf>) -> Result<()> {
    let mut builder = env_logger::Builder::from_default_env();
    if let Some(path) = log_file {
        let file = File::create(path)
            .with_context(|| format!("Failed to create log file {:?}", path))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.init();
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_ref())?;

    let config = cli.game_config()?;
    log::info!("starting with {:?}", config);

    // Dispatch to appropriate mode
    match cli.mode {
        Mode::Human => {
            let mut human_mode = HumanMode::new(config);
            human_mode.run().await?;
        }
    }

    Ok(())
}
