use anyhow::Result;
use clap::Parser;
use log::{LevelFilter, info};
use simplelog::{Config, WriteLogger};
use snake_tui::assets::Sprites;
use snake_tui::audio::{AudioSink, Silent, TerminalBell};
use snake_tui::game::{GameConfig, GameEngine};
use snake_tui::modes::HumanMode;
use std::fs::File;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "snake_tui")]
#[command(version, about = "Classic snake in the terminal")]
struct Cli {
    /// JSON file with game settings; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid width in cells
    #[arg(long)]
    width: Option<usize>,

    /// Grid height in cells
    #[arg(long)]
    height: Option<usize>,

    /// Milliseconds between ticks
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Directory holding head.txt, body.txt and food.txt
    #[arg(long, default_value = "assets")]
    assets: PathBuf,

    /// Where log output goes
    #[arg(long, default_value = "snake.log")]
    log_file: PathBuf,

    /// Do not ring the terminal bell
    #[arg(long)]
    mute: bool,

    /// Seed for food placement
    #[arg(long)]
    seed: Option<u64>,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::from_json_file(path)?,
            None => GameConfig::default(),
        };

        if let Some(width) = self.width {
            config.grid_width = width;
        }
        if let Some(height) = self.height {
            config.grid_height = height;
        }
        if let Some(tick_ms) = self.tick_ms {
            config.tick_ms = tick_ms;
        }

        config.validate()?;
        Ok(config)
    }
}

fn init_logging(path: &Path) {
    // The terminal belongs to the game, so logs go to a file or nowhere
    match File::create(path) {
        Ok(file) => {
            if let Err(err) = WriteLogger::init(LevelFilter::Info, Config::default(), file) {
                eprintln!("logging disabled: {err}");
            }
        }
        Err(err) => eprintln!("logging disabled, cannot create {}: {err}", path.display()),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_file);

    let config = cli.game_config()?;
    info!(
        "starting on a {}x{} grid, tick {}ms",
        config.grid_width, config.grid_height, config.tick_ms
    );

    let sprites = Sprites::load(&cli.assets);
    let audio: Box<dyn AudioSink> = if cli.mute {
        Box::new(Silent)
    } else {
        Box::new(TerminalBell::new())
    };
    let engine = match cli.seed {
        Some(seed) => GameEngine::with_seed(config, seed),
        None => GameEngine::new(config),
    };

    let mut human_mode = HumanMode::with_engine(engine, sprites, audio);
    human_mode.run().await?;

    Ok(())
}
