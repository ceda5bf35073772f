use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use arcade_snake::game::GameMode;
use arcade_snake::metrics::ProfileStore;
use arcade_snake::modes::HumanMode;

#[derive(Parser)]
#[command(name = "arcade_snake")]
#[command(version, about = "Arcade snake with modes, power-ups, and combos")]
struct Cli {
    /// Game mode to start in
    #[arg(long, default_value = "classic")]
    mode: Mode,

    /// Path of the player profile file
    #[arg(long, default_value = "snake_profile.json")]
    profile: PathBuf,
}

#[derive(Clone, ValueEnum)]
enum Mode {
    /// Speeds up with every food; hitting a wall ends the run
    Classic,
    /// Race a 30 second clock; walls wrap around
    Walls,
    /// Relaxed pace, long timer, nothing is lethal
    Chill,
}

impl From<Mode> for GameMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Classic => GameMode::Classic,
            Mode::Walls => GameMode::Walls,
            Mode::Chill => GameMode::Chill,
        }
    }
}

/// The alternate screen owns the terminal, so logs only make sense in a
/// file. Pointing ARCADE_SNAKE_LOG at a path enables them; RUST_LOG filters.
fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let Ok(path) = std::env::var("ARCADE_SNAKE_LOG") else {
        return;
    };
    let Ok(file) = std::fs::File::create(&path) else {
        eprintln!("could not open log file {path}");
        return;
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let profile = ProfileStore::open(cli.profile);

    let mut human_mode = HumanMode::new(cli.mode.into(), profile);
    human_mode.run().await?;

    Ok(())
}
