//! WARLIFE - CLI entry point.

use clap::{Parser, Subcommand};
use std::io;
use std::path::PathBuf;
use std::time::Instant;

use warlife::{convert, loader, Properties};

#[derive(Parser)]
#[command(name = "warlife")]
#[command(version)]
#[command(about = "Multi-team Game of Life war simulator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a game directory and run it to completion
    Run {
        /// Directory holding one .config and one .cells file
        game: PathBuf,

        /// Write the per-round score history to this JSON file
        #[arg(long)]
        stats: Option<PathBuf>,
    },

    /// Convert a .grid file into .cells and .config files
    Convert {
        /// Grid file, one symbol per cell
        grid: PathBuf,
    },

    /// Write a default configuration file
    Init {
        /// Output path
        #[arg(short, long, default_value = "game.config")]
        output: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { game, stats } => run_game(game, stats),
        Commands::Convert { grid } => convert_grid(grid),
        Commands::Init { output } => generate_config(output),
    }
}

fn run_game(game: PathBuf, stats: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    let mut sim = loader::load_game(&game)?;

    println!("Loaded game: {:?}", game);
    println!("  Grid: {}x{}", sim.props.width, sim.props.height);
    println!("  Teams: {}", sim.teams.len());
    println!("  Cells: {}", sim.cells.len());
    println!();

    let start = Instant::now();
    let stdout = io::stdout();
    let winner = sim.run(&mut stdout.lock())?;
    let elapsed = start.elapsed();

    println!("=== Game Over ===");
    println!("Rounds: {}", sim.round);
    println!("Time: {:.2}s", elapsed.as_secs_f64());
    match winner {
        Some(team) => println!("The winner is: {}", team),
        None => println!("No winner: every team was wiped out"),
    }

    if let Some(path) = stats {
        sim.history.save(&path)?;
        println!("Score history: {:?}", path);
    }

    Ok(())
}

fn convert_grid(grid: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    convert::convert(&grid)?;
    println!("Converted: {:?}", grid);
    Ok(())
}

fn generate_config(output: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let props = Properties::default();
    std::fs::write(&output, props.to_config_string())?;
    println!("Configuration saved to: {:?}", output);
    Ok(())
}
