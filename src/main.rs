//! TenK - Main Binary
//!
//! Text front-end for the 10,000 dice game: interactive matches on the
//! console and parallel bot simulations.

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::io::{self, BufRead, Write};
use tenk::{
    core::{rules::MAX_PLAYERS, Player, PlayerId},
    game::{
        GameLoop, GameResult, GameState, HeuristicController, InteractiveController,
        OutputFormat, PlayerController, VerbosityLevel,
    },
    tournament::{run_simulation, SimulationConfig},
    Result, TenKError,
};

/// Verbosity level for game output (custom parser supporting both names and numbers)
#[derive(Debug, Clone, Copy)]
struct VerbosityArg(VerbosityLevel);

impl std::str::FromStr for VerbosityArg {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "silent" | "0" => Ok(VerbosityArg(VerbosityLevel::Silent)),
            "minimal" | "1" => Ok(VerbosityArg(VerbosityLevel::Minimal)),
            "normal" | "2" => Ok(VerbosityArg(VerbosityLevel::Normal)),
            "verbose" | "3" => Ok(VerbosityArg(VerbosityLevel::Verbose)),
            _ => Err(format!(
                "invalid verbosity level '{s}' (expected: silent/0, minimal/1, normal/2, verbose/3)"
            )),
        }
    }
}

impl From<VerbosityArg> for VerbosityLevel {
    fn from(arg: VerbosityArg) -> Self {
        arg.0
    }
}

#[derive(Parser)]
#[command(name = "tenk")]
#[command(about = "TenK - the 10,000 dice game", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a match on the console
    Play {
        /// Number of players (prompted for when omitted)
        #[arg(long, short = 'p')]
        players: Option<usize>,

        /// Seats played by the bot, 1-based (e.g. "2,3")
        #[arg(long, value_delimiter = ',', value_name = "SEATS")]
        bots: Vec<usize>,

        /// Set random seed for deterministic testing
        #[arg(long)]
        seed: Option<u64>,

        /// Verbosity level for game output (0=silent, 1=minimal, 2=normal, 3=verbose)
        #[arg(long, default_value = "normal", short = 'v')]
        verbosity: VerbosityArg,

        /// Print game events as JSON lines
        #[arg(long)]
        json: bool,
    },

    /// Run bot-only matches in parallel and report statistics
    Simulate {
        /// Number of games to run
        #[arg(long, short = 'g')]
        games: usize,

        /// Bots per match
        #[arg(long, short = 'p', default_value_t = 2)]
        players: usize,

        /// Master seed; each game derives its own
        #[arg(long, default_value_t = 42)]
        seed: u64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Play {
            players,
            bots,
            seed,
            verbosity,
            json,
        } => run_play(players, bots, seed, verbosity.into(), json).await?,
        Commands::Simulate {
            games,
            players,
            seed,
        } => run_simulation(SimulationConfig {
            games,
            players,
            seed,
        })
        .await
        .context("simulation failed")?,
    }

    Ok(())
}

async fn run_play(
    players: Option<usize>,
    bots: Vec<usize>,
    seed: Option<u64>,
    verbosity: VerbosityLevel,
    json: bool,
) -> anyhow::Result<()> {
    let seed = seed.unwrap_or_else(rand::random);
    if !json && verbosity >= VerbosityLevel::Minimal {
        println!("Using random seed: {seed}");
    }

    // Console prompts and controller calls block, so the match runs off the runtime
    tokio::task::spawn_blocking(move || play_match(players, &bots, seed, verbosity, json))
        .await?
        .context("match aborted")?;
    Ok(())
}

fn play_match(
    players: Option<usize>,
    bots: &[usize],
    seed: u64,
    verbosity: VerbosityLevel,
    json: bool,
) -> Result<GameResult> {
    // Keep stdout clean for the event stream in JSON mode
    let mut console: Box<dyn Write> = if json {
        Box::new(io::stderr())
    } else {
        Box::new(io::stdout())
    };
    let count = match players {
        Some(count) => count,
        None => prompt_player_count(&mut io::stdin().lock(), &mut console)?,
    };
    if count == 0 || count > MAX_PLAYERS {
        return Err(TenKError::InvalidArgument(format!(
            "a match needs 1..={MAX_PLAYERS} players, got {count}"
        )));
    }
    if let Some(seat) = bots.iter().find(|&&seat| seat == 0 || seat > count) {
        return Err(TenKError::InvalidArgument(format!(
            "bot seat {seat} is not in 1..={count}"
        )));
    }

    let seats: Vec<Player> = (0..count)
        .map(|idx| {
            Player::new(
                PlayerId::new(idx),
                format!("Player {}", idx + 1),
                bots.contains(&(idx + 1)),
            )
        })
        .collect();
    let mut game = GameState::new(seats)?;
    game.seed_rng(seed);
    if json {
        game.logger.set_output_format(OutputFormat::Json);
    }

    let mut controllers: Vec<Box<dyn PlayerController>> = game
        .players
        .iter()
        .map(|p| -> Box<dyn PlayerController> {
            if p.is_bot {
                Box::new(HeuristicController::new(p.id))
            } else if json {
                Box::new(InteractiveController::on_stderr(p.id))
            } else {
                Box::new(InteractiveController::new(p.id))
            }
        })
        .collect();

    GameLoop::new(&mut game)
        .with_verbosity(verbosity)
        .run_game(&mut controllers)
}

/// Ask for the number of players until the answer is in range
fn prompt_player_count(input: &mut impl BufRead, output: &mut impl Write) -> Result<usize> {
    loop {
        write!(output, "Enter number of players (1-{MAX_PLAYERS}): ")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Err(TenKError::Disconnected(
                "input closed before the player count was entered".to_string(),
            ));
        }
        match line.trim().parse::<usize>() {
            Ok(count) if (1..=MAX_PLAYERS).contains(&count) => return Ok(count),
            _ => writeln!(output, "Invalid number of players.")?,
        }
    }
}
