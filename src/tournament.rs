//! Simulation mode for running many bot matches in parallel and collecting statistics
//!
//! Every match gets its own seed derived from the master seed and the match
//! index, so a simulation reports the same numbers however rayon schedules it.

use crate::core::rules::MAX_PLAYERS;
use crate::game::{
    GameEndReason, GameLoop, GameResult, GameState, HeuristicController, PlayerController,
    VerbosityLevel,
};
use crate::{Result, TenKError};
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use std::time::{Duration, Instant};

/// Turn cap per simulated match; bot matches finish far sooner
const SIMULATION_MAX_TURNS: u32 = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationConfig {
    pub games: usize,
    pub players: usize,
    pub seed: u64,
}

/// Aggregated results over all simulated matches
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SimulationStats {
    pub games: usize,
    /// Wins per seat
    pub seat_wins: Vec<usize>,
    /// Matches stopped by the turn cap
    pub unfinished: usize,
    pub total_turns: u64,
    pub total_winning_score: u64,
}

impl SimulationStats {
    fn new(players: usize) -> Self {
        SimulationStats {
            seat_wins: vec![0; players],
            ..Default::default()
        }
    }

    fn record(&mut self, result: &GameResult) {
        self.games += 1;
        self.total_turns += u64::from(result.turns_played);
        match (result.end_reason, result.winner) {
            (GameEndReason::FinalRoundComplete, Some(winner)) => {
                self.seat_wins[winner.index()] += 1;
                self.total_winning_score += u64::from(result.final_scores[winner.index()]);
            }
            _ => self.unfinished += 1,
        }
    }

    fn decided(&self) -> usize {
        self.games - self.unfinished
    }

    pub fn average_turns(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.total_turns as f64 / self.games as f64
        }
    }

    pub fn average_winning_score(&self) -> f64 {
        match self.decided() {
            0 => 0.0,
            decided => self.total_winning_score as f64 / decided as f64,
        }
    }
}

/// Seed for match `game_idx`, independent of scheduling
pub fn game_seed(master_seed: u64, game_idx: usize) -> u64 {
    let mut rng = rand_xoshiro::Xoshiro256PlusPlus::seed_from_u64(
        master_seed.wrapping_add((game_idx as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15)),
    );
    rng.gen()
}

/// Play one silent all-bot match
pub fn play_bot_match(players: usize, seed: u64) -> Result<GameResult> {
    let seats: Vec<(String, bool)> = (1..=players).map(|n| (format!("Bot {n}"), true)).collect();
    let seat_refs: Vec<(&str, bool)> = seats.iter().map(|(n, b)| (n.as_str(), *b)).collect();
    let mut game = GameState::with_seats(&seat_refs)?;
    game.seed_rng(seed);

    let mut controllers: Vec<Box<dyn PlayerController>> = game
        .players
        .iter()
        .map(|p| Box::new(HeuristicController::new(p.id)) as Box<dyn PlayerController>)
        .collect();

    GameLoop::new(&mut game)
        .with_verbosity(VerbosityLevel::Silent)
        .with_max_turns(SIMULATION_MAX_TURNS)
        .run_game(&mut controllers)
}

/// Run `config.games` bot matches on the rayon pool
pub fn simulate(config: SimulationConfig) -> Result<SimulationStats> {
    if config.games == 0 {
        return Err(TenKError::InvalidAction(
            "Simulation needs at least one game".to_string(),
        ));
    }
    if config.players == 0 || config.players > MAX_PLAYERS {
        return Err(TenKError::InvalidArgument(format!(
            "a match needs 1..={MAX_PLAYERS} players, got {}",
            config.players
        )));
    }

    let results: Vec<GameResult> = (0..config.games)
        .into_par_iter()
        .map(|game_idx| play_bot_match(config.players, game_seed(config.seed, game_idx)))
        .collect::<Result<_>>()?;

    let mut stats = SimulationStats::new(config.players);
    for result in &results {
        stats.record(result);
    }
    Ok(stats)
}

/// Run simulation mode and print a report
pub async fn run_simulation(config: SimulationConfig) -> Result<()> {
    println!("=== TenK - Simulation Mode ===\n");
    println!(
        "Running {} games with {} bots (seed {})\n",
        config.games, config.players, config.seed
    );

    let start_time = Instant::now();
    let stats = tokio::task::spawn_blocking(move || simulate(config)).await??;
    print_report(&stats, start_time.elapsed());
    Ok(())
}

fn print_report(stats: &SimulationStats, elapsed: Duration) {
    println!("=== Simulation Complete ===");
    println!("Total games played: {}", stats.games);
    println!("Elapsed time: {:.2}s", elapsed.as_secs_f64());
    println!(
        "Games per second: {:.2}\n",
        stats.games as f64 / elapsed.as_secs_f64().max(f64::EPSILON)
    );

    println!("=== Seat Statistics ===");
    for (seat, wins) in stats.seat_wins.iter().enumerate() {
        println!(
            "P{} wins: {} ({:.1}%)",
            seat + 1,
            wins,
            100.0 * *wins as f64 / stats.games as f64
        );
    }
    if stats.unfinished > 0 {
        println!("Unfinished (turn cap): {}", stats.unfinished);
    }

    println!("\n=== Match Length ===");
    println!("Average turns per game: {:.1}", stats.average_turns());
    println!(
        "Average winning score: {:.0}",
        stats.average_winning_score()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_seeds_differ_and_repeat() {
        assert_eq!(game_seed(7, 3), game_seed(7, 3));
        assert_ne!(game_seed(7, 3), game_seed(7, 4));
        assert_ne!(game_seed(7, 3), game_seed(8, 3));
    }

    #[test]
    fn test_simulation_is_deterministic() {
        let config = SimulationConfig {
            games: 24,
            players: 3,
            seed: 99,
        };
        let first = simulate(config).unwrap();
        let second = simulate(config).unwrap();
        assert_eq!(first, second);

        assert_eq!(first.games, 24);
        assert_eq!(first.unfinished, 0);
        assert_eq!(first.seat_wins.iter().sum::<usize>(), 24);
        assert!(first.average_winning_score() >= 10_000.0);
        assert!(first.average_turns() >= 3.0);
    }

    #[test]
    fn test_simulation_rejects_bad_config() {
        let bad_players = SimulationConfig {
            games: 1,
            players: 9,
            seed: 0,
        };
        assert!(simulate(bad_players).is_err());

        let no_games = SimulationConfig {
            games: 0,
            players: 2,
            seed: 0,
        };
        assert!(simulate(no_games).is_err());
    }
}
