//! Interactive console controller for human players
//!
//! Reads keep and bank decisions from stdin and prints prompts to stdout, or
//! to stderr when stdout carries the JSON event stream.
//! Selections the rules refuse are explained and asked again, so the engine
//! only ever sees valid keeps from a human seat.

use crate::core::{validate_keep, Die, KeepSelection, PlayerId};
use crate::game::controller::{GameStateView, PlayerController};
use crate::{Result, TenKError};
use std::io::{self, BufRead, Write};

/// A controller that prompts a human player for decisions
pub struct InteractiveController {
    player_id: PlayerId,
    input: Box<dyn BufRead>,
    output: Box<dyn Write>,
}

impl InteractiveController {
    /// Create a new interactive controller on stdin/stdout
    pub fn new(player_id: PlayerId) -> Self {
        Self::with_io(
            player_id,
            Box::new(io::BufReader::new(io::stdin())),
            Box::new(io::stdout()),
        )
    }

    /// Stdin controller that prompts on stderr
    pub fn on_stderr(player_id: PlayerId) -> Self {
        Self::with_io(
            player_id,
            Box::new(io::BufReader::new(io::stdin())),
            Box::new(io::stderr()),
        )
    }

    /// Create a controller reading from `input` and prompting on `output`
    pub fn with_io(player_id: PlayerId, input: Box<dyn BufRead>, output: Box<dyn Write>) -> Self {
        InteractiveController {
            player_id,
            input,
            output,
        }
    }

    /// Prompt and read one trimmed line; end of input means the player left
    fn prompt(&mut self, prompt: &str) -> Result<String> {
        write!(self.output, "{prompt} ")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(TenKError::Disconnected(format!(
                "input closed while waiting for {}",
                self.player_id
            )));
        }
        Ok(line.trim().to_string())
    }

    fn display_help(&mut self) -> Result<()> {
        writeln!(self.output, "\n=== Help ===")?;
        writeln!(self.output, "Keeping dice:")?;
        writeln!(
            self.output,
            "  Enter the faces to keep, e.g. '1 5 5 5' or '1555'"
        )?;
        writeln!(self.output, "  Only scoring dice from the roll may be kept")?;
        writeln!(self.output, "Scoring:")?;
        writeln!(self.output, "  1 = 100, 5 = 50")?;
        writeln!(
            self.output,
            "  three of a kind = face x 100 (1s: 1000), doubled per extra die"
        )?;
        writeln!(self.output, "  straight 1-6 or three pairs = 1500")?;
        writeln!(self.output, "  s  - Show scoreboard")?;
        writeln!(self.output, "  ?  - Show this help menu")?;
        writeln!(self.output)?;
        Ok(())
    }

    fn display_scoreboard(&mut self, view: &GameStateView) -> Result<()> {
        writeln!(self.output, "\n=== Scores ===")?;
        for player in view.players() {
            let marker = if player.id == self.player_id { "*" } else { " " };
            writeln!(
                self.output,
                "{marker} {}: {}",
                player.name, player.total_score
            )?;
        }
        if view.final_round_triggered() {
            writeln!(self.output, "Final round in progress")?;
        }
        writeln!(self.output)?;
        Ok(())
    }
}

/// Parse dice faces from free-form input: "1 5 5", "1,5,5" and "155" all work
fn parse_faces(input: &str) -> Option<KeepSelection> {
    let mut keep = KeepSelection::new();
    for ch in input.chars() {
        if ch.is_whitespace() || ch == ',' {
            continue;
        }
        let face = ch.to_digit(10)?;
        keep.push(Die::new(face as u8).ok()?);
    }
    if keep.is_empty() {
        None
    } else {
        Some(keep)
    }
}

impl PlayerController for InteractiveController {
    fn player_id(&self) -> PlayerId {
        self.player_id
    }

    fn choose_keep(&mut self, view: &GameStateView, roll: &[Die]) -> Result<KeepSelection> {
        let faces: Vec<String> = roll.iter().map(|d| d.to_string()).collect();
        writeln!(self.output, "You rolled: {}", faces.join(" "))?;
        writeln!(self.output, "Turn score so far: {}", view.turn_score())?;

        loop {
            let line = self.prompt("Dice to keep (? for help):")?;
            match line.as_str() {
                "?" => {
                    self.display_help()?;
                    continue;
                }
                "s" => {
                    self.display_scoreboard(view)?;
                    continue;
                }
                _ => {}
            }

            let Some(keep) = parse_faces(&line) else {
                writeln!(self.output, "Enter dice faces 1-6, e.g. '1 5'.")?;
                continue;
            };
            match validate_keep(roll, &keep) {
                Ok(points) => {
                    writeln!(self.output, "Keeping {} for {points}", line)?;
                    return Ok(keep);
                }
                Err(_) => {
                    writeln!(
                        self.output,
                        "Invalid selection. Keep only scoring dice that you rolled."
                    )?;
                }
            }
        }
    }

    fn choose_bank(&mut self, view: &GameStateView) -> Result<bool> {
        loop {
            let prompt = format!(
                "Bank {} points? ({} dice left to roll) [y/n]:",
                view.turn_score(),
                view.dice_remaining()
            );
            let line = self.prompt(&prompt)?;
            match line.to_lowercase().as_str() {
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                "s" => self.display_scoreboard(view)?,
                "?" => self.display_help()?,
                _ => writeln!(self.output, "Please answer 'y' or 'n'.")?,
            }
        }
    }

    fn on_game_end(&mut self, won: bool) {
        // Nothing to recover if stdout is gone at the end
        let _ = writeln!(
            self.output,
            "\nYou {}",
            if won { "WON!" } else { "LOST!" }
        );
    }
}
