//! TenK - rules engine for the "10,000" dice game
//!
//! Players take turns rolling up to six dice, setting aside scoring dice and
//! banking points, racing to 10,000. Crossing the target opens a final round
//! in which every other player gets one last turn.
//!
//! The engine is split the usual way: [`core`] holds the pure rules (dice,
//! scoring, selection checks, players) and [`game`] holds the turn state
//! machine, the match loop and the player controllers that make decisions.

pub mod core;
pub mod error;
pub mod game;
pub mod tournament;

pub use error::{Result, TenKError};
