//! Match state, turn structure and player controllers

pub mod channel_controller;
pub mod controller;
pub mod events;
pub mod game_loop;
pub mod heuristic_controller;
pub mod interactive_controller;
pub mod logger;
pub mod scripted_controller;
pub mod state;
pub mod turn;

pub use channel_controller::{
    ChannelController, ControllerHandle, ControllerRequest, ControllerResponse,
};
pub use controller::{GameStateView, PlayerController};
pub use events::GameEvent;
pub use game_loop::{GameEndReason, GameLoop, GameResult, VerbosityLevel};
pub use heuristic_controller::HeuristicController;
pub use interactive_controller::InteractiveController;
pub use logger::{GameLogger, LogEntry, OutputFormat};
pub use scripted_controller::ScriptedController;
pub use state::{GameState, TurnRecord};
pub use turn::{KeepApplied, TurnOutcome, TurnState, TurnStatus};
