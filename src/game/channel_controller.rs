//! Controller that forwards decisions over tokio channels
//!
//! The game thread sends a `ControllerRequest` and blocks until the other end
//! answers with a `ControllerResponse`. The other end may be async (a UI task,
//! a network session) or a plain thread. Events are forwarded on the same
//! request channel so the peer sees the match in order.
//!
//! The blocking calls must not run on an async worker thread; run the match
//! under `tokio::task::spawn_blocking` or on a dedicated thread.

use crate::core::{Die, KeepSelection, PlayerId};
use crate::game::controller::{GameStateView, PlayerController};
use crate::game::GameEvent;
use crate::{Result, TenKError};
use tokio::sync::mpsc;

/// Message from the engine to the remote player
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControllerRequest {
    /// Answer with `ControllerResponse::Keep`
    Keep {
        player: PlayerId,
        roll: Vec<Die>,
        turn_score: u32,
    },
    /// Answer with `ControllerResponse::Bank`
    Bank {
        player: PlayerId,
        turn_score: u32,
        player_total: u32,
        dice_remaining: usize,
    },
    /// Informational, no answer expected
    Event(GameEvent),
    /// Informational, no answer expected
    GameEnd { won: bool },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControllerResponse {
    Keep(KeepSelection),
    Bank(bool),
}

/// Remote end of a `ChannelController`
pub struct ControllerHandle {
    pub requests: mpsc::UnboundedReceiver<ControllerRequest>,
    pub responses: mpsc::Sender<ControllerResponse>,
}

pub struct ChannelController {
    player_id: PlayerId,
    requests: mpsc::UnboundedSender<ControllerRequest>,
    responses: mpsc::Receiver<ControllerResponse>,
}

impl ChannelController {
    pub fn new(
        player_id: PlayerId,
        requests: mpsc::UnboundedSender<ControllerRequest>,
        responses: mpsc::Receiver<ControllerResponse>,
    ) -> Self {
        ChannelController {
            player_id,
            requests,
            responses,
        }
    }

    /// Create a controller together with the handle its peer drives
    pub fn pair(player_id: PlayerId) -> (Self, ControllerHandle) {
        let (request_tx, request_rx) = mpsc::unbounded_channel();
        let (response_tx, response_rx) = mpsc::channel(1);
        (
            Self::new(player_id, request_tx, response_rx),
            ControllerHandle {
                requests: request_rx,
                responses: response_tx,
            },
        )
    }

    fn ask(&mut self, request: ControllerRequest) -> Result<ControllerResponse> {
        self.requests.send(request).map_err(|_| {
            TenKError::Disconnected(format!("request channel for {} closed", self.player_id))
        })?;
        self.responses.blocking_recv().ok_or_else(|| {
            TenKError::Disconnected(format!("response channel for {} closed", self.player_id))
        })
    }
}

impl PlayerController for ChannelController {
    fn player_id(&self) -> PlayerId {
        self.player_id
    }

    fn choose_keep(&mut self, view: &GameStateView, roll: &[Die]) -> Result<KeepSelection> {
        let request = ControllerRequest::Keep {
            player: self.player_id,
            roll: roll.to_vec(),
            turn_score: view.turn_score(),
        };
        match self.ask(request)? {
            ControllerResponse::Keep(keep) => Ok(keep),
            other => Err(TenKError::InvalidAction(format!(
                "expected a keep from {}, got {other:?}",
                self.player_id
            ))),
        }
    }

    fn choose_bank(&mut self, view: &GameStateView) -> Result<bool> {
        let request = ControllerRequest::Bank {
            player: self.player_id,
            turn_score: view.turn_score(),
            player_total: view.player_total(),
            dice_remaining: view.dice_remaining(),
        };
        match self.ask(request)? {
            ControllerResponse::Bank(bank) => Ok(bank),
            other => Err(TenKError::InvalidAction(format!(
                "expected a bank decision from {}, got {other:?}",
                self.player_id
            ))),
        }
    }

    fn on_event(&mut self, event: &GameEvent) {
        // A departed peer is reported by the next decision request
        let _ = self.requests.send(ControllerRequest::Event(event.clone()));
    }

    fn on_game_end(&mut self, won: bool) {
        let _ = self.requests.send(ControllerRequest::GameEnd { won });
    }
}
