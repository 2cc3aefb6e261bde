//! Turn orchestration for a human versus random-opponent match.
//!
//! ```text
//! HumanTurn ──human_move──▶ GameOver(HumanWin)
//!     ▲                  └─▶ OpponentTurn ──opponent_move──▶ GameOver(OpponentWin)
//!     └────────────────────────────────────────────────────┘
//! ```
//!
//! Moves from the party whose turn it is not are ignored rather than
//! rejected, so a host can keep forwarding clicks while the opponent is
//! "thinking". `GameOver` is final: a session has no restart.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::{Board, MoveError, Owner, Pos};

/// How a finished game ended.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub enum Outcome {
    HumanWin,
    OpponentWin,
}

impl Outcome {
    /// The party that completed a line.
    pub fn winner(self) -> Owner {
        match self {
            Outcome::HumanWin => Owner::Human,
            Outcome::OpponentWin => Owner::Opponent,
        }
    }

    fn for_winner(owner: Owner) -> Outcome {
        match owner {
            Owner::Human => Outcome::HumanWin,
            Owner::Opponent => Outcome::OpponentWin,
        }
    }
}

/// Whose move the session is waiting for.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Default, Serialize, Deserialize)]
pub enum Phase {
    #[default]
    HumanTurn,
    OpponentTurn,
    GameOver(Outcome),
}

impl Phase {
    /// The party allowed to move, or None once the game is over.
    pub fn active(self) -> Option<Owner> {
        match self {
            Phase::HumanTurn => Some(Owner::Human),
            Phase::OpponentTurn => Some(Owner::Opponent),
            Phase::GameOver(_) => None,
        }
    }
}

/// An accepted move, reported back to the host for rendering.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Played {
    pub position: Pos,
    pub owner: Owner,
    /// Set when this move ended the game.
    pub outcome: Option<Outcome>,
}

/// One match: board, turn phase, opponent RNG and move log.
#[derive(Debug, Clone)]
pub struct Session<R> {
    board: Board,
    phase: Phase,
    history: Vec<(Owner, Pos)>,
    rng: R,
}

impl<R: Rng> Session<R> {
    /// Start a match on an empty board with the human to move.
    pub fn new(rng: R) -> Self {
        Self {
            board: Board::new(),
            phase: Phase::HumanTurn,
            history: Vec::with_capacity(Board::CELLS),
            rng,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The final result, once there is one.
    pub fn outcome(&self) -> Option<Outcome> {
        match self.phase {
            Phase::GameOver(outcome) => Some(outcome),
            _ => None,
        }
    }

    /// Every applied move in order.
    pub fn history(&self) -> &[(Owner, Pos)] {
        &self.history
    }

    /// Handle a human click on `position`.
    ///
    /// Returns `Ok(None)` when it is not the human's turn. A rejected move
    /// leaves the phase unchanged so the human can pick another cell.
    #[instrument(skip(self), fields(phase = ?self.phase))]
    pub fn human_move(&mut self, position: usize) -> Result<Option<Played>, MoveError> {
        if self.phase != Phase::HumanTurn {
            debug!("ignoring human move outside human turn");
            return Ok(None);
        }
        let pos = self.board.apply_move(position, Owner::Human)?;
        Ok(Some(self.finish_move(pos, Owner::Human)))
    }

    /// Let the opponent pick and claim a random free cell.
    ///
    /// Returns `Ok(None)` when it is not the opponent's turn. On a full board
    /// this fails with [`MoveError::NoFreeCells`] and the phase stays put.
    #[instrument(skip(self), fields(phase = ?self.phase))]
    pub fn opponent_move(&mut self) -> Result<Option<Played>, MoveError> {
        if self.phase != Phase::OpponentTurn {
            debug!("ignoring opponent move outside opponent turn");
            return Ok(None);
        }
        let pos = self.board.select_opponent_move(&mut self.rng)?;
        self.board.apply_move(pos.index(), Owner::Opponent)?;
        Ok(Some(self.finish_move(pos, Owner::Opponent)))
    }

    fn finish_move(&mut self, position: Pos, owner: Owner) -> Played {
        self.history.push((owner, position));
        debug!(%position, ?owner, board = %self.board, "move applied");

        let outcome = if self.board.detect_win() {
            let outcome = Outcome::for_winner(owner);
            info!(?outcome, moves = self.history.len(), "game over");
            self.phase = Phase::GameOver(outcome);
            Some(outcome)
        } else {
            self.phase = match owner {
                Owner::Human => Phase::OpponentTurn,
                Owner::Opponent => Phase::HumanTurn,
            };
            None
        };

        Played {
            position,
            owner,
            outcome,
        }
    }
}
