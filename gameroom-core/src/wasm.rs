//! WASM bindings for gameroom-core
//!
//! Provides a JavaScript-friendly API for both games. The page owns all
//! drawing, timers and alerts; these wrappers only report state.

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::str::FromStr;
use wasm_bindgen::prelude::*;

use crate::dice::{Colour, DiceGame, Seat};
use crate::{Cell, HostConfig, Outcome, Owner, Phase, Played, Session};

/// WASM-friendly wrapper around a tic-tac-toe Session
#[wasm_bindgen]
pub struct WasmGame {
    inner: Session<StdRng>,
    config: HostConfig,
}

#[wasm_bindgen]
impl WasmGame {
    /// Start a match. `seed` drives the opponent's choices.
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u64) -> WasmGame {
        WasmGame {
            inner: Session::new(StdRng::seed_from_u64(seed)),
            config: HostConfig::default(),
        }
    }

    /// Start a match with host settings given as JSON
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(seed: u64, json: &str) -> Result<WasmGame, JsError> {
        let config = HostConfig::from_json(json)?;
        Ok(WasmGame {
            inner: Session::new(StdRng::seed_from_u64(seed)),
            config,
        })
    }

    /// Human clicked a cell.
    /// Returns null if the click was ignored or rejected, otherwise
    /// { position, owner, outcome }
    #[wasm_bindgen(js_name = humanMove)]
    pub fn human_move(&mut self, pos: u32) -> JsValue {
        played_to_js(self.inner.human_move(pos as usize).ok().flatten())
    }

    /// Opponent's turn, called by the page after the thinking delay.
    /// Returns null if it is not the opponent's turn.
    #[wasm_bindgen(js_name = opponentMove)]
    pub fn opponent_move(&mut self) -> JsValue {
        played_to_js(self.inner.opponent_move().ok().flatten())
    }

    /// True while clicks on the board should be accepted
    #[wasm_bindgen(js_name = isHumanTurn)]
    pub fn is_human_turn(&self) -> bool {
        self.inner.phase() == Phase::HumanTurn
    }

    /// Phase name: "human_turn", "opponent_turn", "human_wins" or "opponent_wins"
    pub fn phase(&self) -> String {
        match self.inner.phase() {
            Phase::HumanTurn => "human_turn".to_string(),
            Phase::OpponentTurn => "opponent_turn".to_string(),
            Phase::GameOver(Outcome::HumanWin) => "human_wins".to_string(),
            Phase::GameOver(Outcome::OpponentWin) => "opponent_wins".to_string(),
        }
    }

    /// Cell owners in row-major order: 0 (empty), 1 (human), 2 (opponent)
    pub fn cells(&self) -> Vec<u8> {
        self.inner
            .board()
            .cells()
            .iter()
            .map(|cell| match cell {
                Cell::Empty => 0,
                Cell::Occupied(owner) => *owner as u8,
            })
            .collect()
    }

    /// Get compact board encoding
    #[wasm_bindgen(js_name = toU32)]
    pub fn to_u32(&self) -> u32 {
        self.inner.board().to_u32()
    }

    /// Get winning line as array of positions [row, col, row, col, row, col]
    /// Returns empty array if no winner
    #[wasm_bindgen(js_name = winningLine)]
    pub fn winning_line(&self) -> Vec<u8> {
        match self.inner.board().winning_line() {
            Some(line) => line.iter().flat_map(|pos| [pos.row(), pos.col()]).collect(),
            None => vec![],
        }
    }

    /// Host settings as { thinking_delay_ms, outcome_delay_ms, human, opponent }
    pub fn config(&self) -> JsValue {
        serde_wasm_bindgen::to_value(&self.config).unwrap_or(JsValue::NULL)
    }
}

/// WASM-friendly wrapper around the dice turn tracker
#[wasm_bindgen]
pub struct WasmDice {
    inner: DiceGame,
    rng: StdRng,
}

#[wasm_bindgen]
impl WasmDice {
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u64) -> WasmDice {
        WasmDice {
            inner: DiceGame::new(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Colour names for the dropdown
    pub fn colours() -> Vec<String> {
        Colour::all().map(|c| c.to_string()).collect()
    }

    /// Pick a colour for the active player. Returns true if accepted.
    #[wasm_bindgen(js_name = selectColour)]
    pub fn select_colour(&mut self, name: &str) -> bool {
        match Colour::from_str(name) {
            Ok(colour) => self.inner.select_colour(colour),
            Err(_) => false,
        }
    }

    /// Roll for the active player. Throws with a message for the page to
    /// show when the player has not picked a colour.
    pub fn roll(&mut self) -> Result<u8, JsError> {
        Ok(self.inner.roll(&mut self.rng)?)
    }

    /// 1 or 2
    #[wasm_bindgen(js_name = activeSeat)]
    pub fn active_seat(&self) -> u8 {
        self.inner.active_seat().number()
    }

    /// Colour name for the die background, or undefined
    #[wasm_bindgen(js_name = activeColour)]
    pub fn active_colour(&self) -> Option<String> {
        self.inner.active_colour().map(|c| c.to_string())
    }

    /// Scores as [player one, player two]
    pub fn scores(&self) -> Vec<u32> {
        [Seat::One, Seat::Two]
            .iter()
            .map(|&seat| self.inner.player(seat).score)
            .collect()
    }
}

/// Serializable move for JavaScript
#[derive(serde::Serialize)]
struct WasmPlayed {
    position: u8,
    owner: u8,
    outcome: Option<&'static str>,
}

impl From<Played> for WasmPlayed {
    fn from(played: Played) -> Self {
        WasmPlayed {
            position: played.position.0,
            owner: played.owner as u8,
            outcome: played.outcome.map(|outcome| match outcome.winner() {
                Owner::Human => "human_wins",
                Owner::Opponent => "opponent_wins",
            }),
        }
    }
}

fn played_to_js(played: Option<Played>) -> JsValue {
    match played {
        Some(played) => {
            serde_wasm_bindgen::to_value(&WasmPlayed::from(played)).unwrap_or(JsValue::NULL)
        }
        None => JsValue::NULL,
    }
}
