//! WASM bindings for gobblet-engine
//!
//! Provides a JavaScript-friendly API over the game engine. The page only
//! renders what these calls return; it never decides anything itself.

use wasm_bindgen::prelude::*;

use crate::rules;
use crate::{EngineError, GameEngine, Owner, Pos, RandomPolicy};

fn to_js_error(err: EngineError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// JS side code: 1 = player, 2 = opponent.
fn owner_code(owner: Owner) -> u8 {
    match owner {
        Owner::Player => 1,
        Owner::Opponent => 2,
    }
}

fn owner_from_code(code: u8) -> Option<Owner> {
    match code {
        1 => Some(Owner::Player),
        2 => Some(Owner::Opponent),
        _ => None,
    }
}

/// WASM-friendly wrapper around a game against the random opponent
#[wasm_bindgen]
pub struct WasmGame {
    inner: GameEngine<RandomPolicy>,
}

#[wasm_bindgen]
impl WasmGame {
    /// Create a game. The seed comes from JS so no OS randomness is needed.
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u64) -> WasmGame {
        WasmGame {
            inner: GameEngine::new(RandomPolicy::new(seed)),
        }
    }

    /// Start (or restart) a game. Returns the engine event.
    pub fn start(&mut self, player_first: bool) -> Result<JsValue, JsValue> {
        let first = if player_first { Owner::Player } else { Owner::Opponent };
        let event = self.inner.start(first).map_err(to_js_error)?;
        Ok(serde_wasm_bindgen::to_value(&event)?)
    }

    /// Select one of the player's pieces by id (0-5)
    pub fn select(&mut self, id: u8) -> Result<JsValue, JsValue> {
        let event = self.inner.select_id(Owner::Player, id).map_err(to_js_error)?;
        Ok(serde_wasm_bindgen::to_value(&event)?)
    }

    /// Act on a board cell (0-8)
    #[wasm_bindgen(js_name = actOnCell)]
    pub fn act_on_cell(&mut self, cell: usize) -> Result<JsValue, JsValue> {
        let event = self.inner.act_on_cell(cell).map_err(to_js_error)?;
        Ok(serde_wasm_bindgen::to_value(&event)?)
    }

    /// Current state as a JS object
    pub fn state(&self) -> Result<JsValue, JsValue> {
        Ok(serde_wasm_bindgen::to_value(&self.inner.current_state())?)
    }

    /// Status line, empty before the first game
    pub fn status(&self) -> String {
        self.inner.status().map(|s| s.to_string()).unwrap_or_default()
    }

    /// Get cell stack as array of [owner, id, owner, id, ...]
    /// Owner: 1 = player, 2 = opponent. Bottom to top order.
    #[wasm_bindgen(js_name = cellStack)]
    pub fn cell_stack(&self, cell: usize) -> Result<Vec<u8>, JsValue> {
        let pos = Pos::new(cell).map_err(to_js_error)?;
        let board = self.inner.current_board_snapshot();
        Ok(board
            .stack(pos)
            .flat_map(|piece| [owner_code(piece.owner()), piece.id()])
            .collect())
    }

    /// Reserve piece ids of a side (1 = player, 2 = opponent)
    pub fn reserve(&self, owner: u8) -> Result<Vec<u8>, JsValue> {
        let owner = owner_from_code(owner)
            .ok_or_else(|| JsValue::from_str(&format!("unknown owner code {} (expected 1 or 2)", owner)))?;
        Ok(self
            .inner
            .current_board_snapshot()
            .reserve(owner)
            .into_iter()
            .map(|piece| piece.id())
            .collect())
    }

    /// Completed lines as flat cell indices [a, b, c, a, b, c, ...]
    #[wasm_bindgen(js_name = winningLines)]
    pub fn winning_lines(&self) -> Vec<u8> {
        let board = self.inner.current_board_snapshot();
        Owner::both()
            .flat_map(|owner| rules::winning_lines(&board, owner))
            .flatten()
            .map(|pos| pos.index() as u8)
            .collect()
    }
}
