//! WASM bindings for the browser frontend

#![cfg(feature = "wasm")]

use wasm_bindgen::prelude::*;

use crate::{
    moves_list, relation, MatchConfig, MatchEngine, Move, RandomOpponent, RuleTable, Session,
};

fn to_js<T: serde::Serialize>(value: &T) -> Result<JsValue, JsError> {
    serde_wasm_bindgen::to_value(value)
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}

/// One match as seen by the page.
///
/// `selectMove` decides the round immediately; the page calls `reveal`
/// once its animation is done. Scores and status only move on reveal.
#[wasm_bindgen]
pub struct WasmMatch {
    session: Session<RandomOpponent>,
}

#[wasm_bindgen]
impl WasmMatch {
    /// # Arguments
    /// * `seed` - 32 bytes for a reproducible opponent, or empty for OS entropy
    /// * `max_rounds` - defaults to 10
    #[wasm_bindgen(constructor)]
    pub fn new(seed: &[u8], max_rounds: Option<u32>) -> Result<WasmMatch, JsError> {
        let opponent = if seed.is_empty() {
            RandomOpponent::from_entropy()
        } else {
            let seed_arr: [u8; 32] = seed
                .try_into()
                .map_err(|_| JsError::new("Seed must be exactly 32 bytes"))?;
            RandomOpponent::from_seed(&seed_arr)
        };

        let config = max_rounds
            .map(MatchConfig::with_max_rounds)
            .unwrap_or_default();
        let engine = MatchEngine::new(config, opponent)?;

        Ok(WasmMatch {
            session: Session::new(engine),
        })
    }

    /// Returns the decided RoundResult
    #[wasm_bindgen(js_name = selectMove)]
    pub fn select_move(&mut self, name: &str) -> Result<JsValue, JsError> {
        let result = *self.session.select_named(name)?;
        to_js(&result)
    }

    /// Returns the pending RoundResult, or `null` if nothing was selected
    pub fn reveal(&mut self) -> Result<JsValue, JsError> {
        match self.session.reveal() {
            Some(result) => to_js(&result),
            None => Ok(JsValue::NULL),
        }
    }

    pub fn reset(&mut self) {
        self.session.reset();
    }

    /// Status line, e.g. "Round 3 of 10" or "It's a draw!"
    pub fn status(&self) -> String {
        self.session.status().to_string()
    }

    /// Revealed MatchState
    pub fn state(&self) -> Result<JsValue, JsError> {
        to_js(&self.session.scoreboard())
    }

    /// Result text of the last revealed round, e.g. "You win!"
    #[wasm_bindgen(js_name = lastResultText)]
    pub fn last_result_text(&self) -> Option<String> {
        self.session
            .last_revealed()
            .map(|r| r.outcome.to_string())
    }

    #[wasm_bindgen(getter, js_name = inFlight)]
    pub fn in_flight(&self) -> bool {
        self.session.is_in_flight()
    }

    #[wasm_bindgen(getter, js_name = isOver)]
    pub fn is_over(&self) -> bool {
        self.session.scoreboard().is_over
    }
}

/// Move names in display order
#[wasm_bindgen]
pub fn get_moves() -> js_sys::Array {
    moves_list()
        .iter()
        .map(|m| JsValue::from_str(m.name()))
        .collect()
}

/// Instruction table rows
#[wasm_bindgen]
pub fn get_move_guides() -> Result<JsValue, JsError> {
    let guides: Vec<_> = moves_list().iter().map(|m| m.guide()).collect();
    to_js(&guides)
}

/// The rule table as `{ move: { beats: [...], loses_to: [...] } }`
#[wasm_bindgen]
pub fn get_rules() -> Result<JsValue, JsError> {
    to_js(&RuleTable::standard())
}

/// Outcome of `mover` against `other` from `mover`'s side
#[wasm_bindgen]
pub fn judge(mover: &str, other: &str) -> Result<JsValue, JsError> {
    let mover: Move = mover.parse()?;
    let other: Move = other.parse()?;
    to_js(&relation(mover, other)?)
}
