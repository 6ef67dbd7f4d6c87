//! WebAssembly bindings for the forcing matrix engine
//!
//! A browser front end owns one [`ForcingMatrix`] and drives it through
//! target/variance changes and cell edits. Rendering, clipboard and share
//! sheet access stay on the JavaScript side.

use forcing_core::{share_text, MatrixState, Position, Target, Variance};
use wasm_bindgen::prelude::*;

// WASM tests require wasm-pack test to run
#[cfg(all(test, target_arch = "wasm32"))]
mod tests;

// Initialize panic hook for better error messages
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

fn js_error(err: forcing_core::Error) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// The grid controller exposed to JavaScript
#[wasm_bindgen]
pub struct ForcingMatrix {
    state: MatrixState,
}

#[wasm_bindgen]
impl ForcingMatrix {
    /// Create a controller with a freshly generated grid
    #[wasm_bindgen(constructor)]
    pub fn new(target: u32, variance: f64) -> Result<ForcingMatrix, JsValue> {
        let target = Target::new(i64::from(target)).map_err(js_error)?;
        Ok(Self {
            state: MatrixState::new(target, Variance::new(variance)),
        })
    }

    /// Change the target; regenerates and clears edits
    #[wasm_bindgen]
    pub fn set_target(&mut self, target: u32) -> Result<(), JsValue> {
        let target = Target::new(i64::from(target)).map_err(js_error)?;
        self.state.set_target(target);
        Ok(())
    }

    /// Change the variance; regenerates and clears edits
    #[wasm_bindgen]
    pub fn set_variance(&mut self, variance: f64) {
        self.state.set_variance(Variance::new(variance));
    }

    /// Apply a user edit. Returns false when the edit was rejected: the
    /// position is outside the grid, or its column already carries an edit on
    /// another row.
    #[wasm_bindgen]
    pub fn edit_cell(&mut self, row: usize, col: usize, value: f64) -> bool {
        let value = if value.is_finite() { value.round() as i64 } else { 0 };
        self.state.edit_cell(Position::new(row, col), value).is_ok()
    }

    /// Regenerate with the current parameters and clear edits
    #[wasm_bindgen]
    pub fn reset(&mut self) {
        self.state.reset();
    }

    #[wasm_bindgen]
    pub fn target(&self) -> u32 {
        self.state.target().get() as u32
    }

    #[wasm_bindgen]
    pub fn variance(&self) -> f64 {
        self.state.variance().get()
    }

    #[wasm_bindgen]
    pub fn is_valid(&self) -> bool {
        self.state.is_valid()
    }

    #[wasm_bindgen]
    pub fn validation_message(&self) -> String {
        self.state.validation_message().to_string()
    }

    /// Number of columns carrying an edit
    #[wasm_bindgen]
    pub fn edited_columns(&self) -> usize {
        self.state.edits().len()
    }

    #[wasm_bindgen]
    pub fn value(&self, row: usize, col: usize) -> f64 {
        match Position::checked(row, col) {
            Ok(pos) => self.state.grid().value(pos) as f64,
            Err(_) => f64::NAN,
        }
    }

    #[wasm_bindgen]
    pub fn is_user_edited(&self, row: usize, col: usize) -> bool {
        Position::checked(row, col)
            .map(|pos| self.state.grid().cell(pos).is_user_edited)
            .unwrap_or(false)
    }

    /// Plain text grid for copying
    #[wasm_bindgen]
    pub fn grid_text(&self) -> String {
        self.state.grid().to_text()
    }

    /// Title line plus grid, for the share sheet
    #[wasm_bindgen]
    pub fn share_text(&self) -> String {
        share_text(self.state.grid(), self.state.target())
    }

    /// Current state as a plain JavaScript object
    #[wasm_bindgen]
    pub fn snapshot(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.state.snapshot()).map_err(Into::into)
    }

    /// Current state as JSON, for local storage
    #[wasm_bindgen]
    pub fn get_state_json(&self) -> String {
        serde_json::to_string(&self.state.snapshot()).unwrap_or_default()
    }

    /// Load state from JSON. Returns false, leaving the state untouched, for
    /// malformed JSON or edits that point outside the grid.
    #[wasm_bindgen]
    pub fn load_state_json(&mut self, json: &str) -> bool {
        if let Ok(snapshot) = serde_json::from_str(json) {
            self.state = MatrixState::restore(snapshot);
            true
        } else {
            false
        }
    }
}
