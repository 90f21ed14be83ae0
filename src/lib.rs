use wasm_bindgen::prelude::*;

pub mod board;
pub mod config;
pub mod error;
pub mod game;
pub mod paths;
pub mod types;
pub mod variant;

use crate::config::GameConfig;
use crate::error::EngineError;
use crate::game::TurnController;
use crate::variant::Variant;

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}

/// Browser handle around one [`TurnController`].
#[wasm_bindgen]
pub struct CheckersGame {
    controller: TurnController,
}

#[wasm_bindgen]
impl CheckersGame {
    /// Accepts `undefined`/`null` or a config object such as `{ variant: "forced" }`.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<CheckersGame, JsValue> {
        let config: GameConfig = if config.is_undefined() || config.is_null() {
            GameConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|err| EngineError::InvalidConfig(err.to_string()))?
        };

        Ok(CheckersGame {
            controller: TurnController::from_config(&config),
        })
    }

    #[wasm_bindgen(js_name = withVariant)]
    pub fn with_variant(name: &str) -> Result<CheckersGame, JsValue> {
        let variant: Variant = name.parse()?;
        Ok(CheckersGame {
            controller: TurnController::from_config(&GameConfig::new(variant)),
        })
    }

    /// Returns the resulting instruction, or `null` when the click changed nothing.
    #[wasm_bindgen(js_name = tileClicked)]
    pub fn tile_clicked(&mut self, row: u8, col: u8) -> Result<JsValue, JsValue> {
        match self.controller.tile_clicked(row, col) {
            Some(instruction) => Ok(serde_wasm_bindgen::to_value(&instruction)?),
            None => Ok(JsValue::NULL),
        }
    }

    pub fn restart(&mut self) -> Result<JsValue, JsValue> {
        Ok(serde_wasm_bindgen::to_value(&self.controller.restart())?)
    }

    #[wasm_bindgen(js_name = selectableSquares)]
    pub fn selectable_squares(&self) -> Result<JsValue, JsValue> {
        Ok(serde_wasm_bindgen::to_value(
            &self.controller.selectable_squares(),
        )?)
    }

    /// 64 cells, row-major: 0=empty, 1=A pawn, 2=A queen, 3=B pawn, 4=B queen.
    pub fn board(&self) -> Vec<u8> {
        self.controller.board().to_array().to_vec()
    }

    pub fn variant(&self) -> String {
        self.controller.rules().variant().to_string()
    }
}
