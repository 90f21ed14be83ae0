#![cfg(target_arch = "wasm32")]

use checkers::CheckersGame;
use js_sys::{Array, Reflect};
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

fn field(value: &JsValue, name: &str) -> JsValue {
    Reflect::get(value, &JsValue::from_str(name)).unwrap()
}

#[wasm_bindgen_test]
fn ready_flag_is_set() {
    assert!(checkers::wasm_ready());
}

#[wasm_bindgen_test]
fn restart_returns_full_redraw() {
    let mut game = CheckersGame::new(JsValue::UNDEFINED).unwrap();

    let instruction = game.restart().unwrap();
    let updates = Array::from(&field(&instruction, "tile_updates"));

    assert_eq!(updates.length(), 64);
    assert_eq!(field(&instruction, "active_player").as_string().as_deref(), Some("A"));
    assert_eq!(game.board().len(), 64);
}

#[wasm_bindgen_test]
fn ignored_click_returns_null() {
    let mut game = CheckersGame::with_variant("forced").unwrap();

    assert!(game.tile_clicked(4, 4).unwrap().is_null());
    assert!(game.tile_clicked(9, 9).unwrap().is_null());

    let selected = game.tile_clicked(2, 0).unwrap();
    let destinations = Array::from(&field(&selected, "destinations"));
    assert_eq!(destinations.length(), 1);
    assert_eq!(game.variant(), "forced");
}

#[wasm_bindgen_test]
fn unknown_variant_is_reported() {
    assert!(CheckersGame::with_variant("flying").is_err());
}
