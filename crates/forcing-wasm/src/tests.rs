//! Tests for the WASM bindings

use crate::ForcingMatrix;
use wasm_bindgen_test::*;

#[wasm_bindgen_test]
fn test_new_matrix_is_valid() {
    let m = ForcingMatrix::new(100, 0.5).unwrap();
    assert!(m.is_valid());
    assert_eq!(m.target(), 100);
    assert_eq!(m.edited_columns(), 0);
}

#[wasm_bindgen_test]
fn test_out_of_range_target() {
    assert!(ForcingMatrix::new(0, 0.5).is_err());
    assert!(ForcingMatrix::new(10_000_000, 0.5).is_err());
}

#[wasm_bindgen_test]
fn test_edit_policy() {
    let mut m = ForcingMatrix::new(1000, 0.5).unwrap();
    assert!(m.edit_cell(0, 0, 500.0));
    assert!(m.is_user_edited(0, 0));
    assert_eq!(m.value(0, 0), 500.0);
    assert!(!m.is_valid());

    assert!(m.edit_cell(0, 0, 450.0));
    assert!(!m.edit_cell(1, 0, 300.0));
    assert_eq!(m.edited_columns(), 1);
}

#[wasm_bindgen_test]
fn test_full_edit_set_is_valid() {
    let mut m = ForcingMatrix::new(1000, 0.0).unwrap();
    assert!(m.edit_cell(0, 0, 240.0));
    assert!(m.edit_cell(0, 1, 260.0));
    assert!(m.edit_cell(2, 2, 230.0));
    assert!(m.edit_cell(2, 3, 270.0));
    assert!(m.is_valid());
}

#[wasm_bindgen_test]
fn test_target_change_clears_edits() {
    let mut m = ForcingMatrix::new(1000, 0.5).unwrap();
    m.edit_cell(1, 1, 77.0);
    m.set_target(365).unwrap();
    assert_eq!(m.edited_columns(), 0);
    assert!(m.is_valid());
}

#[wasm_bindgen_test]
fn test_state_json_round_trip() {
    let mut m = ForcingMatrix::new(777, 0.75).unwrap();
    m.edit_cell(2, 1, 190.0);
    let json = m.get_state_json();

    let mut other = ForcingMatrix::new(100, 0.0).unwrap();
    assert!(other.load_state_json(&json));
    assert_eq!(other.grid_text(), m.grid_text());
    assert_eq!(other.target(), 777);
    assert!(!other.load_state_json("not json"));
}

#[wasm_bindgen_test]
fn test_state_json_with_bad_edit_row() {
    let mut m = ForcingMatrix::new(777, 0.75).unwrap();
    m.edit_cell(2, 1, 190.0);
    let json = m
        .get_state_json()
        .replace(r#"{"row":2,"value":190}"#, r#"{"row":9,"value":190}"#);

    let mut other = ForcingMatrix::new(100, 0.0).unwrap();
    assert!(!other.load_state_json(&json));
    assert_eq!(other.target(), 100);
    assert!(other.edit_cell(1, 3, 7.0));
}

#[wasm_bindgen_test]
fn test_out_of_bounds_edit_rejected() {
    let mut m = ForcingMatrix::new(1000, 0.5).unwrap();
    assert!(!m.edit_cell(4, 0, 10.0));
    assert!(!m.edit_cell(0, 7, 10.0));
    assert_eq!(m.edited_columns(), 0);
}

#[wasm_bindgen_test]
fn test_share_text() {
    let m = ForcingMatrix::new(100, 0.0).unwrap();
    assert!(m.share_text().starts_with("Forcing Matrix (Target: 100):"));
}
