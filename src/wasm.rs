use js_sys::Array;
use wasm_bindgen::prelude::*;

use crate::parse::parse_farm;

/// Parse and solve a farm description, returning one string per turn.
#[wasm_bindgen]
pub fn solve(input: &str) -> Result<Array, JsError> {
    let farm = parse_farm(input)?;
    let solution = farm.solve()?;

    Ok(solution.log.lines().into_iter().map(JsValue::from).collect())
}
