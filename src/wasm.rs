use wasm_bindgen::prelude::*;

use crate::model::Specification;

fn to_js(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Layout and price for a specification JSON, as JSON.
#[wasm_bindgen]
pub fn evaluate_spec(json: &str) -> Result<String, JsValue> {
    let evaluation = crate::evaluate_json(json).map_err(to_js)?;
    serde_json::to_string(&evaluation).map_err(to_js)
}

/// Price breakdown for a specification JSON, as JSON.
#[wasm_bindgen]
pub fn price_spec(json: &str) -> Result<String, JsValue> {
    let spec = Specification::from_json(json).map_err(to_js)?;
    serde_json::to_string(&crate::calculate_price(&spec)).map_err(to_js)
}

/// Specification JSON from a share-link payload.
#[wasm_bindgen]
pub fn decode_share_link(payload: &str) -> Result<String, JsValue> {
    let spec = crate::share::decode(payload).map_err(to_js)?;
    spec.to_json().map_err(to_js)
}
