//! WebAssembly bindings for the Warpmap renderer.
//!
//! This module exposes map rendering to JavaScript through wasm-bindgen.

#[cfg(feature = "wasm")]
use wasm_bindgen::prelude::*;

#[cfg(feature = "wasm")]
use crate::map::MapRequest;

/// Initialize panic hook for better error messages in browser console
#[cfg(feature = "wasm")]
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Parse a JSON map description and check it, without rendering
#[cfg(feature = "wasm")]
fn parse_map(map_json: &str) -> Result<MapRequest, JsValue> {
    let request = MapRequest::from_json(map_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid map JSON: {}", e)))?;
    request
        .validate()
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok(request)
}

/// Render a JSON map description to an SVG document
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = renderMapSvg)]
pub fn render_map_svg(map_json: &str) -> Result<String, JsValue> {
    parse_map(map_json)?
        .render_svg()
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Render a JSON map description to an HTML page
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = renderMapHtml)]
pub fn render_map_html(map_json: &str) -> Result<String, JsValue> {
    parse_map(map_json)?
        .render_html()
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// The built-in standard map as JSON
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = standardMapJson)]
pub fn standard_map_json() -> String {
    serde_json::to_string(&MapRequest::standard()).unwrap_or_else(|_| "{}".to_string())
}

/// A freshly generated random map as JSON
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = randomMapJson)]
pub fn random_map_json() -> String {
    let map = crate::generate::random_map(&mut rand::thread_rng());
    serde_json::to_string(&map).unwrap_or_else(|_| "{}".to_string())
}
