//! WASM bindings for confl-core.
//!
//! Exposes parse-and-render as `#[wasm_bindgen]` functions callable from
//! JavaScript/TypeScript. Parse failures surface as thrown JS errors carrying
//! the same message the CLI prints.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p confl-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target nodejs --out-dir pkg/ \
//!   target/wasm32-unknown-unknown/release/confl_wasm.wasm
//! ```

use confl_core::Format;
use wasm_bindgen::prelude::*;

/// Parse a confl source and render it as block-style YAML.
#[wasm_bindgen(js_name = toYaml)]
pub fn to_yaml(source: &str) -> std::result::Result<String, JsValue> {
    render(source, Format::Yaml)
}

/// Parse a confl source and render it as pretty-printed JSON.
#[wasm_bindgen(js_name = toJson)]
pub fn to_json(source: &str) -> std::result::Result<String, JsValue> {
    render(source, Format::Json)
}

fn render(source: &str, format: Format) -> std::result::Result<String, JsValue> {
    confl_core::parse(source)
        .and_then(|doc| format.render(&doc))
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
