//! WASM bindings for the codec
//!
//! Problems and results cross the boundary as plain JavaScript objects.

use lpbridge_model::{Problem, RawSolution, SolverOptions};
use wasm_bindgen::prelude::*;

use crate::decoder;
use crate::encoder;
use crate::options::collect_option_diagnostics;
use crate::validate::collect_diagnostics;

fn to_js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn problem_from_js(problem: JsValue) -> Result<Problem, JsValue> {
    serde_wasm_bindgen::from_value(problem).map_err(to_js_error)
}

#[derive(serde::Serialize)]
struct DiagnosticInfo {
    path: String,
    message: String,
}

fn diagnostics_to_js(diagnostics: Vec<crate::Diagnostic>) -> Result<JsValue, JsValue> {
    let infos: Vec<DiagnosticInfo> = diagnostics
        .iter()
        .map(|d| DiagnosticInfo {
            path: d.path().to_string(),
            message: d.to_string(),
        })
        .collect();
    serde_wasm_bindgen::to_value(&infos).map_err(to_js_error)
}

/// Validate a problem and return every diagnostic as `{ path, message }`
#[wasm_bindgen]
pub fn validate(problem: JsValue) -> Result<JsValue, JsValue> {
    let problem = problem_from_js(problem)?;
    diagnostics_to_js(collect_diagnostics(&problem))
}

/// Validate a flat solver option set
#[wasm_bindgen]
pub fn validate_options(options: JsValue) -> Result<JsValue, JsValue> {
    let options: SolverOptions =
        serde_wasm_bindgen::from_value(options).map_err(to_js_error)?;
    diagnostics_to_js(collect_option_diagnostics(&options))
}

/// Encode a problem into LP text
#[wasm_bindgen]
pub fn encode(problem: JsValue) -> Result<String, JsValue> {
    let problem = problem_from_js(problem)?;
    encoder::encode(&problem).map_err(to_js_error)
}

/// Decode a raw solver result against the problem that produced it
#[wasm_bindgen]
pub fn decode(raw: JsValue, problem: JsValue) -> Result<JsValue, JsValue> {
    let raw: RawSolution = serde_wasm_bindgen::from_value(raw).map_err(to_js_error)?;
    let problem = problem_from_js(problem)?;
    let result = decoder::decode(&raw, &problem);
    serde_wasm_bindgen::to_value(&result).map_err(to_js_error)
}
