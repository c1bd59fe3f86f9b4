// WASM bindings for drift.
//
// Exposes a `WasmDrift` class to JavaScript. Points go in as plain JS
// objects (any shape `parse_points` accepts) and whispers come back as
// objects via serde-wasm-bindgen.
//
// Usage from JavaScript:
//
//   const drift = new WasmDrift();                 // or new WasmDrift(configJson)
//   drift.generate(points, 41.31, -105.59, 12.5);  // => { text, sourceTitles, technique }
//   drift.entry(points, 41.31, -105.59);           // => { id, timestamp, text, ... }
//   drift.shouldDrift(41.31, -105.59);             // => true on first fix

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::core::{
    Coordinate, DriftConfig, DriftEntry, DriftError, MovementGate, PointOfInterest,
    WhisperGenerator, WhisperResult,
};

// ============================================================================
// Serde-serializable DTO types for JS interop
// ============================================================================

/// Serializable representation of a whisper.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsWhisper {
    text: String,
    source_titles: Vec<String>,
    technique: Option<String>,
}

impl From<WhisperResult> for JsWhisper {
    fn from(result: WhisperResult) -> Self {
        Self {
            text: result.text,
            source_titles: result.source_titles,
            technique: result.technique.map(|t| t.name().to_string()),
        }
    }
}

// ============================================================================
// Conversion helpers
// ============================================================================

fn drift_error_to_js(e: DriftError) -> JsError {
    JsError::new(&e.to_string())
}

fn points_from_js(points: JsValue) -> Result<Vec<PointOfInterest>, JsError> {
    let json: serde_json::Value = serde_wasm_bindgen::from_value(points)
        .map_err(|e| JsError::new(&format!("points: {}", e)))?;
    crate::core::parse_points(&json.to_string()).map_err(drift_error_to_js)
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsError> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsError::new(&e.to_string()))
}

// ============================================================================
// WasmDrift
// ============================================================================

/// Whisper engine for WebAssembly.
#[wasm_bindgen]
pub struct WasmDrift {
    generator: WhisperGenerator,
    gate: MovementGate,
}

#[wasm_bindgen]
impl WasmDrift {
    /// Create an engine, optionally from a JSON configuration string.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<WasmDrift, JsError> {
        let config = match config_json {
            Some(json) => DriftConfig::from_json(&json).map_err(drift_error_to_js)?,
            None => DriftConfig::default(),
        };
        let gate = MovementGate::from_config(&config);
        Ok(WasmDrift {
            generator: WhisperGenerator::new(config),
            gate,
        })
    }

    /// Generate a whisper for the given points and position.
    pub fn generate(
        &self,
        points: JsValue,
        lat: f64,
        lng: f64,
        heading: Option<f64>,
    ) -> Result<JsValue, JsError> {
        let points = points_from_js(points)?;
        let result = self
            .generator
            .generate(&points, Coordinate::new(lat, lng), heading);
        to_js(&JsWhisper::from(result))
    }

    /// Generate a whisper and wrap it in a timestamped log entry.
    pub fn entry(
        &self,
        points: JsValue,
        lat: f64,
        lng: f64,
        heading: Option<f64>,
    ) -> Result<JsValue, JsError> {
        let points = points_from_js(points)?;
        let coords = Coordinate::new(lat, lng);
        let result = self.generator.generate(&points, coords, heading);
        let entry = DriftEntry::record(
            &result,
            coords,
            self.generator.config(),
            &mut rand::thread_rng(),
        );
        to_js(&entry)
    }

    /// Whether the user moved far enough since the last drift.
    #[wasm_bindgen(js_name = shouldDrift)]
    pub fn should_drift(&mut self, lat: f64, lng: f64) -> bool {
        self.gate.should_drift(Coordinate::new(lat, lng))
    }
}
