//! WASM bindings for Buck Core.
//!
//! This module provides JavaScript-friendly bindings for a browser front end.
//! Parameter sets and results cross the boundary as JSON strings using the
//! camelCase parameter names.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { WasmCalculator, parse_quantity, format_value } from 'buck_core';
//!
//! await init();
//!
//! const params = {
//!   inputVoltage: 12,
//!   outputVoltage: 5,
//!   switchingFrequency: parse_quantity('switchingFrequency', '500kHz'),
//!   inductance: parse_quantity('inductance', '10uH'),
//! };
//!
//! const calc = new WasmCalculator();
//! const result = JSON.parse(calc.calculate(JSON.stringify(params)));
//! // result.errors, result.warnings, result.values
//! format_value(result.values.inductorCurrentRipple, 'A'); // "583.3 mA"
//! ```

use wasm_bindgen::prelude::*;

use crate::calculator::Calculator;
use crate::format;
use crate::input;
use crate::params::{Parameter, ParameterSet, UnitKind};
use crate::validate::ValidatorConfig;

fn to_js(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

/// WASM-compatible buck converter calculator.
///
/// Wraps a native [`Calculator`] and its tolerances.
#[wasm_bindgen]
pub struct WasmCalculator {
    calculator: Calculator,
}

#[wasm_bindgen]
impl WasmCalculator {
    /// Create a calculator with the default tolerances.
    #[wasm_bindgen(constructor)]
    pub fn new() -> WasmCalculator {
        WasmCalculator {
            calculator: Calculator::new(),
        }
    }

    /// Create a calculator with custom tolerances.
    ///
    /// # Arguments
    /// * `ratio_tolerance` - Absolute tolerance for duty cycle and ripple ratios (default: 0.05)
    /// * `relative_tolerance` - Relative tolerance for ripple magnitudes (default: 0.05)
    #[wasm_bindgen]
    pub fn with_tolerances(ratio_tolerance: f64, relative_tolerance: f64) -> WasmCalculator {
        let config = ValidatorConfig::new()
            .with_ratio_tolerance(ratio_tolerance)
            .with_relative_tolerance(relative_tolerance);
        WasmCalculator {
            calculator: Calculator::with_config(config),
        }
    }

    /// Validate and infer from a JSON parameter object.
    ///
    /// # Returns
    /// A JSON object `{ inputs, errors, warnings, values }`, where `values` is
    /// `null` when validation reported errors.
    #[wasm_bindgen]
    pub fn calculate(&self, params_json: &str) -> Result<String, JsValue> {
        let params = ParameterSet::from_json(params_json).map_err(to_js)?;
        let calc = self.calculator.calculate(&params);
        serde_json::to_string(&calc).map_err(to_js)
    }
}

impl Default for WasmCalculator {
    fn default() -> Self {
        Self::new()
    }
}

/// Validate and infer with the default tolerances.
#[wasm_bindgen]
pub fn calculate(params_json: &str) -> Result<String, JsValue> {
    WasmCalculator::new().calculate(params_json)
}

/// Parse user text such as `"10uH"` for the named parameter into SI units.
#[wasm_bindgen]
pub fn parse_quantity(name: &str, text: &str) -> Result<f64, JsValue> {
    let param: Parameter = name.parse().map_err(to_js)?;
    input::parse_quantity(param, text).map_err(to_js)
}

/// Multiplier for a unit selector entry, e.g. `("inductance", "mH")` gives `0.001`.
#[wasm_bindgen]
pub fn unit_multiplier(name: &str, unit: &str) -> Result<f64, JsValue> {
    let param: Parameter = name.parse().map_err(to_js)?;
    input::UnitScale::new(param, unit)
        .map(|scale| scale.multiplier())
        .map_err(to_js)
}

/// Format a value with an engineering prefix.
///
/// `unit` is one of `H, F, Hz, V, A, W, Ω, %`; anything else prints the raw
/// value. `undefined` renders as the not-available marker.
#[wasm_bindgen]
pub fn format_value(value: Option<f64>, unit: &str) -> String {
    format::format_value(value, UnitKind::from_tag(unit))
}

/// Get the library version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
