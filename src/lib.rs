//! # Buck Core
//!
//! Parameter inference and consistency checking for buck (step-down) DC-DC
//! converter design.
//!
//! Given any subset of the primary design quantities (input and output
//! voltage, load current, switching frequency, inductance, capacitance,
//! ripple figures, duty cycle) this library:
//!
//! - cross-checks redundant inputs against each other and against their
//!   physical ranges,
//! - infers every unknown reachable from the knowns through the ideal
//!   steady-state buck relations,
//! - computes derived design values (power, peak switch current, capacitor ESR).
//!
//! ## Architecture
//!
//! - [`params`] - The quantities, [`ParameterSet`] and [`DerivedValues`]
//! - [`relations`] - The buck converter formulas
//! - [`validate`] - Consistency and range checks
//! - [`infer`] - Ordered single-pass inference rules
//! - [`calculator`] - Validate, then infer when there are no errors
//! - [`format`] - Engineering-prefix rendering of values
//! - [`input`] - Parsing user text (`10uH`, `500kHz`, `40%`) into SI values
//! - [`report`] - Text and JSON output (CLI only)
//!
//! ## Usage
//!
//! ### Library
//!
//! ```
//! use buck_core::{calculate, Parameter, ParameterSet};
//!
//! let params = ParameterSet::new()
//!     .with(Parameter::InputVoltage, 12.0)
//!     .with(Parameter::OutputVoltage, 5.0)
//!     .with(Parameter::SwitchingFrequency, 500e3)
//!     .with(Parameter::Inductance, 10e-6);
//!
//! let calc = calculate(&params);
//! assert!(calc.errors().is_empty());
//! let ripple = calc.derived.unwrap().parameter(Parameter::InductorCurrentRipple);
//! assert!((ripple.unwrap() - 0.5833).abs() < 1e-3);
//! ```
//!
//! ### Native CLI
//!
//! ```bash
//! buck vin=12 vout=5 fs=500kHz L=10uH iout=2A
//! ```
//!
//! ### WASM
//!
//! ```javascript
//! import { calculate } from 'buck_core';
//!
//! const result = JSON.parse(calculate(JSON.stringify({ inputVoltage: 12, outputVoltage: 5 })));
//! ```
//!
//! ## Model
//!
//! All relations assume an ideal, lossless converter in continuous conduction
//! mode at steady state. Errors block inference; warnings do not.

pub mod calculator;
pub mod error;
pub mod format;
pub mod infer;
pub mod input;
pub mod params;
pub mod relations;
pub mod validate;

#[cfg(feature = "cli")]
pub mod report;

// Re-export main types for convenience
pub use calculator::{calculate, Calculation, Calculator};
pub use error::{BuckError, Result};
pub use format::format_value;
pub use infer::infer;
pub use params::{DerivedQuantity, DerivedValues, Parameter, ParameterSet, UnitKind};
pub use validate::{validate, validate_with, ValidationResult, ValidatorConfig};

// WASM bindings
#[cfg(feature = "wasm")]
mod wasm;

#[cfg(feature = "wasm")]
pub use wasm::WasmCalculator;

/// Default tolerance for consistency checks: 0.05 absolute for ratios,
/// 5% relative for ripple magnitudes.
pub const DEFAULT_TOLERANCE: f64 = 0.05;
