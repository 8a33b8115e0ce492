//! Consistency validation of a parameter set.
//!
//! Several quantities can be computed from the others in more than one way.
//! When a user supplies such a quantity alongside everything needed to
//! re-derive it, the two must agree within tolerance. Independently, each
//! supplied value is checked against its physical range.
//!
//! Checks run in a fixed order and messages are appended in that order:
//!
//! 1. `D ≟ Vout/Vin` (absolute tolerance)
//! 2. `ΔIL ≟ (Vin − Vout)·D/(L·Fs)` (relative tolerance)
//! 3. `ΔVout ≟ ΔIL/(8·Fs·C)` (relative tolerance)
//! 4. `ΔV/V ≟ ΔVout/Vout` (absolute tolerance)
//! 5. `ΔI/I ≟ ΔIL/Iout` (absolute tolerance)
//! 6. duty cycle inside (0, 1), warning
//! 7. `Vout < Vin`, warning
//! 8. `Fs`, `L`, `C`, `Iout` strictly positive, one error each
//! 9. ripple ratios inside (0, 1], warning

use serde::Serialize;
use tracing::{debug, trace};

use crate::format::format_value;
use crate::params::{Parameter, ParameterSet};
use crate::relations;
use crate::DEFAULT_TOLERANCE;

use Parameter::*;

/// Errors and warnings produced by [`validate`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    /// Hard problems; inference is suppressed when any are present.
    pub errors: Vec<String>,
    /// Advisory problems; inference still runs.
    pub warnings: Vec<String>,
}

impl ValidationResult {
    /// Check whether any hard error was found.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Check whether there is nothing to report at all.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }
}

/// How far a supplied value may stray from its re-derived value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tolerance {
    /// Allowed raw difference.
    Absolute(f64),
    /// Allowed difference as a fraction of `|expected|`.
    Relative(f64),
}

impl Tolerance {
    /// Check whether `supplied` is close enough to `expected`.
    pub fn accepts(self, supplied: f64, expected: f64) -> bool {
        let allowed = match self {
            Tolerance::Absolute(tol) => tol,
            Tolerance::Relative(frac) => expected.abs() * frac,
        };
        (supplied - expected).abs() <= allowed
    }
}

/// Configuration for the validator.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatorConfig {
    /// Absolute tolerance for the duty cycle and ripple ratio checks.
    pub ratio_tolerance: f64,
    /// Relative tolerance for the ripple magnitude checks.
    pub relative_tolerance: f64,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            ratio_tolerance: DEFAULT_TOLERANCE,
            relative_tolerance: DEFAULT_TOLERANCE,
        }
    }
}

impl ValidatorConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the absolute tolerance used for ratio checks.
    pub fn with_ratio_tolerance(mut self, tolerance: f64) -> Self {
        self.ratio_tolerance = tolerance;
        self
    }

    /// Set the relative tolerance used for ripple magnitude checks.
    ///
    /// `0.05` accepts a supplied ripple within 5% of the computed one.
    pub fn with_relative_tolerance(mut self, tolerance: f64) -> Self {
        self.relative_tolerance = tolerance;
        self
    }
}

#[derive(Debug, Clone, Copy)]
enum ToleranceKind {
    Ratio,
    Relative,
}

/// A redundant quantity and the relation that re-derives it.
struct ConsistencyCheck {
    target: Parameter,
    inputs: &'static [Parameter],
    relation: &'static str,
    tolerance: ToleranceKind,
    expected: fn(&[f64]) -> Option<f64>,
}

const CONSISTENCY_CHECKS: [ConsistencyCheck; 5] = [
    ConsistencyCheck {
        target: DutyCycle,
        inputs: &[InputVoltage, OutputVoltage],
        relation: "Vout/Vin",
        tolerance: ToleranceKind::Ratio,
        expected: |v| relations::duty_cycle(v[0], v[1]),
    },
    ConsistencyCheck {
        target: InductorCurrentRipple,
        inputs: &[InputVoltage, OutputVoltage, DutyCycle, Inductance, SwitchingFrequency],
        relation: "(Vin − Vout)·D/(L·Fs)",
        tolerance: ToleranceKind::Relative,
        expected: |v| relations::inductor_current_ripple(v[0], v[1], v[2], v[3], v[4]),
    },
    ConsistencyCheck {
        target: OutputVoltageRipple,
        inputs: &[InductorCurrentRipple, SwitchingFrequency, Capacitance],
        relation: "ΔIL/(8·Fs·C)",
        tolerance: ToleranceKind::Relative,
        expected: |v| relations::output_voltage_ripple(v[0], v[1], v[2]),
    },
    ConsistencyCheck {
        target: VoltageRippleRatio,
        inputs: &[OutputVoltageRipple, OutputVoltage],
        relation: "ΔVout/Vout",
        tolerance: ToleranceKind::Ratio,
        expected: |v| relations::ripple_ratio(v[0], v[1]),
    },
    ConsistencyCheck {
        target: CurrentRippleRatio,
        inputs: &[InductorCurrentRipple, OutputCurrent],
        relation: "ΔIL/Iout",
        tolerance: ToleranceKind::Ratio,
        expected: |v| relations::ripple_ratio(v[0], v[1]),
    },
];

/// Quantities that must be strictly positive, in reporting order.
const STRICTLY_POSITIVE: [Parameter; 4] = [SwitchingFrequency, Inductance, Capacitance, OutputCurrent];

/// Ratios that must lie in (0, 1], in reporting order.
const RIPPLE_RATIOS: [Parameter; 2] = [VoltageRippleRatio, CurrentRippleRatio];

/// Validate `params` with the default tolerances.
pub fn validate(params: &ParameterSet) -> ValidationResult {
    validate_with(params, &ValidatorConfig::default())
}

/// Validate `params` with explicit tolerances.
///
/// Never fails: every problem is reported as a message in the result.
pub fn validate_with(params: &ParameterSet, config: &ValidatorConfig) -> ValidationResult {
    let mut result = ValidationResult::default();

    for check in &CONSISTENCY_CHECKS {
        let Some(supplied) = params.get(check.target) else {
            continue;
        };
        let Some(inputs) = params.gather(check.inputs) else {
            continue;
        };
        let Some(expected) = (check.expected)(&inputs) else {
            trace!(target_param = %check.target, "re-derivation undefined, check skipped");
            continue;
        };

        let tolerance = match check.tolerance {
            ToleranceKind::Ratio => Tolerance::Absolute(config.ratio_tolerance),
            ToleranceKind::Relative => Tolerance::Relative(config.relative_tolerance),
        };
        if !tolerance.accepts(supplied, expected) {
            debug!(target_param = %check.target, supplied, expected, "inconsistent parameter");
            let unit = check.target.unit();
            result.errors.push(format!(
                "{} mismatch: supplied {} = {}, expected {} from {}",
                check.target.label(),
                check.target.symbol(),
                format_value(Some(supplied), unit),
                format_value(Some(expected), unit),
                check.relation,
            ));
        }
    }

    if let Some(duty) = params.get(DutyCycle) {
        if !(duty > 0.0 && duty < 1.0) {
            result.warnings.push(format!(
                "Duty cycle {} is outside the valid range (0 %, 100 %)",
                format_value(Some(duty), DutyCycle.unit()),
            ));
        }
    }

    if let (Some(vin), Some(vout)) = (params.get(InputVoltage), params.get(OutputVoltage)) {
        if vout >= vin {
            result.warnings.push(format!(
                "Output voltage {} is not below input voltage {}; a buck converter requires Vout < Vin",
                format_value(Some(vout), OutputVoltage.unit()),
                format_value(Some(vin), InputVoltage.unit()),
            ));
        }
    }

    for param in STRICTLY_POSITIVE {
        if let Some(value) = params.get(param) {
            if value <= 0.0 {
                result.errors.push(format!(
                    "{} must be greater than zero (got {})",
                    param.label(),
                    format_value(Some(value), param.unit()),
                ));
            }
        }
    }

    for param in RIPPLE_RATIOS {
        if let Some(ratio) = params.get(param) {
            if !(ratio > 0.0 && ratio <= 1.0) {
                result.warnings.push(format!(
                    "{} {} is outside the range (0 %, 100 %]",
                    param.label(),
                    format_value(Some(ratio), param.unit()),
                ));
            }
        }
    }

    debug!(
        errors = result.errors.len(),
        warnings = result.warnings.len(),
        "validation finished"
    );
    result
}
