//! Orchestration: validate, then infer if the design is consistent.

use serde::Serialize;
use tracing::debug;

use crate::infer::infer;
use crate::params::{DerivedValues, ParameterSet};
use crate::validate::{validate_with, ValidationResult, ValidatorConfig};

/// Outcome of one calculation request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Calculation {
    /// The parameters the request was made with.
    pub inputs: ParameterSet,
    /// Validation errors and warnings.
    #[serde(flatten)]
    pub validation: ValidationResult,
    /// Computed values; `None` when validation reported errors.
    #[serde(rename = "values")]
    pub derived: Option<DerivedValues>,
}

impl Calculation {
    /// Hard validation errors, in check order.
    pub fn errors(&self) -> &[String] {
        &self.validation.errors
    }

    /// Advisory validation warnings, in check order.
    pub fn warnings(&self) -> &[String] {
        &self.validation.warnings
    }

    /// Check whether inference ran.
    pub fn is_computed(&self) -> bool {
        self.derived.is_some()
    }

    /// Supplied values together with the newly inferred primaries.
    pub fn completed(&self) -> ParameterSet {
        match &self.derived {
            Some(derived) => self.inputs.merge(derived.inferred()),
            None => self.inputs,
        }
    }
}

/// Stateless calculator holding the validation tolerances.
///
/// Each call to [`calculate`](Calculator::calculate) is independent; a
/// shared `Calculator` can serve any number of requests.
#[derive(Debug, Clone, Default)]
pub struct Calculator {
    config: ValidatorConfig,
}

impl Calculator {
    /// Create a calculator with the default tolerances.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a calculator with custom tolerances.
    pub fn with_config(config: ValidatorConfig) -> Self {
        Self { config }
    }

    /// The validation tolerances in use.
    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Validate `params` and, if no errors were found, infer everything
    /// reachable from them.
    pub fn calculate(&self, params: &ParameterSet) -> Calculation {
        let validation = validate_with(params, &self.config);

        let derived = if validation.has_errors() {
            debug!(
                errors = validation.errors.len(),
                "inconsistent parameters, skipping inference"
            );
            None
        } else {
            let derived = infer(params);
            debug!(computed = derived.entries().len(), "inference finished");
            Some(derived)
        };

        Calculation {
            inputs: *params,
            validation,
            derived,
        }
    }
}

/// Run a calculation with the default tolerances.
pub fn calculate(params: &ParameterSet) -> Calculation {
    Calculator::new().calculate(params)
}
