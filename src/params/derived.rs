//! Values produced by the inference engine.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use super::set::ParameterSet;
use super::types::{DerivedQuantity, Parameter, UnitKind};

/// One computed value, ready for display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Entry {
    /// camelCase name
    pub name: &'static str,
    /// Human readable label
    pub label: &'static str,
    /// Value in SI base units
    pub value: f64,
    /// Unit kind for formatting
    pub unit: UnitKind,
}

/// Everything the inference engine computed in one call.
///
/// Holds the primary parameters that were unknown and became computable,
/// plus the pure outputs (power, input current, peak switch current, ESR).
/// Values the caller supplied are never echoed back.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DerivedValues {
    inferred: ParameterSet,
    outputs: [Option<f64>; 5],
}

impl DerivedValues {
    pub(crate) fn new(inferred: ParameterSet, outputs: [Option<f64>; 5]) -> Self {
        Self { inferred, outputs }
    }

    /// Primary parameters newly computed from the inputs.
    pub fn inferred(&self) -> &ParameterSet {
        &self.inferred
    }

    /// Value of a newly inferred primary parameter.
    pub fn parameter(&self, param: Parameter) -> Option<f64> {
        self.inferred.get(param)
    }

    /// Value of a derived-only quantity.
    pub fn get(&self, quantity: DerivedQuantity) -> Option<f64> {
        self.outputs[quantity as usize]
    }

    /// Check whether nothing was computed.
    pub fn is_empty(&self) -> bool {
        self.inferred.is_empty() && self.outputs.iter().all(Option::is_none)
    }

    /// Every computed value: inferred parameters first, then derived outputs.
    pub fn entries(&self) -> Vec<Entry> {
        let params = self.inferred.iter().map(|(p, value)| Entry {
            name: p.name(),
            label: p.label(),
            value,
            unit: p.unit(),
        });
        let outputs = DerivedQuantity::ALL.into_iter().filter_map(|q| {
            self.get(q).map(|value| Entry {
                name: q.name(),
                label: q.label(),
                value,
                unit: q.unit(),
            })
        });
        params.chain(outputs).collect()
    }
}

impl Serialize for DerivedValues {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let entries = self.entries();
        let mut map = serializer.serialize_map(Some(entries.len()))?;
        for entry in &entries {
            map.serialize_entry(entry.name, &entry.value)?;
        }
        map.end()
    }
}
