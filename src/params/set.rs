//! The immutable set of known design parameters.

use std::fmt;

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::types::Parameter;
use crate::error::{BuckError, Result};

/// JSON keys accepted by [`ParameterSet`]'s `Deserialize` impl.
const FIELD_NAMES: &[&str] = &[
    "inputVoltage",
    "outputVoltage",
    "outputCurrent",
    "switchingFrequency",
    "inductance",
    "capacitance",
    "inductorCurrentRipple",
    "outputVoltageRipple",
    "dutyCycle",
    "voltageRippleRatio",
    "currentRippleRatio",
];

/// Known values for the primary buck converter quantities.
///
/// Every field is either a finite number in SI base units or absent.
/// Values are never mutated in place; [`with`](ParameterSet::with),
/// [`without`](ParameterSet::without) and [`merge`](ParameterSet::merge)
/// return new sets.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ParameterSet {
    values: [Option<f64>; 11],
}

impl ParameterSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a copy with `param` set to `value`.
    ///
    /// Non-finite values are stored as absent.
    #[must_use]
    pub fn with(mut self, param: Parameter, value: f64) -> Self {
        self.values[param.index()] = value.is_finite().then_some(value);
        self
    }

    /// Return a copy with `param` set to `value` if present, absent otherwise.
    #[must_use]
    pub fn with_opt(self, param: Parameter, value: Option<f64>) -> Self {
        match value {
            Some(v) => self.with(param, v),
            None => self.without(param),
        }
    }

    /// Return a copy with `param` removed.
    #[must_use]
    pub fn without(mut self, param: Parameter) -> Self {
        self.values[param.index()] = None;
        self
    }

    /// Get the value of `param`, if known.
    pub fn get(&self, param: Parameter) -> Option<f64> {
        self.values[param.index()]
    }

    /// Check whether `param` is known.
    pub fn contains(&self, param: Parameter) -> bool {
        self.get(param).is_some()
    }

    /// Values of `params` in the given order, or `None` if any is unknown.
    pub fn gather(&self, params: &[Parameter]) -> Option<Vec<f64>> {
        params.iter().map(|&p| self.get(p)).collect()
    }

    /// Return a copy where fields absent here are filled from `other`.
    ///
    /// Values already present in `self` win.
    #[must_use]
    pub fn merge(&self, other: &ParameterSet) -> Self {
        let mut merged = *self;
        for (slot, theirs) in merged.values.iter_mut().zip(other.values) {
            if slot.is_none() {
                *slot = theirs;
            }
        }
        merged
    }

    /// Iterate over the known values in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Parameter, f64)> + '_ {
        Parameter::ALL
            .iter()
            .filter_map(move |&p| self.get(p).map(|v| (p, v)))
    }

    /// Number of known values.
    pub fn len(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }

    /// Check whether no value is known.
    pub fn is_empty(&self) -> bool {
        self.values.iter().all(Option::is_none)
    }

    /// Build a set from `(parameter, value)` pairs.
    ///
    /// Fails if a value is not finite or a parameter appears twice.
    pub fn from_assignments<I>(assignments: I) -> Result<Self>
    where
        I: IntoIterator<Item = (Parameter, f64)>,
    {
        let mut set = Self::new();
        for (param, value) in assignments {
            if !value.is_finite() {
                return Err(BuckError::NonFiniteValue {
                    param: param.name().to_string(),
                });
            }
            if set.contains(param) {
                return Err(BuckError::DuplicateParameter {
                    param: param.name().to_string(),
                });
            }
            set = set.with(param, value);
        }
        Ok(set)
    }

    /// Parse a set from a JSON object with camelCase keys.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl FromIterator<(Parameter, f64)> for ParameterSet {
    /// Collect pairs; later values overwrite earlier ones.
    fn from_iter<I: IntoIterator<Item = (Parameter, f64)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::new(), |set, (p, v)| set.with(p, v))
    }
}

impl Serialize for ParameterSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (param, value) in self.iter() {
            map.serialize_entry(param.name(), &value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ParameterSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(ParameterSetVisitor)
    }
}

struct ParameterSetVisitor;

impl<'de> Visitor<'de> for ParameterSetVisitor {
    type Value = ParameterSet;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an object mapping buck converter parameter names to numbers")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<Self::Value, A::Error> {
        let mut set = ParameterSet::new();
        let mut seen = [false; 11];

        while let Some(key) = access.next_key::<String>()? {
            let param = Parameter::ALL
                .into_iter()
                .find(|p| p.name() == key)
                .ok_or_else(|| <A::Error as de::Error>::unknown_field(&key, FIELD_NAMES))?;
            if seen[param.index()] {
                return Err(de::Error::duplicate_field(param.name()));
            }
            seen[param.index()] = true;

            // `null` means unknown
            if let Some(value) = access.next_value::<Option<f64>>()? {
                if !value.is_finite() {
                    return Err(de::Error::custom(format!(
                        "value for '{}' is not finite",
                        param.name()
                    )));
                }
                set = set.with(param, value);
            }
        }

        Ok(set)
    }
}
