//! Turning user text into a [`ParameterSet`].
//!
//! Front ends hand the core SI values; these helpers do the conversion from
//! what users type. A value is a number with an optional SI prefix and an
//! optional unit symbol matching the parameter:
//!
//! ```text
//! value  = number [prefix] [symbol]
//! number = ['-'] digit+ ['.' digit+] [('e'|'E') ['-'|'+'] digit+]
//! prefix = 'p' | 'n' | 'u' | 'µ' | 'm' | 'k' | 'K' | 'M' | 'G'
//! symbol = 'V' | 'A' | 'Hz' | 'H' | 'F' | '%'
//! ```
//!
//! Ratios (`dutyCycle`, ripple ratios) accept either a fraction (`0.4`) or a
//! percentage (`40%`).

use crate::error::{BuckError, Result};
use crate::params::{Parameter, ParameterSet, UnitKind};

/// Multiplier for an SI prefix, `None` if `prefix` is not one.
pub fn prefix_multiplier(prefix: &str) -> Option<f64> {
    let mult = match prefix {
        "" => 1.0,
        "p" => 1e-12,
        "n" => 1e-9,
        "u" | "µ" | "μ" => 1e-6,
        "m" => 1e-3,
        "k" | "K" => 1e3,
        "M" => 1e6,
        "G" => 1e9,
        _ => return None,
    };
    Some(mult)
}

/// Parse a number string with optional SI prefix suffix (`10k`, `4.7u`).
///
/// Returns `None` for anything that is not a finite number.
pub fn parse_value(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    let (num_str, multiplier) = match text.chars().last() {
        Some(last) if !last.is_ascii_digit() && last != '.' => {
            let head = &text[..text.len() - last.len_utf8()];
            match prefix_multiplier(&text[head.len()..]) {
                Some(mult) => (head, mult),
                None => (text, 1.0),
            }
        }
        _ => (text, 1.0),
    };

    num_str
        .trim()
        .parse::<f64>()
        .ok()
        .map(|v| v * multiplier)
        .filter(|v| v.is_finite())
}

/// Unit symbols accepted for a kind of quantity, with their scale.
fn unit_symbols(kind: UnitKind) -> &'static [(&'static str, f64)] {
    match kind {
        UnitKind::Henry => &[("H", 1.0)],
        UnitKind::Farad => &[("F", 1.0)],
        UnitKind::Hertz => &[("Hz", 1.0), ("hz", 1.0)],
        UnitKind::Volt => &[("V", 1.0)],
        UnitKind::Ampere => &[("A", 1.0)],
        UnitKind::Watt => &[("W", 1.0)],
        UnitKind::Ohm => &[("Ω", 1.0), ("ohm", 1.0)],
        UnitKind::Percent => &[("%", 0.01)],
        UnitKind::Ratio => &[],
    }
}

/// Multiplier that converts a value entered in `unit` into SI base units.
///
/// `unit` is a prefixed symbol such as `"mH"`, `"µF"`, `"kHz"` or `"%"`; an
/// empty string means base units. This mirrors a per-field unit selector.
pub fn unit_multiplier(param: Parameter, unit: &str) -> Result<f64> {
    let unit = unit.trim();
    let invalid = || BuckError::InvalidUnit {
        param: param.name().to_string(),
        unit: unit.to_string(),
    };

    if let Some(mult) = prefix_multiplier(unit) {
        // A bare prefix only makes sense for dimensional quantities
        return if unit.is_empty() || param.unit() != UnitKind::Percent {
            Ok(mult)
        } else {
            Err(invalid())
        };
    }

    for &(symbol, scale) in unit_symbols(param.unit()) {
        if let Some(prefix) = unit.strip_suffix(symbol) {
            if param.unit() == UnitKind::Percent && !prefix.is_empty() {
                return Err(invalid());
            }
            if let Some(mult) = prefix_multiplier(prefix) {
                return Ok(mult * scale);
            }
        }
    }

    Err(invalid())
}

/// The unit picked for one input field, like a unit drop-down beside it.
///
/// ```
/// use buck_core::input::UnitScale;
/// use buck_core::params::Parameter;
///
/// let scale = UnitScale::new(Parameter::Inductance, "mH").unwrap();
/// assert!((scale.apply(4.7) - 4.7e-3).abs() < 1e-15);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitScale {
    param: Parameter,
    multiplier: f64,
}

impl UnitScale {
    /// Scale for `unit` on the field for `param`.
    pub fn new(param: Parameter, unit: &str) -> Result<Self> {
        Ok(Self {
            param,
            multiplier: unit_multiplier(param, unit)?,
        })
    }

    /// Scale for entering `param` in SI base units.
    pub fn base(param: Parameter) -> Self {
        Self {
            param,
            multiplier: 1.0,
        }
    }

    pub fn param(&self) -> Parameter {
        self.param
    }

    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }

    /// Convert a raw field value into SI base units.
    pub fn apply(&self, raw: f64) -> f64 {
        raw * self.multiplier
    }
}

/// Parse a user-entered value for `param` into SI base units.
///
/// ```
/// use buck_core::input::parse_quantity;
/// use buck_core::params::Parameter;
///
/// assert_eq!(parse_quantity(Parameter::SwitchingFrequency, "500kHz").unwrap(), 500e3);
/// assert_eq!(parse_quantity(Parameter::DutyCycle, "40%").unwrap(), 0.4);
/// ```
pub fn parse_quantity(param: Parameter, text: &str) -> Result<f64> {
    let text = text.trim();
    let invalid = || BuckError::invalid_value(param.name(), text);

    // Ratios take a plain fraction or a percentage, never an SI prefix
    let plain = if param.unit() == UnitKind::Percent {
        text.parse::<f64>().ok().filter(|v| v.is_finite())
    } else {
        parse_value(text)
    };
    if let Some(value) = plain {
        return Ok(value);
    }

    // Split "4.7uH" into "4.7" and "uH"
    let split = numeric_prefix_len(text);
    if split == 0 {
        return Err(invalid());
    }
    let (number, unit) = text.split_at(split);
    let number: f64 = number.trim().parse().map_err(|_| invalid())?;
    let multiplier = unit_multiplier(param, unit).map_err(|_| invalid())?;

    let value = number * multiplier;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(BuckError::NonFiniteValue {
            param: param.name().to_string(),
        })
    }
}

/// Byte length of the leading number in `text`, exponent included.
fn numeric_prefix_len(text: &str) -> usize {
    let bytes = text.as_bytes();
    let mut end = 0;
    for (i, c) in text.char_indices() {
        let exponent = matches!(c, 'e' | 'E')
            && i > 0
            && bytes
                .get(i + 1)
                .is_some_and(|b| b.is_ascii_digit() || *b == b'-' || *b == b'+');
        if c.is_ascii_digit() || matches!(c, '.' | '+' | '-') || exponent {
            end = i + c.len_utf8();
        } else {
            break;
        }
    }
    end
}

/// Parse a `name=value` assignment such as `fs=500k` or `L=10uH`.
pub fn parse_assignment(text: &str) -> Result<(Parameter, f64)> {
    let (name, value) = text
        .split_once('=')
        .ok_or_else(|| BuckError::MalformedAssignment {
            text: text.to_string(),
        })?;
    let param: Parameter = name.parse()?;
    let value = parse_quantity(param, value)?;
    Ok((param, value))
}

/// Build a parameter set from `name=value` assignments.
///
/// Fails on the first malformed assignment or repeated parameter.
pub fn parse_assignments<I, S>(assignments: I) -> Result<ParameterSet>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let pairs = assignments
        .into_iter()
        .map(|a| parse_assignment(a.as_ref()))
        .collect::<Result<Vec<_>>>()?;
    ParameterSet::from_assignments(pairs)
}

/// Read a JSON design file with camelCase parameter names.
#[cfg(feature = "cli")]
pub fn read_design_file(path: &std::path::Path) -> Result<ParameterSet> {
    let content = std::fs::read_to_string(path).map_err(|e| BuckError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;
    ParameterSet::from_json(&content)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: Option<f64>, b: Option<f64>) -> bool {
        match (a, b) {
            (Some(x), Some(y)) => (x - y).abs() < x.abs() * 1e-10 + 1e-15,
            (None, None) => true,
            _ => false,
        }
    }

    #[test]
    fn test_parse_value() {
        assert!(approx_eq(parse_value("10k"), Some(10_000.0)));
        assert!(approx_eq(parse_value("100n"), Some(100e-9)));
        assert!(approx_eq(parse_value("4.7u"), Some(4.7e-6)));
        assert!(approx_eq(parse_value("22µ"), Some(22e-6)));
        assert!(approx_eq(parse_value("1M"), Some(1_000_000.0)));
        assert!(approx_eq(parse_value("2.2"), Some(2.2)));
        assert!(approx_eq(parse_value("1e-9"), Some(1e-9)));
        assert!(approx_eq(parse_value("-3.3"), Some(-3.3)));
    }

    #[test]
    fn test_parse_value_rejects_garbage() {
        assert_eq!(parse_value(""), None);
        assert_eq!(parse_value("abc"), None);
        assert_eq!(parse_value("10x"), None);
        assert_eq!(parse_value("NaN"), None);
        assert_eq!(parse_value("inf"), None);
        assert_eq!(parse_value("1e400"), None);
    }

    #[test]
    fn test_parse_quantity_with_units() {
        use Parameter::*;
        assert!(approx_eq(parse_quantity(Inductance, "10uH").ok(), Some(10e-6)));
        assert!(approx_eq(parse_quantity(Inductance, "4.7 mH").ok(), Some(4.7e-3)));
        assert!(approx_eq(parse_quantity(Capacitance, "22µF").ok(), Some(22e-6)));
        assert!(approx_eq(parse_quantity(SwitchingFrequency, "1.2MHz").ok(), Some(1.2e6)));
        assert!(approx_eq(parse_quantity(OutputVoltageRipple, "20mV").ok(), Some(0.02)));
        assert!(approx_eq(parse_quantity(OutputCurrent, "2A").ok(), Some(2.0)));
        assert!(approx_eq(parse_quantity(InputVoltage, "1.2e1V").ok(), Some(12.0)));
        assert!(approx_eq(parse_quantity(CurrentRippleRatio, "30%").ok(), Some(0.3)));
        assert!(approx_eq(parse_quantity(CurrentRippleRatio, "0.3").ok(), Some(0.3)));
    }

    #[test]
    fn test_parse_quantity_rejects_wrong_unit() {
        assert!(matches!(
            parse_quantity(Parameter::Inductance, "10uF"),
            Err(BuckError::InvalidValue { .. })
        ));
        assert!(parse_quantity(Parameter::InputVoltage, "12%").is_err());
        assert!(parse_quantity(Parameter::InputVoltage, "").is_err());
    }

    #[test]
    fn test_unit_multiplier() {
        use Parameter::*;
        assert!(approx_eq(unit_multiplier(Inductance, "mH").ok(), Some(1e-3)));
        assert!(approx_eq(unit_multiplier(Capacitance, "nF").ok(), Some(1e-9)));
        assert!(approx_eq(unit_multiplier(SwitchingFrequency, "kHz").ok(), Some(1e3)));
        assert!(approx_eq(unit_multiplier(InputVoltage, "").ok(), Some(1.0)));
        assert!(approx_eq(unit_multiplier(DutyCycle, "%").ok(), Some(0.01)));
        assert!(unit_multiplier(DutyCycle, "m%").is_err());
        assert!(unit_multiplier(Inductance, "kHz").is_err());
    }

    #[test]
    fn test_ratio_rejects_si_prefix() {
        assert!(matches!(
            parse_quantity(Parameter::DutyCycle, "40m"),
            Err(BuckError::InvalidValue { .. })
        ));
        assert!(parse_quantity(Parameter::CurrentRippleRatio, "3k").is_err());
        assert!(approx_eq(parse_quantity(Parameter::DutyCycle, "0.4").ok(), Some(0.4)));
        assert!(approx_eq(parse_quantity(Parameter::Inductance, "10u").ok(), Some(10e-6)));
    }

    #[test]
    fn test_unit_scale() {
        let scale = UnitScale::new(Parameter::Capacitance, "µF").unwrap();
        assert_eq!(scale.param(), Parameter::Capacitance);
        assert!(approx_eq(Some(scale.apply(22.0)), Some(22e-6)));

        let percent = UnitScale::new(Parameter::VoltageRippleRatio, "%").unwrap();
        assert!(approx_eq(Some(percent.apply(1.0)), Some(0.01)));

        assert_eq!(UnitScale::base(Parameter::InputVoltage).apply(12.0), 12.0);
        assert!(matches!(
            UnitScale::new(Parameter::SwitchingFrequency, "mH"),
            Err(BuckError::InvalidUnit { .. })
        ));
    }

    #[test]
    fn test_parse_assignment() {
        let (param, value) = parse_assignment("fs=500k").unwrap();
        assert_eq!(param, Parameter::SwitchingFrequency);
        assert_eq!(value, 500_000.0);

        assert!(matches!(
            parse_assignment("fs500k"),
            Err(BuckError::MalformedAssignment { .. })
        ));
        assert!(matches!(
            parse_assignment("rload=10"),
            Err(BuckError::UnknownParameter { .. })
        ));
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_read_missing_design_file() {
        let err = read_design_file(std::path::Path::new("/nonexistent/design.json")).unwrap_err();
        assert!(matches!(err, BuckError::FileReadError { .. }));
    }

    #[test]
    fn test_parse_assignments() {
        let set = parse_assignments(["vin=12", "vout=5", "L=10uH"]).unwrap();
        assert_eq!(set.len(), 3);
        assert_eq!(set.get(Parameter::InputVoltage), Some(12.0));

        assert!(matches!(
            parse_assignments(["vin=12", "inputVoltage=24"]),
            Err(BuckError::DuplicateParameter { .. })
        ));
    }
}
