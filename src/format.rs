//! Human readable rendering of quantities with engineering prefixes.
//!
//! Both the validator's messages and any front end go through
//! [`format_value`], so a number always looks the same wherever it appears.

use crate::params::UnitKind;

/// Marker printed for an unknown value.
pub const NOT_AVAILABLE: &str = "N/A";

/// Significant digits shown for every formatted value.
pub const SIGNIFICANT_DIGITS: usize = 4;

/// Prefix bands per unit, largest first: (lower bound, multiplier, suffix).
/// The last band catches everything below the previous bound.
const HENRY: &[(f64, f64, &str)] = &[(1.0, 1.0, "H"), (1e-3, 1e3, "mH"), (0.0, 1e6, "µH")];
const FARAD: &[(f64, f64, &str)] = &[
    (1.0, 1.0, "F"),
    (1e-3, 1e3, "mF"),
    (1e-6, 1e6, "µF"),
    (1e-9, 1e9, "nF"),
    (0.0, 1e12, "pF"),
];
const HERTZ: &[(f64, f64, &str)] = &[(1e6, 1e-6, "MHz"), (1e3, 1e-3, "kHz"), (0.0, 1.0, "Hz")];
const VOLT: &[(f64, f64, &str)] = &[(1.0, 1.0, "V"), (0.0, 1e3, "mV")];
const AMPERE: &[(f64, f64, &str)] = &[(1.0, 1.0, "A"), (0.0, 1e3, "mA")];
const WATT: &[(f64, f64, &str)] = &[(1.0, 1.0, "W"), (0.0, 1e3, "mW")];
const OHM: &[(f64, f64, &str)] = &[(1e6, 1e-6, "MΩ"), (1e3, 1e-3, "kΩ"), (0.0, 1.0, "Ω")];

/// Format `value` for display using a magnitude-appropriate prefix.
///
/// Absent and NaN values render as [`NOT_AVAILABLE`]. Exact zero is shown in
/// the base unit.
///
/// ```
/// use buck_core::format::format_value;
/// use buck_core::params::UnitKind;
///
/// assert_eq!(format_value(Some(500_000.0), UnitKind::Hertz), "500.0 kHz");
/// assert_eq!(format_value(Some(0.41666), UnitKind::Percent), "41.67 %");
/// assert_eq!(format_value(None, UnitKind::Volt), "N/A");
/// ```
pub fn format_value(value: Option<f64>, unit: UnitKind) -> String {
    let value = match value {
        Some(v) if v.is_finite() => v,
        _ => return NOT_AVAILABLE.to_string(),
    };

    let bands = match unit {
        UnitKind::Henry => HENRY,
        UnitKind::Farad => FARAD,
        UnitKind::Hertz => HERTZ,
        UnitKind::Volt => VOLT,
        UnitKind::Ampere => AMPERE,
        UnitKind::Watt => WATT,
        UnitKind::Ohm => OHM,
        UnitKind::Percent => {
            return format!("{} %", significant(value * 100.0, SIGNIFICANT_DIGITS));
        }
        UnitKind::Ratio => return significant(value, SIGNIFICANT_DIGITS),
    };

    if value == 0.0 {
        let base = base_symbol(unit);
        return format!("{} {}", significant(0.0, SIGNIFICANT_DIGITS), base);
    }

    // Pick the band after rounding so 0.99999 V reads 1.000 V, not 1000 mV
    let magnitude = round_significant(value, SIGNIFICANT_DIGITS).abs();
    let (_, multiplier, suffix) = bands
        .iter()
        .find(|(lower, _, _)| magnitude >= *lower)
        .copied()
        .unwrap_or(bands[bands.len() - 1]);

    format!("{} {}", significant(value * multiplier, SIGNIFICANT_DIGITS), suffix)
}

/// Round `x` to `digits` significant digits.
fn round_significant(x: f64, digits: usize) -> f64 {
    format!("{:.*e}", digits.max(1) - 1, x)
        .parse()
        .unwrap_or(x)
}

/// Render `x` with `digits` significant digits in plain decimal notation.
///
/// Digits left of the decimal point are rounded too: `12345.6` becomes `12350`.
fn significant(x: f64, digits: usize) -> String {
    let digits = digits.max(1);
    if x == 0.0 {
        return format!("{:.*}", digits - 1, 0.0);
    }

    // Let the scientific formatter do the rounding so 9.99995 lands on 10.00
    let sci = format!("{:.*e}", digits - 1, x);
    let Some((_, exponent)) = sci.rsplit_once('e') else {
        return sci;
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let rounded: f64 = sci.parse().unwrap_or(x);
    let decimals = (digits as i32 - 1 - exponent).max(0) as usize;
    format!("{:.*}", decimals, rounded)
}

fn base_symbol(unit: UnitKind) -> &'static str {
    match unit {
        UnitKind::Henry => "H",
        UnitKind::Farad => "F",
        UnitKind::Hertz => "Hz",
        UnitKind::Volt => "V",
        UnitKind::Ampere => "A",
        UnitKind::Watt => "W",
        UnitKind::Ohm => "Ω",
        UnitKind::Percent => "%",
        UnitKind::Ratio => "",
    }
}
