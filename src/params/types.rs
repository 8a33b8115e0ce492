//! Quantity identifiers and unit kinds.

use std::fmt;
use std::str::FromStr;

use crate::error::BuckError;

/// How a quantity is rendered by [`format_value`](crate::format::format_value).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnitKind {
    /// Henries (H, mH, µH)
    Henry,
    /// Farads (F, mF, µF, nF, pF)
    Farad,
    /// Hertz (Hz, kHz, MHz)
    Hertz,
    /// Volts (V, mV)
    Volt,
    /// Amperes (A, mA)
    Ampere,
    /// Watts (W, mW)
    Watt,
    /// Ohms (Ω, kΩ, MΩ)
    Ohm,
    /// A ratio shown as a percentage
    Percent,
    /// A raw dimensionless number
    Ratio,
}

impl UnitKind {
    /// Parse the short unit tag used by front ends (`"H"`, `"F"`, `"%"`, ...).
    ///
    /// Anything unrecognized falls back to [`UnitKind::Ratio`], which prints
    /// the raw value.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "H" => UnitKind::Henry,
            "F" => UnitKind::Farad,
            "Hz" => UnitKind::Hertz,
            "V" => UnitKind::Volt,
            "A" => UnitKind::Ampere,
            "W" => UnitKind::Watt,
            "Ω" | "ohm" | "Ohm" => UnitKind::Ohm,
            "%" => UnitKind::Percent,
            _ => UnitKind::Ratio,
        }
    }
}

/// One of the primary buck converter quantities a user may supply.
///
/// All values are in SI base units; ratios are dimensionless.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Parameter {
    InputVoltage,
    OutputVoltage,
    OutputCurrent,
    SwitchingFrequency,
    Inductance,
    Capacitance,
    InductorCurrentRipple,
    OutputVoltageRipple,
    DutyCycle,
    VoltageRippleRatio,
    CurrentRippleRatio,
}

impl Parameter {
    /// Every parameter, in canonical order.
    pub const ALL: [Parameter; 11] = [
        Parameter::InputVoltage,
        Parameter::OutputVoltage,
        Parameter::OutputCurrent,
        Parameter::SwitchingFrequency,
        Parameter::Inductance,
        Parameter::Capacitance,
        Parameter::InductorCurrentRipple,
        Parameter::OutputVoltageRipple,
        Parameter::DutyCycle,
        Parameter::VoltageRippleRatio,
        Parameter::CurrentRippleRatio,
    ];

    /// Canonical camelCase name, also used as the JSON key.
    pub fn name(self) -> &'static str {
        match self {
            Parameter::InputVoltage => "inputVoltage",
            Parameter::OutputVoltage => "outputVoltage",
            Parameter::OutputCurrent => "outputCurrent",
            Parameter::SwitchingFrequency => "switchingFrequency",
            Parameter::Inductance => "inductance",
            Parameter::Capacitance => "capacitance",
            Parameter::InductorCurrentRipple => "inductorCurrentRipple",
            Parameter::OutputVoltageRipple => "outputVoltageRipple",
            Parameter::DutyCycle => "dutyCycle",
            Parameter::VoltageRippleRatio => "voltageRippleRatio",
            Parameter::CurrentRippleRatio => "currentRippleRatio",
        }
    }

    /// Short engineering symbol used in validation messages.
    pub fn symbol(self) -> &'static str {
        match self {
            Parameter::InputVoltage => "Vin",
            Parameter::OutputVoltage => "Vout",
            Parameter::OutputCurrent => "Iout",
            Parameter::SwitchingFrequency => "Fs",
            Parameter::Inductance => "L",
            Parameter::Capacitance => "C",
            Parameter::InductorCurrentRipple => "ΔIL",
            Parameter::OutputVoltageRipple => "ΔVout",
            Parameter::DutyCycle => "D",
            Parameter::VoltageRippleRatio => "ΔV/V",
            Parameter::CurrentRippleRatio => "ΔI/I",
        }
    }

    /// Human readable label.
    pub fn label(self) -> &'static str {
        match self {
            Parameter::InputVoltage => "Input voltage",
            Parameter::OutputVoltage => "Output voltage",
            Parameter::OutputCurrent => "Output current",
            Parameter::SwitchingFrequency => "Switching frequency",
            Parameter::Inductance => "Inductance",
            Parameter::Capacitance => "Capacitance",
            Parameter::InductorCurrentRipple => "Inductor current ripple",
            Parameter::OutputVoltageRipple => "Output voltage ripple",
            Parameter::DutyCycle => "Duty cycle",
            Parameter::VoltageRippleRatio => "Voltage ripple ratio",
            Parameter::CurrentRippleRatio => "Current ripple ratio",
        }
    }

    /// Unit kind used when formatting a value of this parameter.
    pub fn unit(self) -> UnitKind {
        match self {
            Parameter::InputVoltage | Parameter::OutputVoltage | Parameter::OutputVoltageRipple => {
                UnitKind::Volt
            }
            Parameter::OutputCurrent | Parameter::InductorCurrentRipple => UnitKind::Ampere,
            Parameter::SwitchingFrequency => UnitKind::Hertz,
            Parameter::Inductance => UnitKind::Henry,
            Parameter::Capacitance => UnitKind::Farad,
            Parameter::DutyCycle
            | Parameter::VoltageRippleRatio
            | Parameter::CurrentRippleRatio => UnitKind::Percent,
        }
    }

    /// Position in [`Parameter::ALL`].
    pub(crate) fn index(self) -> usize {
        self as usize
    }

    /// Look up a parameter by name.
    ///
    /// Accepts the camelCase name, the snake_case name and the short aliases
    /// `vin, vout, iout, fs, l, c, dil, dv, d, dvv, dii`, ignoring case.
    pub fn from_name(name: &str) -> Option<Parameter> {
        let key = name.trim().to_ascii_lowercase().replace(['_', '-'], "");
        let param = match key.as_str() {
            "inputvoltage" | "vin" => Parameter::InputVoltage,
            "outputvoltage" | "vout" => Parameter::OutputVoltage,
            "outputcurrent" | "iout" => Parameter::OutputCurrent,
            "switchingfrequency" | "fs" | "fsw" => Parameter::SwitchingFrequency,
            "inductance" | "l" => Parameter::Inductance,
            "capacitance" | "c" => Parameter::Capacitance,
            "inductorcurrentripple" | "dil" => Parameter::InductorCurrentRipple,
            "outputvoltageripple" | "dv" | "dvout" => Parameter::OutputVoltageRipple,
            "dutycycle" | "d" => Parameter::DutyCycle,
            "voltagerippleratio" | "dvv" => Parameter::VoltageRippleRatio,
            "currentrippleratio" | "dii" => Parameter::CurrentRippleRatio,
            _ => return None,
        };
        Some(param)
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Parameter {
    type Err = BuckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Parameter::from_name(s).ok_or_else(|| BuckError::unknown_parameter(s))
    }
}

/// A quantity that is only ever computed, never supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DerivedQuantity {
    InputCurrent,
    OutputPower,
    InputPower,
    PeakSwitchCurrent,
    EquivalentSeriesResistance,
}

impl DerivedQuantity {
    /// Every derived quantity, in rule order.
    pub const ALL: [DerivedQuantity; 5] = [
        DerivedQuantity::InputCurrent,
        DerivedQuantity::OutputPower,
        DerivedQuantity::InputPower,
        DerivedQuantity::PeakSwitchCurrent,
        DerivedQuantity::EquivalentSeriesResistance,
    ];

    /// Canonical camelCase name, also used as the JSON key.
    pub fn name(self) -> &'static str {
        match self {
            DerivedQuantity::InputCurrent => "inputCurrent",
            DerivedQuantity::OutputPower => "outputPower",
            DerivedQuantity::InputPower => "inputPower",
            DerivedQuantity::PeakSwitchCurrent => "peakSwitchCurrent",
            DerivedQuantity::EquivalentSeriesResistance => "equivalentSeriesResistance",
        }
    }

    /// Human readable label.
    pub fn label(self) -> &'static str {
        match self {
            DerivedQuantity::InputCurrent => "Input current",
            DerivedQuantity::OutputPower => "Output power",
            DerivedQuantity::InputPower => "Input power",
            DerivedQuantity::PeakSwitchCurrent => "Peak switch current",
            DerivedQuantity::EquivalentSeriesResistance => "Capacitor ESR",
        }
    }

    /// Unit kind used when formatting a value of this quantity.
    pub fn unit(self) -> UnitKind {
        match self {
            DerivedQuantity::InputCurrent | DerivedQuantity::PeakSwitchCurrent => UnitKind::Ampere,
            DerivedQuantity::OutputPower | DerivedQuantity::InputPower => UnitKind::Watt,
            DerivedQuantity::EquivalentSeriesResistance => UnitKind::Ohm,
        }
    }
}

impl fmt::Display for DerivedQuantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
