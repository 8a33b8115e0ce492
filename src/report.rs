//! Text and JSON rendering of a calculation for the CLI frontend.

use std::fmt::Write;

use crate::calculator::Calculation;
use crate::error::Result;
use crate::format::format_value;
use crate::params::{DerivedQuantity, Parameter, UnitKind};

/// A row in the report.
#[derive(Debug, Clone, Copy)]
enum Item {
    Param(Parameter),
    Output(DerivedQuantity),
}

impl Item {
    fn label(self) -> &'static str {
        match self {
            Item::Param(p) => p.label(),
            Item::Output(q) => q.label(),
        }
    }

    fn unit(self) -> UnitKind {
        match self {
            Item::Param(p) => p.unit(),
            Item::Output(q) => q.unit(),
        }
    }
}

/// Report sections and the rows they hold, in display order.
const SECTIONS: &[(&str, &[Item])] = &[
    (
        "Voltages",
        &[
            Item::Param(Parameter::InputVoltage),
            Item::Param(Parameter::OutputVoltage),
        ],
    ),
    (
        "Currents",
        &[
            Item::Param(Parameter::OutputCurrent),
            Item::Output(DerivedQuantity::InputCurrent),
            Item::Output(DerivedQuantity::PeakSwitchCurrent),
        ],
    ),
    (
        "Switching",
        &[
            Item::Param(Parameter::SwitchingFrequency),
            Item::Param(Parameter::DutyCycle),
        ],
    ),
    (
        "Passive Components",
        &[
            Item::Param(Parameter::Inductance),
            Item::Param(Parameter::Capacitance),
            Item::Output(DerivedQuantity::EquivalentSeriesResistance),
        ],
    ),
    (
        "Ripple",
        &[
            Item::Param(Parameter::InductorCurrentRipple),
            Item::Param(Parameter::OutputVoltageRipple),
            Item::Param(Parameter::VoltageRippleRatio),
            Item::Param(Parameter::CurrentRippleRatio),
        ],
    ),
    (
        "Power",
        &[
            Item::Output(DerivedQuantity::OutputPower),
            Item::Output(DerivedQuantity::InputPower),
        ],
    ),
];

/// Width of the label column.
const LABEL_WIDTH: usize = 26;

/// Render a calculation as plain text.
///
/// Errors and warnings come first. Values are grouped into sections; values
/// the calculator computed are marked `(computed)`. Nothing but the messages
/// is shown when validation failed.
pub fn render_text(calc: &Calculation) -> String {
    let mut out = String::new();

    for error in calc.errors() {
        let _ = writeln!(out, "error: {error}");
    }
    for warning in calc.warnings() {
        let _ = writeln!(out, "warning: {warning}");
    }

    let Some(derived) = &calc.derived else {
        return out;
    };

    if !out.is_empty() {
        out.push('\n');
    }

    for (title, items) in SECTIONS {
        let rows: Vec<(Item, f64, bool)> = items
            .iter()
            .filter_map(|&item| match item {
                Item::Param(p) => calc
                    .inputs
                    .get(p)
                    .map(|v| (item, v, false))
                    .or_else(|| derived.parameter(p).map(|v| (item, v, true))),
                Item::Output(q) => derived.get(q).map(|v| (item, v, true)),
            })
            .collect();
        if rows.is_empty() {
            continue;
        }

        let _ = writeln!(out, "{title}");
        for (item, value, computed) in rows {
            let marker = if computed { "  (computed)" } else { "" };
            let _ = writeln!(
                out,
                "  {:<width$}{}{}",
                item.label(),
                format_value(Some(value), item.unit()),
                marker,
                width = LABEL_WIDTH,
            );
        }
    }

    out
}

/// Render a calculation as pretty-printed JSON.
pub fn render_json(calc: &Calculation) -> Result<String> {
    Ok(serde_json::to_string_pretty(calc)?)
}
