//! Forward inference of unknown parameters.
//!
//! A fixed, ordered table of rules is evaluated once, top to bottom. A rule
//! fires when its output is unknown and all of its inputs are known; the
//! value it produces is visible to every later rule. Each rule only depends
//! on quantities that earlier rules could have produced, so one pass reaches
//! the fixed point.
//!
//! | # | Computes | From |
//! |---|---|---|
//! | 1 | D | Vin, Vout |
//! | 2 | Vin | Vout, D |
//! | 3 | Vout | Vin, D |
//! | 4 | ΔIL | Vin, Vout, D, L, Fs |
//! | 5 | L | Vin, Vout, D, Fs, ΔIL |
//! | 6 | Fs | Vin, Vout, D, L, ΔIL |
//! | 7 | ΔVout | ΔIL, Fs, C |
//! | 8 | C | ΔIL, Fs, ΔVout |
//! | 9 | ΔV/V | ΔVout, Vout |
//! | 10 | ΔI/I | ΔIL, Iout |
//! | 11 | Iout | ΔIL, ΔI/I |
//!
//! After the primary rules, the derived-only outputs are computed from the
//! completed set: input current, output and input power, peak switch current
//! and capacitor ESR.
//!
//! A rule whose formula would divide by zero or overflow does not fire.

use tracing::{debug, trace};

use crate::params::{DerivedQuantity, DerivedValues, Parameter, ParameterSet};
use crate::relations;

use Parameter::*;

/// A primary inference rule: `output = formula(inputs)`.
struct Rule {
    output: Parameter,
    inputs: &'static [Parameter],
    formula: fn(&[f64]) -> Option<f64>,
}

const RULES: [Rule; 11] = [
    Rule {
        output: DutyCycle,
        inputs: &[InputVoltage, OutputVoltage],
        formula: |v| relations::duty_cycle(v[0], v[1]),
    },
    Rule {
        output: InputVoltage,
        inputs: &[OutputVoltage, DutyCycle],
        formula: |v| relations::input_voltage(v[0], v[1]),
    },
    Rule {
        output: OutputVoltage,
        inputs: &[InputVoltage, DutyCycle],
        formula: |v| relations::output_voltage(v[0], v[1]),
    },
    Rule {
        output: InductorCurrentRipple,
        inputs: &[InputVoltage, OutputVoltage, DutyCycle, Inductance, SwitchingFrequency],
        formula: |v| relations::inductor_current_ripple(v[0], v[1], v[2], v[3], v[4]),
    },
    Rule {
        output: Inductance,
        inputs: &[InputVoltage, OutputVoltage, DutyCycle, SwitchingFrequency, InductorCurrentRipple],
        formula: |v| relations::inductance(v[0], v[1], v[2], v[3], v[4]),
    },
    Rule {
        output: SwitchingFrequency,
        inputs: &[InputVoltage, OutputVoltage, DutyCycle, Inductance, InductorCurrentRipple],
        formula: |v| relations::switching_frequency(v[0], v[1], v[2], v[3], v[4]),
    },
    Rule {
        output: OutputVoltageRipple,
        inputs: &[InductorCurrentRipple, SwitchingFrequency, Capacitance],
        formula: |v| relations::output_voltage_ripple(v[0], v[1], v[2]),
    },
    Rule {
        output: Capacitance,
        inputs: &[InductorCurrentRipple, SwitchingFrequency, OutputVoltageRipple],
        formula: |v| relations::capacitance(v[0], v[1], v[2]),
    },
    Rule {
        output: VoltageRippleRatio,
        inputs: &[OutputVoltageRipple, OutputVoltage],
        formula: |v| relations::ripple_ratio(v[0], v[1]),
    },
    Rule {
        output: CurrentRippleRatio,
        inputs: &[InductorCurrentRipple, OutputCurrent],
        formula: |v| relations::ripple_ratio(v[0], v[1]),
    },
    Rule {
        output: OutputCurrent,
        inputs: &[InductorCurrentRipple, CurrentRippleRatio],
        formula: |v| relations::output_current(v[0], v[1]),
    },
];

/// A derived-only rule. The formula also sees the completed set, for
/// optional inputs.
struct OutputRule {
    outputs: &'static [DerivedQuantity],
    inputs: &'static [Parameter],
    formula: fn(&[f64], &ParameterSet) -> Option<f64>,
}

const OUTPUT_RULES: [OutputRule; 4] = [
    OutputRule {
        outputs: &[DerivedQuantity::InputCurrent],
        inputs: &[OutputCurrent, DutyCycle],
        formula: |v, _| relations::input_current(v[0], v[1]),
    },
    // Lossless: input power equals output power
    OutputRule {
        outputs: &[DerivedQuantity::OutputPower, DerivedQuantity::InputPower],
        inputs: &[OutputVoltage, OutputCurrent],
        formula: |v, _| relations::power(v[0], v[1]),
    },
    OutputRule {
        outputs: &[DerivedQuantity::PeakSwitchCurrent],
        inputs: &[OutputCurrent, DutyCycle, SwitchingFrequency],
        formula: |v, known| relations::peak_switch_current(v[0], known.get(InductorCurrentRipple)),
    },
    OutputRule {
        outputs: &[DerivedQuantity::EquivalentSeriesResistance],
        inputs: &[OutputVoltageRipple, InductorCurrentRipple, Capacitance, SwitchingFrequency],
        formula: |v, _| relations::equivalent_series_resistance(v[0], v[1], v[2], v[3]),
    },
];

/// Compute every quantity reachable from `params`.
///
/// Supplied values are never echoed back: [`DerivedValues::inferred`] only
/// holds parameters that were unknown on entry. The caller is expected to
/// have run [`validate`](crate::validate::validate) first and to skip this
/// call when it reported errors.
pub fn infer(params: &ParameterSet) -> DerivedValues {
    let mut known = *params;
    let mut inferred = ParameterSet::new();

    for (n, rule) in RULES.iter().enumerate() {
        if known.contains(rule.output) {
            continue;
        }
        let Some(inputs) = known.gather(rule.inputs) else {
            continue;
        };
        match (rule.formula)(&inputs) {
            Some(value) => {
                debug!(rule = n + 1, output = %rule.output, value, "inferred parameter");
                known = known.with(rule.output, value);
                inferred = inferred.with(rule.output, value);
            }
            None => trace!(rule = n + 1, output = %rule.output, "rule undefined for inputs"),
        }
    }

    let mut outputs = [None; 5];
    for rule in &OUTPUT_RULES {
        let Some(inputs) = known.gather(rule.inputs) else {
            continue;
        };
        if let Some(value) = (rule.formula)(&inputs, &known) {
            for &quantity in rule.outputs {
                debug!(output = %quantity, value, "derived quantity");
                outputs[quantity as usize] = Some(value);
            }
        }
    }

    DerivedValues::new(inferred, outputs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn set(pairs: &[(Parameter, f64)]) -> ParameterSet {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_reference_scenario() {
        let params = set(&[
            (InputVoltage, 12.0),
            (OutputVoltage, 5.0),
            (SwitchingFrequency, 500_000.0),
            (Inductance, 0.00001),
        ]);
        let derived = infer(&params);

        let d = derived.parameter(DutyCycle).unwrap();
        assert_relative_eq!(d, 0.416_666_666_666_666_7, max_relative = 1e-12);
        let ripple = derived.parameter(InductorCurrentRipple).unwrap();
        assert_relative_eq!(ripple, 0.583_333_333_333_333_4, max_relative = 1e-12);

        // Supplied values are not echoed back
        assert_eq!(derived.parameter(InputVoltage), None);
        assert_eq!(derived.parameter(Inductance), None);

        // No current or capacitance: nothing else is reachable
        assert_eq!(derived.inferred().len(), 2);
        assert_eq!(derived.get(DerivedQuantity::OutputPower), None);
        assert_eq!(derived.get(DerivedQuantity::PeakSwitchCurrent), None);
    }

    #[test]
    fn test_zero_ratio_does_not_produce_infinite_current() {
        let params = set(&[(InductorCurrentRipple, 0.5), (CurrentRippleRatio, 0.0)]);
        let derived = infer(&params);
        assert_eq!(derived.parameter(OutputCurrent), None);
        assert!(derived.is_empty());
    }

    #[test]
    fn test_zero_input_voltage_does_not_fire_duty_rule() {
        let derived = infer(&set(&[(InputVoltage, 0.0), (OutputVoltage, 5.0)]));
        assert_eq!(derived.parameter(DutyCycle), None);
    }

    #[test]
    fn test_input_voltage_from_duty_cycle() {
        let derived = infer(&set(&[(OutputVoltage, 3.3), (DutyCycle, 0.275)]));
        assert_relative_eq!(derived.parameter(InputVoltage).unwrap(), 12.0, max_relative = 1e-12);

        let derived = infer(&set(&[(OutputVoltage, 3.3), (DutyCycle, 0.0)]));
        assert_eq!(derived.parameter(InputVoltage), None);
    }

    #[test]
    fn test_output_voltage_from_duty_cycle() {
        let derived = infer(&set(&[(InputVoltage, 24.0), (DutyCycle, 0.5)]));
        assert_relative_eq!(derived.parameter(OutputVoltage).unwrap(), 12.0);
    }

    #[test]
    fn test_inductance_and_capacitance_from_ripple_targets() {
        let params = set(&[
            (InputVoltage, 12.0),
            (OutputVoltage, 5.0),
            (OutputCurrent, 2.0),
            (SwitchingFrequency, 500e3),
            (InductorCurrentRipple, 0.6),
            (OutputVoltageRipple, 0.01),
        ]);
        let derived = infer(&params);

        let d = 5.0 / 12.0;
        assert_relative_eq!(
            derived.parameter(Inductance).unwrap(),
            7.0 * d / (0.6 * 500e3),
            max_relative = 1e-12
        );
        assert_relative_eq!(
            derived.parameter(Capacitance).unwrap(),
            0.6 / (8.0 * 500e3 * 0.01),
            max_relative = 1e-12
        );
        assert_relative_eq!(derived.parameter(VoltageRippleRatio).unwrap(), 0.002, max_relative = 1e-12);
        assert_relative_eq!(derived.parameter(CurrentRippleRatio).unwrap(), 0.3, max_relative = 1e-12);
        assert_eq!(derived.parameter(SwitchingFrequency), None);
    }

    #[test]
    fn test_switching_frequency_from_inductor() {
        let params = set(&[
            (InputVoltage, 12.0),
            (OutputVoltage, 5.0),
            (Inductance, 10e-6),
            (InductorCurrentRipple, 7.0 * (5.0 / 12.0) / 5.0),
        ]);
        let derived = infer(&params);
        assert_relative_eq!(derived.parameter(SwitchingFrequency).unwrap(), 500e3, max_relative = 1e-9);
    }

    #[test]
    fn test_output_current_from_ratio() {
        let derived = infer(&set(&[(InductorCurrentRipple, 0.6), (CurrentRippleRatio, 0.3)]));
        assert_relative_eq!(derived.parameter(OutputCurrent).unwrap(), 2.0, max_relative = 1e-12);
    }

    #[test]
    fn test_derived_outputs() {
        let params = set(&[
            (InputVoltage, 12.0),
            (OutputVoltage, 5.0),
            (OutputCurrent, 2.0),
            (SwitchingFrequency, 500e3),
            (Inductance, 10e-6),
            (Capacitance, 10e-6),
            (OutputVoltageRipple, 0.03),
        ]);
        let derived = infer(&params);

        let d = 5.0 / 12.0;
        let ripple = 7.0 * d / 5.0;
        assert_relative_eq!(derived.get(DerivedQuantity::InputCurrent).unwrap(), 2.0 * d, max_relative = 1e-12);
        assert_relative_eq!(derived.get(DerivedQuantity::OutputPower).unwrap(), 10.0);
        assert_relative_eq!(derived.get(DerivedQuantity::InputPower).unwrap(), 10.0);
        assert_relative_eq!(
            derived.get(DerivedQuantity::PeakSwitchCurrent).unwrap(),
            2.0 + ripple / 2.0,
            max_relative = 1e-12
        );

        let capacitive = ripple / (8.0 * 500e3 * 10e-6);
        assert_relative_eq!(
            derived.get(DerivedQuantity::EquivalentSeriesResistance).unwrap(),
            (0.03 - capacitive) / (ripple / 2.0),
            max_relative = 1e-9
        );
    }

    #[test]
    fn test_peak_current_without_ripple() {
        let params = set(&[(OutputCurrent, 2.0), (DutyCycle, 0.4), (SwitchingFrequency, 500e3)]);
        let derived = infer(&params);
        assert_eq!(derived.get(DerivedQuantity::PeakSwitchCurrent), Some(2.0));
        assert_relative_eq!(derived.get(DerivedQuantity::InputCurrent).unwrap(), 0.8);
    }

    #[test]
    fn test_esr_omitted_when_capacitor_explains_ripple() {
        let params = set(&[
            (InductorCurrentRipple, 0.5),
            (SwitchingFrequency, 500e3),
            (Capacitance, 10e-6),
            (OutputVoltageRipple, 0.01),
        ]);
        let derived = infer(&params);
        assert_eq!(derived.get(DerivedQuantity::EquivalentSeriesResistance), None);
    }

    #[test]
    fn test_empty_input_computes_nothing() {
        assert!(infer(&ParameterSet::new()).is_empty());
    }

    fn positive() -> impl Strategy<Value = Option<f64>> {
        prop::option::of(1e-6..1e6f64)
    }

    prop_compose! {
        fn partial_design()(
            values in prop::collection::vec(positive(), 11),
            duty in prop::option::of(0.01..0.99f64),
        ) -> ParameterSet {
            let mut set = ParameterSet::new();
            for (param, value) in Parameter::ALL.into_iter().zip(values) {
                set = set.with_opt(param, value);
            }
            set.with_opt(DutyCycle, duty)
        }
    }

    prop_compose! {
        /// A complete design built by applying the forward relations.
        fn consistent_design()(
            vin in 5.0..60.0f64,
            fraction in 0.1..0.9f64,
            fs in 50e3..2e6f64,
            l in 1e-6..100e-6f64,
            voltage_ratio in 0.001..0.1f64,
            current_ratio in 0.05..0.9f64,
        ) -> ParameterSet {
            let vout = vin * fraction;
            let d = vout / vin;
            let dil = (vin - vout) * d / (l * fs);
            let dv = vout * voltage_ratio;
            let c = dil / (8.0 * fs * dv);
            let iout = dil / current_ratio;
            ParameterSet::new()
                .with(InputVoltage, vin)
                .with(OutputVoltage, vout)
                .with(OutputCurrent, iout)
                .with(SwitchingFrequency, fs)
                .with(Inductance, l)
                .with(Capacitance, c)
                .with(InductorCurrentRipple, dil)
                .with(OutputVoltageRipple, dv)
                .with(DutyCycle, d)
                .with(VoltageRippleRatio, dv / vout)
                .with(CurrentRippleRatio, dil / iout)
        }
    }

    proptest! {
        #[test]
        fn prop_single_pass_reaches_fixed_point(params in partial_design()) {
            let first = infer(&params);
            let augmented = params.merge(first.inferred());
            let second = infer(&augmented);
            prop_assert!(second.inferred().is_empty(), "second pass inferred {:?}", second.inferred());
        }

        #[test]
        fn prop_inferred_values_are_finite_and_new(params in partial_design()) {
            let derived = infer(&params);
            for (param, value) in derived.inferred().iter() {
                prop_assert!(value.is_finite());
                prop_assert!(!params.contains(param));
            }
            for entry in derived.entries() {
                prop_assert!(entry.value.is_finite());
            }
        }

        #[test]
        fn prop_consistent_design_validates_clean(params in consistent_design()) {
            let result = crate::validate::validate(&params);
            prop_assert!(result.is_clean(), "{:?}", result);
        }

        #[test]
        fn prop_inference_agrees_with_validation(params in consistent_design()) {
            // Strip the redundant values, infer them back and re-validate
            let reduced = params
                .without(DutyCycle)
                .without(InductorCurrentRipple)
                .without(OutputVoltageRipple)
                .without(VoltageRippleRatio)
                .without(CurrentRippleRatio);
            let completed = reduced.merge(infer(&reduced).inferred());
            for param in Parameter::ALL {
                prop_assert!(completed.contains(param));
            }
            prop_assert!(crate::validate::validate(&completed).is_clean());
        }
    }
}
