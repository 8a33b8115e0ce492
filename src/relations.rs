//! Steady-state buck converter relationships.
//!
//! Each function returns `None` instead of a non-finite number, so a zero
//! denominator simply means "cannot be computed".
//!
//! Ideal continuous-conduction relations:
//!
//! ```text
//! D      = Vout / Vin
//! ΔIL    = (Vin - Vout) · D / (L · Fs)
//! ΔVout  = ΔIL / (8 · Fs · C)
//! Ipk    = Iout + ΔIL / 2
//! ```

/// `num / den`, or `None` for a zero denominator or non-finite result.
pub fn divide(num: f64, den: f64) -> Option<f64> {
    if den == 0.0 {
        return None;
    }
    finite(num / den)
}

fn finite(x: f64) -> Option<f64> {
    x.is_finite().then_some(x)
}

/// D = Vout / Vin
pub fn duty_cycle(vin: f64, vout: f64) -> Option<f64> {
    divide(vout, vin)
}

/// Vin = Vout / D
pub fn input_voltage(vout: f64, duty: f64) -> Option<f64> {
    divide(vout, duty)
}

/// Vout = Vin · D
pub fn output_voltage(vin: f64, duty: f64) -> Option<f64> {
    finite(vin * duty)
}

/// (Vin − Vout) · D, the numerator shared by the ripple relations.
fn on_time_volts(vin: f64, vout: f64, duty: f64) -> f64 {
    (vin - vout) * duty
}

/// ΔIL = (Vin − Vout) · D / (L · Fs)
pub fn inductor_current_ripple(vin: f64, vout: f64, duty: f64, inductance: f64, fs: f64) -> Option<f64> {
    divide(on_time_volts(vin, vout, duty), inductance * fs)
}

/// L = (Vin − Vout) · D / (ΔIL · Fs)
pub fn inductance(vin: f64, vout: f64, duty: f64, fs: f64, ripple: f64) -> Option<f64> {
    divide(on_time_volts(vin, vout, duty), ripple * fs)
}

/// Fs = (Vin − Vout) · D / (L · ΔIL)
pub fn switching_frequency(vin: f64, vout: f64, duty: f64, inductance: f64, ripple: f64) -> Option<f64> {
    divide(on_time_volts(vin, vout, duty), inductance * ripple)
}

/// ΔVout = ΔIL / (8 · Fs · C)
pub fn output_voltage_ripple(ripple: f64, fs: f64, capacitance: f64) -> Option<f64> {
    divide(ripple, 8.0 * fs * capacitance)
}

/// C = ΔIL / (8 · Fs · ΔVout)
pub fn capacitance(ripple: f64, fs: f64, voltage_ripple: f64) -> Option<f64> {
    divide(ripple, 8.0 * fs * voltage_ripple)
}

/// Ripple relative to its nominal value (ΔVout/Vout or ΔIL/Iout).
pub fn ripple_ratio(ripple: f64, nominal: f64) -> Option<f64> {
    divide(ripple, nominal)
}

/// Iout = ΔIL / (ΔI/I)
pub fn output_current(ripple: f64, ratio: f64) -> Option<f64> {
    divide(ripple, ratio)
}

/// Iin = Iout · D (lossless)
pub fn input_current(iout: f64, duty: f64) -> Option<f64> {
    finite(iout * duty)
}

/// P = V · I
pub fn power(voltage: f64, current: f64) -> Option<f64> {
    finite(voltage * current)
}

/// Ipk = Iout + ΔIL / 2, with a missing ripple counted as zero.
pub fn peak_switch_current(iout: f64, ripple: Option<f64>) -> Option<f64> {
    finite(iout + ripple.unwrap_or(0.0) / 2.0)
}

/// Capacitor ESR from the part of the output ripple the ideal capacitor
/// does not explain.
///
/// Returns `None` when the measured ripple is fully accounted for by the
/// capacitance alone.
pub fn equivalent_series_resistance(voltage_ripple: f64, ripple: f64, capacitance: f64, fs: f64) -> Option<f64> {
    let capacitive = output_voltage_ripple(ripple, fs, capacitance)?;
    let resistive = voltage_ripple - capacitive;
    if resistive > 0.0 {
        divide(resistive, ripple / 2.0)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_divide_by_zero_is_none() {
        assert_eq!(divide(1.0, 0.0), None);
        assert_eq!(divide(1.0, -0.0), None);
        assert_eq!(divide(f64::MAX, 1e-300), None);
        assert_eq!(divide(1.0, 4.0), Some(0.25));
    }

    #[test]
    fn test_ripple_relations_are_inverses() {
        let (vin, vout, fs, l) = (12.0, 5.0, 500e3, 10e-6);
        let d = duty_cycle(vin, vout).unwrap();
        let ripple = inductor_current_ripple(vin, vout, d, l, fs).unwrap();
        assert_relative_eq!(ripple, 7.0 * (5.0 / 12.0) / 5.0, max_relative = 1e-12);
        assert_relative_eq!(inductance(vin, vout, d, fs, ripple).unwrap(), l, max_relative = 1e-12);
        assert_relative_eq!(switching_frequency(vin, vout, d, l, ripple).unwrap(), fs, max_relative = 1e-12);

        let dv = output_voltage_ripple(ripple, fs, 22e-6).unwrap();
        assert_relative_eq!(capacitance(ripple, fs, dv).unwrap(), 22e-6, max_relative = 1e-12);
    }

    #[test]
    fn test_peak_current_defaults_ripple_to_zero() {
        assert_eq!(peak_switch_current(2.0, None), Some(2.0));
        assert_eq!(peak_switch_current(2.0, Some(0.5)), Some(2.25));
    }

    #[test]
    fn test_esr_only_from_excess_ripple() {
        // Ideal capacitor ripple: 0.5 / (8 * 500k * 10µ) = 12.5 mV
        let esr = equivalent_series_resistance(0.0375, 0.5, 10e-6, 500e3).unwrap();
        assert_relative_eq!(esr, 0.025 / 0.25, max_relative = 1e-9);

        assert_eq!(equivalent_series_resistance(0.01, 0.5, 10e-6, 500e3), None);
    }
}
