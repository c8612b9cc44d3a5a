//! Carrier parameters and waveform helpers
//!
//! Segment generators and the per-window measurements shared by
//! the digital and analog modulators. Frequencies are given in
//! *cycles per segment*: a carrier of `2.0` completes two full
//! periods across each symbol, regardless of how many samples
//! the symbol occupies.

use num_complex::Complex;

const TWOPI: f64 = 2.0f64 * std::f64::consts::PI;

/// Carrier frequency for PSK and QAM (cycles per symbol)
pub const CARRIER_CYCLES: f64 = 2.0;

/// FSK mark frequency, sent for one bits (cycles per symbol)
pub const FSK_MARK_CYCLES: f64 = 4.0;

/// FSK space frequency, sent for zero bits (cycles per symbol)
pub const FSK_SPACE_CYCLES: f64 = 2.0;

/// Default samples per digital symbol
pub const SAMPLES_PER_SYMBOL: usize = 10;

/// Default points generated per analog sample
pub const ANALOG_SAMPLES: usize = 20;

/// Sinusoidal segment
///
/// Generates `len` points of
/// `amplitude * sin(2π * cycles * i / len + phase)`.
pub fn sine_segment(
    len: usize,
    cycles: f64,
    phase: f64,
    amplitude: f64,
) -> impl Iterator<Item = f64> {
    let rad_per_sa = TWOPI * cycles / len.max(1) as f64;
    (0..len).map(move |i| amplitude * (rad_per_sa * i as f64 + phase).sin())
}

/// Count sign changes
///
/// Counts adjacent pairs of `window` which lie on opposite
/// sides of zero. Zero itself counts as positive, so tiny
/// rounding residue at a nominal zero crossing cannot add or
/// remove a crossing.
pub fn sign_changes(window: &[f64]) -> usize {
    window
        .windows(2)
        .filter(|pair| (pair[0] >= 0.0) != (pair[1] >= 0.0))
        .count()
}

/// Mean absolute value (zero for an empty window)
pub fn mean_abs(window: &[f64]) -> f64 {
    if window.is_empty() {
        return 0.0;
    }
    window.iter().map(|sa| sa.abs()).sum::<f64>() / window.len() as f64
}

/// Correlate against a reference sinusoid
///
/// Returns the inner product of `window` with a zero-phase,
/// unit-amplitude sine of `cycles` per window.
pub fn correlate_sine(window: &[f64], cycles: f64) -> f64 {
    window
        .iter()
        .zip(sine_segment(window.len(), cycles, 0.0, 1.0))
        .map(|(sa, reference)| sa * reference)
        .sum()
}

/// Estimate the phase offset of a sine segment
///
/// For a `window` of `sin(2π * cycles * i / len + φ)`, returns
/// `φ` wrapped to `(-π, π]`. The window is correlated against a
/// complex cisoid at the carrier frequency, and the phase is the
/// `atan2` of the quadrature sum against the in-phase sum. This
/// is exact when the window holds a whole number of carrier
/// periods and `2 * cycles` is not a multiple of the window
/// length.
pub fn sine_phase(window: &[f64], cycles: f64) -> f64 {
    let rad_per_sa = TWOPI * cycles / window.len().max(1) as f64;
    let sum: Complex<f64> = window
        .iter()
        .enumerate()
        .map(|(i, sa)| Complex::new(0.0, -rad_per_sa * i as f64).exp() * *sa)
        .sum();

    // sin() lags the cisoid by a quarter turn
    wrap_phase(sum.arg() + std::f64::consts::FRAC_PI_2)
}

// Wrap a phase to (-π, π]
fn wrap_phase(phase: f64) -> f64 {
    let wrapped = phase - TWOPI * (phase / TWOPI).round();
    if wrapped <= -std::f64::consts::PI {
        wrapped + TWOPI
    } else {
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn test_sine_segment() {
        let seg: Vec<f64> = sine_segment(4, 1.0, 0.0, 2.0).collect();
        assert_eq!(4, seg.len());
        assert_approx_eq!(seg[0], 0.0);
        assert_approx_eq!(seg[1], 2.0);
        assert_approx_eq!(seg[2], 0.0);
        assert_approx_eq!(seg[3], -2.0);
    }

    #[test]
    fn test_sign_changes() {
        assert_eq!(0, sign_changes(&[]));
        assert_eq!(0, sign_changes(&[1.0]));
        assert_eq!(3, sign_changes(&[1.0, -1.0, 0.0, -0.5]));

        // mark and space carriers at the default symbol length
        let mark: Vec<f64> = sine_segment(SAMPLES_PER_SYMBOL, FSK_MARK_CYCLES, 0.0, 1.0).collect();
        let space: Vec<f64> =
            sine_segment(SAMPLES_PER_SYMBOL, FSK_SPACE_CYCLES, 0.0, 1.0).collect();
        assert_eq!(7, sign_changes(&mark));
        assert_eq!(3, sign_changes(&space));
    }

    #[test]
    fn test_mean_abs() {
        assert_eq!(0.0, mean_abs(&[]));
        assert_approx_eq!(1.0, mean_abs(&[-1.0, 1.0, -1.0]));
    }

    #[test]
    fn test_correlate_sine() {
        let seg: Vec<f64> = sine_segment(10, CARRIER_CYCLES, 0.0, 1.0).collect();
        assert_approx_eq!(5.0, correlate_sine(&seg, CARRIER_CYCLES));

        let inverted: Vec<f64> =
            sine_segment(10, CARRIER_CYCLES, std::f64::consts::PI, 1.0).collect();
        assert_approx_eq!(-5.0, correlate_sine(&inverted, CARRIER_CYCLES));
    }

    #[test]
    fn test_sine_phase() {
        for phase in [-3.0f64, -1.2, 0.0, 0.4, 1.0, 2.5, 3.1] {
            let seg: Vec<f64> = sine_segment(ANALOG_SAMPLES, 2.0, phase, 1.0).collect();
            assert_approx_eq!(phase, sine_phase(&seg, 2.0));
        }
    }

    #[test]
    fn test_wrap_phase() {
        assert_approx_eq!(0.5, wrap_phase(0.5 + TWOPI));
        assert_approx_eq!(std::f64::consts::PI, wrap_phase(-std::f64::consts::PI));
        assert_approx_eq!(-1.0, wrap_phase(-1.0 - 2.0 * TWOPI));
    }
}
