//! Analog modulation (analog → analog)
//!
//! Each input sample modulates one *segment* of the output
//! waveform, `points` long. Let `i` index the points of a
//! segment and `N = points`.
//!
//! | Scheme | Segment                          | Recovery                              |
//! |--------|----------------------------------|---------------------------------------|
//! | AM     | `s * (1 + 0.5 sin(2π i / N))`    | mean absolute value ÷ 1.5             |
//! | FM     | `sin(2π (2 + abs(s)) i / N)`     | zero crossings ÷ 2, minus 2           |
//! | PM     | `sin(2π 2 i / N + s)`            | carrier phase of the segment          |
//!
//! The recovery rules are approximations. AM recovery reports
//! the mean envelope scaled by the peak modulation factor, so
//! it loses the sign of `s` and reads low. FM recovery is
//! quantized to half-cycles. PM recovery is exact for
//! `abs(s) < π`, beyond which the phase wraps.
//!
//! Unrecognized schemes pass samples through: each segment is
//! the sample itself, one point long.

use log::debug;

use crate::mode::AnalogModulation;
use crate::waveform::{mean_abs, sign_changes, sine_phase, sine_segment, CARRIER_CYCLES};

/// AM modulation index
pub const AM_INDEX: f64 = 0.5;

/// FM rest frequency (cycles per segment)
pub const FM_BASE_CYCLES: f64 = 2.0;

// AM envelope peak factor
const AM_PEAK: f64 = 1.0 + AM_INDEX;

/// Analog modulator
///
/// Plain data: every call works on fresh buffers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AnalogModulator {
    points: usize,
}

impl AnalogModulator {
    /// New modulator with `points` per input sample
    pub fn new(points: usize) -> Self {
        Self {
            points: points.max(1),
        }
    }

    /// Waveform points per input sample
    ///
    /// Unrecognized schemes use one point per sample.
    pub fn segment_len(&self, scheme: &AnalogModulation) -> usize {
        match scheme {
            AnalogModulation::Unknown(_) => 1,
            _ => self.points,
        }
    }

    /// Modulate samples into a waveform
    ///
    /// The output holds `samples.len() * segment_len(scheme)`
    /// points.
    pub fn modulate(&self, scheme: &AnalogModulation, samples: &[f64]) -> Vec<f64> {
        let n = self.points;
        match scheme {
            AnalogModulation::Am => samples
                .iter()
                .flat_map(|sa| {
                    let sa = *sa;
                    sine_segment(n, 1.0, 0.0, AM_INDEX).map(move |m| sa * (1.0 + m))
                })
                .collect(),
            AnalogModulation::Fm => samples
                .iter()
                .flat_map(|sa| sine_segment(n, FM_BASE_CYCLES + sa.abs(), 0.0, 1.0))
                .collect(),
            AnalogModulation::Pm => samples
                .iter()
                .flat_map(|sa| sine_segment(n, CARRIER_CYCLES, *sa, 1.0))
                .collect(),
            AnalogModulation::Unknown(tag) => {
                debug!("analog: unknown scheme \"{}\": passing samples through", tag);
                samples.to_vec()
            }
        }
    }

    /// Recover one value per segment
    ///
    /// Trailing points which do not fill a segment are ignored.
    pub fn demodulate(&self, scheme: &AnalogModulation, signal: &[f64]) -> Vec<f64> {
        let segments = signal.chunks_exact(self.segment_len(scheme));
        match scheme {
            AnalogModulation::Am => segments.map(|seg| mean_abs(seg) / AM_PEAK).collect(),
            AnalogModulation::Fm => segments
                .map(|seg| sign_changes(seg) as f64 / 2.0 - FM_BASE_CYCLES)
                .collect(),
            AnalogModulation::Pm => segments
                .map(|seg| sine_phase(seg, CARRIER_CYCLES))
                .collect(),
            AnalogModulation::Unknown(_) => signal.to_vec(),
        }
    }

    /// Hold recovered values across their segments
    ///
    /// Expands `recovered` so that it lines up point-for-point
    /// with the modulated waveform.
    pub fn hold(&self, scheme: &AnalogModulation, recovered: &[f64]) -> Vec<f64> {
        let len = self.segment_len(scheme);
        recovered
            .iter()
            .flat_map(|val| std::iter::repeat(*val).take(len))
            .collect()
    }
}

impl Default for AnalogModulator {
    fn default() -> Self {
        Self::new(crate::waveform::ANALOG_SAMPLES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use assert_approx_eq::assert_approx_eq;

    const SAMPLES: &[f64] = &[0.0, 0.5, -1.0, 2.0, 3.0];

    fn all_schemes() -> Vec<AnalogModulation> {
        vec![
            AnalogModulation::Am,
            AnalogModulation::Fm,
            AnalogModulation::Pm,
            AnalogModulation::Unknown("ssb".to_owned()),
        ]
    }

    #[test]
    fn test_lengths() {
        let md = AnalogModulator::default();
        for scheme in all_schemes() {
            let signal = md.modulate(&scheme, SAMPLES);
            let seglen = md.segment_len(&scheme);
            assert_eq!(SAMPLES.len() * seglen, signal.len());

            let recovered = md.demodulate(&scheme, &signal);
            assert_eq!(SAMPLES.len(), recovered.len());
            assert_eq!(signal.len(), md.hold(&scheme, &recovered).len());
        }
    }

    #[test]
    fn test_am() {
        let md = AnalogModulator::default();
        let signal = md.modulate(&AnalogModulation::Am, &[2.0]);
        assert_approx_eq!(2.0, signal[0]);
        assert_approx_eq!(3.0, signal[5]);
        assert_approx_eq!(1.0, signal[15]);

        let recovered = md.demodulate(&AnalogModulation::Am, &md.modulate(&AnalogModulation::Am, SAMPLES));
        for (orig, rec) in SAMPLES.iter().zip(recovered.iter()) {
            assert_approx_eq!(orig.abs() / 1.5, rec);
        }
    }

    #[test]
    fn test_fm() {
        let md = AnalogModulator::default();
        let recovered = md.demodulate(&AnalogModulation::Fm, &md.modulate(&AnalogModulation::Fm, SAMPLES));
        for (orig, rec) in SAMPLES.iter().zip(recovered.iter()) {
            assert!((orig.abs() - rec).abs() <= 1.0, "{} vs {}", orig, rec);
        }
    }

    #[test]
    fn test_pm() {
        let md = AnalogModulator::default();
        let samples = [0.0, 0.5, -1.0, 2.0, -3.0];
        let recovered = md.demodulate(&AnalogModulation::Pm, &md.modulate(&AnalogModulation::Pm, &samples));
        for (orig, rec) in samples.iter().zip(recovered.iter()) {
            assert_approx_eq!(orig, rec);
        }
    }

    #[test]
    fn test_unknown_passthrough() {
        let md = AnalogModulator::default();
        let scheme = AnalogModulation::Unknown("qam".to_owned());
        let signal = md.modulate(&scheme, SAMPLES);
        assert_eq!(SAMPLES, signal.as_slice());
        assert_eq!(SAMPLES, md.demodulate(&scheme, &signal).as_slice());
        assert_eq!(SAMPLES, md.hold(&scheme, SAMPLES).as_slice());
    }

    #[test]
    fn test_hold() {
        let md = AnalogModulator::new(3);
        assert_eq!(
            vec![1.0, 1.0, 1.0, -2.0, -2.0, -2.0],
            md.hold(&AnalogModulation::Am, &[1.0, -2.0])
        );
    }
}
