//! Sampling and quantization (analog → digital)
//!
//! PCM maps each sample onto one of 256 levels spanning the
//! observed range of the input. Delta modulation sends a single
//! bit per sample *difference*: `1` for a non-negative step and
//! `0` for a negative one. There is no symbol for the first
//! sample, which is the reference.
//!
//! Delta reconstruction comes in two flavors:
//!
//! 1. Exact magnitude (the default). The receiver integrates
//!    from the first sample, moving by the true magnitude of
//!    each difference in the direction of its bit. This
//!    re-derives the original samples.
//!
//! 2. Fixed step. The encoder tracks a staircase which moves
//!    by a constant `step` toward the input, and the receiver
//!    integrates the same staircase. This is classic delta
//!    modulation, with its slope overload and granular noise.
//!
//! "Adaptive" delta modulation uses the same rules as plain
//! delta modulation. The step size is not adapted.

use log::debug;

use crate::mode::Sampling;

/// Number of PCM quantization levels
pub const PCM_LEVELS: usize = 256;

// largest PCM level
const PCM_MAX_LEVEL: f64 = (PCM_LEVELS - 1) as f64;

/// Output of a sampling codec
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Quantized {
    /// Digital representation: PCM levels or delta bits
    pub encoded: Vec<f64>,

    /// Receiver's reconstruction of the input samples
    pub reconstructed: Vec<f64>,
}

/// Analog-to-digital converter
///
/// A `Sampler` is plain data: every call works on its own
/// copies of the sequences.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct Sampler {
    delta_step: Option<f64>,
}

impl Sampler {
    /// New sampler
    ///
    /// If `delta_step` is `Some`, delta modulation uses a fixed
    /// quantization step of that size. Otherwise, delta
    /// reconstruction preserves the true magnitude of every
    /// difference. Non-positive or non-finite steps are
    /// ignored.
    pub fn new(delta_step: Option<f64>) -> Self {
        Self {
            delta_step: delta_step.filter(|step| step.is_finite() && *step > 0.0),
        }
    }

    /// Fixed delta step, if any
    pub fn delta_step(&self) -> Option<f64> {
        self.delta_step
    }

    /// Encode samples and reconstruct them
    ///
    /// An empty input produces an empty output.
    ///
    /// ```
    /// use phylayer::{Sampler, Sampling};
    ///
    /// let out = Sampler::default().convert(&Sampling::Delta, &[1.0, 1.5, 1.2]);
    /// assert_eq!(vec![1.0, 0.0], out.encoded);
    /// assert_eq!(vec![1.0, 1.5, 1.2], out.reconstructed);
    /// ```
    pub fn convert(&self, scheme: &Sampling, samples: &[f64]) -> Quantized {
        if samples.is_empty() {
            return Quantized::default();
        }

        match scheme {
            Sampling::Pcm => pcm(samples),
            Sampling::Delta | Sampling::AdaptiveDelta => match self.delta_step {
                Some(step) => delta_fixed_step(samples, step),
                None => delta_exact(samples),
            },
            Sampling::Unknown(tag) => {
                debug!("sampling: unknown scheme \"{}\": passing samples through", tag);
                Quantized {
                    encoded: samples.to_vec(),
                    reconstructed: samples.to_vec(),
                }
            }
        }
    }
}

// Quantize to PCM levels over the observed range
//
// Arithmetic is done on half-scale values so that the range of
// any finite input is itself finite.
fn pcm(samples: &[f64]) -> Quantized {
    let (half_min, half_range) = half_span(samples);

    let encoded: Vec<f64> = samples
        .iter()
        .map(|sa| {
            (((sa / 2.0 - half_min) / half_range) * PCM_MAX_LEVEL)
                .round()
                .clamp(0.0, PCM_MAX_LEVEL)
        })
        .collect();

    let reconstructed = encoded
        .iter()
        .map(|level| (level / PCM_MAX_LEVEL * half_range + half_min) * 2.0)
        .collect();

    Quantized {
        encoded,
        reconstructed,
    }
}

// Sign bits; integrate true difference magnitudes
fn delta_exact(samples: &[f64]) -> Quantized {
    let encoded: Vec<f64> = samples
        .windows(2)
        .map(|pair| step_bit(pair[1] - pair[0]))
        .collect();

    // integrate at half scale, like pcm()
    let half_magnitudes = samples
        .windows(2)
        .map(|pair| (pair[1] / 2.0 - pair[0] / 2.0).abs());
    let reconstructed = std::iter::once(samples[0])
        .chain(
            encoded
                .iter()
                .zip(half_magnitudes)
                .scan(samples[0] / 2.0, |acc, (bit, mag)| {
                    *acc += if *bit > 0.0 { mag } else { -mag };
                    Some(*acc * 2.0)
                }),
        )
        .collect();

    Quantized {
        encoded,
        reconstructed,
    }
}

// Staircase delta modulation with a constant step
fn delta_fixed_step(samples: &[f64], step: f64) -> Quantized {
    let mut encoded = Vec::with_capacity(samples.len() - 1);
    let mut reconstructed = Vec::with_capacity(samples.len());

    let mut approx = samples[0];
    reconstructed.push(approx);
    for sa in &samples[1..] {
        let bit = step_bit(sa - approx);
        approx += if bit > 0.0 { step } else { -step };
        encoded.push(bit);
        reconstructed.push(approx);
    }

    Quantized {
        encoded,
        reconstructed,
    }
}

#[inline]
fn step_bit(diff: f64) -> f64 {
    if diff >= 0.0 {
        1.0
    } else {
        0.0
    }
}

// Half of the minimum and half of the range of the samples
//
// A constant input has a (full) range of one.
fn half_span(samples: &[f64]) -> (f64, f64) {
    let min = samples.iter().copied().fold(f64::INFINITY, f64::min);
    let max = samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let half_range = max / 2.0 - min / 2.0;
    if half_range > 0.0 {
        (min / 2.0, half_range)
    } else {
        (min / 2.0, 0.5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use assert_approx_eq::assert_approx_eq;

    const SAMPLES: &[f64] = &[0.0, 0.25, -1.5, 3.75, 2.0, 2.0, -0.125, 1.0e-3, 10.0];

    #[test]
    fn test_empty() {
        let sampler = Sampler::default();
        for scheme in [
            Sampling::Pcm,
            Sampling::Delta,
            Sampling::AdaptiveDelta,
            Sampling::Unknown("x".to_owned()),
        ] {
            assert_eq!(Quantized::default(), sampler.convert(&scheme, &[]));
        }
    }

    #[test]
    fn test_pcm_bounds() {
        let out = Sampler::default().convert(&Sampling::Pcm, SAMPLES);
        assert_eq!(SAMPLES.len(), out.encoded.len());
        assert_eq!(SAMPLES.len(), out.reconstructed.len());

        let (min, max) = (-1.5, 10.0);
        let err_bound = (max - min) / PCM_MAX_LEVEL;
        for (orig, (level, recon)) in SAMPLES
            .iter()
            .zip(out.encoded.iter().zip(out.reconstructed.iter()))
        {
            assert!((0.0..=255.0).contains(level));
            assert_eq!(level.fract(), 0.0);
            assert!(*recon >= min - 1e-9 && *recon <= max + 1e-9);
            assert!((recon - orig).abs() <= err_bound);
        }

        assert_eq!(0.0, out.encoded[2]);
        assert_eq!(255.0, out.encoded[8]);
        assert_approx_eq!(-1.5, out.reconstructed[2]);
        assert_approx_eq!(10.0, out.reconstructed[8]);
    }

    #[test]
    fn test_pcm_constant_input() {
        let out = Sampler::default().convert(&Sampling::Pcm, &[4.0, 4.0, 4.0]);
        assert_eq!(vec![0.0, 0.0, 0.0], out.encoded);
        assert_eq!(vec![4.0, 4.0, 4.0], out.reconstructed);
    }

    #[test]
    fn test_pcm_full_range() {
        let out = Sampler::default().convert(&Sampling::Pcm, &[-1.0e308, 0.0, 1.0e308]);
        assert_eq!(vec![0.0, 128.0, 255.0], out.encoded);
        assert!(out.reconstructed.iter().all(|sa| sa.is_finite()));
        assert_eq!(-1.0e308, out.reconstructed[0]);
        assert_eq!(1.0e308, out.reconstructed[2]);

        let out = Sampler::default().convert(&Sampling::Pcm, &[f64::MAX, -f64::MAX]);
        assert_eq!(vec![255.0, 0.0], out.encoded);
        assert_eq!(vec![f64::MAX, -f64::MAX], out.reconstructed);
    }

    #[test]
    fn test_delta_full_range() {
        let input = [-1.0e308, 1.0e308, 0.0];
        let out = Sampler::default().convert(&Sampling::Delta, &input);
        assert_eq!(vec![1.0, 0.0], out.encoded);
        assert_eq!(input.as_slice(), out.reconstructed.as_slice());
    }

    #[test]
    fn test_delta_exact() {
        let out = Sampler::default().convert(&Sampling::Delta, &[1.0, 1.5, 1.2]);
        assert_eq!(vec![1.0, 0.0], out.encoded);
        assert_eq!(vec![1.0, 1.5, 1.2], out.reconstructed);

        let out = Sampler::default().convert(&Sampling::AdaptiveDelta, SAMPLES);
        assert_eq!(SAMPLES.len() - 1, out.encoded.len());
        for (orig, recon) in SAMPLES.iter().zip(out.reconstructed.iter()) {
            assert_approx_eq!(orig, recon);
        }

        // equal samples are a non-negative step
        assert_eq!(1.0, out.encoded[4]);
    }

    #[test]
    fn test_delta_single_sample() {
        let out = Sampler::default().convert(&Sampling::Delta, &[2.5]);
        assert!(out.encoded.is_empty());
        assert_eq!(vec![2.5], out.reconstructed);
    }

    #[test]
    fn test_delta_fixed_step() {
        let sampler = Sampler::new(Some(0.5));
        let out = sampler.convert(&Sampling::Delta, &[0.0, 1.0, 1.0, 0.2, -3.0]);
        assert_eq!(vec![1.0, 1.0, 0.0, 0.0], out.encoded);
        assert_eq!(vec![0.0, 0.5, 1.0, 0.5, 0.0], out.reconstructed);

        // adaptive is identical
        assert_eq!(
            out,
            sampler.convert(&Sampling::AdaptiveDelta, &[0.0, 1.0, 1.0, 0.2, -3.0])
        );
    }

    #[test]
    fn test_invalid_step_ignored() {
        assert_eq!(None, Sampler::new(Some(0.0)).delta_step());
        assert_eq!(None, Sampler::new(Some(-1.0)).delta_step());
        assert_eq!(None, Sampler::new(Some(f64::NAN)).delta_step());
        assert_eq!(Some(0.25), Sampler::new(Some(0.25)).delta_step());
    }

    #[test]
    fn test_unknown_passthrough() {
        let out = Sampler::default().convert(&Sampling::Unknown("dpcm".to_owned()), SAMPLES);
        assert_eq!(SAMPLES, out.encoded.as_slice());
        assert_eq!(SAMPLES, out.reconstructed.as_slice());
    }
}
