//! Line coding (digital → digital)
//!
//! Each scheme is a small state machine which is run as an
//! explicit fold over the input: a step function maps
//! `(state, input)` to `(next_state, output)`. The state is a
//! single carried level or polarity, and it is created fresh
//! for every call.
//!
//! | Scheme                  | Symbols per bit | Levels        |
//! |-------------------------|-----------------|---------------|
//! | NRZ-L                   | 1               | `0`, `1`      |
//! | NRZ-I                   | 1               | `0`, `1`      |
//! | Manchester              | 2               | `0`, `1`      |
//! | Differential Manchester | 2               | `0`, `1`      |
//! | AMI                     | 1               | `-1`, `0`, `1`|
//!
//! Schemes which decode against a previous level (NRZ-I and
//! Differential Manchester) assume a reference level of `0`
//! before the first symbol. The encoders start from the same
//! level, so every scheme round-trips exactly.
//!
//! AMI alternates polarity within each run of ones. Every run
//! starts at `+1`, so `101` encodes as `[1, 0, 1]` and `111`
//! as `[1, -1, 1]`.

use log::debug;

use crate::mode::LineCoding;

/// Low symbol level
pub const LEVEL_LOW: f64 = 0.0;

/// High symbol level
pub const LEVEL_HIGH: f64 = 1.0;

// Initial reference level for differential schemes
const INITIAL_LEVEL: u8 = 0;

// Polarity of the first one in each run of ones
const AMI_FIRST_POLARITY: f64 = 1.0;

impl LineCoding {
    /// Number of symbols emitted for each bit
    pub fn symbols_per_bit(&self) -> usize {
        match self {
            Self::Manchester | Self::DifferentialManchester => 2,
            _ => 1,
        }
    }

    /// Encode bits into symbol levels
    ///
    /// Any nonzero `bits` entry is treated as a one. The output
    /// holds [`symbols_per_bit()`](#method.symbols_per_bit)
    /// symbols for each input bit.
    ///
    /// ```
    /// use phylayer::LineCoding;
    ///
    /// assert_eq!(vec![1.0, -1.0, 1.0], LineCoding::Ami.encode(&[1, 1, 1]));
    /// assert_eq!(vec![1.0, 0.0, 1.0], LineCoding::Ami.encode(&[1, 0, 1]));
    /// assert_eq!(vec![0.0, 1.0, 1.0, 0.0], LineCoding::Manchester.encode(&[1, 0]));
    /// ```
    pub fn encode(&self, bits: &[u8]) -> Vec<f64> {
        let bits = bits.iter().map(|b| *b != 0);
        match self {
            Self::NrzL => bits.map(|b| level(b as u8)).collect(),
            Self::NrzI => fold(bits, INITIAL_LEVEL, nrzi_encode_step)
                .map(level)
                .collect(),
            Self::Manchester => bits
                .flat_map(|b| {
                    if b {
                        [LEVEL_LOW, LEVEL_HIGH]
                    } else {
                        [LEVEL_HIGH, LEVEL_LOW]
                    }
                })
                .collect(),
            Self::DifferentialManchester => fold(bits, INITIAL_LEVEL, diff_manchester_encode_step)
                .flat_map(|pair| pair.map(level))
                .collect(),
            Self::Ami => fold(bits, AMI_FIRST_POLARITY, ami_encode_step).collect(),
            Self::Unknown(tag) => {
                debug!("linecode: unknown scheme \"{}\": passing bits through", tag);
                bits.map(|b| level(b as u8)).collect()
            }
        }
    }

    /// Decode symbol levels into bits
    ///
    /// Symbols are first sliced to the nearest level. For the
    /// two-symbol schemes, a trailing unpaired symbol is
    /// ignored.
    pub fn decode(&self, symbols: &[f64]) -> Vec<u8> {
        match self {
            Self::NrzL => symbols.iter().map(|sym| slice(*sym)).collect(),
            Self::NrzI => fold(
                symbols.iter().map(|sym| slice(*sym)),
                INITIAL_LEVEL,
                nrzi_decode_step,
            )
            .collect(),
            Self::Manchester => symbols
                .chunks_exact(2)
                .map(|pair| (slice(pair[0]) == 0 && slice(pair[1]) == 1) as u8)
                .collect(),
            Self::DifferentialManchester => fold(
                symbols
                    .chunks_exact(2)
                    .map(|pair| [slice(pair[0]), slice(pair[1])]),
                INITIAL_LEVEL,
                diff_manchester_decode_step,
            )
            .collect(),
            Self::Ami => symbols
                .iter()
                .map(|sym| (sym.round() != 0.0) as u8)
                .collect(),
            Self::Unknown(tag) => {
                debug!("linecode: unknown scheme \"{}\": passing symbols through", tag);
                symbols.iter().map(|sym| slice(*sym)).collect()
            }
        }
    }
}

// Run a step function over `input`, threading its state
fn fold<I, S, O, F>(input: I, init: S, step: F) -> impl Iterator<Item = O>
where
    I: Iterator,
    S: Copy,
    F: Fn(S, I::Item) -> (S, O),
{
    input.scan(init, move |state, item| {
        let (next, out) = step(*state, item);
        *state = next;
        Some(out)
    })
}

// Level flips on a one and holds on a zero
fn nrzi_encode_step(level: u8, bit: bool) -> (u8, u8) {
    let next = if bit { 1 - level } else { level };
    (next, next)
}

// A level change is a one
fn nrzi_decode_step(prev: u8, level: u8) -> (u8, u8) {
    (level, (level != prev) as u8)
}

// Boundary transition on a zero; mid-bit transition always
fn diff_manchester_encode_step(level: u8, bit: bool) -> (u8, [u8; 2]) {
    let start = if bit { level } else { 1 - level };
    let mid = 1 - start;
    (mid, [start, mid])
}

// No boundary transition is a one
fn diff_manchester_decode_step(prev: u8, pair: [u8; 2]) -> (u8, u8) {
    (pair[1], (pair[0] == prev) as u8)
}

// Consecutive ones alternate polarity. A zero is zero volts
// and restarts the run at positive polarity.
fn ami_encode_step(polarity: f64, bit: bool) -> (f64, f64) {
    if bit {
        (-polarity, polarity)
    } else {
        (AMI_FIRST_POLARITY, 0.0)
    }
}

#[inline]
fn level(bit: u8) -> f64 {
    if bit != 0 {
        LEVEL_HIGH
    } else {
        LEVEL_LOW
    }
}

// Slice a symbol to the nearest binary level, clamping
// anything above one to one and anything below zero to zero
#[inline]
fn slice(sym: f64) -> u8 {
    (sym.round() >= 1.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    const PATTERNS: &[&[u8]] = &[
        &[],
        &[0],
        &[1],
        &[1, 0, 1, 1, 0, 0, 1, 0],
        &[0, 0, 0, 0],
        &[1, 1, 1, 1, 1],
        &[0, 1, 0, 1, 0, 1, 1, 1, 0],
    ];

    fn all_schemes() -> Vec<LineCoding> {
        vec![
            LineCoding::NrzL,
            LineCoding::NrzI,
            LineCoding::Manchester,
            LineCoding::DifferentialManchester,
            LineCoding::Ami,
            LineCoding::Unknown("xyz".to_owned()),
        ]
    }

    #[test]
    fn test_roundtrip_and_length() {
        for scheme in all_schemes() {
            for bits in PATTERNS {
                let encoded = scheme.encode(bits);
                assert_eq!(bits.len() * scheme.symbols_per_bit(), encoded.len());
                assert_eq!(*bits, scheme.decode(&encoded).as_slice(), "{:?}", scheme);
            }
        }
    }

    #[test]
    fn test_nrzl() {
        assert_eq!(vec![1.0, 0.0, 1.0], LineCoding::NrzL.encode(&[1, 0, 1]));
        assert_eq!(vec![1u8, 0, 1, 0], LineCoding::NrzL.decode(&[0.9, 0.2, 3.0, -1.0]));
    }

    #[test]
    fn test_nrzi() {
        assert_eq!(
            vec![1.0, 1.0, 0.0, 1.0, 1.0],
            LineCoding::NrzI.encode(&[1, 0, 1, 1, 0])
        );

        // first symbol is compared against a zero reference
        assert_eq!(vec![0u8, 1, 0], LineCoding::NrzI.decode(&[0.0, 1.0, 1.0]));
    }

    #[test]
    fn test_manchester() {
        assert_eq!(
            vec![0.0, 1.0, 1.0, 0.0, 0.0, 1.0],
            LineCoding::Manchester.encode(&[1, 0, 1])
        );

        // trailing half-bit is dropped
        assert_eq!(vec![1u8, 0], LineCoding::Manchester.decode(&[0.0, 1.0, 1.0, 1.0, 0.0]));
    }

    #[test]
    fn test_diff_manchester() {
        // starting from a low reference:
        // 1 → no boundary flip → [0, 1]
        // 0 → boundary flip    → [0, 1]
        // 0 → boundary flip    → [0, 1]
        // 1 → no boundary flip → [1, 0]
        assert_eq!(
            vec![0.0, 1.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0],
            LineCoding::DifferentialManchester.encode(&[1, 0, 0, 1])
        );

        // every bit carries a mid-bit transition
        let encoded = LineCoding::DifferentialManchester.encode(&[1, 1, 0, 1, 0, 0]);
        for pair in encoded.chunks_exact(2) {
            assert_ne!(pair[0], pair[1]);
        }
    }

    #[test]
    fn test_ami() {
        assert_eq!(vec![1.0, -1.0, 1.0], LineCoding::Ami.encode(&[1, 1, 1]));
        assert_eq!(vec![1.0, 0.0, 1.0], LineCoding::Ami.encode(&[1, 0, 1]));
        assert_eq!(
            vec![0.0, 1.0, 0.0, 0.0, 1.0, -1.0],
            LineCoding::Ami.encode(&[0, 1, 0, 0, 1, 1])
        );
        assert_eq!(
            vec![1.0, -1.0, 0.0, 1.0, -1.0, 1.0],
            LineCoding::Ami.encode(&[1, 1, 0, 1, 1, 1])
        );
        assert_eq!(vec![1u8, 0, 1, 1], LineCoding::Ami.decode(&[-1.0, 0.1, 1.0, -2.0]));
    }

    #[test]
    fn test_nonbinary_bits_are_ones() {
        assert_eq!(vec![1.0, 0.0], LineCoding::NrzL.encode(&[7, 0]));
    }

    #[test]
    fn test_isolated_per_call() {
        // carried state must not leak between calls
        let first = LineCoding::Ami.encode(&[1]);
        let second = LineCoding::Ami.encode(&[1]);
        assert_eq!(first, second);

        let first = LineCoding::NrzI.encode(&[1, 1, 1]);
        let second = LineCoding::NrzI.encode(&[1, 1, 1]);
        assert_eq!(first, second);
    }
}
