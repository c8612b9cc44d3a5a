//! Descriptive transmission metrics
//!
//! Metrics are display strings computed from the input length
//! `N` and the algorithm. They never feed back into encoding or
//! decoding.
//!
//! | Family              | Bit rate      | Signal levels                        | Bandwidth                                   |
//! |---------------------|---------------|--------------------------------------|---------------------------------------------|
//! | Line coding         | `N × 1000` bps| 3 for AMI, otherwise 2               | `N × 1000` Hz Manchester types, else `N × 500` |
//! | Keying              | `N × 1000` bps| 2                                    | `N × 2000` Hz FSK, else `N × 1000`          |
//! | Sampling            | `N × 8000` bps| 256 PCM, 2 delta, `continuous` other | `N × 4000` Hz                               |
//! | Analog modulation   | `N × 1000` bps| `continuous`                         | AM `N × 2000`, FM `N × 6000`, PM `N × 4000`, other `N × 1000` Hz |

use std::fmt;

use crate::mode::{AnalogModulation, Keying, LineCoding, Sampling};
use crate::sampling::PCM_LEVELS;

/// Bit rate per bit or sample for line coding and keying
pub const DIGITAL_BPS_PER_SYMBOL: usize = 1000;

/// Bit rate per sample for sampling codecs
pub const SAMPLING_BPS_PER_SAMPLE: usize = 8000;

// Signal levels for unquantized output
const CONTINUOUS: &str = "continuous";

/// Transmission metrics
///
/// All fields are preformatted strings, such as `"8000 bps"`,
/// `"256"`, and `"4000 Hz"`.
///
/// ```
/// use phylayer::{Metrics, Sampling};
///
/// let m = Metrics::sampling(&Sampling::Pcm, 0);
/// assert_eq!("0 bps", m.bit_rate);
/// assert_eq!("256", m.signal_levels);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Metrics {
    /// Bit rate, like `"4000 bps"`
    pub bit_rate: String,

    /// Number of distinct signal levels, like `"2"`
    pub signal_levels: String,

    /// Occupied bandwidth, like `"2000 Hz"`
    pub bandwidth: String,
}

impl Metrics {
    /// Metrics for `n` bits of line coding
    pub fn line_coding(scheme: &LineCoding, n: usize) -> Self {
        let levels = match scheme {
            LineCoding::Ami => 3,
            _ => 2,
        };
        let bandwidth = match scheme {
            LineCoding::Manchester | LineCoding::DifferentialManchester => n * 1000,
            _ => n * 500,
        };
        Self::new(n * DIGITAL_BPS_PER_SYMBOL, levels.to_string(), bandwidth)
    }

    /// Metrics for `n` bits of digital modulation
    pub fn keying(scheme: &Keying, n: usize) -> Self {
        let bandwidth = match scheme {
            Keying::Fsk => n * 2000,
            _ => n * 1000,
        };
        Self::new(n * DIGITAL_BPS_PER_SYMBOL, "2".to_owned(), bandwidth)
    }

    /// Metrics for `n` samples of analog-to-digital conversion
    pub fn sampling(scheme: &Sampling, n: usize) -> Self {
        let levels = match scheme {
            Sampling::Pcm => PCM_LEVELS.to_string(),
            Sampling::Delta | Sampling::AdaptiveDelta => "2".to_owned(),
            Sampling::Unknown(_) => CONTINUOUS.to_owned(),
        };
        Self::new(n * SAMPLING_BPS_PER_SAMPLE, levels, n * 4000)
    }

    /// Metrics for `n` samples of analog modulation
    pub fn analog(scheme: &AnalogModulation, n: usize) -> Self {
        let bandwidth = match scheme {
            AnalogModulation::Am => n * 2000,
            AnalogModulation::Fm => n * 6000,
            AnalogModulation::Pm => n * 4000,
            AnalogModulation::Unknown(_) => n * 1000,
        };
        Self::new(n * DIGITAL_BPS_PER_SYMBOL, CONTINUOUS.to_owned(), bandwidth)
    }

    fn new(bit_rate_bps: usize, signal_levels: String, bandwidth_hz: usize) -> Self {
        Self {
            bit_rate: format!("{} bps", bit_rate_bps),
            signal_levels,
            bandwidth: format!("{} Hz", bandwidth_hz),
        }
    }
}

impl fmt::Display for Metrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "bit rate {}, {} signal levels, bandwidth {}",
            self.bit_rate, self.signal_levels, self.bandwidth
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_coding() {
        let m = Metrics::line_coding(&LineCoding::NrzL, 8);
        assert_eq!("8000 bps", m.bit_rate);
        assert_eq!("2", m.signal_levels);
        assert_eq!("4000 Hz", m.bandwidth);

        let m = Metrics::line_coding(&LineCoding::Manchester, 8);
        assert_eq!("8000 Hz", m.bandwidth);

        let m = Metrics::line_coding(&LineCoding::Ami, 3);
        assert_eq!("3", m.signal_levels);
        assert_eq!("1500 Hz", m.bandwidth);
    }

    #[test]
    fn test_keying() {
        let m = Metrics::keying(&Keying::Fsk, 4);
        assert_eq!("4000 bps", m.bit_rate);
        assert_eq!("8000 Hz", m.bandwidth);
        assert_eq!("4000 Hz", Metrics::keying(&Keying::Psk, 4).bandwidth);
    }

    #[test]
    fn test_sampling() {
        let m = Metrics::sampling(&Sampling::Pcm, 3);
        assert_eq!("24000 bps", m.bit_rate);
        assert_eq!("256", m.signal_levels);
        assert_eq!("12000 Hz", m.bandwidth);

        let m = Metrics::sampling(&Sampling::Pcm, 0);
        assert_eq!("0 bps", m.bit_rate);
        assert_eq!("256", m.signal_levels);

        assert_eq!("2", Metrics::sampling(&Sampling::AdaptiveDelta, 3).signal_levels);
        assert_eq!(
            "continuous",
            Metrics::sampling(&Sampling::Unknown("x".to_owned()), 3).signal_levels
        );
    }

    #[test]
    fn test_analog() {
        let m = Metrics::analog(&AnalogModulation::Fm, 2);
        assert_eq!("2000 bps", m.bit_rate);
        assert_eq!("12000 Hz", m.bandwidth);
        assert_eq!("continuous", m.signal_levels);
    }

    #[test]
    fn test_display() {
        assert_eq!(
            "bit rate 2000 bps, 2 signal levels, bandwidth 1000 Hz",
            Metrics::line_coding(&LineCoding::NrzI, 2).to_string()
        );
    }
}
