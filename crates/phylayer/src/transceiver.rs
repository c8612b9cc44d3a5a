//! Transmission dispatch and results

use std::convert::TryFrom;
use std::fmt;

use log::{debug, trace};

use crate::analog::AnalogModulator;
use crate::builder::TransceiverBuilder;
use crate::keying::Modulator;
use crate::metrics::Metrics;
use crate::mode::{
    AnalogModulation, Keying, LineCoding, Sampling, TransmissionMode, UnrecognizedMode,
};
use crate::parse::{parse_bits, parse_samples};
use crate::sampling::Sampler;

/// Run one transmission with the reference settings
///
/// Parses `mode`, then runs
/// [`Transceiver::process()`](struct.Transceiver.html#method.process)
/// with the default settings. Returns `None` if, and only if, the
/// `mode` is not recognized. An unrecognized `algorithm` is never
/// an error: it falls back to passing the input through.
///
/// ```
/// use phylayer::process_transmission;
///
/// let res = process_transmission("digital-to-digital", "manchester", "10").unwrap();
/// assert_eq!(&[0.0, 1.0, 1.0, 0.0], res.encoded());
/// assert_eq!(Some("10"), res.decoded_bits());
///
/// assert!(process_transmission("bogus", "nrz-l", "1010").is_none());
/// ```
pub fn process_transmission(
    mode: &str,
    algorithm: &str,
    input: &str,
) -> Option<TransmissionResult> {
    Transceiver::default().try_process(mode, algorithm, input).ok()
}

/// Line coder, modulator, and sampler
///
/// A `Transceiver` routes each request to the codec for its
/// [mode](enum.TransmissionMode.html). It holds only settings,
/// which are fixed when it is
/// [built](struct.TransceiverBuilder.html). Every call is
/// independent, and a `Transceiver` may be shared freely
/// between threads.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Transceiver {
    modulator: Modulator,
    sampler: Sampler,
    analog: AnalogModulator,
}

impl Transceiver {
    /// Run one transmission
    ///
    /// The `input` is parsed as bits for the digital-input modes
    /// and as numeric samples for the analog-input modes. It is
    /// then encoded with `algorithm`, decoded again, and the
    /// whole exchange is returned. This method does not fail.
    pub fn process(
        &self,
        mode: TransmissionMode,
        algorithm: &str,
        input: &str,
    ) -> TransmissionResult {
        debug!(
            "transceiver: {} with algorithm \"{}\"",
            mode.as_str(),
            algorithm
        );

        let (encoded, recovered, metrics) = match mode {
            TransmissionMode::DigitalToDigital => self.line_code(algorithm, input),
            TransmissionMode::DigitalToAnalog => self.keying(algorithm, input),
            TransmissionMode::AnalogToDigital => self.sampling(algorithm, input),
            TransmissionMode::AnalogToAnalog => self.analog(algorithm, input),
        };

        trace!(
            "transceiver: {} input chars → {} encoded points",
            input.chars().count(),
            encoded.len()
        );

        TransmissionResult {
            mode,
            algorithm: algorithm.to_owned(),
            input: input.to_owned(),
            encoded,
            recovered,
            metrics,
        }
    }

    /// Run one transmission, parsing the mode
    ///
    /// As [`process()`](#method.process), but the `mode` is a
    /// tag like `analog-to-analog`. Fails only if the `mode` is
    /// unrecognized.
    pub fn try_process(
        &self,
        mode: &str,
        algorithm: &str,
        input: &str,
    ) -> Result<TransmissionResult, UnrecognizedMode> {
        let mode = TransmissionMode::try_from(mode)?;
        Ok(self.process(mode, algorithm, input))
    }

    /// Points per bit for digital modulation
    pub fn samples_per_symbol(&self) -> usize {
        self.modulator.samples_per_symbol()
    }

    fn line_code(&self, algorithm: &str, input: &str) -> (Vec<f64>, Recovered, Metrics) {
        let scheme = LineCoding::from(algorithm);
        let bits = parse_bits(input);
        let encoded = scheme.encode(&bits);
        let decoded = scheme.decode(&encoded);
        let metrics = Metrics::line_coding(&scheme, bits.len());
        (encoded, Recovered::digital(&bits, &decoded), metrics)
    }

    fn keying(&self, algorithm: &str, input: &str) -> (Vec<f64>, Recovered, Metrics) {
        let scheme = Keying::from(algorithm);
        let bits = parse_bits(input);
        let encoded = self.modulator.modulate(&scheme, &bits);
        let decoded = self.modulator.demodulate(&scheme, &encoded);
        let metrics = Metrics::keying(&scheme, bits.len());
        (encoded, Recovered::digital(&bits, &decoded), metrics)
    }

    fn sampling(&self, algorithm: &str, input: &str) -> (Vec<f64>, Recovered, Metrics) {
        let scheme = Sampling::from(algorithm);
        let samples = parse_samples(input);
        let metrics = Metrics::sampling(&scheme, samples.len());
        let out = self.sampler.convert(&scheme, &samples);
        let recovered = Recovered::Analog {
            original: samples,
            decoded: out.reconstructed,
            demodulated: None,
        };
        (out.encoded, recovered, metrics)
    }

    fn analog(&self, algorithm: &str, input: &str) -> (Vec<f64>, Recovered, Metrics) {
        let scheme = AnalogModulation::from(algorithm);
        let samples = parse_samples(input);
        let metrics = Metrics::analog(&scheme, samples.len());
        let encoded = self.analog.modulate(&scheme, &samples);
        let decoded = self.analog.demodulate(&scheme, &encoded);
        let demodulated = self.analog.hold(&scheme, &decoded);
        let recovered = Recovered::Analog {
            original: samples,
            decoded,
            demodulated: Some(demodulated),
        };
        (encoded, recovered, metrics)
    }
}

impl Default for Transceiver {
    fn default() -> Self {
        TransceiverBuilder::default().build()
    }
}

impl From<&TransceiverBuilder> for Transceiver {
    fn from(cfg: &TransceiverBuilder) -> Self {
        Self {
            modulator: cfg.modulator(),
            sampler: cfg.sampler(),
            analog: cfg.analog_modulator(),
        }
    }
}

/// Original and recovered data
///
/// Digital-input modes carry bit strings of `0` and `1`.
/// Analog-input modes carry sample sequences.
#[derive(Clone, Debug, PartialEq)]
pub enum Recovered {
    /// Bit strings
    Digital {
        /// Bits as parsed from the input
        original: String,

        /// Bits recovered by the receiver
        decoded: String,
    },

    /// Sample sequences
    Analog {
        /// Samples as parsed from the input
        original: Vec<f64>,

        /// Receiver's estimate of the samples
        decoded: Vec<f64>,

        /// Recovered baseband, aligned to the encoded waveform
        ///
        /// Present for analog modulation only. Each decoded
        /// value is held for the length of its segment.
        demodulated: Option<Vec<f64>>,
    },
}

impl Recovered {
    fn digital(original: &[u8], decoded: &[u8]) -> Self {
        Self::Digital {
            original: bits_to_string(original),
            decoded: bits_to_string(decoded),
        }
    }
}

/// Outcome of one transmission
///
/// Holds the request, the encoded signal "on the wire," the
/// receiver's recovery, and descriptive metrics.
#[derive(Clone, Debug, PartialEq)]
pub struct TransmissionResult {
    mode: TransmissionMode,
    algorithm: String,
    input: String,
    encoded: Vec<f64>,
    recovered: Recovered,
    metrics: Metrics,
}

impl TransmissionResult {
    /// Transmission mode
    pub fn mode(&self) -> TransmissionMode {
        self.mode
    }

    /// Algorithm tag, exactly as requested
    pub fn algorithm(&self) -> &str {
        &self.algorithm
    }

    /// Raw input text
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Encoded signal
    ///
    /// Symbol levels, waveform points, PCM levels, or delta
    /// bits, depending on the mode.
    pub fn encoded(&self) -> &[f64] {
        &self.encoded
    }

    /// Original and recovered data
    pub fn recovered(&self) -> &Recovered {
        &self.recovered
    }

    /// Display metrics
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Original bit string, for digital-input modes
    pub fn original_bits(&self) -> Option<&str> {
        match &self.recovered {
            Recovered::Digital { original, .. } => Some(original.as_str()),
            Recovered::Analog { .. } => None,
        }
    }

    /// Decoded bit string, for digital-input modes
    pub fn decoded_bits(&self) -> Option<&str> {
        match &self.recovered {
            Recovered::Digital { decoded, .. } => Some(decoded.as_str()),
            Recovered::Analog { .. } => None,
        }
    }

    /// Original samples, for analog-input modes
    pub fn original_samples(&self) -> Option<&[f64]> {
        match &self.recovered {
            Recovered::Analog { original, .. } => Some(original.as_slice()),
            Recovered::Digital { .. } => None,
        }
    }

    /// Decoded samples, for analog-input modes
    pub fn decoded_samples(&self) -> Option<&[f64]> {
        match &self.recovered {
            Recovered::Analog { decoded, .. } => Some(decoded.as_slice()),
            Recovered::Digital { .. } => None,
        }
    }

    /// Demodulated baseband, for analog modulation
    pub fn demodulated(&self) -> Option<&[f64]> {
        match &self.recovered {
            Recovered::Analog {
                demodulated: Some(demod),
                ..
            } => Some(demod.as_slice()),
            _ => None,
        }
    }

    /// True if the receiver recovered the input exactly
    ///
    /// For digital-input modes, the bit strings must match. For
    /// analog-input modes, every decoded sample must be within
    /// `tolerance` of its original.
    pub fn is_lossless(&self, tolerance: f64) -> bool {
        match &self.recovered {
            Recovered::Digital { original, decoded } => original == decoded,
            Recovered::Analog {
                original, decoded, ..
            } => {
                original.len() == decoded.len()
                    && original
                        .iter()
                        .zip(decoded.iter())
                        .all(|(a, b)| (a - b).abs() <= tolerance)
            }
        }
    }
}

impl fmt::Display for TransmissionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "mode:      {} ({})", self.mode, self.algorithm)?;
        match &self.recovered {
            Recovered::Digital { original, decoded } => {
                writeln!(f, "original:  {}", original)?;
                writeln!(f, "encoded:   {}", SampleList(&self.encoded))?;
                writeln!(f, "decoded:   {}", decoded)?;
            }
            Recovered::Analog {
                original,
                decoded,
                demodulated,
            } => {
                writeln!(f, "original:  {}", SampleList(original))?;
                writeln!(f, "encoded:   {}", SampleList(&self.encoded))?;
                writeln!(f, "decoded:   {}", SampleList(decoded))?;
                if let Some(demod) = demodulated {
                    writeln!(f, "baseband:  {}", SampleList(demod))?;
                }
            }
        }
        write!(f, "metrics:   {}", self.metrics)
    }
}

// Bits as a string of '0' and '1'
fn bits_to_string(bits: &[u8]) -> String {
    bits.iter()
        .map(|b| if *b != 0 { '1' } else { '0' })
        .collect()
}

// Compact list of samples, like `[1, -0.5, 0.3333]`
struct SampleList<'a>(&'a [f64]);

impl<'a> fmt::Display for SampleList<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, sa) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", compact_float(*sa))?;
        }
        write!(f, "]")
    }
}

// Four decimal places, without trailing zeros or negative zero
fn compact_float(val: f64) -> String {
    let s = format!("{:.4}", val);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_owned()
    } else {
        s.to_owned()
    }
}
