use crate::analog::AnalogModulator;
use crate::keying::{Modulator, ASK_SPACE_AMPLITUDE};
use crate::sampling::Sampler;
use crate::transceiver::Transceiver;
use crate::waveform::{ANALOG_SAMPLES, SAMPLES_PER_SYMBOL};

/// Builds a [`Transceiver`](struct.Transceiver.html)
///
/// The builder starts from the reference settings, which are
/// also what [`process_transmission()`](fn.process_transmission.html)
/// uses. Every setter clamps its argument to a usable range.
///
/// ```
/// use phylayer::{TransceiverBuilder, TransmissionMode};
///
/// let xcvr = TransceiverBuilder::new()
///     .with_samples_per_symbol(16)    // waveform points per bit
///     .with_ask_space_amplitude(0.1)  // ASK level for zero bits
///     .build();
///
/// let res = xcvr.process(TransmissionMode::DigitalToAnalog, "ask", "101");
/// assert_eq!(48, res.encoded().len());
/// assert_eq!(Some("101"), res.decoded_bits());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct TransceiverBuilder {
    samples_per_symbol: usize,
    analog_samples: usize,
    ask_space_amplitude: f64,
    delta_step: Option<f64>,
}

/// Smallest permitted number of points per analog sample
pub const MIN_ANALOG_SAMPLES: usize = 8;

/// Largest permitted ASK amplitude for zero bits
pub const MAX_ASK_SPACE_AMPLITUDE: f64 = 0.9;

impl TransceiverBuilder {
    /// New transceiver with the reference settings
    pub fn new() -> Self {
        Self {
            samples_per_symbol: SAMPLES_PER_SYMBOL,
            analog_samples: ANALOG_SAMPLES,
            ask_space_amplitude: ASK_SPACE_AMPLITUDE,
            delta_step: None,
        }
    }

    /// Build a transceiver
    pub fn build(&self) -> Transceiver {
        Transceiver::from(self)
    }

    /// Waveform points per bit, for digital modulation
    ///
    /// Values below the default of 10 are raised to 10. FSK
    /// needs more than two points per cycle of its mark
    /// carrier.
    pub fn with_samples_per_symbol(&mut self, samples: usize) -> &mut Self {
        self.samples_per_symbol = usize::max(samples, SAMPLES_PER_SYMBOL);
        self
    }

    /// Waveform points per sample, for analog modulation
    ///
    /// Values below 8 are raised to 8.
    pub fn with_analog_samples(&mut self, samples: usize) -> &mut Self {
        self.analog_samples = usize::max(samples, MIN_ANALOG_SAMPLES);
        self
    }

    /// ASK amplitude for zero bits
    ///
    /// One bits are always sent at amplitude `1.0`. The zero
    /// amplitude is clamped to `[0.0, 0.9]`.
    pub fn with_ask_space_amplitude(&mut self, amplitude: f64) -> &mut Self {
        self.ask_space_amplitude = f64::clamp(amplitude, 0.0, MAX_ASK_SPACE_AMPLITUDE);
        self
    }

    /// Fixed delta modulation step
    ///
    /// With `None` (the default), delta reconstruction keeps the
    /// true magnitude of every sample difference. With
    /// `Some(step)`, delta modulation tracks a staircase of
    /// constant `step`. Non-positive steps are treated as
    /// `None`.
    pub fn with_delta_step(&mut self, step: Option<f64>) -> &mut Self {
        self.delta_step = step.filter(|s| s.is_finite() && *s > 0.0);
        self
    }

    /// Points per bit
    pub fn samples_per_symbol(&self) -> usize {
        self.samples_per_symbol
    }

    /// Points per analog sample
    pub fn analog_samples(&self) -> usize {
        self.analog_samples
    }

    /// ASK amplitude for zero bits
    pub fn ask_space_amplitude(&self) -> f64 {
        self.ask_space_amplitude
    }

    /// Fixed delta step
    pub fn delta_step(&self) -> Option<f64> {
        self.delta_step
    }

    pub(crate) fn modulator(&self) -> Modulator {
        Modulator::new(self.samples_per_symbol, self.ask_space_amplitude)
    }

    pub(crate) fn sampler(&self) -> Sampler {
        Sampler::new(self.delta_step)
    }

    pub(crate) fn analog_modulator(&self) -> AnalogModulator {
        AnalogModulator::new(self.analog_samples)
    }
}

impl Default for TransceiverBuilder {
    fn default() -> Self {
        Self::new()
    }
}
