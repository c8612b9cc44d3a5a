//! Digital modulation (digital → analog)
//!
//! Every bit becomes one *symbol* of `samples_per_symbol`
//! waveform points. Demodulation cuts the waveform into
//! non-overlapping symbol windows and makes one decision per
//! window:
//!
//! * ASK: flat amplitude `1.0` for one, a reduced amplitude for
//!   zero. Decide by mean absolute amplitude against the midpoint
//!   of the two levels.
//! * FSK: mark carrier for one, space carrier for zero. Decide by
//!   counting zero crossings.
//! * PSK: carrier with phase `π` for one, `0` for zero. Decide by
//!   the sign of the correlation with the reference carrier.
//! * QAM: carrier at `1.5×` amplitude for one, `0.5×` for zero.
//!   Decide by mean absolute amplitude against a higher
//!   threshold.
//!
//! Unrecognized schemes hold the bit value flat for each
//! symbol and decide by mean amplitude.

use log::debug;

use crate::mode::Keying;
use crate::waveform::{
    correlate_sine, mean_abs, sign_changes, sine_segment, CARRIER_CYCLES, FSK_MARK_CYCLES,
    FSK_SPACE_CYCLES,
};

/// ASK amplitude for one bits
pub const ASK_MARK_AMPLITUDE: f64 = 1.0;

/// Default ASK amplitude for zero bits
pub const ASK_SPACE_AMPLITUDE: f64 = 0.3;

/// QAM carrier amplitude for one bits
pub const QAM_MARK_AMPLITUDE: f64 = 1.5;

/// QAM carrier amplitude for zero bits
pub const QAM_SPACE_AMPLITUDE: f64 = 0.5;

// Mean-amplitude decision thresholds
const QAM_THRESHOLD: f64 = 0.6;
const FLAT_THRESHOLD: f64 = 0.5;

// A mark symbol crosses zero about 2 * FSK_MARK_CYCLES times,
// and a space about 2 * FSK_SPACE_CYCLES times. Split the
// difference.
const FSK_CROSSING_THRESHOLD: usize = (FSK_MARK_CYCLES + FSK_SPACE_CYCLES) as usize;

/// Digital modulator
///
/// Holds the symbol length and ASK levels. A `Modulator` is
/// plain data: all working state is local to each call.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Modulator {
    samples_per_symbol: usize,
    ask_space_amplitude: f64,
}

impl Modulator {
    /// New modulator
    ///
    /// `samples_per_symbol` is the number of waveform points per
    /// bit. It must be larger than twice the FSK mark frequency
    /// for FSK to be demodulated correctly; the
    /// [builder](struct.TransceiverBuilder.html) enforces this.
    pub fn new(samples_per_symbol: usize, ask_space_amplitude: f64) -> Self {
        Self {
            samples_per_symbol: samples_per_symbol.max(1),
            ask_space_amplitude,
        }
    }

    /// Waveform points per bit
    pub fn samples_per_symbol(&self) -> usize {
        self.samples_per_symbol
    }

    /// Modulate bits into a waveform
    ///
    /// The output always holds exactly
    /// `bits.len() * samples_per_symbol()` points. Any nonzero
    /// bit is a one.
    pub fn modulate(&self, scheme: &Keying, bits: &[u8]) -> Vec<f64> {
        if let Keying::Unknown(tag) = scheme {
            debug!("keying: unknown scheme \"{}\": holding bits flat", tag);
        }

        let mut out = Vec::with_capacity(bits.len() * self.samples_per_symbol);
        for bit in bits.iter().map(|b| *b != 0) {
            out.extend(self.symbol(scheme, bit));
        }
        out
    }

    /// Demodulate a waveform into bits
    ///
    /// Makes one decision per whole symbol window. Trailing
    /// points which do not fill a window are ignored.
    pub fn demodulate(&self, scheme: &Keying, signal: &[f64]) -> Vec<u8> {
        signal
            .chunks_exact(self.samples_per_symbol)
            .map(|window| self.decide(scheme, window) as u8)
            .collect()
    }

    // Midway between the mark and space levels
    fn ask_threshold(&self) -> f64 {
        (ASK_MARK_AMPLITUDE + self.ask_space_amplitude) / 2.0
    }

    // Waveform for one bit
    fn symbol(&self, scheme: &Keying, bit: bool) -> Box<dyn Iterator<Item = f64>> {
        let len = self.samples_per_symbol;
        match scheme {
            Keying::Ask => {
                let amplitude = if bit {
                    ASK_MARK_AMPLITUDE
                } else {
                    self.ask_space_amplitude
                };
                Box::new(std::iter::repeat(amplitude).take(len))
            }
            Keying::Fsk => {
                let cycles = if bit {
                    FSK_MARK_CYCLES
                } else {
                    FSK_SPACE_CYCLES
                };
                Box::new(sine_segment(len, cycles, 0.0, 1.0))
            }
            Keying::Psk => {
                let phase = if bit { std::f64::consts::PI } else { 0.0 };
                Box::new(sine_segment(len, CARRIER_CYCLES, phase, 1.0))
            }
            Keying::Qam => {
                let amplitude = if bit {
                    QAM_MARK_AMPLITUDE
                } else {
                    QAM_SPACE_AMPLITUDE
                };
                Box::new(sine_segment(len, CARRIER_CYCLES, 0.0, amplitude))
            }
            Keying::Unknown(_) => {
                Box::new(std::iter::repeat(bit as u8 as f64).take(len))
            }
        }
    }

    // Decide one symbol window
    fn decide(&self, scheme: &Keying, window: &[f64]) -> bool {
        match scheme {
            Keying::Ask => mean_abs(window) > self.ask_threshold(),
            Keying::Fsk => sign_changes(window) >= FSK_CROSSING_THRESHOLD,
            Keying::Psk => correlate_sine(window, CARRIER_CYCLES) < 0.0,
            Keying::Qam => mean_abs(window) > QAM_THRESHOLD,
            Keying::Unknown(_) => mean_abs(window) > FLAT_THRESHOLD,
        }
    }
}

impl Default for Modulator {
    fn default() -> Self {
        Self::new(crate::waveform::SAMPLES_PER_SYMBOL, ASK_SPACE_AMPLITUDE)
    }
}
