//! # phylayer: Physical-Layer Transformations
//!
//! This crate simulates the four classic conversion families used
//! in data communication. A sequence of bits or sampled analog
//! values is encoded into a transmittable signal, and a receiver
//! recovers the original sequence from that signal.
//!
//! | Mode                 | Algorithms                                                  |
//! |----------------------|-------------------------------------------------------------|
//! | `digital-to-digital` | `nrz-l`, `nrz-i`, `manchester`, `differential-manchester`, `ami` |
//! | `digital-to-analog`  | `ask`, `fsk`, `psk`, `qam`                                  |
//! | `analog-to-digital`  | `pcm`, `delta`, `adaptive-delta`                            |
//! | `analog-to-analog`   | `am`, `fm`, `pm`                                            |
//!
//! ## Disclaimer
//!
//! The algorithms are teaching approximations of the canonical
//! schemes. They are not bit-exact with any hardware standard, and
//! they do not model noise or channel impairments.
//!
//! ## Example
//!
//! The simplest entry point is
//! [`process_transmission()`](fn.process_transmission.html), which
//! takes a mode tag, an algorithm tag, and raw input text:
//!
//! ```
//! use phylayer::{process_transmission, TransmissionMode};
//!
//! let res = process_transmission("digital-to-digital", "ami", "1101")
//!     .expect("mode is valid");
//!
//! assert_eq!(TransmissionMode::DigitalToDigital, res.mode());
//! assert_eq!(&[1.0, -1.0, 0.0, 1.0], res.encoded());
//! assert_eq!(Some("1101"), res.decoded_bits());
//! assert_eq!("4000 bps", res.metrics().bit_rate);
//! ```
//!
//! Analog input is free text containing numbers. Quotation marks
//! are ignored, and anything that is not a number is skipped.
//!
//! ```
//! use phylayer::process_transmission;
//!
//! let res = process_transmission("analog-to-digital", "pcm", "\"0.0\", 0.5, 1e0")
//!     .expect("mode is valid");
//!
//! assert_eq!(&[0.0, 128.0, 255.0], res.encoded());
//! assert_eq!("256", res.metrics().signal_levels);
//! ```
//!
//! Only an unrecognized *mode* is an error. An unrecognized
//! *algorithm* falls back to passing its input through unchanged:
//!
//! ```
//! use phylayer::process_transmission;
//!
//! assert!(process_transmission("bogus", "nrz-l", "1010").is_none());
//!
//! let res = process_transmission("digital-to-digital", "no-such-code", "1010").unwrap();
//! assert_eq!(&[1.0, 0.0, 1.0, 0.0], res.encoded());
//! ```
//!
//! To change waveform lengths or other settings, create a
//! [`Transceiver`](struct.Transceiver.html) with a
//! [`TransceiverBuilder`](struct.TransceiverBuilder.html).
//! Transceivers hold no state between calls and may be shared
//! across threads.
//!
//! The individual codecs are also available directly: see
//! [`LineCoding`](enum.LineCoding.html),
//! [`Modulator`](struct.Modulator.html),
//! [`Sampler`](struct.Sampler.html), and
//! [`AnalogModulator`](struct.AnalogModulator.html).
//!
//! ## Logging
//!
//! This crate logs through the [`log`](https://crates.io/crates/log)
//! facade. Fallbacks to pass-through and discarded input are
//! reported at the `debug` level.

mod analog;
mod builder;
mod keying;
mod linecode;
mod metrics;
mod mode;
mod parse;
mod sampling;
mod transceiver;
mod waveform;

pub use analog::AnalogModulator;
pub use builder::TransceiverBuilder;
pub use keying::Modulator;
pub use linecode::{LEVEL_HIGH, LEVEL_LOW};
pub use metrics::Metrics;
pub use mode::{AnalogModulation, Keying, LineCoding, Sampling, TransmissionMode, UnrecognizedMode};
pub use parse::{parse_bits, parse_samples};
pub use sampling::{Quantized, Sampler, PCM_LEVELS};
pub use transceiver::{process_transmission, Recovered, Transceiver, TransmissionResult};
pub use waveform::{ANALOG_SAMPLES, SAMPLES_PER_SYMBOL};
