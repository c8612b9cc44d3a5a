//! Transmission modes and per-family algorithm tags

use std::convert::TryFrom;
use std::fmt;
use std::str::FromStr;

use strum::EnumMessage;
use thiserror::Error;

/// Conversion family
///
/// The mode selects which codec handles a request. Modes are
/// converted from their kebab-case tags, such as
/// `digital-to-analog`. The CamelCase spelling
/// (`DigitalToAnalog`) is accepted too, in any ASCII case.
///
/// ```
/// # use std::convert::TryFrom;
/// use phylayer::TransmissionMode;
///
/// let mode = TransmissionMode::try_from("analog-to-digital").unwrap();
/// assert_eq!(TransmissionMode::AnalogToDigital, mode);
/// assert_eq!("analog-to-digital", mode.as_str());
/// assert_eq!("Analog to Digital", mode.as_display_str());
///
/// assert!(TransmissionMode::try_from("bogus").is_err());
/// ```
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum_macros::EnumMessage,
    strum_macros::EnumString,
    strum_macros::EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum TransmissionMode {
    /// Line coding: bits to symbol levels
    #[strum(
        serialize = "digital-to-digital",
        serialize = "DigitalToDigital",
        detailed_message = "Digital to Digital"
    )]
    DigitalToDigital,

    /// Keying: bits to a modulated carrier
    #[strum(
        serialize = "digital-to-analog",
        serialize = "DigitalToAnalog",
        detailed_message = "Digital to Analog"
    )]
    DigitalToAnalog,

    /// Sampling and quantization
    #[strum(
        serialize = "analog-to-digital",
        serialize = "AnalogToDigital",
        detailed_message = "Analog to Digital"
    )]
    AnalogToDigital,

    /// Analog modulation of a sample sequence
    #[strum(
        serialize = "analog-to-analog",
        serialize = "AnalogToAnalog",
        detailed_message = "Analog to Analog"
    )]
    AnalogToAnalog,
}

impl TransmissionMode {
    /// Every mode, in display order
    pub const ALL: [TransmissionMode; 4] = [
        Self::DigitalToDigital,
        Self::DigitalToAnalog,
        Self::AnalogToDigital,
        Self::AnalogToAnalog,
    ];

    /// Canonical kebab-case tag
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DigitalToDigital => "digital-to-digital",
            Self::DigitalToAnalog => "digital-to-analog",
            Self::AnalogToDigital => "analog-to-digital",
            Self::AnalogToAnalog => "analog-to-analog",
        }
    }

    /// Human-readable name, like "`Digital to Analog`"
    pub fn as_display_str(&self) -> &'static str {
        self.get_detailed_message().unwrap_or("Unknown")
    }

    /// True if the input to this mode is a bit string
    pub fn is_digital_input(&self) -> bool {
        matches!(self, Self::DigitalToDigital | Self::DigitalToAnalog)
    }

    /// Known algorithm tags for this mode
    pub fn known_algorithms(&self) -> &'static [&'static str] {
        match self {
            Self::DigitalToDigital => LineCoding::KNOWN,
            Self::DigitalToAnalog => Keying::KNOWN,
            Self::AnalogToDigital => Sampling::KNOWN,
            Self::AnalogToAnalog => AnalogModulation::KNOWN,
        }
    }
}

impl TryFrom<&str> for TransmissionMode {
    type Error = UnrecognizedMode;

    /// Convert from a mode tag
    ///
    /// Surrounding whitespace is ignored. Unlike algorithm
    /// tags, an unrecognized mode is an error.
    fn try_from(inp: &str) -> Result<Self, Self::Error> {
        TransmissionMode::from_str(inp.trim()).map_err(|_| UnrecognizedMode(inp.to_owned()))
    }
}

impl AsRef<str> for TransmissionMode {
    fn as_ref(&self) -> &'static str {
        self.as_str()
    }
}

impl fmt::Display for TransmissionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.as_display_str().fmt(f)
    }
}

/// The transmission mode could not be recognized
///
/// Holds the text which failed to parse.
#[derive(Error, Clone, Debug, PartialEq, Eq, Hash)]
#[error("unrecognized transmission mode \"{0}\"")]
pub struct UnrecognizedMode(pub String);

// Shared conversions for the algorithm tag enums
//
// Every family enum has an `Unknown(String)` default
// variant, so conversion from a tag never fails.
macro_rules! algorithm_tag {
    ($name:ident, [$($tag:literal),+ $(,)?]) => {
        impl $name {
            /// Tags of every recognized algorithm in this family
            pub const KNOWN: &'static [&'static str] = &[$($tag),+];

            /// Algorithm tag
            ///
            /// Returns the canonical tag, or the original text
            /// for an unrecognized algorithm.
            pub fn as_str(&self) -> &str {
                match self {
                    Self::Unknown(tag) => tag.as_str(),
                    _ => self.get_serializations()[0],
                }
            }

            /// Human-readable name
            pub fn as_display_str(&self) -> &'static str {
                self.get_detailed_message().unwrap_or("Pass-through")
            }

            /// True if the tag was not recognized
            pub fn is_unknown(&self) -> bool {
                matches!(self, Self::Unknown(_))
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> $name {
                let s = s.trim();
                match $name::from_str(s) {
                    Ok(alg) => alg,
                    Err(_e) => $name::Unknown(s.to_owned()),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.as_display_str().fmt(f)
            }
        }
    };
}

/// Line coding scheme (digital → digital)
///
/// ```
/// use phylayer::LineCoding;
///
/// assert_eq!(LineCoding::Manchester, LineCoding::from("manchester"));
/// assert_eq!(LineCoding::NrzL, LineCoding::from("NRZ-L"));
/// assert_eq!("Differential Manchester", LineCoding::DifferentialManchester.as_display_str());
///
/// let unk = LineCoding::from("4b5b");
/// assert!(unk.is_unknown());
/// assert_eq!("4b5b", unk.as_str());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, strum_macros::EnumMessage, strum_macros::EnumString)]
#[strum(ascii_case_insensitive)]
pub enum LineCoding {
    /// Non-return-to-zero, level
    #[strum(serialize = "nrz-l", detailed_message = "NRZ-L")]
    NrzL,

    /// Non-return-to-zero, inverted on ones
    #[strum(serialize = "nrz-i", detailed_message = "NRZ-I")]
    NrzI,

    /// Manchester: low-high for one, high-low for zero
    #[strum(serialize = "manchester", detailed_message = "Manchester")]
    Manchester,

    /// Differential Manchester: boundary transition on zero
    #[strum(
        serialize = "differential-manchester",
        detailed_message = "Differential Manchester"
    )]
    DifferentialManchester,

    /// Alternate mark inversion (bipolar)
    #[strum(serialize = "ami", detailed_message = "AMI")]
    Ami,

    /// Unrecognized tag; bits pass through unchanged
    #[strum(default)]
    Unknown(String),
}

algorithm_tag!(
    LineCoding,
    ["nrz-l", "nrz-i", "manchester", "differential-manchester", "ami"]
);

/// Keying scheme (digital → analog)
#[derive(Clone, Debug, PartialEq, Eq, Hash, strum_macros::EnumMessage, strum_macros::EnumString)]
#[strum(ascii_case_insensitive)]
pub enum Keying {
    /// Amplitude-shift keying
    #[strum(serialize = "ask", detailed_message = "ASK")]
    Ask,

    /// Frequency-shift keying
    #[strum(serialize = "fsk", detailed_message = "FSK")]
    Fsk,

    /// Binary phase-shift keying
    #[strum(serialize = "psk", detailed_message = "PSK")]
    Psk,

    /// Amplitude-only QAM approximation
    #[strum(serialize = "qam", detailed_message = "QAM")]
    Qam,

    /// Unrecognized tag; bits are held flat for each symbol
    #[strum(default)]
    Unknown(String),
}

algorithm_tag!(Keying, ["ask", "fsk", "psk", "qam"]);

/// Sampling codec (analog → digital)
#[derive(Clone, Debug, PartialEq, Eq, Hash, strum_macros::EnumMessage, strum_macros::EnumString)]
#[strum(ascii_case_insensitive)]
pub enum Sampling {
    /// 8-bit pulse code modulation
    #[strum(serialize = "pcm", detailed_message = "PCM")]
    Pcm,

    /// Delta modulation
    #[strum(serialize = "delta", detailed_message = "Delta Modulation")]
    Delta,

    /// Adaptive delta modulation
    ///
    /// Step sizing is not adapted; this behaves exactly
    /// like [`Sampling::Delta`].
    #[strum(
        serialize = "adaptive-delta",
        detailed_message = "Adaptive Delta Modulation"
    )]
    AdaptiveDelta,

    /// Unrecognized tag; samples pass through unchanged
    #[strum(default)]
    Unknown(String),
}

algorithm_tag!(Sampling, ["pcm", "delta", "adaptive-delta"]);

/// Analog modulation (analog → analog)
#[derive(Clone, Debug, PartialEq, Eq, Hash, strum_macros::EnumMessage, strum_macros::EnumString)]
#[strum(ascii_case_insensitive)]
pub enum AnalogModulation {
    /// Amplitude modulation
    #[strum(serialize = "am", detailed_message = "AM")]
    Am,

    /// Frequency modulation
    #[strum(serialize = "fm", detailed_message = "FM")]
    Fm,

    /// Phase modulation
    #[strum(serialize = "pm", detailed_message = "PM")]
    Pm,

    /// Unrecognized tag; samples pass through unchanged
    #[strum(default)]
    Unknown(String),
}

algorithm_tag!(AnalogModulation, ["am", "fm", "pm"]);

#[cfg(test)]
mod tests {
    use super::*;

    use strum::IntoEnumIterator;

    #[test]
    fn test_mode_roundtrip() {
        assert_eq!(TransmissionMode::ALL.len(), TransmissionMode::iter().count());
        for mode in TransmissionMode::ALL {
            assert_eq!(Ok(mode), TransmissionMode::try_from(mode.as_str()));
            assert!(!mode.known_algorithms().is_empty());
        }

        assert_eq!(
            Ok(TransmissionMode::DigitalToDigital),
            TransmissionMode::try_from("DigitalToDigital")
        );
        assert_eq!(
            Ok(TransmissionMode::AnalogToAnalog),
            TransmissionMode::try_from("  ANALOG-TO-ANALOG ")
        );
        assert_eq!(
            Err(UnrecognizedMode("bogus".to_owned())),
            TransmissionMode::try_from("bogus")
        );
    }

    #[test]
    fn test_known_tags_parse() {
        for tag in LineCoding::KNOWN {
            let alg = LineCoding::from(*tag);
            assert!(!alg.is_unknown());
            assert_eq!(*tag, alg.as_str());
        }
        for tag in Keying::KNOWN {
            assert_eq!(*tag, Keying::from(*tag).as_str());
        }
        for tag in Sampling::KNOWN {
            assert_eq!(*tag, Sampling::from(*tag).as_str());
        }
        for tag in AnalogModulation::KNOWN {
            assert_eq!(*tag, AnalogModulation::from(*tag).as_str());
        }
    }

    #[test]
    fn test_unknown_tags() {
        assert_eq!(Keying::Unknown("gmsk".to_owned()), Keying::from("gmsk"));
        assert_eq!(Sampling::Unknown(String::new()), Sampling::from(""));
        assert_eq!("Pass-through", AnalogModulation::from("ssb").as_display_str());
        assert_eq!(Sampling::AdaptiveDelta, Sampling::from(" Adaptive-Delta"));
    }
}
