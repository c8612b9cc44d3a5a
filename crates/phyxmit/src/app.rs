//! Run one transmission and report it
//!
//! The program is a single pass: parse the mode, warn about an
//! algorithm the library will pass through, run the
//! transceiver, and print the result.

use std::convert::TryFrom;

use anyhow::anyhow;
use log::{info, warn};
use phylayer::{AnalogModulation, Keying, LineCoding, Sampling, Transceiver, TransmissionMode};

use crate::cli::Args;

/// Run the application
///
/// Runs `input` through the `transceiver` in the mode and with
/// the algorithm given in `args`. An unrecognized mode is an
/// error. An unrecognized algorithm is only a warning.
pub fn run(args: &Args, transceiver: &Transceiver, input: &str) -> Result<(), anyhow::Error> {
    let mode_tag = args.mode.as_deref().ok_or_else(|| anyhow!("missing MODE"))?;
    let algorithm = args
        .algorithm
        .as_deref()
        .ok_or_else(|| anyhow!("missing ALGORITHM"))?;

    let mode = TransmissionMode::try_from(mode_tag).map_err(|e| {
        anyhow!(
            "{}\n\nValid modes are: {}",
            e,
            TransmissionMode::ALL
                .iter()
                .map(|m| m.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        )
    })?;

    if !is_known_algorithm(mode, algorithm) {
        warn!(
            "algorithm \"{}\" is not recognized for {}; input will pass through unchanged",
            algorithm,
            mode.as_str()
        );
    }

    let result = transceiver.process(mode, algorithm, input);
    if result.is_lossless(1.0e-9) {
        info!("receiver recovered the input exactly");
    } else {
        info!("receiver recovered an approximation of the input");
    }

    if !args.quiet {
        println!("{}", result);
    }

    Ok(())
}

/// Print every mode and its algorithms
pub fn list() {
    print!("{}", listing());
}

// Table of modes and algorithm tags
fn listing() -> String {
    let mut out = String::new();
    for mode in TransmissionMode::ALL {
        out.push_str(&format!("{} ({})\n", mode.as_str(), mode.as_display_str()));
        for alg in mode.known_algorithms() {
            out.push_str(&format!("    {}\n", alg));
        }
    }
    out
}

// True if the library has an implementation for `algorithm`
fn is_known_algorithm(mode: TransmissionMode, algorithm: &str) -> bool {
    let unknown = match mode {
        TransmissionMode::DigitalToDigital => LineCoding::from(algorithm).is_unknown(),
        TransmissionMode::DigitalToAnalog => Keying::from(algorithm).is_unknown(),
        TransmissionMode::AnalogToDigital => Sampling::from(algorithm).is_unknown(),
        TransmissionMode::AnalogToAnalog => AnalogModulation::from(algorithm).is_unknown(),
    };
    !unknown
}
