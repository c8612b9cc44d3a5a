//! Input text parsing
//!
//! Raw input text becomes either a *bit sequence* (digital
//! modes) or a *sample sequence* (analog modes). Neither
//! parser can fail: malformed input produces a shorter, possibly
//! empty, sequence.

use lazy_static::lazy_static;
use log::debug;
use regex::Regex;

/// Quotation characters removed before scanning for numbers
const QUOTE_CHARS: &[char] = &[
    '"', '\'', '`', '\u{2018}', '\u{2019}', '\u{201a}', '\u{201b}', '\u{201c}', '\u{201d}',
    '\u{201e}', '\u{201f}', '\u{00ab}', '\u{00bb}', '\u{2039}', '\u{203a}',
];

/// Parse a bit sequence
///
/// Maps each `0` or `1` character of the input to the bit
/// values `0u8` or `1u8`. Every other character, including
/// whitespace and separators, is dropped. The length of the
/// output is the number of binary digits in `text`.
///
/// ```
/// use phylayer::parse_bits;
///
/// assert_eq!(vec![1u8, 0, 1, 1], parse_bits(" 1011\n"));
/// assert_eq!(vec![1u8, 0], parse_bits("1-0-2"));
/// ```
pub fn parse_bits(text: &str) -> Vec<u8> {
    let text = text.trim();
    let bits: Vec<u8> = text
        .chars()
        .filter_map(|c| match c {
            '0' => Some(0u8),
            '1' => Some(1u8),
            _ => None,
        })
        .collect();

    let dropped = text.chars().count() - bits.len();
    if dropped > 0 {
        debug!("parse: dropped {} non-binary characters", dropped);
    }

    bits
}

/// Parse a sample sequence
///
/// Quotation marks of several styles are removed, and then every
/// token that looks like a signed decimal number with an optional
/// exponent (`-1.5`, `+.25`, `3e-2`) is converted. Tokens which do
/// not convert are dropped. Text without any numbers yields an
/// empty sequence.
///
/// ```
/// use phylayer::parse_samples;
///
/// assert_eq!(vec![1.0, -0.5, 250.0], parse_samples("\"1.0\", -0.5; 2.5e2"));
/// assert!(parse_samples("no numbers here").is_empty());
/// ```
pub fn parse_samples(text: &str) -> Vec<f64> {
    lazy_static! {
        static ref NUMBER: Regex = Regex::new(r"[-+]?(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][-+]?[0-9]+)?")
            .expect("bad sample regexp");
    }

    let unquoted: String = text.chars().filter(|c| !QUOTE_CHARS.contains(c)).collect();

    let mut dropped = 0usize;
    let samples: Vec<f64> = NUMBER
        .find_iter(&unquoted)
        .filter_map(|tok| match tok.as_str().parse::<f64>() {
            Ok(val) if val.is_finite() => Some(val),
            _ => {
                dropped += 1;
                None
            }
        })
        .collect();

    if dropped > 0 {
        debug!("parse: dropped {} unconvertible numeric tokens", dropped);
    }

    samples
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bits() {
        assert_eq!(vec![0u8, 1, 1, 0], parse_bits("0110"));
        assert_eq!(vec![1u8, 0, 1], parse_bits("1 0 1"));
        assert!(parse_bits("").is_empty());
        assert!(parse_bits("abc").is_empty());
    }

    #[test]
    fn test_parse_samples() {
        assert_eq!(vec![1.0, 1.5, 1.2], parse_samples("1.0, 1.5, 1.2"));
        assert_eq!(
            vec![0.5, -2.0, 0.001],
            parse_samples("[\u{201c}0.5\u{201d}, '-2', 1e-3]")
        );
        assert_eq!(vec![3.0, 0.25], parse_samples("x=3. y=+.25"));
        assert_eq!(vec![-4.0, -5.0], parse_samples("-4--5"));
        assert!(parse_samples("").is_empty());
        assert!(parse_samples("\"\"").is_empty());
    }

    #[test]
    fn test_parse_samples_overflow_dropped() {
        // 1e999 overflows to infinity and is not a usable sample
        assert_eq!(vec![2.0], parse_samples("1e999 2"));
    }
}
