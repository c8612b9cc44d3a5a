use std::fmt::Display;

use clap::{error::ErrorKind, value_parser, CommandFactory, Parser};

/// Standard input filename
const STDIN_FILE: &str = "-";

const USAGE_SHORT: &str = r#"
Encodes INPUT with the given MODE and ALGORITHM, decodes it again, and prints the result. If INPUT is omitted, it is read from --file.

See --help for more details.
"#;

const USAGE_LONG: &str = r#"
Encodes INPUT with the given MODE and ALGORITHM, decodes it again, and prints the result. If INPUT is omitted, it is read from --file, which defaults to standard input.

Digital modes read a string of binary digits:

    phyxmit digital-to-digital manchester 10110

Analog modes read any text containing numbers. Quotation marks are ignored:

    echo '"0.5", -1.25, 3e-1' | phyxmit analog-to-digital pcm

An unrecognized ALGORITHM passes the input through unchanged. Use --list to print every mode and algorithm.
"#;

const ADVANCED: &str = "Advanced Codec Options";

/// Top-level program arguments
#[derive(Parser, Clone, Debug)]
#[command(version)]
#[command(about, long_about = None)]
#[command(after_help = USAGE_SHORT, after_long_help = USAGE_LONG)]
#[command(max_term_width = 100)]
pub struct Args {
    /// Verbosity level (-vvv for more)
    #[arg(short, long, default_value_t = 0, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Print NOTHING; report success by exit status only
    #[arg(short, long)]
    pub quiet: bool,

    /// List modes and algorithms, then exit
    #[arg(long)]
    pub list: bool,

    /// Transmission mode, like "digital-to-analog"
    #[arg(required_unless_present = "list")]
    pub mode: Option<String>,

    /// Algorithm, like "nrz-i" or "fsk"
    #[arg(required_unless_present = "list")]
    pub algorithm: Option<String>,

    /// Input text. Read from --file if omitted.
    pub input: Option<String>,

    /// Input file (or "-" for stdin)
    #[arg(long, default_value_t = STDIN_FILE.to_string())]
    pub file: String,

    /// Waveform points per bit, for digital-to-analog (≥10)
    #[arg(long, default_value_t = 10)]
    #[arg(value_parser = value_parser!(u32).range(10..=4096))]
    #[arg(hide_short_help = true)]
    #[arg(help_heading = ADVANCED)]
    pub samples_per_symbol: u32,

    /// Waveform points per sample, for analog-to-analog (≥8)
    #[arg(long, default_value_t = 20)]
    #[arg(value_parser = value_parser!(u32).range(8..=4096))]
    #[arg(hide_short_help = true)]
    #[arg(help_heading = ADVANCED)]
    pub analog_samples: u32,

    /// ASK amplitude for zero bits (0.0 ≤ AMP ≤ 0.9)
    #[arg(long, default_value_t = 0.3)]
    #[arg(hide_short_help = true)]
    #[arg(help_heading = ADVANCED)]
    pub ask_space_amplitude: f64,

    /// Fixed delta modulation step. Omit for exact reconstruction.
    #[arg(long)]
    #[arg(hide_short_help = true)]
    #[arg(help_heading = ADVANCED)]
    pub delta_step: Option<f64>,
}

impl Args {
    /// Return true if the user requests input from stdin
    pub fn input_is_stdin(&self) -> bool {
        self.file == STDIN_FILE
    }
}

/// A program-level error with exit code
#[derive(Debug)]
pub struct CliError {
    error: anyhow::Error,
    exit_code: i32,
}

impl CliError {
    /// Create new error with a custom exit code
    pub fn new(error: anyhow::Error, code: i32) -> CliError {
        CliError {
            error,
            exit_code: code,
        }
    }

    /// Print this error to the terminal
    ///
    /// Errors from clap are printed verbatim. Other types of errors
    /// are printed indirectly via clap's fancy formatter.
    pub fn print(&self) -> std::io::Result<()> {
        if let Some(e) = self.error.downcast_ref::<clap::Error>() {
            e.print()
        } else {
            Args::command()
                .error(ErrorKind::Format, self.to_string())
                .print()
        }
    }

    /// Print this error to the terminal and exit
    pub fn exit(&self) -> ! {
        drop(self.print());
        std::process::exit(self.exit_code);
    }
}

impl Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.error)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> CliError {
        CliError::new(err, 1)
    }
}

impl From<clap::Error> for CliError {
    fn from(err: clap::Error) -> CliError {
        let code = if err.use_stderr() { 1 } else { 0 };
        CliError::new(err.into(), code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clap() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_args() {
        let args = Args::try_parse_from(["phyxmit", "digital-to-digital", "ami", "1011"]).unwrap();
        assert_eq!(Some("digital-to-digital"), args.mode.as_deref());
        assert_eq!(Some("ami"), args.algorithm.as_deref());
        assert_eq!(Some("1011"), args.input.as_deref());
        assert!(args.input_is_stdin());
        assert_eq!(10, args.samples_per_symbol);
        assert_eq!(None, args.delta_step);

        let args = Args::try_parse_from(["phyxmit", "--list"]).unwrap();
        assert!(args.list);
        assert_eq!(None, args.mode);

        assert!(Args::try_parse_from(["phyxmit"]).is_err());
        assert!(Args::try_parse_from(["phyxmit", "analog-to-digital", "pcm", "--samples-per-symbol", "4"]).is_err());
    }
}
