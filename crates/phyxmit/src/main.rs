use std::io::{self, Read};

use anyhow::{anyhow, Context};
use clap::Parser;
use log::{info, warn, LevelFilter};

use phylayer::TransceiverBuilder;

mod app;
mod cli;

use cli::{Args, CliError};

fn main() {
    match phyxmit() {
        Ok(()) => {}
        Err(cli_error) => cli_error.exit(),
    }
}

fn phyxmit() -> Result<(), CliError> {
    // Parse options and start logging
    let args = Args::try_parse()?;
    log_setup(&args);

    if args.list {
        app::list();
        return Ok(());
    }

    // create the transceiver
    let xcvr = TransceiverBuilder::new()
        .with_samples_per_symbol(args.samples_per_symbol as usize)
        .with_analog_samples(args.analog_samples as usize)
        .with_ask_space_amplitude(args.ask_space_amplitude)
        .with_delta_step(args.delta_step)
        .build();

    let input = input_setup(&args)?;
    app::run(&args, &xcvr, &input)?;

    Ok(())
}

fn log_setup(args: &Args) {
    if args.quiet {
        // no logging
        return;
    } else if std::env::var_os("RUST_LOG").is_none() {
        // parameter controls
        let log_filter = match args.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            3 | _ => LevelFilter::Trace,
        };

        pretty_env_logger::formatted_builder()
            .filter_module("phylayer", log_filter)
            .filter_module("phyxmit", log_filter)
            .init();
    } else {
        // environment controls
        pretty_env_logger::init();
    }
}

// Obtain input text from the command line, a file, or stdin
fn input_setup(args: &Args) -> Result<String, anyhow::Error> {
    if let Some(input) = &args.input {
        return Ok(input.clone());
    }

    let mut text = String::new();
    if args.input_is_stdin() {
        info!("reading input from standard input");
        if is_terminal(&std::io::stdin()) {
            warn!("reading input from a terminal; finish with end-of-file (Ctrl-D)");
        }
        io::stdin()
            .lock()
            .read_to_string(&mut text)
            .map_err(|e| anyhow!("unable to read standard input: {}", e))?;
    } else {
        info!("reading input from file: \"{}\"", &args.file);
        text = std::fs::read_to_string(&args.file)
            .with_context(|| format!("Unable to read --file \"{}\"", args.file))?;
    }

    Ok(text)
}

#[cfg(not(target_os = "windows"))]
fn is_terminal<S>(stream: &S) -> bool
where
    S: std::os::fd::AsRawFd,
{
    terminal_size::terminal_size_using_fd(stream.as_raw_fd()).is_some()
}

#[cfg(target_os = "windows")]
fn is_terminal<S>(stream: &S) -> bool
where
    S: std::os::windows::io::AsRawHandle,
{
    terminal_size::terminal_size_using_handle(stream.as_raw_handle()).is_some()
}
