//! Decodes NMEA 0183 sentences from a file or standard input.
//!
//! ```text
//! cargo run --example decode_lines -- --file track.nmea -v
//! cat /dev/ttyUSB0 | cargo run --example decode_lines
//! ```

use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    time::Duration,
};

use anyhow::Context;
use clap::Parser;
use log::{LevelFilter, info};
use nmea0183_decoder::{
    Decoder, local_offset,
    stream::{Event, ReaderSource, SentenceStreamBuilder, spawn_reader},
};

const STDIN_FILE: &str = "-";

/// Decode NMEA 0183 sentences, one per line
#[derive(Parser, Clone, Debug)]
#[command(about, long_about = None)]
struct Args {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, default_value_t = 0, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Input file, or "-" for standard input
    #[arg(long, default_value_t = STDIN_FILE.to_string())]
    file: String,

    /// Give up waiting for a line after this many seconds
    #[arg(long, default_value_t = 1.0)]
    timeout: f32,

    /// Lines the reader thread may read ahead
    #[arg(long, default_value_t = 64)]
    queue: usize,

    /// Print lines that failed to decode
    #[arg(long)]
    diagnostics: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    log_setup(&args);

    let input = file_setup(&args)?;
    let source = spawn_reader(ReaderSource::new(input), args.queue)
        .context("Unable to start the reader thread")?;

    let offset = local_offset();
    info!("reporting local time at offset {offset}");

    let timeout = Duration::try_from_secs_f32(args.timeout)
        .with_context(|| format!("Invalid --timeout {}", args.timeout))?;

    let stream = SentenceStreamBuilder::new(source)
        .decoder(Decoder::new(offset))
        .read_timeout(timeout)
        .build();

    for event in stream {
        match event? {
            Event::Sentence(sentence) => match sentence.timestamp() {
                Some(timestamp) => {
                    println!("{} [{timestamp}] {sentence:?}", sentence.sentence_type())
                }
                None => println!("{} {sentence:?}", sentence.sentence_type()),
            },
            Event::Diagnostic(diagnostic) if args.diagnostics => {
                println!("! {:?}: {}", diagnostic.line, diagnostic.error)
            }
            Event::Diagnostic(_) => {}
        }
    }

    Ok(())
}

fn log_setup(args: &Args) {
    if std::env::var_os("RUST_LOG").is_none() {
        let log_filter = match args.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        };

        pretty_env_logger::formatted_builder()
            .filter_module("nmea0183_decoder", log_filter)
            .filter_module("decode_lines", log_filter)
            .init();
    } else {
        pretty_env_logger::init();
    }
}

fn file_setup(args: &Args) -> anyhow::Result<Box<dyn BufRead + Send>> {
    if args.file == STDIN_FILE {
        info!("reading standard input");
        Ok(Box::new(BufReader::new(io::stdin())))
    } else {
        info!("reading file: \"{}\"", &args.file);
        Ok(Box::new(BufReader::new(
            File::open(&args.file)
                .with_context(|| format!("Unable to open --file \"{}\"", args.file))?,
        )))
    }
}
