use std::path::PathBuf;
use std::{fmt::Display, fmt::Formatter};

use clap::Parser;
use log::{info, LevelFilter};
use thiserror::Error;

/// Verbosity of user information
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Info,
    Debug,
    Trace,
}

impl Verbosity {
    pub fn level_filter(&self) -> LevelFilter {
        match self {
            Verbosity::Quiet => LevelFilter::Off,
            Verbosity::Info => LevelFilter::Info,
            Verbosity::Debug => LevelFilter::Debug,
            Verbosity::Trace => LevelFilter::Trace,
        }
    }
}

/// Compress or Uncompress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Compress,
    Uncompress,
}
impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Problems with the command line that are caught before any file is touched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OptsError {
    #[error("Unknown command '{0}', expected \"compress\" or \"uncompress\"")]
    UnknownCommand(String),
    #[error("uncompress needs an output path (-o)")]
    MissingOutput,
}

#[derive(Debug)]
pub struct HfmOpts {
    /// Compress/Uncompress
    pub op_mode: Mode,
    /// File to read for input
    pub input: PathBuf,
    /// File to write. Only optional when compressing.
    pub output: Option<PathBuf>,
    /// Verbosity of user information
    pub verbose: Verbosity,
}

/// Command Line Interpretation - uses external CLAP crate.
#[derive(Parser, Debug)]
#[clap(
    version,
    about = "A byte-level Huffman file compressor",
    long_about = "
    Compresses a file with a single static Huffman code built from its byte counts.
    The counts are stored in front of the packed codes, so uncompress can rebuild
    the same code without any other information."
)]
pub struct Args {
    /// "compress" or "uncompress"
    #[clap()]
    command: String,

    /// Input file path
    #[clap(short = 'i', long = "input")]
    input: PathBuf,

    /// Output file path. Compress defaults to <input>.hfm
    #[clap(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Sets verbosity. -v adds details, -vv is chatty
    #[clap(short = 'v', parse(from_occurrences))]
    v: u64,

    /// Suppress all messages
    #[clap(short = 'q', long = "quiet")]
    quiet: bool,
}

impl TryFrom<Args> for HfmOpts {
    type Error = OptsError;

    fn try_from(args: Args) -> Result<Self, Self::Error> {
        let op_mode = match args.command.as_str() {
            "compress" => Mode::Compress,
            "uncompress" => Mode::Uncompress,
            other => return Err(OptsError::UnknownCommand(other.to_string())),
        };
        if op_mode == Mode::Uncompress && args.output.is_none() {
            return Err(OptsError::MissingOutput);
        }
        let verbose = match (args.quiet, args.v) {
            (true, _) => Verbosity::Quiet,
            (false, 0) => Verbosity::Info,
            (false, 1) => Verbosity::Debug,
            _ => Verbosity::Trace,
        };
        Ok(HfmOpts {
            op_mode,
            input: args.input,
            output: args.output,
            verbose,
        })
    }
}

/// Parse the command line, set the log level and report what we are about to do.
pub fn hfmopts_init() -> Result<HfmOpts, OptsError> {
    let opts = HfmOpts::try_from(Args::parse())?;

    // Set the log level
    log::set_max_level(opts.verbose.level_filter());

    info!("Verbosity set to {}", log::max_level());
    info!("Operational mode set to {}", opts.op_mode);
    Ok(opts)
}
