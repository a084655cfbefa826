//Enable more cargo lint tests
#![warn(rust_2018_idioms)]
#![warn(clippy::disallowed_types)]

use std::process::ExitCode;

use hfm::tools::cli::{hfmopts_init, Mode};
use hfm::{compress_file, decompress_file};

use log::{error, info, LevelFilter};
use simplelog::{Config, TermLogger, TerminalMode};

#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

fn main() -> ExitCode {
    // Available log levels are Error, Warn, Info, Debug, Trace
    if let Err(e) = TermLogger::init(
        LevelFilter::Trace,
        Config::default(),
        TerminalMode::Stdout,
        simplelog::ColorChoice::Auto,
    ) {
        eprintln!("Could not start the logger: {}", e);
    }

    // Bad command lines stop here, before any file is opened
    let options = match hfmopts_init() {
        Ok(options) => options,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    //----- Figure how what we need to do and go do it
    let result = match options.op_mode {
        Mode::Compress => {
            info!("****************compress****************");
            compress_file(&options.input, options.output.as_deref()).map(|_| ())
        }
        Mode::Uncompress => {
            info!("***************uncompress***************");
            // hfmopts_init rejects uncompress without an output path
            let Some(output) = options.output.as_deref() else {
                return ExitCode::FAILURE;
            };
            decompress_file(&options.input, output).map(|_| ())
        }
    };

    match result {
        Ok(()) => {
            info!("Done.\n");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
