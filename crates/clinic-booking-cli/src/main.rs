// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

use std::process::ExitCode as ProcessExitCode;

use clap::Parser;
use clinic_booking_cli::{init_logging, run, Cli};
use clinic_booking_core::ExitCode;

fn main() -> ProcessExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match run(cli) {
        Ok(()) => ProcessExitCode::from(ExitCode::Success.code()),
        Err(err) => {
            eprintln!("{err}");
            ProcessExitCode::from(err.exit_code.code())
        }
    }
}
