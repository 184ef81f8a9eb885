/*
 * SPDX-FileCopyrightText: 2026 The bytefst authors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use anyhow::{Context, Result};
use bytefst::reader::Reader;
use clap::{ArgMatches, Args, Command, FromArgMatches};
use std::fs::File;
use std::io::Write;

pub const COMMAND_NAME: &str = "dot";

#[derive(Args, Debug)]
#[command(about = "Renders an FST as Graphviz DOT.", long_about = None)]
struct CliArgs {
    /// Path to the FST file.
    input: String,
    /// Where to write the DOT output. Defaults to stdout.
    output: Option<String>,
}

pub fn cli(command: Command) -> Command {
    command.subcommand(CliArgs::augment_args(Command::new(COMMAND_NAME)))
}

pub fn main(submatches: &ArgMatches) -> Result<()> {
    let args = CliArgs::from_arg_matches(submatches)?;
    let reader = Reader::open(&args.input).with_context(|| format!("opening {}", args.input))?;

    let mut dot = String::new();
    reader.dot(&mut dot)?;

    match args.output {
        Some(path) => {
            File::create(&path)
                .with_context(|| format!("creating {path}"))?
                .write_all(dot.as_bytes())?;
        }
        None => print!("{dot}"),
    }
    Ok(())
}
