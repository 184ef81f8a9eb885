/*
 * SPDX-FileCopyrightText: 2026 The bytefst authors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use anyhow::{Context, Result};
use bytefst::bound::Bound;
use bytefst::reader::Reader;
use clap::{ArgMatches, Args, Command, FromArgMatches};

pub const COMMAND_NAME: &str = "prefix";

#[derive(Args, Debug)]
#[command(about = "Lists keys starting with a prefix.", long_about = None)]
struct CliArgs {
    /// Path to the FST file.
    input: String,
    /// Prefix to search for.
    prefix: String,
    /// Stop after this many matches.
    #[arg(long)]
    limit: Option<usize>,
    /// Print results as a JSON array instead of tab-separated lines.
    #[arg(long)]
    json: bool,
}

pub fn cli(command: Command) -> Command {
    command.subcommand(CliArgs::augment_args(Command::new(COMMAND_NAME)))
}

pub fn main(submatches: &ArgMatches) -> Result<()> {
    let args = CliArgs::from_arg_matches(submatches)?;
    let reader = Reader::open(&args.input).with_context(|| format!("opening {}", args.input))?;

    let hits = reader.prefix(Bound::Unbounded, Bound::Unbounded, &args.prefix)?;
    let hits: Box<dyn Iterator<Item = (Vec<u8>, u64)>> = match args.limit {
        Some(n) => Box::new(hits.take(n)),
        None => Box::new(hits),
    };
    crate::cli::print_hits(hits, reader.has_output(), args.json)
}
