/*
 * SPDX-FileCopyrightText: 2026 The bytefst authors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use anyhow::{Context, Result};
use bytefst::bound::Bound;
use bytefst::reader::Reader;
use clap::{ArgMatches, Args, Command, FromArgMatches};

pub const COMMAND_NAME: &str = "range";

#[derive(Args, Debug)]
#[command(about = "Lists keys in a lexicographic range.", long_about = None)]
struct CliArgs {
    /// Path to the FST file.
    input: String,
    /// Lower bound, unbounded if omitted.
    #[arg(long)]
    min: Option<String>,
    /// Exclude the lower bound itself.
    #[arg(long, requires = "min")]
    min_exclusive: bool,
    /// Upper bound, unbounded if omitted.
    #[arg(long)]
    max: Option<String>,
    /// Exclude the upper bound itself.
    #[arg(long, requires = "max")]
    max_exclusive: bool,
    /// Stop after this many matches.
    #[arg(long)]
    limit: Option<usize>,
    /// Print results as a JSON array instead of tab-separated lines.
    #[arg(long)]
    json: bool,
}

fn bound(value: Option<String>, exclusive: bool) -> Bound {
    match value {
        None => Bound::Unbounded,
        Some(s) if exclusive => Bound::Excluded(s.into_bytes()),
        Some(s) => Bound::Included(s.into_bytes()),
    }
}

pub fn cli(command: Command) -> Command {
    command.subcommand(CliArgs::augment_args(Command::new(COMMAND_NAME)))
}

pub fn main(submatches: &ArgMatches) -> Result<()> {
    let args = CliArgs::from_arg_matches(submatches)?;
    let reader = Reader::open(&args.input).with_context(|| format!("opening {}", args.input))?;

    let min = bound(args.min, args.min_exclusive);
    let max = bound(args.max, args.max_exclusive);
    let hits = reader.range(min, max);
    let hits: Box<dyn Iterator<Item = (Vec<u8>, u64)>> = match args.limit {
        Some(n) => Box::new(hits.take(n)),
        None => Box::new(hits),
    };
    crate::cli::print_hits(hits, reader.has_output(), args.json)
}
