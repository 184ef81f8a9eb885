/*
 * SPDX-FileCopyrightText: 2026 The bytefst authors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use anyhow::{Context, Result};
use bytefst::reader::Reader;
use clap::{ArgMatches, Args, Command, FromArgMatches};

pub const COMMAND_NAME: &str = "fuzzy";

#[derive(Args, Debug)]
#[command(about = "Lists keys within an edit distance of a query.", long_about = None)]
struct CliArgs {
    /// Path to the FST file.
    input: String,
    /// Query string.
    query: String,
    /// Maximum edit distance.
    #[arg(long, default_value_t = 1)]
    edit_distance: usize,
    /// Required exact prefix length shared with the query.
    #[arg(long, default_value_t = 0)]
    shared_prefix: usize,
    /// Count adjacent transpositions as a single edit.
    #[arg(long)]
    damerau: bool,
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

    let hits = reader.fuzzy(
        &args.query,
        args.edit_distance,
        args.shared_prefix,
        args.damerau,
    )?;
    let hits: Box<dyn Iterator<Item = (Vec<u8>, u64)>> = match args.limit {
        Some(n) => Box::new(hits.take(n)),
        None => Box::new(hits),
    };
    crate::cli::print_hits(hits, reader.has_output(), args.json)
}
