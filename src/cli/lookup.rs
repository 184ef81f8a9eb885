/*
 * SPDX-FileCopyrightText: 2026 The bytefst authors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use anyhow::{Context, Result};
use bytefst::bound::Bound;
use bytefst::reader::Reader;
use clap::{ArgMatches, Args, Command, FromArgMatches};

pub const COMMAND_NAME: &str = "match";

#[derive(Args, Debug)]
#[command(about = "Looks up an exact key.", long_about = None)]
struct CliArgs {
    /// Path to the FST file.
    input: String,
    /// Key to look up.
    key: String,
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

    let mut hits = reader
        .matching(Bound::Unbounded, Bound::Unbounded, &args.key)?
        .peekable();
    if hits.peek().is_none() {
        anyhow::bail!("no match for {:?}", args.key);
    }
    crate::cli::print_hits(hits, reader.has_output(), args.json)
}
