/*
 * SPDX-FileCopyrightText: 2026 The bytefst authors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use anyhow::{Context, Result};
use bytefst::builder::Builder;
use bytefst::output_stream::FileOutputStream;
use bytefst::sort::{sort_lines, SortOptions};
use clap::{ArgMatches, Args, Command, FromArgMatches, Subcommand};
use dsi_progress_logger::*;
use log::info;
use std::fs::File;
use std::io::{BufRead, BufReader};

pub const COMMAND_NAME: &str = "build";

#[derive(Args, Debug)]
#[command(about = "Builds an on-disk FST from newline-delimited input.", long_about = None)]
struct CliArgs {
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Subcommand, Debug)]
enum Mode {
    /// Build a map: each input line is "key\tvalue".
    Map(ModeArgs),
    /// Build a set: each input line is a bare key.
    Set(ModeArgs),
}

#[derive(Args, Debug)]
struct ModeArgs {
    /// Input file of newline-delimited records, or "-" for stdin.
    input: String,
    /// Output path for the built FST.
    output: String,
    /// Bytes charged against the construction dedup cache.
    #[arg(long, default_value_t = 64 << 20)]
    cache_bytes: usize,
    /// Input is already sorted; skip the sort pass.
    #[arg(long)]
    sorted: bool,
    /// In-memory sort threshold, in lines, before spilling to disk.
    #[arg(long, default_value_t = 1_000_000)]
    sort_memory_lines: usize,
    /// Hint for the in-memory sort's chunking strategy.
    #[arg(long, default_value_t = 1)]
    sort_threads: usize,
}

pub fn cli(command: Command) -> Command {
    command.subcommand(CliArgs::augment_args(Command::new(COMMAND_NAME)))
}

pub fn main(submatches: &ArgMatches) -> Result<()> {
    let args = CliArgs::from_arg_matches(submatches)?;
    match args.mode {
        Mode::Map(a) => build(a, true),
        Mode::Set(a) => build(a, false),
    }
}

fn open_input(path: &str) -> Result<Box<dyn BufRead>> {
    if path == "-" {
        Ok(Box::new(BufReader::new(std::io::stdin())))
    } else {
        Ok(Box::new(BufReader::new(
            File::open(path).with_context(|| format!("opening {path}"))?,
        )))
    }
}

fn build(args: ModeArgs, has_output: bool) -> Result<()> {
    let sorted_input: Box<dyn BufRead> = if args.sorted {
        open_input(&args.input)?
    } else {
        info!("sorting {} before building", args.input);
        let mut sorted = Vec::new();
        sort_lines(
            open_input(&args.input)?,
            &mut sorted,
            &SortOptions {
                memory_lines: args.sort_memory_lines,
                threads: args.sort_threads,
            },
        )?;
        Box::new(std::io::Cursor::new(sorted))
    };

    let stream = FileOutputStream::create(&args.output)
        .with_context(|| format!("creating {}", args.output))?;
    let mut builder = Builder::new(stream, has_output, args.cache_bytes)?;

    let mut pl = ProgressLogger::default();
    pl.display_memory(true).item_name("key");
    pl.start("Building fst...");

    for line in sorted_input.lines() {
        let line = line?;
        if has_output {
            let (key, value) = line
                .split_once('\t')
                .with_context(|| format!("map input line missing a tab: {line:?}"))?;
            let value: u64 = value
                .parse()
                .with_context(|| format!("value {value:?} is not a u64"))?;
            builder.insert(key.as_bytes(), value)?;
        } else {
            builder.insert(line.as_bytes(), 0)?;
        }
        pl.update();
    }
    builder.finish()?;
    pl.done();
    Ok(())
}
