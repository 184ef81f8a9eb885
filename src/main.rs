/*
 * SPDX-FileCopyrightText: 2026 The bytefst authors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use anyhow::Result;
use clap::{Arg, ArgAction, Command};
use log::LevelFilter;
mod cli;

pub fn main() -> Result<()> {
    fn build_command() -> Command {
        let command = Command::new("bytefst")
            .about("Build and query on-disk finite state transducers.")
            .subcommand_required(true)
            .arg_required_else_help(true)
            .arg(
                Arg::new("verbose")
                    .short('v')
                    .long("verbose")
                    .action(ArgAction::Count)
                    .global(true)
                    .help("Increase logging verbosity (repeatable)."),
            );
        let command = cli::build::cli(command);
        let command = cli::lookup::cli(command);
        let command = cli::prefix::cli(command);
        let command = cli::range::cli(command);
        let command = cli::fuzzy::cli(command);
        let command = cli::dot::cli(command);
        cli::completions::cli(command)
    }

    let matches = build_command().get_matches();
    let verbosity = match matches.get_count("verbose") {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new().filter_level(verbosity).init();

    match matches.subcommand() {
        Some((cli::build::COMMAND_NAME, sub_m)) => cli::build::main(sub_m),
        Some((cli::lookup::COMMAND_NAME, sub_m)) => cli::lookup::main(sub_m),
        Some((cli::prefix::COMMAND_NAME, sub_m)) => cli::prefix::main(sub_m),
        Some((cli::range::COMMAND_NAME, sub_m)) => cli::range::main(sub_m),
        Some((cli::fuzzy::COMMAND_NAME, sub_m)) => cli::fuzzy::main(sub_m),
        Some((cli::dot::COMMAND_NAME, sub_m)) => cli::dot::main(sub_m),
        Some((cli::completions::COMMAND_NAME, sub_m)) => {
            cli::completions::main(sub_m, build_command())
        }
        _ => unreachable!(),
    }
}
