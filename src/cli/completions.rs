/*
 * SPDX-FileCopyrightText: 2026 The bytefst authors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use anyhow::Result;
use clap::{ArgMatches, Args, Command, FromArgMatches};
use clap_complete::shells::Shell;

pub const COMMAND_NAME: &str = "completions";

#[derive(Args, Debug)]
#[command(about = "Prints shell completion scripts.", long_about = None)]
struct CliArgs {
    /// Shell to generate completions for.
    shell: Shell,
}

pub fn cli(command: Command) -> Command {
    command.subcommand(CliArgs::augment_args(Command::new(COMMAND_NAME)))
}

/// Unlike the other subcommands, completion generation needs the fully
/// assembled top-level `Command` to walk, so `main.rs` calls this directly
/// with its own built command tree rather than through the generic dispatch.
pub fn main(submatches: &ArgMatches, mut top_command: Command) -> Result<()> {
    let args = CliArgs::from_arg_matches(submatches)?;
    clap_complete::generate(
        args.shell,
        &mut top_command,
        "bytefst",
        &mut std::io::stdout(),
    );
    Ok(())
}
