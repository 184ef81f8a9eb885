/*
 * SPDX-FileCopyrightText: 2026 The bytefst authors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Command line interface structs and functions, organized by subcommands.

pub mod build;
pub mod completions;
pub mod dot;
pub mod fuzzy;
pub mod lookup;
pub mod prefix;
pub mod range;

#[cfg(feature = "serde")]
#[derive(serde::Serialize)]
struct Hit {
    key: String,
    value: Option<u64>,
}

/// Shared result printer for the `match`/`prefix`/`range`/`fuzzy` subcommands:
/// tab-separated `key\tvalue` by default, or a JSON array with `--json`.
pub fn print_hits(
    hits: impl Iterator<Item = (Vec<u8>, u64)>,
    has_output: bool,
    json: bool,
) -> anyhow::Result<()> {
    if json {
        #[cfg(feature = "serde")]
        {
            let rows: Vec<Hit> = hits
                .map(|(key, value)| Hit {
                    key: String::from_utf8_lossy(&key).into_owned(),
                    value: has_output.then_some(value),
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&rows)?);
            return Ok(());
        }
        #[cfg(not(feature = "serde"))]
        anyhow::bail!("--json requires the `serde` feature");
    }

    for (key, value) in hits {
        if has_output {
            println!("{}\t{value}", String::from_utf8_lossy(&key));
        } else {
            println!("{}", String::from_utf8_lossy(&key));
        }
    }
    Ok(())
}
