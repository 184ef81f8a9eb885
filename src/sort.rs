/*
 * SPDX-FileCopyrightText: 2026 The bytefst authors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Minimal external sort for unsorted CLI input.
//!
//! [`crate::builder::Builder`] requires non-decreasing key order; this
//! module is the thin helper that gets unsorted lines of `key\tvalue` (or
//! bare `key`, in set mode) into that order before they reach the builder.
//! It is not a general-purpose parallel sorter: below `memory_lines` it
//! sorts in memory, above it spills sorted runs to temp files and performs
//! a k-way merge. `threads` only chooses between a single `sort_unstable`
//! and a chunked-then-merged sort of the in-memory path; it never spawns
//! an actual thread.

use crate::error::Result;
use dary_heap::OctonaryHeap;
use itertools::Itertools;
use std::cmp::Reverse;
use std::io::{BufRead, BufWriter, Write};
use tempfile::NamedTempFile;

#[derive(Debug, Clone)]
pub struct SortOptions {
    pub memory_lines: usize,
    pub threads: usize,
}

impl Default for SortOptions {
    fn default() -> Self {
        Self {
            memory_lines: 1_000_000,
            threads: 1,
        }
    }
}

/// Reads newline-delimited records from `input`, sorts them lexicographically,
/// and writes them newline-delimited to `output`.
pub fn sort_lines<R: BufRead, W: Write>(input: R, output: W, opts: &SortOptions) -> Result<()> {
    let mut writer = BufWriter::new(output);
    let mut lines = input.lines();

    let mut runs: Vec<NamedTempFile> = Vec::new();
    let mut chunk: Vec<String> = Vec::with_capacity(opts.memory_lines.min(1 << 16));

    loop {
        chunk.clear();
        while chunk.len() < opts.memory_lines {
            match lines.next() {
                Some(line) => chunk.push(line?),
                None => break,
            }
        }
        if chunk.is_empty() {
            break;
        }
        let at_eof = chunk.len() < opts.memory_lines;
        if at_eof && runs.is_empty() {
            sort_chunk(&mut chunk, opts.threads);
            for line in &chunk {
                writeln!(writer, "{line}")?;
            }
            return Ok(());
        }
        sort_chunk(&mut chunk, opts.threads);
        let mut run = NamedTempFile::new()?;
        {
            let mut w = BufWriter::new(run.as_file_mut());
            for line in &chunk {
                writeln!(w, "{line}")?;
            }
            w.flush()?;
        }
        runs.push(run);
        if at_eof {
            break;
        }
    }

    merge_runs(runs, &mut writer)
}

fn sort_chunk(chunk: &mut [String], threads: usize) {
    if threads <= 1 || chunk.len() < threads * 2 {
        chunk.sort_unstable();
        return;
    }
    let chunk_size = chunk.len().div_ceil(threads);
    let mut sorted_parts: Vec<Vec<String>> = chunk
        .iter()
        .cloned()
        .chunks(chunk_size)
        .into_iter()
        .map(|c| {
            let mut v: Vec<String> = c.collect();
            v.sort_unstable();
            v
        })
        .collect();
    let merged: Vec<String> = sorted_parts
        .iter_mut()
        .map(|v| std::mem::take(v).into_iter())
        .kmerge()
        .collect();
    chunk.clone_from_slice(&merged);
}

struct RunCursor {
    lines: std::io::Lines<std::io::BufReader<std::fs::File>>,
    current: String,
}

impl PartialEq for RunCursor {
    fn eq(&self, other: &Self) -> bool {
        self.current == other.current
    }
}
impl Eq for RunCursor {}
impl PartialOrd for RunCursor {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for RunCursor {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.current.cmp(&other.current)
    }
}

fn merge_runs<W: Write>(runs: Vec<NamedTempFile>, writer: &mut W) -> Result<()> {
    let mut heap: OctonaryHeap<Reverse<RunCursor>> = OctonaryHeap::new();
    for run in runs {
        let file = run.reopen()?;
        let mut lines = std::io::BufReader::new(file).lines();
        if let Some(first) = lines.next() {
            heap.push(Reverse(RunCursor {
                lines,
                current: first?,
            }));
        }
    }

    while let Some(Reverse(mut cursor)) = heap.pop() {
        writeln!(writer, "{}", cursor.current)?;
        if let Some(next) = cursor.lines.next() {
            cursor.current = next?;
            heap.push(Reverse(cursor));
        }
    }
    Ok(())
}
