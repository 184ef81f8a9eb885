/*
 * SPDX-FileCopyrightText: 2026 The bytefst authors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use anyhow::Result;
use bytefst::builder::Builder;
use bytefst::output_stream::VecOutputStream;
use bytefst::reader::Reader;

#[test]
fn dot_output_names_every_key_as_a_path_from_the_root() -> Result<()> {
    let mut builder = Builder::new(VecOutputStream::new(), true, 1 << 16)?;
    builder.insert(b"car", 2)?;
    builder.insert(b"cat", 1)?;
    builder.insert(b"dog", 3)?;
    builder.finish()?;
    let reader = Reader::from_bytes(builder.into_inner().into_vec())?;

    let mut dot = String::new();
    reader.dot(&mut dot)?;

    assert!(dot.trim_start().starts_with("digraph"));
    assert!(dot.trim_end().ends_with('}'));
    // "cat" and "car" share the prefix "ca", so the root has exactly two
    // outgoing edges: one for 'c' (leading into the shared "ca" spine) and
    // one for 'd' (leading into "dog").
    let root_edges = dot.lines().filter(|l| l.contains("n0 ->")).count();
    assert_eq!(root_edges, 2);
    Ok(())
}
