/*
 * SPDX-FileCopyrightText: 2026 The bytefst authors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Graphviz DOT export of a frozen FST, for debugging and documentation.
//!
//! A single recursive pass from the root, deduplicating visited nodes by
//! their on-disk offset (the same offset can be reached by more than one
//! path once the builder's suffix sharing has run).

use crate::codec::NodeCodec;
use crate::error::Result;
use crate::utf8::lead_byte_len;
use std::collections::HashMap;
use std::fmt::Write as _;

pub fn write_dot(
    bytes: &[u8],
    root: u64,
    has_output: bool,
    sink: &mut impl std::fmt::Write,
) -> Result<()> {
    writeln!(sink, "digraph fst {{").map_err(to_fmt_err)?;
    writeln!(sink, "  rankdir=LR;").map_err(to_fmt_err)?;
    let mut seq = HashMap::new();
    let mut next_id = 0u32;
    visit(bytes, root, has_output, sink, &mut seq, &mut next_id)?;
    writeln!(sink, "}}").map_err(to_fmt_err)?;
    Ok(())
}

fn to_fmt_err(e: std::fmt::Error) -> crate::error::FstError {
    crate::error::FstError::FormatError(format!("dot export failed: {e}"))
}

fn visit(
    bytes: &[u8],
    offset: u64,
    has_output: bool,
    sink: &mut impl std::fmt::Write,
    seq: &mut HashMap<u64, u32>,
    next_id: &mut u32,
) -> Result<u32> {
    if let Some(&id) = seq.get(&offset) {
        return Ok(id);
    }
    let id = *next_id;
    *next_id += 1;
    seq.insert(offset, id);

    let node = NodeCodec::read(bytes, offset, has_output)?;
    let mut label = format!("{id}");
    if has_output && node.is_final() && node.final_output() > 0 {
        let _ = write!(label, "/{}", node.final_output());
    }
    if node.is_final() {
        label.push_str(",peripheries=2");
    }
    writeln!(sink, "  n{id} [label=\"{label}\"];").map_err(to_fmt_err)?;

    for i in 0..node.trans_count() {
        let t = node.transition(i);
        let target_id = visit(bytes, t.target, has_output, sink, seq, next_id)?;
        let edge_label = edge_label(bytes, offset, has_output, i, t.input);
        let mut label = edge_label;
        if has_output && t.output > 0 {
            let _ = write!(label, "/{}", t.output);
        }
        writeln!(sink, "  n{id} -> n{target_id} [label=\"{label}\"];").map_err(to_fmt_err)?;
    }
    Ok(id)
}

/// Renders one transition's byte as a printable ASCII character, or
/// `0x<hex>[<codepoint>]` when it isn't. For a non-ASCII lead byte, attempts
/// to reassemble the full code point by peeking forward through the chain of
/// single-child continuation-byte edges the builder would have produced for
/// a multi-byte UTF-8 character; falls back to plain hex if that chain isn't
/// there (binary keys, or a lead byte with more than one outgoing edge).
fn edge_label(bytes: &[u8], node_offset: u64, has_output: bool, trans_idx: usize, byte: u8) -> String {
    if byte.is_ascii_graphic() || byte == b' ' {
        return (byte as char).to_string();
    }

    let Some(len) = lead_byte_len(byte) else {
        return format!("0x{byte:02x}");
    };
    if len == 1 {
        return format!("0x{byte:02x}");
    }

    let mut seq = vec![byte];
    let mut offset = node_offset;
    let mut idx = trans_idx;
    while seq.len() < len {
        let Ok(node) = NodeCodec::read(bytes, offset, has_output) else {
            return format!("0x{byte:02x}");
        };
        let t = node.transition(idx);
        let next = t.target;
        let Ok(child) = NodeCodec::read(bytes, next, has_output) else {
            return format!("0x{byte:02x}");
        };
        if child.trans_count() != 1 {
            return format!("0x{byte:02x}");
        }
        let next_t = child.transition(0);
        seq.push(next_t.input);
        offset = next;
        idx = 0;
    }

    match crate::utf8::last_code_point(&seq) {
        Some((cp, consumed)) if consumed == seq.len() => {
            format!("0x{byte:02x}[U+{cp:04X}]")
        }
        _ => format!("0x{byte:02x}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::Builder;
    use crate::output_stream::VecOutputStream;

    #[test]
    fn produces_well_formed_digraph() {
        let mut b = Builder::new(VecOutputStream::new(), true, 4096).unwrap();
        b.insert(b"car", 2).unwrap();
        b.insert(b"cat", 1).unwrap();
        b.finish().unwrap();
        let bytes = b.into_inner().into_vec();
        let root = u64::from_le_bytes(bytes[0..8].try_into().unwrap());
        let has_output = bytes[8] != 0;

        let mut out = String::new();
        write_dot(&bytes, root, has_output, &mut out).unwrap();
        assert!(out.starts_with("digraph fst {"));
        assert!(out.trim_end().ends_with('}'));
        assert!(out.contains("peripheries=2"));
    }
}
