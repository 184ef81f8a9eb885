/*
 * SPDX-FileCopyrightText: 2026 The bytefst authors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Streaming FST construction.
//!
//! Keys must arrive in non-decreasing lexicographic order. The builder
//! keeps only the active spine, the still-open nodes along the longest
//! common prefix of all keys seen so far, in memory; everything below a
//! divergence point is frozen (serialized and dropped) immediately.

use crate::cache::DedupCache;
use crate::codec::{Node, NodeCodec, Transition};
use crate::error::{FstError, Result};
use crate::output_stream::OutputStream;

/// A still-open node on the construction spine.
///
/// `open_edge` is the one outgoing edge not yet resolved to a concrete
/// target offset: it leads to the next spine frame, if any. A frame with
/// `open_edge == None` is the deepest node reached by the key currently
/// being inserted.
struct SpineFrame {
    is_final: bool,
    final_output: u64,
    /// Transitions already frozen (their targets are real file offsets).
    transitions: Vec<Transition>,
    open_edge: Option<(u8, u64)>,
}

/// Streaming builder for an on-disk FST.
///
/// `S` is the output sink; use [`crate::output_stream::FileOutputStream`]
/// to build directly to disk or [`crate::output_stream::VecOutputStream`]
/// to build in memory.
pub struct Builder<S: OutputStream> {
    stream: S,
    has_output: bool,
    cache: DedupCache,
    spine: Vec<SpineFrame>,
    finished: bool,
}

impl<S: OutputStream> Builder<S> {
    /// Opens a new builder, writing the file header: an 8-byte root-offset
    /// placeholder, the `has_output` flag, and a canonical empty final node
    /// that every trivial final branch can dedup against.
    pub fn new(mut stream: S, has_output: bool, cache_bytes: usize) -> Result<Self> {
        stream.write(&0u64.to_le_bytes())?;
        stream.write(&[has_output as u8])?;

        let mut cache = DedupCache::new(cache_bytes);
        let canonical = Node {
            is_final: true,
            final_output: 0,
            transitions: Vec::new(),
        };
        let offset = NodeCodec::write(&canonical, has_output, &mut stream)?;
        cache.insert(canonical.fingerprint(), offset, canonical.cache_weight());

        Ok(Self {
            stream,
            has_output,
            cache,
            spine: vec![SpineFrame {
                is_final: false,
                final_output: 0,
                transitions: Vec::new(),
                open_edge: None,
            }],
            finished: false,
        })
    }

    /// Inserts `key` with `value`. `value` is ignored (treated as 0) when
    /// the builder is in set mode. Re-inserting an already-present key
    /// overwrites its value and logs at `info` level; it is not an error.
    ///
    /// # Panics
    /// Panics if called after [`Builder::finish`].
    pub fn insert(&mut self, key: &[u8], value: u64) -> Result<()> {
        assert!(!self.finished, "insert() called after finish()");
        let mut value = if self.has_output { value } else { 0 };
        let mut i = 0usize;
        let mut pos = 0usize;
        let mut matched = Vec::with_capacity(key.len());

        loop {
            let open_edge = self.spine[i].open_edge;
            let Some((edge_byte, edge_output)) = open_edge else {
                break;
            };
            if pos >= key.len() {
                return Err(FstError::OrderViolation {
                    previous: matched,
                    attempted: key.to_vec(),
                });
            }
            let next_byte = key[pos];
            match next_byte.cmp(&edge_byte) {
                std::cmp::Ordering::Less => {
                    return Err(FstError::OrderViolation {
                        previous: matched,
                        attempted: key.to_vec(),
                    });
                }
                std::cmp::Ordering::Greater => {
                    let frozen_offset = self.freeze_subtree(i + 1)?;
                    self.spine[i].transitions.push(Transition {
                        input: edge_byte,
                        output: edge_output,
                        target: frozen_offset,
                    });
                    self.spine[i].open_edge = None;
                    self.spine.truncate(i + 1);
                    break;
                }
                std::cmp::Ordering::Equal => {
                    let prefix = value.min(edge_output);
                    let excess = edge_output - prefix;
                    value -= prefix;
                    self.spine[i].open_edge = Some((edge_byte, prefix));
                    if excess > 0 {
                        Self::push_down(&mut self.spine[i + 1], excess);
                    }
                    matched.push(edge_byte);
                    i += 1;
                    pos += 1;
                }
            }
        }

        if pos == key.len() {
            if self.spine[i].is_final {
                log::info!(
                    "overwriting value for duplicate key {:?} during build",
                    key
                );
            }
            self.spine[i].is_final = true;
            self.spine[i].final_output = value;
        } else {
            self.append_suffix(i, key, pos, value);
        }
        Ok(())
    }

    /// Freezes all remaining spine nodes and back-patches the root offset
    /// into the file header. No further insertions are permitted after
    /// this returns; calling [`Builder::insert`] again panics.
    pub fn finish(&mut self) -> Result<()> {
        assert!(!self.finished, "finish() called twice");
        if self.spine.len() > 1 {
            let offset = self.freeze_subtree(1)?;
            if let Some((b, out)) = self.spine[0].open_edge.take() {
                self.spine[0].transitions.push(Transition {
                    input: b,
                    output: out,
                    target: offset,
                });
            }
        }
        let root_node = Node {
            is_final: self.spine[0].is_final,
            final_output: self.spine[0].final_output,
            transitions: std::mem::take(&mut self.spine[0].transitions),
        };
        let root_offset = self.write_or_dedup(&root_node)?;
        self.stream.write_at(0, &root_offset.to_le_bytes())?;
        self.finished = true;
        Ok(())
    }

    /// Recovers the underlying stream, typically to hand a
    /// [`crate::output_stream::VecOutputStream`]'s bytes to
    /// [`crate::reader::Reader::from_bytes`] without touching disk.
    pub fn into_inner(self) -> S {
        self.stream
    }

    fn push_down(frame: &mut SpineFrame, excess: u64) {
        if frame.is_final {
            frame.final_output += excess;
        }
        for t in frame.transitions.iter_mut() {
            t.output += excess;
        }
        if let Some((b, out)) = frame.open_edge {
            frame.open_edge = Some((b, out + excess));
        }
    }

    /// Freezes `self.spine[start..]` depth-first, post-order (deepest
    /// first), writing each node through the dedup cache. Returns the
    /// offset of `self.spine[start]` and removes the frozen frames.
    fn freeze_subtree(&mut self, start: usize) -> Result<u64> {
        let mut last_offset = 0u64;
        for j in (start..self.spine.len()).rev() {
            let frame = &self.spine[j];
            let mut transitions = frame.transitions.clone();
            if let Some((b, out)) = frame.open_edge {
                transitions.push(Transition {
                    input: b,
                    output: out,
                    target: last_offset,
                });
            }
            let node = Node {
                is_final: frame.is_final,
                final_output: frame.final_output,
                transitions,
            };
            last_offset = self.write_or_dedup(&node)?;
        }
        self.spine.truncate(start);
        Ok(last_offset)
    }

    fn write_or_dedup(&mut self, node: &Node) -> Result<u64> {
        let fingerprint = node.fingerprint();
        if let Some(offset) = self.cache.get(fingerprint) {
            return Ok(offset);
        }
        let offset = NodeCodec::write(node, self.has_output, &mut self.stream)?;
        self.cache.insert(fingerprint, offset, node.cache_weight());
        Ok(offset)
    }

    fn append_suffix(&mut self, at: usize, key: &[u8], pos: usize, value: u64) {
        let remaining = &key[pos..];
        let mut idx = at;
        for (offset, &byte) in remaining.iter().enumerate() {
            let is_last = offset == remaining.len() - 1;
            self.spine[idx].open_edge = Some((byte, 0));
            self.spine.push(SpineFrame {
                is_final: is_last,
                final_output: if is_last { value } else { 0 },
                transitions: Vec::new(),
                open_edge: None,
            });
            idx += 1;
        }
    }
}
