/*
 * SPDX-FileCopyrightText: 2026 The bytefst authors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Stackful depth-first walk over a frozen FST, bounded by a `[min, max]`
//! key range and filtered by an [`Automaton`].
//!
//! The walk never recurses: each open node is an explicit [`Frame`] on a
//! `Vec`-backed stack, so a deep or wide FST cannot blow the call stack.
//! Transitions are stored sorted ascending by input byte, so a depth-first
//! walk that always advances through a node's children in order already
//! visits final states in ascending lexicographic order, so no separate sort
//! step is needed.

use crate::automaton::{Automaton, State};
use crate::bound::Bound;
use crate::codec::NodeCodec;
use crate::error::Result;

struct Frame {
    offset: u64,
    iter_idx: usize,
    trans_count: usize,
    state: State,
    output_so_far: u64,
    visited_final: bool,
}

/// Iterator over `(key, value)` pairs in `[min, max]` accepted by an
/// [`Automaton`], yielded in ascending lexicographic key order.
///
/// The plain [`Iterator`] implementation silently stops if the underlying
/// bytes turn out to be malformed partway through a walk (a corrupted or
/// truncated file handed to [`crate::reader::Reader::open`], never produced
/// by a well-formed build). Callers that need to distinguish "exhausted"
/// from "stopped because the file is broken" should drive the walk with
/// [`Traversal::try_next`] instead, which surfaces the
/// [`FstError`](crate::error::FstError) once and then reports the traversal
/// as poisoned on every subsequent call.
pub struct Traversal<'a> {
    bytes: &'a [u8],
    has_output: bool,
    automaton: Automaton,
    min: Bound,
    max: Bound,
    stack: Vec<Frame>,
    key: Vec<u8>,
    poisoned: bool,
}

impl<'a> Traversal<'a> {
    pub fn new(
        bytes: &'a [u8],
        root: u64,
        has_output: bool,
        automaton: Automaton,
        min: Bound,
        max: Bound,
    ) -> Result<Self> {
        let mut t = Traversal {
            bytes,
            has_output,
            automaton,
            min,
            max,
            stack: Vec::new(),
            key: Vec::new(),
            poisoned: false,
        };
        t.seek_min(root)?;
        Ok(t)
    }

    /// Like [`Iterator::next`], but surfaces a malformed-file error instead
    /// of silently stopping. Once this returns `Some(Err(_))` every further
    /// call returns `None`: the traversal does not attempt to resume past
    /// corrupted bytes.
    pub fn try_next(&mut self) -> Option<Result<(Vec<u8>, u64)>> {
        if self.poisoned {
            return None;
        }
        match self.advance() {
            Ok(item) => Ok(item).transpose(),
            Err(e) => {
                self.poisoned = true;
                Some(Err(e))
            }
        }
    }

    /// Descends directly along `min`'s bytes rather than walking every key
    /// lexicographically smaller than it from the root. Ancestors along the
    /// path are pushed with `visited_final = true`: a key strictly shorter
    /// than `min` can never itself be `>= min`, so there is nothing to check.
    fn seek_min(&mut self, root: u64) -> Result<()> {
        let state = self.automaton.start();
        if self.min.is_unbounded() {
            let decoded = NodeCodec::read(self.bytes, root, self.has_output)?;
            self.stack.push(Frame {
                offset: root,
                iter_idx: 0,
                trans_count: decoded.trans_count(),
                state,
                output_so_far: 0,
                visited_final: false,
            });
            return Ok(());
        }

        let min_bytes = self.min.bytes().unwrap().to_vec();
        let mut offset = root;
        let mut state = state;
        let mut output_so_far = 0u64;
        let mut depth = 0usize;

        loop {
            let decoded = NodeCodec::read(self.bytes, offset, self.has_output)?;
            let trans_count = decoded.trans_count();

            if depth == min_bytes.len() {
                self.stack.push(Frame {
                    offset,
                    iter_idx: 0,
                    trans_count,
                    state,
                    output_so_far,
                    visited_final: false,
                });
                return Ok(());
            }

            let (idx, found) = decoded.find_input(min_bytes[depth]);
            if !found {
                self.stack.push(Frame {
                    offset,
                    iter_idx: idx,
                    trans_count,
                    state,
                    output_so_far,
                    visited_final: true,
                });
                return Ok(());
            }

            let t = decoded.transition(idx);
            let next_state = self.automaton.accept(&state, t.input);
            self.stack.push(Frame {
                offset,
                iter_idx: idx + 1,
                trans_count,
                state,
                output_so_far,
                visited_final: true,
            });
            self.key.push(t.input);
            offset = t.target;
            output_so_far += t.output;
            state = next_state;
            depth += 1;
        }
    }
}

impl<'a> Traversal<'a> {
    fn advance(&mut self) -> Result<Option<(Vec<u8>, u64)>> {
        loop {
            let Some(top) = self.stack.last_mut() else {
                return Ok(None);
            };

            if !top.visited_final {
                top.visited_final = true;
                let offset = top.offset;
                let output_so_far = top.output_so_far;
                let decoded = NodeCodec::read(self.bytes, offset, self.has_output)?;
                if decoded.is_final()
                    && self.automaton.is_match(&top.state)
                    && !self.min.precedes(&self.key)
                    && !self.max.exceeded_by(&self.key)
                {
                    let total = output_so_far + decoded.final_output();
                    return Ok(Some((self.key.clone(), total)));
                }
                continue;
            }

            let offset = top.offset;
            if top.iter_idx >= top.trans_count {
                self.stack.pop();
                self.key.pop();
                continue;
            }

            let decoded = NodeCodec::read(self.bytes, offset, self.has_output)?;
            let idx = top.iter_idx;
            top.iter_idx += 1;
            let t = decoded.transition(idx);

            self.key.push(t.input);
            if self.max.exceeded_by(&self.key) {
                // transitions are sorted ascending: every remaining sibling
                // also exceeds max, so the whole rest of this node is dead.
                self.key.pop();
                let top = self.stack.last_mut().unwrap();
                top.iter_idx = top.trans_count;
                continue;
            }

            let parent_state = &self.stack.last().unwrap().state;
            let next_state = self.automaton.accept(parent_state, t.input);
            if !self.automaton.can_match(&next_state) {
                self.key.pop();
                continue;
            }

            let output_so_far = self.stack.last().unwrap().output_so_far + t.output;
            let child = NodeCodec::read(self.bytes, t.target, self.has_output)?;
            self.stack.push(Frame {
                offset: t.target,
                iter_idx: 0,
                trans_count: child.trans_count(),
                state: next_state,
                output_so_far,
                visited_final: false,
            });
        }
    }
}

impl<'a> Iterator for Traversal<'a> {
    type Item = (Vec<u8>, u64);

    fn next(&mut self) -> Option<Self::Item> {
        self.try_next().and_then(|r| r.ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::Builder;
    use crate::output_stream::VecOutputStream;

    fn build_map(pairs: &[(&str, u64)]) -> Vec<u8> {
        let mut b = Builder::new(VecOutputStream::new(), true, 4096).unwrap();
        for (k, v) in pairs {
            b.insert(k.as_bytes(), *v).unwrap();
        }
        b.finish().unwrap();
        b.into_inner().into_vec()
    }

    fn root_and_flag(bytes: &[u8]) -> (u64, bool) {
        let root = u64::from_le_bytes(bytes[0..8].try_into().unwrap());
        (root, bytes[8] != 0)
    }

    #[test]
    fn ascending_order_preserved() {
        let bytes = build_map(&[("a", 1), ("b", 2), ("c", 3)]);
        let (root, has_output) = root_and_flag(&bytes);
        let t = Traversal::new(
            &bytes,
            root,
            has_output,
            Automaton::always(),
            Bound::Unbounded,
            Bound::Unbounded,
        )
        .unwrap();
        let keys: Vec<String> = t
            .map(|(k, _)| String::from_utf8(k).unwrap())
            .collect();
        assert_eq!(keys, vec!["a", "b", "c"]);
    }

    #[test]
    fn min_seek_skips_smaller_keys() {
        let bytes = build_map(&[("a", 1), ("b", 2), ("c", 3), ("d", 4)]);
        let (root, has_output) = root_and_flag(&bytes);
        let t = Traversal::new(
            &bytes,
            root,
            has_output,
            Automaton::always(),
            Bound::Included(b"b".to_vec()),
            Bound::Unbounded,
        )
        .unwrap();
        let keys: Vec<String> = t.map(|(k, _)| String::from_utf8(k).unwrap()).collect();
        assert_eq!(keys, vec!["b", "c", "d"]);
    }

    #[test]
    fn max_bound_excludes_greater_keys() {
        let bytes = build_map(&[("a", 1), ("b", 2), ("c", 3), ("d", 4)]);
        let (root, has_output) = root_and_flag(&bytes);
        let t = Traversal::new(
            &bytes,
            root,
            has_output,
            Automaton::always(),
            Bound::Unbounded,
            Bound::Excluded(b"c".to_vec()),
        )
        .unwrap();
        let keys: Vec<String> = t.map(|(k, _)| String::from_utf8(k).unwrap()).collect();
        assert_eq!(keys, vec!["a", "b"]);
    }

    #[test]
    fn str_automaton_filters_to_one_hit() {
        let bytes = build_map(&[("car", 2), ("cat", 1), ("dog", 3)]);
        let (root, has_output) = root_and_flag(&bytes);
        let t = Traversal::new(
            &bytes,
            root,
            has_output,
            Automaton::str("car"),
            Bound::Unbounded,
            Bound::Unbounded,
        )
        .unwrap();
        let hits: Vec<(Vec<u8>, u64)> = t.collect();
        assert_eq!(hits, vec![(b"car".to_vec(), 2)]);
    }

    #[test]
    fn values_include_edge_and_final_output() {
        let bytes = build_map(&[("ab", 10), ("ac", 20)]);
        let (root, has_output) = root_and_flag(&bytes);
        let t = Traversal::new(
            &bytes,
            root,
            has_output,
            Automaton::always(),
            Bound::Unbounded,
            Bound::Unbounded,
        )
        .unwrap();
        let hits: std::collections::HashMap<Vec<u8>, u64> = t.collect();
        assert_eq!(hits[&b"ab".to_vec()], 10);
        assert_eq!(hits[&b"ac".to_vec()], 20);
    }

    #[test]
    fn try_next_reports_format_error_then_stays_poisoned() {
        use crate::codec::{Node, Transition};
        use crate::error::FstError;

        let mut stream = VecOutputStream::new();
        NodeCodec::write(&Node::default(), true, &mut stream).unwrap();
        let root_off = NodeCodec::write(
            &Node {
                is_final: false,
                final_output: 0,
                transitions: vec![Transition {
                    input: b'a',
                    output: 0,
                    target: 9_999, // well past the end of `stream`
                }],
            },
            true,
            &mut stream,
        )
        .unwrap();
        let bytes = stream.into_vec();

        let mut t = Traversal::new(
            &bytes,
            root_off,
            true,
            Automaton::always(),
            Bound::Unbounded,
            Bound::Unbounded,
        )
        .unwrap();
        assert!(matches!(t.try_next(), Some(Err(FstError::FormatError(_)))));
        assert!(t.try_next().is_none());
        assert_eq!(t.next(), None);
    }
}
