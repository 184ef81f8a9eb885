/*
 * SPDX-FileCopyrightText: 2026 The bytefst authors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Wire format for a single FST node: the logical [`Node`]/[`Transition`]
//! types, the [`NodeCodec`] that serializes/deserializes them, and the
//! `find_input` lookup used by both exact-match and range walks.
//!
//! Discriminator byte layout:
//!
//! ```text
//! bit 0    : is_final
//! bit 1..2 : trans_kind   00 = zero, 01 = one, 10 = many (count byte follows)
//! bit 3    : has_final_output (only when is_final, map mode, output > 0)
//! bit 4..7 : reserved, zero
//! ```

use crate::error::{FstError, Result};
use crate::output_stream::OutputStream;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

const FLAG_IS_FINAL: u8 = 0b0000_0001;
const FLAG_HAS_FINAL_OUTPUT: u8 = 0b0000_1000;
const TRANS_KIND_ZERO: u8 = 0b00;
const TRANS_KIND_ONE: u8 = 0b01;
const TRANS_KIND_MANY: u8 = 0b10;

/// A single outgoing edge of a [`Node`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Transition {
    pub input: u8,
    pub output: u64,
    pub target: u64,
}

/// A fully materialized, in-memory FST node, as built or about to be frozen.
///
/// Transitions must be sorted strictly ascending by `input`; the codec does
/// not sort them itself, it only encodes what it is given.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Node {
    pub is_final: bool,
    pub final_output: u64,
    pub transitions: Vec<Transition>,
}

impl Node {
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.hash(&mut hasher);
        hasher.finish()
    }

    /// Byte weight charged against the [`crate::cache::DedupCache`] budget
    /// for this node: one byte for `is_final`, eight for `final_output`,
    /// plus a flat 33 bytes per transition (1 input byte + 8 output + 8
    /// target, rounded up for hashmap/bookkeeping overhead).
    pub fn cache_weight(&self) -> usize {
        1 + 8 + self.transitions.len() * 33
    }
}

/// Splits the discriminator byte's transition-count field into how many
/// transition records follow and how many bytes the encoded trans_kind +
/// (optional) count byte occupies.
fn trans_kind_of(count: usize) -> u8 {
    match count {
        0 => TRANS_KIND_ZERO,
        1 => TRANS_KIND_ONE,
        _ => TRANS_KIND_MANY,
    }
}

pub struct NodeCodec;

impl NodeCodec {
    /// Serializes `node` to `stream`, returning the offset it was written
    /// at (the stream's position before this call).
    pub fn write<S: OutputStream>(node: &Node, has_output: bool, stream: &mut S) -> Result<u64> {
        let offset = stream.total_bytes_written();
        let count = node.transitions.len();
        assert!(count <= 255, "a node cannot have more than 255 transitions");

        let mut discriminator = trans_kind_of(count) << 1;
        if node.is_final {
            discriminator |= FLAG_IS_FINAL;
        }
        let has_final_output = has_output && node.is_final && node.final_output > 0;
        if has_final_output {
            discriminator |= FLAG_HAS_FINAL_OUTPUT;
        }
        stream.write(&[discriminator])?;

        if has_final_output {
            stream.write(&node.final_output.to_le_bytes())?;
        }

        if count == 1 {
            Self::write_transition(&node.transitions[0], has_output, stream)?;
        } else if count >= 2 {
            stream.write(&[count as u8])?;
            for t in &node.transitions {
                Self::write_transition(t, has_output, stream)?;
            }
        }

        Ok(offset)
    }

    fn write_transition<S: OutputStream>(
        t: &Transition,
        has_output: bool,
        stream: &mut S,
    ) -> Result<()> {
        stream.write(&[t.input])?;
        if has_output {
            stream.write(&t.output.to_le_bytes())?;
        }
        stream.write(&t.target.to_le_bytes())?;
        Ok(())
    }

    /// Decodes the node stored at `offset` in `bytes`.
    pub fn read(bytes: &[u8], offset: u64, has_output: bool) -> Result<DecodedNode<'_>> {
        let off = offset as usize;
        let discriminator = *bytes
            .get(off)
            .ok_or_else(|| FstError::FormatError(format!("node offset {offset} out of range")))?;

        let is_final = discriminator & FLAG_IS_FINAL != 0;
        let trans_kind = (discriminator >> 1) & 0b11;
        let has_final_output = discriminator & FLAG_HAS_FINAL_OUTPUT != 0;
        if discriminator & 0b1111_0000 != 0 {
            return Err(FstError::FormatError(format!(
                "reserved discriminator bits set at offset {offset}"
            )));
        }
        if trans_kind == 0b11 {
            return Err(FstError::FormatError(format!(
                "impossible trans_kind at offset {offset}"
            )));
        }

        let mut cursor = off + 1;
        let final_output = if has_final_output {
            let v = read_u64(bytes, cursor, offset)?;
            cursor += 8;
            v
        } else {
            0
        };

        let trans_stride = if has_output { 1 + 8 + 8 } else { 1 + 8 };
        let (trans_count, trans_base) = match trans_kind {
            TRANS_KIND_ZERO => (0usize, cursor),
            TRANS_KIND_ONE => (1usize, cursor),
            TRANS_KIND_MANY => {
                let count = *bytes.get(cursor).ok_or_else(|| {
                    FstError::FormatError(format!("truncated trans_count at offset {offset}"))
                })? as usize;
                if count < 2 {
                    return Err(FstError::FormatError(format!(
                        "trans_count {count} invalid for 'many' kind at offset {offset}"
                    )));
                }
                (count, cursor + 1)
            }
            _ => unreachable!(),
        };

        let end = trans_base + trans_count * trans_stride;
        if end > bytes.len() {
            return Err(FstError::FormatError(format!(
                "node at offset {offset} has truncated transition table"
            )));
        }

        Ok(DecodedNode {
            bytes,
            is_final,
            final_output,
            trans_count,
            trans_base,
            trans_stride,
            has_output,
            end,
        })
    }
}

fn read_u64(bytes: &[u8], at: usize, node_offset: u64) -> Result<u64> {
    let slice = bytes.get(at..at + 8).ok_or_else(|| {
        FstError::FormatError(format!("truncated u64 field reading node at {node_offset}"))
    })?;
    Ok(u64::from_le_bytes(slice.try_into().unwrap()))
}

/// A node decoded directly from an mmap slice, with random access to its
/// transitions without materializing a `Vec`.
#[derive(Debug, Clone, Copy)]
pub struct DecodedNode<'a> {
    bytes: &'a [u8],
    is_final: bool,
    final_output: u64,
    trans_count: usize,
    trans_base: usize,
    trans_stride: usize,
    has_output: bool,
    /// Byte offset one past the end of this node's encoding.
    end: usize,
}

impl<'a> DecodedNode<'a> {
    pub fn is_final(&self) -> bool {
        self.is_final
    }

    pub fn final_output(&self) -> u64 {
        self.final_output
    }

    pub fn trans_count(&self) -> usize {
        self.trans_count
    }

    /// The offset just past this node's own encoding. Useful only for
    /// diagnostics; normal traversal never needs it because transitions
    /// store their own target offsets.
    pub fn end_offset(&self) -> usize {
        self.end
    }

    /// Decodes the transition at `index` (0-based, ascending by input byte).
    pub fn transition(&self, index: usize) -> Transition {
        debug_assert!(index < self.trans_count);
        let at = self.trans_base + index * self.trans_stride;
        let input = self.bytes[at];
        let (output, target_at) = if self.has_output {
            let output = u64::from_le_bytes(self.bytes[at + 1..at + 9].try_into().unwrap());
            (output, at + 9)
        } else {
            (0, at + 1)
        };
        let target = u64::from_le_bytes(self.bytes[target_at..target_at + 8].try_into().unwrap());
        Transition {
            input,
            output,
            target,
        }
    }

    fn input_at(&self, index: usize) -> u8 {
        self.bytes[self.trans_base + index * self.trans_stride]
    }

    /// Finds `byte` among this node's transitions.
    ///
    /// Below 8 transitions, does a linear scan (branch-predictor friendly
    /// for the overwhelmingly common case of small fan-out); at 8 or more
    /// it switches to binary search.
    pub fn find_input(&self, byte: u8) -> (usize, bool) {
        if self.trans_count < 8 {
            for i in 0..self.trans_count {
                let b = self.input_at(i);
                if b == byte {
                    return (i, true);
                }
                if b > byte {
                    return (i, false);
                }
            }
            (self.trans_count, false)
        } else {
            let mut lo = 0usize;
            let mut hi = self.trans_count;
            while lo < hi {
                let mid = lo + (hi - lo) / 2;
                let b = self.input_at(mid);
                match b.cmp(&byte) {
                    std::cmp::Ordering::Equal => return (mid, true),
                    std::cmp::Ordering::Less => lo = mid + 1,
                    std::cmp::Ordering::Greater => hi = mid,
                }
            }
            (lo, false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output_stream::VecOutputStream;

    fn node(is_final: bool, final_output: u64, transitions: Vec<Transition>) -> Node {
        Node {
            is_final,
            final_output,
            transitions,
        }
    }

    #[test]
    fn roundtrip_leaf_no_transitions_set_mode() {
        let mut stream = VecOutputStream::new();
        let n = node(true, 0, vec![]);
        let off = NodeCodec::write(&n, false, &mut stream).unwrap();
        let decoded = NodeCodec::read(stream.as_slice(), off, false).unwrap();
        assert!(decoded.is_final());
        assert_eq!(decoded.trans_count(), 0);
    }

    #[test]
    fn roundtrip_one_transition_map_mode() {
        let mut stream = VecOutputStream::new();
        let n = node(
            false,
            0,
            vec![Transition {
                input: b'a',
                output: 42,
                target: 0,
            }],
        );
        let off = NodeCodec::write(&n, true, &mut stream).unwrap();
        let decoded = NodeCodec::read(stream.as_slice(), off, true).unwrap();
        assert_eq!(decoded.trans_count(), 1);
        let t = decoded.transition(0);
        assert_eq!(t.input, b'a');
        assert_eq!(t.output, 42);
    }

    #[test]
    fn roundtrip_many_transitions_binary_search() {
        let mut stream = VecOutputStream::new();
        let transitions: Vec<Transition> = (0u8..10)
            .map(|i| Transition {
                input: i * 2,
                output: i as u64,
                target: 9, // canonical empty-final node offset
            })
            .collect();
        let n = node(false, 0, transitions.clone());
        let off = NodeCodec::write(&n, true, &mut stream).unwrap();
        let decoded = NodeCodec::read(stream.as_slice(), off, true).unwrap();
        assert_eq!(decoded.trans_count(), 10);
        for (i, t) in transitions.iter().enumerate() {
            let (idx, found) = decoded.find_input(t.input);
            assert!(found);
            assert_eq!(idx, i);
        }
        let (_, found) = decoded.find_input(1);
        assert!(!found);
    }

    #[test]
    fn final_output_omitted_when_zero() {
        let mut stream = VecOutputStream::new();
        let n = node(true, 0, vec![]);
        let off = NodeCodec::write(&n, true, &mut stream).unwrap();
        // discriminator byte only, no final_output field: exactly 1 byte for a leaf
        assert_eq!(stream.as_slice().len() as u64 - off, 1);
    }
}
