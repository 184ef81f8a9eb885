/*
 * SPDX-FileCopyrightText: 2026 The bytefst authors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Read-side entry point: opens a frozen FST (from disk or from memory) and
//! hands out [`crate::traversal::Traversal`] iterators over it.
//!
//! The disk-backed constructor mmaps the file read-only: an immutable
//! `&[u8]` view over the mapping, shareable across threads via `Arc`.

use crate::automaton::Automaton;
use crate::bound::Bound;
use crate::error::{FstError, Result};
use crate::traversal::Traversal;
use mmap_rs::{Mmap, MmapOptions};
use std::fs::File;
use std::path::Path;
use std::sync::Arc;

enum Backing {
    Owned(Vec<u8>),
    Mapped(Arc<Mmap>),
}

impl Backing {
    fn as_slice(&self) -> &[u8] {
        match self {
            Backing::Owned(v) => v.as_slice(),
            // `Mmap` exposes raw pointer + length rather than a direct slice
            // accessor; the mapping outlives every slice handed out from it.
            Backing::Mapped(m) => unsafe { std::slice::from_raw_parts(m.as_ptr(), m.len()) },
        }
    }
}

/// A frozen, queryable FST.
pub struct Reader {
    backing: Backing,
    root: u64,
    has_output: bool,
}

impl std::fmt::Debug for Reader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reader")
            .field("root", &self.root)
            .field("has_output", &self.has_output)
            .finish()
    }
}

const HEADER_LEN: usize = 9; // 8-byte root offset + 1-byte has_output flag

impl Reader {
    /// Memory-maps `path` read-only. The mapping is reference-counted, so a
    /// `Reader` can be cheaply cloned-by-`Arc` across threads; `Reader`
    /// itself is `Send + Sync` because the map is immutable.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let len = file.metadata()?.len() as usize;
        let mmap = unsafe {
            MmapOptions::new(len)
                .map_err(|e| FstError::FormatError(format!("cannot size mmap: {e}")))?
                .with_file(&file, 0)
                .map()
                .map_err(|e| FstError::FormatError(format!("cannot mmap fst file: {e}")))?
        };
        Self::from_backing(Backing::Mapped(Arc::new(mmap)))
    }

    /// Wraps an in-memory byte buffer, e.g. bytes recovered from
    /// [`crate::builder::Builder::into_inner`] via a
    /// [`crate::output_stream::VecOutputStream`]. Accepts anything
    /// convertible to `Vec<u8>`, so an owned buffer is taken without a copy
    /// while a borrowed slice is copied in.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Result<Self> {
        Self::from_backing(Backing::Owned(bytes.into()))
    }

    fn from_backing(backing: Backing) -> Result<Self> {
        let bytes = backing.as_slice();
        if bytes.len() < HEADER_LEN {
            return Err(FstError::FormatError(
                "file shorter than the fst header".into(),
            ));
        }
        let root = u64::from_le_bytes(bytes[0..8].try_into().unwrap());
        let has_output = bytes[8] != 0;
        Ok(Self {
            backing,
            root,
            has_output,
        })
    }

    pub fn has_output(&self) -> bool {
        self.has_output
    }

    pub fn root(&self) -> u64 {
        self.root
    }

    pub fn bytes(&self) -> &[u8] {
        self.backing.as_slice()
    }

    /// All keys in `[min, max]`, in ascending order.
    pub fn range(&self, min: Bound, max: Bound) -> Traversal<'_> {
        Traversal::new(
            self.bytes(),
            self.root,
            self.has_output,
            Automaton::always(),
            min,
            max,
        )
        .expect("a reader's own root offset is always valid")
    }

    /// Keys in `[min, max]` equal to `s`.
    pub fn matching(&self, min: Bound, max: Bound, s: &str) -> Result<Traversal<'_>> {
        Traversal::new(
            self.bytes(),
            self.root,
            self.has_output,
            Automaton::str(s),
            min,
            max,
        )
    }

    /// Keys in `[min, max]` that start with `prefix`.
    pub fn prefix(&self, min: Bound, max: Bound, prefix: &str) -> Result<Traversal<'_>> {
        Traversal::new(
            self.bytes(),
            self.root,
            self.has_output,
            Automaton::prefix(prefix),
            min,
            max,
        )
    }

    /// Keys within `edit_distance` of `s`, optionally additionally required
    /// to share an exact `shared_prefix`-character-long prefix with `s`
    /// (a common tightening for fuzzy search over large dictionaries), using
    /// either plain Levenshtein distance or Damerau–Levenshtein (adjacent
    /// transpositions count as a single edit) depending on `use_damerau`.
    pub fn fuzzy(
        &self,
        s: &str,
        edit_distance: usize,
        shared_prefix: usize,
        use_damerau: bool,
    ) -> Result<Traversal<'_>> {
        let fuzzy_part = if use_damerau {
            Automaton::damerau_levenshtein(s, edit_distance)?
        } else {
            Automaton::levenshtein(s, edit_distance)?
        };

        let automaton = if shared_prefix > 0 {
            let chars: Vec<char> = s.chars().collect();
            let prefix_len = shared_prefix.min(chars.len());
            let prefix: String = chars[..prefix_len].iter().collect();
            Automaton::intersect(vec![
                Automaton::starts_with(Automaton::str(&prefix)),
                fuzzy_part,
            ])
        } else {
            fuzzy_part
        };

        Traversal::new(
            self.bytes(),
            self.root,
            self.has_output,
            automaton,
            Bound::Unbounded,
            Bound::Unbounded,
        )
    }

    /// Renders the whole FST as Graphviz DOT.
    pub fn dot(&self, sink: &mut impl std::fmt::Write) -> Result<()> {
        crate::dot::write_dot(self.bytes(), self.root, self.has_output, sink)
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

    #[test]
    fn from_bytes_rejects_truncated_header() {
        let err = Reader::from_bytes(vec![1, 2, 3]).unwrap_err();
        assert!(matches!(err, FstError::FormatError(_)));
    }

    #[test]
    fn matching_finds_exact_key_only() {
        let bytes = build_map(&[("car", 2), ("cat", 1), ("dog", 3)]);
        let reader = Reader::from_bytes(bytes).unwrap();
        let hits: Vec<_> = reader
            .matching(Bound::Unbounded, Bound::Unbounded, "car")
            .unwrap()
            .collect();
        assert_eq!(hits, vec![(b"car".to_vec(), 2)]);
    }

    #[test]
    fn prefix_finds_all_extensions() {
        let bytes = build_map(&[("car", 2), ("cat", 1), ("dog", 3)]);
        let reader = Reader::from_bytes(bytes).unwrap();
        let hits: Vec<Vec<u8>> = reader
            .prefix(Bound::Unbounded, Bound::Unbounded, "ca")
            .unwrap()
            .map(|(k, _)| k)
            .collect();
        assert_eq!(hits, vec![b"car".to_vec(), b"cat".to_vec()]);
    }

    #[test]
    fn fuzzy_finds_close_keys() {
        let bytes = build_map(&[("cat", 1), ("cats", 2), ("dog", 3)]);
        let reader = Reader::from_bytes(bytes).unwrap();
        let hits: Vec<Vec<u8>> = reader
            .fuzzy("cat", 1, 0, false)
            .unwrap()
            .map(|(k, _)| k)
            .collect();
        assert_eq!(hits, vec![b"cat".to_vec(), b"cats".to_vec()]);
    }

    #[test]
    fn fuzzy_shared_prefix_narrows_search() {
        let bytes = build_map(&[("bat", 2), ("cat", 1)]);
        let reader = Reader::from_bytes(bytes).unwrap();
        let hits: Vec<Vec<u8>> = reader
            .fuzzy("cat", 1, 1, false)
            .unwrap()
            .map(|(k, _)| k)
            .collect();
        assert_eq!(hits, vec![b"cat".to_vec()]);
    }
}
