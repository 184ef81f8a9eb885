/*
 * SPDX-FileCopyrightText: 2026 The bytefst authors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Typed errors returned by the library surface.
//!
//! CLI call sites wrap these in [`anyhow::Error`] for contextual messages;
//! the library itself never depends on `anyhow`.

use thiserror::Error;

/// All failure modes the builder, reader, and automata can produce.
#[derive(Error, Debug)]
pub enum FstError {
    /// A key was presented to [`crate::builder::Builder::insert`] that sorts
    /// strictly before the previously inserted key.
    #[error("keys must be inserted in non-decreasing order: {previous:?} was followed by {attempted:?}")]
    OrderViolation {
        previous: Vec<u8>,
        attempted: Vec<u8>,
    },

    /// The underlying output stream failed to write. The builder is poisoned
    /// after this and the partial file must be discarded.
    #[error("write error: {0}")]
    WriteError(#[from] std::io::Error),

    /// A node read from the mmap slice had an impossible discriminator byte
    /// or a payload that ran past the end of the file.
    #[error("malformed fst: {0}")]
    FormatError(String),

    /// A bound or query string was not valid UTF-8 but was used with a
    /// UTF-8-aware automaton.
    #[error("invalid utf-8 in bound: {0}")]
    BoundError(String),
}

pub type Result<T> = std::result::Result<T, FstError>;
