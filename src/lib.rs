/*
 * SPDX-FileCopyrightText: 2026 The bytefst authors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

#![doc = include_str!("../README.md")]
#![deny(unstable_features)]
#![deny(trivial_casts)]
#![deny(unconditional_recursion)]
#![deny(clippy::empty_loop)]
#![deny(unreachable_code)]
#![deny(unreachable_pub)]
#![deny(unreachable_patterns)]
#![deny(unused_macro_rules)]
#![deny(unused_doc_comments)]

pub mod automaton;
pub mod bound;
pub mod builder;
pub mod cache;
pub mod codec;
pub mod dot;
pub mod error;
pub mod output_stream;
pub mod reader;
pub mod sort;
pub mod traversal;
pub mod utf8;

/// Prelude module to import everything most callers need from this crate.
pub mod prelude {
    pub use crate::automaton::Automaton;
    pub use crate::bound::Bound;
    pub use crate::builder::Builder;
    pub use crate::error::{FstError, Result};
    pub use crate::output_stream::{FileOutputStream, OutputStream, VecOutputStream};
    pub use crate::reader::Reader;
}
