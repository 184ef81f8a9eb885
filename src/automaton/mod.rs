/*
 * SPDX-FileCopyrightText: 2026 The bytefst authors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Query automata driving [`crate::traversal`].
//!
//! Every variant lives in one tagged enum dispatched by exhaustive `match`
//! rather than as a trait object: there is a fixed, closed set of automata
//! and no caller ever needs to plug in a custom one.
//! `Automaton` describes the query; `State` is the small piece of data
//! threaded through a single walk and advanced one FST edge byte at a time.

pub mod levenshtein;

use crate::error::Result;
use crate::utf8::{code_points, last_code_point};
use levenshtein::{validate_k, DamerauDfa, LevenshteinDfa};
use std::rc::Rc;

/// Accumulates edge bytes until they form one complete UTF-8 code point.
///
/// FST edges carry one byte each, but automata reason in code points, so a
/// multi-byte character takes several `accept` calls to resolve.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Utf8Acc {
    buf: Vec<u8>,
}

impl Utf8Acc {
    fn push(&mut self, byte: u8) -> Option<u32> {
        self.buf.push(byte);
        match last_code_point(&self.buf) {
            Some((cp, len)) if len == self.buf.len() => {
                self.buf.clear();
                Some(cp)
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub enum Automaton {
    Always,
    Str(Rc<Vec<u32>>),
    Prefix(Rc<Vec<u32>>),
    /// `Compare(query, inclusive, greater)`: greater=true is `GreaterThan`,
    /// greater=false is `LessThan`. Same state machine, mirrored comparison.
    Compare(Rc<Vec<u32>>, bool, bool),
    Levenshtein(Rc<LevenshteinDfa>),
    DamerauLevenshtein(Rc<DamerauDfa>),
    Intersect(Vec<Automaton>),
    Union(Vec<Automaton>),
    Not(Box<Automaton>),
    StartsWith(Box<Automaton>),
}

#[derive(Debug, Clone)]
pub enum State {
    Always,
    Str {
        acc: Utf8Acc,
        matched: Option<usize>,
    },
    Prefix {
        acc: Utf8Acc,
        matched: Option<usize>,
    },
    Compare {
        acc: Utf8Acc,
        matched_len: usize,
        still_equal: bool,
        resolved_match: bool,
    },
    Levenshtein {
        acc: Utf8Acc,
        node: usize,
    },
    DamerauLevenshtein {
        acc: Utf8Acc,
        node: usize,
    },
    Intersect(Vec<State>),
    Union(Vec<State>),
    Not(Box<State>),
    StartsWith(StartsWithState),
}

#[derive(Debug, Clone)]
pub enum StartsWithState {
    Running(Box<State>),
    Done,
}

impl Automaton {
    pub fn always() -> Self {
        Automaton::Always
    }

    pub fn str(s: &str) -> Self {
        Automaton::Str(Rc::new(code_points(s)))
    }

    pub fn prefix(s: &str) -> Self {
        Automaton::Prefix(Rc::new(code_points(s)))
    }

    pub fn greater_than(s: &str, inclusive: bool) -> Self {
        Automaton::Compare(Rc::new(code_points(s)), inclusive, true)
    }

    pub fn less_than(s: &str, inclusive: bool) -> Self {
        Automaton::Compare(Rc::new(code_points(s)), inclusive, false)
    }

    pub fn levenshtein(s: &str, k: usize) -> Result<Self> {
        validate_k(k)?;
        Ok(Automaton::Levenshtein(Rc::new(LevenshteinDfa::build(s, k)?)))
    }

    pub fn damerau_levenshtein(s: &str, k: usize) -> Result<Self> {
        validate_k(k)?;
        Ok(Automaton::DamerauLevenshtein(Rc::new(DamerauDfa::build(
            s, k,
        )?)))
    }

    pub fn intersect(children: Vec<Automaton>) -> Self {
        Automaton::Intersect(children)
    }

    pub fn union(children: Vec<Automaton>) -> Self {
        Automaton::Union(children)
    }

    pub fn not(inner: Automaton) -> Self {
        Automaton::Not(Box::new(inner))
    }

    pub fn starts_with(inner: Automaton) -> Self {
        Automaton::StartsWith(Box::new(inner))
    }

    pub fn start(&self) -> State {
        match self {
            Automaton::Always => State::Always,
            Automaton::Str(_) => State::Str {
                acc: Utf8Acc::default(),
                matched: Some(0),
            },
            Automaton::Prefix(_) => State::Prefix {
                acc: Utf8Acc::default(),
                matched: Some(0),
            },
            Automaton::Compare(_, _, _) => State::Compare {
                acc: Utf8Acc::default(),
                matched_len: 0,
                still_equal: true,
                resolved_match: false,
            },
            Automaton::Levenshtein(dfa) => State::Levenshtein {
                acc: Utf8Acc::default(),
                node: dfa.start(),
            },
            Automaton::DamerauLevenshtein(dfa) => State::DamerauLevenshtein {
                acc: Utf8Acc::default(),
                node: dfa.start(),
            },
            Automaton::Intersect(children) => {
                State::Intersect(children.iter().map(Automaton::start).collect())
            }
            Automaton::Union(children) => {
                State::Union(children.iter().map(Automaton::start).collect())
            }
            Automaton::Not(inner) => State::Not(Box::new(inner.start())),
            Automaton::StartsWith(inner) => {
                let s = inner.start();
                if inner.is_match(&s) {
                    State::StartsWith(StartsWithState::Done)
                } else {
                    State::StartsWith(StartsWithState::Running(Box::new(s)))
                }
            }
        }
    }

    pub fn accept(&self, state: &State, byte: u8) -> State {
        match (self, state) {
            (Automaton::Always, State::Always) => State::Always,
            (Automaton::Str(query), State::Str { acc, matched }) => {
                let mut acc = acc.clone();
                let matched = match (acc.push(byte), matched) {
                    (None, m) => *m,
                    (Some(_), None) => None,
                    (Some(cp), Some(n)) => {
                        if *n < query.len() && cp == query[*n] {
                            Some(n + 1)
                        } else {
                            None
                        }
                    }
                };
                State::Str { acc, matched }
            }
            (Automaton::Prefix(query), State::Prefix { acc, matched }) => {
                let mut acc = acc.clone();
                let matched = match (acc.push(byte), matched) {
                    (None, m) => *m,
                    (Some(_), None) => None,
                    (Some(_), Some(n)) if *n >= query.len() => Some(*n),
                    (Some(cp), Some(n)) => {
                        if cp == query[*n] {
                            Some(n + 1)
                        } else {
                            None
                        }
                    }
                };
                State::Prefix { acc, matched }
            }
            (
                Automaton::Compare(query, _inclusive, greater),
                State::Compare {
                    acc,
                    matched_len,
                    still_equal,
                    resolved_match,
                },
            ) => {
                let mut acc = acc.clone();
                if !*still_equal {
                    return State::Compare {
                        acc,
                        matched_len: *matched_len,
                        still_equal: false,
                        resolved_match: *resolved_match,
                    };
                }
                match acc.push(byte) {
                    None => State::Compare {
                        acc,
                        matched_len: *matched_len,
                        still_equal: true,
                        resolved_match: false,
                    },
                    Some(cp) => {
                        if *matched_len < query.len() {
                            let cmp = cp.cmp(&query[*matched_len]);
                            let (still_equal, resolved_match) = match cmp {
                                std::cmp::Ordering::Equal => (true, false),
                                std::cmp::Ordering::Greater => (false, *greater),
                                std::cmp::Ordering::Less => (false, !*greater),
                            };
                            State::Compare {
                                acc,
                                matched_len: matched_len + 1,
                                still_equal,
                                resolved_match,
                            }
                        } else {
                            // longer than query with query as a strict prefix: always greater
                            State::Compare {
                                acc,
                                matched_len: matched_len + 1,
                                still_equal: false,
                                resolved_match: *greater,
                            }
                        }
                    }
                }
            }
            (Automaton::Levenshtein(dfa), State::Levenshtein { acc, node }) => {
                let mut acc = acc.clone();
                let node = match acc.push(byte) {
                    None => *node,
                    Some(cp) => dfa.step(*node, cp),
                };
                State::Levenshtein { acc, node }
            }
            (Automaton::DamerauLevenshtein(dfa), State::DamerauLevenshtein { acc, node }) => {
                let mut acc = acc.clone();
                let node = match acc.push(byte) {
                    None => *node,
                    Some(cp) => dfa.step(*node, cp),
                };
                State::DamerauLevenshtein { acc, node }
            }
            (Automaton::Intersect(children), State::Intersect(states)) => State::Intersect(
                children
                    .iter()
                    .zip(states.iter())
                    .map(|(a, s)| a.accept(s, byte))
                    .collect(),
            ),
            (Automaton::Union(children), State::Union(states)) => State::Union(
                children
                    .iter()
                    .zip(states.iter())
                    .map(|(a, s)| a.accept(s, byte))
                    .collect(),
            ),
            (Automaton::Not(inner), State::Not(s)) => State::Not(Box::new(inner.accept(s, byte))),
            (Automaton::StartsWith(inner), State::StartsWith(s)) => match s {
                StartsWithState::Done => State::StartsWith(StartsWithState::Done),
                StartsWithState::Running(s) => {
                    let next = inner.accept(s, byte);
                    if inner.is_match(&next) {
                        State::StartsWith(StartsWithState::Done)
                    } else {
                        State::StartsWith(StartsWithState::Running(Box::new(next)))
                    }
                }
            },
            _ => unreachable!("Automaton/State shape mismatch"),
        }
    }

    pub fn is_match(&self, state: &State) -> bool {
        match (self, state) {
            (Automaton::Always, State::Always) => true,
            (Automaton::Str(query), State::Str { matched, .. }) => *matched == Some(query.len()),
            (Automaton::Prefix(query), State::Prefix { matched, .. }) => {
                matches!(matched, Some(n) if *n >= query.len())
            }
            (
                Automaton::Compare(query, inclusive, _greater),
                State::Compare {
                    matched_len,
                    still_equal,
                    resolved_match,
                    ..
                },
            ) => {
                if *still_equal {
                    *matched_len == query.len() && *inclusive
                } else {
                    *resolved_match
                }
            }
            (Automaton::Levenshtein(dfa), State::Levenshtein { node, .. }) => dfa.is_match(*node),
            (Automaton::DamerauLevenshtein(dfa), State::DamerauLevenshtein { node, .. }) => {
                dfa.is_match(*node)
            }
            (Automaton::Intersect(children), State::Intersect(states)) => children
                .iter()
                .zip(states.iter())
                .all(|(a, s)| a.is_match(s)),
            (Automaton::Union(children), State::Union(states)) => children
                .iter()
                .zip(states.iter())
                .any(|(a, s)| a.is_match(s)),
            (Automaton::Not(inner), State::Not(s)) => !inner.is_match(s),
            (Automaton::StartsWith(_), State::StartsWith(s)) => {
                matches!(s, StartsWithState::Done)
            }
            _ => unreachable!("Automaton/State shape mismatch"),
        }
    }

    pub fn can_match(&self, state: &State) -> bool {
        match (self, state) {
            (Automaton::Always, State::Always) => true,
            (Automaton::Str(_), State::Str { matched, .. }) => matched.is_some(),
            (Automaton::Prefix(_), State::Prefix { matched, .. }) => matched.is_some(),
            (Automaton::Compare(_, _, _), State::Compare {
                still_equal,
                resolved_match,
                ..
            }) => *still_equal || *resolved_match,
            (Automaton::Levenshtein(dfa), State::Levenshtein { node, .. }) => {
                dfa.can_match(*node)
            }
            (Automaton::DamerauLevenshtein(dfa), State::DamerauLevenshtein { node, .. }) => {
                dfa.can_match(*node)
            }
            (Automaton::Intersect(children), State::Intersect(states)) => children
                .iter()
                .zip(states.iter())
                .all(|(a, s)| a.can_match(s)),
            (Automaton::Union(children), State::Union(states)) => children
                .iter()
                .zip(states.iter())
                .any(|(a, s)| a.can_match(s)),
            // Not never prunes: `inner` still being able to match says nothing
            // about whether some other continuation fails to match it, so
            // there is no sound way to rule a subtree out here.
            (Automaton::Not(_), State::Not(_)) => true,
            (Automaton::StartsWith(inner), State::StartsWith(s)) => match s {
                StartsWithState::Done => true,
                StartsWithState::Running(s) => inner.can_match(s),
            },
            _ => unreachable!("Automaton/State shape mismatch"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(a: &Automaton, input: &str) -> State {
        let mut state = a.start();
        for &b in input.as_bytes() {
            state = a.accept(&state, b);
        }
        state
    }

    #[test]
    fn always_matches_everything() {
        let a = Automaton::always();
        assert!(a.is_match(&run(&a, "anything")));
    }

    #[test]
    fn str_requires_exact_match() {
        let a = Automaton::str("cat");
        assert!(a.is_match(&run(&a, "cat")));
        assert!(!a.is_match(&run(&a, "cats")));
        assert!(!a.is_match(&run(&a, "ca")));
    }

    #[test]
    fn prefix_matches_extensions() {
        let a = Automaton::prefix("ca");
        assert!(a.is_match(&run(&a, "cat")));
        assert!(a.is_match(&run(&a, "ca")));
        assert!(!a.is_match(&run(&a, "dog")));
    }

    #[test]
    fn greater_than_exclusive() {
        let a = Automaton::greater_than("cat", false);
        assert!(!a.is_match(&run(&a, "cat")));
        assert!(a.is_match(&run(&a, "cats")));
        assert!(a.is_match(&run(&a, "dog")));
        assert!(!a.is_match(&run(&a, "ant")));
    }

    #[test]
    fn greater_than_inclusive_matches_equal() {
        let a = Automaton::greater_than("cat", true);
        assert!(a.is_match(&run(&a, "cat")));
    }

    #[test]
    fn less_than_exclusive() {
        let a = Automaton::less_than("cat", false);
        assert!(a.is_match(&run(&a, "ant")));
        assert!(!a.is_match(&run(&a, "cat")));
        assert!(!a.is_match(&run(&a, "dog")));
    }

    #[test]
    fn not_negates() {
        let a = Automaton::not(Automaton::str("cat"));
        assert!(!a.is_match(&run(&a, "cat")));
        assert!(a.is_match(&run(&a, "dog")));
    }

    #[test]
    fn starts_with_locks_in_once_prefix_matches() {
        let a = Automaton::starts_with(Automaton::str("ca"));
        assert!(a.is_match(&run(&a, "cat")));
        assert!(a.is_match(&run(&a, "ca")));
        assert!(!a.is_match(&run(&a, "do")));
    }

    #[test]
    fn intersect_requires_all() {
        let a = Automaton::intersect(vec![Automaton::prefix("c"), Automaton::prefix("ca")]);
        assert!(a.is_match(&run(&a, "cat")));
        assert!(!a.is_match(&run(&a, "dog")));
    }

    #[test]
    fn union_requires_any() {
        let a = Automaton::union(vec![Automaton::str("cat"), Automaton::str("dog")]);
        assert!(a.is_match(&run(&a, "cat")));
        assert!(a.is_match(&run(&a, "dog")));
        assert!(!a.is_match(&run(&a, "bird")));
    }

    #[test]
    fn levenshtein_automaton_bridges_to_dfa() {
        let a = Automaton::levenshtein("cat", 1).unwrap();
        assert!(a.is_match(&run(&a, "cat")));
        assert!(a.is_match(&run(&a, "cats")));
        assert!(!a.is_match(&run(&a, "dogs")));
    }
}
