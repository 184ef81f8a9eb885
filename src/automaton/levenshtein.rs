/*
 * SPDX-FileCopyrightText: 2026 The bytefst authors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Eager DFA construction for [`super::Automaton::Levenshtein`] and
//! [`super::Automaton::DamerauLevenshtein`].
//!
//! Both DFAs are built once at construction time by BFS over reachable
//! dynamic-programming rows (the classical "Levenshtein automaton"
//! technique), then queried by index during traversal, with no recomputation
//! of edit distance while walking the FST.

use crate::error::{FstError, Result};
use crate::utf8::code_points;
use std::collections::HashMap;

/// Reachable-state DFA for bounded Levenshtein distance against `query`.
#[derive(Debug)]
pub struct LevenshteinDfa {
    query: Vec<u32>,
    k: usize,
    rows: Vec<Vec<usize>>,
    transitions: Vec<HashMap<u32, usize>>,
    other: Vec<usize>,
}

impl LevenshteinDfa {
    pub fn build(query: &str, k: usize) -> Result<Self> {
        let query = code_points(query);
        let cap = k + 1;
        let initial: Vec<usize> = (0..=query.len()).map(|j| j.min(cap)).collect();

        let mut rows = vec![initial.clone()];
        let mut transitions: Vec<HashMap<u32, usize>> = vec![HashMap::new()];
        let mut other = vec![0usize];
        let mut index: HashMap<Vec<usize>, usize> = HashMap::new();
        index.insert(initial, 0);

        let alphabet: Vec<u32> = {
            let mut seen = Vec::new();
            for &c in &query {
                if !seen.contains(&c) {
                    seen.push(c);
                }
            }
            seen
        };

        let mut frontier = vec![0usize];
        while let Some(state) = frontier.pop() {
            if !row_can_match(&rows[state], k) {
                continue;
            }
            let row = rows[state].clone();
            for &c in &alphabet {
                let next_row = step_row(&row, &query, k, c);
                let next_idx = intern(&next_row, &mut index, &mut rows, &mut transitions, &mut other, &mut frontier);
                transitions[state].insert(c, next_idx);
            }
            let other_row = step_row_other(&row, &query, k);
            let next_idx = intern(&other_row, &mut index, &mut rows, &mut transitions, &mut other, &mut frontier);
            other[state] = next_idx;
        }

        Ok(Self {
            query,
            k,
            rows,
            transitions,
            other,
        })
    }

    pub fn start(&self) -> usize {
        0
    }

    pub fn is_match(&self, state: usize) -> bool {
        *self.rows[state].last().unwrap() <= self.k
    }

    pub fn can_match(&self, state: usize) -> bool {
        row_can_match(&self.rows[state], self.k)
    }

    pub fn step(&self, state: usize, code_point: u32) -> usize {
        if let Some(&next) = self.transitions[state].get(&code_point) {
            next
        } else {
            self.other[state]
        }
    }

    pub fn query_len(&self) -> usize {
        self.query.len()
    }
}

fn row_can_match(row: &[usize], k: usize) -> bool {
    row.iter().any(|&v| v <= k)
}

fn step_row(row: &[usize], query: &[u32], k: usize, c: u32) -> Vec<usize> {
    let cap = k + 1;
    let mut new_row = vec![0usize; row.len()];
    new_row[0] = (row[0] + 1).min(cap);
    for j in 1..row.len() {
        let cost_sub = if c == query[j - 1] { 0 } else { 1 };
        let v = (row[j] + 1)
            .min(new_row[j - 1] + 1)
            .min(row[j - 1] + cost_sub);
        new_row[j] = v.min(cap);
    }
    new_row
}

fn step_row_other(row: &[usize], query: &[u32], k: usize) -> Vec<usize> {
    let cap = k + 1;
    let mut new_row = vec![0usize; row.len()];
    new_row[0] = (row[0] + 1).min(cap);
    for j in 1..row.len() {
        let v = (row[j] + 1).min(new_row[j - 1] + 1).min(row[j - 1] + 1);
        new_row[j] = v.min(cap);
        let _ = query;
    }
    new_row
}

#[allow(clippy::too_many_arguments)]
fn intern(
    row: &[usize],
    index: &mut HashMap<Vec<usize>, usize>,
    rows: &mut Vec<Vec<usize>>,
    transitions: &mut Vec<HashMap<u32, usize>>,
    other: &mut Vec<usize>,
    frontier: &mut Vec<usize>,
) -> usize {
    if let Some(&idx) = index.get(row) {
        return idx;
    }
    let idx = rows.len();
    rows.push(row.to_vec());
    transitions.push(HashMap::new());
    other.push(idx); // self-loop default until overwritten by build()
    index.insert(row.to_vec(), idx);
    frontier.push(idx);
    idx
}

/// Reachable-state DFA for bounded Damerau–Levenshtein (adjacent
/// transposition) distance against `query`.
#[derive(Debug)]
pub struct DamerauDfa {
    query: Vec<u32>,
    k: usize,
    rows: Vec<(Vec<usize>, Vec<usize>, Option<u32>)>, // (current_row, prev_row, prev_char)
    transitions: Vec<HashMap<u32, usize>>,
    other: Vec<usize>,
}

impl DamerauDfa {
    pub fn build(query: &str, k: usize) -> Result<Self> {
        let query = code_points(query);
        let cap = k + 1;
        let initial_row: Vec<usize> = (0..=query.len()).map(|j| j.min(cap)).collect();
        let sentinel_prev: Vec<usize> = vec![cap + 1; query.len() + 1];
        let initial = (initial_row, sentinel_prev, None);

        let mut rows = vec![initial.clone()];
        let mut transitions: Vec<HashMap<u32, usize>> = vec![HashMap::new()];
        let mut other = vec![0usize];
        let mut index: HashMap<(Vec<usize>, Vec<usize>, Option<u32>), usize> = HashMap::new();
        index.insert(initial, 0);

        let alphabet: Vec<u32> = {
            let mut seen = Vec::new();
            for &c in &query {
                if !seen.contains(&c) {
                    seen.push(c);
                }
            }
            seen
        };

        let mut frontier = vec![0usize];
        while let Some(state) = frontier.pop() {
            let (row, prev_row, prev_char) = rows[state].clone();
            if !row_can_match(&row, k) {
                continue;
            }
            for &c in &alphabet {
                let next_row = damerau_step(&row, &prev_row, prev_char, &query, k, c);
                let next_state = (next_row, row.clone(), Some(c));
                let next_idx = damerau_intern(&next_state, &mut index, &mut rows, &mut transitions, &mut other, &mut frontier);
                transitions[state].insert(c, next_idx);
            }
            let other_row = damerau_step_other(&row, &query, k);
            let next_state = (other_row, row.clone(), None);
            let next_idx = damerau_intern(&next_state, &mut index, &mut rows, &mut transitions, &mut other, &mut frontier);
            other[state] = next_idx;
        }

        Ok(Self {
            query,
            k,
            rows,
            transitions,
            other,
        })
    }

    pub fn start(&self) -> usize {
        0
    }

    pub fn is_match(&self, state: usize) -> bool {
        *self.rows[state].0.last().unwrap() <= self.k
    }

    pub fn can_match(&self, state: usize) -> bool {
        row_can_match(&self.rows[state].0, self.k)
    }

    pub fn step(&self, state: usize, code_point: u32) -> usize {
        if let Some(&next) = self.transitions[state].get(&code_point) {
            next
        } else {
            self.other[state]
        }
    }

    pub fn query_len(&self) -> usize {
        self.query.len()
    }
}

fn damerau_step(
    row: &[usize],
    prev_row: &[usize],
    prev_char: Option<u32>,
    query: &[u32],
    k: usize,
    c: u32,
) -> Vec<usize> {
    let cap = k + 1;
    let mut new_row = vec![0usize; row.len()];
    new_row[0] = (row[0] + 1).min(cap);
    for j in 1..row.len() {
        let cost_sub = if c == query[j - 1] { 0 } else { 1 };
        let mut v = (row[j] + 1)
            .min(new_row[j - 1] + 1)
            .min(row[j - 1] + cost_sub);
        if j >= 2 {
            if let Some(pc) = prev_char {
                if c == query[j - 2] && pc == query[j - 1] {
                    v = v.min(prev_row[j - 2] + 1);
                }
            }
        }
        new_row[j] = v.min(cap);
    }
    new_row
}

fn damerau_step_other(row: &[usize], query: &[u32], k: usize) -> Vec<usize> {
    let cap = k + 1;
    let mut new_row = vec![0usize; row.len()];
    new_row[0] = (row[0] + 1).min(cap);
    for j in 1..row.len() {
        let v = (row[j] + 1).min(new_row[j - 1] + 1).min(row[j - 1] + 1);
        new_row[j] = v.min(cap);
        let _ = query;
    }
    new_row
}

#[allow(clippy::too_many_arguments)]
fn damerau_intern(
    state: &(Vec<usize>, Vec<usize>, Option<u32>),
    index: &mut HashMap<(Vec<usize>, Vec<usize>, Option<u32>), usize>,
    rows: &mut Vec<(Vec<usize>, Vec<usize>, Option<u32>)>,
    transitions: &mut Vec<HashMap<u32, usize>>,
    other: &mut Vec<usize>,
    frontier: &mut Vec<usize>,
) -> usize {
    if let Some(&idx) = index.get(state) {
        return idx;
    }
    let idx = rows.len();
    rows.push(state.clone());
    transitions.push(HashMap::new());
    other.push(idx);
    index.insert(state.clone(), idx);
    frontier.push(idx);
    idx
}

pub(super) fn validate_k(k: usize) -> Result<()> {
    if k > 64 {
        return Err(FstError::BoundError(format!(
            "edit distance {k} is unreasonably large"
        )));
    }
    Ok(())
}
