/*
 * SPDX-FileCopyrightText: 2026 The bytefst authors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use anyhow::Result;
use bytefst::builder::Builder;
use bytefst::output_stream::VecOutputStream;
use bytefst::reader::Reader;

fn build_set(keys: &[&str]) -> Result<Reader> {
    let mut builder = Builder::new(VecOutputStream::new(), false, 1 << 16)?;
    let mut sorted: Vec<&str> = keys.to_vec();
    sorted.sort_unstable();
    for key in sorted {
        builder.insert(key.as_bytes(), 0)?;
    }
    builder.finish()?;
    Ok(Reader::from_bytes(builder.into_inner().into_vec())?)
}

#[test]
fn levenshtein_finds_single_edit_neighbors() -> Result<()> {
    let reader = build_set(&["kitten", "sitting", "mitten", "sitten", "giraffe"])?;
    let mut hits: Vec<Vec<u8>> = reader
        .fuzzy("sitten", 1, 0, false)?
        .map(|(k, _)| k)
        .collect();
    hits.sort();
    // "sitting" is two edits from "sitten" (substitution + insertion), so it
    // falls outside an edit-distance-1 query even though "kitten"/"mitten"
    // (single substitution each) are within it.
    assert_eq!(
        hits,
        vec![b"kitten".to_vec(), b"mitten".to_vec(), b"sitten".to_vec()]
    );
    Ok(())
}

#[test]
fn damerau_counts_adjacent_transposition_as_one_edit() -> Result<()> {
    let reader = build_set(&["form", "from"])?;
    let hits: Vec<Vec<u8>> = reader
        .fuzzy("from", 1, 0, true)?
        .map(|(k, _)| k)
        .collect();
    let mut sorted_hits = hits.clone();
    sorted_hits.sort();
    assert_eq!(sorted_hits, vec![b"form".to_vec(), b"from".to_vec()]);

    // Under plain Levenshtein the same pair is two edits apart, so a
    // distance-1 query should match only the exact key.
    let levenshtein_hits: Vec<Vec<u8>> = reader
        .fuzzy("from", 1, 0, false)?
        .map(|(k, _)| k)
        .collect();
    assert_eq!(levenshtein_hits, vec![b"from".to_vec()]);
    Ok(())
}

#[test]
fn shared_prefix_excludes_edits_outside_the_fixed_prefix() -> Result<()> {
    let reader = build_set(&["cat", "bat", "cut"])?;
    let hits: Vec<Vec<u8>> = reader
        .fuzzy("cat", 1, 1, false)?
        .map(|(k, _)| k)
        .collect();
    // "bat" edits the very first character, which the shared_prefix=1
    // constraint forbids even though it is within edit distance 1 overall.
    assert_eq!(hits, vec![b"cat".to_vec(), b"cut".to_vec()]);
    Ok(())
}

#[test]
fn prefix_query_lists_all_extensions_in_order() -> Result<()> {
    let reader = build_set(&["car", "cart", "care", "dog", "carpet"])?;
    let hits: Vec<Vec<u8>> = reader
        .prefix(
            bytefst::bound::Bound::Unbounded,
            bytefst::bound::Bound::Unbounded,
            "car",
        )?
        .map(|(k, _)| k)
        .collect();
    assert_eq!(
        hits,
        vec![
            b"car".to_vec(),
            b"care".to_vec(),
            b"carpet".to_vec(),
            b"cart".to_vec(),
        ]
    );
    Ok(())
}
