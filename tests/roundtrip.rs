/*
 * SPDX-FileCopyrightText: 2026 The bytefst authors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use anyhow::Result;
use bytefst::bound::Bound;
use bytefst::builder::Builder;
use bytefst::output_stream::VecOutputStream;
use bytefst::reader::Reader;

fn build_map(pairs: &[(&str, u64)]) -> Result<Vec<u8>> {
    let mut builder = Builder::new(VecOutputStream::new(), true, 1 << 16)?;
    for (key, value) in pairs {
        builder.insert(key.as_bytes(), *value)?;
    }
    builder.finish()?;
    Ok(builder.into_inner().into_vec())
}

fn build_set(keys: &[&str]) -> Result<Vec<u8>> {
    let mut builder = Builder::new(VecOutputStream::new(), false, 1 << 16)?;
    for key in keys {
        builder.insert(key.as_bytes(), 0)?;
    }
    builder.finish()?;
    Ok(builder.into_inner().into_vec())
}

#[test]
fn map_round_trips_every_key_in_order() -> Result<()> {
    let pairs = [
        ("apple", 1),
        ("application", 2),
        ("apply", 3),
        ("banana", 4),
        ("band", 5),
    ];
    let bytes = build_map(&pairs)?;
    let reader = Reader::from_bytes(bytes)?;
    assert!(reader.has_output());

    let got: Vec<(Vec<u8>, u64)> = reader.range(Bound::Unbounded, Bound::Unbounded).collect();
    let mut want: Vec<(Vec<u8>, u64)> = pairs
        .iter()
        .map(|(k, v)| (k.as_bytes().to_vec(), *v))
        .collect();
    want.sort();
    assert_eq!(got, want);
    Ok(())
}

#[test]
fn set_mode_reports_no_output() -> Result<()> {
    let bytes = build_set(&["a", "b", "c"])?;
    let reader = Reader::from_bytes(bytes)?;
    assert!(!reader.has_output());
    let got: Vec<Vec<u8>> = reader
        .range(Bound::Unbounded, Bound::Unbounded)
        .map(|(k, _)| k)
        .collect();
    assert_eq!(got, vec![b"a".to_vec(), b"b".to_vec(), b"c".to_vec()]);
    Ok(())
}

#[test]
fn shared_suffixes_still_resolve_to_distinct_keys() -> Result<()> {
    // "running" and "jumping" share the final-state structure for "ing" once
    // minimized; each key must still read back with its own value.
    let bytes = build_map(&[("jumping", 10), ("running", 20), ("walking", 30)])?;
    let reader = Reader::from_bytes(bytes)?;
    for (key, value) in [("jumping", 10u64), ("running", 20), ("walking", 30)] {
        let hits: Vec<(Vec<u8>, u64)> = reader
            .matching(Bound::Unbounded, Bound::Unbounded, key)?
            .collect();
        assert_eq!(hits, vec![(key.as_bytes().to_vec(), value)]);
    }
    Ok(())
}

#[test]
fn range_bounds_respect_inclusive_and_exclusive_endpoints() -> Result<()> {
    let bytes = build_set(&["a", "b", "c", "d", "e"])?;
    let reader = Reader::from_bytes(bytes)?;

    let inclusive: Vec<Vec<u8>> = reader
        .range(
            Bound::Included(b"b".to_vec()),
            Bound::Included(b"d".to_vec()),
        )
        .map(|(k, _)| k)
        .collect();
    assert_eq!(inclusive, vec![b"b".to_vec(), b"c".to_vec(), b"d".to_vec()]);

    let exclusive: Vec<Vec<u8>> = reader
        .range(
            Bound::Excluded(b"b".to_vec()),
            Bound::Excluded(b"d".to_vec()),
        )
        .map(|(k, _)| k)
        .collect();
    assert_eq!(exclusive, vec![b"c".to_vec()]);
    Ok(())
}
