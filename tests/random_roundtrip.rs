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
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeMap;

fn random_key(rng: &mut SmallRng) -> Vec<u8> {
    let len = rng.random_range(1..=12);
    (0..len)
        .map(|_| rng.random_range(b'a'..=b'd'))
        .collect()
}

#[test]
fn random_keys_all_round_trip_through_a_built_fst() -> Result<()> {
    let mut rng = SmallRng::seed_from_u64(0x5eed);
    let mut pairs: BTreeMap<Vec<u8>, u64> = BTreeMap::new();
    while pairs.len() < 500 {
        let key = random_key(&mut rng);
        let value = rng.random_range(0..u32::MAX as u64);
        pairs.insert(key, value);
    }

    let mut builder = Builder::new(VecOutputStream::new(), true, 1 << 12)?;
    for (key, value) in &pairs {
        builder.insert(key, *value)?;
    }
    builder.finish()?;
    let reader = Reader::from_bytes(builder.into_inner().into_vec())?;

    for (key, value) in &pairs {
        let hits: Vec<(Vec<u8>, u64)> = reader
            .matching(Bound::Unbounded, Bound::Unbounded, std::str::from_utf8(key)?)?
            .collect();
        assert_eq!(hits, vec![(key.clone(), *value)]);
    }

    let all: Vec<(Vec<u8>, u64)> = reader.range(Bound::Unbounded, Bound::Unbounded).collect();
    let want: Vec<(Vec<u8>, u64)> = pairs.into_iter().collect();
    assert_eq!(all, want);
    Ok(())
}
