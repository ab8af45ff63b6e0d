//! Shared fixtures for the unit tests.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::bit_vec::RankSelect;
use crate::errors::ErrorKind;

/// `len` pseudo-random bits from a fixed seed.
pub fn random_bits(seed: u64, len: usize) -> Vec<bool> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..len).map(|_| rng.gen()).collect()
}

/// Packs bits into `u32` words, first bit in the most significant position.
pub fn pack_u32(bits: &[bool]) -> Vec<u32> {
    bits.chunks(32)
        .map(|chunk| {
            chunk
                .iter()
                .enumerate()
                .fold(0, |word, (i, &bit)| word | (u32::from(bit) << (31 - i)))
        })
        .collect()
}

/// Packs bits into `u64` words, first bit in the most significant position.
pub fn pack_u64(bits: &[bool]) -> Vec<u64> {
    bits.chunks(64)
        .map(|chunk| {
            chunk
                .iter()
                .enumerate()
                .fold(0, |word, (i, &bit)| word | (u64::from(bit) << (63 - i)))
        })
        .collect()
}

pub fn naive_rank(bits: &[bool], value: bool, count: usize) -> u64 {
    bits[..count].iter().filter(|&&bit| bit == value).count() as u64
}

pub fn naive_select(bits: &[bool], value: bool, rank: u64) -> u64 {
    bits.iter()
        .enumerate()
        .filter(|&(_, &bit)| bit == value)
        .nth(rank as usize - 1)
        .map(|(i, _)| i as u64)
        .expect("naive_select: rank too large")
}

/// Checks every query of `index` against the bits it should represent.
pub fn check_queries<R: RankSelect>(index: &R, bits: &[bool]) {
    let len = bits.len() as u64;
    let ones = naive_rank(bits, true, bits.len());

    assert_eq!(len, index.len());
    assert_eq!(ones, index.total_pop_count());
    assert_eq!(len - ones, index.count_of(false));

    let mut counts = [0u64; 2];
    for (i, &bit) in bits.iter().enumerate() {
        let i = i as u64;
        assert_eq!(bit, index.access(i).unwrap(), "access({})", i);

        counts[bit as usize] += 1;
        let rank1 = index.rank(true, i + 1).unwrap();
        let rank0 = index.rank(false, i + 1).unwrap();
        assert_eq!(counts[1], rank1, "rank(true, {})", i + 1);
        assert_eq!(i + 1, rank0 + rank1);

        let rank = counts[bit as usize];
        assert_eq!(i, index.select(bit, rank).unwrap(), "select({}, {})", bit, rank);
    }

    let kind = |result: crate::errors::Result<u64>| result.unwrap_err().kind();
    assert_eq!(ErrorKind::Logic, kind(index.rank(true, 0)));
    assert_eq!(ErrorKind::Range, kind(index.rank(true, len + 1)));
    assert_eq!(ErrorKind::Logic, kind(index.select(true, 0)));
    assert_eq!(ErrorKind::Logic, kind(index.select(true, ones + 1)));
    assert_eq!(ErrorKind::Logic, kind(index.select(false, len - ones + 1)));

    let step = (bits.len() / 17).max(1);
    for offset in (0..bits.len()).step_by(step) {
        for count in (1..=bits.len() - offset).step_by(step) {
            let expected = naive_rank(&bits[offset..], true, count);
            let (offset, count) = (offset as u64, count as u64);
            assert_eq!(expected, index.rank_range(true, count, offset).unwrap());
            assert_eq!(count - expected, index.rank_range(false, count, offset).unwrap());

            let run: Vec<bool> = index.access_range(offset, count).unwrap().collect();
            assert_eq!(&bits[offset as usize..(offset + count) as usize], &run[..]);
        }

        if let Some(next) = bits[offset..].iter().position(|&bit| bit) {
            let found = index.select_from(true, 1, offset as u64).unwrap();
            assert_eq!((offset + next) as u64, found);
        }
    }
}
