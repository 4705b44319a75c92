use super::{grids::score, StrokePair, MAX_RANK, MAX_STROKE, TABLE_SIZE};
use rayon::prelude::*;
use std::time::Instant;
use tracing::info;

/// Given-name stroke pairs of one family pair, grouped by rank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankBuckets {
    ranks: Vec<Vec<u16>>,
}

impl RankBuckets {
    fn empty() -> Self {
        Self {
            ranks: vec![Vec::new(); MAX_RANK as usize + 1],
        }
    }

    /// Fills primary-major: every secondary of one primary stroke before the
    /// next primary. Bucket order is the order the generator emits names in.
    fn for_family(family: StrokePair) -> Self {
        let mut buckets = Self::empty();
        for primary in 1..=MAX_STROKE {
            for secondary in 0..=MAX_STROKE {
                let given = StrokePair { primary, secondary };
                let rank = score(family.primary, family.secondary, primary, secondary);
                buckets.ranks[rank as usize].push(given.encode());
            }
        }
        buckets
    }

    /// Encoded given pairs scoring exactly `rank`, ordered by primary then
    /// secondary stroke.
    pub fn get(&self, rank: u8) -> &[u16] {
        self.ranks.get(rank as usize).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn pairs(&self, rank: u8) -> impl Iterator<Item = StrokePair> + '_ {
        self.get(rank).iter().filter_map(|&code| StrokePair::decode(code))
    }

    /// Non-empty buckets from `MAX_RANK` down to 1. Rank 0 is never produced.
    pub fn iter_desc(&self) -> impl Iterator<Item = (u8, &[u16])> + '_ {
        (1..=MAX_RANK)
            .rev()
            .map(move |rank| (rank, self.get(rank)))
            .filter(|(_, codes)| !codes.is_empty())
    }

    /// Highest rank that has at least one given pair.
    pub fn top_rank(&self) -> Option<u8> {
        self.iter_desc().next().map(|(rank, _)| rank)
    }

    pub fn total(&self) -> usize {
        self.ranks.iter().map(Vec::len).sum()
    }

    /// `(rank, size)` for every non-empty bucket, best first.
    pub fn histogram(&self) -> Vec<(u8, usize)> {
        (0..=MAX_RANK)
            .rev()
            .map(|rank| (rank, self.get(rank).len()))
            .filter(|&(_, n)| n > 0)
            .collect()
    }
}

/// Precomputed rank of every (family pair, given pair) combination.
///
/// Indexed by encoded family pair. Built once and shared read-only; the
/// generator holds it behind an `Arc`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankTable {
    families: Vec<RankBuckets>,
}

impl RankTable {
    /// Scores the full stroke domain. Family pairs are independent, so they
    /// are filled in parallel.
    pub fn build() -> Self {
        let start = Instant::now();

        let families: Vec<RankBuckets> = (0..TABLE_SIZE)
            .into_par_iter()
            .map(|code| match StrokePair::decode(code as u16) {
                Some(family) => RankBuckets::for_family(family),
                None => RankBuckets::empty(),
            })
            .collect();

        let table = Self { families };
        info!(
            "Rank table built: {} family pairs, {} entries in {:.2?}",
            table.families.len() - 1,
            table.total_entries(),
            start.elapsed()
        );
        table
    }

    /// Buckets for a family pair. `None` when the pair lies outside the
    /// table, which callers treat as "no candidates".
    pub fn ranks_for(&self, family: StrokePair) -> Option<&RankBuckets> {
        self.families.get(family.encode() as usize)
    }

    pub fn ranks_for_strokes(&self, f0: u8, f1: u8) -> Option<&RankBuckets> {
        StrokePair::new(f0, f1).and_then(|pair| self.ranks_for(pair))
    }

    pub fn total_entries(&self) -> usize {
        self.families.iter().map(RankBuckets::total).sum()
    }
}
