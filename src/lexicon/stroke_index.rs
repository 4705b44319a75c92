use super::{Lexicon, Tier};
use crate::numerology::MAX_STROKE;
use crate::unihan::CharacterOracle;
use std::collections::HashSet;
use tracing::debug;

type Buckets = Vec<Vec<char>>;

/// Common characters grouped by numerology stroke count, per tier.
///
/// Listed characters are indexed by their traditional form, the form the
/// generator scores. Bucket order follows the source list.
#[derive(Debug, Clone)]
pub struct StrokeIndex {
    traditional: [Buckets; 2],
}

impl Default for StrokeIndex {
    fn default() -> Self {
        Self {
            traditional: [empty_buckets(), empty_buckets()],
        }
    }
}

fn empty_buckets() -> Buckets {
    vec![Vec::new(); MAX_STROKE as usize + 1]
}

impl StrokeIndex {
    pub fn build(lexicon: &Lexicon, oracle: &dyn CharacterOracle) -> Self {
        let mut index = StrokeIndex::default();

        for tier in [Tier::Broad, Tier::Narrow] {
            let slot = tier.slot();
            let mut seen_traditional = HashSet::new();
            let mut indexed = 0usize;

            for &ch in lexicon.common_list(tier) {
                let Some(c) = oracle.resolve(ch) else {
                    continue;
                };

                let t = lexicon.traditional_of(c, oracle);
                if let Some(stroke) = lexicon.strokes_of(t).filter(|&s| s <= MAX_STROKE) {
                    if seen_traditional.insert(t.unicode) {
                        index.traditional[slot][stroke as usize].push(t.unicode);
                        indexed += 1;
                    }
                }
            }

            debug!("Stroke index tier {}: {} traditional characters", tier.level(), indexed);
        }

        index
    }

    /// Traditional characters of `tier` with exactly `stroke` strokes.
    pub fn characters(&self, tier: Tier, stroke: u8) -> &[char] {
        bucket(&self.traditional[tier.slot()], stroke)
    }

    /// Number of distinct traditional characters available in `tier`.
    pub fn len(&self, tier: Tier) -> usize {
        self.traditional[tier.slot()].iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self, tier: Tier) -> bool {
        self.len(tier) == 0
    }

    /// `(stroke, count)` for every non-empty traditional bucket.
    pub fn histogram(&self, tier: Tier) -> Vec<(u8, usize)> {
        self.traditional[tier.slot()]
            .iter()
            .enumerate()
            .filter(|(_, b)| !b.is_empty())
            .map(|(s, b)| (s as u8, b.len()))
            .collect()
    }
}

fn bucket(buckets: &Buckets, stroke: u8) -> &[char] {
    if stroke < 1 || stroke > MAX_STROKE {
        return &[];
    }
    &buckets[stroke as usize]
}
