pub mod constraints;

pub use self::constraints::{Constraints, ResultLimit, MAX_GIVEN_LENGTH, MAX_RESULTS};

use crate::error::{NameForgeError, NfResult};
use crate::lexicon::{Lexicon, StrokeIndex, Tier};
use crate::numerology::{RankTable, StrokePair};
use crate::unihan::CharacterOracle;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// A generated given name and the rank it was produced under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub given: Vec<char>,
    pub rank: u8,
}

impl Candidate {
    pub fn given_str(&self) -> String {
        self.given.iter().collect()
    }
}

/// Output of one generator run. `family` and `middle` are the traditional
/// forms the candidates were scored against.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Generation {
    pub family: Vec<char>,
    pub middle: Vec<char>,
    pub candidates: Vec<Candidate>,
    pub total: usize,
}

/// Accumulates candidates until the limit is met.
struct Collector {
    limit: ResultLimit,
    candidates: Vec<Candidate>,
    top_rank: Option<u8>,
}

impl Collector {
    fn new(limit: ResultLimit) -> Self {
        Self {
            limit,
            candidates: Vec::new(),
            top_rank: None,
        }
    }

    /// False once a rank below the first producing one is reached in
    /// top-rank mode.
    fn admits_rank(&self, rank: u8) -> bool {
        match (self.limit, self.top_rank) {
            (ResultLimit::TopRank, Some(top)) => rank >= top,
            _ => true,
        }
    }

    fn is_full(&self) -> bool {
        match self.limit {
            ResultLimit::Count(n) => self.candidates.len() >= n,
            ResultLimit::TopRank => false,
        }
    }

    /// Returns true when the collector is full after the push.
    fn push(&mut self, given: Vec<char>, rank: u8) -> bool {
        self.top_rank.get_or_insert(rank);
        self.candidates.push(Candidate { given, rank });
        self.is_full()
    }
}

/// Walks the rank table best-first and turns stroke pairs into characters.
///
/// Borrows every dependency; nothing is cached between calls, so one
/// generator may be shared by concurrent callers.
pub struct Generator<'a> {
    table: Arc<RankTable>,
    oracle: &'a dyn CharacterOracle,
    lexicon: &'a Lexicon,
    index: &'a StrokeIndex,
}

impl<'a> Generator<'a> {
    pub fn new(
        table: Arc<RankTable>,
        oracle: &'a dyn CharacterOracle,
        lexicon: &'a Lexicon,
        index: &'a StrokeIndex,
    ) -> Self {
        Self {
            table,
            oracle,
            lexicon,
            index,
        }
    }

    /// Numerology stroke count of a constraint character.
    fn stroke_of(&self, ch: char) -> NfResult<u8> {
        self.oracle
            .resolve(ch)
            .and_then(|c| self.lexicon.strokes_of(c))
            .ok_or(NameForgeError::CharacterResolution(ch))
    }

    /// Runs the search. Constraint characters are expected in traditional
    /// form already (see [`Constraints::traditionalize`]).
    pub fn generate(&self, constraints: &Constraints) -> NfResult<Generation> {
        let c = constraints.normalized()?;

        let f0 = self.stroke_of(c.family_name[0])?;
        let f1 = match c.family_name.get(1) {
            Some(&ch) => self.stroke_of(ch)?,
            None => 0,
        };
        let prefix = c.prefix.map(|ch| self.stroke_of(ch).map(|s| (ch, s))).transpose()?;
        let suffix = c.suffix.map(|ch| self.stroke_of(ch).map(|s| (ch, s))).transpose()?;

        let mut generation = Generation {
            family: c.family_name.clone(),
            middle: c.middle_name.clone(),
            ..Default::default()
        };

        let Some(buckets) = self.table.ranks_for_strokes(f0, f1) else {
            debug!("Family strokes ({}, {}) outside the rank table", f0, f1);
            return Ok(generation);
        };

        let tier = c.tier_level();
        let mut collector = Collector::new(c.limit());

        'ranks: for (rank, codes) in buckets.iter_desc() {
            if !collector.admits_rank(rank) {
                debug!("Top-rank mode: stopping below rank {}", rank + 1);
                break;
            }

            for pair in codes.iter().filter_map(|&code| StrokePair::decode(code)) {
                if self.expand(pair, &c, tier, prefix, suffix, rank, &mut collector) {
                    debug!("Result cap reached at rank {}", rank);
                    break 'ranks;
                }
            }
        }

        generation.total = collector.candidates.len();
        generation.candidates = collector.candidates;
        Ok(generation)
    }

    /// Emits every name a given stroke pair produces. Returns true when the
    /// collector filled up.
    #[allow(clippy::too_many_arguments)]
    fn expand(
        &self,
        pair: StrokePair,
        c: &Constraints,
        tier: Tier,
        prefix: Option<(char, u8)>,
        suffix: Option<(char, u8)>,
        rank: u8,
        collector: &mut Collector,
    ) -> bool {
        // With length 1 a double pair still contributes its primary stroke
        // as a single name, at the pair's rank.
        let double = !pair.is_single() && c.given_length > 1;

        if prefix.is_some_and(|(_, stroke)| stroke != pair.primary) {
            return false;
        }
        let trailing_stroke = if double { pair.secondary } else { pair.primary };
        if suffix.is_some_and(|(_, stroke)| stroke != trailing_stroke) {
            return false;
        }

        let first = self.index.characters(tier, pair.primary);
        if first.is_empty() {
            return false;
        }

        let fits = |given: &[char]| {
            prefix.map_or(true, |(ch, _)| given.first() == Some(&ch))
                && suffix.map_or(true, |(ch, _)| given.last() == Some(&ch))
        };

        if double {
            let second = self.index.characters(tier, pair.secondary);
            for &a in first {
                for &b in second {
                    let given = [a, b];
                    if fits(&given) && collector.push(given.to_vec(), rank) {
                        return true;
                    }
                }
            }
        } else {
            for &a in first {
                if fits(&[a]) && collector.push(vec![a], rank) {
                    return true;
                }
            }
        }

        false
    }
}
