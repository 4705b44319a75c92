use super::fortune::{rule81, three_talents, Fortune};
use serde::{Deserialize, Serialize};

/// Weights of Human, Total, Heaven, Earth, Outer and Three Talents.
const WEIGHTS: [f64; 6] = [0.21, 0.20, 0.13, 0.13, 0.13, 0.20];

/// Folds a grid value above 81 back into the chart.
#[inline(always)]
pub fn fold81(value: u32) -> u32 {
    if value > 81 {
        value - 80
    } else {
        value
    }
}

/// Element code (0 wood .. 4 water) of a grid value, from its last digit.
#[inline(always)]
pub fn talent(value: u32) -> u32 {
    (value.saturating_sub(1) % 10) / 2
}

/// The five grids of a name, unfolded.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FiveGrids {
    pub heaven: u32,
    pub earth: u32,
    pub human: u32,
    pub total: u32,
    pub outer: u32,
}

impl FiveGrids {
    /// `f1`/`g1` are 0 when the family/given name has a single character.
    /// A single-character segment borrows a virtual stroke of 1. With a
    /// single given character the human grid is the last family stroke alone.
    pub fn compute(f0: u8, f1: u8, g0: u8, g1: u8) -> Self {
        let (f0, f1, g0, g1) = (f0 as u32, f1 as u32, g0 as u32, g1 as u32);

        let (heaven, human, outer) = match (f1 > 0, g1 > 0) {
            (true, true) => (f0 + f1, f1 + g0, f0 + g1),
            (true, false) => (f0 + f1, f1, f0 + 1),
            (false, true) => (f0 + 1, f0 + g0, 1 + g1),
            (false, false) => (f0 + 1, f0, 2),
        };

        let earth = if g1 > 0 { g0 + g1 } else { g0 + 1 };

        Self {
            heaven,
            earth,
            human,
            total: f0 + f1 + g0 + g1,
            outer,
        }
    }

    /// Composite index into the three-talents table.
    pub fn talent_index(&self) -> u32 {
        talent(self.heaven) * 25 + talent(self.human) * 5 + talent(self.earth)
    }
}

/// Per-grid classification, kept for reporting.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridReport {
    pub grids: FiveGrids,
    pub heaven: Fortune,
    pub earth: Fortune,
    pub human: Fortune,
    pub total: Fortune,
    pub outer: Fortune,
    pub three_talents: Fortune,
    pub rank: u8,
}

impl GridReport {
    pub fn evaluate(f0: u8, f1: u8, g0: u8, g1: u8) -> Self {
        let grids = FiveGrids::compute(f0, f1, g0, g1);
        let mut report = GridReport {
            grids,
            heaven: rule81(fold81(grids.heaven)),
            earth: rule81(fold81(grids.earth)),
            human: rule81(fold81(grids.human)),
            total: rule81(fold81(grids.total)),
            outer: rule81(fold81(grids.outer)),
            three_talents: three_talents(grids.talent_index()),
            rank: 0,
        };
        report.rank = report.weighted_rank();
        report
    }

    fn weighted_rank(&self) -> u8 {
        let scores = [
            self.human.score(),
            self.total.score(),
            self.heaven.score(),
            self.earth.score(),
            self.outer.score(),
            self.three_talents.score(),
        ];

        let sum: f64 = scores
            .iter()
            .zip(WEIGHTS.iter())
            .map(|(&s, &w)| (s as f64 * w).ceil())
            .sum();

        sum.min(super::MAX_RANK as f64) as u8
    }
}

/// Quality rank (0..=100) of a family/given stroke quadruple.
pub fn score(f0: u8, f1: u8, g0: u8, g1: u8) -> u8 {
    GridReport::evaluate(f0, f1, g0, g1).rank
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(11, 0, 8, 0, FiveGrids { heaven: 12, earth: 9, human: 11, total: 19, outer: 2 })]
    #[case(11, 0, 8, 4, FiveGrids { heaven: 12, earth: 12, human: 19, total: 23, outer: 5 })]
    #[case(10, 11, 8, 0, FiveGrids { heaven: 21, earth: 9, human: 11, total: 29, outer: 11 })]
    #[case(10, 11, 8, 4, FiveGrids { heaven: 21, earth: 12, human: 19, total: 33, outer: 14 })]
    fn test_four_way_branch(
        #[case] f0: u8,
        #[case] f1: u8,
        #[case] g0: u8,
        #[case] g1: u8,
        #[case] expected: FiveGrids,
    ) {
        assert_eq!(FiveGrids::compute(f0, f1, g0, g1), expected);
    }

    #[rstest]
    #[case(81, 81)]
    #[case(82, 2)]
    #[case(160, 80)]
    #[case(1, 1)]
    fn test_fold81(#[case] input: u32, #[case] expected: u32) {
        assert_eq!(fold81(input), expected);
    }

    #[rstest]
    #[case(1, 0)]
    #[case(2, 0)]
    #[case(13, 1)]
    #[case(25, 2)]
    #[case(38, 3)]
    #[case(40, 4)]
    #[case(49, 4)]
    fn test_talent_codes(#[case] value: u32, #[case] expected: u32) {
        assert_eq!(talent(value), expected);
    }

    #[test]
    fn test_rank_caps_at_hundred() {
        for f0 in 1..=40u8 {
            for g0 in 1..=40u8 {
                assert!(score(f0, 0, g0, 0) <= 100);
            }
        }
    }

    #[test]
    fn test_known_single_single_rank() {
        // 張明: heaven 12, human 11, earth 9, total 19, outer 2; wood/wood/water.
        let r = GridReport::evaluate(11, 0, 8, 0);
        assert_eq!(r.grids.human, 11);
        assert_eq!(r.heaven, Fortune::Unlucky);
        assert_eq!(r.human, Fortune::Auspicious);
        assert_eq!(r.earth, Fortune::Ominous);
        assert_eq!(r.total, Fortune::Ominous);
        assert_eq!(r.outer, Fortune::Unlucky);
        assert_eq!(r.three_talents, Fortune::Lucky);
        assert_eq!(r.rank, 44);
    }

    #[test]
    fn test_rank_is_ceiling_weighted_sum() {
        let r = GridReport::evaluate(11, 0, 8, 4);
        let expected: f64 = [r.human, r.total, r.heaven, r.earth, r.outer, r.three_talents]
            .iter()
            .zip(WEIGHTS.iter())
            .map(|(f, w)| (f.score() as f64 * w).ceil())
            .sum();
        assert_eq!(r.rank as f64, expected.min(100.0));
    }
}
