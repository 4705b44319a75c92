use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

/// Qualitative fortune of a grid value or of a three-talents configuration.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Fortune {
    #[default]
    Unknown = 0,
    /// 大凶
    Ominous = 1,
    /// 凶
    Unlucky = 2,
    /// 半吉
    Mixed = 3,
    /// 吉
    Lucky = 4,
    /// 大吉
    Auspicious = 5,
}

const FORTUNE_SCORES: [u32; 6] = [0, 0, 25, 50, 75, 100];

impl Fortune {
    pub fn from_tier(tier: u8) -> Self {
        match tier {
            1 => Fortune::Ominous,
            2 => Fortune::Unlucky,
            3 => Fortune::Mixed,
            4 => Fortune::Lucky,
            5 => Fortune::Auspicious,
            _ => Fortune::Unknown,
        }
    }

    pub fn tier(&self) -> u8 {
        *self as u8
    }

    /// Score bucket of the tier.
    pub fn score(&self) -> u32 {
        FORTUNE_SCORES[*self as usize]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Fortune::Unknown => "-",
            Fortune::Ominous => "大凶",
            Fortune::Unlucky => "凶",
            Fortune::Mixed => "半吉",
            Fortune::Lucky => "吉",
            Fortune::Auspicious => "大吉",
        }
    }
}

/// The 81-number chart. Index 0 is unused.
#[rustfmt::skip]
const RULE_81: [u8; 82] = [
    0,
    5, 2, 5, 1, 5, 5, 4, 4, 1, 1, //  1-10
    5, 2, 5, 2, 5, 5, 4, 4, 1, 1, // 11-20
    5, 2, 5, 5, 4, 2, 3, 2, 4, 3, // 21-30
    5, 5, 5, 1, 4, 2, 5, 3, 4, 2, // 31-40
    5, 2, 2, 1, 5, 2, 5, 5, 3, 2, // 41-50
    3, 5, 3, 1, 3, 2, 4, 3, 2, 1, // 51-60
    4, 2, 5, 1, 5, 2, 5, 5, 1, 1, // 61-70
    3, 2, 3, 2, 3, 2, 3, 3, 2, 1, // 71-80
    5,                            // 81
];

/// Three-talents configurations, indexed by `heaven * 25 + human * 5 + earth`
/// where each talent is 0 wood, 1 fire, 2 earth, 3 metal, 4 water.
/// One row per heaven element, five human groups of five earth entries.
#[rustfmt::skip]
const THREE_TALENTS: [u8; 125] = [
    4, 4, 2, 2, 4,  5, 4, 5, 3, 3,  1, 3, 2, 3, 1,  1, 1, 3, 2, 3,  5, 3, 3, 5, 4, // wood
    4, 5, 3, 3, 5,  4, 4, 4, 2, 2,  3, 5, 4, 5, 3,  1, 1, 3, 2, 3,  3, 1, 1, 3, 2, // fire
    2, 3, 1, 1, 3,  5, 4, 5, 3, 3,  2, 4, 4, 4, 2,  3, 3, 5, 4, 5,  3, 1, 1, 3, 2, // earth
    2, 3, 1, 1, 3,  3, 2, 3, 1, 1,  3, 5, 4, 5, 3,  2, 2, 4, 4, 4,  5, 3, 3, 5, 4, // metal
    4, 5, 3, 3, 5,  3, 2, 3, 1, 1,  1, 3, 2, 3, 1,  3, 3, 5, 4, 5,  4, 2, 2, 4, 4, // water
];

/// Fortune of a folded grid value (1..=81). Anything else is `Unknown`.
pub fn rule81(value: u32) -> Fortune {
    match value {
        1..=81 => Fortune::from_tier(RULE_81[value as usize]),
        _ => Fortune::Unknown,
    }
}

/// Fortune of a three-talents composite index (0..125).
pub fn three_talents(index: u32) -> Fortune {
    THREE_TALENTS
        .get(index as usize)
        .map_or(Fortune::Unknown, |&t| Fortune::from_tier(t))
}
