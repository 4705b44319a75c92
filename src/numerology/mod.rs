pub mod fortune;
pub mod grids;
pub mod table;

pub use self::fortune::Fortune;
pub use self::grids::{score, FiveGrids, GridReport};
pub use self::table::{RankBuckets, RankTable};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Largest stroke count the rank table covers.
pub const MAX_STROKE: u8 = 40;

/// Best possible rank.
pub const MAX_RANK: u8 = 100;

/// Largest encoded stroke pair (`MAX_STROKE * MAX_STROKE + MAX_STROKE`).
pub const MAX_CODE: u16 = MAX_STROKE as u16 * (MAX_STROKE as u16 + 1);

/// Number of slots in a table indexed by stroke-pair code.
pub const TABLE_SIZE: usize = MAX_CODE as usize + 1;

/// Stroke counts of a one- or two-character name segment.
/// `secondary == 0` marks a single character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StrokePair {
    pub primary: u8,
    pub secondary: u8,
}

impl StrokePair {
    /// `None` when either stroke is outside the table domain.
    pub fn new(primary: u8, secondary: u8) -> Option<Self> {
        if (1..=MAX_STROKE).contains(&primary) && secondary <= MAX_STROKE {
            Some(Self { primary, secondary })
        } else {
            None
        }
    }

    pub fn single(primary: u8) -> Option<Self> {
        Self::new(primary, 0)
    }

    pub fn is_single(&self) -> bool {
        self.secondary == 0
    }

    /// `secondary * MAX_STROKE + primary`, always in `1..=MAX_CODE`.
    #[inline(always)]
    pub fn encode(&self) -> u16 {
        self.secondary as u16 * MAX_STROKE as u16 + self.primary as u16
    }

    /// Inverse of [`encode`](Self::encode). Codes are shifted down by one
    /// before splitting so a primary stroke of exactly `MAX_STROKE` survives.
    #[inline(always)]
    pub fn decode(code: u16) -> Option<Self> {
        if code == 0 || code > MAX_CODE {
            return None;
        }
        let stride = MAX_STROKE as u16;
        Some(Self {
            primary: ((code - 1) % stride + 1) as u8,
            secondary: ((code - 1) / stride) as u8,
        })
    }

    /// Every pair of the domain, singles included, in encoding order.
    pub fn all() -> impl Iterator<Item = StrokePair> {
        (0..=MAX_STROKE).flat_map(|secondary| {
            (1..=MAX_STROKE).map(move |primary| StrokePair { primary, secondary })
        })
    }
}

impl fmt::Display for StrokePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_single() {
            write!(f, "{}", self.primary)
        } else {
            write!(f, "{}+{}", self.primary, self.secondary)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_layout() {
        assert_eq!(StrokePair::single(1).unwrap().encode(), 1);
        assert_eq!(StrokePair::single(40).unwrap().encode(), 40);
        assert_eq!(StrokePair::new(1, 1).unwrap().encode(), 41);
        assert_eq!(StrokePair::new(40, 40).unwrap().encode(), MAX_CODE);
    }

    #[test]
    fn test_decode_keeps_max_primary() {
        // A naive `code % 40` would read 80 as (0, 2).
        let pair = StrokePair::new(40, 1).unwrap();
        assert_eq!(pair.encode(), 80);
        assert_eq!(StrokePair::decode(80), Some(pair));
    }

    #[test]
    fn test_domain_bounds() {
        assert!(StrokePair::new(0, 5).is_none());
        assert!(StrokePair::new(41, 0).is_none());
        assert!(StrokePair::new(5, 41).is_none());
        assert!(StrokePair::decode(0).is_none());
        assert!(StrokePair::decode(MAX_CODE + 1).is_none());
    }

    #[test]
    fn test_all_covers_every_code_once() {
        let codes: Vec<u16> = StrokePair::all().map(|p| p.encode()).collect();
        assert_eq!(codes.len(), MAX_CODE as usize);
        assert!(codes.windows(2).all(|w| w[0] + 1 == w[1]));
        assert_eq!(codes.first(), Some(&1));
    }

    #[test]
    fn test_display() {
        assert_eq!(StrokePair::new(11, 0).unwrap().to_string(), "11");
        assert_eq!(StrokePair::new(8, 4).unwrap().to_string(), "8+4");
    }
}
