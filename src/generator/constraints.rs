use crate::config::SearchParams;
use crate::error::{NameForgeError, NfResult};
use crate::lexicon::{Lexicon, Tier};
use crate::unihan::CharacterOracle;
use serde::{Deserialize, Serialize};

/// Hard cap on the number of candidates a single request may return.
pub const MAX_RESULTS: usize = 10_000;

/// Longest given name the generator can build.
pub const MAX_GIVEN_LENGTH: usize = 2;

/// How many candidates a request wants back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultLimit {
    /// Every candidate of the best producing rank, nothing below it.
    TopRank,
    Count(usize),
}

/// What the caller asked for. Build one with [`Constraints::new`] and the
/// chained setters, then hand it to the generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constraints {
    pub family_name: Vec<char>,
    #[serde(default)]
    pub middle_name: Vec<char>,
    #[serde(default)]
    pub prefix: Option<char>,
    #[serde(default)]
    pub suffix: Option<char>,
    pub given_length: usize,
    pub tier: u8,
    pub max_results: usize,
}

impl Constraints {
    pub fn new(family_name: &str) -> Self {
        Self {
            family_name: family_name.chars().collect(),
            middle_name: Vec::new(),
            prefix: None,
            suffix: None,
            given_length: 2,
            tier: 1,
            max_results: 20,
        }
    }

    pub fn from_search(family_name: &str, params: &SearchParams) -> Self {
        Self {
            middle_name: params.middle.as_deref().unwrap_or_default().chars().collect(),
            prefix: params.prefix,
            suffix: params.suffix,
            given_length: params.given_length,
            tier: params.tier,
            max_results: params.max_results,
            ..Self::new(family_name)
        }
    }

    pub fn middle(mut self, middle_name: &str) -> Self {
        self.middle_name = middle_name.chars().collect();
        self
    }

    pub fn prefix(mut self, ch: char) -> Self {
        self.prefix = Some(ch);
        self
    }

    pub fn suffix(mut self, ch: char) -> Self {
        self.suffix = Some(ch);
        self
    }

    pub fn given_length(mut self, len: usize) -> Self {
        self.given_length = len;
        self
    }

    pub fn tier(mut self, tier: u8) -> Self {
        self.tier = tier;
        self
    }

    pub fn max_results(mut self, n: usize) -> Self {
        self.max_results = n;
        self
    }

    /// Replaces every constraint character by its traditional form so that
    /// stroke lookups and rune comparisons run against the traditional index.
    /// Characters the oracle does not know are left untouched.
    pub fn traditionalize(&self, oracle: &dyn CharacterOracle, lexicon: &Lexicon) -> Self {
        let convert = |ch: char| match oracle.resolve(ch) {
            Some(c) => lexicon.traditional_of(c, oracle).unicode,
            None => ch,
        };

        Self {
            family_name: self.family_name.iter().map(|&ch| convert(ch)).collect(),
            middle_name: self.middle_name.iter().map(|&ch| convert(ch)).collect(),
            prefix: self.prefix.map(convert),
            suffix: self.suffix.map(convert),
            ..self.clone()
        }
    }

    /// Clamps the numeric fields into range and rejects unsatisfiable
    /// requests.
    pub fn normalized(&self) -> NfResult<Self> {
        if self.family_name.is_empty() {
            return Err(NameForgeError::InvalidConstraint(
                "family name is empty".to_string(),
            ));
        }
        if self.family_name.len() > 2 {
            return Err(NameForgeError::InvalidConstraint(format!(
                "family name '{}' has more than two characters",
                self.family_name.iter().collect::<String>()
            )));
        }

        // Checked before clamping: length 3 with prefix and suffix is valid.
        let fixed = self.prefix.is_some() as usize + self.suffix.is_some() as usize;
        if self.given_length < fixed + 1 {
            return Err(NameForgeError::InvalidConstraint(format!(
                "given length {} leaves no free character after prefix/suffix",
                self.given_length
            )));
        }
        let given_length = self.given_length.min(MAX_GIVEN_LENGTH);

        Ok(Self {
            given_length,
            tier: Tier::from_level(self.tier).level(),
            max_results: self.max_results.min(MAX_RESULTS),
            ..self.clone()
        })
    }

    pub fn tier_level(&self) -> Tier {
        Tier::from_level(self.tier)
    }

    pub fn limit(&self) -> ResultLimit {
        match self.max_results {
            0 => ResultLimit::TopRank,
            n => ResultLimit::Count(n.min(MAX_RESULTS)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, 1)]
    #[case(1, 1)]
    #[case(2, 2)]
    #[case(3, 1)]
    fn test_tier_normalisation(#[case] tier: u8, #[case] expected: u8) {
        let c = Constraints::new("张").tier(tier).normalized().unwrap();
        assert_eq!(c.tier, expected);
    }

    #[test]
    fn test_result_count_is_clamped() {
        let c = Constraints::new("张").max_results(50_000).normalized().unwrap();
        assert_eq!(c.max_results, MAX_RESULTS);
        assert_eq!(c.limit(), ResultLimit::Count(MAX_RESULTS));
        assert_eq!(Constraints::new("张").max_results(0).limit(), ResultLimit::TopRank);
    }

    #[test]
    fn test_given_length_is_clamped_to_two() {
        let c = Constraints::new("张").given_length(3).normalized().unwrap();
        assert_eq!(c.given_length, 2);
    }

    #[rstest]
    #[case(Constraints::new("张").given_length(1).prefix('明'))]
    #[case(Constraints::new("张").given_length(2).prefix('明').suffix('华'))]
    #[case(Constraints::new("张").given_length(0))]
    #[case(Constraints::new(""))]
    #[case(Constraints::new("欧阳王"))]
    fn test_degenerate_requests_are_rejected(#[case] c: Constraints) {
        assert!(matches!(c.normalized(), Err(NameForgeError::InvalidConstraint(_))));
    }

    #[test]
    fn test_prefix_with_double_name_is_fine() {
        assert!(Constraints::new("张").prefix('明').normalized().is_ok());
    }

    #[test]
    fn test_free_character_check_uses_requested_length() {
        let c = Constraints::new("张")
            .given_length(3)
            .prefix('明')
            .suffix('华')
            .normalized()
            .unwrap();
        assert_eq!(c.given_length, 2);
        assert_eq!((c.prefix, c.suffix), (Some('明'), Some('华')));
    }
}
