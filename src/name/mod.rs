pub mod normalize;
pub mod pinyin;

pub use self::normalize::{NameInput, Normalizer};

use crate::lexicon::FiveElement;
use crate::unihan::HanCharacter;
use serde::{Deserialize, Serialize};

/// One name segment (family, middle or given) in one script.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameSpec {
    pub runes: Vec<char>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub strokes: Vec<u8>,
    /// Resolved records backing `runes`. Dropped by
    /// [`NameRecord::strip_characters`] before transport.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub characters: Vec<HanCharacter>,
    pub five_elements: Vec<FiveElement>,
    #[serde(rename = "string")]
    pub text: String,
    #[serde(rename = "length")]
    pub len: usize,
}

impl NameSpec {
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameDef {
    pub family_name: NameSpec,
    #[serde(default, skip_serializing_if = "NameSpec::is_empty")]
    pub middle_name: NameSpec,
    pub given_name: NameSpec,
    pub full_name: String,
}

impl NameDef {
    fn segments(&self) -> [&NameSpec; 3] {
        [&self.family_name, &self.middle_name, &self.given_name]
    }

    fn segments_mut(&mut self) -> [&mut NameSpec; 3] {
        [&mut self.family_name, &mut self.middle_name, &mut self.given_name]
    }

    /// Family, middle and given characters in reading order.
    pub fn characters(&self) -> impl Iterator<Item = &HanCharacter> + '_ {
        self.segments().into_iter().flat_map(|s| s.characters.iter())
    }

    /// Name without the family/given separator, as listed in name corpora.
    pub fn compact(&self) -> String {
        self.segments().iter().map(|s| s.text.as_str()).collect()
    }
}

/// A fully normalised name: three scripts, romanisation and ranking.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameRecord {
    pub original: NameDef,
    pub simplified: NameDef,
    pub traditional: NameDef,
    pub pinyin_tone: Vec<String>,
    pub pinyin: Vec<String>,
    pub rank: u8,
    pub is_common: bool,
}

impl NameRecord {
    /// Drops the per-character Unihan records once every derived field has
    /// been filled in.
    pub fn strip_characters(&mut self) {
        for def in [&mut self.original, &mut self.simplified, &mut self.traditional] {
            for spec in def.segments_mut() {
                spec.characters = Vec::new();
            }
        }
    }

    pub fn is_stripped(&self) -> bool {
        [&self.original, &self.simplified, &self.traditional]
            .iter()
            .all(|def| def.characters().next().is_none())
    }
}
