pub mod loader;
pub mod stroke_index;

pub use self::stroke_index::StrokeIndex;

use crate::config::DataPaths;
use crate::error::NfResult;
use crate::unihan::{CharacterOracle, HanCharacter};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use strum_macros::{Display, EnumIter, EnumString};
use tracing::{info, warn};

#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum FiveElement {
    #[default]
    Unknown,
    #[strum(to_string = "wood", serialize = "木")]
    Wood,
    #[strum(to_string = "fire", serialize = "火")]
    Fire,
    #[strum(to_string = "earth", serialize = "土")]
    Earth,
    #[strum(to_string = "metal", serialize = "金")]
    Metal,
    #[strum(to_string = "water", serialize = "水")]
    Water,
}

impl FiveElement {
    pub fn is_known(&self) -> bool {
        *self != FiveElement::Unknown
    }

    pub fn glyph(&self) -> char {
        match self {
            Self::Unknown => '_',
            Self::Wood => '木',
            Self::Fire => '火',
            Self::Earth => '土',
            Self::Metal => '金',
            Self::Water => '水',
        }
    }
}

/// Which curated common-character list supplies given-name characters.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[strum(serialize_all = "snake_case")]
pub enum Tier {
    /// Level 1: the broad list.
    #[default]
    Broad,
    /// Level 2: the narrower list.
    Narrow,
}

impl Tier {
    /// Anything other than 2 selects the broad list.
    pub fn from_level(level: u8) -> Self {
        match level {
            2 => Tier::Narrow,
            _ => Tier::Broad,
        }
    }

    pub fn level(&self) -> u8 {
        match self {
            Tier::Broad => 1,
            Tier::Narrow => 2,
        }
    }

    pub(crate) fn slot(&self) -> usize {
        self.level() as usize - 1
    }
}

/// Folklore glossary entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolkwayEntry {
    pub unicode: char,
    pub text: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub explanation: String,
}

/// Static dictionaries consulted by the generator and the normalizer.
/// Loaded once, read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    pub common_l1: Vec<char>,
    pub common_l2: Vec<char>,
    pub family_names: HashMap<String, u32>,
    pub common_names: HashMap<String, u32>,
    pub pinyin_overrides: HashMap<char, String>,
    pub stroke_overrides: HashMap<char, u8>,
    pub traditional_overrides: HashMap<char, char>,
    pub five_elements: HashMap<char, FiveElement>,
    pub folkways: HashMap<char, FolkwayEntry>,
}

impl Lexicon {
    /// Loads every list under `paths.data_dir`. The Unihan file and the
    /// level-1 common list are required; the rest degrade to empty tables.
    pub fn load(paths: &DataPaths) -> NfResult<Self> {
        let mut lex = Lexicon {
            common_l1: loader::load_code_list_file(paths.resolve(&paths.common_l1))?,
            ..Default::default()
        };

        match loader::load_code_list_file(paths.resolve(&paths.common_l2)) {
            Ok(list) => lex.common_l2 = list,
            Err(e) => warn!("Common L2 list unavailable, tier 2 will be empty: {}", e),
        }

        lex.family_names = optional(
            "family names",
            loader::load_counts_file(paths.resolve(&paths.family_names)),
        );
        lex.common_names = optional(
            "common names",
            loader::load_counts_file(paths.resolve(&paths.common_names)),
        );
        lex.pinyin_overrides = optional(
            "pinyin overrides",
            loader::load_pinyin_overrides_file(paths.resolve(&paths.pinyin_special)),
        );
        lex.stroke_overrides = optional(
            "stroke overrides",
            loader::load_stroke_overrides_file(paths.resolve(&paths.stroke_special)),
        );
        lex.traditional_overrides = optional(
            "traditional overrides",
            loader::load_traditional_overrides_file(paths.resolve(&paths.traditional_special)),
        );
        lex.five_elements = optional(
            "five elements",
            loader::load_five_elements_file(paths.resolve(&paths.five_elements)),
        );
        lex.folkways = optional(
            "folkways",
            loader::load_folkways_file(paths.resolve(&paths.folkways)),
        );

        info!(
            "Lexicon ready: L1={} L2={} family={} common names={}",
            lex.common_l1.len(),
            lex.common_l2.len(),
            lex.family_names.len(),
            lex.common_names.len()
        );

        Ok(lex)
    }

    pub fn common_list(&self, tier: Tier) -> &[char] {
        match tier {
            Tier::Broad => &self.common_l1,
            Tier::Narrow => &self.common_l2,
        }
    }

    pub fn stroke_override(&self, ch: char) -> Option<u8> {
        self.stroke_overrides.get(&ch).copied().filter(|&s| s > 0)
    }

    pub fn traditional_override(&self, ch: char) -> Option<char> {
        self.traditional_overrides.get(&ch).copied()
    }

    /// Curated pinyin; the `_` placeholder counts as absent.
    pub fn pinyin_override(&self, ch: char) -> Option<&str> {
        self.pinyin_overrides
            .get(&ch)
            .map(String::as_str)
            .filter(|p| !p.is_empty() && *p != "_")
    }

    pub fn five_element(&self, ch: char) -> FiveElement {
        self.five_elements.get(&ch).copied().unwrap_or_default()
    }

    pub fn is_common_name(&self, full_name: &str) -> bool {
        self.common_names.get(full_name).is_some_and(|&n| n > 0)
    }

    pub fn family_name_frequency(&self, family: &str) -> u32 {
        self.family_names.get(family).copied().unwrap_or(0)
    }

    pub fn folkway(&self, ch: char) -> Option<&FolkwayEntry> {
        self.folkways.get(&ch)
    }

    /// Numerology stroke count: curated override first, then the
    /// traditional count of the record.
    pub fn strokes_of(&self, c: &HanCharacter) -> Option<u8> {
        self.stroke_override(c.unicode)
            .or_else(|| c.stroke_prefer())
            .filter(|&s| s > 0)
    }

    pub fn traditional_of<'a>(
        &self,
        c: &'a HanCharacter,
        oracle: &'a dyn CharacterOracle,
    ) -> &'a HanCharacter {
        oracle.traditional_of(c, self.traditional_override(c.unicode))
    }
}

fn optional<T: Default>(what: &str, loaded: NfResult<T>) -> T {
    loaded.unwrap_or_else(|e| {
        warn!("Optional list '{}' not loaded: {}", what, e);
        T::default()
    })
}
