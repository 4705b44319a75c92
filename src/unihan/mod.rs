pub mod loader;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Phonetic fields kept from the Unihan readings file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Readings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mandarin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xhc1983: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hanyu_pinyin: Option<String>,
}

impl Readings {
    pub fn is_empty(&self) -> bool {
        self.mandarin.is_none() && self.xhc1983.is_none() && self.hanyu_pinyin.is_none()
    }
}

/// One character record of the Unihan database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HanCharacter {
    pub unicode: char,
    /// `kTotalStrokes`. When two values are present the first is the
    /// zh-Hans count and the second the zh-Hant count.
    #[serde(default)]
    pub total_strokes: Vec<u8>,
    #[serde(default)]
    pub simplified: Vec<char>,
    #[serde(default)]
    pub traditional: Vec<char>,
    #[serde(default, skip_serializing_if = "Readings::is_empty")]
    pub readings: Readings,
}

impl HanCharacter {
    pub fn new(unicode: char) -> Self {
        Self {
            unicode,
            total_strokes: Vec::new(),
            simplified: Vec::new(),
            traditional: Vec::new(),
            readings: Readings::default(),
        }
    }

    /// Stroke count of the traditional form (last listed value).
    pub fn stroke_prefer(&self) -> Option<u8> {
        self.total_strokes.last().copied()
    }

    pub fn simplified_prefer(&self) -> Option<char> {
        self.simplified.first().copied()
    }

    /// Traditional variant, or the character itself when it has none.
    pub fn traditional_lazy(&self) -> char {
        self.traditional.first().copied().unwrap_or(self.unicode)
    }
}

/// Read-only character lookup keyed by code point.
pub trait CharacterOracle: Send + Sync {
    fn resolve(&self, ch: char) -> Option<&HanCharacter>;

    /// Simplified record of `c`; `c` itself when no simplified form resolves.
    fn simplified_of<'a>(&'a self, c: &'a HanCharacter) -> &'a HanCharacter {
        c.simplified_prefer()
            .and_then(|r| self.resolve(r))
            .unwrap_or(c)
    }

    /// Traditional record of `c`. A curated `special` mapping wins over the
    /// generic variant; `c` itself when nothing resolves.
    fn traditional_of<'a>(&'a self, c: &'a HanCharacter, special: Option<char>) -> &'a HanCharacter {
        let target = special.unwrap_or_else(|| c.traditional_lazy());
        self.resolve(target).unwrap_or(c)
    }
}

/// In-memory Unihan database.
#[derive(Debug, Clone, Default)]
pub struct Unihan {
    chars: HashMap<char, HanCharacter>,
}

impl Unihan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, c: HanCharacter) {
        self.chars.insert(c.unicode, c);
    }

    pub fn entry(&mut self, ch: char) -> &mut HanCharacter {
        self.chars.entry(ch).or_insert_with(|| HanCharacter::new(ch))
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }
}

impl CharacterOracle for Unihan {
    fn resolve(&self, ch: char) -> Option<&HanCharacter> {
        self.chars.get(&ch)
    }
}

impl FromIterator<HanCharacter> for Unihan {
    fn from_iter<I: IntoIterator<Item = HanCharacter>>(iter: I) -> Self {
        let mut db = Unihan::new();
        for c in iter {
            db.insert(c);
        }
        db
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(ch: char, strokes: &[u8], simp: &[char], trad: &[char]) -> HanCharacter {
        HanCharacter {
            total_strokes: strokes.to_vec(),
            simplified: simp.to_vec(),
            traditional: trad.to_vec(),
            ..HanCharacter::new(ch)
        }
    }

    #[test]
    fn test_stroke_prefer_takes_traditional_count() {
        assert_eq!(record('张', &[7], &[], &['張']).stroke_prefer(), Some(7));
        assert_eq!(record('华', &[6, 7], &[], &[]).stroke_prefer(), Some(7));
        assert_eq!(HanCharacter::new('x').stroke_prefer(), None);
    }

    #[test]
    fn test_variant_fallbacks() {
        let db: Unihan = vec![
            record('张', &[7], &[], &['張']),
            record('張', &[11], &['张'], &[]),
            record('明', &[8], &[], &[]),
        ]
        .into_iter()
        .collect();

        let zhang = db.resolve('张').unwrap();
        assert_eq!(db.traditional_of(zhang, None).unicode, '張');
        assert_eq!(db.simplified_of(db.resolve('張').unwrap()).unicode, '张');

        let ming = db.resolve('明').unwrap();
        assert_eq!(db.traditional_of(ming, None).unicode, '明');
        assert_eq!(db.simplified_of(ming).unicode, '明');

        // The curated mapping wins, and an unresolvable target falls back to self.
        assert_eq!(db.traditional_of(zhang, Some('张')).unicode, '张');
        assert_eq!(db.traditional_of(ming, Some('朙')).unicode, '明');
    }
}
