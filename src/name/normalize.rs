use super::pinyin::reading_of;
use super::{NameDef, NameRecord, NameSpec};
use crate::generator::{Candidate, Generation};
use crate::lexicon::{FiveElement, Lexicon};
use crate::unihan::{CharacterOracle, HanCharacter};

/// Raw name to normalise, split into segments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameInput {
    pub family: Vec<char>,
    pub middle: Vec<char>,
    pub given: Vec<char>,
}

impl NameInput {
    pub fn new(family: &str, middle: &str, given: &str) -> Self {
        Self {
            family: family.chars().collect(),
            middle: middle.chars().collect(),
            given: given.chars().collect(),
        }
    }

    pub fn from_candidate(generation: &Generation, candidate: &Candidate) -> Self {
        Self {
            family: generation.family.clone(),
            middle: generation.middle.clone(),
            given: candidate.given.clone(),
        }
    }
}

/// Resolves names against the character database and the curated tables.
/// Never fails: unknown characters degrade to placeholders.
pub struct Normalizer<'a> {
    oracle: &'a dyn CharacterOracle,
    lexicon: &'a Lexicon,
}

impl<'a> Normalizer<'a> {
    pub fn new(oracle: &'a dyn CharacterOracle, lexicon: &'a Lexicon) -> Self {
        Self { oracle, lexicon }
    }

    fn resolve_all(&self, runes: &[char]) -> Vec<HanCharacter> {
        runes
            .iter()
            .filter_map(|&r| self.oracle.resolve(r))
            .cloned()
            .collect()
    }

    fn spec_from(&self, characters: Vec<HanCharacter>) -> NameSpec {
        let runes: Vec<char> = characters.iter().map(|c| c.unicode).collect();
        NameSpec {
            strokes: characters
                .iter()
                .map(|c| self.lexicon.strokes_of(c).unwrap_or(0))
                .collect(),
            five_elements: runes.iter().map(|&r| self.lexicon.five_element(r)).collect(),
            text: runes.iter().collect(),
            len: runes.len(),
            runes,
            characters,
        }
    }

    /// The as-typed segment. Derived arrays cover the resolved characters
    /// only; text and length keep every input character.
    fn original_spec(&self, input: &[char]) -> NameSpec {
        NameSpec {
            text: input.iter().collect(),
            len: input.len(),
            ..self.spec_from(self.resolve_all(input))
        }
    }

    fn simplified_spec(&self, original: &NameSpec) -> NameSpec {
        self.spec_from(
            original
                .characters
                .iter()
                .map(|c| self.oracle.simplified_of(c).clone())
                .collect(),
        )
    }

    fn traditional_spec(&self, original: &NameSpec) -> NameSpec {
        self.spec_from(
            original
                .characters
                .iter()
                .map(|c| self.lexicon.traditional_of(c, self.oracle).clone())
                .collect(),
        )
    }

    pub fn normalize(&self, input: &NameInput) -> NameRecord {
        let original = def_from(
            self.original_spec(&input.family),
            self.original_spec(&input.middle),
            self.original_spec(&input.given),
        );
        let simplified = def_from(
            self.simplified_spec(&original.family_name),
            self.simplified_spec(&original.middle_name),
            self.simplified_spec(&original.given_name),
        );
        let traditional = def_from(
            self.traditional_spec(&original.family_name),
            self.traditional_spec(&original.middle_name),
            self.traditional_spec(&original.given_name),
        );

        let (pinyin, pinyin_tone) = simplified
            .characters()
            .map(|c| {
                let r = reading_of(c, self.lexicon);
                (r.plain, r.toned)
            })
            .unzip();

        let mut record = NameRecord {
            original,
            simplified,
            traditional,
            pinyin_tone,
            pinyin,
            ..Default::default()
        };
        inherit_elements(&mut record);
        record
    }

    /// Normalises a generator candidate and fills in its rank and the
    /// common-name flag.
    pub fn normalize_candidate(&self, generation: &Generation, candidate: &Candidate) -> NameRecord {
        let mut record = self.normalize(&NameInput::from_candidate(generation, candidate));
        record.rank = candidate.rank;
        record.is_common = self.lexicon.is_common_name(&record.simplified.compact());
        record
    }
}

fn def_from(family_name: NameSpec, middle_name: NameSpec, given_name: NameSpec) -> NameDef {
    let full_name = format!("{} {}{}", family_name.text, middle_name.text, given_name.text);
    NameDef {
        family_name,
        middle_name,
        given_name,
        full_name,
    }
}

/// Unknown elements in the original and traditional scripts take the
/// simplified element at the same position.
fn inherit_elements(record: &mut NameRecord) {
    let simplified = record.simplified.segments().map(|s| s.five_elements.clone());

    for def in [&mut record.original, &mut record.traditional] {
        for (spec, fallback) in def.segments_mut().into_iter().zip(simplified.iter()) {
            for (element, &canonical) in spec.five_elements.iter_mut().zip(fallback.iter()) {
                if *element == FiveElement::Unknown {
                    *element = canonical;
                }
            }
        }
    }
}
