use crate::lexicon::Lexicon;
use crate::unihan::HanCharacter;

/// Placeholder for characters without any reading.
pub const NO_READING: &str = "_";

#[rustfmt::skip]
const TONE_MARKS: &[(char, &str)] = &[
    ('ā', "a"), ('á', "a"), ('ǎ', "a"), ('à', "a"),
    ('ō', "o"), ('ó', "o"), ('ǒ', "o"), ('ò', "o"),
    ('ê', "e"), ('ē', "e"), ('é', "e"), ('ě', "e"), ('è', "e"),
    ('ī', "i"), ('í', "i"), ('ǐ', "i"), ('ì', "i"),
    ('ū', "u"), ('ú', "u"), ('ǔ', "u"), ('ù', "u"),
    ('ǖ', "yu"), ('ǘ', "yu"), ('ǚ', "yu"), ('ǜ', "yu"), ('ü', "yu"),
    ('ń', "n"), ('ň', "n"), ('ǹ', "n"), ('ḿ', "m"),
];

/// Replaces tone-marked vowels by their plain letters. `ü` becomes `yu`.
pub fn strip_tone(pinyin: &str) -> String {
    let mut out = String::with_capacity(pinyin.len());
    for ch in pinyin.chars() {
        match TONE_MARKS.iter().find(|(marked, _)| *marked == ch) {
            Some((_, plain)) => out.push_str(plain),
            None => out.push(ch),
        }
    }
    out
}

/// Romanisation of one character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reading {
    pub plain: String,
    pub toned: String,
}

impl Reading {
    fn from_toned(toned: &str) -> Self {
        Self {
            plain: strip_tone(toned),
            toned: toned.to_string(),
        }
    }

    pub fn missing() -> Self {
        Self {
            plain: NO_READING.to_string(),
            toned: NO_READING.to_string(),
        }
    }
}

/// `"10019.020:qiū,qiú"` and `"1234.010:zhāng"` style readings: the part
/// after the colon, first of the comma-separated alternatives.
fn dictionary_reading(raw: &str) -> Option<&str> {
    let entry = raw.split_whitespace().next()?;
    let (_, readings) = entry.split_once(':')?;
    readings.split(',').next().filter(|r| !r.is_empty())
}

/// Curated override, then `kMandarin`, then `kXHC1983`, then `kHanyuPinyin`.
pub fn reading_of(c: &HanCharacter, lexicon: &Lexicon) -> Reading {
    if let Some(special) = lexicon.pinyin_override(c.unicode) {
        return Reading::from_toned(special);
    }

    let r = &c.readings;
    if let Some(mandarin) = r.mandarin.as_deref() {
        return mandarin
            .split_whitespace()
            .next()
            .map_or_else(Reading::missing, Reading::from_toned);
    }

    r.xhc1983
        .as_deref()
        .or(r.hanyu_pinyin.as_deref())
        .and_then(dictionary_reading)
        .map_or_else(Reading::missing, Reading::from_toned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("zhāng", "zhang")]
    #[case("míng", "ming")]
    #[case("lǚ", "lyu")]
    #[case("nǚ", "nyu")]
    #[case("lü", "lyu")]
    #[case("guō", "guo")]
    #[case("ěr", "er")]
    #[case("yì", "yi")]
    #[case("wǔ", "wu")]
    #[case("plain", "plain")]
    fn test_strip_tone(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(strip_tone(input), expected);
    }

    #[test]
    fn test_strip_tone_is_idempotent() {
        for s in ["zhāng", "lǚ", "xiǎo", "ài"] {
            let once = strip_tone(s);
            assert_eq!(strip_tone(&once), once);
        }
    }

    #[test]
    fn test_reading_priority() {
        let lex = Lexicon::default();

        let mut c = HanCharacter::new('张');
        c.readings.hanyu_pinyin = Some("10048.050:zhāng,zhàng".to_string());
        assert_eq!(reading_of(&c, &lex).toned, "zhāng");

        c.readings.xhc1983 = Some("1452.030:zhǎng 1452.040:zhāng".to_string());
        assert_eq!(reading_of(&c, &lex).toned, "zhǎng");

        c.readings.mandarin = Some("zhāng".to_string());
        assert_eq!(reading_of(&c, &lex).plain, "zhang");

        let mut lex = Lexicon::default();
        lex.pinyin_overrides.insert('张', "zhàng".to_string());
        assert_eq!(reading_of(&c, &lex).toned, "zhàng");
    }

    #[test]
    fn test_missing_reading_uses_placeholder() {
        let r = reading_of(&HanCharacter::new('〇'), &Lexicon::default());
        assert_eq!(r, Reading::missing());

        let mut c = HanCharacter::new('x');
        c.readings.hanyu_pinyin = Some("malformed".to_string());
        assert_eq!(reading_of(&c, &Lexicon::default()).plain, NO_READING);
    }
}
