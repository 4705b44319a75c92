#![allow(dead_code)] // Not every test binary uses every helper.

use nameforge::lexicon::{FiveElement, Lexicon};
use nameforge::numerology::RankTable;
use nameforge::unihan::{HanCharacter, Unihan};
use nameforge::Engine;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use std::sync::{Arc, OnceLock};

/// Builder for HanCharacter records.
pub struct CharBuilder {
    c: HanCharacter,
}

impl CharBuilder {
    pub fn new(ch: char, strokes: u8) -> Self {
        Self {
            c: HanCharacter {
                total_strokes: vec![strokes],
                ..HanCharacter::new(ch)
            },
        }
    }

    pub fn simplified(mut self, ch: char) -> Self {
        self.c.simplified = vec![ch];
        self
    }

    pub fn traditional(mut self, ch: char) -> Self {
        self.c.traditional = vec![ch];
        self
    }

    pub fn mandarin(mut self, reading: &str) -> Self {
        self.c.readings.mandarin = Some(reading.to_string());
        self
    }

    pub fn build(self) -> HanCharacter {
        self.c
    }
}

/// (character, strokes, simplified, traditional, mandarin)
pub const CHARS: &[(char, u8, Option<char>, Option<char>, &str)] = &[
    ('张', 7, None, Some('張'), "zhāng"),
    ('張', 11, Some('张'), None, "zhāng"),
    ('王', 4, None, None, "wáng"),
    ('欧', 8, None, Some('歐'), "ōu"),
    ('歐', 15, Some('欧'), None, "ōu"),
    ('阳', 6, None, Some('陽'), "yáng"),
    ('陽', 12, Some('阳'), None, "yáng"),
    ('明', 8, None, None, "míng"),
    ('华', 6, None, Some('華'), "huá"),
    ('華', 12, Some('华'), None, "huá"),
    ('伟', 6, None, Some('偉'), "wěi"),
    ('偉', 11, Some('伟'), None, "wěi"),
    ('朋', 8, None, None, "péng"),
    ('林', 8, None, None, "lín"),
    ('文', 4, None, None, "wén"),
    ('安', 6, None, None, "ān"),
    ('宇', 6, None, None, "yǔ"),
    ('子', 3, None, None, "zǐ"),
    ('一', 1, None, None, "yī"),
    ('心', 4, None, None, "xīn"),
    ('玉', 5, None, None, "yù"),
    ('美', 9, None, None, "měi"),
    ('家', 10, None, None, "jiā"),
    ('龙', 5, None, Some('龍'), "lóng"),
    ('龍', 16, Some('龙'), None, "lóng"),
];

/// Broad list, in frequency order.
pub const COMMON_L1: &str = "明华伟朋林文安宇子一心玉美家龙";
/// Narrow list.
pub const COMMON_L2: &str = "明文安心";

/// Every traditional form reachable from the broad list.
pub const TRADITIONAL_L1: &str = "明華偉朋林文安宇子一心玉美家龍";

pub const FIVE_ELEMENTS: &[(char, FiveElement)] = &[
    ('张', FiveElement::Fire),
    ('王', FiveElement::Earth),
    ('明', FiveElement::Fire),
    ('华', FiveElement::Water),
    ('文', FiveElement::Water),
    ('安', FiveElement::Earth),
    ('林', FiveElement::Wood),
];

pub const COMMON_NAMES: &[(&str, u32)] = &[("张华家", 10), ("张文", 3)];

pub fn fixture_unihan() -> Unihan {
    CHARS
        .iter()
        .map(|&(ch, strokes, simp, trad, reading)| {
            let mut b = CharBuilder::new(ch, strokes).mandarin(reading);
            if let Some(s) = simp {
                b = b.simplified(s);
            }
            if let Some(t) = trad {
                b = b.traditional(t);
            }
            b.build()
        })
        .collect()
}

pub fn fixture_lexicon() -> Lexicon {
    let mut lex = Lexicon {
        common_l1: COMMON_L1.chars().collect(),
        common_l2: COMMON_L2.chars().collect(),
        ..Default::default()
    };
    lex.five_elements.extend(FIVE_ELEMENTS.iter().copied());
    lex.common_names
        .extend(COMMON_NAMES.iter().map(|&(n, c)| (n.to_string(), c)));
    lex.family_names.insert("张".to_string(), 1000);
    lex
}

/// The rank table only depends on the stroke domain, so every test in a
/// binary shares one.
pub fn shared_table() -> Arc<RankTable> {
    static TABLE: OnceLock<Arc<RankTable>> = OnceLock::new();
    TABLE.get_or_init(|| Arc::new(RankTable::build())).clone()
}

pub fn engine() -> Engine {
    Engine::new(fixture_unihan(), fixture_lexicon()).with_table(shared_table())
}

fn codes(text: &str) -> String {
    text.chars().map(|c| format!("{}\n", c as u32)).collect()
}

/// Writes the fixture as on-disk data files under `dir`, with the default
/// file names.
pub fn write_data_dir(dir: &Path) {
    fs::create_dir_all(dir).unwrap();

    // Strokes and readings in one file, variants in another.
    let mut readings = File::create(dir.join("Unihan_Readings.txt")).unwrap();
    let mut variants = File::create(dir.join("Unihan_Variants.txt")).unwrap();
    let mut strokes = File::create(dir.join("Unihan_IRGSources.txt")).unwrap();
    writeln!(readings, "# fixture").unwrap();
    for &(ch, n, simp, trad, reading) in CHARS {
        let cp = ch as u32;
        writeln!(strokes, "U+{:04X}\tkTotalStrokes\t{}", cp, n).unwrap();
        writeln!(readings, "U+{:04X}\tkMandarin\t{}", cp, reading).unwrap();
        if let Some(s) = simp {
            writeln!(variants, "U+{:04X}\tkSimplifiedVariant\tU+{:04X}", cp, s as u32).unwrap();
        }
        if let Some(t) = trad {
            writeln!(variants, "U+{:04X}\tkTraditionalVariant\tU+{:04X}", cp, t as u32).unwrap();
        }
    }

    fs::write(dir.join("common_l1.txt"), codes(COMMON_L1)).unwrap();
    fs::write(dir.join("common_l2.txt"), codes(COMMON_L2)).unwrap();

    let names: String = COMMON_NAMES
        .iter()
        .map(|(n, c)| format!("{}:{}\n", n, c))
        .collect();
    fs::write(dir.join("common_names.txt"), names).unwrap();
    fs::write(dir.join("family_names.txt"), "张:1000\n王:900\n欧阳:20\n").unwrap();

    let elements: String = FIVE_ELEMENTS
        .iter()
        .map(|(ch, e)| format!("{}:{}\n", *ch as u32, e))
        .collect();
    fs::write(dir.join("five_elements.txt"), elements).unwrap();
}
