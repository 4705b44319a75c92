//! Attributes derived from a precomputed four-pillar (八字) chart.
//!
//! The calendar conversion itself happens elsewhere; this module only reads
//! the stems and branches it is handed.

use crate::error::{NameForgeError, NfResult};
use crate::lexicon::FiveElement;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

/// Heavenly stem (天干).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(ascii_case_insensitive)]
pub enum Stem {
    #[strum(to_string = "甲", serialize = "jia")]
    Jia,
    #[strum(to_string = "乙", serialize = "yi")]
    Yi,
    #[strum(to_string = "丙", serialize = "bing")]
    Bing,
    #[strum(to_string = "丁", serialize = "ding")]
    Ding,
    #[strum(to_string = "戊", serialize = "wu")]
    Wu,
    #[strum(to_string = "己", serialize = "ji")]
    Ji,
    #[strum(to_string = "庚", serialize = "geng")]
    Geng,
    #[strum(to_string = "辛", serialize = "xin")]
    Xin,
    #[strum(to_string = "壬", serialize = "ren")]
    Ren,
    #[strum(to_string = "癸", serialize = "gui")]
    Gui,
}

impl Stem {
    pub fn index(&self) -> u8 {
        *self as u8
    }

    pub fn element(&self) -> FiveElement {
        match self {
            Stem::Jia | Stem::Yi => FiveElement::Wood,
            Stem::Bing | Stem::Ding => FiveElement::Fire,
            Stem::Wu | Stem::Ji => FiveElement::Earth,
            Stem::Geng | Stem::Xin => FiveElement::Metal,
            Stem::Ren | Stem::Gui => FiveElement::Water,
        }
    }
}

/// Earthly branch (地支).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(ascii_case_insensitive)]
pub enum Branch {
    #[strum(to_string = "子", serialize = "zi")]
    Zi,
    #[strum(to_string = "丑", serialize = "chou")]
    Chou,
    #[strum(to_string = "寅", serialize = "yin")]
    Yin,
    #[strum(to_string = "卯", serialize = "mao")]
    Mao,
    #[strum(to_string = "辰", serialize = "chen")]
    Chen,
    #[strum(to_string = "巳", serialize = "si")]
    Si,
    #[strum(to_string = "午", serialize = "wu")]
    Wu,
    #[strum(to_string = "未", serialize = "wei")]
    Wei,
    #[strum(to_string = "申", serialize = "shen")]
    Shen,
    #[strum(to_string = "酉", serialize = "you")]
    You,
    #[strum(to_string = "戌", serialize = "xu")]
    Xu,
    #[strum(to_string = "亥", serialize = "hai")]
    Hai,
}

impl Branch {
    pub fn index(&self) -> u8 {
        *self as u8
    }

    /// Element of the branch itself.
    pub fn element(&self) -> FiveElement {
        match self {
            Branch::Yin | Branch::Mao => FiveElement::Wood,
            Branch::Si | Branch::Wu => FiveElement::Fire,
            Branch::Chou | Branch::Chen | Branch::Wei | Branch::Xu => FiveElement::Earth,
            Branch::Shen | Branch::You => FiveElement::Metal,
            Branch::Zi | Branch::Hai => FiveElement::Water,
        }
    }

    /// Hidden stems (藏干), main stem first.
    pub fn hidden_stems(&self) -> &'static [Stem] {
        use Stem::*;
        match self {
            Branch::Zi => &[Gui],
            Branch::Chou => &[Ji, Xin, Gui],
            Branch::Yin => &[Jia, Bing, Wu],
            Branch::Mao => &[Yi],
            Branch::Chen => &[Wu, Yi, Gui],
            Branch::Si => &[Bing, Wu, Geng],
            Branch::Wu => &[Ding, Ji],
            Branch::Wei => &[Ji, Ding, Yi],
            Branch::Shen => &[Geng, Ren, Wu],
            Branch::You => &[Xin],
            Branch::Xu => &[Wu, Xin, Ding],
            Branch::Hai => &[Ren, Jia],
        }
    }

    pub fn animal(&self) -> Animal {
        match self {
            Branch::Zi => Animal::Rat,
            Branch::Chou => Animal::Ox,
            Branch::Yin => Animal::Tiger,
            Branch::Mao => Animal::Rabbit,
            Branch::Chen => Animal::Dragon,
            Branch::Si => Animal::Snake,
            Branch::Wu => Animal::Horse,
            Branch::Wei => Animal::Goat,
            Branch::Shen => Animal::Monkey,
            Branch::You => Animal::Rooster,
            Branch::Xu => Animal::Dog,
            Branch::Hai => Animal::Pig,
        }
    }
}

/// Zodiac sign of a year branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Animal {
    Rat,
    Ox,
    Tiger,
    Rabbit,
    Dragon,
    Snake,
    Horse,
    Goat,
    Monkey,
    Rooster,
    Dog,
    Pig,
}

impl Animal {
    pub fn glyph(&self) -> char {
        const GLYPHS: [char; 12] = ['鼠', '牛', '虎', '兔', '龙', '蛇', '马', '羊', '猴', '鸡', '狗', '猪'];
        GLYPHS[*self as usize]
    }
}

/// Sound element (纳音) names, one per consecutive pair of the cycle.
#[rustfmt::skip]
const NAYIN: [(&str, FiveElement); 30] = [
    ("海中金", FiveElement::Metal), ("炉中火", FiveElement::Fire),  ("大林木", FiveElement::Wood),
    ("路旁土", FiveElement::Earth), ("剑锋金", FiveElement::Metal), ("山头火", FiveElement::Fire),
    ("涧下水", FiveElement::Water), ("城头土", FiveElement::Earth), ("白蜡金", FiveElement::Metal),
    ("杨柳木", FiveElement::Wood),  ("泉中水", FiveElement::Water), ("屋上土", FiveElement::Earth),
    ("霹雳火", FiveElement::Fire),  ("松柏木", FiveElement::Wood),  ("长流水", FiveElement::Water),
    ("沙中金", FiveElement::Metal), ("山下火", FiveElement::Fire),  ("平地木", FiveElement::Wood),
    ("壁上土", FiveElement::Earth), ("金箔金", FiveElement::Metal), ("覆灯火", FiveElement::Fire),
    ("天河水", FiveElement::Water), ("大驿土", FiveElement::Earth), ("钗钏金", FiveElement::Metal),
    ("桑柘木", FiveElement::Wood),  ("大溪水", FiveElement::Water), ("沙中土", FiveElement::Earth),
    ("天上火", FiveElement::Fire),  ("石榴木", FiveElement::Wood),  ("大海水", FiveElement::Water),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Nayin {
    /// Position of the pillar in the sexagenary cycle (0..60).
    pub cycle: u8,
    pub name: &'static str,
    pub element: FiveElement,
}

/// A stem/branch pair (干支).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pillar {
    pub stem: Stem,
    pub branch: Branch,
}

impl Pillar {
    pub fn new(stem: Stem, branch: Branch) -> Self {
        Self { stem, branch }
    }

    /// Position in the sexagenary cycle, 0 for 甲子. `None` when stem and
    /// branch parities differ; such pairs never occur in the cycle.
    pub fn value(&self) -> Option<u8> {
        let s = self.stem.index() as i32;
        let b = self.branch.index() as i32;
        if s % 2 != b % 2 {
            return None;
        }
        Some((6 * s - 5 * b).rem_euclid(60) as u8)
    }

    pub fn nayin(&self) -> Option<Nayin> {
        let cycle = self.value()?;
        let (name, element) = NAYIN[cycle as usize / 2];
        Some(Nayin {
            cycle,
            name,
            element,
        })
    }
}

impl fmt::Display for Pillar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.stem, self.branch)
    }
}

impl FromStr for Pillar {
    type Err = NameForgeError;

    /// Two glyphs, e.g. `甲子`.
    fn from_str(s: &str) -> NfResult<Self> {
        let invalid = || NameForgeError::InvalidPillar(s.to_string());
        let mut chars = s.trim().chars();
        let (Some(st), Some(br), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(invalid());
        };

        let stem = Stem::iter().find(|x| x.to_string().starts_with(st)).ok_or_else(invalid)?;
        let branch = Branch::iter().find(|x| x.to_string().starts_with(br)).ok_or_else(invalid)?;
        let pillar = Pillar::new(stem, branch);
        pillar.value().ok_or_else(invalid)?;
        Ok(pillar)
    }
}

/// Year, month, day and hour pillars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FourPillars {
    pub year: Pillar,
    pub month: Pillar,
    pub day: Pillar,
    pub hour: Pillar,
}

impl FourPillars {
    pub fn iter(&self) -> impl Iterator<Item = &Pillar> {
        [&self.year, &self.month, &self.day, &self.hour].into_iter()
    }

    pub fn animal(&self) -> Animal {
        self.year.branch.animal()
    }
}

impl FromStr for FourPillars {
    type Err = NameForgeError;

    /// Four pillars separated by commas or whitespace: `甲子,丙寅,戊辰,庚申`.
    fn from_str(s: &str) -> NfResult<Self> {
        let parts: Vec<&str> = s
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|p| !p.is_empty())
            .collect();
        let [year, month, day, hour] = parts.as_slice() else {
            return Err(NameForgeError::InvalidPillar(s.to_string()));
        };
        Ok(Self {
            year: year.parse()?,
            month: month.parse()?,
            day: day.parse()?,
            hour: hour.parse()?,
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementCount {
    pub wood: u32,
    pub fire: u32,
    pub earth: u32,
    pub metal: u32,
    pub water: u32,
}

impl ElementCount {
    pub fn add(&mut self, element: FiveElement) {
        match element {
            FiveElement::Wood => self.wood += 1,
            FiveElement::Fire => self.fire += 1,
            FiveElement::Earth => self.earth += 1,
            FiveElement::Metal => self.metal += 1,
            FiveElement::Water => self.water += 1,
            FiveElement::Unknown => {}
        }
    }

    pub fn get(&self, element: FiveElement) -> u32 {
        match element {
            FiveElement::Wood => self.wood,
            FiveElement::Fire => self.fire,
            FiveElement::Earth => self.earth,
            FiveElement::Metal => self.metal,
            FiveElement::Water => self.water,
            FiveElement::Unknown => 0,
        }
    }

    pub fn sum(&self) -> u32 {
        self.wood + self.fire + self.earth + self.metal + self.water
    }

    /// Known elements with a zero count.
    pub fn missing(&self) -> Vec<FiveElement> {
        FiveElement::iter()
            .filter(|e| e.is_known() && self.get(*e) == 0)
            .collect()
    }

    fn merged(&self, other: &ElementCount) -> Self {
        Self {
            wood: self.wood + other.wood,
            fire: self.fire + other.fire,
            earth: self.earth + other.earth,
            metal: self.metal + other.metal,
            water: self.water + other.water,
        }
    }
}

/// Element tally of a chart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GanzhiFiveElements {
    /// Stems plus the branches' own elements.
    pub five_elements: ElementCount,
    /// Hidden stems of the branches.
    pub five_elements_hidden: ElementCount,
    pub five_elements_total: ElementCount,
}

pub fn tally_five_elements(pillars: &FourPillars) -> GanzhiFiveElements {
    let mut visible = ElementCount::default();
    let mut hidden = ElementCount::default();

    for p in pillars.iter() {
        visible.add(p.stem.element());
        visible.add(p.branch.element());
        for stem in p.branch.hidden_stems() {
            hidden.add(stem.element());
        }
    }

    GanzhiFiveElements {
        five_elements: visible,
        five_elements_hidden: hidden,
        five_elements_total: visible.merged(&hidden),
    }
}

/// Sound elements of the four pillars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SoundFiveElements {
    pub year: Option<Nayin>,
    pub month: Option<Nayin>,
    pub day: Option<Nayin>,
    pub hour: Option<Nayin>,
}

impl SoundFiveElements {
    pub fn of(pillars: &FourPillars) -> Self {
        Self {
            year: pillars.year.nayin(),
            month: pillars.month.nayin(),
            day: pillars.day.nayin(),
            hour: pillars.hour.nayin(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Stem::Jia, Branch::Zi, Some(0))]
    #[case(Stem::Yi, Branch::Chou, Some(1))]
    #[case(Stem::Jia, Branch::Xu, Some(10))]
    #[case(Stem::Gui, Branch::Hai, Some(59))]
    #[case(Stem::Jia, Branch::Chou, None)]
    fn test_cycle_value(#[case] stem: Stem, #[case] branch: Branch, #[case] expected: Option<u8>) {
        assert_eq!(Pillar::new(stem, branch).value(), expected);
    }

    #[test]
    fn test_every_valid_pair_is_distinct() {
        let mut seen = std::collections::HashSet::new();
        for s in Stem::iter() {
            for b in Branch::iter() {
                if let Some(v) = Pillar::new(s, b).value() {
                    assert!(v < 60);
                    assert!(seen.insert(v));
                }
            }
        }
        assert_eq!(seen.len(), 60);
    }

    #[test]
    fn test_nayin() {
        let n = "甲子".parse::<Pillar>().unwrap().nayin().unwrap();
        assert_eq!(n.name, "海中金");
        assert_eq!(n.element, FiveElement::Metal);

        let n = "癸亥".parse::<Pillar>().unwrap().nayin().unwrap();
        assert_eq!(n.name, "大海水");
    }

    #[test]
    fn test_pillar_parsing() {
        assert_eq!("丙寅".parse::<Pillar>().unwrap().to_string(), "丙寅");
        assert!("甲丑".parse::<Pillar>().is_err());
        assert!("甲".parse::<Pillar>().is_err());
        assert!("甲子丑".parse::<Pillar>().is_err());
        assert!("ab".parse::<Pillar>().is_err());
    }

    #[test]
    fn test_tally_counts_hidden_stems() {
        let chart: FourPillars = "甲子, 丙寅, 戊辰, 庚申".parse().unwrap();
        let t = tally_five_elements(&chart);

        assert_eq!(t.five_elements.sum(), 8);
        assert_eq!(t.five_elements.wood, 2);
        assert_eq!(t.five_elements.earth, 2);
        // 子 癸, 寅 甲丙戊, 辰 戊乙癸, 申 庚壬戊
        assert_eq!(t.five_elements_hidden.sum(), 10);
        assert_eq!(t.five_elements_hidden.earth, 3);
        assert_eq!(t.five_elements_hidden.water, 3);
        assert_eq!(t.five_elements_total.sum(), 18);
        assert_eq!(chart.animal(), Animal::Rat);
    }

    #[test]
    fn test_missing_elements() {
        let mut count = ElementCount::default();
        count.add(FiveElement::Wood);
        count.add(FiveElement::Unknown);
        assert_eq!(count.sum(), 1);
        assert_eq!(count.missing().len(), 4);
    }
}
