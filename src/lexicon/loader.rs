use super::{FiveElement, FolkwayEntry};
use crate::error::NfResult;
use serde::Serialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, warn};

/// Outcome of a flat-file load: malformed lines are skipped, never fatal.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    pub loaded: usize,
    pub skipped: usize,
}

impl LoadReport {
    fn log(&self, what: &str) {
        if self.skipped > 0 {
            warn!("{}: loaded {}, skipped {} malformed lines", what, self.loaded, self.skipped);
        } else {
            debug!("{}: loaded {}", what, self.loaded);
        }
    }
}

fn reader_with_delimiter<R: Read>(reader: R, delimiter: u8) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .quoting(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader)
}

fn parse_char_code(s: &str) -> Option<char> {
    s.trim().parse::<u32>().ok().and_then(char::from_u32)
}

/// Generic `key:value` loader. `parse` turns one record into an entry, or
/// `None` when the line is malformed.
fn load_pairs<R, K, V, F>(reader: R, parse: F) -> NfResult<(HashMap<K, V>, LoadReport)>
where
    R: Read,
    K: std::hash::Hash + Eq,
    F: Fn(&str, &str) -> Option<(K, V)>,
{
    let mut rdr = reader_with_delimiter(reader, b':');
    let mut map = HashMap::new();
    let mut report = LoadReport::default();

    for result in rdr.records() {
        match result {
            Ok(rec) if rec.len() == 2 => match parse(&rec[0], &rec[1]) {
                Some((k, v)) => {
                    map.insert(k, v);
                    report.loaded += 1;
                }
                None => report.skipped += 1,
            },
            Ok(rec) if rec.len() == 1 && rec[0].is_empty() => {}
            _ => report.skipped += 1,
        }
    }

    Ok((map, report))
}

/// One decimal code point per line. Order is kept, duplicates dropped.
pub fn load_code_list<R: Read>(reader: R) -> NfResult<(Vec<char>, LoadReport)> {
    let mut rdr = reader_with_delimiter(reader, b'\t');
    let mut list = Vec::new();
    let mut seen = std::collections::HashSet::new();
    let mut report = LoadReport::default();

    for result in rdr.records() {
        let Ok(rec) = result else {
            report.skipped += 1;
            continue;
        };
        if rec.is_empty() || rec[0].is_empty() {
            continue;
        }
        match parse_char_code(&rec[0]) {
            Some(ch) => {
                if seen.insert(ch) {
                    list.push(ch);
                }
                report.loaded += 1;
            }
            None => report.skipped += 1,
        }
    }

    Ok((list, report))
}

/// `name:count`, entries with a non-positive count are dropped.
pub fn load_counts<R: Read>(reader: R) -> NfResult<(HashMap<String, u32>, LoadReport)> {
    load_pairs(reader, |k, v| {
        let count: u32 = v.parse().ok()?;
        (count > 0 && !k.is_empty()).then(|| (k.to_string(), count))
    })
}

/// `codepoint:pinyin`
pub fn load_pinyin_overrides<R: Read>(reader: R) -> NfResult<(HashMap<char, String>, LoadReport)> {
    load_pairs(reader, |k, v| Some((parse_char_code(k)?, v.to_string())))
}

/// `codepoint:strokes`
pub fn load_stroke_overrides<R: Read>(reader: R) -> NfResult<(HashMap<char, u8>, LoadReport)> {
    load_pairs(reader, |k, v| Some((parse_char_code(k)?, v.parse().ok()?)))
}

/// `codepoint:codepoint`
pub fn load_traditional_overrides<R: Read>(
    reader: R,
) -> NfResult<(HashMap<char, char>, LoadReport)> {
    load_pairs(reader, |k, v| Some((parse_char_code(k)?, parse_char_code(v)?)))
}

/// `codepoint:element`, element given in English or as the glyph.
pub fn load_five_elements<R: Read>(
    reader: R,
) -> NfResult<(HashMap<char, FiveElement>, LoadReport)> {
    load_pairs(reader, |k, v| {
        let element = FiveElement::from_str(v).ok().filter(FiveElement::is_known)?;
        Some((parse_char_code(k)?, element))
    })
}

/// `codepoint||text||explanation`. The first entry for a code point wins.
pub fn load_folkways<R: Read>(reader: R) -> NfResult<(HashMap<char, FolkwayEntry>, LoadReport)> {
    let mut map = HashMap::new();
    let mut report = LoadReport::default();

    for line in BufReader::new(reader).lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let parts: Vec<&str> = line.split("||").collect();
        let Some(ch) = (parts.len() == 3).then(|| parse_char_code(parts[0])).flatten() else {
            report.skipped += 1;
            continue;
        };
        map.entry(ch).or_insert_with(|| FolkwayEntry {
            unicode: ch,
            text: parts[1].to_string(),
            explanation: parts[2].to_string(),
        });
        report.loaded += 1;
    }

    Ok((map, report))
}

macro_rules! file_loader {
    ($name:ident, $inner:ident, $ty:ty, $what:expr) => {
        pub fn $name<P: AsRef<Path>>(path: P) -> NfResult<$ty> {
            let file = File::open(path)?;
            let (data, report) = $inner(file)?;
            report.log($what);
            Ok(data)
        }
    };
}

file_loader!(load_code_list_file, load_code_list, Vec<char>, "common characters");
file_loader!(load_counts_file, load_counts, HashMap<String, u32>, "name counts");
file_loader!(load_pinyin_overrides_file, load_pinyin_overrides, HashMap<char, String>, "pinyin overrides");
file_loader!(load_stroke_overrides_file, load_stroke_overrides, HashMap<char, u8>, "stroke overrides");
file_loader!(load_traditional_overrides_file, load_traditional_overrides, HashMap<char, char>, "traditional overrides");
file_loader!(load_five_elements_file, load_five_elements, HashMap<char, FiveElement>, "five elements");
file_loader!(load_folkways_file, load_folkways, HashMap<char, FolkwayEntry>, "folkways");

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_code_list_keeps_order_and_skips_garbage() {
        let data = "26126\n24352\nnot-a-number\n\n26126\n";
        let (list, report) = load_code_list(Cursor::new(data)).unwrap();
        assert_eq!(list, vec!['明', '张']);
        assert_eq!(report.loaded, 3);
        assert_eq!(report.skipped, 1);
    }

    #[test]
    fn test_counts_drop_non_positive() {
        let data = "张:100\n王:0\n李:x\n司馬:12\nbroken\n";
        let (map, report) = load_counts(Cursor::new(data)).unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map["司馬"], 12);
        assert_eq!(report.loaded, 2);
        assert_eq!(report.skipped, 3);
    }

    #[test]
    fn test_five_elements_accepts_both_spellings() {
        let data = "26126:fire\n29579:土\n24352:unknown\n";
        let (map, report) = load_five_elements(Cursor::new(data)).unwrap();
        assert_eq!(map[&'明'], FiveElement::Fire);
        assert_eq!(map[&'王'], FiveElement::Earth);
        assert_eq!(report.skipped, 1);
    }

    #[test]
    fn test_folkways_first_entry_wins() {
        let data = "26126||明||first\n26126||明||second\nbad line\n";
        let (map, report) = load_folkways(Cursor::new(data)).unwrap();
        assert_eq!(map[&'明'].explanation, "first");
        assert_eq!(report.loaded, 2);
        assert_eq!(report.skipped, 1);
    }
}
