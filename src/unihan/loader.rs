use super::Unihan;
use crate::error::NfResult;
use crate::lexicon::loader::LoadReport;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

/// Parses a `U+XXXX` code point token. Trailing source annotations
/// (`U+8457<kMatthews`) are ignored.
pub fn parse_code_point(token: &str) -> Option<char> {
    let token = token.split('<').next()?.trim();
    let hex = token
        .strip_prefix("U+")
        .or_else(|| token.strip_prefix("u+"))?;
    u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
}

/// Loads Unihan database text (`U+XXXX<TAB>kField<TAB>value`) into `db`.
///
/// Several Unihan files (readings, variants, IRG sources) can be fed into the
/// same database one after another. Unknown fields are ignored; lines that
/// cannot be parsed are counted as skipped.
pub fn load_unihan_into<R: Read>(db: &mut Unihan, reader: R) -> NfResult<LoadReport> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .quoting(false)
        .flexible(true)
        .comment(Some(b'#'))
        .from_reader(reader);

    let mut report = LoadReport::default();

    for result in rdr.records() {
        let rec = match result {
            Ok(rec) => rec,
            Err(e) => {
                debug!("Unihan parse error: {}", e);
                report.skipped += 1;
                continue;
            }
        };
        if rec.len() < 3 {
            report.skipped += 1;
            continue;
        }

        let Some(ch) = parse_code_point(&rec[0]) else {
            report.skipped += 1;
            continue;
        };
        let value = rec[2].trim();

        match rec[1].trim() {
            "kTotalStrokes" => {
                let strokes: Vec<u8> = value
                    .split_whitespace()
                    .filter_map(|s| s.parse().ok())
                    .collect();
                if strokes.is_empty() {
                    report.skipped += 1;
                    continue;
                }
                db.entry(ch).total_strokes = strokes;
            }
            "kSimplifiedVariant" => {
                db.entry(ch).simplified = value.split_whitespace().filter_map(parse_code_point).collect();
            }
            "kTraditionalVariant" => {
                db.entry(ch).traditional = value.split_whitespace().filter_map(parse_code_point).collect();
            }
            "kMandarin" => db.entry(ch).readings.mandarin = Some(value.to_string()),
            "kXHC1983" => db.entry(ch).readings.xhc1983 = Some(value.to_string()),
            "kHanyuPinyin" => db.entry(ch).readings.hanyu_pinyin = Some(value.to_string()),
            _ => continue,
        }
        report.loaded += 1;
    }

    Ok(report)
}

pub fn load_unihan<R: Read>(reader: R) -> NfResult<(Unihan, LoadReport)> {
    let mut db = Unihan::new();
    let report = load_unihan_into(&mut db, reader)?;
    Ok((db, report))
}

pub fn load_unihan_file<P: AsRef<Path>>(path: P) -> NfResult<Unihan> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let (db, report) = load_unihan(file)?;
    info!(
        "Unihan: {} characters from {} ({} fields, {} skipped)",
        db.len(),
        path.display(),
        report.loaded,
        report.skipped
    );
    Ok(db)
}
