use crate::config::DataPaths;
use crate::error::{NameForgeError, NfResult};
use crate::ganzhi::{self, FourPillars, GanzhiFiveElements, SoundFiveElements};
use crate::generator::{Constraints, Generator};
use crate::lexicon::{FolkwayEntry, Lexicon, StrokeIndex};
use crate::name::{NameRecord, Normalizer};
use crate::numerology::{GridReport, RankTable};
use crate::unihan::{loader::load_unihan_into, CharacterOracle, Unihan};
use serde::Serialize;
use std::collections::HashSet;
use std::fs::File;
use std::sync::Arc;
use tracing::{debug, info};

/// Chart-derived part of a report.
#[derive(Serialize, Debug, Clone)]
pub struct ChartReport {
    pub pillars: FourPillars,
    pub ganzhi_five_elements: GanzhiFiveElements,
    pub sound_five_elements: SoundFiveElements,
    pub animal: ganzhi::Animal,
}

impl ChartReport {
    pub fn of(pillars: &FourPillars) -> Self {
        Self {
            pillars: *pillars,
            ganzhi_five_elements: ganzhi::tally_five_elements(pillars),
            sound_five_elements: SoundFiveElements::of(pillars),
            animal: pillars.animal(),
        }
    }
}

/// Result of a full naming request.
#[derive(Serialize, Debug, Clone)]
pub struct KirsenReport {
    pub list: Vec<NameRecord>,
    pub total: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chart: Option<ChartReport>,
    /// Folklore notes on the given-name characters of `list`.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub folkways: Vec<FolkwayEntry>,
}

/// Owns the loaded data and the rank table, and wires generator and
/// normalizer together.
pub struct Engine {
    pub unihan: Unihan,
    pub lexicon: Lexicon,
    pub index: StrokeIndex,
    table: Option<Arc<RankTable>>,
}

impl Engine {
    /// Assembles an engine from already loaded data. The rank table is not
    /// built until [`init`](Self::init) or [`with_table`](Self::with_table).
    pub fn new(unihan: Unihan, lexicon: Lexicon) -> Self {
        let index = StrokeIndex::build(&lexicon, &unihan);
        Self {
            unihan,
            lexicon,
            index,
            table: None,
        }
    }

    /// Loads every data file named by `paths`.
    pub fn load(paths: &DataPaths) -> NfResult<Self> {
        let files = paths.unihan_files();
        if files.is_empty() {
            return Err(NameForgeError::Config("no Unihan file configured".to_string()));
        }

        let mut unihan = Unihan::new();
        for path in &files {
            let report = load_unihan_into(&mut unihan, File::open(path)?)?;
            debug!(
                "Unihan {}: {} fields, {} skipped",
                path.display(),
                report.loaded,
                report.skipped
            );
        }
        info!("Unihan ready: {} characters", unihan.len());

        let lexicon = Lexicon::load(paths)?;
        Ok(Self::new(unihan, lexicon))
    }

    /// Builds the rank table. Calling it again is harmless; the table only
    /// depends on the stroke domain.
    pub fn init(&mut self) -> &mut Self {
        if self.table.is_none() {
            self.table = Some(Arc::new(RankTable::build()));
        }
        self
    }

    /// Shares an existing table instead of building one.
    pub fn with_table(mut self, table: Arc<RankTable>) -> Self {
        self.table = Some(table);
        self
    }

    pub fn table(&self) -> NfResult<Arc<RankTable>> {
        self.table.clone().ok_or(NameForgeError::TableUninitialized)
    }

    pub fn generator(&self) -> NfResult<Generator<'_>> {
        Ok(Generator::new(
            self.table()?,
            &self.unihan,
            &self.lexicon,
            &self.index,
        ))
    }

    pub fn normalizer(&self) -> Normalizer<'_> {
        Normalizer::new(&self.unihan, &self.lexicon)
    }

    /// Full request: traditionalise, generate, normalise and flag common
    /// names. The chart part is filled when pillars are supplied.
    pub fn kirsen(
        &self,
        constraints: &Constraints,
        pillars: Option<&FourPillars>,
    ) -> NfResult<KirsenReport> {
        let generator = self.generator()?;
        let constraints = constraints.traditionalize(&self.unihan, &self.lexicon);
        let generation = generator.generate(&constraints)?;

        let normalizer = self.normalizer();
        let list: Vec<NameRecord> = generation
            .candidates
            .iter()
            .map(|candidate| {
                let mut record = normalizer.normalize_candidate(&generation, candidate);
                record.strip_characters();
                record
            })
            .collect();

        info!(
            "Generated {} names for '{}'",
            list.len(),
            generation.family.iter().collect::<String>()
        );

        Ok(KirsenReport {
            folkways: self.folkways_of(&list),
            list,
            total: generation.total,
            chart: pillars.map(ChartReport::of),
        })
    }

    /// Folkway entries for the given-name characters of `list`, each once,
    /// in order of first appearance. The simplified form is looked up first.
    pub fn folkways_of(&self, list: &[NameRecord]) -> Vec<FolkwayEntry> {
        let mut seen = HashSet::new();
        let mut entries = Vec::new();
        for rec in list {
            let simplified = rec.simplified.given_name.text.chars();
            let traditional = rec.traditional.given_name.text.chars();
            for (s, t) in simplified.zip(traditional) {
                let entry = self.lexicon.folkway(s).or_else(|| self.lexicon.folkway(t));
                if let Some(entry) = entry.filter(|e| seen.insert(e.unicode)) {
                    entries.push(entry.clone());
                }
            }
        }
        entries
    }

    /// Numerology of an explicit name, after traditionalising it.
    pub fn score_name(&self, family: &str, given: &str) -> NfResult<GridReport> {
        let strokes = |text: &str| -> NfResult<Vec<u8>> {
            text.chars()
                .map(|ch| {
                    let c = self
                        .unihan
                        .resolve(ch)
                        .ok_or(NameForgeError::CharacterResolution(ch))?;
                    let t = self.lexicon.traditional_of(c, &self.unihan);
                    self.lexicon
                        .strokes_of(t)
                        .ok_or(NameForgeError::CharacterResolution(ch))
                })
                .collect()
        };

        let f = strokes(family)?;
        let g = strokes(given)?;
        match (f.as_slice(), g.as_slice()) {
            ([f0], [g0]) => Ok(GridReport::evaluate(*f0, 0, *g0, 0)),
            ([f0], [g0, g1]) => Ok(GridReport::evaluate(*f0, 0, *g0, *g1)),
            ([f0, f1], [g0]) => Ok(GridReport::evaluate(*f0, *f1, *g0, 0)),
            ([f0, f1], [g0, g1]) => Ok(GridReport::evaluate(*f0, *f1, *g0, *g1)),
            _ => Err(NameForgeError::InvalidConstraint(format!(
                "cannot score '{}' '{}': segments must have one or two characters",
                family, given
            ))),
        }
    }
}
