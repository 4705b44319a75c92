use crate::error::{NameForgeError, NfResult};
use clap::{parser::ValueSource, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Args, Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    #[command(flatten)]
    pub data: DataPaths,
    #[command(flatten)]
    pub search: SearchParams,
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> NfResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            NameForgeError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        let config: Config = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Copies every value the user typed on the command line over the
    /// file-loaded configuration. Defaults never override the file.
    pub fn merge_from_cli(&mut self, cli: &Config, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($section:ident . $field:ident) => {
                if matches.value_source(stringify!($field)) == Some(ValueSource::CommandLine) {
                    self.$section.$field = cli.$section.$field.clone();
                }
            };
        }

        update_if_present!(data.data_dir);
        update_if_present!(data.unihan);
        update_if_present!(data.common_l1);
        update_if_present!(data.common_l2);
        update_if_present!(data.family_names);
        update_if_present!(data.common_names);
        update_if_present!(data.pinyin_special);
        update_if_present!(data.stroke_special);
        update_if_present!(data.traditional_special);
        update_if_present!(data.five_elements);
        update_if_present!(data.folkways);

        update_if_present!(search.given_length);
        update_if_present!(search.tier);
        update_if_present!(search.max_results);
        update_if_present!(search.prefix);
        update_if_present!(search.suffix);
        update_if_present!(search.middle);
    }

    pub fn validate(&self) -> NfResult<()> {
        if self.data.unihan_files().is_empty() {
            return Err(NameForgeError::Config(
                "at least one Unihan file is required".to_string(),
            ));
        }
        Ok(())
    }
}

/// Locations of the data files. Relative names are resolved against
/// `data_dir`.
#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataPaths {
    #[arg(long, default_value = "data")]
    pub data_dir: PathBuf,

    /// Unihan text files, comma separated. They are merged in order.
    #[arg(
        long,
        default_value = "Unihan_Readings.txt,Unihan_Variants.txt,Unihan_IRGSources.txt"
    )]
    pub unihan: String,

    #[arg(long, default_value = "common_l1.txt")]
    pub common_l1: String,
    #[arg(long, default_value = "common_l2.txt")]
    pub common_l2: String,
    #[arg(long, default_value = "family_names.txt")]
    pub family_names: String,
    #[arg(long, default_value = "common_names.txt")]
    pub common_names: String,

    // === Curated overrides ===
    #[arg(long, default_value = "pinyin_special.txt")]
    pub pinyin_special: String,
    #[arg(long, default_value = "stroke_special.txt")]
    pub stroke_special: String,
    #[arg(long, default_value = "traditional_special.txt")]
    pub traditional_special: String,

    #[arg(long, default_value = "five_elements.txt")]
    pub five_elements: String,
    #[arg(long, default_value = "folkways.txt")]
    pub folkways: String,
}

impl Default for DataPaths {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            unihan: "Unihan_Readings.txt,Unihan_Variants.txt,Unihan_IRGSources.txt".to_string(),
            common_l1: "common_l1.txt".to_string(),
            common_l2: "common_l2.txt".to_string(),
            family_names: "family_names.txt".to_string(),
            common_names: "common_names.txt".to_string(),
            pinyin_special: "pinyin_special.txt".to_string(),
            stroke_special: "stroke_special.txt".to_string(),
            traditional_special: "traditional_special.txt".to_string(),
            five_elements: "five_elements.txt".to_string(),
            folkways: "folkways.txt".to_string(),
        }
    }
}

impl DataPaths {
    /// Every data file living in `dir` under its default name.
    pub fn in_dir<P: Into<PathBuf>>(dir: P) -> Self {
        Self {
            data_dir: dir.into(),
            ..Default::default()
        }
    }

    pub fn resolve(&self, name: &str) -> PathBuf {
        self.data_dir.join(name)
    }

    pub fn unihan_files(&self) -> Vec<PathBuf> {
        self.unihan
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| self.resolve(s))
            .collect()
    }
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchParams {
    /// Characters in the given name (1 or 2).
    #[arg(long, default_value_t = 2)]
    pub given_length: usize,
    /// 1 = broad common list, 2 = narrow list.
    #[arg(long, default_value_t = 1)]
    pub tier: u8,
    /// 0 returns every name of the best producing rank.
    #[arg(long, default_value_t = 20)]
    pub max_results: usize,
    #[arg(long)]
    pub prefix: Option<char>,
    #[arg(long)]
    pub suffix: Option<char>,
    #[arg(long)]
    pub middle: Option<String>,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            given_length: 2,
            tier: 1,
            max_results: 20,
            prefix: None,
            suffix: None,
            middle: None,
        }
    }
}
