use std::path::PathBuf;

use crate::error::{PipelineError, Result};

pub const SCRAPE_PATH_ENV: &str = "CONGRESS_SCRAPE_PATH";
pub const OUTPUT_PATH_ENV: &str = "CONGRESS_OUTPUT_PATH";
pub const CONGRESS_NUMS_ENV: &str = "CONGRESS_NUMS";
pub const INCLUDE_USLM_ENV: &str = "CONGRESS_INCLUDE_USLM";

const DEFAULT_OUTPUT_PATH: &str = "congress-hf";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Scraper output directory; must contain `data/`.
    pub scrape_path: PathBuf,
    pub output_path: PathBuf,
    /// Only process these congresses; all when `None`.
    pub congress_nums: Option<Vec<u32>>,
    /// Also write the USLM text-version datasets.
    pub include_uslm: bool,
}

impl PipelineConfig {
    pub fn new(scrape_path: impl Into<PathBuf>, output_path: impl Into<PathBuf>) -> Self {
        Self {
            scrape_path: scrape_path.into(),
            output_path: output_path.into(),
            congress_nums: None,
            include_uslm: false,
        }
    }

    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from a key lookup, normally the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let scrape_path = lookup(SCRAPE_PATH_ENV)
            .ok_or_else(|| PipelineError::Config(format!("{SCRAPE_PATH_ENV} not set")))?;

        let output_path =
            lookup(OUTPUT_PATH_ENV).unwrap_or_else(|| DEFAULT_OUTPUT_PATH.to_string());

        let congress_nums = lookup(CONGRESS_NUMS_ENV)
            .map(|value| parse_congress_nums(&value))
            .transpose()?;

        let include_uslm = lookup(INCLUDE_USLM_ENV)
            .map(|v| v != "false" && v != "0")
            .unwrap_or(false);

        Ok(Self {
            scrape_path: scrape_path.into(),
            output_path: output_path.into(),
            congress_nums,
            include_uslm,
        })
    }

    pub fn with_congress_nums(mut self, congress_nums: Vec<u32>) -> Self {
        self.congress_nums = Some(congress_nums);
        self
    }

    pub fn with_uslm(mut self, include_uslm: bool) -> Self {
        self.include_uslm = include_uslm;
        self
    }

    pub fn data_path(&self) -> PathBuf {
        self.scrape_path.join("data")
    }

    pub fn includes_congress(&self, congress_num: u32) -> bool {
        self.congress_nums
            .as_ref()
            .is_none_or(|nums| nums.contains(&congress_num))
    }
}

/// Parse a comma-separated congress list such as `"113,114, 115"`.
pub fn parse_congress_nums(value: &str) -> Result<Vec<u32>> {
    value
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse()
                .map_err(|_| PipelineError::Config(format!("invalid congress number: {part}")))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_from_lookup_minimal() {
        let config = PipelineConfig::from_lookup(lookup(&[(SCRAPE_PATH_ENV, "/scrape")])).unwrap();
        assert_eq!(config, PipelineConfig::new("/scrape", "congress-hf"));
        assert!(config.includes_congress(118));
    }

    #[test]
    fn test_from_lookup_full() {
        let config = PipelineConfig::from_lookup(lookup(&[
            (SCRAPE_PATH_ENV, "/scrape"),
            (OUTPUT_PATH_ENV, "/out"),
            (CONGRESS_NUMS_ENV, "113, 114"),
            (INCLUDE_USLM_ENV, "1"),
        ]))
        .unwrap();

        assert_eq!(config.output_path, PathBuf::from("/out"));
        assert_eq!(config.congress_nums, Some(vec![113, 114]));
        assert!(config.include_uslm);
        assert!(config.includes_congress(114));
        assert!(!config.includes_congress(118));
        assert_eq!(config.data_path(), PathBuf::from("/scrape/data"));
    }

    #[test]
    fn test_from_lookup_missing_scrape_path() {
        let err = PipelineConfig::from_lookup(lookup(&[])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "configuration error: CONGRESS_SCRAPE_PATH not set"
        );
    }

    #[test]
    fn test_parse_congress_nums_invalid() {
        assert!(parse_congress_nums("113,abc").is_err());
        assert_eq!(parse_congress_nums("").unwrap(), Vec::<u32>::new());
    }

    #[test]
    fn test_builder() {
        let config = PipelineConfig::new("/scrape", "/out")
            .with_congress_nums(vec![117])
            .with_uslm(true);
        assert_eq!(config.congress_nums, Some(vec![117]));
        assert!(config.include_uslm);
    }
}
