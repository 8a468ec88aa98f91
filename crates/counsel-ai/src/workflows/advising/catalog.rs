//! CSV-backed university catalog implementing the directory seam.
//!
//! Rows follow the `name,country,rank,estimated_tuition_usd` layout of the
//! rankings export; rank may be blank or a band like `51-100`, in which
//! case the leading bound is used.

use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Deserializer};

use super::domain::{Competitiveness, University, UniversityId};
use super::normalize::normalize_country;
use super::repository::{DirectoryError, UniversityDirectory};

#[derive(Debug)]
pub enum CatalogError {
    Io(std::io::Error),
    Csv(csv::Error),
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogError::Io(err) => write!(f, "failed to read catalog file: {}", err),
            CatalogError::Csv(err) => write!(f, "invalid catalog CSV data: {}", err),
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogError::Io(err) => Some(err),
            CatalogError::Csv(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for CatalogError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for CatalogError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// In-memory university reference set loaded once at startup.
pub struct UniversityCatalog {
    universities: Vec<University>,
}

impl UniversityCatalog {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut universities = Vec::new();

        for (index, record) in csv_reader.deserialize::<CatalogRow>().enumerate() {
            let row = record?;
            let rank = row.rank();

            universities.push(University {
                id: UniversityId(index as u32 + 1),
                name: row.name,
                country: normalize_country(&row.country),
                rank,
                competitiveness: Competitiveness::from_rank(rank),
                estimated_tuition_usd: row.estimated_tuition_usd,
            });
        }

        Ok(Self { universities })
    }

    /// Build a catalog from already-typed rows, e.g. a seeded demo set.
    pub fn from_universities(universities: Vec<University>) -> Self {
        Self { universities }
    }

    pub fn len(&self) -> usize {
        self.universities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.universities.is_empty()
    }
}

#[derive(Debug, Deserialize)]
struct CatalogRow {
    name: String,
    country: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    rank: Option<String>,
    estimated_tuition_usd: u32,
}

impl CatalogRow {
    fn rank(&self) -> Option<u32> {
        self.rank.as_deref().and_then(parse_rank)
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

/// Parse the leading bound of a rank cell: `12`, `51-100`, and `601+` all
/// yield their first integer; anything else is treated as unranked.
fn parse_rank(value: &str) -> Option<u32> {
    let head = value.trim().split('-').next()?.trim_end_matches('+').trim();
    head.parse::<u32>().ok()
}

impl UniversityDirectory for UniversityCatalog {
    fn fetch_by_criteria(
        &self,
        countries: &[String],
        max_tuition: Option<u32>,
        limit: usize,
    ) -> Result<Vec<University>, DirectoryError> {
        let wanted: Vec<String> = countries
            .iter()
            .map(|country| normalize_country(country).to_ascii_lowercase())
            .filter(|country| !country.is_empty())
            .collect();

        let mut matches: Vec<University> = self
            .universities
            .iter()
            .filter(|university| {
                let country = university.country.to_ascii_lowercase();
                let country_ok = wanted.is_empty()
                    || wanted.iter().any(|needle| country.contains(needle.as_str()));
                let cost_ok =
                    max_tuition.map_or(true, |max| university.estimated_tuition_usd <= max);
                country_ok && cost_ok
            })
            .cloned()
            .collect();

        matches.sort_by_key(|university| university.rank.unwrap_or(u32::MAX));
        matches.truncate(limit);

        Ok(matches)
    }

    fn fetch_by_ids(&self, ids: &[UniversityId]) -> Result<Vec<University>, DirectoryError> {
        Ok(self
            .universities
            .iter()
            .filter(|university| ids.contains(&university.id))
            .cloned()
            .collect())
    }
}
