//! eDNA Species Utilities
//!
//! Detected biota arrive either as a proper list or as a comma-separated
//! string (CSV exports). Everything downstream works on the canonical list
//! produced by [`normalize_species`].

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Canonical species list (most samples detect fewer than 8 taxa)
pub type SpeciesList = SmallVec<[String; 8]>;

/// Raw detected-species field as it appears in a record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SpeciesInput {
    List(Vec<String>),
    Delimited(String),
    Missing,
}

impl From<&str> for SpeciesInput {
    fn from(value: &str) -> Self {
        SpeciesInput::Delimited(value.to_string())
    }
}

impl From<String> for SpeciesInput {
    fn from(value: String) -> Self {
        SpeciesInput::Delimited(value)
    }
}

impl From<Vec<String>> for SpeciesInput {
    fn from(value: Vec<String>) -> Self {
        SpeciesInput::List(value)
    }
}

impl<T: Into<SpeciesInput>> From<Option<T>> for SpeciesInput {
    fn from(value: Option<T>) -> Self {
        value.map_or(SpeciesInput::Missing, Into::into)
    }
}

/// Coerce a detected-species field into a canonical ordered list
///
/// - Missing → empty list
/// - List → copied as-is (entries are not trimmed or filtered)
/// - String → split on commas, segments trimmed, empty segments dropped
pub fn normalize_species(input: &SpeciesInput) -> SpeciesList {
    match input {
        SpeciesInput::Missing => SpeciesList::new(),
        SpeciesInput::List(items) => items.iter().cloned().collect(),
        SpeciesInput::Delimited(raw) => raw
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
    }
}

/// Species name with its detection count
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeciesCount {
    pub species: String,
    pub count: usize,
}

impl SpeciesCount {
    /// "Tuna (3)"
    pub fn display(&self) -> String {
        format!("{} ({})", self.species, self.count)
    }
}

/// Frequency table that remembers first-encountered order
///
/// Ranking is stable: equal counts keep the order in which the species
/// were first recorded.
#[derive(Debug, Clone, Default)]
pub struct SpeciesTally {
    index: FxHashMap<String, usize>,
    entries: Vec<SpeciesCount>,
}

impl SpeciesTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one detection of every species in the list
    pub fn record_all<'a, I>(&mut self, species: I)
    where
        I: IntoIterator<Item = &'a String>,
    {
        for name in species {
            self.record(name);
        }
    }

    pub fn record(&mut self, species: &str) {
        match self.index.get(species) {
            Some(&pos) => self.entries[pos].count += 1,
            None => {
                self.index.insert(species.to_string(), self.entries.len());
                self.entries.push(SpeciesCount {
                    species: species.to_string(),
                    count: 1,
                });
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn count(&self, species: &str) -> usize {
        self.index
            .get(species)
            .map_or(0, |&pos| self.entries[pos].count)
    }

    /// All species in first-encountered order
    pub fn entries(&self) -> &[SpeciesCount] {
        &self.entries
    }

    /// Top `n` species by count, ties broken by first-encountered order
    pub fn top(&self, n: usize) -> Vec<SpeciesCount> {
        let mut ranked = self.entries.clone();
        // sort_by is stable, so insertion order survives for equal counts
        ranked.sort_by(|a, b| b.count.cmp(&a.count));
        ranked.truncate(n);
        ranked
    }
}
