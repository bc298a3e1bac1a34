//! Read-only species reference table
//!
//! The catalog is supplied externally as a JSON array and never mutated
//! by the server. Tallies and favorites key into it by species id, but
//! tolerate ids that are absent from it.

use std::collections::HashMap;
use std::path::Path;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::store;

/// One catalog entry
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Species {
    /// Stable identifier, e.g. "orcinus_orca"
    pub id: String,
    /// Common (display) name
    pub name: String,
    /// Scientific name
    pub scientific_name: String,
    pub family: Option<String>,
    pub description: Option<String>,
}

/// In-memory catalog with id lookup
pub struct SpeciesCatalog {
    species: Vec<Species>,
    index: HashMap<String, usize>,
}

impl SpeciesCatalog {
    pub fn new(species: Vec<Species>) -> Self {
        let index = species
            .iter()
            .enumerate()
            .map(|(i, s)| (s.id.clone(), i))
            .collect();
        Self { species, index }
    }

    /// Load the catalog file. A missing or unreadable catalog yields an
    /// empty table rather than a startup failure.
    pub fn load(path: &Path) -> Self {
        let species: Vec<Species> = store::load_or_default(path, Vec::new());
        if species.is_empty() {
            tracing::warn!(path = %path.display(), "species catalog is empty");
        } else {
            tracing::info!(count = species.len(), "species catalog loaded");
        }
        Self::new(species)
    }

    pub fn len(&self) -> usize {
        self.species.len()
    }

    pub fn is_empty(&self) -> bool {
        self.species.is_empty()
    }

    pub fn all(&self) -> &[Species] {
        &self.species
    }

    pub fn get(&self, id: &str) -> Option<&Species> {
        self.index.get(id).map(|&i| &self.species[i])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Display name used as the stable tie-break key in rankings
    pub fn display_name(&self, id: &str) -> Option<&str> {
        self.get(id).map(|s| s.name.as_str())
    }

    /// Case-insensitive substring search over common and scientific names
    pub fn search(&self, query: &str) -> Vec<&Species> {
        let q = query.trim().to_lowercase();
        if q.is_empty() {
            return Vec::new();
        }
        self.species
            .iter()
            .filter(|s| {
                let hay = format!("{} {}", s.name, s.scientific_name).to_lowercase();
                hay.contains(&q)
            })
            .collect()
    }

    /// Deterministic pick for a given date, independent of process start
    /// time: the date's ordinal modulo the catalog size.
    pub fn species_of_day(&self, date: NaiveDate) -> Option<&Species> {
        if self.species.is_empty() {
            return None;
        }
        let idx = date.num_days_from_ce().rem_euclid(self.species.len() as i32) as usize;
        self.species.get(idx)
    }
}

/// Small fixed catalog shared by unit tests across the crate
#[cfg(test)]
pub(crate) fn test_fixture() -> SpeciesCatalog {
    SpeciesCatalog::new(vec![
        Species {
            id: "orcinus_orca".into(),
            name: "Killer whale".into(),
            scientific_name: "Orcinus orca".into(),
            family: Some("Delphinidae".into()),
            description: None,
        },
        Species {
            id: "delphinapterus_leucas".into(),
            name: "Beluga whale".into(),
            scientific_name: "Delphinapterus leucas".into(),
            family: Some("Monodontidae".into()),
            description: None,
        },
        Species {
            id: "balaenoptera_musculus".into(),
            name: "Blue whale".into(),
            scientific_name: "Balaenoptera musculus".into(),
            family: Some("Balaenopteridae".into()),
            description: None,
        },
    ])
}
