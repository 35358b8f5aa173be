//! Engine term suggestions, keyed by field.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Candidates considered per field when forming a corrected phrase.
pub const MAX_CANDIDATES_PER_FIELD: usize = 2;

/// Ranked spelling candidates per field, best first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Suggestions {
    /// Field to candidates.
    by_field: BTreeMap<String, Vec<String>>,
}

impl Suggestions {
    /// Creates an empty suggestion set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the candidates for a field, replacing earlier ones.
    pub fn insert(&mut self, field: impl Into<String>, candidates: Vec<String>) {
        self.by_field.insert(field.into(), candidates);
    }

    /// Returns true when no field carries a usable candidate.
    pub fn is_empty(&self) -> bool {
        self.by_field
            .values()
            .flatten()
            .all(|candidate| candidate.trim().is_empty())
    }

    /// Joins the top candidates of each field into one corrected phrase.
    ///
    /// Fields whose phrase would be empty are left out.
    pub fn phrases(&self) -> BTreeMap<String, String> {
        self.by_field
            .iter()
            .filter_map(|(field, candidates)| {
                let phrase = candidates
                    .iter()
                    .map(|c| c.trim())
                    .filter(|c| !c.is_empty())
                    .take(MAX_CANDIDATES_PER_FIELD)
                    .collect::<Vec<_>>()
                    .join(" ");
                (!phrase.is_empty()).then(|| (field.clone(), phrase))
            })
            .collect()
    }
}

impl FromIterator<(String, Vec<String>)> for Suggestions {
    fn from_iter<I: IntoIterator<Item = (String, Vec<String>)>>(iter: I) -> Self {
        Self {
            by_field: iter.into_iter().collect(),
        }
    }
}
