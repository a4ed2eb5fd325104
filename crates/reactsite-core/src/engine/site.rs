use serde::{Deserialize, Serialize};
use std::fmt;

/// Advisory attached when a molecule yields no reactive sites at all.
pub const NO_SITES_WARNING: &str =
    "no strongly polarised centres detected; manual review recommended.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SiteType {
    Nucleophile,
    Electrophile,
    Other,
}

impl fmt::Display for SiteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Nucleophile => "nucleophile",
            Self::Electrophile => "electrophile",
            Self::Other => "other",
        })
    }
}

/// One classified atom.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteEntry {
    pub atom_index: usize,
    pub label: String,
    pub score: f64,
    #[serde(rename = "type")]
    pub site_type: SiteType,
    pub reason: String,
}

/// Reactive sites of one molecule, each list ranked by descending score.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub nucleophiles: Vec<SiteEntry>,
    pub electrophiles: Vec<SiteEntry>,
}

impl ClassificationResult {
    pub fn is_empty(&self) -> bool {
        self.nucleophiles.is_empty() && self.electrophiles.is_empty()
    }

    pub fn site_count(&self) -> usize {
        self.nucleophiles.len() + self.electrophiles.len()
    }

    /// Advisories for this result: exactly one when no site was found, none otherwise.
    pub fn warnings(&self) -> Vec<String> {
        if self.is_empty() {
            vec![NO_SITES_WARNING.to_string()]
        } else {
            Vec::new()
        }
    }
}
