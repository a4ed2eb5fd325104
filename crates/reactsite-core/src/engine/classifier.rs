use super::config::ClassifierConfig;
use super::record::AtomRecord;
use super::rules::SiteRule;
use super::scoring;
use super::site::{ClassificationResult, SiteEntry, SiteType};
use crate::core::charges::ChargeAnnotation;
use tracing::debug;

/// Ranks the reactive sites of a molecule from its atom records and partial charges.
#[derive(Debug, Clone, Default)]
pub struct SiteClassifier {
    config: ClassifierConfig,
}

impl SiteClassifier {
    pub fn new(config: ClassifierConfig) -> Self {
        Self { config }
    }

    /// Scores and labels a single atom. Unclassified atoms come back with type `other`.
    pub fn classify_atom(&self, record: &AtomRecord, charge: f64) -> SiteEntry {
        let rule = SiteRule::match_atom(record, charge, self.config.polarity_threshold);
        SiteEntry {
            atom_index: record.index,
            label: rule.label().to_string(),
            score: scoring::score(charge, record),
            site_type: rule.site_type(),
            reason: reason(rule, charge, record),
        }
    }

    /// Classifies every atom and returns the nucleophiles and electrophiles, each sorted
    /// by descending score. Equal scores keep ascending atom-index order.
    pub fn classify(&self, records: &[AtomRecord], charges: &ChargeAnnotation) -> ClassificationResult {
        let mut result = ClassificationResult::default();
        for record in records {
            let entry = self.classify_atom(record, charges.charge_of(record.index));
            match entry.site_type {
                SiteType::Nucleophile => result.nucleophiles.push(entry),
                SiteType::Electrophile => result.electrophiles.push(entry),
                SiteType::Other => {}
            }
        }
        // sort_by is stable, so index order survives among ties.
        result.nucleophiles.sort_by(|a, b| b.score.total_cmp(&a.score));
        result.electrophiles.sort_by(|a, b| b.score.total_cmp(&a.score));

        debug!(
            atoms = records.len(),
            nucleophiles = result.nucleophiles.len(),
            electrophiles = result.electrophiles.len(),
            "Classified reactive sites"
        );
        result
    }
}

/// Classifies with the default polarity threshold.
pub fn classify_sites(records: &[AtomRecord], charges: &ChargeAnnotation) -> ClassificationResult {
    SiteClassifier::default().classify(records, charges)
}

fn reason(rule: SiteRule, charge: f64, record: &AtomRecord) -> String {
    let base = format!("{} flagged by partial charge ({:+.3})", rule.role(), charge);
    let mut extras = Vec::new();
    if record.hybridization.is_known() {
        extras.push(format!("hybridization {}", record.hybridization));
    }
    if record.in_ring {
        extras.push("ring member".to_string());
    }
    if extras.is_empty() {
        base
    } else {
        format!("{}; {}", base, extras.join(", "))
    }
}
