use crate::core::descriptors::MolecularProperties;
use crate::engine::error::EngineError;
use crate::engine::site::{SiteEntry, SiteType};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::io::Write;

/// A completed analysis, in the field order callers receive it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub metadata: Value,
    pub nucleophiles: Vec<SiteEntry>,
    pub electrophiles: Vec<SiteEntry>,
    pub properties: MolecularProperties,
    pub warnings: Vec<String>,
}

/// What a caller gets back: the report, or a single error message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnalysisResponse {
    Success(AnalysisReport),
    Failure { error: String },
}

impl AnalysisResponse {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

impl From<Result<AnalysisReport, EngineError>> for AnalysisResponse {
    fn from(result: Result<AnalysisReport, EngineError>) -> Self {
        match result {
            Ok(report) => Self::Success(report),
            Err(e) => Self::Failure {
                error: e.to_string(),
            },
        }
    }
}

#[derive(Debug, Serialize)]
struct SiteRow<'a> {
    atom_index: usize,
    #[serde(rename = "type")]
    site_type: SiteType,
    label: &'a str,
    score: f64,
    reason: &'a str,
}

/// Writes both site lists as one CSV table, nucleophiles first, each in rank order.
pub fn write_sites_csv(report: &AnalysisReport, writer: impl Write) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for entry in report.nucleophiles.iter().chain(&report.electrophiles) {
        csv_writer.serialize(SiteRow {
            atom_index: entry.atom_index,
            site_type: entry.site_type,
            label: &entry.label,
            score: entry.score,
            reason: &entry.reason,
        })?;
    }
    csv_writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::config::ConfigError;
    use serde_json::json;

    fn report() -> AnalysisReport {
        AnalysisReport {
            metadata: json!({"id": "mol-1"}),
            nucleophiles: vec![SiteEntry {
                atom_index: 2,
                label: "Nucleophilic centre".into(),
                score: 0.67,
                site_type: SiteType::Nucleophile,
                reason: "Nucleophile flagged by partial charge (-0.420); hybridization SP3".into(),
            }],
            electrophiles: vec![SiteEntry {
                atom_index: 1,
                label: "Electrophilic centre".into(),
                score: 0.2,
                site_type: SiteType::Electrophile,
                reason: "Electrophile flagged by partial charge (+0.200)".into(),
            }],
            properties: MolecularProperties {
                formula: Some("CH4O".into()),
                ..Default::default()
            },
            warnings: vec![],
        }
    }

    #[test]
    fn success_serializes_flat_in_field_order() {
        let text = serde_json::to_string(&AnalysisResponse::Success(report())).unwrap();
        let keys = ["\"metadata\"", "\"nucleophiles\"", "\"electrophiles\"", "\"properties\"", "\"warnings\""];
        let positions: Vec<usize> = keys.iter().map(|k| text.find(k).unwrap()).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "{text}");
        assert!(!text.contains("Success"));
    }

    #[test]
    fn failure_serializes_as_error_envelope() {
        let err: Result<AnalysisReport, EngineError> = Err(EngineError::from(ConfigError::InvalidParameter {
            parameter: "polarity_threshold",
            reason: "negative".into(),
        }));
        let response = AnalysisResponse::from(err);
        assert!(!response.is_success());
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(
            json,
            json!({"error": "Invalid configuration: Invalid value for parameter 'polarity_threshold': negative"})
        );
    }

    #[test]
    fn responses_deserialize_back() {
        let response: AnalysisResponse = serde_json::from_str(r#"{"error": "Missing SDF data"}"#).unwrap();
        assert_eq!(response, AnalysisResponse::Failure { error: "Missing SDF data".into() });

        let text = serde_json::to_string(&AnalysisResponse::Success(report())).unwrap();
        let back: AnalysisResponse = serde_json::from_str(&text).unwrap();
        assert_eq!(back, AnalysisResponse::Success(report()));
    }

    #[test]
    fn csv_export_lists_sites_in_rank_order() {
        let mut buffer = Vec::new();
        write_sites_csv(&report(), &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "atom_index,type,label,score,reason");
        assert!(lines[1].starts_with("2,nucleophile,Nucleophilic centre,0.67,"));
        assert!(lines[2].starts_with("1,electrophile,Electrophilic centre,0.2,"));
        assert_eq!(lines.len(), 3);
    }
}
