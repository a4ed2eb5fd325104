use super::report::AnalysisReport;
use crate::core::charges::gasteiger::GasteigerCharger;
use crate::core::charges::params::ParamTable;
use crate::core::charges::{ChargeAnnotator, ChargeError};
use crate::core::descriptors::{self, MolecularProperties};
use crate::core::geometry;
use crate::core::io::sdf::{SdfFile, SdfMetadata};
use crate::core::io::traits::MolecularFile;
use crate::core::models::molecule::Molecule;
use crate::core::perception::perceive;
use crate::engine::classifier::SiteClassifier;
use crate::engine::config::AnalysisConfig;
use crate::engine::error::EngineError;
use crate::engine::progress::ProgressReporter;
use crate::engine::record::AtomRecord;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{info, instrument};

/// One molecule to analyse, with caller metadata echoed back untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub sdf: String,
    #[serde(default = "empty_object")]
    pub metadata: Value,
}

fn empty_object() -> Value {
    Value::Object(Map::new())
}

impl AnalysisRequest {
    pub fn new(sdf: impl Into<String>, metadata: Value) -> Self {
        Self {
            sdf: sdf.into(),
            metadata,
        }
    }

    /// Parses a JSON request body of the form `{"sdf": "...", "metadata": {...}}`.
    ///
    /// A missing or `null` metadata field becomes an empty object.
    pub fn from_json(body: &str) -> Result<Self, EngineError> {
        if body.trim().is_empty() {
            return Err(EngineError::InvalidRequest("Missing request body".into()));
        }
        let payload: Value = serde_json::from_str(body)
            .map_err(|e| EngineError::InvalidRequest(format!("Invalid JSON payload: {e}")))?;
        let Value::Object(mut fields) = payload else {
            return Err(EngineError::InvalidRequest("Invalid payload shape".into()));
        };
        let sdf = match fields.remove("sdf") {
            Some(Value::String(s)) if !s.trim().is_empty() => s,
            _ => return Err(EngineError::InvalidRequest("Missing SDF data".into())),
        };
        let metadata = match fields.remove("metadata") {
            None | Some(Value::Null) => empty_object(),
            Some(value) => value,
        };
        Ok(Self { sdf, metadata })
    }
}

/// A finished analysis together with the structure it was computed on.
#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    pub report: AnalysisReport,
    /// The molecule as analysed, including any embedded conformer.
    pub molecule: Molecule,
    pub structure_metadata: SdfMetadata,
    pub conformer_generated: bool,
}

/// Runs analyses with one configuration; charge parameters are loaded once up front.
#[derive(Debug, Clone)]
pub struct Analyzer {
    config: AnalysisConfig,
    charger: GasteigerCharger,
    classifier: SiteClassifier,
}

impl Analyzer {
    pub fn new(config: AnalysisConfig) -> Result<Self, EngineError> {
        let params = match &config.charges.params_path {
            Some(path) => ParamTable::with_overrides(path).map_err(ChargeError::from)?,
            None => ParamTable::builtin(),
        };
        Ok(Self {
            charger: GasteigerCharger::new(params, config.charges.iterations),
            classifier: SiteClassifier::new(config.classifier),
            config,
        })
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    #[instrument(skip_all, name = "analysis_workflow")]
    pub fn analyze(
        &self,
        request: &AnalysisRequest,
        reporter: &ProgressReporter,
    ) -> Result<AnalysisOutcome, EngineError> {
        let (mut molecule, structure_metadata) =
            reporter.phase("Parsing structure", || SdfFile::read_str(&request.sdf))?;
        info!(
            name = molecule.name(),
            atoms = molecule.atom_count(),
            bonds = molecule.bond_count(),
            "Parsed molecule"
        );

        let embedded = reporter.phase("Preparing conformer", || {
            geometry::ensure_conformer(&mut molecule, &self.config.conformer)
        })?;
        let perception = perceive(&molecule);

        let charges = reporter.phase("Computing partial charges", || {
            self.charger.annotate(&molecule, &perception)
        })?;

        let sites = reporter.phase("Classifying reactive sites", || {
            let records = AtomRecord::collect(&molecule, &perception);
            self.classifier.classify(&records, &charges)
        });

        let properties = if self.config.skip_descriptors {
            MolecularProperties::default()
        } else {
            reporter.phase("Computing descriptors", || {
                descriptors::compute_properties(&molecule, &perception)
            })
        };

        let warnings = sites.warnings();
        info!(
            nucleophiles = sites.nucleophiles.len(),
            electrophiles = sites.electrophiles.len(),
            warnings = warnings.len(),
            "Analysis complete"
        );

        Ok(AnalysisOutcome {
            report: AnalysisReport {
                metadata: request.metadata.clone(),
                nucleophiles: sites.nucleophiles,
                electrophiles: sites.electrophiles,
                properties,
                warnings,
            },
            molecule,
            structure_metadata,
            conformer_generated: embedded.is_some(),
        })
    }
}

/// Analyses one request with a fresh [`Analyzer`].
pub fn run(
    request: &AnalysisRequest,
    config: &AnalysisConfig,
    reporter: &ProgressReporter,
) -> Result<AnalysisOutcome, EngineError> {
    Analyzer::new(config.clone())?.analyze(request, reporter)
}
