use super::analyze::{AnalysisRequest, Analyzer};
use super::report::AnalysisResponse;
use crate::core::io::sdf::split_records;
use crate::engine::progress::{Progress, ProgressReporter};
use serde::Serialize;
use serde_json::Value;
use tracing::{info, instrument, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Result for one record of a multi-record file.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchEntry {
    /// Zero-based position of the record in the input.
    pub record_index: usize,
    pub title: String,
    #[serde(flatten)]
    pub response: AnalysisResponse,
}

/// Analyses every record of an SD file independently.
///
/// Each record gets its own request carrying a copy of `metadata`; a failing record
/// produces an error entry without affecting the others. Entries come back in input
/// order. With the `parallel` feature, records are processed on the rayon pool.
#[instrument(skip_all, name = "batch_workflow")]
pub fn run_batch(
    sdf: &str,
    metadata: &Value,
    analyzer: &Analyzer,
    reporter: &ProgressReporter,
) -> Vec<BatchEntry> {
    let records = split_records(sdf);
    info!(records = records.len(), "Starting batch analysis");
    reporter.report(Progress::TaskStart {
        total_steps: records.len() as u64,
    });

    #[cfg(not(feature = "parallel"))]
    let iterator = records.iter().enumerate();

    #[cfg(feature = "parallel")]
    let iterator = records.par_iter().enumerate();

    let entries: Vec<BatchEntry> = iterator
        .map(|(record_index, text)| {
            let request = AnalysisRequest::new(text.as_str(), metadata.clone());
            let result = analyzer
                .analyze(&request, &ProgressReporter::new())
                .map(|outcome| outcome.report);
            if let Err(e) = &result {
                warn!(record_index, error = %e, "Record failed");
            }
            reporter.report(Progress::TaskIncrement);
            BatchEntry {
                record_index,
                title: text.lines().next().unwrap_or_default().trim().to_string(),
                response: result.into(),
            }
        })
        .collect();

    reporter.report(Progress::TaskFinish);
    info!(
        succeeded = entries.iter().filter(|e| e.response.is_success()).count(),
        failed = entries.iter().filter(|e| !e.response.is_success()).count(),
        "Batch analysis finished"
    );
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::config::AnalysisConfig;
    use crate::workflows::analyze::fixtures::{ACETALDEHYDE, ETHANE};
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const BROKEN: &str = "broken\n\n\n  1  0  0  0  0  0  0  0  0  0999 V2000\n    0.0000    0.0000    0.0000 Xx  0  0\nM  END\n";

    fn multi_record() -> String {
        format!("{ACETALDEHYDE}$$$$\n{BROKEN}$$$$\n{ETHANE}$$$$\n")
    }

    #[test]
    fn each_record_is_analysed_independently_in_order() {
        let analyzer = Analyzer::new(AnalysisConfig::default()).unwrap();
        let entries = run_batch(&multi_record(), &json!({"batch": 1}), &analyzer, &ProgressReporter::new());

        assert_eq!(entries.len(), 3);
        assert_eq!(
            entries.iter().map(|e| e.title.as_str()).collect::<Vec<_>>(),
            vec!["acetaldehyde", "broken", "ethane"]
        );
        assert!(entries[0].response.is_success());
        assert!(entries[2].response.is_success());
        match &entries[1].response {
            AnalysisResponse::Failure { error } => {
                assert!(error.starts_with("Failed to parse SDF into a molecule"))
            }
            other => panic!("expected failure, got {other:?}"),
        }
        if let AnalysisResponse::Success(report) = &entries[0].response {
            assert_eq!(report.metadata, json!({"batch": 1}));
        }
    }

    #[test]
    fn entries_serialize_flat() {
        let analyzer = Analyzer::new(AnalysisConfig::default()).unwrap();
        let entries = run_batch(&multi_record(), &json!({}), &analyzer, &ProgressReporter::new());
        let json = serde_json::to_value(&entries).unwrap();
        assert_eq!(json[0]["recordIndex"], 0);
        assert!(json[0].get("nucleophiles").is_some());
        assert_eq!(json[1]["title"], "broken");
        assert!(json[1].get("error").is_some());
    }

    #[test]
    fn one_increment_per_record() {
        let increments = AtomicUsize::new(0);
        let reporter = ProgressReporter::with_callback(Box::new(|e| {
            if e == Progress::TaskIncrement {
                increments.fetch_add(1, Ordering::SeqCst);
            }
        }));
        let analyzer = Analyzer::new(AnalysisConfig::default()).unwrap();
        run_batch(&multi_record(), &json!({}), &analyzer, &reporter);
        assert_eq!(increments.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn empty_input_yields_no_entries() {
        let analyzer = Analyzer::new(AnalysisConfig::default()).unwrap();
        assert!(run_batch("\n\n", &json!({}), &analyzer, &ProgressReporter::new()).is_empty());
    }
}
