use super::{describe_destination, read_input, write_output};
use crate::cli::{AnalyzeArgs, OutputFormat};
use crate::config;
use crate::error::{CliError, Result};
use crate::utils::parser;
use crate::utils::progress::CliProgressHandler;
use reactsite::{
    core::io::{sdf::SdfFile, traits::MolecularFile},
    engine::progress::ProgressReporter,
    workflows::{
        analyze::{AnalysisRequest, Analyzer},
        report::{AnalysisReport, AnalysisResponse, write_sites_csv},
    },
};
use tracing::{info, warn};

pub async fn run(args: AnalyzeArgs) -> Result<()> {
    let config = config::build_config(&args.settings)?;

    info!("Loading input from {:?}", &args.input);
    let content = read_input(&args.input)?;
    let request = if args.json_request {
        AnalysisRequest::from_json(&content)?
    } else {
        let metadata = parser::parse_metadata(args.metadata.as_deref())
            .map_err(|e| CliError::Argument(e.to_string()))?;
        AnalysisRequest::new(content, metadata)
    };

    let analyzer = Analyzer::new(config)?;
    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    info!("Invoking the analysis workflow...");
    let outcome = match tokio::task::block_in_place(|| analyzer.analyze(&request, &reporter)) {
        Ok(outcome) => outcome,
        Err(e) => {
            if args.format == OutputFormat::Json {
                let envelope = AnalysisResponse::Failure {
                    error: e.to_string(),
                };
                write_output(args.output.as_deref(), &to_json(&envelope)?)?;
            }
            return Err(e.into());
        }
    };

    if outcome.conformer_generated {
        info!("Input had no 3D coordinates; a conformer was generated.");
    }
    for warning in &outcome.report.warnings {
        warn!("{}", warning);
    }

    if let Some(path) = &args.write_structure {
        SdfFile::write_to_path(&outcome.molecule, &outcome.structure_metadata, path).map_err(
            |e| CliError::Output {
                path: path.clone(),
                source: e.into(),
            },
        )?;
        eprintln!("✓ Prepared structure written to: {}", path.display());
    }

    let rendered = render(&outcome.report, args.format)?;
    write_output(args.output.as_deref(), &rendered)?;
    eprintln!(
        "✓ {} nucleophile(s), {} electrophile(s) written to: {}",
        outcome.report.nucleophiles.len(),
        outcome.report.electrophiles.len(),
        describe_destination(args.output.as_ref())
    );
    Ok(())
}

fn render(report: &AnalysisReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => to_json(report),
        OutputFormat::Csv => {
            let mut buffer = Vec::new();
            write_sites_csv(report, &mut buffer).map_err(|e| CliError::Other(e.into()))?;
            String::from_utf8(buffer).map_err(|e| CliError::Other(e.into()))
        }
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(|e| CliError::Other(e.into()))
}
