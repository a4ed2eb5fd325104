use super::{describe_destination, read_input, write_output};
use crate::cli::BatchArgs;
use crate::config;
use crate::error::{CliError, Result};
use crate::utils::parser;
use crate::utils::progress::CliProgressHandler;
use reactsite::{
    engine::progress::ProgressReporter,
    workflows::{analyze::Analyzer, batch::run_batch},
};
use tracing::{info, warn};

pub async fn run(args: BatchArgs) -> Result<()> {
    let config = config::build_config(&args.settings)?;
    let metadata = parser::parse_metadata(args.metadata.as_deref())
        .map_err(|e| CliError::Argument(e.to_string()))?;

    info!("Loading records from {:?}", &args.input);
    let content = read_input(&args.input)?;
    let analyzer = Analyzer::new(config)?;

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    info!("Invoking the batch workflow...");
    let entries =
        tokio::task::block_in_place(|| run_batch(&content, &metadata, &analyzer, &reporter));
    if entries.is_empty() {
        warn!("No records found in {:?}", &args.input);
    }

    let rendered = serde_json::to_string_pretty(&entries).map_err(|e| CliError::Other(e.into()))?;
    write_output(args.output.as_deref(), &rendered)?;

    let failed = entries.iter().filter(|e| !e.response.is_success()).count();
    eprintln!(
        "✓ {} record(s) analysed ({} failed), results written to: {}",
        entries.len(),
        failed,
        describe_destination(args.output.as_ref())
    );
    Ok(())
}
