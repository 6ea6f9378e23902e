use balanza_core::batch::{discover_documents, run_batch, BatchOptions};
use balanza_core::config::load_config;
use balanza_core::error::BalanzaError;
use balanza_core::extraction::pdftotext::PdftotextExtractor;
use std::path::PathBuf;

use super::resolve_layout;
use crate::output;

/// Run a batch. Returns `Ok(false)` when at least one document failed; the
/// datasets of every other document are written regardless.
pub fn run(
    input_dir: PathBuf,
    out_dir: PathBuf,
    config_file: Option<PathBuf>,
    layout_file: Option<PathBuf>,
    report_file: Option<PathBuf>,
    output_format: &str,
) -> Result<bool, BalanzaError> {
    let config = match &config_file {
        Some(path) => load_config(path)?,
        None => Default::default(),
    };
    let layout = resolve_layout(layout_file.as_deref().or(config.layout.as_deref()))?;

    if !PdftotextExtractor::is_available() {
        return Err(BalanzaError::PdftotextNotFound);
    }
    let extractor = PdftotextExtractor::new();

    let mut options = BatchOptions::new(&layout);
    options.fixed_dir = config.fixed_dir.clone();

    let documents = discover_documents(&input_dir)?;
    tracing::info!("{} document(s) found in {}", documents.len(), input_dir.display());

    let run = run_batch(&documents, &config, &extractor, &options);
    run.datasets.write_csv(&out_dir)?;

    if let Some(path) = &report_file {
        output::json::write_report(&run.report, path)?;
        eprintln!("Report written to {}", path.display());
    }

    match output_format {
        "json" => output::json::print_report(&run.report)?,
        _ => output::table::print_report(&run.report),
    }

    Ok(!run.report.has_failures())
}
