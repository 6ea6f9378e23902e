use balanza_core::error::BalanzaError;
use balanza_core::extraction::orientation::normalize_orientation;
use balanza_core::extraction::pdftotext::PdftotextExtractor;
use std::path::PathBuf;

use super::{resolve_layout, target_dir_for};
use crate::output;

pub fn run(
    pdf_file: PathBuf,
    layout_file: Option<PathBuf>,
    output_format: &str,
    no_rotate: bool,
    target_dir: Option<PathBuf>,
) -> Result<(), BalanzaError> {
    let layout = resolve_layout(layout_file.as_deref())?;

    let source = if no_rotate {
        pdf_file
    } else {
        let dir = target_dir_for(&pdf_file, target_dir);
        normalize_orientation(&pdf_file, &dir)?
    };

    let pdf_bytes = std::fs::read(&source)?;
    let extractor = PdftotextExtractor::new();
    let sheet = balanza_core::extract_pdf(&pdf_bytes, &extractor, &layout)?;

    match output_format {
        "json" => output::json::print_sheet(&sheet)?,
        _ => output::table::print_sheet(&sheet),
    }

    Ok(())
}
