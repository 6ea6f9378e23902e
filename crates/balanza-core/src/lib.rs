pub mod assembly;
pub mod batch;
pub mod config;
pub mod dataset;
pub mod error;
pub mod extraction;
pub mod layout;
pub mod model;
pub mod parsing;

use error::BalanzaError;
use extraction::{PageContent, PdfExtractor};
use layout::schema::SheetLayout;
use model::BalanceSheet;

/// Parse and reconcile an already extracted first page.
pub fn extract_page(page: &PageContent, layout: &SheetLayout) -> Result<BalanceSheet, BalanzaError> {
    let sections = parsing::parse_sections(page, layout)?;
    assembly::reconcile(&sections)
}

/// Main API entry point: turn the bytes of a balance-sheet PDF into its
/// reconciled records.
///
/// Only the first page is read. Orientation is not checked here; see
/// [`extraction::orientation::normalize_orientation`].
pub fn extract_pdf(
    pdf_bytes: &[u8],
    extractor: &dyn PdfExtractor,
    layout: &SheetLayout,
) -> Result<BalanceSheet, BalanzaError> {
    let page = extraction::first_page(extractor, pdf_bytes)?;
    extract_page(&page, layout)
}
