pub mod orientation;
pub mod pdftotext;

use crate::error::BalanzaError;

/// Text content extracted from a single page of a PDF, one entry per
/// layout line.
#[derive(Debug, Clone)]
pub struct PageContent {
    pub page_number: usize,
    pub lines: Vec<String>,
}

/// Trait for PDF text extraction backends.
pub trait PdfExtractor: Send + Sync {
    /// Extract text content from PDF bytes, returning one PageContent per page.
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<PageContent>, BalanzaError>;

    /// Name of this extraction backend (for diagnostics).
    fn backend_name(&self) -> &str;
}

/// Extract only the first page; balance sheets are single-page documents.
pub fn first_page(
    extractor: &dyn PdfExtractor,
    pdf_bytes: &[u8],
) -> Result<PageContent, BalanzaError> {
    extractor
        .extract_pages(pdf_bytes)?
        .into_iter()
        .next()
        .ok_or_else(|| {
            BalanzaError::Extraction(format!(
                "{} returned no pages",
                extractor.backend_name()
            ))
        })
}
