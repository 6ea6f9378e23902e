use crate::error::BalanzaError;
use crate::extraction::{PageContent, PdfExtractor};
use std::io::Write;
use std::process::Command;

/// PDF extraction backend using pdftotext (from poppler-utils).
///
/// Uses `pdftotext -layout` so that visually separate columns stay separated
/// by runs of spaces, which is what the text grid splits on.
pub struct PdftotextExtractor {
    /// Last page to extract (1-based). Balance sheets only need page 1.
    last_page: usize,
}

impl PdftotextExtractor {
    pub fn new() -> Self {
        PdftotextExtractor { last_page: 1 }
    }

    /// Check if pdftotext is available on the system.
    pub fn is_available() -> bool {
        Command::new("pdftotext")
            .arg("-v")
            .output()
            .map(|o| o.status.success() || !o.stderr.is_empty())
            .unwrap_or(false)
    }
}

impl Default for PdftotextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfExtractor for PdftotextExtractor {
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<PageContent>, BalanzaError> {
        // pdftotext only reads from a path
        let mut tmpfile =
            tempfile::NamedTempFile::new().map_err(|e| BalanzaError::Extraction(e.to_string()))?;
        tmpfile
            .write_all(pdf_bytes)
            .map_err(|e| BalanzaError::Extraction(e.to_string()))?;

        let mut cmd = Command::new("pdftotext");
        cmd.arg("-layout")
            .arg("-f")
            .arg("1")
            .arg("-l")
            .arg(self.last_page.to_string());
        let output = cmd
            .arg(tmpfile.path())
            .arg("-") // output to stdout
            .output()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    BalanzaError::PdftotextNotFound
                } else {
                    BalanzaError::Extraction(format!("pdftotext failed: {}", e))
                }
            })?;

        if !output.status.success() {
            let code = output.status.code().unwrap_or(-1);
            let stderr = String::from_utf8_lossy(&output.stderr).to_string();
            return Err(BalanzaError::PdftotextFailed { code, stderr });
        }

        let text = String::from_utf8_lossy(&output.stdout);
        Ok(split_pages(&text))
    }

    fn backend_name(&self) -> &str {
        "pdftotext"
    }
}

/// Split pdftotext output into pages (form feed `\x0c` separates pages).
/// Trailing empty pages produced by the final form feed are dropped, but
/// page 1 is always kept so callers can report "no text" precisely.
fn split_pages(text: &str) -> Vec<PageContent> {
    text.split('\x0c')
        .enumerate()
        .map(|(i, page_text)| PageContent {
            page_number: i + 1,
            lines: page_text.lines().map(|l| l.to_string()).collect(),
        })
        .filter(|p| p.lines.iter().any(|l| !l.trim().is_empty()) || p.page_number == 1)
        .collect()
}
