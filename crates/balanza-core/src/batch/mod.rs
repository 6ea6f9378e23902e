//! Sequential batch processing with per-document isolation.
//!
//! Every document is taken through orientation, extraction, parsing and
//! reconciliation on its own. A failure is recorded against that document
//! and the batch moves on.

use crate::dataset::Datasets;
use crate::error::{BalanzaError, ErrorKind};
use crate::extraction::orientation::{normalize_orientation, FIXED_SUFFIX};
use crate::extraction::PdfExtractor;
use crate::layout::schema::SheetLayout;
use crate::model::BalanceSheet;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// What to do with a discovered document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Admission {
    Skip,
    Process,
    /// Process without the orientation check.
    ProcessAsIs,
}

/// Caller-supplied admission policy, e.g. a denylist.
pub trait DocumentFilter {
    fn admit(&self, document: &Path) -> Admission;
}

/// Admits every document with the orientation check.
pub struct AdmitAll;

impl DocumentFilter for AdmitAll {
    fn admit(&self, _document: &Path) -> Admission {
        Admission::Process
    }
}

/// PDF files directly inside `dir`, sorted by file name. Rotated copies
/// written by earlier runs are left out.
pub fn discover_documents(dir: &Path) -> Result<Vec<PathBuf>, BalanzaError> {
    let mut documents = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let is_pdf = path
            .extension()
            .map(|e| e.eq_ignore_ascii_case("pdf"))
            .unwrap_or(false);
        let is_fixed = path
            .file_stem()
            .map(|s| s.to_string_lossy().ends_with(FIXED_SUFFIX))
            .unwrap_or(false);
        if is_pdf && !is_fixed {
            documents.push(path);
        }
    }
    documents.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(documents)
}

#[derive(Debug, Clone)]
pub struct BatchOptions<'a> {
    pub layout: &'a SheetLayout,
    /// Where rotated copies go; `None` writes them next to the original.
    pub fixed_dir: Option<PathBuf>,
    /// Run the orientation pre-filter on admitted documents.
    pub check_orientation: bool,
}

impl<'a> BatchOptions<'a> {
    pub fn new(layout: &'a SheetLayout) -> Self {
        BatchOptions {
            layout,
            fixed_dir: None,
            check_orientation: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DocumentStatus {
    Processed { date: NaiveDate },
    Skipped,
    Failed { kind: ErrorKind, message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentOutcome {
    pub document: String,
    pub path: PathBuf,
    /// The rotated copy that was read instead of `path`, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotated: Option<PathBuf>,
    #[serde(flatten)]
    pub status: DocumentStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchReport {
    pub outcomes: Vec<DocumentOutcome>,
}

impl BatchReport {
    pub fn processed(&self) -> usize {
        self.count(|s| matches!(s, DocumentStatus::Processed { .. }))
    }

    pub fn skipped(&self) -> usize {
        self.count(|s| matches!(s, DocumentStatus::Skipped))
    }

    pub fn failed(&self) -> usize {
        self.count(|s| matches!(s, DocumentStatus::Failed { .. }))
    }

    pub fn has_failures(&self) -> bool {
        self.failed() > 0
    }

    pub fn failures(&self) -> impl Iterator<Item = &DocumentOutcome> {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.status, DocumentStatus::Failed { .. }))
    }

    fn count(&self, pred: impl Fn(&DocumentStatus) -> bool) -> usize {
        self.outcomes.iter().filter(|o| pred(&o.status)).count()
    }
}

/// Result of a batch: the accumulated datasets and one outcome per document.
#[derive(Debug, Clone, Default)]
pub struct BatchRun {
    pub datasets: Datasets,
    pub report: BatchReport,
}

/// Take one admitted document to a reconciled sheet.
///
/// Returns the sheet and, when the document was portrait, the path of the
/// rotated copy that was read.
pub fn process_document(
    path: &Path,
    admission: Admission,
    extractor: &dyn PdfExtractor,
    options: &BatchOptions<'_>,
) -> Result<(BalanceSheet, Option<PathBuf>), BalanzaError> {
    let source = if admission == Admission::Process && options.check_orientation {
        let target_dir = match &options.fixed_dir {
            Some(dir) => dir.clone(),
            None => path.parent().map(Path::to_path_buf).unwrap_or_default(),
        };
        normalize_orientation(path, &target_dir)?
    } else {
        path.to_path_buf()
    };

    let bytes = std::fs::read(&source)?;
    let sheet = crate::extract_pdf(&bytes, extractor, options.layout)?;
    let rotated = (source != path).then_some(source);
    Ok((sheet, rotated))
}

/// Process `documents` in order. Never stops early: every document gets an
/// outcome, and successful sheets are collected even when others fail.
pub fn run_batch(
    documents: &[PathBuf],
    filter: &dyn DocumentFilter,
    extractor: &dyn PdfExtractor,
    options: &BatchOptions<'_>,
) -> BatchRun {
    let mut run = BatchRun::default();

    for path in documents {
        let document = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let admission = filter.admit(path);
        let mut rotated = None;
        let status = if admission == Admission::Skip {
            tracing::info!("{}: excluded, skipping", document);
            DocumentStatus::Skipped
        } else {
            let result = process_document(path, admission, extractor, options).and_then(
                |(sheet, fixed)| {
                    rotated = fixed;
                    let date = sheet.date;
                    run.datasets.insert(document.clone(), sheet)?;
                    Ok(date)
                },
            );
            match result {
                Ok(date) => {
                    tracing::info!("{}: processed, dated {}", document, date);
                    DocumentStatus::Processed { date }
                }
                Err(e) => {
                    tracing::warn!("{}: failed ({}): {}", document, e.kind(), e);
                    DocumentStatus::Failed {
                        kind: e.kind(),
                        message: e.to_string(),
                    }
                }
            }
        };

        run.report.outcomes.push(DocumentOutcome {
            document,
            path: path.clone(),
            rotated,
            status,
        });
    }

    tracing::info!(
        "batch finished: {} processed, {} skipped, {} failed",
        run.report.processed(),
        run.report.skipped(),
        run.report.failed()
    );
    run
}
