use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum BalanzaError {
    #[error("anchor '{anchor}' not found in page text")]
    AnchorNotFound { anchor: String },

    #[error("malformed amount {raw:?}: {reason}")]
    MalformedAmount { raw: String, reason: String },

    #[error("amounts of section '{section}' do not fit a 64-bit total")]
    AmountOverflow { section: String },

    #[error("section '{section}' yielded {found} amounts but defines {expected} fields")]
    SectionCountMismatch {
        section: String,
        expected: usize,
        found: usize,
    },

    #[error("unparsable title '{title}': {reason}")]
    UnparsableTitle { title: String, reason: String },

    #[error("could not write rotated copy {path}: {reason}")]
    OrientationFixFailed { path: PathBuf, reason: String },

    #[error("records dated {left} and {right} cannot be combined")]
    DateMismatch { left: NaiveDate, right: NaiveDate },

    #[error("publication date {date} already produced by {previous}")]
    DuplicatePublicationDate { date: NaiveDate, previous: String },

    #[error("PDF extraction failed: {0}")]
    Extraction(String),

    #[error("pdftotext not found. Install poppler: brew install poppler (macOS) or apt install poppler-utils (Linux)")]
    PdftotextNotFound,

    #[error("pdftotext failed with exit code {code}: {stderr}")]
    PdftotextFailed { code: i32, stderr: String },

    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("failed to load layout from {path}: {reason}")]
    LayoutLoad { path: PathBuf, reason: String },

    #[error("invalid layout: {0}")]
    LayoutInvalid(String),

    #[error("failed to load run configuration from {path}: {reason}")]
    ConfigLoad { path: PathBuf, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Coarse classification of a [`BalanzaError`], stable enough to persist in
/// batch reports and to drive denylist curation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    AnchorNotFound,
    MalformedAmount,
    SectionCountMismatch,
    UnparsableTitle,
    OrientationFixFailed,
    DateMismatch,
    DuplicatePublicationDate,
    Extraction,
    Configuration,
    Io,
}

impl BalanzaError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            BalanzaError::AnchorNotFound { .. } => ErrorKind::AnchorNotFound,
            BalanzaError::MalformedAmount { .. } | BalanzaError::AmountOverflow { .. } => {
                ErrorKind::MalformedAmount
            }
            BalanzaError::SectionCountMismatch { .. } => ErrorKind::SectionCountMismatch,
            BalanzaError::UnparsableTitle { .. } => ErrorKind::UnparsableTitle,
            BalanzaError::OrientationFixFailed { .. } => ErrorKind::OrientationFixFailed,
            BalanzaError::DateMismatch { .. } => ErrorKind::DateMismatch,
            BalanzaError::DuplicatePublicationDate { .. } => ErrorKind::DuplicatePublicationDate,
            BalanzaError::Extraction(_)
            | BalanzaError::PdftotextNotFound
            | BalanzaError::PdftotextFailed { .. }
            | BalanzaError::Pdf(_) => ErrorKind::Extraction,
            BalanzaError::LayoutLoad { .. }
            | BalanzaError::LayoutInvalid(_)
            | BalanzaError::ConfigLoad { .. }
            | BalanzaError::Json(_) => ErrorKind::Configuration,
            BalanzaError::Io(_) | BalanzaError::Csv(_) => ErrorKind::Io,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorKind::AnchorNotFound => "anchor_not_found",
            ErrorKind::MalformedAmount => "malformed_amount",
            ErrorKind::SectionCountMismatch => "section_count_mismatch",
            ErrorKind::UnparsableTitle => "unparsable_title",
            ErrorKind::OrientationFixFailed => "orientation_fix_failed",
            ErrorKind::DateMismatch => "date_mismatch",
            ErrorKind::DuplicatePublicationDate => "duplicate_publication_date",
            ErrorKind::Extraction => "extraction",
            ErrorKind::Configuration => "configuration",
            ErrorKind::Io => "io",
        };
        f.write_str(s)
    }
}
