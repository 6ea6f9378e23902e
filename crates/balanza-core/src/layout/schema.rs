use serde::{Deserialize, Serialize};

/// Language of the month names in the document title.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MonthLanguage {
    #[default]
    #[serde(rename = "es")]
    Spanish,
    #[serde(rename = "en")]
    English,
}

/// A start/end anchor pair; both rows are included in the range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnchorRange {
    pub from: String,
    pub to: String,
}

/// How a section's values are laid out on the page.
///
/// In every kind the column that is read is the column of the closing
/// anchor, on the assumption that a section's figures share one column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SectionKind {
    /// Rows from the top of the grid down to `to`.
    SingleColumn { to: String },
    /// Rows from `from` down to `to`.
    Ranged { from: String, to: String },
    /// Two independent ranges, each read from its own column. Values are
    /// emitted `col_1` first, then `col_0`; field labels follow that order.
    DualColumn {
        #[serde(rename = "col_0")]
        column_0: AnchorRange,
        #[serde(rename = "col_1")]
        column_1: AnchorRange,
    },
    /// Rows from `from` to `to` carry two figures each (first then paired),
    /// followed by paired-only rows up to the second-to-last grid row.
    MergedPair { from: String, to: String },
}

impl SectionKind {
    /// Every anchor term this kind references.
    pub fn anchors(&self) -> Vec<&str> {
        match self {
            SectionKind::SingleColumn { to } => vec![to.as_str()],
            SectionKind::Ranged { from, to } | SectionKind::MergedPair { from, to } => {
                vec![from.as_str(), to.as_str()]
            }
            SectionKind::DualColumn { column_0, column_1 } => vec![
                column_0.from.as_str(),
                column_0.to.as_str(),
                column_1.from.as_str(),
                column_1.to.as_str(),
            ],
        }
    }
}

/// A section of the sheet: where its figures are and what they are called.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionDef {
    pub region: SectionKind,
    /// Output labels, in extraction order.
    pub fields: Vec<String>,
    /// Labels for the second figure of each row; only for `merged_pair`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub paired_fields: Vec<String>,
}

/// Static description of a fixed balance-sheet layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetLayout {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Non-blank lines at the top of the page that are not table rows,
    /// the title line included.
    #[serde(default = "default_header_rows")]
    pub header_rows: usize,
    /// Non-blank lines at the bottom of the page that are not table rows.
    #[serde(default = "default_footer_rows")]
    pub footer_rows: usize,
    #[serde(default)]
    pub language: MonthLanguage,
    pub assets: SectionDef,
    pub liabilities: SectionDef,
    pub equity: SectionDef,
    pub exercise: SectionDef,
    /// Loss figures in `fields`, profit figures in `paired_fields`.
    pub profit_and_loss: SectionDef,
}

fn default_header_rows() -> usize {
    2
}

fn default_footer_rows() -> usize {
    1
}
