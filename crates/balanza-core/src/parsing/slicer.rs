use crate::error::BalanzaError;
use crate::layout::schema::{AnchorRange, SectionKind};
use crate::parsing::anchor::locate_anchor;
use crate::parsing::TextGrid;

/// Raw text taken from one grid row for a section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCell {
    pub row: usize,
    pub text: String,
}

/// Raw text of a section, before any number is read out of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawSection {
    /// One cell per row, in output order.
    Column(Vec<RawCell>),
    /// Whole rows holding two figures each, then rows holding only the
    /// paired figure.
    Merged {
        pairs: Vec<RawCell>,
        remainder: Vec<RawCell>,
    },
}

impl RawSection {
    pub fn len(&self) -> usize {
        match self {
            RawSection::Column(cells) => cells.len(),
            RawSection::Merged { pairs, remainder } => pairs.len() + remainder.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Cut the raw text of a section out of the grid.
pub fn slice_section(kind: &SectionKind, grid: &TextGrid) -> Result<RawSection, BalanzaError> {
    let section = match kind {
        SectionKind::SingleColumn { to } => {
            let end = locate_anchor(to, grid)?;
            RawSection::Column(column_cells(grid, 0, end.row, end.column))
        }
        SectionKind::Ranged { from, to } => RawSection::Column(range_cells(grid, from, to)?),
        SectionKind::DualColumn { column_0, column_1 } => {
            // col_1 comes first in the output ordering
            let mut cells = column_range(grid, column_1)?;
            cells.extend(column_range(grid, column_0)?);
            RawSection::Column(cells)
        }
        SectionKind::MergedPair { from, to } => {
            let start = locate_anchor(from, grid)?.row;
            let end = locate_anchor(to, grid)?.row;
            let pairs = row_cells(grid, start, end);
            // the last grid row holds the printed totals
            let remainder = match grid.rows.len().checked_sub(2) {
                Some(last) if end < last => row_cells(grid, end + 1, last),
                _ => Vec::new(),
            };
            RawSection::Merged { pairs, remainder }
        }
    };

    tracing::debug!("sliced {} raw cells for {:?}", section.len(), kind);
    Ok(section)
}

fn column_range(grid: &TextGrid, range: &AnchorRange) -> Result<Vec<RawCell>, BalanzaError> {
    range_cells(grid, &range.from, &range.to)
}

fn range_cells(grid: &TextGrid, from: &str, to: &str) -> Result<Vec<RawCell>, BalanzaError> {
    let start = locate_anchor(from, grid)?.row;
    let end = locate_anchor(to, grid)?;
    tracing::debug!("range '{}' row {} .. '{}' {:?}", from, start, to, end);
    Ok(column_cells(grid, start, end.row, end.column))
}

/// Cells of `column` for rows `start..=end`. A row that is too short for the
/// column contributes empty text, which later fails as a malformed amount.
fn column_cells(grid: &TextGrid, start: usize, end: usize, column: usize) -> Vec<RawCell> {
    (start..=end)
        .map(|row| RawCell {
            row,
            text: grid.cell(row, column).unwrap_or_default().to_string(),
        })
        .collect()
}

/// Whole rows `start..=end`, cells re-joined with a column gap.
fn row_cells(grid: &TextGrid, start: usize, end: usize) -> Vec<RawCell> {
    (start..=end)
        .filter_map(|row| {
            grid.rows.get(row).map(|cells| RawCell {
                row,
                text: cells.join("  "),
            })
        })
        .collect()
}
