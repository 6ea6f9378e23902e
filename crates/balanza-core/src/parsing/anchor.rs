use crate::error::BalanzaError;
use crate::parsing::TextGrid;
use serde::{Deserialize, Serialize};

/// Zero-based position of a cell in a [`TextGrid`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellPos {
    pub row: usize,
    pub column: usize,
}

/// Position of the first cell, in reading order, whose text contains `term`.
///
/// Later occurrences are never considered. A missing anchor means the page
/// does not have the expected layout.
pub fn locate_anchor(term: &str, grid: &TextGrid) -> Result<CellPos, BalanzaError> {
    grid.rows
        .iter()
        .enumerate()
        .find_map(|(row, cells)| {
            cells
                .iter()
                .position(|cell| cell.contains(term))
                .map(|column| CellPos { row, column })
        })
        .ok_or_else(|| BalanzaError::AnchorNotFound {
            anchor: term.to_string(),
        })
}
