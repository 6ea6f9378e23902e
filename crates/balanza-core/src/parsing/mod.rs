pub mod amounts;
pub mod anchor;
pub mod header;
pub mod slicer;

use crate::assembly::assemble_sections;
use crate::error::BalanzaError;
use crate::extraction::PageContent;
use crate::layout::schema::{SectionDef, SheetLayout};
use crate::model::{Amount, SectionRecords};
use amounts::{column_amounts, merged_amounts};
use header::parse_publication_date;
use slicer::{slice_section, RawSection};

/// The page text as rows of cells, with the title kept apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextGrid {
    pub title: String,
    pub rows: Vec<Vec<String>>,
}

impl TextGrid {
    /// Build a grid from raw layout lines.
    ///
    /// Blank lines are dropped first. The first remaining line is the title;
    /// it and the rest of the `header_rows` lines are left out of the grid,
    /// as are the last `footer_rows` lines.
    pub fn from_lines<S: AsRef<str>>(
        lines: &[S],
        header_rows: usize,
        footer_rows: usize,
    ) -> Result<Self, BalanzaError> {
        let lines: Vec<&str> = lines
            .iter()
            .map(|l| l.as_ref())
            .filter(|l| !l.trim().is_empty())
            .collect();

        let title = lines
            .first()
            .map(|l| l.trim().to_string())
            .ok_or_else(|| BalanzaError::Extraction("no text content found on page 1".into()))?;

        let end = lines.len().saturating_sub(footer_rows);
        let rows = lines
            .get(header_rows.min(end)..end)
            .unwrap_or_default()
            .iter()
            .map(|line| {
                split_by_whitespace_gaps(line)
                    .into_iter()
                    .map(str::to_string)
                    .collect()
            })
            .collect();

        Ok(TextGrid { title, rows })
    }

    pub fn from_rows(title: impl Into<String>, rows: Vec<Vec<String>>) -> Self {
        TextGrid {
            title: title.into(),
            rows,
        }
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(column))
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Split a line by gaps of 2+ whitespace characters. Empty segments are
/// discarded.
pub fn split_by_whitespace_gaps(line: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut start = None;
    let mut gap_start = 0;
    let mut space_count = 0;

    for (i, c) in line.char_indices() {
        if c.is_whitespace() {
            if space_count == 0 {
                gap_start = i;
            }
            space_count += 1;
            if space_count == 2 {
                if let Some(s) = start.take() {
                    segments.push(&line[s..gap_start]);
                }
            }
        } else {
            if start.is_none() {
                start = Some(i);
            }
            space_count = 0;
        }
    }

    if let Some(s) = start {
        segments.push(&line[s..]);
    }

    segments
        .into_iter()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Normalized amounts per section, in layout label order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionAmounts {
    pub assets: Vec<Amount>,
    pub liabilities: Vec<Amount>,
    pub equity: Vec<Amount>,
    pub exercise: Vec<Amount>,
    pub loss: Vec<Amount>,
    pub profit: Vec<Amount>,
}

/// Slice and normalize every section of the grid.
pub fn parse_grid(grid: &TextGrid, layout: &SheetLayout) -> Result<SectionAmounts, BalanzaError> {
    let assets = column_section(grid, "assets", &layout.assets)?;
    let liabilities = column_section(grid, "liabilities", &layout.liabilities)?;
    let equity = column_section(grid, "equity", &layout.equity)?;
    let exercise = column_section(grid, "exercise", &layout.exercise)?;

    let (loss, profit) = match slice_section(&layout.profit_and_loss.region, grid)? {
        RawSection::Merged { pairs, remainder } => merged_amounts(&pairs, &remainder)?,
        RawSection::Column(_) => {
            return Err(BalanzaError::LayoutInvalid(
                "section 'profit_and_loss' must use kind merged_pair".into(),
            ))
        }
    };

    Ok(SectionAmounts {
        assets,
        liabilities,
        equity,
        exercise,
        loss,
        profit,
    })
}

fn column_section(
    grid: &TextGrid,
    name: &str,
    section: &SectionDef,
) -> Result<Vec<Amount>, BalanzaError> {
    match slice_section(&section.region, grid)? {
        RawSection::Column(cells) => column_amounts(&cells),
        RawSection::Merged { .. } => Err(BalanzaError::LayoutInvalid(format!(
            "section '{}' cannot use kind merged_pair",
            name
        ))),
    }
}

/// Turn the first page of a sheet into per-section records.
pub fn parse_sections(
    page: &PageContent,
    layout: &SheetLayout,
) -> Result<SectionRecords, BalanzaError> {
    let grid = TextGrid::from_lines(&page.lines, layout.header_rows, layout.footer_rows)?;
    let date = parse_publication_date(&grid.title, layout.language)?;
    tracing::debug!("'{}' dated {}, {} grid rows", grid.title, date, grid.len());

    let amounts = parse_grid(&grid, layout)?;
    assemble_sections(date, &amounts, layout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::schema::SectionKind;

    fn small_grid() -> TextGrid {
        let rows: [&[&str]; 5] = [
            &["DISPONIBLE 1"],
            &["CARGOS 2"],
            &["PERDIDAS 5", "GANANCIAS 6"],
            &["AJUSTES 7", "GANANCIAS 8"],
            &["TOTAL 12", "TOTAL 14"],
        ];
        TextGrid::from_rows(
            "BALANCE GENERAL AL 31 DE DICIEMBRE DE 2019",
            rows.iter()
                .map(|r| r.iter().map(|c| c.to_string()).collect())
                .collect(),
        )
    }

    fn small_layout() -> SheetLayout {
        let column = |fields: &[&str]| SectionDef {
            region: SectionKind::SingleColumn { to: "CARGOS".into() },
            fields: fields.iter().map(|f| f.to_string()).collect(),
            paired_fields: Vec::new(),
        };
        SheetLayout {
            name: "small".into(),
            description: None,
            header_rows: 1,
            footer_rows: 0,
            language: Default::default(),
            assets: column(&["Disponible", "Cargos"]),
            liabilities: column(&["L1", "L2"]),
            equity: column(&["E1", "E2"]),
            exercise: column(&["Antes", "Impuesto"]),
            profit_and_loss: SectionDef {
                region: SectionKind::MergedPair {
                    from: "PERDIDAS".into(),
                    to: "AJUSTES".into(),
                },
                fields: vec!["P1".into(), "P2".into()],
                paired_fields: vec!["G1".into(), "G2".into()],
            },
        }
    }

    #[test]
    fn test_parse_grid_reads_every_section() {
        let amounts = parse_grid(&small_grid(), &small_layout()).unwrap();
        assert_eq!(amounts.assets, vec![1, 2]);
        assert_eq!(amounts.loss, vec![5, 7]);
        assert_eq!(amounts.profit, vec![6, 8]);
    }

    #[test]
    fn test_column_profit_and_loss_is_layout_fault() {
        let mut layout = small_layout();
        layout.profit_and_loss.region = SectionKind::SingleColumn { to: "AJUSTES".into() };
        let err = parse_grid(&small_grid(), &layout).unwrap_err();
        assert!(matches!(err, BalanzaError::LayoutInvalid(_)), "unexpected error: {err}");
    }

    #[test]
    fn test_merged_single_section_is_layout_fault() {
        let mut layout = small_layout();
        layout.equity.region = SectionKind::MergedPair {
            from: "PERDIDAS".into(),
            to: "AJUSTES".into(),
        };
        match parse_grid(&small_grid(), &layout).unwrap_err() {
            BalanzaError::LayoutInvalid(msg) => assert!(msg.contains("'equity'"), "{msg}"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_split_by_whitespace_gaps() {
        let segments = split_by_whitespace_gaps("  DISPONIBLE 1.000     OBLIGACIONES 200  ");
        assert_eq!(segments, vec!["DISPONIBLE 1.000", "OBLIGACIONES 200"]);
    }

    #[test]
    fn test_single_spaces_do_not_split() {
        assert_eq!(
            split_by_whitespace_gaps("CARGOS DIFERIDOS 9.000"),
            vec!["CARGOS DIFERIDOS 9.000"]
        );
    }

    #[test]
    fn test_split_handles_wide_whitespace() {
        let segments = split_by_whitespace_gaps("RESERVAS 1\u{a0}\u{a0}CAPITAL 2");
        assert_eq!(segments, vec!["RESERVAS 1", "CAPITAL 2"]);
    }

    #[test]
    fn test_grid_drops_header_footer_and_blank_lines() {
        let lines = vec![
            "",
            "   BALANCE GENERAL AL 31 DE DICIEMBRE DE 2019",
            "(En Guaranies)",
            "",
            "DISPONIBLE 1     OBLIGACIONES 2",
            "CARGOS DIFERIDOS 3",
            "Pagina 1",
        ];
        let grid = TextGrid::from_lines(&lines, 2, 1).unwrap();
        assert_eq!(grid.title, "BALANCE GENERAL AL 31 DE DICIEMBRE DE 2019");
        assert_eq!(grid.len(), 2);
        assert_eq!(grid.cell(0, 1), Some("OBLIGACIONES 2"));
        assert_eq!(grid.cell(1, 1), None);
    }

    #[test]
    fn test_grid_shorter_than_header() {
        let grid = TextGrid::from_lines(&["TITLE"], 2, 1).unwrap();
        assert_eq!(grid.title, "TITLE");
        assert!(grid.is_empty());
    }

    #[test]
    fn test_grid_without_text_fails() {
        let lines: Vec<String> = vec!["   ".into(), String::new()];
        assert!(matches!(
            TextGrid::from_lines(&lines, 2, 1),
            Err(BalanzaError::Extraction(_))
        ));
    }
}
