//! Cumulative time series of reconciled sheets, persisted as CSV.

use crate::error::BalanzaError;
use crate::model::{BalanceSheet, FinancialRecord};
use chrono::NaiveDate;
use csv::WriterBuilder;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// File names of the four persisted datasets.
pub const ASSETS_FILE: &str = "assets.csv";
pub const LIABILITIES_FILE: &str = "liabilities.csv";
pub const PROFIT_FILE: &str = "profit.csv";
pub const LOSS_FILE: &str = "loss.csv";

/// Leading column of every dataset.
pub const DATE_COLUMN: &str = "date";

/// Reconciled sheets keyed by publication date, with the document each one
/// came from.
#[derive(Debug, Clone, Default)]
pub struct Datasets {
    sheets: BTreeMap<NaiveDate, (String, BalanceSheet)>,
}

impl Datasets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the sheet produced by `source`. A date already present is an
    /// error and leaves the datasets unchanged.
    pub fn insert(&mut self, source: impl Into<String>, sheet: BalanceSheet) -> Result<(), BalanzaError> {
        if let Some((previous, _)) = self.sheets.get(&sheet.date) {
            return Err(BalanzaError::DuplicatePublicationDate {
                date: sheet.date,
                previous: previous.clone(),
            });
        }
        self.sheets.insert(sheet.date, (source.into(), sheet));
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.sheets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }

    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.sheets.keys().copied()
    }

    pub fn get(&self, date: NaiveDate) -> Option<&BalanceSheet> {
        self.sheets.get(&date).map(|(_, sheet)| sheet)
    }

    /// Sheets in ascending date order.
    pub fn sheets(&self) -> impl Iterator<Item = &BalanceSheet> {
        self.sheets.values().map(|(_, sheet)| sheet)
    }

    pub fn assets(&self) -> Vec<&FinancialRecord> {
        self.sheets().map(|s| &s.assets).collect()
    }

    pub fn liabilities_and_equity(&self) -> Vec<&FinancialRecord> {
        self.sheets().map(|s| &s.liabilities_and_equity).collect()
    }

    pub fn profit(&self) -> Vec<&FinancialRecord> {
        self.sheets().map(|s| &s.profit).collect()
    }

    pub fn loss(&self) -> Vec<&FinancialRecord> {
        self.sheets().map(|s| &s.loss).collect()
    }

    /// Write the four datasets into `out_dir`, replacing existing files.
    /// Returns the paths written.
    pub fn write_csv(&self, out_dir: &Path) -> Result<Vec<PathBuf>, BalanzaError> {
        std::fs::create_dir_all(out_dir)?;
        let series = [
            (ASSETS_FILE, self.assets()),
            (LIABILITIES_FILE, self.liabilities_and_equity()),
            (PROFIT_FILE, self.profit()),
            (LOSS_FILE, self.loss()),
        ];

        let mut written = Vec::with_capacity(series.len());
        for (name, records) in series {
            let path = out_dir.join(name);
            write_records(&path, &records)?;
            tracing::info!("wrote {} rows to {}", records.len(), path.display());
            written.push(path);
        }
        Ok(written)
    }
}

/// One CSV file: `date` then the labels of the earliest record. Every record
/// produced by one layout has the same labels; a label missing from a later
/// record is written as an empty cell.
fn write_records(path: &Path, records: &[&FinancialRecord]) -> Result<(), BalanzaError> {
    let mut writer = WriterBuilder::new().has_headers(true).from_path(path)?;

    let columns: Vec<&str> = records
        .first()
        .map(|r| r.labels().collect())
        .unwrap_or_default();

    let mut header = vec![DATE_COLUMN];
    header.extend(columns.iter().copied());
    writer.write_record(&header)?;

    for record in records {
        let mut row = vec![record.date.format("%Y-%m-%d").to_string()];
        row.extend(
            columns
                .iter()
                .map(|label| record.get(label).map(|a| a.to_string()).unwrap_or_default()),
        );
        writer.write_record(&row)?;
    }

    writer.flush()?;
    Ok(())
}
