use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::BalanzaError;

/// Labels of the computed fields appended during assembly and
/// reconciliation.
pub mod labels {
    pub const TOTAL_ASSETS: &str = "Total Activo";
    pub const TOTAL_LIABILITIES: &str = "Total Pasivo";
    pub const EXERCISE_RESULT: &str = "Resultado del Ejercicio";
    pub const TOTAL: &str = "Total";
    pub const NET_WORTH: &str = "Patrimonio";
    pub const TOTAL_LIABILITIES_AND_EQUITY: &str = "Total Pasivo y Patrimonio";

    /// Every label appended during assembly or reconciliation.
    pub const COMPUTED: [&str; 6] = [
        TOTAL_ASSETS,
        TOTAL_LIABILITIES,
        EXERCISE_RESULT,
        TOTAL,
        NET_WORTH,
        TOTAL_LIABILITIES_AND_EQUITY,
    ];
}

/// A currency quantity in whole units. Decimal remainders in the source text
/// are truncated away before they ever reach an `Amount`.
pub type Amount = i64;

/// The logical statement groups printed on a balance sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Statement {
    Assets,
    Liabilities,
    Equity,
    Exercise,
    Profit,
    Loss,
}

impl Statement {
    pub fn name(&self) -> &'static str {
        match self {
            Statement::Assets => "assets",
            Statement::Liabilities => "liabilities",
            Statement::Equity => "equity",
            Statement::Exercise => "exercise",
            Statement::Profit => "profit",
            Statement::Loss => "loss",
        }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One labeled figure of a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub label: String,
    pub amount: Amount,
}

/// An ordered label -> amount mapping keyed by publication date.
///
/// Field order is significant: it is the column order of the persisted
/// dataset and the order in which sums are taken.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialRecord {
    pub date: NaiveDate,
    pub fields: Vec<Field>,
}

impl FinancialRecord {
    /// Build a record by zipping labels with amounts. Callers check the
    /// lengths beforehand; extra items on either side are ignored.
    pub fn from_pairs<S: AsRef<str>>(date: NaiveDate, labels: &[S], amounts: &[Amount]) -> Self {
        let fields = labels
            .iter()
            .zip(amounts)
            .map(|(label, amount)| Field {
                label: label.as_ref().to_string(),
                amount: *amount,
            })
            .collect();
        FinancialRecord { date, fields }
    }

    pub fn push(&mut self, label: impl Into<String>, amount: Amount) {
        self.fields.push(Field {
            label: label.into(),
            amount,
        });
    }

    /// First field carrying `label`.
    pub fn get(&self, label: &str) -> Option<Amount> {
        self.fields
            .iter()
            .find(|f| f.label == label)
            .map(|f| f.amount)
    }

    /// Sum of every field currently in the record, or `None` when it does
    /// not fit an [`Amount`].
    pub fn sum(&self) -> Option<Amount> {
        self.fields
            .iter()
            .try_fold(0 as Amount, |acc, f| acc.checked_add(f.amount))
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.label.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Concatenate `other`'s fields after this record's. Both records must
    /// share the same publication date.
    pub fn concat(&self, other: &FinancialRecord) -> Result<FinancialRecord, BalanzaError> {
        if self.date != other.date {
            return Err(BalanzaError::DateMismatch {
                left: self.date,
                right: other.date,
            });
        }
        let mut fields = self.fields.clone();
        fields.extend(other.fields.iter().cloned());
        Ok(FinancialRecord {
            date: self.date,
            fields,
        })
    }
}

/// Per-section records assembled from a single document, before any
/// cross-section reconciliation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionRecords {
    pub date: NaiveDate,
    pub assets: FinancialRecord,
    pub liabilities: FinancialRecord,
    pub equity: FinancialRecord,
    pub exercise: FinancialRecord,
    pub profit: FinancialRecord,
    pub loss: FinancialRecord,
}

/// The four persisted datasets for one document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceSheet {
    pub date: NaiveDate,
    pub assets: FinancialRecord,
    pub liabilities_and_equity: FinancialRecord,
    pub profit: FinancialRecord,
    pub loss: FinancialRecord,
}

impl BalanceSheet {
    /// The figures of the console summary. A missing computed field reads
    /// as zero; reconciled sheets always carry all four.
    pub fn totals(&self) -> SheetTotals {
        SheetTotals {
            assets: self.assets.get(labels::TOTAL_ASSETS).unwrap_or(0),
            liabilities_and_equity: self
                .liabilities_and_equity
                .get(labels::TOTAL_LIABILITIES_AND_EQUITY)
                .unwrap_or(0),
            losses: self.loss.get(labels::TOTAL).unwrap_or(0),
            profits: self.profit.get(labels::TOTAL).unwrap_or(0),
        }
    }
}

/// Headline totals of a reconciled sheet, as shown in the console summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetTotals {
    pub assets: Amount,
    pub liabilities_and_equity: Amount,
    pub losses: Amount,
    pub profits: Amount,
}
