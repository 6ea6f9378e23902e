pub mod reconcile;

use crate::error::BalanzaError;
use crate::layout::schema::SheetLayout;
use crate::model::{labels, Amount, FinancialRecord, SectionRecords, Statement};
use crate::parsing::SectionAmounts;
use chrono::NaiveDate;

pub use reconcile::reconcile;

/// Zip `field_labels` with `amounts` and append the statement's computed
/// field, if it has one.
pub fn assemble<S: AsRef<str>>(
    statement: Statement,
    date: NaiveDate,
    field_labels: &[S],
    amounts: &[Amount],
) -> Result<FinancialRecord, BalanzaError> {
    if field_labels.len() != amounts.len() {
        return Err(BalanzaError::SectionCountMismatch {
            section: statement.name().to_string(),
            expected: field_labels.len(),
            found: amounts.len(),
        });
    }

    let mut record = FinancialRecord::from_pairs(date, field_labels, amounts);
    match statement {
        Statement::Assets => {
            let total = checked_total(&record, statement.name())?;
            record.push(labels::TOTAL_ASSETS, total);
        }
        Statement::Liabilities => {
            let total = checked_total(&record, statement.name())?;
            record.push(labels::TOTAL_LIABILITIES, total);
        }
        Statement::Profit => {
            let total = checked_total(&record, statement.name())?;
            record.push(labels::TOTAL, total);
        }
        Statement::Exercise => {
            let (before_taxes, tax) = match amounts {
                [before_taxes, tax, ..] => (*before_taxes, *tax),
                _ => {
                    return Err(BalanzaError::SectionCountMismatch {
                        section: statement.name().to_string(),
                        expected: 2,
                        found: amounts.len(),
                    })
                }
            };
            let result = before_taxes.checked_sub(tax).ok_or_else(|| {
                BalanzaError::AmountOverflow {
                    section: statement.name().to_string(),
                }
            })?;
            record.push(labels::EXERCISE_RESULT, result);
        }
        Statement::Equity | Statement::Loss => {}
    }
    Ok(record)
}

/// Sum of `record`, failing instead of wrapping.
pub(crate) fn checked_total(record: &FinancialRecord, section: &str) -> Result<Amount, BalanzaError> {
    record.sum().ok_or_else(|| BalanzaError::AmountOverflow {
        section: section.to_string(),
    })
}

/// Assemble every section of one document under its publication date.
pub fn assemble_sections(
    date: NaiveDate,
    amounts: &SectionAmounts,
    layout: &SheetLayout,
) -> Result<SectionRecords, BalanzaError> {
    let pl = &layout.profit_and_loss;
    Ok(SectionRecords {
        date,
        assets: assemble(Statement::Assets, date, &layout.assets.fields, &amounts.assets)?,
        liabilities: assemble(
            Statement::Liabilities,
            date,
            &layout.liabilities.fields,
            &amounts.liabilities,
        )?,
        equity: assemble(Statement::Equity, date, &layout.equity.fields, &amounts.equity)?,
        exercise: assemble(
            Statement::Exercise,
            date,
            &layout.exercise.fields,
            &amounts.exercise,
        )?,
        profit: assemble(Statement::Profit, date, &pl.paired_fields, &amounts.profit)?,
        loss: assemble(Statement::Loss, date, &pl.fields, &amounts.loss)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2019, 12, 31).unwrap()
    }

    #[test]
    fn test_assets_total_appended() {
        let labels: Vec<String> = (1..=9).map(|i| format!("A{}", i)).collect();
        let amounts: Vec<Amount> = (1..=9).collect();
        let r = assemble(Statement::Assets, date(), &labels, &amounts).unwrap();
        assert_eq!(r.len(), 10);
        assert_eq!(r.fields[9].label, "Total Activo");
        assert_eq!(r.get("Total Activo"), Some(45));
    }

    #[test]
    fn test_liabilities_total_appended() {
        let r = assemble(Statement::Liabilities, date(), &["L1", "L2"], &[100, 250]).unwrap();
        assert_eq!(r.get("Total Pasivo"), Some(350));
    }

    #[test]
    fn test_exercise_result_is_difference() {
        let r = assemble(
            Statement::Exercise,
            date(),
            &["Antes de Impuestos", "Impuesto a la Renta"],
            &[1_500, 150],
        )
        .unwrap();
        assert_eq!(r.get("Resultado del Ejercicio"), Some(1_350));
        assert_eq!(r.len(), 3);
    }

    #[test]
    fn test_exercise_result_can_be_negative() {
        let r = assemble(Statement::Exercise, date(), &["B", "T"], &[100, 400]).unwrap();
        assert_eq!(r.get("Resultado del Ejercicio"), Some(-300));
    }

    #[test]
    fn test_equity_and_loss_have_no_computed_field() {
        let e = assemble(Statement::Equity, date(), &["C", "R"], &[1, 2]).unwrap();
        let l = assemble(Statement::Loss, date(), &["P"], &[3]).unwrap();
        assert_eq!(e.len(), 2);
        assert_eq!(l.len(), 1);
    }

    #[test]
    fn test_total_overflow_is_an_error() {
        let huge = 9_000_000_000_000_000_000;
        let err = assemble(Statement::Assets, date(), &["A", "B"], &[huge, huge]).unwrap_err();
        assert!(
            matches!(&err, BalanzaError::AmountOverflow { section } if section == "assets"),
            "unexpected error: {err}"
        );
        assert_eq!(err.kind(), crate::error::ErrorKind::MalformedAmount);
    }

    #[test]
    fn test_exercise_difference_overflow_is_an_error() {
        let err = assemble(Statement::Exercise, date(), &["B", "T"], &[i64::MIN + 1, 2]).unwrap_err();
        assert!(matches!(err, BalanzaError::AmountOverflow { .. }));
    }

    #[test]
    fn test_count_mismatch() {
        let err = assemble(Statement::Profit, date(), &["A", "B", "C"], &[1, 2]).unwrap_err();
        match err {
            BalanzaError::SectionCountMismatch {
                section,
                expected,
                found,
            } => {
                assert_eq!(section, "profit");
                assert_eq!(expected, 3);
                assert_eq!(found, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
