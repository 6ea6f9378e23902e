//! Cross-section reconciliation.
//!
//! Per-section records of one document are combined into the four persisted
//! datasets. Combination only ever happens between records of the same
//! publication date.

use crate::assembly::checked_total;
use crate::error::BalanzaError;
use crate::model::{labels, Amount, BalanceSheet, FinancialRecord, SectionRecords};

/// Equity followed by the exercise record, with `Patrimonio` appended.
///
/// `Patrimonio` is the sum of every field of the concatenation. That
/// includes both exercise inputs *and* the result derived from them, so the
/// exercise figures are counted twice. Historical datasets were produced
/// this way; keep it.
pub fn net_worth(
    equity: &FinancialRecord,
    exercise: &FinancialRecord,
) -> Result<FinancialRecord, BalanzaError> {
    let mut combined = equity.concat(exercise)?;
    let total = checked_total(&combined, labels::NET_WORTH)?;
    combined.push(labels::NET_WORTH, total);
    Ok(combined)
}

/// Liabilities followed by the net worth record, with
/// `Total Pasivo y Patrimonio` appended.
pub fn liabilities_and_equity(
    liabilities: &FinancialRecord,
    net_worth: &FinancialRecord,
) -> Result<FinancialRecord, BalanzaError> {
    let total = computed(liabilities, labels::TOTAL_LIABILITIES)?
        .checked_add(computed(net_worth, labels::NET_WORTH)?)
        .ok_or_else(|| BalanzaError::AmountOverflow {
            section: labels::TOTAL_LIABILITIES_AND_EQUITY.to_string(),
        })?;
    let mut combined = liabilities.concat(net_worth)?;
    combined.push(labels::TOTAL_LIABILITIES_AND_EQUITY, total);
    Ok(combined)
}

/// Loss record with the exercise result copied in, then `Total`.
pub fn total_losses(
    loss: &FinancialRecord,
    exercise: &FinancialRecord,
) -> Result<FinancialRecord, BalanzaError> {
    if loss.date != exercise.date {
        return Err(BalanzaError::DateMismatch {
            left: loss.date,
            right: exercise.date,
        });
    }
    let mut combined = loss.clone();
    combined.push(
        labels::EXERCISE_RESULT,
        computed(exercise, labels::EXERCISE_RESULT)?,
    );
    let total = checked_total(&combined, "loss")?;
    combined.push(labels::TOTAL, total);
    Ok(combined)
}

/// Combine the section records of one document into its balance sheet.
pub fn reconcile(sections: &SectionRecords) -> Result<BalanceSheet, BalanzaError> {
    let worth = net_worth(&sections.equity, &sections.exercise)?;
    let liabilities_and_equity = liabilities_and_equity(&sections.liabilities, &worth)?;
    let loss = total_losses(&sections.loss, &sections.exercise)?;

    for record in [&sections.assets, &sections.profit] {
        if record.date != sections.date {
            return Err(BalanzaError::DateMismatch {
                left: sections.date,
                right: record.date,
            });
        }
    }

    Ok(BalanceSheet {
        date: sections.date,
        assets: sections.assets.clone(),
        liabilities_and_equity,
        profit: sections.profit.clone(),
        loss,
    })
}

/// A field appended during assembly. Its absence means the records were not
/// built from a valid layout.
fn computed(record: &FinancialRecord, label: &str) -> Result<Amount, BalanzaError> {
    record.get(label).ok_or_else(|| {
        BalanzaError::LayoutInvalid(format!(
            "record dated {} has no computed '{}' field",
            record.date, label
        ))
    })
}
