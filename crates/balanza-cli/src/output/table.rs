use balanza_core::batch::{BatchReport, DocumentStatus};
use balanza_core::model::{Amount, BalanceSheet, FinancialRecord, SheetTotals};

/// Integer with `.` as thousands separator: `270471859215` -> `270.471.859.215`.
pub fn format_amount(amount: Amount) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if amount < 0 {
        out.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(c);
    }
    out
}

pub fn print_sheet(sheet: &BalanceSheet) {
    println!("Balance sheet at {}\n", sheet.date);
    print_record("Activo", &sheet.assets);
    print_record("Pasivo y Patrimonio", &sheet.liabilities_and_equity);
    print_record("Ganancias", &sheet.profit);
    print_record("Perdidas", &sheet.loss);
    print_summary(&sheet.totals());
}

fn print_record(title: &str, record: &FinancialRecord) {
    println!("=== {} ===\n", title);
    let width = record.labels().map(|l| l.chars().count()).max().unwrap_or(10);
    for field in &record.fields {
        println!(
            "  {:<width$}  {:>20}",
            field.label,
            format_amount(field.amount),
            width = width
        );
    }
    println!();
}

pub fn print_summary(totals: &SheetTotals) {
    println!("Activo: {}", format_amount(totals.assets));
    println!(
        "Pasivo y Patrimonio: {}",
        format_amount(totals.liabilities_and_equity)
    );
    println!("Perdidas: {}", format_amount(totals.losses));
    println!("Ganancias: {}", format_amount(totals.profits));
}

pub fn print_report(report: &BatchReport) {
    let width = report
        .outcomes
        .iter()
        .map(|o| o.document.len())
        .max()
        .unwrap_or(10);

    for outcome in &report.outcomes {
        let status = match &outcome.status {
            DocumentStatus::Processed { date } => match &outcome.rotated {
                Some(path) => format!("ok  {} (rotated: {})", date, path.display()),
                None => format!("ok  {}", date),
            },
            DocumentStatus::Skipped => "skipped".to_string(),
            DocumentStatus::Failed { kind, message } => format!("FAILED [{}] {}", kind, message),
        };
        println!("  {:<width$}  {}", outcome.document, status, width = width);
    }

    println!(
        "\n{} processed, {} skipped, {} failed",
        report.processed(),
        report.skipped(),
        report.failed()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(270_471_859_215), "270.471.859.215");
        assert_eq!(format_amount(1_000), "1.000");
        assert_eq!(format_amount(999), "999");
        assert_eq!(format_amount(0), "0");
        assert_eq!(format_amount(-1_350), "-1.350");
    }
}
