use balanza_core::batch::BatchReport;
use balanza_core::error::BalanzaError;
use balanza_core::model::BalanceSheet;
use std::path::Path;

pub fn print_sheet(sheet: &BalanceSheet) -> Result<(), BalanzaError> {
    let json = serde_json::to_string_pretty(sheet)?;
    println!("{json}");
    Ok(())
}

pub fn print_report(report: &BatchReport) -> Result<(), BalanzaError> {
    let json = serde_json::to_string_pretty(report)?;
    println!("{json}");
    Ok(())
}

pub fn write_report(report: &BatchReport, path: &Path) -> Result<(), BalanzaError> {
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(path, json)?;
    Ok(())
}
