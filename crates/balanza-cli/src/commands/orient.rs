use balanza_core::error::BalanzaError;
use balanza_core::extraction::orientation::normalize_orientation;
use std::path::PathBuf;

use super::target_dir_for;

pub fn run(pdf_file: PathBuf, target_dir: Option<PathBuf>) -> Result<(), BalanzaError> {
    let dir = target_dir_for(&pdf_file, target_dir);
    let result = normalize_orientation(&pdf_file, &dir)?;
    if result == pdf_file {
        eprintln!("{} is already landscape", pdf_file.display());
    }
    println!("{}", result.display());
    Ok(())
}
