pub mod batch;
pub mod extract;
pub mod layout;
pub mod orient;

use balanza_core::error::BalanzaError;
use balanza_core::layout::builtin;
use balanza_core::layout::schema::SheetLayout;
use std::path::{Path, PathBuf};

/// Preset used when no layout file is given.
pub const DEFAULT_PRESET: &str = "continental";

pub fn resolve_layout(file: Option<&Path>) -> Result<SheetLayout, BalanzaError> {
    match file {
        Some(path) => balanza_core::layout::load_layout(path),
        None => builtin::load_preset(DEFAULT_PRESET),
    }
}

/// `dir`, or the directory holding `file`.
pub fn target_dir_for(file: &Path, dir: Option<PathBuf>) -> PathBuf {
    dir.unwrap_or_else(|| file.parent().map(Path::to_path_buf).unwrap_or_default())
}
