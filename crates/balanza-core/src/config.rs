use crate::batch::{Admission, DocumentFilter};
use crate::error::BalanzaError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Operator-curated settings for a batch run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// File names skipped entirely.
    pub exclude: BTreeSet<String>,
    /// File names whose orientation check misfires; processed unchanged.
    pub trust_orientation: BTreeSet<String>,
    /// Where rotated copies are written. Defaults to the input directory.
    pub fixed_dir: Option<PathBuf>,
    /// Layout file to use instead of the built-in preset.
    pub layout: Option<PathBuf>,
}

/// Load a run configuration from a file the caller named. A missing file is
/// an error; callers without a file use [`RunConfig::default`].
pub fn load_config(path: &Path) -> Result<RunConfig, BalanzaError> {
    tracing::debug!("loading run configuration from {}", path.display());
    let content = std::fs::read_to_string(path).map_err(|e| BalanzaError::ConfigLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    serde_json::from_str(&content).map_err(|e| BalanzaError::ConfigLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

impl DocumentFilter for RunConfig {
    fn admit(&self, document: &Path) -> Admission {
        let name = document
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        // a trusted file is processed even if it is also excluded
        if self.trust_orientation.contains(&name) {
            Admission::ProcessAsIs
        } else if self.exclude.contains(&name) {
            Admission::Skip
        } else {
            Admission::Process
        }
    }
}
