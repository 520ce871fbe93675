//! Rule sources
//!
//! Where a rule snapshot comes from. The engine never talks to the remote
//! store itself; a source hands over one export of the rule tables.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use shared::models::{CommissionRateRow, CommissionTierRow};
use shared::{AppError, AppResult};

/// One export of the rule configuration tables
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleSnapshotFile {
    /// `commission_rates` rows (fixed rates)
    #[serde(default)]
    pub commission_rates: Vec<CommissionRateRow>,
    /// `commission_tiers` rows (value and period tiers)
    #[serde(default)]
    pub commission_tiers: Vec<CommissionTierRow>,
    /// Extra product aliases: label -> canonical key
    #[serde(default)]
    pub product_aliases: HashMap<String, String>,
}

/// Something that can produce a rule export
pub trait RuleSource {
    fn fetch(&self) -> AppResult<RuleSnapshotFile>;

    /// Human-readable origin, for logs
    fn describe(&self) -> String;
}

/// JSON export on disk
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RuleSource for JsonFileSource {
    fn fetch(&self) -> AppResult<RuleSnapshotFile> {
        let content = fs::read_to_string(&self.path).map_err(|e| {
            AppError::snapshot_unavailable(format!(
                "Failed to read rule snapshot {}: {}",
                self.path.display(),
                e
            ))
            .with_detail("path", self.path.display().to_string())
        })?;

        serde_json::from_str(&content).map_err(|e| {
            AppError::snapshot_invalid(format!(
                "Failed to parse rule snapshot {}: {}",
                self.path.display(),
                e
            ))
            .with_detail("path", self.path.display().to_string())
            .with_detail("line", e.line())
        })
    }

    fn describe(&self) -> String {
        format!("file:{}", self.path.display())
    }
}

/// In-memory export
#[derive(Debug, Clone, Default)]
pub struct StaticSource(pub RuleSnapshotFile);

impl RuleSource for StaticSource {
    fn fetch(&self) -> AppResult<RuleSnapshotFile> {
        Ok(self.0.clone())
    }

    fn describe(&self) -> String {
        "static".to_string()
    }
}
