//! JSON rendering and persistence of the stats artifact.

use std::path::{Path, PathBuf};

use anyhow::Context;
use likestat_core::DemographicStats;

pub(crate) const STATS_FILE_NAME: &str = "stats.json";

pub(crate) fn default_path(output_dir: &Path) -> PathBuf {
    output_dir.join(STATS_FILE_NAME)
}

pub(crate) fn render_json(stats: &DemographicStats) -> anyhow::Result<String> {
    serde_json::to_string_pretty(stats).context("failed to serialize stats")
}

/// Writes `stats` as pretty JSON, creating parent directories as needed.
pub(crate) fn save_stats(stats: &DemographicStats, path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let json = render_json(stats)?;
    std::fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))
}
