//! Post-likes demographics pipeline orchestration.

use chrono::NaiveDate;
use likestat_core::{aggregate, AppConfig, DemographicStats, EngagementEvent};

use crate::client::VkClient;
use crate::collector::collect_likes;
use crate::error::VkError;
use crate::resolver::resolve_profiles;

/// Result of one pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineReport {
    pub stats: DemographicStats,
    /// Ids returned by `likes.getList`.
    pub collected: usize,
    /// Profiles returned by `users.get`.
    pub resolved: usize,
    pub skipped_batches: usize,
    /// `false` when likes collection stopped early or a batch was skipped.
    pub complete: bool,
}

/// Run the full pipeline for one liked object.
///
/// 1. Collect liker ids page by page.
/// 2. Resolve them to profiles in batches.
/// 3. Fold the profiles into age and sex histograms as of `today`.
///
/// Zero likes is not an error: the report carries all-zero histograms.
///
/// # Errors
///
/// Returns [`VkError::Http`] if VK cannot be reached. API-level failures are
/// logged and reflected in [`PipelineReport::complete`] instead.
pub async fn run_post_stats(
    client: &VkClient,
    config: &AppConfig,
    event: EngagementEvent,
    today: NaiveDate,
) -> Result<PipelineReport, VkError> {
    let collection = collect_likes(
        client,
        event,
        config.page_size,
        config.inter_request_delay_ms,
    )
    .await?;

    if collection.ids.is_empty() {
        tracing::info!(%event, "no likes collected; returning empty histograms");
    }

    let resolution = resolve_profiles(
        client,
        &collection.ids,
        config.batch_size,
        config.max_concurrent_batches,
    )
    .await?;

    let stats = aggregate(event.item_id, &resolution.records, today);

    Ok(PipelineReport {
        collected: collection.ids.len(),
        resolved: resolution.records.len(),
        skipped_batches: resolution.skipped_batches,
        complete: collection.complete && resolution.skipped_batches == 0,
        stats,
    })
}
