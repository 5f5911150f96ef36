//! Batched resolution of user ids to profile records.

use futures::stream::{self, StreamExt};
use likestat_core::app_config::VK_MAX_PAGE_SIZE;
use likestat_core::{ActorId, ProfileRecord};

use crate::client::VkClient;
use crate::error::VkError;

/// Profiles gathered by [`resolve_profiles`].
#[derive(Debug, Clone)]
pub struct Resolution {
    /// Records in completion order; ids VK did not return are absent.
    pub records: Vec<ProfileRecord>,
    pub batches: usize,
    /// Batches dropped after an application-level failure.
    pub skipped_batches: usize,
}

/// Resolves `ids` through `users.get` in contiguous batches of at most
/// `batch_size` (clamped to 1..=1000).
///
/// Up to `max_concurrent` batches are in flight at once. A batch that fails
/// with an API error or a malformed body is logged and skipped; the other
/// batches are kept.
///
/// # Errors
///
/// Returns [`VkError::Http`] as soon as any batch fails to reach VK. Batches
/// still in flight are dropped.
pub async fn resolve_profiles(
    client: &VkClient,
    ids: &[ActorId],
    batch_size: usize,
    max_concurrent: usize,
) -> Result<Resolution, VkError> {
    let batch_size = batch_size.clamp(1, VK_MAX_PAGE_SIZE);
    let batch_count = ids.len().div_ceil(batch_size);

    let mut resolution = Resolution {
        records: Vec::with_capacity(ids.len()),
        batches: batch_count,
        skipped_batches: 0,
    };

    let mut outcomes = stream::iter(ids.chunks(batch_size).enumerate())
        .map(|(index, chunk)| async move { (index, chunk.len(), client.get_users(chunk).await) })
        .buffer_unordered(max_concurrent.max(1));

    while let Some((index, size, outcome)) = outcomes.next().await {
        match outcome {
            Ok(records) => {
                if records.len() < size {
                    tracing::debug!(
                        batch = index,
                        requested = size,
                        resolved = records.len(),
                        "some ids were not resolved"
                    );
                }
                resolution.records.extend(records);
            }
            Err(e) if e.is_transport() => return Err(e),
            Err(e) => {
                tracing::warn!(
                    batch = index,
                    batch_size = size,
                    error = %e,
                    "profile batch failed; skipping it"
                );
                resolution.skipped_batches += 1;
            }
        }
    }

    tracing::info!(
        requested = ids.len(),
        resolved = resolution.records.len(),
        batches = resolution.batches,
        skipped_batches = resolution.skipped_batches,
        "profile resolution finished"
    );

    Ok(resolution)
}
