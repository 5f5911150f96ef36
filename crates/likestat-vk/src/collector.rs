//! Offset-paginated collection of the user ids behind a like counter.
//!
//! [`like_pages`] owns the fetch mechanics (offset cursor, cooldown, end on
//! the first empty page); [`collect_likes`] owns the termination policy
//! (what to do with errors, the page ceiling) and accumulates the ids.

use std::collections::HashSet;
use std::time::Duration;

use futures::stream::{self, Stream, StreamExt};
use likestat_core::app_config::VK_MAX_PAGE_SIZE;
use likestat_core::{ActorId, EngagementEvent};

use crate::client::VkClient;
use crate::error::VkError;

/// Upper bound on pages fetched in one collection. Guards against a remote
/// source that never returns an empty page.
pub const MAX_PAGES: usize = 10_000;

/// One non-empty page of `likes.getList`.
#[derive(Debug, Clone)]
pub struct Page {
    pub offset: usize,
    /// Total like count VK reported alongside this page.
    pub total: u64,
    pub ids: Vec<ActorId>,
}

/// Ids gathered by [`collect_likes`].
#[derive(Debug, Clone)]
pub struct Collection {
    pub ids: Vec<ActorId>,
    /// `false` when collection stopped before VK returned an empty page.
    pub complete: bool,
}

/// Lazily pages through `likes.getList` starting at `start_offset`.
///
/// `page_size` is clamped to `1..=1000`. The offset advances by `page_size`
/// after every page, regardless of how many ids the page held. The stream ends after the first empty page, or
/// right after yielding the first error. `inter_request_delay_ms` is slept
/// before every request except the first.
pub fn like_pages(
    client: &VkClient,
    event: EngagementEvent,
    page_size: usize,
    start_offset: usize,
    inter_request_delay_ms: u64,
) -> impl Stream<Item = Result<Page, VkError>> + '_ {
    let page_size = page_size.clamp(1, VK_MAX_PAGE_SIZE);
    stream::unfold(Some(start_offset), move |cursor| async move {
        let offset = cursor?;

        if offset != start_offset && inter_request_delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(inter_request_delay_ms)).await;
        }

        match client.get_likes_page(&event, page_size, offset).await {
            Ok(page) if page.items.is_empty() => None,
            Ok(page) => {
                let next = offset + page_size;
                Some((
                    Ok(Page {
                        offset,
                        total: page.count,
                        ids: page.items,
                    }),
                    Some(next),
                ))
            }
            Err(e) => Some((Err(e), None)),
        }
    })
}

/// Collects every user id that liked `event`.
///
/// Best effort: an application-level failure (VK error envelope, malformed
/// body) stops the loop and returns what was gathered so far with
/// `complete == false`. Ids are not de-duplicated; duplicates caused by
/// unstable pagination are only reported.
///
/// # Errors
///
/// Returns [`VkError::Http`] when VK cannot be reached.
pub async fn collect_likes(
    client: &VkClient,
    event: EngagementEvent,
    page_size: usize,
    inter_request_delay_ms: u64,
) -> Result<Collection, VkError> {
    collect_likes_with_limit(client, event, page_size, inter_request_delay_ms, MAX_PAGES).await
}

/// [`collect_likes`] with an explicit page ceiling instead of [`MAX_PAGES`].
///
/// Reaching `max_pages` non-empty pages stops the loop with
/// `complete == false`.
///
/// # Errors
///
/// Returns [`VkError::Http`] when VK cannot be reached.
pub async fn collect_likes_with_limit(
    client: &VkClient,
    event: EngagementEvent,
    page_size: usize,
    inter_request_delay_ms: u64,
    max_pages: usize,
) -> Result<Collection, VkError> {
    let page_size = page_size.clamp(1, VK_MAX_PAGE_SIZE);
    let pages = like_pages(client, event, page_size, 0, inter_request_delay_ms);
    futures::pin_mut!(pages);

    let mut collection = Collection {
        ids: Vec::new(),
        complete: true,
    };
    let mut pages_seen = 0usize;

    while let Some(page) = pages.next().await {
        match page {
            Ok(page) => {
                pages_seen += 1;
                tracing::debug!(
                    %event,
                    offset = page.offset,
                    received = page.ids.len(),
                    total = page.total,
                    "fetched likes page"
                );
                collection.ids.extend(page.ids);

                if pages_seen >= max_pages {
                    tracing::warn!(
                        %event,
                        max_pages,
                        collected = collection.ids.len(),
                        "page limit reached; likes list may be incomplete"
                    );
                    collection.complete = false;
                    break;
                }
            }
            Err(e) if e.is_transport() => return Err(e),
            Err(e) => {
                tracing::warn!(
                    %event,
                    offset = pages_seen * page_size,
                    collected = collection.ids.len(),
                    error = %e,
                    "likes collection stopped early; result may be incomplete"
                );
                collection.complete = false;
                break;
            }
        }
    }

    let duplicates = count_duplicates(&collection.ids);
    if duplicates > 0 {
        tracing::warn!(
            %event,
            duplicates,
            "likes pagination returned repeated ids; they are kept as-is"
        );
    }

    tracing::info!(
        %event,
        collected = collection.ids.len(),
        complete = collection.complete,
        "likes collection finished"
    );

    Ok(collection)
}

fn count_duplicates(ids: &[ActorId]) -> usize {
    let mut seen = HashSet::with_capacity(ids.len());
    ids.iter().filter(|id| !seen.insert(**id)).count()
}
