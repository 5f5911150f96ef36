//! VK API client and the likes → profiles → histogram pipeline.

pub mod client;
pub mod collector;
pub mod error;
pub mod pipeline;
pub mod resolver;
pub mod types;

pub use client::VkClient;
pub use collector::{
    collect_likes, collect_likes_with_limit, like_pages, Collection, Page, MAX_PAGES,
};
pub use error::VkError;
pub use pipeline::{run_post_stats, PipelineReport};
pub use resolver::{resolve_profiles, Resolution};
