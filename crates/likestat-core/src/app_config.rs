use std::path::PathBuf;

/// Largest `count` accepted by `likes.getList` and largest `user_ids` list
/// accepted by `users.get`.
pub const VK_MAX_PAGE_SIZE: usize = 1000;

pub const DEFAULT_API_BASE_URL: &str = "https://api.vk.com/method/";
pub const DEFAULT_API_VERSION: &str = "5.131";

/// Parameters for one analysis run.
#[derive(Clone)]
pub struct AppConfig {
    pub vk_token: String,
    pub api_version: String,
    pub api_base_url: String,
    pub owner_id: i64,
    pub post_id: u64,
    pub page_size: usize,
    pub batch_size: usize,
    pub request_timeout_secs: u64,
    /// Cooldown between consecutive `likes.getList` pages.
    pub inter_request_delay_ms: u64,
    pub max_concurrent_batches: usize,
    pub output_dir: PathBuf,
    pub log_level: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("vk_token", &"[redacted]")
            .field("api_version", &self.api_version)
            .field("api_base_url", &self.api_base_url)
            .field("owner_id", &self.owner_id)
            .field("post_id", &self.post_id)
            .field("page_size", &self.page_size)
            .field("batch_size", &self.batch_size)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("inter_request_delay_ms", &self.inter_request_delay_ms)
            .field("max_concurrent_batches", &self.max_concurrent_batches)
            .field("output_dir", &self.output_dir)
            .field("log_level", &self.log_level)
            .finish()
    }
}
