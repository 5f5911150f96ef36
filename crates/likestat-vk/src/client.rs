//! HTTP client for the VK REST API.
//!
//! Wraps `reqwest` with VK-specific envelope handling: every method returns
//! either `{"response": ...}` or `{"error": {...}}`, and the latter surfaces
//! as [`VkError::Api`]. Transport failures surface as [`VkError::Http`].

use std::time::Duration;

use likestat_core::app_config::{AppConfig, DEFAULT_API_BASE_URL, VK_MAX_PAGE_SIZE};
use likestat_core::{ActorId, EngagementEvent, ProfileRecord};
use reqwest::{Client, Url};

use crate::error::VkError;
use crate::types::{profile_from_value, ApiErrorBody, LikesListResponse};

/// Profile fields requested from `users.get`.
const PROFILE_FIELDS: &str = "sex,bdate";

/// Client for the VK REST API.
///
/// Use [`VkClient::new`] for production or [`VkClient::with_base_url`] to
/// point at a mock server in tests.
pub struct VkClient {
    client: Client,
    access_token: String,
    api_version: String,
    base_url: Url,
}

impl VkClient {
    /// Creates a new client pointed at the production VK API.
    ///
    /// # Errors
    ///
    /// Returns [`VkError::Http`] if the underlying `reqwest::Client` cannot
    /// be constructed.
    pub fn new(access_token: &str, api_version: &str, timeout_secs: u64) -> Result<Self, VkError> {
        Self::with_base_url(access_token, api_version, timeout_secs, DEFAULT_API_BASE_URL)
    }

    /// Creates a client from run configuration.
    ///
    /// # Errors
    ///
    /// Same as [`VkClient::with_base_url`].
    pub fn from_config(config: &AppConfig) -> Result<Self, VkError> {
        Self::with_base_url(
            &config.vk_token,
            &config.api_version,
            config.request_timeout_secs,
            &config.api_base_url,
        )
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`VkError::Http`] if the underlying `reqwest::Client` cannot be
    /// constructed, or [`VkError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn with_base_url(
        access_token: &str,
        api_version: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, VkError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("likestat/0.1 (post-demographics)")
            .build()?;

        // A trailing slash makes `Url::join` append the method name instead
        // of replacing the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| VkError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            access_token: access_token.to_owned(),
            api_version: api_version.to_owned(),
            base_url,
        })
    }

    /// Fetches one page of user ids who liked `event`, via `likes.getList`.
    ///
    /// # Errors
    ///
    /// - [`VkError::Api`] if VK returns an error envelope.
    /// - [`VkError::Http`] on network failure or non-2xx HTTP status.
    /// - [`VkError::MalformedResponse`] / [`VkError::Deserialize`] if the
    ///   body does not match the documented shape.
    pub async fn get_likes_page(
        &self,
        event: &EngagementEvent,
        count: usize,
        offset: usize,
    ) -> Result<LikesListResponse, VkError> {
        const METHOD: &str = "likes.getList";
        let url = self.build_url(
            METHOD,
            &[
                ("type", event.object_type.as_str()),
                ("owner_id", &event.owner_id.to_string()),
                ("item_id", &event.item_id.to_string()),
                ("count", &count.to_string()),
                ("offset", &offset.to_string()),
            ],
        )?;
        let response = self.call(METHOD, &url).await?;

        serde_json::from_value(response).map_err(|e| VkError::Deserialize {
            context: format!("{METHOD}(offset={offset})"),
            source: e,
        })
    }

    /// Resolves up to 1000 user ids to profile records via `users.get`.
    ///
    /// Ids VK does not return are simply absent from the result. An empty
    /// `ids` slice returns an empty list without touching the network.
    ///
    /// # Errors
    ///
    /// - [`VkError::BatchTooLarge`] if `ids` exceeds the `users.get` limit.
    /// - [`VkError::Api`] if VK returns an error envelope.
    /// - [`VkError::Http`] on network failure or non-2xx HTTP status.
    /// - [`VkError::MalformedResponse`] if `response` is missing or not a list.
    pub async fn get_users(&self, ids: &[ActorId]) -> Result<Vec<ProfileRecord>, VkError> {
        const METHOD: &str = "users.get";
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        if ids.len() > VK_MAX_PAGE_SIZE {
            return Err(VkError::BatchTooLarge {
                size: ids.len(),
                max: VK_MAX_PAGE_SIZE,
            });
        }

        let user_ids = ids
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",");
        let url = self.build_url(
            METHOD,
            &[("user_ids", &user_ids), ("fields", PROFILE_FIELDS)],
        )?;
        let response = self.call(METHOD, &url).await?;

        let entries = response
            .as_array()
            .ok_or_else(|| VkError::MalformedResponse {
                method: METHOD.to_owned(),
                reason: "`response` is not a list".to_owned(),
            })?;

        let records: Vec<ProfileRecord> = entries.iter().filter_map(profile_from_value).collect();
        if records.len() < entries.len() {
            tracing::debug!(
                skipped = entries.len() - records.len(),
                "ignored users.get entries that are not objects"
            );
        }
        Ok(records)
    }

    /// Builds the method URL with percent-encoded query parameters, followed
    /// by the access token and API version.
    fn build_url(&self, method: &str, extra: &[(&str, &str)]) -> Result<Url, VkError> {
        let mut url = self
            .base_url
            .join(method)
            .map_err(|e| VkError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;
        {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in extra {
                pairs.append_pair(k, v);
            }
            pairs.append_pair("access_token", &self.access_token);
            pairs.append_pair("v", &self.api_version);
        }
        Ok(url)
    }

    /// Sends a GET request and returns the `response` member of the envelope.
    ///
    /// Error contexts name the method only: the URL carries the token.
    async fn call(&self, method: &str, url: &Url) -> Result<serde_json::Value, VkError> {
        let response = self.client.get(url.clone()).send().await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;
        let mut body: serde_json::Value =
            serde_json::from_str(&body).map_err(|e| VkError::Deserialize {
                context: method.to_owned(),
                source: e,
            })?;

        Self::check_api_error(method, &body)?;

        body.get_mut("response")
            .map(serde_json::Value::take)
            .ok_or_else(|| VkError::MalformedResponse {
                method: method.to_owned(),
                reason: "missing `response` key".to_owned(),
            })
    }

    /// Returns [`VkError::Api`] if the body carries an `error` envelope.
    fn check_api_error(method: &str, body: &serde_json::Value) -> Result<(), VkError> {
        let Some(error) = body.get("error") else {
            return Ok(());
        };
        let parsed = serde_json::from_value::<ApiErrorBody>(error.clone()).ok();
        let code = parsed.as_ref().map_or(0, |e| e.error_code);
        let message = parsed
            .and_then(|e| e.error_msg)
            .unwrap_or_else(|| "unknown error".to_owned());
        Err(VkError::Api {
            method: method.to_owned(),
            code,
            message,
        })
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
