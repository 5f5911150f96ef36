use thiserror::Error;

/// Errors returned by the VK API client.
#[derive(Debug, Error)]
pub enum VkError {
    /// Network or TLS failure, timeout, or non-2xx HTTP status.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// VK answered with an `{"error": {...}}` envelope.
    #[error("VK API error {code} in {method}: {message}")]
    Api {
        method: String,
        code: i64,
        message: String,
    },

    /// The body was JSON but not in the shape the method documents,
    /// e.g. the `response` key is missing.
    #[error("malformed {method} response: {reason}")]
    MalformedResponse { method: String, reason: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// A bulk request was asked for more ids than VK accepts in one call.
    #[error("batch of {size} ids exceeds the limit of {max}")]
    BatchTooLarge { size: usize, max: usize },

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

impl VkError {
    /// `true` when VK could not be reached at all, as opposed to VK
    /// answering with something unusable.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, VkError::Http(_))
    }
}
