//! VK API response types.
//!
//! Every VK method answers with either `{"response": ...}` or
//! `{"error": {"error_code": ..., "error_msg": ...}}`. The client strips the
//! envelope; the types here model what sits inside `response`.

use likestat_core::{ActorId, ProfileRecord};
use serde::Deserialize;

/// Inner payload of `likes.getList`.
#[derive(Debug, Deserialize)]
pub struct LikesListResponse {
    /// Total number of likes VK reports for the object.
    #[serde(default)]
    pub count: u64,
    /// Required: a page without `items` is malformed, not the end of the list.
    pub items: Vec<ActorId>,
}

/// Inner payload of the `error` envelope.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorBody {
    #[serde(default)]
    pub error_code: i64,
    #[serde(default)]
    pub error_msg: Option<String>,
}

/// Reads one `users.get` entry leniently.
///
/// Returns `None` when the entry is not a JSON object. Fields of the wrong
/// type are read as absent so that one odd profile cannot sink a batch.
pub(crate) fn profile_from_value(value: &serde_json::Value) -> Option<ProfileRecord> {
    let obj = value.as_object()?;
    Some(ProfileRecord {
        id: obj.get("id").and_then(serde_json::Value::as_u64),
        sex: obj.get("sex").and_then(serde_json::Value::as_i64),
        bdate: obj
            .get("bdate")
            .and_then(serde_json::Value::as_str)
            .map(str::to_owned),
    })
}
