//! Internal payload shapes that never leave the decoder.

use serde::Deserialize;

/// Body of an `error` control event: `{"code": 4000, "msg": "..."}`.
/// Both fields are optional since the event is reported even when the body
/// is not JSON at all.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorPayload {
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub msg: Option<String>,
}

impl ErrorPayload {
    /// Best-effort parse; anything unexpected yields `None`.
    pub(crate) fn parse(data: &str) -> Option<Self> {
        serde_json::from_str(data).ok()
    }
}
