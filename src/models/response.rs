use serde::Deserialize;

/// Envelope wrapping every buffered API response: `{"code", "msg", "data"}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse<T> {
    /// 0 on success
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub msg: String,
    pub data: Option<T>,
    #[serde(default)]
    pub detail: Option<ResponseDetail>,
}

/// Server-side request details, useful when reporting issues.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResponseDetail {
    #[serde(default)]
    pub logid: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn is_success(&self) -> bool {
        self.code == 0
    }

    pub fn logid(&self) -> Option<&str> {
        self.detail.as_ref().and_then(|d| d.logid.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Chat, ChatStatus};

    #[test]
    fn test_success_envelope() {
        let body = r#"{"code":0,"msg":"","data":{"id":"c1","conversation_id":"v1","bot_id":"b1","status":"in_progress"},"detail":{"logid":"20240601abc"}}"#;
        let response: ApiResponse<Chat> = serde_json::from_str(body).unwrap();

        assert!(response.is_success());
        assert_eq!(response.logid(), Some("20240601abc"));
        assert_eq!(response.data.unwrap().status, ChatStatus::InProgress);
    }

    #[test]
    fn test_error_envelope_without_data() {
        let body = r#"{"code":4100,"msg":"authentication is invalid"}"#;
        let response: ApiResponse<Chat> = serde_json::from_str(body).unwrap();

        assert!(!response.is_success());
        assert_eq!(response.msg, "authentication is invalid");
        assert!(response.data.is_none());
        assert!(response.logid().is_none());
    }
}
