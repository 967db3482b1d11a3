//! Mock transport helpers.

pub use coze_chat::adapters::mock::{MockHttpClient, MockResponse, RecordedRequest};
pub use coze_chat::traits::{Headers, HttpClient, HttpError, Response};

use coze_chat::client::ChatClient;

use super::test_config;

pub const MOCK_BASE: &str = "https://api.mock";

/// A chat client over a fresh mock transport. Both handles share state.
pub fn mock_client() -> (ChatClient<MockHttpClient>, MockHttpClient) {
    let http = MockHttpClient::new();
    let client = ChatClient::with_http_client(test_config(MOCK_BASE), http.clone());
    (client, http)
}
