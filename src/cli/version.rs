//! Version and usage output.

/// Crate version, read from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const USAGE: &str = "\
Usage: coze-chat --bot-id <ID> --user-id <ID> [OPTIONS] <PROMPT>...

Options:
  --bot-id <ID>            Bot to talk to
  --user-id <ID>           Caller-defined user identifier
  --conversation-id <ID>   Continue an existing conversation
  --meta <KEY=VALUE>       Attach metadata to the chat (repeatable)
  --no-stream              Create the chat and poll until it finishes
  -V, --version            Print version
  -h, --help               Print this help

Environment:
  COZE_API_TOKEN           Personal access token (required)
  COZE_API_BASE            API base URL (default https://api.coze.com)
  COZE_TIMEOUT_SECS        Request timeout in seconds (default 600)
  RUST_LOG                 Log filter (default info)";

pub fn version_string() -> String {
    format!("coze-chat {}", VERSION)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_format() {
        let parts: Vec<&str> = VERSION.split('.').collect();
        assert!(parts.len() >= 2, "Version should have at least major.minor");
        assert!(version_string().starts_with("coze-chat "));
    }

    #[test]
    fn test_usage_mentions_required_flags() {
        assert!(USAGE.contains("--bot-id"));
        assert!(USAGE.contains("--user-id"));
        assert!(USAGE.contains("COZE_API_TOKEN"));
    }
}
