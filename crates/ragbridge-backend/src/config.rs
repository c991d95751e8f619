// Configuration for the RAG backend collaborator.
// Injected into the client at construction time rather than read from
// ambient process state at request time.

use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "http://localhost:3001";
pub const DEFAULT_TOP_K: u32 = 5;
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the RAG backend service.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Number of retrieval results requested per query.
    #[serde(default = "default_top_k")]
    pub top_k: u32,
    /// Connection establishment timeout. Never applied to response bodies,
    /// streaming responses stay open as long as the backend keeps sending.
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_top_k() -> u32 {
    DEFAULT_TOP_K
}

fn default_connect_timeout_secs() -> u64 {
    DEFAULT_CONNECT_TIMEOUT_SECS
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            top_k: default_top_k(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

impl BackendConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn with_top_k(mut self, top_k: u32) -> Self {
        self.top_k = top_k;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BackendConfig::default();
        assert_eq!(config.base_url, "http://localhost:3001");
        assert_eq!(config.top_k, 5);
    }

    #[test]
    fn test_deserialize_partial() {
        let config: BackendConfig =
            serde_json::from_str(r#"{"base_url":"http://rag:8000"}"#).unwrap();
        assert_eq!(config.base_url, "http://rag:8000");
        assert_eq!(config.top_k, 5);
    }

    #[test]
    fn test_builder_helpers() {
        let config = BackendConfig::new("http://rag:8000").with_top_k(10);
        assert_eq!(config.base_url, "http://rag:8000");
        assert_eq!(config.top_k, 10);
    }
}
