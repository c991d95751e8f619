pub mod client;
pub mod config;
pub mod error;
pub mod relay;
pub mod types;

pub use client::BackendClient;
pub use config::BackendConfig;
pub use error::{BackendError, Result};
pub use relay::{relay_response, relay_sse_to_text, Utf8ChunkDecoder};
pub use types::{IngestFormat, QueryFilters, QueryRequest};
