//! Market news digest built from a generative text API.
//!
//! The reply is treated as untrusted text: the first decodable JSON array of
//! news objects is recovered, duplicate headlines are dropped, `[N]` citation
//! markers are resolved against the citation list and then stripped.

pub mod builder;
pub mod citation;
pub mod client;
pub mod digest;
pub mod extract;

pub use builder::{NewsDigestBuilder, PromptConfig, DEFAULT_SYSTEM_PROMPT, DEFAULT_USER_PROMPT};
pub use citation::{first_marker, resolve_url, strip_markers};
pub use client::{ChatClientConfig, ChatCompletionClient};
pub use digest::{build_digest, DIGEST_SIZE};
pub use extract::{extract_items, Extraction, RawNewsItem};
