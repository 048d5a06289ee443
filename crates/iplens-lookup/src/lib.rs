pub mod client;
pub mod error;
pub mod normalize;
pub mod session;
pub mod types;

pub use client::IpLookupClient;
pub use error::{LookupError, LookupErrorKind};
pub use normalize::normalize_response;
pub use session::{
    resolve, CacheError, CachedLookup, FileStore, LookupSource, MemoryStore, Resolved,
    SessionStore, DEFAULT_SESSION_TTL,
};
pub use types::ProviderResponse;
