// Deduplicating request cache for the show metadata API.

pub mod cache;
mod error;
mod fetch;


pub use cache::{CacheConfig, CacheStats, RequestCache, SharedRequestCache};
pub use error::{Error, ErrorKind};
pub use fetch::{Fetch, RawResponse, SurfFetcher};
