use crate::error::Error;
use async_trait::async_trait;
use getset::CopyGetters;
use serde_json::Value;
use surf::Client;
use utils::surf_logging::SurfLogging;

/// Undecoded response handed back by a [`Fetch`] implementation.
///
/// Carries the status line and raw body so the cache decides success and
/// decoding on its own.
#[derive(Clone, Debug, CopyGetters)]
pub struct RawResponse {
    /// HTTP status code.
    #[get_copy = "pub"]
    status: u16,
    body: Vec<u8>,
}

impl RawResponse {
    pub fn new(status: u16, body: Vec<u8>) -> Self {
        Self { status, body }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn decode(&self) -> Result<Value, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

/// Network capability injected into the cache.
#[async_trait]
pub trait Fetch: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<RawResponse, Error>;
}

/// Production fetcher backed by a surf client.
pub struct SurfFetcher {
    http: Client,
}

impl SurfFetcher {
    pub fn new() -> Self {
        Self {
            http: Client::new().with(SurfLogging),
        }
    }
}

impl Default for SurfFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Fetch for SurfFetcher {
    async fn fetch(&self, url: &str) -> Result<RawResponse, Error> {
        let mut response = self
            .http
            .get(url)
            .await
            .map_err(|source| Error::network(url, source))?;
        let status: u16 = response.status().into();
        let body = response
            .body_bytes()
            .await
            .map_err(|source| Error::network(url, source))?;

        Ok(RawResponse::new(status, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn success_covers_the_2xx_range() {
        assert!(RawResponse::new(200, Vec::new()).is_success());
        assert!(RawResponse::new(204, Vec::new()).is_success());
        assert!(!RawResponse::new(199, Vec::new()).is_success());
        assert!(!RawResponse::new(301, Vec::new()).is_success());
        assert!(!RawResponse::new(404, Vec::new()).is_success());
    }

    #[test]
    fn bodies_decode_to_json() {
        let response = RawResponse::new(200, b"[{\"id\":1}]".to_vec());
        assert_eq!(response.decode().unwrap(), json!([{"id": 1}]));

        let garbage = RawResponse::new(200, b"<html>".to_vec());
        assert!(garbage.decode().is_err());
    }
}
