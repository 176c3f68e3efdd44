//! Fragment fetching: how a session obtains the HTML for a resource.

use std::collections::HashMap;

use crate::Result;

/// A fetched fragment: status plus the raw body text
#[derive(Debug, Clone)]
pub struct FragmentResponse {
    pub status: u16,
    pub body: String,
}

impl FragmentResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Source of fragment bodies.
///
/// Implementations return `Ok` for any completed HTTP exchange, success or
/// not; the status check belongs to the content loader. Transport-level
/// failures surface as `Error::Network`.
pub trait FragmentFetcher: Send + Sync {
    fn fetch(&self, resource: &str) -> Result<FragmentResponse>;
}

/// In-memory fetcher serving a fixed resource map. Misses yield a 404
/// response rather than an error, matching a static file server.
#[derive(Debug, Default)]
pub struct StaticFetcher {
    resources: HashMap<String, String>,
}

impl StaticFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a resource body, builder-style.
    pub fn with(mut self, resource: &str, body: &str) -> Self {
        self.resources.insert(resource.to_string(), body.to_string());
        self
    }
}

impl FragmentFetcher for StaticFetcher {
    fn fetch(&self, resource: &str) -> Result<FragmentResponse> {
        match self.resources.get(resource) {
            Some(body) => Ok(FragmentResponse {
                status: 200,
                body: body.clone(),
            }),
            None => Ok(FragmentResponse {
                status: 404,
                body: "Not Found".to_string(),
            }),
        }
    }
}

/// HTTP fetcher resolving resources against a base URL
#[cfg(feature = "http")]
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
    base: url::Url,
    user_agent: String,
}

#[cfg(feature = "http")]
impl HttpFetcher {
    pub fn new(base_url: &str, config: &crate::AppConfig) -> Result<Self> {
        use crate::Error;
        use std::time::Duration;

        let base = url::Url::parse(base_url)
            .map_err(|e| Error::Config(format!("invalid base url {:?}: {}", base_url, e)))?;

        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base,
            user_agent: config.user_agent.clone(),
        })
    }
}

#[cfg(feature = "http")]
impl FragmentFetcher for HttpFetcher {
    fn fetch(&self, resource: &str) -> Result<FragmentResponse> {
        use crate::Error;

        let url = self
            .base
            .join(resource)
            .map_err(|e| Error::Network(format!("cannot resolve {:?}: {}", resource, e)))?;

        let res = self
            .client
            .get(url)
            .header("User-Agent", self.user_agent.clone())
            .send()
            .map_err(|e| Error::Network(format!("HTTP GET failed: {}", e)))?;

        let status = res.status().as_u16();
        let body = res
            .text()
            .map_err(|e| Error::Network(format!("Failed to read response body: {}", e)))?;

        Ok(FragmentResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_fetcher_serves_registered_bodies() {
        let fetcher = StaticFetcher::new().with("pages/home.html", "<h1>Home</h1>");
        let res = fetcher.fetch("pages/home.html").unwrap();
        assert!(res.is_success());
        assert_eq!(res.body, "<h1>Home</h1>");
    }

    #[test]
    fn static_fetcher_misses_are_404_not_errors() {
        let fetcher = StaticFetcher::new();
        let res = fetcher.fetch("pages/missing.html").unwrap();
        assert_eq!(res.status, 404);
        assert!(!res.is_success());
    }

    #[cfg(feature = "http")]
    #[test]
    fn http_fetcher_rejects_bad_base_url() {
        let config = crate::AppConfig::default();
        assert!(HttpFetcher::new("not a url", &config).is_err());
    }
}
