//! reqwest-backed page fetcher.
//!
//! Invite pages only render their preview metadata for browsers, so requests
//! go out with a desktop User-Agent and browser-like Accept headers.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};
use std::time::Duration;
use tracing::debug;

use super::{BasePageFetcher, FetchedPage};

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

pub struct HttpPageFetcher {
    client: reqwest::Client,
}

impl HttpPageFetcher {
    pub fn new() -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            ),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.5"));

        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client })
    }
}

#[async_trait]
impl BasePageFetcher for HttpPageFetcher {
    async fn fetch(&self, url: &str, timeout: Duration) -> Result<FetchedPage> {
        debug!(url = %url, timeout_secs = timeout.as_secs(), "Fetching page");

        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .with_context(|| format!("HTTP request to {} failed", url))?;

        let status = response.status().as_u16();
        let final_url = response.url().to_string();
        let body = response
            .text()
            .await
            .context("Failed to read response body")?;

        Ok(FetchedPage {
            url: final_url,
            status,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_client() {
        assert!(HttpPageFetcher::new().is_ok());
    }

    #[test]
    fn success_covers_2xx_only() {
        let page = |status| FetchedPage {
            url: String::new(),
            status,
            body: String::new(),
        };
        assert!(page(200).is_success());
        assert!(page(204).is_success());
        assert!(!page(301).is_success());
        assert!(!page(404).is_success());
    }
}
