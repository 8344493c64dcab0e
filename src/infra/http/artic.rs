use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use crate::config::AppConfig;
use crate::domain::entities::page::{Page, PageRequest};
use crate::infra::http::dto::{parse_page, ARTWORK_FIELDS};
use crate::usecase::ports::source::{ArtworkSource, FetchError};

/// Reads artwork pages from the Art Institute of Chicago API.
#[derive(Debug, Clone)]
pub struct ArticClient {
    http_client: Client,
    artworks_url: Url,
    timeout: Duration,
}

impl ArticClient {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let base = Url::parse(&config.api_base_url)
            .with_context(|| format!("invalid API base URL: {}", config.api_base_url))?;
        let artworks_url = base
            .join("artworks")
            .context("failed to build artworks endpoint URL")?;
        let http_client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            http_client,
            artworks_url,
            timeout: config.request_timeout,
        })
    }

    pub fn page_url(&self, request: PageRequest) -> Url {
        let mut url = self.artworks_url.clone();
        url.query_pairs_mut()
            .append_pair("page", &request.page_number.to_string())
            .append_pair("limit", &request.page_size.to_string())
            .append_pair("fields", ARTWORK_FIELDS);
        url
    }

    fn map_transport_error(&self, err: reqwest::Error) -> FetchError {
        if err.is_timeout() {
            FetchError::Timeout(self.timeout)
        } else if err.is_decode() {
            FetchError::Malformed(err.to_string())
        } else {
            FetchError::Network(err.to_string())
        }
    }
}

#[async_trait(?Send)]
impl ArtworkSource for ArticClient {
    async fn fetch_page(&self, request: PageRequest) -> Result<Page, FetchError> {
        let url = self.page_url(request);
        log::debug!("GET {url}");

        let response = self
            .http_client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|err| self.map_transport_error(err))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| self.map_transport_error(err))?;

        if !status.is_success() {
            log::warn!("page {} returned HTTP {status}", request.page_number);
            return Err(FetchError::Status {
                status: status.as_u16(),
                message: body.chars().take(200).collect(),
            });
        }

        parse_page(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::num::NonZeroU32;

    #[test]
    fn page_url_carries_page_limit_and_fields() {
        let client = ArticClient::new(&AppConfig::default()).expect("client should build");
        let request = PageRequest::new(3, NonZeroU32::new(12).expect("non-zero"));

        let url = client.page_url(request);
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

        assert_eq!(url.path(), "/api/v1/artworks");
        assert_eq!(pairs[0], ("page".to_string(), "3".to_string()));
        assert_eq!(pairs[1], ("limit".to_string(), "12".to_string()));
        assert_eq!(pairs[2], ("fields".to_string(), ARTWORK_FIELDS.to_string()));
    }
}
