//! GitHub contents API client

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

use crate::config::CatalogConfig;
use crate::error::CatalogError;
use crate::log_debug;
use crate::utils::contents_url;

use super::{ContentStore, FileContent, RemoteEntry};

const MODULE: &str = "remote::github";

const GITHUB_JSON: &str = "application/vnd.github.v3+json";

/// [`ContentStore`] backed by `GET {base}/contents/...`
#[derive(Debug, Clone)]
pub struct GithubContents {
    client: Client,
    base_url: String,
}

impl GithubContents {
    pub fn new(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_JSON));

        if let Some(ref token) = config.access_token {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token.trim()))
                .map_err(|_| CatalogError::Config("access token is not a valid header value".to_string()))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| CatalogError::Config(format!("Failed to create HTTP client: {}", e)))?;

        contents_url(&config.contents_base_url, "")?;

        Ok(Self {
            client,
            base_url: config.contents_base_url.clone(),
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, CatalogError> {
        let url = contents_url(&self.base_url, path)?;
        log_debug!(MODULE, "GET {}", url);

        let response = self
            .client
            .get(url.as_str())
            .send()
            .await
            .map_err(|e| CatalogError::Network {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        let response = check_status(response, url.as_str())?;

        response
            .json::<T>()
            .await
            .map_err(|e| CatalogError::parse(url.as_str(), e))
    }
}

fn check_status(response: Response, url: &str) -> Result<Response, CatalogError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        log_debug!(MODULE, "{} answered {}", url, status);
        Err(CatalogError::from_status(status.as_u16(), url))
    }
}

#[async_trait]
impl ContentStore for GithubContents {
    async fn list_root(&self) -> Result<Vec<RemoteEntry>, CatalogError> {
        self.get_json("").await
    }

    async fn read_file(&self, path: &str) -> Result<FileContent, CatalogError> {
        self.get_json(path).await
    }
}
