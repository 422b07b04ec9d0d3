use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, USER_AGENT};
use reqwest::{Client, Method};
use tracing::debug;
use url::Url;

use crate::auth::OAuthSigner;
use crate::config::{Config, Credentials, default_user_agent};
use crate::report::Granularity;
use crate::report::mappers::error_message;

const STATS_ENDPOINT: &str = "/reports/stats.json";
const POPULAR_FILES_ENDPOINT: &str = "/reports/popularfiles.json";

/// Logical API resources a report can be read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    StatsSummary,
    StatsBreakdown(Granularity),
    PopularFiles,
}

impl Endpoint {
    pub fn path(self) -> String {
        match self {
            Endpoint::StatsSummary => STATS_ENDPOINT.to_string(),
            Endpoint::StatsBreakdown(granularity) => format!("{STATS_ENDPOINT}/{granularity}"),
            Endpoint::PopularFiles => POPULAR_FILES_ENDPOINT.to_string(),
        }
    }
}

/// Source of raw report payloads.
#[async_trait]
pub trait ReportApi: Send + Sync {
    /// Issues one GET and returns the undecoded response body.
    async fn get(&self, endpoint: Endpoint, query: &[(&'static str, String)]) -> Result<String>;
}

#[derive(Debug, Clone)]
pub struct MaxCdnClient {
    http: Client,
    base_url: String,
    alias: String,
    signer: OAuthSigner,
    user_agent: String,
}

impl MaxCdnClient {
    pub fn new(config: &Config) -> Result<Self> {
        Self::with_base_url(config, config.api_base_url())
    }

    pub fn with_base_url(config: &Config, base_url: impl Into<String>) -> Result<Self> {
        let sanitized_base = base_url.into().trim_end_matches('/').to_string();
        if sanitized_base.is_empty() {
            return Err(anyhow!("Base URL cannot be empty"));
        }

        let http = Client::builder()
            .build()
            .context("Failed to build MaxCDN HTTP client")?;

        let Credentials {
            alias,
            token,
            secret,
        } = &config.credentials;
        Ok(Self {
            http,
            base_url: sanitized_base,
            alias: alias.clone(),
            signer: OAuthSigner::new(token, secret),
            user_agent: default_user_agent(),
        })
    }

    pub fn endpoint_url(&self, endpoint: Endpoint, query: &[(&'static str, String)]) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)
            .with_context(|| format!("Invalid API URL {}", self.base_url))?;
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| anyhow!("API URL {} cannot carry a path", self.base_url))?;
            // The alias is a single segment; reserved characters in it are escaped.
            segments
                .pop_if_empty()
                .push(&self.alias)
                .extend(endpoint.path().split('/').filter(|s| !s.is_empty()));
        }
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }
}

#[async_trait]
impl ReportApi for MaxCdnClient {
    async fn get(&self, endpoint: Endpoint, query: &[(&'static str, String)]) -> Result<String> {
        let url = self.endpoint_url(endpoint, query)?;
        let authorization = self.signer.authorization(&Method::GET, &url)?;

        debug!(method = "GET", url = %url, "sending request");

        let response = self
            .http
            .get(url.clone())
            .header(AUTHORIZATION, authorization)
            .header(USER_AGENT, &self.user_agent)
            .send()
            .await
            .with_context(|| format!("Failed to send request to {}", url.path()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .context("Failed to read MaxCDN response body")?;

        debug!(status = %status, bytes = body.len(), "received response");
        debug!(body = %body, "response body");

        if status.is_success() {
            return Ok(body);
        }

        let detail = error_message(&body).unwrap_or_else(|| {
            if body.trim().is_empty() {
                "no response body".to_string()
            } else {
                body.trim().to_string()
            }
        });
        Err(anyhow!("MaxCDN API error (status {status}): {detail}"))
    }
}
