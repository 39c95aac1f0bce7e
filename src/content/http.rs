//! reqwest backed content fetcher

use super::{ContentFetcher, ContentSourceError, Reachability};
use crate::config::ProbeConfig;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};

/// Fetches email content over HTTP without following redirects
#[derive(Clone)]
pub struct HttpContentFetcher {
    probe_client: Client,
    fetch_client: Client,
}

impl HttpContentFetcher {
    pub fn new(probe: &ProbeConfig) -> Result<Self, ContentSourceError> {
        let probe_client = Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .connect_timeout(probe.connect_timeout())
            .read_timeout(probe.read_timeout())
            .build()
            .map_err(|e| ContentSourceError::Transport(e.to_string()))?;

        // The full fetch runs without a timeout of its own
        let fetch_client = Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| ContentSourceError::Transport(e.to_string()))?;

        Ok(Self {
            probe_client,
            fetch_client,
        })
    }
}

#[async_trait]
impl ContentFetcher for HttpContentFetcher {
    async fn probe(&self, url: &str) -> Reachability {
        let response = self
            .probe_client
            .head(url)
            .send()
            .await;

        match response {
            Ok(resp) if resp.status() == StatusCode::OK => Reachability::Reachable,
            Ok(resp) => Reachability::unreachable(format!("status {}", resp.status().as_u16())),
            Err(e) => Reachability::unreachable(e.to_string()),
        }
    }

    async fn fetch(&self, url: &str) -> Result<String, ContentSourceError> {
        let parsed =
            reqwest::Url::parse(url).map_err(|e| ContentSourceError::InvalidUrl(e.to_string()))?;

        let response = self
            .fetch_client
            .get(parsed)
            .send()
            .await
            .map_err(|e| ContentSourceError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ContentSourceError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response
            .text()
            .await
            .map_err(|e| ContentSourceError::Transport(e.to_string()))
    }
}
