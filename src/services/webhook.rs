use std::time::Duration;

use reqwest::{Client, StatusCode};
use tracing::{error, info};

use crate::{error::AppError, message::UpstreamPayload, services::reply::UpstreamReply};

pub const UPSTREAM_TIMEOUT: Duration = Duration::from_secs(30);

pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// HTTP client for the n8n webhook.
#[derive(Debug, Clone)]
pub struct WebhookClient {
    http: Client,
}

impl WebhookClient {
    pub fn new() -> Result<Self, reqwest::Error> {
        Self::with_timeout(UPSTREAM_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(BROWSER_USER_AGENT)
            .build()?;
        Ok(Self { http })
    }

    /// The workflow reads its input from a JSON body on a GET request, so
    /// that is what gets sent.
    pub async fn call(&self, url: &str, payload: &UpstreamPayload) -> Result<UpstreamReply, AppError> {
        info!("calling n8n url: {}", url);
        info!(
            text = %payload.text,
            sessionid = %payload.sessionid,
            lang = payload.lang.as_str(),
            "webhook params"
        );

        let response = self
            .http
            .get(url)
            .json(payload)
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("request to {} failed: {}", url, e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AppError::Upstream(format!("reading body from {} failed: {}", url, e)))?;

        if status != StatusCode::OK {
            error!("n8n error: {} - {}", status.as_u16(), body);
            return Err(AppError::Upstream(format!("status {}", status.as_u16())));
        }

        Ok(UpstreamReply::parse(&body))
    }
}
