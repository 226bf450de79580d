use crate::config::ClientConfig;
use crate::domain::operation::Operation;
use crate::domain::ports::Backend;
use crate::utils::error::{CpStarsError, Result};
use crate::utils::validation::Validate;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use url::Url;

/// Backend reached over HTTP/JSON.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: Url,
}

impl HttpBackend {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        config.validate()?;

        let base_url =
            Url::parse(&config.host_address).map_err(|e| CpStarsError::InvalidConfigValue {
                field: "host_address".to_string(),
                value: config.host_address.clone(),
                reason: e.to_string(),
            })?;

        let mut builder = Client::builder().user_agent(config.user_agent.clone());
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Builds the request URL, keeping any path prefix of the host address.
    pub fn url_for(&self, operation: &Operation) -> Result<Url> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|_| CpStarsError::Config {
                message: format!("host address cannot be a base URL: {}", self.base_url),
            })?;
            segments.pop_if_empty();
            for segment in operation.path_segments() {
                segments.push(&segment);
            }
        }

        let query = operation.query();
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }

        Ok(url)
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn invoke(&self, operation: &Operation) -> Result<serde_json::Value> {
        let url = self.url_for(operation)?;
        tracing::debug!("📡 {}: GET {}", operation.name(), url);

        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("📡 {}: response status {}", operation.name(), status);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(error_for_status(operation, status, body));
        }

        let bytes = response.bytes().await?;
        if bytes.is_empty() {
            return Ok(serde_json::Value::Null);
        }

        serde_json::from_slice(&bytes).map_err(|source| CpStarsError::Decode {
            operation: operation.name().to_string(),
            source,
        })
    }
}

fn error_for_status(operation: &Operation, status: StatusCode, body: String) -> CpStarsError {
    let detail = if body.trim().is_empty() {
        status.canonical_reason().unwrap_or("no details").to_string()
    } else {
        body
    };

    if status == StatusCode::NOT_FOUND {
        CpStarsError::not_found(format!("{}: {}", operation, detail))
    } else if status.is_server_error() {
        CpStarsError::Server {
            status: status.as_u16(),
            message: format!("{}: {}", operation.name(), detail),
        }
    } else {
        CpStarsError::validation(format!(
            "{} rejected with HTTP {}: {}",
            operation.name(),
            status.as_u16(),
            detail
        ))
    }
}
