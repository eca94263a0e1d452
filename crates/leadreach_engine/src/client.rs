use std::time::Duration;

use futures_util::StreamExt;
use leadreach_core::{
    GeneratedMessage, HealthReport, Lead, LeadId, OutreachConfig, SearchOutcome, SearchQuery,
    SingleMessage,
};
use leadreach_logging::{reach_debug, reach_info, reach_warn};
use reqwest::header::ACCEPT;
use reqwest::{RequestBuilder, Response};
use url::Url;

use crate::wire::{self, BulkGenerateBody, LeadBody, OutreachRequestBody, SearchRequestBody};
use crate::ClientError;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

const HEALTH_PATH: &str = "/api/health";
const SEARCH_PATH: &str = "/api/search-leads";
const EXPORT_PATH: &str = "/api/export-leads";
const GENERATE_PATH: &str = "/api/outreach/generate";
const GENERATE_BULK_PATH: &str = "/api/outreach/generate-bulk";

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub base_url: Url,
    pub connect_timeout: Duration,
    /// Generation calls wait on an LLM, so this is generous.
    pub request_timeout: Duration,
    pub max_export_bytes: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base url is valid"),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(60),
            max_export_bytes: 10 * 1024 * 1024,
        }
    }
}

impl ClientSettings {
    pub fn with_base_url(base_url: &str) -> Result<Self, ClientError> {
        let base_url = Url::parse(base_url)
            .map_err(|err| ClientError::Validation(format!("invalid api url {base_url:?}: {err}")))?;
        Ok(Self {
            base_url,
            ..Self::default()
        })
    }
}

/// Typed boundary to the lead/outreach backend.
#[async_trait::async_trait]
pub trait GenerationClient: Send + Sync {
    async fn health(&self) -> Result<HealthReport, ClientError>;

    async fn search(&self, query: &SearchQuery) -> Result<SearchOutcome, ClientError>;

    /// Returns the CSV bytes for `leads`.
    async fn export(&self, leads: &[Lead]) -> Result<Vec<u8>, ClientError>;

    async fn generate_single(
        &self,
        config: &OutreachConfig,
        lead: &Lead,
    ) -> Result<SingleMessage, ClientError>;

    async fn generate_bulk(
        &self,
        lead_ids: &[LeadId],
        config: &OutreachConfig,
    ) -> Result<Vec<GeneratedMessage>, ClientError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestGenerationClient {
    settings: ClientSettings,
    client: reqwest::Client,
}

impl ReqwestGenerationClient {
    pub fn new(settings: ClientSettings) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(ClientError::transport)?;
        Ok(Self { settings, client })
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}{}",
            self.settings.base_url.as_str().trim_end_matches('/'),
            path
        )
    }

    /// Sends the request and returns the response if its status is 2xx.
    async fn send(&self, path: &str, request: RequestBuilder) -> Result<Response, ClientError> {
        let response = request.send().await.map_err(|err| {
            reach_warn!("{} unreachable: {}", path, err);
            ClientError::transport(err)
        })?;
        let status = response.status();
        reach_debug!("{} -> {}", path, status);
        if status.is_success() {
            return Ok(response);
        }
        let raw_body = response.text().await.unwrap_or_default();
        let message = wire::server_message(&raw_body, &status.to_string());
        reach_warn!("{} failed with {}: {}", path, status, message);
        Err(ClientError::Server {
            status: status.as_u16(),
            message,
            raw_body,
        })
    }

    async fn send_for_text(&self, path: &str, request: RequestBuilder) -> Result<String, ClientError> {
        let response = self.send(path, request).await?;
        response.text().await.map_err(ClientError::transport)
    }
}

#[async_trait::async_trait]
impl GenerationClient for ReqwestGenerationClient {
    async fn health(&self) -> Result<HealthReport, ClientError> {
        let request = self
            .client
            .get(self.endpoint(HEALTH_PATH))
            .header(ACCEPT, "application/json");
        let raw = self.send_for_text(HEALTH_PATH, request).await?;
        wire::parse_health(&raw)
    }

    async fn search(&self, query: &SearchQuery) -> Result<SearchOutcome, ClientError> {
        if !query.is_complete() {
            return Err(ClientError::Validation(
                "Industry and location are required".into(),
            ));
        }
        let body = SearchRequestBody {
            industry: query.industry.trim(),
            location: query.location.trim(),
        };
        let request = self
            .client
            .post(self.endpoint(SEARCH_PATH))
            .header(ACCEPT, "application/json")
            .json(&body);
        let raw = self.send_for_text(SEARCH_PATH, request).await?;
        let outcome = wire::parse_search(&raw)?;
        reach_info!(
            "search industry={:?} location={:?} returned {} leads (total {})",
            body.industry,
            body.location,
            outcome.leads.len(),
            outcome.total
        );
        Ok(outcome)
    }

    async fn export(&self, leads: &[Lead]) -> Result<Vec<u8>, ClientError> {
        if leads.is_empty() {
            return Err(ClientError::Validation("No Leads Provided for Export".into()));
        }
        let body: Vec<LeadBody<'_>> = leads.iter().map(LeadBody::from).collect();
        let request = self
            .client
            .post(self.endpoint(EXPORT_PATH))
            .header(ACCEPT, "text/csv, application/octet-stream")
            .json(&body);
        let response = self.send(EXPORT_PATH, request).await?;

        let max_bytes = self.settings.max_export_bytes;
        if response.content_length().is_some_and(|len| len > max_bytes) {
            return Err(ClientError::TooLarge { max_bytes });
        }
        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(ClientError::transport)?;
            if bytes.len() as u64 + chunk.len() as u64 > max_bytes {
                return Err(ClientError::TooLarge { max_bytes });
            }
            bytes.extend_from_slice(&chunk);
        }
        if bytes.is_empty() {
            return Err(ClientError::EmptyExport);
        }
        reach_info!("exported {} leads ({} bytes)", leads.len(), bytes.len());
        Ok(bytes)
    }

    async fn generate_single(
        &self,
        config: &OutreachConfig,
        lead: &Lead,
    ) -> Result<SingleMessage, ClientError> {
        let body = wire::SingleGenerateBody {
            request: OutreachRequestBody::try_from(config)?,
            lead: LeadBody::from(lead),
        };
        let request = self
            .client
            .post(self.endpoint(GENERATE_PATH))
            .header(ACCEPT, "application/json")
            .json(&body);
        let raw = self.send_for_text(GENERATE_PATH, request).await?;
        let message = wire::parse_single(&raw)?;
        if message == SingleMessage::NoContent {
            reach_warn!("generation for lead {} returned no content", lead.id);
        }
        Ok(message)
    }

    async fn generate_bulk(
        &self,
        lead_ids: &[LeadId],
        config: &OutreachConfig,
    ) -> Result<Vec<GeneratedMessage>, ClientError> {
        if lead_ids.is_empty() {
            return Err(ClientError::Validation("Select at least one lead".into()));
        }
        let body = BulkGenerateBody {
            lead_ids,
            outreach_request: OutreachRequestBody::try_from(config)?,
        };
        let request = self
            .client
            .post(self.endpoint(GENERATE_BULK_PATH))
            .header(ACCEPT, "application/json")
            .json(&body);
        let raw = self.send_for_text(GENERATE_BULK_PATH, request).await?;
        let messages = wire::parse_bulk(&raw)?;
        reach_info!(
            "bulk generation for {} leads returned {} messages",
            lead_ids.len(),
            messages.len()
        );
        Ok(messages)
    }
}
