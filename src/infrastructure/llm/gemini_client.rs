use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::application::ports::{CompletionClient, CompletionError};
use crate::application::services::{RetryError, RetryPolicy};
use crate::domain::{CompletionRequest, CompletionResult, Source, StopReason};
use crate::infrastructure::observability::sanitize_prompt;

use super::gemini_types::{
    Content, ErrorEnvelope, GenerateContentRequest, GenerateContentResponse, Tool,
};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-preview-05-20";
pub const NO_RESPONSE_MESSAGE: &str = "Sorry, I couldn't generate a response. Please try again.";

/// One raw `generateContent` exchange. Swapped out in tests to drive the retry
/// loop without a network.
#[async_trait]
pub trait GeminiTransport: Send + Sync {
    async fn generate_content(
        &self,
        api_key: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, CompletionError>;
}

pub struct HttpGeminiTransport {
    client: Client,
    endpoint: String,
}

impl HttpGeminiTransport {
    pub fn new(base_url: &str, model: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: format!(
                "{}/models/{}:generateContent",
                base_url.trim_end_matches('/'),
                model
            ),
        })
    }
}

#[async_trait]
impl GeminiTransport for HttpGeminiTransport {
    async fn generate_content(
        &self,
        api_key: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, CompletionError> {
        let response = self
            .client
            .post(&self.endpoint)
            .query(&[("key", api_key)])
            .json(request)
            .send()
            .await
            .map_err(|e| CompletionError::Network(e.without_url().to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| CompletionError::Network(e.without_url().to_string()))?;

        if !status.is_success() {
            let message = serde_json::from_slice::<ErrorEnvelope>(&body)
                .ok()
                .and_then(|envelope| envelope.error)
                .and_then(|detail| detail.message)
                .unwrap_or_else(|| "Unknown error".to_string());
            tracing::error!(status = status.as_u16(), %message, "Gemini API error response");
            return Err(CompletionError::Http {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_slice(&body).map_err(|e| {
            tracing::error!(
                raw_response = %String::from_utf8_lossy(&body),
                "Failed to parse Gemini JSON"
            );
            CompletionError::InvalidResponse(e.to_string())
        })
    }
}

pub struct GeminiClient<T: GeminiTransport = HttpGeminiTransport> {
    transport: T,
    api_key: String,
    default_system_instruction: String,
    retry_policy: RetryPolicy,
}

impl GeminiClient<HttpGeminiTransport> {
    pub fn new(
        api_key: String,
        model: &str,
        base_url: &str,
        timeout: Duration,
        default_system_instruction: String,
        retry_policy: RetryPolicy,
    ) -> Result<Self, reqwest::Error> {
        let transport = HttpGeminiTransport::new(base_url, model, timeout)?;
        Ok(Self::with_transport(
            transport,
            api_key,
            default_system_instruction,
            retry_policy,
        ))
    }
}

impl<T: GeminiTransport> GeminiClient<T> {
    pub fn with_transport(
        transport: T,
        api_key: String,
        default_system_instruction: String,
        retry_policy: RetryPolicy,
    ) -> Self {
        Self {
            transport,
            api_key,
            default_system_instruction,
            retry_policy,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }
}

#[async_trait]
impl<T: GeminiTransport> CompletionClient for GeminiClient<T> {
    #[tracing::instrument(
        skip(self, request),
        fields(grounding = request.grounding_enabled())
    )]
    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResult, CompletionError> {
        if self.api_key.trim().is_empty() {
            tracing::error!("Gemini API key is not configured");
            return Err(CompletionError::MissingCredential);
        }

        tracing::debug!(
            prompt = %sanitize_prompt(request.prompt()),
            "Sending completion request"
        );

        let body = build_generate_request(request, &self.default_system_instruction);

        let response = self
            .retry_policy
            .run(
                |attempt| {
                    tracing::debug!(attempt, "Calling Gemini generateContent");
                    self.transport.generate_content(&self.api_key, &body)
                },
                CompletionError::is_retryable,
            )
            .await
            .map_err(|e| match e {
                RetryError::Permanent(e) => e,
                RetryError::Exhausted { attempts, last } => CompletionError::RetriesExhausted {
                    attempts,
                    last: Box::new(last),
                },
            })?;

        let result = parse_generate_response(response);
        tracing::info!(
            sources = result.sources.len(),
            stop_reason = %result.stop_reason,
            "Gemini completion received"
        );
        Ok(result)
    }
}

/// Builds the wire request. The search tool is only offered when the prompt
/// carries no document context.
pub fn build_generate_request(
    request: &CompletionRequest,
    default_system_instruction: &str,
) -> GenerateContentRequest {
    let instruction = match request.system_instruction().trim() {
        "" => default_system_instruction,
        custom => custom,
    };

    let tools = if request.grounding_enabled() {
        vec![Tool::google_search()]
    } else {
        Vec::new()
    };

    GenerateContentRequest {
        contents: vec![Content::text(request.prompt())],
        tools,
        system_instruction: Content::text(instruction),
    }
}

pub fn parse_generate_response(response: GenerateContentResponse) -> CompletionResult {
    let Some(candidate) = response.candidates.into_iter().next() else {
        return CompletionResult::text(NO_RESPONSE_MESSAGE);
    };

    let stop_reason = StopReason::parse(candidate.finish_reason.as_deref());
    if !stop_reason.is_normal() {
        let answer = format!(
            "My response was stopped for the following reason: {}. Please check your prompt or the content safety settings if applicable.",
            stop_reason
        );
        return CompletionResult::new(answer, Vec::new(), stop_reason);
    }

    let text = candidate
        .content
        .and_then(|content| content.parts.into_iter().next())
        .and_then(|part| part.text)
        .filter(|text| !text.is_empty());

    let Some(text) = text else {
        return CompletionResult::new(NO_RESPONSE_MESSAGE.to_string(), Vec::new(), stop_reason);
    };

    let sources = candidate
        .grounding_metadata
        .map(|metadata| {
            metadata
                .grounding_attributions
                .into_iter()
                .filter_map(|attribution| attribution.web)
                .filter_map(|web| Source::new(web.uri?, web.title?))
                .collect()
        })
        .unwrap_or_default();

    CompletionResult::new(text, sources, stop_reason)
}
