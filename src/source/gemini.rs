use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::GeneratorConfig;
use crate::models::{Difficulty, Question, Topic};

use super::prompt::{build_prompt, response_schema};
use super::validate::parse_questions;
use super::{QuestionSource, QuizGenerationError};

const JSON_MIME: &str = "application/json";

/// Question source backed by the Gemini `generateContent` endpoint.
#[derive(Clone)]
pub struct GeminiSource {
    client: Client,
    config: GeneratorConfig,
}

impl GeminiSource {
    pub fn new(config: GeneratorConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    async fn generate(&self, prompt: String) -> Result<String, QuizGenerationError> {
        let payload = GenerateRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: JSON_MIME,
                response_schema: response_schema(),
            },
        };

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.config.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| QuizGenerationError::failed(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_failure(status, &body));
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| QuizGenerationError::failed(format!("unreadable response: {e}")))?;

        extract_text(body)
            .ok_or_else(|| QuizGenerationError::failed("no response received from the model"))
    }
}

#[async_trait]
impl QuestionSource for GeminiSource {
    async fn fetch_questions(
        &self,
        topic: Topic,
        difficulty: Difficulty,
        count: usize,
    ) -> Result<Vec<Question>, QuizGenerationError> {
        tracing::info!(%topic, %difficulty, count, model = %self.config.model, "Requesting questions");

        let result = match self.generate(build_prompt(topic, difficulty, count)).await {
            Ok(text) => parse_questions(&text, count).map_err(QuizGenerationError::from),
            Err(e) => Err(e),
        };

        match &result {
            Ok(questions) => tracing::info!(received = questions.len(), "Questions generated"),
            Err(QuizGenerationError::RateLimited) => tracing::warn!("Generator rate limited the request"),
            Err(QuizGenerationError::GenerationFailed { reason }) => {
                tracing::error!(%reason, "Question generation failed")
            }
        }

        result
    }
}

/// Map a non-success response onto the two user-facing failure kinds.
fn classify_failure(status: StatusCode, body: &str) -> QuizGenerationError {
    if status == StatusCode::TOO_MANY_REQUESTS || body.contains("RESOURCE_EXHAUSTED") {
        QuizGenerationError::RateLimited
    } else {
        QuizGenerationError::failed(format!("generator returned status {status}"))
    }
}

/// Concatenated text of the first candidate, if there is any.
fn extract_text(body: GenerateResponse) -> Option<String> {
    let content = body.candidates.into_iter().next()?.content?;
    let text: String = content.parts.into_iter().filter_map(|p| p.text).collect();
    if text.trim().is_empty() { None } else { Some(text) }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    role: &'static str,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
    response_schema: Value,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}
