//! Content collaborator: where the per-level JSON content trees come from.
//!
//! `OpenAI` calls chat.completions and asks for a strict JSON object. Calls are
//! instrumented and log model name, latency and token usage (never contents or
//! the API key). `SeedContent` (see `seeds`) serves built-in trees offline.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument};

use crate::config::{LlmSettings, Prompts};
use crate::domain::{GenerationParams, Level};
use crate::error::LlmError;
use crate::styles;
use crate::util::{extract_json, fill_template, trunc_for_log};

/// Produces one raw content tree per (params, level).
#[async_trait]
pub trait ContentSource: Send + Sync {
  fn name(&self) -> &'static str;

  async fn generate(&self, params: &GenerationParams, level: Level) -> Result<serde_json::Value, LlmError>;
}

/// User prompt for one level, with every placeholder filled.
pub fn user_prompt(prompts: &Prompts, params: &GenerationParams, level: Level) -> String {
  let theme = styles::theme(params.theme);
  let objective = if params.objective.trim().is_empty() {
    "Choose a suitable objective for this topic"
  } else {
    params.objective.trim()
  };
  fill_template(
    prompts.template_for(params.worksheet_type),
    &[
      ("year_group", params.year_group.trim()),
      ("age_range", styles::age_range(&params.year_group)),
      ("topic", params.topic.trim()),
      ("objective", objective),
      ("theme_name", theme.name),
      ("theme_icon", theme.icon),
      ("level", level.key()),
    ],
  )
}

#[derive(Clone)]
pub struct OpenAI {
  pub client: reqwest::Client,
  pub api_key: String,
  pub base_url: String,
  pub model: String,
  pub settings: LlmSettings,
  pub prompts: Prompts,
}

impl OpenAI {
  /// Construct the client if we find OPENAI_API_KEY; otherwise return None.
  pub fn from_env(settings: LlmSettings, prompts: Prompts) -> Option<Self> {
    let api_key = std::env::var("OPENAI_API_KEY").ok().filter(|k| !k.trim().is_empty())?;
    let base_url = std::env::var("OPENAI_BASE_URL").unwrap_or_else(|_| "https://api.openai.com/v1".into());
    let model = std::env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4o-mini".into());

    let client = reqwest::Client::builder()
      .timeout(Duration::from_secs(settings.timeout_secs))
      .build()
      .ok()?;

    Some(Self { client, api_key, base_url, model, settings, prompts })
  }

  /// JSON-object chat completion; returns the first JSON object found in the reply.
  #[instrument(level = "info", skip(self, system, user), fields(model = %self.model))]
  async fn chat_json(&self, system: &str, user: &str, max_tokens: u32) -> Result<serde_json::Value, LlmError> {
    let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));
    let req = ChatCompletionRequest {
      model: self.model.clone(),
      messages: vec![
        ChatMessageReq { role: "system".into(), content: system.into() },
        ChatMessageReq { role: "user".into(), content: user.into() },
      ],
      temperature: self.settings.temperature,
      response_format: Some(ResponseFormat { r#type: "json_object".into() }),
      max_tokens: Some(max_tokens),
    };

    let res = self
      .client
      .post(&url)
      .header(USER_AGENT, "worksheet-backend/0.1")
      .header(CONTENT_TYPE, "application/json")
      .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
      .json(&req)
      .send()
      .await
      .map_err(|e| LlmError::Http(e.to_string()))?;

    if !res.status().is_success() {
      let status = res.status().as_u16();
      let body = res.text().await.unwrap_or_default();
      let message = extract_openai_error(&body).unwrap_or(body);
      return Err(LlmError::Status { status, message });
    }

    let body: ChatCompletionResponse = res.json().await.map_err(|e| LlmError::Parse(e.to_string()))?;
    if let Some(usage) = &body.usage {
      info!(prompt_tokens = ?usage.prompt_tokens, completion_tokens = ?usage.completion_tokens, total_tokens = ?usage.total_tokens, "OpenAI usage");
    }
    let text = body.choices.first().and_then(|c| c.message.content.clone()).unwrap_or_default();

    extract_json(&text).ok_or_else(|| {
      debug!(target: "worksheet", reply = %trunc_for_log(&text, 200), "Unparseable model reply");
      LlmError::Parse("reply did not contain a JSON object".into())
    })
  }
}

#[async_trait]
impl ContentSource for OpenAI {
  fn name(&self) -> &'static str {
    "openai"
  }

  #[instrument(
    level = "info",
    skip(self, params),
    fields(kind = params.worksheet_type.key(), %level, topic = %params.topic)
  )]
  async fn generate(&self, params: &GenerationParams, level: Level) -> Result<serde_json::Value, LlmError> {
    let user = user_prompt(&self.prompts, params, level);
    let max_tokens = self.settings.max_tokens_for(params.worksheet_type);
    let start = Instant::now();
    let result = self.chat_json(&self.prompts.system, &user, max_tokens).await;
    let elapsed = start.elapsed();

    match &result {
      Ok(_) => info!(target: "worksheet", ?elapsed, "Model response received successfully"),
      Err(e) => error!(target: "worksheet", ?elapsed, error = %e, "Model call failed during content generation"),
    }
    result
  }
}

// --- Chat DTOs ---

#[derive(Serialize)]
struct ChatCompletionRequest {
  model: String,
  messages: Vec<ChatMessageReq>,
  temperature: f32,
  #[serde(skip_serializing_if = "Option::is_none")]
  response_format: Option<ResponseFormat>,
  #[serde(skip_serializing_if = "Option::is_none")]
  max_tokens: Option<u32>,
}
#[derive(Serialize)]
struct ChatMessageReq { role: String, content: String }
#[derive(Serialize)]
struct ResponseFormat { #[serde(rename = "type")] r#type: String }

#[derive(Deserialize)]
struct ChatCompletionResponse {
  choices: Vec<ChatChoice>,
  #[serde(default)] usage: Option<Usage>,
}
#[derive(Deserialize)]
struct ChatChoice { message: ChatMessageResp }
#[derive(Deserialize)]
struct ChatMessageResp { content: Option<String> }
#[derive(Deserialize)]
struct Usage {
  #[serde(default)] prompt_tokens: Option<u32>,
  #[serde(default)] completion_tokens: Option<u32>,
  #[serde(default)] total_tokens: Option<u32>,
}

/// Try to extract a clean error message from an OpenAI error body.
fn extract_openai_error(body: &str) -> Option<String> {
  #[derive(Deserialize)]
  struct EWrap { error: EObj }
  #[derive(Deserialize)]
  struct EObj { message: String }
  serde_json::from_str::<EWrap>(body).ok().map(|w| w.error.message)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::{ThemeKey, WorksheetType};

  fn params() -> GenerationParams {
    GenerationParams {
      worksheet_type: WorksheetType::Cloze,
      year_group: "Year 3".into(),
      topic: "Volcanoes".into(),
      objective: String::new(),
      theme: ThemeKey::Space,
      levels: Level::ALL.to_vec(),
      extra_spacing: false,
      eal_glossary: false,
      include_answer_key: true,
    }
  }

  #[test]
  fn user_prompt_fills_every_placeholder() {
    let prompt = user_prompt(&Prompts::default(), &params(), Level::GreaterDepth);
    assert!(prompt.contains("Space Explorer 🚀 themed worksheet for Year 3 pupils (age 7-8) on \"Volcanoes\""));
    assert!(prompt.contains("Differentiation level: greater_depth"));
    assert!(prompt.contains("Choose a suitable objective"));
    for key in ["{year_group}", "{age_range}", "{topic}", "{objective}", "{theme_name}", "{theme_icon}", "{level}"] {
      assert!(!prompt.contains(key), "unfilled {key}");
    }
  }

  #[test]
  fn openai_error_message_is_extracted() {
    let body = r#"{"error":{"message":"Rate limit reached","type":"requests"}}"#;
    assert_eq!(extract_openai_error(body).as_deref(), Some("Rate limit reached"));
    assert_eq!(extract_openai_error("<html>"), None);
  }
}
