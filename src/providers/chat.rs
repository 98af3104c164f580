//! Chat-completions wire format shared by OpenAI and Mistral

use serde::{Deserialize, Serialize};
use log::{debug, error, trace};
use std::time::Duration;

use crate::config::ProviderConfig;
use crate::error::Error;
use crate::prompts::ComposedPrompt;

// ===== Message Types =====

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage
{   pub role: String
  , pub content: String
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest
{   pub model: String
  , pub messages: Vec<ChatMessage>
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<usize>
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub stream: Option<bool>
}

impl ChatRequest
{   pub fn from_prompt(
      config: &ProviderConfig
    , prompt: &ComposedPrompt
    ) -> Self
    {   ChatRequest
        {   model: config.model.clone()
          , messages: vec![
              ChatMessage
              {   role: "system".to_string()
                , content: prompt.system.clone()
              }
            , ChatMessage
              {   role: "user".to_string()
                , content: prompt.user.clone()
              }
            ]
          , max_tokens: Some(config.max_tokens)
          , temperature: Some(config.temperature)
          , stream: Some(false)
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse
{   #[serde(default)]
    pub choices: Vec<Choice>
}

#[derive(Debug, Clone, Deserialize)]
pub struct Choice
{   pub message: ChoiceMessage
  , pub finish_reason: Option<String>
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChoiceMessage
{   #[serde(default)]
    pub role: Option<String>
  , #[serde(default)]
    pub content: Option<String>
}

impl ChatResponse
{   /// Trimmed content of the first choice, empty if there is none
    pub fn first_text(&self) -> String
    {   self.choices.first()
          .and_then(|c| c.message.content.as_deref())
          .map(|s| s.trim().to_string())
          .unwrap_or_default()
    }
}

/// Build the HTTP client for one provider, bounded by its timeout
pub fn build_http_client(config: &ProviderConfig)
  -> Result<reqwest::Client, Error>
{   reqwest::Client::builder()
      .timeout(Duration::from_secs(config.timeout_secs))
      .build()
      .map_err(|e| {
        error!("{} HTTP client build failed: {}", config.name, e);
        Error::InvalidConfiguration(
          format!("{} HTTP client: {}", config.name, e)
        )
      })
}

/// Map a non-success upstream status to an error class
pub fn classify_status(status: u16, body: String) -> Error
{   match status
    {   429 => Error::RateLimitExceeded(body)
      , 400 => Error::BadRequest(body)
      , _ => Error::ApiError
        {   status
          , message: body
        }
    }
}

/// POST one chat-completions request and extract the generated text
pub async fn send_chat_completion(
  http_client: &reqwest::Client
, config: &ProviderConfig
, api_key: &str
, prompt: &ComposedPrompt
) -> Result<String, Error>
{   let request = ChatRequest::from_prompt(config, prompt);
    trace!("{} request: {:?}", config.name, request);

    let response = http_client
      .post(format!(
        "{}/chat/completions",
        config.api_base.trim_end_matches('/')
      ))
      .header("Authorization", format!("Bearer {}", api_key))
      .header("Content-Type", "application/json")
      .json(&request)
      .send()
      .await
      .map_err(|e| {
        error!("{} HTTP error: {}", config.name, e);
        Error::from(e)
      })?;

    let status = response.status();
    trace!("{} response status: {}", config.name, status);

    if !status.is_success()
    {   let error_text = response.text().await
          .unwrap_or_else(|_|
            "Unknown error".to_string()
          );
        error!("{} API error {}: {}", config.name, status, error_text);
        return Err(classify_status(status.as_u16(), error_text));
    }

    let body = response.bytes().await.map_err(|e| {
      error!("{} body read error: {}", config.name, e);
      Error::from(e)
    })?;
    if body.iter().all(|b| b.is_ascii_whitespace())
    {   debug!("{} returned an empty body", config.name);
        return Ok(String::new());
    }

    let chat_response: ChatResponse
      = serde_json::from_slice(&body).map_err(|e| {
        error!("{} parse error: {}", config.name, e);
        Error::ParseError(e.to_string())
      })?;

    Ok(chat_response.first_text())
}

#[cfg(test)]
mod tests
{   use super::*;

    #[test]
    fn status_classes()
    {   assert!(matches!(
          classify_status(429, String::new()),
          Error::RateLimitExceeded(_)
        ));
        assert!(matches!(
          classify_status(400, String::new()),
          Error::BadRequest(_)
        ));
        assert_eq!(
          classify_status(503, "down".to_string()),
          Error::ApiError { status: 503, message: "down".to_string() }
        );
    }

    #[test]
    fn empty_choices_yield_empty_text()
    {   let parsed: ChatResponse
          = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        assert_eq!(parsed.first_text(), "");

        let parsed: ChatResponse = serde_json::from_str(
          r#"{"choices":[{"message":{"role":"assistant","content":null},"finish_reason":"stop"}]}"#
        ).unwrap();
        assert_eq!(parsed.first_text(), "");
    }

    #[test]
    fn http_client_builds_with_timeout()
    {   let mut config = ProviderConfig::mistral();
        config.timeout_secs = 2;
        assert!(build_http_client(&config).is_ok());
    }

    #[test]
    fn request_carries_system_and_user_messages()
    {   let config = ProviderConfig::openai();
        let prompt = ComposedPrompt
        {   system: "sys".to_string()
          , user: "hi".to_string()
        };
        let req = ChatRequest::from_prompt(&config, &prompt);
        let roles: Vec<&str>
          = req.messages.iter().map(|m| m.role.as_str()).collect();
        assert_eq!(roles, vec!["system", "user"]);
        assert_eq!(req.messages[1].content, "hi");
        assert_eq!(req.model, config.model);
    }
}
