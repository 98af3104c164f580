use async_trait::async_trait;
use log::{debug, error};

use crate::config::ProviderConfig;
use crate::prompts::ComposedPrompt;
use super::chat;

/// OpenAI chat-completions client (primary stage)
pub struct OpenAiClient
{   config: ProviderConfig
  , http_client: reqwest::Client
}

impl OpenAiClient
{   pub fn new(config: ProviderConfig)
      -> Result<Self, crate::error::Error>
    {   debug!("Creating OpenAiClient for model: {}", config.model);
        let http_client = chat::build_http_client(&config)?;
        Ok(OpenAiClient
        {   config
          , http_client
        })
    }

    fn get_api_key(&self) -> Result<&str, crate::error::Error>
    {   self.config.api_key.as_deref()
          .ok_or_else(|| {
            error!("No API key for model: {}", self.config.model);
            crate::error::Error::MissingApiKey(
              format!("OpenAI:{}", self.config.model)
            )
          })
    }
}

#[async_trait]
impl super::GenerationProvider for OpenAiClient
{   fn name(&self) -> &str
    {   &self.config.name
    }

    fn is_configured(&self) -> bool
    {   self.config.api_key.is_some()
    }

    async fn generate(
      &self
    , prompt: &ComposedPrompt
    ) -> Result<String, crate::error::Error>
    {   debug!("Handling generate for: {}", self.config.model);
        let api_key = self.get_api_key()?;
        chat::send_chat_completion(
          &self.http_client,
          &self.config,
          api_key,
          prompt
        ).await
    }
}
