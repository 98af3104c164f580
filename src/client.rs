use std::sync::Arc;
use chrono::{SecondsFormat, Utc};
use log::{debug, info};

use crate::config::DispatcherConfig;
use crate::failover::ProviderChain;
use crate::prompts::RequestKind;
use crate::providers::{MistralClient, OpenAiClient};
use crate::request::{GenerateRequest, GenerateResponse};

/// Request-level entry point: validate, classify, run the chain, stamp
#[derive(Clone)]
pub struct Dispatcher
{   chain: ProviderChain
}

impl Dispatcher
{   pub fn new(chain: ProviderChain) -> Self
    {   Dispatcher { chain }
    }

    /// Build the OpenAI -> Mistral -> local chain from configuration
    pub fn from_config(config: &DispatcherConfig)
      -> Result<Self, crate::error::Error>
    {   debug!("Creating Dispatcher from config");
        let primary = OpenAiClient::new(config.primary.clone())?;
        let secondary = MistralClient::new(config.secondary.clone())?;
        Ok(Dispatcher::new(ProviderChain::new(
          Arc::new(primary),
          Arc::new(secondary)
        )))
    }

    pub async fn dispatch(
      &self
    , request: &GenerateRequest
    ) -> Result<GenerateResponse, crate::error::Error>
    {   let text = request.last_text()?;
        let kind = RequestKind::from_tag(request.kind.as_deref());
        debug!(
          "Dispatching {:?} ({} messages, last used)",
          kind,
          request.messages.len()
        );

        let outcome = self.chain.generate(kind, text).await?;
        info!(
          "Served {:?} via {} after {} attempt(s)",
          kind,
          outcome.provider,
          outcome.attempts.len()
        );

        Ok(GenerateResponse
        {   text: outcome.text
          , timestamp: now_iso8601()
        })
    }
}

/// Current UTC time, e.g. "2024-05-01T12:00:00.000Z"
pub fn now_iso8601() -> String
{   Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
