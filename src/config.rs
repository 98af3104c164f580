//! Configuration for upstream providers and the HTTP listener
//!
//! Everything here is read once at process start and handed to the
//! dispatcher by value. Provider code never looks at the environment.

use serde::{Deserialize, Serialize};
use log::{debug, warn};

pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_BIND: &str = "0.0.0.0:8080";

pub const OPENAI_API_BASE: &str = "https://api.openai.com/v1";
pub const OPENAI_DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const MISTRAL_API_BASE: &str = "https://api.mistral.ai/v1";
pub const MISTRAL_DEFAULT_MODEL: &str = "mistral-small-latest";

/// Provider configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderConfig
{   /// Provider name, used in logs
    pub name: String
  , /// Credential; `None` means the stage is skipped
    pub api_key: Option<String>
  , /// API base URL
    pub api_base: String
  , /// Model name sent upstream
    pub model: String
  , /// Request timeout in seconds
    pub timeout_secs: u64
  , /// Max tokens to generate
    pub max_tokens: usize
  , /// Temperature for sampling
    pub temperature: f32
}

impl ProviderConfig
{   pub fn openai() -> Self
    {   ProviderConfig
        {   name: "openai".to_string()
          , api_key: None
          , api_base: OPENAI_API_BASE.to_string()
          , model: OPENAI_DEFAULT_MODEL.to_string()
          , timeout_secs: DEFAULT_TIMEOUT_SECS
          , max_tokens: 1024
          , temperature: 0.7
        }
    }

    pub fn mistral() -> Self
    {   ProviderConfig
        {   name: "mistral".to_string()
          , api_key: None
          , api_base: MISTRAL_API_BASE.to_string()
          , model: MISTRAL_DEFAULT_MODEL.to_string()
          , timeout_secs: DEFAULT_TIMEOUT_SECS
          , max_tokens: 1024
          , temperature: 0.7
        }
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self
    {   self.api_key = Some(key.into());
        self
    }

    pub fn with_api_base(mut self, base: impl Into<String>) -> Self
    {   self.api_base = base.into();
        self
    }
}

/// HTTP listener configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig
{   /// Socket address to bind, e.g. "0.0.0.0:8080"
    pub bind: String
}

impl Default for ServerConfig
{   fn default() -> Self
    {   ServerConfig
        {   bind: DEFAULT_BIND.to_string()
        }
    }
}

/// Dispatcher configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DispatcherConfig
{   pub primary: ProviderConfig
  , pub secondary: ProviderConfig
  , pub server: ServerConfig
}

impl Default for DispatcherConfig
{   fn default() -> Self
    {   DispatcherConfig
        {   primary: ProviderConfig::openai()
          , secondary: ProviderConfig::mistral()
          , server: ServerConfig::default()
        }
    }
}

impl DispatcherConfig
{   /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, crate::error::Error>
    {   Self::from_vars(std::env::vars())
    }

    /// Load configuration from an arbitrary set of key/value pairs
    pub fn from_vars<I, K, V>(vars: I)
      -> Result<Self, crate::error::Error>
    where
      I: IntoIterator<Item = (K, V)>
    , K: AsRef<str>
    , V: Into<String>
    {   let mut config = DispatcherConfig::default();
        let mut timeout: Option<u64> = None;

        for (key, value) in vars
        {   let value: String = value.into();
            match key.as_ref()
            {   "OPENAI_API_KEY" => {
                  config.primary.api_key = non_blank(value)
                }
              , "OPENAI_API_BASE" => {
                  if let Some(v) = non_blank(value)
                  {   config.primary.api_base = v;
                  }
                }
              , "OPENAI_MODEL" => {
                  if let Some(v) = non_blank(value)
                  {   config.primary.model = v;
                  }
                }
              , "MISTRAL_API_KEY" => {
                  config.secondary.api_key = non_blank(value)
                }
              , "MISTRAL_API_BASE" => {
                  if let Some(v) = non_blank(value)
                  {   config.secondary.api_base = v;
                  }
                }
              , "MISTRAL_MODEL" => {
                  if let Some(v) = non_blank(value)
                  {   config.secondary.model = v;
                  }
                }
              , "AIDISPATCH_TIMEOUT_SECS" => {
                  let secs = value.trim().parse::<u64>()
                    .map_err(|e| {
                      crate::error::Error::InvalidConfiguration(
                        format!(
                          "AIDISPATCH_TIMEOUT_SECS={:?}: {}",
                          value, e
                        )
                      )
                    })?;
                  if secs == 0
                  {   return Err(
                        crate::error::Error::InvalidConfiguration(
                          "AIDISPATCH_TIMEOUT_SECS must be > 0"
                            .to_string()
                        )
                      );
                  }
                  timeout = Some(secs);
                }
              , "AIDISPATCH_BIND" => {
                  if let Some(v) = non_blank(value)
                  {   config.server.bind = v;
                  }
                }
              , _ => {}
            }
        }

        if let Some(secs) = timeout
        {   config.primary.timeout_secs = secs;
            config.secondary.timeout_secs = secs;
        }

        if config.primary.api_key.is_none()
        {   warn!("OPENAI_API_KEY not set, primary stage disabled");
        }
        if config.secondary.api_key.is_none()
        {   warn!("MISTRAL_API_KEY not set, secondary stage disabled");
        }
        debug!(
          "Loaded config: primary={} secondary={} bind={}",
          config.primary.model,
          config.secondary.model,
          config.server.bind
        );
        Ok(config)
    }
}

fn non_blank(value: String) -> Option<String>
{   let trimmed = value.trim();
    if trimmed.is_empty()
    {   None
    } else
    {   Some(trimmed.to_string())
    }
}
