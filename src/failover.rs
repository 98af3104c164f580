//! Provider chain: primary, then secondary, then local fallback

use std::sync::Arc;
use log::{debug, info, warn, error};

use crate::error::Error;
use crate::fallback;
use crate::prompts::RequestKind;
use crate::providers::GenerationProvider;

pub const LOCAL_PROVIDER: &str = "local";

/// What happened when one stage was tried
#[derive(Debug, Clone, PartialEq)]
pub enum AttemptOutcome
{   Success
  , /// Upstream answered with no usable text
    Empty
  , /// Credential absent, no call made
    Skipped
  , Failed(Error)
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProviderAttempt
{   pub provider: String
  , pub outcome: AttemptOutcome
}

/// Result of a chain run
#[derive(Debug, Clone, PartialEq)]
pub struct ChainOutcome
{   /// Never empty
    pub text: String
  , /// Stage that produced `text`
    pub provider: String
  , /// Every stage tried, in order
    pub attempts: Vec<ProviderAttempt>
}

/// Strictly sequential failover over two remote providers
#[derive(Clone)]
pub struct ProviderChain
{   primary: Arc<dyn GenerationProvider>
  , secondary: Arc<dyn GenerationProvider>
}

impl ProviderChain
{   pub fn new(
      primary: Arc<dyn GenerationProvider>
    , secondary: Arc<dyn GenerationProvider>
    ) -> Self
    {   debug!(
          "Creating provider chain: {} -> {} -> {}",
          primary.name(),
          secondary.name(),
          LOCAL_PROVIDER
        );
        ProviderChain
        {   primary
          , secondary
        }
    }

    /// Run the chain for one request.
    ///
    /// Errors only when the primary provider fails with an error that is
    /// not degradable; the secondary is not tried in that case.
    pub async fn generate(
      &self
    , kind: RequestKind
    , user_text: &str
    ) -> Result<ChainOutcome, Error>
    {   let prompt = kind.compose(user_text);
        let mut attempts = Vec::with_capacity(3);

        // ===== Primary =====
        let primary = self.primary.name().to_string();
        if !self.primary.is_configured()
        {   debug!("{} not configured, skipping", primary);
            attempts.push(ProviderAttempt
            {   provider: primary
              , outcome: AttemptOutcome::Skipped
            });
        } else
        {   match self.primary.generate(&prompt).await
            {   Ok(text) if !text.trim().is_empty() => {
                  info!("{} produced response", primary);
                  attempts.push(ProviderAttempt
                  {   provider: primary.clone()
                    , outcome: AttemptOutcome::Success
                  });
                  return Ok(ChainOutcome
                  {   text
                    , provider: primary
                    , attempts
                  });
                }
              , Ok(_) => {
                  warn!("{} returned empty response", primary);
                  attempts.push(ProviderAttempt
                  {   provider: primary
                    , outcome: AttemptOutcome::Empty
                  });
                }
              , Err(e) if e.is_degradable() => {
                  warn!("{} failed ({}), falling through", primary, e);
                  attempts.push(ProviderAttempt
                  {   provider: primary
                    , outcome: AttemptOutcome::Failed(e)
                  });
                }
              , Err(e) => {
                  error!("{} failed fatally: {}", primary, e);
                  return Err(e);
                }
            }
        }

        // ===== Secondary =====
        let secondary = self.secondary.name().to_string();
        if !self.secondary.is_configured()
        {   debug!("{} not configured, skipping", secondary);
            attempts.push(ProviderAttempt
            {   provider: secondary
              , outcome: AttemptOutcome::Skipped
            });
        } else
        {   match self.secondary.generate(&prompt).await
            {   Ok(text) if !text.trim().is_empty() => {
                  info!("{} produced response", secondary);
                  attempts.push(ProviderAttempt
                  {   provider: secondary.clone()
                    , outcome: AttemptOutcome::Success
                  });
                  return Ok(ChainOutcome
                  {   text
                    , provider: secondary
                    , attempts
                  });
                }
              , Ok(_) => {
                  warn!("{} returned empty response", secondary);
                  attempts.push(ProviderAttempt
                  {   provider: secondary
                    , outcome: AttemptOutcome::Empty
                  });
                }
              , Err(e) => {
                  warn!("{} failed ({}), falling through", secondary, e);
                  attempts.push(ProviderAttempt
                  {   provider: secondary
                    , outcome: AttemptOutcome::Failed(e)
                  });
                }
            }
        }

        // ===== Local =====
        info!("Using local fallback for {:?}", kind);
        attempts.push(ProviderAttempt
        {   provider: LOCAL_PROVIDER.to_string()
          , outcome: AttemptOutcome::Success
        });
        Ok(ChainOutcome
        {   text: fallback::generate(kind, user_text)
          , provider: LOCAL_PROVIDER.to_string()
          , attempts
        })
    }
}
