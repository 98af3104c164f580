//! Wire request and response types for the dispatcher endpoint

use serde::{Deserialize, Serialize};

/// One message fragment sent by the client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientMessage
{   pub text: String
}

/// Body of a generation request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateRequest
{   /// Conversation fragments; only the last one is used
    #[serde(default)]
    pub messages: Vec<ClientMessage>
  , /// Classification tag, e.g. "symptom_analysis"
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>
}

impl GenerateRequest
{   pub fn new(text: impl Into<String>, kind: Option<&str>) -> Self
    {   GenerateRequest
        {   messages: vec![ClientMessage { text: text.into() }]
          , kind: kind.map(str::to_string)
        }
    }

    /// Text of the final message. Earlier messages are ignored.
    pub fn last_text(&self) -> Result<&str, crate::error::Error>
    {   self.messages.last()
          .map(|m| m.text.as_str())
          .ok_or_else(|| {
            crate::error::Error::InvalidRequest(
              "messages must contain at least one entry".to_string()
            )
          })
    }
}

/// Successful generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateResponse
{   pub text: String
  , /// ISO-8601, UTC
    pub timestamp: String
}

/// Error payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse
{   pub error: String
  , pub details: String
}
