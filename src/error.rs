use std::fmt;

/// Custom error type for dispatcher operations
/// Implements Clone so attempt records can keep a copy
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error
{   /// API key is missing for a provider
    MissingApiKey(String)
  , /// HTTP transport error (connect, TLS, reset)
    HttpError(String)
  , /// Upstream answered 429
    RateLimitExceeded(String)
  , /// Upstream answered 400
    BadRequest(String)
  , /// Upstream answered with any other non-success status
    ApiError
    {   status: u16
      , message: String
    }
  , /// Failed to parse API response
    ParseError(String)
  , /// Upstream call exceeded its time bound
    Timeout
  , /// Client request could not be served (e.g. no messages)
    InvalidRequest(String)
  , /// Invalid configuration
    InvalidConfiguration(String)
  , /// Generic error
    Other(String)
}

impl Error
{   /// Whether the provider chain may move on to the next stage
    /// after the primary provider failed with this error.
    pub fn is_degradable(&self) -> bool
    {   matches!(
          self,
          Error::RateLimitExceeded(_) | Error::BadRequest(_)
        )
    }
}

impl fmt::Display for Error
{   fn fmt(&self, f: &mut fmt::Formatter<'_>)
      -> fmt::Result
    {   match self
        {   Error::MissingApiKey(provider) => {
              write!(f, "Missing API key for: {}", provider)
            }
          , Error::HttpError(msg) => {
              write!(f, "HTTP error: {}", msg)
            }
          , Error::RateLimitExceeded(msg) => {
              write!(f, "API rate limit exceeded: {}", msg)
            }
          , Error::BadRequest(msg) => {
              write!(f, "Bad request: {}", msg)
            }
          , Error::ApiError { status, message } => {
              write!(f, "API error ({}): {}", status, message)
            }
          , Error::ParseError(msg) => {
              write!(f, "Parse error: {}", msg)
            }
          , Error::Timeout => {
              write!(f, "Request timed out")
            }
          , Error::InvalidRequest(msg) => {
              write!(f, "Invalid request: {}", msg)
            }
          , Error::InvalidConfiguration(msg) => {
              write!(f, "Invalid configuration: {}", msg)
            }
          , Error::Other(msg) => {
              write!(f, "Error: {}", msg)
            }
        }
    }
}

impl std::error::Error for Error {}

impl From<String> for Error
{   fn from(s: String) -> Self
    {   Error::Other(s)
    }
}

impl From<&str> for Error
{   fn from(s: &str) -> Self
    {   Error::Other(s.to_string())
    }
}

impl From<reqwest::Error> for Error
{   fn from(e: reqwest::Error) -> Self
    {   if e.is_timeout()
        {   Error::Timeout
        } else if e.is_decode()
        {   Error::ParseError(e.to_string())
        } else
        {   Error::HttpError(e.to_string())
        }
    }
}
