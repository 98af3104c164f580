#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use aidispatch::{ComposedPrompt, Error, GenerationProvider};
use async_trait::async_trait;
use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use serde_json::Value;

/// Test double that records every prompt it receives
pub struct StubProvider
{   pub name: String
  , pub configured: bool
  , pub reply: Result<String, Error>
  , pub calls: Mutex<Vec<ComposedPrompt>>
}

impl StubProvider
{   pub fn replying(name: &str, text: &str) -> Arc<Self>
    {   Arc::new(StubProvider
        {   name: name.to_string()
          , configured: true
          , reply: Ok(text.to_string())
          , calls: Mutex::new(vec![])
        })
    }

    pub fn failing(name: &str, error: Error) -> Arc<Self>
    {   Arc::new(StubProvider
        {   name: name.to_string()
          , configured: true
          , reply: Err(error)
          , calls: Mutex::new(vec![])
        })
    }

    pub fn unconfigured(name: &str) -> Arc<Self>
    {   Arc::new(StubProvider
        {   name: name.to_string()
          , configured: false
          , reply: Ok("should never be returned".to_string())
          , calls: Mutex::new(vec![])
        })
    }

    pub fn call_count(&self) -> usize
    {   self.calls.lock().unwrap().len()
    }

    pub fn last_prompt(&self) -> Option<ComposedPrompt>
    {   self.calls.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl GenerationProvider for StubProvider
{   fn name(&self) -> &str
    {   &self.name
    }

    fn is_configured(&self) -> bool
    {   self.configured
    }

    async fn generate(
      &self
    , prompt: &ComposedPrompt
    ) -> Result<String, Error>
    {   self.calls.lock().unwrap().push(prompt.clone());
        self.reply.clone()
    }
}

/// Recorded traffic of a fake chat-completions upstream
#[derive(Default)]
pub struct UpstreamLog
{   pub hits: AtomicUsize
  , pub bodies: Mutex<Vec<Value>>
}

impl UpstreamLog
{   pub fn hits(&self) -> usize
    {   self.hits.load(Ordering::SeqCst)
    }
}

#[derive(Clone)]
struct UpstreamState
{   status: u16
  , body: Value
  , delay: Duration
  , log: Arc<UpstreamLog>
}

async fn completions(
  State(state): State<UpstreamState>
, Json(body): Json<Value>
) -> (StatusCode, Json<Value>)
{   state.log.hits.fetch_add(1, Ordering::SeqCst);
    state.log.bodies.lock().unwrap().push(body);
    if !state.delay.is_zero()
    {   tokio::time::sleep(state.delay).await;
    }
    (
      StatusCode::from_u16(state.status).unwrap(),
      Json(state.body.clone())
    )
}

/// Serve a canned `/chat/completions` answer on an ephemeral port.
/// Returns the base URL and the traffic log.
pub async fn spawn_upstream(
  status: u16
, body: Value
, delay: Duration
) -> (String, Arc<UpstreamLog>)
{   let log = Arc::new(UpstreamLog::default());
    let state = UpstreamState
    {   status
      , body
      , delay
      , log: log.clone()
    };
    let app = Router::new()
      .route("/chat/completions", post(completions))
      .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
      .await
      .unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
      let _ = axum::serve(listener, app).await;
    });
    (format!("http://{}", addr), log)
}

async fn empty_ok(State(log): State<Arc<UpstreamLog>>) -> StatusCode
{   log.hits.fetch_add(1, Ordering::SeqCst);
    StatusCode::OK
}

/// Upstream that answers `/chat/completions` with 200 and no body
pub async fn spawn_empty_upstream() -> (String, Arc<UpstreamLog>)
{   let log = Arc::new(UpstreamLog::default());
    let app = Router::new()
      .route("/chat/completions", post(empty_ok))
      .with_state(log.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
      .await
      .unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
      let _ = axum::serve(listener, app).await;
    });
    (format!("http://{}", addr), log)
}

pub fn completion_body(text: &str) -> Value
{   serde_json::json!({
      "id": "cmpl-test",
      "choices": [
        {   "index": 0,
            "message": { "role": "assistant", "content": text },
            "finish_reason": "stop"
        }
      ]
    })
}
