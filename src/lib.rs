pub mod error;
pub mod config;
pub mod prompts;
pub mod providers;
pub mod request;
pub mod fallback;
pub mod failover;
pub mod client;
pub mod server;

/*

aidispatch: stateless AI response dispatcher for the health assistant.

  request -> classify (prompts) -> chain (failover)
                                    1. primary   (providers::openai)
                                    2. secondary (providers::mistral)
                                    3. local     (fallback)
          -> { text, timestamp }

aidispatch/
├── src/
│   ├── lib.rs          # Re-exports
│   ├── main.rs         # Binary: logging, env config, serve
│   ├── error.rs        # Error type and degradable/fatal split
│   ├── config.rs       # Provider + listener configuration
│   ├── prompts.rs      # Request kinds and system prompts
│   ├── request.rs      # Wire request/response types
│   ├── fallback.rs     # Keyword-matched canned responses
│   ├── failover.rs     # Provider chain
│   ├── client.rs       # Dispatcher
│   ├── server.rs       # axum router, CORS
│   └── providers/      # Upstream chat-completions clients
└── tests/

*/

pub use client::Dispatcher;
pub use config::DispatcherConfig;
pub use error::Error;
pub use failover::{AttemptOutcome, ChainOutcome, ProviderAttempt, ProviderChain};
pub use prompts::{ComposedPrompt, RequestKind};
pub use providers::GenerationProvider;
pub use request::{ClientMessage, ErrorResponse, GenerateRequest, GenerateResponse};
