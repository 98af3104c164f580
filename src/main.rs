use std::sync::Arc;
use log::{error, info};

use aidispatch::client::Dispatcher;
use aidispatch::config::DispatcherConfig;

#[tokio::main]
async fn main()
{   env_logger::Builder::from_env(
      env_logger::Env::default().default_filter_or("info")
    ).init();

    let config = match DispatcherConfig::from_env()
    {   Ok(c) => c
      , Err(e) => {
          error!("{}", e);
          std::process::exit(1);
        }
    };

    let dispatcher = match Dispatcher::from_config(&config)
    {   Ok(d) => Arc::new(d)
      , Err(e) => {
          error!("{}", e);
          std::process::exit(1);
        }
    };
    if let Err(e) = aidispatch::server::serve(&config.server, dispatcher).await
    {   error!("{}", e);
        std::process::exit(1);
    }
    info!("aidispatch stopped");
}
