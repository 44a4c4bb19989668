use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;
use std::sync::Arc;

use cms_handler::telemetry::init_tracing;
use cms_handler::{App, AwsSenderFactory};
use cms_shared::config::{process_env, LoggingConfig};

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Load .env for local runs
    dotenvy::dotenv().ok();

    init_tracing(&LoggingConfig::from_env_map(&process_env()));
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting custom message sender");

    let app = Arc::new(App::new(Box::new(process_env), AwsSenderFactory));

    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| {
        let app = app.clone();
        async move { app.invoke(event.payload).await.map_err(Error::from) }
    }))
    .await
}
