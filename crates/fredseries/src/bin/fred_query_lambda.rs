use fredseries::config::Config;
use fredseries::lambda::query_handler;
use fredseries::storage::dynamodb::create_client;
use lambda_runtime::{run, service_fn, tracing, Error, LambdaEvent};
use serde_json::Value;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing::init_default_subscriber();

    let config = Config::from_env();
    let client = create_client(&config.aws).await;

    run(service_fn(|event: LambdaEvent<Value>| {
        query_handler(&client, &config, event)
    }))
    .await
}
