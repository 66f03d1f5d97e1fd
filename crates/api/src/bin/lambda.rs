use lambda_runtime::{service_fn, Error, LambdaEvent};

use laborlines_api::config::LogFormat;
use laborlines_api::event::ResolverEvent;
use laborlines_api::lambda::ResolverHandler;
use laborlines_api::response::ResolverResponse;
use laborlines_api::telemetry;

#[tokio::main]
async fn main() -> Result<(), Error> {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    telemetry::init(LogFormat::from_env_or(LogFormat::Json), "laborlines_api=info");

    // --- Handler ---
    let handler = ResolverHandler::from_env().await;
    let handler = &handler;

    lambda_runtime::run(service_fn(
        move |invocation: LambdaEvent<ResolverEvent>| async move {
            tracing::debug!(request_id = %invocation.context.request_id, "Invocation received");
            Ok::<ResolverResponse, Error>(handler.handle(&invocation.payload).await)
        },
    ))
    .await
}
