//! AWS Lambda entry point.
//!
//! The event payload is the same JSON the HTTP gateway accepts; the response
//! carries an explicit `statusCode` so an API Gateway / function URL proxy
//! maps errors the same way the axum adapter does. The event is taken as a
//! raw value and deserialized here — a malformed body must come back as a
//! `bad_request` response, not as an invocation error.

use std::sync::Arc;

use lambda_runtime::{Error, LambdaEvent, run, service_fn};
use serde_json::{Value, json};

use mathlens_config::MathLensConfig;
use mathlens_core::{ErrorBody, SolveError, SolveRequest};
use mathlens_pipeline::Solver;

async fn function_handler(
    solver: Arc<Solver>,
    event: LambdaEvent<Value>,
) -> Result<Value, Error> {
    let request: SolveRequest = match serde_json::from_value(event.payload) {
        Ok(request) => request,
        Err(e) => {
            let err = SolveError::BadRequest(e.to_string());
            tracing::warn!(tag = err.tag(), error = %err, "Malformed Lambda event");
            return Ok(error_envelope(&err));
        }
    };

    match solver.solve(&request).await {
        Ok(response) => Ok(json!({
            "statusCode": 200,
            "body": response,
        })),
        Err(e) => {
            tracing::warn!(tag = e.tag(), error = %e, "Solve failed");
            Ok(error_envelope(&e))
        }
    }
}

fn error_envelope(e: &SolveError) -> Value {
    json!({
        "statusCode": e.status(),
        "body": ErrorBody::new(e.tag()),
    })
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(false)
        .without_time()
        .init();

    let config = MathLensConfig::from_env();
    tracing::info!(%config, "MathLens Lambda cold start");

    let solver = Arc::new(Solver::from_config(&config));

    run(service_fn(move |event: LambdaEvent<Value>| {
        let solver = Arc::clone(&solver);
        async move { function_handler(solver, event).await }
    }))
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use lambda_runtime::Context;

    fn test_solver() -> Arc<Solver> {
        Arc::new(Solver::from_config(&MathLensConfig::default()))
    }

    fn event(payload: Value) -> LambdaEvent<Value> {
        LambdaEvent::new(payload, Context::default())
    }

    #[tokio::test]
    async fn malformed_event_is_bad_request() {
        let out = function_handler(test_solver(), event(json!({"not_image": 1})))
            .await
            .unwrap();
        assert_eq!(out["statusCode"], 400);
        assert_eq!(out["body"]["error"], "bad_request");
    }

    #[tokio::test]
    async fn non_object_event_is_bad_request() {
        let out = function_handler(test_solver(), event(json!("just a string")))
            .await
            .unwrap();
        assert_eq!(out["statusCode"], 400);
        assert_eq!(out["body"]["error"], "bad_request");
    }

    #[tokio::test]
    async fn invalid_image_keeps_pipeline_tag() {
        let out = function_handler(
            test_solver(),
            event(json!({"image": "https://example.com/x.png"})),
        )
        .await
        .unwrap();
        assert_eq!(out["statusCode"], 400);
        assert_eq!(out["body"]["error"], "invalid_image");
    }

    #[tokio::test]
    async fn missing_credentials_surface_as_500() {
        let image = "data:image/png;base64,aW1hZ2U=";
        let out = function_handler(test_solver(), event(json!({"image": image})))
            .await
            .unwrap();
        assert_eq!(out["statusCode"], 500);
        assert_eq!(out["body"]["error"], "missing_api_key");
    }
}
