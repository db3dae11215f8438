//! Solve Endpoint (`POST /api/solve`).
//!
//! Accepts `{ "image": "data:image/...;base64,...", "stepByStep": bool }` and
//! returns the transcript, the local numeric value (or null), and the
//! explanation. Every failure path, including extractor rejections and
//! wrong-method hits, renders the same `{ "error": <tag> }` body.

use axum::{
    Json,
    extract::State,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{error, warn};

use mathlens_core::{ErrorBody, SolveError, SolveRequest};

use crate::server::GatewayState;

/// Handler for `POST /api/solve`.
pub async fn solve(
    State(state): State<GatewayState>,
    payload: Result<Json<SolveRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(json) => json,
        Err(rejection) => return rejection_response(rejection),
    };

    match state.solver.solve(&request).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => error_response(&e),
    }
}

/// Method fallback for the solve route: anything but POST gets a JSON 405.
pub async fn method_not_allowed() -> Response {
    error_response(&SolveError::MethodNotAllowed)
}

/// Map an extractor rejection to the gateway's error shape. Body-limit
/// overruns keep their 413; everything else (bad JSON, wrong content type)
/// is a plain bad request.
fn rejection_response(rejection: JsonRejection) -> Response {
    let status = rejection.status();
    let tag = if status == StatusCode::PAYLOAD_TOO_LARGE {
        "payload_too_large"
    } else {
        "bad_request"
    };
    warn!(%status, %tag, "Request rejected before the pipeline");
    (status, Json(ErrorBody::new(tag))).into_response()
}

fn error_response(e: &SolveError) -> Response {
    let status =
        StatusCode::from_u16(e.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    if status.is_server_error() {
        error!(tag = e.tag(), error = %e, "Solve request failed");
    } else {
        warn!(tag = e.tag(), error = %e, "Solve request rejected");
    }
    (status, Json(ErrorBody::new(e.tag()))).into_response()
}
