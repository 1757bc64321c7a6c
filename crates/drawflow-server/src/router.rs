//! Route table and cross-cutting middleware.
//!
//! Layer order, outermost first: CORS, request id (set, then propagate),
//! request tracing, panic recovery.

use std::any::Any;
use std::time::Duration;

use axum::body::Body;
use axum::http::header::{self, HeaderName};
use axum::http::{Method, Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::trace::TraceLayer;
use tracing::Span;
use uuid::Uuid;

use crate::config::ServerConfig;
use crate::{handlers, AppState};

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Build the full application router.
pub fn build_router(state: AppState, config: &ServerConfig) -> Router {
    let routes = Router::new()
        .route("/saveEditor", get(handlers::save_editor))
        .route("/readEditor", get(handlers::read_editor))
        .with_state(state);

    with_middleware(routes, config)
}

fn with_middleware(router: Router, config: &ServerConfig) -> Router {
    router
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV4))
        .layer(cors_layer(config.cors_max_age_secs))
}

/// Generates random UUIDv4 request correlation IDs.
#[derive(Clone, Default)]
struct MakeRequestUuidV4;

impl MakeRequestId for MakeRequestUuidV4 {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string().parse().ok()?;
        Some(RequestId::new(id))
    }
}

fn make_request_span(request: &Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("-");

    tracing::info_span!(
        "request",
        method = %request.method(),
        path = %request.uri().path(),
        request_id = %request_id,
    )
}

/// Any origin is allowed. With credentials enabled the origin is mirrored
/// back instead of answering `*`.
fn cors_layer(max_age_secs: u64) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_methods([Method::GET])
        .allow_headers([
            header::ACCEPT,
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            HeaderName::from_static("x-csrf-token"),
            HeaderName::from_static("x-xsrf-token"),
            HeaderName::from_static("xsrf-token"),
        ])
        .allow_credentials(true)
        .max_age(Duration::from_secs(max_age_secs))
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic payload"
    };
    tracing::error!(panic = %detail, "Handler panicked");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json("internal server error"),
    )
        .into_response()
}
