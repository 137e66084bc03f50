use anyhow::Result;
use axum::{
    body::Body,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use clap::Parser;
use hyper::header::{HeaderName, HeaderValue};
use serde::Deserialize;
use tracing::{info, warn};

mod blocklist;
mod config;
mod headers;
mod upstream;

use blocklist::HostPolicy;
use config::GatewayConfig;
use fetchgate_shared::{Error, FetchMethod, FetchRequest, ValidationError};
use headers::{filter_passthrough, CORS_HEADERS};
use upstream::{UpstreamClient, UpstreamResponse};

#[derive(Clone)]
pub struct AppState {
    policy: HostPolicy,
    upstream: UpstreamClient,
}

impl AppState {
    pub fn new(policy: HostPolicy, upstream: UpstreamClient) -> Self {
        Self { policy, upstream }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = GatewayConfig::parse();

    let filter = if config.verbose {
        "fetchgate=debug"
    } else {
        "fetchgate=info"
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let upstream = UpstreamClient::new(config.upstream_timeout())?;
    let state = AppState::new(HostPolicy::new(config.strict_blocklist), upstream);
    let app = router(state);

    let addr = config.listen_addr();
    info!(
        "Fetchgate on {} (strict blocklist: {})",
        addr, config.strict_blocklist
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/fetch", get(fetch_handler))
        .route("/health", get(|| async { "OK" }))
        .with_state(state)
}

/// Raw query parameters of the proxy endpoint.
#[derive(Debug, Deserialize)]
struct FetchParams {
    url: Option<String>,
    method: Option<String>,
}

async fn fetch_handler(
    State(state): State<AppState>,
    Query(params): Query<FetchParams>,
) -> Response {
    match proxy(&state, params).await {
        Ok(response) => response,
        Err(err) => error_response(&err),
    }
}

/// Validate, classify, fetch, relay. Stateless: nothing survives the call.
async fn proxy(state: &AppState, params: FetchParams) -> fetchgate_shared::Result<Response> {
    let request = FetchRequest::parse(params.url.as_deref(), params.method.as_deref())?;

    let hostname = request.hostname().unwrap_or_default();
    if state.policy.is_blocked(&hostname) {
        warn!("Blocked host: {}", hostname);
        return Err(ValidationError::BlockedHost.into());
    }

    let response = state.upstream.fetch(&request).await.map_err(|err| {
        if let Error::Upstream(detail) = &err {
            warn!("Upstream fetch failed for {}: {}", request.url, detail);
        }
        err
    })?;

    info!(
        "{} {} -> {}",
        request.method.as_str(),
        request.url,
        response.status
    );
    Ok(relay_response(request.method, response))
}

/// Assemble the relayed response: upstream status unchanged, CORS trio,
/// allowlisted upstream headers, and the body (suppressed for HEAD).
fn relay_response(method: FetchMethod, upstream: UpstreamResponse) -> Response {
    let mut builder = Response::builder()
        .status(StatusCode::from_u16(upstream.status).unwrap_or(StatusCode::OK));

    if let Some(headers_mut) = builder.headers_mut() {
        for (k, v) in CORS_HEADERS {
            if let (Ok(hn), Ok(hv)) = (
                HeaderName::from_bytes(k.as_bytes()),
                HeaderValue::from_str(v),
            ) {
                headers_mut.insert(hn, hv);
            }
        }
        for (k, v) in filter_passthrough(&upstream.headers) {
            if let (Ok(hn), Ok(hv)) = (
                HeaderName::from_bytes(k.as_bytes()),
                HeaderValue::from_str(&v),
            ) {
                headers_mut.insert(hn, hv);
            }
        }
    }

    let body = match method {
        FetchMethod::Head => Body::empty(),
        FetchMethod::Get => Body::from(upstream.body),
    };

    match builder.body(body) {
        Ok(r) => r.into_response(),
        Err(_) => error_response(&Error::Upstream("response build failed".into())),
    }
}

fn error_response(err: &Error) -> Response {
    let status =
        StatusCode::from_u16(err.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(serde_json::json!({ "error": err.message() }))).into_response()
}
