use anyhow::{Context, Result};
use axum::body::Body;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, HeaderValue, Method, Request, Response, StatusCode};
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use std::sync::Arc;
use std::time::Duration;

use crate::article::ReadableExtractor;
use crate::providers::DeepSeek;
use crate::settings::Settings;
use crate::translate::Translator;

use super::article::article_request;
use super::models::{ArticleQuery, ArticleResponse, ErrorResponse, TranslateQuery, TranslateResponse};
use super::state::ServerState;
use super::translate::translate_request;

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

pub async fn run_server(settings: Settings, addr: String) -> Result<()> {
    let http = reqwest::Client::builder()
        .timeout(FETCH_TIMEOUT)
        .build()
        .with_context(|| "failed to build HTTP client")?;
    let state = Arc::new(ServerState {
        settings,
        http,
        extractor: ReadableExtractor,
    });
    let app = Router::new()
        .route("/health", get(health))
        .route("/article", get(article))
        .route("/translate", get(translate))
        .with_state(state)
        .layer(axum::middleware::from_fn(cors_middleware));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| "failed to bind server address")?;
    axum::serve(listener, app).await?;
    Ok(())
}

async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(serde_json::json!({ "status": "ok" })))
}

async fn cors_middleware(req: Request<Body>, next: Next) -> Result<Response<Body>, StatusCode> {
    if req.method() == Method::OPTIONS {
        let mut response = Response::new(Body::empty());
        *response.status_mut() = StatusCode::NO_CONTENT;
        apply_cors_headers(response.headers_mut());
        return Ok(response);
    }
    let mut response = next.run(req).await;
    apply_cors_headers(response.headers_mut());
    Ok(response)
}

fn apply_cors_headers(headers: &mut HeaderMap) {
    headers.insert("access-control-allow-origin", HeaderValue::from_static("*"));
    headers.insert(
        "access-control-allow-methods",
        HeaderValue::from_static("GET,OPTIONS"),
    );
    headers.insert(
        "access-control-allow-headers",
        HeaderValue::from_static("content-type"),
    );
}

async fn article(
    State(state): State<Arc<ServerState>>,
    Query(query): Query<ArticleQuery>,
) -> Result<Json<ArticleResponse>, (StatusCode, Json<ErrorResponse>)> {
    match article_request(state.as_ref(), query).await {
        Ok(response) => Ok(Json(response)),
        Err(err) => Err((err.status, Json(ErrorResponse { error: err.message }))),
    }
}

async fn translate(
    State(state): State<Arc<ServerState>>,
    Query(query): Query<TranslateQuery>,
) -> Result<Json<TranslateResponse>, (StatusCode, Json<ErrorResponse>)> {
    let translator = Translator::new(DeepSeek::from_env(), state.settings.clone());
    match translate_request(&translator, query).await {
        Ok(response) => Ok(Json(response)),
        Err(err) => Err((err.status, Json(ErrorResponse { error: err.message }))),
    }
}
