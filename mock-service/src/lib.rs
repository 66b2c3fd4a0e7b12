use axum::{
    debug_handler,
    extract::{Path, Query, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    routing::get,
    Json, Router,
};
use metrics::counter;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::{
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
    time::Duration,
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::debug;

/// Behaviour of the mocked AI service.
#[derive(Clone, Debug)]
pub struct MockConfig {
    /// Bearer token accepted by the ask endpoint.
    pub token: String,
    /// Artificial delay before the ask endpoint responds.
    pub delay: Duration,
}

pub fn router(config: MockConfig) -> Router {
    Router::new()
        .route("/api/ai/projects/:project_id/ask/", get(ask))
        .route("/delay/ms/:delay_ms/status/:status", get(delay_status))
        .with_state(Arc::new(config))
        .layer(TraceLayer::new_for_http())
}

pub async fn run(addr: SocketAddr, config: MockConfig) -> std::io::Result<()> {
    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, router(config)).await
}

/// Serve on an ephemeral localhost port in the background and return its address.
pub async fn spawn(config: MockConfig) -> std::io::Result<SocketAddr> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = axum::serve(listener, router(config)).await {
            tracing::error!("Mock service stopped: {err}");
        }
    });

    Ok(addr)
}

#[derive(Debug, Deserialize)]
pub struct AskQuery {
    q: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct AskResponse {
    pub project_title: String,
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: String,
}

type ErrorResponse = (StatusCode, Json<ErrorBody>);

fn error(status: StatusCode, msg: &str) -> ErrorResponse {
    (
        status,
        Json(ErrorBody {
            error: msg.to_string(),
        }),
    )
}

#[debug_handler]
pub async fn ask(
    State(config): State<Arc<MockConfig>>,
    Path(project_id): Path<String>,
    Query(query): Query<AskQuery>,
    headers: HeaderMap,
) -> Result<Json<AskResponse>, ErrorResponse> {
    counter!("mock-service.ask").increment(1);
    TPS_MEASURE.fetch_add(1, Ordering::Relaxed);
    tokio::time::sleep(config.delay).await;

    let token = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or_else(|| {
            error(
                StatusCode::UNAUTHORIZED,
                "Missing or invalid Authorization header",
            )
        })?;

    if token != config.token {
        debug!("Rejecting token for project {project_id}");
        return Err(error(StatusCode::UNAUTHORIZED, "Invalid token"));
    }

    let question = query
        .q
        .filter(|q| !q.is_empty())
        .ok_or_else(|| error(StatusCode::BAD_REQUEST, "Missing 'q' parameter"))?;

    Ok(Json(AskResponse {
        project_title: format!("Project {project_id}"),
        answer: format!("Mock answer to: {question}"),
        question,
    }))
}

#[debug_handler]
pub async fn delay_status(Path((delay_ms, status)): Path<(u64, u16)>) -> StatusCode {
    TPS_MEASURE.fetch_add(1, Ordering::Relaxed);
    tokio::time::sleep(Duration::from_millis(delay_ms)).await;
    StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_REQUEST)
}

/** TPS Printer **/

static TPS_MEASURE: AtomicU64 = AtomicU64::new(0);

pub async fn tps_measure_task() {
    loop {
        tokio::time::sleep(Duration::from_millis(1000)).await;
        let transactions = TPS_MEASURE.swap(0, Ordering::Relaxed);
        println!("{transactions} TPS");
    }
}
