//! Timed HTTP requests for use inside scenarios
use crate::transaction::transaction_hook;
use loadcheck_core::HTTP_LABELS;
use reqwest::{header::HeaderMap, Client, StatusCode};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;
use url::Url;

/// Everything needed to issue one request.
#[derive(Clone, Debug)]
pub struct RequestDescriptor {
    pub url: Url,
    pub headers: HeaderMap,
}

/// Typed outcome of a single request.
///
/// `status` is `None` when no response was received (DNS, TLS, connection
/// errors). `duration` covers the full round trip including the body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResult {
    pub status: Option<u16>,
    pub duration: Duration,
    pub error: Option<String>,
}

impl HttpResult {
    pub fn duration_ms(&self) -> f64 {
        self.duration.as_nanos() as f64 / 1e6
    }

    pub fn is_status(&self, status: u16) -> bool {
        self.status == Some(status)
    }
}

#[derive(Debug, Error)]
pub enum RequestError {
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Unexpected status {0}")]
    Status(StatusCode),
}

/// Issue a GET for `request`, recording it as an HTTP transaction.
///
/// Never fails: transport errors and error statuses are folded into the
/// returned [`HttpResult`]. Responses with a status of 400 or above count as
/// failed requests.
pub async fn get(client: &Client, request: &RequestDescriptor) -> HttpResult {
    let (res, duration) = transaction_hook(HTTP_LABELS, send(client, request)).await;

    match res {
        Ok(status) => HttpResult {
            status: Some(status.as_u16()),
            duration,
            error: None,
        },
        Err(err) => {
            debug!("GET {} failed: {err}", request.url);
            let status = match &err {
                RequestError::Status(status) => Some(status.as_u16()),
                RequestError::Transport(_) => None,
            };
            HttpResult {
                status,
                duration,
                error: Some(err.to_string()),
            }
        }
    }
}

async fn send(
    client: &Client,
    request: &RequestDescriptor,
) -> Result<StatusCode, RequestError> {
    let response = client
        .get(request.url.clone())
        .headers(request.headers.clone())
        .send()
        .await?;
    let status = response.status();
    // Drain the body so the timing covers the whole response.
    response.bytes().await?;

    if status.is_client_error() || status.is_server_error() {
        Err(RequestError::Status(status))
    } else {
        Ok(status)
    }
}
