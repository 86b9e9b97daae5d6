use poem::http::StatusCode;
use poem::{Endpoint, IntoResponse, Middleware, Request, Response};
use std::time::Instant;

/// Middleware that logs each HTTP request with its method, path, query,
/// status and duration
pub struct RequestLogging;

impl<E: Endpoint> Middleware<E> for RequestLogging {
    type Output = RequestLoggingEndpoint<E>;

    fn transform(&self, ep: E) -> Self::Output {
        RequestLoggingEndpoint { inner: ep }
    }
}

pub struct RequestLoggingEndpoint<E> {
    inner: E,
}

fn log_request(method: &str, path: &str, query: &str, status: StatusCode, duration_ms: u64) {
    let status = status.as_u16();
    if (400..600).contains(&status) {
        tracing::warn!(method, path, query, status, duration_ms, "request failed");
    } else {
        tracing::info!(method, path, query, status, duration_ms, "request completed");
    }
}

impl<E: Endpoint> Endpoint for RequestLoggingEndpoint<E> {
    type Output = Response;

    async fn call(&self, req: Request) -> poem::Result<Self::Output> {
        let start = Instant::now();
        let method = req.method().to_string();
        let path = req.uri().path().to_string();
        let query = req.uri().query().unwrap_or_default().to_string();

        match self.inner.call(req).await {
            Ok(resp) => {
                let resp = resp.into_response();
                log_request(
                    &method,
                    &path,
                    &query,
                    resp.status(),
                    start.elapsed().as_millis() as u64,
                );
                Ok(resp)
            }
            Err(err) => {
                tracing::error!(
                    method = %method,
                    path = %path,
                    status = err.status().as_u16(),
                    error = %err,
                    "request error"
                );
                Err(err)
            }
        }
    }
}
