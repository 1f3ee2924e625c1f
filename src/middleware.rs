//! Request timing: logs the elapsed time per request and reports it in `X-Process-Time`.

use axum::{
    extract::Request,
    http::HeaderValue,
    middleware::Next,
    response::Response,
};
use std::time::Instant;

pub const PROCESS_TIME_HEADER: &str = "x-process-time";

pub async fn process_time(request: Request, next: Next) -> Response {
    let path = request.uri().path().to_owned();
    let started = Instant::now();
    let mut response = next.run(request).await;
    let elapsed = started.elapsed().as_secs_f64();
    if let Ok(value) = HeaderValue::from_str(&format!("{:.6}", elapsed)) {
        response.headers_mut().insert(PROCESS_TIME_HEADER, value);
    }
    tracing::info!(path = %path, status = response.status().as_u16(), "request to {} took {:.4} seconds", path, elapsed);
    response
}
