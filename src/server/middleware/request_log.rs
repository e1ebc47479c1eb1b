use axum::{
    body::{Body, HttpBody},
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::Response,
};

use crate::server::{
    error::error_response,
    model::log::RequestLogParams,
    service::{auth::AuthService, log::LogService},
    state::AppState,
    util::{
        client::ClientInfo,
        mask::{mask_content, mask_headers},
    },
};

/// Largest request body buffered for the log, matches axum's default body limit.
const MAX_LOGGED_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Paths that are never written to the request log.
const SKIPPED_PREFIXES: [&str; 3] = ["/healthz", "/version", "/api/doc"];

fn is_skipped(path: &str) -> bool {
    SKIPPED_PREFIXES.iter().any(|prefix| {
        path == *prefix
            || path
                .strip_prefix(prefix)
                .is_some_and(|rest| rest.starts_with('/'))
    })
}

/// Writes every handled request to `log_request` once the response is ready.
///
/// The body is buffered so it can be stored and still be passed on to the handler.
/// Authorization and cookie headers and JSON `password` values are masked. The caller is
/// resolved from the `Authorization` header when it is valid; otherwise the row is
/// anonymous. Failing to store the row never fails the request.
pub async fn log_request(State(state): State<AppState>, request: Request, next: Next) -> Response {
    if is_skipped(request.uri().path()) {
        return next.run(request).await;
    }

    let (parts, body) = request.into_parts();

    let bytes = match axum::body::to_bytes(body, MAX_LOGGED_BODY_BYTES).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::debug!("Unable to buffer request body: {}", e);
            return error_response(StatusCode::PAYLOAD_TOO_LARGE, "Request body too large.");
        }
    };

    let authorization = parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());
    let principal = match authorization {
        Some(_) => AuthService::new(&state.db, &state.config)
            .authenticate(authorization)
            .await
            .ok(),
        None => None,
    };

    let client = ClientInfo::from_request(&parts.headers, &parts.extensions);

    let mut params = RequestLogParams {
        user_id: principal.as_ref().and_then(|p| p.user_id()),
        api_key_id: principal.as_ref().and_then(|p| p.api_key_id()),
        client_ip: client.ip,
        method: parts.method.to_string(),
        scheme: parts.uri.scheme_str().unwrap_or("http").to_string(),
        http_host: client
            .host
            .or_else(|| parts.uri.host().map(str::to_string))
            .unwrap_or_default(),
        path: parts.uri.path().to_string(),
        query_string: parts.uri.query().map(str::to_string),
        uri: parts.uri.to_string(),
        headers: mask_headers(&parts.headers),
        content: mask_content(&bytes),
        status_code: 0,
        response_content_length: 0,
    };

    let response = next.run(Request::from_parts(parts, Body::from(bytes))).await;

    params.status_code = i32::from(response.status().as_u16());
    params.response_content_length = response_length(&response);

    if let Err(e) = LogService::new(&state.db).record_request(params).await {
        tracing::error!("Failed to store request log: {}", e);
    }

    response
}

/// `Content-Length` when set, else the exact body size when known, else 0.
fn response_length(response: &Response) -> i64 {
    response
        .headers()
        .get(header::CONTENT_LENGTH)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse::<i64>().ok())
        .or_else(|| {
            response
                .body()
                .size_hint()
                .exact()
                .and_then(|len| i64::try_from(len).ok())
        })
        .unwrap_or(0)
}
