//! Parameters for login and request log rows.

use uuid::Uuid;

use crate::server::util::client::ClientInfo;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginType {
    Success,
    Failure,
}

impl LoginType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoginType::Success => "success",
            LoginType::Failure => "failure",
        }
    }
}

/// One login attempt, successful or not.
#[derive(Debug, Clone)]
pub struct LoginAttempt {
    pub login_type: LoginType,
    /// Username as typed by the client
    pub username: String,
    /// Matched user, if any
    pub user_id: Option<Uuid>,
    pub client: ClientInfo,
}

/// One handled request, with sensitive values already masked.
#[derive(Debug, Clone)]
pub struct RequestLogParams {
    pub user_id: Option<Uuid>,
    pub api_key_id: Option<Uuid>,
    pub client_ip: Option<String>,
    pub method: String,
    pub scheme: String,
    pub http_host: String,
    pub path: String,
    pub query_string: Option<String>,
    pub uri: String,
    pub headers: String,
    pub content: String,
    pub status_code: i32,
    pub response_content_length: i64,
}

/// Rows removed by a log cleanup run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleanupResult {
    pub log_requests: u64,
    pub log_logins: u64,
}
