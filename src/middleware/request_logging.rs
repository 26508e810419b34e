use actix_web::dev::ServiceRequest;
use actix_web::http::header;
use tracing::Span;
use uuid::Uuid;

/// Identity of a request as it appears in logs and error tracking.
#[derive(Debug, Clone)]
pub struct RequestSummary {
    pub request_id: String,
    pub method: String,
    pub path: String,
}

impl RequestSummary {
    pub fn from_request(req: &ServiceRequest) -> Self {
        Self {
            request_id: Uuid::new_v4().to_string(),
            method: req.method().to_string(),
            path: req.path().to_string(),
        }
    }
}

/// Client address as resolved by actix-web's trusted proxy handling.
///
/// X-Forwarded-For is not parsed directly because clients can spoof it.
pub fn get_client_ip(req: &ServiceRequest) -> String {
    req.connection_info()
        .realip_remote_addr()
        .map(|addr| addr.to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

pub fn get_user_agent(req: &ServiceRequest) -> String {
    req.headers()
        .get(header::USER_AGENT)
        .and_then(|h| h.to_str().ok())
        .unwrap_or("unknown")
        .to_string()
}

pub fn create_request_span(summary: &RequestSummary, client_ip: &str, user_agent: &str) -> Span {
    tracing::info_span!(
        "request",
        request_id = %summary.request_id,
        method = %summary.method,
        path = %summary.path,
        client_ip = %client_ip,
        user_agent = %user_agent
    )
}

pub fn get_status_class(status: u16) -> &'static str {
    match status {
        200..=299 => "2xx",
        300..=399 => "3xx",
        400..=499 => "4xx",
        500..=599 => "5xx",
        _ => "unknown",
    }
}
