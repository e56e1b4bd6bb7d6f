use reqwest::StatusCode;
use serde::Deserialize;

/// Errors surfaced by [`RegistryClient`](crate::client::RegistryClient).
///
/// [`Transport`](Self::Transport) means the server could not be reached;
/// every other variant means the server (or client-side validation)
/// rejected the operation.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// Malformed caller input, detected locally or reported as 400/422.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The referenced group, artifact or version does not exist (404).
    #[error("Not found: {0}")]
    NotFound(String),

    /// The identifier or version label is already taken (409).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Connection refused, DNS, TLS, timeout or an interrupted body.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Any other non-2xx status, or a response body of unexpected shape.
    #[error("Registry server error ({status}): {message}")]
    Server { status: u16, message: String },
}

impl RegistryError {
    /// `true` when the failure happened before the server could answer.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Classify a non-success response by status code.
    pub fn from_response(status: StatusCode, body: &str) -> Self {
        let message = problem_message(body);
        match status {
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => Self::Validation(message),
            StatusCode::NOT_FOUND => Self::NotFound(message),
            StatusCode::CONFLICT => Self::Conflict(message),
            other => Self::Server {
                status: other.as_u16(),
                message,
            },
        }
    }

    /// A 2xx response whose body could not be decoded.
    pub fn malformed(status: StatusCode, detail: impl std::fmt::Display) -> Self {
        Self::Server {
            status: status.as_u16(),
            message: format!("malformed response: {detail}"),
        }
    }
}

/// RFC 7807 problem details, as the registry reports errors.
#[derive(Debug, Deserialize)]
struct ProblemDetails {
    #[serde(default)]
    detail: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Pick the most specific human-readable message out of an error body.
fn problem_message(body: &str) -> String {
    serde_json::from_str::<ProblemDetails>(body)
        .ok()
        .and_then(|p| p.detail.or(p.title).or(p.message))
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| {
            let trimmed = body.trim();
            if trimmed.is_empty() {
                "<empty body>".to_string()
            } else {
                trimmed.to_string()
            }
        })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn status_codes_map_to_variants() {
        assert_matches!(
            RegistryError::from_response(StatusCode::BAD_REQUEST, ""),
            RegistryError::Validation(_)
        );
        assert_matches!(
            RegistryError::from_response(StatusCode::NOT_FOUND, ""),
            RegistryError::NotFound(_)
        );
        assert_matches!(
            RegistryError::from_response(StatusCode::CONFLICT, ""),
            RegistryError::Conflict(_)
        );
        assert_matches!(
            RegistryError::from_response(StatusCode::BAD_GATEWAY, ""),
            RegistryError::Server { status: 502, .. }
        );
    }

    #[test]
    fn problem_detail_preferred_over_title() {
        let body = r#"{"title": "Conflict", "detail": "Artifact 'a' already exists", "status": 409}"#;
        let err = RegistryError::from_response(StatusCode::CONFLICT, body);
        assert_matches!(err, RegistryError::Conflict(msg) if msg == "Artifact 'a' already exists");
    }

    #[test]
    fn plain_text_body_used_verbatim() {
        let err = RegistryError::from_response(StatusCode::INTERNAL_SERVER_ERROR, " boom \n");
        assert_eq!(err.to_string(), "Registry server error (500): boom");
    }

    #[test]
    fn empty_body_gets_placeholder() {
        let err = RegistryError::from_response(StatusCode::NOT_FOUND, "");
        assert_eq!(err.to_string(), "Not found: <empty body>");
    }

    #[test]
    fn transport_errors_are_distinguishable() {
        let req_err = reqwest::Client::new().get("://bad").build().unwrap_err();
        let err = RegistryError::from(req_err);
        assert!(err.is_transport());
        assert!(!RegistryError::NotFound("x".into()).is_transport());
    }

    #[test]
    fn malformed_is_a_server_error() {
        let err = RegistryError::malformed(StatusCode::OK, "missing field `artifactId`");
        assert_matches!(err, RegistryError::Server { status: 200, ref message } if message.starts_with("malformed response"));
    }
}
