//! Explicit outcome of a remote call.

use std::fmt;

use serde_json::{Map, Value};

/// What happened when the remote authority was consulted.
///
/// Only [`RemoteOutcome::Response`] carries data; every other variant means
/// "no override" and the caller falls back to local logic.
#[derive(Debug, Clone, PartialEq)]
pub enum RemoteOutcome {
    /// A well-formed JSON object.
    Response(Map<String, Value>),
    /// No endpoint configured; no I/O was attempted.
    NotConfigured,
    /// The call did not complete within its budget.
    Timeout,
    /// The endpoint could not be reached.
    ConnectionError(String),
    /// The endpoint answered with a non-success status.
    Status(u16),
    /// The endpoint answered with an empty body.
    EmptyBody,
    /// The body was not valid JSON.
    ParseError(String),
    /// The body was JSON but not an object.
    NotAnObject,
}

impl RemoteOutcome {
    /// Response data, if any.
    #[must_use]
    pub fn into_override(self) -> Option<Map<String, Value>> {
        match self {
            Self::Response(map) => Some(map),
            _ => None,
        }
    }

    /// Borrow the response data, if any.
    #[must_use]
    pub fn as_override(&self) -> Option<&Map<String, Value>> {
        match self {
            Self::Response(map) => Some(map),
            _ => None,
        }
    }

    /// Whether the remote produced data.
    #[must_use]
    pub fn is_response(&self) -> bool {
        matches!(self, Self::Response(_))
    }

    /// Short label for logs.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Response(_) => "response",
            Self::NotConfigured => "not-configured",
            Self::Timeout => "timeout",
            Self::ConnectionError(_) => "connection-error",
            Self::Status(_) => "status",
            Self::EmptyBody => "empty-body",
            Self::ParseError(_) => "parse-error",
            Self::NotAnObject => "not-an-object",
        }
    }

    /// Classify a raw response body.
    #[must_use]
    pub fn from_body(body: &str) -> Self {
        let body = body.trim();
        if body.is_empty() {
            return Self::EmptyBody;
        }
        match serde_json::from_str::<Value>(body) {
            Ok(Value::Object(map)) => Self::Response(map),
            Ok(_) => Self::NotAnObject,
            Err(e) => Self::ParseError(e.to_string()),
        }
    }
}

impl fmt::Display for RemoteOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Response(map) => write!(f, "response ({} keys)", map.len()),
            Self::ConnectionError(e) => write!(f, "connection error: {e}"),
            Self::Status(code) => write!(f, "status {code}"),
            Self::ParseError(e) => write!(f, "parse error: {e}"),
            other => f.write_str(other.label()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_body() {
        assert_eq!(RemoteOutcome::from_body(""), RemoteOutcome::EmptyBody);
        assert_eq!(RemoteOutcome::from_body(" \n"), RemoteOutcome::EmptyBody);
        assert_eq!(RemoteOutcome::from_body("[1]"), RemoteOutcome::NotAnObject);
        assert_eq!(RemoteOutcome::from_body("null"), RemoteOutcome::NotAnObject);
        assert!(matches!(RemoteOutcome::from_body("{oops"), RemoteOutcome::ParseError(_)));

        let ok = RemoteOutcome::from_body(r#"{"classification": {"risk": "low"}}"#);
        assert!(ok.is_response());
        assert!(ok.into_override().unwrap().contains_key("classification"));
    }

    #[test]
    fn test_only_response_overrides() {
        for outcome in [
            RemoteOutcome::NotConfigured,
            RemoteOutcome::Timeout,
            RemoteOutcome::ConnectionError("refused".into()),
            RemoteOutcome::Status(500),
            RemoteOutcome::EmptyBody,
            RemoteOutcome::ParseError("eof".into()),
            RemoteOutcome::NotAnObject,
        ] {
            assert!(outcome.as_override().is_none(), "{outcome}");
            assert!(outcome.into_override().is_none());
        }
    }
}
