//! Prober trait abstraction.
//!
//! Defines the per-item probe interface used by the worker pool, together
//! with the result record a successful probe produces.

use crate::error::ProbeError;
use crate::types::WorkItem;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

/// Default User-Agent sent with every probe.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Ubuntu; Linux x86_64; rv:67.0) Gecko/20100101 Firefox/67.0";

/// How a response status is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusClass {
    /// 200.
    Success,
    /// Common error codes that may still carry a displayable page.
    Soft,
    /// 301 and 302; the title is replaced by a redirect label.
    Redirect,
    /// Anything else.
    Other,
}

impl StatusClass {
    /// Classify an HTTP status code.
    pub fn of(code: u16) -> Self {
        match code {
            200 => Self::Success,
            400 | 401 | 403 | 404 | 500 | 502 => Self::Soft,
            301 | 302 => Self::Redirect,
            _ => Self::Other,
        }
    }
}

impl fmt::Display for StatusClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Soft => write!(f, "soft"),
            Self::Redirect => write!(f, "redirect"),
            Self::Other => write!(f, "other"),
        }
    }
}

/// Outcome of one successful probe.
///
/// Created once by a prober and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeResult {
    /// `scheme://host:port/`.
    pub base_url: String,
    /// HTTP status code.
    pub status: u16,
    /// Extracted page title or synthesized redirect label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Response body length in bytes.
    pub length: usize,
    /// Value of the `Server` header.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server: Option<String>,
    /// Response headers; a repeated name keeps its last value.
    pub headers: BTreeMap<String, String>,
    /// Raw body text, kept only until the title is extracted.
    #[serde(skip)]
    pub body: String,
}

impl ProbeResult {
    /// Presentation class of this result's status.
    pub fn class(&self) -> StatusClass {
        StatusClass::of(self.status)
    }

    /// Look up a header by name, ignoring case.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Drop the body once it is no longer needed.
    pub fn without_body(mut self) -> Self {
        self.body = String::new();
        self
    }
}

/// Run-wide settings every probe uses.
#[derive(Debug, Clone)]
pub struct ProbeConfig {
    /// Hard per-request timeout.
    pub timeout: Duration,
    /// User-Agent header value.
    pub user_agent: String,
}

impl ProbeConfig {
    /// Create a probe configuration with the default User-Agent.
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    /// Set the User-Agent.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self::new(Duration::from_secs(6))
    }
}

/// Trait for probe implementations.
///
/// A probe either yields exactly one `ProbeResult` or an error; errors are
/// dropped by the worker pool and never reach the report.
///
/// # Example
///
/// ```ignore
/// use webmap::scanner::Prober;
///
/// async fn check<P: Prober>(prober: &P, item: &WorkItem) -> bool {
///     prober.probe(item).await.is_ok()
/// }
/// ```
#[async_trait]
pub trait Prober: Send + Sync {
    /// Probe a single work item.
    async fn probe(&self, item: &WorkItem) -> Result<ProbeResult, ProbeError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_class() {
        assert_eq!(StatusClass::of(200), StatusClass::Success);
        for code in [400, 401, 403, 404, 500, 502] {
            assert_eq!(StatusClass::of(code), StatusClass::Soft);
        }
        assert_eq!(StatusClass::of(301), StatusClass::Redirect);
        assert_eq!(StatusClass::of(302), StatusClass::Redirect);
        assert_eq!(StatusClass::of(307), StatusClass::Other);
        assert_eq!(StatusClass::of(204), StatusClass::Other);
    }

    #[test]
    fn test_header_lookup_ignores_case() {
        let mut headers = BTreeMap::new();
        headers.insert("server".to_string(), "nginx".to_string());
        let result = ProbeResult {
            base_url: "http://a:80/".to_string(),
            status: 200,
            title: None,
            length: 0,
            server: None,
            headers,
            body: "<html></html>".to_string(),
        };

        assert_eq!(result.header("Server"), Some("nginx"));
        assert_eq!(result.header("Location"), None);
        assert!(result.without_body().body.is_empty());
    }

    #[test]
    fn test_default_request_config() {
        let config = ProbeConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(6));
        assert_eq!(config.user_agent, DEFAULT_USER_AGENT);
    }
}
