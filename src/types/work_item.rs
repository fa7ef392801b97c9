//! The unit of work handed to a prober.

use super::Port;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Application protocol used for a probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scheme {
    Http,
    Https,
}

impl Scheme {
    /// URL scheme string.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Http => "http",
            Self::Https => "https",
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One (scheme, host, port) probe target.
///
/// Identity is the triple itself. Duplicate items are probed independently.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WorkItem {
    pub scheme: Scheme,
    pub host: String,
    pub port: Port,
}

impl WorkItem {
    /// Create a new work item.
    pub fn new(scheme: Scheme, host: impl Into<String>, port: Port) -> Self {
        Self {
            scheme,
            host: host.into(),
            port,
        }
    }

    /// `scheme://host:port/`, with IPv6 literals bracketed.
    pub fn base_url(&self) -> String {
        let host = self.host.trim();
        if host.contains(':') && !host.starts_with('[') {
            format!("{}://[{}]:{}/", self.scheme, host, self.port)
        } else {
            format!("{}://{}:{}/", self.scheme, host, self.port)
        }
    }
}
