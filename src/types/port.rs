//! Port types with validation and parsing.
//!
//! The `Port` newtype ensures values are always valid port numbers (1-65535).
//! `PortList` handles user-supplied port lists and `PortCatalog` pairs the
//! HTTP and HTTPS lists probed on every host.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A validated network port number (1-65535).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct Port(u16);

impl Port {
    /// Minimum valid port number.
    pub const MIN: u16 = 1;
    /// Maximum valid port number.
    pub const MAX: u16 = 65535;

    /// Create a new Port from a u16, returning None if invalid.
    #[inline]
    pub const fn new(port: u16) -> Option<Self> {
        if port >= Self::MIN {
            Some(Self(port))
        } else {
            None
        }
    }

    /// Get the raw port number.
    #[inline]
    pub const fn as_u16(self) -> u16 {
        self.0
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u16> for Port {
    type Error = PortError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(PortError::OutOfRange(value))
    }
}

impl From<Port> for u16 {
    fn from(port: Port) -> Self {
        port.0
    }
}

/// Error type for port parsing and validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PortError {
    #[error("port {0} is out of valid range (1-65535)")]
    OutOfRange(u16),
    #[error("invalid port number: {0}")]
    InvalidFormat(String),
    #[error("invalid port range: start ({0}) > end ({1})")]
    InvalidRange(u16, u16),
    #[error("empty port specification")]
    Empty,
}

/// An ordered list of ports.
///
/// Order is kept as written and repeated ports are not removed, so
/// `"80,8080,80"` yields three entries.
///
/// Supports formats like:
/// - Single port: "80"
/// - Comma-separated: "80,443,8080"
/// - Range: "8000-8010"
/// - Mixed: "80,3000,8000-8010"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PortList(Vec<Port>);

impl PortList {
    /// Build a list from raw port numbers known to be non-zero.
    fn from_static(ports: &[u16]) -> Self {
        Self(ports.iter().filter_map(|&p| Port::new(p)).collect())
    }

    /// Ports in configured order.
    pub fn ports(&self) -> &[Port] {
        &self.0
    }

    /// Number of entries, counting repeats.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<Port>> for PortList {
    fn from(ports: Vec<Port>) -> Self {
        Self(ports)
    }
}

impl FromStr for PortList {
    type Err = PortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(PortError::Empty);
        }

        let mut ports = Vec::new();

        for part in s.split(',') {
            let part = part.trim();
            if let Some((start, end)) = part.split_once('-') {
                let start = parse_port(start)?;
                let end = parse_port(end)?;
                if start > end {
                    return Err(PortError::InvalidRange(start.0, end.0));
                }
                ports.extend((start.0..=end.0).map(Port));
            } else {
                ports.push(parse_port(part)?);
            }
        }

        Ok(Self(ports))
    }
}

fn parse_port(raw: &str) -> Result<Port, PortError> {
    let raw = raw.trim();
    let value: u16 = raw
        .parse()
        .map_err(|_| PortError::InvalidFormat(raw.to_string()))?;
    Port::try_from(value)
}

impl fmt::Display for PortList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|p| p.to_string()).collect();
        write!(f, "{}", parts.join(","))
    }
}

/// The ports probed on every host, per scheme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortCatalog {
    pub http: PortList,
    pub https: PortList,
}

impl PortCatalog {
    /// Common plain-HTTP ports.
    pub const DEFAULT_HTTP: [u16; 15] = [
        80, 3000, 3128, 8000, 8001, 8080, 8081, 8083, 8084, 8085, 8086, 8087, 8088, 8089, 8888,
    ];
    /// Common TLS ports.
    pub const DEFAULT_HTTPS: [u16; 3] = [443, 4443, 8443];
    /// Plain-HTTP ports probed in fast mode.
    pub const FAST_HTTP: [u16; 2] = [80, 8080];
    /// TLS ports probed in fast mode.
    pub const FAST_HTTPS: [u16; 1] = [443];

    /// Create a catalog from explicit lists.
    pub fn new(http: PortList, https: PortList) -> Self {
        Self { http, https }
    }

    /// The full catalog of common web ports.
    pub fn full() -> Self {
        Self::new(
            PortList::from_static(&Self::DEFAULT_HTTP),
            PortList::from_static(&Self::DEFAULT_HTTPS),
        )
    }

    /// The minimal catalog used in fast mode.
    pub fn fast() -> Self {
        Self::new(
            PortList::from_static(&Self::FAST_HTTP),
            PortList::from_static(&Self::FAST_HTTPS),
        )
    }

    /// Number of probes generated per host.
    pub fn per_host(&self) -> usize {
        self.http.len() + self.https.len()
    }
}

impl Default for PortCatalog {
    fn default() -> Self {
        Self::full()
    }
}
