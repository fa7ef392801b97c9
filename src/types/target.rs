//! Host specification parsing and range expansion.
//!
//! Each input line is one of:
//! - a single IP address (IPv4 or IPv6)
//! - a CIDR block (192.168.1.0/24), expanded to every address it covers
//! - anything else, passed through literally as a hostname
//!
//! Expansion is lenient: a line that looks like a block but cannot be
//! expanded is probed as written.

use ipnetwork::IpNetwork;
use std::fs;
use std::net::IpAddr;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Error type for reading target lists.
#[derive(Debug, Clone, thiserror::Error)]
pub enum TargetError {
    #[error("failed to read {path}: {reason}")]
    ReadFailed { path: PathBuf, reason: String },
    #[error("invalid CIDR notation: {0}")]
    InvalidCidr(String),
    #[error("CIDR range too large: {0} addresses (max: {1})")]
    CidrTooLarge(u128, u128),
}

/// A parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostSpec {
    /// A single IP address.
    Single(IpAddr),
    /// A CIDR network range.
    Cidr(IpNetwork),
    /// A hostname, or a line that could not be expanded.
    Literal(String),
}

impl HostSpec {
    /// Maximum number of addresses a single block may expand to.
    pub const MAX_CIDR_HOSTS: u128 = 65536;

    /// Parse one input line, falling back to a literal on any failure.
    pub fn parse(line: &str) -> Self {
        let s = line.trim();

        if let Ok(ip) = s.parse::<IpAddr>() {
            return Self::Single(ip);
        }

        if s.contains('/') {
            match parse_cidr(s) {
                Ok(network) => return Self::Cidr(network),
                Err(e) => debug!(entry = s, error = %e, "probing entry unexpanded"),
            }
        }

        Self::Literal(s.to_string())
    }

    /// Expand to the host strings that will be probed.
    pub fn expand(&self) -> Vec<String> {
        match self {
            Self::Single(ip) => vec![ip.to_string()],
            Self::Cidr(network) => network.iter().map(|ip| ip.to_string()).collect(),
            Self::Literal(host) => vec![host.clone()],
        }
    }
}

fn parse_cidr(s: &str) -> Result<IpNetwork, TargetError> {
    let network: IpNetwork = s
        .parse()
        .map_err(|_| TargetError::InvalidCidr(s.to_string()))?;

    // A /0 block does not fit the count type; report it as saturated.
    let host_bits = match network {
        IpNetwork::V4(net) => 32 - u32::from(net.prefix()),
        IpNetwork::V6(net) => 128 - u32::from(net.prefix()),
    };
    let host_count = 1u128.checked_shl(host_bits).unwrap_or(u128::MAX);
    if host_count > HostSpec::MAX_CIDR_HOSTS {
        return Err(TargetError::CidrTooLarge(host_count, HostSpec::MAX_CIDR_HOSTS));
    }

    Ok(network)
}

/// Expand raw input lines into a flat, ordered host list.
///
/// Blank lines are skipped. Duplicates are kept.
pub fn expand_hosts<I, S>(lines: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lines
        .into_iter()
        .filter(|line| !line.as_ref().trim().is_empty())
        .flat_map(|line| HostSpec::parse(line.as_ref()).expand())
        .collect()
}

/// Read a target file, one entry per line, and expand it.
pub fn load_hosts(path: &Path) -> Result<Vec<String>, TargetError> {
    let content = fs::read_to_string(path).map_err(|e| TargetError::ReadFailed {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    Ok(expand_hosts(content.lines()))
}
