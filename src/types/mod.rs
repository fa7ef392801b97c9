//! Core type definitions using newtype patterns for type safety.
//!
//! These types prevent common logic errors by making invalid states unrepresentable
//! at compile time.

mod port;
mod target;
mod work_item;

pub use port::{Port, PortCatalog, PortError, PortList};
pub use target::{expand_hosts, load_hosts, HostSpec, TargetError};
pub use work_item::{Scheme, WorkItem};
