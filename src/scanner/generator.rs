//! Work item generation.

use crate::types::{PortCatalog, Scheme, WorkItem};

/// Cross every host with the catalog's ports.
///
/// All HTTP items come first, then all HTTPS items; within each block hosts
/// keep their input order and each host's ports keep catalog order. Nothing
/// is deduplicated.
pub fn generate_work<S: AsRef<str>>(hosts: &[S], catalog: &PortCatalog) -> Vec<WorkItem> {
    let blocks = [(Scheme::Http, &catalog.http), (Scheme::Https, &catalog.https)];

    let mut items = Vec::with_capacity(hosts.len() * catalog.per_host());
    for (scheme, ports) in blocks {
        for host in hosts {
            for &port in ports.ports() {
                items.push(WorkItem::new(scheme, host.as_ref().trim(), port));
            }
        }
    }
    items
}
