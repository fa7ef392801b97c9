//! Shared pool of pending work items.

use crate::types::WorkItem;
use std::collections::VecDeque;
use std::sync::Mutex;

/// A fully pre-populated queue drained by the worker pool.
///
/// Items are handed out in generation order and each item goes to exactly
/// one caller. Nothing is pushed after construction, so an empty queue
/// means the run is finished.
#[derive(Debug, Default)]
pub struct WorkQueue {
    items: Mutex<VecDeque<WorkItem>>,
}

impl WorkQueue {
    /// Create a queue holding all work for the run.
    pub fn new(items: Vec<WorkItem>) -> Self {
        Self {
            items: Mutex::new(items.into()),
        }
    }

    /// Take the next item, or `None` once the queue is drained.
    pub fn pop(&self) -> Option<WorkItem> {
        self.items
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .pop_front()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Port, Scheme};
    use std::collections::HashSet;
    use std::sync::Arc;

    fn items(n: u16) -> Vec<WorkItem> {
        (1..=n)
            .map(|p| WorkItem::new(Scheme::Http, "host", Port::new(p).unwrap()))
            .collect()
    }

    #[test]
    fn test_pop_in_order_until_empty() {
        let queue = WorkQueue::new(items(3));
        assert_eq!(queue.pop().map(|i| i.port.as_u16()), Some(1));
        assert_eq!(queue.pop().map(|i| i.port.as_u16()), Some(2));
        assert_eq!(queue.pop().map(|i| i.port.as_u16()), Some(3));
        assert!(queue.pop().is_none());
        assert!(queue.pop().is_none());
    }

    #[test]
    fn test_concurrent_pops_deliver_each_item_once() {
        let queue = Arc::new(WorkQueue::new(items(2000)));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let queue = Arc::clone(&queue);
                std::thread::spawn(move || {
                    let mut taken = Vec::new();
                    while let Some(item) = queue.pop() {
                        taken.push(item.port.as_u16());
                    }
                    taken
                })
            })
            .collect();

        let mut seen = HashSet::new();
        let mut total = 0;
        for handle in handles {
            for port in handle.join().unwrap() {
                total += 1;
                assert!(seen.insert(port), "port {} delivered twice", port);
            }
        }
        assert_eq!(total, 2000);
    }
}
