//! Request sequencing so that a slow, older response never overwrites the
//! result of a newer request.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Identifies one issued request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

impl Ticket {
    pub fn value(self) -> u64 {
        self.0
    }
}

/// Issues monotonically increasing tickets; only the latest is current.
///
/// Clones share the same counter, so a clone can be moved into a spawned
/// request task and checked when the response arrives.
#[derive(Debug, Clone, Default)]
pub struct Sequencer {
    latest: Arc<AtomicU64>,
}

impl Sequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a ticket for a new request, superseding all earlier ones.
    pub fn issue(&self) -> Ticket {
        Ticket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// True if no newer ticket has been issued since `ticket`.
    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }

    /// An independent sequencer that starts at this one's latest ticket.
    /// Tickets issued by either afterwards do not affect the other.
    pub fn detached(&self) -> Self {
        Self { latest: Arc::new(AtomicU64::new(self.latest.load(Ordering::SeqCst))) }
    }

    /// Returns `value` only if `ticket` is still current.
    pub fn accept<T>(&self, ticket: Ticket, value: T) -> Option<T> {
        self.is_current(ticket).then_some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_detached_counts_separately() {
        let seq = Sequencer::new();
        let pending = seq.issue();
        let copy = seq.detached();
        assert!(copy.is_current(pending));

        copy.issue();
        assert!(seq.is_current(pending));
        assert!(!copy.is_current(pending));
    }

    #[test]
    fn test_tickets_increase() {
        let seq = Sequencer::new();
        let a = seq.issue();
        let b = seq.issue();
        assert!(b > a);
        assert_eq!(a.value() + 1, b.value());
    }

    #[test]
    fn test_only_latest_is_current() {
        let seq = Sequencer::new();
        let first = seq.issue();
        assert!(seq.is_current(first));

        let second = seq.issue();
        assert!(!seq.is_current(first));
        assert!(seq.is_current(second));

        assert_eq!(seq.accept(first, "stale"), None);
        assert_eq!(seq.accept(second, "fresh"), Some("fresh"));
    }

    #[test]
    fn test_clones_share_counter() {
        let seq = Sequencer::new();
        let clone = seq.clone();
        let ticket = seq.issue();
        clone.issue();
        assert!(!seq.is_current(ticket));
    }

    #[tokio::test(start_paused = true)]
    async fn test_out_of_order_responses() {
        let seq = Sequencer::new();

        let slow = {
            let seq = seq.clone();
            let ticket = seq.issue();
            tokio::spawn(async move {
                tokio::time::sleep(Duration::from_millis(500)).await;
                seq.accept(ticket, "slow")
            })
        };
        let fast = {
            let seq = seq.clone();
            let ticket = seq.issue();
            tokio::spawn(async move {
                tokio::time::sleep(Duration::from_millis(50)).await;
                seq.accept(ticket, "fast")
            })
        };

        assert_eq!(fast.await.unwrap(), Some("fast"));
        assert_eq!(slow.await.unwrap(), None);
    }
}
