//! Busy indicator
//!
//! Handlers hold a [`BusyGuard`] while a ledger call is in flight. The
//! indicator clears when the last guard drops, so early returns and errors
//! cannot leave it stuck.

use std::sync::Arc;
use tokio::sync::watch;

/// Count of handlers currently in flight, observable by a renderer
#[derive(Debug, Clone)]
pub struct BusyIndicator {
    in_flight: Arc<watch::Sender<usize>>,
}

impl Default for BusyIndicator {
    fn default() -> Self {
        Self::new()
    }
}

impl BusyIndicator {
    /// Create an idle indicator
    pub fn new() -> Self {
        let (sender, _) = watch::channel(0);
        Self {
            in_flight: Arc::new(sender),
        }
    }

    /// Mark a handler as in flight until the guard drops
    pub fn begin(&self) -> BusyGuard {
        self.in_flight.send_modify(|count| *count += 1);
        BusyGuard {
            in_flight: Arc::clone(&self.in_flight),
        }
    }

    /// Whether any handler is in flight
    pub fn is_busy(&self) -> bool {
        *self.in_flight.borrow() > 0
    }

    /// Observe the in-flight count
    pub fn subscribe(&self) -> watch::Receiver<usize> {
        self.in_flight.subscribe()
    }
}

/// Keeps the indicator raised while alive
#[derive(Debug)]
pub struct BusyGuard {
    in_flight: Arc<watch::Sender<usize>>,
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.in_flight.send_modify(|count| *count = count.saturating_sub(1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_clears_on_drop() {
        let busy = BusyIndicator::new();
        assert!(!busy.is_busy());

        let guard = busy.begin();
        assert!(busy.is_busy());

        drop(guard);
        assert!(!busy.is_busy());
    }

    #[test]
    fn test_nested_guards() {
        let busy = BusyIndicator::new();
        let outer = busy.begin();
        let inner = busy.begin();

        drop(inner);
        assert!(busy.is_busy());
        drop(outer);
        assert!(!busy.is_busy());
    }

    #[test]
    fn test_early_return_clears() {
        fn failing(busy: &BusyIndicator) -> Result<(), &'static str> {
            let _guard = busy.begin();
            let reply: Result<(), &'static str> = Err("ledger down");
            reply?;
            Ok(())
        }

        let busy = BusyIndicator::new();
        assert!(failing(&busy).is_err());
        assert!(!busy.is_busy());
    }

    #[test]
    fn test_subscribers_see_changes() {
        let busy = BusyIndicator::new();
        let receiver = busy.subscribe();

        let guard = busy.begin();
        assert_eq!(*receiver.borrow(), 1);
        drop(guard);
        assert_eq!(*receiver.borrow(), 0);
    }
}
