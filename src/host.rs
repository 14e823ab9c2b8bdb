//! Host abstraction - the document a page is mounted into.
//!
//! A mounted page acquires two process-wide resources from its host (an
//! intersection observer and a scroll listener) and toggles the document's
//! page-level overflow while the overlay is open. Everything else the host
//! does (layout, painting, input) stays on the host side.
//!
//! [`MemoryHost`] is a headless host that records every call. It backs tests
//! and lets the state machines run without a document.

use std::cell::RefCell;
use std::rc::Rc;

use crate::config::RevealOptions;
use crate::types::{ElementId, Overflow};

/// Document-side operations a page needs.
pub trait PageHost {
    /// Start observing `targets` with the given options.
    fn observe(&mut self, targets: &[ElementId], options: &RevealOptions);

    /// Stop all observation.
    fn disconnect_observer(&mut self);

    fn add_scroll_listener(&mut self);

    fn remove_scroll_listener(&mut self);

    /// Current page-level overflow.
    fn overflow(&self) -> Overflow;

    fn set_overflow(&mut self, overflow: Overflow);
}

/// Host handle shared by the state owners of one page view.
pub type SharedHost = Rc<RefCell<dyn PageHost>>;

/// Wrap a concrete host for mounting.
pub fn share<H: PageHost + 'static>(host: H) -> (Rc<RefCell<H>>, SharedHost) {
    let concrete = Rc::new(RefCell::new(host));
    let shared: SharedHost = concrete.clone();
    (concrete, shared)
}

// =============================================================================
// MEMORY HOST
// =============================================================================

/// Headless host that records calls.
#[derive(Debug, Default)]
pub struct MemoryHost {
    pub overflow: Overflow,
    pub observed: Vec<ElementId>,
    pub observer_connected: bool,
    pub scroll_listener_attached: bool,
    pub observe_calls: usize,
    pub disconnect_calls: usize,
    pub listener_adds: usize,
    pub listener_removes: usize,
    /// Every overflow write, in order.
    pub overflow_writes: Vec<Overflow>,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Host whose document already has page scrolling suspended.
    pub fn with_overflow(overflow: Overflow) -> Self {
        Self {
            overflow,
            ..Self::default()
        }
    }

    pub fn is_scroll_locked(&self) -> bool {
        self.overflow == Overflow::Hidden
    }
}

impl PageHost for MemoryHost {
    fn observe(&mut self, targets: &[ElementId], _options: &RevealOptions) {
        self.observe_calls += 1;
        self.observer_connected = true;
        for &id in targets {
            if !self.observed.contains(&id) {
                self.observed.push(id);
            }
        }
    }

    fn disconnect_observer(&mut self) {
        self.disconnect_calls += 1;
        self.observer_connected = false;
        self.observed.clear();
    }

    fn add_scroll_listener(&mut self) {
        self.listener_adds += 1;
        self.scroll_listener_attached = true;
    }

    fn remove_scroll_listener(&mut self) {
        self.listener_removes += 1;
        self.scroll_listener_attached = false;
    }

    fn overflow(&self) -> Overflow {
        self.overflow
    }

    fn set_overflow(&mut self, overflow: Overflow) {
        self.overflow = overflow;
        self.overflow_writes.push(overflow);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_host_records_observer_lifecycle() {
        let mut host = MemoryHost::new();

        host.observe(&[ElementId(1), ElementId(2)], &RevealOptions::default());
        host.observe(&[ElementId(2), ElementId(3)], &RevealOptions::default());
        assert!(host.observer_connected);
        assert_eq!(host.observed, vec![ElementId(1), ElementId(2), ElementId(3)]);
        assert_eq!(host.observe_calls, 2);

        host.disconnect_observer();
        assert!(!host.observer_connected);
        assert!(host.observed.is_empty());
    }

    #[test]
    fn test_share_keeps_concrete_access() {
        let (concrete, shared) = share(MemoryHost::new());

        shared.borrow_mut().set_overflow(Overflow::Hidden);
        assert!(concrete.borrow().is_scroll_locked());
        assert_eq!(concrete.borrow().overflow_writes, vec![Overflow::Hidden]);
    }
}
