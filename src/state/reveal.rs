//! Reveal Engine - One-way visibility latches for scroll-reveal elements
//!
//! Observes a set of tagged elements and latches each to visible the first
//! time an intersection entry reports it past the threshold:
//! - Threshold: at least `threshold` of the element's area inside the root
//! - Root: the viewport trimmed by `root_margin_bottom` pixels at the bottom
//! - Latched elements are never re-evaluated
//!
//! # Example
//!
//! ```ignore
//! let mut engine = RevealEngine::new(host, RevealOptions::default());
//! engine.register([ElementId(1), ElementId(2)]);
//!
//! engine.observe(&[IntersectionEntry::new(ElementId(1), 0.4, true)]);
//! assert!(engine.is_visible(ElementId(1)));
//!
//! engine.teardown();
//! ```

use std::collections::BTreeMap;

use spark_signals::{signal, Signal};
use tracing::{debug, info};

use crate::config::RevealOptions;
use crate::host::SharedHost;
use crate::types::{ElementId, IntersectionEntry};

pub struct RevealEngine {
    host: SharedHost,
    options: RevealOptions,
    elements: BTreeMap<ElementId, Signal<bool>>,
    connected: bool,
    torn_down: bool,
}

impl RevealEngine {
    pub fn new(host: SharedHost, options: RevealOptions) -> Self {
        Self {
            host,
            options,
            elements: BTreeMap::new(),
            connected: false,
            torn_down: false,
        }
    }

    // =========================================================================
    // REGISTRATION
    // =========================================================================

    /// Begin observing a set of elements.
    ///
    /// New elements start hidden. Elements already registered keep their
    /// latch. Does nothing after teardown.
    pub fn register(&mut self, ids: impl IntoIterator<Item = ElementId>) {
        if self.torn_down {
            debug!("reveal: register after teardown ignored");
            return;
        }

        let mut pending = Vec::new();
        for id in ids {
            let latch = self.elements.entry(id).or_insert_with(|| signal(false));
            if !latch.get() && !pending.contains(&id) {
                pending.push(id);
            }
        }

        if pending.is_empty() {
            return;
        }

        self.host.borrow_mut().observe(&pending, &self.options);
        self.connected = true;
        info!("reveal: observing {} element(s)", pending.len());
    }

    // =========================================================================
    // OBSERVATION
    // =========================================================================

    /// Handle one observer callback batch.
    ///
    /// Returns the number of elements newly latched by this batch.
    pub fn observe(&mut self, entries: &[IntersectionEntry]) -> usize {
        if !self.connected {
            return 0;
        }

        let mut revealed = 0;
        for entry in entries {
            let Some(latch) = self.elements.get(&entry.target) else {
                continue;
            };

            if latch.get() {
                continue;
            }

            if entry.crosses(self.options.threshold) {
                latch.set(true);
                revealed += 1;
                debug!(
                    "reveal: {} latched visible at ratio {:.2}",
                    entry.target, entry.ratio
                );
            }
        }

        revealed
    }

    // =========================================================================
    // STATE ACCESS
    // =========================================================================

    /// Whether an element has been revealed. Unknown elements are hidden.
    pub fn is_visible(&self, id: ElementId) -> bool {
        self.elements.get(&id).map(|latch| latch.get()).unwrap_or(false)
    }

    /// Registered elements with their latch signals, in id order.
    pub fn latches(&self) -> Vec<(ElementId, Signal<bool>)> {
        self.elements
            .iter()
            .map(|(id, latch)| (*id, latch.clone()))
            .collect()
    }

    /// Number of elements still waiting for their reveal.
    pub fn pending_count(&self) -> usize {
        self.elements.values().filter(|latch| !latch.get()).count()
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    pub fn options(&self) -> &RevealOptions {
        &self.options
    }

    // =========================================================================
    // TEARDOWN
    // =========================================================================

    /// Stop all observation. Idempotent.
    pub fn teardown(&mut self) {
        self.torn_down = true;
        if !self.connected {
            return;
        }

        self.connected = false;
        self.host.borrow_mut().disconnect_observer();
        info!("reveal: observer disconnected");
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{share, MemoryHost};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn setup() -> (Rc<RefCell<MemoryHost>>, RevealEngine) {
        let (host, shared) = share(MemoryHost::new());
        let engine = RevealEngine::new(shared, RevealOptions::default());
        (host, engine)
    }

    fn entry(id: u32, ratio: f32) -> IntersectionEntry {
        IntersectionEntry::new(ElementId(id), ratio, ratio > 0.0)
    }

    #[test]
    fn test_register_starts_hidden_and_observes() {
        let (host, mut engine) = setup();

        engine.register([ElementId(1), ElementId(2)]);

        assert!(!engine.is_visible(ElementId(1)));
        assert!(!engine.is_visible(ElementId(2)));
        assert_eq!(engine.pending_count(), 2);
        assert!(engine.is_connected());
        assert_eq!(host.borrow().observed, vec![ElementId(1), ElementId(2)]);
    }

    #[test]
    fn test_entry_past_threshold_latches() {
        let (_host, mut engine) = setup();
        engine.register([ElementId(1)]);

        assert_eq!(engine.observe(&[entry(1, 0.1)]), 1);
        assert!(engine.is_visible(ElementId(1)));
        assert_eq!(engine.pending_count(), 0);
    }

    #[test]
    fn test_entry_below_threshold_does_not_latch() {
        let (_host, mut engine) = setup();
        engine.register([ElementId(1)]);

        assert_eq!(engine.observe(&[entry(1, 0.05)]), 0);
        assert!(!engine.is_visible(ElementId(1)));

        // Intersecting flag alone is not enough
        engine.observe(&[IntersectionEntry::new(ElementId(1), 0.0, true)]);
        assert!(!engine.is_visible(ElementId(1)));
    }

    #[test]
    fn test_latch_never_reverts() {
        let (_host, mut engine) = setup();
        engine.register([ElementId(1)]);

        engine.observe(&[entry(1, 0.8)]);
        assert!(engine.is_visible(ElementId(1)));

        // Leaves the viewport, then hovers below the threshold
        assert_eq!(engine.observe(&[entry(1, 0.0)]), 0);
        assert_eq!(engine.observe(&[entry(1, 0.02)]), 0);
        assert!(engine.is_visible(ElementId(1)));

        // Crossing again is not a second reveal
        assert_eq!(engine.observe(&[entry(1, 1.0)]), 0);
    }

    #[test]
    fn test_batch_reveals_independently() {
        let (_host, mut engine) = setup();
        engine.register([ElementId(1), ElementId(2), ElementId(3)]);

        let revealed = engine.observe(&[entry(1, 0.5), entry(2, 0.01), entry(3, 0.2)]);

        assert_eq!(revealed, 2);
        assert!(engine.is_visible(ElementId(1)));
        assert!(!engine.is_visible(ElementId(2)));
        assert!(engine.is_visible(ElementId(3)));
    }

    #[test]
    fn test_unknown_target_ignored() {
        let (_host, mut engine) = setup();
        engine.register([ElementId(1)]);

        assert_eq!(engine.observe(&[entry(99, 1.0)]), 0);
        assert!(!engine.is_visible(ElementId(99)));
    }

    #[test]
    fn test_reregister_keeps_latch() {
        let (host, mut engine) = setup();
        engine.register([ElementId(1)]);
        engine.observe(&[entry(1, 1.0)]);

        engine.register([ElementId(1), ElementId(2)]);

        assert!(engine.is_visible(ElementId(1)));
        assert!(!engine.is_visible(ElementId(2)));
        // Only the new, unlatched element went to the host
        assert_eq!(host.borrow().observe_calls, 2);
    }

    #[test]
    fn test_teardown_disconnects_once() {
        let (host, mut engine) = setup();
        engine.register([ElementId(1)]);

        engine.teardown();
        engine.teardown();

        assert!(!engine.is_connected());
        assert_eq!(host.borrow().disconnect_calls, 1);
        assert!(!host.borrow().observer_connected);
    }

    #[test]
    fn test_entries_after_teardown_ignored() {
        let (_host, mut engine) = setup();
        engine.register([ElementId(1), ElementId(2)]);
        engine.observe(&[entry(1, 1.0)]);

        engine.teardown();

        assert_eq!(engine.observe(&[entry(2, 1.0)]), 0);
        assert!(engine.is_visible(ElementId(1)));
        assert!(!engine.is_visible(ElementId(2)));

        engine.register([ElementId(3)]);
        assert!(!engine.is_connected());
    }

    #[test]
    fn test_latch_signals_track_state() {
        let (_host, mut engine) = setup();
        engine.register([ElementId(2), ElementId(1)]);

        let latches = engine.latches();
        assert_eq!(latches[0].0, ElementId(1));
        assert!(!latches[0].1.get());

        engine.observe(&[entry(1, 0.5)]);
        assert!(latches[0].1.get());
    }
}
