//! Scroll State Module
//!
//! Tracks the document's vertical scroll offset and derives whether the
//! navigation chrome should switch to its solid style:
//! - `position` = last applied offset (reactive signal)
//! - `chrome_solid` = position strictly greater than the threshold
//!
//! With `coalesce_per_frame` enabled, scroll events only record the latest
//! offset and [`ScrollState::flush_frame`] applies it once per animation
//! frame. The final value, and so the threshold flip, is the same either way.

use spark_signals::{signal, Signal};
use tracing::{debug, info};

use crate::config::ScrollOptions;
use crate::host::SharedHost;

// =============================================================================
// SCROLL CONSTANTS
// =============================================================================

/// Default offset past which the chrome turns solid.
pub const SOLID_THRESHOLD: u32 = 50;

/// Derived chrome signal for an offset.
#[inline]
pub fn chrome_solid(position: u32, threshold: u32) -> bool {
    position > threshold
}

// =============================================================================
// SCROLL STATE
// =============================================================================

pub struct ScrollState {
    host: SharedHost,
    options: ScrollOptions,
    position: Signal<u32>,
    pending: Option<u32>,
    listening: bool,
}

impl ScrollState {
    pub fn new(host: SharedHost, options: ScrollOptions) -> Self {
        Self {
            host,
            options,
            position: signal(0),
            pending: None,
            listening: false,
        }
    }

    /// Attach the host scroll listener. Idempotent.
    pub fn attach(&mut self) {
        if self.listening {
            return;
        }
        self.host.borrow_mut().add_scroll_listener();
        self.listening = true;
        info!(
            "scroll: listener attached (coalesce_per_frame={})",
            self.options.coalesce_per_frame
        );
    }

    // =========================================================================
    // SCROLL EVENTS
    // =========================================================================

    /// Handle a scroll event.
    ///
    /// Returns `true` if the offset was applied immediately, `false` if it was
    /// deferred to the next frame or the listener is detached.
    pub fn on_scroll(&mut self, offset: u32) -> bool {
        if !self.listening {
            return false;
        }

        if self.options.coalesce_per_frame {
            self.pending = Some(offset);
            return false;
        }

        self.apply(offset);
        true
    }

    /// Apply the latest coalesced offset, if any.
    ///
    /// Returns `true` if an offset was pending.
    pub fn flush_frame(&mut self) -> bool {
        match self.pending.take() {
            Some(offset) if self.listening => {
                self.apply(offset);
                true
            }
            _ => false,
        }
    }

    fn apply(&mut self, offset: u32) {
        let was_solid = self.chrome_solid();
        self.position.set(offset);

        let solid = self.chrome_solid();
        if solid != was_solid {
            debug!("scroll: chrome solid={} at offset {}", solid, offset);
        }
    }

    // =========================================================================
    // STATE ACCESS
    // =========================================================================

    pub fn position(&self) -> u32 {
        self.position.get()
    }

    pub fn chrome_solid(&self) -> bool {
        chrome_solid(self.position.get(), self.options.solid_threshold)
    }

    /// Offset signal for reactive tracking.
    pub fn position_signal(&self) -> Signal<u32> {
        self.position.clone()
    }

    pub fn threshold(&self) -> u32 {
        self.options.solid_threshold
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn is_listening(&self) -> bool {
        self.listening
    }

    // =========================================================================
    // TEARDOWN
    // =========================================================================

    /// Remove the scroll listener. Idempotent.
    pub fn teardown(&mut self) {
        self.pending = None;
        if !self.listening {
            return;
        }
        self.listening = false;
        self.host.borrow_mut().remove_scroll_listener();
        info!("scroll: listener removed");
    }
}
