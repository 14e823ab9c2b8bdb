//! Menu Controller - Mobile navigation overlay and overlay lock
//!
//! Owns the overlay's open state and the page scroll suspension that goes
//! with it:
//! - Opening acquires a [`ScrollLock`] (prior overflow recorded, page hidden)
//! - Closing releases it (prior overflow restored)
//! - Each open period restores exactly once, however it ends
//!
//! Overlay items close the menu when activated and hand their link back to
//! the host, which still follows it.

use spark_signals::{signal, Signal};
use tracing::{debug, info};

use crate::config::{MenuOptions, NavItem};
use crate::host::SharedHost;
use crate::types::Overflow;

// =============================================================================
// SCROLL LOCK
// =============================================================================

/// Page scroll suspension held while the overlay is open.
///
/// Released by [`ScrollLock::release`] or on drop, whichever comes first.
pub struct ScrollLock {
    host: SharedHost,
    prior: Overflow,
    released: bool,
}

impl ScrollLock {
    /// Suspend page scrolling, remembering the current overflow.
    pub fn acquire(host: SharedHost) -> Self {
        let prior = {
            let mut host = host.borrow_mut();
            let prior = host.overflow();
            host.set_overflow(Overflow::Hidden);
            prior
        };
        debug!("menu: page scroll locked (prior {:?})", prior);

        Self {
            host,
            prior,
            released: false,
        }
    }

    /// Restore the overflow recorded at acquisition.
    pub fn release(mut self) {
        self.restore();
    }

    fn restore(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        self.host.borrow_mut().set_overflow(self.prior);
        debug!("menu: page scroll restored to {:?}", self.prior);
    }

    pub fn prior(&self) -> Overflow {
        self.prior
    }
}

impl Drop for ScrollLock {
    fn drop(&mut self) {
        self.restore();
    }
}

// =============================================================================
// MENU CONTROLLER
// =============================================================================

pub struct MenuController {
    host: SharedHost,
    options: MenuOptions,
    open: Signal<bool>,
    lock: Option<ScrollLock>,
    torn_down: bool,
}

impl MenuController {
    pub fn new(host: SharedHost, options: MenuOptions) -> Self {
        Self {
            host,
            options,
            open: signal(false),
            lock: None,
            torn_down: false,
        }
    }

    // =========================================================================
    // TRANSITIONS
    // =========================================================================

    /// Flip the overlay. Returns the new open state.
    pub fn toggle(&mut self) -> bool {
        if self.is_open() {
            self.close();
        } else {
            self.open();
        }
        self.is_open()
    }

    /// Transition to open. Returns `false` if already open or torn down.
    pub fn open(&mut self) -> bool {
        if self.torn_down || self.is_open() {
            return false;
        }

        self.lock = Some(ScrollLock::acquire(self.host.clone()));
        self.open.set(true);
        debug!("menu: opened");
        true
    }

    /// Transition to closed. Returns `false` if already closed or torn down.
    pub fn close(&mut self) -> bool {
        if self.torn_down || !self.is_open() {
            return false;
        }

        if let Some(lock) = self.lock.take() {
            lock.release();
        }
        self.open.set(false);
        debug!("menu: closed");
        true
    }

    /// Activate the overlay item at `index`.
    ///
    /// Closes the menu and returns the item's link target, or `None` if the
    /// index is out of range.
    pub fn activate(&mut self, index: usize) -> Option<String> {
        let href = self.options.items.get(index)?.href.clone();
        self.close();
        debug!("menu: item {} activated -> {}", index, href);
        Some(href)
    }

    // =========================================================================
    // STATE ACCESS
    // =========================================================================

    pub fn is_open(&self) -> bool {
        self.open.get()
    }

    /// Open signal for reactive tracking.
    pub fn open_signal(&self) -> Signal<bool> {
        self.open.clone()
    }

    pub fn items(&self) -> &[NavItem] {
        &self.options.items
    }

    /// Transition delay for the item at `index`.
    ///
    /// Items stagger in by ordinal while opening and hide without delay.
    pub fn item_delay_ms(&self, index: usize) -> u32 {
        stagger_delay_ms(index, self.options.stagger_step_ms, self.is_open())
    }

    pub fn stagger_step_ms(&self) -> u32 {
        self.options.stagger_step_ms
    }

    pub fn is_locking(&self) -> bool {
        self.lock.is_some()
    }

    // =========================================================================
    // TEARDOWN
    // =========================================================================

    /// Release the lock if open. Later transitions are ignored. Idempotent.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;

        if let Some(lock) = self.lock.take() {
            lock.release();
            info!("menu: torn down while open, page scroll restored");
        }
    }
}

/// Ordinal stagger delay for an overlay item.
#[inline]
pub fn stagger_delay_ms(index: usize, step_ms: u32, open: bool) -> u32 {
    if open {
        (index as u32).saturating_mul(step_ms)
    } else {
        0
    }
}
