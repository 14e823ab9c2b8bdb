//! # giftswap-landing
//!
//! Presentation state for the GiftSwap waitlist landing page.
//!
//! Built on [spark-signals](https://github.com/RLabs-Inc/spark-signals) for fine-grained reactivity.
//!
//! ## Architecture
//!
//! A mounted page is four independent state owners plus one render effect:
//!
//! ```text
//! host events → PageHandle::dispatch → state owners (signals) → render effect → PageView
//! ```
//!
//! The owners never talk to each other. The view is a pure function of their
//! signals. Everything document-side (observing elements, scroll listeners,
//! page-level overflow) sits behind the [`host::PageHost`] trait, so the same
//! state machines run in a browser binding, headless in tests, or in the
//! terminal preview.
//!
//! ## Modules
//!
//! - [`types`] - Element ids, rects, chrome flags, host events
//! - [`state`] - Reveal, scroll, menu and subscription owners
//! - [`view`] - Pure state → view rendering
//! - [`pipeline`] - Mounting, event dispatch, teardown
//! - [`host`] - The document abstraction and a recording host
//! - [`geometry`] - Intersection entries for hosts without an observer
//! - [`layout`] - Taffy layout of the page content
//! - [`renderer`] - Terminal preview (crossterm)

pub mod config;
pub mod content;
pub mod error;
pub mod geometry;
pub mod host;
pub mod layout;
pub mod pipeline;
pub mod renderer;
pub mod state;
pub mod types;
pub mod view;

// Re-export commonly used items
pub use types::*;

pub use config::{ConfigSource, MenuOptions, NavItem, PageConfig, RevealOptions, ScrollOptions};

pub use error::{PageError, Result};

pub use host::{share, MemoryHost, PageHost, SharedHost};

pub use geometry::{intersect, IntersectionTracker, Viewport};

pub use layout::{PageLayout, PlacedBlock};

pub use pipeline::{mount, mount_with_renderer, PageHandle};

pub use state::{
    // Reveal
    RevealEngine,
    // Scroll
    chrome_solid, ScrollState, SOLID_THRESHOLD,
    // Menu
    stagger_delay_ms, MenuController, ScrollLock,
    // Subscription
    satisfies_input_constraint, LocalWaitlist, SubmitOutcome, SubscriptionForm, WaitlistSink,
};

pub use view::{render, PageView, ViewState};

pub use renderer::{PreviewApp, PreviewHost};
