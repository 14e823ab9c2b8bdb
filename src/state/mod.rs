//! State Module - The page's four state owners
//!
//! Each owner holds its state in signals, reacts to its own events, and is
//! read (never written) by the view:
//!
//! - **Reveal** - One-way visibility latches driven by intersection entries
//! - **Scroll** - Scroll offset and the derived solid-chrome flag
//! - **Menu** - Overlay open state and page scroll suspension
//! - **Subscription** - Waitlist email capture

pub mod menu;
pub mod reveal;
pub mod scroll;
pub mod subscription;

pub use menu::{stagger_delay_ms, MenuController, ScrollLock};
pub use reveal::RevealEngine;
pub use scroll::{chrome_solid, ScrollState, SOLID_THRESHOLD};
pub use subscription::{
    satisfies_input_constraint, LocalWaitlist, SubmitOutcome, SubscriptionForm, WaitlistSink,
};
