//! Renderer Module - Terminal preview of the landing page.
//!
//! # Pipeline
//!
//! ```text
//! crossterm input → Action → PreviewApp → PageEvent → PageHandle
//!                                                         │
//!                          render effect marks dirty ◄────┘
//!                                   │
//!         PageView + PageLayout → compose → FrameLine rows → LineRenderer
//! ```
//!
//! - [`frame`] - Pure frame composition
//! - [`preview`] - Terminal page host, input conversion, app state
//! - [`terminal`] - Raw mode session and line-diff output

pub mod frame;
pub mod preview;
pub mod terminal;

pub use frame::{compose, FrameContext, FrameLine, LineStyle};
pub use preview::{key_action, mouse_action, Action, Control, PreviewApp, PreviewHost, CELL_WIDTH_PX};
pub use terminal::{LineRenderer, TerminalSession};
