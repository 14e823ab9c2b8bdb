//! Page Pipeline
//!
//! Connects host events to the state owners and the state owners to the
//! view.
//!
//! # Pipeline Architecture
//!
//! ```text
//! host event → PageHandle::dispatch → state owner signals → render effect → PageView
//! ```
//!
//! ## Key Design Principles
//!
//! - **One writer per state**: each event reaches exactly one state owner
//! - **Pure view**: the render effect only reads signals and calls `view::render`
//! - **Scoped resources**: observer and scroll listener live exactly as long as
//!   the `PageHandle`

pub mod mount;

pub use mount::{mount, mount_with_renderer, PageHandle};
