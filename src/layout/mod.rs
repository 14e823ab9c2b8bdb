//! Layout Module
//!
//! Flexbox layout of the landing page using Taffy, for hosts that do not
//! have a browser doing it for them.
//!
//! # Architecture
//!
//! The bridge turns the page content into a Taffy tree:
//!
//! 1. Root column at the viewport width
//! 2. One padded column per section (the hero fills the viewport)
//! 3. One fixed-height leaf per block, sized by its text rows
//!
//! Computed positions are flattened into document-space rects, one per
//! block, plus a scroll offset per section anchor.
//!
//! # Example
//!
//! ```ignore
//! use giftswap_landing::layout::PageLayout;
//! use giftswap_landing::content::{page_sections, FEATURES_HEADER};
//!
//! let layout = PageLayout::compute(&page_sections(), 640.0, 384.0)?;
//! let header = layout.reveal_bounds(FEATURES_HEADER);
//! let features_top = layout.anchor_offset("#features");
//! ```

mod taffy_bridge;

pub use taffy_bridge::{
    PageLayout, PlacedBlock, BLOCK_GAP_PX, LINE_HEIGHT_PX, NAV_HEIGHT_PX, SECTION_PADDING_PX,
};
