//! Core types for giftswap-landing.
//!
//! These types are shared by the state owners, the view and the hosts.
//! They are plain values: identity, geometry and the event vocabulary a host
//! feeds into a mounted page.

use std::fmt;

// =============================================================================
// Element Identity
// =============================================================================

/// Identity of an observed element.
///
/// Stands in for a DOM node reference. Hosts map their own nodes to ids when
/// registering reveal targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElementId(pub u32);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// =============================================================================
// Geometry
// =============================================================================

/// Axis-aligned rectangle in document pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn area(&self) -> f32 {
        self.width.max(0.0) * self.height.max(0.0)
    }

    /// Overlapping region of two rects, or `None` if they are disjoint.
    ///
    /// Edge-adjacent rects produce a zero-area intersection, matching how
    /// browsers report a zero-height target sitting on the root edge.
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let left = self.x.max(other.x);
        let top = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if right < left || bottom < top {
            return None;
        }

        Some(Rect::new(left, top, right - left, bottom - top))
    }
}

// =============================================================================
// Page Overflow
// =============================================================================

/// Page-level scroll mode of the host document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Overflow {
    /// Scrolling allowed (the document's default).
    #[default]
    Visible,
    /// Scrolling suspended.
    Hidden,
}

// =============================================================================
// Chrome Flags (bitflags)
// =============================================================================

bitflags::bitflags! {
    /// Combined navigation chrome mode.
    ///
    /// Combine with bitwise OR: `ChromeFlags::SOLID | ChromeFlags::MENU_OPEN`
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ChromeFlags: u8 {
        const NONE = 0;
        /// Page scrolled past the chrome threshold.
        const SOLID = 1 << 0;
        /// Mobile overlay is open.
        const MENU_OPEN = 1 << 1;
    }
}

impl ChromeFlags {
    pub fn from_state(solid: bool, menu_open: bool) -> Self {
        let mut flags = ChromeFlags::NONE;
        flags.set(ChromeFlags::SOLID, solid);
        flags.set(ChromeFlags::MENU_OPEN, menu_open);
        flags
    }
}

// =============================================================================
// Intersection Entries
// =============================================================================

/// One intersection observation for a target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionEntry {
    pub target: ElementId,
    /// Fraction of the target's area inside the root (0.0 - 1.0).
    pub ratio: f32,
    /// Whether the target touches the root at all.
    pub is_intersecting: bool,
}

impl IntersectionEntry {
    pub fn new(target: ElementId, ratio: f32, is_intersecting: bool) -> Self {
        Self {
            target,
            ratio,
            is_intersecting,
        }
    }

    /// True when the entry satisfies a visibility threshold.
    #[inline]
    pub fn crosses(&self, threshold: f32) -> bool {
        self.is_intersecting && self.ratio >= threshold
    }
}

// =============================================================================
// Events
// =============================================================================

/// Browser-level events a host delivers to a mounted page.
#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    /// Document scrolled to the given vertical offset.
    Scroll(u32),
    /// An animation frame boundary (flushes coalesced scroll updates).
    AnimationFrame,
    /// Intersection observer callback batch.
    Intersections(Vec<IntersectionEntry>),
    /// Hamburger button clicked.
    MenuToggle,
    /// Overlay navigation item activated (by ordinal).
    NavActivate(usize),
    /// Email input changed.
    EmailInput(String),
    /// Waitlist form submitted.
    Submit,
}

/// What the host should do after an event was handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventResponse {
    /// State updated, nothing further for the host.
    Handled,
    /// Event had no effect (torn down, unknown target, out of range).
    Ignored,
    /// Host must suppress its default action (form navigation/reload).
    PreventDefault,
    /// Host should continue with its default link-follow to this anchor.
    FollowLink(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_intersection_overlap() {
        let a = Rect::new(0.0, 0.0, 100.0, 100.0);
        let b = Rect::new(50.0, 80.0, 100.0, 100.0);

        let i = a.intersection(&b).unwrap();
        assert_eq!(i, Rect::new(50.0, 80.0, 50.0, 20.0));
        assert_eq!(i.area(), 1000.0);
    }

    #[test]
    fn test_rect_intersection_disjoint() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(0.0, 20.0, 10.0, 10.0);

        assert!(a.intersection(&b).is_none());
    }

    #[test]
    fn test_rect_intersection_edge_adjacent() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(0.0, 10.0, 10.0, 10.0);

        let i = a.intersection(&b).unwrap();
        assert_eq!(i.area(), 0.0);
    }

    #[test]
    fn test_chrome_flags_from_state() {
        assert_eq!(ChromeFlags::from_state(false, false), ChromeFlags::NONE);
        assert_eq!(ChromeFlags::from_state(true, false), ChromeFlags::SOLID);
        assert_eq!(
            ChromeFlags::from_state(true, true),
            ChromeFlags::SOLID | ChromeFlags::MENU_OPEN
        );
        assert!(ChromeFlags::from_state(false, true).contains(ChromeFlags::MENU_OPEN));
    }

    #[test]
    fn test_entry_crosses_threshold() {
        let id = ElementId(1);

        assert!(IntersectionEntry::new(id, 0.1, true).crosses(0.1));
        assert!(!IntersectionEntry::new(id, 0.09, true).crosses(0.1));
        assert!(!IntersectionEntry::new(id, 0.5, false).crosses(0.1));
    }
}
