//! Viewport geometry - intersection entries for hosts without an observer.
//!
//! Browsers compute intersection entries natively. Other hosts lay the page
//! out themselves, so they compute the same entries here:
//!
//! - The root is the viewport trimmed by `root_margin_bottom` at the bottom
//! - `ratio` is the overlap area over the target's area
//! - [`IntersectionTracker`] reports a target on first observation and then
//!   only when it crosses the threshold in either direction

use std::collections::HashMap;

use crate::config::RevealOptions;
use crate::types::{ElementId, IntersectionEntry, Rect};

/// Visible region of the document.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub scroll_y: f32,
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(scroll_y: f32, width: f32, height: f32) -> Self {
        Self {
            scroll_y,
            width,
            height,
        }
    }

    /// Intersection root in document coordinates.
    pub fn root(&self, options: &RevealOptions) -> Rect {
        let height = (self.height - options.root_margin_bottom).max(0.0);
        Rect::new(0.0, self.scroll_y, self.width, height)
    }
}

/// Compute the entry for one target against a root.
///
/// Zero-area targets that touch the root count as fully visible.
pub fn intersect(target: ElementId, bounds: &Rect, root: &Rect) -> IntersectionEntry {
    let Some(overlap) = bounds.intersection(root) else {
        return IntersectionEntry::new(target, 0.0, false);
    };

    let area = bounds.area();
    let ratio = if area > 0.0 {
        (overlap.area() / area).clamp(0.0, 1.0)
    } else {
        1.0
    };

    IntersectionEntry::new(target, ratio, true)
}

// =============================================================================
// INTERSECTION TRACKER
// =============================================================================

/// Emulates observer callback delivery over a laid-out page.
#[derive(Debug, Default)]
pub struct IntersectionTracker {
    options: RevealOptions,
    targets: Vec<ElementId>,
    crossed: HashMap<ElementId, bool>,
}

impl IntersectionTracker {
    pub fn new(options: RevealOptions) -> Self {
        Self {
            options,
            targets: Vec::new(),
            crossed: HashMap::new(),
        }
    }

    pub fn observe(&mut self, targets: &[ElementId]) {
        for &id in targets {
            if !self.targets.contains(&id) {
                self.targets.push(id);
            }
        }
    }

    pub fn disconnect(&mut self) {
        self.targets.clear();
        self.crossed.clear();
    }

    pub fn is_observing(&self) -> bool {
        !self.targets.is_empty()
    }

    pub fn options(&self) -> &RevealOptions {
        &self.options
    }

    /// Compute the entries a browser would deliver for this viewport.
    ///
    /// `bounds` maps a target to its document rect; targets without one are
    /// skipped.
    pub fn update<F>(&mut self, viewport: &Viewport, bounds: F) -> Vec<IntersectionEntry>
    where
        F: Fn(ElementId) -> Option<Rect>,
    {
        let root = viewport.root(&self.options);
        let threshold = self.options.threshold;
        let mut entries = Vec::new();

        for &id in &self.targets {
            let Some(rect) = bounds(id) else {
                continue;
            };

            let entry = intersect(id, &rect, &root);
            let crossed = entry.crosses(threshold);

            match self.crossed.insert(id, crossed) {
                Some(previous) if previous == crossed => {}
                _ => entries.push(entry),
            }
        }

        entries
    }
}
