//! Taffy Bridge - Page sections to document rects
//!
//! Builds a Taffy tree from the page content, runs flexbox layout at the
//! viewport width, and extracts absolute rects for every block.

use std::collections::HashMap;

use taffy::{
    AlignItems, AvailableSpace, Dimension, FlexDirection, JustifyContent, LengthPercentage,
    NodeId, Rect as TaffyRect, Size, Style, TaffyTree,
};

use crate::content::Section;
use crate::error::{PageError, Result};
use crate::types::{ElementId, Rect};

// =============================================================================
// METRICS
// =============================================================================

/// Height of one text row in document pixels.
pub const LINE_HEIGHT_PX: f32 = 16.0;

/// Vertical padding above and below each section.
pub const SECTION_PADDING_PX: f32 = 48.0;

/// Space between blocks inside a section.
pub const BLOCK_GAP_PX: f32 = 16.0;

/// Height of the fixed navigation bar (kept clear at the top of the hero).
pub const NAV_HEIGHT_PX: f32 = 32.0;

// =============================================================================
// RESULT TYPES
// =============================================================================

/// A block positioned in the document.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedBlock {
    pub section: usize,
    pub block: usize,
    pub reveal: Option<ElementId>,
    pub rect: Rect,
}

/// Computed page geometry.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PageLayout {
    pub blocks: Vec<PlacedBlock>,
    pub sections: Vec<Rect>,
    pub document_height: f32,
    pub width: f32,
    anchors: HashMap<String, f32>,
}

impl PageLayout {
    /// Lay out `sections` for a viewport of the given size.
    pub fn compute(sections: &[Section], viewport_width: f32, viewport_height: f32) -> Result<Self> {
        let mut tree: TaffyTree<()> = TaffyTree::new();
        let mut section_nodes: Vec<(NodeId, Vec<NodeId>)> = Vec::with_capacity(sections.len());

        for (index, section) in sections.iter().enumerate() {
            let mut block_nodes = Vec::with_capacity(section.blocks.len());
            for block in &section.blocks {
                let height = block.rows() as f32 * LINE_HEIGHT_PX;
                let node = tree.new_leaf(block_style(height)).map_err(layout_error)?;
                block_nodes.push(node);
            }

            let style = section_style(section.full_height, index == 0, viewport_height);
            let node = tree
                .new_with_children(style, &block_nodes)
                .map_err(layout_error)?;
            section_nodes.push((node, block_nodes));
        }

        let children: Vec<NodeId> = section_nodes.iter().map(|(node, _)| *node).collect();
        let root = tree
            .new_with_children(root_style(viewport_width), &children)
            .map_err(layout_error)?;

        let available = Size {
            width: AvailableSpace::Definite(viewport_width),
            height: AvailableSpace::MaxContent,
        };
        tree.compute_layout(root, available).map_err(layout_error)?;

        let mut result = PageLayout {
            width: viewport_width,
            ..PageLayout::default()
        };

        for (section_index, (section_node, block_nodes)) in section_nodes.iter().enumerate() {
            let section_layout = tree.layout(*section_node).map_err(layout_error)?;
            let section_rect = Rect::new(
                section_layout.location.x,
                section_layout.location.y,
                section_layout.size.width,
                section_layout.size.height,
            );

            let anchor = sections[section_index].anchor;
            result.anchors.insert(anchor.to_string(), section_rect.y);

            for (block_index, block_node) in block_nodes.iter().enumerate() {
                let block_layout = tree.layout(*block_node).map_err(layout_error)?;
                result.blocks.push(PlacedBlock {
                    section: section_index,
                    block: block_index,
                    reveal: sections[section_index].blocks[block_index].reveal,
                    rect: Rect::new(
                        section_rect.x + block_layout.location.x,
                        section_rect.y + block_layout.location.y,
                        block_layout.size.width,
                        block_layout.size.height,
                    ),
                });
            }

            result.sections.push(section_rect);
        }

        result.document_height = tree.layout(root).map_err(layout_error)?.size.height;
        Ok(result)
    }

    /// Document rect of a reveal target.
    pub fn reveal_bounds(&self, id: ElementId) -> Option<Rect> {
        self.blocks
            .iter()
            .find(|placed| placed.reveal == Some(id))
            .map(|placed| placed.rect)
    }

    /// Scroll offset for a link target like `#features`.
    ///
    /// `#` and the empty string resolve to the top of the page.
    pub fn anchor_offset(&self, href: &str) -> Option<f32> {
        let anchor = href.strip_prefix('#').unwrap_or(href);
        if anchor.is_empty() {
            return Some(0.0);
        }
        self.anchors.get(anchor).copied()
    }

    /// Largest scroll offset that still fills the viewport.
    pub fn max_scroll(&self, viewport_height: f32) -> f32 {
        (self.document_height - viewport_height).max(0.0)
    }
}

// =============================================================================
// STYLE BUILDING
// =============================================================================

fn root_style(width: f32) -> Style {
    Style {
        flex_direction: FlexDirection::Column,
        size: Size {
            width: Dimension::Length(width),
            height: Dimension::Auto,
        },
        ..Default::default()
    }
}

fn section_style(full_height: bool, first: bool, viewport_height: f32) -> Style {
    // The first section starts under the fixed nav bar
    let top = if first {
        SECTION_PADDING_PX + NAV_HEIGHT_PX
    } else {
        SECTION_PADDING_PX
    };

    Style {
        flex_direction: FlexDirection::Column,
        justify_content: full_height.then_some(JustifyContent::Center),
        align_items: Some(AlignItems::Stretch),
        flex_shrink: 0.0,
        min_size: Size {
            width: Dimension::Auto,
            height: if full_height {
                Dimension::Length(viewport_height)
            } else {
                Dimension::Auto
            },
        },
        padding: TaffyRect {
            top: LengthPercentage::Length(top),
            right: LengthPercentage::Length(0.0),
            bottom: LengthPercentage::Length(SECTION_PADDING_PX),
            left: LengthPercentage::Length(0.0),
        },
        gap: Size {
            width: LengthPercentage::Length(0.0),
            height: LengthPercentage::Length(BLOCK_GAP_PX),
        },
        ..Default::default()
    }
}

fn block_style(height: f32) -> Style {
    Style {
        flex_shrink: 0.0,
        size: Size {
            width: Dimension::Auto,
            height: Dimension::Length(height),
        },
        ..Default::default()
    }
}

fn layout_error(err: taffy::TaffyError) -> PageError {
    PageError::Layout(format!("{:?}", err))
}
