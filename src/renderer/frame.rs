//! Frame composition - PageView + layout to terminal rows.
//!
//! Pure: builds one styled line per terminal row. The terminal renderer
//! paints the result; nothing here touches I/O.
//!
//! Row layout:
//! - Row 0: fixed navigation bar
//! - Rows 1..h-1: document slice at the scroll offset, or the menu overlay
//! - Row h-1: status line

use crate::content::{BlockKind, FormSlot, Section, BRAND, FORM_HINT};
use crate::layout::{PageLayout, LINE_HEIGHT_PX};
use crate::types::ChromeFlags;
use crate::view::{FormView, PageView};

/// How a row is painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Nav,
    NavSolid,
    Body,
    Dim,
    /// Unrevealed content (painted blank).
    Hidden,
    Input,
    InputActive,
    Ack,
    Overlay,
    MenuItem,
    MenuButton,
    Status,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameLine {
    pub text: String,
    pub style: LineStyle,
}

impl FrameLine {
    pub fn new(text: impl Into<String>, style: LineStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    pub fn blank(style: LineStyle) -> Self {
        Self::new(String::new(), style)
    }
}

/// Everything needed to compose one frame.
pub struct FrameContext<'a> {
    pub view: &'a PageView,
    pub layout: &'a PageLayout,
    pub sections: &'a [Section],
    pub scroll_px: f32,
    pub cols: u16,
    pub rows: u16,
    /// Email input has keyboard focus.
    pub editing: bool,
    pub status: &'a str,
}

/// Compose every row of the frame.
pub fn compose(ctx: &FrameContext) -> Vec<FrameLine> {
    let rows = ctx.rows as usize;
    if rows == 0 {
        return Vec::new();
    }

    let mut lines = vec![FrameLine::blank(LineStyle::Body); rows];
    lines[0] = nav_line(ctx);

    if rows > 1 {
        let content = 1..rows - 1;
        if ctx.view.menu.open {
            compose_overlay(ctx, &mut lines, content);
        } else {
            compose_document(ctx, &mut lines, content);
        }
        lines[rows - 1] = FrameLine::new(fit(ctx.status, ctx.cols), LineStyle::Status);
    }

    lines
}

fn nav_line(ctx: &FrameContext) -> FrameLine {
    let chrome = ctx.view.chrome;
    let style = if chrome.contains(ChromeFlags::SOLID) {
        LineStyle::NavSolid
    } else {
        LineStyle::Nav
    };

    let left = format!(" [*] {}", BRAND);
    let right = if chrome.contains(ChromeFlags::MENU_OPEN) {
        "[m] Close "
    } else {
        "[m] Menu "
    };

    let cols = ctx.cols as usize;
    let used = left.chars().count() + right.chars().count();
    let text = if used < cols {
        format!("{}{}{}", left, " ".repeat(cols - used), right)
    } else {
        left
    };

    FrameLine::new(fit(&text, ctx.cols), style)
}

fn compose_document(ctx: &FrameContext, lines: &mut [FrameLine], content: std::ops::Range<usize>) {
    for placed in &ctx.layout.blocks {
        let Some(block) = ctx
            .sections
            .get(placed.section)
            .and_then(|s| s.blocks.get(placed.block))
        else {
            continue;
        };

        let revealed = placed
            .reveal
            .map(|id| ctx.view.is_revealed(id))
            .unwrap_or(true);

        let block_lines = match &block.kind {
            BlockKind::Text(text) if revealed => text
                .iter()
                .map(|t| FrameLine::new(center(t, ctx.cols), LineStyle::Body))
                .collect(),
            BlockKind::Text(text) => vec![FrameLine::blank(LineStyle::Hidden); text.len()],
            BlockKind::Form(slot) => form_lines(ctx, *slot),
        };

        for (i, line) in block_lines.into_iter().enumerate() {
            let doc_y = placed.rect.y + i as f32 * LINE_HEIGHT_PX;
            let offset = doc_y - ctx.scroll_px;
            if offset < 0.0 {
                continue;
            }
            let row = (offset / LINE_HEIGHT_PX).round() as usize;
            if content.contains(&row) {
                lines[row] = line;
            }
        }
    }
}

fn form_lines(ctx: &FrameContext, slot: FormSlot) -> Vec<FrameLine> {
    match &ctx.view.form {
        FormView::Entry { email, placeholder } => {
            let value = if email.is_empty() && !ctx.editing {
                placeholder.to_string()
            } else if ctx.editing {
                format!("{}_", email)
            } else {
                email.clone()
            };
            let input = format!("[ {:<32} ]  [ {} ]", value, slot.button_label());
            let style = if ctx.editing {
                LineStyle::InputActive
            } else {
                LineStyle::Input
            };

            vec![
                FrameLine::new(center(&input, ctx.cols), style),
                FrameLine::new(center(FORM_HINT, ctx.cols), LineStyle::Dim),
                FrameLine::blank(LineStyle::Body),
            ]
        }
        FormView::Acknowledged { title, body } => vec![
            FrameLine::new(center(&format!("(ok) {}", title), ctx.cols), LineStyle::Ack),
            FrameLine::new(center(body, ctx.cols), LineStyle::Dim),
            FrameLine::blank(LineStyle::Body),
        ],
    }
}

fn compose_overlay(ctx: &FrameContext, lines: &mut [FrameLine], content: std::ops::Range<usize>) {
    for row in content.clone() {
        lines[row] = FrameLine::blank(LineStyle::Overlay);
    }

    let items = &ctx.view.menu.items;
    let span = items.len() * 2;
    let middle = content.start + content.len() / 2;
    let first = middle.saturating_sub(span / 2).max(content.start);

    for (index, item) in items.iter().enumerate() {
        let row = first + index * 2;
        if !content.contains(&row) {
            break;
        }
        let style = if item.class.contains("menu-item--button") {
            LineStyle::MenuButton
        } else {
            LineStyle::MenuItem
        };
        let label = format!("{}  {}", index + 1, item.label);
        lines[row] = FrameLine::new(center(&label, ctx.cols), style);
    }
}

// =============================================================================
// TEXT HELPERS
// =============================================================================

/// Truncate to at most `cols` characters.
pub fn fit(text: &str, cols: u16) -> String {
    text.chars().take(cols as usize).collect()
}

/// Center within `cols`, truncating if needed.
pub fn center(text: &str, cols: u16) -> String {
    let width = text.chars().count();
    let cols = cols as usize;
    if width >= cols {
        return fit(text, cols as u16);
    }
    format!("{}{}", " ".repeat((cols - width) / 2), text)
}
