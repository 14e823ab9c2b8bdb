//! Terminal output - session lifecycle and line-diff painting.
//!
//! [`TerminalSession`] owns raw mode, the alternate screen and mouse capture,
//! restoring all three on drop. [`LineRenderer`] paints composed frames,
//! skipping rows that match the previous frame.

use std::io::{self, Stdout, Write};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::style::{
    Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
};
use crossterm::terminal::{
    self, BeginSynchronizedUpdate, Clear, ClearType, EndSynchronizedUpdate, EnterAlternateScreen,
    LeaveAlternateScreen,
};
use crossterm::{execute, queue};
use tracing::{debug, warn};

use super::frame::{FrameLine, LineStyle};
use crate::error::Result;

// Brand palette
const BRAND_DARK: Color = Color::Rgb { r: 9, g: 95, b: 138 };
const BRAND_LIGHT: Color = Color::Rgb { r: 91, g: 196, b: 224 };
const HERO: Color = Color::Rgb { r: 18, g: 153, b: 190 };

// =============================================================================
// SESSION
// =============================================================================

/// Active terminal session. Dropping it restores the terminal.
pub struct TerminalSession {
    active: bool,
}

impl TerminalSession {
    pub fn enter() -> Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen, EnableMouseCapture, Hide)?;
        debug!("terminal session started");
        Ok(Self { active: true })
    }

    /// Restore the terminal now.
    pub fn leave(mut self) -> Result<()> {
        self.restore()
    }

    fn restore(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;

        execute!(io::stdout(), Show, DisableMouseCapture, LeaveAlternateScreen)?;
        terminal::disable_raw_mode()?;
        debug!("terminal session restored");
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        if let Err(err) = self.restore() {
            warn!(error = %err, "failed to restore terminal");
        }
    }
}

// =============================================================================
// LINE RENDERER
// =============================================================================

/// Paints frames row by row, skipping unchanged rows.
pub struct LineRenderer {
    out: Stdout,
    previous: Vec<FrameLine>,
}

impl LineRenderer {
    pub fn new() -> Self {
        Self {
            out: io::stdout(),
            previous: Vec::new(),
        }
    }

    /// Force the next frame to repaint every row (after a resize).
    pub fn invalidate(&mut self) {
        self.previous.clear();
    }

    /// Paint a frame. Returns the number of rows written.
    pub fn render(&mut self, lines: &[FrameLine], cols: u16) -> Result<usize> {
        if self.previous.len() != lines.len() {
            self.previous.clear();
            queue!(self.out, Clear(ClearType::All))?;
        }

        queue!(self.out, BeginSynchronizedUpdate)?;

        let mut written = 0;
        for (row, line) in lines.iter().enumerate() {
            if self.previous.get(row) == Some(line) {
                continue;
            }
            paint_line(&mut self.out, row as u16, line, cols)?;
            written += 1;
        }

        queue!(self.out, EndSynchronizedUpdate)?;
        self.out.flush()?;

        self.previous = lines.to_vec();
        Ok(written)
    }
}

impl Default for LineRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn paint_line<W: Write>(out: &mut W, row: u16, line: &FrameLine, cols: u16) -> io::Result<()> {
    let (fg, bg, attribute) = palette(line.style);

    queue!(out, MoveTo(0, row), SetAttribute(Attribute::Reset), ResetColor)?;
    if let Some(bg) = bg {
        queue!(out, SetBackgroundColor(bg))?;
    }
    if let Some(fg) = fg {
        queue!(out, SetForegroundColor(fg))?;
    }
    if let Some(attribute) = attribute {
        queue!(out, SetAttribute(attribute))?;
    }

    // Pad to full width so backgrounds span the row
    let text = if line.style == LineStyle::Hidden {
        String::new()
    } else {
        line.text.clone()
    };
    let width = text.chars().count();
    let pad = (cols as usize).saturating_sub(width);

    queue!(
        out,
        Print(text),
        Print(" ".repeat(pad)),
        SetAttribute(Attribute::Reset),
        ResetColor
    )
}

fn palette(style: LineStyle) -> (Option<Color>, Option<Color>, Option<Attribute>) {
    match style {
        LineStyle::Nav => (Some(Color::White), Some(HERO), None),
        LineStyle::NavSolid => (Some(BRAND_DARK), Some(Color::White), Some(Attribute::Bold)),
        LineStyle::Body | LineStyle::Hidden => (None, None, None),
        LineStyle::Dim => (Some(Color::DarkGrey), None, None),
        LineStyle::Input => (Some(Color::White), Some(BRAND_DARK), None),
        LineStyle::InputActive => (Some(Color::White), Some(BRAND_DARK), Some(Attribute::Underlined)),
        LineStyle::Ack => (Some(BRAND_LIGHT), None, Some(Attribute::Bold)),
        LineStyle::Overlay => (Some(Color::White), Some(BRAND_DARK), None),
        LineStyle::MenuItem => (Some(Color::White), Some(BRAND_DARK), Some(Attribute::Bold)),
        LineStyle::MenuButton => (Some(BRAND_DARK), Some(Color::White), Some(Attribute::Bold)),
        LineStyle::Status => (None, None, Some(Attribute::Reverse)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paint_line_pads_to_width() {
        let mut out = Vec::new();
        paint_line(&mut out, 0, &FrameLine::new("hi", LineStyle::Body), 6).unwrap();

        let written = String::from_utf8(out).unwrap();
        assert!(written.contains("hi    "));
    }

    #[test]
    fn test_hidden_lines_paint_blank() {
        let mut out = Vec::new();
        paint_line(&mut out, 3, &FrameLine::new("secret", LineStyle::Hidden), 8).unwrap();

        let written = String::from_utf8(out).unwrap();
        assert!(!written.contains("secret"));
    }

    #[test]
    fn test_palette_distinguishes_nav_states() {
        assert_ne!(palette(LineStyle::Nav), palette(LineStyle::NavSolid));
        assert_eq!(palette(LineStyle::Body), (None, None, None));
    }
}
