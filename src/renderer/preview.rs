//! Terminal preview - a page host driven by keyboard and mouse.
//!
//! [`PreviewHost`] plays the document's part: it keeps the page-level
//! overflow, computes intersection entries from the Taffy layout and only
//! delivers scroll to an attached listener. [`PreviewApp`] owns the mounted
//! page and turns input [`Action`]s into page events.
//!
//! # Keys
//!
//! - `j`/`k`, arrows, wheel: scroll one row (three for the wheel)
//! - Space/PageDown, PageUp, `g`/Home, `G`/End
//! - `m`: toggle the menu overlay; `1`-`9` follow a menu entry while open
//! - `e`: edit the email, Enter submits, Esc cancels
//! - `q`, Ctrl+C: quit

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind};
use tracing::{debug, info};

use crate::config::{PageConfig, RevealOptions};
use crate::content::{page_sections, Section, REVEAL_TARGETS};
use crate::error::Result;
use crate::geometry::{IntersectionTracker, Viewport};
use crate::host::{self, PageHost};
use crate::layout::{PageLayout, LINE_HEIGHT_PX};
use crate::pipeline::{mount_with_renderer, PageHandle};
use crate::state::{satisfies_input_constraint, WaitlistSink};
use crate::types::{ElementId, EventResponse, IntersectionEntry, Overflow, PageEvent, Rect};

use super::frame::{compose, FrameContext, FrameLine};

/// Width of one terminal cell in document pixels.
pub const CELL_WIDTH_PX: f32 = 8.0;

/// Rows scrolled per wheel notch.
const WHEEL_ROWS: f32 = 3.0;

const INVALID_EMAIL: &str = " Please enter a valid email address.";
const EDITING_HINT: &str = " Type your email  |  Enter submit  |  Esc cancel";
const SCROLL_LOCKED: &str = " Page scrolling is paused while the menu is open.";

// =============================================================================
// HOST
// =============================================================================

/// Document stand-in for the terminal preview.
#[derive(Debug, Default)]
pub struct PreviewHost {
    overflow: Overflow,
    tracker: IntersectionTracker,
    listening: bool,
}

impl PreviewHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Page scrolling is not suspended.
    pub fn scroll_allowed(&self) -> bool {
        self.overflow == Overflow::Visible
    }

    pub fn is_listening(&self) -> bool {
        self.listening
    }

    pub fn is_observing(&self) -> bool {
        self.tracker.is_observing()
    }

    /// Entries the observer would deliver for this viewport.
    pub fn intersections<F>(&mut self, viewport: &Viewport, bounds: F) -> Vec<IntersectionEntry>
    where
        F: Fn(ElementId) -> Option<Rect>,
    {
        self.tracker.update(viewport, bounds)
    }
}

impl PageHost for PreviewHost {
    fn observe(&mut self, targets: &[ElementId], options: &RevealOptions) {
        if !self.tracker.is_observing() {
            self.tracker = IntersectionTracker::new(options.clone());
        }
        self.tracker.observe(targets);
    }

    fn disconnect_observer(&mut self) {
        self.tracker.disconnect();
    }

    fn add_scroll_listener(&mut self) {
        self.listening = true;
    }

    fn remove_scroll_listener(&mut self) {
        self.listening = false;
    }

    fn overflow(&self) -> Overflow {
        self.overflow
    }

    fn set_overflow(&mut self, overflow: Overflow) {
        debug!("preview: overflow -> {:?}", overflow);
        self.overflow = overflow;
    }
}

// =============================================================================
// INPUT CONVERSION
// =============================================================================

/// What an input asks the preview to do.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    None,
    Quit,
    ScrollBy(f32),
    PageDown,
    PageUp,
    Top,
    Bottom,
    ToggleMenu,
    Activate(usize),
    StartEditing,
    Type(char),
    Erase,
    Submit,
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

/// Convert a key press.
pub fn key_action(key: KeyEvent, editing: bool, menu_open: bool) -> Action {
    if key.kind != KeyEventKind::Press {
        return Action::None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Action::Quit;
    }

    if editing {
        return match key.code {
            KeyCode::Char(c) => Action::Type(c),
            KeyCode::Backspace => Action::Erase,
            KeyCode::Enter => Action::Submit,
            KeyCode::Esc => Action::Cancel,
            _ => Action::None,
        };
    }

    match key.code {
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Esc => Action::Cancel,
        KeyCode::Char('j') | KeyCode::Down => Action::ScrollBy(LINE_HEIGHT_PX),
        KeyCode::Char('k') | KeyCode::Up => Action::ScrollBy(-LINE_HEIGHT_PX),
        KeyCode::Char(' ') | KeyCode::PageDown => Action::PageDown,
        KeyCode::PageUp => Action::PageUp,
        KeyCode::Char('g') | KeyCode::Home => Action::Top,
        KeyCode::Char('G') | KeyCode::End => Action::Bottom,
        KeyCode::Char('m') => Action::ToggleMenu,
        KeyCode::Char('e') => Action::StartEditing,
        KeyCode::Char(c @ '1'..='9') if menu_open => {
            Action::Activate(c as usize - '1' as usize)
        }
        _ => Action::None,
    }
}

/// Convert a mouse event (only the wheel is used).
pub fn mouse_action(event: MouseEvent) -> Action {
    match event.kind {
        MouseEventKind::ScrollDown => Action::ScrollBy(WHEEL_ROWS * LINE_HEIGHT_PX),
        MouseEventKind::ScrollUp => Action::ScrollBy(-WHEEL_ROWS * LINE_HEIGHT_PX),
        _ => Action::None,
    }
}

// =============================================================================
// APP
// =============================================================================

/// A page mounted into the terminal preview.
pub struct PreviewApp {
    handle: PageHandle,
    host: Rc<RefCell<PreviewHost>>,
    sections: Vec<Section>,
    layout: PageLayout,
    cols: u16,
    rows: u16,
    scroll_px: f32,
    editing: bool,
    message: Option<&'static str>,
    needs_paint: Rc<Cell<bool>>,
}

impl PreviewApp {
    pub fn new(config: PageConfig, sink: Box<dyn WaitlistSink>, cols: u16, rows: u16) -> Result<Self> {
        let sections = page_sections();
        let layout = PageLayout::compute(
            &sections,
            cols as f32 * CELL_WIDTH_PX,
            rows as f32 * LINE_HEIGHT_PX,
        )?;

        let (host, shared) = host::share(PreviewHost::new());

        let needs_paint = Rc::new(Cell::new(true));
        let paint_flag = needs_paint.clone();
        let handle = mount_with_renderer(shared, config, sink, &REVEAL_TARGETS, move |_view| {
            paint_flag.set(true);
        });

        info!(
            "preview: {}x{} cells, document {}px",
            cols, rows, layout.document_height
        );

        let mut app = Self {
            handle,
            host,
            sections,
            layout,
            cols,
            rows,
            scroll_px: 0.0,
            editing: false,
            message: None,
            needs_paint,
        };
        app.deliver_intersections();
        Ok(app)
    }

    // =========================================================================
    // Input
    // =========================================================================

    pub fn apply(&mut self, action: Action) -> Control {
        if action != Action::None {
            self.set_message(None);
        }

        match action {
            Action::None => {}
            Action::Quit => return Control::Quit,
            Action::ScrollBy(delta) => self.scroll_to(self.scroll_px + delta),
            Action::PageDown => self.scroll_to(self.scroll_px + self.page_step()),
            Action::PageUp => self.scroll_to(self.scroll_px - self.page_step()),
            Action::Top => self.scroll_to(0.0),
            Action::Bottom => self.scroll_to(self.max_scroll()),
            Action::ToggleMenu => {
                self.handle.dispatch(PageEvent::MenuToggle);
            }
            Action::Activate(index) => {
                if let EventResponse::FollowLink(href) =
                    self.handle.dispatch(PageEvent::NavActivate(index))
                {
                    self.follow_link(&href);
                }
            }
            Action::StartEditing => {
                if !self.handle.form().is_submitted() && !self.handle.menu().is_open() {
                    self.editing = true;
                    self.set_message(Some(EDITING_HINT));
                }
            }
            Action::Type(c) => {
                let mut value = self.handle.form().email();
                value.push(c);
                self.handle.dispatch(PageEvent::EmailInput(value));
                self.set_message(Some(EDITING_HINT));
            }
            Action::Erase => {
                let mut value = self.handle.form().email();
                value.pop();
                self.handle.dispatch(PageEvent::EmailInput(value));
                self.set_message(Some(EDITING_HINT));
            }
            Action::Submit => self.submit(),
            Action::Cancel => {
                if self.editing {
                    self.set_editing(false);
                } else if self.handle.menu().is_open() {
                    self.handle.dispatch(PageEvent::MenuToggle);
                }
            }
        }

        Control::Continue
    }

    /// Animation frame tick.
    pub fn tick(&mut self) {
        self.handle.dispatch(PageEvent::AnimationFrame);
    }

    pub fn resize(&mut self, cols: u16, rows: u16) -> Result<()> {
        self.layout = PageLayout::compute(
            &self.sections,
            cols as f32 * CELL_WIDTH_PX,
            rows as f32 * LINE_HEIGHT_PX,
        )?;
        self.cols = cols;
        self.rows = rows;
        debug!("preview: resized to {}x{}", cols, rows);

        let clamped = self.scroll_px.min(self.max_scroll());
        if clamped != self.scroll_px {
            self.scroll_px = clamped;
            self.notify_scroll();
        }
        self.deliver_intersections();
        self.needs_paint.set(true);
        Ok(())
    }

    fn submit(&mut self) {
        let email = self.handle.form().email();
        // Browser-side constraint validation runs before the submit event
        if !satisfies_input_constraint(&email) {
            self.set_message(Some(INVALID_EMAIL));
            return;
        }

        self.handle.dispatch(PageEvent::Submit);
        if self.handle.form().is_submitted() {
            self.set_editing(false);
        }
    }

    // =========================================================================
    // Scrolling
    // =========================================================================

    fn scroll_to(&mut self, target: f32) {
        if !self.host.borrow().scroll_allowed() {
            self.set_message(Some(SCROLL_LOCKED));
            return;
        }

        let snapped = (target / LINE_HEIGHT_PX).round() * LINE_HEIGHT_PX;
        let target = snapped.clamp(0.0, self.max_scroll());
        if target == self.scroll_px {
            return;
        }

        self.scroll_px = target;
        self.needs_paint.set(true);
        self.notify_scroll();
        self.deliver_intersections();
    }

    fn follow_link(&mut self, href: &str) {
        match self.layout.anchor_offset(href) {
            Some(offset) => {
                debug!("preview: follow {} -> {}px", href, offset);
                self.scroll_to(offset);
            }
            None => debug!("preview: no anchor for {}", href),
        }
    }

    fn notify_scroll(&mut self) {
        let listening = self.host.borrow().is_listening();
        if listening {
            self.handle.dispatch(PageEvent::Scroll(self.scroll_px as u32));
        }
    }

    fn deliver_intersections(&mut self) {
        let viewport = self.viewport();
        let layout = &self.layout;
        let entries = self
            .host
            .borrow_mut()
            .intersections(&viewport, |id| layout.reveal_bounds(id));

        if !entries.is_empty() {
            self.handle.dispatch(PageEvent::Intersections(entries));
        }
    }

    // =========================================================================
    // Painting
    // =========================================================================

    /// Compose the current frame.
    pub fn frame(&self) -> Vec<FrameLine> {
        let view = self.handle.view();
        let status = self.status_line();

        compose(&FrameContext {
            view: &view,
            layout: &self.layout,
            sections: &self.sections,
            scroll_px: self.scroll_px,
            cols: self.cols,
            rows: self.rows,
            editing: self.editing,
            status: &status,
        })
    }

    /// Whether something changed since the last call.
    pub fn take_needs_paint(&self) -> bool {
        self.needs_paint.replace(false)
    }

    fn status_line(&self) -> String {
        match self.message {
            Some(message) => message.to_string(),
            None => format!(
                " {:>5}px  |  j/k scroll  m menu  e email  q quit",
                self.scroll_px as u32
            ),
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn handle(&self) -> &PageHandle {
        &self.handle
    }

    pub fn host(&self) -> Rc<RefCell<PreviewHost>> {
        self.host.clone()
    }

    pub fn layout(&self) -> &PageLayout {
        &self.layout
    }

    pub fn scroll_px(&self) -> f32 {
        self.scroll_px
    }

    pub fn cols(&self) -> u16 {
        self.cols
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn is_menu_open(&self) -> bool {
        self.handle.menu().is_open()
    }

    /// Unmount the page, releasing host resources.
    pub fn shutdown(self) {
        self.handle.unmount();
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    fn viewport(&self) -> Viewport {
        Viewport::new(
            self.scroll_px,
            self.cols as f32 * CELL_WIDTH_PX,
            self.rows as f32 * LINE_HEIGHT_PX,
        )
    }

    fn max_scroll(&self) -> f32 {
        let max = self.layout.max_scroll(self.rows as f32 * LINE_HEIGHT_PX);
        (max / LINE_HEIGHT_PX).floor() * LINE_HEIGHT_PX
    }

    fn page_step(&self) -> f32 {
        (self.rows.saturating_sub(2) as f32 * LINE_HEIGHT_PX).max(LINE_HEIGHT_PX)
    }

    fn set_editing(&mut self, editing: bool) {
        self.editing = editing;
        self.needs_paint.set(true);
    }

    fn set_message(&mut self, message: Option<&'static str>) {
        if self.message != message {
            self.message = message;
            self.needs_paint.set(true);
        }
    }
}
