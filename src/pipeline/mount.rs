//! Mount API - Page view lifecycle and render effect.
//!
//! Mounting a page creates the four state owners against a host, acquires
//! the host resources they need, and sets up ONE render effect that re-runs
//! the view after every state mutation.
//!
//! # Example
//!
//! ```ignore
//! use giftswap_landing::pipeline::mount;
//!
//! let mut handle = mount::mount_with_renderer(host, config, Box::new(sink), &targets, |view| {
//!     paint(view);
//! });
//!
//! handle.dispatch(PageEvent::Scroll(120));
//! handle.dispatch(PageEvent::MenuToggle);
//!
//! // Clean up (dropping the handle does the same)
//! handle.unmount();
//! ```

use spark_signals::{effect, Signal};
use tracing::{debug, info};

use crate::config::{NavItem, PageConfig};
use crate::host::SharedHost;
use crate::state::{
    chrome_solid, MenuController, RevealEngine, ScrollState, SubscriptionForm, WaitlistSink,
};
use crate::types::{ElementId, EventResponse, PageEvent};
use crate::view::{render, PageView, ViewState};

// =============================================================================
// View Sources
// =============================================================================

/// Signal handles the view reads. Cloned into the render effect.
#[derive(Clone)]
struct ViewSources {
    position: Signal<u32>,
    solid_threshold: u32,
    menu_open: Signal<bool>,
    latches: Vec<(ElementId, Signal<bool>)>,
    email: Signal<String>,
    submitted: Signal<bool>,
    items: Vec<NavItem>,
    stagger_step_ms: u32,
}

impl ViewSources {
    fn snapshot(&self) -> ViewState {
        let scroll_position = self.position.get();
        ViewState {
            scroll_position,
            chrome_solid: chrome_solid(scroll_position, self.solid_threshold),
            menu_open: self.menu_open.get(),
            revealed: self
                .latches
                .iter()
                .map(|(id, latch)| (*id, latch.get()))
                .collect(),
            email: self.email.get(),
            submitted: self.submitted.get(),
        }
    }

    fn render(&self) -> PageView {
        render(&self.snapshot(), &self.items, self.stagger_step_ms)
    }
}

// =============================================================================
// Page Handle
// =============================================================================

/// A mounted page view.
///
/// Owns the state owners and the render effect. Host resources are released
/// exactly once: by [`PageHandle::unmount`], or on drop if the handle goes
/// away any other way.
pub struct PageHandle {
    reveal: RevealEngine,
    scroll: ScrollState,
    menu: MenuController,
    form: SubscriptionForm,
    sources: ViewSources,
    stop_effect: Option<Box<dyn FnOnce()>>,
    mounted: bool,
}

impl PageHandle {
    // =========================================================================
    // Event Dispatch
    // =========================================================================

    /// Route one host event to its state owner.
    ///
    /// Events are handled to completion, in the order they are delivered.
    pub fn dispatch(&mut self, event: PageEvent) -> EventResponse {
        if !self.mounted {
            debug!("page: event after unmount ignored: {:?}", event);
            return EventResponse::Ignored;
        }

        match event {
            PageEvent::Scroll(offset) => {
                if !self.scroll.is_listening() {
                    return EventResponse::Ignored;
                }
                self.scroll.on_scroll(offset);
                EventResponse::Handled
            }
            PageEvent::AnimationFrame => {
                if self.scroll.flush_frame() {
                    EventResponse::Handled
                } else {
                    EventResponse::Ignored
                }
            }
            PageEvent::Intersections(entries) => {
                if !self.reveal.is_connected() {
                    return EventResponse::Ignored;
                }
                self.reveal.observe(&entries);
                EventResponse::Handled
            }
            PageEvent::MenuToggle => {
                self.menu.toggle();
                EventResponse::Handled
            }
            PageEvent::NavActivate(index) => match self.menu.activate(index) {
                Some(href) => EventResponse::FollowLink(href),
                None => EventResponse::Ignored,
            },
            PageEvent::EmailInput(value) => {
                if self.form.on_email_change(value) {
                    EventResponse::Handled
                } else {
                    EventResponse::Ignored
                }
            }
            PageEvent::Submit => {
                let outcome = self.form.on_submit();
                debug!("page: submit -> {:?}", outcome);
                if outcome.prevents_default() {
                    EventResponse::PreventDefault
                } else {
                    EventResponse::Handled
                }
            }
        }
    }

    // =========================================================================
    // State Access
    // =========================================================================

    /// Render the current state (outside the effect).
    pub fn view(&self) -> PageView {
        self.sources.render()
    }

    pub fn view_state(&self) -> ViewState {
        self.sources.snapshot()
    }

    pub fn reveal(&self) -> &RevealEngine {
        &self.reveal
    }

    pub fn scroll(&self) -> &ScrollState {
        &self.scroll
    }

    pub fn menu(&self) -> &MenuController {
        &self.menu
    }

    pub fn form(&self) -> &SubscriptionForm {
        &self.form
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    // =========================================================================
    // Teardown
    // =========================================================================

    /// Stop the render effect and release host resources.
    pub fn unmount(mut self) {
        self.teardown();
    }

    fn teardown(&mut self) {
        if !self.mounted {
            return;
        }
        self.mounted = false;

        if let Some(stop) = self.stop_effect.take() {
            stop();
        }

        self.reveal.teardown();
        self.scroll.teardown();
        self.menu.teardown();
        info!("page: unmounted");
    }
}

impl Drop for PageHandle {
    fn drop(&mut self) {
        self.teardown();
    }
}

// =============================================================================
// Mount Functions
// =============================================================================

/// Mount a page without a render effect.
///
/// The caller renders on demand with [`PageHandle::view`].
pub fn mount(
    host: SharedHost,
    config: PageConfig,
    sink: Box<dyn WaitlistSink>,
    targets: &[ElementId],
) -> PageHandle {
    build(host, config, sink, targets)
}

/// Mount a page and re-render through `on_render` after every state change.
///
/// The effect runs once on creation with the initial state.
pub fn mount_with_renderer<R>(
    host: SharedHost,
    config: PageConfig,
    sink: Box<dyn WaitlistSink>,
    targets: &[ElementId],
    mut on_render: R,
) -> PageHandle
where
    R: FnMut(&PageView) + 'static,
{
    let mut handle = build(host, config, sink, targets);

    let sources = handle.sources.clone();
    let stop = effect(move || {
        // Reading every source signal creates the dependencies
        let view = sources.render();
        on_render(&view);
    });

    handle.stop_effect = Some(Box::new(stop));
    handle
}

fn build(
    host: SharedHost,
    config: PageConfig,
    sink: Box<dyn WaitlistSink>,
    targets: &[ElementId],
) -> PageHandle {
    let mut reveal = RevealEngine::new(host.clone(), config.reveal.clone());
    reveal.register(targets.iter().copied());

    let mut scroll = ScrollState::new(host.clone(), config.scroll.clone());
    scroll.attach();

    let menu = MenuController::new(host, config.menu.clone());
    let form = SubscriptionForm::new(sink);

    let sources = ViewSources {
        position: scroll.position_signal(),
        solid_threshold: scroll.threshold(),
        menu_open: menu.open_signal(),
        latches: reveal.latches(),
        email: form.email_signal(),
        submitted: form.submitted_signal(),
        items: config.menu.items.clone(),
        stagger_step_ms: config.menu.stagger_step_ms,
    };

    info!(
        "page: mounted with {} reveal target(s), {} nav item(s)",
        targets.len(),
        config.menu.items.len()
    );

    PageHandle {
        reveal,
        scroll,
        menu,
        form,
        sources,
        stop_effect: None,
        mounted: true,
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{share, MemoryHost};
    use crate::state::LocalWaitlist;
    use crate::types::IntersectionEntry;
    use crate::view::FormView;
    use spark_signals::flush_sync;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn setup() -> (Rc<RefCell<MemoryHost>>, PageHandle) {
        let (host, shared) = share(MemoryHost::new());
        let handle = mount(
            shared,
            PageConfig::default(),
            Box::new(LocalWaitlist::new()),
            &[ElementId(1), ElementId(2)],
        );
        (host, handle)
    }

    #[test]
    fn test_mount_acquires_resources() {
        let (host, handle) = setup();

        assert!(handle.is_mounted());
        assert!(host.borrow().observer_connected);
        assert!(host.borrow().scroll_listener_attached);
        assert_eq!(host.borrow().observed, vec![ElementId(1), ElementId(2)]);
    }

    #[test]
    fn test_dispatch_routes_events() {
        let (host, mut handle) = setup();

        assert_eq!(handle.dispatch(PageEvent::Scroll(120)), EventResponse::Handled);
        assert!(handle.scroll().chrome_solid());

        assert_eq!(
            handle.dispatch(PageEvent::Intersections(vec![IntersectionEntry::new(
                ElementId(2),
                0.5,
                true
            )])),
            EventResponse::Handled
        );
        assert!(handle.reveal().is_visible(ElementId(2)));

        assert_eq!(handle.dispatch(PageEvent::MenuToggle), EventResponse::Handled);
        assert!(host.borrow().is_scroll_locked());

        assert_eq!(
            handle.dispatch(PageEvent::NavActivate(0)),
            EventResponse::FollowLink("#features".to_string())
        );
        assert!(!host.borrow().is_scroll_locked());

        assert_eq!(handle.dispatch(PageEvent::NavActivate(9)), EventResponse::Ignored);
    }

    #[test]
    fn test_submit_always_prevents_default() {
        let (_host, mut handle) = setup();

        assert_eq!(handle.dispatch(PageEvent::Submit), EventResponse::PreventDefault);
        assert!(!handle.form().is_submitted());

        handle.dispatch(PageEvent::EmailInput("alice@example.com".to_string()));
        assert_eq!(handle.dispatch(PageEvent::Submit), EventResponse::PreventDefault);
        assert!(handle.form().is_submitted());

        assert_eq!(
            handle.dispatch(PageEvent::EmailInput("again@example.com".to_string())),
            EventResponse::Ignored
        );

        // Repeat submissions are still kept from the host
        assert_eq!(handle.dispatch(PageEvent::Submit), EventResponse::PreventDefault);
    }

    #[test]
    fn test_view_reads_current_state() {
        let (_host, mut handle) = setup();

        handle.dispatch(PageEvent::Scroll(51));
        handle.dispatch(PageEvent::EmailInput("bob@x.com".to_string()));

        let view = handle.view();
        assert_eq!(view.nav.class, "nav nav--solid");
        assert_eq!(
            view.form,
            FormView::Entry {
                email: "bob@x.com".to_string(),
                placeholder: crate::content::EMAIL_PLACEHOLDER
            }
        );
    }

    #[test]
    fn test_unmount_releases_once() {
        let (host, mut handle) = setup();
        handle.dispatch(PageEvent::MenuToggle);

        handle.unmount();

        let host = host.borrow();
        assert_eq!(host.disconnect_calls, 1);
        assert_eq!(host.listener_removes, 1);
        assert!(!host.is_scroll_locked());
        assert_eq!(host.overflow_writes.len(), 2);
    }

    #[test]
    fn test_drop_releases_resources() {
        let (host, mut handle) = setup();
        handle.dispatch(PageEvent::MenuToggle);

        drop(handle);

        let host = host.borrow();
        assert!(!host.observer_connected);
        assert!(!host.scroll_listener_attached);
        assert!(!host.is_scroll_locked());
        assert_eq!(host.disconnect_calls, 1);
    }

    #[test]
    fn test_coalesced_scroll_waits_for_frame() {
        let (_host, shared) = share(MemoryHost::new());
        let mut config = PageConfig::default();
        config.scroll.coalesce_per_frame = true;
        let mut handle = mount(shared, config, Box::new(LocalWaitlist::new()), &[]);

        handle.dispatch(PageEvent::Scroll(40));
        handle.dispatch(PageEvent::Scroll(90));
        assert!(!handle.view_state().chrome_solid);

        assert_eq!(handle.dispatch(PageEvent::AnimationFrame), EventResponse::Handled);
        assert_eq!(handle.view_state().scroll_position, 90);
        assert!(handle.view_state().chrome_solid);

        assert_eq!(handle.dispatch(PageEvent::AnimationFrame), EventResponse::Ignored);
    }

    #[test]
    fn test_render_effect_tracks_state() {
        let (_host, shared) = share(MemoryHost::new());
        let last: Rc<RefCell<Option<PageView>>> = Rc::new(RefCell::new(None));
        let last_for_effect = last.clone();

        let mut handle = mount_with_renderer(
            shared,
            PageConfig::default(),
            Box::new(LocalWaitlist::new()),
            &[ElementId(1)],
            move |view| {
                *last_for_effect.borrow_mut() = Some(view.clone());
            },
        );
        flush_sync();

        assert_eq!(
            last.borrow().as_ref().map(|v| v.nav.class),
            Some("nav nav--transparent")
        );

        handle.dispatch(PageEvent::Scroll(200));
        handle.dispatch(PageEvent::MenuToggle);
        flush_sync();

        let view = last.borrow().clone().unwrap();
        assert_eq!(view.nav.class, "nav nav--solid");
        assert!(view.menu.open);

        handle.unmount();
    }
}
