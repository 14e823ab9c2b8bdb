//! End-to-end page scenarios against headless hosts.
//!
//! Run with: cargo test --test page_scenario

use std::cell::RefCell;
use std::rc::Rc;

use spark_signals::flush_sync;

use giftswap_landing::content::{page_sections, CTA_BLOCK, FEATURES_HEADER, REVEAL_TARGETS};
use giftswap_landing::view::FormView;
use giftswap_landing::{
    mount, mount_with_renderer, share, EventResponse, IntersectionTracker, LocalWaitlist,
    MemoryHost, Overflow, PageConfig, PageEvent, PageHandle, PageLayout, PageView, Viewport,
};

const WIDTH: f32 = 800.0;
const HEIGHT: f32 = 480.0;

fn setup() -> (Rc<RefCell<MemoryHost>>, LocalWaitlist, PageHandle) {
    let (host, shared) = share(MemoryHost::new());
    let waitlist = LocalWaitlist::new();
    let handle = mount(
        shared,
        PageConfig::default(),
        Box::new(waitlist.clone()),
        &REVEAL_TARGETS,
    );
    (host, waitlist, handle)
}

// =============================================================================
// VISITOR SESSION
// =============================================================================

#[test]
fn test_visitor_session() {
    let (host, waitlist, mut handle) = setup();

    // Scroll down past the threshold
    assert_eq!(handle.dispatch(PageEvent::Scroll(120)), EventResponse::Handled);
    assert!(handle.view_state().chrome_solid);
    assert_eq!(handle.view().nav.class, "nav nav--solid");

    // Open the menu: page scroll suspended
    handle.dispatch(PageEvent::MenuToggle);
    assert!(handle.view().menu.open);
    assert_eq!(host.borrow().overflow, Overflow::Hidden);

    // Follow the first entry: menu closes, scroll restored
    assert_eq!(
        handle.dispatch(PageEvent::NavActivate(0)),
        EventResponse::FollowLink("#features".to_string())
    );
    assert!(!handle.view().menu.open);
    assert_eq!(host.borrow().overflow, Overflow::Visible);

    // Type and submit
    handle.dispatch(PageEvent::EmailInput("bob@x.com".to_string()));
    assert_eq!(handle.dispatch(PageEvent::Submit), EventResponse::PreventDefault);

    let state = handle.view_state();
    assert!(state.submitted);
    assert_eq!(state.email, "");
    assert!(matches!(handle.view().form, FormView::Acknowledged { .. }));
    assert_eq!(waitlist.entries(), vec!["bob@x.com".to_string()]);

    // Back to the top: chrome transparent again
    handle.dispatch(PageEvent::Scroll(0));
    assert!(!handle.view_state().chrome_solid);

    handle.unmount();

    let host = host.borrow();
    assert!(!host.observer_connected);
    assert!(!host.scroll_listener_attached);
    assert_eq!(host.disconnect_calls, 1);
    assert_eq!(host.listener_removes, 1);
}

#[test]
fn test_empty_submit_changes_nothing() {
    let (_host, waitlist, mut handle) = setup();

    assert_eq!(handle.dispatch(PageEvent::Submit), EventResponse::PreventDefault);

    assert!(!handle.view_state().submitted);
    assert!(waitlist.entries().is_empty());
    assert!(matches!(handle.view().form, FormView::Entry { .. }));
}

#[test]
fn test_unmount_with_menu_open_restores_prior_overflow() {
    let (host, shared) = share(MemoryHost::with_overflow(Overflow::Hidden));
    let mut handle = mount(
        shared,
        PageConfig::default(),
        Box::new(LocalWaitlist::new()),
        &REVEAL_TARGETS,
    );

    handle.dispatch(PageEvent::MenuToggle);
    drop(handle);

    // Host was already suspended before the page opened its menu
    assert_eq!(host.borrow().overflow, Overflow::Hidden);
}

// =============================================================================
// REVEAL OVER A LAID-OUT PAGE
// =============================================================================

fn deliver(
    handle: &mut PageHandle,
    tracker: &mut IntersectionTracker,
    layout: &PageLayout,
    scroll_y: f32,
) {
    handle.dispatch(PageEvent::Scroll(scroll_y as u32));
    let entries = tracker.update(&Viewport::new(scroll_y, WIDTH, HEIGHT), |id| {
        layout.reveal_bounds(id)
    });
    if !entries.is_empty() {
        handle.dispatch(PageEvent::Intersections(entries));
    }
}

#[test]
fn test_reveals_latch_while_scrolling() {
    let (_host, _waitlist, mut handle) = setup();
    let layout = PageLayout::compute(&page_sections(), WIDTH, HEIGHT).unwrap();

    let mut tracker = IntersectionTracker::new(PageConfig::default().reveal);
    tracker.observe(&REVEAL_TARGETS);

    deliver(&mut handle, &mut tracker, &layout, 0.0);
    for id in REVEAL_TARGETS {
        assert!(!handle.reveal().is_visible(id));
    }

    // Bring the features header into the root
    let header = layout.reveal_bounds(FEATURES_HEADER).unwrap();
    deliver(&mut handle, &mut tracker, &layout, header.y - HEIGHT / 2.0);
    assert!(handle.reveal().is_visible(FEATURES_HEADER));
    assert!(!handle.reveal().is_visible(CTA_BLOCK));

    // Walk to the bottom
    let bottom = layout.max_scroll(HEIGHT);
    let mut y = header.y;
    while y < bottom {
        y = (y + 40.0).min(bottom);
        deliver(&mut handle, &mut tracker, &layout, y);
    }
    for id in REVEAL_TARGETS {
        assert!(handle.reveal().is_visible(id), "{} not revealed", id);
    }

    // Scrolling back never hides anything
    deliver(&mut handle, &mut tracker, &layout, 0.0);
    for id in REVEAL_TARGETS {
        assert!(handle.view().is_revealed(id));
    }
}

// =============================================================================
// RENDER EFFECT
// =============================================================================

#[test]
fn test_render_effect_sees_every_owner() {
    let (_host, shared) = share(MemoryHost::new());
    let renders: Rc<RefCell<Vec<PageView>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = renders.clone();

    let mut handle = mount_with_renderer(
        shared,
        PageConfig::default(),
        Box::new(LocalWaitlist::new()),
        &REVEAL_TARGETS,
        move |view| sink.borrow_mut().push(view.clone()),
    );
    flush_sync();
    assert!(!renders.borrow().is_empty());

    handle.dispatch(PageEvent::Scroll(60));
    flush_sync();
    assert_eq!(renders.borrow().last().map(|v| v.nav.class), Some("nav nav--solid"));

    handle.dispatch(PageEvent::MenuToggle);
    flush_sync();
    assert!(renders.borrow().last().is_some_and(|v| v.menu.open));

    handle.dispatch(PageEvent::MenuToggle);
    handle.dispatch(PageEvent::EmailInput("c@d.io".to_string()));
    handle.dispatch(PageEvent::Submit);
    flush_sync();
    assert!(matches!(
        renders.borrow().last().map(|v| v.form.clone()),
        Some(FormView::Acknowledged { .. })
    ));

    // No renders after unmount
    handle.unmount();
    let count = renders.borrow().len();
    flush_sync();
    assert_eq!(renders.borrow().len(), count);
}
