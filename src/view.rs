//! View - pure rendering of page state.
//!
//! [`render`] maps a state snapshot to the classes and inline styles each
//! part of the page should carry. It makes no decisions of its own: every
//! branch is a direct read of state owned elsewhere.

use crate::config::NavItem;
use crate::content::{ACK_BODY, ACK_TITLE, EMAIL_PLACEHOLDER};
use crate::state::stagger_delay_ms;
use crate::types::{ChromeFlags, ElementId};

// =============================================================================
// INPUT SNAPSHOT
// =============================================================================

/// Everything the view reads, captured at one point in time.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ViewState {
    pub scroll_position: u32,
    pub chrome_solid: bool,
    pub menu_open: bool,
    /// Reveal targets with their latch state, in id order.
    pub revealed: Vec<(ElementId, bool)>,
    pub email: String,
    pub submitted: bool,
}

// =============================================================================
// OUTPUT
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct PageView {
    pub chrome: ChromeFlags,
    pub nav: NavView,
    pub menu: MenuView,
    pub reveals: Vec<RevealView>,
    pub form: FormView,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NavView {
    pub class: &'static str,
    pub brand_class: &'static str,
    pub link_class: &'static str,
    pub logo_scale: f32,
    /// Hamburger bars, top to bottom.
    pub burger: [&'static str; 3],
}

#[derive(Debug, Clone, PartialEq)]
pub struct MenuView {
    pub open: bool,
    pub class: &'static str,
    pub items: Vec<MenuItemView>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MenuItemView {
    pub label: String,
    pub href: String,
    pub class: String,
    pub transition_delay_ms: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RevealView {
    pub id: ElementId,
    pub visible: bool,
    pub class: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormView {
    Entry {
        email: String,
        placeholder: &'static str,
    },
    Acknowledged {
        title: &'static str,
        body: &'static str,
    },
}

// =============================================================================
// RENDER
// =============================================================================

/// Render a snapshot.
pub fn render(state: &ViewState, items: &[NavItem], stagger_step_ms: u32) -> PageView {
    let chrome = ChromeFlags::from_state(state.chrome_solid, state.menu_open);

    PageView {
        chrome,
        nav: render_nav(chrome),
        menu: render_menu(state.menu_open, items, stagger_step_ms),
        reveals: state
            .revealed
            .iter()
            .map(|&(id, visible)| RevealView {
                id,
                visible,
                class: if visible { "reveal visible" } else { "reveal" },
            })
            .collect(),
        form: render_form(state),
    }
}

fn render_nav(chrome: ChromeFlags) -> NavView {
    let solid = chrome.contains(ChromeFlags::SOLID);
    let open = chrome.contains(ChromeFlags::MENU_OPEN);

    NavView {
        class: if solid { "nav nav--solid" } else { "nav nav--transparent" },
        brand_class: if solid { "brand brand--dark" } else { "brand brand--light" },
        link_class: if solid { "nav-link nav-link--dark" } else { "nav-link nav-link--light" },
        logo_scale: if solid { 0.9 } else { 1.0 },
        burger: if open {
            ["burger-bar burger-bar--top-open", "burger-bar burger-bar--hidden", "burger-bar burger-bar--bottom-open"]
        } else {
            ["burger-bar", "burger-bar", "burger-bar"]
        },
    }
}

fn render_menu(open: bool, items: &[NavItem], stagger_step_ms: u32) -> MenuView {
    MenuView {
        open,
        class: if open {
            "menu-overlay menu-overlay--open"
        } else {
            "menu-overlay menu-overlay--closed"
        },
        items: items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                let mut class = String::from(if open {
                    "menu-item menu-item--shown"
                } else {
                    "menu-item menu-item--hidden"
                });
                if item.is_button {
                    class.push_str(" menu-item--button");
                }

                MenuItemView {
                    label: item.label.clone(),
                    href: item.href.clone(),
                    class,
                    transition_delay_ms: stagger_delay_ms(index, stagger_step_ms, open),
                }
            })
            .collect(),
    }
}

fn render_form(state: &ViewState) -> FormView {
    if state.submitted {
        FormView::Acknowledged {
            title: ACK_TITLE,
            body: ACK_BODY,
        }
    } else {
        FormView::Entry {
            email: state.email.clone(),
            placeholder: EMAIL_PLACEHOLDER,
        }
    }
}

impl PageView {
    /// Whether a reveal target currently renders as visible.
    pub fn is_revealed(&self, id: ElementId) -> bool {
        self.reveals.iter().any(|r| r.id == id && r.visible)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MenuOptions;

    fn items() -> Vec<NavItem> {
        MenuOptions::default().items
    }

    #[test]
    fn test_initial_render() {
        let view = render(&ViewState::default(), &items(), 100);

        assert_eq!(view.chrome, ChromeFlags::NONE);
        assert_eq!(view.nav.class, "nav nav--transparent");
        assert_eq!(view.nav.logo_scale, 1.0);
        assert!(!view.menu.open);
        assert_eq!(
            view.form,
            FormView::Entry {
                email: String::new(),
                placeholder: EMAIL_PLACEHOLDER
            }
        );
    }

    #[test]
    fn test_solid_chrome() {
        let state = ViewState {
            scroll_position: 120,
            chrome_solid: true,
            ..ViewState::default()
        };
        let view = render(&state, &items(), 100);

        assert!(view.chrome.contains(ChromeFlags::SOLID));
        assert_eq!(view.nav.class, "nav nav--solid");
        assert_eq!(view.nav.brand_class, "brand brand--dark");
        assert_eq!(view.nav.logo_scale, 0.9);
    }

    #[test]
    fn test_open_menu_staggers_items() {
        let state = ViewState {
            menu_open: true,
            ..ViewState::default()
        };
        let view = render(&state, &items(), 100);

        assert_eq!(view.menu.class, "menu-overlay menu-overlay--open");
        assert_eq!(view.nav.burger[1], "burger-bar burger-bar--hidden");

        let delays: Vec<u32> = view.menu.items.iter().map(|i| i.transition_delay_ms).collect();
        assert_eq!(delays, vec![0, 100, 200]);
        assert!(view.menu.items[2].class.ends_with("menu-item--button"));
        assert_eq!(view.menu.items[0].href, "#features");
    }

    #[test]
    fn test_closed_menu_hides_without_delay() {
        let view = render(&ViewState::default(), &items(), 100);

        for item in &view.menu.items {
            assert_eq!(item.transition_delay_ms, 0);
            assert!(item.class.starts_with("menu-item menu-item--hidden"));
        }
    }

    #[test]
    fn test_reveal_classes() {
        let state = ViewState {
            revealed: vec![(ElementId(1), true), (ElementId(2), false)],
            ..ViewState::default()
        };
        let view = render(&state, &items(), 100);

        assert_eq!(view.reveals[0].class, "reveal visible");
        assert_eq!(view.reveals[1].class, "reveal");
        assert!(view.is_revealed(ElementId(1)));
        assert!(!view.is_revealed(ElementId(2)));
        assert!(!view.is_revealed(ElementId(3)));
    }

    #[test]
    fn test_submitted_renders_acknowledgement() {
        let state = ViewState {
            submitted: true,
            ..ViewState::default()
        };
        let view = render(&state, &items(), 100);

        assert_eq!(
            view.form,
            FormView::Acknowledged {
                title: ACK_TITLE,
                body: ACK_BODY
            }
        );
    }
}
