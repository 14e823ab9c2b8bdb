//! Page content - the static copy of the GiftSwap landing page.
//!
//! Content carries no decision logic. It is plain data that the layout
//! positions and the renderer paints; reveal targets are tagged with the
//! [`ElementId`]s the reveal engine observes.

use crate::types::ElementId;

pub const BRAND: &str = "GiftSwap";

pub const ACK_TITLE: &str = "You're on the list!";
pub const ACK_BODY: &str = "We'll notify you when GiftSwap launches.";

pub const EMAIL_PLACEHOLDER: &str = "Enter your email";
pub const FORM_HINT: &str = "Be the first to know when we launch. No spam, ever.";

// Reveal targets, in document order
pub const FEATURES_HEADER: ElementId = ElementId(1);
pub const FEATURES_GRID: ElementId = ElementId(2);
pub const STEPS_HEADER: ElementId = ElementId(3);
pub const STEPS_GRID: ElementId = ElementId(4);
pub const CTA_BLOCK: ElementId = ElementId(5);

pub const REVEAL_TARGETS: [ElementId; 5] = [
    FEATURES_HEADER,
    FEATURES_GRID,
    STEPS_HEADER,
    STEPS_GRID,
    CTA_BLOCK,
];

/// Which of the page's waitlist forms a block hosts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormSlot {
    Hero,
    CallToAction,
}

impl FormSlot {
    pub fn button_label(self) -> &'static str {
        match self {
            FormSlot::Hero => "Notify Me",
            FormSlot::CallToAction => "Join Waitlist",
        }
    }
}

/// What a block paints.
#[derive(Debug, Clone, PartialEq)]
pub enum BlockKind {
    Text(Vec<String>),
    /// Waitlist form (input or acknowledgement, decided by the view).
    Form(FormSlot),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    /// Reveal target id, if the block animates in.
    pub reveal: Option<ElementId>,
    pub kind: BlockKind,
}

impl Block {
    fn text(lines: &[&str]) -> Self {
        Self {
            reveal: None,
            kind: BlockKind::Text(lines.iter().map(|l| l.to_string()).collect()),
        }
    }

    fn revealed(id: ElementId, lines: &[&str]) -> Self {
        Self {
            reveal: Some(id),
            ..Self::text(lines)
        }
    }

    fn form(slot: FormSlot) -> Self {
        Self {
            reveal: None,
            kind: BlockKind::Form(slot),
        }
    }

    /// Number of text rows the block occupies.
    pub fn rows(&self) -> usize {
        match &self.kind {
            BlockKind::Text(lines) => lines.len(),
            BlockKind::Form(_) => FORM_ROWS,
        }
    }
}

/// Rows reserved for a form (input row, hint, spacing).
pub const FORM_ROWS: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    /// Anchor id (without `#`).
    pub anchor: &'static str,
    /// Fill at least one viewport height.
    pub full_height: bool,
    pub blocks: Vec<Block>,
}

/// The page, top to bottom.
pub fn page_sections() -> Vec<Section> {
    vec![
        Section {
            anchor: "notify",
            full_height: true,
            blocks: vec![
                Block::text(&["* Coming Soon"]),
                Block::text(&["Share the Joy", "of Giving"]),
                Block::text(&[
                    "The ultimate app for wishlists, gift exchanges, and celebrating",
                    "special moments with the people you love.",
                ]),
                Block::form(FormSlot::Hero),
                Block::text(&["[ App Store - Soon ]   [ Google Play - Soon ]"]),
            ],
        },
        Section {
            anchor: "features",
            full_height: false,
            blocks: vec![
                Block::revealed(
                    FEATURES_HEADER,
                    &[
                        "Features",
                        "Everything You Need",
                        "GiftSwap makes it effortless to organize events, create wishlists,",
                        "and share meaningful moments with those you love.",
                    ],
                ),
                Block::revealed(
                    FEATURES_GRID,
                    &[
                        "Smart Wishlists - Create beautiful wishlists with links, prices, and priorities.",
                        "Event Planning  - Organize gift exchanges for birthdays, holidays, and occasions.",
                        "Social Circle   - Connect with friends, track important dates, and discover",
                        "                  what they truly want.",
                    ],
                ),
            ],
        },
        Section {
            anchor: "how-it-works",
            full_height: false,
            blocks: vec![
                Block::revealed(
                    STEPS_HEADER,
                    &[
                        "How It Works",
                        "Simple as 1, 2, 3, 4",
                        "Get started in minutes and transform how you give and receive gifts.",
                    ],
                ),
                Block::revealed(
                    STEPS_GRID,
                    &[
                        "01 Create Account     - Sign up and add your important dates.",
                        "02 Build Wishlist     - Add items you love with links, notes, and priorities.",
                        "03 Connect Friends    - Find your people and share wishlists.",
                        "04 Celebrate Together - Organize exchanges and spread joy with every gift.",
                    ],
                ),
            ],
        },
        Section {
            anchor: "cta",
            full_height: false,
            blocks: vec![
                Block::revealed(
                    CTA_BLOCK,
                    &[
                        "Ready to Transform Gift Giving?",
                        "Join thousands on our waitlist and be the first to experience",
                        "the future of thoughtful gifting.",
                    ],
                ),
                Block::form(FormSlot::CallToAction),
                Block::text(&["Free to use  *  No credit card required  *  Cancel anytime"]),
            ],
        },
        Section {
            anchor: "footer",
            full_height: false,
            blocks: vec![Block::text(&[
                "GiftSwap    Privacy Policy   Terms of Service   Contact Us",
            ])],
        },
    ]
}
