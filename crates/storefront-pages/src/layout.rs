//! Page chrome: header, footer, mobile bottom navigation.
//!
//! Everything here is plain data. A renderer (terminal, HTML, test
//! assertion) walks a [`PageShell`] and draws it however it likes.

use chrono::{Datelike, NaiveDate, Utc};
use storefront_types::{SITE_NAME, User};
use strum::IntoEnumIterator;

pub const NOT_FOUND_HEADING: &str = "Page Not Found";
pub const NOT_FOUND_MESSAGE: &str = "The page you're looking for doesn't exist.";

/// What a shell needs to know about the visitor.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ShellContext {
    pub user: Option<User>,
    /// Current path, for active-tab detection.
    pub path: String,
    pub cart_count: u32,
}

/// A full page: header, body, footer, and optionally the bottom nav.
#[derive(Debug, Clone, PartialEq)]
pub struct PageShell {
    /// Document title, when the page sets one.
    pub title: Option<String>,
    pub meta_description: Option<String>,
    pub header: Header,
    pub body: Body,
    pub footer: Footer,
    pub bottom_nav: Option<BottomNav>,
}

impl PageShell {
    pub fn new(ctx: &ShellContext, body: Body, with_bottom_nav: bool) -> Self {
        Self {
            title: None,
            meta_description: None,
            header: Header { user: ctx.user.clone() },
            body,
            footer: Footer::current(),
            bottom_nav: with_bottom_nav.then(|| BottomNav::new(&ctx.path, ctx.cart_count)),
        }
    }

    pub fn with_meta(mut self, title: impl Into<String>, description: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self.meta_description = Some(description.into());
        self
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self.body, Body::NotFound)
    }
}

/// Top navigation bar.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Header {
    pub user: Option<User>,
}

impl Header {
    pub fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    /// Content is being fetched.
    Loading,
    /// Static prose.
    Article(Article),
    /// CMS markdown with its last-updated date.
    Document(Document),
    NotFound,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    pub heading: &'static str,
    pub blocks: Vec<Block>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Paragraph(&'static str),
    Subheading(&'static str),
    Bullets(Vec<&'static str>),
    /// Numbered items, each a bold title over a line of text.
    Numbered(Vec<(&'static str, &'static str)>),
    /// `**label:** value`
    Labeled { label: &'static str, value: &'static str },
    /// A labeled multi-line address.
    Address { label: &'static str, lines: Vec<&'static str> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub title: String,
    /// Markdown source, rendered by the caller.
    pub markdown: String,
    /// Omitted from the page when the backend sent no usable timestamp.
    pub updated_on: Option<NaiveDate>,
}

// ============================================================================
// Footer
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Footer {
    pub brand: &'static str,
    pub tagline: &'static str,
    pub sections: &'static [FooterSection],
    pub copyright: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterSection {
    pub title: &'static str,
    pub links: &'static [FooterLink],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FooterLink {
    pub label: &'static str,
    /// `None` for placeholders with no destination yet.
    pub href: Option<&'static str>,
}

const fn link(label: &'static str, href: &'static str) -> FooterLink {
    FooterLink { label, href: Some(href) }
}

const fn placeholder(label: &'static str) -> FooterLink {
    FooterLink { label, href: None }
}

pub const FOOTER_SECTIONS: &[FooterSection] = &[
    FooterSection {
        title: "Shop",
        links: &[
            link("Sarees", "/products?category=sarees"),
            link("T-Shirts", "/products?category=t-shirts"),
            link("Hoodies", "/products?category=hoodies"),
            link("Jewelry", "/products?category=jewelry"),
        ],
    },
    FooterSection {
        title: "Legal",
        links: &[
            link("Privacy Policy", "/privacy-policy"),
            link("Return Policy", "/return-policy"),
            link("Terms & Conditions", "/terms-and-conditions"),
        ],
    },
    FooterSection {
        title: "Customer Service",
        links: &[
            placeholder("Contact Us"),
            placeholder("Track Order"),
            link("Returns & Exchanges", "/return-policy"),
            placeholder("Shipping Info"),
            placeholder("FAQs"),
        ],
    },
    FooterSection {
        title: "Company",
        links: &[
            placeholder("About Us"),
            placeholder("Careers"),
            placeholder("Blog"),
            placeholder("Press"),
        ],
    },
];

impl Footer {
    pub fn for_year(year: i32) -> Self {
        Self {
            brand: "Mirvaa",
            tagline: "Your trusted destination for quality fashion. From traditional sarees to modern streetwear.",
            sections: FOOTER_SECTIONS,
            copyright: format!("© {year} {SITE_NAME}. All rights reserved."),
        }
    }

    pub fn current() -> Self {
        Self::for_year(Utc::now().year())
    }

    pub fn section(&self, title: &str) -> Option<&FooterSection> {
        self.sections.iter().find(|s| s.title == title)
    }
}

// ============================================================================
// Bottom navigation
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::EnumIter, strum::Display)]
pub enum NavTab {
    Home,
    Categories,
    Wishlist,
    Account,
    Cart,
}

impl NavTab {
    pub fn path(self) -> &'static str {
        match self {
            NavTab::Home => "/",
            NavTab::Categories => "/categories",
            NavTab::Wishlist => "/wishlist",
            NavTab::Account => "/account",
            NavTab::Cart => "/cart",
        }
    }

    /// The tab whose path is exactly `path`.
    pub fn for_path(path: &str) -> Option<Self> {
        Self::iter().find(|tab| tab.path() == path)
    }
}

/// Mobile tab bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BottomNav {
    pub active: Option<NavTab>,
    /// Shown on the cart tab; `None` when the cart is empty.
    pub cart_badge: Option<u32>,
}

impl BottomNav {
    pub fn new(current_path: &str, cart_count: u32) -> Self {
        Self {
            active: NavTab::for_path(current_path),
            cart_badge: (cart_count > 0).then_some(cart_count),
        }
    }

    pub fn tabs(&self) -> impl Iterator<Item = NavTab> {
        NavTab::iter()
    }

    pub fn is_active(&self, tab: NavTab) -> bool {
        self.active == Some(tab)
    }
}
