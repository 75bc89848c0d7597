//! Minimal HTML traversal surface used by the infobox parser.
//!
//! The parser only needs two capabilities: finding descendant elements by a
//! structural predicate, and reading an element's visible text. Both are
//! expressed as traits so the rest of the crate never touches the HTML
//! library directly; [`HtmlDocument`] is the `scraper`-backed implementation.

use scraper::node::Element;
use scraper::{ElementRef, Html, Node};
use thiserror::Error;

/// Markup that cannot be turned into a document at all.
#[derive(Debug, Error)]
#[error("markup is not a parseable document: {0}")]
pub struct MarkupError(pub String);

/// Structural predicate over a single element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Predicate<'p> {
    /// Tag name, ASCII case-insensitive.
    Tag(&'p str),
    /// One of the element's classes, exact match.
    Class(&'p str),
    /// Tag and class together, e.g. `sup.reference`.
    TagWithClass(&'p str, &'p str),
}

impl Predicate<'_> {
    fn matches(&self, el: &Element) -> bool {
        match *self {
            Predicate::Tag(tag) => el.name().eq_ignore_ascii_case(tag),
            Predicate::Class(class) => el.classes().any(|c| c == class),
            Predicate::TagWithClass(tag, class) => {
                el.name().eq_ignore_ascii_case(tag) && el.classes().any(|c| c == class)
            }
        }
    }
}

pub trait MarkupElement: Sized + Copy {
    /// Descendants (excluding `self`) matching `pred`, in document order.
    fn find_all(&self, pred: Predicate<'_>) -> Vec<Self>;

    fn find_first(&self, pred: Predicate<'_>) -> Option<Self> {
        self.find_all(pred).into_iter().next()
    }

    fn has_ancestor(&self, pred: Predicate<'_>) -> bool;

    /// Visible text with nested markup stripped and whitespace collapsed.
    fn visible_text(&self) -> String;
}

pub trait MarkupDocument: Sized {
    type Element<'a>: MarkupElement
    where
        Self: 'a;

    fn parse(markup: &str) -> Result<Self, MarkupError>;

    fn root(&self) -> Self::Element<'_>;
}

/// Subtrees whose text never counts as visible.
const INVISIBLE: &[Predicate<'static>] = &[
    Predicate::Tag("style"),
    Predicate::Tag("script"),
    Predicate::TagWithClass("sup", "reference"),
];

/// `scraper`/html5ever document. html5ever recovers from any input, so
/// parsing never fails for this backend.
pub struct HtmlDocument(Html);

impl MarkupDocument for HtmlDocument {
    type Element<'a> = ElementRef<'a>;

    fn parse(markup: &str) -> Result<Self, MarkupError> {
        let html = Html::parse_document(markup);
        if !html.errors.is_empty() {
            tracing::trace!(
                target: "scrape.markup",
                recovered = html.errors.len(),
                "markup.parse.recovered_errors"
            );
        }
        Ok(Self(html))
    }

    fn root(&self) -> ElementRef<'_> {
        self.0.root_element()
    }
}

impl MarkupElement for ElementRef<'_> {
    fn find_all(&self, pred: Predicate<'_>) -> Vec<Self> {
        self.descendants()
            .skip(1)
            .filter_map(ElementRef::wrap)
            .filter(|el| pred.matches(el.value()))
            .collect()
    }

    fn has_ancestor(&self, pred: Predicate<'_>) -> bool {
        self.ancestors()
            .filter_map(ElementRef::wrap)
            .any(|el| pred.matches(el.value()))
    }

    fn visible_text(&self) -> String {
        let mut raw = String::new();
        collect_visible_text(*self, &mut raw);
        normalize_whitespace(&raw)
    }
}

fn collect_visible_text(el: ElementRef<'_>, out: &mut String) {
    for child in el.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(inner) => {
                if INVISIBLE.iter().any(|p| p.matches(inner)) {
                    continue;
                }
                if inner.name().eq_ignore_ascii_case("br") {
                    out.push(' ');
                    continue;
                }
                if let Some(child_el) = ElementRef::wrap(child) {
                    collect_visible_text(child_el, out);
                }
            }
            _ => {}
        }
    }
}

fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
