//! Queryable document trees.
//!
//! The extractor only needs three things from a parsed page: find elements by
//! CSS selector, read their text, and read their text with child elements
//! stripped. [`Document`] and [`Node`] capture exactly that, so extraction can
//! run against the `scraper` backend in production and an in-memory tree in tests.

#[cfg(test)]
pub(crate) mod memory;

use scraper::{ElementRef, Html, Selector};

/// An element inside a [`Document`].
pub trait Node: Sized {
    /// All text under this element, in document order.
    fn text(&self) -> String;

    /// Text of this element with every child element removed first.
    fn own_text(&self) -> String;

    /// Descendant elements matching `selector`, in document order.
    fn find_all(&self, selector: &str) -> Vec<Self>;
}

/// A parsed page that can be queried by selector.
pub trait Document {
    type Node<'a>: Node
    where
        Self: 'a;

    /// Elements matching `selector`, in document order.
    fn find_all(&self, selector: &str) -> Vec<Self::Node<'_>>;
}

/// HTML document backed by `scraper`.
pub struct HtmlDocument {
    html: Html,
}

impl HtmlDocument {
    /// Parse raw page bytes. Invalid UTF-8 is replaced rather than rejected.
    pub fn parse(bytes: &[u8]) -> Self {
        Self::parse_str(&String::from_utf8_lossy(bytes))
    }

    pub fn parse_str(html: &str) -> Self {
        Self { html: Html::parse_document(html) }
    }
}

impl Document for HtmlDocument {
    type Node<'a> = HtmlNode<'a>;

    fn find_all(&self, selector: &str) -> Vec<HtmlNode<'_>> {
        match compile(selector) {
            Some(selector) => self.html.select(&selector).map(HtmlNode).collect(),
            None => Vec::new(),
        }
    }
}

/// Element of an [`HtmlDocument`].
#[derive(Debug, Clone, Copy)]
pub struct HtmlNode<'a>(ElementRef<'a>);

impl Node for HtmlNode<'_> {
    fn text(&self) -> String {
        self.0.text().collect()
    }

    fn own_text(&self) -> String {
        self.0
            .children()
            .filter_map(|child| child.value().as_text())
            .map(|text| &**text)
            .collect()
    }

    fn find_all(&self, selector: &str) -> Vec<Self> {
        match compile(selector) {
            Some(selector) => self.0.select(&selector).map(HtmlNode).collect(),
            None => Vec::new(),
        }
    }
}

/// Unparseable selectors match nothing.
fn compile(selector: &str) -> Option<Selector> {
    match Selector::parse(selector) {
        Ok(compiled) => Some(compiled),
        Err(e) => {
            tracing::warn!(selector, error = %e, "invalid selector");
            None
        }
    }
}
