//! In-memory document tree for extractor tests.
//!
//! Supports `tag`, `.class`, `#id`, compound (`div.card`) and descendant
//! (`a b`) selectors, which is all the extractor uses.

use super::{Document, Node};

#[derive(Debug, Clone)]
enum Content {
    Text(String),
    Element(MemoryNode),
}

#[derive(Debug, Clone)]
pub(crate) struct MemoryNode {
    tag: String,
    id: Option<String>,
    classes: Vec<String>,
    content: Vec<Content>,
}

impl MemoryNode {
    pub(crate) fn element(tag: &str) -> Self {
        Self { tag: tag.to_string(), id: None, classes: Vec::new(), content: Vec::new() }
    }

    pub(crate) fn id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub(crate) fn class(mut self, class: &str) -> Self {
        self.classes.push(class.to_string());
        self
    }

    pub(crate) fn with_text(mut self, text: &str) -> Self {
        self.content.push(Content::Text(text.to_string()));
        self
    }

    pub(crate) fn child(mut self, child: MemoryNode) -> Self {
        self.content.push(Content::Element(child));
        self
    }

    pub(crate) fn children(self, children: impl IntoIterator<Item = MemoryNode>) -> Self {
        children.into_iter().fold(self, MemoryNode::child)
    }

    fn elements(&self) -> impl Iterator<Item = &MemoryNode> {
        self.content.iter().filter_map(|content| match content {
            Content::Element(node) => Some(node),
            Content::Text(_) => None,
        })
    }

    fn collect_text(&self, out: &mut String) {
        for content in &self.content {
            match content {
                Content::Text(text) => out.push_str(text),
                Content::Element(node) => node.collect_text(out),
            }
        }
    }

    fn walk<'a>(&'a self, ancestors: &mut Vec<&'a MemoryNode>, steps: &[Step], out: &mut Vec<MemoryNode>) {
        ancestors.push(self);
        for child in self.elements() {
            if let Some((last, rest)) = steps.split_last()
                && last.matches(child)
                && ancestors_match(ancestors, rest)
            {
                out.push(child.clone());
            }
            child.walk(ancestors, steps, out);
        }
        ancestors.pop();
    }
}

impl Node for MemoryNode {
    fn text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn own_text(&self) -> String {
        self.content
            .iter()
            .filter_map(|content| match content {
                Content::Text(text) => Some(text.as_str()),
                Content::Element(_) => None,
            })
            .collect()
    }

    fn find_all(&self, selector: &str) -> Vec<Self> {
        let steps: Vec<Step> = selector.split_whitespace().map(Step::parse).collect();
        let mut out = Vec::new();
        if !steps.is_empty() {
            self.walk(&mut Vec::new(), &steps, &mut out);
        }
        out
    }
}

/// Document whose root is an implicit `html` element.
pub(crate) struct MemoryDocument {
    root: MemoryNode,
}

impl MemoryDocument {
    pub(crate) fn new(body: impl IntoIterator<Item = MemoryNode>) -> Self {
        Self { root: MemoryNode::element("html").children(body) }
    }
}

impl Document for MemoryDocument {
    type Node<'a> = MemoryNode;

    fn find_all(&self, selector: &str) -> Vec<MemoryNode> {
        self.root.find_all(selector)
    }
}

/// One compound selector such as `div.card` or `#list`.
#[derive(Debug, Default)]
struct Step {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
}

impl Step {
    fn parse(raw: &str) -> Self {
        let mut step = Step::default();
        let mut rest = raw;
        let tag_end = rest.find(['.', '#']).unwrap_or(rest.len());
        if tag_end > 0 {
            step.tag = Some(rest[..tag_end].to_string());
        }
        rest = &rest[tag_end..];

        while let Some(marker) = rest.chars().next() {
            let body = &rest[1..];
            let end = body.find(['.', '#']).unwrap_or(body.len());
            let name = body[..end].to_string();
            if marker == '#' {
                step.id = Some(name);
            } else {
                step.classes.push(name);
            }
            rest = &body[end..];
        }

        step
    }

    fn matches(&self, node: &MemoryNode) -> bool {
        self.tag.as_deref().is_none_or(|tag| tag == node.tag)
            && self.id.as_deref().is_none_or(|id| node.id.as_deref() == Some(id))
            && self.classes.iter().all(|class| node.classes.contains(class))
    }
}

/// Right-to-left greedy match of `steps` against the ancestor chain.
fn ancestors_match(ancestors: &[&MemoryNode], steps: &[Step]) -> bool {
    let mut remaining = steps.iter().rev().peekable();
    for ancestor in ancestors.iter().rev() {
        match remaining.peek() {
            Some(step) if step.matches(ancestor) => {
                remaining.next();
            }
            Some(_) => {}
            None => break,
        }
    }
    remaining.peek().is_none()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> MemoryDocument {
        MemoryDocument::new([MemoryNode::element("div").id("list").children([
            MemoryNode::element("div").class("card").class("wide").children([
                MemoryNode::element("span")
                    .class("badge")
                    .with_text("Gold ")
                    .child(MemoryNode::element("i").with_text("*")),
                MemoryNode::element("h4").with_text("First"),
            ]),
            MemoryNode::element("section").child(MemoryNode::element("h4").with_text("Nested")),
        ])])
    }

    #[test]
    fn test_tag_class_and_id_selectors() {
        let doc = sample();
        assert_eq!(doc.find_all("h4").len(), 2);
        assert_eq!(doc.find_all(".card").len(), 1);
        assert_eq!(doc.find_all("div.card.wide").len(), 1);
        assert_eq!(doc.find_all("span.card").len(), 0);
        assert_eq!(doc.find_all("#list").len(), 1);
    }

    #[test]
    fn test_descendant_selector() {
        let doc = sample();
        let texts: Vec<String> = doc.find_all("#list .card h4").iter().map(Node::text).collect();
        assert_eq!(texts, vec!["First"]);
        assert_eq!(doc.find_all("section h4")[0].text(), "Nested");
    }

    #[test]
    fn test_text_and_own_text() {
        let badges = sample().find_all(".badge");
        let badge = &badges[0];
        assert_eq!(badge.text(), "Gold *");
        assert_eq!(badge.own_text(), "Gold ");
    }

    #[test]
    fn test_empty_selector_matches_nothing() {
        assert!(sample().find_all("   ").is_empty());
    }
}
