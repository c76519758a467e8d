//! Opening tag construction.
//!
//! [`StartTag`] merges a node's own `classes` and `ids` with whatever the
//! handler asks for, so every element carries the anchors and styling the
//! document author attached to it.

use std::collections::BTreeMap;
use std::fmt::Write;

use crate::node::Node;
use crate::state::encode;

/// Builder for an opening HTML tag derived from a node.
///
/// # Example
///
/// ```
/// use strapdoc_renderer::{Node, StartTag};
///
/// let node = Node::new("section").id("intro").class("lead");
/// let tag = StartTag::new(&node, "section").class("wide").build();
/// assert_eq!(tag, "<section class=\"lead wide\" id=\"intro\">\n");
/// ```
pub struct StartTag<'a> {
    node: &'a Node,
    tag: &'a str,
    classes: Vec<String>,
    attrs: BTreeMap<String, String>,
    ids: Option<Vec<String>>,
    suffix: &'a str,
    empty: bool,
}

impl<'a> StartTag<'a> {
    /// Start building an opening `tag` for `node`.
    #[must_use]
    pub fn new(node: &'a Node, tag: &'a str) -> Self {
        Self {
            node,
            tag,
            classes: Vec::new(),
            attrs: BTreeMap::new(),
            ids: None,
            suffix: "\n",
            empty: false,
        }
    }

    /// Add classes. The value may hold several space-separated names.
    #[must_use]
    pub fn class(mut self, class: &str) -> Self {
        self.classes
            .extend(class.split_whitespace().map(str::to_owned));
        self
    }

    /// Add an attribute. `class` and `id` have dedicated setters.
    #[must_use]
    pub fn attr(mut self, name: &str, value: impl Into<String>) -> Self {
        self.attrs.insert(name.to_lowercase(), value.into());
        self
    }

    /// Use these ids instead of the node's own.
    #[must_use]
    pub fn with_ids(mut self, ids: Vec<String>) -> Self {
        self.ids = Some(ids);
        self
    }

    /// Text appended after the tag (default `"\n"`).
    #[must_use]
    pub fn suffix(mut self, suffix: &'a str) -> Self {
        self.suffix = suffix;
        self
    }

    /// Render as a void element (`<tag ... />`).
    #[must_use]
    pub fn empty(mut self) -> Self {
        self.empty = true;
        self
    }

    /// Produce the tag text.
    #[must_use]
    pub fn build(self) -> String {
        let mut attrs = self.attrs;

        // Node classes first, then the handler's; language-* turns into lang.
        let mut classes: Vec<&str> = Vec::new();
        let mut language: Option<&str> = None;
        for class in self
            .node
            .classes()
            .into_iter()
            .chain(self.classes.iter().map(String::as_str))
        {
            if let Some(lang) = class.strip_prefix("language-") {
                language.get_or_insert(lang);
            } else if !class.trim().is_empty() && !classes.contains(&class) {
                classes.push(class);
            }
        }
        if let Some(lang) = language {
            attrs.insert("lang".to_owned(), lang.to_owned());
        }
        if !classes.is_empty() {
            attrs.insert("class".to_owned(), classes.join(" "));
        }

        let ids = self
            .ids
            .unwrap_or_else(|| self.node.ids().into_iter().map(str::to_owned).collect());
        let mut extra_anchors = String::new();
        if let Some((first, rest)) = ids.split_first() {
            attrs.insert("id".to_owned(), first.clone());
            for id in rest {
                write!(extra_anchors, r#"<span id="{}"></span>"#, encode(id)).unwrap();
            }
        }

        let mut out = String::new();
        if self.empty {
            out.push_str(&extra_anchors);
        }
        out.push('<');
        out.push_str(self.tag);
        for (name, value) in &attrs {
            write!(out, r#" {name}="{}""#, encode(value)).unwrap();
        }
        out.push_str(if self.empty { " />" } else { ">" });
        out.push_str(self.suffix);
        if !self.empty {
            out.push_str(&extra_anchors);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_tag() {
        let node = Node::new("paragraph");
        assert_eq!(StartTag::new(&node, "p").build(), "<p>\n");
    }

    #[test]
    fn test_node_classes_precede_explicit_classes() {
        let node = Node::new("table").class("custom");
        let tag = StartTag::new(&node, "table")
            .class("table docutils")
            .suffix("")
            .build();
        assert_eq!(tag, r#"<table class="custom table docutils">"#);
    }

    #[test]
    fn test_duplicate_classes_removed() {
        let node = Node::new("div").class("alert");
        let tag = StartTag::new(&node, "div").class("alert alert-note").suffix("").build();
        assert_eq!(tag, r#"<div class="alert alert-note">"#);
    }

    #[test]
    fn test_language_class_becomes_lang() {
        let node = Node::new("literal_block").class("language-fr").class("code");
        let tag = StartTag::new(&node, "pre").suffix("").build();
        assert_eq!(tag, r#"<pre class="code" lang="fr">"#);
    }

    #[test]
    fn test_extra_ids_become_spans_after_tag() {
        let node = Node::new("section").id("a").id("b").id("c");
        let tag = StartTag::new(&node, "section").build();
        assert_eq!(
            tag,
            "<section id=\"a\">\n<span id=\"b\"></span><span id=\"c\"></span>"
        );
    }

    #[test]
    fn test_extra_ids_precede_empty_tag() {
        let node = Node::new("image").id("a").id("b");
        let tag = StartTag::new(&node, "img")
            .attr("src", "x.png")
            .empty()
            .suffix("")
            .build();
        assert_eq!(tag, r#"<span id="b"></span><img id="a" src="x.png" />"#);
    }

    #[test]
    fn test_attributes_sorted_and_encoded() {
        let node = Node::new("reference");
        let tag = StartTag::new(&node, "a")
            .attr("href", "?a=1&b=2")
            .attr("CLASS_HINT", "x")
            .suffix("")
            .build();
        assert_eq!(tag, r#"<a class_hint="x" href="?a=1&amp;b=2">"#);
    }

    #[test]
    fn test_with_ids_overrides_node_ids() {
        let node = Node::new("table").id("t1").id("t2");
        let tag = StartTag::new(&node, "table")
            .with_ids(vec!["t1".to_owned()])
            .suffix("")
            .build();
        assert_eq!(tag, r#"<table id="t1">"#);
    }
}
