//! Node handler table.
//!
//! Rendering is driven by a map from node kind to [`NodeHandler`]. A preset
//! table ([`HandlerTable::html5`]) supplies the default rendering of every
//! known kind; a flavour such as [`HandlerTable::bootstrap`] starts from it
//! and replaces individual entries. Kinds missing from the table fall back to
//! the unknown-node placeholder.

use std::collections::HashMap;

use crate::error::RenderError;
use crate::node::Node;
use crate::renderer::HtmlWriter;
use crate::tag::StartTag;

/// What the traversal does after an enter handler returns.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Visit {
    /// Walk the children, then run the exit handler.
    Continue,
    /// Skip the children but still run the exit handler.
    SkipChildren,
    /// Skip the children and the exit handler.
    SkipNode,
}

/// Enter hook: called before a node's children are walked.
pub type EnterFn = fn(&mut HtmlWriter<'_>, &Node) -> Result<Visit, RenderError>;

/// Exit hook: called after a node's children are walked.
pub type ExitFn = fn(&mut HtmlWriter<'_>, &Node) -> Result<(), RenderError>;

/// Fixed element wrapped around a node's children.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Element {
    /// Tag name.
    pub tag: &'static str,
    /// Class added to the node's own classes.
    pub class: Option<&'static str>,
    /// Text after the opening tag.
    pub open_suffix: &'static str,
    /// Text after the closing tag.
    pub close_suffix: &'static str,
}

impl Element {
    /// Inline element: no line breaks around it.
    #[must_use]
    pub const fn inline(tag: &'static str) -> Self {
        Self {
            tag,
            class: None,
            open_suffix: "",
            close_suffix: "",
        }
    }

    /// Block element: line break after the closing tag.
    #[must_use]
    pub const fn block(tag: &'static str) -> Self {
        Self {
            tag,
            class: None,
            open_suffix: "",
            close_suffix: "\n",
        }
    }

    /// Container element: line breaks after both tags.
    #[must_use]
    pub const fn container(tag: &'static str) -> Self {
        Self {
            tag,
            class: None,
            open_suffix: "\n",
            close_suffix: "\n",
        }
    }

    /// Add a class.
    #[must_use]
    pub const fn with_class(mut self, class: &'static str) -> Self {
        self.class = Some(class);
        self
    }

    fn open(&self, node: &Node) -> String {
        let tag = StartTag::new(node, self.tag).suffix(self.open_suffix);
        match self.class {
            Some(class) => tag.class(class).build(),
            None => tag.build(),
        }
    }

    fn close(&self) -> String {
        format!("</{}>{}", self.tag, self.close_suffix)
    }
}

/// How one node kind is rendered.
#[derive(Clone, Copy, Debug)]
pub enum NodeHandler {
    /// Render the children only.
    Transparent,
    /// Render nothing, children included.
    Skip,
    /// Wrap the children in a fixed element.
    Element(Element),
    /// Hand-written enter/exit pair.
    Custom {
        /// Enter hook.
        enter: EnterFn,
        /// Exit hook.
        exit: ExitFn,
    },
}

impl NodeHandler {
    /// Shorthand for [`NodeHandler::Custom`].
    #[must_use]
    pub const fn custom(enter: EnterFn, exit: ExitFn) -> Self {
        Self::Custom { enter, exit }
    }

    /// Run the enter side of this handler.
    pub fn enter(&self, writer: &mut HtmlWriter<'_>, node: &Node) -> Result<Visit, RenderError> {
        match self {
            Self::Transparent => Ok(Visit::Continue),
            Self::Skip => Ok(Visit::SkipNode),
            Self::Element(element) => {
                writer.push(element.open(node));
                Ok(Visit::Continue)
            }
            Self::Custom { enter, .. } => enter(writer, node),
        }
    }

    /// Run the exit side of this handler.
    pub fn exit(&self, writer: &mut HtmlWriter<'_>, node: &Node) -> Result<(), RenderError> {
        match self {
            Self::Transparent | Self::Skip => Ok(()),
            Self::Element(element) => {
                writer.push(element.close());
                Ok(())
            }
            Self::Custom { exit, .. } => exit(writer, node),
        }
    }
}

/// Map from node kind to handler.
#[derive(Clone, Debug, Default)]
pub struct HandlerTable {
    handlers: HashMap<String, NodeHandler>,
}

impl HandlerTable {
    /// Empty table: every node is unknown.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Plain HTML5 rendering of the standard node kinds.
    #[must_use]
    pub fn html5() -> Self {
        let mut table = Self::new();
        crate::html::install(&mut table);
        table
    }

    /// HTML5 rendering with the Bootstrap overrides installed.
    #[must_use]
    pub fn bootstrap() -> Self {
        let mut table = Self::html5();
        crate::bootstrap::install(&mut table);
        table
    }

    /// Register or replace the handler for a kind.
    pub fn set(&mut self, kind: impl Into<String>, handler: NodeHandler) {
        self.handlers.insert(kind.into(), handler);
    }

    /// Remove the handler for a kind, making it unknown.
    pub fn remove(&mut self, kind: &str) -> Option<NodeHandler> {
        self.handlers.remove(kind)
    }

    /// Handler registered for a kind.
    #[must_use]
    pub fn get(&self, kind: &str) -> Option<&NodeHandler> {
        self.handlers.get(kind)
    }

    /// Whether a handler is registered for a kind.
    #[must_use]
    pub fn contains(&self, kind: &str) -> bool {
        self.handlers.contains_key(kind)
    }

    /// Number of registered kinds.
    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Whether no kind is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_open_close() {
        let element = Element::block("p").with_class("lead");
        let node = Node::new("paragraph").id("p1");
        assert_eq!(element.open(&node), r#"<p class="lead" id="p1">"#);
        assert_eq!(element.close(), "</p>\n");
    }

    #[test]
    fn test_container_element_suffixes() {
        let element = Element::container("ul");
        let node = Node::new("bullet_list");
        assert_eq!(element.open(&node), "<ul>\n");
        assert_eq!(element.close(), "</ul>\n");
    }

    #[test]
    fn test_set_replaces_handler() {
        let mut table = HandlerTable::new();
        table.set("paragraph", NodeHandler::Element(Element::block("p")));
        table.set("paragraph", NodeHandler::Skip);
        assert!(matches!(table.get("paragraph"), Some(NodeHandler::Skip)));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_remove_makes_kind_unknown() {
        let mut table = HandlerTable::html5();
        assert!(table.contains("paragraph"));
        table.remove("paragraph");
        assert!(!table.contains("paragraph"));
    }

    #[test]
    fn test_bootstrap_extends_html5() {
        let html5 = HandlerTable::html5();
        let bootstrap = HandlerTable::bootstrap();
        assert_eq!(html5.len(), bootstrap.len());
        assert!(bootstrap.contains("exercise"));
        assert!(HandlerTable::new().is_empty());
    }
}
