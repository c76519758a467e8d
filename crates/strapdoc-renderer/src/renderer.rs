//! Document traversal and render entry point.

use crate::admonition::normalize_admonitions;
use crate::error::RenderError;
use crate::handler::{HandlerTable, Visit};
use crate::node::Node;
use crate::state::{RenderState, encode};

/// Meta tags emitted for every page.
const META_TAGS: [&str; 2] = [
    r#"<meta http-equiv="X-UA-Compatible" content="IE=edge">"#,
    r#"<meta name="viewport" content="width=device-width, initial-scale=1">"#,
];

/// Settings that influence rendering.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderSettings {
    /// Comma-separated extra classes for every `<table>`.
    pub table_style: String,
    /// Heading level used for top-level section titles (1-6).
    pub initial_header_level: u8,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            table_style: String::new(),
            initial_header_level: 1,
        }
    }
}

impl RenderSettings {
    /// Extra table classes, trimmed, blanks dropped, in configured order.
    pub fn table_classes(&self) -> impl Iterator<Item = &str> {
        self.table_style
            .split(',')
            .map(|class| class.trim_matches([' ', '\t', '\n']))
            .filter(|class| !class.is_empty())
    }
}

/// Result of rendering a document.
#[derive(Clone, Debug)]
pub struct RenderResult {
    /// Rendered HTML body.
    pub html: String,
    /// Text of the first section title, if the handlers captured one.
    pub title: Option<String>,
    /// Meta tags for the page head.
    pub meta: Vec<String>,
    /// Warnings generated during rendering (e.g., unknown node kinds).
    pub warnings: Vec<String>,
}

/// Mutable state of one render, handed to every handler.
///
/// Owns the output buffer and the [`RenderState`]; also tracks the chain of
/// ancestors of the node being handled so handlers can look upwards.
pub struct HtmlWriter<'a> {
    settings: &'a RenderSettings,
    body: Vec<String>,
    meta: Vec<String>,
    pub(crate) state: RenderState,
    ancestors: Vec<&'a Node>,
    warnings: Vec<String>,
}

impl<'a> HtmlWriter<'a> {
    fn new(settings: &'a RenderSettings) -> Self {
        Self {
            settings,
            body: Vec::new(),
            meta: META_TAGS.iter().map(|tag| (*tag).to_owned()).collect(),
            state: RenderState::default(),
            ancestors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Append a fragment to the output buffer.
    pub fn push(&mut self, fragment: impl Into<String>) {
        self.body.push(fragment.into());
    }

    /// Append text, encoded for HTML.
    pub fn push_text(&mut self, text: &str) {
        self.body.push(encode(text));
    }

    /// Fragments written so far.
    #[must_use]
    pub fn body(&self) -> &[String] {
        &self.body
    }

    /// Render settings.
    #[must_use]
    pub fn settings(&self) -> &RenderSettings {
        self.settings
    }

    /// Render state.
    #[must_use]
    pub fn state(&self) -> &RenderState {
        &self.state
    }

    /// Mutable render state.
    pub fn state_mut(&mut self) -> &mut RenderState {
        &mut self.state
    }

    /// Parent of the node being handled.
    #[must_use]
    pub fn parent(&self) -> Option<&'a Node> {
        self.ancestor(0)
    }

    /// Ancestor `n` levels above the parent (`0` is the parent itself).
    #[must_use]
    pub fn ancestor(&self, n: usize) -> Option<&'a Node> {
        self.ancestors.iter().rev().nth(n).copied()
    }

    /// Record a warning for the caller.
    pub fn warn(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    fn unknown_node(&mut self, node: &Node) {
        tracing::warn!(kind = %node.kind, "Unknown node");
        self.body.push(format!("[UNKNOWN NODE {}]", encode(&node.kind)));
        self.warn(format!("unknown node {}", node.kind));
    }

    fn finish(self) -> RenderResult {
        RenderResult {
            html: self.body.concat(),
            title: self.state.title,
            meta: self.meta,
            warnings: self.warnings,
        }
    }
}

/// Renders document trees to HTML with a [`HandlerTable`].
///
/// The renderer itself is immutable; each call to [`render`](Self::render)
/// gets a fresh [`HtmlWriter`], so one renderer can serve many documents.
///
/// # Example
///
/// ```
/// use strapdoc_renderer::{DocumentRenderer, Node};
///
/// let doc = Node::new("document").child(
///     Node::new("section")
///         .child(Node::with_text("title", "Hello"))
///         .child(Node::new("note").child(Node::with_text("paragraph", "Hi"))),
/// );
/// let result = DocumentRenderer::new().render(&doc).unwrap();
/// assert_eq!(result.title.as_deref(), Some("Hello"));
/// assert!(result.html.contains(r#"<div class="alert alert-note">"#));
/// ```
#[derive(Clone, Debug)]
pub struct DocumentRenderer {
    handlers: HandlerTable,
    settings: RenderSettings,
}

impl DocumentRenderer {
    /// Bootstrap renderer with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::with_handlers(HandlerTable::bootstrap())
    }

    /// Plain HTML5 renderer with default settings.
    #[must_use]
    pub fn html5() -> Self {
        Self::with_handlers(HandlerTable::html5())
    }

    /// Renderer using a custom handler table.
    #[must_use]
    pub fn with_handlers(handlers: HandlerTable) -> Self {
        Self {
            handlers,
            settings: RenderSettings::default(),
        }
    }

    /// Replace all render settings.
    #[must_use]
    pub fn with_settings(mut self, settings: RenderSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Set the comma-separated extra table classes.
    #[must_use]
    pub fn with_table_style(mut self, style: impl Into<String>) -> Self {
        self.settings.table_style = style.into();
        self
    }

    /// Set the heading level of top-level section titles.
    #[must_use]
    pub fn with_initial_header_level(mut self, level: u8) -> Self {
        self.settings.initial_header_level = level;
        self
    }

    /// Handler table, for registering extra kinds.
    pub fn handlers_mut(&mut self) -> &mut HandlerTable {
        &mut self.handlers
    }

    /// Render settings in use.
    #[must_use]
    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    /// Render a document tree.
    ///
    /// The tree is copied and normalized (admonition titles inserted) before
    /// traversal; the caller's tree is left untouched.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by a handler, such as
    /// [`RenderError::UnknownAdmonition`] when an admonition handler is bound
    /// to a kind missing from the mapping table. Nothing is rendered then.
    pub fn render(&self, document: &Node) -> Result<RenderResult, RenderError> {
        let mut document = document.clone();
        normalize_admonitions(&mut document);

        let mut writer = HtmlWriter::new(&self.settings);
        self.walk(&mut writer, &document)?;

        let result = writer.finish();
        tracing::debug!(
            bytes = result.html.len(),
            warnings = result.warnings.len(),
            "Rendered document"
        );
        Ok(result)
    }

    fn walk<'a>(&self, writer: &mut HtmlWriter<'a>, node: &'a Node) -> Result<(), RenderError> {
        let Some(handler) = self.handlers.get(&node.kind).copied() else {
            writer.unknown_node(node);
            return Ok(());
        };

        match handler.enter(writer, node)? {
            Visit::SkipNode => return Ok(()),
            Visit::SkipChildren => {}
            Visit::Continue => {
                writer.ancestors.push(node);
                for child in &node.children {
                    self.walk(writer, child)?;
                }
                writer.ancestors.pop();
            }
        }

        handler.exit(writer, node)
    }
}

impl Default for DocumentRenderer {
    fn default() -> Self {
        Self::new()
    }
}
