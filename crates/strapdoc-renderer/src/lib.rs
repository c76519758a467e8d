//! Bootstrap-flavoured HTML5 renderer for docutils-style document trees.
//!
//! This crate provides a [`DocumentRenderer`] that walks a [`Node`] tree and
//! produces HTML using a [`HandlerTable`] keyed by node kind.
//!
//! # Architecture
//!
//! - [`HandlerTable::html5`]: plain rendering of the standard node kinds
//! - [`HandlerTable::bootstrap`]: the same table with Bootstrap overrides for
//!   documents, sections, titles, tables and admonitions
//!
//! Before traversal the tree is normalized: every admonition with a
//! variant gets a title child holding the variant's label. Node kinds missing
//! from the table render as a visible `[UNKNOWN NODE kind]` placeholder and
//! their subtree is skipped.
//!
//! # Example
//!
//! ```
//! use strapdoc_renderer::{DocumentRenderer, Node};
//!
//! let doc = Node::new("document").child(
//!     Node::new("table").attr("align", "center"),
//! );
//! let result = DocumentRenderer::new()
//!     .with_table_style("responsive, compact")
//!     .render(&doc)
//!     .unwrap();
//! assert!(result.html.starts_with(
//!     r#"<table class="table docutils responsive compact align-center">"#
//! ));
//! ```

mod admonition;
mod bootstrap;
mod error;
mod handler;
mod html;
mod node;
mod renderer;
mod state;
mod tag;

pub use admonition::{AdmonitionKind, is_admonition, normalize_admonitions};
pub use error::RenderError;
pub use handler::{Element, EnterFn, ExitFn, HandlerTable, NodeHandler, Visit};
pub use node::{AttrValue, Node, TEXT};
pub use renderer::{DocumentRenderer, HtmlWriter, RenderResult, RenderSettings};
pub use state::{RenderState, encode};
pub use tag::StartTag;
