//! Bootstrap overrides.
//!
//! Replaces a handful of the plain HTML5 handlers so pages pick up the
//! Bootstrap theme: alert boxes for admonitions, `alert-title` paragraphs,
//! styled tables, and flat `<section>` elements.

use std::fmt::Write;

use crate::admonition::{self, AdmonitionKind};
use crate::error::RenderError;
use crate::handler::{HandlerTable, NodeHandler, Visit};
use crate::html;
use crate::node::Node;
use crate::renderer::HtmlWriter;
use crate::tag::StartTag;

/// Install the overrides over an existing table.
pub(crate) fn install(table: &mut HandlerTable) {
    table.set("document", NodeHandler::custom(visit_document, depart_document));
    table.set("section", NodeHandler::custom(visit_section, depart_section));
    table.set("title", NodeHandler::custom(visit_title, depart_title));
    table.set("table", NodeHandler::custom(visit_table, html::depart_table));

    let alert = NodeHandler::custom(visit_admonition, html::depart_admonition);
    table.set(admonition::GENERIC, alert);
    for kind in AdmonitionKind::ALL {
        table.set(kind.name(), alert);
    }
}

fn visit_document(w: &mut HtmlWriter<'_>, _node: &Node) -> Result<Visit, RenderError> {
    w.state.first_title = true;
    Ok(Visit::Continue)
}

fn depart_document(_w: &mut HtmlWriter<'_>, _node: &Node) -> Result<(), RenderError> {
    Ok(())
}

/// Sections come out as a flat run of `<section>` elements: entering a
/// section closes the one before it, and only leaving the outermost section
/// closes the last one. The depth counter decides which closing tag is due.
fn visit_section(w: &mut HtmlWriter<'_>, node: &Node) -> Result<Visit, RenderError> {
    if w.state.section_level > 0 {
        w.push("</section>");
    }
    w.state.section_level += 1;
    w.push(StartTag::new(node, "section").build());
    Ok(Visit::Continue)
}

fn depart_section(w: &mut HtmlWriter<'_>, _node: &Node) -> Result<(), RenderError> {
    w.state.section_level = w.state.section_level.saturating_sub(1);
    if w.state.section_level == 0 {
        w.push("</section>");
    }
    Ok(())
}

/// Alert box: `alert` plus the variant's class from the mapping table.
///
/// The label title is inserted by the normalization pre-pass, so this only
/// opens the box.
fn visit_admonition(w: &mut HtmlWriter<'_>, node: &Node) -> Result<Visit, RenderError> {
    let mut start = StartTag::new(node, "div").class("alert");
    if let Some(kind) = admonition::variant(node)? {
        start = start.class(kind.alert_class());
    }
    w.push(start.build());
    Ok(Visit::Continue)
}

fn visit_title(w: &mut HtmlWriter<'_>, node: &Node) -> Result<Visit, RenderError> {
    if w.parent().is_some_and(admonition::is_admonition) {
        w.push(StartTag::new(node, "p").class("alert-title").suffix("").build());
        Ok(Visit::Continue)
    } else {
        html::visit_title(w, node)
    }
}

fn depart_title(w: &mut HtmlWriter<'_>, node: &Node) -> Result<(), RenderError> {
    if w.parent().is_some_and(admonition::is_admonition) {
        w.push("</p>\n");
        Ok(())
    } else {
        html::depart_title(w, node)
    }
}

/// Tables get `table docutils`, the configured style classes and the
/// alignment class. Ids past the first become anchors placed before the
/// table so they stay valid DOM.
fn visit_table(w: &mut HtmlWriter<'_>, node: &Node) -> Result<Visit, RenderError> {
    let ids = node.ids();
    let mut anchors = String::new();
    for id in ids.iter().skip(1) {
        write!(anchors, r#"<span id="{}"></span>"#, crate::encode(id)).unwrap();
    }
    if !anchors.is_empty() {
        w.push(anchors);
    }

    w.state.table_row_index = 0;

    let mut classes = vec!["table", "docutils"];
    classes.extend(w.settings().table_classes());
    let align = node.get_str("align").map(|align| format!("align-{align}"));
    if let Some(align) = &align {
        classes.push(align);
    }

    let tag = StartTag::new(node, "table")
        .with_ids(ids.first().map(|id| (*id).to_owned()).into_iter().collect())
        .class(&classes.join(" "))
        .build();
    w.push(tag);
    Ok(Visit::Continue)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{DocumentRenderer, RenderResult};

    fn render(doc: &Node) -> RenderResult {
        DocumentRenderer::new().render(doc).unwrap()
    }

    fn section(title: &str) -> Node {
        Node::new("section").child(Node::with_text("title", title))
    }

    #[test]
    fn test_document_has_no_wrapper() {
        let result = render(&Node::new("document"));
        assert_eq!(result.html, "");
    }

    #[test]
    fn test_single_section() {
        let doc = Node::new("document").child(section("Only"));
        let result = render(&doc);
        assert_eq!(result.html, "<section>\n<h1>Only</h1>\n</section>");
    }

    #[test]
    fn test_nested_sections_flattened() {
        let doc = Node::new("document")
            .child(section("A").child(section("B").child(section("C"))));
        let html = render(&doc).html;

        assert_eq!(html.matches("<section>").count(), 3);
        assert_eq!(html.matches("</section>").count(), 3);
        assert_eq!(
            html,
            concat!(
                "<section>\n<h1>A</h1>\n",
                "</section><section>\n<h2>B</h2>\n",
                "</section><section>\n<h3>C</h3>\n",
                "</section>",
            )
        );
    }

    #[test]
    fn test_sibling_sections_flattened() {
        let doc = Node::new("document").child(section("A")).child(section("B"));
        let html = render(&doc).html;
        assert_eq!(
            html,
            "<section>\n<h1>A</h1>\n</section><section>\n<h1>B</h1>\n</section>"
        );
    }

    #[test]
    fn test_section_ids_and_classes_kept() {
        let doc = Node::new("document").child(
            Node::new("section")
                .id("intro")
                .class("lead")
                .child(Node::with_text("title", "Intro")),
        );
        let html = render(&doc).html;
        assert!(html.starts_with("<section class=\"lead\" id=\"intro\">\n"));
    }

    #[test]
    fn test_warning_alert() {
        let doc = Node::new("document")
            .child(Node::new("warning").child(Node::with_text("paragraph", "Careful")));
        let html = render(&doc).html;
        assert_eq!(
            html,
            concat!(
                "<div class=\"alert alert-warning\">\n",
                "<p class=\"alert-title\">Warning</p>\n",
                "<p>Careful</p>\n",
                "</div>\n",
            )
        );
    }

    #[test]
    fn test_every_variant_maps_to_alert_class() {
        for kind in AdmonitionKind::ALL {
            let doc = Node::new("document").child(Node::new(kind.name()));
            let html = render(&doc).html;
            let expected = format!(
                "<div class=\"alert {}\">\n<p class=\"alert-title\">{}</p>\n</div>\n",
                kind.alert_class(),
                kind.label()
            );
            assert_eq!(html, expected, "{kind}");
        }
    }

    #[test]
    fn test_generic_admonition_without_name() {
        let doc = Node::new("document").child(
            Node::new("admonition")
                .child(Node::with_text("title", "Custom"))
                .child(Node::with_text("paragraph", "Body")),
        );
        let html = render(&doc).html;
        assert_eq!(
            html,
            "<div class=\"alert\">\n<p class=\"alert-title\">Custom</p>\n<p>Body</p>\n</div>\n"
        );
    }

    #[test]
    fn test_generic_admonition_ignores_name_attribute() {
        let doc = Node::new("document").child(
            Node::new("admonition")
                .attr("name", "tip")
                .child(Node::with_text("title", "Custom")),
        );
        assert_eq!(
            render(&doc).html,
            "<div class=\"alert\">\n<p class=\"alert-title\">Custom</p>\n</div>\n"
        );
    }

    #[test]
    fn test_alert_bound_to_unmapped_kind_is_an_error() {
        let mut renderer = DocumentRenderer::new();
        renderer.handlers_mut().set(
            "sidebar",
            NodeHandler::custom(visit_admonition, html::depart_admonition),
        );
        let doc = Node::new("document")
            .child(section("Before"))
            .child(Node::new("sidebar").child(Node::with_text("paragraph", "x")));

        let err = renderer.render(&doc).unwrap_err();

        assert!(matches!(err, RenderError::UnknownAdmonition(ref name) if name == "sidebar"));
    }

    #[test]
    fn test_title_in_section_delegates_to_heading() {
        let doc = Node::new("document").child(section("A").child(section("B")));
        let html = render(&doc).html;
        assert!(html.contains("<h1>A</h1>"));
        assert!(html.contains("<h2>B</h2>"));
        assert!(!html.contains("alert-title"));
    }

    #[test]
    fn test_page_title_is_first_section_title() {
        let doc = Node::new("document").child(section("First")).child(section("Second"));
        assert_eq!(render(&doc).title.as_deref(), Some("First"));
    }

    #[test]
    fn test_table_classes_and_alignment() {
        let doc = Node::new("document").child(Node::new("table").attr("align", "center"));
        let result = DocumentRenderer::new()
            .with_table_style("responsive, compact")
            .render(&doc)
            .unwrap();
        assert_eq!(
            result.html,
            "<table class=\"table docutils responsive compact align-center\">\n</table>\n"
        );
    }

    #[test]
    fn test_table_without_style() {
        let doc = Node::new("document").child(Node::new("table"));
        assert_eq!(
            render(&doc).html,
            "<table class=\"table docutils\">\n</table>\n"
        );
    }

    #[test]
    fn test_table_extra_ids_become_anchors_before_table() {
        let doc = Node::new("document")
            .child(Node::new("table").id("t1").id("t2").id("t3"));
        assert_eq!(
            render(&doc).html,
            concat!(
                "<span id=\"t2\"></span><span id=\"t3\"></span>",
                "<table class=\"table docutils\" id=\"t1\">\n",
                "</table>\n",
            )
        );
    }

    #[test]
    fn test_table_rows_restart_striping() {
        let table = || Node::new("table").child(Node::new("tbody").child(Node::new("row")));
        let doc = Node::new("document").child(table()).child(table());
        let html = render(&doc).html;
        assert_eq!(html.matches("row-odd").count(), 2);
    }

    #[test]
    fn test_table_caption_still_rendered() {
        let doc = Node::new("document")
            .child(Node::new("table").child(Node::with_text("title", "Totals")));
        assert!(render(&doc).html.contains("<caption>Totals</caption>"));
    }
}
