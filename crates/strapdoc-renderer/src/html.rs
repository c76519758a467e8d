//! Plain HTML5 handlers.
//!
//! Default rendering of the standard document node kinds. Flavours install
//! their own handlers over these and call back into them where they only
//! change part of the behavior.

use crate::admonition::{self, AdmonitionKind};
use crate::error::RenderError;
use crate::handler::{Element, HandlerTable, NodeHandler, Visit};
use crate::node::{Node, TEXT};
use crate::renderer::HtmlWriter;
use crate::tag::StartTag;

/// Kinds whose children are inline content; raw HTML inside them is wrapped
/// in a `<span>` rather than a `<div>`.
const TEXT_ELEMENTS: &[&str] = &[
    "paragraph",
    "title",
    "subtitle",
    "rubric",
    "caption",
    "term",
    "line",
    "emphasis",
    "strong",
    "inline",
    "literal",
    "reference",
];

/// Register the plain HTML5 handlers.
pub(crate) fn install(table: &mut HandlerTable) {
    use NodeHandler::{Element as El, Skip, Transparent};

    table.set("document", NodeHandler::custom(visit_document, depart_document));
    table.set("section", NodeHandler::custom(visit_section, depart_section));
    table.set("title", NodeHandler::custom(visit_title, depart_title));
    table.set("subtitle", El(Element::block("p").with_class("subtitle")));
    table.set("paragraph", El(Element::block("p")));
    table.set(TEXT, NodeHandler::custom(visit_text, depart_nothing));

    // Inline markup
    table.set("emphasis", El(Element::inline("em")));
    table.set("strong", El(Element::inline("strong")));
    table.set(
        "literal",
        El(Element::inline("code").with_class("docutils literal notranslate")),
    );
    table.set("inline", El(Element::inline("span")));
    table.set("subscript", El(Element::inline("sub")));
    table.set("superscript", El(Element::inline("sup")));
    table.set("title_reference", El(Element::inline("cite")));
    table.set("abbreviation", El(Element::inline("abbr")));
    table.set("reference", NodeHandler::custom(visit_reference, depart_reference));
    table.set("image", NodeHandler::custom(visit_image, depart_nothing));
    table.set("raw", NodeHandler::custom(visit_raw, depart_nothing));

    // Blocks
    table.set("literal_block", El(Element::block("pre").with_class("literal-block")));
    table.set("block_quote", El(Element::container("blockquote")));
    table.set("container", El(Element::container("div")));
    table.set("compound", El(Element::container("div").with_class("compound")));
    table.set("figure", El(Element::container("div").with_class("figure")));
    table.set("caption", El(Element::block("p").with_class("caption")));
    table.set("legend", El(Element::container("div").with_class("legend")));
    table.set("rubric", El(Element::block("p").with_class("rubric")));
    table.set("transition", NodeHandler::custom(visit_transition, depart_nothing));
    table.set("line_block", El(Element::container("div").with_class("line-block")));
    table.set("line", NodeHandler::custom(visit_line, depart_line));

    // Lists
    table.set("bullet_list", El(Element::container("ul")));
    table.set(
        "enumerated_list",
        NodeHandler::custom(visit_enumerated_list, depart_enumerated_list),
    );
    table.set("list_item", El(Element::block("li")));
    table.set("definition_list", El(Element::container("dl")));
    table.set("definition_list_item", Transparent);
    table.set("term", El(Element::block("dt")));
    table.set("definition", El(Element::block("dd")));

    // Admonitions
    table.set(
        admonition::GENERIC,
        NodeHandler::custom(visit_admonition, depart_admonition),
    );
    for kind in AdmonitionKind::ALL {
        table.set(
            kind.name(),
            NodeHandler::custom(visit_admonition, depart_admonition),
        );
    }

    // Tables
    table.set("table", NodeHandler::custom(visit_table, depart_table));
    table.set("tgroup", Transparent);
    table.set("colspec", Skip);
    table.set("thead", El(Element::container("thead")));
    table.set("tbody", El(Element::container("tbody")));
    table.set("row", NodeHandler::custom(visit_row, depart_row));
    table.set("entry", NodeHandler::custom(visit_entry, depart_entry));

    // Signatures
    table.set(
        "desc_parameterlist",
        NodeHandler::custom(visit_desc_parameterlist, depart_desc_parameterlist),
    );
    table.set(
        "desc_parameter",
        NodeHandler::custom(visit_desc_parameter, depart_desc_parameter),
    );
    table.set(
        "desc_optional",
        NodeHandler::custom(visit_desc_optional, depart_desc_optional),
    );

    // Invisible
    table.set("target", Transparent);
    table.set("comment", Skip);
    table.set("substitution_definition", Skip);
    table.set("pending", Skip);
}

fn depart_nothing(_w: &mut HtmlWriter<'_>, _node: &Node) -> Result<(), RenderError> {
    Ok(())
}

/// Pop the closing fragment pushed by the enter handler.
fn depart_context(w: &mut HtmlWriter<'_>, _node: &Node) -> Result<(), RenderError> {
    let closing = w.state.pop_context();
    w.push(closing);
    Ok(())
}

fn visit_document(w: &mut HtmlWriter<'_>, node: &Node) -> Result<Visit, RenderError> {
    w.state.first_title = true;
    w.push(StartTag::new(node, "div").class("document").build());
    Ok(Visit::Continue)
}

fn depart_document(w: &mut HtmlWriter<'_>, _node: &Node) -> Result<(), RenderError> {
    w.push("</div>\n");
    Ok(())
}

fn visit_section(w: &mut HtmlWriter<'_>, node: &Node) -> Result<Visit, RenderError> {
    w.state.section_level += 1;
    w.push(StartTag::new(node, "section").build());
    Ok(Visit::Continue)
}

fn depart_section(w: &mut HtmlWriter<'_>, _node: &Node) -> Result<(), RenderError> {
    w.state.section_level = w.state.section_level.saturating_sub(1);
    w.push("</section>\n");
    Ok(())
}

/// Heading level for a title at the current section depth.
fn heading_level(w: &HtmlWriter<'_>) -> usize {
    let initial = usize::from(w.settings().initial_header_level);
    (w.state.section_level + initial)
        .saturating_sub(1)
        .clamp(1, 6)
}

/// Titles render by where they sit: section headings, the document title,
/// table captions, admonition titles, and a generic `<p class="title">`.
pub(crate) fn visit_title(w: &mut HtmlWriter<'_>, node: &Node) -> Result<Visit, RenderError> {
    let parent = w.parent();
    let (tag, class) = match parent {
        Some(p) if p.is("section") => {
            w.state.capture_title(node.astext());
            (format!("h{}", heading_level(w)), None)
        }
        Some(p) if p.is("document") => ("h1".to_owned(), Some("title")),
        Some(p) if p.is("table") => ("caption".to_owned(), None),
        Some(p) if admonition::is_admonition(p) => ("p".to_owned(), Some("admonition-title")),
        _ => ("p".to_owned(), Some("title")),
    };

    let start = StartTag::new(node, &tag).suffix("");
    let start = match class {
        Some(class) => start.class(class),
        None => start,
    };
    w.push(start.build());
    w.state.push_context(format!("</{tag}>\n"));
    Ok(Visit::Continue)
}

pub(crate) fn depart_title(w: &mut HtmlWriter<'_>, node: &Node) -> Result<(), RenderError> {
    depart_context(w, node)
}

fn visit_text(w: &mut HtmlWriter<'_>, node: &Node) -> Result<Visit, RenderError> {
    if let Some(text) = &node.text {
        w.push_text(text);
    }
    Ok(Visit::SkipNode)
}

fn visit_reference(w: &mut HtmlWriter<'_>, node: &Node) -> Result<Visit, RenderError> {
    let start = StartTag::new(node, "a").suffix("");
    let start = if let Some(uri) = node.get_str("refuri") {
        let class = if node.get_bool("internal") {
            "reference internal"
        } else {
            "reference external"
        };
        start.class(class).attr("href", uri)
    } else if let Some(id) = node.get_str("refid") {
        start.class("reference internal").attr("href", format!("#{id}"))
    } else {
        start.class("reference")
    };
    w.push(start.build());
    Ok(Visit::Continue)
}

fn depart_reference(w: &mut HtmlWriter<'_>, _node: &Node) -> Result<(), RenderError> {
    w.push("</a>");
    Ok(())
}

fn visit_image(w: &mut HtmlWriter<'_>, node: &Node) -> Result<Visit, RenderError> {
    let uri = node.get_str("uri").unwrap_or_default();
    let alt = node.get_str("alt").unwrap_or(uri);
    let mut start = StartTag::new(node, "img")
        .attr("src", uri)
        .attr("alt", alt)
        .suffix("")
        .empty();
    for dimension in ["width", "height"] {
        if let Some(value) = node.attributes.get(dimension) {
            start = start.attr(dimension, value.to_attr_string());
        }
    }
    if let Some(align) = node.get_str("align") {
        start = start.class(&format!("align-{align}"));
    }
    w.push(start.build());
    Ok(Visit::SkipNode)
}

/// Raw content passes through verbatim when its format includes `html`;
/// anything else is dropped.
fn visit_raw(w: &mut HtmlWriter<'_>, node: &Node) -> Result<Visit, RenderError> {
    let is_html = node
        .get_str("format")
        .is_some_and(|format| format.split_whitespace().any(|f| f == "html"));
    if !is_html {
        return Ok(Visit::SkipNode);
    }

    let wrapper = if node.classes().is_empty() {
        None
    } else if w.parent().is_some_and(|p| TEXT_ELEMENTS.contains(&p.kind.as_str())) {
        Some("span")
    } else {
        Some("div")
    };

    if let Some(tag) = wrapper {
        w.push(StartTag::new(node, tag).suffix("").build());
    }
    w.push(node.astext());
    if let Some(tag) = wrapper {
        w.push(format!("</{tag}>"));
    }
    Ok(Visit::SkipNode)
}

fn visit_transition(w: &mut HtmlWriter<'_>, node: &Node) -> Result<Visit, RenderError> {
    w.push(StartTag::new(node, "hr").class("docutils").empty().build());
    Ok(Visit::SkipNode)
}

fn visit_line(w: &mut HtmlWriter<'_>, node: &Node) -> Result<Visit, RenderError> {
    w.push(StartTag::new(node, "div").class("line").suffix("").build());
    if node.children.is_empty() {
        w.push("<br />");
    }
    Ok(Visit::Continue)
}

fn depart_line(w: &mut HtmlWriter<'_>, _node: &Node) -> Result<(), RenderError> {
    w.push("</div>\n");
    Ok(())
}

fn visit_enumerated_list(w: &mut HtmlWriter<'_>, node: &Node) -> Result<Visit, RenderError> {
    let mut start = StartTag::new(node, "ol").class(node.get_str("enumtype").unwrap_or("arabic"));
    if let Some(first) = node.get_int("start").filter(|n| *n != 1) {
        start = start.attr("start", first.to_string());
    }
    w.push(start.build());
    Ok(Visit::Continue)
}

fn depart_enumerated_list(w: &mut HtmlWriter<'_>, _node: &Node) -> Result<(), RenderError> {
    w.push("</ol>\n");
    Ok(())
}

/// Admonition classes: `admonition` plus the variant name.
fn visit_admonition(w: &mut HtmlWriter<'_>, node: &Node) -> Result<Visit, RenderError> {
    let mut start = StartTag::new(node, "div").class("admonition");
    if let Some(kind) = admonition::variant(node)? {
        start = start.class(kind.name());
    }
    w.push(start.build());
    Ok(Visit::Continue)
}

pub(crate) fn depart_admonition(w: &mut HtmlWriter<'_>, _node: &Node) -> Result<(), RenderError> {
    w.push("</div>\n");
    Ok(())
}

fn visit_table(w: &mut HtmlWriter<'_>, node: &Node) -> Result<Visit, RenderError> {
    w.state.table_row_index = 0;
    let mut start = StartTag::new(node, "table").class("docutils");
    if let Some(align) = node.get_str("align") {
        start = start.class(&format!("align-{align}"));
    }
    w.push(start.build());
    Ok(Visit::Continue)
}

pub(crate) fn depart_table(w: &mut HtmlWriter<'_>, _node: &Node) -> Result<(), RenderError> {
    w.push("</table>\n");
    Ok(())
}

/// Rows are striped `row-odd`/`row-even`, counting from the table start.
fn visit_row(w: &mut HtmlWriter<'_>, node: &Node) -> Result<Visit, RenderError> {
    w.state.table_row_index += 1;
    let class = if w.state.table_row_index % 2 == 0 {
        "row-even"
    } else {
        "row-odd"
    };
    w.push(StartTag::new(node, "tr").class(class).build());
    Ok(Visit::Continue)
}

fn depart_row(w: &mut HtmlWriter<'_>, _node: &Node) -> Result<(), RenderError> {
    w.push("</tr>\n");
    Ok(())
}

/// Header cells are entries inside `thead` or marked `stub`.
fn visit_entry(w: &mut HtmlWriter<'_>, node: &Node) -> Result<Visit, RenderError> {
    let in_head = w.ancestor(1).is_some_and(|n| n.is("thead"));
    let tag = if in_head || node.get_bool("stub") {
        "th"
    } else {
        "td"
    };

    let mut start = StartTag::new(node, tag).suffix("");
    if let Some(span) = cell_span(node, "morecols") {
        start = start.attr("colspan", span.to_string());
    }
    if let Some(span) = cell_span(node, "morerows") {
        start = start.attr("rowspan", span.to_string());
    }
    w.push(start.build());
    w.state.push_context(format!("</{tag}>\n"));
    Ok(Visit::Continue)
}

/// Cell span from a `more*` count; negative or oversized counts give none.
fn cell_span(node: &Node, name: &str) -> Option<u32> {
    node.get_int(name)
        .and_then(|more| u32::try_from(more).ok())
        .and_then(|more| more.checked_add(1))
}

fn depart_entry(w: &mut HtmlWriter<'_>, node: &Node) -> Result<(), RenderError> {
    depart_context(w, node)
}

fn visit_desc_parameterlist(w: &mut HtmlWriter<'_>, node: &Node) -> Result<Visit, RenderError> {
    w.push(r#"<span class="sig-paren">(</span>"#);
    let separator = node.get_str("child_text_separator").unwrap_or(", ");
    let state = w.state_mut();
    state.first_param = true;
    state.optional_param_level = 0;
    state.param_separator = separator.to_owned();
    Ok(Visit::Continue)
}

fn depart_desc_parameterlist(w: &mut HtmlWriter<'_>, _node: &Node) -> Result<(), RenderError> {
    w.push(r#"<span class="sig-paren">)</span>"#);
    Ok(())
}

/// Parameters after the first are preceded by the list's separator.
fn visit_desc_parameter(w: &mut HtmlWriter<'_>, node: &Node) -> Result<Visit, RenderError> {
    if w.state.first_param {
        w.state.first_param = false;
    } else {
        let separator = w.state.param_separator.clone();
        w.push_text(&separator);
    }
    if !node.get_bool("noemph") {
        w.push(r#"<em class="sig-param">"#);
    }
    Ok(Visit::Continue)
}

fn depart_desc_parameter(w: &mut HtmlWriter<'_>, node: &Node) -> Result<(), RenderError> {
    if !node.get_bool("noemph") {
        w.push("</em>");
    }
    Ok(())
}

fn visit_desc_optional(w: &mut HtmlWriter<'_>, _node: &Node) -> Result<Visit, RenderError> {
    w.state.optional_param_level += 1;
    w.push(r#"<span class="optional">[</span>"#);
    Ok(Visit::Continue)
}

fn depart_desc_optional(w: &mut HtmlWriter<'_>, _node: &Node) -> Result<(), RenderError> {
    w.state.optional_param_level = w.state.optional_param_level.saturating_sub(1);
    w.push(r#"<span class="optional">]</span>"#);
    Ok(())
}
