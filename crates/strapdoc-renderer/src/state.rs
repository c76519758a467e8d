//! Per-render state and text encoding.
//!
//! Everything here lives for exactly one document render and is dropped
//! with the [`HtmlWriter`](crate::HtmlWriter) that owns it.

/// Counters and flags tracked while walking one document.
#[derive(Debug)]
pub struct RenderState {
    /// Current nesting depth of `<section>` elements.
    pub section_level: usize,
    /// Set on document entry; cleared once the first section title is seen.
    pub first_title: bool,
    /// Text of the first section title.
    pub title: Option<String>,
    /// Closing fragments pushed by enter handlers, popped by exit handlers.
    pub context: Vec<String>,
    /// Row counter of the table being rendered, for odd/even striping.
    pub table_row_index: usize,
    /// Signature state: whether the next parameter is the first one.
    pub first_param: bool,
    /// Signature state: text placed between parameters.
    pub param_separator: String,
    /// Signature state: depth of `[...]` optional groups.
    pub optional_param_level: usize,
}

impl Default for RenderState {
    fn default() -> Self {
        Self {
            section_level: 0,
            first_title: false,
            title: None,
            context: Vec::new(),
            table_row_index: 0,
            first_param: true,
            param_separator: ", ".to_owned(),
            optional_param_level: 0,
        }
    }
}

impl RenderState {
    /// Remember a closing fragment for the matching exit handler.
    pub fn push_context(&mut self, fragment: impl Into<String>) {
        self.context.push(fragment.into());
    }

    /// Take the closing fragment pushed by the matching enter handler.
    ///
    /// An unbalanced pop yields an empty fragment rather than a panic.
    pub fn pop_context(&mut self) -> String {
        self.context.pop().unwrap_or_default()
    }

    /// Record the page title if it has not been captured yet.
    pub fn capture_title(&mut self, text: String) {
        if self.first_title {
            self.first_title = false;
            self.title = Some(text);
        }
    }
}

/// Encode text for HTML output.
///
/// Only `&`, `<`, `"`, `>` and the non-breaking space are replaced; single
/// quotes and everything else pass through untouched.
#[must_use]
pub fn encode(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '"' => result.push_str("&quot;"),
            '>' => result.push_str("&gt;"),
            '\u{a0}' => result.push_str("&nbsp;"),
            _ => result.push(c),
        }
    }
    result
}
