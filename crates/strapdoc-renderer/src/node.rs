//! Document tree model.
//!
//! Nodes follow the docutils shape: a kind tag, a bag of attributes, and an
//! ordered list of children. Text lives in `#text` leaves. The set of kinds
//! is open; the renderer decides which ones it knows about.

use std::collections::BTreeMap;

/// Kind tag of text leaves.
pub const TEXT: &str = "#text";

/// Attribute value attached to a node.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum AttrValue {
    Bool(bool),
    Int(i64),
    Str(String),
    List(Vec<String>),
}

impl AttrValue {
    /// Render the value as a single attribute string.
    ///
    /// Lists are joined with spaces, booleans become `true`/`false`.
    #[must_use]
    pub fn to_attr_string(&self) -> String {
        match self {
            Self::Bool(b) => b.to_string(),
            Self::Int(n) => n.to_string(),
            Self::Str(s) => s.clone(),
            Self::List(items) => items.join(" "),
        }
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<i64> for AttrValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<Vec<String>> for AttrValue {
    fn from(value: Vec<String>) -> Self {
        Self::List(value)
    }
}

/// A node of the document tree.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    /// Kind tag (e.g. `section`, `note`, `#text`).
    pub kind: String,
    /// Attributes by name.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "BTreeMap::is_empty")
    )]
    pub attributes: BTreeMap<String, AttrValue>,
    /// Literal content of text leaves.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub text: Option<String>,
    /// Ordered children.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Vec::is_empty")
    )]
    pub children: Vec<Node>,
}

impl Node {
    /// Create an empty node of the given kind.
    #[must_use]
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            attributes: BTreeMap::new(),
            text: None,
            children: Vec::new(),
        }
    }

    /// Create a `#text` leaf.
    #[must_use]
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            text: Some(content.into()),
            ..Self::new(TEXT)
        }
    }

    /// Create a node holding a single text child.
    ///
    /// Shorthand for inline elements such as `title`, `strong` or `literal`.
    #[must_use]
    pub fn with_text(kind: impl Into<String>, content: impl Into<String>) -> Self {
        Self::new(kind).child(Self::text(content))
    }

    /// Append a child.
    #[must_use]
    pub fn child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    /// Append several children.
    #[must_use]
    pub fn with_children(mut self, children: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(children);
        self
    }

    /// Set an attribute.
    #[must_use]
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Add a CSS class.
    #[must_use]
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.push_list_attr("classes", class.into());
        self
    }

    /// Add an id.
    #[must_use]
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.push_list_attr("ids", id.into());
        self
    }

    fn push_list_attr(&mut self, name: &str, value: String) {
        match self.attributes.get_mut(name) {
            Some(AttrValue::List(items)) => items.push(value),
            _ => {
                self.attributes
                    .insert(name.to_owned(), AttrValue::List(vec![value]));
            }
        }
    }

    /// Whether this node has the given kind.
    #[must_use]
    pub fn is(&self, kind: &str) -> bool {
        self.kind == kind
    }

    /// Whether the attribute is present, whatever its value.
    #[must_use]
    pub fn has_attr(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    /// Attribute as a string slice, if it is a string.
    #[must_use]
    pub fn get_str(&self, name: &str) -> Option<&str> {
        match self.attributes.get(name) {
            Some(AttrValue::Str(s)) => Some(s),
            _ => None,
        }
    }

    /// Attribute as an integer.
    ///
    /// Numeric strings are accepted as well, since serialized trees are not
    /// always careful about the distinction.
    #[must_use]
    pub fn get_int(&self, name: &str) -> Option<i64> {
        match self.attributes.get(name) {
            Some(AttrValue::Int(n)) => Some(*n),
            Some(AttrValue::Str(s)) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Attribute as a flag. Missing attributes are `false`.
    #[must_use]
    pub fn get_bool(&self, name: &str) -> bool {
        match self.attributes.get(name) {
            Some(AttrValue::Bool(b)) => *b,
            Some(AttrValue::Int(n)) => *n != 0,
            Some(AttrValue::Str(s)) => !s.is_empty(),
            Some(AttrValue::List(items)) => !items.is_empty(),
            None => false,
        }
    }

    /// List attribute (e.g. `classes`, `ids`). Missing means empty.
    ///
    /// A plain string is treated as a whitespace-separated list.
    #[must_use]
    pub fn get_list(&self, name: &str) -> Vec<&str> {
        match self.attributes.get(name) {
            Some(AttrValue::List(items)) => items.iter().map(String::as_str).collect(),
            Some(AttrValue::Str(s)) => s.split_whitespace().collect(),
            _ => Vec::new(),
        }
    }

    /// CSS classes of this node.
    #[must_use]
    pub fn classes(&self) -> Vec<&str> {
        self.get_list("classes")
    }

    /// Ids of this node.
    #[must_use]
    pub fn ids(&self) -> Vec<&str> {
        self.get_list("ids")
    }

    /// Concatenated text of all descendant text leaves.
    #[must_use]
    pub fn astext(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        if let Some(text) = &self.text {
            out.push_str(text);
        }
        for child in &self.children {
            child.collect_text(out);
        }
    }
}
