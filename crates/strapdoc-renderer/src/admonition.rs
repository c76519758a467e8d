//! Admonition (callout) kinds and the title-insertion pre-pass.

use std::fmt;
use std::str::FromStr;

use crate::error::RenderError;
use crate::node::Node;

/// Kind tag of the generic admonition, which has no variant.
pub const GENERIC: &str = "admonition";

/// Named admonition variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AdmonitionKind {
    Note,
    Hint,
    Tip,
    SeeAlso,
    Warning,
    Attention,
    Caution,
    Important,
    Danger,
    Error,
    Exercise,
}

impl AdmonitionKind {
    /// All variants, in table order.
    pub const ALL: [Self; 11] = [
        Self::Note,
        Self::Hint,
        Self::Tip,
        Self::SeeAlso,
        Self::Warning,
        Self::Attention,
        Self::Caution,
        Self::Important,
        Self::Danger,
        Self::Error,
        Self::Exercise,
    ];

    /// Kind tag / variant name as it appears in the document tree.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Note => "note",
            Self::Hint => "hint",
            Self::Tip => "tip",
            Self::SeeAlso => "seealso",
            Self::Warning => "warning",
            Self::Attention => "attention",
            Self::Caution => "caution",
            Self::Important => "important",
            Self::Danger => "danger",
            Self::Error => "error",
            Self::Exercise => "exercise",
        }
    }

    /// Bootstrap alert class.
    #[must_use]
    pub fn alert_class(self) -> &'static str {
        match self {
            Self::Note => "alert-note",
            Self::Hint => "alert-info",
            Self::Tip => "alert-tip",
            Self::SeeAlso => "alert-go_to",
            Self::Warning | Self::Attention | Self::Caution | Self::Important => "alert-warning",
            Self::Danger | Self::Error => "alert-danger",
            Self::Exercise => "alert-exercise",
        }
    }

    /// Human-readable label used as the synthetic title.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Note => "Note",
            Self::Hint => "Hint",
            Self::Tip => "Tip",
            Self::SeeAlso => "See also",
            Self::Warning => "Warning",
            Self::Attention => "Attention",
            Self::Caution => "Caution",
            Self::Important => "Important",
            Self::Danger => "Danger",
            Self::Error => "Error",
            Self::Exercise => "Exercise",
        }
    }
}

impl FromStr for AdmonitionKind {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| RenderError::UnknownAdmonition(s.to_owned()))
    }
}

impl fmt::Display for AdmonitionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Whether a node is an admonition of any form.
#[must_use]
pub fn is_admonition(node: &Node) -> bool {
    node.is(GENERIC) || node.kind.parse::<AdmonitionKind>().is_ok()
}

/// Resolve the variant of an admonition node. The generic kind has none.
///
/// # Errors
///
/// Returns [`RenderError::UnknownAdmonition`] when the node kind is missing
/// from the mapping table.
pub fn variant(node: &Node) -> Result<Option<AdmonitionKind>, RenderError> {
    if node.is(GENERIC) {
        Ok(None)
    } else {
        node.kind.parse().map(Some)
    }
}

/// Insert label titles into every admonition that has a variant.
///
/// Runs over the whole tree before traversal so rendering never mutates
/// the document. Each such admonition gets a `title` child at index 0
/// holding the variant's label; generic admonitions keep their own title.
pub fn normalize_admonitions(node: &mut Node) {
    if let Ok(kind) = node.kind.parse::<AdmonitionKind>() {
        node.children
            .insert(0, Node::with_text("title", kind.label()));
    }
    for child in &mut node.children {
        normalize_admonitions(child);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alert_class_table() {
        let expected = [
            ("note", "alert-note"),
            ("hint", "alert-info"),
            ("tip", "alert-tip"),
            ("seealso", "alert-go_to"),
            ("warning", "alert-warning"),
            ("attention", "alert-warning"),
            ("caution", "alert-warning"),
            ("important", "alert-warning"),
            ("danger", "alert-danger"),
            ("error", "alert-danger"),
            ("exercise", "alert-exercise"),
        ];
        for (name, class) in expected {
            let kind: AdmonitionKind = name.parse().unwrap();
            assert_eq!(kind.alert_class(), class, "{name}");
        }
    }

    #[test]
    fn test_unknown_variant_fails() {
        let err = "frobnicate".parse::<AdmonitionKind>().unwrap_err();
        assert!(matches!(err, RenderError::UnknownAdmonition(ref name) if name == "frobnicate"));
    }

    #[test]
    fn test_variant_of_generic_is_none() {
        let node = Node::new(GENERIC).attr("name", "tip");
        assert_eq!(variant(&node).unwrap(), None);
        assert_eq!(variant(&Node::new("tip")).unwrap(), Some(AdmonitionKind::Tip));
    }

    #[test]
    fn test_variant_of_unmapped_kind_fails() {
        let err = variant(&Node::new("sidebar")).unwrap_err();
        assert!(matches!(err, RenderError::UnknownAdmonition(ref name) if name == "sidebar"));
    }

    #[test]
    fn test_is_admonition() {
        assert!(is_admonition(&Node::new("warning")));
        assert!(is_admonition(&Node::new(GENERIC)));
        assert!(!is_admonition(&Node::new("section")));
    }

    #[test]
    fn test_normalize_inserts_title_first() {
        let mut doc = Node::new("document").child(
            Node::new("section").child(
                Node::new("warning").child(Node::with_text("paragraph", "Careful")),
            ),
        );
        normalize_admonitions(&mut doc);

        let warning = &doc.children[0].children[0];
        assert_eq!(warning.children.len(), 2);
        assert_eq!(warning.children[0].kind, "title");
        assert_eq!(warning.children[0].astext(), "Warning");
        assert_eq!(warning.children[1].kind, "paragraph");
    }

    #[test]
    fn test_normalize_leaves_generic_alone() {
        let mut node = Node::new(GENERIC).child(Node::with_text("title", "Custom"));
        normalize_admonitions(&mut node);
        assert_eq!(node.children.len(), 1);
        assert_eq!(node.children[0].astext(), "Custom");
    }

    #[test]
    fn test_normalize_ignores_name_attribute_of_generic() {
        let mut node = Node::new(GENERIC)
            .attr("name", "my-box")
            .child(Node::with_text("title", "Custom"));
        normalize_admonitions(&mut node);
        assert_eq!(node.children.len(), 1);
        assert_eq!(node.children[0].astext(), "Custom");
    }
}
