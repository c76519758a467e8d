//! Render error type.

/// Error raised while rendering a document.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// An admonition kind is missing from the class mapping table.
    #[error("Unknown admonition kind: {0}")]
    UnknownAdmonition(String),
}
