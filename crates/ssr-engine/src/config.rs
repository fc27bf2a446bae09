//! Render Configuration

/// How aggregated component styles are emitted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StyleMode {
    /// Emit only the first aggregated fragment's text; later fragments are
    /// linked into the style sheet but not written.
    #[default]
    FirstFragment,
    /// Emit every aggregated fragment, in encounter order
    Concatenate,
}

/// Render configuration options
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Maximum component nesting produced by expansion. A component
    /// rendered by a component at depth `n` sits at depth `n + 1`;
    /// reaching this limit aborts the render.
    pub max_component_depth: usize,

    /// Style block emission
    pub style_mode: StyleMode,

    /// Indent serialized output
    pub pretty_print: bool,

    /// Context element for parsing raw inner markup
    pub fragment_context: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            max_component_depth: 64,
            style_mode: StyleMode::FirstFragment,
            pretty_print: false,
            fragment_context: "body".to_string(),
        }
    }
}
