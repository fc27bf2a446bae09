//! Render errors

use ssr_dom::DomError;
use ssr_html::ParseError;
use ssr_vdom::VdomError;

pub type RenderResult<T> = Result<T, RenderError>;

/// Errors aborting a render. The first error wins; bytes already written
/// to the sink are not rolled back.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// A component builder failed. `tag` is `None` for the root component.
    #[error("failed to build {}: {source}", component_label(.tag))]
    Build {
        tag: Option<String>,
        #[source]
        source: anyhow::Error,
    },

    /// Instance data could not be constructed from the computed properties
    #[error("failed to instantiate component `{tag}`: {source}")]
    Instantiate {
        tag: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("{} produced an empty tree", component_label(.tag))]
    EmptyBuild { tag: Option<String> },

    #[error("component `{tag}` exceeds the maximum nesting depth of {depth}")]
    RecursionLimit { tag: String, depth: usize },

    #[error(transparent)]
    FragmentParse(#[from] ParseError),

    #[error(transparent)]
    Tree(#[from] VdomError),

    #[error(transparent)]
    Dom(#[from] DomError),

    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

fn component_label(tag: &Option<String>) -> String {
    match tag {
        Some(tag) => format!("component `{tag}`"),
        None => "root component".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_error_messages() {
        let root = RenderError::Build {
            tag: None,
            source: anyhow::anyhow!("boom"),
        };
        assert_eq!(root.to_string(), "failed to build root component: boom");

        let nested = RenderError::Build {
            tag: Some("card".into()),
            source: anyhow::anyhow!("boom"),
        };
        assert_eq!(nested.to_string(), "failed to build component `card`: boom");
    }

    #[test]
    fn test_source_is_carried_verbatim() {
        let err = RenderError::Instantiate {
            tag: "card".into(),
            source: anyhow::anyhow!("missing field `title`"),
        };
        let source = std::error::Error::source(&err).unwrap();
        assert_eq!(source.to_string(), "missing field `title`");
    }

    #[test]
    fn test_lower_errors_convert() {
        use ssr_dom::NodeId;
        use ssr_vdom::VNodeId;

        let tree: RenderError = VdomError::NotFound(VNodeId::NONE).into();
        assert!(matches!(tree, RenderError::Tree(VdomError::NotFound(_))));

        let dom: RenderError = DomError::HierarchyRequest(NodeId::NONE).into();
        assert!(matches!(dom, RenderError::Dom(DomError::HierarchyRequest(_))));

        let parse: RenderError = ParseError::from(DomError::NotFound(NodeId::NONE)).into();
        assert!(matches!(parse, RenderError::FragmentParse(ParseError::Dom(_))));
    }
}
