//! Static HTML environment
//!
//! Renders a root component once: build, expand components, emit the
//! style block, convert and serialize. Components are created when needed
//! and dropped right after; DOM events and lifecycle are not modelled.

use std::io::Write;
use std::sync::Arc;

use ssr_html::{FragmentContext, FragmentParser, HtmlSerializer};

use crate::{
    BuildOut, ComponentInst, ComponentRegistry, ComponentType, Expander, GraphConverter, RenderConfig, RenderError,
    RenderResult, StyleAggregator,
};

/// Summary of a finished render
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderStats {
    /// Components expanded below the root
    pub components: usize,
    /// Style fragments aggregated
    pub style_fragments: usize,
    /// Output tree nodes serialized
    pub nodes: usize,
    /// Bytes written to the sink
    pub bytes: usize,
}

/// Environment that renders a root component to static HTML
pub struct StaticHtmlEnv<W: Write> {
    registry: ComponentRegistry,
    root: ComponentInst,
    out: W,
    config: RenderConfig,
}

impl<W: Write> StaticHtmlEnv<W> {
    /// `out` and `root` are required; a missing registry is an empty one.
    pub fn new(out: W, root: ComponentInst, registry: Option<ComponentRegistry>) -> Self {
        Self {
            registry: registry.unwrap_or_default(),
            root,
            out,
            config: RenderConfig::default(),
        }
    }

    pub fn with_config(mut self, config: RenderConfig) -> Self {
        self.config = config;
        self
    }

    /// Register a component type under its tag name
    pub fn register_component_type(&mut self, tag: impl Into<String>, ty: Arc<dyn ComponentType>) {
        self.registry.register(tag, ty);
    }

    pub fn registry(&self) -> &ComponentRegistry {
        &self.registry
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Render to the output sink
    pub fn render(&mut self) -> RenderResult<RenderStats> {
        render_static(&mut self.out, &self.root, &self.registry, &self.config)
    }

    /// Give back the output sink
    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Render `root` to `out`.
///
/// The style block is written before the document tree is converted, so
/// a failure while converting or serializing may leave the style block
/// (and nothing after it) in the sink.
pub fn render_static<W: Write>(
    out: &mut W,
    root: &ComponentInst,
    registry: &ComponentRegistry,
    config: &RenderConfig,
) -> RenderResult<RenderStats> {
    tracing::debug!(registered = registry.len(), "rendering static HTML");

    let BuildOut { vdom: mut tree, css } = root
        .build()
        .map_err(|source| RenderError::Build { tag: None, source })?;
    if tree.get(tree.root()).is_none() {
        return Err(RenderError::EmptyBuild { tag: None });
    }

    let mut styles = StyleAggregator::seeded(css);
    let components = Expander::new(registry, config).expand(&mut tree, &mut styles)?;

    let serializer = if config.pretty_print {
        HtmlSerializer::pretty()
    } else {
        HtmlSerializer::new()
    };

    let mut bytes = 0;
    if let Some(css) = styles.emitted_text(config.style_mode) {
        bytes += serializer.write_style_block(&css, out)?;
    }

    let parser = FragmentParser::with_context(FragmentContext::html(config.fragment_context.as_str()));
    let conversion = GraphConverter::new(&tree, &parser).convert()?;
    bytes += serializer.write_outer(&conversion.tree, conversion.root, out)?;
    out.flush()?;

    let stats = RenderStats {
        components,
        style_fragments: styles.len(),
        nodes: conversion.tree.len(),
        bytes,
    };
    tracing::debug!(?stats, "render complete");
    Ok(stats)
}

/// Render `root` into a string
pub fn render_to_string(root: &ComponentInst, registry: &ComponentRegistry, config: &RenderConfig) -> RenderResult<String> {
    let mut out = Vec::new();
    render_static(&mut out, root, registry, config)?;
    Ok(String::from_utf8_lossy(&out).into_owned())
}
