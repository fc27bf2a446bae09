//! Component expansion
//!
//! One pre-order pass over the virtual tree. Every element whose tag is
//! registered is replaced in place by its component's output; the walk
//! then descends into the new children, so components rendered by
//! components expand in the same pass.

use std::collections::HashMap;
use std::sync::Arc;

use ssr_vdom::{VNodeId, VTree, VdomError, instantiation_props};

use crate::{BuildOut, ComponentInst, ComponentRegistry, RenderConfig, RenderError, RenderResult, StyleAggregator};

/// Expansion walker
pub struct Expander<'a> {
    registry: &'a ComponentRegistry,
    config: &'a RenderConfig,
    /// Component nesting depth of nodes moved in by an expansion
    depths: HashMap<VNodeId, usize>,
    expanded: usize,
}

impl<'a> Expander<'a> {
    pub fn new(registry: &'a ComponentRegistry, config: &'a RenderConfig) -> Self {
        Self {
            registry,
            config,
            depths: HashMap::new(),
            expanded: 0,
        }
    }

    /// Expand every registered component reachable from the tree root.
    /// Style fragments are handed to `styles` in document order.
    ///
    /// Returns the number of components expanded.
    pub fn expand(&mut self, tree: &mut VTree, styles: &mut StyleAggregator) -> RenderResult<usize> {
        let root = tree.root();
        let mut current = root;
        while current.is_valid() {
            self.visit(tree, current, styles)?;
            current = next_in_pre_order(tree, root, current);
        }

        tracing::debug!(components = self.expanded, nodes = tree.len(), "component expansion complete");
        Ok(self.expanded)
    }

    fn visit(&mut self, tree: &mut VTree, id: VNodeId, styles: &mut StyleAggregator) -> RenderResult<()> {
        let node = tree.get(id).ok_or(VdomError::NotFound(id))?;
        let Some(tag) = node.tag() else {
            return Ok(());
        };
        let Some(ty) = self.registry.get(tag) else {
            return Ok(());
        };
        let tag = tag.to_string();

        let depth = self.depths.get(&id).copied().unwrap_or(0);
        if depth >= self.config.max_component_depth {
            return Err(RenderError::RecursionLimit {
                tag,
                depth: self.config.max_component_depth,
            });
        }

        // Static attributes fill in for properties that are not bound
        let props = instantiation_props(&node.props, &node.attrs);
        let instance = ComponentInst::new(Arc::clone(ty), props).map_err(|source| RenderError::Instantiate {
            tag: tag.clone(),
            source,
        })?;
        let BuildOut { vdom, css } = instance.build().map_err(|source| RenderError::Build {
            tag: Some(tag.clone()),
            source,
        })?;
        drop(instance);

        if let Some(css) = css {
            styles.absorb(&css)?;
        }

        if vdom.get(vdom.root()).is_none() {
            return Err(RenderError::EmptyBuild { tag: Some(tag) });
        }
        let moved = tree.graft(id, vdom)?;
        for moved_id in moved {
            self.depths.insert(moved_id, depth + 1);
        }

        self.expanded += 1;
        tracing::debug!(%tag, depth, "expanded component");
        Ok(())
    }
}

/// Next node after `current` in a pre-order walk bounded by `root`
fn next_in_pre_order(tree: &VTree, root: VNodeId, current: VNodeId) -> VNodeId {
    let Some(node) = tree.get(current) else {
        return VNodeId::NONE;
    };
    if node.first_child.is_valid() {
        return node.first_child;
    }

    let mut id = current;
    while id.is_valid() && id != root {
        let Some(node) = tree.get(id) else {
            break;
        };
        if node.next_sibling.is_valid() {
            return node.next_sibling;
        }
        id = node.parent;
    }
    VNodeId::NONE
}
