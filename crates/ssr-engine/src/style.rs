//! Style aggregation
//!
//! Component style fragments are linked, in encounter order, under one
//! `style` node. By default only the first fragment's text is emitted.

use ssr_vdom::{VNode, VTree, VdomResult};

use crate::StyleMode;

/// Ordered collection of style fragments
#[derive(Debug, Clone)]
pub struct StyleAggregator {
    sheet: VTree,
}

impl StyleAggregator {
    /// Empty aggregate
    pub fn new() -> Self {
        Self {
            sheet: VTree::with_root(VNode::element("style")),
        }
    }

    /// Aggregate seeded by the root component's own style output
    pub fn seeded(root_css: Option<VTree>) -> Self {
        match root_css {
            Some(css) if css.get(css.root()).is_some() => Self { sheet: css },
            _ => Self::new(),
        }
    }

    /// Link a fragment's content into the aggregate. Fragments without
    /// content are ignored; returns whether anything was linked.
    pub fn absorb(&mut self, fragment: &VTree) -> VdomResult<bool> {
        let Some(content) = fragment
            .get(fragment.root())
            .map(|root| root.first_child)
            .filter(|id| id.is_valid())
        else {
            return Ok(false);
        };

        let copy = self.sheet.import_subtree(fragment, content)?;
        let root = self.sheet.root();
        self.sheet.append_child(root, copy)?;

        tracing::trace!(fragments = self.len(), "absorbed style fragment");
        Ok(true)
    }

    /// Text of each linked fragment, in encounter order
    pub fn fragments(&self) -> impl Iterator<Item = &str> {
        self.sheet
            .children(self.sheet.root())
            .map(|(_, node)| node.data.as_str())
    }

    /// Number of linked fragments
    pub fn len(&self) -> usize {
        self.fragments().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Text to emit in the style block, `None` when nothing was aggregated
    pub fn emitted_text(&self, mode: StyleMode) -> Option<String> {
        let mut fragments = self.fragments().peekable();
        fragments.peek()?;
        Some(match mode {
            StyleMode::FirstFragment => fragments.next().unwrap_or_default().to_string(),
            StyleMode::Concatenate => fragments.collect(),
        })
    }

    /// The aggregate tree (the `style` node and its linked fragments)
    pub fn sheet(&self) -> &VTree {
        &self.sheet
    }
}

impl Default for StyleAggregator {
    fn default() -> Self {
        Self::new()
    }
}
