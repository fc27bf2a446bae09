//! Components
//!
//! A component type is a pure builder from instance data to a subtree and
//! an optional style fragment. Instances pair a type with data decoded
//! from properties; they are built once and dropped.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use ssr_vdom::{Props, VTree};

/// Opaque per-instance data
pub type ComponentData = Box<dyn Any + Send>;

/// Output of a component builder
#[derive(Debug, Clone)]
pub struct BuildOut {
    /// Rendered subtree
    pub vdom: VTree,
    /// Style fragment: a node whose first child holds the style text
    pub css: Option<VTree>,
}

impl BuildOut {
    pub fn new(vdom: VTree) -> Self {
        Self { vdom, css: None }
    }

    pub fn with_css(mut self, css: VTree) -> Self {
        self.css = Some(css);
        self
    }
}

/// Component type: constructs instance data and builds subtrees from it
pub trait ComponentType: Send + Sync {
    /// Construct instance data from the properties of a matched node
    fn new_data(&self, props: &Props) -> anyhow::Result<ComponentData>;

    /// Build the subtree (and optional style fragment) for an instance
    fn build_vdom(&self, data: &(dyn Any + Send)) -> anyhow::Result<BuildOut>;
}

/// Component type backed by a closure over serde-decoded instance data
pub struct FnComponent<D, F> {
    build: F,
    _data: PhantomData<fn() -> D>,
}

impl<D, F> FnComponent<D, F>
where
    D: DeserializeOwned + Send + 'static,
    F: Fn(&D) -> anyhow::Result<BuildOut> + Send + Sync,
{
    pub fn new(build: F) -> Self {
        Self {
            build,
            _data: PhantomData,
        }
    }
}

impl<D, F> ComponentType for FnComponent<D, F>
where
    D: DeserializeOwned + Send + 'static,
    F: Fn(&D) -> anyhow::Result<BuildOut> + Send + Sync,
{
    fn new_data(&self, props: &Props) -> anyhow::Result<ComponentData> {
        let data: D = serde_json::from_value(props.to_json())?;
        Ok(Box::new(data))
    }

    fn build_vdom(&self, data: &(dyn Any + Send)) -> anyhow::Result<BuildOut> {
        let data = data.downcast_ref::<D>().ok_or_else(|| {
            anyhow::anyhow!("instance data is not a `{}`", std::any::type_name::<D>())
        })?;
        (self.build)(data)
    }
}

/// Shorthand for a shared [`FnComponent`]
pub fn component<D, F>(build: F) -> Arc<dyn ComponentType>
where
    D: DeserializeOwned + Send + 'static,
    F: Fn(&D) -> anyhow::Result<BuildOut> + Send + Sync + 'static,
{
    Arc::new(FnComponent::new(build))
}

/// Component instance
pub struct ComponentInst {
    ty: Arc<dyn ComponentType>,
    data: ComponentData,
}

impl ComponentInst {
    /// Create an instance, decoding its data from `props`
    pub fn new(ty: Arc<dyn ComponentType>, props: Props) -> anyhow::Result<Self> {
        let data = ty.new_data(&props)?;
        Ok(Self { ty, data })
    }

    /// Create an instance from already constructed data
    pub fn from_data(ty: Arc<dyn ComponentType>, data: ComponentData) -> Self {
        Self { ty, data }
    }

    pub fn component_type(&self) -> &Arc<dyn ComponentType> {
        &self.ty
    }

    pub fn data(&self) -> &(dyn Any + Send) {
        self.data.as_ref()
    }

    /// Run the type's builder over this instance's data
    pub fn build(&self) -> anyhow::Result<BuildOut> {
        self.ty.build_vdom(self.data.as_ref())
    }
}

impl fmt::Debug for ComponentInst {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentInst").finish_non_exhaustive()
    }
}

/// Registry of component types keyed by tag name
#[derive(Clone, Default)]
pub struct ComponentRegistry {
    components: HashMap<String, Arc<dyn ComponentType>>,
}

impl ComponentRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a component type under a tag, returning any type it replaces
    pub fn register(&mut self, tag: impl Into<String>, ty: Arc<dyn ComponentType>) -> Option<Arc<dyn ComponentType>> {
        self.components.insert(tag.into(), ty)
    }

    /// Get a component type by tag
    pub fn get(&self, tag: &str) -> Option<&Arc<dyn ComponentType>> {
        self.components.get(tag)
    }

    /// Check if a tag is registered
    pub fn contains(&self, tag: &str) -> bool {
        self.components.contains_key(tag)
    }

    /// Registered tags, in no particular order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.components.keys().map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

impl fmt::Debug for ComponentRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.names().collect();
        names.sort_unstable();
        f.debug_struct("ComponentRegistry").field("components", &names).finish()
    }
}
