//! Static HTML renderer
//!
//! Expands registered components in a virtual node tree, converts the
//! result into an output document tree and serializes it, preceded by
//! the aggregated component styles.
//!
//! ```
//! use std::sync::Arc;
//! use ssr_engine::{BuildOut, ComponentInst, ComponentRegistry, RenderConfig, component, render_to_string};
//! use ssr_vdom::{ElementBuilder, Props};
//!
//! #[derive(serde::Deserialize)]
//! struct Greeting {
//!     name: String,
//! }
//!
//! let mut registry = ComponentRegistry::new();
//! registry.register("greeting", component(|g: &Greeting| {
//!     Ok(BuildOut::new(ElementBuilder::new("p").text(format!("Hello, {}", g.name)).build()))
//! }));
//!
//! let page = component(|_: &serde_json::Value| {
//!     Ok(BuildOut::new(
//!         ElementBuilder::new("main")
//!             .child(ElementBuilder::new("greeting").attr("name", "Ada"))
//!             .build(),
//!     ))
//! });
//! let root = ComponentInst::new(Arc::clone(&page), Props::new()).unwrap();
//!
//! let html = render_to_string(&root, &registry, &RenderConfig::default()).unwrap();
//! assert_eq!(html, "<main><p>Hello, Ada</p></main>");
//! ```

mod component;
mod config;
mod convert;
mod env;
mod error;
mod expand;
mod style;

pub use component::{
    BuildOut, ComponentData, ComponentInst, ComponentRegistry, ComponentType, FnComponent, component,
};
pub use config::{RenderConfig, StyleMode};
pub use convert::{Conversion, GraphConverter};
pub use env::{RenderStats, StaticHtmlEnv, render_static, render_to_string};
pub use error::{RenderError, RenderResult};
pub use expand::Expander;
pub use style::StyleAggregator;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
