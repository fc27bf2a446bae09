//! Example: render a small page with nested components to stdout
//!
//! Run with `RUST_LOG=ssr_engine=debug` to see expansion logs.

use std::io;

use serde::Deserialize;
use ssr_engine::{BuildOut, ComponentInst, ComponentRegistry, RenderConfig, StaticHtmlEnv, component};
use ssr_vdom::{ElementBuilder, Props, style_fragment};
use tracing_subscriber::EnvFilter;

#[derive(Deserialize)]
struct NavLink {
    href: String,
    label: String,
}

#[derive(Deserialize)]
struct Page {
    title: String,
}

fn registry() -> ComponentRegistry {
    let mut registry = ComponentRegistry::new();

    registry.register(
        "nav-link",
        component(|link: &NavLink| {
            Ok(BuildOut::new(
                ElementBuilder::new("a")
                    .attr("class", "nav-link")
                    .attr("href", link.href.clone())
                    .text(link.label.clone())
                    .build(),
            )
            .with_css(style_fragment(".nav-link{text-decoration:none}")))
        }),
    );

    registry.register(
        "site-nav",
        component(|_: &serde_json::Value| {
            Ok(BuildOut::new(
                ElementBuilder::new("nav")
                    .child(ElementBuilder::new("nav-link").attr("href", "/").attr("label", "Home"))
                    .child(ElementBuilder::new("nav-link").attr("href", "/docs").attr("label", "Docs"))
                    .build(),
            ))
        }),
    );

    registry
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let page = component(|page: &Page| {
        Ok(BuildOut::new(
            ElementBuilder::new("html")
                .child(ElementBuilder::new("head").child(ElementBuilder::new("title").text(page.title.clone())))
                .child(
                    ElementBuilder::new("body")
                        .child(ElementBuilder::new("site-nav"))
                        .child(
                            ElementBuilder::new("main")
                                .prop("data-page", page.title.clone())
                                .raw_markup("<p>Rendered <em>once</em>, no runtime.</p>"),
                        ),
                )
                .build(),
        )
        .with_css(style_fragment("body{font-family:sans-serif}")))
    });

    let props: Props = [("title", "Welcome")].into_iter().collect();
    let root = ComponentInst::new(page, props)?;

    let config = RenderConfig {
        pretty_print: true,
        ..RenderConfig::default()
    };
    let mut env = StaticHtmlEnv::new(io::stdout().lock(), root, Some(registry())).with_config(config);
    let stats = env.render()?;
    drop(env);
    println!();

    eprintln!(
        "ssr-engine v{}: {} components, {} bytes",
        ssr_engine::VERSION,
        stats.components,
        stats.bytes
    );
    Ok(())
}
