//! React component-source export.
//!
//! Emits a single `App.jsx` module: one function component per page named
//! `<PascalName>Page`, inline style objects built from the same declarations
//! as the HTML export, and a default-exported `App` rendering every page in
//! order.

use std::collections::{HashMap, HashSet};
use std::fmt::Write;

use site_core::{Component, ComponentKind, Page, PointerEvents, RenderNode, RenderTree, Viewport};

use crate::assets;
use crate::css::{self, Declarations, Geometry};
use crate::html::component_class;
use crate::writer::SourceWriter;

/// Function component names, one per page, unique within the module.
#[must_use]
pub fn component_names(pages: &[Page]) -> Vec<String> {
    let mut used = HashSet::new();
    pages
        .iter()
        .map(|page| {
            let stem = format!("{}Page", page.pascal_name());
            let mut candidate = stem.clone();
            let mut n = 2;
            while !used.insert(candidate.clone()) {
                candidate = format!("{stem}{n}");
                n += 1;
            }
            candidate
        })
        .collect()
}

struct ModuleContext<'a> {
    anchors: HashMap<&'a str, &'a str>,
    geometry: Geometry,
}

/// Render the whole design as one React module.
#[must_use]
pub fn module(pages: &[Page], base_width: f64) -> String {
    let names = component_names(pages);
    let ctx = ModuleContext {
        anchors: pages
            .iter()
            .map(|p| (p.id.as_str(), p.slug.as_str()))
            .collect(),
        geometry: Geometry::fixed(base_width),
    };
    let animated = pages.iter().flat_map(|p| &p.components).any(|c| {
        c.animation
            .as_ref()
            .is_some_and(|a| assets::is_known_animation(&a.name))
    });
    let linked = pages
        .iter()
        .flat_map(|p| &p.components)
        .any(|c| link_anchor(c, &ctx).is_some());

    let mut w = SourceWriter::new();
    w.line("import React from 'react';");
    w.line("");

    if animated {
        w.line("const KEYFRAMES = `");
        w.raw(&assets::keyframes_css());
        w.line("`;");
        w.line("");
    }

    if linked {
        w.line("function goToPage(id) {");
        w.indent();
        w.line("const target = document.getElementById(id);");
        w.line("if (target) {");
        w.indent();
        w.line("target.scrollIntoView({ behavior: 'smooth' });");
        w.dedent();
        w.line("}");
        w.dedent();
        w.line("}");
        w.line("");
    }

    for (page, name) in pages.iter().zip(&names) {
        write_page(&mut w, page, name, &ctx);
        w.line("");
    }

    w.line("export default function App() {");
    w.indent();
    w.line("return (");
    w.indent();
    w.line("<div className=\"app\">");
    w.indent();
    if animated {
        w.line("<style>{KEYFRAMES}</style>");
    }
    for name in &names {
        w.line(&format!("<{name} />"));
    }
    w.dedent();
    w.line("</div>");
    w.dedent();
    w.line(");");
    w.dedent();
    w.line("}");
    w.finish()
}

fn link_anchor<'a>(component: &Component, ctx: &ModuleContext<'a>) -> Option<&'a str> {
    component
        .link_to_page_id
        .as_deref()
        .and_then(|id| ctx.anchors.get(id).copied())
}

fn write_page(w: &mut SourceWriter, page: &Page, name: &str, ctx: &ModuleContext<'_>) {
    let mut section = Declarations::new();
    section
        .push("position", "relative")
        .push("width", "100%")
        .push("max-width", css::px(ctx.geometry.base_width))
        .push("height", ctx.geometry.height(page.canvas_height))
        .push("margin", "0 auto")
        .push("overflow", "hidden")
        .push("background", "white");

    let components: HashMap<&str, &Component> = page
        .components
        .iter()
        .map(|c| (c.id.as_str(), c))
        .collect();
    let tree = RenderTree::build(page, Viewport::desktop(ctx.geometry.base_width));

    w.line(&format!("function {name}() {{"));
    w.indent();
    w.line("return (");
    w.indent();
    w.line(&format!(
        "<section id={} style={{{}}}>",
        css::js_string(&page.slug),
        section.to_style_object()
    ));
    w.indent();
    for node in &tree.nodes {
        write_node(w, node, &components, ctx, false);
    }
    w.dedent();
    w.line("</section>");
    w.dedent();
    w.line(");");
    w.dedent();
    w.line("}");
}

fn write_node(
    w: &mut SourceWriter,
    node: &RenderNode,
    components: &HashMap<&str, &Component>,
    ctx: &ModuleContext<'_>,
    in_group: bool,
) {
    let Some(component) = components.get(node.id.as_str()).copied() else {
        return;
    };
    let pointer_events = if node.is_group() {
        Some(PointerEvents::None)
    } else if in_group {
        Some(PointerEvents::Auto)
    } else {
        None
    };
    let mut style = css::component_declarations(component, node.z, ctx.geometry, pointer_events);
    if let Some(animation) = component
        .animation
        .as_ref()
        .filter(|a| assets::is_known_animation(&a.name))
    {
        style.push("animation", css::animation_shorthand(animation));
    }

    let class = if node.is_group() {
        "group-component".to_string()
    } else {
        component_class(&component.kind)
    };
    let mut attrs = format!(
        " key={} className=\"{class}\" style={{{}}}",
        css::js_string(component.id.as_str()),
        style.to_style_object()
    );
    if let Some(anchor) = link_anchor(component, ctx) {
        let _ = write!(
            attrs,
            " onClick={{() => goToPage({})}}",
            css::js_string(anchor)
        );
    }

    if node.is_group() {
        w.line(&format!("<div{attrs}>"));
        w.indent();
        for child in &node.children {
            write_node(w, child, components, ctx, true);
        }
        w.dedent();
        w.line("</div>");
        return;
    }

    let text = component.content.as_deref().unwrap_or_default();
    let src = css::js_string(component.src.as_deref().unwrap_or_default());
    let markup = match &component.kind {
        ComponentKind::Button => {
            let label = if text.is_empty() { "Button" } else { text };
            format!("<button type=\"button\"{attrs}>{{{}}}</button>", css::js_string(label))
        }
        ComponentKind::Image => format!(
            "<img src={{{src}}} alt={{{}}}{attrs} />",
            css::js_string(&component.name)
        ),
        ComponentKind::Input => format!(
            "<input type=\"text\" placeholder={{{}}}{attrs} />",
            css::js_string(component.placeholder.as_deref().unwrap_or_default())
        ),
        ComponentKind::Video => format!("<video controls{attrs}><source src={{{src}}} /></video>"),
        ComponentKind::Divider => format!("<hr{attrs} />"),
        _ if text.is_empty() => format!("<div{attrs} />"),
        _ => format!("<div{attrs}>{{{}}}</div>", css::js_string(text)),
    };
    w.line(&markup);
}
