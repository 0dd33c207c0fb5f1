//! Static HTML export.
//!
//! Two layouts are produced from the same markup generator:
//!
//! - [`HtmlVariant::SingleFile`]: one `index.html` with every page as a
//!   `<section>`, inline styles and script, pixel positioning.
//! - [`HtmlVariant::Package`]: one HTML file per page sharing `styles.css`
//!   and `script.js`, plus a `README.md`.

use std::collections::{HashMap, HashSet};
use std::fmt::Write;

use site_core::{Component, ComponentKind, Page, PointerEvents, RenderNode, RenderTree, Viewport};
use tracing::debug;

use crate::assets;
use crate::css::{self, Geometry, Positioning};
use crate::writer::SourceWriter;
use crate::ExportArtifact;

/// Layout of an HTML export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HtmlVariant {
    /// One self-contained file.
    SingleFile,
    /// One file per page with shared assets.
    #[default]
    Package,
}

/// Escape text for HTML content and attribute values.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Output file name for each page; the first page is `index.html`.
#[must_use]
pub fn page_file_names(pages: &[Page]) -> Vec<String> {
    let mut used = HashSet::new();
    pages
        .iter()
        .enumerate()
        .map(|(i, page)| {
            let stem = if i == 0 {
                "index".to_string()
            } else {
                let slug = file_stem(&page.slug);
                if slug.is_empty() {
                    "page".to_string()
                } else {
                    slug
                }
            };
            let mut candidate = stem.clone();
            let mut n = 2;
            while !used.insert(candidate.clone()) {
                candidate = format!("{stem}-{n}");
                n += 1;
            }
            format!("{candidate}.html")
        })
        .collect()
}

fn file_stem(slug: &str) -> String {
    slug.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '-'
            }
        })
        .collect()
}

/// `kind-component` class name.
#[must_use]
pub fn component_class(kind: &ComponentKind) -> String {
    let ident: String = kind
        .as_str()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-')
        .collect();
    if ident.is_empty() {
        "component".to_string()
    } else {
        format!("{}-component", ident.to_ascii_lowercase())
    }
}

/// Per-page state shared while emitting markup.
struct PageContext<'a> {
    components: HashMap<&'a str, &'a Component>,
    links: &'a HashMap<&'a str, String>,
    geometry: Geometry,
}

impl<'a> PageContext<'a> {
    fn new(page: &'a Page, links: &'a HashMap<&'a str, String>, geometry: Geometry) -> Self {
        Self {
            components: page
                .components
                .iter()
                .map(|c| (c.id.as_str(), c))
                .collect(),
            links,
            geometry,
        }
    }
}

/// Self-contained `index.html` with every page as a section.
#[must_use]
pub fn single_file(pages: &[Page], base_width: f64, title: &str) -> String {
    let links: HashMap<&str, String> = pages
        .iter()
        .map(|p| (p.id.as_str(), format!("#{}", p.slug)))
        .collect();
    let geometry = Geometry::fixed(base_width);

    let mut w = SourceWriter::new();
    write_head(&mut w, title, &Head::Inline);
    for page in pages {
        write_page(&mut w, page, &PageContext::new(page, &links, geometry));
    }
    w.line("<script>");
    w.raw(assets::SCRIPT_JS);
    w.line("</script>");
    write_tail(&mut w);
    w.finish()
}

/// Multi-file package: page files, shared assets and a README.
#[must_use]
pub fn package(
    pages: &[Page],
    base_width: f64,
    title: &str,
    positioning: Positioning,
) -> Vec<ExportArtifact> {
    let files = page_file_names(pages);
    let links: HashMap<&str, String> = pages
        .iter()
        .zip(&files)
        .map(|(p, f)| (p.id.as_str(), f.clone()))
        .collect();
    let geometry = Geometry {
        positioning,
        base_width,
    };

    let mut artifacts: Vec<ExportArtifact> = pages
        .iter()
        .zip(&files)
        .enumerate()
        .map(|(i, (page, file))| {
            let page_title = if i == 0 {
                title.to_string()
            } else {
                format!("{} | {title}", page.name)
            };
            let mut w = SourceWriter::new();
            write_head(&mut w, &page_title, &Head::Linked);
            write_page(&mut w, page, &PageContext::new(page, &links, geometry));
            w.line("<script src=\"script.js\"></script>");
            write_tail(&mut w);
            ExportArtifact::html(file.clone(), w.finish())
        })
        .collect();

    artifacts.push(ExportArtifact::css("styles.css", assets::stylesheet()));
    artifacts.push(ExportArtifact::javascript("script.js", assets::SCRIPT_JS));
    artifacts.push(ExportArtifact::markdown(
        "README.md",
        assets::readme(title, pages, &files),
    ));
    artifacts
}

enum Head {
    Inline,
    Linked,
}

fn write_head(w: &mut SourceWriter, title: &str, head: &Head) {
    w.line("<!DOCTYPE html>");
    w.line("<html lang=\"en\">");
    w.line("<head>");
    w.indent();
    w.line("<meta charset=\"UTF-8\">");
    w.line("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">");
    w.line(&format!("<title>{}</title>", escape_html(title)));
    match head {
        Head::Inline => {
            w.line("<style>");
            w.raw(&assets::stylesheet());
            w.line("</style>");
        }
        Head::Linked => w.line("<link rel=\"stylesheet\" href=\"styles.css\">"),
    }
    w.dedent();
    w.line("</head>");
    w.line("<body>");
}

fn write_tail(w: &mut SourceWriter) {
    w.line("</body>");
    w.line("</html>");
}

fn write_page(w: &mut SourceWriter, page: &Page, ctx: &PageContext<'_>) {
    let geometry = ctx.geometry;
    let class = match geometry.positioning {
        Positioning::Fixed => "page-section",
        Positioning::Fluid => "page-section fluid",
    };
    w.indent();
    w.line(&format!(
        "<section id=\"{}\" class=\"{class}\" style=\"max-width: {}\">",
        escape_html(&page.slug),
        css::px(geometry.base_width)
    ));
    w.indent();
    w.line(&format!(
        "<div class=\"page-canvas\" style=\"height: {}\">",
        geometry.height(page.canvas_height)
    ));
    w.indent();
    let tree = RenderTree::build(page, Viewport::desktop(geometry.base_width));
    for node in &tree.nodes {
        write_node(w, node, ctx, false);
    }
    w.dedent();
    w.line("</div>");
    w.dedent();
    w.line("</section>");
    w.dedent();
}

fn write_node(w: &mut SourceWriter, node: &RenderNode, ctx: &PageContext<'_>, in_group: bool) {
    let Some(component) = ctx.components.get(node.id.as_str()).copied() else {
        return;
    };
    let pointer_events = if node.is_group() {
        Some(PointerEvents::None)
    } else if in_group {
        Some(PointerEvents::Auto)
    } else {
        None
    };

    let mut declarations =
        css::component_declarations(component, node.z, ctx.geometry, pointer_events);
    let mut classes = vec![if node.is_group() {
        "group-component".to_string()
    } else {
        component_class(&component.kind)
    }];
    if let Some(animation) = &component.animation {
        if assets::is_known_animation(&animation.name) {
            classes.push(format!("animate-{}", animation.name));
            classes.push("reveal".to_string());
            declarations.extend(css::animation_timing(animation));
        } else {
            debug!(id = %component.id, animation = %animation.name, "skipping unknown animation");
        }
    }

    let mut attrs = format!(
        " class=\"{}\" style=\"{}\"",
        classes.join(" "),
        escape_html(&declarations.to_css())
    );
    if let Some(href) = component
        .link_to_page_id
        .as_deref()
        .and_then(|id| ctx.links.get(id))
    {
        let _ = write!(attrs, " data-link=\"{}\"", escape_html(href));
    }

    if node.is_group() {
        w.line(&format!("<div{attrs}>"));
        w.indent();
        for child in &node.children {
            write_node(w, child, ctx, true);
        }
        w.dedent();
        w.line("</div>");
        return;
    }

    let content = escape_html(component.content.as_deref().unwrap_or_default());
    let src = escape_html(component.src.as_deref().unwrap_or_default());
    let markup = match &component.kind {
        ComponentKind::Button => {
            let label = if content.is_empty() {
                "Button".to_string()
            } else {
                content
            };
            format!("<button type=\"button\"{attrs}>{label}</button>")
        }
        ComponentKind::Image => format!(
            "<img src=\"{src}\" alt=\"{}\"{attrs}>",
            escape_html(&component.name)
        ),
        ComponentKind::Input => format!(
            "<input type=\"text\" placeholder=\"{}\"{attrs}>",
            escape_html(component.placeholder.as_deref().unwrap_or_default())
        ),
        ComponentKind::Video => {
            format!("<video controls{attrs}><source src=\"{src}\"></video>")
        }
        ComponentKind::Divider => format!("<hr{attrs}>"),
        _ => format!("<div{attrs}>{content}</div>"),
    };
    w.line(&markup);
}
