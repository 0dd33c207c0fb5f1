//! Built-in starter designs.

use serde::Serialize;

use crate::component::{Component, ComponentKind, Styles, TextAlign};

/// A named starter design for one page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Template {
    /// Display name, also used as the lookup key.
    pub name: &'static str,
    /// One-line description.
    pub description: &'static str,
    /// Components installed by the template.
    pub components: Vec<Component>,
}

/// Every built-in template, in presentation order.
#[must_use]
pub fn all() -> Vec<Template> {
    vec![blank_canvas(), landing_page(), portfolio()]
}

/// Look up a template by name, ignoring ASCII case.
#[must_use]
pub fn find(name: &str) -> Option<Template> {
    all().into_iter().find(|t| t.name.eq_ignore_ascii_case(name))
}

fn blank_canvas() -> Template {
    Template {
        name: "Blank Canvas",
        description: "Start from scratch with an empty canvas.",
        components: Vec::new(),
    }
}

fn landing_page() -> Template {
    let hero = container("hero-bg", "Hero Section", (0.0, 0.0, 1440.0, 600.0), "#111827", 0);

    let mut title = text("hero-title", "Hero Title", "Build Your Dream Website", (370.0, 200.0, 700.0, 80.0), 64.0, "#ffffff");
    title.styles.font_weight = Some("bold".to_string());
    title.styles.text_align = Some(TextAlign::Center);

    let mut subtitle = text(
        "hero-sub",
        "Hero Subtitle",
        "Drag, drop, and customize to perfection.",
        (420.0, 300.0, 600.0, 40.0),
        24.0,
        "#9ca3af",
    );
    subtitle.styles.text_align = Some(TextAlign::Center);

    let mut button = Component::new("hero-btn", ComponentKind::Button)
        .with_name("CTA Button")
        .with_content("Get Started")
        .with_styles(styles((645.0, 380.0, 150.0, 50.0), 1));
    button.styles.background_color = Some("#7c3aed".to_string());
    button.styles.text_color = Some("#ffffff".to_string());
    button.styles.border_radius = Some(8.0);

    Template {
        name: "Simple Landing Page",
        description: "A standard landing page with hero section and features.",
        components: vec![hero, title, subtitle, button],
    }
}

fn portfolio() -> Template {
    let mut nav = container("nav-bg", "Navigation", (0.0, 0.0, 1440.0, 80.0), "#ffffff", 10);
    nav.styles.box_shadow = Some("0 4px 6px -1px rgba(0, 0, 0, 0.1)".to_string());

    let mut logo = text("logo", "Logo", "PORTFOLIO", (40.0, 25.0, 200.0, 30.0), 24.0, "#000000");
    logo.styles.font_weight = Some("bold".to_string());
    logo.styles.z_index = Some(11);

    let mut header = text("header", "Header", "My Recent Work", (100.0, 150.0, 500.0, 60.0), 48.0, "#1f2937");
    header.styles.font_weight = Some("bold".to_string());

    let mut components = vec![nav, logo, header];
    for (n, x) in [(1, 100.0), (2, 520.0), (3, 940.0)] {
        let mut card = container(
            &format!("card-{n}"),
            &format!("Project Card {n}"),
            (x, 250.0, 380.0, 300.0),
            "#f3f4f6",
            1,
        );
        card.styles.border_radius = Some(12.0);
        components.push(card);
    }

    Template {
        name: "Portfolio",
        description: "Showcase your work with this clean layout.",
        components,
    }
}

type Geometry = (f64, f64, f64, f64);

fn styles((x, y, width, height): Geometry, z_index: i32) -> Styles {
    let mut styles = Styles::with_geometry(x, y, width, height);
    styles.z_index = Some(z_index);
    styles
}

fn container(id: &str, name: &str, geometry: Geometry, background: &str, z_index: i32) -> Component {
    let mut component = Component::new(id, ComponentKind::Container)
        .with_name(name)
        .with_styles(styles(geometry, z_index));
    component.styles.background_color = Some(background.to_string());
    component
}

fn text(id: &str, name: &str, content: &str, geometry: Geometry, font_size: f64, color: &str) -> Component {
    let mut component = Component::new(id, ComponentKind::Text)
        .with_name(name)
        .with_content(content)
        .with_styles(styles(geometry, 1));
    component.styles.font_size = Some(font_size);
    component.styles.text_color = Some(color.to_string());
    component
}
