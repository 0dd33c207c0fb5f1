//! Style declarations shared by the HTML and React emitters.
//!
//! A component's styles resolve to an ordered list of CSS declarations once;
//! the HTML emitter prints them as an inline `style` attribute and the React
//! emitter prints the same list as a camelCased style object.

use site_core::layout::{
    format_decimal, format_number, percent_of_base, MIN_FONT_RATIO, MIN_HEIGHT_RATIO,
};
use site_core::{Animation, Component, ComponentKind, ContentAlignment, PointerEvents};

/// How geometry is expressed in the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Positioning {
    /// Absolute pixels, exactly as designed.
    Fixed,
    /// Container-query units relative to the design width, clamped like the
    /// canvas preview.
    #[default]
    Fluid,
}

/// Converts design-space lengths into CSS values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    /// Length strategy.
    pub positioning: Positioning,
    /// Design width all fluid values are relative to.
    pub base_width: f64,
}

impl Geometry {
    /// Pixel geometry.
    #[must_use]
    pub const fn fixed(base_width: f64) -> Self {
        Self {
            positioning: Positioning::Fixed,
            base_width,
        }
    }

    /// Fluid geometry.
    #[must_use]
    pub const fn fluid(base_width: f64) -> Self {
        Self {
            positioning: Positioning::Fluid,
            base_width,
        }
    }

    /// Horizontal lengths and positions scale linearly.
    #[must_use]
    pub fn length(&self, value: f64) -> String {
        match self.positioning {
            Positioning::Fixed => px(value),
            Positioning::Fluid => self.cqw(value),
        }
    }

    /// Heights never drop below half the designed value.
    #[must_use]
    pub fn height(&self, value: f64) -> String {
        match self.positioning {
            Positioning::Fixed => px(value),
            Positioning::Fluid => {
                format!("max({}, {})", self.cqw(value), px(value * MIN_HEIGHT_RATIO))
            }
        }
    }

    /// Fonts stay between half and the full designed size.
    #[must_use]
    pub fn font_size(&self, value: f64) -> String {
        match self.positioning {
            Positioning::Fixed => px(value),
            Positioning::Fluid => format!(
                "clamp({}, {}, {})",
                px(value * MIN_FONT_RATIO),
                self.cqw(value),
                px(value)
            ),
        }
    }

    fn cqw(&self, value: f64) -> String {
        format!(
            "{}cqw",
            format_decimal(percent_of_base(value, self.base_width), 4)
        )
    }
}

/// A pixel value.
#[must_use]
pub fn px(value: f64) -> String {
    format!("{}px", format_number(value))
}

/// Ordered CSS declarations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Declarations {
    entries: Vec<(&'static str, String)>,
}

impl Declarations {
    /// Empty declaration list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a declaration.
    pub fn push(&mut self, property: &'static str, value: impl Into<String>) -> &mut Self {
        self.entries.push((property, value.into()));
        self
    }

    /// Append every declaration of `other`.
    pub fn extend(&mut self, other: Self) {
        self.entries.extend(other.entries);
    }

    /// Value of the last declaration for `property`.
    #[must_use]
    pub fn get(&self, property: &str) -> Option<&str> {
        self.entries
            .iter()
            .rev()
            .find(|(p, _)| *p == property)
            .map(|(_, v)| v.as_str())
    }

    /// Number of declarations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no declarations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `property: value; ...` for a `style` attribute.
    #[must_use]
    pub fn to_css(&self) -> String {
        self.entries
            .iter()
            .map(|(p, v)| format!("{p}: {v}"))
            .collect::<Vec<_>>()
            .join("; ")
    }

    /// `{ camelProperty: 'value', ... }` for a JSX `style` prop.
    #[must_use]
    pub fn to_style_object(&self) -> String {
        if self.entries.is_empty() {
            return "{}".to_string();
        }
        let body = self
            .entries
            .iter()
            .map(|(p, v)| format!("{}: {}", camel_case(p), js_string(v)))
            .collect::<Vec<_>>()
            .join(", ");
        format!("{{ {body} }}")
    }
}

/// `font-size` → `fontSize`.
#[must_use]
pub fn camel_case(property: &str) -> String {
    let mut out = String::with_capacity(property.len());
    let mut upper = false;
    for ch in property.chars() {
        if ch == '-' {
            upper = true;
        } else if upper {
            out.extend(ch.to_uppercase());
            upper = false;
        } else {
            out.push(ch);
        }
    }
    out
}

/// Single-quoted JavaScript string literal.
#[must_use]
pub fn js_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '<' => out.push_str("\\u003c"),
            _ => out.push(ch),
        }
    }
    out.push('\'');
    out
}

/// Replaced elements lay out their own content and take no flex wrapper.
#[must_use]
pub fn uses_flex(kind: &ComponentKind) -> bool {
    !matches!(
        kind,
        ComponentKind::Image | ComponentKind::Video | ComponentKind::Input | ComponentKind::Divider
    )
}

/// Placement, stacking and visual declarations of one component.
///
/// `pointer_events` is set for group wrappers and their members only.
#[must_use]
pub fn component_declarations(
    component: &Component,
    z: i64,
    geometry: Geometry,
    pointer_events: Option<PointerEvents>,
) -> Declarations {
    let styles = &component.styles;
    let mut d = Declarations::new();
    d.push("position", "absolute")
        .push("left", geometry.length(styles.x))
        .push("top", geometry.length(styles.y))
        .push("width", geometry.length(styles.width))
        .push("height", geometry.height(styles.height))
        .push("z-index", z.to_string());

    if uses_flex(&component.kind) {
        let alignment = ContentAlignment::resolve(component);
        d.push("display", "flex")
            .push("align-items", alignment.align_items())
            .push("justify-content", alignment.justify_content());
    }

    if let Some(color) = &styles.background_color {
        d.push("background-color", color.clone());
    }
    if let Some(image) = &styles.background_image {
        d.push("background-image", background_image(image))
            .push("background-size", "cover")
            .push("background-position", "center");
    }
    if let Some(color) = &styles.text_color {
        d.push("color", color.clone());
    }
    if let Some(size) = styles.font_size {
        d.push("font-size", geometry.font_size(size));
    }
    if let Some(family) = &styles.font_family {
        d.push("font-family", family.clone());
    }
    if let Some(weight) = &styles.font_weight {
        d.push("font-weight", weight.clone());
    }
    if let Some(style) = styles.font_style {
        d.push("font-style", style.as_css());
    }
    if let Some(decoration) = styles.text_decoration {
        d.push("text-decoration", decoration.as_css());
    }
    if let Some(align) = styles.text_align {
        d.push("text-align", align.as_css());
    }
    if let Some(line_height) = styles.line_height {
        d.push("line-height", format_number(line_height));
    }
    if let Some(spacing) = styles.letter_spacing {
        d.push("letter-spacing", px(spacing));
    }
    if let Some(padding) = styles.padding {
        d.push("padding", px(padding));
    }
    if let Some(radius) = styles.border_radius {
        d.push("border-radius", px(radius));
    }
    if let Some(width) = styles.border_width.filter(|w| *w > 0.0) {
        let style = styles.border_style.unwrap_or_default().as_css();
        let color = styles.border_color.as_deref().unwrap_or("#000");
        d.push("border", format!("{} {style} {color}", px(width)));
    }
    if let Some(opacity) = styles.opacity {
        d.push("opacity", format_number(opacity));
    }
    if let Some(shadow) = &styles.box_shadow {
        d.push("box-shadow", shadow.clone());
    }
    if let Some(rotation) = styles.rotation.filter(|r| r.abs() > f64::EPSILON) {
        d.push("transform", format!("rotate({}deg)", format_number(rotation)));
    }
    if let Some(policy) = pointer_events {
        d.push("pointer-events", policy.as_css());
    }
    d
}

/// Timing longhands; the animation name comes from the `animate-*` class.
#[must_use]
pub fn animation_timing(animation: &Animation) -> Declarations {
    let mut d = Declarations::new();
    d.push("animation-duration", seconds(animation.duration))
        .push("animation-delay", seconds(animation.delay))
        .push("animation-iteration-count", animation.iteration_count());
    d
}

/// Complete `animation` shorthand for targets without the class library.
#[must_use]
pub fn animation_shorthand(animation: &Animation) -> String {
    format!(
        "{} {} ease {} {} both",
        animation.name,
        seconds(animation.duration),
        seconds(animation.delay),
        animation.iteration_count()
    )
}

fn seconds(value: f64) -> String {
    format!("{}s", format_number(value))
}

fn background_image(value: &str) -> String {
    if value.contains('(') {
        value.to_string()
    } else {
        format!("url('{}')", value.replace('\'', "%27"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use site_core::{BorderStyle, TextAlign};

    fn text() -> Component {
        Component::new("t", ComponentKind::Text).with_geometry(144.0, 72.0, 720.0, 100.0)
    }

    #[test]
    fn test_fixed_geometry_in_pixels() {
        let d = component_declarations(&text(), 3, Geometry::fixed(1440.0), None);
        assert_eq!(d.get("left"), Some("144px"));
        assert_eq!(d.get("width"), Some("720px"));
        assert_eq!(d.get("height"), Some("100px"));
        assert_eq!(d.get("z-index"), Some("3"));
        assert!(d.get("pointer-events").is_none());
    }

    #[test]
    fn test_fluid_geometry_is_relative_to_base() {
        let d = component_declarations(&text(), 0, Geometry::fluid(1440.0), None);
        assert_eq!(d.get("left"), Some("10cqw"));
        assert_eq!(d.get("top"), Some("5cqw"));
        assert_eq!(d.get("width"), Some("50cqw"));
        assert_eq!(d.get("height"), Some("max(6.9444cqw, 50px)"));
    }

    #[test]
    fn test_fluid_font_is_clamped() {
        let mut component = text();
        component.styles.font_size = Some(48.0);
        let d = component_declarations(&component, 0, Geometry::fluid(1440.0), None);
        assert_eq!(d.get("font-size"), Some("clamp(24px, 3.3333cqw, 48px)"));
    }

    #[test]
    fn test_button_alignment_is_centered() {
        let button = Component::new("b", ComponentKind::Button);
        let d = component_declarations(&button, 0, Geometry::fixed(1440.0), None);
        assert_eq!(d.get("align-items"), Some("center"));
        assert_eq!(d.get("justify-content"), Some("center"));

        let mut label = text();
        label.styles.text_align = Some(TextAlign::Right);
        let d = component_declarations(&label, 0, Geometry::fixed(1440.0), None);
        assert_eq!(d.get("align-items"), Some("flex-start"));
        assert_eq!(d.get("justify-content"), Some("flex-end"));
    }

    #[test]
    fn test_image_has_no_flex_wrapper() {
        let image = Component::new("i", ComponentKind::Image);
        let d = component_declarations(&image, 0, Geometry::fixed(1440.0), None);
        assert!(d.get("display").is_none());
    }

    #[test]
    fn test_literal_visual_values() {
        let mut component = text();
        component.styles.border_width = Some(2.0);
        component.styles.border_style = Some(BorderStyle::Dashed);
        component.styles.rotation = Some(15.0);
        component.styles.opacity = Some(0.5);
        component.styles.border_radius = Some(8.0);
        let d = component_declarations(&component, 0, Geometry::fluid(375.0), None);
        assert_eq!(d.get("border"), Some("2px dashed #000"));
        assert_eq!(d.get("transform"), Some("rotate(15deg)"));
        assert_eq!(d.get("opacity"), Some("0.5"));
        assert_eq!(d.get("border-radius"), Some("8px"));
    }

    #[test]
    fn test_style_object_is_camel_cased() {
        let mut d = Declarations::new();
        d.push("font-size", "16px").push("z-index", "2");
        assert_eq!(d.to_style_object(), "{ fontSize: '16px', zIndex: '2' }");
        assert_eq!(d.to_css(), "font-size: 16px; z-index: 2");
    }

    #[test]
    fn test_js_string_escapes() {
        assert_eq!(js_string("it's"), "'it\\'s'");
        assert_eq!(js_string("</script>"), "'\\u003c/script>'");
    }

    #[test]
    fn test_animation_values() {
        let mut animation = Animation::new("fade-in-up");
        animation.delay = 0.25;
        animation.infinite = true;
        assert_eq!(
            animation_shorthand(&animation),
            "fade-in-up 1s ease 0.25s infinite both"
        );
        let d = animation_timing(&animation);
        assert_eq!(d.get("animation-iteration-count"), Some("infinite"));
    }
}
