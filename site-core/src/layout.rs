//! Style resolution rules shared by the canvas renderer and every exporter.
//!
//! Everything that decides where and how a component appears (stacking order,
//! content alignment, responsive scaling, overflow detection) lives here so
//! that the editor preview and all generated artifacts agree exactly.

use serde::{Deserialize, Serialize};

use crate::component::{Component, ComponentKind, TextAlign};

/// Reference width in which all component geometry is authored.
pub const BASE_CANVAS_WIDTH: f64 = 1440.0;

/// Canvas widths below this are treated as corrupt and replaced by [`BASE_CANVAS_WIDTH`].
pub const MIN_CANVAS_WIDTH: f64 = 300.0;

/// Default page height for new pages.
pub const DEFAULT_CANVAS_HEIGHT: f64 = 1200.0;

/// Scaled heights never drop below this fraction of the authored height.
pub const MIN_HEIGHT_RATIO: f64 = 0.5;

/// Scaled font sizes never drop below this fraction of the authored size.
pub const MIN_FONT_RATIO: f64 = 0.5;

/// Gap kept between a fixed-up component and the viewport edge.
pub const OVERFLOW_MARGIN: f64 = 20.0;

/// Narrowest width an in-place overflow fix may produce.
pub const MIN_FIT_WIDTH: f64 = 50.0;

/// Axis-aligned rectangle in canvas units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

impl Rect {
    /// Create a rectangle.
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge.
    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// The rectangle moved by the given offset.
    #[must_use]
    pub fn translate(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// Smallest rectangle containing every input rectangle.
    ///
    /// Returns `None` for an empty input.
    pub fn bounding<I>(rects: I) -> Option<Self>
    where
        I: IntoIterator<Item = Self>,
    {
        let mut iter = rects.into_iter();
        let first = iter.next()?;
        let (mut min_x, mut min_y) = (first.x, first.y);
        let (mut max_x, mut max_y) = (first.right(), first.bottom());
        for rect in iter {
            min_x = min_x.min(rect.x);
            min_y = min_y.min(rect.y);
            max_x = max_x.max(rect.right());
            max_y = max_y.max(rect.bottom());
        }
        Some(Self::new(min_x, min_y, max_x - min_x, max_y - min_y))
    }
}

/// Device class used for responsive previews.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PreviewMode {
    /// Full design width, no scaling.
    #[default]
    Desktop,
    /// 768-unit viewport.
    Tablet,
    /// 375-unit viewport.
    Mobile,
}

impl PreviewMode {
    /// Nominal viewport width for the mode, `None` for desktop (uses the canvas width).
    #[must_use]
    pub const fn viewport_width(self) -> Option<f64> {
        match self {
            Self::Desktop => None,
            Self::Tablet => Some(768.0),
            Self::Mobile => Some(375.0),
        }
    }
}

/// A view onto the canvas: how wide it is compared to the authoring width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Visible width.
    pub width: f64,
    /// Authoring width all geometry is stored in.
    pub base_width: f64,
    /// Whether responsive scaling rules apply.
    pub responsive: bool,
}

impl Viewport {
    /// Unscaled view at the authoring width.
    #[must_use]
    pub const fn desktop(base_width: f64) -> Self {
        Self {
            width: base_width,
            base_width,
            responsive: false,
        }
    }

    /// View for a preview mode.
    #[must_use]
    pub fn for_mode(mode: PreviewMode, base_width: f64) -> Self {
        match mode.viewport_width() {
            Some(width) => Self::custom(width, base_width),
            None => Self::desktop(base_width),
        }
    }

    /// Arbitrary viewport width.
    #[must_use]
    pub fn custom(width: f64, base_width: f64) -> Self {
        Self {
            width,
            base_width,
            responsive: (width - base_width).abs() > f64::EPSILON,
        }
    }

    /// Ratio between visible and authoring width.
    #[must_use]
    pub fn scale(&self) -> f64 {
        if self.base_width > 0.0 {
            self.width / self.base_width
        } else {
            1.0
        }
    }

    /// Scale a horizontal length or position.
    #[must_use]
    pub fn scale_length(&self, value: f64) -> f64 {
        if self.responsive {
            value * self.scale()
        } else {
            value
        }
    }

    /// Scale a height, clamped so it never shrinks below half its authored size.
    #[must_use]
    pub fn scale_height(&self, value: f64) -> f64 {
        if self.responsive {
            (value * self.scale()).max(value * MIN_HEIGHT_RATIO)
        } else {
            value
        }
    }

    /// Scale a font size, clamped between half and all of its authored size.
    #[must_use]
    pub fn scale_font(&self, value: f64) -> f64 {
        if self.responsive {
            (value * self.scale()).clamp(value * MIN_FONT_RATIO, value)
        } else {
            value
        }
    }

    /// Scale a rectangle: positions and widths linearly, heights clamped.
    #[must_use]
    pub fn scale_rect(&self, rect: Rect) -> Rect {
        Rect::new(
            self.scale_length(rect.x),
            self.scale_length(rect.y),
            self.scale_length(rect.width),
            self.scale_height(rect.height),
        )
    }
}

/// Replace a missing or implausibly small canvas width with the base width.
#[must_use]
pub fn normalize_canvas_width(width: Option<f64>) -> f64 {
    match width {
        Some(w) if w.is_finite() && w >= MIN_CANVAS_WIDTH => w,
        _ => BASE_CANVAS_WIDTH,
    }
}

/// Express a base-canvas length as a percentage of the authoring width.
#[must_use]
pub fn percent_of_base(value: f64, base_width: f64) -> f64 {
    if base_width > 0.0 {
        value / base_width * 100.0
    } else {
        0.0
    }
}

/// Stacking level of a component at `index` within its sibling list.
#[must_use]
pub fn paint_z(index: usize, component: &Component) -> i64 {
    i64::try_from(index).unwrap_or(i64::MAX) + i64::from(component.styles.z_offset())
}

/// A component paired with its resolved stacking level.
#[derive(Debug, Clone, Copy)]
pub struct Painted<'a> {
    /// The component.
    pub component: &'a Component,
    /// Position within its sibling list.
    pub index: usize,
    /// Effective stacking level.
    pub z: i64,
}

/// Root-level components in document order with their stacking levels.
///
/// Indices count every root-level component, visible or not, so hiding a
/// component never reshuffles the others.
#[must_use]
pub fn root_paint_order(components: &[Component]) -> Vec<Painted<'_>> {
    painted(components.iter().filter(|c| c.is_root()))
}

/// Children of `parent_id` in document order with their local stacking levels.
#[must_use]
pub fn children_paint_order<'a>(components: &'a [Component], parent_id: &str) -> Vec<Painted<'a>> {
    painted(
        components
            .iter()
            .filter(|c| c.parent_id.as_ref().is_some_and(|p| p == parent_id)),
    )
}

fn painted<'a, I>(siblings: I) -> Vec<Painted<'a>>
where
    I: Iterator<Item = &'a Component>,
{
    siblings
        .enumerate()
        .map(|(index, component)| Painted {
            component,
            index,
            z: paint_z(index, component),
        })
        .collect()
}

/// Sort painted components bottom-to-top; ties keep document order.
#[must_use]
pub fn stacking_order<'a>(mut painted: Vec<Painted<'a>>) -> Vec<Painted<'a>> {
    painted.sort_by_key(|p| (p.z, p.index));
    painted
}

/// Vertical placement of a component's content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalAlign {
    /// Content starts at the top edge.
    Top,
    /// Content is vertically centered.
    Center,
}

/// Horizontal placement of a component's content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HorizontalAlign {
    /// Flush left.
    Start,
    /// Centered.
    Center,
    /// Flush right.
    End,
}

/// Resolved content alignment for a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentAlignment {
    /// Vertical placement.
    pub vertical: VerticalAlign,
    /// Horizontal placement.
    pub horizontal: HorizontalAlign,
}

impl ContentAlignment {
    /// Buttons center both axes; everything else is top-aligned and follows `textAlign`.
    #[must_use]
    pub fn resolve(component: &Component) -> Self {
        if component.kind == ComponentKind::Button {
            return Self {
                vertical: VerticalAlign::Center,
                horizontal: HorizontalAlign::Center,
            };
        }
        let horizontal = match component.styles.text_align.unwrap_or_default() {
            TextAlign::Center => HorizontalAlign::Center,
            TextAlign::Right => HorizontalAlign::End,
            TextAlign::Left | TextAlign::Justify => HorizontalAlign::Start,
        };
        Self {
            vertical: VerticalAlign::Top,
            horizontal,
        }
    }

    /// CSS `align-items` value.
    #[must_use]
    pub const fn align_items(&self) -> &'static str {
        match self.vertical {
            VerticalAlign::Top => "flex-start",
            VerticalAlign::Center => "center",
        }
    }

    /// CSS `justify-content` value.
    #[must_use]
    pub const fn justify_content(&self) -> &'static str {
        match self.horizontal {
            HorizontalAlign::Start => "flex-start",
            HorizontalAlign::Center => "center",
            HorizontalAlign::End => "flex-end",
        }
    }
}

/// Page-absolute rectangle of a component, composing every ancestor group offset.
///
/// Dangling parent references end the walk, as does a cycle.
#[must_use]
pub fn absolute_rect(components: &[Component], component: &Component) -> Rect {
    let mut rect = component.rect();
    let mut parent = component.parent_id.as_ref();
    let mut hops = 0;
    while let Some(parent_id) = parent {
        if hops >= components.len() {
            break;
        }
        let Some(group) = components.iter().find(|c| &c.id == parent_id) else {
            break;
        };
        rect = rect.translate(group.styles.x, group.styles.y);
        parent = group.parent_id.as_ref();
        hops += 1;
    }
    rect
}

/// Whether a page-absolute rectangle sticks out past the viewport's right edge.
#[must_use]
pub fn overflows(rect: Rect, viewport_width: f64) -> bool {
    rect.right() > viewport_width
}

/// Geometry change that brings an overflowing component back inside the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OverflowFix {
    /// Keep the position, narrow the component.
    Shrink {
        /// New width.
        width: f64,
    },
    /// Move to the left margin and narrow to the viewport minus both margins.
    Relocate {
        /// New page-absolute x.
        x: f64,
        /// New width.
        width: f64,
    },
}

/// Compute the fix for a page-absolute rectangle, `None` if it already fits.
#[must_use]
pub fn overflow_fix(rect: Rect, viewport_width: f64) -> Option<OverflowFix> {
    if !overflows(rect, viewport_width) {
        return None;
    }
    let fitted = viewport_width - rect.x - OVERFLOW_MARGIN;
    if fitted > MIN_FIT_WIDTH {
        Some(OverflowFix::Shrink { width: fitted })
    } else {
        Some(OverflowFix::Relocate {
            x: OVERFLOW_MARGIN,
            width: viewport_width - 2.0 * OVERFLOW_MARGIN,
        })
    }
}

/// Format a number for CSS or source output: at most two decimals, no trailing zeros.
#[must_use]
pub fn format_number(value: f64) -> String {
    format_decimal(value, 2)
}

/// Format a number with at most `places` decimals, trimming trailing zeros.
#[must_use]
pub fn format_decimal(value: f64, places: usize) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    let text = format!("{value:.places$}");
    let text = if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text.as_str()
    };
    if text.parse::<f64>().is_ok_and(|v| v == 0.0) {
        "0".to_string()
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(id: &str) -> Component {
        Component::new(id, ComponentKind::Text).with_geometry(0.0, 0.0, 10.0, 10.0)
    }

    fn order(components: &[Component]) -> Vec<String> {
        stacking_order(root_paint_order(components))
            .iter()
            .map(|p| p.component.id.to_string())
            .collect()
    }

    #[test]
    fn test_array_order_is_paint_order() {
        let components = vec![text("a"), text("b"), text("c")];
        assert_eq!(order(&components), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_z_offset_lifts_component() {
        let mut a = text("a");
        a.styles.z_index = Some(10);
        let components = vec![a, text("b"), text("c")];
        assert_eq!(order(&components), vec!["b", "c", "a"]);
    }

    #[test]
    fn test_children_are_excluded_from_root_order() {
        let mut child = text("child");
        child.parent_id = Some("group".into());
        let components = vec![text("a"), child, text("group")];

        let root = root_paint_order(&components);
        assert_eq!(root.len(), 2);
        assert_eq!(root[1].component.id, "group");
        assert_eq!(root[1].z, 1);

        let children = children_paint_order(&components, "group");
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].z, 0);
    }

    #[test]
    fn test_button_centers_both_axes() {
        let mut button = Component::new("b", ComponentKind::Button);
        button.styles.text_align = Some(TextAlign::Right);
        let align = ContentAlignment::resolve(&button);
        assert_eq!(align.align_items(), "center");
        assert_eq!(align.justify_content(), "center");
    }

    #[test]
    fn test_text_alignment_follows_text_align() {
        let mut component = text("t");
        assert_eq!(ContentAlignment::resolve(&component).justify_content(), "flex-start");
        component.styles.text_align = Some(TextAlign::Right);
        let align = ContentAlignment::resolve(&component);
        assert_eq!(align.justify_content(), "flex-end");
        assert_eq!(align.align_items(), "flex-start");
    }

    #[test]
    fn test_desktop_viewport_is_identity() {
        let viewport = Viewport::for_mode(PreviewMode::Desktop, BASE_CANVAS_WIDTH);
        assert!((viewport.scale_height(333.0) - 333.0).abs() < f64::EPSILON);
        assert!((viewport.scale_font(17.0) - 17.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_mobile_height_is_clamped() {
        let viewport = Viewport::for_mode(PreviewMode::Mobile, BASE_CANVAS_WIDTH);
        let scaled = viewport.scale_height(400.0);
        assert!((scaled - 200.0).abs() < f64::EPSILON);
        assert!((viewport.scale_length(1440.0) - 375.0).abs() < 1e-9);
    }

    #[test]
    fn test_font_clamped_between_half_and_full() {
        let mobile = Viewport::for_mode(PreviewMode::Mobile, BASE_CANVAS_WIDTH);
        assert!((mobile.scale_font(40.0) - 20.0).abs() < f64::EPSILON);

        let wide = Viewport::custom(2880.0, BASE_CANVAS_WIDTH);
        assert!((wide.scale_font(40.0) - 40.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_bounding_box() {
        let rect = Rect::bounding([
            Rect::new(0.0, 0.0, 100.0, 100.0),
            Rect::new(200.0, 200.0, 50.0, 50.0),
        ])
        .expect("non-empty");
        assert_eq!(rect, Rect::new(0.0, 0.0, 250.0, 250.0));
        assert!(Rect::bounding(std::iter::empty()).is_none());
    }

    #[test]
    fn test_absolute_rect_composes_group_offsets() {
        let group = Component::new("g", ComponentKind::Container).with_geometry(100.0, 50.0, 300.0, 300.0);
        let mut child = text("c").with_geometry(10.0, 20.0, 30.0, 40.0);
        child.parent_id = Some("g".into());
        let components = vec![child.clone(), group];

        let rect = absolute_rect(&components, &child);
        assert_eq!(rect, Rect::new(110.0, 70.0, 30.0, 40.0));
    }

    #[test]
    fn test_absolute_rect_survives_cycles() {
        let mut a = text("a").with_geometry(1.0, 1.0, 1.0, 1.0);
        let mut b = text("b").with_geometry(1.0, 1.0, 1.0, 1.0);
        a.parent_id = Some("b".into());
        b.parent_id = Some("a".into());
        let components = vec![a.clone(), b];
        let rect = absolute_rect(&components, &a);
        assert!(rect.x.is_finite());
    }

    #[test]
    fn test_overflow_fix_shrinks_or_relocates() {
        let shrink = overflow_fix(Rect::new(100.0, 0.0, 400.0, 10.0), 375.0);
        assert_eq!(shrink, Some(OverflowFix::Shrink { width: 255.0 }));

        let relocate = overflow_fix(Rect::new(340.0, 0.0, 100.0, 10.0), 375.0);
        assert_eq!(
            relocate,
            Some(OverflowFix::Relocate {
                x: 20.0,
                width: 335.0
            })
        );

        assert!(overflow_fix(Rect::new(0.0, 0.0, 375.0, 10.0), 375.0).is_none());
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(10.0), "10");
        assert_eq!(format_number(0.30000000000000004), "0.3");
        assert_eq!(format_number(6.944_444), "6.94");
        assert_eq!(format_number(-0.001), "0");
        assert_eq!(format_number(f64::NAN), "0");
        assert_eq!(format_decimal(0.694_444_4, 4), "0.6944");
        assert_eq!(format_decimal(100.0, 4), "100");
    }
}
