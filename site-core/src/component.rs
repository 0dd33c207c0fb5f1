//! Components - the placeable building blocks of a page.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::layout::Rect;

/// Unique identifier for a component.
///
/// Identifiers are opaque strings. Generated identifiers take the form
/// `<type>-<suffix>`, but any string read from a design document is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentId(String);

impl ComponentId {
    /// Create an identifier from an existing string.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh identifier for a component of the given kind.
    #[must_use]
    pub fn generate(kind: &ComponentKind) -> Self {
        Self::with_prefix(kind.as_str())
    }

    /// Generate a fresh identifier of the form `<prefix>-<suffix>`.
    #[must_use]
    pub fn with_prefix(prefix: &str) -> Self {
        let suffix = Uuid::new_v4().simple().to_string();
        Self(format!("{prefix}-{}", &suffix[..12]))
    }

    /// Borrow the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ComponentId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ComponentId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl PartialEq<str> for ComponentId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ComponentId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// The kind of element a component represents.
///
/// The core kinds drive tag selection and content interpretation in the
/// renderer and exporters. Any other tag (card, navbar, table, ...) is kept
/// verbatim in [`ComponentKind::Other`] so documents round-trip unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ComponentKind {
    /// Generic box; also used for synthetic groups.
    Container,
    /// Text block.
    Text,
    /// Clickable button, optionally linked to another page.
    Button,
    /// Image from `src`.
    Image,
    /// Video from `src`.
    Video,
    /// Single-line text input.
    Input,
    /// Horizontal rule.
    Divider,
    /// Decorative shape.
    Shape,
    /// Icon glyph.
    Icon,
    /// Higher-level composite kind (card, navbar, table, ...).
    Other(String),
}

impl ComponentKind {
    /// The type tag as written in design documents.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Container => "container",
            Self::Text => "text",
            Self::Button => "button",
            Self::Image => "image",
            Self::Video => "video",
            Self::Input => "input",
            Self::Divider => "divider",
            Self::Shape => "shape",
            Self::Icon => "icon",
            Self::Other(tag) => tag,
        }
    }
}

impl From<String> for ComponentKind {
    fn from(value: String) -> Self {
        match value.as_str() {
            "container" => Self::Container,
            "text" => Self::Text,
            "button" => Self::Button,
            "image" => Self::Image,
            "video" => Self::Video,
            "input" => Self::Input,
            "divider" => Self::Divider,
            "shape" => Self::Shape,
            "icon" => Self::Icon,
            _ => Self::Other(value),
        }
    }
}

impl From<&str> for ComponentKind {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<ComponentKind> for String {
    fn from(kind: ComponentKind) -> Self {
        match kind {
            ComponentKind::Other(tag) => tag,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Font style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    /// Upright.
    Normal,
    /// Italic.
    Italic,
}

impl FontStyle {
    /// CSS keyword.
    #[must_use]
    pub const fn as_css(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Italic => "italic",
        }
    }
}

/// Text decoration line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextDecoration {
    /// No decoration.
    None,
    /// Underlined.
    Underline,
    /// Struck through.
    LineThrough,
}

impl TextDecoration {
    /// CSS keyword.
    #[must_use]
    pub const fn as_css(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Underline => "underline",
            Self::LineThrough => "line-through",
        }
    }
}

/// Border line style.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BorderStyle {
    /// Solid line.
    #[default]
    Solid,
    /// Dashed line.
    Dashed,
    /// Dotted line.
    Dotted,
}

impl BorderStyle {
    /// CSS keyword.
    #[must_use]
    pub const fn as_css(self) -> &'static str {
        match self {
            Self::Solid => "solid",
            Self::Dashed => "dashed",
            Self::Dotted => "dotted",
        }
    }
}

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    /// Left aligned.
    #[default]
    Left,
    /// Centered.
    Center,
    /// Right aligned.
    Right,
    /// Justified.
    Justify,
}

impl TextAlign {
    /// CSS keyword.
    #[must_use]
    pub const fn as_css(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
            Self::Justify => "justify",
        }
    }
}

/// Geometry and visual style of a component.
///
/// Geometry is stored in base-canvas units and is never rewritten by
/// responsive previews.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Styles {
    /// X position (units from the left edge of the page or parent group).
    pub x: f64,
    /// Y position (units from the top edge of the page or parent group).
    pub y: f64,
    /// Width in base-canvas units.
    pub width: f64,
    /// Height in base-canvas units.
    pub height: f64,
    /// Rotation in degrees.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    /// Background color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    /// Background image (CSS value).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_image: Option<String>,
    /// Text color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
    /// Font size in base-canvas units.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    /// Font family.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    /// Font weight keyword or number as text.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "string_or_number"
    )]
    pub font_weight: Option<String>,
    /// Font style.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_style: Option<FontStyle>,
    /// Text decoration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_decoration: Option<TextDecoration>,
    /// Border radius.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<f64>,
    /// Border width.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_width: Option<f64>,
    /// Border color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    /// Border style.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_style: Option<BorderStyle>,
    /// Uniform padding.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding: Option<f64>,
    /// Opacity between 0 and 1.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    /// Stacking offset added to the component's paint index.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z_index: Option<i32>,
    /// Horizontal text alignment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_align: Option<TextAlign>,
    /// Line height multiplier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_height: Option<f64>,
    /// Letter spacing in base-canvas units.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub letter_spacing: Option<f64>,
    /// Box shadow (CSS value).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub box_shadow: Option<String>,
    /// Style keys this version does not interpret, kept for round-trips.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Styles {
    /// Create styles with only geometry set.
    #[must_use]
    pub fn with_geometry(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
            ..Self::default()
        }
    }

    /// The component's box in its own coordinate space.
    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// Stacking offset, zero when unset.
    #[must_use]
    pub fn z_offset(&self) -> i32 {
        self.z_index.unwrap_or(0)
    }

    /// Apply a partial update, overwriting only the fields present in `patch`.
    pub fn merge(&mut self, patch: StylePatch) {
        macro_rules! set {
            ($($field:ident),* $(,)?) => {
                $(if let Some(value) = patch.$field { self.$field = value; })*
            };
        }
        macro_rules! set_opt {
            ($($field:ident),* $(,)?) => {
                $(if let Some(value) = patch.$field { self.$field = Some(value); })*
            };
        }

        set!(x, y, width, height);
        set_opt!(
            rotation,
            background_color,
            background_image,
            text_color,
            font_size,
            font_family,
            font_weight,
            font_style,
            text_decoration,
            border_radius,
            border_width,
            border_color,
            border_style,
            padding,
            opacity,
            z_index,
            text_align,
            line_height,
            letter_spacing,
            box_shadow,
        );
    }
}

/// A shallow partial update to [`Styles`]. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[allow(missing_docs)]
pub struct StylePatch {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub rotation: Option<f64>,
    pub background_color: Option<String>,
    pub background_image: Option<String>,
    pub text_color: Option<String>,
    pub font_size: Option<f64>,
    pub font_family: Option<String>,
    #[serde(deserialize_with = "string_or_number")]
    pub font_weight: Option<String>,
    pub font_style: Option<FontStyle>,
    pub text_decoration: Option<TextDecoration>,
    pub border_radius: Option<f64>,
    pub border_width: Option<f64>,
    pub border_color: Option<String>,
    pub border_style: Option<BorderStyle>,
    pub padding: Option<f64>,
    pub opacity: Option<f64>,
    pub z_index: Option<i32>,
    pub text_align: Option<TextAlign>,
    pub line_height: Option<f64>,
    pub letter_spacing: Option<f64>,
    pub box_shadow: Option<String>,
}

/// Entrance animation descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Animation {
    /// Named animation from the keyframe library (e.g. `fade-in-up`).
    #[serde(rename = "type")]
    pub name: String,
    /// Duration in seconds.
    #[serde(default = "Animation::default_duration")]
    pub duration: f64,
    /// Delay in seconds.
    #[serde(default)]
    pub delay: f64,
    /// Repeat forever instead of once.
    #[serde(default)]
    pub infinite: bool,
}

impl Animation {
    /// Create an animation that plays once with the default duration.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            duration: Self::default_duration(),
            delay: 0.0,
            infinite: false,
        }
    }

    const fn default_duration() -> f64 {
        1.0
    }

    /// CSS iteration count value.
    #[must_use]
    pub const fn iteration_count(&self) -> &'static str {
        if self.infinite {
            "infinite"
        } else {
            "1"
        }
    }
}

/// A placeable design element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Component {
    /// Unique identifier.
    pub id: ComponentId,
    /// Element kind.
    #[serde(rename = "type")]
    pub kind: ComponentKind,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Text payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Media URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    /// Form hint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    /// Geometry and visual style.
    pub styles: Styles,
    /// Entrance animation, absent for static components.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animation: Option<Animation>,
    /// Group this component belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<ComponentId>,
    /// Suppresses interactive move and resize.
    #[serde(default)]
    pub locked: bool,
    /// Suppresses rendering without deleting the component.
    #[serde(default = "Component::default_visible")]
    pub visible: bool,
    /// Page navigated to when the component is clicked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_to_page_id: Option<String>,
    /// Component keys this version does not interpret, kept for round-trips.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Component {
    /// Create a visible, unlocked component with zero geometry.
    #[must_use]
    pub fn new(id: impl Into<ComponentId>, kind: ComponentKind) -> Self {
        let name = default_name(&kind);
        Self {
            id: id.into(),
            kind,
            name,
            content: None,
            src: None,
            placeholder: None,
            styles: Styles::default(),
            animation: None,
            parent_id: None,
            locked: false,
            visible: true,
            link_to_page_id: None,
            extra: BTreeMap::new(),
        }
    }

    /// Create a component with a freshly generated identifier.
    #[must_use]
    pub fn with_generated_id(kind: ComponentKind) -> Self {
        let id = ComponentId::generate(&kind);
        Self::new(id, kind)
    }

    /// Set the geometry.
    #[must_use]
    pub fn with_geometry(mut self, x: f64, y: f64, width: f64, height: f64) -> Self {
        self.styles.x = x;
        self.styles.y = y;
        self.styles.width = width;
        self.styles.height = height;
        self
    }

    /// Replace the styles.
    #[must_use]
    pub fn with_styles(mut self, styles: Styles) -> Self {
        self.styles = styles;
        self
    }

    /// Set the display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the text payload.
    #[must_use]
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Set the media URL.
    #[must_use]
    pub fn with_src(mut self, src: impl Into<String>) -> Self {
        self.src = Some(src.into());
        self
    }

    /// Set the entrance animation.
    #[must_use]
    pub fn with_animation(mut self, animation: Animation) -> Self {
        self.animation = Some(animation);
        self
    }

    /// Set the navigation target.
    #[must_use]
    pub fn with_link(mut self, page_id: impl Into<String>) -> Self {
        self.link_to_page_id = Some(page_id.into());
        self
    }

    /// The component's box in its own coordinate space.
    #[must_use]
    pub fn rect(&self) -> Rect {
        self.styles.rect()
    }

    /// Whether this component sits at the root of the page.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Apply a shallow update to top-level fields.
    pub fn apply(&mut self, patch: ComponentPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(content) = patch.content {
            self.content = content;
        }
        if let Some(src) = patch.src {
            self.src = src;
        }
        if let Some(placeholder) = patch.placeholder {
            self.placeholder = placeholder;
        }
        if let Some(styles) = patch.styles {
            self.styles = styles;
        }
        if let Some(animation) = patch.animation {
            self.animation = animation;
        }
        if let Some(locked) = patch.locked {
            self.locked = locked;
        }
        if let Some(visible) = patch.visible {
            self.visible = visible;
        }
        if let Some(link) = patch.link_to_page_id {
            self.link_to_page_id = link;
        }
    }

    const fn default_visible() -> bool {
        true
    }
}

fn default_name(kind: &ComponentKind) -> String {
    let tag = kind.as_str();
    let mut chars = tag.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// A shallow update to a [`Component`].
///
/// For nullable fields the outer `Option` means "present in the update" and
/// the inner one is the new value, so `Some(None)` clears the field.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ComponentPatch {
    /// New display name.
    pub name: Option<String>,
    /// New text payload.
    #[serde(deserialize_with = "present")]
    pub content: Option<Option<String>>,
    /// New media URL.
    #[serde(deserialize_with = "present")]
    pub src: Option<Option<String>>,
    /// New form hint.
    #[serde(deserialize_with = "present")]
    pub placeholder: Option<Option<String>>,
    /// Replacement styles.
    pub styles: Option<Styles>,
    /// New animation.
    #[serde(deserialize_with = "present")]
    pub animation: Option<Option<Animation>>,
    /// New lock state.
    pub locked: Option<bool>,
    /// New visibility.
    pub visible: Option<bool>,
    /// New navigation target.
    #[serde(deserialize_with = "present")]
    pub link_to_page_id: Option<Option<String>>,
}

/// Deserialize a field that was present in the input, keeping an explicit `null`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Accept `"bold"` as well as `700` for font weights.
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    match value {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::String(s)) => Ok(Some(s)),
        Some(serde_json::Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected string or number for fontWeight, got {other}"
        ))),
    }
}
