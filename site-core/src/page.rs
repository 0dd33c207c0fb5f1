//! Pages - independently navigable canvases inside a document.

use serde::{Deserialize, Serialize};

use crate::component::Component;
use crate::layout::DEFAULT_CANVAS_HEIGHT;

/// Id, name and slug of the page every new document starts with.
pub const HOME_PAGE_ID: &str = "home";

/// A single page of the design.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    /// Stable identifier, referenced by `linkToPageId`.
    pub id: String,
    /// Display name.
    pub name: String,
    /// URL-safe name used for file names and section anchors.
    pub slug: String,
    /// Components in paint order.
    #[serde(default)]
    pub components: Vec<Component>,
    /// Page height in base-canvas units.
    #[serde(default = "default_canvas_height")]
    pub canvas_height: f64,
}

impl Page {
    /// Create an empty page whose id and slug are derived from the name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let slug = slugify(&name);
        Self {
            id: slug.clone(),
            name,
            slug,
            components: Vec::new(),
            canvas_height: DEFAULT_CANVAS_HEIGHT,
        }
    }

    /// The page a fresh document starts with.
    #[must_use]
    pub fn home() -> Self {
        Self::new("Home")
    }

    /// Override the identifier.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Replace the components.
    #[must_use]
    pub fn with_components(mut self, components: Vec<Component>) -> Self {
        self.components = components;
        self
    }

    /// Set the page height.
    #[must_use]
    pub fn with_canvas_height(mut self, height: f64) -> Self {
        self.canvas_height = height;
        self
    }

    /// Rename the page, keeping its id stable.
    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.slug = slugify(&self.name);
    }

    /// Find a component on this page.
    #[must_use]
    pub fn component(&self, id: &str) -> Option<&Component> {
        self.components.iter().find(|c| c.id == id)
    }

    /// Whether a component with this id lives on the page.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.component(id).is_some()
    }

    /// Name turned into a component-friendly identifier (`About Us` -> `AboutUs`).
    #[must_use]
    pub fn pascal_name(&self) -> String {
        let joined: String = self
            .name
            .split(|c: char| !c.is_ascii_alphanumeric())
            .filter(|part| !part.is_empty())
            .map(|part| {
                let mut chars = part.chars();
                chars
                    .next()
                    .map(|first| first.to_ascii_uppercase().to_string() + chars.as_str())
                    .unwrap_or_default()
            })
            .collect();
        match joined.chars().next() {
            None => "Untitled".to_string(),
            Some(first) if first.is_ascii_digit() => format!("Page{joined}"),
            Some(_) => joined,
        }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::home()
    }
}

fn default_canvas_height() -> f64 {
    DEFAULT_CANVAS_HEIGHT
}

/// Lowercase the name, join its words with hyphens and drop every
/// character outside `[a-z0-9-]`.
#[must_use]
pub fn slugify(name: &str) -> String {
    let slug = name
        .split_whitespace()
        .map(|word| {
            word.to_ascii_lowercase()
                .chars()
                .filter(|c| c.is_ascii_alphanumeric() || *c == '-')
                .collect::<String>()
        })
        .map(|word| word.trim_matches('-').to_string())
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join("-");
    if slug.is_empty() {
        "page".to_string()
    } else {
        slug
    }
}
