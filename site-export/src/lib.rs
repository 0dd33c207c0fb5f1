//! # Sitecraft Export
//!
//! Turns a design (pages plus canvas width) into deliverable files.
//!
//! ## Targets
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                     site-export                      │
//! ├──────────────────────────────────────────────────────┤
//! │  html         │ index.html + <slug>.html, styles.css │
//! │               │ script.js, README.md (fluid layout)  │
//! │  html-single  │ one index.html, pixel layout         │
//! │  react        │ App.jsx, one component per page     │
//! │  json         │ design.json snapshot                 │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! Every target walks the same [`site_core::RenderTree`], so paint order,
//! alignment and group handling match the editor canvas.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod assets;
pub mod css;
pub mod error;
pub mod html;
pub mod react;
mod writer;

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Serialize;
use site_core::layout::normalize_canvas_width;
use site_core::{DesignSnapshot, Document, Page};
use tracing::{debug, info};

pub use css::Positioning;
pub use error::{ExportError, ExportResult};
pub use html::HtmlVariant;

/// Export crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// What to export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExportTarget {
    /// HTML bundle in the configured [`HtmlVariant`].
    Html,
    /// HTML bundle forced to a single file.
    HtmlSingle,
    /// React component source.
    React,
    /// JSON design snapshot.
    Json,
}

impl ExportTarget {
    /// Every target, in display order.
    pub const ALL: [Self; 4] = [Self::Html, Self::HtmlSingle, Self::React, Self::Json];

    /// Stable name used in URLs and on the command line.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::HtmlSingle => "html-single",
            Self::React => "react",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for ExportTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportTarget {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ExportError::UnknownTarget(s.to_string()))
    }
}

/// Configuration for design export.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportConfig {
    /// Site title used in `<title>` and the README (default: "My Website").
    pub title: String,
    /// Layout of [`ExportTarget::Html`] (default: package).
    pub html_variant: HtmlVariant,
    /// Geometry strategy of the package variant; single files are always fixed.
    pub positioning: Positioning,
    /// Design width override (default: the document's canvas width).
    pub base_width: Option<f64>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            title: "My Website".to_string(),
            html_variant: HtmlVariant::default(),
            positioning: Positioning::default(),
            base_width: None,
        }
    }
}

impl ExportConfig {
    /// Set the site title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the HTML layout.
    #[must_use]
    pub const fn with_html_variant(mut self, variant: HtmlVariant) -> Self {
        self.html_variant = variant;
        self
    }

    /// Set the package geometry strategy.
    #[must_use]
    pub const fn with_positioning(mut self, positioning: Positioning) -> Self {
        self.positioning = positioning;
        self
    }

    /// Override the design width.
    #[must_use]
    pub const fn with_base_width(mut self, width: f64) -> Self {
        self.base_width = Some(width);
        self
    }
}

/// One generated file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportArtifact {
    /// File name, relative to the output directory.
    pub filename: String,
    /// MIME type of the content.
    pub mime_type: String,
    /// File body.
    pub content: String,
}

impl ExportArtifact {
    /// Create an artifact.
    #[must_use]
    pub fn new(
        filename: impl Into<String>,
        mime_type: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            filename: filename.into(),
            mime_type: mime_type.into(),
            content: content.into(),
        }
    }

    pub(crate) fn html(filename: impl Into<String>, content: impl Into<String>) -> Self {
        Self::new(filename, "text/html", content)
    }

    pub(crate) fn css(filename: impl Into<String>, content: impl Into<String>) -> Self {
        Self::new(filename, "text/css", content)
    }

    pub(crate) fn javascript(filename: impl Into<String>, content: impl Into<String>) -> Self {
        Self::new(filename, "text/javascript", content)
    }

    pub(crate) fn markdown(filename: impl Into<String>, content: impl Into<String>) -> Self {
        Self::new(filename, "text/markdown", content)
    }

    pub(crate) fn json(filename: impl Into<String>, content: impl Into<String>) -> Self {
        Self::new(filename, "application/json", content)
    }
}

/// Exports designs to the supported targets.
#[derive(Debug, Clone, Default)]
pub struct SiteExporter {
    config: ExportConfig,
}

impl SiteExporter {
    /// Create a new exporter with the given configuration.
    #[must_use]
    pub fn new(config: ExportConfig) -> Self {
        Self { config }
    }

    /// Create an exporter with default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(ExportConfig::default())
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Export pages designed at `canvas_width`.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::NoPages`] for an empty design and a
    /// serialization error if the JSON snapshot cannot be encoded.
    pub fn export(
        &self,
        pages: &[Page],
        canvas_width: f64,
        target: ExportTarget,
    ) -> ExportResult<Vec<ExportArtifact>> {
        if pages.is_empty() {
            return Err(ExportError::NoPages);
        }
        let base_width = normalize_canvas_width(Some(self.config.base_width.unwrap_or(canvas_width)));
        let title = self.config.title.as_str();

        let artifacts = match target {
            ExportTarget::Html if self.config.html_variant == HtmlVariant::Package => {
                html::package(pages, base_width, title, self.config.positioning)
            }
            ExportTarget::Html | ExportTarget::HtmlSingle => vec![ExportArtifact::html(
                "index.html",
                html::single_file(pages, base_width, title),
            )],
            ExportTarget::React => vec![ExportArtifact::javascript(
                "App.jsx",
                react::module(pages, base_width),
            )],
            ExportTarget::Json => vec![ExportArtifact::json(
                "design.json",
                DesignSnapshot::new(pages, canvas_width).to_json()?,
            )],
        };

        info!(
            format = target.as_str(),
            pages = pages.len(),
            files = artifacts.len(),
            "Exported design"
        );
        Ok(artifacts)
    }

    /// Export every page of a document.
    ///
    /// # Errors
    ///
    /// See [`SiteExporter::export`].
    pub fn export_document(
        &self,
        document: &Document,
        target: ExportTarget,
    ) -> ExportResult<Vec<ExportArtifact>> {
        self.export(document.pages(), document.canvas_width(), target)
    }
}

/// Write artifacts into `dir`, creating it if needed.
///
/// # Errors
///
/// Returns [`ExportError::InvalidFileName`] for names containing path
/// separators or parent references, or an I/O error if writing fails.
pub fn write_artifacts(dir: &Path, artifacts: &[ExportArtifact]) -> ExportResult<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)?;
    let mut written = Vec::with_capacity(artifacts.len());
    for artifact in artifacts {
        let name = artifact.filename.as_str();
        if name.is_empty() || name.contains(['/', '\\']) || name == "." || name == ".." {
            return Err(ExportError::InvalidFileName(name.to_string()));
        }
        let path = dir.join(name);
        std::fs::write(&path, &artifact.content)?;
        debug!(path = %path.display(), bytes = artifact.content.len(), "Wrote artifact");
        written.push(path);
    }
    info!(dir = %dir.display(), files = written.len(), "Wrote export");
    Ok(written)
}
