//! Canonical serialized representation of a design, shared by the JSON
//! exporter, the project store and the HTTP API.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::component::Component;
use crate::error::{DocumentError, DocumentResult};
use crate::layout::{normalize_canvas_width, DEFAULT_CANVAS_HEIGHT};
use crate::page::{Page, HOME_PAGE_ID};

/// Portable design snapshot: every page plus the global canvas width.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignSnapshot {
    /// All pages in order; the first is the entry page.
    pub pages: Vec<Page>,
    /// Base design width shared by every page.
    pub canvas_width: f64,
}

/// Pre-multi-page design shape: one implicit page.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LegacyDesign {
    components: Vec<Component>,
    #[serde(default)]
    canvas_width: Option<f64>,
    #[serde(default)]
    canvas_height: Option<f64>,
}

impl DesignSnapshot {
    /// Build a snapshot from borrowed pages.
    #[must_use]
    pub fn new(pages: &[Page], canvas_width: f64) -> Self {
        Self {
            pages: pages.to_vec(),
            canvas_width,
        }
    }

    /// Pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> DocumentResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a snapshot or a legacy single-page design.
    ///
    /// A non-empty `pages` array takes precedence; otherwise a `components`
    /// array is wrapped in a synthesized `home` page.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::Serialization`] for malformed JSON and
    /// [`DocumentError::InvalidImport`] when neither shape is present.
    pub fn parse(json: &str) -> DocumentResult<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(value)
    }

    /// Interpret an already parsed JSON value.
    ///
    /// # Errors
    ///
    /// See [`DesignSnapshot::parse`].
    pub fn from_value(value: Value) -> DocumentResult<Self> {
        let Value::Object(map) = &value else {
            return Err(DocumentError::InvalidImport(
                "expected a JSON object".to_string(),
            ));
        };
        let canvas_width = normalize_canvas_width(map.get("canvasWidth").and_then(Value::as_f64));

        if let Some(pages) = map
            .get("pages")
            .filter(|pages| pages.as_array().is_some_and(|list| !list.is_empty()))
        {
            let pages: Vec<Page> = serde_json::from_value(pages.clone())?;
            return Ok(Self {
                pages,
                canvas_width,
            });
        }

        if map.get("components").is_some_and(Value::is_array) {
            let legacy: LegacyDesign = serde_json::from_value(value)?;
            let height = legacy
                .canvas_height
                .filter(|h| h.is_finite() && *h > 0.0)
                .unwrap_or(DEFAULT_CANVAS_HEIGHT);
            let page = Page::home()
                .with_id(HOME_PAGE_ID)
                .with_components(legacy.components)
                .with_canvas_height(height);
            return Ok(Self {
                pages: vec![page],
                canvas_width: normalize_canvas_width(legacy.canvas_width),
            });
        }

        Err(DocumentError::InvalidImport(
            "missing both `pages` and `components`".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_snapshot() {
        let json = r#"{
            "pages": [{"id":"home","name":"Home","slug":"home","canvasHeight":900,"components":[]}],
            "canvasWidth": 1280
        }"#;
        let snapshot = DesignSnapshot::parse(json).expect("snapshot");
        assert_eq!(snapshot.pages.len(), 1);
        assert!((snapshot.canvas_width - 1280.0).abs() < f64::EPSILON);
        assert!((snapshot.pages[0].canvas_height - 900.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_parse_legacy_components() {
        let json = r#"{
            "components": [{"id":"t","type":"text","styles":{"x":0,"y":0,"width":10,"height":10}}],
            "canvasHeight": 800
        }"#;
        let snapshot = DesignSnapshot::parse(json).expect("legacy");
        let page = &snapshot.pages[0];
        assert_eq!(page.id, "home");
        assert_eq!(page.components.len(), 1);
        assert!((page.canvas_height - 800.0).abs() < f64::EPSILON);
        assert!((snapshot.canvas_width - 1440.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_pages_falls_back_to_legacy() {
        let json = r#"{"pages":[],"components":[]}"#;
        let snapshot = DesignSnapshot::parse(json).expect("legacy");
        assert_eq!(snapshot.pages[0].id, "home");
    }

    #[test]
    fn test_parse_rejects_unknown_shape() {
        let err = DesignSnapshot::parse(r#"{"hello":"world"}"#).expect_err("invalid");
        assert!(matches!(err, DocumentError::InvalidImport(_)));

        let err = DesignSnapshot::parse("not json").expect_err("invalid");
        assert!(matches!(err, DocumentError::Serialization(_)));

        let err = DesignSnapshot::parse("[1,2]").expect_err("invalid");
        assert!(matches!(err, DocumentError::InvalidImport(_)));
    }

    #[test]
    fn test_tiny_canvas_width_is_replaced() {
        let json = r#"{"pages":[{"id":"a","name":"A","slug":"a"}],"canvasWidth":120}"#;
        let snapshot = DesignSnapshot::parse(json).expect("snapshot");
        assert!((snapshot.canvas_width - 1440.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_to_json_shape() {
        let snapshot = DesignSnapshot::new(&[Page::home()], 1440.0);
        let json = snapshot.to_json().expect("json");
        let value: Value = serde_json::from_str(&json).expect("value");
        assert_eq!(value["pages"][0]["id"], "home");
        assert_eq!(value["canvasWidth"], 1440.0);
        assert!(json.contains('\n'));
    }
}
