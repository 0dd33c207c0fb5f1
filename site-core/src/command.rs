//! Serializable editor commands.
//!
//! Every document operation has a command variant so that remote clients
//! can drive a [`Document`] with plain JSON, e.g.
//!
//! ```text
//! {"type": "moveComponent", "id": "text-1", "x": 40, "y": 80}
//! ```

use serde::Deserialize;
use tracing::debug;

use crate::component::{Component, ComponentPatch, StylePatch};
use crate::document::{Document, ReorderDirection};
use crate::error::{DocumentError, DocumentResult};
use crate::layout::PreviewMode;
use crate::templates;

/// A single editor operation.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
#[allow(missing_docs)]
pub enum Command {
    /// Append a component to the current page.
    AddComponent { component: Component },
    /// Shallow-merge top-level component fields.
    UpdateComponent { id: String, patch: ComponentPatch },
    /// Shallow-merge component styles (no history).
    UpdateStyles { id: String, styles: StylePatch },
    /// Delete a component.
    RemoveComponent { id: String },
    /// Clone a component.
    DuplicateComponent { id: String },
    /// Change the selection.
    SelectComponent {
        #[serde(default)]
        id: Option<String>,
        #[serde(default)]
        multi: bool,
    },
    /// Select every visible component.
    SelectAll,
    /// Change the hovered component.
    HoverComponent {
        #[serde(default)]
        id: Option<String>,
    },
    /// Set a position (no history).
    MoveComponent { id: String, x: f64, y: f64 },
    /// Set a size (no history).
    ResizeComponent { id: String, width: f64, height: f64 },
    /// Swap with a neighbour in paint order.
    ReorderComponent {
        id: String,
        direction: ReorderDirection,
    },
    /// Group the selection.
    GroupSelected,
    /// Dissolve selected groups.
    UngroupSelected,
    /// Open another page.
    SwitchPage { page_id: String },
    /// Create and open a page.
    AddPage { name: String },
    /// Delete a page.
    DeletePage { page_id: String },
    /// Rename a page.
    RenamePage { page_id: String, name: String },
    /// Step back.
    Undo,
    /// Step forward.
    Redo,
    /// Commit the current state, typically at the end of a drag.
    SaveHistory,
    /// Replace the current page's components.
    SetComponents { components: Vec<Component> },
    /// Replace the current page's components with a built-in template.
    ApplyTemplate { name: String },
    /// Set design width and current page height.
    SetCanvasSize { width: f64, height: f64 },
    /// Switch responsive preview.
    SetPreviewMode { mode: PreviewMode },
    /// Set the zoom percentage.
    SetZoom { zoom: f64 },
    /// Toggle the grid overlay.
    ToggleGrid,
    /// Toggle snap-to-grid.
    ToggleSnapToGrid,
    /// Fix one overflowing component.
    FixOverflow { id: String },
    /// Fix every overflowing component.
    FixAllOverflow,
    /// Start over with an empty document.
    ResetToDefault,
}

/// What a command did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutcome {
    /// Whether the document changed.
    pub changed: bool,
    /// Id of a component or page the command created.
    pub created: Option<String>,
}

impl CommandOutcome {
    fn changed(changed: bool) -> Self {
        Self {
            changed,
            created: None,
        }
    }

    fn created(id: Option<String>) -> Self {
        Self {
            changed: id.is_some(),
            created: id,
        }
    }
}

impl Command {
    /// Short name for logging.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::AddComponent { .. } => "addComponent",
            Self::UpdateComponent { .. } => "updateComponent",
            Self::UpdateStyles { .. } => "updateStyles",
            Self::RemoveComponent { .. } => "removeComponent",
            Self::DuplicateComponent { .. } => "duplicateComponent",
            Self::SelectComponent { .. } => "selectComponent",
            Self::SelectAll => "selectAll",
            Self::HoverComponent { .. } => "hoverComponent",
            Self::MoveComponent { .. } => "moveComponent",
            Self::ResizeComponent { .. } => "resizeComponent",
            Self::ReorderComponent { .. } => "reorderComponent",
            Self::GroupSelected => "groupSelected",
            Self::UngroupSelected => "ungroupSelected",
            Self::SwitchPage { .. } => "switchPage",
            Self::AddPage { .. } => "addPage",
            Self::DeletePage { .. } => "deletePage",
            Self::RenamePage { .. } => "renamePage",
            Self::Undo => "undo",
            Self::Redo => "redo",
            Self::SaveHistory => "saveHistory",
            Self::SetComponents { .. } => "setComponents",
            Self::ApplyTemplate { .. } => "applyTemplate",
            Self::SetCanvasSize { .. } => "setCanvasSize",
            Self::SetPreviewMode { .. } => "setPreviewMode",
            Self::SetZoom { .. } => "setZoom",
            Self::ToggleGrid => "toggleGrid",
            Self::ToggleSnapToGrid => "toggleSnapToGrid",
            Self::FixOverflow { .. } => "fixOverflow",
            Self::FixAllOverflow => "fixAllOverflow",
            Self::ResetToDefault => "resetToDefault",
        }
    }

    /// Run the command against a document.
    ///
    /// # Errors
    ///
    /// Returns page-deletion and template lookup failures. Unknown component
    /// ids are reported through [`CommandOutcome::changed`] instead.
    pub fn apply(self, document: &mut Document) -> DocumentResult<CommandOutcome> {
        debug!(command = self.name(), "applying command");
        let outcome = match self {
            Self::AddComponent { component } => {
                let id = component.id.to_string();
                CommandOutcome::created(document.add_component(component).then_some(id))
            }
            Self::UpdateComponent { id, patch } => {
                CommandOutcome::changed(document.update_component(&id, patch))
            }
            Self::UpdateStyles { id, styles } => {
                CommandOutcome::changed(document.update_styles(&id, styles))
            }
            Self::RemoveComponent { id } => CommandOutcome::changed(document.remove_component(&id)),
            Self::DuplicateComponent { id } => CommandOutcome::created(
                document.duplicate_component(&id).map(|c| c.to_string()),
            ),
            Self::SelectComponent { id, multi } => {
                CommandOutcome::changed(document.select_component(id.as_deref(), multi))
            }
            Self::SelectAll => CommandOutcome::changed(document.select_all()),
            Self::HoverComponent { id } => {
                document.hover_component(id.as_deref());
                CommandOutcome::changed(true)
            }
            Self::MoveComponent { id, x, y } => {
                CommandOutcome::changed(document.move_component(&id, x, y))
            }
            Self::ResizeComponent { id, width, height } => {
                CommandOutcome::changed(document.resize_component(&id, width, height))
            }
            Self::ReorderComponent { id, direction } => {
                CommandOutcome::changed(document.reorder_component(&id, direction))
            }
            Self::GroupSelected => {
                CommandOutcome::created(document.group_selected().map(|g| g.to_string()))
            }
            Self::UngroupSelected => CommandOutcome::changed(document.ungroup_selected()),
            Self::SwitchPage { page_id } => CommandOutcome::changed(document.switch_page(&page_id)),
            Self::AddPage { name } => CommandOutcome::created(Some(document.add_page(&name))),
            Self::DeletePage { page_id } => {
                document.delete_page(&page_id)?;
                CommandOutcome::changed(true)
            }
            Self::RenamePage { page_id, name } => {
                CommandOutcome::changed(document.rename_page(&page_id, &name))
            }
            Self::Undo => CommandOutcome::changed(document.undo()),
            Self::Redo => CommandOutcome::changed(document.redo()),
            Self::SaveHistory => CommandOutcome::changed(document.save_history_snapshot()),
            Self::SetComponents { components } => {
                document.set_components(components);
                CommandOutcome::changed(true)
            }
            Self::ApplyTemplate { name } => {
                let template =
                    templates::find(&name).ok_or(DocumentError::TemplateNotFound(name))?;
                document.set_components(template.components);
                CommandOutcome::changed(true)
            }
            Self::SetCanvasSize { width, height } => {
                CommandOutcome::changed(document.set_canvas_size(width, height))
            }
            Self::SetPreviewMode { mode } => {
                document.set_preview_mode(mode);
                CommandOutcome::changed(true)
            }
            Self::SetZoom { zoom } => {
                document.set_zoom(zoom);
                CommandOutcome::changed(true)
            }
            Self::ToggleGrid => {
                document.toggle_grid();
                CommandOutcome::changed(true)
            }
            Self::ToggleSnapToGrid => {
                document.toggle_snap_to_grid();
                CommandOutcome::changed(true)
            }
            Self::FixOverflow { id } => CommandOutcome::changed(document.fix_overflow(&id)),
            Self::FixAllOverflow => CommandOutcome::changed(document.fix_all_overflow() > 0),
            Self::ResetToDefault => {
                document.reset_to_default();
                CommandOutcome::changed(true)
            }
        };
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(document: &mut Document, json: &str) -> CommandOutcome {
        let command: Command = serde_json::from_str(json).expect("command");
        command.apply(document).expect("apply")
    }

    #[test]
    fn test_add_and_move_from_json() {
        let mut document = Document::new();
        let outcome = run(
            &mut document,
            r#"{"type":"addComponent","component":{"id":"t","type":"text","styles":{"x":0,"y":0,"width":10,"height":10}}}"#,
        );
        assert_eq!(outcome.created.as_deref(), Some("t"));

        let outcome = run(&mut document, r#"{"type":"moveComponent","id":"t","x":40,"y":80}"#);
        assert!(outcome.changed);
        let t = document.component("t").expect("t");
        assert!((t.styles.x - 40.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_unknown_id_reports_unchanged() {
        let mut document = Document::new();
        let outcome = run(&mut document, r#"{"type":"removeComponent","id":"ghost"}"#);
        assert!(!outcome.changed);
    }

    #[test]
    fn test_page_commands_use_camel_case_fields() {
        let mut document = Document::new();
        let outcome = run(&mut document, r#"{"type":"addPage","name":"About"}"#);
        assert_eq!(outcome.created.as_deref(), Some("about"));

        run(&mut document, r#"{"type":"switchPage","pageId":"home"}"#);
        assert_eq!(document.current_page_id(), "home");

        let command: Command =
            serde_json::from_str(r#"{"type":"deletePage","pageId":"about"}"#).expect("command");
        command.apply(&mut document).expect("delete");

        let command: Command =
            serde_json::from_str(r#"{"type":"deletePage","pageId":"home"}"#).expect("command");
        assert!(matches!(
            command.apply(&mut document),
            Err(DocumentError::LastPage)
        ));
    }

    #[test]
    fn test_apply_template() {
        let mut document = Document::new();
        run(&mut document, r#"{"type":"applyTemplate","name":"Portfolio"}"#);
        assert_eq!(document.components().len(), 6);
        assert!(!document.can_undo());

        let command: Command =
            serde_json::from_str(r#"{"type":"applyTemplate","name":"Nope"}"#).expect("command");
        assert!(matches!(
            command.apply(&mut document),
            Err(DocumentError::TemplateNotFound(_))
        ));
    }

    #[test]
    fn test_preview_and_reorder_enums() {
        let mut document = Document::new();
        run(&mut document, r#"{"type":"setPreviewMode","mode":"tablet"}"#);
        assert_eq!(document.view().preview_mode, PreviewMode::Tablet);

        let outcome = run(
            &mut document,
            r#"{"type":"reorderComponent","id":"x","direction":"up"}"#,
        );
        assert!(!outcome.changed);
    }

    #[test]
    fn test_select_without_id_clears() {
        let mut document = Document::new();
        run(
            &mut document,
            r#"{"type":"addComponent","component":{"id":"t","type":"text","styles":{"x":0,"y":0,"width":10,"height":10}}}"#,
        );
        run(&mut document, r#"{"type":"selectComponent"}"#);
        assert!(document.selected_id().is_none());
    }
}
