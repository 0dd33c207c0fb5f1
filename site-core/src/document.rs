//! The document store: pages, selection, view state and history.
//!
//! `pages` is the only copy of the design. The components of the current
//! page are reached through [`Document::components`], so there is no second
//! list to keep in sync.
//!
//! Every mutator that targets a component by id is tolerant of unknown ids:
//! it logs at debug level and returns `false` instead of failing.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::component::{Component, ComponentId, ComponentPatch, StylePatch};
use crate::error::{DocumentError, DocumentResult};
use crate::grouping;
use crate::history::{History, HistoryConfig};
use crate::layout::{
    absolute_rect, overflow_fix, overflows, OverflowFix, PreviewMode, Viewport, BASE_CANVAS_WIDTH,
    MIN_CANVAS_WIDTH,
};
use crate::page::Page;
use crate::render::RenderTree;
use crate::schema::DesignSnapshot;

/// Offset applied to both axes of a duplicated component.
pub const DUPLICATE_OFFSET: f64 = 20.0;

/// Grid spacing used by snap-to-grid.
pub const GRID_SIZE: f64 = 10.0;

/// Smallest zoom percentage.
pub const MIN_ZOOM: f64 = 10.0;

/// Largest zoom percentage.
pub const MAX_ZOOM: f64 = 400.0;

/// Direction for [`Document::reorder_component`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReorderDirection {
    /// Towards the end of the list, painted later (on top).
    Up,
    /// Towards the start of the list, painted earlier.
    Down,
}

/// Editor view settings. None of these affect the stored design.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewState {
    /// Zoom percentage.
    pub zoom: f64,
    /// Grid overlay visibility.
    pub show_grid: bool,
    /// Whether dragged positions snap to the grid.
    pub snap_to_grid: bool,
    /// Active responsive preview.
    pub preview_mode: PreviewMode,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            zoom: 100.0,
            show_grid: true,
            snap_to_grid: false,
            preview_mode: PreviewMode::Desktop,
        }
    }
}

/// A multi-page design being edited.
#[derive(Debug, Clone)]
pub struct Document {
    pages: Vec<Page>,
    /// Index into `pages`; always valid.
    current: usize,
    selected_id: Option<ComponentId>,
    selected_ids: Vec<ComponentId>,
    hovered_id: Option<ComponentId>,
    canvas_width: f64,
    view: ViewState,
    history: History,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create a document with a single empty `home` page.
    #[must_use]
    pub fn new() -> Self {
        Self::with_history_config(HistoryConfig::default())
    }

    /// Create an empty document with a custom history limit.
    #[must_use]
    pub fn with_history_config(config: HistoryConfig) -> Self {
        Self {
            pages: vec![Page::home()],
            current: 0,
            selected_id: None,
            selected_ids: Vec::new(),
            hovered_id: None,
            canvas_width: BASE_CANVAS_WIDTH,
            view: ViewState::default(),
            history: History::new(Vec::new(), config),
        }
    }

    /// Create a document from a snapshot, opening its first page.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::InvalidImport`] if the snapshot has no pages.
    pub fn from_snapshot(snapshot: DesignSnapshot, config: HistoryConfig) -> DocumentResult<Self> {
        let mut document = Self::with_history_config(config);
        document.load_snapshot(snapshot)?;
        Ok(document)
    }

    // ---------------------------------------------------------------------
    // Accessors
    // ---------------------------------------------------------------------

    /// All pages in order.
    #[must_use]
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// The page being edited.
    #[must_use]
    pub fn current_page(&self) -> &Page {
        &self.pages[self.current]
    }

    /// Id of the page being edited.
    #[must_use]
    pub fn current_page_id(&self) -> &str {
        &self.current_page().id
    }

    /// Components of the page being edited, in paint order.
    #[must_use]
    pub fn components(&self) -> &[Component] {
        &self.current_page().components
    }

    /// Find a component on the current page.
    #[must_use]
    pub fn component(&self, id: &str) -> Option<&Component> {
        self.current_page().component(id)
    }

    /// Whether any page in the document uses this component id.
    #[must_use]
    pub fn contains_id(&self, id: &str) -> bool {
        self.pages.iter().any(|page| page.contains(id))
    }

    /// Global base design width.
    #[must_use]
    pub fn canvas_width(&self) -> f64 {
        self.canvas_width
    }

    /// Height of the current page.
    #[must_use]
    pub fn canvas_height(&self) -> f64 {
        self.current_page().canvas_height
    }

    /// Primary selection.
    #[must_use]
    pub fn selected_id(&self) -> Option<&ComponentId> {
        self.selected_id.as_ref()
    }

    /// Every selected component.
    #[must_use]
    pub fn selected_ids(&self) -> &[ComponentId] {
        &self.selected_ids
    }

    /// Component under the pointer.
    #[must_use]
    pub fn hovered_id(&self) -> Option<&ComponentId> {
        self.hovered_id.as_ref()
    }

    /// View settings.
    #[must_use]
    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// Undo history of the current page.
    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Whether [`Document::undo`] would change anything.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Whether [`Document::redo`] would change anything.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    fn components_mut(&mut self) -> &mut Vec<Component> {
        &mut self.pages[self.current].components
    }

    fn component_mut(&mut self, id: &str) -> Option<&mut Component> {
        self.components_mut().iter_mut().find(|c| c.id == id)
    }

    /// Generate a component id that is not used anywhere in the document.
    #[must_use]
    pub fn fresh_id(&self, prefix: &str) -> ComponentId {
        loop {
            let id = ComponentId::with_prefix(prefix);
            if !self.contains_id(id.as_str()) {
                return id;
            }
        }
    }

    // ---------------------------------------------------------------------
    // Component mutations
    // ---------------------------------------------------------------------

    /// Append a component to the current page and make it the sole selection.
    ///
    /// Returns `false` without changes if the id is already used on any page.
    pub fn add_component(&mut self, component: Component) -> bool {
        if self.contains_id(component.id.as_str()) {
            debug!(id = %component.id, "add_component: duplicate id ignored");
            return false;
        }
        let id = component.id.clone();
        self.components_mut().push(component);
        self.select_only(Some(id));
        self.save_history_snapshot();
        true
    }

    /// Shallow-merge top-level fields of a component and record history.
    pub fn update_component(&mut self, id: &str, patch: ComponentPatch) -> bool {
        let Some(component) = self.component_mut(id) else {
            debug!(id, "update_component: unknown id");
            return false;
        };
        component.apply(patch);
        self.save_history_snapshot();
        true
    }

    /// Shallow-merge into a component's styles without recording history.
    pub fn update_styles(&mut self, id: &str, patch: StylePatch) -> bool {
        let Some(component) = self.component_mut(id) else {
            debug!(id, "update_styles: unknown id");
            return false;
        };
        component.styles.merge(patch);
        true
    }

    /// Delete a component from the current page and record history.
    ///
    /// Children of a removed group are promoted to the group's parent with
    /// their offsets composed back, so they keep their place on the page.
    pub fn remove_component(&mut self, id: &str) -> bool {
        let Some(removed) = self.component(id).cloned() else {
            debug!(id, "remove_component: unknown id");
            return false;
        };
        let components = self.components_mut();
        grouping::release_children(components, &removed);
        components.retain(|c| c.id != id);

        self.deselect(id);
        if self.hovered_id.as_ref().is_some_and(|h| h == id) {
            self.hovered_id = None;
        }
        self.save_history_snapshot();
        true
    }

    /// Clone a component under a fresh id, offset and renamed.
    ///
    /// Returns the new id, or `None` for an unknown id.
    pub fn duplicate_component(&mut self, id: &str) -> Option<ComponentId> {
        let Some(original) = self.component(id) else {
            debug!(id, "duplicate_component: unknown id");
            return None;
        };
        let mut copy = original.clone();
        copy.id = self.fresh_id(copy.kind.as_str());
        copy.name = format!("{} Copy", copy.name);
        copy.styles.x += DUPLICATE_OFFSET;
        copy.styles.y += DUPLICATE_OFFSET;

        let new_id = copy.id.clone();
        self.add_component(copy).then_some(new_id)
    }

    /// Set a component's position without recording history.
    pub fn move_component(&mut self, id: &str, x: f64, y: f64) -> bool {
        let Some(component) = self.component_mut(id) else {
            return false;
        };
        component.styles.x = x;
        component.styles.y = y;
        true
    }

    /// Set a component's size without recording history.
    pub fn resize_component(&mut self, id: &str, width: f64, height: f64) -> bool {
        let Some(component) = self.component_mut(id) else {
            return false;
        };
        component.styles.width = width;
        component.styles.height = height;
        true
    }

    /// Swap a component with its neighbour in paint order and record history.
    ///
    /// Returns `false` for unknown ids and at either end of the list.
    pub fn reorder_component(&mut self, id: &str, direction: ReorderDirection) -> bool {
        let components = self.components_mut();
        let Some(index) = components.iter().position(|c| c.id == id) else {
            debug!(id, "reorder_component: unknown id");
            return false;
        };
        let neighbour = match direction {
            ReorderDirection::Up if index + 1 < components.len() => index + 1,
            ReorderDirection::Down if index > 0 => index - 1,
            _ => return false,
        };
        components.swap(index, neighbour);
        self.save_history_snapshot();
        true
    }

    /// Replace the current page's components and restart its history.
    ///
    /// Incoming ids already used on another page, or repeated within the
    /// list, are replaced with fresh ones; `parent_id` links follow the
    /// renamed ids.
    pub fn set_components(&mut self, components: Vec<Component>) {
        let components = self.claim_ids(components);
        *self.components_mut() = components;
        self.clear_selection();
        self.reset_history();
    }

    fn claim_ids(&self, mut components: Vec<Component>) -> Vec<Component> {
        let elsewhere: HashSet<&str> = self
            .pages
            .iter()
            .enumerate()
            .filter(|(index, _)| *index != self.current)
            .flat_map(|(_, page)| page.components.iter().map(|c| c.id.as_str()))
            .collect();

        let mut used: HashSet<ComponentId> = HashSet::new();
        let mut renamed: HashMap<ComponentId, ComponentId> = HashMap::new();
        for component in &mut components {
            let external = elsewhere.contains(component.id.as_str());
            if external || used.contains(&component.id) {
                let fresh = loop {
                    let id = ComponentId::with_prefix(component.kind.as_str());
                    if !elsewhere.contains(id.as_str()) && !used.contains(&id) {
                        break id;
                    }
                };
                debug!(from = %component.id, to = %fresh, "set_components: id reassigned");
                if external {
                    renamed
                        .entry(component.id.clone())
                        .or_insert_with(|| fresh.clone());
                }
                component.id = fresh;
            }
            used.insert(component.id.clone());
        }

        if !renamed.is_empty() {
            for component in &mut components {
                if let Some(parent) = component.parent_id.as_ref().and_then(|p| renamed.get(p)) {
                    component.parent_id = Some(parent.clone());
                }
            }
        }
        components
    }

    // ---------------------------------------------------------------------
    // Selection
    // ---------------------------------------------------------------------

    /// Update the selection.
    ///
    /// Without `multi` the selection is replaced (`None` clears it). With
    /// `multi` the id is toggled: a newly added id becomes primary, and if
    /// the primary is toggled off the last remaining id takes over.
    /// Returns `false` when `id` is not on the current page.
    pub fn select_component(&mut self, id: Option<&str>, multi: bool) -> bool {
        let Some(id) = id else {
            self.clear_selection();
            return true;
        };
        if self.component(id).is_none() {
            debug!(id, "select_component: unknown id");
            return false;
        }
        let id = ComponentId::from(id);

        if !multi {
            self.select_only(Some(id));
            return true;
        }

        if self.selected_ids.contains(&id) {
            self.selected_ids.retain(|s| s != &id);
            if self.selected_id.as_ref() == Some(&id) {
                self.selected_id = self.selected_ids.last().cloned();
            }
        } else {
            self.selected_ids.push(id.clone());
            self.selected_id = Some(id);
        }
        true
    }

    /// Select every visible component on the current page; the first becomes primary.
    pub fn select_all(&mut self) -> bool {
        let visible: Vec<ComponentId> = self
            .components()
            .iter()
            .filter(|c| c.visible)
            .map(|c| c.id.clone())
            .collect();
        if visible.is_empty() {
            return false;
        }
        self.selected_id = visible.first().cloned();
        self.selected_ids = visible;
        true
    }

    /// Set or clear the hovered component.
    pub fn hover_component(&mut self, id: Option<&str>) {
        self.hovered_id = id.map(ComponentId::from);
    }

    fn select_only(&mut self, id: Option<ComponentId>) {
        self.selected_ids = id.iter().cloned().collect();
        self.selected_id = id;
    }

    fn clear_selection(&mut self) {
        self.select_only(None);
        self.hovered_id = None;
    }

    fn deselect(&mut self, id: &str) {
        self.selected_ids.retain(|s| s != id);
        if self.selected_id.as_ref().is_some_and(|s| s == id) {
            self.selected_id = self.selected_ids.last().cloned();
        }
    }

    fn prune_selection(&mut self) {
        let page = &self.pages[self.current];
        self.selected_ids.retain(|id| page.contains(id.as_str()));
        if self
            .selected_id
            .as_ref()
            .is_some_and(|id| !page.contains(id.as_str()))
        {
            self.selected_id = self.selected_ids.last().cloned();
        }
        if self
            .hovered_id
            .as_ref()
            .is_some_and(|id| !page.contains(id.as_str()))
        {
            self.hovered_id = None;
        }
    }

    // ---------------------------------------------------------------------
    // Grouping
    // ---------------------------------------------------------------------

    /// Group the selected components and select the new group.
    ///
    /// Returns the group id, or `None` if fewer than two selected components exist.
    pub fn group_selected(&mut self) -> Option<ComponentId> {
        let group_id = self.fresh_id("group");
        let ids = self.selected_ids.clone();
        let group_id = grouping::group(self.components_mut(), &ids, group_id)?;
        info!(group = %group_id, members = ids.len(), "grouped components");
        self.select_only(Some(group_id.clone()));
        self.save_history_snapshot();
        Some(group_id)
    }

    /// Dissolve every selected group (or the primary selection when the
    /// multi-selection is empty). Non-groups are skipped.
    ///
    /// Returns `true` if at least one group was dissolved.
    pub fn ungroup_selected(&mut self) -> bool {
        let targets: Vec<ComponentId> = if self.selected_ids.is_empty() {
            self.selected_id.iter().cloned().collect()
        } else {
            self.selected_ids.clone()
        };

        let mut working = self.components().to_vec();
        let mut dissolved = 0_usize;
        for id in &targets {
            if grouping::ungroup(&mut working, id.as_str()) {
                dissolved += 1;
            }
        }
        if dissolved == 0 {
            return false;
        }

        *self.components_mut() = working;
        info!(groups = dissolved, "ungrouped components");
        self.clear_selection();
        self.save_history_snapshot();
        true
    }

    // ---------------------------------------------------------------------
    // Pages
    // ---------------------------------------------------------------------

    /// Make another page current. History restarts from that page's state.
    pub fn switch_page(&mut self, page_id: &str) -> bool {
        let Some(index) = self.page_index(page_id) else {
            debug!(page_id, "switch_page: unknown page");
            return false;
        };
        self.open_page(index);
        true
    }

    /// Append a page named `name` and switch to it.
    ///
    /// The id and slug are derived from the name; a numeric suffix keeps the
    /// id unique. Returns the new page id.
    pub fn add_page(&mut self, name: &str) -> String {
        let mut page = Page::new(name);
        let base = page.id.clone();
        let mut suffix = 2;
        while self.page_index(&page.id).is_some() {
            page.id = format!("{base}-{suffix}");
            page.slug.clone_from(&page.id);
            suffix += 1;
        }
        let id = page.id.clone();
        info!(page = %id, "added page");
        self.pages.push(page);
        self.open_page(self.pages.len() - 1);
        id
    }

    /// Delete a page. Deleting the current page opens the first remaining one.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::LastPage`] when only one page is left and
    /// [`DocumentError::PageNotFound`] for an unknown id.
    pub fn delete_page(&mut self, page_id: &str) -> DocumentResult<()> {
        if self.pages.len() <= 1 {
            return Err(DocumentError::LastPage);
        }
        let index = self
            .page_index(page_id)
            .ok_or_else(|| DocumentError::PageNotFound(page_id.to_string()))?;

        self.pages.remove(index);
        info!(page = page_id, "deleted page");
        if index == self.current {
            self.open_page(0);
        } else if index < self.current {
            self.current -= 1;
        }
        Ok(())
    }

    /// Rename a page and recompute its slug. The id is kept.
    pub fn rename_page(&mut self, page_id: &str, name: &str) -> bool {
        let Some(index) = self.page_index(page_id) else {
            debug!(page_id, "rename_page: unknown page");
            return false;
        };
        self.pages[index].rename(name);
        true
    }

    fn page_index(&self, page_id: &str) -> Option<usize> {
        self.pages.iter().position(|p| p.id == page_id)
    }

    fn open_page(&mut self, index: usize) {
        self.current = index;
        self.clear_selection();
        self.reset_history();
    }

    // ---------------------------------------------------------------------
    // History
    // ---------------------------------------------------------------------

    /// Record the current page state. Skipped if identical to the entry at the cursor.
    pub fn save_history_snapshot(&mut self) -> bool {
        let snapshot = self.components().to_vec();
        self.history.push(snapshot)
    }

    /// Restore the previous snapshot.
    pub fn undo(&mut self) -> bool {
        let Some(snapshot) = self.history.undo().map(<[Component]>::to_vec) else {
            return false;
        };
        *self.components_mut() = snapshot;
        self.prune_selection();
        true
    }

    /// Restore the next snapshot.
    pub fn redo(&mut self) -> bool {
        let Some(snapshot) = self.history.redo().map(<[Component]>::to_vec) else {
            return false;
        };
        *self.components_mut() = snapshot;
        self.prune_selection();
        true
    }

    fn reset_history(&mut self) {
        let snapshot = self.components().to_vec();
        self.history.reset(snapshot);
    }

    // ---------------------------------------------------------------------
    // Canvas and view
    // ---------------------------------------------------------------------

    /// Set the global design width and the current page's height.
    ///
    /// Returns `false` for non-finite sizes, a non-positive height, or a
    /// width below [`MIN_CANVAS_WIDTH`], which import would not preserve.
    pub fn set_canvas_size(&mut self, width: f64, height: f64) -> bool {
        let valid = width.is_finite() && height.is_finite() && height > 0.0;
        if !valid || width < MIN_CANVAS_WIDTH {
            debug!(width, height, "set_canvas_size: rejected");
            return false;
        }
        self.canvas_width = width;
        self.pages[self.current].canvas_height = height;
        true
    }

    /// Switch the responsive preview. Stored geometry is never touched.
    pub fn set_preview_mode(&mut self, mode: PreviewMode) {
        self.view.preview_mode = mode;
    }

    /// The active preview viewport.
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        Viewport::for_mode(self.view.preview_mode, self.canvas_width)
    }

    /// Ratio of preview width to design width.
    #[must_use]
    pub fn scale_factor(&self) -> f64 {
        self.viewport().scale()
    }

    /// Set the zoom percentage, clamped to the supported range.
    pub fn set_zoom(&mut self, zoom: f64) -> f64 {
        self.view.zoom = if zoom.is_finite() {
            zoom.clamp(MIN_ZOOM, MAX_ZOOM)
        } else {
            100.0
        };
        self.view.zoom
    }

    /// Toggle the grid overlay, returning the new state.
    pub fn toggle_grid(&mut self) -> bool {
        self.view.show_grid = !self.view.show_grid;
        self.view.show_grid
    }

    /// Toggle snap-to-grid, returning the new state.
    pub fn toggle_snap_to_grid(&mut self) -> bool {
        self.view.snap_to_grid = !self.view.snap_to_grid;
        self.view.snap_to_grid
    }

    /// Round a coordinate to the grid when snapping is enabled.
    #[must_use]
    pub fn snap(&self, value: f64) -> f64 {
        if self.view.snap_to_grid {
            (value / GRID_SIZE).round() * GRID_SIZE
        } else {
            value
        }
    }

    /// Positioned render tree of the current page in the active viewport.
    #[must_use]
    pub fn render_tree(&self) -> RenderTree {
        RenderTree::build(self.current_page(), self.viewport())
    }

    // ---------------------------------------------------------------------
    // Overflow
    // ---------------------------------------------------------------------

    /// Visible components whose page-absolute right edge passes the
    /// responsive viewport. Always empty in desktop preview.
    #[must_use]
    pub fn overflowing_components(&self) -> Vec<ComponentId> {
        let viewport = self.viewport();
        if !viewport.responsive {
            return Vec::new();
        }
        let components = self.components();
        components
            .iter()
            .filter(|c| c.visible && overflows(absolute_rect(components, c), viewport.width))
            .map(|c| c.id.clone())
            .collect()
    }

    /// Bring one overflowing component back inside the viewport and record history.
    pub fn fix_overflow(&mut self, id: &str) -> bool {
        if !self.apply_overflow_fix(id) {
            return false;
        }
        self.save_history_snapshot();
        true
    }

    /// Fix every overflowing component with a single history entry.
    ///
    /// Returns how many components changed.
    pub fn fix_all_overflow(&mut self) -> usize {
        let fixed = self
            .overflowing_components()
            .iter()
            .filter(|id| self.apply_overflow_fix(id.as_str()))
            .count();
        if fixed > 0 {
            info!(fixed, "fixed overflowing components");
            self.save_history_snapshot();
        }
        fixed
    }

    fn apply_overflow_fix(&mut self, id: &str) -> bool {
        let viewport = self.viewport();
        if !viewport.responsive {
            return false;
        }
        let components = self.components();
        let Some(component) = components.iter().find(|c| c.id == id) else {
            return false;
        };
        let absolute = absolute_rect(components, component);
        let Some(fix) = overflow_fix(absolute, viewport.width) else {
            return false;
        };
        let parent_offset = absolute.x - component.styles.x;

        let Some(component) = self.component_mut(id) else {
            return false;
        };
        match fix {
            OverflowFix::Shrink { width } => component.styles.width = width,
            OverflowFix::Relocate { x, width } => {
                component.styles.x = x - parent_offset;
                component.styles.width = width;
            }
        }
        true
    }

    // ---------------------------------------------------------------------
    // Whole-document operations
    // ---------------------------------------------------------------------

    /// Start over with a single empty page, keeping the history limit.
    pub fn reset_to_default(&mut self) {
        *self = Self::with_history_config(self.history.config());
        info!("document reset");
    }

    /// Snapshot of every page plus the canvas width.
    #[must_use]
    pub fn snapshot(&self) -> DesignSnapshot {
        DesignSnapshot::new(&self.pages, self.canvas_width)
    }

    /// Serialize the design to pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn export_design(&self) -> DocumentResult<String> {
        self.snapshot().to_json()
    }

    /// Replace the design with one parsed from JSON.
    ///
    /// The document is left untouched when parsing fails.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::Serialization`] or
    /// [`DocumentError::InvalidImport`] for unusable input.
    pub fn import_design(&mut self, json: &str) -> DocumentResult<()> {
        let snapshot = DesignSnapshot::parse(json)?;
        self.load_snapshot(snapshot)
    }

    /// Replace the design with a snapshot and open its first page.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::InvalidImport`] if the snapshot has no pages.
    pub fn load_snapshot(&mut self, snapshot: DesignSnapshot) -> DocumentResult<()> {
        if snapshot.pages.is_empty() {
            return Err(DocumentError::InvalidImport(
                "design has no pages".to_string(),
            ));
        }
        info!(
            pages = snapshot.pages.len(),
            canvas_width = snapshot.canvas_width,
            "loaded design"
        );
        self.pages = snapshot.pages;
        self.canvas_width = snapshot.canvas_width;
        self.open_page(0);
        Ok(())
    }

    /// Serializable overview of the editor state.
    #[must_use]
    pub fn summary(&self) -> DocumentSummary {
        DocumentSummary {
            current_page_id: self.current_page_id().to_string(),
            pages: self.pages.iter().map(PageSummary::from).collect(),
            components: self.components().to_vec(),
            selected_id: self.selected_id.clone(),
            selected_ids: self.selected_ids.clone(),
            hovered_id: self.hovered_id.clone(),
            canvas_width: self.canvas_width,
            canvas_height: self.canvas_height(),
            scale_factor: self.scale_factor(),
            view: self.view,
            can_undo: self.can_undo(),
            can_redo: self.can_redo(),
        }
    }
}

/// Page listing entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSummary {
    /// Page id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// URL slug.
    pub slug: String,
    /// Number of components on the page.
    pub component_count: usize,
}

impl From<&Page> for PageSummary {
    fn from(page: &Page) -> Self {
        Self {
            id: page.id.clone(),
            name: page.name.clone(),
            slug: page.slug.clone(),
            component_count: page.components.len(),
        }
    }
}

/// Editor state returned after each command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSummary {
    /// Page being edited.
    pub current_page_id: String,
    /// All pages.
    pub pages: Vec<PageSummary>,
    /// Components of the current page.
    pub components: Vec<Component>,
    /// Primary selection.
    pub selected_id: Option<ComponentId>,
    /// Full selection.
    pub selected_ids: Vec<ComponentId>,
    /// Hovered component.
    pub hovered_id: Option<ComponentId>,
    /// Base design width.
    pub canvas_width: f64,
    /// Current page height.
    pub canvas_height: f64,
    /// Preview scale.
    pub scale_factor: f64,
    /// View settings.
    pub view: ViewState,
    /// Undo available.
    pub can_undo: bool,
    /// Redo available.
    pub can_redo: bool,
}
