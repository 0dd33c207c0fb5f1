//! Shared project storage.
//!
//! Provides a thread-safe [`ProjectStore`] that HTTP handlers share to read
//! and mutate documents, with optional JSON persistence in a data directory.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use crate::command::{Command, CommandOutcome};
use crate::document::{Document, DocumentSummary};
use crate::error::DocumentError;
use crate::history::HistoryConfig;
use crate::schema::DesignSnapshot;

/// Default project identifier.
pub const DEFAULT_PROJECT: &str = "default";

/// Errors that can occur during store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The requested project does not exist.
    #[error("Project not found: {0}")]
    ProjectNotFound(String),
    /// The project id cannot be used as a file name unchanged.
    #[error("Invalid project id: {0:?} (use letters, digits, '-' or '_')")]
    InvalidProjectId(String),
    /// Persistence was requested but no data directory is configured.
    #[error("No data directory configured")]
    NoDataDir,
    /// The document rejected an operation.
    #[error(transparent)]
    Document(#[from] DocumentError),
    /// An I/O error occurred during persistence.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// A serialization or deserialization error occurred.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Thread-safe document storage keyed by project id.
///
/// # Example
///
/// ```
/// use site_core::store::{ProjectStore, DEFAULT_PROJECT};
/// use site_core::{Component, ComponentKind};
///
/// let store = ProjectStore::new();
/// store.update(DEFAULT_PROJECT, |doc| {
///     doc.add_component(Component::new("hello", ComponentKind::Text));
/// });
/// assert_eq!(store.get_or_create(DEFAULT_PROJECT).components().len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ProjectStore {
    projects: Arc<RwLock<HashMap<String, Document>>>,
    /// Optional data directory for filesystem persistence.
    data_dir: Option<PathBuf>,
    history: HistoryConfig,
}

impl ProjectStore {
    /// Create an in-memory store with an empty default project.
    #[must_use]
    pub fn new() -> Self {
        let mut projects = HashMap::new();
        projects.insert(DEFAULT_PROJECT.to_string(), Document::new());
        Self {
            projects: Arc::new(RwLock::new(projects)),
            data_dir: None,
            history: HistoryConfig::default(),
        }
    }

    /// Create a store that persists projects as JSON files in `data_dir`.
    ///
    /// The directory is created if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the directory cannot be created.
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let data_dir = data_dir.into();
        std::fs::create_dir_all(&data_dir)?;
        Ok(Self {
            data_dir: Some(data_dir),
            ..Self::new()
        })
    }

    /// Use a history limit for documents created from now on.
    #[must_use]
    pub fn with_history_config(mut self, config: HistoryConfig) -> Self {
        self.history = config;
        self
    }

    /// Configured data directory, if any.
    #[must_use]
    pub fn data_dir(&self) -> Option<&Path> {
        self.data_dir.as_deref()
    }

    /// Clone of a project's document, if it exists.
    #[must_use]
    pub fn get(&self, project_id: &str) -> Option<Document> {
        let projects = self
            .projects
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        projects.get(project_id).cloned()
    }

    /// Clone of a project's document, creating an empty one if needed.
    #[must_use]
    pub fn get_or_create(&self, project_id: &str) -> Document {
        self.update(project_id, |doc| doc.clone())
    }

    /// Run a closure against a project's document under the write lock,
    /// creating the project if it does not exist.
    pub fn update<F, R>(&self, project_id: &str, f: F) -> R
    where
        F: FnOnce(&mut Document) -> R,
    {
        let mut projects = self
            .projects
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let config = self.history;
        let document = projects
            .entry(project_id.to_string())
            .or_insert_with(|| Document::with_history_config(config));
        f(document)
    }

    /// Apply one command atomically and return the resulting state.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidProjectId`] for ids that cannot be
    /// persisted, or [`StoreError::Document`] if the command fails; the
    /// document is unchanged in that case.
    pub fn apply(
        &self,
        project_id: &str,
        command: Command,
    ) -> Result<(CommandOutcome, DocumentSummary), StoreError> {
        validate_project_id(project_id)?;
        self.update(project_id, |doc| -> Result<_, StoreError> {
            let outcome = command.apply(doc)?;
            Ok((outcome, doc.summary()))
        })
    }

    /// Design snapshot of a project.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ProjectNotFound`] for unknown projects.
    pub fn snapshot(&self, project_id: &str) -> Result<DesignSnapshot, StoreError> {
        let projects = self
            .projects
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        projects
            .get(project_id)
            .map(Document::snapshot)
            .ok_or_else(|| StoreError::ProjectNotFound(project_id.to_string()))
    }

    /// Replace a project's design with imported JSON, creating the project if needed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidProjectId`] for ids that cannot be
    /// persisted, or [`StoreError::Document`] if the JSON is unusable; the
    /// stored design is left untouched.
    pub fn import(&self, project_id: &str, json: &str) -> Result<DocumentSummary, StoreError> {
        validate_project_id(project_id)?;
        let snapshot = DesignSnapshot::parse(json)?;
        self.update(project_id, |doc| -> Result<_, StoreError> {
            doc.load_snapshot(snapshot)?;
            Ok(doc.summary())
        })
    }

    /// Sorted list of project ids.
    #[must_use]
    pub fn project_ids(&self) -> Vec<String> {
        let projects = self
            .projects
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let mut ids: Vec<String> = projects.keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Drop a project from memory and disk.
    pub fn remove(&self, project_id: &str) -> bool {
        let removed = {
            let mut projects = self
                .projects
                .write()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            projects.remove(project_id).is_some()
        };
        self.delete_project_file(project_id);
        removed
    }

    // -----------------------------------------------------------------------
    // Persistence
    // -----------------------------------------------------------------------

    fn project_path(data_dir: &Path, project_id: &str) -> PathBuf {
        data_dir.join(format!("{}.json", sanitize_filename(project_id)))
    }

    /// Write a project's design snapshot to the data directory.
    ///
    /// # Errors
    ///
    /// Returns an error if no data directory is configured, the id would not
    /// survive as a file name, the project is unknown, or the file cannot be
    /// written.
    pub fn save(&self, project_id: &str) -> Result<PathBuf, StoreError> {
        validate_project_id(project_id)?;
        let data_dir = self.data_dir.as_ref().ok_or(StoreError::NoDataDir)?;
        let json = self
            .snapshot(project_id)?
            .to_json()
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        let path = Self::project_path(data_dir, project_id);
        std::fs::write(&path, json)?;
        tracing::info!(project = project_id, path = %path.display(), "saved project");
        Ok(path)
    }

    /// Load a project from the data directory, replacing any in-memory copy.
    ///
    /// # Errors
    ///
    /// Returns an error if the file doesn't exist or can't be parsed.
    pub fn load(&self, project_id: &str) -> Result<(), StoreError> {
        let data_dir = self.data_dir.as_ref().ok_or(StoreError::NoDataDir)?;
        let path = Self::project_path(data_dir, project_id);
        let contents = std::fs::read_to_string(&path)?;
        let snapshot = DesignSnapshot::parse(&contents)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        let document = Document::from_snapshot(snapshot, self.history)?;

        let mut projects = self
            .projects
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        projects.insert(project_id.to_string(), document);
        Ok(())
    }

    /// Load every persisted project in the data directory.
    ///
    /// Files that fail to parse are skipped with a warning. Returns the ids
    /// that were loaded.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory can't be read.
    pub fn load_all(&self) -> Result<Vec<String>, StoreError> {
        let data_dir = self.data_dir.as_ref().ok_or(StoreError::NoDataDir)?;
        let mut loaded = Vec::new();
        for entry in std::fs::read_dir(data_dir)? {
            let path = entry?.path();
            if !path.extension().is_some_and(|ext| ext == "json") {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            match self.load(stem) {
                Ok(()) => loaded.push(stem.to_string()),
                Err(e) => tracing::warn!("Failed to load project {stem}: {e}"),
            }
        }
        loaded.sort();
        Ok(loaded)
    }

    /// Remove a project's persisted file.
    ///
    /// No-op if the store has no data directory or the file doesn't exist.
    fn delete_project_file(&self, project_id: &str) {
        let Some(ref data_dir) = self.data_dir else {
            return;
        };
        let path = Self::project_path(data_dir, project_id);
        if path.exists() {
            if let Err(e) = std::fs::remove_file(&path) {
                tracing::warn!("Failed to delete project file {}: {e}", path.display());
            }
        }
    }
}

/// Check that a project id maps to its file name unchanged, so a saved
/// project reloads under the same id.
///
/// # Errors
///
/// Returns [`StoreError::InvalidProjectId`] for empty ids and ids with
/// characters other than alphanumerics, `-` and `_`.
pub fn validate_project_id(project_id: &str) -> Result<(), StoreError> {
    if project_id.is_empty() || sanitize_filename(project_id) != project_id {
        return Err(StoreError::InvalidProjectId(project_id.to_string()));
    }
    Ok(())
}

/// Sanitize a project id for use as a filename.
///
/// Replaces any character that is not alphanumeric, `-`, or `_` with `_`.
fn sanitize_filename(project_id: &str) -> String {
    project_id
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::{Component, ComponentKind};

    fn add_text(store: &ProjectStore, project: &str, id: &str) {
        store.update(project, |doc| {
            doc.add_component(Component::new(id, ComponentKind::Text));
        });
    }

    #[test]
    fn test_new_creates_default_project() {
        let store = ProjectStore::new();
        assert_eq!(store.project_ids(), vec![DEFAULT_PROJECT.to_string()]);
    }

    #[test]
    fn test_get_nonexistent_returns_none() {
        let store = ProjectStore::new();
        assert!(store.get("nonexistent").is_none());
        assert!(matches!(
            store.snapshot("nonexistent"),
            Err(StoreError::ProjectNotFound(_))
        ));
    }

    #[test]
    fn test_update_creates_project() {
        let store = ProjectStore::new();
        add_text(&store, "site", "hello");
        let doc = store.get("site").expect("project");
        assert_eq!(doc.components().len(), 1);
    }

    #[test]
    fn test_history_config_applies_to_new_projects() {
        let store = ProjectStore::new().with_history_config(HistoryConfig::with_max_entries(2));
        for id in ["a", "b", "c"] {
            add_text(&store, "site", id);
        }
        assert_eq!(store.get("site").expect("project").history().len(), 2);
    }

    #[test]
    fn test_apply_command() {
        let store = ProjectStore::new();
        let command: Command =
            serde_json::from_str(r#"{"type":"addPage","name":"About"}"#).expect("command");
        let (outcome, summary) = store.apply(DEFAULT_PROJECT, command).expect("apply");
        assert!(outcome.changed);
        assert_eq!(summary.current_page_id, "about");
    }

    #[test]
    fn test_import_failure_keeps_design() {
        let store = ProjectStore::new();
        add_text(&store, DEFAULT_PROJECT, "keep");
        assert!(store.import(DEFAULT_PROJECT, "{}").is_err());
        let doc = store.get(DEFAULT_PROJECT).expect("project");
        assert!(doc.component("keep").is_some());
    }

    #[test]
    fn test_save_requires_data_dir() {
        let store = ProjectStore::new();
        assert!(matches!(
            store.save(DEFAULT_PROJECT),
            Err(StoreError::NoDataDir)
        ));
    }

    #[test]
    fn test_persistence_save_and_load() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = ProjectStore::with_data_dir(dir.path()).expect("store");
        add_text(&store, "my-site", "hello");
        let path = store.save("my-site").expect("save");
        assert!(path.ends_with("my-site.json"));

        let reloaded = ProjectStore::with_data_dir(dir.path()).expect("store");
        let ids = reloaded.load_all().expect("load");
        assert_eq!(ids, vec!["my-site".to_string()]);
        let doc = reloaded.get("my-site").expect("project");
        assert!(doc.component("hello").is_some());
    }

    #[test]
    fn test_ids_that_would_be_renamed_on_disk_are_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = ProjectStore::with_data_dir(dir.path()).expect("store");
        let command: Command = serde_json::from_str(r#"{"type":"toggleGrid"}"#).expect("command");

        assert!(matches!(
            store.apply("my project", command),
            Err(StoreError::InvalidProjectId(_))
        ));
        assert!(matches!(
            store.import("../escape", r#"{"components":[]}"#),
            Err(StoreError::InvalidProjectId(_))
        ));
        assert!(store.get("my project").is_none());

        add_text(&store, "my project", "hello");
        assert!(matches!(
            store.save("my project"),
            Err(StoreError::InvalidProjectId(_))
        ));
        assert!(std::fs::read_dir(dir.path()).expect("read dir").next().is_none());

        assert!(validate_project_id("landing_v2").is_ok());
        assert!(validate_project_id("").is_err());
    }

    #[test]
    fn test_load_all_skips_corrupt_files() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join("broken.json"), "nope").expect("write");
        std::fs::write(dir.path().join("notes.txt"), "ignored").expect("write");
        let store = ProjectStore::with_data_dir(dir.path()).expect("store");
        assert!(store.load_all().expect("load").is_empty());
    }

    #[test]
    fn test_remove_deletes_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = ProjectStore::with_data_dir(dir.path()).expect("store");
        add_text(&store, "site", "a");
        let path = store.save("site").expect("save");
        assert!(store.remove("site"));
        assert!(!path.exists());
        assert!(!store.remove("site"));
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("abc-123_x"), "abc-123_x");
        assert_eq!(sanitize_filename("../etc/passwd"), "___etc_passwd");
    }
}
