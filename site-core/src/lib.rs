//! # Sitecraft Core
//!
//! Design-document engine for an absolute-positioning visual website builder.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                  site-core                  │
//! ├─────────────────────────────────────────────┤
//! │  Document Store   │  History                │
//! │  - Pages          │  - Whole-page snapshots │
//! │  - Selection      │  - Bounded undo/redo    │
//! │  - View state     │                         │
//! ├─────────────────────────────────────────────┤
//! │  Grouping         │  Layout + Render Tree   │
//! │  - Bounding boxes │  - Paint order          │
//! │  - Relative kids  │  - Responsive scaling   │
//! │                   │  - Overflow detection   │
//! ├─────────────────────────────────────────────┤
//! │  Schema (JSON import/export) │ Commands     │
//! └─────────────────────────────────────────────┘
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod command;
pub mod component;
pub mod document;
pub mod error;
pub mod grouping;
pub mod history;
pub mod layout;
pub mod page;
pub mod render;
pub mod schema;
pub mod store;
pub mod templates;

pub use command::{Command, CommandOutcome};
pub use component::{
    Animation, BorderStyle, Component, ComponentId, ComponentKind, ComponentPatch, FontStyle,
    StylePatch, Styles, TextAlign, TextDecoration,
};
pub use document::{Document, DocumentSummary, PageSummary, ReorderDirection, ViewState};
pub use error::{DocumentError, DocumentResult};
pub use history::{History, HistoryConfig};
pub use layout::{ContentAlignment, PreviewMode, Rect, Viewport};
pub use page::Page;
pub use render::{PointerEvents, RenderNode, RenderTree};
pub use schema::DesignSnapshot;
pub use store::{ProjectStore, StoreError};
pub use templates::Template;

/// Site core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
