//! Headless state and persistence engine for an embeddable side document
//! drawer.
//!
//! The drawer is a panel sliding in from the left or right page edge. It
//! hosts a frame, can be toggled, resized, moved and pinned, and remembers
//! its state across page loads. This crate owns that state; rendering and
//! DOM wiring stay with the host.
//!
//! The main entry points are:
//! - [`SideDocumentOptions`] and [`config::resolve`], which merge partial
//!   host options over the built-in defaults into an [`EffectiveConfig`].
//! - [`SideDocument`], the per-instance state machine. It restores the
//!   persisted state on initialization, applies [`DrawerCommand`]s, writes
//!   committed changes to a [`StateStore`] and notifies
//!   [`DrawerObserver`]s.
//! - [`ResizeController`], which turns pointer drags on the resize handle
//!   into width updates, persisting only the final width.
//! - [`position`], for edge swapping and toggle button placement.
//!
//! Hosts usually:
//! 1. Parse or build [`SideDocumentOptions`].
//! 2. Call [`SideDocument::builder`], attach a store and observers, then
//!    `initialize()`.
//! 3. Forward clicks and pointer events into the document and the resize
//!    controller, and re-render on each [`DrawerChange`].

pub mod config;
pub mod drawer;
mod error;
pub mod i18n;
pub mod model;
pub mod position;
pub mod resize;
pub mod storage;

pub use config::{ConfigError, EffectiveConfig, SideDocumentOptions};
pub use drawer::{
    ChangeKind, DEFAULT_VIEWPORT_WIDTH, DrawerChange, DrawerCommand,
    DrawerObserver, DrawerState, OutOfRange, SideDocument,
    SideDocumentBuilder, Transition,
};
pub use error::{Result, SideDocumentError};
pub use i18n::{I18nKey, I18nText};
pub use model::{
    DrawerButton, DrawerFields, DrawerPosition, PersistField,
    ToggleButtonPosition, WidthUnit,
};
pub use resize::{PointerEvent, ResizeController, ResizeError};
pub use storage::{FileStore, MemoryStore, StateStore, StorageError};
