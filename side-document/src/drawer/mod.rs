//! Drawer state machine.
//!
//! [`SideDocument`] owns the [`DrawerState`] of one drawer instance. Every
//! mutation goes through [`DrawerCommand`]s; an effective transition is
//! applied in a fixed order: state mutation, storage write (when enabled
//! and a persisted field changed), observer notification. Transitions that
//! change nothing skip the last two steps.

mod command;
mod event;
mod reducer;
mod state;

pub use command::DrawerCommand;
pub use event::{
    ChangeKind, DrawerChange, DrawerObserver, OutOfRange, Transition,
};
pub use state::DrawerState;

use crate::config::{
    ConfigError, EffectiveConfig, SideDocumentOptions, WidthBounds, resolve,
};
use crate::model::{DrawerFields, DrawerPosition, ToggleButtonPosition};
use crate::position::corner_for_edge;
use crate::storage::{self, MemoryStore, PersistPolicy, StateStore};
use reducer::DrawerCtx;

/// Viewport width assumed until the host reports one.
pub const DEFAULT_VIEWPORT_WIDTH: f32 = 1280.0;

/// Builder collecting everything a [`SideDocument`] needs before its first
/// notification.
pub struct SideDocumentBuilder<S> {
    defaults: SideDocumentOptions,
    options: SideDocumentOptions,
    store: S,
    viewport_width: f32,
    observers: Vec<Box<dyn DrawerObserver>>,
}

impl<S: StateStore> SideDocumentBuilder<S> {
    /// Replace the storage backend.
    pub fn with_store<T: StateStore>(self, store: T) -> SideDocumentBuilder<T> {
        SideDocumentBuilder {
            defaults: self.defaults,
            options: self.options,
            store,
            viewport_width: self.viewport_width,
            observers: self.observers,
        }
    }

    /// Replace the built-in defaults the options are merged over.
    pub fn with_defaults(mut self, defaults: SideDocumentOptions) -> Self {
        self.defaults = defaults;
        self
    }

    /// Viewport width used to resolve percentage widths.
    pub fn with_viewport_width(mut self, viewport_width: f32) -> Self {
        self.viewport_width = viewport_width;
        self
    }

    pub fn with_observer(
        mut self,
        observer: impl DrawerObserver + 'static,
    ) -> Self {
        self.observers.push(Box::new(observer));
        self
    }

    /// Resolve options, restore persisted state and notify observers once.
    pub fn initialize(self) -> Result<SideDocument<S>, ConfigError> {
        let config = resolve(&self.defaults, &self.options)?;
        let viewport_width = sanitize_viewport(self.viewport_width)
            .unwrap_or(DEFAULT_VIEWPORT_WIDTH);
        let bounds = config.width().bounds_px(viewport_width);
        let key = storage::state_key(config.storage_key_prefix());

        let mut state = DrawerState::from_config(&config, &bounds);
        if config.persist_state() {
            if let Some(blob) = storage::load(&self.store, &key) {
                let policy = PersistPolicy::new(config.ignore_persist_props());
                let restored = policy.restore(&blob, &mut state);
                log::debug!("restored drawer fields {restored:?} from {key:?}");
            }
        }
        reconcile(&mut state, &config, &bounds);

        let mut document = SideDocument {
            defaults: self.defaults,
            options: self.options,
            committed_width_px: state.width_px(),
            config,
            state,
            store: self.store,
            key,
            viewport_width,
            observers: self.observers,
        };
        document.notify(DrawerFields::all(), ChangeKind::Initial, false);
        Ok(document)
    }
}

/// One drawer instance: effective configuration, live state, storage.
pub struct SideDocument<S = MemoryStore> {
    defaults: SideDocumentOptions,
    options: SideDocumentOptions,
    config: EffectiveConfig,
    state: DrawerState,
    /// Last width that went through a committed transition. Differs from
    /// the live width only while a resize drag is in progress.
    committed_width_px: f32,
    store: S,
    key: String,
    viewport_width: f32,
    observers: Vec<Box<dyn DrawerObserver>>,
}

impl SideDocument<MemoryStore> {
    /// Start building a drawer backed by an in-memory store.
    pub fn builder(
        options: SideDocumentOptions,
    ) -> SideDocumentBuilder<MemoryStore> {
        SideDocumentBuilder {
            defaults: SideDocumentOptions::defaults(),
            options,
            store: MemoryStore::new(),
            viewport_width: DEFAULT_VIEWPORT_WIDTH,
            observers: Vec::new(),
        }
    }
}

impl<S: StateStore> SideDocument<S> {
    /// Build a drawer over `store` with default viewport and no observers.
    pub fn initialize(
        options: SideDocumentOptions,
        store: S,
    ) -> Result<Self, ConfigError> {
        SideDocument::builder(options).with_store(store).initialize()
    }

    pub fn state(&self) -> &DrawerState {
        &self.state
    }

    pub fn config(&self) -> &EffectiveConfig {
        &self.config
    }

    /// Accumulated host options (defaults excluded).
    pub fn options(&self) -> &SideDocumentOptions {
        &self.options
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn storage_key(&self) -> &str {
        &self.key
    }

    pub fn viewport_width(&self) -> f32 {
        self.viewport_width
    }

    /// Width limits in pixels for the current viewport.
    pub fn width_bounds(&self) -> WidthBounds {
        self.config.width().bounds_px(self.viewport_width)
    }

    pub fn is_opened(&self) -> bool {
        self.state.is_opened()
    }

    pub fn is_pinned(&self) -> bool {
        self.state.is_pinned()
    }

    /// Whether an outside click would close the drawer right now.
    pub fn should_close_on_outside_click(&self) -> bool {
        reducer::should_close_on_outside_click(&self.state, &self.config)
    }

    /// URL for the "open in new tab" and QR code buttons.
    pub fn external_link(&self) -> Option<&str> {
        self.state.frame_src()
    }

    /// Register an observer; it is immediately sent the current state.
    pub fn subscribe(&mut self, mut observer: impl DrawerObserver + 'static) {
        observer.state_changed(&DrawerChange {
            state: &self.state,
            changed: DrawerFields::all(),
            kind: ChangeKind::Initial,
            reload_frame: false,
        });
        self.observers.push(Box::new(observer));
    }

    pub fn open(&mut self, frame_src: Option<&str>) -> Transition {
        self.apply(DrawerCommand::Open {
            frame_src: frame_src.map(String::from),
        })
    }

    pub fn close(&mut self) -> Transition {
        self.apply(DrawerCommand::Close)
    }

    pub fn toggle(&mut self) -> Transition {
        self.apply(DrawerCommand::Toggle)
    }

    pub fn pin(&mut self) -> Transition {
        self.apply(DrawerCommand::Pin)
    }

    pub fn unpin(&mut self) -> Transition {
        self.apply(DrawerCommand::Unpin)
    }

    pub fn set_width(&mut self, width_px: f32) -> Transition {
        self.apply(DrawerCommand::SetWidth(width_px))
    }

    pub fn set_position(&mut self, position: DrawerPosition) -> Transition {
        self.apply(DrawerCommand::SetPosition(position))
    }

    pub fn set_toggle_button_position(
        &mut self,
        corner: ToggleButtonPosition,
    ) -> Transition {
        self.apply(DrawerCommand::SetToggleButtonPosition(corner))
    }

    /// Close on an outside click unless pinned or disabled by options.
    pub fn outside_click(&mut self) -> Transition {
        self.apply(DrawerCommand::OutsideClick)
    }

    /// Apply a committed command.
    pub fn apply(&mut self, command: DrawerCommand) -> Transition {
        self.transition(command, ChangeKind::Committed)
    }

    /// Update the live width without persisting it.
    pub(crate) fn preview_width(&mut self, width_px: f32) -> Transition {
        self.transition(
            DrawerCommand::SetWidth(width_px),
            ChangeKind::Transient,
        )
    }

    /// Last committed width; the live width may differ during a drag.
    pub fn committed_width_px(&self) -> f32 {
        self.committed_width_px
    }

    /// Promote the live width to a committed, persisted change.
    pub(crate) fn commit_width(&mut self) -> Transition {
        if self.state.width_px() == self.committed_width_px {
            return Transition::noop(None);
        }
        self.committed_width_px = self.state.width_px();
        let persisted = self.persist(DrawerFields::WIDTH, false);
        self.notify(DrawerFields::WIDTH, ChangeKind::Committed, false);
        Transition::new(DrawerFields::WIDTH, persisted, None)
    }

    /// Report a new viewport width; the live width is re-clamped.
    pub fn set_viewport_width(&mut self, viewport_width: f32) -> Transition {
        let Some(viewport_width) = sanitize_viewport(viewport_width) else {
            log::debug!("ignoring invalid viewport width {viewport_width}");
            return Transition::noop(None);
        };
        self.viewport_width = viewport_width;
        self.reconcile_committed(Vec::new(), false, ChangeKind::Committed)
    }

    /// Merge `partial` over the current options and reconcile live state.
    ///
    /// Drawer edge, toggle button corner and width set explicitly in
    /// `partial` are applied to the live state. Open/closed status and
    /// loaded content are kept. On error nothing changes.
    pub fn update_config(
        &mut self,
        partial: &SideDocumentOptions,
    ) -> Result<Transition, ConfigError> {
        let options = self.options.merge(partial);
        let config = resolve(&self.defaults, &options)?;

        let previous_key = std::mem::replace(
            &mut self.key,
            storage::state_key(config.storage_key_prefix()),
        );
        let persistence_enabled = !self.config.persist_state()
            && config.persist_state();
        self.options = options;
        self.config = config;

        let mut commands = Vec::new();
        if let Some(position) = partial.document_drawer_position {
            commands.push(DrawerCommand::SetPosition(position));
        }
        if let Some(corner) = partial.toggle_button_position {
            commands.push(DrawerCommand::SetToggleButtonPosition(corner));
        }
        if partial.drawer_width.is_some() {
            let default_width = self.width_bounds().default;
            commands.push(DrawerCommand::SetWidth(default_width));
        }

        let force_write = previous_key != self.key || persistence_enabled;
        Ok(self.reconcile_committed(
            commands,
            force_write,
            ChangeKind::Reconfigured,
        ))
    }

    fn reconcile_committed(
        &mut self,
        commands: Vec<DrawerCommand>,
        force_write: bool,
        kind: ChangeKind,
    ) -> Transition {
        let bounds = self.width_bounds();
        let ctx = DrawerCtx {
            config: &self.config,
            bounds,
        };
        let mut next = self.state.clone();
        let mut sets_width = false;
        for command in commands {
            sets_width |= matches!(command, DrawerCommand::SetWidth(_));
            reducer::reduce(&mut next, command, &ctx);
        }
        reconcile(&mut next, &self.config, &bounds);
        let changed = self.state.diff(&next);
        self.state = next;
        self.committed_width_px = if sets_width {
            self.state.width_px()
        } else {
            bounds.clamp(self.committed_width_px).0
        };

        let persisted = self.persist(changed, force_write);
        if !changed.is_empty() || kind == ChangeKind::Reconfigured {
            self.notify(changed, kind, false);
        }
        Transition::new(changed, persisted, None)
    }

    fn transition(
        &mut self,
        command: DrawerCommand,
        kind: ChangeKind,
    ) -> Transition {
        let ctx = DrawerCtx {
            config: &self.config,
            bounds: self.width_bounds(),
        };
        let sets_width = matches!(command, DrawerCommand::SetWidth(_));
        let mut next = self.state.clone();
        let reduction = reducer::reduce(&mut next, command, &ctx);
        let mut changed = self.state.diff(&next);
        // An explicit width equal to a drag preview still has to be committed.
        if sets_width
            && kind != ChangeKind::Transient
            && next.width_px() != self.committed_width_px
        {
            changed |= DrawerFields::WIDTH;
        }
        if changed.is_empty() {
            return Transition::noop(reduction.out_of_range);
        }

        self.state = next;
        let persisted = match kind {
            ChangeKind::Transient => false,
            _ => {
                if changed.contains(DrawerFields::WIDTH) {
                    self.committed_width_px = self.state.width_px();
                }
                self.persist(changed, false)
            },
        };
        self.notify(changed, kind, reduction.reload_frame);
        Transition::new(changed, persisted, reduction.out_of_range)
    }

    /// Write the committed state when persistence applies to `changed`.
    fn persist(&mut self, changed: DrawerFields, force: bool) -> bool {
        if !self.config.persist_state() {
            return false;
        }
        let policy = PersistPolicy::new(self.config.ignore_persist_props());
        if !force && !policy.needs_write(changed) {
            return false;
        }

        let mut blob = policy.capture(&self.state);
        if blob.drawer_width_px.is_some() {
            blob.drawer_width_px = Some(self.committed_width_px);
        }

        match storage::save(&mut self.store, &self.key, &blob) {
            Ok(()) => true,
            Err(err) => {
                log::warn!(
                    "failed to persist drawer state to {:?}: {err}",
                    self.key
                );
                for observer in &mut self.observers {
                    observer.storage_failed(&err);
                }
                false
            },
        }
    }

    fn notify(
        &mut self,
        changed: DrawerFields,
        kind: ChangeKind,
        reload_frame: bool,
    ) {
        let change = DrawerChange {
            state: &self.state,
            changed,
            kind,
            reload_frame,
        };
        for observer in &mut self.observers {
            observer.state_changed(&change);
        }
    }
}

/// Bring a state back inside the invariants of `config`.
fn reconcile(
    state: &mut DrawerState,
    config: &EffectiveConfig,
    bounds: &WidthBounds,
) {
    let (width, clamped) = bounds.clamp(state.width_px());
    if clamped {
        log::debug!("drawer width {} clamped to {width}", state.width_px());
    }
    state.set_width_px(width);

    state.set_toggle_button_position(corner_for_edge(
        config,
        state.position(),
        state.toggle_button_position(),
    ));
}

fn sanitize_viewport(viewport_width: f32) -> Option<f32> {
    (viewport_width.is_finite() && viewport_width > 0.0)
        .then_some(viewport_width)
}
