use crate::config::{EffectiveConfig, WidthBounds};
use crate::model::{DrawerFields, DrawerPosition, ToggleButtonPosition};

/// Authoritative runtime state of one drawer.
///
/// Only the state machine in this module mutates it; everything else gets
/// a shared reference.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawerState {
    is_opened: bool,
    is_pinned: bool,
    position: DrawerPosition,
    width_px: f32,
    toggle_button_position: ToggleButtonPosition,
    frame_src: Option<String>,
}

impl DrawerState {
    /// Initial state implied by the configuration alone.
    pub(crate) fn from_config(
        config: &EffectiveConfig,
        bounds: &WidthBounds,
    ) -> Self {
        Self {
            is_opened: false,
            is_pinned: false,
            position: config.drawer_position(),
            width_px: bounds.default,
            toggle_button_position: config.initial_toggle_button_position(),
            frame_src: config.default_src().map(String::from),
        }
    }

    pub fn is_opened(&self) -> bool {
        self.is_opened
    }

    pub fn is_pinned(&self) -> bool {
        self.is_pinned
    }

    pub fn position(&self) -> DrawerPosition {
        self.position
    }

    pub fn width_px(&self) -> f32 {
        self.width_px
    }

    pub fn toggle_button_position(&self) -> ToggleButtonPosition {
        self.toggle_button_position
    }

    pub fn frame_src(&self) -> Option<&str> {
        self.frame_src.as_deref()
    }

    /// Fields whose values differ between `self` and `other`.
    pub fn diff(&self, other: &DrawerState) -> DrawerFields {
        let mut changed = DrawerFields::empty();
        changed.set(DrawerFields::OPENED, self.is_opened != other.is_opened);
        changed.set(DrawerFields::PINNED, self.is_pinned != other.is_pinned);
        changed.set(DrawerFields::POSITION, self.position != other.position);
        changed.set(DrawerFields::WIDTH, self.width_px != other.width_px);
        changed.set(
            DrawerFields::TOGGLE_BUTTON,
            self.toggle_button_position != other.toggle_button_position,
        );
        changed.set(DrawerFields::FRAME_SRC, self.frame_src != other.frame_src);
        changed
    }

    pub(crate) fn set_opened(&mut self, opened: bool) {
        self.is_opened = opened;
    }

    pub(crate) fn set_pinned(&mut self, pinned: bool) {
        self.is_pinned = pinned;
    }

    pub(crate) fn set_position(&mut self, position: DrawerPosition) {
        self.position = position;
    }

    pub(crate) fn set_width_px(&mut self, width_px: f32) {
        self.width_px = width_px;
    }

    pub(crate) fn set_toggle_button_position(
        &mut self,
        corner: ToggleButtonPosition,
    ) {
        self.toggle_button_position = corner;
    }

    pub(crate) fn set_frame_src(&mut self, frame_src: Option<String>) {
        self.frame_src = frame_src;
    }
}
