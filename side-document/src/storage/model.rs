use serde::{Deserialize, Deserializer, Serialize};

use crate::drawer::DrawerState;
use crate::model::{DrawerFields, DrawerPosition, ToggleButtonPosition};

/// Durable subset of [`DrawerState`].
///
/// Fields hidden by the [`PersistPolicy`] are `None` and omitted from the
/// serialized blob. `frame_src` distinguishes "not stored" (`None`) from a
/// stored `null` (`Some(None)`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_opened: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drawer_position: Option<DrawerPosition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drawer_width_px: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub toggle_button_position: Option<ToggleButtonPosition>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "present_or_null"
    )]
    pub frame_src: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_pinned: Option<bool>,
}

fn present_or_null<'de, D>(
    deserializer: D,
) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

/// Declarative field visibility applied to every write and every restore.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PersistPolicy {
    ignored: DrawerFields,
}

impl PersistPolicy {
    pub fn new(ignored: DrawerFields) -> Self {
        Self { ignored }
    }

    /// Fields that take part in persistence.
    pub fn visible(&self) -> DrawerFields {
        DrawerFields::all().difference(self.ignored)
    }

    /// Whether a change touching `changed` needs a write.
    pub fn needs_write(&self, changed: DrawerFields) -> bool {
        self.visible().intersects(changed)
    }

    /// Project the state onto its visible fields.
    pub fn capture(&self, state: &DrawerState) -> PersistedState {
        let visible = self.visible();
        PersistedState {
            is_opened: visible
                .contains(DrawerFields::OPENED)
                .then(|| state.is_opened()),
            drawer_position: visible
                .contains(DrawerFields::POSITION)
                .then(|| state.position()),
            drawer_width_px: visible
                .contains(DrawerFields::WIDTH)
                .then(|| state.width_px()),
            toggle_button_position: visible
                .contains(DrawerFields::TOGGLE_BUTTON)
                .then(|| state.toggle_button_position()),
            frame_src: visible
                .contains(DrawerFields::FRAME_SRC)
                .then(|| state.frame_src().map(String::from)),
            is_pinned: visible
                .contains(DrawerFields::PINNED)
                .then(|| state.is_pinned()),
        }
    }

    /// Overlay the visible, present fields of `blob` onto `state`.
    ///
    /// Returns the fields that were taken from the blob. Width is written
    /// as stored; callers clamp it against the live bounds.
    pub fn restore(
        &self,
        blob: &PersistedState,
        state: &mut DrawerState,
    ) -> DrawerFields {
        let visible = self.visible();
        let mut restored = DrawerFields::empty();

        if let Some(opened) = blob.is_opened {
            if visible.contains(DrawerFields::OPENED) {
                state.set_opened(opened);
                restored |= DrawerFields::OPENED;
            }
        }
        if let Some(position) = blob.drawer_position {
            if visible.contains(DrawerFields::POSITION) {
                state.set_position(position);
                restored |= DrawerFields::POSITION;
            }
        }
        if let Some(width) = blob.drawer_width_px {
            if visible.contains(DrawerFields::WIDTH) {
                state.set_width_px(width);
                restored |= DrawerFields::WIDTH;
            }
        }
        if let Some(corner) = blob.toggle_button_position {
            if visible.contains(DrawerFields::TOGGLE_BUTTON) {
                state.set_toggle_button_position(corner);
                restored |= DrawerFields::TOGGLE_BUTTON;
            }
        }
        if let Some(frame_src) = &blob.frame_src {
            if visible.contains(DrawerFields::FRAME_SRC) {
                state.set_frame_src(frame_src.clone());
                restored |= DrawerFields::FRAME_SRC;
            }
        }
        if let Some(pinned) = blob.is_pinned {
            if visible.contains(DrawerFields::PINNED) {
                state.set_pinned(pinned);
                restored |= DrawerFields::PINNED;
            }
        }

        restored
    }
}
