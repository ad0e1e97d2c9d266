//! Drawer edge swapping and toggle button placement.

use crate::config::EffectiveConfig;
use crate::drawer::{DrawerState, SideDocument, Transition};
use crate::model::{DrawerPosition, ToggleButtonPosition};
use crate::storage::StateStore;

/// Where and how the toggle button is drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TogglePlacement {
    pub corner: ToggleButtonPosition,
    /// Distance from the page edge of `corner`; non-zero when the button
    /// sits beside an opened drawer on the same edge.
    pub inset_px: f32,
    pub visible: bool,
    pub z_index: i32,
}

/// Move the drawer to the opposite edge.
pub fn swap_position<S: StateStore>(
    document: &mut SideDocument<S>,
) -> Transition {
    let next = document.state().position().opposite();
    document.set_position(next)
}

/// Set the toggle button corner.
///
/// When the button follows the drawer, the corner is snapped to the drawer
/// edge and only its top/bottom half is honored.
pub fn set_toggle_button_position<S: StateStore>(
    document: &mut SideDocument<S>,
    corner: ToggleButtonPosition,
) -> Transition {
    document.set_toggle_button_position(corner)
}

/// Corner the toggle button takes for a drawer on `edge`.
pub fn corner_for_edge(
    config: &EffectiveConfig,
    edge: DrawerPosition,
    current: ToggleButtonPosition,
) -> ToggleButtonPosition {
    if config.toggle_button_follows_drawer_position() {
        current.on_edge(edge)
    } else {
        current
    }
}

/// Compute the toggle button placement for the given state.
pub fn toggle_button_placement(
    state: &DrawerState,
    config: &EffectiveConfig,
) -> TogglePlacement {
    let corner = state.toggle_button_position();
    let beside_drawer = state.is_opened() && corner.edge() == state.position();

    TogglePlacement {
        corner,
        inset_px: if beside_drawer { state.width_px() } else { 0.0 },
        visible: config.show_toggle_button(),
        z_index: config.toggle_button_z_index(),
    }
}
