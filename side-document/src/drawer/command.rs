use crate::model::{DrawerPosition, ToggleButtonPosition};

/// Commands accepted by the drawer reducer.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawerCommand {
    /// Show the drawer, optionally swapping the loaded content.
    Open { frame_src: Option<String> },
    Close,
    Toggle,
    Pin,
    Unpin,
    SetPosition(DrawerPosition),
    /// Requested width in pixels; clamped to the live bounds.
    SetWidth(f32),
    SetToggleButtonPosition(ToggleButtonPosition),
    /// A click landed outside the drawer.
    OutsideClick,
}
