use std::fmt;
use std::str::FromStr;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// Page edge the drawer is anchored to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum DrawerPosition {
    Left,
    #[default]
    Right,
}

impl DrawerPosition {
    pub const ALL: [DrawerPosition; 2] =
        [DrawerPosition::Left, DrawerPosition::Right];

    /// Return the other edge.
    pub fn opposite(self) -> Self {
        match self {
            DrawerPosition::Left => DrawerPosition::Right,
            DrawerPosition::Right => DrawerPosition::Left,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DrawerPosition::Left => "left",
            DrawerPosition::Right => "right",
        }
    }
}

impl fmt::Display for DrawerPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DrawerPosition {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        DrawerPosition::ALL
            .into_iter()
            .find(|edge| edge.as_str() == value)
            .ok_or_else(|| ConfigError::UnknownVariant {
                kind: "drawer position",
                value: value.to_string(),
            })
    }
}

/// Vertical half of a toggle button corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VerticalSide {
    Top,
    Bottom,
}

/// Fixed corner the toggle button lives in.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum ToggleButtonPosition {
    TopLeft,
    TopRight,
    BottomLeft,
    #[default]
    BottomRight,
}

impl ToggleButtonPosition {
    pub const ALL: [ToggleButtonPosition; 4] = [
        ToggleButtonPosition::TopLeft,
        ToggleButtonPosition::TopRight,
        ToggleButtonPosition::BottomLeft,
        ToggleButtonPosition::BottomRight,
    ];

    /// Build a corner from its horizontal edge and vertical side.
    pub fn from_parts(edge: DrawerPosition, vertical: VerticalSide) -> Self {
        match (vertical, edge) {
            (VerticalSide::Top, DrawerPosition::Left) => Self::TopLeft,
            (VerticalSide::Top, DrawerPosition::Right) => Self::TopRight,
            (VerticalSide::Bottom, DrawerPosition::Left) => Self::BottomLeft,
            (VerticalSide::Bottom, DrawerPosition::Right) => Self::BottomRight,
        }
    }

    /// Horizontal edge of this corner.
    pub fn edge(self) -> DrawerPosition {
        match self {
            Self::TopLeft | Self::BottomLeft => DrawerPosition::Left,
            Self::TopRight | Self::BottomRight => DrawerPosition::Right,
        }
    }

    pub fn vertical(self) -> VerticalSide {
        match self {
            Self::TopLeft | Self::TopRight => VerticalSide::Top,
            Self::BottomLeft | Self::BottomRight => VerticalSide::Bottom,
        }
    }

    /// Move the corner onto `edge`, keeping the top/bottom preference.
    pub fn on_edge(self, edge: DrawerPosition) -> Self {
        Self::from_parts(edge, self.vertical())
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::TopLeft => "top-left",
            Self::TopRight => "top-right",
            Self::BottomLeft => "bottom-left",
            Self::BottomRight => "bottom-right",
        }
    }
}

impl fmt::Display for ToggleButtonPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ToggleButtonPosition {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        ToggleButtonPosition::ALL
            .into_iter()
            .find(|corner| corner.as_str() == value)
            .ok_or_else(|| ConfigError::UnknownVariant {
                kind: "toggle button position",
                value: value.to_string(),
            })
    }
}

/// Unit the configured drawer widths are expressed in.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
)]
pub enum WidthUnit {
    #[default]
    #[serde(rename = "px")]
    Px,
    #[serde(rename = "%")]
    Percent,
}

impl WidthUnit {
    /// Convert a configured width into pixels for the given viewport.
    pub fn to_px(self, value: f32, viewport_width: f32) -> f32 {
        match self {
            WidthUnit::Px => value,
            WidthUnit::Percent => value * viewport_width / 100.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            WidthUnit::Px => "px",
            WidthUnit::Percent => "%",
        }
    }
}

impl FromStr for WidthUnit {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "px" => Ok(WidthUnit::Px),
            "%" => Ok(WidthUnit::Percent),
            other => Err(ConfigError::UnknownVariant {
                kind: "width unit",
                value: other.to_string(),
            }),
        }
    }
}

/// Buttons rendered in the drawer header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DrawerButton {
    PositionChange,
    ExternalLink,
    #[serde(rename = "qrcode")]
    QrCode,
    Pin,
    Close,
}

bitflags! {
    /// Set of observable drawer fields.
    ///
    /// Used both to describe which fields a transition changed and as the
    /// mask of fields excluded from persistence.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct DrawerFields: u8 {
        const OPENED        = 1;
        const PINNED        = 1 << 1;
        const POSITION      = 1 << 2;
        const WIDTH         = 1 << 3;
        const TOGGLE_BUTTON = 1 << 4;
        const FRAME_SRC     = 1 << 5;
    }
}

/// Name of a persisted field as it appears in the stored blob and in the
/// `ignorePersistProps` option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PersistField {
    #[serde(rename = "isOpened")]
    IsOpened,
    #[serde(rename = "drawerPosition")]
    DrawerPosition,
    #[serde(rename = "drawerWidthPx")]
    DrawerWidthPx,
    #[serde(rename = "toggleButtonPosition")]
    ToggleButtonPosition,
    #[serde(rename = "frameSrc")]
    FrameSrc,
    #[serde(rename = "isPinned")]
    IsPinned,
}

impl PersistField {
    pub fn flag(self) -> DrawerFields {
        match self {
            PersistField::IsOpened => DrawerFields::OPENED,
            PersistField::DrawerPosition => DrawerFields::POSITION,
            PersistField::DrawerWidthPx => DrawerFields::WIDTH,
            PersistField::ToggleButtonPosition => DrawerFields::TOGGLE_BUTTON,
            PersistField::FrameSrc => DrawerFields::FRAME_SRC,
            PersistField::IsPinned => DrawerFields::PINNED,
        }
    }

    /// Fold a list of field names into a mask.
    pub fn mask(fields: &[PersistField]) -> DrawerFields {
        fields
            .iter()
            .fold(DrawerFields::empty(), |mask, field| mask | field.flag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_bottom_right_corner_when_moved_to_left_edge_then_keeps_bottom() {
        let corner = ToggleButtonPosition::BottomRight;

        assert_eq!(
            corner.on_edge(DrawerPosition::Left),
            ToggleButtonPosition::BottomLeft
        );
        assert_eq!(
            corner.on_edge(DrawerPosition::Right),
            ToggleButtonPosition::BottomRight
        );
    }

    #[test]
    fn given_unknown_corner_name_when_parsed_then_returns_config_error() {
        let err = "middle-left"
            .parse::<ToggleButtonPosition>()
            .expect_err("unknown corner should be rejected");

        assert!(matches!(err, ConfigError::UnknownVariant { .. }));
    }

    #[test]
    fn given_percent_unit_when_converted_then_scales_by_viewport() {
        assert_eq!(WidthUnit::Percent.to_px(25.0, 1200.0), 300.0);
        assert_eq!(WidthUnit::Px.to_px(25.0, 1200.0), 25.0);
        assert!("em".parse::<WidthUnit>().is_err());
    }

    #[test]
    fn given_ignored_field_names_when_masked_then_flags_are_combined() {
        let mask = PersistField::mask(&[
            PersistField::FrameSrc,
            PersistField::IsPinned,
        ]);

        assert_eq!(mask, DrawerFields::FRAME_SRC | DrawerFields::PINNED);
    }

    #[test]
    fn given_json_enum_names_when_deserialized_then_match_blob_format() {
        let corner: ToggleButtonPosition =
            serde_json::from_str("\"top-left\"").expect("corner should parse");
        let unit: WidthUnit =
            serde_json::from_str("\"%\"").expect("unit should parse");
        let button: DrawerButton =
            serde_json::from_str("\"qrcode\"").expect("button should parse");

        assert_eq!(corner, ToggleButtonPosition::TopLeft);
        assert_eq!(unit, WidthUnit::Percent);
        assert_eq!(button, DrawerButton::QrCode);
    }
}
