use super::errors::ConfigError;
use super::options::{
    DEFAULT_DRAWER_WIDTH, DEFAULT_DRAWER_Z_INDEX, DEFAULT_PRIMARY_COLOR,
    DEFAULT_TOGGLE_BUTTON_Z_INDEX, SideDocumentOptions,
};
use crate::i18n::I18nText;
use crate::model::{
    DrawerButton, DrawerFields, DrawerPosition, PersistField,
    ToggleButtonPosition, WidthUnit,
};

/// Lower width bound used when no `drawerMinWidth` is configured.
pub const FALLBACK_MIN_WIDTH_PX: f32 = 120.0;

/// Configured drawer widths in their declared unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WidthSpec {
    default: f32,
    min: Option<f32>,
    max: Option<f32>,
    unit: WidthUnit,
}

impl WidthSpec {
    pub fn default_width(&self) -> f32 {
        self.default
    }

    pub fn min(&self) -> Option<f32> {
        self.min
    }

    pub fn max(&self) -> Option<f32> {
        self.max
    }

    pub fn unit(&self) -> WidthUnit {
        self.unit
    }

    /// Resolve the configured widths into pixel bounds.
    ///
    /// A missing minimum falls back to [`FALLBACK_MIN_WIDTH_PX`] (never above
    /// the default), a missing maximum to the viewport width (never below
    /// the default).
    pub fn bounds_px(&self, viewport_width: f32) -> WidthBounds {
        let default = self.unit.to_px(self.default, viewport_width);
        let min = match self.min {
            Some(min) => self.unit.to_px(min, viewport_width),
            None => FALLBACK_MIN_WIDTH_PX.min(default),
        };
        let max = match self.max {
            Some(max) => self.unit.to_px(max, viewport_width),
            None => viewport_width.max(default),
        };

        WidthBounds {
            min,
            max,
            default: default.clamp(min, max),
        }
    }
}

/// Width limits in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WidthBounds {
    pub min: f32,
    pub max: f32,
    pub default: f32,
}

impl WidthBounds {
    /// Clamp a candidate width, reporting whether it was out of range.
    ///
    /// `NaN` is treated as out of range and replaced by the default width.
    pub fn clamp(&self, px: f32) -> (f32, bool) {
        if px.is_nan() {
            return (self.default, true);
        }
        let clamped = px.clamp(self.min, self.max);
        (clamped, clamped != px)
    }

    pub fn contains(&self, px: f32) -> bool {
        px >= self.min && px <= self.max
    }
}

/// Fully resolved, validated option set.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectiveConfig {
    container_selector: Option<String>,
    show_toggle_button: bool,
    toggle_button_position: ToggleButtonPosition,
    toggle_button_follows_drawer_position: bool,
    drawer_position: DrawerPosition,
    width: WidthSpec,
    resizable: bool,
    close_on_outside_click: bool,
    refresh_frame_on_close: bool,
    default_src: Option<String>,
    primary_color: String,
    drawer_z_index: i32,
    toggle_button_z_index: i32,
    persist_state: bool,
    storage_key_prefix: Option<String>,
    ignore_persist_props: DrawerFields,
    buttons: Vec<DrawerButton>,
    i18n_text: I18nText,
}

impl EffectiveConfig {
    pub fn container_selector(&self) -> Option<&str> {
        self.container_selector.as_deref()
    }

    pub fn show_toggle_button(&self) -> bool {
        self.show_toggle_button
    }

    pub fn toggle_button_position(&self) -> ToggleButtonPosition {
        self.toggle_button_position
    }

    pub fn toggle_button_follows_drawer_position(&self) -> bool {
        self.toggle_button_follows_drawer_position
    }

    pub fn drawer_position(&self) -> DrawerPosition {
        self.drawer_position
    }

    pub fn width(&self) -> &WidthSpec {
        &self.width
    }

    pub fn resizable(&self) -> bool {
        self.resizable
    }

    pub fn close_on_outside_click(&self) -> bool {
        self.close_on_outside_click
    }

    pub fn refresh_frame_on_close(&self) -> bool {
        self.refresh_frame_on_close
    }

    pub fn default_src(&self) -> Option<&str> {
        self.default_src.as_deref()
    }

    pub fn primary_color(&self) -> &str {
        &self.primary_color
    }

    pub fn drawer_z_index(&self) -> i32 {
        self.drawer_z_index
    }

    pub fn toggle_button_z_index(&self) -> i32 {
        self.toggle_button_z_index
    }

    pub fn persist_state(&self) -> bool {
        self.persist_state
    }

    /// Configured storage key prefix; empty prefixes are treated as unset.
    pub fn storage_key_prefix(&self) -> Option<&str> {
        self.storage_key_prefix.as_deref()
    }

    /// Mask of fields excluded from persistence.
    pub fn ignore_persist_props(&self) -> DrawerFields {
        self.ignore_persist_props
    }

    pub fn buttons(&self) -> &[DrawerButton] {
        &self.buttons
    }

    pub fn has_button(&self, button: DrawerButton) -> bool {
        self.buttons.contains(&button)
    }

    pub fn i18n_text(&self) -> &I18nText {
        &self.i18n_text
    }

    /// Toggle button corner implied by the configuration alone.
    pub fn initial_toggle_button_position(&self) -> ToggleButtonPosition {
        if self.toggle_button_follows_drawer_position {
            self.toggle_button_position.on_edge(self.drawer_position)
        } else {
            self.toggle_button_position
        }
    }
}

/// Merge `options` over `defaults` and validate the result.
///
/// Neither input is modified; every call yields a new configuration.
pub fn resolve(
    defaults: &SideDocumentOptions,
    options: &SideDocumentOptions,
) -> Result<EffectiveConfig, ConfigError> {
    let merged = defaults.merge(options);
    let width = resolve_width(&merged)?;

    let primary_color = merged
        .primary_color
        .unwrap_or_else(|| String::from(DEFAULT_PRIMARY_COLOR));
    if !is_valid_hex_color(&primary_color) {
        return Err(ConfigError::InvalidColor(primary_color));
    }

    let ignore_persist_props = merged
        .ignore_persist_props
        .as_deref()
        .map(PersistField::mask)
        .unwrap_or_default();
    let i18n_text = match &merged.i18n_text {
        Some(overrides) => I18nText::default().with_overrides(overrides),
        None => I18nText::default(),
    };

    Ok(EffectiveConfig {
        container_selector: merged.container_selector,
        show_toggle_button: merged.show_toggle_button.unwrap_or(true),
        toggle_button_position: merged
            .toggle_button_position
            .unwrap_or_default(),
        toggle_button_follows_drawer_position: merged
            .toggle_button_follows_drawer_position
            .unwrap_or(true),
        drawer_position: merged.document_drawer_position.unwrap_or_default(),
        width,
        resizable: merged.resizable.unwrap_or(true),
        close_on_outside_click: merged.close_on_outside_click.unwrap_or(true),
        refresh_frame_on_close: merged.refresh_frame_on_close.unwrap_or(false),
        default_src: merged.default_src.filter(|src| !src.is_empty()),
        primary_color,
        drawer_z_index: merged.drawer_z_index.unwrap_or(DEFAULT_DRAWER_Z_INDEX),
        toggle_button_z_index: merged
            .toggle_button_z_index
            .unwrap_or(DEFAULT_TOGGLE_BUTTON_Z_INDEX),
        persist_state: merged.persist_state.unwrap_or(true),
        storage_key_prefix: merged
            .storage_key_prefix
            .filter(|prefix| !prefix.is_empty()),
        ignore_persist_props,
        buttons: merged.buttons.unwrap_or_default(),
        i18n_text,
    })
}

fn resolve_width(
    merged: &SideDocumentOptions,
) -> Result<WidthSpec, ConfigError> {
    let unit = merged.drawer_width_unit.unwrap_or_default();
    let default = checked_width(
        "drawerWidth",
        merged.drawer_width.unwrap_or(DEFAULT_DRAWER_WIDTH),
        unit,
    )?;
    let min = merged
        .drawer_min_width
        .map(|value| checked_width("drawerMinWidth", value, unit))
        .transpose()?;
    let max = merged
        .drawer_max_width
        .map(|value| checked_width("drawerMaxWidth", value, unit))
        .transpose()?;

    if let (Some(min), Some(max)) = (min, max) {
        if min > max {
            return Err(ConfigError::InvertedBounds { min, max });
        }
    }

    let lower = min.unwrap_or(0.0);
    let upper = max.unwrap_or(f32::INFINITY);
    if default < lower || default > upper {
        return Err(ConfigError::DefaultWidthOutOfBounds {
            width: default,
            min: lower,
            max: upper,
        });
    }

    Ok(WidthSpec {
        default,
        min,
        max,
        unit,
    })
}

fn checked_width(
    field: &'static str,
    value: f32,
    unit: WidthUnit,
) -> Result<f32, ConfigError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ConfigError::InvalidWidth { field, value });
    }
    if unit == WidthUnit::Percent && value > 100.0 {
        return Err(ConfigError::PercentOverflow { field, value });
    }
    Ok(value)
}

fn is_valid_hex_color(value: &str) -> bool {
    let mut chars = value.chars();
    if chars.next() != Some('#') || value.len() != 7 {
        return false;
    }
    chars.all(|ch| ch.is_ascii_hexdigit())
}
