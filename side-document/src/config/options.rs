use std::fs;
use std::path::Path;

use serde::Deserialize;

use super::errors::ConfigError;
use crate::i18n::I18nTextOptions;
use crate::model::{
    DrawerButton, DrawerPosition, PersistField, ToggleButtonPosition,
    WidthUnit,
};

pub const DEFAULT_DRAWER_WIDTH: f32 = 320.0;
pub const DEFAULT_PRIMARY_COLOR: &str = "#236ad4";
pub const DEFAULT_DRAWER_Z_INDEX: i32 = 1000;
pub const DEFAULT_TOGGLE_BUTTON_Z_INDEX: i32 = 1001;
pub const DEFAULT_SRC: &str =
    "https://try0.github.io/mkdocs-toc-md/sample/site/mkdocs-toc-md.html#usage";

/// Partial drawer configuration supplied by the host.
///
/// Every field is optional. `None` (absent or `null` in JSON) means "use
/// the default"; vectors replace the default list as a whole.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SideDocumentOptions {
    pub container_selector: Option<String>,
    pub show_toggle_button: Option<bool>,
    pub toggle_button_position: Option<ToggleButtonPosition>,
    pub toggle_button_follows_drawer_position: Option<bool>,
    pub document_drawer_position: Option<DrawerPosition>,
    pub drawer_width: Option<f32>,
    pub drawer_min_width: Option<f32>,
    pub drawer_max_width: Option<f32>,
    pub drawer_width_unit: Option<WidthUnit>,
    pub resizable: Option<bool>,
    pub close_on_outside_click: Option<bool>,
    pub refresh_frame_on_close: Option<bool>,
    pub default_src: Option<String>,
    pub primary_color: Option<String>,
    pub drawer_z_index: Option<i32>,
    pub toggle_button_z_index: Option<i32>,
    pub persist_state: Option<bool>,
    pub storage_key_prefix: Option<String>,
    pub ignore_persist_props: Option<Vec<PersistField>>,
    pub buttons: Option<Vec<DrawerButton>>,
    pub i18n_text: Option<I18nTextOptions>,
}

impl SideDocumentOptions {
    /// Built-in defaults used under every user configuration.
    pub fn defaults() -> Self {
        Self {
            container_selector: None,
            show_toggle_button: Some(true),
            toggle_button_position: Some(ToggleButtonPosition::BottomRight),
            toggle_button_follows_drawer_position: Some(true),
            document_drawer_position: Some(DrawerPosition::Right),
            drawer_width: Some(DEFAULT_DRAWER_WIDTH),
            drawer_min_width: None,
            drawer_max_width: None,
            drawer_width_unit: Some(WidthUnit::Px),
            resizable: Some(true),
            close_on_outside_click: Some(true),
            refresh_frame_on_close: Some(false),
            default_src: Some(String::from(DEFAULT_SRC)),
            primary_color: Some(String::from(DEFAULT_PRIMARY_COLOR)),
            drawer_z_index: Some(DEFAULT_DRAWER_Z_INDEX),
            toggle_button_z_index: Some(DEFAULT_TOGGLE_BUTTON_Z_INDEX),
            persist_state: Some(true),
            storage_key_prefix: None,
            ignore_persist_props: Some(Vec::new()),
            buttons: Some(vec![
                DrawerButton::PositionChange,
                DrawerButton::ExternalLink,
                DrawerButton::Pin,
                DrawerButton::Close,
            ]),
            i18n_text: None,
        }
    }

    /// Parse options from a JSON document, rejecting unknown fields.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse an options file.
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Layer `overlay` on top of `self`.
    ///
    /// `Some` values in the overlay win; nested i18n text is merged per key.
    pub fn merge(&self, overlay: &SideDocumentOptions) -> Self {
        fn pick<T: Clone>(top: &Option<T>, bottom: &Option<T>) -> Option<T> {
            top.clone().or_else(|| bottom.clone())
        }

        let i18n_text = match (&self.i18n_text, &overlay.i18n_text) {
            (Some(bottom), Some(top)) => Some(bottom.merge(top)),
            (bottom, top) => pick(top, bottom),
        };

        Self {
            container_selector: pick(
                &overlay.container_selector,
                &self.container_selector,
            ),
            show_toggle_button: pick(
                &overlay.show_toggle_button,
                &self.show_toggle_button,
            ),
            toggle_button_position: pick(
                &overlay.toggle_button_position,
                &self.toggle_button_position,
            ),
            toggle_button_follows_drawer_position: pick(
                &overlay.toggle_button_follows_drawer_position,
                &self.toggle_button_follows_drawer_position,
            ),
            document_drawer_position: pick(
                &overlay.document_drawer_position,
                &self.document_drawer_position,
            ),
            drawer_width: pick(&overlay.drawer_width, &self.drawer_width),
            drawer_min_width: pick(
                &overlay.drawer_min_width,
                &self.drawer_min_width,
            ),
            drawer_max_width: pick(
                &overlay.drawer_max_width,
                &self.drawer_max_width,
            ),
            drawer_width_unit: pick(
                &overlay.drawer_width_unit,
                &self.drawer_width_unit,
            ),
            resizable: pick(&overlay.resizable, &self.resizable),
            close_on_outside_click: pick(
                &overlay.close_on_outside_click,
                &self.close_on_outside_click,
            ),
            refresh_frame_on_close: pick(
                &overlay.refresh_frame_on_close,
                &self.refresh_frame_on_close,
            ),
            default_src: pick(&overlay.default_src, &self.default_src),
            primary_color: pick(&overlay.primary_color, &self.primary_color),
            drawer_z_index: pick(&overlay.drawer_z_index, &self.drawer_z_index),
            toggle_button_z_index: pick(
                &overlay.toggle_button_z_index,
                &self.toggle_button_z_index,
            ),
            persist_state: pick(&overlay.persist_state, &self.persist_state),
            storage_key_prefix: pick(
                &overlay.storage_key_prefix,
                &self.storage_key_prefix,
            ),
            ignore_persist_props: pick(
                &overlay.ignore_persist_props,
                &self.ignore_persist_props,
            ),
            buttons: pick(&overlay.buttons, &self.buttons),
            i18n_text,
        }
    }
}
