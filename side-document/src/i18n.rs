use serde::Deserialize;

/// Keys of the display strings used by the drawer chrome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum I18nKey {
    ToggleButtonOpenTooltip,
    ToggleButtonCloseTooltip,
    CloseButtonTooltip,
    ExternalLinkTooltip,
    PositionChangeButtonTooltip,
    ResizeBarTooltip,
    PinButtonTooltip,
    QrCodeButtonTooltip,
    DocumentTitle,
}

/// Fully populated display strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct I18nText {
    toggle_button_open_tooltip: String,
    toggle_button_close_tooltip: String,
    close_button_tooltip: String,
    external_link_tooltip: String,
    position_change_button_tooltip: String,
    resize_bar_tooltip: String,
    pin_button_tooltip: String,
    qrcode_button_tooltip: String,
    document_title: String,
}

impl I18nText {
    /// Look up the string for `key`.
    ///
    /// Empty entries fall back to `fallback`, which may itself be empty.
    pub fn text<'a>(&'a self, key: I18nKey, fallback: &'a str) -> &'a str {
        let value = self.raw(key);
        if value.is_empty() { fallback } else { value }
    }

    /// Return a copy with every `Some` override applied.
    pub fn with_overrides(&self, overrides: &I18nTextOptions) -> Self {
        let pick = |value: &Option<String>, current: &String| {
            value.clone().unwrap_or_else(|| current.clone())
        };

        Self {
            toggle_button_open_tooltip: pick(
                &overrides.toggle_button_open_tooltip,
                &self.toggle_button_open_tooltip,
            ),
            toggle_button_close_tooltip: pick(
                &overrides.toggle_button_close_tooltip,
                &self.toggle_button_close_tooltip,
            ),
            close_button_tooltip: pick(
                &overrides.close_button_tooltip,
                &self.close_button_tooltip,
            ),
            external_link_tooltip: pick(
                &overrides.external_link_tooltip,
                &self.external_link_tooltip,
            ),
            position_change_button_tooltip: pick(
                &overrides.position_change_button_tooltip,
                &self.position_change_button_tooltip,
            ),
            resize_bar_tooltip: pick(
                &overrides.resize_bar_tooltip,
                &self.resize_bar_tooltip,
            ),
            pin_button_tooltip: pick(
                &overrides.pin_button_tooltip,
                &self.pin_button_tooltip,
            ),
            qrcode_button_tooltip: pick(
                &overrides.qrcode_button_tooltip,
                &self.qrcode_button_tooltip,
            ),
            document_title: pick(
                &overrides.document_title,
                &self.document_title,
            ),
        }
    }

    fn raw(&self, key: I18nKey) -> &str {
        match key {
            I18nKey::ToggleButtonOpenTooltip => {
                &self.toggle_button_open_tooltip
            },
            I18nKey::ToggleButtonCloseTooltip => {
                &self.toggle_button_close_tooltip
            },
            I18nKey::CloseButtonTooltip => &self.close_button_tooltip,
            I18nKey::ExternalLinkTooltip => &self.external_link_tooltip,
            I18nKey::PositionChangeButtonTooltip => {
                &self.position_change_button_tooltip
            },
            I18nKey::ResizeBarTooltip => &self.resize_bar_tooltip,
            I18nKey::PinButtonTooltip => &self.pin_button_tooltip,
            I18nKey::QrCodeButtonTooltip => &self.qrcode_button_tooltip,
            I18nKey::DocumentTitle => &self.document_title,
        }
    }
}

impl Default for I18nText {
    fn default() -> Self {
        Self {
            toggle_button_open_tooltip: String::from("開く"),
            toggle_button_close_tooltip: String::from("閉じる"),
            close_button_tooltip: String::from("閉じる"),
            external_link_tooltip: String::from("新しいタブで開く"),
            position_change_button_tooltip: String::from("表示位置を変更"),
            resize_bar_tooltip: String::from("サイズを変更"),
            pin_button_tooltip: String::from("固定"),
            qrcode_button_tooltip: String::from("QRコードを表示"),
            document_title: String::from("ドキュメント"),
        }
    }
}

/// Partial display strings supplied by the host.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct I18nTextOptions {
    pub toggle_button_open_tooltip: Option<String>,
    pub toggle_button_close_tooltip: Option<String>,
    pub close_button_tooltip: Option<String>,
    pub external_link_tooltip: Option<String>,
    pub position_change_button_tooltip: Option<String>,
    pub resize_bar_tooltip: Option<String>,
    pub pin_button_tooltip: Option<String>,
    #[serde(rename = "qrcodeButtonTooltip")]
    pub qrcode_button_tooltip: Option<String>,
    pub document_title: Option<String>,
}

impl I18nTextOptions {
    /// Layer `overlay` on top of `self`, field by field.
    pub fn merge(&self, overlay: &I18nTextOptions) -> Self {
        let pick = |top: &Option<String>, bottom: &Option<String>| {
            top.clone().or_else(|| bottom.clone())
        };

        Self {
            toggle_button_open_tooltip: pick(
                &overlay.toggle_button_open_tooltip,
                &self.toggle_button_open_tooltip,
            ),
            toggle_button_close_tooltip: pick(
                &overlay.toggle_button_close_tooltip,
                &self.toggle_button_close_tooltip,
            ),
            close_button_tooltip: pick(
                &overlay.close_button_tooltip,
                &self.close_button_tooltip,
            ),
            external_link_tooltip: pick(
                &overlay.external_link_tooltip,
                &self.external_link_tooltip,
            ),
            position_change_button_tooltip: pick(
                &overlay.position_change_button_tooltip,
                &self.position_change_button_tooltip,
            ),
            resize_bar_tooltip: pick(
                &overlay.resize_bar_tooltip,
                &self.resize_bar_tooltip,
            ),
            pin_button_tooltip: pick(
                &overlay.pin_button_tooltip,
                &self.pin_button_tooltip,
            ),
            qrcode_button_tooltip: pick(
                &overlay.qrcode_button_tooltip,
                &self.qrcode_button_tooltip,
            ),
            document_title: pick(
                &overlay.document_title,
                &self.document_title,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_override_when_applied_then_only_that_key_changes() {
        let overrides = I18nTextOptions {
            document_title: Some(String::from("Docs")),
            ..I18nTextOptions::default()
        };

        let text = I18nText::default().with_overrides(&overrides);

        assert_eq!(text.text(I18nKey::DocumentTitle, ""), "Docs");
        assert_eq!(text.text(I18nKey::ResizeBarTooltip, ""), "サイズを変更");
    }

    #[test]
    fn given_empty_entry_when_looked_up_then_falls_back() {
        let overrides = I18nTextOptions {
            close_button_tooltip: Some(String::new()),
            ..I18nTextOptions::default()
        };
        let text = I18nText::default().with_overrides(&overrides);

        assert_eq!(text.text(I18nKey::CloseButtonTooltip, "Close"), "Close");
        assert_eq!(text.text(I18nKey::CloseButtonTooltip, ""), "");
    }

    #[test]
    fn given_two_partials_when_merged_then_overlay_wins_per_field() {
        let base = I18nTextOptions {
            pin_button_tooltip: Some(String::from("Pin")),
            document_title: Some(String::from("Base")),
            ..I18nTextOptions::default()
        };
        let overlay = I18nTextOptions {
            document_title: Some(String::from("Overlay")),
            ..I18nTextOptions::default()
        };

        let merged = base.merge(&overlay);

        assert_eq!(merged.pin_button_tooltip.as_deref(), Some("Pin"));
        assert_eq!(merged.document_title.as_deref(), Some("Overlay"));
    }
}
