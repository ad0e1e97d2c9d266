use thiserror::Error;

/// Errors emitted while parsing or resolving drawer options.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A closed enumeration received a value outside its variants.
    #[error("unknown {kind}: {value:?}")]
    UnknownVariant { kind: &'static str, value: String },
    /// A width option was not a positive finite number.
    #[error("{field} must be a positive number, got {value}")]
    InvalidWidth { field: &'static str, value: f32 },
    /// A percentage width exceeded the whole viewport.
    #[error("{field} must not exceed 100%, got {value}")]
    PercentOverflow { field: &'static str, value: f32 },
    #[error("drawerMinWidth ({min}) is greater than drawerMaxWidth ({max})")]
    InvertedBounds { min: f32, max: f32 },
    #[error("drawerWidth ({width}) is outside of [{min}, {max}]")]
    DefaultWidthOutOfBounds { width: f32, min: f32, max: f32 },
    #[error("primaryColor must be a #rrggbb color, got {0:?}")]
    InvalidColor(String),
    /// Options payload could not be decoded.
    #[error("options JSON failed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("options IO failed: {0}")]
    Io(#[from] std::io::Error),
}
