//! Option resolution: partial host options merged over built-in defaults
//! into a validated [`EffectiveConfig`].

mod errors;
mod options;
mod resolve;

pub use errors::ConfigError;
pub use options::{
    DEFAULT_DRAWER_WIDTH, DEFAULT_DRAWER_Z_INDEX, DEFAULT_PRIMARY_COLOR,
    DEFAULT_SRC, DEFAULT_TOGGLE_BUTTON_Z_INDEX, SideDocumentOptions,
};
pub use resolve::{
    EffectiveConfig, FALLBACK_MIN_WIDTH_PX, WidthBounds, WidthSpec, resolve,
};
