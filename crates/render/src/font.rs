use std::sync::OnceLock;

use plotters::style::{FontStyle, register_font};

use crate::RenderError;

/// DejaVu Sans, embedded so rendering never depends on system fonts.
static SANS_SERIF: &[u8] = include_bytes!("../assets/DejaVuSans.ttf");

static REGISTERED: OnceLock<Result<(), String>> = OnceLock::new();

/// Register the embedded font as `sans-serif`, once per process.
pub(crate) fn ensure_registered() -> Result<(), RenderError> {
    REGISTERED
        .get_or_init(|| {
            register_font("sans-serif", FontStyle::Normal, SANS_SERIF)
                .map_err(|_| "embedded font is not a valid TrueType font".to_owned())
        })
        .clone()
        .map_err(RenderError::Font)
}
