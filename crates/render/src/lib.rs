//! Chart renderer: one fixed-size PNG per look-back window.

mod chart;
mod error;
mod font;

pub use chart::ChartRenderer;
pub use error::RenderError;
