//! Inline CSS support: colors, declaration parsing and the style cascade.

mod color;
mod css;
mod record;

pub use color::{lookup_named, named_colors, resolve_color, Rgb};
pub use css::{parse_length, parse_style, SUPPORTED_PROPERTIES};
pub use record::{
    FontStyle, FontWeight, Length, LineHeight, Margin, MeasurementUnit, StyleRecord, TextAlign,
    TextDecoration, POINTS_PER_PIXEL,
};
