//! Model builder options.

use serde::{Deserialize, Serialize};

use crate::style::MeasurementUnit;

/// Default font size in points.
pub const DEFAULT_FONT_SIZE: f32 = 12.0;

/// Options for building the document model.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildOptions {
    /// Font size (pt) used when no ancestor specifies one
    pub default_font_size: f32,

    /// Unit applied to unit-less CSS numbers
    pub measurement_unit: MeasurementUnit,

    /// Handling of rows shorter than the widest row
    pub short_rows: ShortRowPolicy,
}

impl BuildOptions {
    /// Create new build options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the default font size in points.
    pub fn with_default_font_size(mut self, size: f32) -> Self {
        self.default_font_size = size;
        self
    }

    /// Set the unit for unit-less CSS numbers.
    pub fn with_measurement_unit(mut self, unit: MeasurementUnit) -> Self {
        self.measurement_unit = unit;
        self
    }

    /// Set the short row policy.
    pub fn with_short_rows(mut self, policy: ShortRowPolicy) -> Self {
        self.short_rows = policy;
        self
    }
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            default_font_size: DEFAULT_FONT_SIZE,
            measurement_unit: MeasurementUnit::Points,
            short_rows: ShortRowPolicy::Pad,
        }
    }
}

/// Handling of table rows with fewer cells than the table has columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShortRowPolicy {
    /// Right-pad with empty cells
    #[default]
    Pad,
    /// Fail with a ragged table error
    Reject,
}
