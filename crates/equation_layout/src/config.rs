//! Layout configuration

use crate::error::{LayoutError, Result};
use serde::{Deserialize, Serialize};

/// Default font size for equations, in points
pub const DEFAULT_FONT_SIZE: f32 = 30.0;

/// Default gap between stacked rows, as a fraction of the line height
pub const DEFAULT_ROW_GAP_FACTOR: f32 = 0.5;

/// Tunables shared by every layout pass
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Font size used when a caller does not pass one
    pub font_size: f32,
    /// Vertical gap between consecutive rows, in line heights
    pub row_gap_factor: f32,
    /// Horizontal space between the anchor and its neighbours
    pub part_spacing: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            font_size: DEFAULT_FONT_SIZE,
            row_gap_factor: DEFAULT_ROW_GAP_FACTOR,
            part_spacing: 0.0,
        }
    }
}

impl LayoutConfig {
    pub fn with_font_size(mut self, font_size: f32) -> Self {
        self.font_size = font_size;
        self
    }

    pub fn with_row_gap_factor(mut self, factor: f32) -> Self {
        self.row_gap_factor = factor;
        self
    }

    pub fn with_part_spacing(mut self, spacing: f32) -> Self {
        self.part_spacing = spacing;
        self
    }

    /// Reject values no layout pass can honour
    pub fn validate(&self) -> Result<()> {
        check_font_size(self.font_size)?;
        if !self.row_gap_factor.is_finite() || self.row_gap_factor < 0.0 {
            return Err(LayoutError::InvalidConfig(format!(
                "row_gap_factor must be a non-negative number, got {}",
                self.row_gap_factor
            )));
        }
        if !self.part_spacing.is_finite() || self.part_spacing < 0.0 {
            return Err(LayoutError::InvalidConfig(format!(
                "part_spacing must be a non-negative number, got {}",
                self.part_spacing
            )));
        }
        Ok(())
    }
}

pub(crate) fn check_font_size(font_size: f32) -> Result<()> {
    if font_size.is_finite() && font_size > 0.0 {
        Ok(())
    } else {
        Err(LayoutError::InvalidFontSize(font_size))
    }
}
