use crate::{Px, TreeError};

pub const DEFAULT_ROW_HEIGHT: Px = 16;
pub const DEFAULT_OVERSCAN_ROWS: usize = 2;

/// Construction-time settings for a [`Tree`](crate::Tree) and the
/// [`Viewport`](crate::Viewport)s that page over it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TreeConfig {
    /// Uniform single-row height in px. Stored on the root node.
    pub default_row_height: Px,
    /// Extra rows resolved above and below the visible window.
    pub overscan_rows: usize,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            default_row_height: DEFAULT_ROW_HEIGHT,
            overscan_rows: DEFAULT_OVERSCAN_ROWS,
        }
    }
}

impl TreeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn row_height(mut self, px: Px) -> Self {
        self.default_row_height = px;
        self
    }

    pub fn overscan(mut self, rows: usize) -> Self {
        self.overscan_rows = rows;
        self
    }

    pub fn validate(&self) -> Result<(), TreeError> {
        if self.default_row_height <= 0 {
            return Err(TreeError::InvalidRowHeight(self.default_row_height));
        }
        Ok(())
    }
}
