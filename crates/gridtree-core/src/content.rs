//! Presentation payload carried by a node.
//!
//! Per-column values are sparse: column `i` may be missing (`None` or past the
//! end of the vector). Lookups resolve with cell value first, then the
//! node-level value where one exists, then nothing.

use crate::Color;

/// Sparse per-column values indexed by column.
pub type Cells<T> = Vec<Option<T>>;

pub(crate) const PLACEHOLDER_TEXT: &str = "...";

fn cell<T>(cells: &Cells<T>, column: usize) -> Option<&T> {
    cells.get(column).and_then(Option::as_ref)
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ItemContent {
    pub(crate) texts: Cells<String>,
    pub(crate) images: Cells<String>,
    pub(crate) font: Option<String>,
    pub(crate) cell_fonts: Cells<String>,
    pub(crate) foreground: Option<Color>,
    pub(crate) cell_foregrounds: Cells<Color>,
    pub(crate) background: Option<Color>,
    pub(crate) cell_backgrounds: Cells<Color>,
    pub(crate) checked: bool,
    pub(crate) grayed: bool,
    pub(crate) cell_checked: Vec<bool>,
    pub(crate) cell_grayed: Vec<bool>,
    pub(crate) variant: Option<String>,
}

impl ItemContent {
    /// Content of a node synthesized before its data arrived.
    pub fn placeholder() -> Self {
        Self {
            texts: vec![Some(PLACEHOLDER_TEXT.to_string())],
            ..Self::default()
        }
    }

    /// Text of `column`, or `""` when unset.
    pub fn text(&self, column: usize) -> &str {
        cell(&self.texts, column).map(String::as_str).unwrap_or("")
    }

    pub fn has_text(&self, column: usize) -> bool {
        !self.text(column).is_empty()
    }

    pub fn texts(&self) -> &[Option<String>] {
        &self.texts
    }

    pub fn image(&self, column: usize) -> Option<&str> {
        cell(&self.images, column).map(String::as_str)
    }

    pub fn font(&self) -> Option<&str> {
        self.font.as_deref()
    }

    /// Cell font when set and non-empty, else the node font.
    pub fn cell_font(&self, column: usize) -> Option<&str> {
        match cell(&self.cell_fonts, column) {
            Some(f) if !f.is_empty() => Some(f.as_str()),
            _ => self.font(),
        }
    }

    pub fn foreground(&self) -> Option<Color> {
        self.foreground
    }

    pub fn cell_foreground(&self, column: usize) -> Option<Color> {
        cell(&self.cell_foregrounds, column)
            .copied()
            .or(self.foreground)
    }

    /// Row background. Painted behind the whole row, so it is not a cell fallback.
    pub fn background(&self) -> Option<Color> {
        self.background
    }

    pub fn cell_background(&self, column: usize) -> Option<Color> {
        cell(&self.cell_backgrounds, column).copied()
    }

    pub fn is_checked(&self) -> bool {
        self.checked
    }

    pub fn is_grayed(&self) -> bool {
        self.grayed
    }

    pub fn cell_checked(&self) -> &[bool] {
        &self.cell_checked
    }

    pub fn is_cell_checked(&self, column: usize) -> bool {
        self.cell_checked.get(column).copied().unwrap_or(false)
    }

    pub fn is_cell_grayed(&self, column: usize) -> bool {
        self.cell_grayed.get(column).copied().unwrap_or(false)
    }

    pub(crate) fn toggle_cell_checked(&mut self, column: usize) {
        if self.cell_checked.len() <= column {
            self.cell_checked.resize(column + 1, false);
        }
        self.cell_checked[column] = !self.cell_checked[column];
    }

    pub fn variant(&self) -> Option<&str> {
        self.variant.as_deref()
    }
}
