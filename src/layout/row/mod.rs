//! A Row is one horizontal line of boxes sharing a common height.
//!
//! ## Lifecycle
//!
//! ```text
//! Row::new ──► add_item ──► add_item ──► ... ──► complete_layout
//!   (open, height 0)                            (height > 0, read-only)
//! ```
//!
//! Items are appended while the row is open. `add_item` decides whether the row is full and
//! finalizes it; the engine force-completes the trailing row once the input runs out. After
//! completion the geometry of every item is fixed and the row only hands its items out.

use justified_layout_config::{LayoutConfig, WidowLayoutStyle};

use super::types::{LayoutBox, RowSummary};

mod layout;
mod operations;

/// A horizontal line of boxes in the justified layout.
#[derive(Debug, Clone)]
pub struct Row {
    /// Top of the row, relative to the container.
    top: f64,
    /// Left edge of the row, equal to the container's left padding.
    left: f64,
    /// Width available to the row, not including container padding.
    width: f64,
    /// Horizontal spacing between boxes.
    spacing: f64,

    target_row_height: f64,
    /// Aspect ratio sum below which the row would be too tall at the target height.
    min_aspect_ratio: f64,
    /// Aspect ratio sum above which the row would be too short at the target height.
    max_aspect_ratio: f64,

    edge_case_min_row_height: f64,
    edge_case_max_row_height: f64,

    widow_layout_style: WidowLayoutStyle,
    is_breakout_row: bool,

    items: Vec<LayoutBox>,
    /// Zero until the layout of the row is complete.
    height: f64,
}

impl Row {
    pub fn new(config: &LayoutConfig, top: f64, is_breakout_row: bool) -> Self {
        let width = config.available_width();
        let target_row_height = config.target_row_height;
        let tolerance = config.target_row_height_tolerance;

        Self {
            top,
            left: config.container_padding.left,
            width,
            spacing: config.box_spacing.horizontal,
            target_row_height,
            min_aspect_ratio: width / target_row_height * (1. - tolerance),
            max_aspect_ratio: width / target_row_height * (1. + tolerance),
            edge_case_min_row_height: config.min_row_height(),
            edge_case_max_row_height: config.max_row_height(),
            widow_layout_style: config.widow_layout_style,
            is_breakout_row,
            items: Vec::new(),
            height: 0.,
        }
    }

    pub fn is_layout_complete(&self) -> bool {
        self.height > 0.
    }

    pub fn is_breakout_row(&self) -> bool {
        self.is_breakout_row
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn top(&self) -> f64 {
        self.top
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn target_row_height(&self) -> f64 {
        self.target_row_height
    }

    pub fn items(&self) -> &[LayoutBox] {
        &self.items
    }

    pub fn into_items(self) -> Vec<LayoutBox> {
        self.items
    }

    pub fn summary(&self) -> RowSummary {
        RowSummary {
            top: self.top,
            height: self.height,
            item_count: self.items.len(),
            is_breakout_row: self.is_breakout_row,
        }
    }

    /// Width left for the boxes themselves once spacing between `count` boxes is taken out.
    fn width_without_spacing(&self, count: usize) -> f64 {
        let gaps = count.saturating_sub(1) as f64;
        f64::max(0., self.width - gaps * self.spacing)
    }

    fn aspect_ratio_sum(&self) -> f64 {
        self.items.iter().map(|item| item.aspect_ratio).sum()
    }
}
