//! Input and output types of the layout pass.

use serde::{Deserialize, Serialize};

/// Item to lay out, described only by its proportions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemInput {
    /// Natural size of the item; only the ratio matters.
    Size { width: f64, height: f64 },
    /// Width divided by height.
    AspectRatio(f64),
}

impl ItemInput {
    /// Width divided by height.
    ///
    /// Returns NaN for a size with a non-positive or non-finite dimension, so that validation
    /// rejects it the same way as a bad ratio.
    pub fn aspect_ratio(&self) -> f64 {
        match *self {
            ItemInput::Size { width, height } => {
                if width > 0. && height > 0. && width.is_finite() && height.is_finite() {
                    width / height
                } else {
                    f64::NAN
                }
            }
            ItemInput::AspectRatio(ratio) => ratio,
        }
    }
}

impl From<f64> for ItemInput {
    fn from(value: f64) -> Self {
        Self::AspectRatio(value)
    }
}

impl From<(f64, f64)> for ItemInput {
    fn from((width, height): (f64, f64)) -> Self {
        Self::Size { width, height }
    }
}

/// Geometry of a laid out item, relative to the container.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutBox {
    pub aspect_ratio: f64,
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
    /// The aspect ratio came from `force_aspect_ratio` rather than from the item.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub forced_aspect_ratio: bool,
}

impl LayoutBox {
    /// Box with the given aspect ratio and no geometry yet.
    pub fn new(aspect_ratio: f64) -> Self {
        Self {
            aspect_ratio,
            top: 0.,
            left: 0.,
            width: 0.,
            height: 0.,
            forced_aspect_ratio: false,
        }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// Summary of a completed row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RowSummary {
    pub top: f64,
    pub height: f64,
    /// Number of boxes in this row; the row's boxes follow the previous rows' boxes in
    /// [`Layout::boxes`].
    pub item_count: usize,
    pub is_breakout_row: bool,
}

/// Result of a layout pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Layout {
    /// Height the container needs to fit every row, including vertical padding.
    pub container_height: f64,
    /// Number of items in the trailing row that didn't fill up, if it was laid out.
    pub widow_count: usize,
    /// One box per laid out item, in input order.
    ///
    /// Can be shorter than the input when `max_num_rows` cut the layout off or when widows are
    /// hidden.
    pub boxes: Vec<LayoutBox>,
    pub rows: Vec<RowSummary>,
}

impl Layout {
    /// Boxes grouped by row.
    pub fn rows_with_boxes(&self) -> impl Iterator<Item = (&RowSummary, &[LayoutBox])> + '_ {
        let mut start = 0;
        self.rows.iter().map(move |row| {
            let end = start + row.item_count;
            let boxes = &self.boxes[start..end];
            start = end;
            (row, boxes)
        })
    }
}
