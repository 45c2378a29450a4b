//! Finalization: turning accepted items into box geometry.

use justified_layout_config::WidowLayoutStyle;
use tracing::trace;

use super::Row;

impl Row {
    /// Sets the row height and computes the geometry of every item from it.
    ///
    /// The height is clamped to the edge-case bounds. A clamped row still spans the same width
    /// as the unclamped one would, so its items no longer match their aspect ratios and have to
    /// be cropped or padded by the renderer.
    pub fn complete_layout(&mut self, new_height: f64, widow_layout_style: WidowLayoutStyle) {
        let clamped_height = f64::max(
            self.edge_case_min_row_height,
            f64::min(new_height, self.edge_case_max_row_height),
        );

        let clamped_to_native_ratio = if clamped_height != new_height {
            trace!("clamped row height {new_height} to {clamped_height}");
            new_height / clamped_height
        } else {
            1.
        };
        self.height = clamped_height;

        let mut item_width_sum = self.left;
        for item in &mut self.items {
            item.top = self.top;
            item.width = item.aspect_ratio * self.height * clamped_to_native_ratio;
            item.height = self.height;
            item.left = item_width_sum;

            item_width_sum += item.width + self.spacing;
        }

        if self.items.is_empty() {
            return;
        }

        match widow_layout_style {
            WidowLayoutStyle::Justify => {
                // Natural width of the run of boxes, spacing between them included.
                let run_width = item_width_sum - self.left - self.spacing;

                // Spread the difference across the items, rounding the cumulative error so
                // that the row ends exactly at its right edge.
                let error_width_per_item = (run_width - self.width) / self.items.len() as f64;

                if let [item] = &mut self.items[..] {
                    item.width -= round_half_up(error_width_per_item);
                } else {
                    let mut previous_error = 0.;
                    for (i, item) in self.items.iter_mut().enumerate() {
                        let cumulative_error = round_half_up((i + 1) as f64 * error_width_per_item);
                        item.left -= previous_error;
                        item.width -= cumulative_error - previous_error;
                        previous_error = cumulative_error;
                    }
                }
            }
            WidowLayoutStyle::Center => {
                // Measured against the running sum, which includes the left padding and a
                // spacing after every item.
                let center_offset = (self.width - item_width_sum) / 2. + self.spacing;
                for item in &mut self.items {
                    item.left += center_offset;
                }
            }
            WidowLayoutStyle::Left => (),
        }
    }

    /// Completes the row with whatever items it has.
    ///
    /// Used for the trailing row once there is no more input. With `fit_to_width` the items are
    /// stretched to span the full row width; otherwise the row is laid out at `row_height` (or
    /// the target row height) using the configured widow layout style.
    pub fn force_complete(&mut self, fit_to_width: bool, row_height: Option<f64>) {
        if fit_to_width && !self.items.is_empty() {
            let width = self.width_without_spacing(self.items.len());
            let height = width / self.aspect_ratio_sum();
            self.complete_layout(height, WidowLayoutStyle::Justify);
            return;
        }

        let height = row_height.unwrap_or(self.target_row_height);
        self.complete_layout(height, self.widow_layout_style);
    }
}

/// Rounds to the nearest integer, with halves going towards positive infinity.
fn round_half_up(x: f64) -> f64 {
    (x + 0.5).floor()
}
