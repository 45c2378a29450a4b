//! Packing: deciding whether an item belongs in the row.

use justified_layout_config::WidowLayoutStyle;

use super::Row;
use crate::layout::types::LayoutBox;

impl Row {
    /// Tries to add an item to the row.
    ///
    /// Returns `true` if the item was accepted; the row may or may not be complete afterwards.
    /// Returns `false` if the item was rejected: the row has been completed without it, and the
    /// item has to go into a new row.
    ///
    /// A row that ends up too wide at the target height either takes the item and gets shorter
    /// (cropping) or leaves it out and gets taller (padding), whichever lands closer to the
    /// target. A single item is never rejected.
    pub fn add_item(&mut self, item: LayoutBox) -> bool {
        debug_assert!(
            !self.is_layout_complete(),
            "can't add items to a completed row"
        );

        let count = self.items.len() + 1;
        let row_width_without_spacing = self.width_without_spacing(count);
        let new_aspect_ratio = self.aspect_ratio_sum() + item.aspect_ratio;
        let target_aspect_ratio = row_width_without_spacing / self.target_row_height;

        // Full-width breakout rows take a single landscape or square item.
        if self.is_breakout_row && self.items.is_empty() && item.aspect_ratio >= 1. {
            self.items.push(item);
            self.complete_layout(
                row_width_without_spacing / item.aspect_ratio,
                WidowLayoutStyle::Justify,
            );
            return true;
        }

        if new_aspect_ratio < self.min_aspect_ratio {
            // Still too tall at the target height; keep the row open.
            self.items.push(item);
            return true;
        }

        if new_aspect_ratio > self.max_aspect_ratio && !self.items.is_empty() {
            let previous_width = self.width_without_spacing(count - 1);
            let previous_aspect_ratio = self.aspect_ratio_sum();
            let previous_target_aspect_ratio = previous_width / self.target_row_height;

            // Ties go to the row with the new item.
            if (new_aspect_ratio - target_aspect_ratio).abs()
                > (previous_aspect_ratio - previous_target_aspect_ratio).abs()
            {
                self.complete_layout(
                    previous_width / previous_aspect_ratio,
                    WidowLayoutStyle::Justify,
                );
                return false;
            }
        }

        // Within tolerance, closer to the target with the item, or a lone panorama.
        self.items.push(item);
        self.complete_layout(
            row_width_without_spacing / new_aspect_ratio,
            WidowLayoutStyle::Justify,
        );
        true
    }
}
