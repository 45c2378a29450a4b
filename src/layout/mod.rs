//! Justified layout logic.
//!
//! Items come in as bare aspect ratios and go out as boxes positioned inside a container of a
//! fixed width. The engine packs items greedily, left to right, into rows whose combined aspect
//! ratio best matches the container width at the target row height:
//!
//! 1. Each item is offered to the current [`Row`]. The row either keeps it (and maybe becomes
//!    full) or rejects it, completing itself without the item.
//! 2. A completed row is appended to the output and the container grows by its height.
//! 3. A rejected item is offered once more, to a fresh row. A fresh row never rejects, so every
//!    item takes at most two attempts.
//! 4. Whatever is left in the last row once the input runs out is a *widow* row. It is either
//!    laid out at the height of the row before it, or dropped when widows are hidden.
//!
//! Every N-th row can be a *breakout* row that holds a single full-width landscape item.
//!
//! The pass is a pure function of the items and the config: each call builds its own state, and
//! the same input always produces the same output.

use justified_layout_config::LayoutConfig;
use tracing::{debug, trace};

pub use self::error::LayoutError;
pub use self::row::Row;
pub use self::types::{ItemInput, Layout, LayoutBox, RowSummary};

pub mod error;
pub mod row;
pub mod types;


#[cfg(test)]
mod tests;

/// Running state of one layout pass.
#[derive(Debug)]
struct LayoutState {
    container_height: f64,
    rows: Vec<RowSummary>,
    boxes: Vec<LayoutBox>,
    widow_count: usize,
}

impl LayoutState {
    fn new(config: &LayoutConfig, capacity: usize) -> Self {
        Self {
            container_height: config.container_padding.top,
            rows: Vec::new(),
            boxes: Vec::with_capacity(capacity),
            widow_count: 0,
        }
    }

    fn create_row(&self, config: &LayoutConfig) -> Row {
        let is_breakout_row = config
            .full_width_breakout_row_cadence
            .is_some_and(|cadence| (self.rows.len() + 1) % cadence.get() == 0);
        Row::new(config, self.container_height, is_breakout_row)
    }

    fn add_row(&mut self, config: &LayoutConfig, row: Row) {
        debug_assert!(row.is_layout_complete());

        #[cfg(test)]
        row.verify_invariants();

        let summary = row.summary();
        trace!(
            "row {}: top {}, height {}, {} items{}",
            self.rows.len(),
            summary.top,
            summary.height,
            summary.item_count,
            if summary.is_breakout_row {
                ", breakout"
            } else {
                ""
            },
        );

        self.rows.push(summary);
        self.boxes.extend(row.into_items());
        self.container_height += summary.height + config.box_spacing.vertical;
    }

    fn reached_max_rows(&self, config: &LayoutConfig) -> bool {
        config
            .max_num_rows
            .is_some_and(|max_num_rows| self.rows.len() >= max_num_rows)
    }

    /// Height for the trailing row, matching the row above unless that one broke out.
    fn widow_row_height(&self, config: &LayoutConfig) -> Option<f64> {
        let last = self.rows.last()?;
        if last.is_breakout_row {
            Some(config.target_row_height)
        } else {
            Some(last.height)
        }
    }

    fn finish(mut self, config: &LayoutConfig) -> Layout {
        // Every row added spacing below itself; the last one shouldn't have.
        if !self.rows.is_empty() {
            self.container_height -= config.box_spacing.vertical;
        }
        self.container_height += config.container_padding.bottom;

        Layout {
            container_height: self.container_height,
            widow_count: self.widow_count,
            boxes: self.boxes,
            rows: self.rows,
        }
    }
}

/// Resolves and validates the aspect ratio of every item before any layout happens.
fn prepare_items(items: &[ItemInput], config: &LayoutConfig) -> Result<Vec<LayoutBox>, LayoutError> {
    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let layout_box = match config.force_aspect_ratio {
                Some(aspect_ratio) => LayoutBox {
                    forced_aspect_ratio: true,
                    ..LayoutBox::new(aspect_ratio)
                },
                None => LayoutBox::new(item.aspect_ratio()),
            };

            let aspect_ratio = layout_box.aspect_ratio;
            if !aspect_ratio.is_finite() || aspect_ratio <= 0. {
                return Err(LayoutError::InvalidInput {
                    index,
                    aspect_ratio,
                });
            }

            Ok(layout_box)
        })
        .collect()
}

/// Computes the justified layout of `items`.
///
/// Returns one box per laid out item, in input order. The result can hold fewer boxes than
/// there are items:
///
/// - once `max_num_rows` rows are complete, the remaining items are dropped;
/// - when `show_widows` is `false`, the items of the trailing row that didn't fill up are
///   dropped.
///
/// Fails with [`LayoutError::InvalidInput`] if any item has a non-finite or non-positive aspect
/// ratio; no partial layout is returned in that case.
pub fn compute_layout(items: &[ItemInput], config: &LayoutConfig) -> Result<Layout, LayoutError> {
    let _span = tracy_client::span!("compute_layout");

    let items = prepare_items(items, config)?;
    let item_count = items.len();

    let mut state = LayoutState::new(config, item_count);
    let mut current_row: Option<Row> = None;

    'items: for (idx, item) in items.into_iter().enumerate() {
        // The second attempt goes to a fresh row, which always accepts.
        for _attempt in 0..2 {
            let mut row = match current_row.take() {
                Some(row) => row,
                None => state.create_row(config),
            };

            let accepted = row.add_item(item);

            if !row.is_layout_complete() {
                debug_assert!(accepted);
                current_row = Some(row);
                break;
            }

            state.add_row(config, row);

            if state.reached_max_rows(config) {
                let dropped = item_count - idx - usize::from(accepted);
                debug!(
                    "reached {} rows, dropping the remaining {dropped} items",
                    state.rows.len()
                );
                break 'items;
            }

            if accepted {
                break;
            }
        }
    }

    if let Some(mut row) = current_row.filter(|row| !row.is_empty()) {
        if config.show_widows {
            row.force_complete(false, state.widow_row_height(config));
            state.widow_count = row.items().len();
            state.add_row(config, row);
        } else {
            debug!("hiding {} widows", row.items().len());
        }
    }

    let layout = state.finish(config);
    debug!(
        "laid out {} of {item_count} items in {} rows, container height {}",
        layout.boxes.len(),
        layout.rows.len(),
        layout.container_height,
    );
    Ok(layout)
}
