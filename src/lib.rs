//! Justified grid layout.
//!
//! Packs items of known aspect ratio into rows that span a container of fixed width, each row
//! as close as possible to a target height. The result is pure geometry, ready for any renderer.
//!
//! ```
//! use justified_layout::config::{BoxSpacing, ContainerPadding, LayoutConfig};
//! use justified_layout::{compute_layout, ItemInput};
//!
//! let config = LayoutConfig {
//!     container_width: 300.,
//!     container_padding: ContainerPadding::uniform(0.),
//!     box_spacing: BoxSpacing::uniform(0.),
//!     target_row_height: 100.,
//!     ..LayoutConfig::default()
//! };
//! let items = [ItemInput::from((1., 1.)), ItemInput::from((2., 1.)), ItemInput::from(1.)];
//!
//! let layout = compute_layout(&items, &config).unwrap();
//! assert_eq!(layout.container_height, 200.);
//! assert_eq!(layout.boxes.len(), 3);
//! assert_eq!(layout.widow_count, 1);
//! ```

pub mod layout;

pub use justified_layout_config as config;

pub use crate::layout::{
    compute_layout, ItemInput, Layout, LayoutBox, LayoutError, Row, RowSummary,
};
