use thiserror::Error;

/// Error aborting a layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum LayoutError {
    /// An item's aspect ratio is NaN, infinite, zero or negative.
    #[error("item {index} has an invalid aspect ratio: {aspect_ratio}")]
    InvalidInput { index: usize, aspect_ratio: f64 },
}
