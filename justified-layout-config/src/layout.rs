use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};

use crate::utils::{FloatOrInt, MergeWith};

/// Fully resolved layout options.
///
/// Every field has a concrete value. Build one with [`LayoutConfig::default()`] and merge
/// partially specified [`LayoutPart`]s on top of it.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    /// Width of the container, including its padding.
    pub container_width: f64,
    pub container_padding: ContainerPadding,
    pub box_spacing: BoxSpacing,
    /// Height that rows aim for.
    pub target_row_height: f64,
    /// Fraction by which a row may deviate from the target height before the row is considered
    /// too tall or too short.
    pub target_row_height_tolerance: f64,
    /// Stop after this many rows. Items that don't fit are dropped from the result.
    pub max_num_rows: Option<usize>,
    /// Lay out every item as if it had this aspect ratio.
    ///
    /// A config source setting this to `0` leaves items unforced.
    pub force_aspect_ratio: Option<f64>,
    /// Whether to lay out the trailing row that didn't fill up.
    ///
    /// When `false`, the items of that row are left out of the result entirely.
    pub show_widows: bool,
    /// Every N-th row is a breakout row holding a single full-width item.
    pub full_width_breakout_row_cadence: Option<NonZeroUsize>,
    pub widow_layout_style: WidowLayoutStyle,
    /// Absolute minimum row height; defaults to half the target row height.
    pub edge_case_min_row_height: Option<f64>,
    /// Absolute maximum row height; defaults to twice the target row height.
    pub edge_case_max_row_height: Option<f64>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            container_width: 1060.,
            container_padding: ContainerPadding::uniform(10.),
            box_spacing: BoxSpacing::uniform(10.),
            target_row_height: 320.,
            target_row_height_tolerance: 0.25,
            max_num_rows: None,
            force_aspect_ratio: None,
            show_widows: true,
            full_width_breakout_row_cadence: None,
            widow_layout_style: WidowLayoutStyle::Left,
            edge_case_min_row_height: None,
            edge_case_max_row_height: None,
        }
    }
}

impl LayoutConfig {
    /// Width available to rows: the container width without its side padding.
    pub fn available_width(&self) -> f64 {
        f64::max(
            0.,
            self.container_width - self.container_padding.left - self.container_padding.right,
        )
    }

    pub fn min_row_height(&self) -> f64 {
        self.edge_case_min_row_height
            .unwrap_or(0.5 * self.target_row_height)
    }

    pub fn max_row_height(&self) -> f64 {
        self.edge_case_max_row_height
            .unwrap_or(2. * self.target_row_height)
    }
}

impl MergeWith<LayoutPart> for LayoutConfig {
    fn merge_with(&mut self, part: &LayoutPart) {
        if let Some(x) = part.container_width {
            self.container_width = x.0;
        }
        self.container_padding.merge_with(&part.container_padding);
        self.box_spacing.merge_with(&part.box_spacing);
        if let Some(x) = part.target_row_height {
            self.target_row_height = x.0;
        }
        if let Some(x) = part.target_row_height_tolerance {
            self.target_row_height_tolerance = x.0;
        }
        if let Some(x) = part.max_num_rows {
            self.max_num_rows = Some(x as usize);
        }
        if let Some(x) = part.force_aspect_ratio {
            // Zero means not forced.
            self.force_aspect_ratio = Some(x.0).filter(|&ratio| ratio > 0.);
        }
        if let Some(x) = part.show_widows {
            self.show_widows = x;
        }
        if let Some(x) = part.full_width_breakout_row_cadence {
            // A cadence of 0 never matches any row.
            self.full_width_breakout_row_cadence = NonZeroUsize::new(x as usize);
        }
        if let Some(x) = part.widow_layout_style {
            self.widow_layout_style = x;
        }
        if let Some(x) = part.edge_case_min_row_height {
            self.edge_case_min_row_height = Some(x.0);
        }
        if let Some(x) = part.edge_case_max_row_height {
            self.edge_case_max_row_height = Some(x.0);
        }
    }
}

impl<S: knuffel::traits::ErrorSpan> knuffel::Decode<S> for LayoutConfig {
    fn decode_node(
        node: &knuffel::ast::SpannedNode<S>,
        ctx: &mut knuffel::decode::Context<S>,
    ) -> Result<Self, knuffel::errors::DecodeError<S>> {
        let part = <LayoutPart as knuffel::Decode<S>>::decode_node(node, ctx)?;
        Ok(Self::default().merged_with(&part))
    }
}

/// Layout options as written in a config source, every field optional.
#[derive(knuffel::Decode, Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutPart {
    #[knuffel(child, unwrap(argument))]
    pub container_width: Option<FloatOrInt<0, 1000000>>,
    #[knuffel(child)]
    pub container_padding: Option<PaddingPart>,
    #[knuffel(child)]
    pub box_spacing: Option<SpacingPart>,
    #[knuffel(child, unwrap(argument))]
    pub target_row_height: Option<FloatOrInt<1, 100000>>,
    #[knuffel(child, unwrap(argument))]
    pub target_row_height_tolerance: Option<FloatOrInt<0, 1>>,
    #[knuffel(child, unwrap(argument))]
    pub max_num_rows: Option<u32>,
    #[knuffel(child, unwrap(argument))]
    pub force_aspect_ratio: Option<FloatOrInt<0, 100000>>,
    #[knuffel(child, unwrap(argument))]
    pub show_widows: Option<bool>,
    #[knuffel(child, unwrap(argument))]
    pub full_width_breakout_row_cadence: Option<u32>,
    #[knuffel(child, unwrap(argument))]
    pub widow_layout_style: Option<WidowLayoutStyle>,
    #[knuffel(child, unwrap(argument))]
    pub edge_case_min_row_height: Option<FloatOrInt<1, 100000>>,
    #[knuffel(child, unwrap(argument))]
    pub edge_case_max_row_height: Option<FloatOrInt<1, 100000>>,
}

/// How to lay out the trailing row when it didn't fill up.
#[derive(knuffel::DecodeScalar, Serialize, Deserialize, Debug, Default, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum WidowLayoutStyle {
    /// Natural widths, packed against the left edge.
    #[default]
    Left,
    /// Stretch or shrink the items to fill the row width.
    Justify,
    /// Natural widths, shifted right by half the leftover row width plus one spacing.
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContainerPadding {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl ContainerPadding {
    pub const fn uniform(value: f64) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }
}

impl MergeWith<PaddingPart> for ContainerPadding {
    fn merge_with(&mut self, part: &PaddingPart) {
        if let Some(all) = part.all {
            *self = Self::uniform(all.0);
        }
        if let Some(x) = part.top {
            self.top = x.0;
        }
        if let Some(x) = part.right {
            self.right = x.0;
        }
        if let Some(x) = part.bottom {
            self.bottom = x.0;
        }
        if let Some(x) = part.left {
            self.left = x.0;
        }
    }
}

/// Container padding: a value for all sides, per-side values, or both (sides win).
///
/// ```kdl
/// container-padding 10 {
///     left 0
/// }
/// ```
#[derive(knuffel::Decode, Deserialize, Debug, Default, Clone, Copy, PartialEq)]
#[serde(from = "PaddingRepr")]
pub struct PaddingPart {
    #[knuffel(argument)]
    pub all: Option<FloatOrInt<0, 65535>>,
    #[knuffel(child, unwrap(argument))]
    pub top: Option<FloatOrInt<0, 65535>>,
    #[knuffel(child, unwrap(argument))]
    pub right: Option<FloatOrInt<0, 65535>>,
    #[knuffel(child, unwrap(argument))]
    pub bottom: Option<FloatOrInt<0, 65535>>,
    #[knuffel(child, unwrap(argument))]
    pub left: Option<FloatOrInt<0, 65535>>,
}

type Gap = FloatOrInt<0, 65535>;

#[derive(Deserialize)]
#[serde(untagged)]
enum PaddingRepr {
    Uniform(Gap),
    PerSide {
        #[serde(default)]
        top: Option<Gap>,
        #[serde(default)]
        right: Option<Gap>,
        #[serde(default)]
        bottom: Option<Gap>,
        #[serde(default)]
        left: Option<Gap>,
    },
}

impl From<PaddingRepr> for PaddingPart {
    fn from(value: PaddingRepr) -> Self {
        match value {
            PaddingRepr::Uniform(all) => Self {
                all: Some(all),
                ..Self::default()
            },
            PaddingRepr::PerSide {
                top,
                right,
                bottom,
                left,
            } => Self {
                all: None,
                top,
                right,
                bottom,
                left,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxSpacing {
    pub horizontal: f64,
    pub vertical: f64,
}

impl BoxSpacing {
    pub const fn uniform(value: f64) -> Self {
        Self {
            horizontal: value,
            vertical: value,
        }
    }
}

impl MergeWith<SpacingPart> for BoxSpacing {
    fn merge_with(&mut self, part: &SpacingPart) {
        if let Some(all) = part.all {
            *self = Self::uniform(all.0);
        }
        if let Some(x) = part.horizontal {
            self.horizontal = x.0;
        }
        if let Some(x) = part.vertical {
            self.vertical = x.0;
        }
    }
}

/// Spacing between boxes: a value for both axes, per-axis values, or both (axes win).
#[derive(knuffel::Decode, Deserialize, Debug, Default, Clone, Copy, PartialEq)]
#[serde(from = "SpacingRepr")]
pub struct SpacingPart {
    #[knuffel(argument)]
    pub all: Option<FloatOrInt<0, 65535>>,
    #[knuffel(child, unwrap(argument))]
    pub horizontal: Option<FloatOrInt<0, 65535>>,
    #[knuffel(child, unwrap(argument))]
    pub vertical: Option<FloatOrInt<0, 65535>>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SpacingRepr {
    Uniform(Gap),
    PerAxis {
        #[serde(default)]
        horizontal: Option<Gap>,
        #[serde(default)]
        vertical: Option<Gap>,
    },
}

impl From<SpacingRepr> for SpacingPart {
    fn from(value: SpacingRepr) -> Self {
        match value {
            SpacingRepr::Uniform(all) => Self {
                all: Some(all),
                ..Self::default()
            },
            SpacingRepr::PerAxis {
                horizontal,
                vertical,
            } => Self {
                all: None,
                horizontal,
                vertical,
            },
        }
    }
}
