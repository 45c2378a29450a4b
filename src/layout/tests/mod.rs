use std::num::NonZeroUsize;

use justified_layout_config::{BoxSpacing, ContainerPadding, LayoutConfig, WidowLayoutStyle};
use proptest::prelude::*;

use super::snapshot::LayoutSnapshot;
use super::*;


fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Container without padding or spacing.
fn bare_config(container_width: f64, target_row_height: f64) -> LayoutConfig {
    LayoutConfig {
        container_width,
        container_padding: ContainerPadding::uniform(0.),
        box_spacing: BoxSpacing::uniform(0.),
        target_row_height,
        ..LayoutConfig::default()
    }
}

fn items(aspect_ratios: &[f64]) -> Vec<ItemInput> {
    aspect_ratios.iter().copied().map(ItemInput::from).collect()
}

#[track_caller]
fn check(aspect_ratios: &[f64], config: &LayoutConfig) -> Layout {
    init_logging();
    compute_layout(&items(aspect_ratios), config).unwrap()
}

/// Runs the layout and renders it as a snapshot table.
#[track_caller]
fn snapshot(aspect_ratios: &[f64], config: &LayoutConfig) -> String {
    LayoutSnapshot::from(&check(aspect_ratios, config)).to_string()
}

#[test]
fn sizes_and_ratios_lay_out_the_same() {
    let config = bare_config(300., 100.);
    let sizes = [
        ItemInput::from((640., 640.)),
        ItemInput::from((1280., 640.)),
        ItemInput::from((480., 480.)),
    ];

    let from_sizes = compute_layout(&sizes, &config).unwrap();
    let from_ratios = check(&[1., 2., 1.], &config);
    assert_eq!(from_sizes, from_ratios);
}

#[test]
fn invalid_aspect_ratio_aborts_the_pass() {
    let config = bare_config(300., 100.);

    let err = compute_layout(&items(&[1., 0., 2.]), &config).unwrap_err();
    assert_eq!(
        err,
        LayoutError::InvalidInput {
            index: 1,
            aspect_ratio: 0.
        }
    );
    assert_eq!(err.to_string(), "item 1 has an invalid aspect ratio: 0");

    let err = compute_layout(&items(&[1., 2., 1., f64::NAN]), &config).unwrap_err();
    assert!(matches!(err, LayoutError::InvalidInput { index: 3, .. }));

    let err = compute_layout(&items(&[-1.5]), &config).unwrap_err();
    assert!(matches!(err, LayoutError::InvalidInput { index: 0, .. }));

    let err = compute_layout(&items(&[1., f64::INFINITY]), &config).unwrap_err();
    assert!(matches!(err, LayoutError::InvalidInput { index: 1, .. }));
}

#[test]
fn invalid_size_aborts_the_pass() {
    let config = bare_config(300., 100.);
    let items = [ItemInput::from((4., 3.)), ItemInput::from((4., 0.))];

    let err = compute_layout(&items, &config).unwrap_err();
    assert!(matches!(err, LayoutError::InvalidInput { index: 1, .. }));
}

#[test]
fn invalid_items_are_checked_past_the_row_limit() {
    let config = LayoutConfig {
        max_num_rows: Some(1),
        ..bare_config(300., 100.)
    };

    let err = compute_layout(&items(&[1., 2., 1., 1., f64::NAN]), &config).unwrap_err();
    assert!(matches!(err, LayoutError::InvalidInput { index: 4, .. }));
}

#[test]
fn forced_aspect_ratio_overrides_items() {
    let config = LayoutConfig {
        force_aspect_ratio: Some(1.5),
        ..bare_config(300., 100.)
    };

    // The forced ratio replaces even unusable ones.
    let layout = check(&[1., 2., f64::NAN, 4.], &config);
    assert_eq!(layout.boxes.len(), 4);
    for item in &layout.boxes {
        assert_eq!(item.aspect_ratio, 1.5);
        assert!(item.forced_aspect_ratio);
    }

    let config = LayoutConfig {
        force_aspect_ratio: Some(0.),
        ..bare_config(300., 100.)
    };
    let err = compute_layout(&items(&[1.]), &config).unwrap_err();
    assert!(matches!(err, LayoutError::InvalidInput { index: 0, .. }));
}

#[test]
fn items_are_not_forced_by_default() {
    let layout = check(&[1., 2., 1.], &bare_config(300., 100.));
    assert!(layout.boxes.iter().all(|item| !item.forced_aspect_ratio));
}

#[test]
fn empty_input() {
    let layout = check(&[], &LayoutConfig::default());
    assert_eq!(layout.container_height, 20.);
    assert_eq!(layout.widow_count, 0);
    assert!(layout.boxes.is_empty());
    assert!(layout.rows.is_empty());
}

#[test]
fn hidden_widows_are_dropped() {
    let config = LayoutConfig {
        show_widows: false,
        ..bare_config(300., 100.)
    };

    let layout = check(&[1., 2., 1.], &config);
    assert_eq!(layout.boxes.len(), 2);
    assert_eq!(layout.widow_count, 0);
    assert_eq!(layout.container_height, 100.);
}

#[test]
fn only_widows_and_hidden() {
    let config = LayoutConfig {
        show_widows: false,
        ..LayoutConfig::default()
    };

    let layout = check(&[1.], &config);
    assert!(layout.boxes.is_empty());
    assert_eq!(layout.container_height, 20.);
}

#[test]
fn single_widow_uses_target_height() {
    let layout = check(&[1.], &bare_config(300., 100.));
    assert_eq!(layout.widow_count, 1);
    assert_eq!(layout.rows[0].height, 100.);
    assert_eq!(layout.boxes[0].width, 100.);
}

#[test]
fn layout_serializes_in_camel_case() {
    let layout = check(&[1., 2.], &bare_config(300., 100.));
    let json = serde_json::to_value(&layout).unwrap();

    assert_eq!(json["containerHeight"], 100.);
    assert_eq!(json["widowCount"], 0);
    assert_eq!(json["boxes"][1]["aspectRatio"], 2.);
    assert_eq!(json["boxes"][1]["left"], 100.);
    assert_eq!(json["rows"][0]["itemCount"], 2);
}

#[test]
fn layout_can_be_shared_between_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Layout>();
    assert_send_sync::<LayoutConfig>();
    assert_send_sync::<LayoutError>();
}

fn arb_widow_layout_style() -> impl Strategy<Value = WidowLayoutStyle> {
    prop_oneof![
        Just(WidowLayoutStyle::Left),
        Just(WidowLayoutStyle::Justify),
        Just(WidowLayoutStyle::Center),
    ]
}

prop_compose! {
    fn arb_config()(
        container_width in 200f64..2000.,
        target_row_height in 50f64..400.,
        tolerance in 0.05f64..0.5,
        spacing in 0f64..20.,
        padding in 0f64..20.,
        widow_layout_style in arb_widow_layout_style(),
    ) -> LayoutConfig {
        LayoutConfig {
            container_width,
            container_padding: ContainerPadding::uniform(padding),
            box_spacing: BoxSpacing::uniform(spacing),
            target_row_height,
            target_row_height_tolerance: tolerance,
            widow_layout_style,
            ..LayoutConfig::default()
        }
    }
}

fn arb_items(aspect_ratio: std::ops::Range<f64>) -> impl Strategy<Value = Vec<ItemInput>> {
    prop::collection::vec(aspect_ratio.prop_map(ItemInput::AspectRatio), 0..60)
}

proptest! {
    #[test]
    fn every_item_is_laid_out_in_order(
        items in arb_items(0.2..5.),
        config in arb_config(),
    ) {
        let layout = compute_layout(&items, &config).unwrap();

        prop_assert_eq!(layout.boxes.len(), items.len());
        prop_assert_eq!(
            layout.rows.iter().map(|row| row.item_count).sum::<usize>(),
            items.len()
        );
        for (item, laid_out) in items.iter().zip(&layout.boxes) {
            prop_assert_eq!(item.aspect_ratio(), laid_out.aspect_ratio);
        }
    }

    #[test]
    fn row_limit_never_adds_boxes(
        items in arb_items(0.2..5.),
        config in arb_config(),
        max_num_rows in 1usize..5,
        show_widows in any::<bool>(),
    ) {
        let config = LayoutConfig {
            max_num_rows: Some(max_num_rows),
            show_widows,
            ..config
        };
        let layout = compute_layout(&items, &config).unwrap();

        prop_assert!(layout.boxes.len() <= items.len());
        prop_assert!(layout.rows.len() <= max_num_rows);
    }

    #[test]
    fn row_heights_stay_within_bounds(
        items in arb_items(0.2..5.),
        config in arb_config(),
    ) {
        let layout = compute_layout(&items, &config).unwrap();

        for row in &layout.rows {
            prop_assert!(row.height >= config.min_row_height());
            prop_assert!(row.height <= config.max_row_height());
        }
    }

    #[test]
    fn justified_rows_span_the_available_width(
        items in arb_items(0.2..5.),
        config in arb_config(),
    ) {
        let layout = compute_layout(&items, &config).unwrap();
        let available_width = config.available_width();
        let spacing = config.box_spacing.horizontal;

        let row_count = layout.rows.len();
        for (idx, (row, boxes)) in layout.rows_with_boxes().enumerate() {
            let is_widow_row = idx + 1 == row_count && layout.widow_count > 0;
            if is_widow_row && config.widow_layout_style != WidowLayoutStyle::Justify {
                continue;
            }

            let total = boxes.iter().map(|item| item.width).sum::<f64>()
                + (row.item_count - 1) as f64 * spacing;
            prop_assert!(
                (total - available_width).abs() <= 1.,
                "row {} spans {} instead of {}",
                idx,
                total,
                available_width
            );

            let first = &boxes[0];
            prop_assert!((first.left - config.container_padding.left).abs() <= 1e-6);
        }
    }

    #[test]
    fn rows_stack_top_to_bottom(
        items in arb_items(0.2..5.),
        config in arb_config(),
    ) {
        let layout = compute_layout(&items, &config).unwrap();
        let vertical = config.box_spacing.vertical;

        let mut expected_top = config.container_padding.top;
        for row in &layout.rows {
            prop_assert!((row.top - expected_top).abs() <= 1e-6);
            expected_top = row.top + row.height + vertical;
        }

        let expected_height = match layout.rows.last() {
            Some(last) => last.top + last.height + config.container_padding.bottom,
            None => config.container_padding.top + config.container_padding.bottom,
        };
        prop_assert!((layout.container_height - expected_height).abs() <= 1e-6);
    }

    #[test]
    fn layout_is_idempotent(
        items in arb_items(0.2..5.),
        config in arb_config(),
    ) {
        let first = compute_layout(&items, &config).unwrap();
        let second = compute_layout(&items, &config).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn breakout_rows_hold_a_single_landscape_item(
        items in arb_items(1.0..3.),
        config in arb_config(),
    ) {
        let config = LayoutConfig {
            full_width_breakout_row_cadence: NonZeroUsize::new(3),
            ..config
        };
        let layout = compute_layout(&items, &config).unwrap();

        for (idx, (row, boxes)) in layout.rows_with_boxes().enumerate() {
            let should_break_out = (idx + 1) % 3 == 0;
            prop_assert_eq!(row.is_breakout_row, should_break_out);
            if should_break_out {
                prop_assert_eq!(boxes.len(), 1);
                prop_assert!(boxes[0].aspect_ratio >= 1.);
            }
        }
    }
}
