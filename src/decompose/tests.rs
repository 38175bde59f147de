use super::*;
use std::cell::Cell;

fn blank(w: usize, h: usize) -> Vec<u8> {
    vec![0u8; w * h * 3]
}

fn params_for(w: usize, h: usize, split_threshold: f32) -> DecomposeParams {
    DecomposeParams::for_image(ImageDims::new(w, h), 0.2, 3, split_threshold, None)
}

fn centre_vertical(tile: ImageRgb8<'_>) -> Result<Vec<RawAxis>, DetectorError> {
    let x = tile.w as f32 / 2.0;
    Ok(vec![RawAxis::new([x, 0.0], [x, tile.h as f32], 0.5)])
}

#[test]
fn emits_depth_first_first_half_first() {
    let (w, h) = (100, 80);
    let data = blank(w, h);
    let image = ImageRgb8::packed(w, h, &data);
    let params = params_for(w, h, 0.09);
    assert_eq!(params.max_depth, 2);

    let out = decompose(image, &centre_vertical, &params).unwrap();
    let xs: Vec<f32> = out.axes.iter().map(|a| a.p0[0]).collect();
    let depths: Vec<u32> = out.axes.iter().map(|a| a.depth).collect();
    assert_eq!(xs, vec![50.0, 25.0, 12.5, 37.5, 75.0, 62.5, 87.5]);
    assert_eq!(depths, vec![0, 1, 2, 2, 1, 2, 2]);
    assert_eq!(out.detector_calls, 7);
    assert_eq!(out.tiles_visited, 15);
    assert_eq!(out.max_depth_reached, 2);

    let ids: Vec<u32> = out.axes.iter().map(|a| a.id.0).collect();
    assert_eq!(ids, (0..7).collect::<Vec<_>>());
    assert!(out.axes.iter().all(|a| a.slope == h as f32));
    assert!(out.axes.iter().all(|a| a.normalized_score == 1.0));
}

#[test]
fn horizontal_split_offsets_children_by_axis_extent() {
    let (w, h) = (100, 100);
    let data = blank(w, h);
    let image = ImageRgb8::packed(w, h, &data);
    let detector = |tile: ImageRgb8<'_>| -> Result<Vec<RawAxis>, DetectorError> {
        if tile.w == 100 {
            Ok(vec![RawAxis::new([25.0, 50.0], [75.0, 50.0], 0.8)])
        } else if tile.w == 50 {
            Ok(vec![RawAxis::new([10.0, 0.0], [10.0, 20.0], 0.05)])
        } else {
            Ok(Vec::new())
        }
    };
    let out = decompose(image, &detector, &params_for(w, h, 0.09)).unwrap();
    let ends: Vec<([f32; 2], [f32; 2])> = out.axes.iter().map(|a| (a.p0, a.p1)).collect();
    assert_eq!(
        ends,
        vec![
            ([25.0, 50.0], [75.0, 50.0]),
            ([35.0, 0.0], [35.0, 20.0]),
            ([35.0, 50.0], [35.0, 70.0]),
        ]
    );
    assert_eq!(out.axes[0].slope, 0.0);
    assert_eq!(out.detector_calls, 3, "weak child axes must not split");
}

#[test]
fn depth_stays_bounded_when_splits_hug_the_border() {
    let (w, h) = (200, 200);
    let data = blank(w, h);
    let image = ImageRgb8::packed(w, h, &data);
    let calls = Cell::new(0usize);
    let detector = |tile: ImageRgb8<'_>| -> Result<Vec<RawAxis>, DetectorError> {
        calls.set(calls.get() + 1);
        Ok(vec![RawAxis::new([1.0, 0.0], [1.0, tile.h as f32], 0.9)])
    };
    let params = params_for(w, h, 0.09);
    let out = decompose(image, &detector, &params).unwrap();
    let bound = (5.0f32).log2().floor() as u32;
    assert!(out.axes.iter().all(|a| a.depth <= bound));
    assert_eq!(out.max_depth_reached, bound);
    assert_eq!(calls.get(), out.detector_calls);
    assert_eq!(out.detector_calls, bound as usize + 1);
}

#[test]
fn split_on_tile_edge_does_not_recurse_into_same_tile() {
    let (w, h) = (60, 60);
    let data = blank(w, h);
    let image = ImageRgb8::packed(w, h, &data);
    let detector = |tile: ImageRgb8<'_>| -> Result<Vec<RawAxis>, DetectorError> {
        Ok(vec![RawAxis::new([0.0, 0.0], [0.0, tile.h as f32], 0.9)])
    };
    let out = decompose(image, &detector, &params_for(w, h, 0.09)).unwrap();
    assert_eq!(out.detector_calls, 1);
    assert_eq!(out.axes.len(), 1);
}

#[test]
fn diagonal_and_weak_axes_do_not_split() {
    let (w, h) = (60, 60);
    let data = blank(w, h);
    let image = ImageRgb8::packed(w, h, &data);
    let detector = |_tile: ImageRgb8<'_>| -> Result<Vec<RawAxis>, DetectorError> {
        Ok(vec![
            RawAxis::new([0.0, 0.0], [60.0, 60.0], 0.9),
            RawAxis::new([30.0, 0.0], [30.0, 60.0], 0.05).with_normalized_score(0.4),
        ])
    };
    let out = decompose(image, &detector, &params_for(w, h, 0.09)).unwrap();
    assert_eq!(out.detector_calls, 1);
    assert_eq!(out.splits, 0);
    assert_eq!(out.axes.len(), 2);
    assert_eq!(out.axes[1].normalized_score, 0.4);
}

#[test]
fn only_leading_axes_are_split_candidates() {
    let (w, h) = (100, 100);
    let data = blank(w, h);
    let image = ImageRgb8::packed(w, h, &data);
    let detector = |tile: ImageRgb8<'_>| -> Result<Vec<RawAxis>, DetectorError> {
        if tile.w < 100 || tile.h < 100 {
            return Ok(Vec::new());
        }
        Ok(vec![
            RawAxis::new([50.0, 0.0], [50.0, 100.0], 0.9),
            RawAxis::new([0.0, 50.0], [100.0, 50.0], 0.8).with_normalized_score(0.9),
        ])
    };
    let mut params = params_for(w, h, 0.09);
    params.max_axes_per_step = 1;
    let out = decompose(image, &detector, &params).unwrap();
    assert_eq!(out.splits, 1);
    assert_eq!(out.detector_calls, 3);

    params.max_axes_per_step = 10;
    let out = decompose(image, &detector, &params).unwrap();
    assert_eq!(out.splits, 2, "max_axes_per_step is clamped to the detected count");
    assert_eq!(out.detector_calls, 5);
}

#[test]
fn endpoints_are_clamped_into_the_image() {
    let (w, h) = (50, 40);
    let data = blank(w, h);
    let image = ImageRgb8::packed(w, h, &data);
    let detector = |_tile: ImageRgb8<'_>| -> Result<Vec<RawAxis>, DetectorError> {
        Ok(vec![RawAxis::new([-3.0, -5.0], [60.0, 45.0], 0.01)])
    };
    let out = decompose(image, &detector, &params_for(w, h, 0.09)).unwrap();
    assert_eq!(out.axes[0].p0, [0.0, 0.0]);
    assert_eq!(out.axes[0].p1, [50.0, 40.0]);
}

#[test]
fn detector_failure_propagates() {
    let (w, h) = (40, 40);
    let data = blank(w, h);
    let image = ImageRgb8::packed(w, h, &data);
    let detector = |tile: ImageRgb8<'_>| -> Result<Vec<RawAxis>, DetectorError> {
        if tile.w == 40 {
            centre_vertical(tile)
        } else {
            Err(DetectorError::new("backend unavailable"))
        }
    };
    let err = decompose(image, &detector, &params_for(w, h, 0.09)).unwrap_err();
    assert_eq!(err.message, "backend unavailable");
}

#[test]
fn tiny_image_never_reaches_the_detector() {
    let data = blank(4, 4);
    let image = ImageRgb8::packed(4, 4, &data);
    let mut params = params_for(4, 4, 0.09);
    params.min_size = MinSize {
        height: 5.0,
        width: 5.0,
    };
    let out = decompose(image, &centre_vertical, &params).unwrap();
    assert_eq!(out.detector_calls, 0);
    assert!(out.axes.is_empty());
}

#[test]
fn off_centre_splits_reach_every_tile_above_min_size() {
    let (w, h) = (400, 100);
    let data = blank(w, h);
    let image = ImageRgb8::packed(w, h, &data);
    let detector = |tile: ImageRgb8<'_>| -> Result<Vec<RawAxis>, DetectorError> {
        let x = (tile.w * 9 / 10) as f32;
        Ok(vec![RawAxis::new([x, 0.0], [x, tile.h as f32], 0.9)])
    };
    let params = params_for(w, h, 0.09);
    assert_eq!(params.min_size, MinSize { height: 20.0, width: 80.0 });
    assert_eq!(params.max_depth, 4, "400 / 20 allows four halvings");

    let out = decompose(image, &detector, &params).unwrap();
    // Left tiles shrink 400 -> 360 -> 324 -> 291 -> 261; right slivers are
    // all narrower than the 80 px minimum.
    let xs: Vec<f32> = out.axes.iter().map(|a| a.p0[0]).collect();
    let depths: Vec<u32> = out.axes.iter().map(|a| a.depth).collect();
    assert_eq!(xs, vec![360.0, 324.0, 291.0, 261.0, 234.0]);
    assert_eq!(depths, vec![0, 1, 2, 3, 4]);
    assert_eq!(out.detector_calls, 5);
    assert_eq!(out.max_depth_reached, 4);
}

#[test]
fn default_depth_cap_follows_the_longest_side() {
    let dims = ImageDims::new(400, 100);
    let min_size = MinSize {
        height: 20.0,
        width: 80.0,
    };
    assert_eq!(default_max_depth(dims, min_size), 4);
    let square = ImageDims::new(100, 100);
    let min_size = MinSize {
        height: 20.0,
        width: 20.0,
    };
    assert_eq!(default_max_depth(square, min_size), 2);
}
