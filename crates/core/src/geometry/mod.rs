//! Planar layouts built from amplitude vectors.
//!
//! Every builder is a pure function of its inputs. Heights use the nominal
//! full-scale value of 128 (256 for the double-sided ribbon), and nothing is
//! clamped: louder captures may legitimately overflow the viewport.

mod point;

pub use point::{Point, PointSequence, Viewport};

use crate::AmplitudeVector;

/// Gap carved out of the left side of every bar slot except the first.
pub const DEFAULT_BAR_GAP: f32 = 1.0;

const FULL_SCALE: f32 = 128.0;
const HALF_RIBBON_SCALE: f32 = 256.0;

/// One rectangle per amplitude, bottom-aligned, using [`DEFAULT_BAR_GAP`].
pub fn build_bars(amplitudes: &AmplitudeVector, viewport: Viewport) -> PointSequence {
    build_bars_with_gap(amplitudes, viewport, DEFAULT_BAR_GAP)
}

/// Bars with an explicit inter-bar gap.
///
/// Each value owns a slot of `width / count` pixels, so the bars span exactly
/// the viewport width. Every rectangle contributes four points, base edge
/// first.
pub fn build_bars_with_gap(
    amplitudes: &AmplitudeVector,
    viewport: Viewport,
    gap: f32,
) -> PointSequence {
    if amplitudes.is_empty() {
        return Vec::new();
    }

    let slot_width = viewport.width / amplitudes.len() as f32;
    let gap = gap.clamp(0.0, slot_width.max(0.0));
    let baseline = viewport.height;

    let mut points = Vec::with_capacity(amplitudes.len() * 4);
    for (index, &value) in amplitudes.iter().enumerate() {
        let right = slot_width * (index + 1) as f32;
        let left = slot_width * index as f32 + if index == 0 { 0.0 } else { gap };
        let top = baseline - viewport.height * (value as f32 / FULL_SCALE);

        points.push(Point::new(left, baseline));
        points.push(Point::new(right, baseline));
        points.push(Point::new(right, top));
        points.push(Point::new(left, top));
    }
    points
}

/// Ribbon around the horizontal centre line.
///
/// Even samples go above the centre, odd samples below; the result walks the
/// top edge left to right and the bottom edge back, ready to fill. The
/// continuous variant spreads the samples over the full width because the
/// projector wraps it around the circle.
pub fn build_double_sided_path(
    amplitudes: &AmplitudeVector,
    viewport: Viewport,
    continuous: bool,
) -> PointSequence {
    if amplitudes.is_empty() {
        return Vec::new();
    }

    let segment_count = amplitudes.len();
    let divisor = if continuous {
        segment_count
    } else {
        segment_count.saturating_sub(2).max(1)
    };
    let bar_width = viewport.width / divisor as f32;

    let mut top = Vec::with_capacity(segment_count / 2 + 1);
    let mut bottom = Vec::with_capacity(segment_count / 2);
    for (index, &value) in amplitudes.iter().enumerate() {
        let offset = value as f32 / HALF_RIBBON_SCALE;
        if index % 2 == 0 {
            top.push(Point::new(
                bar_width * index as f32,
                viewport.height * (0.5 - offset),
            ));
        } else {
            bottom.push(Point::new(
                bar_width * (index - 1) as f32,
                viewport.height * (0.5 + offset),
            ));
        }
    }

    top.extend(bottom.into_iter().rev());
    top
}

/// Columns of fixed-size blocks, one column per bar.
///
/// The amplitudes are re-bucketed to `bar_count` first when the lengths
/// differ. A column always holds `round(max_stack_count * v / 128) + 1`
/// blocks, so silence still draws one block per bar. Each block contributes
/// four points and every fourth point starts a new sub-path.
pub fn build_stacked_bars(
    amplitudes: &AmplitudeVector,
    viewport: Viewport,
    bar_count: usize,
    max_stack_count: usize,
    horizontal_padding: f32,
    vertical_padding: f32,
) -> PointSequence {
    if amplitudes.is_empty() || bar_count == 0 || max_stack_count == 0 {
        return Vec::new();
    }

    let amplitudes = amplitudes.resample(bar_count);
    let bar_width = viewport.width / bar_count as f32 - horizontal_padding;
    let stack_height = viewport.height / max_stack_count as f32 - vertical_padding;
    let max_stacks = max_stack_count as f32;

    let mut points = Vec::new();
    for (index, &value) in amplitudes.iter().enumerate() {
        let stack_count = (max_stacks * (value as f32 / FULL_SCALE)).round() as usize;
        let column = index as f32;
        let left = bar_width * column + horizontal_padding * column;
        let right = bar_width * (column + 1.0) + horizontal_padding * column;

        for stack_index in 0..=stack_count {
            let level = stack_index as f32;
            let base = viewport.height - level * stack_height - vertical_padding * level;
            let top = viewport.height - (level + 1.0) * stack_height - vertical_padding * level;

            points.push(Point::new(left, base));
            points.push(Point::new(right, base));
            points.push(Point::new(right, top));
            points.push(Point::new(left, top));
        }
    }
    points
}

/// Gap-less bars re-bucketed to `bar_count`, each `width / (bar_count + 2)`
/// wide and packed from the left edge, leaving two slots of room on the
/// right.
pub fn build_full_bars(
    amplitudes: &AmplitudeVector,
    viewport: Viewport,
    bar_count: usize,
) -> PointSequence {
    if amplitudes.is_empty() || bar_count == 0 {
        return Vec::new();
    }

    let amplitudes = amplitudes.resample(bar_count);
    let bar_width = viewport.width / (bar_count + 2) as f32;
    let baseline = viewport.height;

    let mut points = Vec::with_capacity(bar_count * 4);
    for (index, &value) in amplitudes.iter().enumerate() {
        let left = bar_width * index as f32;
        let right = left + bar_width;
        let top = baseline - viewport.height * (value as f32 / FULL_SCALE);

        points.push(Point::new(left, baseline));
        points.push(Point::new(right, baseline));
        points.push(Point::new(right, top));
        points.push(Point::new(left, top));
    }
    points
}

/// Fillable area under the waveform, anchored on the baseline at both ends.
pub fn build_open_path(amplitudes: &AmplitudeVector, viewport: Viewport) -> PointSequence {
    if amplitudes.is_empty() {
        return Vec::new();
    }

    let step = if amplitudes.len() > 1 {
        viewport.width / (amplitudes.len() - 1) as f32
    } else {
        0.0
    };

    let mut points = Vec::with_capacity(amplitudes.len() + 2);
    points.push(Point::new(0.0, viewport.height));
    points.extend(amplitudes.iter().enumerate().map(|(index, &value)| {
        Point::new(
            step * index as f32,
            viewport.height * (1.0 - value as f32 / FULL_SCALE),
        )
    }));
    points.push(Point::new(viewport.width, viewport.height));
    points
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn amps(values: &[u8]) -> AmplitudeVector {
        AmplitudeVector::new(values.to_vec())
    }

    #[test]
    fn open_path_is_anchored_on_the_baseline() {
        let points = build_open_path(&amps(&[128, 0, 128]), Viewport::new(90.0, 100.0));

        assert_eq!(
            points,
            vec![
                Point::new(0.0, 100.0),
                Point::new(0.0, 0.0),
                Point::new(45.0, 100.0),
                Point::new(90.0, 0.0),
                Point::new(90.0, 100.0),
            ]
        );
    }

    #[test]
    fn open_path_with_single_sample() {
        let points = build_open_path(&amps(&[64]), Viewport::new(10.0, 10.0));
        assert_eq!(points[1], Point::new(0.0, 5.0));
        assert_eq!(points.len(), 3);
    }

    #[test]
    fn bars_fill_the_viewport_width() {
        let viewport = Viewport::new(100.0, 50.0);
        let points = build_bars(&amps(&[0, 64, 128, 255]), viewport);

        assert_eq!(points.len(), 16);
        let bars: Vec<_> = points.chunks(4).collect();
        assert_eq!(bars[0][0].x, 0.0);
        assert_relative_eq!(bars[1][0].x, 26.0);
        assert_relative_eq!(bars[3][1].x, 100.0);

        let total: f32 = bars.iter().map(|bar| bar[1].x - bar[0].x).sum();
        let gaps = 3.0 * DEFAULT_BAR_GAP;
        assert_relative_eq!(total + gaps, viewport.width, epsilon = 1e-4);

        assert_relative_eq!(bars[1][2].y, 25.0);
        assert_relative_eq!(bars[2][2].y, 0.0);
        // Louder than full scale overflows the viewport.
        assert!(bars[3][2].y < 0.0);
    }

    #[test]
    fn double_sided_splits_even_and_odd_samples() {
        let viewport = Viewport::new(40.0, 100.0);
        let points = build_double_sided_path(&amps(&[0, 128, 64, 32, 128, 0]), viewport, false);

        let expected = [
            Point::new(0.0, 50.0),
            Point::new(20.0, 25.0),
            Point::new(40.0, 0.0),
            Point::new(40.0, 50.0),
            Point::new(20.0, 62.5),
            Point::new(0.0, 100.0),
        ];
        assert_eq!(points.len(), expected.len());
        for (point, expected) in points.iter().zip(expected) {
            assert_relative_eq!(point.x, expected.x);
            assert_relative_eq!(point.y, expected.y);
        }
    }

    #[test]
    fn continuous_ribbon_uses_the_full_segment_count() {
        let viewport = Viewport::new(40.0, 100.0);
        let points = build_double_sided_path(&amps(&[0, 0, 0, 0]), viewport, true);

        assert_eq!(points[1], Point::new(20.0, 50.0));
        assert_eq!(points[2], Point::new(20.0, 50.0));
    }

    #[test]
    fn silent_stacked_bars_still_emit_one_block() {
        let points = build_stacked_bars(
            &amps(&[0, 0, 0]),
            Viewport::new(30.0, 100.0),
            3,
            10,
            1.0,
            1.0,
        );
        assert_eq!(points.len(), 3 * 4);
    }

    #[test]
    fn full_scale_stacked_bar_emits_max_plus_one_blocks() {
        let viewport = Viewport::new(20.0, 100.0);
        let points = build_stacked_bars(&amps(&[128]), viewport, 1, 10, 2.0, 1.0);
        assert_eq!(points.len(), 11 * 4);

        // Second block of the only column.
        let block = &points[4..8];
        assert_relative_eq!(block[0].x, 0.0);
        assert_relative_eq!(block[1].x, 18.0);
        assert_relative_eq!(block[0].y, 100.0 - 9.0 - 1.0);
        assert_relative_eq!(block[2].y, 100.0 - 18.0 - 1.0);
    }

    #[test]
    fn stacked_bars_resample_to_bar_count() {
        let viewport = Viewport::new(40.0, 100.0);
        let points = build_stacked_bars(&amps(&[0, 0, 0, 0, 0, 0, 0, 0]), viewport, 4, 8, 2.0, 2.0);
        assert_eq!(points.len(), 4 * 4);

        // Column offsets accumulate bar width plus padding.
        assert_relative_eq!(points[4].x, 10.0);
        assert_relative_eq!(points[5].x, 18.0);
    }

    #[test]
    fn full_bars_leave_two_slots_free() {
        let viewport = Viewport::new(120.0, 64.0);
        let points = build_full_bars(&amps(&[0, 64, 128, 64, 32, 32, 0, 0]), viewport, 4);

        assert_eq!(points.len(), 4 * 4);
        let bars: Vec<_> = points.chunks(4).collect();
        for (index, bar) in bars.iter().enumerate() {
            assert_relative_eq!(bar[0].x, 20.0 * index as f32);
            assert_relative_eq!(bar[1].x - bar[0].x, 20.0);
        }
        assert_relative_eq!(bars[3][1].x, 80.0);

        // Re-bucketed pairs: [32, 96, 32, 0].
        let heights: Vec<f32> = bars.iter().map(|bar| bar[0].y - bar[2].y).collect();
        assert_eq!(heights, vec![16.0, 48.0, 16.0, 0.0]);
        assert!(build_full_bars(&amps(&[1]), viewport, 0).is_empty());
    }

    #[test]
    fn empty_input_draws_nothing() {
        let empty = AmplitudeVector::default();
        let viewport = Viewport::new(10.0, 10.0);

        assert!(build_bars(&empty, viewport).is_empty());
        assert!(build_double_sided_path(&empty, viewport, true).is_empty());
        assert!(build_stacked_bars(&empty, viewport, 4, 4, 0.0, 0.0).is_empty());
        assert!(build_open_path(&empty, viewport).is_empty());
        assert!(build_stacked_bars(&amps(&[1]), viewport, 0, 4, 0.0, 0.0).is_empty());
    }
}
