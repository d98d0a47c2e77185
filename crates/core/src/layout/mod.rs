//! Pure placement math shared by the scenes.
//!
//! Everything here is deterministic except the heart rotation jitter, which
//! is drawn from an injected [`JitterSource`].

use std::f64::consts::TAU;

use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Number of items rendered ahead of the active carousel item.
pub const CAROUSEL_LOOK_AHEAD: usize = 2;

/// Source of decorative randomness.
pub trait JitterSource {
    /// Returns a value in the closed range `[low, high]`.
    fn sample(&mut self, low: f64, high: f64) -> f64;
}

/// [`JitterSource`] backed by any `rand` generator.
#[derive(Debug, Clone)]
pub struct RngJitter<R>(pub R);

impl RngJitter<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self(StdRng::from_entropy())
    }
}

impl<R: Rng> JitterSource for RngJitter<R> {
    fn sample(&mut self, low: f64, high: f64) -> f64 {
        if high <= low {
            return low;
        }
        self.0.gen_range(low..=high)
    }
}

/// Jitter source that always returns the midpoint of the requested range.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoJitter;

impl JitterSource for NoJitter {
    fn sample(&mut self, low: f64, high: f64) -> f64 {
        (low + high) / 2.0
    }
}

/// Photo placement on the finale heart, in percent of the containing square.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeartPosition {
    pub x_percent: f64,
    pub y_percent: f64,
    /// Decorative tilt in degrees. Not deterministic unless the jitter source is.
    pub rotation: f64,
}

/// Point on the heart curve for `index` of `count`, as `(x_percent, y_percent)`.
pub fn heart_point(index: usize, count: usize) -> (f64, f64) {
    if count == 0 {
        return (50.0, 50.0);
    }
    let t = index as f64 / count as f64 * TAU;
    let x = 16.0 * t.sin().powi(3);
    let y = -(13.0 * t.cos() - 5.0 * (2.0 * t).cos() - 2.0 * (3.0 * t).cos() - (4.0 * t).cos());

    (50.0 + (x / 20.0) * 40.0, 50.0 + (y / 20.0) * 35.0)
}

/// Places `count` items on the heart curve, evenly spaced in the curve parameter.
pub fn heart_curve<J: JitterSource + ?Sized>(
    count: usize,
    max_jitter_degrees: f64,
    jitter: &mut J,
) -> Vec<HeartPosition> {
    (0..count)
        .map(|index| {
            let (x_percent, y_percent) = heart_point(index, count);
            HeartPosition {
                x_percent,
                y_percent,
                rotation: jitter.sample(-max_jitter_degrees, max_jitter_degrees),
            }
        })
        .collect()
}

/// Offset from the orbit centre.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrbitPosition {
    pub x: f64,
    pub y: f64,
    /// Angle in radians, measured from the positive x axis.
    pub angle: f64,
}

/// Spreads `count` items evenly around a circle of `radius`, starting at angle zero.
pub fn orbit_layout(count: usize, radius: f64) -> Vec<OrbitPosition> {
    (0..count)
        .map(|index| {
            let angle = index as f64 / count as f64 * TAU;
            OrbitPosition {
                x: radius * angle.cos(),
                y: radius * angle.sin(),
                angle,
            }
        })
        .collect()
}

/// Visual parameters for one carousel item relative to the active item.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CarouselFrame {
    pub item_index: usize,
    /// Distance ahead of the active item. Never negative.
    pub offset: usize,
    pub scale: f64,
    pub rotation_y: f64,
    pub z_offset: f64,
    pub x_offset: f64,
    pub y_offset: f64,
    pub opacity: f64,
    pub z_index: i32,
}

/// Frame for `item_index` while `active_index` is shown, or `None` when the
/// item is not rendered at all.
///
/// Items behind the active one are never rendered; at most
/// [`CAROUSEL_LOOK_AHEAD`] items ahead are.
pub fn carousel_frame(active_index: usize, item_index: usize) -> Option<CarouselFrame> {
    let offset = item_index.checked_sub(active_index)?;
    if offset > CAROUSEL_LOOK_AHEAD {
        return None;
    }

    let distance = offset as f64;
    let frame = if offset == 0 {
        CarouselFrame {
            item_index,
            offset,
            scale: 1.0,
            rotation_y: 0.0,
            z_offset: 0.0,
            x_offset: 0.0,
            y_offset: 0.0,
            opacity: 1.0,
            z_index: 10,
        }
    } else {
        CarouselFrame {
            item_index,
            offset,
            scale: 0.85 - 0.1 * distance,
            rotation_y: 15.0 * distance,
            z_offset: -100.0 * distance,
            x_offset: 30.0 * distance,
            y_offset: 20.0 * distance,
            opacity: 0.4,
            z_index: 10 - offset as i32,
        }
    };
    Some(frame)
}

/// The rendered set for a carousel of `total` items, active item first.
pub fn carousel_window(active_index: usize, total: usize) -> Vec<CarouselFrame> {
    let end = total.min(active_index.saturating_add(CAROUSEL_LOOK_AHEAD + 1));
    (active_index..end)
        .filter_map(|item_index| carousel_frame(active_index, item_index))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn heart_curve_matches_reference_points() {
        let points = heart_curve(4, 15.0, &mut NoJitter);
        assert_eq!(points.len(), 4);

        assert!(approx(points[0].x_percent, 50.0));
        assert!(approx(points[0].y_percent, 41.25));
        // t = pi/2: x = 16, y = -4
        assert!(approx(points[1].x_percent, 82.0));
        assert!(approx(points[1].y_percent, 43.0));
        assert!(points.iter().all(|p| p.rotation == 0.0));
    }

    #[test]
    fn heart_jitter_stays_in_range_and_is_reproducible() {
        let first = heart_curve(13, 15.0, &mut RngJitter::seeded(7));
        let second = heart_curve(13, 15.0, &mut RngJitter::seeded(7));

        assert_eq!(first, second);
        assert!(first.iter().all(|p| (-15.0..=15.0).contains(&p.rotation)));
    }

    #[test]
    fn empty_layouts_are_empty() {
        assert!(heart_curve(0, 15.0, &mut NoJitter).is_empty());
        assert!(orbit_layout(0, 150.0).is_empty());
        assert!(carousel_window(0, 0).is_empty());
    }

    #[test]
    fn orbit_quarter_turn() {
        let points = orbit_layout(4, 150.0);
        assert_eq!(points.len(), 4);
        assert!(approx(points[0].x, 150.0));
        assert!(points[1].x.abs() < 1e-6);
        assert!(approx(points[1].y, 150.0));
        assert!(approx(points[2].x, -150.0));
    }

    #[test]
    fn carousel_never_peeks_backwards() {
        assert!(carousel_frame(5, 4).is_none());
        assert!(carousel_frame(5, 0).is_none());
        assert!(carousel_frame(5, 8).is_none());
        assert!(carousel_frame(5, 7).is_some());
    }

    #[test]
    fn carousel_frame_curve() {
        let active = carousel_frame(3, 3).unwrap();
        assert_eq!(active.scale, 1.0);
        assert_eq!(active.opacity, 1.0);
        assert_eq!(active.z_index, 10);

        let next = carousel_frame(3, 4).unwrap();
        assert!(approx(next.scale, 0.75));
        assert!(approx(next.opacity, 0.4));
        assert!(approx(next.x_offset, 30.0));
        assert!(approx(next.z_offset, -100.0));

        let after = carousel_frame(3, 5).unwrap();
        assert!(approx(after.scale, 0.65));
        assert!(approx(after.y_offset, 40.0));
        assert_eq!(after.z_index, 8);
    }

    #[test]
    fn carousel_window_is_bounded_by_remaining_items() {
        let window = carousel_window(5, 13);
        let indices: Vec<usize> = window.iter().map(|f| f.item_index).collect();
        assert_eq!(indices, vec![5, 6, 7]);

        assert_eq!(carousel_window(11, 13).len(), 2);
        assert_eq!(carousel_window(12, 13).len(), 1);
        assert!(carousel_window(13, 13).is_empty());
    }
}
