//! Geometry shared by the live panel and the PNG snapshot: maps window
//! contents onto a surface of known width and height, and places the
//! background grid.

/// Grid line pitch on the rendering surface, in surface units.
pub const GRID_PITCH: f32 = 20.0;

/// Traces use this fraction of half the surface height; samples are
/// assumed normalized around zero.
pub const AMPLITUDE_RATIO: f32 = 0.8;

/// Polyline points for the visible window, vertically centered. The x
/// pitch divides the surface by the window capacity, so a partially
/// filled window occupies the left of the surface.
pub fn trace_points(samples: &[f32], capacity: usize, width: f32, height: f32) -> Vec<(f32, f32)> {
    if capacity == 0 {
        return Vec::new();
    }
    let step = width / capacity as f32;
    let mid = height / 2.0;
    let scale = mid * AMPLITUDE_RATIO;
    samples
        .iter()
        .enumerate()
        .map(|(i, &value)| (i as f32 * step, mid - value * scale))
        .collect()
}

/// Interior grid line offsets along one axis.
pub fn grid_offsets(extent: f32) -> Vec<f32> {
    let mut offsets = Vec::new();
    let mut at = GRID_PITCH;
    while at < extent {
        offsets.push(at);
        at += GRID_PITCH;
    }
    offsets
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_maps_to_the_vertical_center() {
        let points = trace_points(&[0.0], 10, 100.0, 200.0);
        assert_eq!(points, vec![(0.0, 100.0)]);
    }

    #[test]
    fn full_scale_uses_eight_tenths_of_half_height() {
        let points = trace_points(&[1.0, -1.0], 4, 100.0, 200.0);
        assert_eq!(points[0], (0.0, 100.0 - 80.0));
        assert_eq!(points[1], (25.0, 100.0 + 80.0));
    }

    #[test]
    fn grid_offsets_follow_the_pitch() {
        assert_eq!(grid_offsets(100.0), vec![20.0, 40.0, 60.0, 80.0]);
        assert_eq!(grid_offsets(59.0), vec![20.0, 40.0]);
        assert!(grid_offsets(20.0).is_empty());
    }
}
