//! Round-dependent schedules for candidate geometry and search width

// Variance damping never shrinks a rectangle below a quarter of its scheduled size
/// Lower clamp for the variance damping factor
pub const DAMPING_FLOOR: f32 = 0.25;
/// Upper clamp for the variance damping factor
pub const DAMPING_CEILING: f32 = 1.0;

/// Sigmoid size schedule: large extents early, shrinking smoothly to
/// `min_size` as rounds progress
///
/// Progress runs 0 at round 0 to 1 at the final round (a single-round
/// schedule starts fully progressed). The coarse-to-fine shape places big
/// flat regions first and detail corrections last.
pub fn sigmoid_extent(
    round: usize,
    rounds: usize,
    max_size: usize,
    min_size: usize,
    steepness: f32,
) -> usize {
    let progress = if rounds > 1 {
        round as f32 / (rounds - 1) as f32
    } else {
        1.0
    };
    let x = (progress * 2.0 - 1.0) * steepness;
    let y = 1.0 / (1.0 + x.exp());
    let extent = y * (max_size as f32 - min_size as f32) + min_size as f32;
    (extent.round() as usize).max(min_size)
}

/// Candidate count for a round
///
/// `min(max, floor(base * (1 - round/rounds)) + max)`. With the default
/// constants the minimum saturates at `max` for every round; downstream
/// sampling sequences depend on the exact count, so the formula keeps this
/// shape.
pub fn candidate_count(round: usize, rounds: usize, base: usize, max: usize) -> usize {
    let fraction = 1.0 - round as f64 / rounds as f64;
    let scheduled = (base as f64 * fraction) as usize + max;
    scheduled.min(max)
}

/// Damping factor shrinking candidate extents in high-variance neighborhoods
///
/// `clamp(1 / (1 + local_var * k), 0.25, 1.0)`: flat regions keep the full
/// scheduled size, busy regions drop toward the floor.
pub fn variance_damping(local_var: f32, k: f32) -> f32 {
    (1.0 / (1.0 + local_var * k)).clamp(DAMPING_FLOOR, DAMPING_CEILING)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sigmoid_extent_shrinks_over_rounds() {
        let first = sigmoid_extent(0, 100, 120, 6, 2.0);
        let middle = sigmoid_extent(50, 100, 120, 6, 2.0);
        let last = sigmoid_extent(99, 100, 120, 6, 2.0);
        assert!(first > middle);
        assert!(middle > last);
        assert!(first <= 120);
        assert!(last >= 6);
    }

    #[test]
    fn test_sigmoid_extent_single_round_is_fully_progressed() {
        assert_eq!(sigmoid_extent(0, 1, 120, 6, 2.0), sigmoid_extent(99, 100, 120, 6, 2.0));
    }

    #[test]
    fn test_sigmoid_extent_never_below_min() {
        for round in 0..50 {
            assert!(sigmoid_extent(round, 50, 8, 6, 10.0) >= 6);
        }
    }

    #[test]
    fn test_candidate_count_saturates_at_max() {
        // With the default constants the schedule pins to the ceiling
        for round in 0..100 {
            assert_eq!(candidate_count(round, 100, 6, 30), 30);
        }
    }

    #[test]
    fn test_variance_damping_clamps() {
        assert!((variance_damping(0.0, 30.0) - 1.0).abs() < f32::EPSILON);
        assert!((variance_damping(1000.0, 30.0) - 0.25).abs() < f32::EPSILON);
        let mid = variance_damping(0.05, 30.0);
        assert!(mid > 0.25 && mid < 1.0);
    }
}
