//! Rectangle clamping, padding, and candidate generation bounds

use greedyrect::Rect;
use greedyrect::algorithm::candidates::CandidateGenerator;
use rand::SeedableRng;
use rand::rngs::StdRng;

#[test]
fn test_from_anchor_clamps_to_image_bounds() {
    let rect = Rect::from_anchor(8, 9, 6, 6, 10, 12).expect("in bounds");
    assert_eq!(rect, Rect { x: 8, y: 9, w: 2, h: 3 });
}

#[test]
fn test_from_anchor_rejects_out_of_bounds_anchor() {
    assert!(Rect::from_anchor(10, 0, 4, 4, 10, 12).is_none());
    assert!(Rect::from_anchor(0, 12, 4, 4, 10, 12).is_none());
}

#[test]
fn test_from_anchor_rejects_zero_extent() {
    assert!(Rect::from_anchor(0, 0, 0, 4, 10, 10).is_none());
    assert!(Rect::from_anchor(0, 0, 4, 0, 10, 10).is_none());
}

#[test]
fn test_full_covers_entire_image() {
    let rect = Rect::full(7, 9);
    assert_eq!(rect.area(), 63);
    assert_eq!(rect.row_span(), 0..7);
    assert_eq!(rect.col_span(), 0..9);
}

#[test]
fn test_padded_clamps_at_borders() {
    let rect = Rect { x: 1, y: 1, w: 3, h: 3 };
    let padded = rect.padded(2, 10, 10);
    assert_eq!(padded, Rect { x: 0, y: 0, w: 6, h: 6 });

    let corner = Rect { x: 8, y: 8, w: 2, h: 2 };
    let padded = corner.padded(5, 10, 10);
    assert_eq!(padded, Rect { x: 3, y: 3, w: 7, h: 7 });
}

#[test]
fn test_refresh_padding_is_half_longest_side_at_least_one() {
    assert_eq!(Rect { x: 0, y: 0, w: 5, h: 3 }.refresh_padding(), 2);
    assert_eq!(Rect { x: 0, y: 0, w: 2, h: 9 }.refresh_padding(), 4);
    assert_eq!(Rect { x: 0, y: 0, w: 1, h: 1 }.refresh_padding(), 1);
}

#[test]
fn test_contains_is_half_open() {
    let rect = Rect { x: 2, y: 3, w: 4, h: 2 };
    assert!(rect.contains(2, 3));
    assert!(rect.contains(5, 4));
    assert!(!rect.contains(6, 3));
    assert!(!rect.contains(2, 5));
}

#[test]
fn test_proposed_candidates_stay_in_bounds() {
    let generator = CandidateGenerator::new(30, 40, 50, 4, 2.0, 30.0);
    let mut rng = StdRng::seed_from_u64(42);

    for round in 0..50 {
        for anchor in [(0, 0), (29, 39), (15, 20), (29, 0), (0, 39)] {
            if let Some(rect) = generator.propose(anchor, round, 0.0, &mut rng) {
                assert!(rect.x + rect.w <= 30, "row overflow: {rect:?}");
                assert!(rect.y + rect.h <= 40, "column overflow: {rect:?}");
                assert!(rect.area() > 0);
            } else {
                panic!("in-bounds anchor must yield a rectangle");
            }
        }
    }
}

#[test]
fn test_high_variance_shrinks_proposals() {
    let generator = CandidateGenerator::new(64, 64, 10, 2, 2.0, 30.0);

    // Round 0 proposes near the scheduled maximum in flat regions; extreme
    // local variance clamps the scale to a quarter of it
    let max_flat = (0..200)
        .filter_map(|i| {
            generator.propose((0, 0), 0, 0.0, &mut StdRng::seed_from_u64(i))
        })
        .map(|r| r.w.max(r.h))
        .max()
        .expect("proposals exist");
    let max_busy = (0..200)
        .filter_map(|i| {
            generator.propose((0, 0), 0, 1000.0, &mut StdRng::seed_from_u64(i))
        })
        .map(|r| r.w.max(r.h))
        .max()
        .expect("proposals exist");

    assert!(max_busy < max_flat);
}
