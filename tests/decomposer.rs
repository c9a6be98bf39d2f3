//! End-to-end decomposition properties: scenario outputs, monotonic error,
//! color correctness, bounds containment, determinism, and the round cap

use greedyrect::algorithm::buffers::FrameBuffers;
use greedyrect::{Block, Decomposer, DecomposerConfig, Rect};
use ndarray::Array3;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn flat_image(rows: usize, cols: usize, color: [f32; 3]) -> Array3<f32> {
    Array3::from_shape_fn((rows, cols, 3), |(_, _, c)| color[c])
}

fn checkerboard(rows: usize, cols: usize) -> Array3<f32> {
    Array3::from_shape_fn((rows, cols, 3), |(i, j, _)| ((i + j) % 2) as f32)
}

// Deterministic non-trivial target mixing a gradient with a coarse checker
fn textured_image(rows: usize, cols: usize) -> Array3<f32> {
    Array3::from_shape_fn((rows, cols, 3), |(i, j, c)| {
        let gradient = i as f32 / rows as f32;
        let checker = ((i / 4 + j / 4) % 2) as f32;
        match c {
            0 => gradient,
            1 => checker,
            _ => (gradient + checker) / 2.0,
        }
    })
}

fn small_config(rounds: usize) -> DecomposerConfig {
    DecomposerConfig {
        rounds,
        min_size: 2,
        ..DecomposerConfig::default()
    }
}

#[test]
fn test_flat_red_image_yields_single_background_block() {
    let target = flat_image(4, 4, [1.0, 0.0, 0.0]);
    let config = DecomposerConfig {
        rounds: 10,
        ..DecomposerConfig::default()
    };
    let decomposer =
        Decomposer::new(target, None, config, StdRng::seed_from_u64(42)).expect("valid input");
    let result = decomposer.run();

    assert_eq!(result.blocks.len(), 1);
    assert_eq!(
        result.blocks[0],
        Block {
            x: 0,
            y: 0,
            w: 4,
            h: 4,
            color: [255, 0, 0],
        }
    );
    assert!(result.fitness.abs() < 1e-12);
}

#[test]
fn test_uniform_image_idempotence() {
    // Variance and error are zero everywhere, so nothing strictly improves
    let target = flat_image(16, 12, [0.2, 0.6, 0.9]);
    let decomposer = Decomposer::new(
        target,
        None,
        DecomposerConfig::default(),
        StdRng::seed_from_u64(7),
    )
    .expect("valid input");
    let result = decomposer.run();

    assert_eq!(result.blocks.len(), 1);
    assert_eq!(result.blocks[0].rect(), Rect::full(16, 12));
    assert_eq!(result.blocks[0].color, [51, 153, 229]);
}

#[test]
fn test_checkerboard_commits_beyond_background() {
    let target = checkerboard(2, 2);
    let config = small_config(10);
    let decomposer =
        Decomposer::new(target, None, config, StdRng::seed_from_u64(42)).expect("valid input");
    let result = decomposer.run();

    // Flat-average baseline: every pixel off by 0.5 in each channel
    let baseline = 0.25;
    assert_eq!(result.blocks[0].color, [128, 128, 128]);
    assert_eq!(result.blocks[0].rect(), Rect::full(2, 2));
    assert!(result.blocks.len() >= 2, "expected a detail commit");
    assert!(result.fitness < baseline);
}

#[test]
fn test_warm_start_on_exact_previous_commits_nothing() {
    let target = textured_image(12, 16);
    let previous = target.clone();
    let decomposer = Decomposer::new(
        target,
        Some(previous),
        small_config(20),
        StdRng::seed_from_u64(3),
    )
    .expect("valid input");
    let result = decomposer.run();

    assert!(result.blocks.is_empty());
    assert!(result.fitness.abs() < 1e-12);
}

#[test]
fn test_fitness_never_increases_across_rounds() {
    let target = textured_image(24, 32);
    let mut decomposer = Decomposer::new(
        target,
        None,
        small_config(40),
        StdRng::seed_from_u64(42),
    )
    .expect("valid input");

    let mut last = decomposer.fitness();
    while !decomposer.is_done() {
        decomposer.execute_round();
        let current = decomposer.fitness();
        assert!(
            current <= last + 1e-12,
            "fitness increased from {last} to {current} at round {}",
            decomposer.round()
        );
        last = current;
    }
}

#[test]
fn test_committed_colors_equal_region_means() {
    let target = textured_image(20, 20);
    let reference = FrameBuffers::new(target.clone(), target.clone());
    let decomposer = Decomposer::new(
        target,
        None,
        small_config(30),
        StdRng::seed_from_u64(11),
    )
    .expect("valid input");
    let result = decomposer.run();

    for block in &result.blocks {
        let mean = reference.region_mean_color(block.rect());
        let expected = greedyrect::algorithm::decomposer::quantize_color(mean);
        assert_eq!(block.color, expected, "block {block:?}");
    }
}

#[test]
fn test_blocks_stay_within_image_bounds() {
    let target = textured_image(17, 29);
    let decomposer = Decomposer::new(
        target,
        None,
        small_config(50),
        StdRng::seed_from_u64(99),
    )
    .expect("valid input");
    let result = decomposer.run();

    assert!(!result.blocks.is_empty());
    for block in &result.blocks {
        assert!(block.w > 0 && block.h > 0);
        assert!(block.x + block.w <= 17, "row overflow: {block:?}");
        assert!(block.y + block.h <= 29, "column overflow: {block:?}");
    }
}

#[test]
fn test_identical_seeds_reproduce_block_lists() {
    let target = textured_image(16, 16);
    let run = |seed: u64| {
        Decomposer::new(
            target.clone(),
            None,
            small_config(25),
            StdRng::seed_from_u64(seed),
        )
        .expect("valid input")
        .run()
    };

    let first = run(1234);
    let second = run(1234);
    assert_eq!(first.blocks, second.blocks);
    assert!((first.fitness - second.fitness).abs() < 1e-15);
}

#[test]
fn test_round_cap_bounds_committed_blocks() {
    let rounds = 15;
    let target = textured_image(16, 16);
    let decomposer = Decomposer::new(
        target,
        None,
        small_config(rounds),
        StdRng::seed_from_u64(5),
    )
    .expect("valid input");
    let result = decomposer.run();

    // One block per committing round, plus the cold-start background
    assert!(result.blocks.len() <= rounds + 1);
}

#[test]
fn test_shape_mismatched_previous_falls_back_to_cold_start() {
    let target = checkerboard(8, 8);
    let stale = flat_image(4, 4, [0.0, 0.0, 0.0]);
    let decomposer = Decomposer::new(
        target,
        Some(stale),
        small_config(10),
        StdRng::seed_from_u64(8),
    )
    .expect("valid input");
    let result = decomposer.run();

    // Cold start is identified by the full-canvas background block
    assert_eq!(result.blocks[0].rect(), Rect::full(8, 8));
    assert_eq!(result.blocks[0].color, [128, 128, 128]);
}

#[test]
fn test_empty_image_is_a_fatal_input_error() {
    let target = Array3::<f32>::zeros((0, 8, 3));
    let result = Decomposer::new(
        target,
        None,
        DecomposerConfig::default(),
        StdRng::seed_from_u64(0),
    );
    assert!(matches!(
        result,
        Err(greedyrect::DecomposeError::InvalidDimensions { rows: 0, cols: 8 })
    ));
}

#[test]
fn test_zero_rounds_is_rejected() {
    let config = DecomposerConfig {
        rounds: 0,
        ..DecomposerConfig::default()
    };
    let result = Decomposer::new(
        flat_image(4, 4, [0.5; 3]),
        None,
        config,
        StdRng::seed_from_u64(0),
    );
    assert!(matches!(
        result,
        Err(greedyrect::DecomposeError::InvalidParameter { parameter: "rounds", .. })
    ));
}

#[test]
fn test_hex_color_encoding() {
    let block = Block {
        x: 0,
        y: 0,
        w: 1,
        h: 1,
        color: [255, 0, 171],
    };
    assert_eq!(block.hex_color(), "#ff00ab");
}
