//! Target, canvas, and error bookkeeping with O(area-of-change) updates
//!
//! [`FrameBuffers`] owns the immutable target image, the running
//! reconstruction, and the derived per-pixel error map together with its
//! scalar sum. [`FrameBuffers::apply`] is the only mutator; every other
//! operation is read-only, so candidate evaluation can probe hypothetical
//! commits without touching state.

use crate::spatial::Rect;
use ndarray::{Array2, Array3};

/// Owned image buffers plus incremental error bookkeeping
///
/// Invariant between mutations: `error_map[[i, j]]` equals the mean squared
/// channel difference between target and canvas at `(i, j)`, and
/// `total_error` equals the sum of the error map. `apply` maintains both by
/// rescanning only the committed rectangle.
#[derive(Debug, Clone)]
pub struct FrameBuffers {
    target: Array3<f32>,
    canvas: Array3<f32>,
    error_map: Array2<f64>,
    total_error: f64,
    num_pixels: usize,
}

impl FrameBuffers {
    /// Build buffers from a target and an initial canvas of the same shape
    pub fn new(target: Array3<f32>, canvas: Array3<f32>) -> Self {
        debug_assert_eq!(target.dim(), canvas.dim());
        let (rows, cols, _) = target.dim();
        let error_map = Array2::from_shape_fn((rows, cols), |(i, j)| {
            pixel_error(&target, &canvas, i, j)
        });
        let total_error = error_map.sum();
        Self {
            target,
            canvas,
            error_map,
            total_error,
            num_pixels: rows * cols,
        }
    }

    /// Image height in pixels
    pub fn rows(&self) -> usize {
        self.target.dim().0
    }

    /// Image width in pixels
    pub fn cols(&self) -> usize {
        self.target.dim().1
    }

    /// Total pixel count
    pub const fn num_pixels(&self) -> usize {
        self.num_pixels
    }

    /// Mean squared error per pixel; lower is better
    pub fn fitness(&self) -> f64 {
        self.total_error / self.num_pixels as f64
    }

    /// Sum of the error map
    pub const fn total_error(&self) -> f64 {
        self.total_error
    }

    /// Current per-pixel error map
    pub const fn error_map(&self) -> &Array2<f64> {
        &self.error_map
    }

    /// The immutable target image
    pub const fn target(&self) -> &Array3<f32> {
        &self.target
    }

    /// The running reconstruction
    pub const fn canvas(&self) -> &Array3<f32> {
        &self.canvas
    }

    /// Consume the buffers, yielding the final canvas for reuse as the next
    /// call's previous canvas
    pub fn into_canvas(self) -> Array3<f32> {
        self.canvas
    }

    /// Sum of the current error map inside `rect`
    pub fn error_sum(&self, rect: Rect) -> f64 {
        let mut sum = 0.0;
        for i in rect.row_span() {
            for j in rect.col_span() {
                sum += self.error_map[[i, j]];
            }
        }
        sum
    }

    /// Arithmetic mean of target pixels inside `rect`
    pub fn region_mean_color(&self, rect: Rect) -> [f32; 3] {
        let mut acc = [0.0_f64; 3];
        for i in rect.row_span() {
            for j in rect.col_span() {
                for (c, channel) in acc.iter_mut().enumerate() {
                    *channel += f64::from(self.target[[i, j, c]]);
                }
            }
        }
        let area = rect.area() as f64;
        [
            (acc[0] / area) as f32,
            (acc[1] / area) as f32,
            (acc[2] / area) as f32,
        ]
    }

    /// Error sum `rect` would carry after being filled with `color`
    ///
    /// Channel-mean based, like the error map itself, so the hypothetical
    /// total a selector computes from this matches the committed total
    /// exactly.
    pub fn projected_error_sum(&self, rect: Rect, color: [f32; 3]) -> f64 {
        let mut sum = 0.0;
        for i in rect.row_span() {
            for j in rect.col_span() {
                sum += color_error(&self.target, i, j, color);
            }
        }
        sum
    }

    /// Commit `color` into `rect`: overwrite the canvas, rescan the error map
    /// inside the rectangle only, and fold the delta into the running total
    pub fn apply(&mut self, rect: Rect, color: [f32; 3]) {
        let mut old_sum = 0.0;
        let mut new_sum = 0.0;
        for i in rect.row_span() {
            for j in rect.col_span() {
                for (c, &channel) in color.iter().enumerate() {
                    self.canvas[[i, j, c]] = channel;
                }
                old_sum += self.error_map[[i, j]];
                let err = color_error(&self.target, i, j, color);
                self.error_map[[i, j]] = err;
                new_sum += err;
            }
        }
        self.total_error = self.total_error - old_sum + new_sum;
    }
}

/// Flat mean color of an H×W×3 image
pub fn mean_color(image: &Array3<f32>) -> [f32; 3] {
    let (rows, cols, _) = image.dim();
    let area = (rows * cols) as f64;
    let mut acc = [0.0_f64; 3];
    for i in 0..rows {
        for j in 0..cols {
            for (c, channel) in acc.iter_mut().enumerate() {
                *channel += f64::from(image[[i, j, c]]);
            }
        }
    }
    [
        (acc[0] / area) as f32,
        (acc[1] / area) as f32,
        (acc[2] / area) as f32,
    ]
}

/// A canvas of `rows × cols` filled with a single color
pub fn flat_canvas(rows: usize, cols: usize, color: [f32; 3]) -> Array3<f32> {
    Array3::from_shape_fn((rows, cols, 3), |(_, _, c)| color[c])
}

// Mean squared channel difference between target and canvas at one pixel
fn pixel_error(target: &Array3<f32>, canvas: &Array3<f32>, i: usize, j: usize) -> f64 {
    let mut sum = 0.0;
    for c in 0..3 {
        let d = f64::from(target[[i, j, c]]) - f64::from(canvas[[i, j, c]]);
        sum += d * d;
    }
    sum / 3.0
}

// Mean squared channel difference between target and a flat color at one pixel
fn color_error(target: &Array3<f32>, i: usize, j: usize, color: [f32; 3]) -> f64 {
    let mut sum = 0.0;
    for (c, &channel) in color.iter().enumerate() {
        let d = f64::from(target[[i, j, c]]) - f64::from(channel);
        sum += d * d;
    }
    sum / 3.0
}
