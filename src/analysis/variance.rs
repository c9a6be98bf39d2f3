//! Local variance estimation over a luminance signal
//!
//! The candidate size schedule is damped by the local detail level around the
//! sampled pixel, and the importance map divides error by it. Detail is
//! measured as windowed variance `E[s²] − E[s]²` of a luminance signal: the
//! image's own luminance on a cold start, the luminance of the absolute
//! frame difference on a warm start.

use ndarray::{Array2, Array3};
use num_traits::{Float, FromPrimitive};

// Rec. 601 luma coefficients
const LUMA_R: f32 = 0.2125;
const LUMA_G: f32 = 0.7154;
const LUMA_B: f32 = 0.0721;

/// Per-pixel luminance of an H×W×3 image
pub fn luminance(image: &Array3<f32>) -> Array2<f32> {
    let (rows, cols, _) = image.dim();
    Array2::from_shape_fn((rows, cols), |(i, j)| {
        LUMA_R * image[[i, j, 0]] + LUMA_G * image[[i, j, 1]] + LUMA_B * image[[i, j, 2]]
    })
}

/// Per-channel absolute difference of two same-shape images
pub fn absolute_difference(a: &Array3<f32>, b: &Array3<f32>) -> Array3<f32> {
    let mut diff = a.clone();
    diff.zip_mut_with(b, |x, &y| *x = (*x - y).abs());
    diff
}

/// Windowed variance of a signal, clamped non-negative
///
/// Computed as `uniform_filter(s²) − uniform_filter(s)²`; subtraction can go
/// slightly negative from rounding, which would poison the damping factor, so
/// results are floored at zero.
pub fn local_variance(signal: &Array2<f32>, window: usize) -> Array2<f32> {
    let mean = uniform_filter(signal, window);
    let squared = signal.mapv(|v| v * v);
    let mean_sq = uniform_filter(&squared, window);
    let mut var = mean_sq;
    var.zip_mut_with(&mean, |msq, &m| *msq = (*msq - m * m).max(0.0));
    var
}

/// Separable box mean with reflected boundaries
///
/// A window of `size` spans `[i - size/2, i + size - size/2 - 1]` and
/// out-of-range taps reflect symmetrically (`d c b a | a b c d | d c b a`),
/// so windows larger than the image remain well defined.
pub fn uniform_filter<T>(input: &Array2<T>, size: usize) -> Array2<T>
where
    T: Float + FromPrimitive,
{
    if size <= 1 {
        return input.clone();
    }
    let (rows, cols) = input.dim();
    let norm = T::from_usize(size).unwrap_or_else(T::one);
    let left = size / 2;

    // Horizontal pass
    let mut horizontal = Array2::zeros((rows, cols));
    for i in 0..rows {
        for j in 0..cols {
            let mut acc = T::zero();
            for t in 0..size {
                let idx = reflect_index(j as isize + t as isize - left as isize, cols);
                acc = acc + input[[i, idx]];
            }
            horizontal[[i, j]] = acc / norm;
        }
    }

    // Vertical pass
    let mut output = Array2::zeros((rows, cols));
    for i in 0..rows {
        for j in 0..cols {
            let mut acc = T::zero();
            for t in 0..size {
                let idx = reflect_index(i as isize + t as isize - left as isize, rows);
                acc = acc + horizontal[[idx, j]];
            }
            output[[i, j]] = acc / norm;
        }
    }
    output
}

// Symmetric reflection; iterates because a window wider than the axis can
// overshoot more than once
fn reflect_index(mut idx: isize, len: usize) -> usize {
    let len = len as isize;
    loop {
        if idx < 0 {
            idx = -idx - 1;
        } else if idx >= len {
            idx = 2 * len - idx - 1;
        } else {
            return idx as usize;
        }
    }
}
