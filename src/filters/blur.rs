//! Gaussian blur (spec §6), applied to the color path before the
//! grid builder computes color-distance weights.
//!
//! Grounded in `original_source/Trabalho_2/src/main.cc`'s repeated
//! `blurImg(image, passes)` calls: a small, fixed 3x3 kernel run
//! several times rather than one larger kernel, with the image edges
//! clamped (replicated) rather than wrapped or mirrored, matching the
//! boundary policy `filters::sobel` uses for the same reason.

use crate::color::Rgb;

const KERNEL: [[f64; 3]; 3] = [[1.0, 2.0, 1.0], [2.0, 4.0, 2.0], [1.0, 2.0, 1.0]];
const KERNEL_SUM: f64 = 16.0;

fn clamp(v: isize, max: usize) -> usize {
    v.clamp(0, max as isize - 1) as usize
}

fn blur_once(image: &[Vec<Rgb>]) -> Vec<Vec<Rgb>> {
    let height = image.len();
    let width = if height == 0 { 0 } else { image[0].len() };
    let mut out = vec![vec![Rgb::default(); width]; height];

    for y in 0..height {
        for x in 0..width {
            let (mut r, mut g, mut b) = (0.0, 0.0, 0.0);
            for (ky, row) in KERNEL.iter().enumerate() {
                for (kx, &weight) in row.iter().enumerate() {
                    let sy = clamp(y as isize + ky as isize - 1, height);
                    let sx = clamp(x as isize + kx as isize - 1, width);
                    let pixel = image[sy][sx];
                    r += weight * pixel.r as f64;
                    g += weight * pixel.g as f64;
                    b += weight * pixel.b as f64;
                }
            }
            out[y][x] = Rgb::new(
                (r / KERNEL_SUM).round() as u8,
                (g / KERNEL_SUM).round() as u8,
                (b / KERNEL_SUM).round() as u8,
            );
        }
    }
    out
}

/// Applies the 3x3 Gaussian kernel `passes` times. `passes == 0` returns the image unchanged.
pub fn gaussian_blur(image: &[Vec<Rgb>], passes: u32) -> Vec<Vec<Rgb>> {
    let mut current = image.to_vec();
    for _ in 0..passes {
        current = blur_once(&current);
    }
    current
}
