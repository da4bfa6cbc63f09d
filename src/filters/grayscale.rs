//! Grayscale conversion feeding the Sobel gradient path.

use crate::color::Rgb;

/// Luma-weighted grayscale, `0.299 r + 0.587 g + 0.114 b`.
pub fn to_grayscale(image: &[Vec<Rgb>]) -> Vec<Vec<f64>> {
    image
        .iter()
        .map(|row| {
            row.iter()
                .map(|c| 0.299 * c.r as f64 + 0.587 * c.g as f64 + 0.114 * c.b as f64)
                .collect()
        })
        .collect()
}
