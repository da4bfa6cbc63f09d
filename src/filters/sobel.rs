//! Sobel gradient magnitude (spec §6), the second half of the
//! gradient path feeding the grid builder's gradient-distance term.

const GX: [[f64; 3]; 3] = [[-1.0, 0.0, 1.0], [-2.0, 0.0, 2.0], [-1.0, 0.0, 1.0]];
const GY: [[f64; 3]; 3] = [[-1.0, -2.0, -1.0], [0.0, 0.0, 0.0], [1.0, 2.0, 1.0]];

fn clamp(v: isize, max: usize) -> usize {
    v.clamp(0, max as isize - 1) as usize
}

/// Classical 3x3 Sobel kernel over a grayscale matrix, clamping
/// (replicating) out-of-bounds neighbors at the image edges.
pub fn sobel_magnitude(gray: &[Vec<f64>]) -> Vec<Vec<f64>> {
    let height = gray.len();
    let width = if height == 0 { 0 } else { gray[0].len() };
    let mut out = vec![vec![0.0; width]; height];

    for y in 0..height {
        for x in 0..width {
            let (mut gx, mut gy) = (0.0, 0.0);
            for ky in 0..3 {
                for kx in 0..3 {
                    let sy = clamp(y as isize + ky as isize - 1, height);
                    let sx = clamp(x as isize + kx as isize - 1, width);
                    let value = gray[sy][sx];
                    gx += GX[ky][kx] * value;
                    gy += GY[ky][kx] * value;
                }
            }
            out[y][x] = (gx * gx + gy * gy).sqrt();
        }
    }
    out
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn uniform_image_has_zero_gradient() {
        let gray = vec![vec![42.0; 4]; 4];
        for row in sobel_magnitude(&gray) {
            for v in row {
                assert_eq!(v, 0.0);
            }
        }
    }

    #[test]
    fn vertical_edge_yields_nonzero_gradient_at_the_boundary() {
        let mut gray = vec![vec![0.0; 4]; 4];
        for row in gray.iter_mut() {
            row[2] = 255.0;
            row[3] = 255.0;
        }
        let magnitude = sobel_magnitude(&gray);
        assert!(magnitude[1][1] > 0.0);
        assert!(magnitude[1][2] > 0.0);
    }

    #[test]
    fn preserves_matrix_dimensions() {
        let gray = vec![vec![0.0; 5]; 3];
        let magnitude = sobel_magnitude(&gray);
        assert_eq!(magnitude.len(), 3);
        assert_eq!(magnitude[0].len(), 5);
    }
}
