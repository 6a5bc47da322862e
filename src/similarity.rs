// Per-column comparison used by every cell of the distance matrix.

use crate::types::{Column, Rgb};

/// Normalized visual difference between two columns, in [0, 1].
///
/// * a missing column on either side is maximally different (1);
/// * columns of different heights score 0, a compatibility rule kept on purpose;
/// * otherwise the summed |dR|+|dG|+|dB| over the column, divided by `H * 3 * 256`.
pub fn dissimilarity(a: Option<Column<'_>>, b: Option<Column<'_>>) -> f32 {
    let (Some(a), Some(b)) = (a, b) else {
        return 1.0;
    };
    if a.height() != b.height() {
        return 0.0;
    }
    let height = a.height();
    if height == 0 {
        return 0.0;
    }

    let diff: u64 = a
        .pixels()
        .zip(b.pixels())
        .map(|(pa, pb)| {
            let (ca, cb) = (Rgb::from_packed(pa), Rgb::from_packed(pb));
            (ca.0.abs_diff(cb.0) as u64) + (ca.1.abs_diff(cb.1) as u64) + (ca.2.abs_diff(cb.2) as u64)
        })
        .sum();

    diff as f32 / (height * 3 * 256) as f32
}

/// Exact pixel equality of two columns (same height, every pixel equal).
pub fn columns_identical(a: Column<'_>, b: Column<'_>) -> bool {
    a.height() == b.height() && a.pixels().eq(b.pixels())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PixelBuffer;

    #[test]
    fn missing_column_is_maximal() {
        let buf = PixelBuffer::filled(1, 4, Rgb::WHITE);
        assert_eq!(dissimilarity(buf.column(0), None), 1.0);
        assert_eq!(dissimilarity(None, buf.column(0)), 1.0);
        assert_eq!(dissimilarity(None, None), 1.0);
    }

    #[test]
    fn height_mismatch_scores_zero() {
        let tall = PixelBuffer::filled(1, 4, Rgb::WHITE);
        let short = PixelBuffer::filled(1, 3, Rgb::BLACK);
        assert_eq!(dissimilarity(tall.column(0), short.column(0)), 0.0);
        assert!(!columns_identical(tall.column(0).unwrap(), short.column(0).unwrap()));
    }

    #[test]
    fn white_against_black_is_just_under_one() {
        let white = PixelBuffer::filled(1, 2, Rgb::WHITE);
        let black = PixelBuffer::filled(1, 2, Rgb::BLACK);
        let d = dissimilarity(white.column(0), black.column(0));
        assert!((d - 255.0 / 256.0).abs() < 1e-6);
    }

    #[test]
    fn single_channel_difference_is_scaled_by_height() {
        // One pixel out of four differs by 128 in red only.
        let a = PixelBuffer::from_pixels(1, 4, vec![0; 4]).unwrap();
        let b = PixelBuffer::from_pixels(1, 4, vec![0x0080_0000, 0, 0, 0]).unwrap();
        let d = dissimilarity(a.column(0), b.column(0));
        assert!((d - 128.0 / (4.0 * 3.0 * 256.0)).abs() < 1e-7);
    }

    #[test]
    fn identical_columns_are_detected() {
        let a = PixelBuffer::from_pixels(2, 2, vec![1, 2, 3, 2]).unwrap();
        assert!(!columns_identical(a.column(0).unwrap(), a.column(1).unwrap()));
        let b = PixelBuffer::from_pixels(2, 2, vec![7, 1, 7, 3]).unwrap();
        assert!(columns_identical(a.column(0).unwrap(), b.column(1).unwrap()));
        assert_eq!(dissimilarity(a.column(0), b.column(1)), 0.0);
    }
}
