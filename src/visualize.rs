// Debug view of an alignment.
// What you see in the strip image, left to right, one output column per step:
//   top band    = the column of A used by this step (if any)
//   middle band = the column of B used by this step (if any)
//   bottom band = what happened: red = deletion, green = insertion,
//                 blue = substitution (brighter = cheaper), gray = exact match.

use crate::align::DistanceMatrix;
use crate::draw::Canvas;
use crate::types::{PixelBuffer, Rgb};
use std::f32::consts::PI;

/// Height of the annotation band under the two columns.
pub const DEFAULT_BAND_HEIGHT: usize = 8;

pub const BACKGROUND: Rgb = Rgb(127, 127, 127);
pub const DELETE_COLOR: Rgb = Rgb(255, 0, 0);
pub const INSERT_COLOR: Rgb = Rgb(0, 255, 0);

/// One move of the reconstructed alignment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AlignmentStep {
    /// Column `a` of A and column `b` of B lined up with no added cost.
    Match { a: usize, b: usize },
    /// Column `a` of A stands in for column `b` of B; `cost` is the matrix delta.
    Substitute { a: usize, b: usize, cost: f32 },
    /// Column `a` of A has no counterpart in B.
    Delete { a: usize },
    /// Column `b` of B has no counterpart in A.
    Insert { b: usize },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisualizeParams {
    pub threshold: f32,
    pub band_height: usize,
}

/// Walk the filled matrix from (0,0) to its far corner.
///
/// At each cell the three successors are compared (diagonal, then the deletion
/// branch, then the insertion branch) and the cheapest wins, earlier branches
/// winning ties. The order matters: it fixes which of several equally cheap
/// paths gets drawn.
pub fn alignment_path(d: &DistanceMatrix) -> Vec<AlignmentStep> {
    let (wa, wb) = (d.rows() - 1, d.cols() - 1);
    let mut steps = Vec::with_capacity(wa + wb);
    let (mut xa, mut xb) = (0, 0);

    while !(xa == wa && xb == wb) {
        if xa == wa {
            steps.push(AlignmentStep::Insert { b: xb });
            xb += 1;
        } else if xb == wb {
            steps.push(AlignmentStep::Delete { a: xa });
            xa += 1;
        } else {
            let diagonal = d.get(xa + 1, xb + 1);
            let deletion = d.get(xa + 1, xb);
            let insertion = d.get(xa, xb + 1);
            let min = insertion.min(deletion).min(diagonal);

            if diagonal == min {
                let before = d.get(xa, xb);
                steps.push(if diagonal != before {
                    AlignmentStep::Substitute { a: xa, b: xb, cost: diagonal - before }
                } else {
                    AlignmentStep::Match { a: xa, b: xb }
                });
                xa += 1;
                xb += 1;
            } else if deletion == min {
                steps.push(AlignmentStep::Delete { a: xa });
                xa += 1;
            } else {
                steps.push(AlignmentStep::Insert { b: xb });
                xb += 1;
            }
        }
    }
    steps
}

/// Band color for a substitution whose cost moved the matrix by `delta`.
/// Free-ish swaps are bright blue, expensive ones fade to black.
pub fn substitution_color(delta: f32) -> Rgb {
    let level = (255.0 * (delta * PI / 2.0).cos()).clamp(0.0, 255.0) as u8;
    Rgb(0, 0, level)
}

/// Output strip width: the wider input plus headroom for the extra gap columns.
pub fn strip_width(wa: usize, wb: usize, distance: f32, threshold: f32) -> usize {
    let headroom = (distance / threshold).ceil();
    wa.max(wb) + if headroom.is_finite() && headroom > 0.0 { headroom as usize } else { 0 }
}

/// Render the alignment of `a` and `b` described by `d` as an annotated strip.
pub fn visualize(a: &PixelBuffer, b: &PixelBuffer, d: &DistanceMatrix, params: &VisualizeParams) -> PixelBuffer {
    let width = strip_width(a.width(), b.width(), d.distance(), params.threshold);
    let band_y = a.height() + b.height();
    let mut canvas = Canvas::new(width, band_y + params.band_height, BACKGROUND);

    let top = |canvas: &mut Canvas, x: usize, col: usize| {
        if let Some(c) = a.column(col) {
            canvas.blit_column(c, x, 0);
        }
    };
    let bottom = |canvas: &mut Canvas, x: usize, col: usize| {
        if let Some(c) = b.column(col) {
            canvas.blit_column(c, x, a.height());
        }
    };

    for (x, step) in alignment_path(d).into_iter().enumerate() {
        if x >= width {
            break; // past the headroom; nothing more would be visible
        }
        let tag = match step {
            AlignmentStep::Match { a: ia, b: ib } => {
                top(&mut canvas, x, ia);
                bottom(&mut canvas, x, ib);
                None
            }
            AlignmentStep::Substitute { a: ia, b: ib, cost } => {
                top(&mut canvas, x, ia);
                bottom(&mut canvas, x, ib);
                Some(substitution_color(cost))
            }
            AlignmentStep::Delete { a: ia } => {
                top(&mut canvas, x, ia);
                Some(DELETE_COLOR)
            }
            AlignmentStep::Insert { b: ib } => {
                bottom(&mut canvas, x, ib);
                Some(INSERT_COLOR)
            }
        };
        if let Some(color) = tag {
            canvas.fill_rect(x as i32, band_y as i32, 1, params.band_height, color);
        }
    }

    canvas.into_buffer()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::align::{AlignParams, DEFAULT_THRESHOLD, align};

    fn strip(cols: &[u32], height: usize) -> PixelBuffer {
        let mut px = Vec::with_capacity(cols.len() * height);
        for _ in 0..height {
            px.extend_from_slice(cols);
        }
        PixelBuffer::from_pixels(cols.len(), height, px).unwrap()
    }

    fn params() -> VisualizeParams {
        VisualizeParams { threshold: DEFAULT_THRESHOLD, band_height: DEFAULT_BAND_HEIGHT }
    }

    #[test]
    fn identical_inputs_walk_the_diagonal() {
        let a = strip(&[0, 0xFFFFFF, 0], 2);
        let (_, d) = align(&a, &a, &AlignParams::default());
        let path = alignment_path(&d);
        assert_eq!(
            path,
            vec![
                AlignmentStep::Match { a: 0, b: 0 },
                AlignmentStep::Match { a: 1, b: 1 },
                AlignmentStep::Match { a: 2, b: 2 },
            ]
        );
    }

    #[test]
    fn exhausted_side_emits_gaps() {
        let a = strip(&[0, 0], 1);
        let empty = PixelBuffer::filled(0, 1, Rgb::WHITE);
        let (_, d) = align(&a, &empty, &AlignParams::default());
        assert_eq!(alignment_path(&d), vec![AlignmentStep::Delete { a: 0 }, AlignmentStep::Delete { a: 1 }]);

        let (_, d) = align(&empty, &a, &AlignParams::default());
        assert_eq!(alignment_path(&d), vec![AlignmentStep::Insert { b: 0 }, AlignmentStep::Insert { b: 1 }]);
    }

    #[test]
    fn ties_prefer_diagonal_then_deletion() {
        // All three successors of (0,0) cost 1: the diagonal wins.
        let d = DistanceMatrix::from_rows(&[&[0.0, 1.0], &[1.0, 1.0]]);
        assert_eq!(alignment_path(&d), vec![AlignmentStep::Substitute { a: 0, b: 0, cost: 1.0 }]);

        // Deletion and insertion tie below the diagonal: deletion wins.
        let d = DistanceMatrix::from_rows(&[&[0.0, 0.5, 1.0], &[0.5, 0.9, 0.6]]);
        assert_eq!(
            alignment_path(&d),
            vec![AlignmentStep::Delete { a: 0 }, AlignmentStep::Insert { b: 0 }, AlignmentStep::Insert { b: 1 }]
        );
    }

    #[test]
    fn identical_columns_force_the_diagonal() {
        // Identical columns copy d[i][j] even when a gap would be cheaper,
        // so two gray columns against one cost a full unit edge.
        let a = strip(&[0x808080, 0x808080], 1);
        let b = strip(&[0x808080], 1);
        let (dist, d) = align(&a, &b, &AlignParams::default());
        assert_eq!(dist, 1.0);
        assert_eq!(alignment_path(&d), vec![AlignmentStep::Match { a: 0, b: 0 }, AlignmentStep::Delete { a: 1 }]);
    }

    #[test]
    fn substitution_reports_cost_delta() {
        let a = strip(&[0, 0xFEFEFE, 0], 4);
        let b = strip(&[0, 0xFFFFFF, 0], 4);
        let (_, d) = align(&a, &b, &AlignParams::default());
        let path = alignment_path(&d);
        assert_eq!(path.len(), 3);
        match path[1] {
            AlignmentStep::Substitute { a: 1, b: 1, cost } => assert!((cost - 1.0 / 256.0).abs() < 1e-6),
            other => panic!("expected substitution, got {other:?}"),
        }
    }

    #[test]
    fn strip_has_expected_size_and_background() {
        let a = strip(&[0, 0, 0], 3);
        let b = strip(&[0, 0, 0, 0x00FF00, 0], 2);
        let (dist, d) = align(&a, &b, &AlignParams::default());
        let img = visualize(&a, &b, &d, &params());
        assert_eq!(img.width(), strip_width(3, 5, dist, DEFAULT_THRESHOLD));
        assert!(img.width() > 5);
        assert_eq!(img.height(), 3 + 2 + DEFAULT_BAND_HEIGHT);
        // The last column is never reached by a five-step path.
        assert_eq!(img.get(img.width() - 1, 0), BACKGROUND);
    }

    #[test]
    fn gap_columns_are_tagged_in_the_band() {
        let a = PixelBuffer::filled(0, 2, Rgb::WHITE);
        let b = strip(&[0, 0], 2);
        let (_, d) = align(&a, &b, &AlignParams::default());
        let img = visualize(&a, &b, &d, &params());
        let band_y = a.height() + b.height();
        assert_eq!(img.get(0, band_y), INSERT_COLOR);
        assert_eq!(img.get(1, band_y + DEFAULT_BAND_HEIGHT - 1), INSERT_COLOR);
        // B's band starts below A's rows even though A has no columns.
        assert_eq!(img.get(0, 0), BACKGROUND);
        assert_eq!(img.get(0, a.height()), Rgb::BLACK);

        let (_, d) = align(&b, &a, &AlignParams::default());
        let img = visualize(&b, &a, &d, &params());
        assert_eq!(img.get(1, b.height() + a.height()), DELETE_COLOR);
    }

    #[test]
    fn matched_columns_leave_band_gray() {
        let a = strip(&[0xFFFFFF, 0], 2);
        let (_, d) = align(&a, &a, &AlignParams::default());
        let img = visualize(&a, &a, &d, &params());
        assert_eq!(img.width(), 2);
        assert_eq!(img.get(0, 0), Rgb::WHITE);
        assert_eq!(img.get(1, 2), Rgb::BLACK);
        assert_eq!(img.get(0, 4), BACKGROUND);
    }

    #[test]
    fn substitution_color_fades_with_cost() {
        assert_eq!(substitution_color(0.0), Rgb(0, 0, 255));
        assert_eq!(substitution_color(1.0), Rgb(0, 0, 0));
        let mid = substitution_color(0.5);
        assert!(mid.2 > 0 && mid.2 < 255);
    }
}
