// Edit distance over pixel columns.
// Each rendered string is treated as a sequence of columns; columns are matched
// for free when identical, substituted at their visual dissimilarity, or
// inserted/deleted outright at a fixed threshold cost.

use crate::error::{Error, Result};
use crate::similarity::{columns_identical, dissimilarity};
use crate::types::PixelBuffer;
use serde::{Deserialize, Serialize};

/// Cost of inserting or deleting one column in the interior of the matrix.
pub const DEFAULT_THRESHOLD: f32 = 0.085;

/// Per-column cost along the matrix boundary (row 0 and column 0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeCost {
    /// 1 per column, as the reference comparer does.
    #[default]
    Unit,
    /// The threshold per column, so a leading/trailing gap costs the same as an interior one.
    Threshold,
}

/// Costs used by [`align`]. Built through [`AlignParams::new`], so the
/// threshold is always finite and positive and distances never go negative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlignParams {
    threshold: f32,
    edge_cost: EdgeCost,
}

impl Default for AlignParams {
    fn default() -> Self {
        Self { threshold: DEFAULT_THRESHOLD, edge_cost: EdgeCost::Unit }
    }
}

impl AlignParams {
    pub fn new(threshold: f32, edge_cost: EdgeCost) -> Result<Self> {
        if !(threshold.is_finite() && threshold > 0.0) {
            return Err(Error::Config(format!("threshold must be a positive number, got {threshold}")));
        }
        Ok(Self { threshold, edge_cost })
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    pub fn edge_cost(&self) -> EdgeCost {
        self.edge_cost
    }

    fn edge_step(&self) -> f32 {
        match self.edge_cost {
            EdgeCost::Unit => 1.0,
            EdgeCost::Threshold => self.threshold,
        }
    }
}

/// Dense `(wa + 1) x (wb + 1)` grid of accumulated costs.
/// `get(i, j)` is the cheapest alignment of the first `i` columns of A with the first `j` of B.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    rows: usize, // wa + 1
    cols: usize, // wb + 1
    cells: Vec<f32>,
}

impl DistanceMatrix {
    fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols, cells: vec![0.0; rows * cols] }
    }

    /// Build a matrix from literal rows (tests of the path walk).
    #[cfg(test)]
    pub(crate) fn from_rows(rows: &[&[f32]]) -> Self {
        let cols = rows[0].len();
        let cells = rows.iter().flat_map(|r| r.iter().copied()).collect();
        Self { rows: rows.len(), cols, cells }
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f32 {
        assert!(i < self.rows && j < self.cols, "cell ({i}, {j}) outside {}x{} matrix", self.rows, self.cols);
        self.cells[i * self.cols + j]
    }

    #[inline]
    fn set(&mut self, i: usize, j: usize, v: f32) {
        self.cells[i * self.cols + j] = v;
    }

    /// Number of rows (columns of A plus one).
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns (columns of B plus one).
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// The final cell: total cost of aligning all of A with all of B.
    pub fn distance(&self) -> f32 {
        self.get(self.rows - 1, self.cols - 1)
    }
}

/// Fill the distance matrix for `a` against `b` and return the final distance with it.
pub fn align(a: &PixelBuffer, b: &PixelBuffer, params: &AlignParams) -> (f32, DistanceMatrix) {
    let (wa, wb) = (a.width(), b.width());
    let mut d = DistanceMatrix::new(wa + 1, wb + 1);

    // Boundary: pure deletions down the first column, pure insertions along the first row.
    let edge = params.edge_step();
    for i in 1..=wa {
        d.set(i, 0, i as f32 * edge);
    }
    for j in 1..=wb {
        d.set(0, j, j as f32 * edge);
    }

    for j in 0..wb {
        let slice_b = b.column(j);
        for i in 0..wa {
            let slice_a = a.column(i);

            let same = matches!((slice_a, slice_b), (Some(ca), Some(cb)) if columns_identical(ca, cb));
            let cost = if same {
                d.get(i, j) // an exact match carries the previous optimum forward
            } else {
                let delete = d.get(i, j + 1) + params.threshold;
                let insert = d.get(i + 1, j) + params.threshold;
                let substitute = d.get(i, j) + dissimilarity(slice_a, slice_b);
                delete.min(insert).min(substitute)
            };
            d.set(i + 1, j + 1, cost);
        }
    }

    (d.distance(), d)
}
