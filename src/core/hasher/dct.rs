//! Two-dimensional DCT-II restricted to the lowest frequencies.
//!
//! Uses the orthonormal scaling (`sqrt(1/n)` for the DC row, `sqrt(2/n)`
//! otherwise). Only the `keep x keep` top-left block is ever needed for
//! hashing, so higher frequencies are never computed; the retained
//! coefficients are identical to those of the full transform.

use super::downsample::area_resize;
use crate::core::pixels::LumaPlane;
use std::f64::consts::PI;

/// Precomputed cosine basis for one transform size
#[derive(Debug, Clone)]
pub struct DctTable {
    size: usize,
    keep: usize,
    /// `keep` rows of `size` scaled basis values
    basis: Vec<f64>,
}

impl DctTable {
    /// Build the basis for an `size x size` input keeping `keep` frequencies per axis
    pub fn new(size: usize, keep: usize) -> Self {
        let keep = keep.min(size);
        let n = size as f64;

        let mut basis = Vec::with_capacity(keep * size);
        for k in 0..keep {
            let scale = if k == 0 {
                (1.0 / n).sqrt()
            } else {
                (2.0 / n).sqrt()
            };
            for i in 0..size {
                basis.push(scale * (PI * (i as f64 + 0.5) * k as f64 / n).cos());
            }
        }

        Self { size, keep, basis }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn keep(&self) -> usize {
        self.keep
    }

    fn basis_row(&self, k: usize) -> &[f64] {
        &self.basis[k * self.size..(k + 1) * self.size]
    }

    /// Transform a plane and return the low-frequency block.
    ///
    /// Planes that are not `size x size` are area-averaged to that size
    /// first. The result is row-major: index `v * keep + u` holds the
    /// coefficient for vertical frequency `v` and horizontal frequency `u`,
    /// so index 0 is the DC term.
    pub fn low_frequencies(&self, plane: &LumaPlane) -> Vec<f64> {
        if plane.width() != self.size || plane.height() != self.size {
            return self.transform(&area_resize(plane, self.size, self.size));
        }
        self.transform(plane)
    }

    fn transform(&self, plane: &LumaPlane) -> Vec<f64> {
        // Rows: size rows of `keep` horizontal coefficients
        let mut rows = Vec::with_capacity(self.size * self.keep);
        for y in 0..self.size {
            let row = plane.row(y);
            for u in 0..self.keep {
                rows.push(dot(self.basis_row(u), row));
            }
        }

        // Columns
        let mut block = Vec::with_capacity(self.keep * self.keep);
        for v in 0..self.keep {
            let basis = self.basis_row(v);
            for u in 0..self.keep {
                let coefficient = basis
                    .iter()
                    .enumerate()
                    .map(|(y, b)| b * rows[y * self.keep + u])
                    .sum::<f64>();
                block.push(coefficient);
            }
        }

        block
    }
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}
