use crate::pipeline::CoaError;

/// Gene × variable table of non-negative counts or frequencies.
///
/// Stored row-major; every row has `n_cols` entries.
#[derive(Debug, Clone, PartialEq)]
pub struct UsageMatrix {
    n_rows: usize,
    n_cols: usize,
    values: Vec<f64>,
}

impl UsageMatrix {
    pub fn from_rows(rows: &[Vec<f64>], n_cols: usize) -> Result<Self, CoaError> {
        let mut values = Vec::with_capacity(rows.len() * n_cols);
        for (idx, row) in rows.iter().enumerate() {
            if row.len() != n_cols {
                return Err(CoaError::DimensionMismatch {
                    context: format!("row {idx}"),
                    expected: n_cols,
                    found: row.len(),
                });
            }
            if let Some(col) = row.iter().position(|v| !v.is_finite() || *v < 0.0) {
                return Err(CoaError::InvalidValue {
                    row: idx,
                    col,
                    value: row[col],
                });
            }
            values.extend_from_slice(row);
        }
        Ok(Self {
            n_rows: rows.len(),
            n_cols,
            values,
        })
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn n_cols(&self) -> usize {
        self.n_cols
    }

    pub fn is_empty(&self) -> bool {
        self.n_rows == 0 || self.n_cols == 0
    }

    pub fn row(&self, i: usize) -> &[f64] {
        &self.values[i * self.n_cols..(i + 1) * self.n_cols]
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[i * self.n_cols + j]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        self.values.chunks_exact(self.n_cols.max(1)).take(self.n_rows)
    }
}

/// Square dense symmetric matrix, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct SymMatrix {
    pub n: usize,
    pub data: Vec<f64>,
}

impl SymMatrix {
    pub fn zeros(n: usize) -> Self {
        Self {
            n,
            data: vec![0.0; n * n],
        }
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[i * self.n + j]
    }

    #[inline]
    pub fn set(&mut self, i: usize, j: usize, v: f64) {
        self.data[i * self.n + j] = v;
    }

    pub fn trace(&self) -> f64 {
        (0..self.n).map(|i| self.get(i, i)).sum()
    }

    #[cfg(test)]
    pub fn from_rows(rows: &[Vec<f64>]) -> Self {
        let n = rows.len();
        let mut out = Self::zeros(n);
        for (i, row) in rows.iter().enumerate() {
            for (j, &v) in row.iter().enumerate().take(n) {
                out.set(i, j, v);
            }
        }
        out
    }
}

/// Dense rectangular matrix, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct DenseMatrix {
    pub n_rows: usize,
    pub n_cols: usize,
    pub data: Vec<f64>,
}

impl DenseMatrix {
    pub fn zeros(n_rows: usize, n_cols: usize) -> Self {
        Self {
            n_rows,
            n_cols,
            data: vec![0.0; n_rows * n_cols],
        }
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[i * self.n_cols + j]
    }

    #[inline]
    pub fn set(&mut self, i: usize, j: usize, v: f64) {
        self.data[i * self.n_cols + j] = v;
    }

    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.n_cols..(i + 1) * self.n_cols]
    }

    pub fn column(&self, j: usize) -> Vec<f64> {
        (0..self.n_rows).map(|i| self.get(i, j)).collect()
    }

    /// `AᵀA` (n_cols × n_cols).
    pub fn cross_product_cols(&self) -> SymMatrix {
        let p = self.n_cols;
        let mut out = SymMatrix::zeros(p);
        for row in self.data.chunks_exact(p.max(1)).take(self.n_rows) {
            for a in 0..p {
                let ra = row[a];
                if ra == 0.0 {
                    continue;
                }
                for b in a..p {
                    out.data[a * p + b] += ra * row[b];
                }
            }
        }
        mirror_upper(&mut out);
        out
    }

    /// `AAᵀ` (n_rows × n_rows).
    pub fn cross_product_rows(&self) -> SymMatrix {
        let n = self.n_rows;
        let mut out = SymMatrix::zeros(n);
        for a in 0..n {
            for b in a..n {
                out.data[a * n + b] = dot(self.row(a), self.row(b));
            }
        }
        mirror_upper(&mut out);
        out
    }

    /// `Aᵀx` for a vector `x` of length n_rows.
    pub fn transpose_mul_vec(&self, x: &[f64]) -> Vec<f64> {
        let mut out = vec![0.0; self.n_cols];
        for (i, &xi) in x.iter().enumerate().take(self.n_rows) {
            if xi == 0.0 {
                continue;
            }
            for (o, &a) in out.iter_mut().zip(self.row(i)) {
                *o += a * xi;
            }
        }
        out
    }
}

fn mirror_upper(m: &mut SymMatrix) {
    let n = m.n;
    for a in 0..n {
        for b in (a + 1)..n {
            m.data[b * n + a] = m.data[a * n + b];
        }
    }
}

#[inline]
pub fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

#[inline]
pub fn norm(a: &[f64]) -> f64 {
    dot(a, a).sqrt()
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/matrix.rs"]
mod tests;
