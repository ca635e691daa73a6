// Dense linear algebra kernels used by the matrix-product node and Newton's method.

use crate::error::GradError;
use crate::tensor::Tensor;
use crate::types::Shape;

/// Pivots smaller than this are treated as zero.
const PIVOT_EPSILON: f64 = 1e-12;

impl Tensor {
    /// Performs matrix multiplication C = A @ B.
    /// A: [M, K], B: [K, N] -> C: [M, N]
    pub fn matmul(&self, other: &Tensor) -> Result<Tensor, GradError> {
        let a_shape = self.shape();
        let b_shape = other.shape();
        if a_shape.cols != b_shape.rows {
            return Err(GradError::IncompatibleShapes {
                shape1: a_shape,
                shape2: b_shape,
                operation: "matmul".to_string(),
            });
        }
        let (m, k, n) = (a_shape.rows, a_shape.cols, b_shape.cols);
        let a = self.data();
        let b = other.data();
        let mut out = vec![0.0; m * n];
        for i in 0..m {
            for l in 0..k {
                let a_il = a[i * k + l];
                for j in 0..n {
                    out[i * n + j] += a_il * b[l * n + j];
                }
            }
        }
        Ok(Tensor::from_parts(Shape::new(m, n), out))
    }

    pub fn transpose(&self) -> Tensor {
        let shape = self.shape();
        let mut out = Vec::with_capacity(shape.numel());
        for c in 0..shape.cols {
            for r in 0..shape.rows {
                out.push(self.data()[r * shape.cols + c]);
            }
        }
        Tensor::from_parts(shape.transposed(), out)
    }

    /// Solves `self · x = rhs` by Gaussian elimination with partial pivoting.
    ///
    /// `self` must be square and `rhs` must have as many rows as `self`.
    pub fn solve(&self, rhs: &Tensor) -> Result<Tensor, GradError> {
        let shape = self.shape();
        if shape.rows != shape.cols {
            return Err(GradError::IncompatibleShapes {
                shape1: shape,
                shape2: shape.transposed(),
                operation: "solve (square matrix required)".to_string(),
            });
        }
        if rhs.shape().rows != shape.rows {
            return Err(GradError::IncompatibleShapes {
                shape1: shape,
                shape2: rhs.shape(),
                operation: "solve".to_string(),
            });
        }
        let n = shape.rows;
        let m = rhs.shape().cols;
        let mut a = self.data().to_vec();
        let mut b = rhs.data().to_vec();

        for col in 0..n {
            let pivot_row = (col..n)
                .max_by(|&i, &j| a[i * n + col].abs().total_cmp(&a[j * n + col].abs()))
                .unwrap_or(col);
            if a[pivot_row * n + col].abs() < PIVOT_EPSILON {
                return Err(GradError::SingularMatrix { size: n });
            }
            if pivot_row != col {
                for k in 0..n {
                    a.swap(col * n + k, pivot_row * n + k);
                }
                for k in 0..m {
                    b.swap(col * m + k, pivot_row * m + k);
                }
            }
            let pivot = a[col * n + col];
            for row in (col + 1)..n {
                let factor = a[row * n + col] / pivot;
                if factor == 0.0 {
                    continue;
                }
                for k in col..n {
                    a[row * n + k] -= factor * a[col * n + k];
                }
                for k in 0..m {
                    b[row * m + k] -= factor * b[col * m + k];
                }
            }
        }

        let mut x = vec![0.0; n * m];
        for row in (0..n).rev() {
            for k in 0..m {
                let mut acc = b[row * m + k];
                for j in (row + 1)..n {
                    acc -= a[row * n + j] * x[j * m + k];
                }
                x[row * m + k] = acc / a[row * n + row];
            }
        }
        Ok(Tensor::from_parts(Shape::new(n, m), x))
    }

    /// Inverse of a square, non-singular matrix.
    pub fn inverse(&self) -> Result<Tensor, GradError> {
        self.solve(&Tensor::eye(self.shape().rows)?)
    }
}
