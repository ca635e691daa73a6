use crate::error::GradError;
use crate::tensor::Tensor;
use crate::types::Shape;

impl Tensor {
    /// Sums along `axis`, keeping the reduced dimension with size 1.
    /// `None` reduces everything to `(1, 1)`.
    pub fn sum(&self, axis: Option<usize>) -> Result<Tensor, GradError> {
        self.reduce(axis, 0.0, |acc, x| acc + x)
    }

    /// Maximum along `axis`, keeping the reduced dimension with size 1.
    pub fn max(&self, axis: Option<usize>) -> Result<Tensor, GradError> {
        self.reduce(axis, f64::NEG_INFINITY, f64::max)
    }

    fn reduce(
        &self,
        axis: Option<usize>,
        init: f64,
        f: impl Fn(f64, f64) -> f64,
    ) -> Result<Tensor, GradError> {
        let shape = self.shape();
        let cols = shape.cols;
        match axis {
            None => Ok(Tensor::scalar(self.data().iter().fold(init, |a, &x| f(a, x)))),
            Some(0) => {
                let mut out = vec![init; cols];
                for row in self.data().chunks(cols) {
                    for (acc, &x) in out.iter_mut().zip(row) {
                        *acc = f(*acc, x);
                    }
                }
                Ok(Tensor::from_parts(Shape::new(1, cols), out))
            }
            Some(1) => {
                let out = self
                    .data()
                    .chunks(cols)
                    .map(|row| row.iter().fold(init, |a, &x| f(a, x)))
                    .collect();
                Ok(Tensor::from_parts(Shape::new(shape.rows, 1), out))
            }
            Some(axis) => Err(GradError::InvalidAxis { axis }),
        }
    }
}
