#[cfg(test)]
mod tests {
    use crate::gd::{Gd, GdConfig};
    use crate::Optimizer;
    use approx::assert_relative_eq;
    use simplegrad_core::{GradError, Graph, Tensor};

    #[test]
    fn test_gd_single_step() -> Result<(), GradError> {
        // d/dx (x^2) = 2x = 4 at x = 2
        let x = Graph::variable(Tensor::scalar(2.0));
        let loss = x.pow(2.0)?;
        let mut opt = Gd::new(loss, vec![x.clone()], GdConfig { lr: 0.1 })?;
        opt.step()?;
        assert_relative_eq!(x.scalar()?, 1.6, epsilon = 1e-12);
        Ok(())
    }

    #[test]
    fn test_gd_invalid_lr() {
        let x = Graph::variable(Tensor::scalar(2.0));
        let result = Gd::new(x.clone(), vec![x], GdConfig { lr: -0.1 });
        assert!(matches!(result, Err(GradError::ConfigurationError(_))));
    }

    #[test]
    fn test_gd_set_lr() -> Result<(), GradError> {
        let x = Graph::variable(Tensor::scalar(2.0));
        let mut opt = Gd::new(x.pow(2.0)?, vec![x.clone()], GdConfig::default())?;
        assert_eq!(opt.lr(), 1e-2);
        opt.set_lr(0.5)?;
        opt.step()?;
        // One full-size step lands on the minimum.
        assert_relative_eq!(x.scalar()?, 0.0, epsilon = 1e-12);
        assert_eq!(opt.variables().len(), 1);
        Ok(())
    }

    #[test]
    fn test_gd_set_lr_rejects_invalid_rate() -> Result<(), GradError> {
        let x = Graph::variable(Tensor::scalar(2.0));
        let mut opt = Gd::new(x.pow(2.0)?, vec![x.clone()], GdConfig { lr: 0.1 })?;
        for bad in [0.0, -0.5, f64::NAN, f64::INFINITY] {
            let err = opt.set_lr(bad).unwrap_err();
            assert!(matches!(err, GradError::ConfigurationError(_)));
        }
        assert_eq!(opt.lr(), 0.1);
        opt.step()?;
        assert_relative_eq!(x.scalar()?, 1.6, epsilon = 1e-12);
        Ok(())
    }
}
