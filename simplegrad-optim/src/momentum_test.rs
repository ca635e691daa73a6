#[cfg(test)]
mod tests {
    use crate::momentum::{Momentum, MomentumConfig};
    use crate::Optimizer;
    use approx::assert_relative_eq;
    use simplegrad_core::{GradError, Graph, Tensor};

    #[test]
    fn test_momentum_first_steps() -> Result<(), GradError> {
        // loss = 3x, constant gradient 3: the average stays at 3.
        let x = Graph::variable(Tensor::scalar(0.0));
        let loss = &x * 3.0;
        let mut opt = Momentum::new(loss, vec![x.clone()], MomentumConfig { lr: 0.1, betta: 0.5 })?;
        opt.step()?;
        assert_relative_eq!(x.scalar()?, -0.3, epsilon = 1e-12);
        opt.step()?;
        assert_relative_eq!(x.scalar()?, -0.6, epsilon = 1e-12);
        Ok(())
    }

    #[test]
    fn test_momentum_blends_changing_gradient() -> Result<(), GradError> {
        // loss = x^2 from x = 1: grads 2, then 2 * 0.8 = 1.6.
        let x = Graph::variable(Tensor::scalar(1.0));
        let loss = x.pow(2.0)?;
        let mut opt = Momentum::new(loss, vec![x.clone()], MomentumConfig { lr: 0.1, betta: 0.5 })?;
        opt.step()?;
        assert_relative_eq!(x.scalar()?, 0.8, epsilon = 1e-12);
        opt.step()?;
        // average = 0.5 * 2 + 0.5 * 1.6 = 1.8
        assert_relative_eq!(x.scalar()?, 0.62, epsilon = 1e-12);
        Ok(())
    }

    #[test]
    fn test_momentum_invalid_betta() {
        let x = Graph::variable(Tensor::scalar(0.0));
        let result = Momentum::new(x.clone(), vec![x], MomentumConfig { lr: 0.1, betta: 1.0 });
        assert!(matches!(result, Err(GradError::ConfigurationError(_))));
    }

    #[test]
    fn test_momentum_set_lr_rejects_negative_rate() -> Result<(), GradError> {
        let x = Graph::variable(Tensor::scalar(0.0));
        let mut opt = Momentum::new(&x * 3.0, vec![x.clone()], MomentumConfig { lr: 0.1, betta: 0.5 })?;
        assert!(matches!(opt.set_lr(-1.0), Err(GradError::ConfigurationError(_))));
        assert_eq!(opt.lr(), 0.1);
        opt.set_lr(0.2)?;
        opt.step()?;
        assert_relative_eq!(x.scalar()?, -0.6, epsilon = 1e-12);
        Ok(())
    }

    #[test]
    fn test_momentum_failed_step_keeps_average() -> Result<(), GradError> {
        // loss = x^2 / d with d held outside the binding; d = 0 fails the step.
        let x = Graph::variable(Tensor::scalar(1.0));
        let d = Graph::variable(Tensor::scalar(1.0));
        let loss = &x.pow(2.0)? / &d;
        let mut opt = Momentum::new(loss, vec![x.clone()], MomentumConfig { lr: 0.1, betta: 0.5 })?;
        opt.step()?;
        assert_relative_eq!(x.scalar()?, 0.8, epsilon = 1e-12);

        d.set_value(Tensor::scalar(0.0))?;
        assert_eq!(opt.step(), Err(GradError::DivisionByZero));
        assert_relative_eq!(x.scalar()?, 0.8, epsilon = 1e-12);

        d.set_value(Tensor::scalar(1.0))?;
        opt.step()?;
        assert_relative_eq!(x.scalar()?, 0.62, epsilon = 1e-12);
        Ok(())
    }
}
